//! Shared doubles for crawler unit tests

use crate::crawler::{Transport, TransportError};
use crate::model::{Category, NovelDocument};
use crate::storage::{InsertOutcome, NovelStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves canned pages by exact URL and counts every request
#[derive(Default)]
pub struct StubTransport {
    pages: HashMap<String, Result<String, TransportError>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn failing(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(
            url.to_string(),
            Err(TransportError::Status {
                url: url.to_string(),
                status,
            }),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().unwrap_or_else(|| {
            Err(TransportError::Status {
                url: url.to_string(),
                status: 404,
            })
        })
    }
}

/// A store whose every call fails, as if the database were unreachable
pub struct UnavailableStore;

impl UnavailableStore {
    fn err<T>() -> StorageResult<T> {
        Err(StorageError::Database("connection refused".to_string()))
    }
}

impl NovelStore for UnavailableStore {
    fn exists_by_url(&self, _url: &str) -> StorageResult<bool> {
        Self::err()
    }

    fn insert_novel(&self, _doc: &NovelDocument) -> StorageResult<InsertOutcome> {
        Self::err()
    }

    fn count_novels(&self) -> StorageResult<u64> {
        Self::err()
    }

    fn replace_categories(&self, _categories: &[Category]) -> StorageResult<()> {
        Self::err()
    }

    fn load_categories(&self) -> StorageResult<Vec<Category>> {
        Self::err()
    }
}

/// A detail page in the source site's markup
pub fn detail_page(title: &str, author: &str, chapters: &[(&str, &str)]) -> String {
    let links: String = chapters
        .iter()
        .map(|(href, name)| format!("<dd><a href=\"{}\">{}</a></dd>\n", href, name))
        .collect();
    format!(
        r#"<html><body>
        <div id="info"><h1>{title}</h1><p>作&nbsp;&nbsp;&nbsp;&nbsp;者：{author}</p></div>
        <div id="intro"><p>An intro.</p></div>
        <div id="list"><dl>{links}</dl></div>
        </body></html>"#
    )
}

/// A chapter page in the source site's markup
pub fn chapter_page(body: &str) -> String {
    format!(r#"<html><body><div id="content">{body}</div></body></html>"#)
}
