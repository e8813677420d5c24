//! Pattern-based extraction of novel data from page text
//!
//! Every function here is pure. Patterns locate a fragment of the page; the
//! fragment is then run through an HTML fragment parser to strip tags and
//! decode entities. A pattern that does not match yields `None` or an empty
//! list, never an error.

use crate::model::NovelListing;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;
use url::Url;

/// Glyphs that mark a link name as a real chapter ("第…章")
///
/// Navigation and front-matter links share the chapter-list markup but never
/// carry either glyph.
pub const CHAPTER_MARKERS: [char; 2] = ['第', '章'];

static TITLE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?is)<h1[^>]*>(.*?)</h1>"));

static AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?is)作(?:&nbsp;|\s|\x{3000})*者\s*[：:](.*?)</p>"));

static INTRO: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?is)<div\s+id="intro"[^>]*>(.*?)</div>"#));

static CHAPTER_LINK: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"(?i)<dd>\s*<a\s+href="([^"]*)"[^>]*>(.*?)</a>\s*</dd>"#)
});

static CONTENT: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?is)<div\s+id="content"[^>]*>(.*?)</div>"#));

static CATEGORY_NOVEL: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r#"(?is)<li>\s*<span class="s2">\s*<a\s+href="([^"]*)"[^>]*>(.*?)</a>\s*</span>\s*<span class="s5">.*?</span>\s*</li>"#,
    )
});

static SEARCH_ROW: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r#"(?is)<td class="odd">\s*<a\s+href="([^"]*)"[^>]*>(.*?)</a>\s*</td>.*?<td class="odd">(.*?)</td>"#,
    )
});

static SCRIPT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?is)<script\b.*?</script>"));

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)<br\s*/?>|</?p(?:\s[^>]*)?>"));

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static extraction pattern must compile")
}

/// A chapter link from the chapter index, in page order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterLink {
    /// The href as written on the page (may be relative)
    pub url: String,
    pub name: String,
}

/// One row of a search results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub author: String,
}

/// Extracts the novel title from the first `<h1>`
pub fn extract_title(html: &str) -> Option<String> {
    capture(&TITLE, html)
        .map(|t| fragment_text(t).trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Extracts the author from the "作者：" line of the detail page
pub fn extract_author(html: &str) -> Option<String> {
    capture(&AUTHOR, html)
        .map(|a| fragment_text(a).trim().to_string())
        .filter(|a| !a.is_empty())
}

/// Extracts the introduction, with markup removed and spacing collapsed
///
/// The source pads paragraphs with full-width spaces; those and any run of
/// whitespace collapse to a single space.
pub fn extract_intro(html: &str) -> Option<String> {
    capture(&INTRO, html).map(|raw| {
        let text = fragment_text(&LINE_BREAK.replace_all(raw, "\n"));
        WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
    })
}

/// Extracts chapter links whose visible name carries a chapter marker
///
/// Order matches the page, which is reading order.
pub fn extract_chapter_links(html: &str) -> Vec<ChapterLink> {
    CHAPTER_LINK
        .captures_iter(html)
        .filter_map(|caps| {
            let url = caps.get(1)?.as_str().trim().to_string();
            let name = fragment_text(caps.get(2)?.as_str()).trim().to_string();
            Some(ChapterLink { url, name })
        })
        .filter(|link| !link.url.is_empty() && is_chapter_name(&link.name))
        .collect()
}

/// Whether a link name looks like a chapter title
pub fn is_chapter_name(name: &str) -> bool {
    name.contains(CHAPTER_MARKERS)
}

/// Extracts the chapter text from the content container
///
/// Paragraph and line breaks become newlines; each line is trimmed
/// (full-width indentation included) and blank lines are dropped. Returns
/// `None` when the container is missing.
pub fn extract_chapter_body(html: &str) -> Option<String> {
    let raw = capture(&CONTENT, html)?;
    let without_scripts = SCRIPT.replace_all(raw, "");
    let with_breaks = LINE_BREAK.replace_all(&without_scripts, "\n");
    let text = fragment_text(&with_breaks);

    let body = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Some(body)
}

/// Extracts `(url, title)` pairs from a category listing page
pub fn extract_category_novel_links(html: &str) -> Vec<NovelListing> {
    CATEGORY_NOVEL
        .captures_iter(html)
        .filter_map(|caps| {
            let url = caps.get(1)?.as_str().trim().to_string();
            let title = fragment_text(caps.get(2)?.as_str()).trim().to_string();
            (!url.is_empty()).then_some(NovelListing { url, title })
        })
        .collect()
}

/// Extracts result rows from a search page
pub fn extract_search_results(html: &str) -> Vec<SearchHit> {
    SEARCH_ROW
        .captures_iter(html)
        .filter_map(|caps| {
            Some(SearchHit {
                url: caps.get(1)?.as_str().trim().to_string(),
                title: fragment_text(caps.get(2)?.as_str()).trim().to_string(),
                author: fragment_text(caps.get(3)?.as_str()).trim().to_string(),
            })
        })
        .collect()
}

/// Resolves a link href to an absolute http(s) URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.to_string())
    } else {
        None
    }
}

fn capture<'a>(pattern: &Regex, html: &'a str) -> Option<&'a str> {
    pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Text content of an HTML fragment with entities decoded
fn fragment_text(fragment: &str) -> String {
    Html::parse_fragment(fragment)
        .root_element()
        .text()
        .collect::<String>()
}
