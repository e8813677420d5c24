//! Category discovery, snapshot replacement and search over HTTP

use crate::common::{category_page, create_test_config, mount_page, mount_status, search_page};
use novel_harvest::crawler::{Harvester, NovelOutcome};
use novel_harvest::storage::{NovelStore, SqliteStorage};
use novel_harvest::HarvestError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::MockServer;

#[tokio::test]
async fn test_discovery_collects_candidates_in_order() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &temp);

    mount_page(
        &server,
        "/xuanhuan/",
        category_page(&[("/1_1/", "One"), ("/2_2/", "Two")]),
    )
    .await;
    mount_page(&server, "/xiuzhen/", category_page(&[("/3_3/", "Three")])).await;

    let harvester = Harvester::from_config(&config).unwrap();
    let report = harvester.discover(&config.categories).await.unwrap();

    let uri = server.uri();
    assert_eq!(
        report.candidates,
        vec![
            format!("{}/1_1/", uri),
            format!("{}/2_2/", uri),
            format!("{}/3_3/", uri)
        ]
    );
    assert!(report.failures.is_empty());
    assert_eq!(harvester.known_urls().unwrap(), report.candidates);
}

#[tokio::test]
async fn test_second_discovery_replaces_snapshot() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &temp);
    let harvester = Harvester::from_config(&config).unwrap();

    mount_page(&server, "/xuanhuan/", category_page(&[("/1_1/", "One")])).await;
    mount_page(&server, "/xiuzhen/", category_page(&[("/2_2/", "Two")])).await;
    harvester.discover(&config.categories).await.unwrap();

    server.reset().await;
    mount_page(&server, "/xuanhuan/", category_page(&[("/5_5/", "Five")])).await;
    mount_status(&server, "/xiuzhen/", 502).await;
    let report = harvester.discover(&config.categories).await.unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].title, "修真小说");

    let store = SqliteStorage::new(Path::new(&config.output.database_path)).unwrap();
    let categories = store.load_categories().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].title, "玄幻小说");
    assert_eq!(
        categories[0].novel_urls().collect::<Vec<_>>(),
        vec![format!("{}/5_5/", server.uri())]
    );
}

#[tokio::test]
async fn test_failed_discovery_keeps_previous_snapshot() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &temp);
    let harvester = Harvester::from_config(&config).unwrap();

    mount_page(&server, "/xuanhuan/", category_page(&[("/1_1/", "One")])).await;
    mount_page(&server, "/xiuzhen/", category_page(&[])).await;
    harvester.discover(&config.categories).await.unwrap();

    server.reset().await;
    let result = harvester.discover(&config.categories).await;

    assert!(matches!(result, Err(HarvestError::Discovery(_))));
    assert_eq!(
        harvester.known_urls().unwrap(),
        vec![format!("{}/1_1/", server.uri())]
    );
}

#[tokio::test]
async fn test_search_then_download() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &temp);

    mount_page(
        &server,
        "/search.php",
        search_page(&[
            ("/9_9/", "Example Sequel", "Jane"),
            ("/1_1/", "Example", "Jane"),
        ]),
    )
    .await;
    mount_page(
        &server,
        "/1_1/",
        crate::common::detail_page("Example", "Jane", &[]),
    )
    .await;

    let harvester = Harvester::from_config(&config).unwrap();
    let found = harvester
        .search(&config.source.search_url, "Example")
        .await
        .unwrap();

    let url = format!("{}/1_1/", server.uri());
    assert_eq!(found.as_deref(), Some(url.as_str()));

    let outcome = harvester.download_novel(&url).await;
    assert!(matches!(outcome, NovelOutcome::Persisted(record) if record.title == "Example"));
}

#[tokio::test]
async fn test_search_without_exact_match() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &temp);

    mount_page(
        &server,
        "/search.php",
        search_page(&[("/9_9/", "Example Sequel", "Jane")]),
    )
    .await;

    let harvester = Harvester::from_config(&config).unwrap();
    let found = harvester
        .search(&config.source.search_url, "Example")
        .await
        .unwrap();

    assert_eq!(found, None);
}
