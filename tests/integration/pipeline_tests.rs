//! Fetch-dedupe-persist pipeline over HTTP

use crate::common::{chapter_page, create_test_config, detail_page, html, mount_page, mount_status};
use novel_harvest::crawler::{
    BatchOptions, DownloadScheduler, FixedDelay, Harvester, NovelOutcome, SkipReason,
};
use novel_harvest::fingerprint;
use novel_harvest::storage::{NovelStore, SqliteStorage};
use novel_harvest::NovelRecord;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

fn scheduler(concurrent: bool) -> DownloadScheduler {
    DownloadScheduler::new(BatchOptions {
        concurrent,
        max_workers: 3,
        shuffle: true,
        novel_pacing: FixedDelay::none(),
    })
}

fn read_sidecar(download_dir: &str, id: &str) -> NovelRecord {
    let path = Path::new(download_dir).join(id).join(format!("{}.json", id));
    let text = std::fs::read_to_string(&path).expect("sidecar should exist");
    serde_json::from_str(&text).expect("sidecar should be a novel record")
}

#[tokio::test]
async fn test_single_novel_end_to_end() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &temp);

    mount_page(
        &server,
        "/1_1/",
        detail_page(
            "Example",
            "Jane",
            &[("/1_1/100.html", "第一章 Start"), ("101.html", "第二章 Onward")],
        ),
    )
    .await;
    mount_page(&server, "/1_1/100.html", chapter_page("Hello<br/>world")).await;
    mount_page(&server, "/1_1/101.html", chapter_page("<p>Second</p>")).await;

    let harvester = Harvester::from_config(&config).unwrap();
    let url = format!("{}/1_1/", server.uri());

    let outcome = harvester.download_novel(&url).await;

    let NovelOutcome::Persisted(record) = outcome else {
        panic!("expected persisted, got {:?}", outcome);
    };
    assert_eq!(record.id, fingerprint("Example"));
    assert_eq!(record.title, "Example");
    assert_eq!(record.author, "Jane");
    assert_eq!(record.intro, "First line. Second line.");
    assert_eq!(record.url, url);
    let chapters: Vec<_> = record
        .chapters
        .iter()
        .map(|c| (c.name.as_str(), c.body.as_str()))
        .collect();
    assert_eq!(
        chapters,
        vec![("第一章 Start", "Hello\nworld"), ("第二章 Onward", "Second")]
    );

    assert_eq!(read_sidecar(&config.output.download_dir, &record.id), record);

    let store = SqliteStorage::new(Path::new(&config.output.database_path)).unwrap();
    assert!(store.exists_by_url(&url).unwrap());
    assert_eq!(store.count_novels().unwrap(), 1);
}

#[tokio::test]
async fn test_rerun_fetches_nothing_twice() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &temp);

    Mock::given(method("GET"))
        .and(path("/1_1/"))
        .respond_with(html(detail_page(
            "Example",
            "Jane",
            &[("/1_1/100.html", "第一章 Start")],
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1_1/100.html"))
        .respond_with(html(chapter_page("Hello")))
        .expect(1)
        .mount(&server)
        .await;

    let harvester = Harvester::from_config(&config).unwrap();
    let urls = vec![format!("{}/1_1/", server.uri())];

    let first = harvester.download_batch(&scheduler(false), urls.clone()).await;
    let second = harvester.download_batch(&scheduler(false), urls).await;

    assert!(matches!(first[0].1, NovelOutcome::Persisted(_)));
    assert_eq!(second[0].1, NovelOutcome::Skipped(SkipReason::AlreadyStored));
    // Mock expectations verify the single detail and chapter fetch on drop
}

#[tokio::test]
async fn test_failed_chapter_is_left_out() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &temp);

    mount_page(
        &server,
        "/1_1/",
        detail_page(
            "Example",
            "Jane",
            &[
                ("/1_1/1.html", "第一章"),
                ("/1_1/2.html", "第二章"),
                ("/1_1/3.html", "第三章"),
            ],
        ),
    )
    .await;
    mount_page(&server, "/1_1/1.html", chapter_page("one")).await;
    mount_status(&server, "/1_1/2.html", 500).await;
    mount_page(&server, "/1_1/3.html", chapter_page("three")).await;

    let harvester = Harvester::from_config(&config).unwrap();
    let outcome = harvester
        .download_novel(&format!("{}/1_1/", server.uri()))
        .await;

    let NovelOutcome::Persisted(record) = outcome else {
        panic!("expected persisted, got {:?}", outcome);
    };
    let names: Vec<_> = record.chapters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["第一章", "第三章"]);
}

#[tokio::test]
async fn test_batch_isolates_failing_novel() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &temp);

    for (route, title) in [("/1_1/", "One"), ("/3_3/", "Three")] {
        mount_page(&server, route, detail_page(title, "Jane", &[])).await;
    }
    mount_status(&server, "/2_2/", 503).await;

    let harvester = Harvester::from_config(&config).unwrap();
    let urls: Vec<String> = ["/1_1/", "/2_2/", "/3_3/"]
        .iter()
        .map(|route| format!("{}{}", server.uri(), route))
        .collect();

    let results = harvester.download_batch(&scheduler(true), urls).await;

    assert_eq!(results.len(), 3);
    let failed: Vec<_> = results.iter().filter(|(_, o)| o.is_failed()).collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].0.ends_with("/2_2/"));

    let store = SqliteStorage::new(Path::new(&config.output.database_path)).unwrap();
    assert_eq!(store.count_novels().unwrap(), 2);
}

#[tokio::test]
async fn test_missing_title_fails_without_persisting() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &temp);

    mount_page(
        &server,
        "/1_1/",
        "<html><body><p>Maintenance</p></body></html>".to_string(),
    )
    .await;

    let harvester = Harvester::from_config(&config).unwrap();
    let outcome = harvester
        .download_novel(&format!("{}/1_1/", server.uri()))
        .await;

    assert!(matches!(&outcome, NovelOutcome::Failed(reason) if reason.contains("title")));
    assert!(!Path::new(&config.output.download_dir).exists());

    let store = SqliteStorage::new(Path::new(&config.output.database_path)).unwrap();
    assert_eq!(store.count_novels().unwrap(), 0);
}
