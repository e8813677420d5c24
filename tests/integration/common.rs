//! Shared fixtures: configuration and source-site markup

use novel_harvest::config::{
    CategoryEntry, Config, HttpConfig, OutputConfig, PacingConfig, SchedulerConfig, SourceConfig,
    UserAgentConfig,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
pub fn create_test_config(server_uri: &str, temp: &TempDir) -> Config {
    Config {
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        http: HttpConfig {
            timeout_secs: 5,
            connect_timeout_secs: 5,
        },
        pacing: PacingConfig {
            chapter_delay_ms: 0,
            novel_delay_ms: 0,
        },
        scheduler: SchedulerConfig {
            max_workers: 3,
            shuffle: true,
        },
        output: OutputConfig {
            database_path: temp.path().join("novels.db").display().to_string(),
            download_dir: temp.path().join("downloads").display().to_string(),
        },
        source: SourceConfig {
            search_url: format!("{}/search.php?searchkey={{title}}", server_uri),
        },
        categories: vec![
            CategoryEntry {
                title: "玄幻小说".to_string(),
                url: format!("{}/xuanhuan/", server_uri),
            },
            CategoryEntry {
                title: "修真小说".to_string(),
                url: format!("{}/xiuzhen/", server_uri),
            },
        ],
    }
}

pub fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html; charset=utf-8")
}

/// Serves `body` at `route`
pub async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Serves an error status at `route`
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn detail_page(title: &str, author: &str, chapters: &[(&str, &str)]) -> String {
    let links: String = chapters
        .iter()
        .map(|(href, name)| format!("<dd><a href=\"{}\">{}</a></dd>\n", href, name))
        .collect();
    format!(
        r#"<html><head><title>{title}</title></head><body>
        <div id="info">
            <h1>{title}</h1>
            <p>作&nbsp;&nbsp;&nbsp;&nbsp;者：{author}</p>
        </div>
        <div id="intro"><p>First line.</p><p>Second line.</p></div>
        <div id="list"><dl>
            <dt>最新章节</dt>
            <dd><a href="/notice.html">作者的话</a></dd>
            {links}
        </dl></div>
        </body></html>"#
    )
}

pub fn chapter_page(body: &str) -> String {
    format!(
        r#"<html><body><div id="content">{body}<script>ad();</script></div></body></html>"#
    )
}

pub fn category_page(novels: &[(&str, &str)]) -> String {
    let items: String = novels
        .iter()
        .map(|(href, title)| {
            format!(
                "<li><span class=\"s2\"><a href=\"{}\">{}</a></span><span class=\"s5\">Author</span></li>\n",
                href, title
            )
        })
        .collect();
    format!("<html><body><div class=\"l\"><ul>{items}</ul></div></body></html>")
}

pub fn search_page(rows: &[(&str, &str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(href, title, author)| {
            format!(
                "<tr><td class=\"odd\"><a href=\"{}\">{}</a></td><td class=\"odd\">{}</td></tr>\n",
                href, title, author
            )
        })
        .collect();
    format!("<html><body><table>{rows}</table></body></html>")
}
