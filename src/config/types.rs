use serde::Deserialize;

/// Placeholder in the search URL template replaced by the encoded title
pub const SEARCH_TITLE_PLACEHOLDER: &str = "{title}";

/// Main configuration structure for Novel-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub source: SourceConfig,
    /// Category listing pages walked by discovery, in order
    #[serde(default = "default_categories", rename = "category")]
    pub categories: Vec<CategoryEntry>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// HTTP client timeouts
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Courtesy delays towards the source site
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Delay before each chapter fetch (milliseconds)
    #[serde(rename = "chapter-delay-ms", default = "default_chapter_delay_ms")]
    pub chapter_delay_ms: u64,

    /// Delay after each novel in sequential batches (milliseconds)
    #[serde(rename = "novel-delay-ms", default = "default_novel_delay_ms")]
    pub novel_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            chapter_delay_ms: default_chapter_delay_ms(),
            novel_delay_ms: default_novel_delay_ms(),
        }
    }
}

/// Batch scheduling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Upper bound on novels downloaded in parallel
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: usize,

    /// Randomize batch order before dispatch
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            shuffle: default_shuffle(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Root directory of the per-novel JSON sidecars
    #[serde(rename = "download-dir")]
    pub download_dir: String,
}

/// Source site endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Search page URL; `{title}` is replaced by the URL-encoded title
    #[serde(rename = "search-url", default = "default_search_url")]
    pub search_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
        }
    }
}

/// A category listing page to enumerate
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryEntry {
    pub title: String,
    pub url: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_chapter_delay_ms() -> u64 {
    100
}

fn default_novel_delay_ms() -> u64 {
    3000
}

fn default_max_workers() -> usize {
    6
}

fn default_shuffle() -> bool {
    true
}

fn default_search_url() -> String {
    "https://www.biquge5200.com/modules/article/search.php?searchkey={title}".to_string()
}

/// The fixed category pages of the default source site
pub fn default_categories() -> Vec<CategoryEntry> {
    [
        ("玄幻小说", "https://www.biquge5200.com/xuanhuanxiaoshuo/"),
        ("修真小说", "https://www.biquge5200.com/xiuzhenxiaoshuo/"),
        ("都市小说", "https://www.biquge5200.com/dushixiaoshuo/"),
        ("穿越小说", "https://www.biquge5200.com/chuanyuexiaoshuo/"),
        ("网游小说", "https://www.biquge5200.com/wangyouxiaoshuo/"),
        ("科幻小说", "https://www.biquge5200.com/kehuanxiaoshuo/"),
        ("言情小说", "https://www.biquge5200.com/yanqingxiaoshuo/"),
        ("同人小说", "https://www.biquge5200.com/tongrenxiaoshuo/"),
    ]
    .into_iter()
    .map(|(title, url)| CategoryEntry {
        title: title.to_string(),
        url: url.to_string(),
    })
    .collect()
}
