use serde::Deserialize;

/// Main configuration structure for Data-Grab
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP surface configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server listens on
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,

    /// Maximum accepted request body size for uploads (bytes)
    #[serde(rename = "max-upload-bytes", default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Per-page fetch timeout (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// User agent sent with every page fetch
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Tags selected when a request names none
    #[serde(rename = "default-tags", default = "default_tags")]
    pub default_tags: Vec<String>,
}

/// Generated file configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Prefix of every suggested filename, e.g. `output_2024-01-01_12-00-00.csv`
    #[serde(rename = "filename-prefix", default = "default_filename_prefix")]
    pub filename_prefix: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("DataGrab/{}", env!("CARGO_PKG_VERSION"))
}

fn default_tags() -> Vec<String> {
    vec!["a".to_string()]
}

fn default_filename_prefix() -> String {
    "output".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
            default_tags: default_tags(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename_prefix: default_filename_prefix(),
        }
    }
}
