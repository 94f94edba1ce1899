use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration
///
/// All values have sensible defaults so `EngineConfig::default()` is a fully
/// working configuration backed by an in-memory page store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of hits per result page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Debounce window for coalescing parameter events (milliseconds).
    /// The first event is always delivered immediately.
    #[serde(default = "default_debounce_window_ms")]
    pub debounce_window_ms: u64,

    /// How long to wait for a render acknowledgement before reusing
    /// previously fetched data after a redirect (milliseconds)
    #[serde(default = "default_render_ack_timeout_ms")]
    pub render_ack_timeout_ms: u64,

    /// Product name appended to page titles
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Base URL of the search API, e.g. `https://example.org/portalapi/`
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Path for the embedded page-slot database; `None` keeps it in memory
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_window_ms: default_debounce_window_ms(),
            render_ack_timeout_ms: default_render_ack_timeout_ms(),
            product_name: default_product_name(),
            api_url: default_api_url(),
            store_path: None,
        }
    }
}

fn default_page_size() -> usize {
    10
}

fn default_debounce_window_ms() -> u64 {
    10
}

fn default_render_ack_timeout_ms() -> u64 {
    1_000
}

fn default_product_name() -> String {
    "Research Hub".to_string()
}

fn default_api_url() -> String {
    "http://localhost:9200/portalapi/".to_string()
}
