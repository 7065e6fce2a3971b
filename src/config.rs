use crate::quote::client::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use crate::widget::asset::Asset;
use crate::widget::view::WidgetFamily;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String, // Exchange host the ticker endpoint lives on
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64, // Per-request timeout, a timed out fetch shows the error entry
    #[serde(default = "default_widgets")]
    pub widgets: Vec<WidgetConfig>, // Widgets the host keeps refreshed
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct WidgetConfig {
    pub asset: Asset, // "BTC" or "ETH", selects symbol pair, titles and preview data
    #[serde(default)]
    pub family: WidgetFamily, // Size variant to render, defaults to small
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            widgets: default_widgets(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_widgets() -> Vec<WidgetConfig> {
    vec![
        WidgetConfig {
            asset: Asset::Btc,
            family: WidgetFamily::Small,
        },
        WidgetConfig {
            asset: Asset::Eth,
            family: WidgetFamily::Small,
        },
    ]
}
