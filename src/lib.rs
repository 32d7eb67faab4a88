//! # impact-insights lib

use std::{env, sync::LazyLock};

use log::warn;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

pub mod api;
pub mod debounce;
pub mod detail;
pub mod ds;
pub mod error;
pub mod gui;
pub mod model;
pub mod route;
pub mod search;
pub mod utils;

pub static VERSION: &str = env!("CARGO_PKG_VERSION");

pub static CHANNEL_BUFFER_DEFAULT: usize = 64;

/// Companies shown per result page.
pub static PER_PAGE: u32 = 5;

/// Environment variable overriding the backend base URL.
pub static API_URL_ENV: &str = "IMPACT_API_URL";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub timeout_secs: u64,
}

pub async fn init(api_base: Option<String>) {
    let _ = env_logger::Builder::new()
        .parse_filters(env::var("LOG").as_deref().unwrap_or("warn"))
        .try_init();

    let api_base = api_base.or_else(|| {
        env::var(API_URL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
    });

    if let Some(api_base) = api_base {
        CONFIG.write().await.api_base = api_base.trim().to_string();
    }
}

static CONFIG: LazyLock<RwLock<Config>> = LazyLock::new(|| {
    let config = match confy::load::<Config>(env!("CARGO_PKG_NAME"), None) {
        Ok(config) => config,
        Err(err) => {
            warn!("[Config] {err}, using defaults");
            Config::default()
        }
    };

    RwLock::new(config)
});

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:5001".to_string(),
            timeout_secs: 30,
        }
    }
}
