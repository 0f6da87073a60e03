//! App Configuration
//!
//! Read from the `data-config` JSON attribute of the mount element.

use log::LevelFilter;
use serde::Deserialize;

use crate::models::Todo;

/// Mount point selector
pub const MOUNT_SELECTOR: &str = "#app";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// localStorage key holding the list
    pub storage_key: String,
    /// Page heading
    pub title: String,
    /// `error`, `warn`, `info`, `debug`, `trace` or `off`
    pub log_level: String,
    /// Initial list when nothing is persisted yet
    pub seed: Vec<Todo>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: "todos".to_string(),
            title: "Todos".to_string(),
            log_level: "info".to_string(),
            seed: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Falls back to `Info` for unknown names
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Config from the mount element, plus a parse error to report once
    /// logging is up.
    pub fn from_document() -> (Self, Option<String>) {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(MOUNT_SELECTOR).ok().flatten())
            .and_then(|el| el.get_attribute("data-config"));
        match raw {
            None => (Self::default(), None),
            Some(raw) => match Self::from_json(&raw) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(format!("invalid data-config: {}", e))),
            },
        }
    }
}
