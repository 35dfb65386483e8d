use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Application configuration. Missing keys fall back to the defaults
/// below, so an empty or absent file still yields a usable config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app_name: String,
    pub app_version: String,
    pub debug: bool,
    pub theme: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut theme = HashMap::new();
        theme.insert("primary_color".into(), "#FF6B6B".into());
        theme.insert("background_color".into(), "#FFFFFF".into());
        theme.insert("secondary_background_color".into(), "#F0F2F6".into());
        theme.insert("text_color".into(), "#404040".into());

        Self {
            app_name: "Hello Dashboard".into(),
            app_version: "0.1.0".into(),
            debug: false,
            theme,
        }
    }
}

/// Load configuration from an optional TOML file. A missing file is not
/// an error; a present but unreadable or invalid one is.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, String> {
    let Some(path) = path.filter(|p| p.exists()) else {
        return Ok(AppConfig::default());
    };

    let raw = fs::read_to_string(path).map_err(|e| format!("Failed to read config: {}", e))?;
    toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))
}
