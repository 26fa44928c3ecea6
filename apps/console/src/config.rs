use std::{collections::HashMap, fs};

#[derive(Debug)]
pub struct Settings {
    pub server_url: String,
    pub csrf_token: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            csrf_token: String::new(),
        }
    }
}

/// Defaults, overridden by `console.toml`, overridden by environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("csrf_token") {
                settings.csrf_token = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("ADMIN_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("ADMIN_CSRF_TOKEN") {
        settings.csrf_token = v;
    }

    settings
}
