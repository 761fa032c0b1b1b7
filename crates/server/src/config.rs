use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub static_dir: PathBuf,
    pub data_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            static_dir: "dist".into(),
            data_file: "usersData.json".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file_overrides(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Ok(v) = std::env::var("APP__STATIC_DIR") {
        settings.static_dir = v.into();
    }

    if let Ok(v) = std::env::var("APP__DATA_FILE") {
        settings.data_file = v.into();
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        tracing::warn!("server.toml is not a flat table of strings; ignoring it");
        return;
    };
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("static_dir") {
        settings.static_dir = v.into();
    }
    if let Some(v) = file_cfg.get("data_file") {
        settings.data_file = v.into();
    }
}

/// Fails early when the static directory is missing; the data file is only read per
/// request so it may appear later.
pub fn validate_static_dir(settings: &Settings) -> anyhow::Result<()> {
    let metadata = fs::metadata(&settings.static_dir).with_context(|| {
        format!(
            "static asset directory '{}' is not readable",
            settings.static_dir.display()
        )
    })?;
    anyhow::ensure!(
        metadata.is_dir(),
        "static asset path '{}' is not a directory",
        settings.static_dir.display()
    );
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
