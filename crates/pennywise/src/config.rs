use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/pennywise.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Origin of the REST backend; all calls go to `{base_url}/api/...`.
    pub base_url: String,
    /// Where the serialized session identity lives between runs.
    pub session_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            session_path: "config/session.json".to_string(),
        }
    }
}

/// Loads configuration from the default path plus `PENNYWISE_*` environment
/// overrides. The file is optional; defaults apply when it is absent.
pub fn load() -> Result<AppConfig> {
    load_from(DEFAULT_CONFIG_PATH)
}

pub fn load_from(path: &str) -> Result<AppConfig> {
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("PENNYWISE"));
    let settings: AppConfig = builder.build()?.try_deserialize()?;
    Ok(settings)
}
