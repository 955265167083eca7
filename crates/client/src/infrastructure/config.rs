//! Client configuration
//!
//! Layered: built-in defaults, an optional `loreline.toml` beside the
//! binary, then `LORELINE_`-prefixed environment variables.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the resource API
    pub api_base_url: String,
    /// URL of the push channel
    pub ws_url: String,
    /// Override for the timeline cache directory
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .set_default("api_base_url", "http://127.0.0.1:8080/api")?
            .set_default("ws_url", "ws://127.0.0.1:8080/ws")?
            .add_source(config::File::with_name("loreline").required(false))
            .add_source(config::Environment::with_prefix("LORELINE"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_sources() {
        let config = ClientConfig::load().unwrap();
        assert!(config.ws_url.starts_with("ws://"));
        assert!(config.api_base_url.starts_with("http://"));
    }
}
