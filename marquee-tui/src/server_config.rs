use crate::config::{ConfigManager, ServerConfig};
use anyhow::Result;

/// Server configuration utility for managing the API base URL
pub struct ServerConfigManager {
    config_manager: ConfigManager,
}

impl ServerConfigManager {
    pub fn new() -> Result<Self> {
        let config_manager = ConfigManager::new()?;
        Ok(Self { config_manager })
    }

    /// Determine the server URL to use based on priority:
    /// 1. CLI argument (highest priority)
    /// 2. Environment variable MARQUEE_SERVER_URL
    /// 3. Saved configuration file
    /// 4. Built-in default (lowest priority)
    pub fn determine_server_url(&self, cli_override: Option<String>) -> Result<String> {
        if let Some(url) = cli_override {
            return Ok(url);
        }

        if let Ok(url) = std::env::var("MARQUEE_SERVER_URL") {
            return Ok(url);
        }

        if let Some(config) = self.config_manager.load_server_config()? {
            return Ok(config.server_url);
        }

        Ok(Self::default_server_url())
    }

    fn default_server_url() -> String {
        ServerConfig::default().server_url
    }

    /// Save the server URL so it is reused on the next start
    pub fn save_server_url(&self, server_url: String) -> Result<()> {
        let config = ServerConfig {
            server_url,
            last_updated: chrono::Utc::now(),
        };
        self.config_manager.save_server_config(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn cli_override_has_highest_priority() {
        let manager = ServerConfigManager::new().unwrap();

        let url = manager
            .determine_server_url(Some("http://cli-override:8000/api".to_string()))
            .unwrap();
        assert_eq!(url, "http://cli-override:8000/api");
    }

    #[test]
    fn env_var_beats_saved_config() {
        let manager = ServerConfigManager::new().unwrap();

        env::set_var("MARQUEE_SERVER_URL", "http://env-override:8000/api");
        let url = manager.determine_server_url(None).unwrap();
        env::remove_var("MARQUEE_SERVER_URL");

        assert_eq!(url, "http://env-override:8000/api");
    }
}
