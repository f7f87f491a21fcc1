use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Server configuration stored locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server_url: String,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000/api".to_string(),
            last_updated: chrono::Utc::now(),
        }
    }
}

/// Manages JSON config files under the `.marquee` directory.
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create .marquee directory")?;
        }

        Ok(Self { config_dir })
    }

    fn get_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home_dir.join(".marquee"))
    }

    fn server_config_file(&self) -> PathBuf {
        self.config_dir.join("server.json")
    }

    /// Save the server configuration
    pub fn save_server_config(&self, config: &ServerConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .context("Failed to serialize server config")?;
        fs::write(self.server_config_file(), json).context("Failed to write server config")?;
        Ok(())
    }

    /// Load the server configuration, if one has been saved
    pub fn load_server_config(&self) -> Result<Option<ServerConfig>> {
        let path = self.server_config_file();
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).context("Failed to read server config")?;
        match serde_json::from_str(&json) {
            Ok(config) => Ok(Some(config)),
            Err(e) => {
                log::warn!("Ignoring corrupted server config: {}", e);
                Ok(None)
            }
        }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager {
            config_dir: temp_dir.path().to_path_buf(),
        }
    }

    #[test]
    fn save_and_load_server_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = test_manager(&temp_dir);

        let config = ServerConfig {
            server_url: "http://localhost:9000/api".to_string(),
            last_updated: chrono::Utc::now(),
        };
        manager.save_server_config(&config).unwrap();

        let loaded = manager.load_server_config().unwrap().unwrap();
        assert_eq!(loaded.server_url, "http://localhost:9000/api");
    }

    #[test]
    fn missing_config_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let manager = test_manager(&temp_dir);

        assert!(manager.load_server_config().unwrap().is_none());
    }

    #[test]
    fn corrupted_config_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let manager = test_manager(&temp_dir);

        fs::write(manager.server_config_file(), "{not json").unwrap();
        assert!(manager.load_server_config().unwrap().is_none());
    }
}
