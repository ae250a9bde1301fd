use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub matching: MatchingConfig,

    pub bot: BotConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/anidex.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8000,
            cors_allowed_origins: vec![
                "http://localhost:8000".to_string(),
                "http://127.0.0.1:8000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum fuzzy title score (0-100) accepted as a match.
    pub similarity_threshold: u8,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: constants::matching::DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub command_prefix: String,

    /// Discord bot token. Prefer `ANIDEX_BOT_TOKEN` over writing it here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: constants::bot::DEFAULT_COMMAND_PREFIX.to_string(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// `ANIDEX_DATABASE_URL`, `ANIDEX_PORT` and the bot token variables win
    /// over the file.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(token) = ["ANIDEX_BOT_TOKEN", "BOT_TOKEN"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|token| !token.trim().is_empty())
        {
            self.bot.token = Some(token);
        }

        if let Ok(url) = std::env::var("ANIDEX_DATABASE_URL")
            && !url.is_empty()
        {
            self.general.database_path = url;
        }

        if let Ok(port) = std::env::var("ANIDEX_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid ANIDEX_PORT value: {port}"))?;
        }

        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("anidex").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".anidex").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!(
                "min_db_connections ({}) cannot exceed max_db_connections ({})",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        if self.matching.similarity_threshold > constants::matching::MAX_SIMILARITY {
            anyhow::bail!(
                "Similarity threshold must be between 0 and {}, got {}",
                constants::matching::MAX_SIMILARITY,
                self.matching.similarity_threshold
            );
        }

        if self.bot.command_prefix.trim().is_empty() {
            anyhow::bail!("Bot command prefix cannot be empty");
        }

        if self.bot.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            anyhow::bail!("Bot token cannot be blank; remove it or set a real token");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.matching.similarity_threshold, 40);
        assert_eq!(config.bot.command_prefix, "!");
        assert_eq!(config.server.port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[matching]"));
        assert!(toml_str.contains("[bot]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [matching]
            similarity_threshold = 65
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.matching.similarity_threshold, 65);

        assert_eq!(config.bot.command_prefix, "!");
    }

    #[test]
    fn test_validate_rejects_threshold_above_100() {
        let mut config = Config::default();
        config.matching.similarity_threshold = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let mut config = Config::default();
        config.bot.command_prefix = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bot_token_from_file() {
        let config: Config = toml::from_str(
            r#"
            [bot]
            token = "discord-token"
        "#,
        )
        .unwrap();
        assert_eq!(config.bot.token.as_deref(), Some("discord-token"));
        assert_eq!(config.bot.command_prefix, "!");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_token() {
        let mut config = Config::default();
        config.bot.token = Some(" ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_path() {
        let path = std::env::temp_dir().join(format!("anidex-config-{}.toml", uuid::Uuid::new_v4()));
        let mut config = Config::default();
        config.server.port = 9123;
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.server.port, 9123);

        std::fs::remove_file(path).ok();
    }
}
