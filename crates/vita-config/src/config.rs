use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub mail: MailConfig,
    pub profile: ProfileConfig,
    pub sessions: SessionsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a JSON file. A missing file yields the
    /// default configuration; a malformed file is an error.
    pub async fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        info!("Loading config from {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural validation, independent of the environment
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero".into()));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("llm.base_url must not be empty".into()));
        }
        if self.mail.enabled && self.mail.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "mail.host must be set when mail is enabled".into(),
            ));
        }
        Ok(())
    }

    /// Resolve credentials from the environment, once, at startup.
    ///
    /// A missing required credential is fatal here; the process must not
    /// come up partially operational.
    pub fn resolve_secrets(&self) -> ConfigResult<Secrets> {
        let api_key = std::env::var(&self.llm.api_key_env)
            .map_err(|_| ConfigError::MissingSecret(self.llm.api_key_env.clone()))?;

        let mail_password = if self.mail.enabled {
            let password = std::env::var(&self.mail.password_env)
                .map_err(|_| ConfigError::MissingSecret(self.mail.password_env.clone()))?;
            Some(password)
        } else {
            None
        };

        Ok(Secrets {
            api_key,
            mail_password,
        })
    }
}

/// Credentials resolved from the environment at startup
#[derive(Clone)]
pub struct Secrets {
    pub api_key: String,
    pub mail_password: Option<String>,
}

impl std::fmt::Debug for Secrets {
    // Never print credential material
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("api_key", &"***")
            .field("mail_password", &self.mail_password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors: true,
        }
    }
}

/// Chat-completion provider configuration. The API key itself never lives
/// in the file; `api_key_env` names the environment variable holding it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.7,
            timeout_seconds: 60,
        }
    }
}

/// Contact-form SMTP relay configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MailConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password_env: String,
    /// Envelope sender
    pub from: String,
    /// Where contact-form messages are delivered
    pub to: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: String::new(),
            password_env: "VITA_MAIL_PASSWORD".to_string(),
            from: String::new(),
            to: String::new(),
        }
    }
}

/// Profile source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    /// Optional path to a biography text file; the compiled-in profile is
    /// used when absent
    pub path: Option<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Dominik Späth".to_string(),
            path: None,
        }
    }
}

/// In-memory session housekeeping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionsConfig {
    /// Sessions idle beyond this many seconds are dropped
    pub idle_timeout_secs: u64,
    pub cleanup_interval_secs: u64,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 1800,
            cleanup_interval_secs: 300,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required environment variable: {0}")]
    MissingSecret(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(!config.mail.enabled);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"server": {"port": 4000}}"#).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_validation_rejects_zero_port() {
        let config: Config = serde_json::from_str(r#"{"server": {"port": 0}}"#).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let mut config = Config::default();
        config.llm.api_key_env = "VITA_TEST_NO_SUCH_KEY".to_string();
        let err = config.resolve_secrets().unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret(var) if var == "VITA_TEST_NO_SUCH_KEY"));
    }

    #[test]
    fn test_mail_password_only_required_when_enabled() {
        let mut config = Config::default();
        config.llm.api_key_env = "VITA_TEST_API_KEY".to_string();
        std::env::set_var("VITA_TEST_API_KEY", "sk-test");

        let secrets = config.resolve_secrets().unwrap();
        assert!(secrets.mail_password.is_none());

        config.mail.enabled = true;
        config.mail.password_env = "VITA_TEST_NO_SUCH_MAIL_PW".to_string();
        assert!(matches!(
            config.resolve_secrets(),
            Err(ConfigError::MissingSecret(_))
        ));

        std::env::remove_var("VITA_TEST_API_KEY");
    }

    #[tokio::test]
    async fn test_load_missing_file_defaults() {
        let config = Config::load(Path::new("/tmp/vita-test-nonexistent.json"))
            .await
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.server.port = 9191;
        tokio::fs::write(&path, serde_json::to_string_pretty(&config).unwrap())
            .await
            .unwrap();

        let loaded = Config::load(&path).await.unwrap();
        assert_eq!(loaded.server.port, 9191);
    }
}
