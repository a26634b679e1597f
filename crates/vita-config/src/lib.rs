pub mod config;

pub use config::{
    Config, ConfigError, ConfigResult, LlmConfig, LoggingConfig, MailConfig, ProfileConfig,
    Secrets, ServerConfig, SessionsConfig,
};

use std::path::PathBuf;

/// Get the vita home directory (~/.vita)
pub fn vita_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vita"))
}

/// Expand a leading ~/ to the home directory
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir().map(|home| home.join(rest))
    } else {
        Some(PathBuf::from(path))
    }
}
