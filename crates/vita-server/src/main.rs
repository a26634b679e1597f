use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

mod logging;
mod mail;
mod server;
mod showcase;
mod state;

use logging::init_logging;
use mail::{ContactRelay, SmtpRelay};
use server::run_server;
use state::AppState;
use vita_config::Config;
use vita_core::Profile;
use vita_gateway::Gateway;
use vita_llm::{OpenAiProvider, ProviderConfig};
use vita_session::SessionManager;

#[derive(Parser, Debug, Clone)]
#[command(name = "vita-server")]
#[command(about = "Interactive portfolio backend")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, env = "VITA_CONFIG", default_value = "~/.vita/config.json")]
    config: String,

    /// Server port (overrides config)
    #[arg(long, env = "VITA_PORT")]
    port: Option<u16>,

    /// Chat-completion API base URL (overrides config)
    #[arg(long, env = "LLM_BASE_URL")]
    llm_base_url: Option<String>,

    /// Model name (overrides config)
    #[arg(long, env = "LLM_MODEL")]
    model: Option<String>,

    /// Log level (overrides config)
    #[arg(long, env = "VITA_LOG")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = vita_config::expand_tilde(&cli.config)
        .unwrap_or_else(|| std::path::PathBuf::from(&cli.config));

    let mut config = match Config::load(&config_path).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {:?}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    // CLI arguments override the file
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(base_url) = cli.llm_base_url {
        config.llm.base_url = base_url;
    }
    if let Some(model) = cli.model {
        config.llm.model = model;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging.level);

    // Missing credentials abort startup; no partial operation
    let secrets = match config.resolve_secrets() {
        Ok(secrets) => secrets,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let profile = match &config.profile.path {
        Some(path) => {
            let path = vita_config::expand_tilde(path)
                .unwrap_or_else(|| std::path::PathBuf::from(path));
            Profile::from_file(&config.profile.name, &path).map_err(|e| {
                anyhow::anyhow!("failed to read profile from {:?}: {}", path, e)
            })?
        }
        None => Profile::builtin(),
    };
    tracing::info!(name = %profile.name, "profile loaded");

    let provider_config = ProviderConfig::new("openai", &config.llm.base_url)
        .with_api_key(&secrets.api_key)
        .with_model(&config.llm.model)
        .with_timeout(Duration::from_secs(config.llm.timeout_seconds));
    let provider = Arc::new(OpenAiProvider::new(provider_config)?);

    let sessions = Arc::new(SessionManager::new());
    sessions.spawn_cleanup(
        Duration::from_secs(config.sessions.cleanup_interval_secs),
        Duration::from_secs(config.sessions.idle_timeout_secs),
    );

    let gateway = Arc::new(Gateway::new(
        provider,
        Arc::clone(&sessions),
        &profile,
        &config.llm.model,
        config.llm.temperature,
    ));

    let relay: Option<Arc<dyn ContactRelay>> = match (&config.mail.enabled, &secrets.mail_password)
    {
        (true, Some(password)) => {
            let relay = SmtpRelay::new(&config.mail, password)
                .map_err(|e| anyhow::anyhow!("mail relay configuration invalid: {}", e))?;
            tracing::info!(host = %config.mail.host, "contact relay enabled");
            Some(Arc::new(relay))
        }
        _ => {
            tracing::info!("contact relay disabled");
            None
        }
    };

    let state = AppState::new(gateway, sessions, relay, config.server.clone());
    run_server(state).await
}
