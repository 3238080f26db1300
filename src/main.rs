mod api;
mod gateway;

use clap::{Parser, Subcommand};
use nursebot_core::{config, traits::Provider};
use nursebot_memory::InMemoryStore;
use nursebot_providers::openai::OpenAiProvider;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "nursebot",
    version,
    about = "NurseBot: health-assistant chat relay"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server.
    Start {
        /// Override `server.host`.
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`.
        #[arg(short, long)]
        port: Option<u16>,
        /// Verbose logging.
        #[arg(long)]
        debug: bool,
    },
    /// Check configuration and provider availability.
    Status,
    /// Send a one-shot message through the same pipeline as the web chat.
    Ask {
        /// The message to send.
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },
}

/// User identifier for one-shot CLI messages.
const CLI_USER_ID: &str = "cli";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; real environment variables still apply.
    let dotenv = dotenvy::dotenv();

    let mut cfg = config::load(&cli.config)?;
    cfg.apply_env_overrides(|key| std::env::var(key).ok());

    if let Commands::Start { host, port, debug } = &cli.command {
        if let Some(host) = host {
            cfg.server.host = host.clone();
        }
        if let Some(port) = port {
            cfg.server.port = *port;
        }
        cfg.server.debug |= *debug;
    }

    let default_filter = if cfg.server.debug {
        "debug".to_string()
    } else {
        cfg.nursebot.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    if let Ok(path) = dotenv {
        info!("loaded environment from {}", path.display());
    }

    match cli.command {
        Commands::Start { .. } => {
            cfg.validate_for_serve()?;

            let provider = build_provider(&cfg)?;
            if !provider.is_available().await {
                tracing::warn!(
                    "provider '{}' did not answer the availability check; replies will fall back to the apology message until it does",
                    provider.name()
                );
            }

            let gateway = Arc::new(build_gateway(&cfg, provider));
            let sessions = api::SessionKeys::from_config(&cfg.session);

            println!("{}: starting on http://{}", cfg.nursebot.name, cfg.server.bind_addr());
            api::serve(&cfg.server, api::AppState::new(gateway, sessions)).await?;
        }
        Commands::Status => {
            println!("{} status check\n", cfg.nursebot.name);
            println!("Config: {}", cli.config);
            println!("Listen: {}", cfg.server.bind_addr());
            println!("Default provider: {}", cfg.provider.default);
            println!(
                "Model: {} (temperature {}, max_tokens {})",
                cfg.provider.openai.model,
                cfg.provider.openai.temperature,
                cfg.provider.openai.max_tokens
            );
            println!(
                "Session secret: {}",
                if cfg.session.secret.is_empty() {
                    "missing"
                } else {
                    "configured"
                }
            );
            println!("History cap: {} entries per user", cfg.memory.max_entries);
            println!();

            let provider = build_provider(&cfg)?;
            let available = provider.is_available().await;
            println!(
                "  {}: {}",
                provider.name(),
                if available { "available" } else { "unavailable" }
            );
        }
        Commands::Ask { message } => {
            if message.is_empty() {
                anyhow::bail!("no message provided. Usage: nursebot ask <message>");
            }

            let prompt = message.join(" ");
            let provider = build_provider(&cfg)?;
            let gateway = build_gateway(&cfg, provider);
            let reply = gateway.respond(CLI_USER_ID, &prompt).await;
            println!("{reply}");
        }
    }

    Ok(())
}

/// Build the configured provider.
fn build_provider(cfg: &config::Config) -> anyhow::Result<Arc<dyn Provider>> {
    match cfg.provider.default.as_str() {
        "openai" => Ok(Arc::new(OpenAiProvider::from_config(&cfg.provider.openai)?)),
        other => anyhow::bail!("unsupported provider: {other}"),
    }
}

/// Wire the in-memory transcript store, tracker, and provider into a gateway.
fn build_gateway(cfg: &config::Config, provider: Arc<dyn Provider>) -> gateway::Gateway {
    let store = Arc::new(InMemoryStore::new(cfg.memory.max_entries));
    let tracker = gateway::Tracker::new(store);
    gateway::Gateway::new(
        tracker,
        provider,
        gateway::Sampling::from(&cfg.provider.openai),
    )
}
