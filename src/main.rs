mod handlers;


use clap::{Parser, Subcommand};
use courier_core::config::{self, shellexpand, Config, LogConfig};
use courier_telegram::{
    api::ApiClient, bot::Bot, params::PollingParams, transport::HttpTransport,
};
use handlers::{AllowListMiddleware, EchoHandler, LoggingMiddleware};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "courier", version, about = "Courier: Telegram long-polling bot runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll for updates until Ctrl-C.
    Run,
    /// Print the effective configuration and check the bot token.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _guard = init_logging(&cfg.log);
    if let Some(notice) = missing_config_notice(&cli.config) {
        info!("{notice}");
    }

    match cli.command {
        Commands::Run => run(cfg).await?,
        Commands::Status => status(&cli.config, &cfg).await?,
    }

    Ok(())
}

/// Reported after logging starts, since `config::load` runs before it.
fn missing_config_notice(path: &str) -> Option<String> {
    (!Path::new(path).exists()).then(|| format!("Config file not found at {path}, using defaults"))
}

/// Install the subscriber. `RUST_LOG` wins over `log.level`.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_logging(cfg: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let (file_layer, guard) = match cfg.file.as_deref() {
        Some(file) => {
            let path = PathBuf::from(shellexpand(file));
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf();
            let prefix = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "courier.log".to_string());
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, prefix));
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();
    guard
}

fn build_api(cfg: &Config) -> anyhow::Result<ApiClient> {
    let transport = HttpTransport::new(&cfg.bot)?;
    Ok(ApiClient::new(Arc::new(transport)))
}

async fn run(cfg: Config) -> anyhow::Result<()> {
    let api = build_api(&cfg)?;
    let params = PollingParams::from_config(&cfg.polling)?;

    if cfg.polling.delete_webhook {
        api.delete_webhook(cfg.polling.drop_pending_updates).await?;
        info!("webhook removed");
    }

    let me = api.get_me().await?;
    info!("Courier: polling as {} (id {})", me.display_name(), me.id);
    if cfg.bot.allowed_users.is_empty() {
        warn!("bot.allowed_users is empty, every user is accepted");
    }

    let mut handle = Bot::new(api.clone(), params)
        .with_handoff_capacity(cfg.polling.handoff_capacity)
        .with_middleware(LoggingMiddleware)
        .with_middleware(AllowListMiddleware::new(&cfg.bot.allowed_users))
        .start(EchoHandler::new(api, cfg.bot.echo));

    let stop = handle.stop_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received shutdown signal"),
            Err(e) => warn!("failed to listen for Ctrl-C: {e}"),
        }
        stop.stop();
    });

    let report = handle.wait().await;
    info!(
        "Courier: stopped at offset {:?} ({} handled, {} failed)",
        report.cursor.offset(),
        report.handled,
        report.failed
    );
    Ok(())
}

async fn status(path: &str, cfg: &Config) -> anyhow::Result<()> {
    println!("Courier: Status Check\n");
    println!("Config: {path}");
    println!("API: {}", cfg.bot.api_url);
    println!(
        "Polling: limit {}, timeout {}s, handoff {}",
        cfg.polling.limit, cfg.polling.timeout_secs, cfg.polling.handoff_capacity
    );
    match cfg.polling.allowed_updates.as_deref() {
        Some(types) => println!("Update types: {}", types.join(", ")),
        None => println!("Update types: server default"),
    }
    println!(
        "Allowed users: {}",
        if cfg.bot.allowed_users.is_empty() {
            "everyone".to_string()
        } else {
            format!("{:?}", cfg.bot.allowed_users)
        }
    );
    println!("Echo: {}", if cfg.bot.echo { "on" } else { "off" });
    println!();

    if cfg.bot.token.is_empty() {
        println!(
            "  token: missing (set bot.token or {})",
            config::TOKEN_ENV
        );
        return Ok(());
    }

    match build_api(cfg)?.get_me().await {
        Ok(me) => println!("  token: valid ({}, id {})", me.display_name(), me.id),
        Err(e) => println!("  token: check failed: {e}"),
    }
    Ok(())
}
