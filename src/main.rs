use altrctl::altr::client::AltrClient;
use altrctl::cli::Command;
use altrctl::config::Settings;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::Level;

/// Version injected at compile time via ALTRCTL_VERSION env var (set by
/// CI/CD), or "dev" for local builds.
pub const VERSION: &str = match option_env!("ALTRCTL_VERSION") {
    Some(v) => v,
    None => "dev",
};

/// CLI for the ALTR data security control plane
#[derive(Parser, Debug)]
#[command(name = "altrctl", version = VERSION, about, long_about = None)]
struct Args {
    /// ALTR organization ID (or ALTR_ORG_ID)
    #[arg(long, global = true)]
    org_id: Option<String>,

    /// API key (or ALTR_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// API secret (or ALTR_SECRET)
    #[arg(long, global = true)]
    secret: Option<String>,

    /// Management gateway URL, must contain "altrnet" (or ALTR_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Logs go to stderr so stdout stays parseable JSON.
fn setup_logging(level: LogLevel) {
    let Some(tracing_level) = level.to_tracing_level() else {
        return;
    };

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.log_level);

    let config = Settings {
        org_id: args.org_id,
        api_key: args.api_key,
        secret: args.secret,
        base_url: args.base_url,
    }
    .resolve()?;

    let client = AltrClient::new(
        &config.org_id,
        &config.api_key,
        &config.secret,
        &config.base_url,
    )?;

    args.command.run(&client).await
}
