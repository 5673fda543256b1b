use std::time::Duration;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use covid_stats::config;
use covid_stats::server::{self, ServerConfig};

/// Serve per-country COVID-19 totals as JSON, text or HTML.
#[derive(Debug, Parser)]
#[command(name = "covid-stats-server", version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:3000")]
    addr: String,

    /// Directory URL holding the three time-series CSV files.
    #[arg(long, default_value = config::DATA_BASE)]
    base_url: String,

    /// Upstream request timeout in seconds.
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Seconds a merged report is reused. 0 fetches on every request.
    #[arg(long, default_value_t = config::DEFAULT_CACHE_TTL.as_secs())]
    cache_ttl_secs: u64,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            addr: self.addr.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }
}

fn init_logging(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(args.verbose >= 2)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);
    debug!(?args, "starting");

    let cfg = args.server_config();
    let state = cfg.state()?;
    let listener = tokio::net::TcpListener::bind(&cfg.addr).await?;
    server::serve(listener, state).await?;
    Ok(())
}
