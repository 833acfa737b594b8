use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use iostat_relay::{pipeline, Config, StreamEnd};

/// Exit status after Ctrl-C, as shells report SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser, Debug)]
#[command(
    name = "iostat-relay",
    about = "Forward `iostat -x` output from stdin to InfluxDB",
    after_help = "Example: iostat -x 5 | iostat-relay -i 'http://localhost:8086/write?db=iostat' -H db-01"
)]
struct Cli {
    /// InfluxDB write URL, e.g. http://localhost:8086/write?db=iostat
    #[arg(short = 'i', long)]
    influxdb: Option<String>,

    /// Hostname reported in the `host` tag.
    #[arg(short = 'H', long)]
    hostname: Option<String>,

    /// TOML file layered over the built-in defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Measurement name (default: iostat).
    #[arg(long)]
    measurement: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Flags win over every config layer.
    fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.influxdb {
            config.collector.url = url.clone();
        }
        if let Some(hostname) = &self.hostname {
            config.collector.hostname = hostname.clone();
        }
        if let Some(measurement) = &self.measurement {
            config.collector.measurement = measurement.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.collector.timeout_ms = timeout_ms;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, stopping");
        }
    };

    let summary = pipeline::run_with_config(&config, tokio::io::stdin(), shutdown).await?;
    if summary.parse.end == StreamEnd::Interrupted {
        // The stdin read runs on a blocking thread that cannot be cancelled;
        // returning would keep the runtime alive until another line arrives.
        std::process::exit(EXIT_INTERRUPTED);
    }
    Ok(())
}
