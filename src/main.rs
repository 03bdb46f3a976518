use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::info;

use aur_upstream_check::config::{self, Config};
use aur_upstream_check::logging;
use aur_upstream_check::report::ReportRenderer;
use aur_upstream_check::version::checker::check_maintainer;

#[derive(Parser)]
#[command(name = "aur-upstream-check")]
#[command(version, about = "Check a maintainer's AUR packages against their upstream releases")]
struct Cli {
    /// AUR maintainer whose packages are checked
    maintainer: String,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/aur-upstream-check/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Number of packages checked at the same time
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose, cli.log_file.as_deref());

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let mut config = Config::load(&config_path)?;
    if let Some(timeout) = cli.timeout {
        config.http.timeout_ms = timeout;
    }
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }
    info!("Using configuration {:?}", config);

    let client = config::build_http_client(&config).context("Failed to build HTTP client")?;
    let (aur, resolver) = config::create_default_resolver(&config, &client);

    let reports = check_maintainer(&aur, &resolver, &cli.maintainer, config.concurrency)
        .await
        .with_context(|| format!("Failed to list packages of {}", cli.maintainer))?;

    if cli.no_color {
        colored::control::set_override(false);
    }
    ReportRenderer::new(!cli.no_color).render(&reports);

    Ok(())
}
