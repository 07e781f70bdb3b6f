//! prorata — replay a staking scenario against the reward pool.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod logging;
mod scenario;

#[derive(Parser)]
#[command(name = "prorata", about = "Replay a staking scenario against the reward pool")]
struct Cli {
    /// Path to a TOML scenario file.
    scenario: PathBuf,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = logging::LogFormat::Human, env = "PRORATA_LOG_FORMAT")]
    log_format: logging::LogFormat,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "PRORATA_LOG_LEVEL")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_format, &cli.log_level);

    let contents = std::fs::read_to_string(&cli.scenario)
        .with_context(|| format!("failed to read scenario {}", cli.scenario.display()))?;
    let scenario: scenario::Scenario =
        toml::from_str(&contents).context("failed to parse scenario")?;

    tracing::info!(
        ops = scenario.ops.len(),
        owner = %scenario.owner,
        "replaying scenario"
    );
    let report = scenario::run(&scenario)?;

    let summary = &report.summary;
    println!(
        "pool: {} staker(s), total staked {}",
        summary.stakers, summary.total_staked
    );
    println!(
        "rewards: distributed {}, claimed {}, outstanding {}",
        summary.total_distributed, summary.total_claimed, report.outstanding
    );
    println!("custody: {}", report.custody);
    for (account, balance) in &report.balances {
        println!("balance {account}: {balance}");
    }
    Ok(())
}
