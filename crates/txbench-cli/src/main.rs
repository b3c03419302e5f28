use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use txbench_common::config::BenchConfig;
use txbench_core::{run_fixed_count, run_fixed_rate};
use txbench_rpc::HttpRpc;

#[derive(Parser, Debug)]
#[command(name = "txbench", version, about = "Transaction broadcast load generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a fixed number of txs from concurrent workers and report throughput
    Max(ConfigArgs),
    /// Send txs at a fixed rate until the timeout and report achieved rate
    Rps(ConfigArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
    Version,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// YAML config file (falls back to $TXBENCH_CONFIG, then built-in defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConfigArgs {
    fn load(&self) -> anyhow::Result<BenchConfig> {
        Ok(BenchConfig::load(self.config.as_deref())?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Max(args) => max(args.load()?).await,
        Commands::Rps(args) => rps(args.load()?).await,
        Commands::Config(args) => print!("{}", serde_yaml::to_string(&args.load()?)?),
        Commands::Version => println!("{}", env!("CARGO_PKG_VERSION")),
    }
    Ok(())
}

async fn max(cfg: BenchConfig) {
    let rpc = HttpRpc::new(cfg.target.base_url.clone());
    tracing::info!(
        target: "fixed_count",
        node = rpc.base_url(),
        total = cfg.fixed_count.total_requests,
        workers = cfg.fixed_count.worker_chunks(),
        "starting"
    );
    let report = run_fixed_count(rpc, &cfg.fixed_count, &cfg.drain).await;
    println!("Done {}", report.total);
    println!("Submitted when drained {}", report.submitted);
    println!("Total time {:?}", report.elapsed);
    println!("RPS {:.2}", report.throughput());
}

async fn rps(cfg: BenchConfig) {
    let rpc = HttpRpc::new(cfg.target.base_url.clone());
    tracing::info!(
        target: "fixed_rate",
        node = rpc.base_url(),
        rate = cfg.fixed_rate.target_rate,
        timeout = ?cfg.fixed_rate.timeout(),
        "starting"
    );
    let report = run_fixed_rate(&rpc, &cfg.fixed_rate, &cfg.drain).await;
    println!("Done {}", report.iterations);
    println!("Total time {:?}", report.round_time_total);
    println!("RPS {:.2}", report.achieved_rate());
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
