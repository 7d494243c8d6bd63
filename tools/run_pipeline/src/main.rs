//! Run every stage in order from the raw inputs: one load, one save.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use forest_core::artifact::save_forests;
use forest_core::paths::{self, DataDir};
use forest_core::pipeline::{run as run_stages, Inputs};

#[derive(Parser, Debug)]
#[command(name = "run_pipeline", about = "Rebuild forests-with-districts.json from the raw inputs")]
struct Args {
    /// Directory holding the input lists and the artifact
    #[arg(short, long, default_value = paths::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let start = Instant::now();
    let dir = DataDir::new(&args.data_dir);
    let inputs = Inputs::load(&dir)
        .with_context(|| format!("loading inputs from {}", dir.root().display()))?;

    let (forests, summary) = run_stages(&inputs).context("running pipeline")?;
    save_forests(&dir.artifact(), &forests).context("writing forests with districts")?;

    info!(
        "{} forests ({} with districts), {} forests and {} districts gap-filled, {} rewritten by reconciliation",
        summary.merge.forests,
        summary.merge.with_districts,
        summary.gap_fill.forests_filled,
        summary.gap_fill.districts_filled,
        summary.reconcile.rewritten
    );
    info!("Done in {:.1}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();
    let args = Args::parse();
    run(&args).inspect_err(|e| error!("{e:#}"))
}
