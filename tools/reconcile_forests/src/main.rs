//! Overwrite forest-level stats with the sum over their ranger districts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use forest_core::artifact::{load_forests, save_forests};
use forest_core::paths::{self, DataDir};
use forest_core::reconcile::reconcile;

#[derive(Parser, Debug)]
#[command(name = "reconcile_forests", about = "Make every forest equal the sum of its districts")]
struct Args {
    /// Directory holding the artifact
    #[arg(short, long, default_value = paths::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let dir = DataDir::new(&args.data_dir);
    let forests = load_forests(&dir.artifact()).context("loading forests with districts")?;
    let (forests, _) = reconcile(forests);
    save_forests(&dir.artifact(), &forests).context("writing forests with districts")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();
    let args = Args::parse();
    run(&args).inspect_err(|e| error!("{e:#}"))
}
