//! Grade every forest and ranger district by the share of open mileage.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use forest_core::artifact::{load_forests, save_forests};
use forest_core::paths::{self, DataDir};
use forest_core::scorecard::apply_scorecards;

#[derive(Parser, Debug)]
#[command(name = "scorecards", about = "Attach open-access scorecards to forests and districts")]
struct Args {
    /// Directory holding the artifact
    #[arg(short, long, default_value = paths::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let dir = DataDir::new(&args.data_dir);
    let forests = load_forests(&dir.artifact()).context("loading forests with districts")?;
    let forests = apply_scorecards(forests);
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
