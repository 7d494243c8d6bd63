//! Recompute CLOSED_ROADS: org-code prefix at forest level, exact code per district.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use forest_core::aggregate::add_closed_road_stats;
use forest_core::artifact::{load_forests, load_records, save_forests};
use forest_core::model::records::ClosedRoadRecord;
use forest_core::paths::{self, DataDir};

#[derive(Parser, Debug)]
#[command(name = "closed_road_stats", about = "Aggregate closed road stats per forest and ranger district")]
struct Args {
    /// Directory holding the input lists and the artifact
    #[arg(short, long, default_value = paths::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let dir = DataDir::new(&args.data_dir);
    let forests = load_forests(&dir.artifact()).context("loading forests with districts")?;
    let records: Vec<ClosedRoadRecord> =
        load_records(&dir.file(paths::CLOSED_ROADS)).context("loading closed roads")?;

    let forests = add_closed_road_stats(forests, &records).context("aggregating closed roads")?;
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
