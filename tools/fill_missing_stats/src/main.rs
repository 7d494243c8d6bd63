//! Fill MVUM_ROADS from the generic NFS road layer for every forest or
//! district the MVUM layer left empty.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use forest_core::artifact::{load_forests, load_records, save_forests};
use forest_core::gap_fill::fill_missing_mvum_roads;
use forest_core::model::records::NfsRoadRecord;
use forest_core::paths::{self, DataDir};

#[derive(Parser, Debug)]
#[command(name = "fill_missing_stats", about = "Fill empty MVUM road stats from NFS roads")]
struct Args {
    /// Directory holding the input lists and the artifact
    #[arg(short, long, default_value = paths::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let dir = DataDir::new(&args.data_dir);
    let forests = load_forests(&dir.artifact()).context("loading forests with districts")?;
    let roads: Vec<NfsRoadRecord> =
        load_records(&dir.file(paths::NFS_ROADS)).context("loading NFS roads")?;

    let (forests, _) = fill_missing_mvum_roads(forests, &roads).context("filling from NFS roads")?;
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
