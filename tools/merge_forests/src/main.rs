//! Attach ranger districts to their national forests and write the
//! artifact every later stage reads.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use forest_core::artifact::{load_records, save_forests};
use forest_core::merge::merge_forests;
use forest_core::paths::{self, DataDir};
use forest_core::{NationalForest, RangerDistrict};

#[derive(Parser, Debug)]
#[command(name = "merge_forests", about = "Merge ranger districts into national forests")]
struct Args {
    /// Directory holding the input lists and the artifact
    #[arg(short, long, default_value = paths::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let dir = DataDir::new(&args.data_dir);
    let forests: Vec<NationalForest> = load_records(&dir.file(paths::NATIONAL_FORESTS))
        .context("loading national forests")?;
    let districts: Vec<RangerDistrict> = load_records(&dir.file(paths::RANGER_DISTRICTS))
        .context("loading ranger districts")?;

    let (forests, _) = merge_forests(forests, districts);
    save_forests(&dir.artifact(), &forests).context("writing merged forests")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();
    let args = Args::parse();
    run(&args).inspect_err(|e| error!("{e:#}"))
}
