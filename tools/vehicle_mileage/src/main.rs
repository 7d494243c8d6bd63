//! Recompute ALL_VEHICLES_MILEAGE and HIGHWAY_VEHICLES_ONLY_MILEAGE on
//! MVUM_ROADS, rounded to three decimals.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use forest_core::artifact::{load_forests, load_records, save_forests};
use forest_core::model::records::MvumRoadRecord;
use forest_core::paths::{self, DataDir};
use forest_core::vehicle::apply_vehicle_mileage;

#[derive(Parser, Debug)]
#[command(name = "vehicle_mileage", about = "Add vehicle-class mileage to MVUM road stats")]
struct Args {
    /// Directory holding the input lists and the artifact
    #[arg(short, long, default_value = paths::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let dir = DataDir::new(&args.data_dir);
    let forests = load_forests(&dir.artifact()).context("loading forests with districts")?;
    let roads: Vec<MvumRoadRecord> =
        load_records(&dir.file(paths::MVUM_ROADS)).context("loading MVUM roads")?;

    let forests = apply_vehicle_mileage(forests, &roads);
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
