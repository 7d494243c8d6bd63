//! Recompute MVUM_TRAILS for every forest and district, joined by name.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use forest_core::aggregate::add_mvum_trail_stats;
use forest_core::artifact::{load_forests, load_records, save_forests};
use forest_core::model::records::MvumTrailRecord;
use forest_core::paths::{self, DataDir};

#[derive(Parser, Debug)]
#[command(name = "mvum_trail_stats", about = "Aggregate MVUM trail stats per forest and ranger district")]
struct Args {
    /// Directory holding the input lists and the artifact
    #[arg(short, long, default_value = paths::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let dir = DataDir::new(&args.data_dir);
    let forests = load_forests(&dir.artifact()).context("loading forests with districts")?;
    let records: Vec<MvumTrailRecord> =
        load_records(&dir.file(paths::MVUM_TRAILS)).context("loading MVUM trails")?;

    let forests = add_mvum_trail_stats(forests, &records).context("aggregating MVUM trails")?;
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
