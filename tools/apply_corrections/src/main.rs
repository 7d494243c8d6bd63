//! Apply the district-membership correction table: recompute the named
//! forests from their defined districts only and report orphaned records.
//!
//! Uses `corrections.json` from the data directory when present, otherwise
//! the built-in table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use forest_core::artifact::{load_corrections, load_forests, load_records, save_forests};
use forest_core::correction::apply_corrections;
use forest_core::model::records::{ClosedRoadRecord, NfsRoadRecord};
use forest_core::paths::{self, DataDir};

#[derive(Parser, Debug)]
#[command(name = "apply_corrections", about = "Restrict named forests to their defined ranger districts")]
struct Args {
    /// Directory holding the input lists and the artifact
    #[arg(short, long, default_value = paths::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let dir = DataDir::new(&args.data_dir);
    let table = load_corrections(&dir).context("loading correction table")?;
    let forests = load_forests(&dir.artifact()).context("loading forests with districts")?;
    let closed: Vec<ClosedRoadRecord> =
        load_records(&dir.file(paths::CLOSED_ROADS)).context("loading closed roads")?;
    let nfs: Vec<NfsRoadRecord> =
        load_records(&dir.file(paths::NFS_ROADS)).context("loading NFS roads")?;

    let (forests, outcomes) =
        apply_corrections(forests, &table, &closed, &nfs).context("applying corrections")?;
    let orphaned: usize = outcomes.iter().flat_map(|o| &o.orphans).map(|g| g.count).sum();
    info!("{} corrections applied, {} orphaned records excluded", outcomes.len(), orphaned);

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
