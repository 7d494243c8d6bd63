//! Full pipeline: every stage in dependency order over one in-memory
//! collection.
//!
//! Order:
//!   1. Merge forests with ranger districts
//!   2. MVUM road stats
//!   3. MVUM trail stats
//!   4. Closed road stats
//!   5. Vehicle-class mileage
//!   6. Gap fill from NFS roads
//!   7. Membership corrections
//!   8. Reconciliation
//!   9. Scorecards

use log::info;

use crate::aggregate::{add_closed_road_stats, add_mvum_road_stats, add_mvum_trail_stats};
use crate::artifact::{load_corrections, load_records};
use crate::correction::{apply_corrections, CorrectionOutcome, CorrectionTable};
use crate::error::Result;
use crate::gap_fill::{fill_missing_mvum_roads, GapFillSummary};
use crate::merge::{merge_forests, MergeSummary};
use crate::model::records::{ClosedRoadRecord, MvumRoadRecord, MvumTrailRecord, NfsRoadRecord};
use crate::model::{NationalForest, RangerDistrict};
use crate::paths::{self, DataDir};
use crate::reconcile::{reconcile, ReconcileSummary};
use crate::scorecard::apply_scorecards;
use crate::vehicle::apply_vehicle_mileage;

/// Every raw input, loaded in full before any stage runs.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub national_forests: Vec<NationalForest>,
    pub ranger_districts: Vec<RangerDistrict>,
    pub mvum_roads: Vec<MvumRoadRecord>,
    pub mvum_trails: Vec<MvumTrailRecord>,
    pub closed_roads: Vec<ClosedRoadRecord>,
    pub nfs_roads: Vec<NfsRoadRecord>,
    pub corrections: CorrectionTable,
}

impl Inputs {
    pub fn load(dir: &DataDir) -> Result<Self> {
        Ok(Self {
            national_forests: load_records(&dir.file(paths::NATIONAL_FORESTS))?,
            ranger_districts: load_records(&dir.file(paths::RANGER_DISTRICTS))?,
            mvum_roads: load_records(&dir.file(paths::MVUM_ROADS))?,
            mvum_trails: load_records(&dir.file(paths::MVUM_TRAILS))?,
            closed_roads: load_records(&dir.file(paths::CLOSED_ROADS))?,
            nfs_roads: load_records(&dir.file(paths::NFS_ROADS))?,
            corrections: load_corrections(dir)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub merge: MergeSummary,
    pub gap_fill: GapFillSummary,
    pub corrections: Vec<CorrectionOutcome>,
    pub reconcile: ReconcileSummary,
}

pub fn run(inputs: &Inputs) -> Result<(Vec<NationalForest>, RunSummary)> {
    // ── 1. Merge ─────────────────────────────────────────────────────────────
    let (forests, merge) =
        merge_forests(inputs.national_forests.clone(), inputs.ranger_districts.clone());

    // ── 2–4. Direct aggregation ──────────────────────────────────────────────
    let forests = add_mvum_road_stats(forests, &inputs.mvum_roads)?;
    let forests = add_mvum_trail_stats(forests, &inputs.mvum_trails)?;
    let forests = add_closed_road_stats(forests, &inputs.closed_roads)?;

    // ── 5. Vehicle-class mileage ─────────────────────────────────────────────
    let forests = apply_vehicle_mileage(forests, &inputs.mvum_roads);

    // ── 6. Gap fill ──────────────────────────────────────────────────────────
    let (forests, gap_fill) = fill_missing_mvum_roads(forests, &inputs.nfs_roads)?;

    // ── 7. Corrections ───────────────────────────────────────────────────────
    let (forests, corrections) = apply_corrections(
        forests,
        &inputs.corrections,
        &inputs.closed_roads,
        &inputs.nfs_roads,
    )?;

    // ── 8. Reconciliation ────────────────────────────────────────────────────
    let (forests, reconcile) = reconcile(forests);

    // ── 9. Scorecards ────────────────────────────────────────────────────────
    let forests = apply_scorecards(forests);

    info!("Pipeline complete: {} forests", forests.len());
    Ok((
        forests,
        RunSummary {
            merge,
            gap_fill,
            corrections,
            reconcile,
        },
    ))
}
