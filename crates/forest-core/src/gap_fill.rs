//! Fill empty MVUM road stats from the generic NFS road layer.
//!
//! Only an entity whose MVUM road count is exactly zero is considered, and
//! its stats are replaced wholesale only when the padded org-code join finds
//! at least one NFS road. Anything else is left untouched.

use log::{debug, info};

use crate::aggregate::aggregate;
use crate::error::Result;
use crate::matcher::{Entity, Join};
use crate::model::records::NfsRoadRecord;
use crate::model::stats::MvumRoadStats;
use crate::model::NationalForest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GapFillSummary {
    pub forests_filled: usize,
    pub districts_filled: usize,
}

/// Replacement stats for an empty entity, or `None` to keep what it has.
fn fill(entity: Entity<'_>, current: &MvumRoadStats, roads: &[NfsRoadRecord]) -> Result<Option<MvumRoadStats>> {
    if current.num_roads != 0 {
        return Ok(None);
    }
    let candidates = Join::NFS_ROADS.select(entity, roads)?;
    if candidates.is_empty() {
        return Ok(None);
    }
    Ok(Some(aggregate(candidates)))
}

pub fn fill_missing_mvum_roads(
    mut forests: Vec<NationalForest>,
    roads: &[NfsRoadRecord],
) -> Result<(Vec<NationalForest>, GapFillSummary)> {
    let mut summary = GapFillSummary::default();

    for forest in &mut forests {
        if let Some(stats) = fill(Entity::Forest(forest), &forest.routes.mvum_roads, roads)? {
            info!(
                "{}: filled from NFS roads, {} roads over {:.2} mi",
                forest.name, stats.num_roads, stats.total_mileage
            );
            forest.routes.mvum_roads = stats;
            summary.forests_filled += 1;
        }

        for i in 0..forest.ranger_districts.len() {
            let district = &forest.ranger_districts[i];
            let entity = Entity::District { forest: &*forest, district };
            let Some(stats) = fill(entity, &district.routes.mvum_roads, roads)? else {
                continue;
            };
            debug!(
                "  {}: filled from NFS roads, {} roads over {:.2} mi",
                district.name, stats.num_roads, stats.total_mileage
            );
            forest.ranger_districts[i].routes.mvum_roads = stats;
            summary.districts_filled += 1;
        }
    }

    info!(
        "Gap fill: {} forests and {} ranger districts filled from NFS roads",
        summary.forests_filled, summary.districts_filled
    );
    Ok((forests, summary))
}
