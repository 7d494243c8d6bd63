//! Parent-equals-sum-of-children reconciliation.
//!
//! For every forest that owns districts, each of the three stats shapes is
//! replaced by the field-wise sum over its districts, rounded like a fresh
//! aggregate. The overwrite is unconditional, so running it twice changes
//! nothing. Forests without districts keep their direct aggregates.

use log::{debug, info};

use crate::model::stats::{ClosedRoadStats, MvumRoadStats, MvumTrailStats, RouteStats};
use crate::model::{NationalForest, RangerDistrict, RouteSummary};
use crate::round::STATS_DECIMALS;

/// Counts or totals closer than this are reported as unchanged.
pub const CHANGE_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub rewritten: usize,
    pub consistent: usize,
    pub without_districts: usize,
}

/// Field-wise sum of shape `S` across `districts`, rounded.
pub fn sum_districts<S: RouteStats>(districts: &[RangerDistrict]) -> S {
    let mut total = S::default();
    for district in districts {
        total.merge(S::slot(&district.routes));
    }
    total.round(STATS_DECIMALS);
    total
}

fn differs<S: RouteStats>(before: &S, after: &S) -> bool {
    before.count() != after.count()
        || (before.total_mileage() - after.total_mileage()).abs() >= CHANGE_TOLERANCE
}

fn describe<S: RouteStats>(forest: &str, before: &S, after: &S) {
    debug!(
        "  {} {}: {} → {} records, {:.2} → {:.2} mi",
        forest,
        S::KEY,
        before.count(),
        after.count(),
        before.total_mileage(),
        after.total_mileage()
    );
}

/// Reconciled forest-level stats; `None` for a forest with no districts.
pub fn reconciled(forest: &NationalForest) -> Option<RouteSummary> {
    if !forest.has_districts() {
        return None;
    }
    let districts = &forest.ranger_districts;
    Some(RouteSummary {
        mvum_roads: sum_districts::<MvumRoadStats>(districts),
        mvum_trails: sum_districts::<MvumTrailStats>(districts),
        closed_roads: sum_districts::<ClosedRoadStats>(districts),
    })
}

pub fn reconcile(mut forests: Vec<NationalForest>) -> (Vec<NationalForest>, ReconcileSummary) {
    let mut summary = ReconcileSummary::default();

    for forest in &mut forests {
        let Some(routes) = reconciled(forest) else {
            summary.without_districts += 1;
            continue;
        };

        let old = &forest.routes;
        let changed = differs(&old.mvum_roads, &routes.mvum_roads)
            || differs(&old.mvum_trails, &routes.mvum_trails)
            || differs(&old.closed_roads, &routes.closed_roads);
        if changed {
            describe(&forest.name, &old.mvum_roads, &routes.mvum_roads);
            describe(&forest.name, &old.mvum_trails, &routes.mvum_trails);
            describe(&forest.name, &old.closed_roads, &routes.closed_roads);
            summary.rewritten += 1;
        } else {
            summary.consistent += 1;
        }
        forest.routes = routes;
    }

    info!(
        "Reconciled {} forests: {} rewritten, {} already consistent, {} without districts",
        forests.len(),
        summary.rewritten,
        summary.consistent,
        summary.without_districts
    );
    (forests, summary)
}
