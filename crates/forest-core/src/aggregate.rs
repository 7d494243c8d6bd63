//! Record → stats aggregation.
//!
//! Every record counts once toward the total whatever its length parses
//! to, and its mileage lands in every bucket family the classifier assigns.
//! Sums are rounded once, after the last record.

use log::{debug, info};

use crate::classify;
use crate::error::Result;
use crate::matcher::{Entity, Join};
use crate::model::records::{
    ClosedRoadRecord, MvumRoadRecord, MvumTrailRecord, NfsRoadRecord, RouteRecord,
};
use crate::model::stats::{ClosedRoadStats, MvumRoadStats, MvumTrailStats, RouteStats};
use crate::model::NationalForest;
use crate::round::STATS_DECIMALS;

/// A stats shape that knows how to absorb one record of dataset `R`.
pub trait Accumulate<R: RouteRecord>: RouteStats {
    fn accumulate(&mut self, record: &R, miles: f64);
}

impl Accumulate<MvumRoadRecord> for MvumRoadStats {
    fn accumulate(&mut self, r: &MvumRoadRecord, miles: f64) {
        self.num_roads += 1;
        self.total_mileage += miles;
        if classify::is_seasonal(r.seasonal.as_deref()) {
            self.total_seasonal_mileage += miles;
        }
        self.maintenance_levels
            .add(classify::maintenance_level(r.maintenance_level.as_deref()), miles);

        let symbol = r.symbol_name.as_deref();
        if classify::is_all_vehicles(symbol) {
            self.all_vehicles_mileage += miles;
        }
        if classify::is_highway_legal_only(symbol) {
            self.highway_vehicles_only_mileage += miles;
        }
    }
}

/// NFS rows carry no seasonal or vehicle-class columns; those stay zero.
impl Accumulate<NfsRoadRecord> for MvumRoadStats {
    fn accumulate(&mut self, r: &NfsRoadRecord, miles: f64) {
        self.num_roads += 1;
        self.total_mileage += miles;
        self.maintenance_levels
            .add(classify::maintenance_level(r.maintenance_level.as_deref()), miles);
    }
}

impl Accumulate<MvumTrailRecord> for MvumTrailStats {
    fn accumulate(&mut self, r: &MvumTrailRecord, miles: f64) {
        self.num_trails += 1;
        self.total_mileage += miles;
        if classify::is_seasonal(r.seasonal.as_deref()) {
            self.total_seasonal_mileage += miles;
        }
        self.trail_type
            .add(classify::trail_type(r.symbol_name.as_deref()), miles);
    }
}

impl Accumulate<ClosedRoadRecord> for ClosedRoadStats {
    fn accumulate(&mut self, r: &ClosedRoadRecord, miles: f64) {
        self.num_roads += 1;
        self.total_mileage += miles;
        if classify::is_admin_only(r.open_for_use_to.as_deref()) {
            self.admin_mileage += miles;
        }
        if classify::is_trail_conversion_candidate(r.symbol_name.as_deref()) {
            self.mileage_suitable_for_trail_conversion += miles;
        }
        self.maintenance_levels
            .add(classify::closed_level(r.maintenance_level.as_deref()), miles);
    }
}

/// Aggregate `records` into a fresh stats object, rounded to
/// [`STATS_DECIMALS`]. No records gives all zeros.
pub fn aggregate<'a, S, R>(records: impl IntoIterator<Item = &'a R>) -> S
where
    S: Accumulate<R>,
    R: RouteRecord + 'a,
{
    let mut stats = S::default();
    for record in records {
        stats.accumulate(record, record.segment_length());
    }
    stats.round(STATS_DECIMALS);
    stats
}

// ── Stage ─────────────────────────────────────────────────────────────────────

/// Recompute shape `S` on every forest and district from `records`, selected
/// through `join`. Overwrites whatever `S` was stored before.
pub fn populate<S, R>(
    mut forests: Vec<NationalForest>,
    records: &[R],
    join: Join,
) -> Result<Vec<NationalForest>>
where
    S: Accumulate<R>,
    R: RouteRecord + Sync,
{
    for_each_forest(&mut forests, |forest| {
        let parent: &NationalForest = forest;
        let forest_stats: S = aggregate(join.select(Entity::Forest(parent), records)?);
        let district_stats = parent
            .ranger_districts
            .iter()
            .map(|district| {
                let matched = join.select(Entity::District { forest: parent, district }, records)?;
                Ok(aggregate::<S, R>(matched))
            })
            .collect::<Result<Vec<S>>>()?;

        info!(
            "{}: {} {} over {:.2} mi",
            forest.name,
            forest_stats.count(),
            S::KEY,
            forest_stats.total_mileage()
        );
        *S::slot_mut(&mut forest.routes) = forest_stats;

        for (district, stats) in forest.ranger_districts.iter_mut().zip(district_stats) {
            debug!(
                "  {}: {} {} over {:.2} mi",
                district.name,
                stats.count(),
                S::KEY,
                stats.total_mileage()
            );
            *S::slot_mut(&mut district.routes) = stats;
        }
        Ok(())
    })?;
    Ok(forests)
}

#[cfg(not(feature = "threading"))]
fn for_each_forest<F>(forests: &mut [NationalForest], f: F) -> Result<()>
where
    F: Fn(&mut NationalForest) -> Result<()> + Sync + Send,
{
    forests.iter_mut().try_for_each(f)
}

#[cfg(feature = "threading")]
fn for_each_forest<F>(forests: &mut [NationalForest], f: F) -> Result<()>
where
    F: Fn(&mut NationalForest) -> Result<()> + Sync + Send,
{
    use rayon::prelude::*;
    forests.par_iter_mut().try_for_each(f)
}

pub fn add_mvum_road_stats(
    forests: Vec<NationalForest>,
    roads: &[MvumRoadRecord],
) -> Result<Vec<NationalForest>> {
    populate::<MvumRoadStats, _>(forests, roads, Join::MVUM)
}

pub fn add_mvum_trail_stats(
    forests: Vec<NationalForest>,
    trails: &[MvumTrailRecord],
) -> Result<Vec<NationalForest>> {
    populate::<MvumTrailStats, _>(forests, trails, Join::MVUM)
}

pub fn add_closed_road_stats(
    forests: Vec<NationalForest>,
    roads: &[ClosedRoadRecord],
) -> Result<Vec<NationalForest>> {
    populate::<ClosedRoadStats, _>(forests, roads, Join::CLOSED_ROADS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RangerDistrict;
    use approx::assert_abs_diff_eq;

    fn road(len: &str, level: &str, symbol: &str, seasonal: &str) -> MvumRoadRecord {
        MvumRoadRecord {
            forest_name: Some("Test National Forest".into()),
            district_name: Some("North Ranger District".into()),
            seg_length: Some(len.into()),
            seasonal: Some(seasonal.into()),
            maintenance_level: Some(level.into()),
            symbol_name: Some(symbol.into()),
        }
    }

    fn closed(org: &str, len: &str) -> ClosedRoadRecord {
        ClosedRoadRecord {
            admin_org: Some(org.into()),
            seg_length: Some(len.into()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        let stats: MvumRoadStats = aggregate(std::iter::empty::<&MvumRoadRecord>());
        assert_eq!(stats, MvumRoadStats::default());
        let stats: ClosedRoadStats = aggregate(&[] as &[ClosedRoadRecord]);
        assert_eq!(stats, ClosedRoadStats::default());
    }

    #[test]
    fn bad_length_still_counts() {
        let roads = vec![
            road("1.005", "2 - HIGH CLEARANCE VEHICLES", "", ""),
            road("2.0", "2 - HIGH CLEARANCE VEHICLES", "", ""),
            road("bad", "", "", ""),
        ];
        let stats: MvumRoadStats = aggregate(&roads);
        assert_eq!(stats.num_roads, 3);
        assert_eq!(stats.total_mileage, 3.01);
        assert_eq!(stats.maintenance_levels.none, 0.0);
    }

    #[test]
    fn a_record_fills_several_bucket_families() {
        let roads = vec![
            road("1.5", "3 - SUITABLE FOR PASSENGER CARS", "Road open to all vehicles", "Seasonal"),
            road("2.25", "9 - UNKNOWN", "Roads open to highway legal vehicles only", "yearlong"),
        ];
        let stats: MvumRoadStats = aggregate(&roads);
        assert_abs_diff_eq!(stats.total_mileage, 3.75);
        assert_abs_diff_eq!(stats.total_seasonal_mileage, 1.5);
        assert_abs_diff_eq!(stats.maintenance_levels.ml3, 1.5);
        assert_abs_diff_eq!(stats.maintenance_levels.none, 2.25);
        assert_abs_diff_eq!(stats.all_vehicles_mileage, 1.5);
        assert_abs_diff_eq!(stats.highway_vehicles_only_mileage, 2.25);
    }

    #[test]
    fn trails_bucket_by_type() {
        let trails = vec![
            MvumTrailRecord {
                seg_length: Some("4".into()),
                symbol_name: Some("Trails open to all vehicles".into()),
                ..Default::default()
            },
            MvumTrailRecord {
                seg_length: Some("1.25".into()),
                symbol_name: Some("Trails open to motorcycles only".into()),
                seasonal: Some("SEASONAL".into()),
                ..Default::default()
            },
        ];
        let stats: MvumTrailStats = aggregate(&trails);
        assert_eq!(stats.num_trails, 2);
        assert_abs_diff_eq!(stats.trail_type.full_size, 4.0);
        assert_abs_diff_eq!(stats.trail_type.motorcycle, 1.25);
        assert_abs_diff_eq!(stats.total_seasonal_mileage, 1.25);
    }

    #[test]
    fn closed_roads_track_admin_and_conversion() {
        let roads = vec![
            ClosedRoadRecord {
                open_for_use_to: Some("ADMIN".into()),
                symbol_name: Some("Road, Not Maintained for Passenger Car".into()),
                maintenance_level: Some("D - DECOMMISSION".into()),
                ..closed("50101", "0.5")
            },
            ClosedRoadRecord {
                maintenance_level: Some("1 - BASIC CUSTODIAL CARE (CLOSED)".into()),
                ..closed("50101", "1.5")
            },
        ];
        let stats: ClosedRoadStats = aggregate(&roads);
        assert_abs_diff_eq!(stats.admin_mileage, 0.5);
        assert_abs_diff_eq!(stats.mileage_suitable_for_trail_conversion, 0.5);
        assert_abs_diff_eq!(stats.maintenance_levels.decommissioned, 0.5);
        assert_abs_diff_eq!(stats.maintenance_levels.levels.ml1, 1.5);
    }

    #[test]
    fn populate_fills_forest_and_districts() {
        let forest = NationalForest {
            name: "Test National Forest".into(),
            org_code: 501,
            ranger_districts: vec![
                RangerDistrict { name: "North Ranger District".into(), org_code: 50101, ..Default::default() },
                RangerDistrict { name: "South Ranger District".into(), org_code: 50102, ..Default::default() },
            ],
            ..Default::default()
        };
        let roads = vec![closed("50101", "1.0"), closed("50102", "2.0"), closed("50199", "4.0")];

        let forests = add_closed_road_stats(vec![forest], &roads).unwrap();
        let f = &forests[0];
        assert_eq!(f.routes.closed_roads.num_roads, 3);
        assert_abs_diff_eq!(f.routes.closed_roads.total_mileage, 7.0);
        assert_eq!(f.ranger_districts[0].routes.closed_roads.num_roads, 1);
        assert_abs_diff_eq!(f.ranger_districts[1].routes.closed_roads.total_mileage, 2.0);
    }
}
