//! Standalone vehicle-class mileage stage.
//!
//! Recomputes `ALL_VEHICLES_MILEAGE` and `HIGHWAY_VEHICLES_ONLY_MILEAGE` on
//! `MVUM_ROADS` for every forest and district, joined by name, and leaves
//! the rest of the shape alone. Rounds to [`VEHICLE_MILEAGE_DECIMALS`]
//! rather than the two places the aggregator uses.

use std::collections::HashMap;

use log::info;

use crate::classify::{is_all_vehicles, is_highway_legal_only};
use crate::model::records::{MvumRoadRecord, RouteRecord};
use crate::model::stats::MvumRoadStats;
use crate::model::NationalForest;
use crate::round::{round_to, VEHICLE_MILEAGE_DECIMALS};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VehicleMileage {
    pub all_vehicles: f64,
    pub highway_only: f64,
}

impl VehicleMileage {
    fn add(&mut self, record: &MvumRoadRecord) {
        let miles = record.segment_length();
        let symbol = record.symbol_name.as_deref();
        if is_all_vehicles(symbol) {
            self.all_vehicles += miles;
        }
        if is_highway_legal_only(symbol) {
            self.highway_only += miles;
        }
    }

    fn write_to(self, stats: &mut MvumRoadStats) {
        stats.all_vehicles_mileage = round_to(self.all_vehicles, VEHICLE_MILEAGE_DECIMALS);
        stats.highway_vehicles_only_mileage = round_to(self.highway_only, VEHICLE_MILEAGE_DECIMALS);
    }
}

/// Per-forest and per-(forest, district) vehicle mileage in one pass.
#[derive(Debug, Default)]
pub struct VehicleMileageIndex<'a> {
    pub forests: HashMap<&'a str, VehicleMileage>,
    pub districts: HashMap<(&'a str, &'a str), VehicleMileage>,
}

impl<'a> VehicleMileageIndex<'a> {
    pub fn build(roads: &'a [MvumRoadRecord]) -> Self {
        let mut index = Self::default();
        for road in roads {
            let Some(forest) = road.forest_name.as_deref() else {
                continue;
            };
            index.forests.entry(forest).or_default().add(road);
            if let Some(district) = road.district_name.as_deref() {
                index.districts.entry((forest, district)).or_default().add(road);
            }
        }
        index
    }

    fn forest(&self, name: &str) -> VehicleMileage {
        self.forests.get(name).copied().unwrap_or_default()
    }

    fn district(&self, forest: &str, district: &str) -> VehicleMileage {
        self.districts.get(&(forest, district)).copied().unwrap_or_default()
    }
}

/// Entities with no matching roads get zeros.
pub fn apply_vehicle_mileage(mut forests: Vec<NationalForest>, roads: &[MvumRoadRecord]) -> Vec<NationalForest> {
    let index = VehicleMileageIndex::build(roads);
    info!(
        "Vehicle mileage indexed for {} forests and {} districts",
        index.forests.len(),
        index.districts.len()
    );

    let mut districts_updated = 0usize;
    for forest in &mut forests {
        index.forest(&forest.name).write_to(&mut forest.routes.mvum_roads);
        for district in &mut forest.ranger_districts {
            index
                .district(&forest.name, &district.name)
                .write_to(&mut district.routes.mvum_roads);
            districts_updated += 1;
        }
    }
    info!("Updated {} forests and {} ranger districts", forests.len(), districts_updated);
    forests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RangerDistrict;

    fn road(forest: &str, district: &str, len: &str, symbol: &str) -> MvumRoadRecord {
        MvumRoadRecord {
            forest_name: Some(forest.into()),
            district_name: Some(district.into()),
            seg_length: Some(len.into()),
            symbol_name: Some(symbol.into()),
            ..Default::default()
        }
    }

    #[test]
    fn rounds_to_three_decimals() {
        let forest = NationalForest {
            name: "Test".into(),
            ranger_districts: vec![RangerDistrict { name: "North".into(), ..Default::default() }],
            ..Default::default()
        };
        let roads = vec![
            road("Test", "North", "1.0004", "Roads open to all vehicles"),
            road("Test", "North", "0.0002", "Roads Open To All Vehicles, seasonal"),
            road("Test", "South", "2.5", "Roads open to highway legal vehicles only"),
        ];
        let forests = apply_vehicle_mileage(vec![forest], &roads);
        let f = &forests[0].routes.mvum_roads;
        assert_eq!(f.all_vehicles_mileage, 1.001);
        assert_eq!(f.highway_vehicles_only_mileage, 2.5);
        let d = &forests[0].ranger_districts[0].routes.mvum_roads;
        assert_eq!(d.all_vehicles_mileage, 1.001);
        assert_eq!(d.highway_vehicles_only_mileage, 0.0);
    }

    #[test]
    fn leaves_other_fields_alone() {
        let mut forest = NationalForest { name: "Test".into(), ..Default::default() };
        forest.routes.mvum_roads.num_roads = 9;
        forest.routes.mvum_roads.total_mileage = 12.34;
        forest.routes.mvum_roads.all_vehicles_mileage = 99.0;

        let forests = apply_vehicle_mileage(vec![forest], &[]);
        let stats = &forests[0].routes.mvum_roads;
        assert_eq!(stats.num_roads, 9);
        assert_eq!(stats.total_mileage, 12.34);
        assert_eq!(stats.all_vehicles_mileage, 0.0);
    }

    #[test]
    fn district_key_includes_forest() {
        let roads = vec![
            road("A", "North", "1", "all vehicles"),
            road("B", "North", "2", "all vehicles"),
        ];
        let index = VehicleMileageIndex::build(&roads);
        assert_eq!(index.district("A", "North").all_vehicles, 1.0);
        assert_eq!(index.district("B", "North").all_vehicles, 2.0);
        assert_eq!(index.district("C", "North"), VehicleMileage::default());
    }
}
