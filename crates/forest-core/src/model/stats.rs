//! The three per-entity stats shapes, serialized with the artifact's
//! uppercase field names. Every struct defaults missing fields to zero.

use serde::{Deserialize, Serialize};

use crate::classify::{ClosedLevel, MaintenanceLevel, TrailType};
use crate::round::round_to;

/// Field-wise operations shared by the three stats shapes.
pub trait RouteStats: Default + Clone {
    /// Artifact key of this shape on a forest or district.
    const KEY: &'static str;

    fn slot(routes: &RouteSummary) -> &Self;
    fn slot_mut(routes: &mut RouteSummary) -> &mut Self;

    fn count(&self) -> u64;
    fn total_mileage(&self) -> f64;

    /// Category breakdown whose sum is the total mileage.
    fn breakdown(&self) -> Vec<(&'static str, f64)>;

    /// Every mileage field, breakdown included, keyed by artifact name.
    fn mileage_fields(&self) -> Vec<(&'static str, f64)>;

    /// Add every field of `other` into `self`.
    fn merge(&mut self, other: &Self);

    /// Round every mileage field to `decimals` places. Counts are untouched.
    fn round(&mut self, decimals: u32);
}

// ── Breakdowns ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "UPPERCASE")]
pub struct MaintenanceLevels {
    pub ml1: f64,
    pub ml2: f64,
    pub ml3: f64,
    pub ml4: f64,
    pub ml5: f64,
    pub none: f64,
}

impl MaintenanceLevels {
    pub fn add(&mut self, level: MaintenanceLevel, miles: f64) {
        match level {
            MaintenanceLevel::Ml1 => self.ml1 += miles,
            MaintenanceLevel::Ml2 => self.ml2 += miles,
            MaintenanceLevel::Ml3 => self.ml3 += miles,
            MaintenanceLevel::Ml4 => self.ml4 += miles,
            MaintenanceLevel::Ml5 => self.ml5 += miles,
            MaintenanceLevel::Unlisted => self.none += miles,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("ML1", self.ml1),
            ("ML2", self.ml2),
            ("ML3", self.ml3),
            ("ML4", self.ml4),
            ("ML5", self.ml5),
            ("NONE", self.none),
        ]
    }

    fn merge(&mut self, o: &Self) {
        self.ml1 += o.ml1;
        self.ml2 += o.ml2;
        self.ml3 += o.ml3;
        self.ml4 += o.ml4;
        self.ml5 += o.ml5;
        self.none += o.none;
    }

    fn round(&mut self, decimals: u32) {
        for v in [&mut self.ml1, &mut self.ml2, &mut self.ml3, &mut self.ml4, &mut self.ml5, &mut self.none] {
            *v = round_to(*v, decimals);
        }
    }
}

/// Closed-road maintenance levels: the MVUM levels plus decommissioned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "UPPERCASE")]
pub struct ClosedMaintenanceLevels {
    pub decommissioned: f64,
    #[serde(flatten)]
    pub levels: MaintenanceLevels,
}

impl ClosedMaintenanceLevels {
    pub fn add(&mut self, level: ClosedLevel, miles: f64) {
        match level {
            ClosedLevel::Decommissioned => self.decommissioned += miles,
            ClosedLevel::Maintained(level) => self.levels.add(level, miles),
        }
    }

    fn fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![("DECOMMISSIONED", self.decommissioned)];
        fields.extend(self.levels.fields());
        fields
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TrailTypes {
    pub full_size: f64,
    pub atv: f64,
    pub motorcycle: f64,
    pub special: f64,
    pub other: f64,
}

impl TrailTypes {
    pub fn add(&mut self, kind: TrailType, miles: f64) {
        match kind {
            TrailType::FullSize => self.full_size += miles,
            TrailType::Atv => self.atv += miles,
            TrailType::Motorcycle => self.motorcycle += miles,
            TrailType::Special => self.special += miles,
            TrailType::Other => self.other += miles,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("FULL_SIZE", self.full_size),
            ("ATV", self.atv),
            ("MOTORCYCLE", self.motorcycle),
            ("SPECIAL", self.special),
            ("OTHER", self.other),
        ]
    }
}

// ── Shapes ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MvumRoadStats {
    pub num_roads: u64,
    pub total_mileage: f64,
    pub total_seasonal_mileage: f64,
    pub maintenance_levels: MaintenanceLevels,
    /// Not part of the breakdown; a road adds here independently of its level.
    pub all_vehicles_mileage: f64,
    pub highway_vehicles_only_mileage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MvumTrailStats {
    pub num_trails: u64,
    pub total_mileage: f64,
    pub total_seasonal_mileage: f64,
    pub trail_type: TrailTypes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ClosedRoadStats {
    pub num_roads: u64,
    pub total_mileage: f64,
    pub admin_mileage: f64,
    pub mileage_suitable_for_trail_conversion: f64,
    pub maintenance_levels: ClosedMaintenanceLevels,
}

/// One instance of each shape, carried by every forest and district.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RouteSummary {
    pub mvum_roads: MvumRoadStats,
    pub mvum_trails: MvumTrailStats,
    pub closed_roads: ClosedRoadStats,
}

impl RouteStats for MvumRoadStats {
    const KEY: &'static str = "MVUM_ROADS";

    fn slot(routes: &RouteSummary) -> &Self {
        &routes.mvum_roads
    }

    fn slot_mut(routes: &mut RouteSummary) -> &mut Self {
        &mut routes.mvum_roads
    }

    fn count(&self) -> u64 {
        self.num_roads
    }

    fn total_mileage(&self) -> f64 {
        self.total_mileage
    }

    fn breakdown(&self) -> Vec<(&'static str, f64)> {
        self.maintenance_levels.fields().to_vec()
    }

    fn mileage_fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("TOTAL_MILEAGE", self.total_mileage),
            ("TOTAL_SEASONAL_MILEAGE", self.total_seasonal_mileage),
            ("ALL_VEHICLES_MILEAGE", self.all_vehicles_mileage),
            ("HIGHWAY_VEHICLES_ONLY_MILEAGE", self.highway_vehicles_only_mileage),
        ];
        fields.extend(self.breakdown());
        fields
    }

    fn merge(&mut self, o: &Self) {
        self.num_roads += o.num_roads;
        self.total_mileage += o.total_mileage;
        self.total_seasonal_mileage += o.total_seasonal_mileage;
        self.maintenance_levels.merge(&o.maintenance_levels);
        self.all_vehicles_mileage += o.all_vehicles_mileage;
        self.highway_vehicles_only_mileage += o.highway_vehicles_only_mileage;
    }

    fn round(&mut self, decimals: u32) {
        self.total_mileage = round_to(self.total_mileage, decimals);
        self.total_seasonal_mileage = round_to(self.total_seasonal_mileage, decimals);
        self.maintenance_levels.round(decimals);
        self.all_vehicles_mileage = round_to(self.all_vehicles_mileage, decimals);
        self.highway_vehicles_only_mileage = round_to(self.highway_vehicles_only_mileage, decimals);
    }
}

impl RouteStats for MvumTrailStats {
    const KEY: &'static str = "MVUM_TRAILS";

    fn slot(routes: &RouteSummary) -> &Self {
        &routes.mvum_trails
    }

    fn slot_mut(routes: &mut RouteSummary) -> &mut Self {
        &mut routes.mvum_trails
    }

    fn count(&self) -> u64 {
        self.num_trails
    }

    fn total_mileage(&self) -> f64 {
        self.total_mileage
    }

    fn breakdown(&self) -> Vec<(&'static str, f64)> {
        self.trail_type.fields().to_vec()
    }

    fn mileage_fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("TOTAL_MILEAGE", self.total_mileage),
            ("TOTAL_SEASONAL_MILEAGE", self.total_seasonal_mileage),
        ];
        fields.extend(self.breakdown());
        fields
    }

    fn merge(&mut self, o: &Self) {
        self.num_trails += o.num_trails;
        self.total_mileage += o.total_mileage;
        self.total_seasonal_mileage += o.total_seasonal_mileage;
        let t = &mut self.trail_type;
        t.full_size += o.trail_type.full_size;
        t.atv += o.trail_type.atv;
        t.motorcycle += o.trail_type.motorcycle;
        t.special += o.trail_type.special;
        t.other += o.trail_type.other;
    }

    fn round(&mut self, decimals: u32) {
        self.total_mileage = round_to(self.total_mileage, decimals);
        self.total_seasonal_mileage = round_to(self.total_seasonal_mileage, decimals);
        let t = &mut self.trail_type;
        for v in [&mut t.full_size, &mut t.atv, &mut t.motorcycle, &mut t.special, &mut t.other] {
            *v = round_to(*v, decimals);
        }
    }
}

impl RouteStats for ClosedRoadStats {
    const KEY: &'static str = "CLOSED_ROADS";

    fn slot(routes: &RouteSummary) -> &Self {
        &routes.closed_roads
    }

    fn slot_mut(routes: &mut RouteSummary) -> &mut Self {
        &mut routes.closed_roads
    }

    fn count(&self) -> u64 {
        self.num_roads
    }

    fn total_mileage(&self) -> f64 {
        self.total_mileage
    }

    fn breakdown(&self) -> Vec<(&'static str, f64)> {
        self.maintenance_levels.fields()
    }

    fn mileage_fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("TOTAL_MILEAGE", self.total_mileage),
            ("ADMIN_MILEAGE", self.admin_mileage),
            ("MILEAGE_SUITABLE_FOR_TRAIL_CONVERSION", self.mileage_suitable_for_trail_conversion),
        ];
        fields.extend(self.breakdown());
        fields
    }

    fn merge(&mut self, o: &Self) {
        self.num_roads += o.num_roads;
        self.total_mileage += o.total_mileage;
        self.admin_mileage += o.admin_mileage;
        self.mileage_suitable_for_trail_conversion += o.mileage_suitable_for_trail_conversion;
        self.maintenance_levels.decommissioned += o.maintenance_levels.decommissioned;
        self.maintenance_levels.levels.merge(&o.maintenance_levels.levels);
    }

    fn round(&mut self, decimals: u32) {
        self.total_mileage = round_to(self.total_mileage, decimals);
        self.admin_mileage = round_to(self.admin_mileage, decimals);
        self.mileage_suitable_for_trail_conversion =
            round_to(self.mileage_suitable_for_trail_conversion, decimals);
        self.maintenance_levels.decommissioned =
            round_to(self.maintenance_levels.decommissioned, decimals);
        self.maintenance_levels.levels.round(decimals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_levels_serialize_flat() {
        let mut levels = ClosedMaintenanceLevels::default();
        levels.add(ClosedLevel::Decommissioned, 1.5);
        levels.add(ClosedLevel::Maintained(MaintenanceLevel::Ml2), 2.0);
        let json = serde_json::to_value(levels).unwrap();
        assert_eq!(json["DECOMMISSIONED"], 1.5);
        assert_eq!(json["ML2"], 2.0);
        assert_eq!(json["NONE"], 0.0);
        assert!(json.get("LEVELS").is_none());
    }

    #[test]
    fn missing_sub_objects_default_to_zero() {
        let routes: RouteSummary =
            serde_json::from_str(r#"{"MVUM_ROADS": {"NUM_ROADS": 4, "TOTAL_MILEAGE": 2.5}}"#).unwrap();
        assert_eq!(routes.mvum_roads.num_roads, 4);
        assert_eq!(routes.mvum_roads.maintenance_levels, MaintenanceLevels::default());
        assert_eq!(routes.mvum_trails, MvumTrailStats::default());
        assert_eq!(routes.closed_roads, ClosedRoadStats::default());
    }

    #[test]
    fn merge_then_round_sums_fieldwise() {
        let mut a = MvumTrailStats { num_trails: 2, total_mileage: 1.111, ..Default::default() };
        a.trail_type.atv = 1.111;
        let mut b = MvumTrailStats { num_trails: 3, total_mileage: 2.222, ..Default::default() };
        b.trail_type.atv = 2.222;
        a.merge(&b);
        a.round(2);
        assert_eq!(a.num_trails, 5);
        assert_eq!(a.total_mileage, 3.33);
        assert_eq!(a.trail_type.atv, 3.33);
    }

    #[test]
    fn mileage_fields_cover_breakdown() {
        let stats = ClosedRoadStats::default();
        let names: Vec<_> = stats.mileage_fields().into_iter().map(|(k, _)| k).collect();
        assert!(names.contains(&"DECOMMISSIONED"));
        assert!(names.contains(&"MILEAGE_SUITABLE_FOR_TRAIL_CONVERSION"));
        assert_eq!(names.len(), 10);
    }
}
