//! Entity tree and raw inputs.

pub mod lenient;
pub mod records;
pub mod stats;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::scorecard::Scorecard;

pub use records::{ClosedRoadRecord, MvumRoadRecord, MvumTrailRecord, NfsRoadRecord, RouteRecord};
pub use stats::{
    ClosedMaintenanceLevels, ClosedRoadStats, MaintenanceLevels, MvumRoadStats, MvumTrailStats,
    RouteStats, RouteSummary, TrailTypes,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangerDistrict {
    #[serde(rename = "RANGERDISTRICTID", deserialize_with = "lenient::int")]
    pub ranger_district_id: u64,
    #[serde(rename = "REGION", deserialize_with = "lenient::int")]
    pub region: u64,
    #[serde(rename = "FORESTNUMBER", deserialize_with = "lenient::int")]
    pub forest_number: u64,
    #[serde(rename = "FORESTNAME")]
    pub forest_name: String,
    #[serde(rename = "DISTRICTNUMBER", deserialize_with = "lenient::int")]
    pub district_number: u64,
    #[serde(rename = "DISTRICTNAME")]
    pub name: String,
    #[serde(rename = "DISTRICTORGCODE", deserialize_with = "lenient::int")]
    pub org_code: u64,
    #[serde(rename = "OBJECTID", deserialize_with = "lenient::int")]
    pub object_id: u64,
    #[serde(flatten)]
    pub routes: RouteSummary,
    #[serde(rename = "SCORECARD", skip_serializing_if = "Option::is_none")]
    pub scorecard: Option<Scorecard>,
    /// Source columns this pipeline does not interpret, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NationalForest {
    #[serde(rename = "OBJECTID", deserialize_with = "lenient::int")]
    pub object_id: u64,
    #[serde(rename = "ADMINFORESTID", deserialize_with = "lenient::int")]
    pub admin_forest_id: u64,
    #[serde(rename = "REGION", deserialize_with = "lenient::int")]
    pub region: u64,
    #[serde(rename = "FORESTNUMBER", deserialize_with = "lenient::int")]
    pub forest_number: u64,
    #[serde(rename = "FORESTORGCODE", deserialize_with = "lenient::int")]
    pub org_code: u64,
    #[serde(rename = "FORESTNAME")]
    pub name: String,
    #[serde(rename = "GIS_ACRES", deserialize_with = "lenient::float")]
    pub gis_acres: f64,
    #[serde(rename = "STATE", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Order carries no meaning.
    #[serde(rename = "RANGER_DISTRICTS")]
    pub ranger_districts: Vec<RangerDistrict>,
    #[serde(flatten)]
    pub routes: RouteSummary,
    #[serde(rename = "SCORECARD", skip_serializing_if = "Option::is_none")]
    pub scorecard: Option<Scorecard>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NationalForest {
    pub fn has_districts(&self) -> bool {
        !self.ranger_districts.is_empty()
    }

    pub fn district(&self, name: &str) -> Option<&RangerDistrict> {
        self.ranger_districts.iter().find(|d| d.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOREST_ROW: &str = r#"{
        "OBJECTID": "7",
        "ADMINFORESTID": 99011500010343,
        "REGION": "05",
        "FORESTNUMBER": "01",
        "FORESTORGCODE": "501",
        "FORESTNAME": "Angeles National Forest",
        "GIS_ACRES": "700176.5",
        "SHAPE_AREA": 0.28
    }"#;

    #[test]
    fn listing_row_loads_with_zero_stats() {
        let forest: NationalForest = serde_json::from_str(FOREST_ROW).unwrap();
        assert_eq!(forest.org_code, 501);
        assert_eq!(forest.region, 5);
        assert_eq!(forest.gis_acres, 700176.5);
        assert!(forest.state.is_none());
        assert!(!forest.has_districts());
        assert_eq!(forest.routes, RouteSummary::default());
        assert_eq!(forest.extra.get("SHAPE_AREA"), Some(&Value::from(0.28)));
    }

    #[test]
    fn artifact_keeps_uppercase_keys_and_unknown_columns() {
        let forest: NationalForest = serde_json::from_str(FOREST_ROW).unwrap();
        let json = serde_json::to_value(&forest).unwrap();
        for key in ["FORESTORGCODE", "RANGER_DISTRICTS", "MVUM_ROADS", "MVUM_TRAILS", "CLOSED_ROADS", "SHAPE_AREA"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json.get("SCORECARD").is_none());
        assert!(json.get("STATE").is_none());
        assert_eq!(json["MVUM_ROADS"]["MAINTENANCE_LEVELS"]["NONE"], 0.0);

        let back: NationalForest = serde_json::from_value(json).unwrap();
        assert_eq!(back, forest);
    }

    #[test]
    fn district_routes_are_not_swallowed_by_extra() {
        let district: RangerDistrict = serde_json::from_str(
            r#"{"DISTRICTNAME": "Santa Clara", "DISTRICTORGCODE": 50151,
                "CLOSED_ROADS": {"NUM_ROADS": 2, "TOTAL_MILEAGE": 1.5}, "GLOBALID": "x"}"#,
        )
        .unwrap();
        assert_eq!(district.routes.closed_roads.num_roads, 2);
        assert!(district.extra.get("CLOSED_ROADS").is_none());
        assert_eq!(district.extra.len(), 1);
    }
}
