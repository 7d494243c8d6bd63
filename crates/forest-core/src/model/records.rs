//! Raw route rows as exported from the GIS layers. Read-only inputs.

use serde::Deserialize;

use super::lenient::{self, leading_float};

/// Field access shared by every route dataset. Datasets lacking a column
/// keep the default `None`, so join strategies relying on it match nothing.
pub trait RouteRecord {
    fn raw_segment_length(&self) -> Option<&str>;

    /// Segment length in miles. Unparseable or non-finite lengths count as 0.
    fn segment_length(&self) -> f64 {
        self.raw_segment_length()
            .and_then(leading_float)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    fn forest_name(&self) -> Option<&str> {
        None
    }

    fn district_name(&self) -> Option<&str> {
        None
    }

    fn admin_org(&self) -> Option<&str> {
        None
    }

    fn open_for_use_to(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MvumRoadRecord {
    #[serde(rename = "FORESTNAME", default, deserialize_with = "lenient::opt_string")]
    pub forest_name: Option<String>,
    #[serde(rename = "DISTRICTNAME", default, deserialize_with = "lenient::opt_string")]
    pub district_name: Option<String>,
    #[serde(rename = "SEG_LENGTH", default, deserialize_with = "lenient::opt_string")]
    pub seg_length: Option<String>,
    #[serde(rename = "SEASONAL", default, deserialize_with = "lenient::opt_string")]
    pub seasonal: Option<String>,
    #[serde(rename = "OPERATIONALMAINTLEVEL", default, deserialize_with = "lenient::opt_string")]
    pub maintenance_level: Option<String>,
    #[serde(rename = "MVUM_SYMBOL_NAME", default, deserialize_with = "lenient::opt_string")]
    pub symbol_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MvumTrailRecord {
    #[serde(rename = "FORESTNAME", default, deserialize_with = "lenient::opt_string")]
    pub forest_name: Option<String>,
    #[serde(rename = "DISTRICTNAME", default, deserialize_with = "lenient::opt_string")]
    pub district_name: Option<String>,
    #[serde(rename = "SEG_LENGTH", default, deserialize_with = "lenient::opt_string")]
    pub seg_length: Option<String>,
    #[serde(rename = "SEASONAL", default, deserialize_with = "lenient::opt_string")]
    pub seasonal: Option<String>,
    #[serde(rename = "MVUM_SYMBOL_NAME", default, deserialize_with = "lenient::opt_string")]
    pub symbol_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClosedRoadRecord {
    #[serde(rename = "ADMIN_ORG", default, deserialize_with = "lenient::opt_string")]
    pub admin_org: Option<String>,
    #[serde(rename = "SEG_LENGTH", default, deserialize_with = "lenient::opt_string")]
    pub seg_length: Option<String>,
    #[serde(rename = "OPENFORUSETO", default, deserialize_with = "lenient::opt_string")]
    pub open_for_use_to: Option<String>,
    #[serde(rename = "SYMBOL_NAME", default, deserialize_with = "lenient::opt_string")]
    pub symbol_name: Option<String>,
    #[serde(rename = "OPER_MAINT_LEVEL", default, deserialize_with = "lenient::opt_string")]
    pub maintenance_level: Option<String>,
}

/// Generic NFS road row, used only to fill entities the MVUM layer misses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NfsRoadRecord {
    #[serde(rename = "ADMIN_ORG", default, deserialize_with = "lenient::opt_string")]
    pub admin_org: Option<String>,
    #[serde(rename = "SEG_LENGTH", default, deserialize_with = "lenient::opt_string")]
    pub seg_length: Option<String>,
    #[serde(rename = "OPENFORUSETO", default, deserialize_with = "lenient::opt_string")]
    pub open_for_use_to: Option<String>,
    #[serde(rename = "OPER_MAINT_LEVEL", default, deserialize_with = "lenient::opt_string")]
    pub maintenance_level: Option<String>,
}

impl RouteRecord for MvumRoadRecord {
    fn raw_segment_length(&self) -> Option<&str> {
        self.seg_length.as_deref()
    }

    fn forest_name(&self) -> Option<&str> {
        self.forest_name.as_deref()
    }

    fn district_name(&self) -> Option<&str> {
        self.district_name.as_deref()
    }
}

impl RouteRecord for MvumTrailRecord {
    fn raw_segment_length(&self) -> Option<&str> {
        self.seg_length.as_deref()
    }

    fn forest_name(&self) -> Option<&str> {
        self.forest_name.as_deref()
    }

    fn district_name(&self) -> Option<&str> {
        self.district_name.as_deref()
    }
}

impl RouteRecord for ClosedRoadRecord {
    fn raw_segment_length(&self) -> Option<&str> {
        self.seg_length.as_deref()
    }

    fn admin_org(&self) -> Option<&str> {
        self.admin_org.as_deref()
    }

    fn open_for_use_to(&self) -> Option<&str> {
        self.open_for_use_to.as_deref()
    }
}

impl RouteRecord for NfsRoadRecord {
    fn raw_segment_length(&self) -> Option<&str> {
        self.seg_length.as_deref()
    }

    fn admin_org(&self) -> Option<&str> {
        self.admin_org.as_deref()
    }

    fn open_for_use_to(&self) -> Option<&str> {
        self.open_for_use_to.as_deref()
    }
}
