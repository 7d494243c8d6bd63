//! Aggregation and reconciliation of motorized-route statistics for National
//! Forests and their Ranger Districts.
//!
//! Every stage takes the forest collection by value and hands back the
//! updated collection, so stages compose in a fixed order without shared
//! mutable state. See [`pipeline`] for that order.

pub mod aggregate;
pub mod artifact;
pub mod classify;
pub mod correction;
pub mod error;
pub mod gap_fill;
pub mod integrity;
pub mod matcher;
pub mod merge;
pub mod model;
pub mod paths;
pub mod pipeline;
pub mod reconcile;
pub mod round;
pub mod scorecard;
pub mod vehicle;

pub use error::{PipelineError, Result};
pub use model::{NationalForest, RangerDistrict, RouteSummary};
