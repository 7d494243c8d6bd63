//! Declarative district-membership corrections.
//!
//! Org-code prefix joins can pull in records from administrative units that
//! are not defined ranger districts. A [`Correction`] names such a forest
//! and recomputes its forest-level stats from the records whose admin org is
//! on an explicit allow-list. Everything else under the forest's prefix is
//! reported as orphaned and left out of the aggregate.

use std::collections::{BTreeMap, HashSet};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, Accumulate};
use crate::error::{PipelineError, Result};
use crate::matcher::{Entity, Join};
use crate::model::records::{ClosedRoadRecord, NfsRoadRecord, RouteRecord};
use crate::model::stats::{ClosedRoadStats, MvumRoadStats};
use crate::model::NationalForest;
use crate::round::{round_to, STATS_DECIMALS};

/// Forest and district-sum totals agree when closer than this.
pub const VERIFY_TOLERANCE: f64 = 0.01;

/// Dataset a correction recomputes. `NfsRoads` rewrites the forest's
/// `MVUM_ROADS` from the NFS layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorrectedDataset {
    ClosedRoads,
    NfsRoads,
}

impl CorrectedDataset {
    fn join(self) -> Join {
        match self {
            CorrectedDataset::ClosedRoads => Join::CLOSED_ROADS,
            CorrectedDataset::NfsRoads => Join::NFS_ROADS,
        }
    }

    /// The `ADMIN_ORG` form of a district org code in this dataset.
    fn admin_org(self, district_code: &str) -> String {
        match self {
            CorrectedDataset::ClosedRoads => district_code.to_string(),
            CorrectedDataset::NfsRoads => format!("0{district_code}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Correction {
    #[serde(rename = "FORESTNAME")]
    pub forest_name: String,
    pub datasets: Vec<CorrectedDataset>,
    /// District org codes, unpadded. Defaults to the forest's own districts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_codes: Option<Vec<String>>,
}

impl Correction {
    pub fn new(forest_name: impl Into<String>, datasets: Vec<CorrectedDataset>) -> Self {
        Self {
            forest_name: forest_name.into(),
            datasets,
            allowed_codes: None,
        }
    }

    fn allow_list(&self, forest: &NationalForest, dataset: CorrectedDataset) -> HashSet<String> {
        match &self.allowed_codes {
            Some(codes) => codes.iter().map(|c| dataset.admin_org(c)).collect(),
            None => forest
                .ranger_districts
                .iter()
                .map(|d| dataset.admin_org(&d.org_code.to_string()))
                .collect(),
        }
    }
}

/// Every known correction, applied in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrectionTable(pub Vec<Correction>);

pub const ANGELES: &str = "Angeles National Forest";

impl Default for CorrectionTable {
    fn default() -> Self {
        Self(vec![Correction::new(
            ANGELES,
            vec![CorrectedDataset::ClosedRoads, CorrectedDataset::NfsRoads],
        )])
    }
}

/// Records under the forest's prefix whose code is not on the allow-list.
#[derive(Debug, Clone, PartialEq)]
pub struct OrphanGroup {
    pub admin_org: String,
    pub count: usize,
    pub mileage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionOutcome {
    pub forest_name: String,
    pub dataset: CorrectedDataset,
    pub kept: usize,
    pub total_mileage: f64,
    pub district_mileage: f64,
    pub orphans: Vec<OrphanGroup>,
}

impl CorrectionOutcome {
    pub fn verified(&self) -> bool {
        (self.district_mileage - self.total_mileage).abs() < VERIFY_TOLERANCE
    }
}

fn group_orphans<R: RouteRecord>(orphaned: &[&R]) -> Vec<OrphanGroup> {
    let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for record in orphaned {
        let entry = groups.entry(record.admin_org().unwrap_or_default()).or_default();
        entry.0 += 1;
        entry.1 += record.segment_length();
    }
    groups
        .into_iter()
        .map(|(org, (count, miles))| OrphanGroup {
            admin_org: org.to_string(),
            count,
            mileage: round_to(miles, STATS_DECIMALS),
        })
        .collect()
}

fn correct<S, R>(
    forest: &NationalForest,
    correction: &Correction,
    dataset: CorrectedDataset,
    records: &[R],
) -> Result<(S, CorrectionOutcome)>
where
    S: Accumulate<R>,
    R: RouteRecord,
{
    let allowed = correction.allow_list(forest, dataset);
    let candidates = dataset.join().select(Entity::Forest(forest), records)?;
    let (kept, orphaned): (Vec<&R>, Vec<&R>) = candidates
        .into_iter()
        .partition(|r| r.admin_org().is_some_and(|org| allowed.contains(org)));

    let kept_count = kept.len();
    let stats: S = aggregate(kept);
    let district_mileage = forest
        .ranger_districts
        .iter()
        .map(|d| S::slot(&d.routes).total_mileage())
        .sum::<f64>();

    let outcome = CorrectionOutcome {
        forest_name: forest.name.clone(),
        dataset,
        kept: kept_count,
        total_mileage: stats.total_mileage(),
        district_mileage,
        orphans: group_orphans(&orphaned),
    };
    Ok((stats, outcome))
}

fn report(outcome: &CorrectionOutcome) {
    info!(
        "{} {:?}: {} records kept, {:.2} mi",
        outcome.forest_name, outcome.dataset, outcome.kept, outcome.total_mileage
    );
    info!(
        "  district sum {:.2} mi vs forest {:.2} mi: {}",
        outcome.district_mileage,
        outcome.total_mileage,
        if outcome.verified() { "match" } else { "MISMATCH" }
    );
    for orphan in &outcome.orphans {
        warn!(
            "  orphaned {}: {} records, {:.2} mi not in any defined district",
            orphan.admin_org, orphan.count, orphan.mileage
        );
    }
}

/// Apply `table` to the forest collection. Every named forest must exist;
/// nothing is changed if one is missing.
pub fn apply_corrections(
    mut forests: Vec<NationalForest>,
    table: &CorrectionTable,
    closed_roads: &[ClosedRoadRecord],
    nfs_roads: &[NfsRoadRecord],
) -> Result<(Vec<NationalForest>, Vec<CorrectionOutcome>)> {
    let targets = table
        .0
        .iter()
        .map(|c| {
            forests
                .iter()
                .position(|f| f.name == c.forest_name)
                .ok_or_else(|| PipelineError::EntityNotFound {
                    name: c.forest_name.clone(),
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut outcomes = Vec::new();
    for (correction, idx) in table.0.iter().zip(targets) {
        for &dataset in &correction.datasets {
            let forest = &forests[idx];
            let outcome = match dataset {
                CorrectedDataset::ClosedRoads => {
                    let (stats, outcome) =
                        correct::<ClosedRoadStats, _>(forest, correction, dataset, closed_roads)?;
                    forests[idx].routes.closed_roads = stats;
                    outcome
                }
                CorrectedDataset::NfsRoads => {
                    let (stats, outcome) =
                        correct::<MvumRoadStats, _>(forest, correction, dataset, nfs_roads)?;
                    forests[idx].routes.mvum_roads = stats;
                    outcome
                }
            };
            report(&outcome);
            outcomes.push(outcome);
        }
    }
    Ok((forests, outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RangerDistrict;

    fn angeles() -> NationalForest {
        let mut north = RangerDistrict { name: "Santa Clara".into(), org_code: 50153, ..Default::default() };
        north.routes.closed_roads.total_mileage = 3.0;
        north.routes.mvum_roads.total_mileage = 2.0;
        let mut south = RangerDistrict { name: "San Gabriel".into(), org_code: 50154, ..Default::default() };
        south.routes.closed_roads.total_mileage = 4.0;
        NationalForest {
            name: ANGELES.into(),
            org_code: 501,
            ranger_districts: vec![north, south],
            ..Default::default()
        }
    }

    fn closed(org: &str, len: &str) -> ClosedRoadRecord {
        ClosedRoadRecord {
            admin_org: Some(org.into()),
            seg_length: Some(len.into()),
            ..Default::default()
        }
    }

    fn nfs(org: &str, len: &str, open: &str) -> NfsRoadRecord {
        NfsRoadRecord {
            admin_org: Some(org.into()),
            seg_length: Some(len.into()),
            open_for_use_to: Some(open.into()),
            ..Default::default()
        }
    }

    #[test]
    fn closed_roads_keep_only_defined_districts() {
        let roads = vec![
            closed("50153", "3.0"),
            closed("50154", "4.0"),
            closed("50101", "1.25"),
            closed("50101", "0.75"),
            closed("50201", "9.0"),
        ];
        let table = CorrectionTable(vec![Correction::new(ANGELES, vec![CorrectedDataset::ClosedRoads])]);
        let (forests, outcomes) = apply_corrections(vec![angeles()], &table, &roads, &[]).unwrap();

        let stats = &forests[0].routes.closed_roads;
        assert_eq!(stats.num_roads, 2);
        assert_eq!(stats.total_mileage, 7.0);

        let outcome = &outcomes[0];
        assert!(outcome.verified());
        assert_eq!(
            outcome.orphans,
            vec![OrphanGroup { admin_org: "50101".into(), count: 2, mileage: 2.0 }]
        );
    }

    #[test]
    fn nfs_roads_use_padded_codes_and_open_to_all() {
        let roads = vec![
            nfs("050153", "2.0", "ALL"),
            nfs("050153", "5.0", "ADMIN"),
            nfs("050199", "1.0", "ALL"),
        ];
        let table = CorrectionTable(vec![Correction::new(ANGELES, vec![CorrectedDataset::NfsRoads])]);
        let (forests, outcomes) = apply_corrections(vec![angeles()], &table, &[], &roads).unwrap();
        assert_eq!(forests[0].routes.mvum_roads.num_roads, 1);
        assert_eq!(forests[0].routes.mvum_roads.total_mileage, 2.0);
        assert_eq!(outcomes[0].orphans.len(), 1);
        assert_eq!(outcomes[0].orphans[0].admin_org, "050199");
    }

    #[test]
    fn explicit_allow_list_overrides_districts() {
        let roads = vec![closed("50153", "3.0"), closed("50101", "1.0")];
        let mut correction = Correction::new(ANGELES, vec![CorrectedDataset::ClosedRoads]);
        correction.allowed_codes = Some(vec!["50101".into()]);
        let (forests, outcomes) =
            apply_corrections(vec![angeles()], &CorrectionTable(vec![correction]), &roads, &[]).unwrap();
        assert_eq!(forests[0].routes.closed_roads.total_mileage, 1.0);
        assert!(!outcomes[0].verified());
    }

    #[test]
    fn missing_forest_is_fatal() {
        let err = apply_corrections(vec![], &CorrectionTable::default(), &[], &[]).unwrap_err();
        assert!(matches!(err, PipelineError::EntityNotFound { ref name } if name == ANGELES));
    }

    #[test]
    fn table_parses_from_json() {
        let table: CorrectionTable = serde_json::from_str(
            r#"[{"FORESTNAME": "Angeles National Forest", "DATASETS": ["CLOSED_ROADS"], "ALLOWED_CODES": ["50153"]}]"#,
        )
        .unwrap();
        assert_eq!(table.0[0].datasets, vec![CorrectedDataset::ClosedRoads]);
        assert_eq!(table.0[0].allowed_codes.as_deref(), Some(&["50153".to_string()][..]));
    }
}
