//! Entity matching: which raw records belong to which forest or district.
//!
//! The GIS layers disagree on how they identify an administrative unit, so
//! each dataset joins through its own [`MatchStrategy`]:
//!
//! | Strategy         | Forest level                         | District level                  |
//! |------------------|--------------------------------------|---------------------------------|
//! | `ByName`         | `FORESTNAME == name`                 | plus `DISTRICTNAME == name`     |
//! | `OrgCodePrefix`  | leading 3 chars of `ADMIN_ORG` as int | same rule on the district code |
//! | `OrgCodeExact`   | `ADMIN_ORG == code.to_string()`      | same                            |
//! | `PaddedOrgCode`  | `ALL` and starts with `"0" + code`   | `ALL` and equals `"0" + code`   |
//!
//! The padded form only makes sense for 3-digit forest and 5-digit district
//! codes; any other width is rejected with [`PipelineError::OrgCodeWidth`].

use crate::error::{PipelineError, Result};
use crate::model::records::RouteRecord;
use crate::model::{NationalForest, RangerDistrict};

pub const FOREST_CODE_WIDTH: usize = 3;
pub const DISTRICT_CODE_WIDTH: usize = 5;

/// `OPENFORUSETO` value required by the padded matcher.
pub const OPEN_TO_ALL: &str = "ALL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    ByName,
    OrgCodePrefix,
    OrgCodeExact,
    PaddedOrgCode,
}

/// The unit records are being matched against.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Forest(&'a NationalForest),
    District {
        forest: &'a NationalForest,
        district: &'a RangerDistrict,
    },
}

impl Entity<'_> {
    pub fn label(&self) -> String {
        match self {
            Entity::Forest(f) => f.name.clone(),
            Entity::District { forest, district } => format!("{} / {}", forest.name, district.name),
        }
    }

    fn org_code(&self) -> u64 {
        match self {
            Entity::Forest(f) => f.org_code,
            Entity::District { district, .. } => district.org_code,
        }
    }
}

/// A strategy bound to one entity, with its key precomputed.
#[derive(Debug, Clone)]
pub enum Matcher<'a> {
    ForestName(&'a str),
    DistrictName { forest: &'a str, district: &'a str },
    OrgCodePrefix(u64),
    OrgCodeExact(String),
    PaddedPrefix(String),
    PaddedExact(String),
}

impl MatchStrategy {
    pub fn matcher<'a>(self, entity: Entity<'a>) -> Result<Matcher<'a>> {
        Ok(match (self, entity) {
            (MatchStrategy::ByName, Entity::Forest(f)) => Matcher::ForestName(&f.name),
            (MatchStrategy::ByName, Entity::District { forest, district }) => Matcher::DistrictName {
                forest: &forest.name,
                district: &district.name,
            },
            (MatchStrategy::OrgCodePrefix, e) => Matcher::OrgCodePrefix(e.org_code()),
            (MatchStrategy::OrgCodeExact, e) => Matcher::OrgCodeExact(e.org_code().to_string()),
            (MatchStrategy::PaddedOrgCode, e @ Entity::Forest(_)) => {
                Matcher::PaddedPrefix(padded_code(&e, FOREST_CODE_WIDTH)?)
            }
            (MatchStrategy::PaddedOrgCode, e @ Entity::District { .. }) => {
                Matcher::PaddedExact(padded_code(&e, DISTRICT_CODE_WIDTH)?)
            }
        })
    }
}

fn padded_code(entity: &Entity<'_>, expected: usize) -> Result<String> {
    let code = entity.org_code();
    let digits = code.to_string();
    if digits.len() != expected {
        return Err(PipelineError::OrgCodeWidth {
            entity: entity.label(),
            code,
            width: digits.len(),
            expected,
        });
    }
    Ok(format!("0{digits}"))
}

/// Integer value of the leading digits of the first three characters, or
/// `None` when they don't start with a digit.
fn org_prefix(admin_org: &str) -> Option<u64> {
    let head: String = admin_org
        .chars()
        .take(FOREST_CODE_WIDTH)
        .skip_while(|c| c.is_whitespace())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    head.parse().ok()
}

impl Matcher<'_> {
    pub fn matches<R: RouteRecord>(&self, record: &R) -> bool {
        match self {
            Matcher::ForestName(name) => record.forest_name() == Some(*name),
            Matcher::DistrictName { forest, district } => {
                record.forest_name() == Some(*forest) && record.district_name() == Some(*district)
            }
            Matcher::OrgCodePrefix(code) => {
                record.admin_org().and_then(org_prefix) == Some(*code)
            }
            Matcher::OrgCodeExact(code) => record.admin_org() == Some(code.as_str()),
            Matcher::PaddedPrefix(prefix) => {
                open_to_all(record) && record.admin_org().is_some_and(|org| org.starts_with(prefix.as_str()))
            }
            Matcher::PaddedExact(code) => {
                open_to_all(record) && record.admin_org() == Some(code.as_str())
            }
        }
    }
}

fn open_to_all<R: RouteRecord>(record: &R) -> bool {
    record.open_for_use_to() == Some(OPEN_TO_ALL)
}

// ── Per-dataset joins ─────────────────────────────────────────────────────────

/// The pair of strategies one dataset uses at forest and district level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Join {
    pub forest: MatchStrategy,
    pub district: MatchStrategy,
}

impl Join {
    pub const MVUM: Join = Join {
        forest: MatchStrategy::ByName,
        district: MatchStrategy::ByName,
    };
    pub const CLOSED_ROADS: Join = Join {
        forest: MatchStrategy::OrgCodePrefix,
        district: MatchStrategy::OrgCodeExact,
    };
    pub const NFS_ROADS: Join = Join {
        forest: MatchStrategy::PaddedOrgCode,
        district: MatchStrategy::PaddedOrgCode,
    };

    pub fn strategy(&self, entity: &Entity<'_>) -> MatchStrategy {
        match entity {
            Entity::Forest(_) => self.forest,
            Entity::District { .. } => self.district,
        }
    }

    /// Records belonging to `entity`, in input order.
    pub fn select<'r, R: RouteRecord>(&self, entity: Entity<'_>, records: &'r [R]) -> Result<Vec<&'r R>> {
        let matcher = self.strategy(&entity).matcher(entity)?;
        Ok(records.iter().filter(|r| matcher.matches(*r)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::records::{ClosedRoadRecord, MvumRoadRecord, NfsRoadRecord};

    fn forest(name: &str, code: u64, districts: Vec<RangerDistrict>) -> NationalForest {
        NationalForest {
            name: name.into(),
            org_code: code,
            ranger_districts: districts,
            ..Default::default()
        }
    }

    fn district(name: &str, code: u64) -> RangerDistrict {
        RangerDistrict {
            name: name.into(),
            org_code: code,
            ..Default::default()
        }
    }

    fn closed(org: &str) -> ClosedRoadRecord {
        ClosedRoadRecord {
            admin_org: Some(org.into()),
            ..Default::default()
        }
    }

    fn nfs(org: &str, open: &str) -> NfsRoadRecord {
        NfsRoadRecord {
            admin_org: Some(org.into()),
            open_for_use_to: Some(open.into()),
            ..Default::default()
        }
    }

    #[test]
    fn by_name_is_exact_and_case_sensitive() {
        let f = forest("Angeles National Forest", 501, vec![district("Santa Clara", 50153)]);
        let roads = vec![
            MvumRoadRecord {
                forest_name: Some("Angeles National Forest".into()),
                district_name: Some("Santa Clara".into()),
                ..Default::default()
            },
            MvumRoadRecord {
                forest_name: Some("angeles national forest".into()),
                district_name: Some("Santa Clara".into()),
                ..Default::default()
            },
            MvumRoadRecord {
                forest_name: Some("Angeles National Forest".into()),
                district_name: Some("Los Angeles River".into()),
                ..Default::default()
            },
        ];
        assert_eq!(Join::MVUM.select(Entity::Forest(&f), &roads).unwrap().len(), 2);
        let d = &f.ranger_districts[0];
        let matched = Join::MVUM.select(Entity::District { forest: &f, district: d }, &roads).unwrap();
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn forest_prefix_parses_first_three_chars() {
        let f = forest("Angeles National Forest", 501, vec![]);
        let roads = vec![closed("50123456"), closed("501"), closed("5012"), closed("0501"), closed(""), closed("50x")];
        let matched = Join::CLOSED_ROADS.select(Entity::Forest(&f), &roads).unwrap();
        let orgs: Vec<_> = matched.iter().filter_map(|r| r.admin_org.as_deref()).collect();
        assert_eq!(orgs, vec!["50123456", "501", "5012"]);
    }

    #[test]
    fn district_exact_has_no_padding() {
        let f = forest("Angeles National Forest", 501, vec![district("Santa Clara", 50153)]);
        let roads = vec![closed("50153"), closed("050153"), closed("501530"), closed("50123456")];
        let d = &f.ranger_districts[0];
        let matched = Join::CLOSED_ROADS
            .select(Entity::District { forest: &f, district: d }, &roads)
            .unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].admin_org.as_deref(), Some("50153"));
    }

    #[test]
    fn padded_requires_open_to_all() {
        let f = forest("Test National Forest", 102, vec![district("North", 10201)]);
        let roads = vec![
            nfs("010201", "ALL"),
            nfs("010299", "ALL"),
            nfs("010201", "ADMIN"),
            nfs("10201", "ALL"),
        ];
        assert_eq!(Join::NFS_ROADS.select(Entity::Forest(&f), &roads).unwrap().len(), 2);
        let d = &f.ranger_districts[0];
        let matched = Join::NFS_ROADS.select(Entity::District { forest: &f, district: d }, &roads).unwrap();
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn padded_rejects_unexpected_widths() {
        let f = forest("Wide National Forest", 1002, vec![district("Narrow", 102)]);
        let err = MatchStrategy::PaddedOrgCode.matcher(Entity::Forest(&f)).unwrap_err();
        assert!(matches!(err, PipelineError::OrgCodeWidth { width: 4, expected: 3, .. }));

        let d = &f.ranger_districts[0];
        let err = MatchStrategy::PaddedOrgCode
            .matcher(Entity::District { forest: &f, district: d })
            .unwrap_err();
        assert!(matches!(err, PipelineError::OrgCodeWidth { width: 3, expected: 5, .. }));
    }

    #[test]
    fn other_strategies_accept_any_width() {
        let f = forest("Wide National Forest", 1002, vec![]);
        assert!(MatchStrategy::OrgCodePrefix.matcher(Entity::Forest(&f)).is_ok());
        assert!(MatchStrategy::OrgCodeExact.matcher(Entity::Forest(&f)).is_ok());
    }

    #[test]
    fn records_without_the_column_never_match() {
        let f = forest("Angeles National Forest", 501, vec![]);
        let roads = vec![MvumRoadRecord::default()];
        assert!(Join::CLOSED_ROADS.select(Entity::Forest(&f), &roads).unwrap().is_empty());
    }
}
