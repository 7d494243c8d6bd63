//! Consistency checks over a finished artifact.
//!
//! Three families of checks run per forest:
//! - parent-child: forest stats equal the sum over its districts, within a
//!   [`Tolerance`];
//! - category sum: each breakdown adds up to its total mileage, within the
//!   worst-case rounding error of its fields and every district summed into
//!   them, or the tolerance's mileage bound if that is looser;
//! - non-negative mileage.

use std::fmt;

use crate::model::stats::{ClosedRoadStats, MvumRoadStats, MvumTrailStats, RouteStats};
use crate::model::{NationalForest, RouteSummary};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Largest accepted absolute count difference.
    pub count: u64,
    /// Mileage differences must be strictly below this.
    pub mileage: f64,
}

impl Tolerance {
    pub const STRICT: Tolerance = Tolerance { count: 0, mileage: 0.1 };
    pub const LENIENT: Tolerance = Tolerance { count: 10, mileage: 5.0 };
}

/// Rounding error one field at 2 decimals can carry.
const HALF_CENT: f64 = 0.005;

#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    ParentChild {
        shape: &'static str,
        field: &'static str,
        forest: f64,
        districts: f64,
    },
    CategorySum {
        entity: String,
        shape: &'static str,
        total: f64,
        breakdown: f64,
    },
    NegativeMileage {
        entity: String,
        shape: &'static str,
        field: &'static str,
        value: f64,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::ParentChild { shape, field, forest, districts } => write!(
                f,
                "{shape}.{field}: forest {forest:.2} vs district sum {districts:.2} (diff {:.2})",
                (forest - districts).abs()
            ),
            Violation::CategorySum { entity, shape, total, breakdown } => write!(
                f,
                "{entity} {shape}: breakdown sums to {breakdown:.2}, total is {total:.2}"
            ),
            Violation::NegativeMileage { entity, shape, field, value } => {
                write!(f, "{entity} {shape}.{field} is negative ({value})")
            }
        }
    }
}

fn parent_child<S: RouteStats>(forest: &NationalForest, tol: Tolerance, out: &mut Vec<Violation>) {
    let parent = S::slot(&forest.routes);
    let children = forest.ranger_districts.iter().map(|d| S::slot(&d.routes));

    let mut count = 0u64;
    let mut sums: Vec<f64> = vec![0.0; parent.mileage_fields().len()];
    for child in children {
        count += child.count();
        for (sum, (_, value)) in sums.iter_mut().zip(child.mileage_fields()) {
            *sum += value;
        }
    }

    if parent.count().abs_diff(count) > tol.count {
        out.push(Violation::ParentChild {
            shape: S::KEY,
            field: "COUNT",
            forest: parent.count() as f64,
            districts: count as f64,
        });
    }
    for ((field, value), sum) in parent.mileage_fields().into_iter().zip(sums) {
        if (value - sum).abs() >= tol.mileage {
            out.push(Violation::ParentChild {
                shape: S::KEY,
                field,
                forest: value,
                districts: sum,
            });
        }
    }
}

/// `parts` is how many independently rounded stats objects were summed into
/// `routes`: one for a district, districts + 1 for a reconciled forest.
fn shape_checks<S: RouteStats>(
    entity: &str,
    routes: &RouteSummary,
    parts: usize,
    tol: Tolerance,
    out: &mut Vec<Violation>,
) {
    let stats = S::slot(routes);
    let breakdown = stats.breakdown();
    let sum: f64 = breakdown.iter().map(|(_, v)| v).sum();
    let rounding = HALF_CENT * ((breakdown.len() + 1) * parts) as f64 + 1e-9;
    let slack = rounding.max(tol.mileage);
    if (sum - stats.total_mileage()).abs() > slack {
        out.push(Violation::CategorySum {
            entity: entity.to_string(),
            shape: S::KEY,
            total: stats.total_mileage(),
            breakdown: sum,
        });
    }

    for (field, value) in stats.mileage_fields() {
        if value < 0.0 {
            out.push(Violation::NegativeMileage {
                entity: entity.to_string(),
                shape: S::KEY,
                field,
                value,
            });
        }
    }
}

fn entity_checks(
    entity: &str,
    routes: &RouteSummary,
    parts: usize,
    tol: Tolerance,
    out: &mut Vec<Violation>,
) {
    shape_checks::<MvumRoadStats>(entity, routes, parts, tol, out);
    shape_checks::<MvumTrailStats>(entity, routes, parts, tol, out);
    shape_checks::<ClosedRoadStats>(entity, routes, parts, tol, out);
}

/// All violations for one forest and its districts.
pub fn check_forest(forest: &NationalForest, tol: Tolerance) -> Vec<Violation> {
    let mut out = Vec::new();
    if forest.has_districts() {
        parent_child::<MvumRoadStats>(forest, tol, &mut out);
        parent_child::<MvumTrailStats>(forest, tol, &mut out);
        parent_child::<ClosedRoadStats>(forest, tol, &mut out);
    }
    let parts = forest.ranger_districts.len() + 1;
    entity_checks(&forest.name, &forest.routes, parts, tol, &mut out);
    for district in &forest.ranger_districts {
        let label = format!("{} / {}", forest.name, district.name);
        entity_checks(&label, &district.routes, 1, tol, &mut out);
    }
    out
}

// ── Report ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Perfect,
    /// Fails strict tolerance, passes lenient.
    Minor,
    Major,
}

#[derive(Debug, Default)]
pub struct IntegrityReport {
    /// Forests that own at least one district.
    pub with_districts: usize,
    pub perfect: usize,
    pub minor: Vec<(String, Vec<Violation>)>,
    pub major: Vec<(String, Vec<Violation>)>,
    pub without_districts: Vec<String>,
}

pub fn verdict(forest: &NationalForest) -> (Verdict, Vec<Violation>) {
    let strict = check_forest(forest, Tolerance::STRICT);
    if strict.is_empty() {
        return (Verdict::Perfect, strict);
    }
    let lenient = check_forest(forest, Tolerance::LENIENT);
    if lenient.is_empty() {
        (Verdict::Minor, strict)
    } else {
        (Verdict::Major, lenient)
    }
}

impl IntegrityReport {
    pub fn build(forests: &[NationalForest]) -> Self {
        let mut report = Self::default();
        for forest in forests {
            if forest.has_districts() {
                report.with_districts += 1;
            } else {
                report.without_districts.push(forest.name.clone());
            }
            match verdict(forest) {
                (Verdict::Perfect, _) => report.perfect += usize::from(forest.has_districts()),
                (Verdict::Minor, v) => report.minor.push((forest.name.clone(), v)),
                (Verdict::Major, v) => report.major.push((forest.name.clone(), v)),
            }
        }
        report
    }

    pub fn strict_violations(&self) -> usize {
        self.minor.len() + self.major.len()
    }

    pub fn is_clean(&self) -> bool {
        self.strict_violations() == 0
    }
}
