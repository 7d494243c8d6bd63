//! Attach ranger districts to their national forest by `FORESTNAME`.

use std::collections::{BTreeSet, HashMap};

use log::{info, warn};

use crate::model::{NationalForest, RangerDistrict};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub forests: usize,
    pub districts: usize,
    pub with_districts: usize,
    pub without_districts: usize,
    /// Forest names districts point at that are absent from the forest list.
    pub orphaned_forest_names: BTreeSet<String>,
}

/// Replace each forest's districts with the districts naming it. A forest
/// name listed twice gets its own copy of the group.
pub fn merge_forests(
    mut forests: Vec<NationalForest>,
    districts: Vec<RangerDistrict>,
) -> (Vec<NationalForest>, MergeSummary) {
    let district_count = districts.len();
    let mut by_forest: HashMap<String, Vec<RangerDistrict>> = HashMap::new();
    for district in districts {
        by_forest.entry(district.forest_name.clone()).or_default().push(district);
    }

    for forest in &mut forests {
        forest.ranger_districts = by_forest.get(&forest.name).cloned().unwrap_or_default();
    }

    let known: BTreeSet<&str> = forests.iter().map(|f| f.name.as_str()).collect();
    let orphaned_forest_names: BTreeSet<String> = by_forest
        .iter()
        .filter(|(name, _)| !known.contains(name.as_str()))
        .map(|(name, _)| name.clone())
        .collect();
    for name in &orphaned_forest_names {
        warn!("{} ranger districts name unknown forest {:?}", by_forest[name].len(), name);
    }

    let with_districts = forests.iter().filter(|f| f.has_districts()).count();
    let summary = MergeSummary {
        forests: forests.len(),
        districts: district_count,
        with_districts,
        without_districts: forests.len() - with_districts,
        orphaned_forest_names,
    };
    info!(
        "Merged {} national forests with {} ranger districts",
        summary.forests, summary.districts
    );
    info!(
        "{} forests have ranger districts, {} have none",
        summary.with_districts, summary.without_districts
    );
    (forests, summary)
}
