//! Open-access grade for a forest or district.
//!
//! The open percentage is the share of motorized mileage that is open to
//! full-size vehicles: MVUM roads plus full-size trails, over that plus
//! closed roads. Every entity is graded from its own mileages.

use serde::{Deserialize, Serialize};

use crate::model::{NationalForest, RouteSummary};
use crate::round::{round_to, STATS_DECIMALS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Step function over the open percentage (0–100).
    pub fn from_open_percentage(pct: f64) -> Self {
        if pct >= 80.0 {
            Grade::A
        } else if pct >= 70.0 {
            Grade::B
        } else if pct >= 60.0 {
            Grade::C
        } else if pct >= 50.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn letter(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::F => 'F',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Scorecard {
    pub grade: Grade,
    pub open_roads_percentage: f64,
}

/// Unrounded open percentage; 0 when there is no mileage at all.
pub fn open_percentage(mvum_road_miles: f64, full_size_trail_miles: f64, closed_road_miles: f64) -> f64 {
    let open = mvum_road_miles + full_size_trail_miles;
    let denom = open + closed_road_miles;
    if denom > 0.0 {
        100.0 * open / denom
    } else {
        0.0
    }
}

impl Scorecard {
    pub fn from_mileage(mvum_road_miles: f64, full_size_trail_miles: f64, closed_road_miles: f64) -> Self {
        let pct = open_percentage(mvum_road_miles, full_size_trail_miles, closed_road_miles);
        Self {
            grade: Grade::from_open_percentage(pct),
            open_roads_percentage: round_to(pct, STATS_DECIMALS),
        }
    }

    pub fn for_routes(routes: &RouteSummary) -> Self {
        Self::from_mileage(
            routes.mvum_roads.total_mileage,
            routes.mvum_trails.trail_type.full_size,
            routes.closed_roads.total_mileage,
        )
    }
}

/// Attach a scorecard to every forest and every district.
pub fn apply_scorecards(mut forests: Vec<NationalForest>) -> Vec<NationalForest> {
    let mut tally = [0usize; 5];
    for forest in &mut forests {
        let card = Scorecard::for_routes(&forest.routes);
        tally[card.grade as usize] += 1;
        forest.scorecard = Some(card);
        for district in &mut forest.ranger_districts {
            district.scorecard = Some(Scorecard::for_routes(&district.routes));
        }
    }
    log::info!(
        "Forest grades: A={} B={} C={} D={} F={}",
        tally[0],
        tally[1],
        tally[2],
        tally[3],
        tally[4]
    );
    forests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RangerDistrict;
    use approx::assert_abs_diff_eq;

    #[test]
    fn eighty_percent_is_an_a() {
        let card = Scorecard::from_mileage(40.0, 10.0, 12.5);
        assert_abs_diff_eq!(card.open_roads_percentage, 80.0, epsilon = 1e-9);
        assert_eq!(card.grade, Grade::A);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(Grade::from_open_percentage(100.0), Grade::A);
        assert_eq!(Grade::from_open_percentage(79.999), Grade::B);
        assert_eq!(Grade::from_open_percentage(70.0), Grade::B);
        assert_eq!(Grade::from_open_percentage(60.0), Grade::C);
        assert_eq!(Grade::from_open_percentage(50.0), Grade::D);
        assert_eq!(Grade::from_open_percentage(49.99), Grade::F);
        assert_eq!(Grade::from_open_percentage(0.0), Grade::F);
    }

    #[test]
    fn no_mileage_grades_f_at_zero() {
        let card = Scorecard::from_mileage(0.0, 0.0, 0.0);
        assert_eq!(card.open_roads_percentage, 0.0);
        assert_eq!(card.grade, Grade::F);
    }

    #[test]
    fn grade_uses_unrounded_percentage() {
        // 100 * 79.9999 / 100 rounds to 80.00 but still grades B.
        let card = Scorecard::from_mileage(79.9999, 0.0, 20.0001);
        assert_eq!(card.open_roads_percentage, 80.0);
        assert_eq!(card.grade, Grade::B);
    }

    #[test]
    fn serializes_as_letter() {
        let json = serde_json::to_value(Scorecard::from_mileage(1.0, 0.0, 1.0)).unwrap();
        assert_eq!(json["GRADE"], "D");
        assert_eq!(json["OPEN_ROADS_PERCENTAGE"], 50.0);
    }

    #[test]
    fn districts_are_graded_independently() {
        let mut forest = NationalForest::default();
        forest.routes.mvum_roads.total_mileage = 90.0;
        forest.routes.closed_roads.total_mileage = 10.0;
        let mut district = RangerDistrict::default();
        district.routes.closed_roads.total_mileage = 5.0;
        forest.ranger_districts.push(district);

        let forests = apply_scorecards(vec![forest]);
        assert_eq!(forests[0].scorecard.map(|c| c.grade), Some(Grade::A));
        assert_eq!(forests[0].ranger_districts[0].scorecard.map(|c| c.grade), Some(Grade::F));
    }
}
