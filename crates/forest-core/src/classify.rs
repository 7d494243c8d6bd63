//! Pure label → category mappings for raw route records.
//!
//! Every mapping is total: an absent or unrecognised label lands in the
//! catch-all bucket (`Unlisted` / `Other`) and is never dropped.

/// Operational maintenance level of a road. `Unlisted` is serialized as `NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaintenanceLevel {
    Ml1,
    Ml2,
    Ml3,
    Ml4,
    Ml5,
    Unlisted,
}

/// Closed-road level: decommissioned, or one of the ordinary levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClosedLevel {
    Decommissioned,
    Maintained(MaintenanceLevel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrailType {
    FullSize,
    Atv,
    Motorcycle,
    Special,
    Other,
}

// ── Vocabularies ──────────────────────────────────────────────────────────────

const MAINTENANCE_VOCABULARY: [(&str, MaintenanceLevel); 5] = [
    ("1 - BASIC CUSTODIAL CARE (CLOSED)", MaintenanceLevel::Ml1),
    ("2 - HIGH CLEARANCE VEHICLES", MaintenanceLevel::Ml2),
    ("3 - SUITABLE FOR PASSENGER CARS", MaintenanceLevel::Ml3),
    ("4 - MODERATE DEGREE OF USER COMFORT", MaintenanceLevel::Ml4),
    ("5 - HIGH DEGREE OF USER COMFORT", MaintenanceLevel::Ml5),
];

pub const DECOMMISSION_LABEL: &str = "D - DECOMMISSION";

/// Trail-type rules in priority order; the first rule with a matching
/// substring wins.
const TRAIL_RULES: [(&[&str], TrailType); 4] = [
    (&["open to all vehicles"], TrailType::FullSize),
    (&["open to vehicles 50\" or less", "Wheeled OHV <50\""], TrailType::Atv),
    (&["open to motorcycles"], TrailType::Motorcycle),
    (&["Special Designation"], TrailType::Special),
];

const ALL_VEHICLES: &str = "all vehicles";
const HIGHWAY_LEGAL_ONLY: &str = "highway legal vehicles only";

pub const SEASONAL_LABEL: &str = "seasonal";
pub const ADMIN_USE_LABEL: &str = "ADMIN";
pub const TRAIL_CONVERSION_SYMBOL: &str = "Road, Not Maintained for Passenger Car";

// ── Mappings ──────────────────────────────────────────────────────────────────

/// Exact match against the official level descriptions.
pub fn maintenance_level(label: Option<&str>) -> MaintenanceLevel {
    label
        .and_then(|label| MAINTENANCE_VOCABULARY.iter().find(|(known, _)| *known == label))
        .map_or(MaintenanceLevel::Unlisted, |(_, level)| *level)
}

/// Like [`maintenance_level`], with `D - DECOMMISSION` recognised.
pub fn closed_level(label: Option<&str>) -> ClosedLevel {
    match label {
        Some(DECOMMISSION_LABEL) => ClosedLevel::Decommissioned,
        other => ClosedLevel::Maintained(maintenance_level(other)),
    }
}

pub fn trail_type(symbol_name: Option<&str>) -> TrailType {
    let symbol = symbol_name.unwrap_or_default();
    TRAIL_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| symbol.contains(n)))
        .map_or(TrailType::Other, |(_, kind)| *kind)
}

/// Case-insensitive "all vehicles" in the MVUM symbol name.
pub fn is_all_vehicles(symbol_name: Option<&str>) -> bool {
    symbol_name.is_some_and(|s| s.to_lowercase().contains(ALL_VEHICLES))
}

/// Case-insensitive "highway legal vehicles only" in the MVUM symbol name.
pub fn is_highway_legal_only(symbol_name: Option<&str>) -> bool {
    symbol_name.is_some_and(|s| s.to_lowercase().contains(HIGHWAY_LEGAL_ONLY))
}

pub fn is_seasonal(seasonal: Option<&str>) -> bool {
    seasonal.is_some_and(|s| s.to_lowercase() == SEASONAL_LABEL)
}

pub fn is_admin_only(open_for_use_to: Option<&str>) -> bool {
    open_for_use_to == Some(ADMIN_USE_LABEL)
}

pub fn is_trail_conversion_candidate(symbol_name: Option<&str>) -> bool {
    symbol_name == Some(TRAIL_CONVERSION_SYMBOL)
}
