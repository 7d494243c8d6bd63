//! Decimal rounding for every mileage field written to the artifact.

/// Precision of every stats field produced by aggregation and reconciliation.
pub const STATS_DECIMALS: u32 = 2;

/// Precision of `ALL_VEHICLES_MILEAGE` / `HIGHWAY_VEHICLES_ONLY_MILEAGE` as
/// written by the standalone vehicle-mileage stage. Reconciliation rewrites
/// forest-level values at `STATS_DECIMALS`, so districts and forests differ.
pub const VEHICLE_MILEAGE_DECIMALS: u32 = 3;

/// Round half away from zero at `decimals` places.
///
/// Decimal halves such as `0.285` scale to `28.499999999999996`; the
/// scaled value is nudged by a few ulps so they still round away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    let nudged = scaled + scaled * 4.0 * f64::EPSILON;
    nudged.round() / factor
}
