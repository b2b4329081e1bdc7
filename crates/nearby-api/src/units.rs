//! Miles (slider) to kilometers (backend) conversion.

pub const MILES_TO_KM: f64 = 1.60934;
pub const MIN_DISTANCE_KM: u8 = 1;
pub const MAX_DISTANCE_KM: u8 = 16;

/// Convert a distance in miles to the backend's whole-kilometer radius.
///
/// Defined for any input: negative, zero, NaN and huge values clamp into
/// `[MIN_DISTANCE_KM, MAX_DISTANCE_KM]`.
pub fn to_distance_km(miles: f64) -> u8 {
    let km = (miles * MILES_TO_KM)
        .max(f64::from(MIN_DISTANCE_KM))
        .min(f64::from(MAX_DISTANCE_KM));
    // In [1, 16] after clamping, so the cast is exact
    km.round() as u8
}
