//! Great-circle distance on a spherical Earth.

use crate::error::EngineError;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in decimal degrees.
///
/// Symmetric, and zero for identical points.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if any coordinate is non-finite.
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<f64, EngineError> {
    for v in [lat1, lng1, lat2, lng2] {
        if !v.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "non-finite coordinate: {v}"
            )));
        }
    }

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlng / 2.0).sin().powi(2);
    // a can drift a hair above 1.0 for near-antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    Ok(EARTH_RADIUS_KM * c)
}
