use crate::domain::model::GeoCoordinate;

pub const KM_PER_NM: f64 = 1.852;
pub const STATUTE_MILES_PER_NM: f64 = 1.150779;

/// Central angle between two points in radians (haversine).
///
/// Antipodal points are not special-cased; `a` is clamped so rounding near
/// them cannot push `sqrt(1 - a)` into NaN.
pub fn haversine_central_angle(from: GeoCoordinate, to: GeoCoordinate) -> f64 {
    let lat1 = from.lat().to_radians();
    let lat2 = to.lat().to_radians();
    let d_lat = (to.lat() - from.lat()).to_radians();
    let d_lon = (to.lon() - from.lon()).to_radians();

    let a = ((d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

pub fn great_circle_nm(from: GeoCoordinate, to: GeoCoordinate, earth_radius_nm: f64) -> f64 {
    earth_radius_nm * haversine_central_angle(from, to)
}

pub fn nm_to_km(nm: f64) -> f64 {
    nm * KM_PER_NM
}

pub fn nm_to_statute_miles(nm: f64) -> f64 {
    nm * STATUTE_MILES_PER_NM
}
