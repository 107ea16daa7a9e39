//! Great-circle distance between two coordinates (haversine).

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distance in meters between two (latitude, longitude) pairs in degrees.
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// True iff (lat, lon) lies within `radius_m` meters of the reference point.
pub fn within_radius(ref_lat: f64, ref_lon: f64, lat: f64, lon: f64, radius_m: f64) -> bool {
    distance_m(ref_lat, ref_lon, lat, lon) <= radius_m
}
