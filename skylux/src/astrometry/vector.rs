//! Cartesian helpers on top of `nalgebra` for body geometry.

use nalgebra::Rotation3;

/// Cartesian position, kilometres for [`BodyVectors`](super::BodyVectors).
pub type Vector3 = nalgebra::Vector3<f64>;

/// Build a vector from spherical coordinates: `lon`/`lat` in radians,
/// `radius` in any unit.
pub fn from_spherical(lon: f64, lat: f64, radius: f64) -> Vector3 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    Vector3::new(
        radius * cos_lat * cos_lon,
        radius * cos_lat * sin_lon,
        radius * sin_lat,
    )
}

/// Rotate an ecliptic-of-date vector into the equator of date.
pub fn ecliptic_to_equatorial(ecliptic: &Vector3, obliquity_rad: f64) -> Vector3 {
    Rotation3::from_axis_angle(&Vector3::x_axis(), obliquity_rad) * *ecliptic
}

/// Angle between two vectors in radians, in `[0, π]`.
///
/// `None` when either vector has zero or non-finite length.
pub fn angle_between(a: &Vector3, b: &Vector3) -> Option<f64> {
    let (na, nb) = (a.norm(), b.norm());
    let usable = |n: f64| n > 0.0 && n.is_finite();
    if usable(na) && usable(nb) {
        Some((a.dot(b) / (na * nb)).clamp(-1.0, 1.0).acos())
    } else {
        None
    }
}
