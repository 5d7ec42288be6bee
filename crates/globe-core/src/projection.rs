use glam::{DQuat, DVec3};

/// Project a longitude/latitude pair (degrees) onto a sphere of `radius`.
///
/// Longitude is negated before the trig so east-positive input turns clockwise
/// when seen from above the north pole, matching the camera convention.
#[inline]
pub fn project(radius: f64, lon_deg: f64, lat_deg: f64) -> DVec3 {
    let lon = -lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    DVec3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.sin(),
        radius * lat.cos() * lon.sin(),
    )
}

/// Shortest-arc rotation taking a flat badge's +Z face normal onto the outward
/// sphere normal at `position`.
#[inline]
pub fn surface_orientation(position: DVec3) -> DQuat {
    let n = position.normalize_or_zero();
    if n == DVec3::ZERO {
        return DQuat::IDENTITY;
    }
    DQuat::from_rotation_arc(DVec3::Z, n)
}
