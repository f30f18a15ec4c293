//! Great-circle distance between two latitude/longitude points, using the
//! spherical law of cosines. All lengths in this crate are in miles.

use crate::common::graph_data::LatLng;

/// Radius of the Earth in miles
pub const EARTH_RADIUS_MILES: f64 = 3963.1;

/// Points closer than this on both axes (in degrees) are the same point
pub const EQUAL_POINT_TOLERANCE: f64 = 0.0000001;

/// Determine the great-circle distance in miles between two points.
/// Coincident points short-circuit to exactly 0.0. For points just apart,
/// rounding can still push the cosine past 1.0, so it is clamped before
/// acos
pub fn distance(p1: &LatLng, p2: &LatLng) -> f64 {
    if (p1.lat - p2.lat).abs() < EQUAL_POINT_TOLERANCE
        && (p1.lng - p2.lng).abs() < EQUAL_POINT_TOLERANCE
    {
        return 0.0;
    }

    let rlat1 = p1.lat.to_radians();
    let rlng1 = p1.lng.to_radians();
    let rlat2 = p2.lat.to_radians();
    let rlng2 = p2.lng.to_radians();

    let cos_angle = rlat1.cos() * rlng1.cos() * rlat2.cos() * rlng2.cos()
        + rlat1.cos() * rlng1.sin() * rlat2.cos() * rlng2.sin()
        + rlat1.sin() * rlat2.sin();

    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_MILES
}

/// Sum the great-circle legs between consecutive points of a path
pub fn path_distance<'a, I>(points: I) -> f64
where
    I: IntoIterator<Item = &'a LatLng>,
{
    let mut total = 0.0;
    let mut prev: Option<&LatLng> = None;
    for point in points {
        if let Some(prev) = prev {
            total += distance(prev, point);
        }
        prev = Some(point);
    }
    total
}
