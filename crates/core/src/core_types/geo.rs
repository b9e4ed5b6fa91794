//! Local ground-plane offsets and their conversion to coordinates.
//!
//! Offsets are `nalgebra::Vector2<f64>` in kilometres, `x` east and `y`
//! north. Conversion to latitude/longitude uses the equirectangular
//! approximation, adequate at the tens-of-kilometres scale of hazard zones:
//!
//! ```text
//! Δlat = north / 111.32
//! Δlng = east / (111.32 · cos(lat))
//! ```

use crate::core_types::scenario::SourceLocation;
use crate::core_types::units::Degrees;
use nalgebra::Vector2;

/// East/north offset in kilometres
pub type Offset = Vector2<f64>;

/// Kilometres per degree of latitude
pub const KM_PER_DEGREE: f64 = 111.32;

/// Smallest cos(lat) used for longitude scaling, avoids blow-up at the poles
const MIN_COS_LAT: f64 = 0.01;

/// Offset of `distance_km` along compass `bearing` (clockwise from north)
#[must_use]
pub fn offset_along(bearing: Degrees, distance_km: f64) -> Offset {
    let theta = bearing.to_radians();
    Offset::new(theta.sin(), theta.cos()) * distance_km
}

/// Location reached by moving `offset` from `origin`
#[must_use]
pub fn displace(origin: SourceLocation, offset: &Offset) -> SourceLocation {
    let cos_lat = origin.lat.to_radians().cos().max(MIN_COS_LAT);
    SourceLocation::new(
        origin.lat + offset.y / KM_PER_DEGREE,
        origin.lng + offset.x / (KM_PER_DEGREE * cos_lat),
    )
}
