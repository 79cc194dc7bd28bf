//! Projection from latitude/longitude into the planar space the converter indexes.

use geo::Point;
use quadcell_types::bounds::Bounds;

/// Spherical Mercator plane with both axes expressed in degrees.
///
/// Longitude maps to x unchanged. Latitude is clamped to +-86 degrees before
/// projection and the result is clamped to +-180, so latitudes beyond about
/// 85.05 degrees all land on the plane's edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MercatorBounds;

impl MercatorBounds {
    pub const MIN_X: f64 = -180.0;
    pub const MAX_X: f64 = 180.0;
    pub const MIN_Y: f64 = -180.0;
    pub const MAX_Y: f64 = 180.0;

    /// Latitudes beyond this are clamped before projection.
    pub const LAT_LIMIT: f64 = 86.0;

    pub const fn bounds() -> Bounds {
        Bounds::new(Self::MIN_X, Self::MIN_Y, Self::MAX_X, Self::MAX_Y)
    }

    #[inline]
    pub fn lon_to_x(lon: f64) -> f64 {
        lon
    }

    #[inline]
    pub fn x_to_lon(x: f64) -> f64 {
        x
    }

    pub fn lat_to_y(lat: f64) -> f64 {
        let lat = lat.clamp(-Self::LAT_LIMIT, Self::LAT_LIMIT);
        let y = (45.0 + lat * 0.5).to_radians().tan().ln().to_degrees();
        y.clamp(Self::MIN_Y, Self::MAX_Y)
    }

    pub fn y_to_lat(y: f64) -> f64 {
        (2.0 * y.to_radians().exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees()
    }

    /// Project a `(longitude, latitude)` point.
    pub fn from_lon_lat(point: &Point) -> Point {
        Point::new(Self::lon_to_x(point.x()), Self::lat_to_y(point.y()))
    }

    /// Inverse of [`MercatorBounds::from_lon_lat`] for latitudes inside the clamp.
    pub fn to_lon_lat(point: &Point) -> Point {
        Point::new(Self::x_to_lon(point.x()), Self::y_to_lat(point.y()))
    }
}
