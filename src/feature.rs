//! Features as seen by the bucketer: a set of representative points.

use bytes::Bytes;
use geo::{Coord, CoordsIter, Geometry, LineString, MultiPoint, Point, Polygon, Rect};
use smallvec::SmallVec;

/// Anything that can be reduced to representative points in the converter's
/// coordinate space.
pub trait Feature {
    /// The feature's defining vertices.
    fn vertices(&self) -> impl Iterator<Item = Coord<f64>> + '_;

    /// Axis-aligned rectangle of [`Feature::vertices`], `None` when there are none.
    fn envelope(&self) -> Option<Rect> {
        let mut iter = self.vertices();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), c| {
            (
                Coord {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coord {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )
        });
        Some(Rect::new(min, max))
    }
}

macro_rules! impl_feature_for_geo {
    ($($t:ty),*) => {
        $(
            impl Feature for $t {
                fn vertices(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
                    self.coords_iter()
                }
            }
        )*
    };
}

impl_feature_for_geo!(
    Point<f64>,
    LineString<f64>,
    Polygon<f64>,
    MultiPoint<f64>,
    Geometry<f64>
);

/// Representative points plus an already-serialized payload.
///
/// The payload is opaque to the bucketer and is shared, not copied, between
/// pieces produced by clipping.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedFeature {
    coords: SmallVec<[Coord<f64>; 4]>,
    payload: Bytes,
}

impl SerializedFeature {
    pub fn new<I>(coords: I, payload: impl Into<Bytes>) -> Self
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        Self {
            coords: coords.into_iter().collect(),
            payload: payload.into(),
        }
    }

    pub fn points(&self) -> &[Coord<f64>] {
        &self.coords
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// A piece of this feature with different points and the same payload.
    pub fn with_points<I>(&self, coords: I) -> Self
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        Self {
            coords: coords.into_iter().collect(),
            payload: self.payload.clone(),
        }
    }
}

impl Feature for SerializedFeature {
    fn vertices(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.coords.iter().copied()
    }
}
