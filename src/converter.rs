//! Conversion between real coordinates and cell addresses.
//!
//! A [`CellIdConverter`] lays a `MAX_COORD x MAX_COORD` integer grid over a
//! real rectangle. Real coordinates are rescaled into grid units and
//! truncated toward the lower cell; reconstruction returns the lower-left
//! corner of a cell, not its center.
//!
//! ```rust
//! use quadcell::{Bounds, CellIdConverter};
//!
//! let converter = CellIdConverter::<30>::new(Bounds::new(0.0, 0.0, 4.0, 4.0))?;
//! let cover = converter.cover(2.25, 1.75, 2.75, 1.25)?;
//! assert_eq!(cover.to_string(), "12");
//! # Ok::<(), quadcell::QuadcellError>(())
//! ```

use crate::cell_id::CellId;
use crate::error::{QuadcellError, Result};
use crate::feature::Feature;
use geo::{Coord, Point, Rect};
use quadcell_types::bounds::Bounds;
use quadcell_types::config::OutOfBoundsPolicy;

/// Maps real coordinates inside fixed bounds to [`CellId`]s and back.
#[derive(Debug, Clone, PartialEq)]
pub struct CellIdConverter<const DEPTH_LEVELS: usize = 30> {
    bounds: Bounds,
    policy: OutOfBoundsPolicy,
    step_x: f64,
    step_y: f64,
}

impl<const DEPTH_LEVELS: usize> CellIdConverter<DEPTH_LEVELS> {
    /// Create a converter that clamps out-of-bounds input.
    pub fn new(bounds: Bounds) -> Result<Self> {
        Self::with_policy(bounds, OutOfBoundsPolicy::default())
    }

    /// Create a converter with an explicit out-of-bounds policy.
    ///
    /// Fails when any bound is non-finite or min >= max on either axis.
    pub fn with_policy(bounds: Bounds, policy: OutOfBoundsPolicy) -> Result<Self> {
        bounds.validate().map_err(QuadcellError::InvalidBounds)?;
        let cells = f64::from(CellId::<DEPTH_LEVELS>::MAX_COORD);
        let step_x = bounds.width() / cells;
        let step_y = bounds.height() / cells;
        if !step_x.is_normal() || !step_y.is_normal() {
            return Err(QuadcellError::InvalidBounds(format!(
                "grid step ({}, {}) is not representable for {:?}",
                step_x, step_y, bounds
            )));
        }
        Ok(Self {
            bounds,
            policy,
            step_x,
            step_y,
        })
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn policy(&self) -> OutOfBoundsPolicy {
        self.policy
    }

    /// Width of one grid unit in real coordinates.
    pub fn step_x(&self) -> f64 {
        self.step_x
    }

    /// Height of one grid unit in real coordinates.
    pub fn step_y(&self) -> f64 {
        self.step_y
    }

    /// Real x rescaled into (fractional) grid units.
    pub fn x_to_grid(&self, x: f64) -> f64 {
        (x - self.bounds.min_x) / self.step_x
    }

    /// Real y rescaled into (fractional) grid units.
    pub fn y_to_grid(&self, y: f64) -> f64 {
        (y - self.bounds.min_y) / self.step_y
    }

    fn resolve(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return Err(QuadcellError::OutOfBounds { x, y });
        }
        if self.bounds.contains(x, y) {
            return Ok((x, y));
        }
        match self.policy {
            OutOfBoundsPolicy::Clamp => Ok(self.bounds.clamp(x, y)),
            OutOfBoundsPolicy::Reject => Err(QuadcellError::OutOfBounds { x, y }),
        }
    }

    /// Truncate grid units to an integer grid coordinate. The max edge
    /// belongs to the last cell.
    fn grid_coord(units: f64) -> u32 {
        (units as u32).min(CellId::<DEPTH_LEVELS>::MAX_COORD - 1)
    }

    /// Integer grid coordinate of a real point.
    pub fn to_grid(&self, x: f64, y: f64) -> Result<(u32, u32)> {
        let (x, y) = self.resolve(x, y)?;
        Ok((
            Self::grid_coord(self.x_to_grid(x)),
            Self::grid_coord(self.y_to_grid(y)),
        ))
    }

    /// Finest cell containing the real point `(x, y)`.
    pub fn to_cell(&self, x: f64, y: f64) -> Result<CellId<DEPTH_LEVELS>> {
        let (ix, iy) = self.to_grid(x, y)?;
        Ok(CellId::from_xy(ix, iy))
    }

    /// Smallest cell of the fixed subdivision containing both points.
    ///
    /// Points straddling a subdivision boundary resolve to the coarser cell
    /// above it even when they are close together.
    pub fn cover(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<CellId<DEPTH_LEVELS>> {
        let mut id1 = self.to_cell(x1, y1)?;
        let mut id2 = self.to_cell(x2, y2)?;
        while id1 != id2 {
            id1 = id1.parent();
            id2 = id2.parent();
        }
        Ok(id1)
    }

    /// Smallest cell containing every coordinate in `coords`.
    ///
    /// Returns [`QuadcellError::EmptyFeature`] for an empty sequence.
    pub fn cover_coords<I>(&self, coords: I) -> Result<CellId<DEPTH_LEVELS>>
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next().ok_or(QuadcellError::EmptyFeature)?;
        let mut cover = self.to_cell(first.x, first.y)?;
        for c in iter {
            if cover.is_root() {
                // still validate the remaining input
                self.to_grid(c.x, c.y)?;
                continue;
            }
            cover = cover.common_ancestor(&self.to_cell(c.x, c.y)?);
        }
        Ok(cover)
    }

    /// Smallest cell containing a rectangle.
    pub fn cover_rect(&self, rect: &Rect) -> Result<CellId<DEPTH_LEVELS>> {
        self.cover(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    /// Real coordinate of a cell's lower-left corner.
    pub fn from_cell(&self, id: &CellId<DEPTH_LEVELS>) -> Point {
        let (x, y) = id.xy();
        self.grid_to_point(f64::from(x), f64::from(y))
    }

    /// Real coordinate of a cell's center.
    pub fn cell_center(&self, id: &CellId<DEPTH_LEVELS>) -> Point {
        let (x, y) = id.center();
        self.grid_to_point(f64::from(x), f64::from(y))
    }

    /// Real-space rectangle covered by a cell.
    #[doc(alias = "bounds_of")]
    pub fn cell_bounds(&self, id: &CellId<DEPTH_LEVELS>) -> Rect {
        let (x, y) = id.xy();
        let side = f64::from(id.size());
        let min = self.grid_to_point(f64::from(x), f64::from(y));
        let max = self.grid_to_point(f64::from(x) + side, f64::from(y) + side);
        Rect::new(min.0, max.0)
    }

    fn grid_to_point(&self, gx: f64, gy: f64) -> Point {
        Point::new(
            gx * self.step_x + self.bounds.min_x,
            gy * self.step_y + self.bounds.min_y,
        )
    }

    /// Encode a point as the packed id of its finest cell.
    pub fn pack_point(&self, x: f64, y: f64) -> Result<u64> {
        Ok(self.to_cell(x, y)?.to_u64())
    }

    /// Decode a packed point to the center of its cell.
    pub fn unpack_point(&self, packed: u64) -> Result<Point> {
        let id = CellId::<DEPTH_LEVELS>::from_u64(packed)?;
        Ok(self.cell_center(&id))
    }

    /// Encode a rectangle as its packed min and max corners.
    pub fn pack_rect(&self, rect: &Rect) -> Result<(u64, u64)> {
        Ok((
            self.pack_point(rect.min().x, rect.min().y)?,
            self.pack_point(rect.max().x, rect.max().y)?,
        ))
    }

    /// Z-order sort key of a feature: the packed cell of its envelope's center.
    ///
    /// Sorting features by this key keeps spatial neighbours close together.
    pub fn sort_key<F: Feature>(&self, feature: &F) -> Result<u64> {
        let center = feature
            .envelope()
            .ok_or(QuadcellError::EmptyFeature)?
            .center();
        self.pack_point(center.x, center.y)
    }

    pub fn unpack_rect(&self, packed: (u64, u64)) -> Result<Rect> {
        let min = self.unpack_point(packed.0)?;
        let max = self.unpack_point(packed.1)?;
        Ok(Rect::new(min.0, max.0))
    }
}
