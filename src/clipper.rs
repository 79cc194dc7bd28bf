//! Feature clipping hooks used when a feature is too large for its bucket level.

use crate::cell_id::CellId;
use crate::converter::CellIdConverter;
use crate::error::Result;
use geo::{Coord, Intersects, Rect};

/// What a clipper is asked to split a feature into.
///
/// `cover` is the feature's current covering cell, which is coarser than
/// `level`. Each returned piece should fit inside a single cell at `level`.
#[derive(Debug, Clone, Copy)]
pub struct ClipTarget<'a, const DEPTH_LEVELS: usize> {
    cover: CellId<DEPTH_LEVELS>,
    level: usize,
    converter: &'a CellIdConverter<DEPTH_LEVELS>,
}

impl<'a, const DEPTH_LEVELS: usize> ClipTarget<'a, DEPTH_LEVELS> {
    pub fn new(
        cover: CellId<DEPTH_LEVELS>,
        level: usize,
        converter: &'a CellIdConverter<DEPTH_LEVELS>,
    ) -> Self {
        debug_assert!(cover.level() <= level);
        Self {
            cover,
            level,
            converter,
        }
    }

    pub fn cover(&self) -> CellId<DEPTH_LEVELS> {
        self.cover
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn converter(&self) -> &'a CellIdConverter<DEPTH_LEVELS> {
        self.converter
    }

    /// The target-level cell containing `coord`.
    pub fn cell_of(&self, coord: Coord<f64>) -> Result<CellId<DEPTH_LEVELS>> {
        Ok(self
            .converter
            .to_cell(coord.x, coord.y)?
            .ancestor_at(self.level))
    }

    /// Target-level cells under `cover` whose region intersects `rect`,
    /// with their real-space bounds, in row-major order.
    pub fn cells_touching(&self, rect: &Rect) -> Result<Vec<(CellId<DEPTH_LEVELS>, Rect)>> {
        let shift = DEPTH_LEVELS - self.level;
        let (min_x, min_y) = self.converter.to_grid(rect.min().x, rect.min().y)?;
        let (max_x, max_y) = self.converter.to_grid(rect.max().x, rect.max().y)?;

        // Restrict the scan to the cover's region.
        let (cover_x, cover_y) = self.cover.xy();
        let last = self.cover.size() - 1;
        let x_range =
            (min_x >> shift).max(cover_x >> shift)..=(max_x >> shift).min((cover_x + last) >> shift);
        let y_range =
            (min_y >> shift).max(cover_y >> shift)..=(max_y >> shift).min((cover_y + last) >> shift);

        let mut cells = Vec::new();
        for cy in y_range {
            for cx in x_range.clone() {
                let cell = CellId::from_xy_at(cx << shift, cy << shift, self.level);
                debug_assert!(self.cover.is_ancestor_of(&cell));
                let bounds = self.converter.cell_bounds(&cell);
                if bounds.intersects(rect) {
                    cells.push((cell, bounds));
                }
            }
        }
        Ok(cells)
    }
}

/// Splits features into pieces that fit a finer bucket level.
///
/// A clipper must return a finite list. Pieces whose cover is not strictly
/// finer than the input's are bucketed as they are, so returning the input
/// unchanged is allowed and never loops.
pub trait FeatureClipper<F, const DEPTH_LEVELS: usize> {
    fn clip(&mut self, feature: &F, target: &ClipTarget<'_, DEPTH_LEVELS>) -> Result<Vec<F>>;
}

impl<F, Func, const DEPTH_LEVELS: usize> FeatureClipper<F, DEPTH_LEVELS> for Func
where
    Func: FnMut(&F, &ClipTarget<'_, DEPTH_LEVELS>) -> Result<Vec<F>>,
{
    fn clip(&mut self, feature: &F, target: &ClipTarget<'_, DEPTH_LEVELS>) -> Result<Vec<F>> {
        self(feature, target)
    }
}

/// Returns every feature unchanged, so oversized features stay in their
/// coarse covering cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughClipper;

impl<F: Clone, const DEPTH_LEVELS: usize> FeatureClipper<F, DEPTH_LEVELS> for PassThroughClipper {
    fn clip(&mut self, feature: &F, _target: &ClipTarget<'_, DEPTH_LEVELS>) -> Result<Vec<F>> {
        Ok(vec![feature.clone()])
    }
}
