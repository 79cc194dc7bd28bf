//! Grouping features into spatially coherent buckets.
//!
//! Each feature's covering cell is computed from its vertices. Features whose
//! cover is at least as deep as the configured level are emitted under the
//! cover's name cut to that level. Coarser features go through the clipper
//! and each piece is placed on its own.
//!
//! ```rust
//! use quadcell::{BucketerBuilder, PassThroughClipper, SerializedFeature};
//! use std::collections::BTreeMap;
//!
//! let mut bucketer = BucketerBuilder::<19>::new()
//!     .level(1)
//!     .build(BTreeMap::<String, Vec<SerializedFeature>>::new(), PassThroughClipper)?;
//!
//! let feature = SerializedFeature::new(
//!     [geo::coord! { x: 10.0, y: 10.0 }, geo::coord! { x: 20.0, y: 20.0 }],
//!     &b"road"[..],
//! );
//! bucketer.push(&feature)?;
//!
//! let (buckets, names) = bucketer.finish();
//! assert_eq!(names.as_slice(), ["3"]);
//! assert_eq!(buckets["3"].len(), 1);
//! # Ok::<(), quadcell::QuadcellError>(())
//! ```

use crate::cell_id::CellId;
use crate::clipper::{ClipTarget, FeatureClipper};
use crate::config::{BucketStats, BucketerConfig};
use crate::converter::CellIdConverter;
use crate::error::{QuadcellError, Result};
use crate::feature::Feature;
use crate::registry::BucketRegistry;
use crate::sink::FeatureSink;

/// One bucketing pass over a stream of features.
///
/// A bucketer owns its registry and sink; run independent passes with
/// independent bucketers and combine their registries with
/// [`BucketRegistry::merge`].
#[derive(Debug)]
pub struct FeatureBucketer<S, C, const DEPTH_LEVELS: usize = 19> {
    converter: CellIdConverter<DEPTH_LEVELS>,
    config: BucketerConfig,
    sink: S,
    clipper: C,
    registry: BucketRegistry,
    stats: BucketStats,
}

impl<S, C, const DEPTH_LEVELS: usize> FeatureBucketer<S, C, DEPTH_LEVELS> {
    pub fn new(
        converter: CellIdConverter<DEPTH_LEVELS>,
        config: BucketerConfig,
        sink: S,
        clipper: C,
    ) -> Result<Self> {
        config
            .validate(CellId::<DEPTH_LEVELS>::MAX_DEPTH)
            .map_err(QuadcellError::InvalidConfig)?;
        Ok(Self {
            converter,
            config,
            sink,
            clipper,
            registry: BucketRegistry::new(),
            stats: BucketStats::new(),
        })
    }

    pub fn converter(&self) -> &CellIdConverter<DEPTH_LEVELS> {
        &self.converter
    }

    pub fn config(&self) -> &BucketerConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Bucket names produced so far, in first-seen order.
    pub fn bucket_names(&self) -> &BucketRegistry {
        &self.registry
    }

    pub fn for_each_bucket_name<Func: FnMut(&str)>(&self, mut f: Func) {
        for name in self.registry.iter() {
            f(name);
        }
    }

    pub fn stats(&self) -> &BucketStats {
        &self.stats
    }

    /// Name of the bucket a feature covered by `cell` lands in.
    pub fn bucket_name(&self, cell: &CellId<DEPTH_LEVELS>) -> String {
        if self.config.truncate_names && cell.level() > self.config.level {
            cell.ancestor_at(self.config.level).to_string()
        } else {
            cell.to_string()
        }
    }

    /// End the pass, returning the sink and the registry.
    pub fn finish(self) -> (S, BucketRegistry) {
        log::debug!(
            "Bucketing pass finished: {} features, {} pieces, {} buckets, {} coarse fallbacks",
            self.stats.features,
            self.stats.pieces_emitted,
            self.registry.len(),
            self.stats.coarse_fallbacks
        );
        (self.sink, self.registry)
    }

    /// Bucket one feature. Each input produces at least one sink call.
    pub fn push<F>(&mut self, feature: &F) -> Result<()>
    where
        F: Feature,
        S: FeatureSink<F>,
        C: FeatureClipper<F, DEPTH_LEVELS>,
    {
        let cover = self.converter.cover_coords(feature.vertices())?;
        self.stats.record_feature();
        self.place(feature, cover, 0)
    }

    /// Bucket every feature from `features`, stopping at the first error.
    pub fn push_all<'a, F, I>(&mut self, features: I) -> Result<()>
    where
        F: Feature + 'a,
        I: IntoIterator<Item = &'a F>,
        S: FeatureSink<F>,
        C: FeatureClipper<F, DEPTH_LEVELS>,
    {
        for feature in features {
            self.push(feature)?;
        }
        Ok(())
    }

    fn place<F>(&mut self, feature: &F, cover: CellId<DEPTH_LEVELS>, depth: usize) -> Result<()>
    where
        F: Feature,
        S: FeatureSink<F>,
        C: FeatureClipper<F, DEPTH_LEVELS>,
    {
        if cover.level() >= self.config.level {
            return self.emit(feature, &cover);
        }

        if depth >= self.config.max_clip_depth {
            log::warn!(
                "Clip recursion limit {} reached, keeping feature in cell '{}'",
                self.config.max_clip_depth,
                cover
            );
            self.stats.record_coarse_fallback();
            return self.emit(feature, &cover);
        }

        let target = ClipTarget::new(cover, self.config.level, &self.converter);
        let pieces = self.clipper.clip(feature, &target)?;
        self.stats.record_clip();

        if pieces.is_empty() {
            log::debug!("Clipper returned no pieces, keeping feature in cell '{}'", cover);
            self.stats.record_coarse_fallback();
            return self.emit(feature, &cover);
        }

        for piece in &pieces {
            let piece_cover = self.converter.cover_coords(piece.vertices())?;
            if piece_cover.level() > cover.level() {
                self.place(piece, piece_cover, depth + 1)?;
            } else {
                log::warn!(
                    "Clipped piece did not shrink below cell '{}', keeping it there",
                    piece_cover
                );
                self.stats.record_coarse_fallback();
                self.emit(piece, &piece_cover)?;
            }
        }
        Ok(())
    }

    fn emit<F>(&mut self, feature: &F, cell: &CellId<DEPTH_LEVELS>) -> Result<()>
    where
        S: FeatureSink<F>,
    {
        let name = self.bucket_name(cell);
        log::trace!("Feature covered by '{}' goes to bucket '{}'", cell, name);
        self.sink.emit(&name, feature)?;
        self.registry.insert(&name);
        self.stats.record_emit();
        Ok(())
    }
}
