//! Builder for bucketing passes
//!
//! Collects bounds, out-of-bounds policy and bucketer settings, then
//! constructs the converter and bucketer together.

use crate::bucketer::FeatureBucketer;
use crate::config::{Bounds, BucketerConfig, Config, OutOfBoundsPolicy};
use crate::converter::CellIdConverter;
use crate::error::Result;

/// Builder for a [`FeatureBucketer`] over `CellId<DEPTH_LEVELS>` cells.
#[derive(Debug, Clone)]
pub struct BucketerBuilder<const DEPTH_LEVELS: usize = 19> {
    config: Config,
}

impl<const DEPTH_LEVELS: usize> BucketerBuilder<DEPTH_LEVELS> {
    /// Start from the default configuration (Mercator bounds, clamping).
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.config.bounds = bounds;
        self
    }

    pub fn out_of_bounds(mut self, policy: OutOfBoundsPolicy) -> Self {
        self.config.out_of_bounds = policy;
        self
    }

    pub fn bucketer(mut self, bucketer: BucketerConfig) -> Self {
        self.config.bucketer = bucketer;
        self
    }

    /// Level features are grouped at.
    pub fn level(mut self, level: usize) -> Self {
        self.config.bucketer.level = level;
        self
    }

    pub fn truncate_names(mut self, truncate: bool) -> Self {
        self.config.bucketer.truncate_names = truncate;
        self
    }

    pub fn max_clip_depth(mut self, depth: usize) -> Self {
        self.config.bucketer.max_clip_depth = depth;
        self
    }

    /// Build only the converter.
    pub fn build_converter(&self) -> Result<CellIdConverter<DEPTH_LEVELS>> {
        CellIdConverter::with_policy(self.config.bounds, self.config.out_of_bounds)
    }

    /// Build a bucketer writing to `sink` and splitting oversized features with `clipper`.
    pub fn build<S, C>(self, sink: S, clipper: C) -> Result<FeatureBucketer<S, C, DEPTH_LEVELS>> {
        let converter = self.build_converter()?;
        FeatureBucketer::new(converter, self.config.bucketer, sink, clipper)
    }
}

impl<const DEPTH_LEVELS: usize> Default for BucketerBuilder<DEPTH_LEVELS> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipper::PassThroughClipper;
    use crate::error::QuadcellError;

    #[test]
    fn test_builder_applies_settings() {
        let bucketer = BucketerBuilder::<19>::new()
            .bounds(Bounds::new(0.0, 0.0, 4.0, 4.0))
            .out_of_bounds(OutOfBoundsPolicy::Reject)
            .level(3)
            .truncate_names(false)
            .max_clip_depth(2)
            .build(Vec::<()>::new(), PassThroughClipper)
            .unwrap();

        assert_eq!(bucketer.config().level, 3);
        assert!(!bucketer.config().truncate_names);
        assert_eq!(bucketer.config().max_clip_depth, 2);
        assert_eq!(bucketer.converter().policy(), OutOfBoundsPolicy::Reject);
        assert_eq!(bucketer.converter().bounds().max_x, 4.0);
    }

    #[test]
    fn test_builder_rejects_bad_bounds() {
        let err = BucketerBuilder::<19>::new()
            .bounds(Bounds::new(1.0, 1.0, 1.0, 2.0))
            .build((), PassThroughClipper)
            .unwrap_err();
        assert!(matches!(err, QuadcellError::InvalidBounds(_)));
    }

    #[test]
    fn test_builder_from_config() {
        let config = Config::default().with_bucketer(BucketerConfig::default().with_level(7));
        let builder = BucketerBuilder::<19>::new().config(config);
        let converter = builder.build_converter().unwrap();
        assert_eq!(converter.bounds(), &Config::default().bounds);
        let bucketer = builder.build((), PassThroughClipper).unwrap();
        assert_eq!(bucketer.config().level, 7);
    }
}
