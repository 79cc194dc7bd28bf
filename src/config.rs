//! Configuration for converters and bucketing passes.
//!
//! This module provides configuration types and re-exports the plain data
//! types from the `quadcell-types` crate for convenience.
use serde::de::Error;
use serde::{Deserialize, Serialize};

pub use quadcell_types::bounds::Bounds;
pub use quadcell_types::config::OutOfBoundsPolicy;
pub use quadcell_types::stats::BucketStats;

use crate::mercator::MercatorBounds;

/// Indexer configuration
///
/// # Example
///
/// ```rust
/// use quadcell::Config;
///
/// let json = r#"{
///     "bounds": { "min_x": 0.0, "min_y": 0.0, "max_x": 4.0, "max_y": 4.0 },
///     "out_of_bounds": "reject",
///     "bucketer": { "level": 2 }
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.bucketer.level, 2);
/// assert!(config.bucketer.truncate_names);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Real-space rectangle the cell grid covers
    #[serde(default = "Config::default_bounds")]
    pub bounds: Bounds,

    #[serde(default)]
    pub out_of_bounds: OutOfBoundsPolicy,

    #[serde(default)]
    pub bucketer: BucketerConfig,
}

/// Settings for one bucketing pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BucketerConfig {
    /// Cell level features are grouped at
    #[serde(default = "BucketerConfig::default_level")]
    pub level: usize,

    /// Cut bucket names to `level` digits
    #[serde(default = "BucketerConfig::default_truncate_names")]
    pub truncate_names: bool,

    /// How many times a single feature may be handed back to the clipper
    #[serde(default = "BucketerConfig::default_max_clip_depth")]
    pub max_clip_depth: usize,
}

impl BucketerConfig {
    const fn default_level() -> usize {
        5
    }

    const fn default_truncate_names() -> bool {
        true
    }

    const fn default_max_clip_depth() -> usize {
        8
    }

    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    pub fn with_truncate_names(mut self, truncate: bool) -> Self {
        self.truncate_names = truncate;
        self
    }

    pub fn with_max_clip_depth(mut self, depth: usize) -> Self {
        self.max_clip_depth = depth;
        self
    }

    /// Check the level against the deepest level of the cell type in use.
    pub fn validate(&self, max_depth: usize) -> Result<(), String> {
        if self.level > max_depth {
            return Err(format!(
                "Bucket level {} exceeds max cell depth {}",
                self.level, max_depth
            ));
        }
        Ok(())
    }
}

impl Default for BucketerConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            truncate_names: Self::default_truncate_names(),
            max_clip_depth: Self::default_max_clip_depth(),
        }
    }
}

impl Config {
    const fn default_bounds() -> Bounds {
        MercatorBounds::bounds()
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_out_of_bounds(mut self, policy: OutOfBoundsPolicy) -> Self {
        self.out_of_bounds = policy;
        self
    }

    pub fn with_bucketer(mut self, bucketer: BucketerConfig) -> Self {
        self.bucketer = bucketer;
        self
    }

    /// Validate values that do not depend on the cell type.
    pub fn validate(&self) -> Result<(), String> {
        self.bounds.validate()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bounds: Self::default_bounds(),
            out_of_bounds: OutOfBoundsPolicy::default(),
            bucketer: BucketerConfig::default(),
        }
    }
}
