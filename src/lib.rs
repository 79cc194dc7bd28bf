//! Hierarchical quadtree cell addressing and spatial bucketing.
//!
//! ```rust
//! use quadcell::{Bounds, CellIdConverter};
//!
//! let converter = CellIdConverter::<30>::new(Bounds::new(0.0, 0.0, 4.0, 4.0))?;
//! let cell = converter.to_cell(1.5, 2.5)?;
//! assert!(cell.to_string().starts_with("213"));
//!
//! let cover = converter.cover(3.5, 2.5, 2.5, 3.5)?;
//! assert_eq!(cover.to_string(), "3");
//! # Ok::<(), quadcell::QuadcellError>(())
//! ```

pub mod bits;
pub mod bucketer;
pub mod builder;
pub mod cell_id;
pub mod clipper;
pub mod config;
pub mod converter;
pub mod error;
pub mod feature;
pub mod mercator;
pub mod registry;
pub mod sink;

pub use builder::BucketerBuilder;
pub use bucketer::FeatureBucketer;
pub use cell_id::{CellId, RectId};
pub use clipper::{ClipTarget, FeatureClipper, PassThroughClipper};
pub use config::{Bounds, BucketStats, BucketerConfig, Config, OutOfBoundsPolicy};
pub use converter::CellIdConverter;
pub use error::{BoxError, QuadcellError, Result};
pub use feature::{Feature, SerializedFeature};
pub use mercator::MercatorBounds;
pub use registry::BucketRegistry;
pub use sink::FeatureSink;

pub use geo::{Coord, Point, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{BucketerBuilder, QuadcellError, Result};

    pub use crate::{CellId, CellIdConverter, RectId};

    pub use crate::{Feature, FeatureClipper, FeatureSink, PassThroughClipper, SerializedFeature};

    pub use crate::{Bounds, BucketerConfig, Config, MercatorBounds, OutOfBoundsPolicy};

    pub use geo::{Coord, Point, Rect};
}
