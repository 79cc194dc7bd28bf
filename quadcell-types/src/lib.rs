//! # quadcell-types
//!
//! Core data types for the quadcell spatial indexer.
//!
//! - **Bounds**: `Bounds`, the validated real-space rectangle a grid is laid over
//! - **Policies**: `OutOfBoundsPolicy`
//! - **Statistics**: `BucketStats`
//!
//! All types are serializable with Serde and interoperate with the `geo`
//! crate's geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use quadcell_types::bounds::Bounds;
//!
//! let bounds = Bounds::new(-180.0, -90.0, 180.0, 90.0);
//! assert!(bounds.validate().is_ok());
//! assert!(bounds.contains(-74.0060, 40.7128));
//! ```

pub mod bounds;
pub mod config;
pub mod stats;
