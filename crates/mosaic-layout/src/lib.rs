//! Layout primitives for Mosaic galleries.
//!
//! This crate is the pure half of the gallery engine: it knows nothing about
//! fetching, viewports or hosts, and every function here is deterministic.
//!
//! # Architecture
//!
//! - [`tile`] - packs items into justified rows against an aspect-ratio threshold
//! - [`chunk_rows`] - groups rows into fixed-capacity sections, holding back short tails
//! - [`Section`] - a laid-out run of rows with per-tile frames
//! - [`LayoutOptions`] - threshold and margin shared by tiling and geometry
//!
//! # Example
//!
//! ```rust
//! use mosaic_layout::{tile, Item};
//!
//! let items = ["a", "b", "c"]
//!     .iter()
//!     .map(|id| Item::new(*id, 1.0))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let tiling = tile(items, 2.0, true);
//! assert_eq!(tiling.rows.len(), 1);
//! assert_eq!(tiling.remainder.len(), 1);
//! ```

pub mod collections;
mod error;
mod geometry;
mod item;
mod options;
mod row;
mod section;
mod sectioner;
mod tiler;

pub use error::*;
pub use geometry::*;
pub use item::*;
pub use options::*;
pub use row::*;
pub use section::*;
pub use sectioner::*;
pub use tiler::*;
