//! Geometry, layout and hit-testing for staggered hexagon grids.
//!
//! [`HexLayout`] turns a grid [`Shape`](hexgrid_core::Shape), a
//! [`LayoutSpecs`] policy and container [`Constraints`] into a hexagon
//! size, a content size and a grid-to-device transform. The same layout
//! maps device points back to cell addresses with
//! [`HexLayout::resolve_address`] and draws a grid through any
//! [`HexCanvas`].
//!
//! # Modules
//!
//! - [`hexagon`]: regular hexagon vertices and outline
//! - [`layout`]: size calculation, cell bounds and drawing
//! - [`sizing`]: edge-length and line-count helpers for choosing grid sizes
//! - [`render`]: the canvas sink, colors and styles

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod hexagon;
pub mod layout;
pub mod render;
mod resolve;
pub mod sizing;
pub mod specs;

#[cfg(test)]
pub(crate) mod compliance;

pub use error::LayoutError;
pub use hexagon::{Hexagon, SQRT_3};
pub use layout::HexLayout;
pub use render::{Color, GridStyle, HexCanvas, HexPaint};
pub use specs::{Constraints, CrossMode, FitMode, HexOrientation, Insets, LayoutSpecs};
