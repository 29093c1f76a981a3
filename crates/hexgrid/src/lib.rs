//! Hexgrid: staggered hexagonal grids for interactive views.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the hexgrid sub-crates. For most users, adding `hexgrid` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use hexgrid::prelude::*;
//!
//! // A 5x5 grid where odd lines are inset and there are no edge lines.
//! let shape = Shape::of(5, 5).unwrap();
//! let grid = SharedGrid::new(shape);
//!
//! // Lay it out in a 300x300 container.
//! let mut layout = HexLayout::new(shape, LayoutSpecs::default());
//! let size = layout.calculate_size(&Constraints::exact(300.0, 300.0)).unwrap();
//! assert_eq!((size.width, size.height), (300.0, 300.0));
//!
//! // Tap the centre of cell (2, 2) to select it.
//! let center = layout.cell_bounds(Address::new(2, 2)).center();
//! let tapped = layout.resolve_address(center.x, center.y).unwrap();
//! grid.toggle_selection(tapped).unwrap();
//! assert!(grid.get(tapped).unwrap().is_selected);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`grid`] | `hexgrid-core` | Shapes, addresses, cell state and the grid backends |
//! | [`layout`] | `hexgrid-layout` | Hexagon geometry, layout, hit-testing and drawing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Addressing and cell-state storage (`hexgrid-core`).
///
/// Provides the [`grid::Grid`] and [`grid::MutableGrid`] traits and three
/// backends: [`grid::ArrayGrid`] (mutable), [`grid::PersistentGrid`]
/// (immutable, structurally shared) and [`grid::SharedGrid`] (thread-safe
/// holder with change notification).
pub use hexgrid_core as grid;

/// Geometry, layout and hit-testing (`hexgrid-layout`).
///
/// [`layout::HexLayout`] sizes a grid inside a container, maps points back
/// to addresses and draws through any [`layout::HexCanvas`].
pub use hexgrid_layout as layout;

/// Common imports for typical hexgrid usage.
///
/// ```rust
/// use hexgrid::prelude::*;
/// ```
pub mod prelude {
    // Addressing and state
    pub use hexgrid_core::{Address, Cell, Shape, Size, State, StateMap};

    // Backends and traits
    pub use hexgrid_core::{ArrayGrid, Grid, MutableGrid, PersistentGrid, SharedGrid};

    // Errors
    pub use hexgrid_core::GridError;
    pub use hexgrid_layout::LayoutError;

    // Layout
    pub use hexgrid_layout::{
        Constraints, CrossMode, FitMode, HexLayout, HexOrientation, Insets, LayoutSpecs,
    };

    // Drawing
    pub use hexgrid_layout::{Color, GridStyle, HexCanvas};
}
