//! Addressing and cell state for staggered hexagon grids.
//!
//! A grid is a rectangle of rows and columns in which every other line is
//! inset by half a cell, so only addresses whose row and column interleave
//! correctly hold a cell. [`Shape`] owns those rules; the [`Grid`] trait
//! reads cell [`State`]s through them and [`MutableGrid`] writes them.
//!
//! # Backends
//!
//! - [`ArrayGrid`]: in-place mutable storage
//! - [`PersistentGrid`]: immutable versions sharing unchanged rows
//! - [`SharedGrid`]: a thread-safe holder of [`PersistentGrid`] versions
//!   with optimistic updates and change observers
//!
//! # Batch changes
//!
//! Changes are expressed as a [`StateMap`], usually built with
//! [`build_state_map`], and validated as a whole before any is applied.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod address;
pub mod array;
pub mod error;
pub mod persistent;
mod rows;
pub mod shape;
pub mod shared;
pub mod state_map;
pub mod traits;

#[cfg(test)]
pub(crate) mod compliance;

pub use address::{Address, Cell, Size, State};
pub use array::ArrayGrid;
pub use error::GridError;
pub use persistent::PersistentGrid;
pub use rows::{Addresses, Cells, States};
pub use shape::Shape;
pub use shared::{CellChange, ObserverId, RetryPolicy, SharedGrid};
pub use state_map::{build_state_map, StateMap, StateMapBuilder};
pub use traits::{Grid, MutableGrid};
