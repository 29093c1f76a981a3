//! The [`Grid`] read capability and the [`MutableGrid`] write capability.

use crate::address::{Address, Size, State};
use crate::error::GridError;
use crate::rows::{Addresses, Cells, States};
use crate::shape::Shape;
use crate::state_map::StateMap;
use std::fmt;

/// An addressable collection of cell states over a staggered hex layout.
///
/// Backends supply [`shape`](Self::shape), [`lookup`](Self::lookup) and
/// [`cells`](Self::cells); everything else is derived. The read methods are
/// object safe, so layout and drawing code works through `&dyn Grid`.
///
/// The two `copy` methods produce a grid of the same backend and are only
/// callable on concrete types.
pub trait Grid {
    /// The grid's immutable shape.
    fn shape(&self) -> &Shape;

    /// The state at `(row, column)`, or `None` if that is not a valid address.
    fn lookup(&self, row: i32, column: i32) -> Option<State>;

    /// All cells, row-major, with increasing column within a row.
    fn cells(&self) -> Cells<'_>;

    /// Nominal rows and columns.
    fn size(&self) -> Size {
        self.shape().size()
    }

    /// Nominal number of rows.
    fn row_count(&self) -> u32 {
        self.shape().size().row_count
    }

    /// Nominal number of columns.
    fn column_count(&self) -> u32 {
        self.shape().size().column_count
    }

    /// Rows and columns including edge lines.
    fn total_size(&self) -> Size {
        self.shape().total_size()
    }

    /// Whether even-indexed lines are inset.
    fn inset_even_lines(&self) -> bool {
        self.shape().inset_even_lines()
    }

    /// Whether the extra ring of edge cells is present.
    fn enable_edge_lines(&self) -> bool {
        self.shape().enable_edge_lines()
    }

    /// Number of cells.
    fn cell_count(&self) -> usize {
        self.shape().cell_count()
    }

    /// Whether the grid has no cells.
    fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Whether the row or column at `index` is inset.
    fn is_line_inset(&self, index: i32) -> bool {
        self.shape().is_line_inset(index)
    }

    /// Whether `(row, column)` addresses a cell.
    fn is_valid_address(&self, row: i32, column: i32) -> bool {
        self.shape().is_valid_address(row, column)
    }

    /// The address for `(row, column)` if it is valid.
    fn find_address(&self, row: i32, column: i32) -> Option<Address> {
        self.shape().find_address(row, column)
    }

    /// The state at `address`.
    ///
    /// Returns `Err(GridError::InvalidAddress)` if the address is not valid.
    fn get(&self, address: Address) -> Result<State, GridError> {
        self.lookup(address.row, address.column)
            .ok_or_else(|| GridError::InvalidAddress {
                address,
                shape: *self.shape(),
            })
    }

    /// The state at `(row, column)`. See [`get`](Self::get).
    fn get_at(&self, row: i32, column: i32) -> Result<State, GridError> {
        self.get(Address::new(row, column))
    }

    /// Visit every cell once, in [`cells`](Self::cells) order.
    ///
    /// Backends override this to skip the boxed iterator.
    fn for_each(&self, visit: &mut dyn FnMut(Address, State)) {
        for cell in self.cells() {
            visit(cell.address, cell.state);
        }
    }

    /// All addresses, in cell order.
    fn addresses(&self) -> Addresses<'_> {
        Addresses(self.cells())
    }

    /// All states, in cell order.
    fn states(&self) -> States<'_> {
        States(self.cells())
    }

    /// Whether `other` has the same shape, so that states can be carried
    /// over cell for cell.
    fn is_shape_compatible(&self, other: &dyn Grid) -> bool {
        self.shape() == other.shape()
    }

    /// Whether `other` has the same shape and the same state in every cell,
    /// whatever its backend.
    fn content_eq(&self, other: &dyn Grid) -> bool {
        self.is_shape_compatible(other) && self.cells().eq(other.cells())
    }

    /// A grid with `state` at `address` and every other cell unchanged.
    ///
    /// When `state` is already the current state, the result is equal to
    /// `self`; persistent backends return a handle to the same storage.
    /// Returns `Err(GridError::InvalidAddress)` for an invalid address.
    fn copy(&self, address: Address, state: State) -> Result<Self, GridError>
    where
        Self: Sized;

    /// A grid with every change in `changes` applied.
    ///
    /// All keys are validated before anything is applied, so an invalid key
    /// leaves no partial result. With no net change the result is equal to
    /// `self`, sharing storage for persistent backends.
    fn copy_with(&self, changes: &StateMap) -> Result<Self, GridError>
    where
        Self: Sized;
}

/// In-place mutation on top of [`Grid`].
///
/// Only states change; the shape stays fixed for the life of the grid.
pub trait MutableGrid: Grid {
    /// Replace the state at `address`.
    ///
    /// Returns `Err(GridError::InvalidAddress)` for an invalid address.
    fn set(&mut self, address: Address, state: State) -> Result<(), GridError>;

    /// Replace every state in `changes`.
    ///
    /// All keys are validated first; an invalid key changes nothing.
    fn set_all(&mut self, changes: &StateMap) -> Result<(), GridError> {
        crate::state_map::check_changes(self.shape(), changes)?;
        for (address, state) in changes {
            self.set(*address, *state)?;
        }
        Ok(())
    }

    /// Update one or both flags at `address`, returning the new state.
    fn change(
        &mut self,
        address: Address,
        is_visible: Option<bool>,
        is_selected: Option<bool>,
    ) -> Result<State, GridError> {
        let current = self.get(address)?;
        let next = State::new(
            is_visible.unwrap_or(current.is_visible),
            is_selected.unwrap_or(current.is_selected),
        );
        self.set(address, next)?;
        Ok(next)
    }

    /// Flip the selection flag at `address`, returning the new state.
    fn toggle(&mut self, address: Address) -> Result<State, GridError> {
        let current = self.get(address)?;
        self.change(address, None, Some(!current.is_selected))
    }
}

/// Write `{(r,c)=State(..), ...}`, or `{}` for an empty grid.
pub(crate) fn write_cells(grid: &dyn Grid, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("{")?;
    for (i, cell) in grid.cells().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{cell}")?;
    }
    f.write_str("}")
}
