//! Copy-on-write grid storage with structural sharing between versions.

use crate::address::{Address, State};
use crate::error::GridError;
use crate::rows::{Cells, Row, RowCells};
use crate::shape::Shape;
use crate::shared::CellChange;
use crate::state_map::{check_changes, StateMap};
use crate::traits::{write_cells, Grid};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// An immutable grid whose copies share every row they do not change.
///
/// Cloning is an `Arc` bump. [`copy`](Grid::copy) rebuilds only the row
/// spine plus the one row that changed; a no-op copy returns a handle to the
/// same storage, which [`ptr_eq`](Self::ptr_eq) makes observable.
///
/// This is also the snapshot type of [`SharedGrid`](crate::SharedGrid).
#[derive(Clone, Debug)]
pub struct PersistentGrid {
    shape: Shape,
    rows: Arc<[Arc<Row>]>,
}

// Compile-time assertion: snapshots cross threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<PersistentGrid>();
};

impl PersistentGrid {
    /// A grid with every cell at [`State::DEFAULT`].
    pub fn new(shape: Shape) -> Self {
        Self::with_init(shape, |_| None)
    }

    /// A grid initialized from `initial`; invalid keys are ignored.
    pub fn with_states(shape: Shape, initial: &StateMap) -> Self {
        Self::with_init(shape, |address| initial.get(&address).copied())
    }

    /// A grid whose cells come from `init`, or [`State::DEFAULT`] where it
    /// returns `None`.
    pub fn with_init(shape: Shape, mut init: impl FnMut(Address) -> Option<State>) -> Self {
        let rows: Vec<Arc<Row>> = Row::build_all(&shape, &mut init)
            .into_iter()
            .map(Arc::new)
            .collect();
        Self {
            shape,
            rows: rows.into(),
        }
    }

    /// A persistent copy of any grid's shape and states.
    pub fn from_grid(grid: &dyn Grid) -> Self {
        Self::with_init(*grid.shape(), |address| grid.get(address).ok())
    }

    /// Whether both handles point at the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows)
    }

    /// Whether `row` is physically shared between the two versions.
    ///
    /// Returns `false` for a row index outside either grid.
    pub fn shares_row(&self, other: &Self, row: i32) -> bool {
        if self.shape != other.shape {
            return false;
        }
        let first = self.shape.min_index();
        let Some(slot) = usize::try_from(i64::from(row) - i64::from(first)).ok() else {
            return false;
        };
        match (self.rows.get(slot), other.rows.get(slot)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Cells whose state differs between `self` and `newer`, in cell order.
    ///
    /// Rows shared between the versions are skipped without looking at
    /// their cells. Grids of different shapes have no cell-wise diff, and
    /// return an empty list.
    pub fn diff(&self, newer: &Self) -> SmallVec<[CellChange; 4]> {
        let mut changes = SmallVec::new();
        if self.shape != newer.shape || self.ptr_eq(newer) {
            return changes;
        }
        for (old_row, new_row) in self.rows.iter().zip(newer.rows.iter()) {
            if Arc::ptr_eq(old_row, new_row) {
                continue;
            }
            let olds = RowCells::new(std::slice::from_ref(old_row));
            let news = RowCells::new(std::slice::from_ref(new_row));
            for (old, new) in olds.zip(news) {
                if old.state != new.state {
                    changes.push(CellChange {
                        address: old.address,
                        old: old.state,
                        new: new.state,
                    });
                }
            }
        }
        changes
    }

    /// A version with one or both flags at `address` replaced.
    ///
    /// Flags left as `None` keep their current value. When nothing changes
    /// the result shares storage with `self`.
    pub fn changed(
        &self,
        address: Address,
        is_visible: Option<bool>,
        is_selected: Option<bool>,
    ) -> Result<Self, GridError> {
        let current = self.get(address)?;
        let next = State::new(
            is_visible.unwrap_or(current.is_visible),
            is_selected.unwrap_or(current.is_selected),
        );
        self.copy(address, next)
    }

    /// A version with the selection at `address` flipped.
    pub fn toggled(&self, address: Address) -> Result<Self, GridError> {
        let current = self.get(address)?;
        self.copy(address, current.toggled_selection())
    }

    fn with_rows(&self, rows: Vec<Arc<Row>>) -> Self {
        Self {
            shape: self.shape,
            rows: rows.into(),
        }
    }
}

impl Grid for PersistentGrid {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn lookup(&self, row: i32, column: i32) -> Option<State> {
        if !self.shape.is_valid_address(row, column) {
            return None;
        }
        Some(self.rows[self.shape.row_slot(row)].get(column))
    }

    fn cells(&self) -> Cells<'_> {
        Cells::new(RowCells::new(&self.rows), self.shape.cell_count())
    }

    fn for_each(&self, visit: &mut dyn FnMut(Address, State)) {
        for cell in RowCells::new(&self.rows) {
            visit(cell.address, cell.state);
        }
    }

    fn copy(&self, address: Address, state: State) -> Result<Self, GridError> {
        let current = self.get(address)?;
        if current == state {
            return Ok(self.clone());
        }
        let mut rows = self.rows.to_vec();
        let slot = self.shape.row_slot(address.row);
        Arc::make_mut(&mut rows[slot]).set(address.column, state);
        Ok(self.with_rows(rows))
    }

    fn copy_with(&self, changes: &StateMap) -> Result<Self, GridError> {
        check_changes(&self.shape, changes)?;
        let mut rows: Option<Vec<Arc<Row>>> = None;
        for (address, state) in changes {
            let slot = self.shape.row_slot(address.row);
            if self.rows[slot].get(address.column) == *state {
                continue;
            }
            let rows = rows.get_or_insert_with(|| self.rows.to_vec());
            // The first write to a row clones it away from `self`; later
            // writes find it unique and update in place.
            Arc::make_mut(&mut rows[slot]).set(address.column, *state);
        }
        Ok(match rows {
            Some(rows) => self.with_rows(rows),
            None => self.clone(),
        })
    }
}

impl PartialEq for PersistentGrid {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && (self.ptr_eq(other) || self.rows == other.rows)
    }
}

impl Eq for PersistentGrid {}

impl fmt::Display for PersistentGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cells(self, f)
    }
}
