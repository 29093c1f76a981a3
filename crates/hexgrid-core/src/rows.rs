//! Row-wise cell storage shared by the grid backends, and the iterators
//! that project it as cells, addresses and states.

use crate::address::{Address, Cell, State};
use crate::shape::Shape;

/// One grid row: the states of its cells, from `start` in steps of two.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Row {
    index: i32,
    start: i32,
    states: Vec<State>,
}

impl Row {
    /// Build the row at `index` of `shape`, filling each cell from `init`.
    pub(crate) fn build(
        shape: &Shape,
        index: i32,
        init: &mut dyn FnMut(Address) -> Option<State>,
    ) -> Self {
        let (start, count) = shape.row_layout(index);
        let states = (0..count)
            .map(|i| init(Address::new(index, start + 2 * i as i32)).unwrap_or_default())
            .collect();
        Self {
            index,
            start,
            states,
        }
    }

    /// Build every row of `shape` in storage order.
    pub(crate) fn build_all(
        shape: &Shape,
        init: &mut dyn FnMut(Address) -> Option<State>,
    ) -> Vec<Row> {
        let min = shape.min_index();
        (0..shape.total_size().row_count as i32)
            .map(|i| Row::build(shape, min + i, init))
            .collect()
    }

    /// Slot of `column` within this row. The column must be valid.
    fn slot(&self, column: i32) -> usize {
        ((column - self.start) / 2) as usize
    }

    pub(crate) fn get(&self, column: i32) -> State {
        self.states[self.slot(column)]
    }

    pub(crate) fn set(&mut self, column: i32, state: State) {
        let slot = self.slot(column);
        self.states[slot] = state;
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    fn cell(&self, slot: usize) -> Cell {
        Cell::new(
            Address::new(self.index, self.start + 2 * slot as i32),
            self.states[slot],
        )
    }
}

impl AsRef<Row> for Row {
    fn as_ref(&self) -> &Row {
        self
    }
}

/// Row-major cell iterator over a backend's row slice.
///
/// Generic over the row handle so that plain rows and shared (`Arc`) rows
/// iterate the same way.
pub(crate) struct RowCells<'a, R> {
    rows: &'a [R],
    row: usize,
    slot: usize,
}

impl<'a, R: AsRef<Row>> RowCells<'a, R> {
    pub(crate) fn new(rows: &'a [R]) -> Self {
        Self {
            rows,
            row: 0,
            slot: 0,
        }
    }
}

impl<R: AsRef<Row>> Iterator for RowCells<'_, R> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let rows = self.rows;
        while let Some(row) = rows.get(self.row) {
            let row = row.as_ref();
            if self.slot < row.len() {
                let cell = row.cell(self.slot);
                self.slot += 1;
                return Some(cell);
            }
            self.row += 1;
            self.slot = 0;
        }
        None
    }
}

/// Read-through projection of a grid's cells, in row-major order with
/// increasing column within each row.
///
/// Returned by [`Grid::cells`](crate::Grid::cells). The length is always the
/// grid's cell count.
pub struct Cells<'a> {
    inner: Box<dyn Iterator<Item = Cell> + 'a>,
    remaining: usize,
}

impl<'a> Cells<'a> {
    /// Wrap a backend iterator that yields exactly `cell_count` cells.
    pub fn new(inner: impl Iterator<Item = Cell> + 'a, cell_count: usize) -> Self {
        Self {
            inner: Box::new(inner),
            remaining: cell_count,
        }
    }
}

impl Iterator for Cells<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let cell = self.inner.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Cells<'_> {}

/// Projection of a grid's addresses, in cell order.
pub struct Addresses<'a>(pub(crate) Cells<'a>);

impl Iterator for Addresses<'_> {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        self.0.next().map(|c| c.address)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Addresses<'_> {}

/// Projection of a grid's states, in cell order.
pub struct States<'a>(pub(crate) Cells<'a>);

impl Iterator for States<'_> {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        self.0.next().map(|c| c.state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for States<'_> {}
