//! Plain in-place mutable grid storage.

use crate::address::{Address, State};
use crate::error::GridError;
use crate::rows::{Cells, Row, RowCells};
use crate::shape::Shape;
use crate::state_map::{check_changes, StateMap};
use crate::traits::{write_cells, Grid, MutableGrid};
use std::fmt;
use std::sync::OnceLock;

/// A grid that owns one state vector per row and mutates it in place.
///
/// `copy` clones the whole storage; use [`PersistentGrid`](crate::PersistentGrid)
/// when copies should share unchanged rows.
///
/// # Examples
///
/// ```
/// use hexgrid_core::{Address, ArrayGrid, Grid, MutableGrid, Shape, State};
///
/// let mut grid = ArrayGrid::new(Shape::of(3, 3).unwrap());
/// assert_eq!(grid.cell_count(), 5);
///
/// grid.toggle(Address::new(1, 1)).unwrap();
/// assert_eq!(grid.get(Address::new(1, 1)).unwrap(), State::new(true, true));
///
/// // (0, 1) is a gap in the staggered layout.
/// assert!(grid.set(Address::new(0, 1), State::DEFAULT).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct ArrayGrid {
    shape: Shape,
    rows: Vec<Row>,
    address_list: OnceLock<Box<[Address]>>,
}

impl ArrayGrid {
    /// A grid with every cell at [`State::DEFAULT`].
    pub fn new(shape: Shape) -> Self {
        Self::with_init(shape, |_| None)
    }

    /// A grid initialized from `initial`; keys that are not valid addresses
    /// are ignored.
    pub fn with_states(shape: Shape, initial: &StateMap) -> Self {
        Self::with_init(shape, |address| initial.get(&address).copied())
    }

    /// A grid whose cells are initialized by `init`, falling back to
    /// [`State::DEFAULT`] where it returns `None`.
    pub fn with_init(shape: Shape, mut init: impl FnMut(Address) -> Option<State>) -> Self {
        Self::from_rows(shape, Row::build_all(&shape, &mut init))
    }

    /// A copy of any grid's shape and states.
    pub fn from_grid(grid: &dyn Grid) -> Self {
        Self::with_init(*grid.shape(), |address| grid.get(address).ok())
    }

    fn from_rows(shape: Shape, rows: Vec<Row>) -> Self {
        Self {
            shape,
            rows,
            address_list: OnceLock::new(),
        }
    }

    /// Every address in cell order, built on first use and kept for the
    /// life of this grid.
    pub fn address_list(&self) -> &[Address] {
        self.address_list
            .get_or_init(|| self.addresses().collect())
    }

    fn write(&mut self, address: Address, state: State) {
        let slot = self.shape.row_slot(address.row);
        self.rows[slot].set(address.column, state);
    }
}

impl Grid for ArrayGrid {
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
        let mut next = self.clone();
        next.set(address, state)?;
        Ok(next)
    }

    fn copy_with(&self, changes: &StateMap) -> Result<Self, GridError> {
        check_changes(&self.shape, changes)?;
        let mut next = self.clone();
        for (address, state) in changes {
            next.write(*address, *state);
        }
        Ok(next)
    }
}

impl MutableGrid for ArrayGrid {
    fn set(&mut self, address: Address, state: State) -> Result<(), GridError> {
        self.shape.check_address(address)?;
        self.write(address, state);
        Ok(())
    }
}

impl PartialEq for ArrayGrid {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.rows == other.rows
    }
}

impl Eq for ArrayGrid {}

impl fmt::Display for ArrayGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cells(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Size;
    use crate::compliance;
    use crate::state_map::build_state_map;

    fn shape(rows: u32, cols: u32, inset_even: bool, edges: bool) -> Shape {
        Shape::new(Size::new(rows, cols), inset_even, edges).unwrap()
    }

    #[test]
    fn new_grid_is_all_default() {
        let grid = ArrayGrid::new(shape(4, 5, true, true));
        assert!(grid.states().all(|s| s == State::DEFAULT));
        assert_eq!(grid.cells().len(), grid.cell_count());
    }

    #[test]
    fn get_rejects_gaps_and_out_of_range() {
        let grid = ArrayGrid::new(shape(3, 3, false, false));
        assert!(grid.get(Address::new(0, 0)).is_ok());
        assert!(matches!(
            grid.get(Address::new(0, 1)),
            Err(GridError::InvalidAddress { .. })
        ));
        assert!(grid.get(Address::new(-1, -1)).is_err());
        assert!(grid.get_at(4, 0).is_err());
    }

    #[test]
    fn with_states_ignores_invalid_keys() {
        let initial = build_state_map(|b| {
            b.select([b.at(1, 1), b.at(0, 1), b.at(9, 9)]);
        });
        let grid = ArrayGrid::with_states(shape(3, 3, false, false), &initial);
        assert!(grid.get_at(1, 1).unwrap().is_selected);
        assert_eq!(grid.states().filter(|s| s.is_selected).count(), 1);
    }

    #[test]
    fn set_mutates_in_place() {
        let mut grid = ArrayGrid::new(shape(3, 3, false, false));
        let hidden = State::new(false, false);
        grid.set(Address::new(2, 2), hidden).unwrap();
        assert_eq!(grid.get_at(2, 2).unwrap(), hidden);
        assert_eq!(grid.states().filter(|s| *s == hidden).count(), 1);
    }

    #[test]
    fn set_all_is_all_or_nothing() {
        let mut grid = ArrayGrid::new(shape(3, 3, false, false));
        let bad = build_state_map(|b| {
            b.select([b.at(0, 0), b.at(1, 0)]);
        });
        assert!(grid.set_all(&bad).is_err());
        assert!(!grid.get_at(0, 0).unwrap().is_selected);

        let good = build_state_map(|b| {
            b.select([b.at(0, 0), b.at(1, 1)]);
        });
        grid.set_all(&good).unwrap();
        assert_eq!(grid.states().filter(|s| s.is_selected).count(), 2);
    }

    #[test]
    fn change_and_toggle() {
        let mut grid = ArrayGrid::new(shape(3, 3, false, false));
        let a = Address::new(2, 0);
        assert_eq!(
            grid.change(a, Some(false), None).unwrap(),
            State::new(false, false)
        );
        assert_eq!(grid.toggle(a).unwrap(), State::new(false, true));
        assert_eq!(grid.toggle(a).unwrap(), State::new(false, false));
        assert!(grid.toggle(Address::new(2, 1)).is_err());
    }

    #[test]
    fn copy_changes_one_cell_only() {
        let grid = ArrayGrid::new(shape(5, 5, true, false));
        let a = Address::new(2, 1);
        let selected = State::DEFAULT.with_selected(true);
        let next = grid.copy(a, selected).unwrap();
        assert_eq!(next.get(a).unwrap(), selected);
        assert_eq!(grid.get(a).unwrap(), State::DEFAULT);
        for cell in next.cells().filter(|c| c.address != a) {
            assert_eq!(cell.state, grid.get(cell.address).unwrap());
        }
        assert_eq!(next.shape(), grid.shape());
    }

    #[test]
    fn copy_with_no_net_change_is_equal() {
        let grid = ArrayGrid::new(shape(4, 4, false, true));
        let same = build_state_map(|b| {
            b.put(b.at(-1, -1), State::DEFAULT);
        });
        assert_eq!(grid.copy_with(&same).unwrap(), grid);
        assert_eq!(grid.copy(Address::ORIGIN, State::DEFAULT).unwrap(), grid);
    }

    #[test]
    fn copy_with_rejects_batch_with_invalid_key() {
        let grid = ArrayGrid::new(shape(3, 3, false, false));
        let changes = build_state_map(|b| {
            b.select([b.at(0, 0), b.at(0, 1)]);
        });
        assert!(grid.copy_with(&changes).is_err());
    }

    #[test]
    fn address_list_is_cached() {
        let grid = ArrayGrid::new(shape(3, 4, true, false));
        let first = grid.address_list().as_ptr();
        assert_eq!(grid.address_list().len(), grid.cell_count());
        assert_eq!(grid.address_list().as_ptr(), first);
    }

    #[test]
    fn display_lists_cells() {
        let grid = ArrayGrid::new(shape(2, 2, false, false));
        assert_eq!(grid.to_string(), "{(0,0)=State(v+,s-), (1,1)=State(v+,s-)}");
        assert_eq!(ArrayGrid::new(Shape::EMPTY).to_string(), "{}");
    }

    #[test]
    fn from_grid_round_trips() {
        let mut grid = ArrayGrid::new(shape(4, 3, true, true));
        grid.toggle(Address::new(-1, 0)).unwrap();
        let copy = ArrayGrid::from_grid(&grid);
        assert_eq!(copy, grid);
        assert!(copy.content_eq(&grid));
    }

    #[test]
    fn compliance_small_shapes() {
        for rows in 0..6 {
            for cols in 0..6 {
                for inset_even in [false, true] {
                    for edges in [false, true] {
                        let grid = ArrayGrid::new(shape(rows, cols, inset_even, edges));
                        compliance::run_full_compliance(&grid);
                    }
                }
            }
        }
    }
}
