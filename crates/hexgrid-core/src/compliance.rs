//! Grid trait compliance test helpers.
//!
//! These functions verify that a backend satisfies the invariants of the
//! [`Grid`] contract. Reused by the array, persistent and shared backend
//! test modules.

use crate::address::{Address, State};
use crate::traits::Grid;
use indexmap::IndexSet;

/// Assert that iteration yields exactly the valid addresses, each once.
pub fn assert_iteration_matches_validity(grid: &dyn Grid) {
    let seen: IndexSet<Address> = grid.addresses().collect();
    assert_eq!(
        seen.len(),
        grid.cell_count(),
        "iteration yielded duplicates or missed cells for {}",
        grid.shape()
    );
    let min = grid.shape().min_index();
    let total = grid.total_size();
    for row in (min - 1)..(min + total.row_count as i32 + 1) {
        for column in (min - 1)..(min + total.column_count as i32 + 1) {
            let valid = grid.is_valid_address(row, column);
            assert_eq!(
                valid,
                seen.contains(&Address::new(row, column)),
                "({row},{column}) validity disagrees with iteration for {}",
                grid.shape()
            );
            assert_eq!(grid.lookup(row, column).is_some(), valid);
            assert_eq!(grid.find_address(row, column).is_some(), valid);
        }
    }
}

/// Assert row-major order with increasing column inside each row.
pub fn assert_row_major_order(grid: &dyn Grid) {
    let addresses: Vec<Address> = grid.addresses().collect();
    for pair in addresses.windows(2) {
        assert!(
            pair[0] < pair[1],
            "{} then {} is not row-major for {}",
            pair[0],
            pair[1],
            grid.shape()
        );
    }
}

/// Assert that every projection reports the cell count as its length and
/// agrees with `get` and `for_each`.
pub fn assert_projections_consistent(grid: &dyn Grid) {
    assert_eq!(grid.cells().len(), grid.cell_count());
    assert_eq!(grid.addresses().len(), grid.cell_count());
    assert_eq!(grid.states().len(), grid.cell_count());

    let mut visited: Vec<(Address, State)> = Vec::new();
    grid.for_each(&mut |address, state| visited.push((address, state)));
    let cells: Vec<(Address, State)> = grid.cells().map(|c| (c.address, c.state)).collect();
    assert_eq!(visited, cells, "for_each disagrees with cells()");

    for (address, state) in cells {
        assert_eq!(grid.get(address), Ok(state));
    }
}

/// Run every compliance check.
pub fn run_full_compliance(grid: &dyn Grid) {
    assert_iteration_matches_validity(grid);
    assert_row_major_order(grid);
    assert_projections_consistent(grid);
    assert!(grid.content_eq(grid));
}
