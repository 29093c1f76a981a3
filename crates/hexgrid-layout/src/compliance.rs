//! Layout compliance test helpers.
//!
//! Shared by the layout and hit-test unit tests.

use crate::layout::HexLayout;
use hexgrid_core::Address;

/// Enumerate every valid address of the layout's shape.
fn addresses(layout: &HexLayout) -> Vec<Address> {
    let shape = layout.shape();
    let min = shape.min_index();
    let total = shape.total_size();
    let mut out = Vec::with_capacity(shape.cell_count());
    for row in min..min + total.row_count as i32 {
        for column in min..min + total.column_count as i32 {
            if let Some(address) = shape.find_address(row, column) {
                out.push(address);
            }
        }
    }
    out
}

/// Assert that the device-space center of every cell resolves to that cell.
pub fn assert_centers_resolve(layout: &HexLayout) {
    for address in addresses(layout) {
        let center = layout.cell_bounds(address).center();
        assert_eq!(
            layout.resolve_address(center.x, center.y),
            Some(address),
            "center {center:?} of {address} for {} with {:?}",
            layout.shape(),
            layout.specs()
        );
    }
}
