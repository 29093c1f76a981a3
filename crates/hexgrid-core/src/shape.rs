//! Immutable grid shape and the staggered line rules.
//!
//! A hex grid is a staggered grid: every other row (and, symmetrically,
//! every other column) is *inset* by half a step. A cell exists at
//! `(row, column)` only where the parities of the two lines agree, so the
//! valid addresses form a checkerboard over the bounding rectangle.
//!
//! With edge lines enabled, one extra line is added on every side, so the
//! valid indices run from `-1` through the nominal count inclusive.

use crate::address::{Address, Size};
use crate::error::GridError;
use std::fmt;

/// The shape parameters of a grid, fixed for the life of the grid.
///
/// Two grids are shape-compatible exactly when their shapes are equal.
///
/// # Examples
///
/// ```
/// use hexgrid_core::{Shape, Size};
///
/// let shape = Shape::new(Size::new(3, 3), false, false).unwrap();
/// // Odd lines are inset: (0,0) exists, (0,1) does not.
/// assert!(shape.is_valid_address(0, 0));
/// assert!(!shape.is_valid_address(0, 1));
/// assert!(shape.is_valid_address(1, 1));
/// assert_eq!(shape.cell_count(), 5);
///
/// // Edge lines add a ring of cells at -1 and at the nominal count.
/// let edged = Shape::new(Size::new(3, 3), false, true).unwrap();
/// assert_eq!(edged.total_size(), Size::new(5, 5));
/// assert!(edged.is_valid_address(-1, -1));
/// assert!(edged.is_valid_address(3, 3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    size: Size,
    inset_even_lines: bool,
    enable_edge_lines: bool,
    total_size: Size,
    cell_count: usize,
}

impl Shape {
    /// Largest nominal line count: with edge lines every index, `-1` through
    /// the count itself, must fit in `i32`.
    pub const MAX_LINES: u32 = i32::MAX as u32 - 2;

    /// A 0x0 shape with no cells.
    pub const EMPTY: Shape = Shape {
        size: Size::EMPTY,
        inset_even_lines: false,
        enable_edge_lines: false,
        total_size: Size::EMPTY,
        cell_count: 0,
    };

    /// Create a shape.
    ///
    /// Returns `Err(GridError::DimensionTooLarge)` if either count exceeds
    /// [`MAX_LINES`](Self::MAX_LINES).
    pub fn new(
        size: Size,
        inset_even_lines: bool,
        enable_edge_lines: bool,
    ) -> Result<Self, GridError> {
        if size.row_count > Self::MAX_LINES {
            return Err(GridError::DimensionTooLarge {
                name: "rows",
                value: size.row_count,
                max: Self::MAX_LINES,
            });
        }
        if size.column_count > Self::MAX_LINES {
            return Err(GridError::DimensionTooLarge {
                name: "columns",
                value: size.column_count,
                max: Self::MAX_LINES,
            });
        }
        let total_size = if enable_edge_lines {
            Size::new(size.row_count + 2, size.column_count + 2)
        } else {
            size
        };
        let rows = total_size.row_count as usize;
        let cols = total_size.column_count as usize;
        let cell_count = if inset_even_lines {
            large_half(rows) * small_half(cols) + small_half(rows) * large_half(cols)
        } else {
            large_half(rows) * large_half(cols) + small_half(rows) * small_half(cols)
        };
        Ok(Self {
            size,
            inset_even_lines,
            enable_edge_lines,
            total_size,
            cell_count,
        })
    }

    /// Shorthand for a shape with odd lines inset and no edge lines.
    pub fn of(row_count: u32, column_count: u32) -> Result<Self, GridError> {
        Self::new(Size::new(row_count, column_count), false, false)
    }

    /// Nominal rows and columns, as requested.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Whether even-indexed lines are the inset ones.
    pub fn inset_even_lines(&self) -> bool {
        self.inset_even_lines
    }

    /// Whether the extra ring of edge cells is present.
    pub fn enable_edge_lines(&self) -> bool {
        self.enable_edge_lines
    }

    /// `size`, or `size` plus two in each dimension with edge lines.
    pub fn total_size(&self) -> Size {
        self.total_size
    }

    /// Number of cells, from the staggered-count formula.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Whether the shape has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cell_count == 0
    }

    /// Smallest valid row or column index: `-1` with edge lines, else `0`.
    pub fn min_index(&self) -> i32 {
        if self.enable_edge_lines {
            -1
        } else {
            0
        }
    }

    /// Whether the line (row or column) at `index` is inset.
    ///
    /// Staggered grids are symmetric, so the same rule serves rows and
    /// columns.
    pub fn is_line_inset(&self, index: i32) -> bool {
        (index.rem_euclid(2) == 0) == self.inset_even_lines
    }

    /// First cross index on a line with the given insetness.
    pub fn cross_start_index(&self, is_inset: bool) -> i32 {
        match (is_inset, self.enable_edge_lines) {
            (true, true) => -1,
            (true, false) => 1,
            (false, _) => 0,
        }
    }

    /// Number of cells on a line with the given insetness, where
    /// `total_count` is the number of lines crossing it.
    pub fn cross_count(&self, is_inset: bool, total_count: u32) -> u32 {
        if is_inset == self.enable_edge_lines {
            large_half(total_count as usize) as u32
        } else {
            small_half(total_count as usize) as u32
        }
    }

    /// Whether `line` is a cell position along the perpendicular line
    /// `cross`, given `total_count` lines parallel to `line`.
    pub fn is_valid_line(&self, line: i32, cross: i32, total_count: u32) -> bool {
        let is_cross_inset = self.is_line_inset(cross);
        let offset = line as i64 - self.cross_start_index(is_cross_inset) as i64;
        if offset < 0 || offset % 2 != 0 {
            return false;
        }
        offset / 2 < self.cross_count(is_cross_inset, total_count) as i64
    }

    /// Whether `(row, column)` addresses a cell of this shape.
    pub fn is_valid_address(&self, row: i32, column: i32) -> bool {
        self.is_valid_line(row, column, self.total_size.row_count)
            && self.is_valid_line(column, row, self.total_size.column_count)
    }

    /// The address for `(row, column)` if it is valid.
    pub fn find_address(&self, row: i32, column: i32) -> Option<Address> {
        self.is_valid_address(row, column)
            .then(|| Address::new(row, column))
    }

    /// Check an address, producing the error used by every accessor.
    pub fn check_address(&self, address: Address) -> Result<(), GridError> {
        if self.is_valid_address(address.row, address.column) {
            Ok(())
        } else {
            Err(GridError::InvalidAddress {
                address,
                shape: *self,
            })
        }
    }

    /// First column index and cell count of the row at `row`.
    pub(crate) fn row_layout(&self, row: i32) -> (i32, usize) {
        let is_inset = self.is_line_inset(row);
        let start = self.cross_start_index(is_inset);
        let count = self.cross_count(is_inset, self.total_size.column_count);
        (start, count as usize)
    }

    /// Storage index of a row: rows are stored from `min_index` upward.
    pub(crate) fn row_slot(&self, row: i32) -> usize {
        (row - self.min_index()) as usize
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shape({}, inset {}, {})",
            self.size,
            if self.inset_even_lines { "even" } else { "odd" },
            if self.enable_edge_lines {
                "edge lines"
            } else {
                "no edge lines"
            }
        )
    }
}

/// `floor(n / 2)`.
pub(crate) fn small_half(n: usize) -> usize {
    n / 2
}

/// `ceil(n / 2)`.
pub(crate) fn large_half(n: usize) -> usize {
    n - n / 2
}
