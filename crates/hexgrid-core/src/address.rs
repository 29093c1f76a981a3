//! Value types: grid [`Size`], cell [`Address`], cell [`State`] and [`Cell`].

use std::fmt;

/// Nominal grid shape in rows and columns.
///
/// A row or column here is a *line*: strictly collinear cells, not
/// necessarily adjacent ones. See the crate docs for the staggered layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Number of rows.
    pub row_count: u32,
    /// Number of columns.
    pub column_count: u32,
}

impl Size {
    /// The 0x0 size.
    pub const EMPTY: Size = Size::new(0, 0);

    /// Create a size of `row_count` rows by `column_count` columns.
    pub const fn new(row_count: u32, column_count: u32) -> Self {
        Self {
            row_count,
            column_count,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.row_count, self.column_count)
    }
}

/// Identifies one cell by `(row, column)`.
///
/// Addresses are structural values: two addresses with the same indices are
/// the same address. Not every integer pair is a valid address for a given
/// grid; check with [`Grid::find_address`](crate::Grid::find_address).
///
/// Ordering is row-major, matching grid iteration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    /// Row index. `-1` is valid only when edge lines are enabled.
    pub row: i32,
    /// Column index. `-1` is valid only when edge lines are enabled.
    pub column: i32,
}

impl Address {
    /// The origin cell address, `(0, 0)`.
    pub const ORIGIN: Address = Address::new(0, 0);

    /// Create an address from its indices.
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Whether this address has the given indices.
    pub fn is_at(&self, row: i32, column: i32) -> bool {
        self.row == row && self.column == column
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}

impl From<(i32, i32)> for Address {
    fn from((row, column): (i32, i32)) -> Self {
        Self::new(row, column)
    }
}

/// Per-cell flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    /// Whether the cell is drawn at all.
    pub is_visible: bool,
    /// Whether the cell is drawn with the selection color.
    pub is_selected: bool,
}

impl State {
    /// Visible and unselected: the initial state of every cell.
    pub const DEFAULT: State = State::new(true, false);

    /// Create a state from its flags.
    pub const fn new(is_visible: bool, is_selected: bool) -> Self {
        Self {
            is_visible,
            is_selected,
        }
    }

    /// This state with `is_visible` replaced.
    pub const fn with_visible(self, is_visible: bool) -> Self {
        Self { is_visible, ..self }
    }

    /// This state with `is_selected` replaced.
    pub const fn with_selected(self, is_selected: bool) -> Self {
        Self {
            is_selected,
            ..self
        }
    }

    /// This state with `is_selected` flipped.
    pub const fn toggled_selection(self) -> Self {
        self.with_selected(!self.is_selected)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |b: bool| if b { '+' } else { '-' };
        write!(
            f,
            "State(v{},s{})",
            flag(self.is_visible),
            flag(self.is_selected)
        )
    }
}

/// An address paired with the state it held when the cell was read.
///
/// Cells are copies: holding one never borrows grid storage, so a later
/// mutation of the grid is not reflected in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Where the cell is.
    pub address: Address,
    /// The cell's state at read time.
    pub state: State,
}

impl Cell {
    /// Pair an address with a state.
    pub const fn new(address: Address, state: State) -> Self {
        Self { address, state }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.address, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_visible_and_unselected() {
        assert_eq!(State::default(), State::new(true, false));
        assert_eq!(State::DEFAULT, State::default());
    }

    #[test]
    fn state_builders_touch_one_flag() {
        let s = State::DEFAULT.with_selected(true);
        assert!(s.is_visible && s.is_selected);
        let s = s.with_visible(false);
        assert!(!s.is_visible && s.is_selected);
        assert_eq!(s.toggled_selection(), State::new(false, false));
    }

    #[test]
    fn address_ordering_is_row_major() {
        let mut v = vec![
            Address::new(1, 0),
            Address::new(0, 2),
            Address::new(-1, 3),
            Address::new(0, 0),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                Address::new(-1, 3),
                Address::new(0, 0),
                Address::new(0, 2),
                Address::new(1, 0),
            ]
        );
    }

    #[test]
    fn display_formats() {
        assert_eq!(Address::new(-1, 4).to_string(), "(-1,4)");
        assert_eq!(State::DEFAULT.to_string(), "State(v+,s-)");
        assert_eq!(
            Cell::new(Address::ORIGIN, State::new(false, true)).to_string(),
            "(0,0)=State(v-,s+)"
        );
        assert_eq!(Size::new(2, 3).to_string(), "2x3");
    }

    #[test]
    fn address_from_tuple() {
        let a: Address = (2, 4).into();
        assert!(a.is_at(2, 4));
        assert!(!a.is_at(4, 2));
    }
}
