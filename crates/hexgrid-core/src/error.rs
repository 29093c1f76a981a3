//! Error types for grid construction and cell access.

use crate::address::Address;
use crate::shape::Shape;
use std::error::Error;
use std::fmt;

/// Errors arising from grid construction or cell access.
///
/// Every variant is a caller precondition violation. Nothing here is
/// transient, so callers should validate with
/// [`Grid::find_address`](crate::Grid::find_address) or
/// [`Grid::is_valid_address`](crate::Grid::is_valid_address) rather than
/// retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The `(row, column)` pair is not a cell of the grid's staggered layout.
    InvalidAddress {
        /// The offending address.
        address: Address,
        /// Shape of the grid the address was checked against.
        shape: Shape,
    },
    /// A requested dimension does not fit the signed index space.
    DimensionTooLarge {
        /// Which dimension overflowed (`"rows"` or `"columns"`).
        name: &'static str,
        /// The requested value.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },
    /// A shared-grid update produced a grid of a different shape.
    ShapeMismatch {
        /// Shape of the shared grid.
        expected: Shape,
        /// Shape of the grid the update returned.
        found: Shape,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress { address, shape } => {
                write!(f, "invalid address {address} for {shape}")
            }
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} count {value} exceeds maximum {max}")
            }
            Self::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch: expected {expected}, found {found}")
            }
        }
    }
}

impl Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Size;

    #[test]
    fn invalid_address_display_names_the_address_and_shape() {
        let shape = Shape::new(Size::new(3, 4), true, false).unwrap();
        let err = GridError::InvalidAddress {
            address: Address::new(0, 1),
            shape,
        };
        assert_eq!(
            err.to_string(),
            "invalid address (0,1) for Shape(3x4, inset even, no edge lines)"
        );
    }

    #[test]
    fn dimension_too_large_display() {
        let err = GridError::DimensionTooLarge {
            name: "rows",
            value: 7,
            max: 5,
        };
        assert_eq!(err.to_string(), "rows count 7 exceeds maximum 5");
    }
}
