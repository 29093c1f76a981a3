//! Sizing helpers relating hexagon edge length, line counts and space.
//!
//! A "line" here is a set of collinear cells, not necessarily contiguous
//! ones. Along a hexagon's major axis consecutive lines advance by
//! three half-edges; along the minor axis they advance by half a minor axis.
//!
//! Every function returns zero instead of a negative or non-finite result.

use crate::hexagon::SQRT_3;
use crate::specs::HexOrientation;
use kurbo::Size;

/// Edge length that fits `line_count` lines into `available`, with `margin`
/// between neighbouring cells.
///
/// `is_major` says whether `available` runs along the hexagons' major axis.
pub fn hex_edge_for_line_count(line_count: u32, available: f64, margin: f64, is_major: bool) -> f64 {
    let n = f64::from(line_count);
    let gaps = n - 1.0;
    let edge = if is_major {
        let d = available - gaps * margin;
        2.0 * d / (3.0 * n + 1.0)
    } else {
        let d = available - gaps / 2.0 * margin;
        2.0 / SQRT_3 * d / (n + 1.0)
    };
    non_negative(edge)
}

/// How many lines of hexagons with `hex_edge` edges fit into `available`.
pub fn line_count_for_hex_edge(hex_edge: f64, available: f64, margin: f64, is_major: bool) -> u32 {
    let (num, den) = if is_major {
        (
            2.0 * available + 2.0 * margin - hex_edge,
            2.0 * margin + 3.0 * hex_edge,
        )
    } else {
        (
            SQRT_3 * available + SQRT_3 * margin - 3.0 * hex_edge,
            SQRT_3 * margin + 3.0 * hex_edge,
        )
    };
    let count = num / den;
    if count.is_finite() && count > 0.0 {
        // Float-to-int casts saturate, which is the clamp wanted here.
        count as u32
    } else {
        0
    }
}

/// Bounding box of a hexagon with `hex_edge` edges.
pub fn hex_size_for_hex_edge(hex_edge: f64, orientation: HexOrientation) -> Size {
    let edge = non_negative(hex_edge);
    match orientation {
        HexOrientation::Horizontal => Size::new(2.0 * edge, SQRT_3 * edge),
        HexOrientation::Vertical => Size::new(SQRT_3 * edge, 2.0 * edge),
    }
}

/// Bounding box of the hexagons in a grid of `line_count` lines across
/// `available`. See [`hex_edge_for_line_count`].
pub fn hex_size_for_line_count(
    line_count: u32,
    orientation: HexOrientation,
    available: f64,
    margin: f64,
    is_major: bool,
) -> Size {
    hex_size_for_hex_edge(
        hex_edge_for_line_count(line_count, available, margin, is_major),
        orientation,
    )
}

/// The largest grid of `hex_edge` hexagons that fits in `available`.
pub fn grid_size_for_hex_edge(
    available: Size,
    hex_edge: f64,
    margin: f64,
    orientation: HexOrientation,
) -> hexgrid_core::Size {
    let horizontal = orientation.is_horizontal();
    hexgrid_core::Size::new(
        line_count_for_hex_edge(hex_edge, available.height, margin, !horizontal),
        line_count_for_hex_edge(hex_edge, available.width, margin, horizontal),
    )
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
