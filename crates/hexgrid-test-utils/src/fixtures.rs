//! Reusable shapes, specs and measured layouts.
//!
//! - [`shape_matrix`]: every inset and edge-line combination over a size range
//! - [`all_specs`]: every orientation, fit mode and cross mode
//! - [`measured`]: a layout already measured against constraints

use hexgrid_core::{Shape, Size};
use hexgrid_layout::{
    Constraints, CrossMode, FitMode, HexLayout, HexOrientation, LayoutSpecs,
};
use kurbo::Point;

/// Shapes for every `rows x columns` up to the given maxima (inclusive),
/// with each of the four inset/edge-line combinations.
pub fn shape_matrix(max_rows: u32, max_columns: u32) -> Vec<Shape> {
    let mut shapes = Vec::new();
    for rows in 0..=max_rows {
        for columns in 0..=max_columns {
            for inset_even in [false, true] {
                for edges in [false, true] {
                    if let Ok(shape) = Shape::new(Size::new(rows, columns), inset_even, edges) {
                        shapes.push(shape);
                    }
                }
            }
        }
    }
    shapes
}

/// Specs for every orientation, fit mode and cross mode, with the given
/// stroke width.
pub fn all_specs(stroke_width: f64) -> Vec<LayoutSpecs> {
    let mut specs = Vec::new();
    for hex_orientation in [HexOrientation::Horizontal, HexOrientation::Vertical] {
        for fit_mode in [FitMode::FitColumns, FitMode::FitRows] {
            for cross_mode in [
                CrossMode::AlignStart,
                CrossMode::AlignCenter,
                CrossMode::AlignEnd,
                CrossMode::ScaleToFit,
            ] {
                specs.push(LayoutSpecs {
                    fit_mode,
                    cross_mode,
                    hex_orientation,
                    stroke_width,
                });
            }
        }
    }
    specs
}

/// A layout for `shape` measured against `constraints`.
///
/// Panics if the constraints are rejected.
pub fn measured(shape: Shape, specs: LayoutSpecs, constraints: Constraints) -> HexLayout {
    let mut layout = HexLayout::new(shape, specs);
    if let Err(e) = layout.calculate_size(&constraints) {
        panic!("layout rejected {constraints:?}: {e}");
    }
    layout
}

/// Whether two points agree to within `tolerance` on both axes.
pub fn points_close(a: Point, b: Point, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
}
