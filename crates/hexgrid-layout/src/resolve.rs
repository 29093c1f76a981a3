//! Hit-testing: device point to cell address.

use crate::layout::HexLayout;
use hexgrid_core::Address;
use kurbo::Point;

impl HexLayout {
    /// The address of the cell under the device point `(x, y)`.
    ///
    /// Returns `None` for points in the gaps of the staggered pattern,
    /// outside the grid, or on a degenerate layout. A point exactly on a
    /// shared edge resolves to the cell whose bounding box it falls in
    /// first along the major axis.
    pub fn resolve_address(&self, x: f64, y: f64) -> Option<Address> {
        let inverse = self.inverse?;
        let p = inverse * Point::new(x, y);
        if !(p.x.is_finite() && p.y.is_finite()) {
            return None;
        }

        let hex = &self.hexagon;
        let half_side = hex.half_side();
        let half_minor = hex.half_minor();
        let minor = hex.minor();
        let major_step = 3.0 * half_side;

        // Work in horizontal terms. One step of padding on each axis keeps
        // the edge-line indices non-negative; it is taken off at the end.
        let (along, across) = if hex.is_horizontal() {
            (p.x, p.y)
        } else {
            (p.y, p.x)
        };
        let point_major = major_step + along;
        let point_minor = half_minor + across;

        let major_floor = (point_major / major_step).floor();
        let mut index_major = line_index(major_floor)?;
        let coord_major = point_major - major_floor * major_step;

        let is_inset = self.shape.is_line_inset(index_major.rem_euclid(2) as i32);
        let inset_minor = point_minor + if is_inset { half_minor } else { 0.0 };
        let minor_floor = (inset_minor / minor).floor();
        let mut index_minor = 2 * line_index(minor_floor)? - i64::from(is_inset);
        let coord_minor = inset_minor - minor_floor * minor;

        // In the leading quarter of the box the slanted sides belong to
        // the previous line's cells.
        if coord_major < half_side {
            let on_top = coord_minor < half_minor;
            let slope = half_minor / half_side * if on_top { -1.0 } else { 1.0 };
            let edge = coord_minor - slope * coord_major - half_minor;
            if on_top && edge < 0.0 {
                index_major -= 1;
                index_minor -= 1;
            } else if !on_top && edge > 0.0 {
                index_major -= 1;
                index_minor += 1;
            }
        }

        index_major -= 1;
        index_minor -= 1;

        let (row, column) = if hex.is_horizontal() {
            (index_minor, index_major)
        } else {
            (index_major, index_minor)
        };
        let row = i32::try_from(row).ok()?;
        let column = i32::try_from(column).ok()?;
        self.shape.find_address(row, column)
    }
}

/// A floored line index, or `None` when it is far outside any grid.
fn line_index(floor: f64) -> Option<i64> {
    (floor.abs() <= f64::from(i32::MAX)).then_some(floor as i64)
}

#[cfg(test)]
mod tests {
    use crate::compliance;
    use crate::specs::{Constraints, CrossMode, FitMode, HexOrientation, Insets, LayoutSpecs};
    use crate::HexLayout;
    use hexgrid_core::{Address, Shape, Size};
    use proptest::prelude::*;

    fn layout(shape: Shape, specs: LayoutSpecs, constraints: Constraints) -> HexLayout {
        let mut layout = HexLayout::new(shape, specs);
        layout.calculate_size(&constraints).unwrap();
        layout
    }

    #[test]
    fn centers_round_trip_for_every_configuration() {
        for orientation in [HexOrientation::Horizontal, HexOrientation::Vertical] {
            for fit_mode in [FitMode::FitColumns, FitMode::FitRows] {
                for cross_mode in [CrossMode::AlignCenter, CrossMode::ScaleToFit] {
                    for inset_even in [false, true] {
                        for edges in [false, true] {
                            let shape =
                                Shape::new(Size::new(5, 6), inset_even, edges).unwrap();
                            let specs = LayoutSpecs {
                                fit_mode,
                                cross_mode,
                                hex_orientation: orientation,
                                stroke_width: 2.0,
                            };
                            let constraints = Constraints::exact(400.0, 300.0)
                                .with_insets(Insets::uniform(12.0));
                            compliance::assert_centers_resolve(&layout(
                                shape,
                                specs,
                                constraints,
                            ));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn points_far_outside_resolve_to_none() {
        let l = layout(
            Shape::new(Size::new(4, 4), false, true).unwrap(),
            LayoutSpecs::default(),
            Constraints::exact(200.0, 200.0),
        );
        for (x, y) in [
            (-500.0, -500.0),
            (-500.0, 100.0),
            (100.0, -500.0),
            (5000.0, 100.0),
            (100.0, 5000.0),
            (1e300, -1e300),
        ] {
            assert_eq!(l.resolve_address(x, y), None, "({x}, {y})");
        }
    }

    #[test]
    fn non_finite_points_resolve_to_none() {
        let l = layout(
            Shape::of(3, 3).unwrap(),
            LayoutSpecs::default(),
            Constraints::exact(100.0, 100.0),
        );
        assert_eq!(l.resolve_address(f64::NAN, 10.0), None);
        assert_eq!(l.resolve_address(10.0, f64::INFINITY), None);
    }

    #[test]
    fn degenerate_layout_resolves_nothing() {
        let l = layout(
            Shape::of(3, 3).unwrap(),
            LayoutSpecs::default(),
            Constraints::exact(0.0, 0.0),
        );
        assert_eq!(l.resolve_address(0.0, 0.0), None);
    }

    #[test]
    fn points_just_inside_each_vertex_resolve_to_that_cell() {
        let l = layout(
            Shape::of(5, 5).unwrap(),
            LayoutSpecs::default(),
            Constraints::exact(300.0, 300.0),
        );
        let address = Address::new(2, 2);
        let center = l.cell_bounds(address).center();
        let vertices = l
            .hexagon()
            .transformed_vertices(l.transform() * kurbo::Affine::translate(
                l.cell_rect(address).origin().to_vec2(),
            ));
        for v in vertices {
            let inside = v.lerp(center, 0.02);
            assert_eq!(l.resolve_address(inside.x, inside.y), Some(address), "{v:?}");
        }
    }

    proptest! {
        #[test]
        fn centers_round_trip_for_random_grids(
            rows in 1u32..9,
            cols in 1u32..9,
            inset_even in any::<bool>(),
            edges in any::<bool>(),
            vertical in any::<bool>(),
            fit_rows in any::<bool>(),
            width in 50.0f64..800.0,
            height in 50.0f64..800.0,
        ) {
            let shape = Shape::new(Size::new(rows, cols), inset_even, edges).unwrap();
            let specs = LayoutSpecs::default()
                .with_orientation(if vertical { HexOrientation::Vertical } else { HexOrientation::Horizontal })
                .with_fit_mode(if fit_rows { FitMode::FitRows } else { FitMode::FitColumns });
            let l = layout(shape, specs, Constraints::exact(width, height));
            compliance::assert_centers_resolve(&l);
        }
    }
}
