use hexgrid_core::{Address, ArrayGrid, Grid, MutableGrid, Shape, Size, State};
use hexgrid_layout::{
    Color, Constraints, CrossMode, FitMode, GridStyle, HexLayout, HexOrientation, Insets,
    LayoutSpecs, SQRT_3,
};
use hexgrid_test_utils::fixtures::{all_specs, measured, points_close, shape_matrix};
use hexgrid_test_utils::{DrawOp, MockGrid, RecordingCanvas};
use kurbo::{Affine, Point};

#[test]
fn five_by_five_centered_in_three_hundred_square() {
    let shape = Shape::new(Size::new(5, 5), true, false).unwrap();
    let specs = LayoutSpecs {
        fit_mode: FitMode::FitColumns,
        cross_mode: CrossMode::AlignCenter,
        hex_orientation: HexOrientation::Horizontal,
        stroke_width: 0.0,
    };
    let mut first = HexLayout::new(shape, specs);
    let size = first.calculate_size(&Constraints::exact(300.0, 300.0)).unwrap();
    assert_eq!((size.width, size.height), (300.0, 300.0));

    let fit_dimension = 300.0 - 2.0 / SQRT_3;
    assert_eq!(first.side_length(), fit_dimension * 2.0 / (3.0 * 5.0 + 1.0));

    // Same inputs, same result.
    let mut second = HexLayout::new(shape, specs);
    assert_eq!(
        second.calculate_size(&Constraints::exact(300.0, 300.0)).unwrap(),
        size
    );
    assert_eq!(second.transform(), first.transform());
}

#[test]
fn every_spec_and_shape_round_trips_cell_centers() {
    let constraints = Constraints::exact(360.0, 270.0).with_insets(Insets {
        left: 4.0,
        top: 9.0,
        right: 0.0,
        bottom: 6.0,
    });
    for specs in all_specs(1.5) {
        for shape in shape_matrix(4, 4) {
            let layout = measured(shape, specs, constraints);
            let grid = ArrayGrid::new(shape);
            for address in grid.addresses() {
                let center = layout.cell_bounds(address).center();
                assert_eq!(
                    layout.resolve_address(center.x, center.y),
                    Some(address),
                    "{address} in {shape} with {specs:?}"
                );
            }
        }
    }
}

#[test]
fn wrap_content_height_grows_with_rows() {
    let specs = LayoutSpecs::default();
    let mut heights = Vec::new();
    for rows in [2, 4, 8] {
        let shape = Shape::of(rows, 5).unwrap();
        let mut layout = HexLayout::new(shape, specs);
        let size = layout
            .calculate_size(&Constraints::wrap_height(300.0, 10_000.0))
            .unwrap();
        assert_eq!(size.width, 300.0);
        heights.push(size.height);
    }
    assert!(heights.windows(2).all(|w| w[0] < w[1]), "{heights:?}");
}

#[test]
fn draw_grid_fills_visible_cells_in_grid_order() {
    let shape = Shape::of(3, 3).unwrap();
    let mut grid = ArrayGrid::new(shape);
    grid.set(Address::new(1, 1), State::new(true, true)).unwrap();
    grid.set(Address::new(2, 2), State::new(false, false)).unwrap();

    let layout = measured(shape, LayoutSpecs::default(), Constraints::exact(120.0, 120.0));
    let style = GridStyle {
        fill_color: Color::WHITE,
        select_color: Color(0xFF00_80FF),
        ..GridStyle::default()
    };
    let mut canvas = RecordingCanvas::new();
    layout.draw_grid(&grid, &style, &mut canvas);

    assert_eq!(canvas.ops.first(), Some(&DrawOp::Transform(layout.transform())));
    assert_eq!(canvas.ops.last(), Some(&DrawOp::Transform(Affine::IDENTITY)));

    let fills: Vec<Color> = canvas.fills().map(|(_, c)| c).collect();
    assert_eq!(
        fills,
        vec![Color::WHITE, Color::WHITE, Color(0xFF00_80FF), Color::WHITE]
    );
    assert_eq!(canvas.strokes().count(), 4);
    assert!(canvas.strokes().all(|(_, c, w)| c == Color::BLACK && w == 0.0));

    // Fills are in grid space: their centers are the cell rect centers.
    let visible: Vec<Address> = grid
        .cells()
        .filter(|c| c.state.is_visible)
        .map(|c| c.address)
        .collect();
    for (center, address) in canvas.fill_centers().into_iter().zip(visible) {
        assert!(points_close(center, layout.cell_rect(address).center(), 1e-9));
    }
}

#[test]
fn draw_grid_labels_every_cell_including_hidden_ones() {
    let shape = Shape::of(2, 3).unwrap();
    let mut grid = MockGrid::new(shape);
    grid.set_state(Address::new(0, 2), State::new(false, false));
    let layout = measured(shape, LayoutSpecs::default(), Constraints::exact(90.0, 90.0));
    let style = GridStyle {
        show_row_indices: true,
        show_column_indices: true,
        index_color: Color::GRAY,
        ..GridStyle::default()
    };
    let mut canvas = RecordingCanvas::new();
    layout.draw_grid(&grid, &style, &mut canvas);

    let labels: Vec<&str> = canvas.texts().collect();
    assert_eq!(labels, vec!["0,0", "0,2", "1,1"]);
    assert_eq!(canvas.fills().count(), 2);

    let cell = layout.cell_rect(Address::new(1, 1));
    let text = canvas.ops.iter().find_map(|op| match op {
        DrawOp::Text {
            text,
            anchor,
            size,
            color,
        } if text == "1,1" => Some((*anchor, *size, *color)),
        _ => None,
    });
    let (anchor, size, color) = text.unwrap();
    assert_eq!(color, Color::GRAY);
    assert!((size - cell.height() / 3.0).abs() < 1e-9);
    assert!(points_close(
        anchor,
        Point::new(cell.center().x, cell.center().y + size / 3.0),
        1e-9
    ));
}

#[test]
fn degenerate_layout_draws_nothing() {
    let shape = Shape::of(3, 3).unwrap();
    let layout = measured(shape, LayoutSpecs::default(), Constraints::exact(0.0, 0.0));
    let mut canvas = RecordingCanvas::new();
    layout.draw_grid(&ArrayGrid::new(shape), &GridStyle::default(), &mut canvas);
    assert!(canvas.ops.is_empty());
}

#[test]
fn cell_path_matches_drawn_outline_in_device_space() {
    let shape = Shape::of(3, 4).unwrap();
    let layout = measured(
        shape,
        LayoutSpecs::default().with_orientation(HexOrientation::Vertical),
        Constraints::exact(200.0, 260.0),
    );
    let mut canvas = RecordingCanvas::new();
    layout.draw_grid(&ArrayGrid::new(shape), &GridStyle::default(), &mut canvas);
    let (drawn, _) = canvas.fills().next().unwrap();
    let mut device = drawn.clone();
    device.apply_affine(layout.transform());
    let expected = layout.cell_path(Address::ORIGIN);
    for (a, b) in device.elements().iter().zip(expected.elements()) {
        for (p, q) in a.end_point().into_iter().zip(b.end_point()) {
            assert!(points_close(p, q, 1e-9));
        }
    }
}
