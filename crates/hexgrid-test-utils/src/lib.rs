//! Test utilities and mock types for hexgrid development.
//!
//! Provides a map-backed [`MockGrid`] that implements the core [`Grid`]
//! trait independently of the real backends, and a [`RecordingCanvas`] that
//! captures every drawing call for assertions.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;

use hexgrid_core::{Address, Cell, Cells, Grid, GridError, Shape, State, StateMap};
use hexgrid_layout::{Color, HexCanvas};
use kurbo::{Affine, BezPath, Point, Shape as _};

/// A [`Grid`] backed by a `HashMap`, with no structural sharing.
///
/// Cells absent from the map read as [`State::DEFAULT`]. Iteration order
/// comes from [`Shape::find_address`] rather than any backend storage, so
/// comparing a backend against it exercises the backend's own ordering.
#[derive(Clone, Debug, PartialEq)]
pub struct MockGrid {
    shape: Shape,
    states: HashMap<Address, State>,
}

impl MockGrid {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            states: HashMap::new(),
        }
    }

    /// Pre-populate a state. Panics on an invalid address.
    pub fn set_state(&mut self, address: Address, state: State) {
        assert!(
            self.shape.is_valid_address(address.row, address.column),
            "{address} is not a cell of {}",
            self.shape
        );
        self.states.insert(address, state);
    }

    fn ordered(&self) -> Vec<Cell> {
        let min = self.shape.min_index();
        let total = self.shape.total_size();
        let mut cells = Vec::with_capacity(self.shape.cell_count());
        for row in min..min + total.row_count as i32 {
            for column in min..min + total.column_count as i32 {
                if let Some(address) = self.shape.find_address(row, column) {
                    let state = self.states.get(&address).copied().unwrap_or_default();
                    cells.push(Cell::new(address, state));
                }
            }
        }
        cells
    }
}

impl Grid for MockGrid {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn lookup(&self, row: i32, column: i32) -> Option<State> {
        let address = self.shape.find_address(row, column)?;
        Some(self.states.get(&address).copied().unwrap_or_default())
    }

    fn cells(&self) -> Cells<'_> {
        let cells = self.ordered();
        let count = cells.len();
        Cells::new(cells.into_iter(), count)
    }

    fn copy(&self, address: Address, state: State) -> Result<Self, GridError> {
        self.shape.check_address(address)?;
        let mut next = self.clone();
        next.states.insert(address, state);
        Ok(next)
    }

    fn copy_with(&self, changes: &StateMap) -> Result<Self, GridError> {
        for address in changes.keys() {
            self.shape.check_address(*address)?;
        }
        let mut next = self.clone();
        next.states
            .extend(changes.iter().map(|(address, state)| (*address, *state)));
        Ok(next)
    }
}

/// One captured drawing call, in device-independent grid coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Transform(Affine),
    Fill { path: BezPath, color: Color },
    Stroke { path: BezPath, color: Color, width: f64 },
    Text { text: String, anchor: Point, size: f64, color: Color },
}

/// A [`HexCanvas`] that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fill, in call order.
    pub fn fills(&self) -> impl Iterator<Item = (&BezPath, Color)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Fill { path, color } => Some((path, *color)),
            _ => None,
        })
    }

    /// Every stroke, in call order.
    pub fn strokes(&self) -> impl Iterator<Item = (&BezPath, Color, f64)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Stroke { path, color, width } => Some((path, *color, *width)),
            _ => None,
        })
    }

    /// Every label, in call order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Center of each filled path's bounding box, in call order.
    pub fn fill_centers(&self) -> Vec<Point> {
        self.fills().map(|(path, _)| path.bounding_box().center()).collect()
    }
}

impl HexCanvas for RecordingCanvas {
    fn set_transform(&mut self, transform: Affine) {
        self.ops.push(DrawOp::Transform(transform));
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.ops.push(DrawOp::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        self.ops.push(DrawOp::Stroke {
            path: path.clone(),
            color,
            width,
        });
    }

    fn draw_text(&mut self, text: &str, anchor: Point, size: f64, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            anchor,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexgrid_core::{ArrayGrid, MutableGrid, Size};

    #[test]
    fn mock_agrees_with_array_grid() {
        for shape in fixtures::shape_matrix(4, 5) {
            let mut mock = MockGrid::new(shape);
            let mut array = ArrayGrid::new(shape);
            for (i, address) in array.addresses().collect::<Vec<_>>().into_iter().enumerate() {
                let state = State::new(i % 3 != 0, i % 2 == 0);
                mock.set_state(address, state);
                array.set(address, state).unwrap();
            }
            assert!(mock.content_eq(&array), "{shape}");
            assert_eq!(
                mock.cells().collect::<Vec<_>>(),
                array.cells().collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn mock_copy_rejects_invalid_addresses() {
        let shape = Shape::new(Size::new(3, 3), false, false).unwrap();
        let mock = MockGrid::new(shape);
        assert!(mock.copy(Address::new(0, 1), State::DEFAULT).is_err());
        let next = mock.copy(Address::new(1, 1), State::new(true, true)).unwrap();
        assert_eq!(next.get(Address::new(1, 1)).unwrap(), State::new(true, true));
        assert_eq!(mock.get(Address::new(1, 1)).unwrap(), State::DEFAULT);
    }

    #[test]
    fn recording_canvas_keeps_call_order() {
        let mut canvas = RecordingCanvas::new();
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((4.0, 2.0));
        canvas.set_transform(Affine::scale(2.0));
        canvas.fill_path(&path, Color::WHITE);
        canvas.stroke_path(&path, Color::BLACK, 1.5);
        canvas.draw_text("0,0", Point::new(1.0, 1.0), 3.0, Color::GRAY);
        assert_eq!(canvas.ops.len(), 4);
        assert_eq!(canvas.fill_centers(), vec![Point::new(2.0, 1.0)]);
        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["0,0"]);
        assert_eq!(canvas.strokes().next().map(|(_, _, w)| w), Some(1.5));
    }
}
