//! Drawing sinks and styles.
//!
//! The layout engine never rasterizes anything itself. It hands paths,
//! colors and label text to a [`HexCanvas`], which a toolkit adapter
//! implements on top of its own canvas.

use kurbo::{Affine, BezPath, Point};

/// A packed `0xAARRGGBB` color, passed through to the canvas untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque mid gray.
    pub const GRAY: Self = Self(0xFF88_8888);

    /// Pack four channels.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// The alpha channel.
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

/// An opaque drawing sink.
///
/// Coordinates passed to the drawing methods are in the space set by the
/// most recent [`set_transform`](Self::set_transform); implementations map
/// them (and stroke widths) through that transform to device space.
pub trait HexCanvas {
    /// Replace the current grid-to-device transform.
    fn set_transform(&mut self, transform: Affine);

    /// Fill a closed path.
    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Stroke a path. A width of zero is a hairline.
    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);

    /// Draw `text` horizontally centered on `anchor.x` with its baseline at
    /// `anchor.y`.
    fn draw_text(&mut self, text: &str, anchor: Point, size: f64, color: Color);
}

/// Fill and outline for a single hexagon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexPaint {
    /// Interior color.
    pub fill: Color,
    /// Outline color.
    pub stroke: Color,
    /// Outline width; zero is a hairline.
    pub stroke_width: f64,
}

impl Default for HexPaint {
    fn default() -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 0.0,
        }
    }
}

/// Colors and labels used by [`HexLayout::draw_grid`](crate::HexLayout::draw_grid).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridStyle {
    /// Outline color of every visible cell.
    pub stroke_color: Color,
    /// Interior of visible, unselected cells.
    pub fill_color: Color,
    /// Interior of visible, selected cells.
    pub select_color: Color,
    /// Color of index labels.
    pub index_color: Color,
    /// Label each cell with its row.
    pub show_row_indices: bool,
    /// Label each cell with its column.
    pub show_column_indices: bool,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            fill_color: Color::TRANSPARENT,
            select_color: Color::GRAY,
            index_color: Color::BLACK,
            show_row_indices: false,
            show_column_indices: false,
        }
    }
}

impl GridStyle {
    /// The label for a cell, or `None` when no indices are shown.
    pub fn index_label(&self, row: i32, column: i32) -> Option<String> {
        match (self.show_row_indices, self.show_column_indices) {
            (true, true) => Some(format!("{row},{column}")),
            (true, false) => Some(row.to_string()),
            (false, true) => Some(column.to_string()),
            (false, false) => None,
        }
    }
}
