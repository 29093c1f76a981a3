//! The layout engine: hexagon size, content size and the grid transform.
//!
//! # Grid space
//!
//! Cells are placed on a lattice of half-steps. For horizontal hexagons the
//! cell at `(row, column)` has its bounding box at
//! `(column * 3s/2, row * m/2)`, where `s` is the side and `m` the minor
//! axis; vertical hexagons transpose that. Valid addresses interleave, so
//! neighbouring boxes overlap only where the hexagons tessellate.
//!
//! Edge lines sit at indices `-1` and `count`, outside the fitted area.
//!
//! # Device space
//!
//! [`HexLayout::transform`] maps grid space into the container, accounting
//! for insets, half a line of stroke margin, and the cross-axis policy.

use crate::error::LayoutError;
use crate::hexagon::{Hexagon, SQRT_3};
use crate::render::{GridStyle, HexCanvas, HexPaint};
use crate::specs::{Constraints, CrossMode, FitMode, LayoutSpecs};
use hexgrid_core::{Address, Grid, Shape};
use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};
use tracing::debug;

/// The part of the last [`Constraints`] that later recalculations reuse.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Measure {
    is_wrap_content: bool,
    constraints: Constraints,
}

/// Computes and caches the geometry of a grid inside a container.
///
/// Changing the shape or specs recalculates against the last constraints;
/// [`calculate_size`](Self::calculate_size) supplies new ones.
///
/// # Examples
///
/// ```
/// use hexgrid_core::{Address, Shape};
/// use hexgrid_layout::{Constraints, HexLayout, LayoutSpecs};
///
/// let mut layout = HexLayout::new(Shape::of(5, 5).unwrap(), LayoutSpecs::default());
/// let size = layout.calculate_size(&Constraints::exact(300.0, 300.0)).unwrap();
/// assert_eq!((size.width, size.height), (300.0, 300.0));
///
/// let center = layout.cell_bounds(Address::new(2, 2)).center();
/// assert_eq!(layout.resolve_address(center.x, center.y), Some(Address::new(2, 2)));
/// ```
#[derive(Clone, Debug)]
pub struct HexLayout {
    pub(crate) shape: Shape,
    specs: LayoutSpecs,
    pub(crate) hexagon: Hexagon,
    measure: Measure,
    cell_size: Size,
    step_size: Vec2,
    content_size: Size,
    transform: Affine,
    pub(crate) inverse: Option<Affine>,
}

impl HexLayout {
    /// A layout for `shape` that has not been measured yet.
    ///
    /// Until [`calculate_size`](Self::calculate_size) runs, the geometry is
    /// the zero layout.
    pub fn new(shape: Shape, specs: LayoutSpecs) -> Self {
        let mut layout = Self {
            shape,
            specs,
            hexagon: Hexagon::new(specs.hex_orientation),
            measure: Measure::default(),
            cell_size: Size::ZERO,
            step_size: Vec2::ZERO,
            content_size: Size::ZERO,
            transform: Affine::IDENTITY,
            inverse: None,
        };
        layout.calculate();
        layout
    }

    /// The grid shape being laid out.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Replace the shape and recalculate. Returns `false` if unchanged.
    pub fn set_shape(&mut self, shape: Shape) -> bool {
        if self.shape == shape {
            return false;
        }
        self.shape = shape;
        self.calculate();
        true
    }

    /// The layout policy.
    pub fn specs(&self) -> &LayoutSpecs {
        &self.specs
    }

    /// Replace the layout policy and recalculate. Returns `false` if
    /// unchanged.
    pub fn set_specs(&mut self, specs: LayoutSpecs) -> bool {
        if self.specs == specs {
            return false;
        }
        self.specs = specs;
        self.hexagon.set_orientation(specs.hex_orientation);
        self.calculate();
        true
    }

    /// Measure against `constraints` and return the size the grid wants.
    ///
    /// The wrap-content axis reports the content size plus insets, rounded
    /// to the nearest integer. Every other axis reports the available size.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnboundedFitDimension`] if the fitted axis has no
    /// maximum, and [`LayoutError::UnboundedScaleDimension`] if scale-to-fit
    /// is requested without a maximum on the cross axis.
    pub fn calculate_size(&mut self, constraints: &Constraints) -> Result<Size, LayoutError> {
        let fit_mode = self.specs.fit_mode;
        let is_fit_columns = fit_mode.is_fit_columns();
        let (fit_bounded, cross_bounded) = if is_fit_columns {
            (constraints.has_bounded_width, constraints.has_bounded_height)
        } else {
            (constraints.has_bounded_height, constraints.has_bounded_width)
        };
        if !fit_bounded {
            return Err(LayoutError::UnboundedFitDimension { fit_mode });
        }
        if self.specs.cross_mode == CrossMode::ScaleToFit && !cross_bounded {
            return Err(LayoutError::UnboundedScaleDimension { fit_mode });
        }

        let is_wrap_content = constraints.is_wrap_content(fit_mode);
        self.measure = Measure {
            is_wrap_content,
            constraints: *constraints,
        };
        self.calculate();

        let insets = &constraints.insets;
        let mut size = Size::new(constraints.available_width, constraints.available_height);
        if is_wrap_content {
            if is_fit_columns {
                size.height = (self.content_size.height + insets.vertical()).round();
            } else {
                size.width = (self.content_size.width + insets.horizontal()).round();
            }
        }
        Ok(size)
    }

    fn calculate(&mut self) {
        let Measure {
            is_wrap_content,
            constraints: c,
        } = self.measure;
        let is_horizontal = self.hexagon.is_horizontal();
        let is_fit_columns = self.specs.fit_mode == FitMode::FitColumns;
        let is_fit_major = is_fit_columns == is_horizontal;

        let thickness_minor = self.specs.stroke_width.max(1.0);
        let thickness_major = 2.0 / SQRT_3 * thickness_minor;
        let (fit_thickness, cross_thickness) = if is_fit_major {
            (thickness_major, thickness_minor)
        } else {
            (thickness_minor, thickness_major)
        };

        let max_width = c.available_width - c.insets.horizontal();
        let max_height = c.available_height - c.insets.vertical();
        let size = self.shape.size();
        let (fit_count, cross_count, fit_max) = if is_fit_columns {
            (size.column_count, size.row_count, max_width)
        } else {
            (size.row_count, size.column_count, max_height)
        };
        let (fit_count, cross_count) = (f64::from(fit_count), f64::from(cross_count));

        let fit_dimension = fit_max - fit_thickness;
        let side = if is_fit_major {
            fit_dimension * 2.0 / (3.0 * fit_count + 1.0)
        } else {
            fit_dimension * 2.0 / SQRT_3 / (fit_count + 1.0)
        };

        if !(side.is_finite() && side > 0.0) {
            self.zero_layout();
            debug!(shape = %self.shape, side, "hex layout degenerate, using zero layout");
            return;
        }
        let is_scaled = !is_wrap_content && self.specs.cross_mode == CrossMode::ScaleToFit;
        if is_scaled && !(max_width > 0.0 && max_height > 0.0) {
            self.zero_layout();
            debug!(
                shape = %self.shape,
                max_width,
                max_height,
                "no room to scale into, using zero layout"
            );
            return;
        }

        self.hexagon.set_side_length(side);
        let hex = &self.hexagon;
        if is_horizontal {
            self.cell_size = Size::new(2.0 * hex.side(), hex.minor());
            self.step_size = Vec2::new(3.0 * hex.half_side(), hex.half_minor());
        } else {
            self.cell_size = Size::new(hex.minor(), 2.0 * hex.side());
            self.step_size = Vec2::new(hex.half_minor(), 3.0 * hex.half_side());
        }

        let cross_dimension = if is_fit_major {
            side * SQRT_3 / 2.0 * (cross_count + 1.0)
        } else {
            side * (3.0 * cross_count + 1.0) / 2.0
        };

        let (margin_x, margin_y);
        if is_fit_columns {
            margin_x = fit_thickness / 2.0;
            margin_y = cross_thickness / 2.0;
            self.content_size = Size::new(
                fit_dimension + fit_thickness,
                cross_dimension + cross_thickness,
            );
        } else {
            margin_x = cross_thickness / 2.0;
            margin_y = fit_thickness / 2.0;
            self.content_size = Size::new(
                cross_dimension + cross_thickness,
                fit_dimension + fit_thickness,
            );
        }

        let content = self.content_size;
        let inset = Vec2::new(c.insets.left, c.insets.top);
        let margin = Vec2::new(margin_x, margin_y);
        let slack = Vec2::new(max_width - content.width, max_height - content.height);
        self.transform = match (is_wrap_content, self.specs.cross_mode) {
            (true, _) | (false, CrossMode::AlignStart) => Affine::translate(inset + margin),
            (false, CrossMode::AlignCenter) => Affine::translate(inset + margin + slack / 2.0),
            (false, CrossMode::AlignEnd) => Affine::translate(inset + margin + slack),
            (false, CrossMode::ScaleToFit) => {
                Affine::translate(inset)
                    * Affine::scale_non_uniform(
                        max_width / content.width,
                        max_height / content.height,
                    )
                    * Affine::translate(margin)
            }
        };
        self.inverse = invertible(self.transform).then(|| self.transform.inverse());

        debug!(
            shape = %self.shape,
            side,
            width = content.width,
            height = content.height,
            "hex layout recalculated"
        );
    }

    fn zero_layout(&mut self) {
        self.hexagon.set_side_length(0.0);
        self.cell_size = Size::ZERO;
        self.step_size = Vec2::ZERO;
        self.content_size = Size::ZERO;
        self.transform = Affine::IDENTITY;
        self.inverse = None;
    }

    /// The hexagon every cell is drawn with.
    pub fn hexagon(&self) -> &Hexagon {
        &self.hexagon
    }

    /// Hexagon side length; zero for a degenerate layout.
    pub fn side_length(&self) -> f64 {
        self.hexagon.side()
    }

    /// Bounding box of one cell, in grid space.
    pub fn cell_size(&self) -> Size {
        self.cell_size
    }

    /// Offset between adjacent row and column indices, in grid space.
    pub fn step_size(&self) -> Vec2 {
        self.step_size
    }

    /// Grid size including stroke margins, in grid space.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Grid space to device space.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Device space to grid space, or `None` for a degenerate layout.
    pub fn inverse_transform(&self) -> Option<Affine> {
        self.inverse
    }

    /// Whether the last measurement sized the cross axis to the content.
    pub fn is_wrap_content(&self) -> bool {
        self.measure.is_wrap_content
    }

    /// The cell's bounding box in grid space.
    ///
    /// Any address has a position; validity is not checked.
    pub fn cell_rect(&self, address: Address) -> Rect {
        let origin = Point::new(
            f64::from(address.column) * self.step_size.x,
            f64::from(address.row) * self.step_size.y,
        );
        Rect::from_origin_size(origin, self.cell_size)
    }

    /// The cell's bounding box in device space.
    pub fn cell_bounds(&self, address: Address) -> Rect {
        self.transform.transform_rect_bbox(self.cell_rect(address))
    }

    /// Integral device bounds for content placed inside a cell.
    ///
    /// The cell bounds are rounded out to whole units, then shrunk by
    /// `inset` across the minor axis and by `2/sqrt(3) * inset` along the
    /// major axis, which keeps a uniform gap to the slanted sides.
    pub fn cell_item_bounds(&self, address: Address, inset: f64) -> Rect {
        let major_inset = 2.0 / SQRT_3 * inset;
        let (inset_x, inset_y) = if self.hexagon.is_horizontal() {
            (major_inset, inset)
        } else {
            (inset, major_inset)
        };
        let bounds = self.cell_bounds(address).expand();
        Rect::new(
            (bounds.x0 + inset_x).floor(),
            (bounds.y0 + inset_y).floor(),
            (bounds.x1 - inset_x).ceil(),
            (bounds.y1 - inset_y).ceil(),
        )
    }

    /// The hexagon outline stretched to fill `bounds`.
    ///
    /// Returns an empty path for a degenerate layout.
    pub fn hexagon_path(&self, bounds: Rect) -> BezPath {
        if self.cell_size.is_zero_area() {
            return BezPath::new();
        }
        let fill = Affine::translate(bounds.origin().to_vec2())
            * Affine::scale_non_uniform(
                bounds.width() / self.cell_size.width,
                bounds.height() / self.cell_size.height,
            );
        self.hexagon.path_with(fill)
    }

    /// The outline of the hexagon at `address`, in device space.
    pub fn cell_path(&self, address: Address) -> BezPath {
        if self.cell_size.is_zero_area() {
            return BezPath::new();
        }
        let origin = self.cell_rect(address).origin().to_vec2();
        self.hexagon
            .path_with(self.transform * Affine::translate(origin))
    }

    /// Draw every visible cell of `grid`, then index labels if enabled.
    ///
    /// The canvas transform is set to [`transform`](Self::transform) for
    /// the duration of the call and reset to identity afterwards.
    pub fn draw_grid(&self, grid: &dyn Grid, style: &GridStyle, canvas: &mut dyn HexCanvas) {
        if self.cell_size.is_zero_area() {
            return;
        }
        canvas.set_transform(self.transform);
        let stroke_width = self.specs.stroke_width;
        grid.for_each(&mut |address, state| {
            let rect = self.cell_rect(address);
            if state.is_visible {
                let paint = HexPaint {
                    fill: if state.is_selected {
                        style.select_color
                    } else {
                        style.fill_color
                    },
                    stroke: style.stroke_color,
                    stroke_width,
                };
                self.hexagon.draw(canvas, rect.origin(), &paint);
            }
            if let Some(label) = style.index_label(address.row, address.column) {
                let text_size = rect.height() / 3.0;
                let center = rect.center();
                let anchor = Point::new(center.x, center.y + text_size / 3.0);
                canvas.draw_text(&label, anchor, text_size, style.index_color);
            }
        });
        canvas.set_transform(Affine::IDENTITY);
    }
}

fn invertible(transform: Affine) -> bool {
    let det = transform.determinant();
    det.is_finite() && det != 0.0
}
