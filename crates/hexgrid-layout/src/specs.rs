//! Layout configuration: fit and cross policies, orientation, stroke width,
//! and the measurement constraints handed down by a container.

/// Which grid axis determines the hexagon size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitMode {
    /// Columns span the available width.
    #[default]
    FitColumns,
    /// Rows span the available height.
    FitRows,
}

impl FitMode {
    /// Whether columns determine the size.
    pub fn is_fit_columns(self) -> bool {
        self == Self::FitColumns
    }
}

/// What happens along the axis that is not fitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CrossMode {
    /// Place the grid at the start of the cross axis.
    AlignStart,
    /// Center the grid on both axes.
    #[default]
    AlignCenter,
    /// Place the grid at the end of the cross axis.
    AlignEnd,
    /// Stretch the grid to fill both axes, distorting the hexagons.
    ScaleToFit,
}

/// Hexagon orientation.
///
/// A horizontal hexagon has its long diagonal along x and flat top and
/// bottom edges; a vertical one is the same shape rotated a quarter turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HexOrientation {
    /// Long diagonal along x.
    #[default]
    Horizontal,
    /// Long diagonal along y.
    Vertical,
}

impl HexOrientation {
    /// Whether this is [`HexOrientation::Horizontal`].
    pub fn is_horizontal(self) -> bool {
        self == Self::Horizontal
    }
}

/// The layout policy of a hex grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSpecs {
    /// Axis that determines the hexagon size.
    pub fit_mode: FitMode,
    /// Policy for the other axis.
    pub cross_mode: CrossMode,
    /// Hexagon orientation.
    pub hex_orientation: HexOrientation,
    /// Outline width in grid units. Space for at least one unit of line is
    /// always reserved, even for a zero (hairline) width.
    pub stroke_width: f64,
}

impl Default for LayoutSpecs {
    fn default() -> Self {
        Self {
            fit_mode: FitMode::FitColumns,
            cross_mode: CrossMode::AlignCenter,
            hex_orientation: HexOrientation::Horizontal,
            stroke_width: 0.0,
        }
    }
}

impl LayoutSpecs {
    /// Replace the fit mode.
    pub fn with_fit_mode(self, fit_mode: FitMode) -> Self {
        Self { fit_mode, ..self }
    }

    /// Replace the cross mode.
    pub fn with_cross_mode(self, cross_mode: CrossMode) -> Self {
        Self { cross_mode, ..self }
    }

    /// Replace the orientation.
    pub fn with_orientation(self, hex_orientation: HexOrientation) -> Self {
        Self {
            hex_orientation,
            ..self
        }
    }

    /// Replace the stroke width.
    pub fn with_stroke_width(self, stroke_width: f64) -> Self {
        Self {
            stroke_width,
            ..self
        }
    }
}

/// Space reserved around the grid, in device units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    /// Left inset.
    pub left: f64,
    /// Top inset.
    pub top: f64,
    /// Right inset.
    pub right: f64,
    /// Bottom inset.
    pub bottom: f64,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::uniform(0.0);

    /// The same inset on every side.
    pub const fn uniform(inset: f64) -> Self {
        Self {
            left: inset,
            top: inset,
            right: inset,
            bottom: inset,
        }
    }

    /// Left plus right.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Measurement constraints from the enclosing container.
///
/// A bounded axis has a maximum size; a fixed axis must be exactly the
/// available size. A bounded axis that is not fixed is wrap-content.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Constraints {
    /// Width has a maximum.
    pub has_bounded_width: bool,
    /// Height has a maximum.
    pub has_bounded_height: bool,
    /// Width is exact.
    pub has_fixed_width: bool,
    /// Height is exact.
    pub has_fixed_height: bool,
    /// Available width, including insets.
    pub available_width: f64,
    /// Available height, including insets.
    pub available_height: f64,
    /// Space to keep clear around the grid.
    pub insets: Insets,
}

impl Constraints {
    /// Both axes bounded and fixed at `width` x `height`.
    pub fn exact(width: f64, height: f64) -> Self {
        Self {
            has_bounded_width: true,
            has_bounded_height: true,
            has_fixed_width: true,
            has_fixed_height: true,
            available_width: width,
            available_height: height,
            insets: Insets::ZERO,
        }
    }

    /// Width fixed, height bounded by `max_height` but sized to content.
    pub fn wrap_height(width: f64, max_height: f64) -> Self {
        Self {
            has_fixed_height: false,
            ..Self::exact(width, max_height)
        }
    }

    /// Height fixed, width bounded by `max_width` but sized to content.
    pub fn wrap_width(max_width: f64, height: f64) -> Self {
        Self {
            has_fixed_width: false,
            ..Self::exact(max_width, height)
        }
    }

    /// Replace the insets.
    pub fn with_insets(self, insets: Insets) -> Self {
        Self { insets, ..self }
    }

    /// Whether the cross axis of `fit_mode` sizes itself to the content.
    pub fn is_wrap_content(&self, fit_mode: FitMode) -> bool {
        match fit_mode {
            FitMode::FitColumns => !self.has_fixed_height,
            FitMode::FitRows => !self.has_fixed_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let specs = LayoutSpecs::default();
        assert_eq!(specs.fit_mode, FitMode::FitColumns);
        assert_eq!(specs.cross_mode, CrossMode::AlignCenter);
        assert!(specs.hex_orientation.is_horizontal());
        assert_eq!(specs.stroke_width, 0.0);
    }

    #[test]
    fn wrap_content_follows_the_cross_axis() {
        let c = Constraints::wrap_height(100.0, 500.0);
        assert!(c.is_wrap_content(FitMode::FitColumns));
        assert!(!c.is_wrap_content(FitMode::FitRows));
        let c = Constraints::wrap_width(500.0, 100.0);
        assert!(!c.is_wrap_content(FitMode::FitColumns));
        assert!(c.is_wrap_content(FitMode::FitRows));
    }

    #[test]
    fn insets_sum_per_axis() {
        let insets = Insets {
            left: 1.0,
            top: 2.0,
            right: 3.0,
            bottom: 4.0,
        };
        assert_eq!(insets.horizontal(), 4.0);
        assert_eq!(insets.vertical(), 6.0);
        assert_eq!(Insets::uniform(2.5).vertical(), 5.0);
    }
}
