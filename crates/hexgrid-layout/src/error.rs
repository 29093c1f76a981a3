//! Error types for layout calculation.

use crate::specs::FitMode;
use std::error::Error;
use std::fmt;

/// Errors arising from layout configuration.
///
/// Both variants mean the container asked for a layout that cannot be
/// computed from the axes it bounded. Degenerate but computable geometry,
/// such as zero available space, is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The fitted axis has no maximum size.
    UnboundedFitDimension {
        /// The fit mode in effect.
        fit_mode: FitMode,
    },
    /// Scale-to-fit was requested with no maximum on the cross axis.
    UnboundedScaleDimension {
        /// The fit mode in effect.
        fit_mode: FitMode,
    },
}

fn fit_axis(fit_mode: FitMode) -> &'static str {
    match fit_mode {
        FitMode::FitColumns => "width",
        FitMode::FitRows => "height",
    }
}

fn cross_axis(fit_mode: FitMode) -> &'static str {
    match fit_mode {
        FitMode::FitColumns => "height",
        FitMode::FitRows => "width",
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedFitDimension { fit_mode } => {
                write!(f, "cannot fit to an unbounded {}", fit_axis(*fit_mode))
            }
            Self::UnboundedScaleDimension { fit_mode } => {
                write!(f, "cannot scale to an unbounded {}", cross_axis(*fit_mode))
            }
        }
    }
}

impl Error for LayoutError {}
