//! Benchmark profiles for the hexgrid crates.
//!
//! Provides pre-built shapes, change batches and probe points:
//!
//! - [`reference_shape`]: 100x100 grid with edge lines (about 5K cells)
//! - [`stress_shape`]: 316x316 grid (about 50K cells)
//! - [`spaced_selection`]: a deterministic batch of changes
//! - [`probe_points`]: deterministic device points spread over a container

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use hexgrid_core::{build_state_map, Grid, Shape, Size, State, StateMap};
use hexgrid_layout::{Constraints, HexLayout, LayoutSpecs};

/// 100x100 shape with odd lines inset and edge lines enabled.
pub fn reference_shape() -> Shape {
    Shape::new(Size::new(100, 100), false, true).unwrap()
}

/// 316x316 shape, same line rules as [`reference_shape`].
pub fn stress_shape() -> Shape {
    Shape::new(Size::new(316, 316), false, true).unwrap()
}

/// Select every `stride`-th cell of `grid`, in cell order.
pub fn spaced_selection(grid: &dyn Grid, stride: usize) -> StateMap {
    let stride = stride.max(1);
    build_state_map(|b| {
        for address in grid.addresses().step_by(stride) {
            b.put(address, State::new(true, true));
        }
    })
}

/// A layout of `shape` measured into a `width x height` container.
pub fn reference_layout(shape: Shape, width: f64, height: f64) -> HexLayout {
    let mut layout = HexLayout::new(shape, LayoutSpecs::default().with_stroke_width(1.0));
    layout
        .calculate_size(&Constraints::exact(width, height))
        .unwrap();
    layout
}

/// `count` deterministic points over the container and a 10% margin around
/// it, so that both hits and misses are exercised.
pub fn probe_points(width: f64, height: f64, count: usize) -> Vec<(f64, f64)> {
    const SCALE: f64 = (1u64 << 53) as f64;
    (0..count as u64)
        .map(|i| {
            // Deterministic pseudo-random fractions in [0, 1).
            let a = (i.wrapping_mul(6364136223846793007) >> 11) as f64 / SCALE;
            let b = (i.wrapping_mul(1442695040888963407) >> 11) as f64 / SCALE;
            ((a * 1.2 - 0.1) * width, (b * 1.2 - 0.1) * height)
        })
        .collect()
}
