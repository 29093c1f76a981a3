//! Regular hexagon geometry.

use crate::render::{HexCanvas, HexPaint};
use crate::specs::HexOrientation;
use kurbo::{Affine, BezPath, Point, Vec2};

/// The square root of three.
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A regular hexagon anchored at the origin of its bounding box.
///
/// The six vertices start at the middle of a short side of the bounding
/// box and run clockwise. For a horizontal hexagon with side `s`:
///
/// ```text
///   (s/2, 0)  (3s/2, 0)
///  (0, m/2)      (2s, m/2)
///   (s/2, m)  (3s/2, m)
/// ```
///
/// where `m = sqrt(3) * s` is the minor axis. A vertical hexagon is the
/// transpose.
///
/// # Examples
///
/// ```
/// use hexgrid_layout::{HexOrientation, Hexagon};
///
/// let mut hex = Hexagon::new(HexOrientation::Horizontal);
/// assert!(hex.set_side_length(10.0));
/// assert!(!hex.set_side_length(10.0));
/// assert_eq!(hex.vertices()[3].x, 20.0);
/// ```
#[derive(Clone, Debug)]
pub struct Hexagon {
    orientation: HexOrientation,
    side: f64,
    half_side: f64,
    minor: f64,
    half_minor: f64,
    vertices: [Point; 6],
    path: BezPath,
    recomputes: u64,
}

impl Hexagon {
    /// A zero-sized hexagon.
    pub fn new(orientation: HexOrientation) -> Self {
        Self {
            orientation,
            side: 0.0,
            half_side: 0.0,
            minor: 0.0,
            half_minor: 0.0,
            vertices: [Point::ZERO; 6],
            path: BezPath::new(),
            recomputes: 0,
        }
    }

    /// Set the side length, recomputing the geometry if it changed.
    ///
    /// Returns whether anything was recomputed.
    pub fn set_side_length(&mut self, side: f64) -> bool {
        if self.side == side {
            return false;
        }
        self.side = side;
        self.recompute();
        true
    }

    /// Set the orientation, recomputing with the current side if it changed.
    pub fn set_orientation(&mut self, orientation: HexOrientation) -> bool {
        if self.orientation == orientation {
            return false;
        }
        self.orientation = orientation;
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        let s = self.side;
        let minor = SQRT_3 * s;
        let hm = minor / 2.0;
        let hs = s / 2.0;
        self.minor = minor;
        self.half_minor = hm;
        self.half_side = hs;

        let horizontal = [
            (0.0, hm),
            (hs, 0.0),
            (3.0 * hs, 0.0),
            (2.0 * s, hm),
            (3.0 * hs, minor),
            (hs, minor),
        ];
        for (vertex, (major, across)) in self.vertices.iter_mut().zip(horizontal) {
            *vertex = match self.orientation {
                HexOrientation::Horizontal => Point::new(major, across),
                HexOrientation::Vertical => Point::new(across, major),
            };
        }

        self.path = outline(&self.vertices);
        self.recomputes += 1;
    }

    /// Current orientation.
    pub fn orientation(&self) -> HexOrientation {
        self.orientation
    }

    /// Whether the orientation is horizontal.
    pub fn is_horizontal(&self) -> bool {
        self.orientation.is_horizontal()
    }

    /// Side length.
    pub fn side(&self) -> f64 {
        self.side
    }

    /// Half the side length.
    pub fn half_side(&self) -> f64 {
        self.half_side
    }

    /// Minor axis, `sqrt(3) * side`.
    pub fn minor(&self) -> f64 {
        self.minor
    }

    /// Half the minor axis.
    pub fn half_minor(&self) -> f64 {
        self.half_minor
    }

    /// The six vertices in bounding-box coordinates.
    pub fn vertices(&self) -> &[Point; 6] {
        &self.vertices
    }

    /// The vertices mapped through `transform`.
    pub fn transformed_vertices(&self, transform: Affine) -> [Point; 6] {
        self.vertices.map(|v| transform * v)
    }

    /// The closed outline in bounding-box coordinates.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// The closed outline mapped through `transform`.
    pub fn path_with(&self, transform: Affine) -> BezPath {
        outline(&self.transformed_vertices(transform))
    }

    /// How many times the geometry has been recomputed.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Fill, then stroke, the hexagon with its bounding box at `origin`.
    pub fn draw(&self, canvas: &mut dyn HexCanvas, origin: Point, paint: &HexPaint) {
        let path = self.path_with(Affine::translate(origin.to_vec2()));
        canvas.fill_path(&path, paint.fill);
        canvas.stroke_path(&path, paint.stroke, paint.stroke_width);
    }

    /// Size of the bounding box along x and y.
    pub fn bounds_size(&self) -> Vec2 {
        match self.orientation {
            HexOrientation::Horizontal => Vec2::new(2.0 * self.side, self.minor),
            HexOrientation::Vertical => Vec2::new(self.minor, 2.0 * self.side),
        }
    }
}

fn outline(vertices: &[Point; 6]) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(vertices[0]);
    for v in &vertices[1..] {
        path.line_to(*v);
    }
    path.close_path();
    path
}
