/// Scene primitives: point markers and wireframe cubes
use crate::canvas::{Canvas, Color};
use crate::math::Vec3;
use crate::projection::{FrameContext, ScreenPoint};

/// Corners of the unit cube, each coordinate -1 or +1.
pub static CUBE_CORNERS: [[f64; 3]; 8] = [
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
];

/// Wireframe edges as pairs of indices into [`CUBE_CORNERS`].
#[rustfmt::skip]
pub static CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0), // z = -1 face
    (4, 5), (5, 6), (6, 7), (7, 4), // z = +1 face
    (0, 4), (1, 5), (2, 6), (3, 7), // connecting edges
];

/// Faces as quadruples of indices into [`CUBE_EDGES`].
pub static CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [4, 9, 0, 8],
    [6, 10, 2, 11],
    [7, 8, 3, 11],
    [5, 9, 1, 10],
];

/// How many draw calls a primitive emitted and how many it culled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub drawn: usize,
    pub culled: usize,
}

impl DrawStats {
    pub fn total(&self) -> usize {
        self.drawn + self.culled
    }
}

impl std::ops::AddAssign for DrawStats {
    fn add_assign(&mut self, other: Self) {
        self.drawn += other.drawn;
        self.culled += other.culled;
    }
}

/// A marker drawn as a filled circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: Vec3,
    pub color: Color,
    pub radius: u32,
}

impl Point {
    pub fn new(position: Vec3, color: Color, radius: u32) -> Self {
        Self {
            position,
            color,
            radius,
        }
    }

    pub fn draw(&self, frame: &FrameContext, canvas: &mut dyn Canvas) -> DrawStats {
        // same pitch-then-yaw order as cube edges, so markers sit on the wireframe
        let camera_point = frame.to_camera_space(&self.position);
        match frame.project(&camera_point) {
            Some(screen) => {
                // circles land on whole pixels
                let center = ScreenPoint::new(screen.x.trunc(), screen.y.trunc());
                canvas.draw_circle(center, self.radius, self.color);
                DrawStats { drawn: 1, culled: 0 }
            }
            None => DrawStats { drawn: 0, culled: 1 },
        }
    }
}

/// An axis-aligned wireframe cube.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    pub center: Vec3,
    pub color: Color,
    /// Distance from the center to each face.
    pub half_width: f64,
}

impl Cube {
    pub fn new(center: Vec3, color: Color, half_width: f64) -> Self {
        Self {
            center,
            color,
            half_width,
        }
    }

    /// World-space position of corner `index`.
    pub fn corner(&self, index: usize) -> Vec3 {
        let [x, y, z] = CUBE_CORNERS[index];
        self.center + Vec3::new(x, y, z) * self.half_width
    }

    /// Draw every edge that reaches in front of the near plane.
    ///
    /// Always accounts for exactly twelve edges, drawn or culled.
    pub fn draw(&self, frame: &FrameContext, canvas: &mut dyn Canvas) -> DrawStats {
        let mut stats = DrawStats::default();
        for &(a, b) in CUBE_EDGES.iter() {
            match frame.project_segment(&self.corner(a), &self.corner(b)) {
                Some((from, to)) => {
                    canvas.draw_line(from, to, self.color);
                    stats.drawn += 1;
                }
                None => stats.culled += 1,
            }
        }
        stats
    }
}

/// Anything the engine can hold in its scene list.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Point(Point),
    Cube(Cube),
}

impl Primitive {
    pub fn draw(&self, frame: &FrameContext, canvas: &mut dyn Canvas) -> DrawStats {
        match self {
            Primitive::Point(point) => point.draw(frame, canvas),
            Primitive::Cube(cube) => cube.draw(frame, canvas),
        }
    }
}

impl From<Point> for Primitive {
    fn from(point: Point) -> Self {
        Primitive::Point(point)
    }
}

impl From<Cube> for Primitive {
    fn from(cube: Cube) -> Self {
        Primitive::Cube(cube)
    }
}
