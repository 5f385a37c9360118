//! Plane geometry shared by tanks, turrets and projectiles.
//!
//! Angles are degrees in screen coordinates (y grows downward), so a positive
//! rotation turns clockwise on screen. This matches tank headings: turning
//! right adds to the heading.

/// A position in logic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Rotates `point` about `pivot` by `degrees`.
pub fn rotate_point(point: Point, pivot: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();

    // Translate to the pivot, rotate, translate back
    let x = point.x - pivot.x;
    let y = point.y - pivot.y;

    Point {
        x: x * cos - y * sin + pivot.x,
        y: x * sin + y * cos + pivot.y,
    }
}

/// Bearing from `from` to `to`, truncated to whole degrees in [0, 360).
pub fn bearing_degrees(from: Point, to: Point) -> f64 {
    let angle = (to.y - from.y).atan2(to.x - from.x).to_degrees().trunc();
    if angle < 0.0 { angle + 360.0 } else { angle }
}

/// Brings an angle into [0, 360) with a single correction step.
///
/// Angles more than one full turn out of range stay out of range.
pub fn normalize_once(angle: f64) -> f64 {
    if angle >= 360.0 {
        angle - 360.0
    } else if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Signed angular offset from `from` to `to` in (-180, 180].
pub fn angle_between(from: f64, to: f64) -> f64 {
    let diff = (to - from).rem_euclid(360.0);
    if diff > 180.0 { diff - 360.0 } else { diff }
}

/// Rectangular play field anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayField {
    pub width: f64,
    pub height: f64,
}

impl PlayField {
    pub const fn new(width: f64, height: f64) -> Self {
        PlayField { width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

/// Four corners of a rotated rectangle.
///
/// Corner order is top-left, top-right, bottom-right, bottom-left of the
/// unrotated rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBox {
    corners: [Point; 4],
}

impl CollisionBox {
    pub fn from_pose(center: Point, width: f64, height: f64, heading: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        let unrotated = [
            Point::new(center.x - half_w, center.y - half_h),
            Point::new(center.x + half_w, center.y - half_h),
            Point::new(center.x + half_w, center.y + half_h),
            Point::new(center.x - half_w, center.y + half_h),
        ];

        CollisionBox {
            corners: unrotated.map(|corner| rotate_point(corner, center, heading)),
        }
    }

    pub fn corners(&self) -> [Point; 4] {
        self.corners
    }

    /// True when `point` lies inside the box or on its edge.
    pub fn contains(&self, point: Point) -> bool {
        let mut positive = false;
        let mut negative = false;

        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            let cross = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
            if cross > 1e-9 {
                positive = true;
            } else if cross < -1e-9 {
                negative = true;
            }
        }

        !(positive && negative)
    }
}
