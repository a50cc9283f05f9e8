//! Geometry used by picking: world-space rays and boxes, screen rectangles.
//!
//! ## Ray / box test
//!
//! `Ray::intersect_aabb` is the classic slab test: for each axis the ray is
//! clipped against the pair of planes bounding the box, and the running
//! `[t_min, t_max]` interval is narrowed.  An empty interval means a miss.
//! Axes the ray runs parallel to are handled explicitly so that a zero
//! direction component never produces `0 * inf = NaN`.
use glam::{Mat4, Vec2, Vec3};

// ── AABB ─────────────────────────────────────────────────────────────────────

/// World-space axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centred on the origin with the given half extents.
    #[inline]
    pub fn from_half_extents(half: Vec3) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    /// Returns a new AABB enclosing this box after `transform`.
    ///
    /// Transforms the centre and rotates the half-extents through the
    /// absolute upper-left 3×3 (Arvo 1990), which avoids the 8-corner loop.
    pub fn transform(&self, transform: &Mat4) -> Self {
        let centre = (self.min + self.max) * 0.5;
        let half = (self.max - self.min) * 0.5;

        let new_centre = transform.transform_point3(centre);

        let m = transform.to_cols_array_2d(); // m[col][row]
        let new_half = Vec3::new(
            half.x * m[0][0].abs() + half.y * m[1][0].abs() + half.z * m[2][0].abs(),
            half.x * m[0][1].abs() + half.y * m[1][1].abs() + half.z * m[2][1].abs(),
            half.x * m[0][2].abs() + half.y * m[1][2].abs() + half.z * m[2][2].abs(),
        );

        Self {
            min: new_centre - new_half,
            max: new_centre + new_half,
        }
    }

    /// The eight corners, used when projecting the box to screen space.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }
}

// ── Ray ──────────────────────────────────────────────────────────────────────

/// Half-line starting at `origin`.  `direction` is kept normalised.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the first point of `aabb` in front of the origin, if any.
    ///
    /// A ray starting inside the box hits it at `t = 0`.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let o = self.origin[axis];
            let d = self.direction[axis];
            let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

            if d.abs() < 1e-8 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

// ── ScreenRect ───────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in window (pixel) coordinates, y pointing down.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenRect {
    /// Rectangle from a top-left corner and a size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Rectangle spanned by two arbitrary corners (e.g. drag anchor and
    /// current mouse position).
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest rectangle containing every point; `None` for no points.
    pub fn enclosing(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self { min: p, max: p },
                Some(r) => Self {
                    min: r.min.min(p),
                    max: r.max.max(p),
                },
            })
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// `true` when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Edges are inclusive.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Edges are inclusive, so touching rectangles overlap.
    pub fn overlaps(&self, other: &ScreenRect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}
