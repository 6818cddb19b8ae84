//! Rays and planes.

use glam::Vec3;

use crate::error::GeometryError;

/// A half-line with an origin and a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, GeometryError> {
        let direction = direction.try_normalize().ok_or(GeometryError::ZeroDirection)?;
        Ok(Self { origin, direction })
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A plane in 3D space defined by the equation ax + by + cz + d = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal (a, b, c).
    pub normal: Vec3,
    /// Distance term (d).
    pub distance: f32,
}

impl Plane {
    /// Create the plane through `point` with the given unit normal.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// A point lying on the plane.
    pub fn point_on_plane(&self) -> Vec3 {
        self.normal * -self.distance
    }

    /// Get the signed distance from a point to the plane.
    /// Positive = in front (same side as normal), Negative = behind.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}
