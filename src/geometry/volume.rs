//! Bounding volumes attached to bodies.

use glam::Vec3;

use super::pose::Pose;
use super::shapes::{Aabb, Capsule, Obb, Shape, Sphere};
use crate::error::GeometryError;

/// Kind tag of a bounding volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeKind {
    Aabb,
    Obb,
    Sphere,
    Capsule,
}

/// Local-space extents of a bounding volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeShape {
    /// Axis-aligned box; ignores the body's orientation.
    Aabb { half_extents: Vec3 },
    /// Box that rotates with the body.
    Obb { half_extents: Vec3 },
    Sphere { radius: f32 },
    /// Capsule along the body's local Y axis. `half_height` includes the cap.
    Capsule { radius: f32, half_height: f32 },
}

impl VolumeShape {
    pub fn kind(&self) -> VolumeKind {
        match self {
            VolumeShape::Aabb { .. } => VolumeKind::Aabb,
            VolumeShape::Obb { .. } => VolumeKind::Obb,
            VolumeShape::Sphere { .. } => VolumeKind::Sphere,
            VolumeShape::Capsule { .. } => VolumeKind::Capsule,
        }
    }
}

/// Bounding volume owned by a single body.
///
/// Never stores a world position; world placement comes from the owning
/// body's [`Pose`] at query time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    pub shape: VolumeShape,
    /// Offset from the body origin, in world axes.
    pub offset: Vec3,
}

impl Volume {
    pub fn aabb(half_extents: Vec3) -> Self {
        Self::from_shape(VolumeShape::Aabb { half_extents })
    }

    pub fn obb(half_extents: Vec3) -> Self {
        Self::from_shape(VolumeShape::Obb { half_extents })
    }

    pub fn sphere(radius: f32) -> Self {
        Self::from_shape(VolumeShape::Sphere { radius })
    }

    pub fn capsule(radius: f32, half_height: f32) -> Self {
        Self::from_shape(VolumeShape::Capsule {
            radius,
            half_height,
        })
    }

    fn from_shape(shape: VolumeShape) -> Self {
        Self {
            shape,
            offset: Vec3::ZERO,
        }
    }

    /// Set the offset from the body origin.
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn kind(&self) -> VolumeKind {
        self.shape.kind()
    }

    /// World-space centre of the volume for a body at `pose`.
    #[inline]
    pub fn center(&self, pose: &Pose) -> Vec3 {
        pose.position + self.offset
    }

    /// Place the volume in world space.
    pub fn placed(&self, pose: &Pose) -> Shape {
        let center = self.center(pose);
        match self.shape {
            VolumeShape::Aabb { half_extents } => Shape::Aabb(Aabb {
                center,
                half_extents,
            }),
            VolumeShape::Obb { half_extents } => Shape::Obb(Obb {
                center,
                orientation: pose.orientation,
                half_extents,
            }),
            VolumeShape::Sphere { radius } => Shape::Sphere(Sphere { center, radius }),
            VolumeShape::Capsule {
                radius,
                half_height,
            } => Shape::Capsule(Capsule {
                center,
                orientation: pose.orientation,
                radius,
                half_height,
            }),
        }
    }

    /// Check the extents describe a non-degenerate volume.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self.shape {
            VolumeShape::Aabb { half_extents } | VolumeShape::Obb { half_extents } => {
                if half_extents.cmple(Vec3::ZERO).any() {
                    return Err(GeometryError::NonPositiveExtents(half_extents));
                }
            }
            VolumeShape::Sphere { radius } => {
                if radius <= 0.0 {
                    return Err(GeometryError::NonPositiveRadius(radius));
                }
            }
            VolumeShape::Capsule {
                radius,
                half_height,
            } => {
                if radius <= 0.0 {
                    return Err(GeometryError::NonPositiveRadius(radius));
                }
                if half_height < radius {
                    return Err(GeometryError::CapsuleTooShort {
                        radius,
                        half_height,
                    });
                }
            }
        }
        Ok(())
    }
}
