//! World-space primitives produced by placing a volume at a pose.

use glam::{Quat, Vec3};

use super::volume::VolumeKind;

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }
}

/// Oriented box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    pub center: Vec3,
    pub orientation: Quat,
    pub half_extents: Vec3,
}

impl Obb {
    /// The box's local X, Y and Z axes in world space.
    pub fn axes(&self) -> [Vec3; 3] {
        [
            self.orientation * Vec3::X,
            self.orientation * Vec3::Y,
            self.orientation * Vec3::Z,
        ]
    }
}

impl From<Aabb> for Obb {
    fn from(aabb: Aabb) -> Self {
        Self {
            center: aabb.center,
            orientation: Quat::IDENTITY,
            half_extents: aabb.half_extents,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Capsule in world space; its axis is the local Y axis of `orientation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub center: Vec3,
    pub orientation: Quat,
    pub radius: f32,
    /// Half of the full height, caps included.
    pub half_height: f32,
}

/// A volume placed in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Aabb(Aabb),
    Obb(Obb),
    Sphere(Sphere),
    Capsule(Capsule),
}

impl Shape {
    pub fn kind(&self) -> VolumeKind {
        match self {
            Shape::Aabb(_) => VolumeKind::Aabb,
            Shape::Obb(_) => VolumeKind::Obb,
            Shape::Sphere(_) => VolumeKind::Sphere,
            Shape::Capsule(_) => VolumeKind::Capsule,
        }
    }
}
