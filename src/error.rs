//! Construction-time validation errors.
//!
//! Collision and ray queries never fail; they report "no collision" instead.
//! These errors only come out of checked constructors and `validate` methods.

use glam::Vec3;

/// Invalid geometric input detected while building a value.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("ray direction must be non-zero")]
    ZeroDirection,

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("half extents must be positive on every axis, got {0}")]
    NonPositiveExtents(Vec3),

    #[error("capsule half height {half_height} is smaller than its radius {radius}")]
    CapsuleTooShort { radius: f32, half_height: f32 },

    #[error("viewport dimensions must be non-zero, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },

    #[error("field of view must lie within (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("near plane {near} must be positive and closer than far plane {far}")]
    InvalidClipPlanes { near: f32, far: f32 },
}
