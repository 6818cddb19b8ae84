//! rein collision
//!
//! Narrow-phase collision detection, ray casting and screen picking for
//! rigid bodies.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **geometry** - Poses, bounding volumes, placed shapes, rays and planes
//! 2. **physics** - Pairwise contact tests, contact manifolds, ray queries
//! 3. **camera** - Camera matrices, unprojection and mouse picking rays
//! 4. **ecs** - hecs ECS integration (feature = "ecs")
//!
//! Queries never fail: degenerate or missing input reports no collision.
//! [`GeometryError`] only comes out of checked constructors.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod physics;

#[cfg(feature = "ecs")]
pub mod ecs;

// Re-export commonly used types
pub use camera::{build_ray_from_mouse, unproject, Camera, Viewport};

pub use error::GeometryError;

pub use geometry::{Aabb, Capsule, Obb, Plane, Pose, Ray, Shape, Sphere, Volume, VolumeKind, VolumeShape};

pub use physics::{
    BodyId, BroadphaseAabb, Collidable, CollisionConfig, CollisionObject, ContactManifold,
    ContactPoint, NarrowPhase, RayHit,
};

#[cfg(feature = "ecs")]
pub use ecs::{EntityCollider, Inactive};

// Re-export glam for convenience
pub use glam;
