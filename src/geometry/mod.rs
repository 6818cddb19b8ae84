//! Geometric value types: poses, volumes, placed shapes, rays and planes.

pub mod pose;
pub mod ray;
pub mod shapes;
pub mod volume;

pub use pose::Pose;
pub use ray::{Plane, Ray};
pub use shapes::{Aabb, Capsule, Obb, Shape, Sphere};
pub use volume::{Volume, VolumeKind, VolumeShape};
