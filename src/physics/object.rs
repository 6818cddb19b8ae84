//! Scene objects as seen by the collision code.

use crate::geometry::{Pose, Volume};

use super::collider::BroadphaseAabb;

/// Stable identifier of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u32);

/// Anything that can take part in a collision or ray query.
pub trait Collidable {
    fn body_id(&self) -> BodyId;

    fn pose(&self) -> &Pose;

    /// Bounding volume, if the object has one. Objects without a volume
    /// never collide and are never hit by rays.
    fn volume(&self) -> Option<&Volume>;

    /// Inactive objects are skipped by batch queries.
    fn is_active(&self) -> bool {
        true
    }
}

/// A body with an optional bounding volume.
#[derive(Debug, Clone)]
pub struct CollisionObject {
    id: BodyId,
    name: String,
    pub pose: Pose,
    volume: Option<Volume>,
    pub active: bool,
}

impl CollisionObject {
    /// Create an active object at the identity pose with no volume.
    pub fn new(id: BodyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            pose: Pose::identity(),
            volume: None,
            active: true,
        }
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn set_volume(&mut self, volume: Option<Volume>) {
        self.volume = volume;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// World-space bounds for the broad phase, if the object has a volume.
    pub fn broadphase_aabb(&self) -> Option<BroadphaseAabb> {
        self.volume
            .as_ref()
            .map(|volume| volume.broadphase_aabb(&self.pose))
    }
}

impl Collidable for CollisionObject {
    fn body_id(&self) -> BodyId {
        self.id
    }

    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn volume(&self) -> Option<&Volume> {
        self.volume.as_ref()
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
