//! hecs integration.
//!
//! Entities carrying both a [`Pose`] and a [`Volume`] component take part in
//! collision and ray queries. Tag an entity with [`Inactive`] to skip it in
//! batch queries. An entity's [`BodyId`] is its `hecs` id.

use hecs::{Entity, World};

use crate::geometry::{Pose, Ray, Volume};
use crate::physics::{BodyId, Collidable, ContactManifold, NarrowPhase, RayHit};

/// Marker component: the entity is ignored by batch queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inactive;

/// Snapshot of an entity's collision components.
#[derive(Debug, Clone, Copy)]
pub struct EntityCollider {
    pub entity: Entity,
    pub pose: Pose,
    pub volume: Volume,
    pub active: bool,
}

impl EntityCollider {
    /// Read the collision components of `entity`, if it has both.
    pub fn from_entity(world: &World, entity: Entity) -> Option<Self> {
        let pose = *world.get::<&Pose>(entity).ok()?;
        let volume = *world.get::<&Volume>(entity).ok()?;
        Some(Self {
            entity,
            pose,
            volume,
            active: world.get::<&Inactive>(entity).is_err(),
        })
    }
}

impl Collidable for EntityCollider {
    fn body_id(&self) -> BodyId {
        BodyId(self.entity.id())
    }

    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn volume(&self) -> Option<&Volume> {
        Some(&self.volume)
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Collect every entity with collision components.
pub fn colliders(world: &World) -> Vec<EntityCollider> {
    world
        .query::<(&Pose, &Volume, Option<&Inactive>)>()
        .iter()
        .map(|(entity, (pose, volume, inactive))| EntityCollider {
            entity,
            pose: *pose,
            volume: *volume,
            active: inactive.is_none(),
        })
        .collect()
}

/// Run the narrow phase over broad-phase candidate entity pairs.
///
/// Pairs naming an entity without collision components are skipped.
pub fn collect_contacts(
    world: &World,
    pairs: &[(Entity, Entity)],
    narrow: &NarrowPhase,
) -> Vec<ContactManifold> {
    let candidates: Vec<_> = pairs
        .iter()
        .filter_map(|&(a, b)| {
            Some((
                EntityCollider::from_entity(world, a)?,
                EntityCollider::from_entity(world, b)?,
            ))
        })
        .collect();

    narrow.collect_pair_contacts(candidates.iter().map(|(a, b)| (a, b)))
}

/// Nearest active entity hit by `ray`.
pub fn raycast(world: &World, ray: &Ray, narrow: &NarrowPhase) -> Option<(Entity, RayHit)> {
    colliders(world)
        .into_iter()
        .filter(|collider| collider.active)
        .filter_map(|collider| Some((collider.entity, narrow.ray_object(ray, &collider)?)))
        .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance))
}
