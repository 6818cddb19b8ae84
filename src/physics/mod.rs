//! Narrowphase collision detection and ray queries.
//!
//! # Architecture
//!
//! A collision query runs in three steps:
//!
//! 1. Place each body's [`Volume`](crate::geometry::Volume) at its pose
//! 2. Route the kind pair through the canonical pair table, swapping if needed
//! 3. Run the closed-form or SAT routine and report one [`ContactManifold`]
//!
//! Candidate pairs come from an external broad phase, typically built on
//! [`BroadphaseAabb`]. [`NarrowPhase`] ties the steps together for batches of
//! scene objects.

pub mod collider;
pub mod contact;
pub mod narrowphase;
pub mod object;
pub mod raycast;

use std::collections::BTreeSet;

use tracing::debug;

use crate::geometry::{Pose, Ray, Volume};

pub use self::collider::BroadphaseAabb;
pub use self::contact::{ContactManifold, ContactPoint, RayHit};
pub use self::object::{BodyId, Collidable, CollisionObject};

/// Tolerances used by the collision tests.
#[derive(Debug, Clone)]
pub struct CollisionConfig {
    /// Boundary tolerance of the ray-box slab test. Default: 1e-4.
    pub ray_box_epsilon: f32,
    /// SAT candidate axes with a smaller squared length are skipped as
    /// near-degenerate. Default: 0.99.
    pub sat_min_axis_length_sq: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            ray_box_epsilon: 1e-4,
            sat_min_axis_length_sq: 0.99,
        }
    }
}

/// Object-level collision and ray queries.
#[derive(Debug, Clone, Default)]
pub struct NarrowPhase {
    config: CollisionConfig,
}

impl NarrowPhase {
    /// Create a narrow phase with the given configuration.
    pub fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Test two objects. See [`narrowphase::test_collision`].
    pub fn test_collision<A, B>(&self, a: &A, b: &B) -> Option<ContactManifold>
    where
        A: Collidable + ?Sized,
        B: Collidable + ?Sized,
    {
        narrowphase::test_collision(a, b, &self.config)
    }

    pub fn ray_volume(&self, ray: &Ray, pose: &Pose, volume: &Volume) -> Option<RayHit> {
        raycast::ray_volume(ray, pose, volume, &self.config)
    }

    pub fn ray_object<T>(&self, ray: &Ray, object: &T) -> Option<RayHit>
    where
        T: Collidable + ?Sized,
    {
        raycast::ray_object(ray, object, &self.config)
    }

    /// Nearest hit among the active objects.
    pub fn raycast<T: Collidable>(&self, ray: &Ray, objects: &[T]) -> Option<(BodyId, RayHit)> {
        self.hits(ray, objects.iter())
            .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance))
    }

    /// Every hit among the active objects, nearest first.
    pub fn raycast_all<T: Collidable>(&self, ray: &Ray, objects: &[T]) -> Vec<(BodyId, RayHit)> {
        let mut hits: Vec<_> = self.hits(ray, objects.iter()).collect();
        hits.sort_by(|a, b| a.1.distance.total_cmp(&b.1.distance));
        hits
    }

    /// Hits of `ray` against the active objects, in input order.
    pub fn hits<'a, T, I>(&'a self, ray: &'a Ray, objects: I) -> impl Iterator<Item = (BodyId, RayHit)> + 'a
    where
        T: Collidable + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: 'a,
    {
        objects
            .into_iter()
            .filter(|object| object.is_active())
            .filter_map(move |object| Some((object.body_id(), self.ray_object(ray, object)?)))
    }

    /// Run the narrow phase over broad-phase candidates given as index pairs
    /// into `objects`. Out-of-range indices are ignored.
    pub fn collect_contacts<T: Collidable>(
        &self,
        objects: &[T],
        pairs: &[(usize, usize)],
    ) -> Vec<ContactManifold> {
        let candidates = pairs
            .iter()
            .filter_map(|&(a, b)| Some((objects.get(a)?, objects.get(b)?)));
        self.collect_pair_contacts(candidates)
    }

    /// Run the narrow phase over candidate object pairs.
    ///
    /// Self-pairs and inactive objects are skipped. The result is sorted by
    /// pair key and holds one manifold per body pair; the first candidate
    /// reporting a pair wins.
    pub fn collect_pair_contacts<'a, T, I>(&self, pairs: I) -> Vec<ContactManifold>
    where
        T: Collidable + ?Sized + 'a,
        I: IntoIterator<Item = (&'a T, &'a T)>,
    {
        let mut contacts = BTreeSet::new();
        let mut candidates = 0usize;

        for (a, b) in pairs {
            candidates += 1;
            if a.body_id() == b.body_id() || !a.is_active() || !b.is_active() {
                continue;
            }
            if let Some(manifold) = self.test_collision(a, b) {
                contacts.insert(manifold);
            }
        }

        debug!(candidates, manifolds = contacts.len(), "narrowphase pass");
        contacts.into_iter().collect()
    }
}
