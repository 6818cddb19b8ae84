//! Contact data structures for collision response.

use std::cmp::Ordering;

use glam::Vec3;

use super::object::BodyId;

/// The single contact produced by a pair test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    /// Contact anchor on body A, relative to A's origin (world axes).
    pub local_a: Vec3,
    /// Contact anchor on body B, relative to B's origin (world axes).
    pub local_b: Vec3,
    /// Unit contact normal (from A to B).
    pub normal: Vec3,
    /// Penetration depth, never negative.
    pub penetration: f32,
}

impl ContactPoint {
    /// The same contact seen from the other body.
    #[inline]
    pub fn swapped(self) -> Self {
        Self {
            local_a: self.local_b,
            local_b: self.local_a,
            normal: -self.normal,
            penetration: self.penetration,
        }
    }

    /// Shift both anchors, e.g. from volume centres to body origins.
    #[inline]
    pub fn offset_anchors(self, offset_a: Vec3, offset_b: Vec3) -> Self {
        Self {
            local_a: self.local_a + offset_a,
            local_b: self.local_b + offset_b,
            ..self
        }
    }
}

/// Contact between two bodies, handed to the solver.
///
/// Ordering and equality look only at the body pair, so a sorted set of
/// manifolds holds at most one entry per pair regardless of query order.
#[derive(Debug, Clone, Copy)]
pub struct ContactManifold {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub point: ContactPoint,
}

impl ContactManifold {
    /// Order-independent pair key: lower id in the low 32 bits.
    #[inline]
    pub fn pair_key(&self) -> u64 {
        let (lo, hi) = if self.body_a <= self.body_b {
            (self.body_a, self.body_b)
        } else {
            (self.body_b, self.body_a)
        };
        u64::from(lo.0) | (u64::from(hi.0) << 32)
    }

    /// Contact normal (from A to B).
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.point.normal
    }

    #[inline]
    pub fn penetration(&self) -> f32 {
        self.point.penetration
    }
}

impl PartialEq for ContactManifold {
    fn eq(&self, other: &Self) -> bool {
        self.pair_key() == other.pair_key()
    }
}

impl Eq for ContactManifold {}

impl PartialOrd for ContactManifold {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ContactManifold {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pair_key().cmp(&other.pair_key())
    }
}

/// Where a ray hit a volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Hit position in world space.
    pub point: Vec3,
    /// Distance along the ray from its origin.
    pub distance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifold(a: u32, b: u32) -> ContactManifold {
        ContactManifold {
            body_a: BodyId(a),
            body_b: BodyId(b),
            point: ContactPoint {
                local_a: Vec3::ZERO,
                local_b: Vec3::ZERO,
                normal: Vec3::Y,
                penetration: 0.1,
            },
        }
    }

    #[test]
    fn test_pair_key_is_order_independent() {
        assert_eq!(manifold(3, 7).pair_key(), manifold(7, 3).pair_key());
        assert_eq!(manifold(3, 7).pair_key(), 3 | (7 << 32));
        assert_eq!(manifold(3, 7), manifold(7, 3));
    }

    #[test]
    fn test_ordering_is_strict_weak() {
        let a = manifold(1, 2);
        let b = manifold(2, 5);
        let c = manifold(9, 1);

        // Irreflexive.
        assert!(!(a < a));
        assert!(!(b < b));
        // Transitive: (1,2) < (2,5) < (1,9), the higher id dominates the key.
        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
        // Asymmetric.
        assert!(!(b < a));
    }

    #[test]
    fn test_btree_set_deduplicates_pairs() {
        let set: std::collections::BTreeSet<_> = [manifold(4, 1), manifold(1, 4), manifold(2, 3)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_swapped_contact() {
        let c = ContactPoint {
            local_a: Vec3::X,
            local_b: Vec3::NEG_X,
            normal: Vec3::X,
            penetration: 0.25,
        };
        let s = c.swapped();
        assert_eq!(s.local_a, Vec3::NEG_X);
        assert_eq!(s.local_b, Vec3::X);
        assert_eq!(s.normal, Vec3::NEG_X);
        assert_eq!(s.penetration, 0.25);
        assert_eq!(s.swapped(), c);
    }
}
