//! Narrowphase collision detection: closed-form pair tests and SAT.
//!
//! Every routine takes world-space shapes and returns a single contact whose
//! anchors are relative to each shape's centre and whose normal points from
//! the first argument towards the second. [`shape_contact`] routes any pair of
//! shapes through [`CANONICAL_PAIRS`], swapping arguments where needed.

use glam::{Quat, Vec3};
use tracing::trace;

use crate::geometry::{Aabb, Capsule, Obb, Pose, Shape, Sphere, Volume, VolumeKind};

use super::collider::{aabb_test, closest_points_between_segments};
use super::contact::{ContactManifold, ContactPoint};
use super::object::Collidable;
use super::CollisionConfig;

/// Separation vectors shorter than this have no usable direction.
const DEGENERATE_LENGTH: f32 = 1e-6;

/// Face normals in the order of the face distances in [`aabb_aabb`].
const AABB_FACE_NORMALS: [Vec3; 6] = [
    Vec3::NEG_X,
    Vec3::X,
    Vec3::NEG_Y,
    Vec3::Y,
    Vec3::NEG_Z,
    Vec3::Z,
];

/// Kind pairs with a dedicated routine, in the argument order it expects.
pub const CANONICAL_PAIRS: [(VolumeKind, VolumeKind); 10] = [
    (VolumeKind::Aabb, VolumeKind::Aabb),
    (VolumeKind::Sphere, VolumeKind::Sphere),
    (VolumeKind::Obb, VolumeKind::Obb),
    (VolumeKind::Capsule, VolumeKind::Capsule),
    (VolumeKind::Aabb, VolumeKind::Sphere),
    (VolumeKind::Sphere, VolumeKind::Obb),
    (VolumeKind::Capsule, VolumeKind::Sphere),
    (VolumeKind::Capsule, VolumeKind::Aabb),
    (VolumeKind::Capsule, VolumeKind::Obb),
    (VolumeKind::Aabb, VolumeKind::Obb),
];

/// How a kind pair maps onto [`CANONICAL_PAIRS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOrder {
    Canonical,
    Swapped,
}

/// Look up the argument order for a kind pair.
pub fn pair_order(kind_a: VolumeKind, kind_b: VolumeKind) -> Option<PairOrder> {
    if CANONICAL_PAIRS.contains(&(kind_a, kind_b)) {
        Some(PairOrder::Canonical)
    } else if CANONICAL_PAIRS.contains(&(kind_b, kind_a)) {
        Some(PairOrder::Swapped)
    } else {
        None
    }
}

/// Test two scene objects.
///
/// The manifold always names `a` as body A and `b` as body B, whatever order
/// the underlying routine needed. Pairs of the same kind run with the lower
/// [`BodyId`](super::object::BodyId) first, so swapping the arguments only
/// negates the normal and exchanges the anchors.
pub fn test_collision<A, B>(a: &A, b: &B, config: &CollisionConfig) -> Option<ContactManifold>
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    let (Some(volume_a), Some(volume_b)) = (a.volume(), b.volume()) else {
        return None;
    };

    let point = if volume_a.kind() == volume_b.kind() && b.body_id() < a.body_id() {
        test_volumes(volume_b, b.pose(), volume_a, a.pose(), config)?.swapped()
    } else {
        test_volumes(volume_a, a.pose(), volume_b, b.pose(), config)?
    };
    Some(ContactManifold {
        body_a: a.body_id(),
        body_b: b.body_id(),
        point,
    })
}

/// Test two volumes at their bodies' poses. Anchors are relative to the body origins.
pub fn test_volumes(
    volume_a: &Volume,
    pose_a: &Pose,
    volume_b: &Volume,
    pose_b: &Pose,
    config: &CollisionConfig,
) -> Option<ContactPoint> {
    let contact = shape_contact(&volume_a.placed(pose_a), &volume_b.placed(pose_b), config)?;
    Some(contact.offset_anchors(volume_a.offset, volume_b.offset))
}

/// Test two placed shapes. Anchors are relative to the shape centres.
pub fn shape_contact(a: &Shape, b: &Shape, config: &CollisionConfig) -> Option<ContactPoint> {
    let order = pair_order(a.kind(), b.kind())?;
    trace!(kind_a = ?a.kind(), kind_b = ?b.kind(), ?order, "narrowphase pair");

    match order {
        PairOrder::Canonical => canonical_contact(a, b, config),
        PairOrder::Swapped => canonical_contact(b, a, config).map(ContactPoint::swapped),
    }
}

fn canonical_contact(a: &Shape, b: &Shape, config: &CollisionConfig) -> Option<ContactPoint> {
    match (a, b) {
        (Shape::Aabb(a), Shape::Aabb(b)) => aabb_aabb(a, b),
        (Shape::Sphere(a), Shape::Sphere(b)) => sphere_sphere(a, b),
        (Shape::Obb(a), Shape::Obb(b)) => obb_obb(a, b, config.sat_min_axis_length_sq),
        (Shape::Capsule(a), Shape::Capsule(b)) => capsule_capsule(a, b),
        (Shape::Aabb(a), Shape::Sphere(b)) => aabb_sphere(a, b),
        (Shape::Sphere(a), Shape::Obb(b)) => sphere_obb(a, b),
        (Shape::Capsule(a), Shape::Sphere(b)) => capsule_sphere(a, b),
        (Shape::Capsule(a), Shape::Aabb(b)) => capsule_aabb(a, b),
        (Shape::Capsule(a), Shape::Obb(b)) => capsule_obb(a, b),
        (Shape::Aabb(a), Shape::Obb(b)) => aabb_obb(a, b, config.sat_min_axis_length_sq),
        _ => None,
    }
}

/// AABB-AABB overlap. Reports the face axis of least penetration; both
/// anchors sit at the box centres.
pub fn aabb_aabb(a: &Aabb, b: &Aabb) -> Option<ContactPoint> {
    if !aabb_test(a.center, b.center, a.half_extents, b.half_extents) {
        return None;
    }

    let (min_a, max_a) = (a.min(), a.max());
    let (min_b, max_b) = (b.min(), b.max());
    let distances = [
        max_b.x - min_a.x,
        max_a.x - min_b.x,
        max_b.y - min_a.y,
        max_a.y - min_b.y,
        max_b.z - min_a.z,
        max_a.z - min_b.z,
    ];

    let mut penetration = f32::MAX;
    let mut normal = Vec3::ZERO;
    for (distance, face) in distances.into_iter().zip(AABB_FACE_NORMALS) {
        if distance < penetration {
            penetration = distance;
            normal = face;
        }
    }

    Some(ContactPoint {
        local_a: Vec3::ZERO,
        local_b: Vec3::ZERO,
        normal,
        penetration,
    })
}

/// Sphere-sphere intersection test.
#[inline]
pub fn sphere_sphere(a: &Sphere, b: &Sphere) -> Option<ContactPoint> {
    let radii = a.radius + b.radius;
    let delta = b.center - a.center;
    let dist_sq = delta.length_squared();

    if dist_sq >= radii * radii {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > DEGENERATE_LENGTH {
        delta / dist
    } else {
        Vec3::Y
    };

    Some(ContactPoint {
        local_a: normal * a.radius,
        local_b: -normal * b.radius,
        normal,
        penetration: radii - dist,
    })
}

/// AABB-sphere intersection test.
#[inline]
pub fn aabb_sphere(a: &Aabb, b: &Sphere) -> Option<ContactPoint> {
    box_sphere(a.half_extents, b.center - a.center, b.radius)
}

/// Box at the origin against a sphere at `delta`, both in the box frame.
///
/// Anchor A is the closest point on the box, anchor B the deepest point of
/// the sphere. The normal points from the box towards the sphere.
fn box_sphere(half_extents: Vec3, delta: Vec3, radius: f32) -> Option<ContactPoint> {
    let closest = delta.clamp(-half_extents, half_extents);
    let separation = delta - closest;
    let dist_sq = separation.length_squared();

    if dist_sq >= radius * radius {
        return None;
    }

    let dist = dist_sq.sqrt();
    if dist > DEGENERATE_LENGTH {
        let normal = separation / dist;
        return Some(ContactPoint {
            local_a: closest,
            local_b: -normal * radius,
            normal,
            penetration: radius - dist,
        });
    }

    // Sphere centre inside the box: push out through the nearest face.
    let mut face_distance = f32::MAX;
    let mut normal = Vec3::Y;
    for (i, axis) in Vec3::AXES.into_iter().enumerate() {
        let to_positive = half_extents[i] - delta[i];
        if to_positive < face_distance {
            face_distance = to_positive;
            normal = axis;
        }
        let to_negative = half_extents[i] + delta[i];
        if to_negative < face_distance {
            face_distance = to_negative;
            normal = -axis;
        }
    }

    Some(ContactPoint {
        local_a: delta + normal * face_distance,
        local_b: -normal * radius,
        normal,
        penetration: face_distance + radius,
    })
}

/// Sphere-OBB test, run as AABB-sphere in the box's frame.
pub fn sphere_obb(a: &Sphere, b: &Obb) -> Option<ContactPoint> {
    let local_delta = b.orientation.conjugate() * (a.center - b.center);
    let contact = box_sphere(b.half_extents, local_delta, a.radius)?;
    Some(rotate_contact(contact, b.orientation).swapped())
}

#[inline]
fn rotate_contact(contact: ContactPoint, rotation: Quat) -> ContactPoint {
    ContactPoint {
        local_a: rotation * contact.local_a,
        local_b: rotation * contact.local_b,
        normal: rotation * contact.normal,
        penetration: contact.penetration,
    }
}

/// SAT (Separating Axis Theorem) test for OBB-OBB collision.
///
/// Tests the three face axes of each box and the nine edge cross products,
/// skipping any candidate whose squared length is below
/// `min_axis_length_sq`. The contact axis is the one of least penetration;
/// the anchors are the box corners extremal along it.
pub fn obb_obb(a: &Obb, b: &Obb, min_axis_length_sq: f32) -> Option<ContactPoint> {
    let axes_a = a.axes();
    let axes_b = b.axes();

    let mut candidates = [Vec3::ZERO; 15];
    candidates[..3].copy_from_slice(&axes_a);
    candidates[3..6].copy_from_slice(&axes_b);
    for (i, axis_a) in axes_a.iter().enumerate() {
        for (j, axis_b) in axes_b.iter().enumerate() {
            candidates[6 + i * 3 + j] = axis_a.cross(*axis_b);
        }
    }

    let mut best: Option<ContactPoint> = None;

    for candidate in candidates {
        let len_sq = candidate.length_squared();
        if len_sq < min_axis_length_sq {
            continue;
        }
        let axis = candidate / len_sq.sqrt();

        let max_a = a.support(axis);
        let min_a = a.support(-axis);
        let max_b = b.support(axis);
        let min_b = b.support(-axis);

        let (a_lo, a_hi) = (min_a.dot(axis), max_a.dot(axis));
        let (b_lo, b_hi) = (min_b.dot(axis), max_b.dot(axis));

        if b_hi < a_lo || b_lo > a_hi {
            return None;
        }

        // Distance B must travel along +axis or -axis to clear A.
        let forward = a_hi - b_lo;
        let backward = b_hi - a_lo;
        let (penetration, normal, point_a, point_b) = if forward <= backward {
            (forward, axis, max_a, min_b)
        } else {
            (backward, -axis, min_a, max_b)
        };

        match best {
            Some(current) if current.penetration <= penetration => {}
            _ => {
                best = Some(ContactPoint {
                    local_a: point_a - a.center,
                    local_b: point_b - b.center,
                    normal,
                    penetration,
                });
            }
        }
    }

    best
}

/// AABB-OBB test: the AABB is an OBB with identity orientation.
pub fn aabb_obb(a: &Aabb, b: &Obb, min_axis_length_sq: f32) -> Option<ContactPoint> {
    obb_obb(&Obb::from(*a), b, min_axis_length_sq)
}

/// Capsule-capsule test between the closest points of the two axis segments.
pub fn capsule_capsule(a: &Capsule, b: &Capsule) -> Option<ContactPoint> {
    let (bottom_a, top_a) = a.segment();
    let (bottom_b, top_b) = b.segment();

    let (best_a, best_b) = closest_points_between_segments(bottom_a, top_a, bottom_b, top_b);

    let contact = sphere_sphere(
        &Sphere {
            center: best_a,
            radius: a.radius,
        },
        &Sphere {
            center: best_b,
            radius: b.radius,
        },
    )?;
    Some(contact.offset_anchors(best_a - a.center, best_b - b.center))
}

/// Capsule-sphere test.
pub fn capsule_sphere(a: &Capsule, b: &Sphere) -> Option<ContactPoint> {
    let center = a.closest_axis_point(b.center);
    let contact = sphere_sphere(
        &Sphere {
            center,
            radius: a.radius,
        },
        b,
    )?;
    Some(contact.offset_anchors(center - a.center, Vec3::ZERO))
}

/// Capsule-AABB test.
pub fn capsule_aabb(a: &Capsule, b: &Aabb) -> Option<ContactPoint> {
    let target = a.center.clamp(b.min(), b.max());
    let center = a.closest_axis_point(target);
    let contact = aabb_sphere(
        b,
        &Sphere {
            center,
            radius: a.radius,
        },
    )?;
    Some(
        contact
            .swapped()
            .offset_anchors(center - a.center, Vec3::ZERO),
    )
}

/// Capsule-OBB test.
pub fn capsule_obb(a: &Capsule, b: &Obb) -> Option<ContactPoint> {
    let local = b.orientation.conjugate() * (a.center - b.center);
    let target = b.center + b.orientation * local.clamp(-b.half_extents, b.half_extents);
    let center = a.closest_axis_point(target);
    let contact = sphere_obb(
        &Sphere {
            center,
            radius: a.radius,
        },
        b,
    )?;
    Some(contact.offset_anchors(center - a.center, Vec3::ZERO))
}
