//! Support functions and bounds used by the collision tests.

use glam::{Mat3, Quat, Vec3};

use crate::geometry::{Capsule, Obb, Pose, Volume, VolumeShape};

/// Segments shorter than this are treated as points.
const DEGENERATE_LENGTH_SQ: f32 = 1e-12;

/// World-space axis-aligned bounds handed to a broad phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BroadphaseAabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl BroadphaseAabb {
    /// Bounds centred on `center` with the given half size.
    pub fn from_center_half_size(center: Vec3, half_size: Vec3) -> Self {
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Half size of the bounds.
    pub fn half_size(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Test whether two AABBs overlap.
    #[inline]
    pub fn overlaps(&self, other: &BroadphaseAabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

impl Volume {
    /// Compute the world-space broadphase bounds for this volume.
    pub fn broadphase_aabb(&self, pose: &Pose) -> BroadphaseAabb {
        let center = self.center(pose);
        let half_size = match self.shape {
            VolumeShape::Aabb { half_extents } => half_extents,
            VolumeShape::Sphere { radius } => Vec3::splat(radius),
            VolumeShape::Obb { half_extents } => rotated_extents(half_extents, pose.orientation),
            VolumeShape::Capsule {
                radius,
                half_height,
            } => rotated_extents(Vec3::new(radius, half_height, radius), pose.orientation),
        };
        BroadphaseAabb::from_center_half_size(center, half_size)
    }
}

/// World-axis extent of a box with local half extents rotated by `orientation`.
#[inline]
fn rotated_extents(half_extents: Vec3, orientation: Quat) -> Vec3 {
    let mat = Mat3::from_quat(orientation);
    mat.x_axis.abs() * half_extents.x
        + mat.y_axis.abs() * half_extents.y
        + mat.z_axis.abs() * half_extents.z
}

/// Strict per-axis overlap of two boxes given centres and half sizes.
#[inline]
pub fn aabb_test(pos_a: Vec3, pos_b: Vec3, half_a: Vec3, half_b: Vec3) -> bool {
    (pos_b - pos_a).abs().cmplt(half_a + half_b).all()
}

/// Closest point to `point` on the segment `a`-`b`.
#[inline]
pub fn closest_point_on_segment(a: Vec3, b: Vec3, point: Vec3) -> Vec3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < DEGENERATE_LENGTH_SQ {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Closest points between segments `p1`-`q1` and `p2`-`q2`.
///
/// Returns the point on the first segment and the point on the second.
/// Parallel segments pick the pair anchored at `p1`'s end of the overlap.
pub fn closest_points_between_segments(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> (Vec3, Vec3) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    if a < DEGENERATE_LENGTH_SQ && e < DEGENERATE_LENGTH_SQ {
        return (p1, p2);
    }
    if a < DEGENERATE_LENGTH_SQ {
        let t = (f / e).clamp(0.0, 1.0);
        return (p1, p2 + d2 * t);
    }

    let c = d1.dot(r);
    if e < DEGENERATE_LENGTH_SQ {
        let s = (-c / a).clamp(0.0, 1.0);
        return (p1 + d1 * s, p2);
    }

    let b = d1.dot(d2);
    let denom = a * e - b * b;
    let mut s = if denom > f32::EPSILON * a * e {
        ((b * f - c * e) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut t = (b * s + f) / e;
    if t < 0.0 {
        t = 0.0;
        s = (-c / a).clamp(0.0, 1.0);
    } else if t > 1.0 {
        t = 1.0;
        s = ((b - c) / a).clamp(0.0, 1.0);
    }

    (p1 + d1 * s, p2 + d2 * t)
}

impl Obb {
    /// Corner of the box farthest along `direction`.
    #[inline]
    pub fn support(&self, direction: Vec3) -> Vec3 {
        let local_dir = self.orientation.conjugate() * direction;
        let corner = Vec3::select(
            local_dir.cmplt(Vec3::ZERO),
            -self.half_extents,
            self.half_extents,
        );
        self.center + self.orientation * corner
    }
}

impl Capsule {
    /// Endpoints (bottom, top) of the capsule's inner axis segment.
    #[inline]
    pub fn segment(&self) -> (Vec3, Vec3) {
        let extent = self.orientation * Vec3::Y * (self.half_height - self.radius).max(0.0);
        (self.center - extent, self.center + extent)
    }

    /// Point on the axis segment closest to `point`.
    ///
    /// A sphere of the capsule's radius centred here is the part of the
    /// capsule nearest to `point`.
    #[inline]
    pub fn closest_axis_point(&self, point: Vec3) -> Vec3 {
        let (bottom, top) = self.segment();
        closest_point_on_segment(bottom, top, point)
    }
}
