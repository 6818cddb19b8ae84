//! Scene setup shared by the benchmarks.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rein_collide::{BodyId, CollisionObject, Pose, Volume};

/// Deterministic pseudo-random value in [0, 1).
pub fn hash01(seed: u32) -> f32 {
    let mut x = seed.wrapping_mul(0x9E37_79B9) ^ 0x85EB_CA6B;
    x ^= x >> 16;
    x = x.wrapping_mul(0x7FEB_352D);
    x ^= x >> 15;
    (x >> 8) as f32 / (1u32 << 24) as f32
}

fn jitter(seed: u32) -> Vec3 {
    Vec3::new(hash01(seed * 3), hash01(seed * 3 + 1), hash01(seed * 3 + 2)) - 0.5
}

/// `n` unit spheres on a grid with spacing 1.8, so neighbours overlap.
pub fn setup_spheres(n: usize) -> Vec<CollisionObject> {
    let side = (n as f32).cbrt().ceil() as usize;
    (0..n)
        .map(|i| {
            let cell = Vec3::new(
                (i % side) as f32,
                ((i / side) % side) as f32,
                (i / (side * side)) as f32,
            );
            CollisionObject::new(BodyId(i as u32), format!("sphere-{i}"))
                .with_pose(Pose::from_position(cell * 1.8 + jitter(i as u32) * 0.2))
                .with_volume(Volume::sphere(1.0))
        })
        .collect()
}

/// `n` objects cycling through every volume kind, densely packed.
pub fn setup_mixed(n: usize) -> Vec<CollisionObject> {
    let side = (n as f32).cbrt().ceil() as usize;
    (0..n)
        .map(|i| {
            let cell = Vec3::new(
                (i % side) as f32,
                ((i / side) % side) as f32,
                (i / (side * side)) as f32,
            );
            let volume = match i % 4 {
                0 => Volume::aabb(Vec3::splat(0.6)),
                1 => Volume::obb(Vec3::new(0.8, 0.4, 0.6)),
                2 => Volume::sphere(0.7),
                _ => Volume::capsule(0.4, 1.0),
            };
            let seed = i as u32;
            let orientation = Quat::from_euler(
                glam::EulerRot::YXZ,
                hash01(seed + 101) * TAU,
                hash01(seed + 202) * TAU,
                0.0,
            );
            CollisionObject::new(BodyId(seed), format!("mixed-{i}"))
                .with_pose(Pose::from_position_orientation(cell * 1.5, orientation))
                .with_volume(volume)
        })
        .collect()
}

/// All index pairs whose broadphase bounds overlap.
pub fn candidate_pairs(objects: &[CollisionObject]) -> Vec<(usize, usize)> {
    let bounds: Vec<_> = objects.iter().map(CollisionObject::broadphase_aabb).collect();
    let mut pairs = Vec::new();
    for i in 0..bounds.len() {
        for j in (i + 1)..bounds.len() {
            if let (Some(a), Some(b)) = (&bounds[i], &bounds[j]) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
    }
    pairs
}
