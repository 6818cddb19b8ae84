//! Narrowphase and ray query benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench narrowphase
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench narrowphase -- pair

use std::f32::consts::FRAC_PI_4;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Quat, Vec2, Vec3};
use rein_collide::geometry::{Aabb, Capsule, Obb, Sphere};
use rein_collide::physics::narrowphase::{
    aabb_aabb, aabb_sphere, capsule_capsule, obb_obb, sphere_obb, sphere_sphere,
};
use rein_collide::physics::raycast::{ray_aabb, ray_capsule, ray_obb, ray_sphere};
use rein_collide::{build_ray_from_mouse, Camera, NarrowPhase, Ray, Viewport};
use rein_collide_bench::*;

// ---------------------------------------------------------------------------
// Pair routines
// ---------------------------------------------------------------------------

fn bench_pairs(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("pair/sphere_sphere");
        let a = Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        };
        let hit = Sphere {
            center: Vec3::new(1.5, 0.0, 0.0),
            radius: 1.0,
        };
        let miss = Sphere {
            center: Vec3::new(5.0, 0.0, 0.0),
            radius: 1.0,
        };
        group.bench_function("intersecting", |b| b.iter(|| sphere_sphere(&a, &hit)));
        group.bench_function("separated", |b| b.iter(|| sphere_sphere(&a, &miss)));
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pair/box_box");
        let a = Aabb {
            center: Vec3::ZERO,
            half_extents: Vec3::ONE,
        };
        let b_hit = Aabb {
            center: Vec3::new(1.5, 0.0, 0.0),
            ..a
        };
        group.bench_function("aabb", |b| b.iter(|| aabb_aabb(&a, &b_hit)));

        let oa = Obb::from(a);
        let ob = Obb {
            center: Vec3::new(1.5, 0.0, 0.0),
            orientation: Quat::from_rotation_y(FRAC_PI_4),
            half_extents: Vec3::ONE,
        };
        group.bench_function("obb_rotated", |b| b.iter(|| obb_obb(&oa, &ob, 0.99)));

        let far = Obb {
            center: Vec3::new(5.0, 0.0, 0.0),
            ..ob
        };
        group.bench_function("obb_separated", |b| b.iter(|| obb_obb(&oa, &far, 0.99)));
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pair/box_sphere");
        let a = Aabb {
            center: Vec3::ZERO,
            half_extents: Vec3::ONE,
        };
        let s = Sphere {
            center: Vec3::new(1.5, 0.0, 0.0),
            radius: 1.0,
        };
        group.bench_function("aabb", |b| b.iter(|| aabb_sphere(&a, &s)));

        let o = Obb {
            orientation: Quat::from_rotation_z(0.5),
            ..Obb::from(a)
        };
        group.bench_function("obb", |b| b.iter(|| sphere_obb(&s, &o)));
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pair/capsule_capsule");
        let a = Capsule {
            center: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            radius: 0.5,
            half_height: 1.5,
        };
        let crossed = Capsule {
            center: Vec3::new(0.0, 0.0, 0.9),
            orientation: Quat::from_rotation_z(1.2),
            ..a
        };
        group.bench_function("crossed", |b| b.iter(|| capsule_capsule(&a, &crossed)));
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Ray queries
// ---------------------------------------------------------------------------

fn bench_rays(c: &mut Criterion) {
    let mut group = c.benchmark_group("ray");
    let ray = Ray {
        origin: Vec3::new(-5.0, 0.2, 0.1),
        direction: Vec3::X,
    };

    let sphere = Sphere {
        center: Vec3::ZERO,
        radius: 1.0,
    };
    group.bench_function("sphere", |b| b.iter(|| ray_sphere(&ray, &sphere)));

    let aabb = Aabb {
        center: Vec3::ZERO,
        half_extents: Vec3::ONE,
    };
    group.bench_function("aabb", |b| b.iter(|| ray_aabb(&ray, &aabb, 1e-4)));

    let obb = Obb {
        orientation: Quat::from_rotation_y(0.6),
        ..Obb::from(aabb)
    };
    group.bench_function("obb", |b| b.iter(|| ray_obb(&ray, &obb, 1e-4)));

    let capsule = Capsule {
        center: Vec3::ZERO,
        orientation: Quat::from_rotation_x(0.3),
        radius: 0.5,
        half_height: 1.5,
    };
    group.bench_function("capsule", |b| b.iter(|| ray_capsule(&ray, &capsule)));
    group.finish();
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

fn bench_batches(c: &mut Criterion) {
    let narrow = NarrowPhase::default();

    {
        let mut group = c.benchmark_group("collect/uniform_spheres");
        for &n in &[100, 500, 1000] {
            let objects = setup_spheres(n);
            let pairs = candidate_pairs(&objects);
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| narrow.collect_contacts(&objects, &pairs));
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("collect/mixed_shapes");
        for &n in &[100, 500, 1000] {
            let objects = setup_mixed(n);
            let pairs = candidate_pairs(&objects);
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| narrow.collect_contacts(&objects, &pairs));
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("raycast/mixed_shapes");
        let camera = Camera::new_perspective(Vec3::new(4.0, 4.0, 30.0), 60.0, 0.1, 200.0);
        let viewport = Viewport {
            width: 1280,
            height: 720,
        };
        let ray = build_ray_from_mouse(&camera, &viewport, Vec2::new(640.0, 360.0));
        for &n in &[100, 1000] {
            let objects = setup_mixed(n);
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| narrow.raycast(&ray, &objects));
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_pairs, bench_rays, bench_batches);
criterion_main!(benches);
