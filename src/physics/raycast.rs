//! Ray queries against planes, placed primitives and scene objects.

use glam::Vec3;
use tracing::trace;

use crate::geometry::{Aabb, Capsule, Obb, Plane, Pose, Ray, Shape, Sphere, Volume};

use super::contact::RayHit;
use super::object::Collidable;
use super::CollisionConfig;

/// Squared lengths below this are treated as zero.
const DEGENERATE_LENGTH_SQ: f32 = 1e-12;

/// Intersect a ray with the infinite plane.
///
/// Fails only when the ray runs exactly parallel to the plane. The distance
/// is negative when the plane lies behind the ray origin.
pub fn ray_plane(ray: &Ray, plane: &Plane) -> Option<RayHit> {
    let ln = plane.normal.dot(ray.direction);
    if ln == 0.0 {
        return None;
    }

    let distance = (plane.point_on_plane() - ray.origin).dot(plane.normal) / ln;
    Some(RayHit {
        point: ray.at(distance),
        distance,
    })
}

/// Slab test against the near faces of an axis-aligned box.
///
/// A ray starting inside the box has no near face in front of it and misses.
fn ray_box(ray: &Ray, center: Vec3, half_extents: Vec3, epsilon: f32) -> Option<RayHit> {
    let box_min = center - half_extents;
    let box_max = center + half_extents;

    let mut t_values = Vec3::splat(-1.0);
    for i in 0..3 {
        let dir = ray.direction[i];
        if dir > 0.0 {
            t_values[i] = (box_min[i] - ray.origin[i]) / dir;
        } else if dir < 0.0 {
            t_values[i] = (box_max[i] - ray.origin[i]) / dir;
        }
    }

    let distance = t_values.max_element();
    if distance < 0.0 {
        return None;
    }

    let point = ray.at(distance);
    let inside = (point + epsilon).cmpge(box_min).all() && (point - epsilon).cmple(box_max).all();
    if !inside {
        return None;
    }

    Some(RayHit { point, distance })
}

/// Ray-AABB intersection with the given boundary tolerance.
#[inline]
pub fn ray_aabb(ray: &Ray, aabb: &Aabb, epsilon: f32) -> Option<RayHit> {
    ray_box(ray, aabb.center, aabb.half_extents, epsilon)
}

/// Ray-OBB intersection, run as a slab test in the box's frame.
pub fn ray_obb(ray: &Ray, obb: &Obb, epsilon: f32) -> Option<RayHit> {
    let inverse = obb.orientation.conjugate();
    let local = Ray {
        origin: inverse * (ray.origin - obb.center),
        direction: inverse * ray.direction,
    };

    let hit = ray_box(&local, Vec3::ZERO, obb.half_extents, epsilon)?;
    Some(RayHit {
        point: obb.center + obb.orientation * hit.point,
        distance: hit.distance,
    })
}

/// Ray-sphere intersection.
///
/// A ray pointing away from the centre misses, even from inside the sphere.
/// Otherwise a ray starting inside hits at its origin.
pub fn ray_sphere(ray: &Ray, sphere: &Sphere) -> Option<RayHit> {
    let radius_sq = sphere.radius * sphere.radius;
    let to_center = sphere.center - ray.origin;

    let projection = to_center.dot(ray.direction);
    if projection < 0.0 {
        return None;
    }

    if to_center.length_squared() < radius_sq {
        return Some(RayHit {
            point: ray.origin,
            distance: 0.0,
        });
    }

    let closest = ray.at(projection);
    let dist_sq = (closest - sphere.center).length_squared();
    if dist_sq > radius_sq {
        return None;
    }

    let distance = projection - (radius_sq - dist_sq).sqrt();
    Some(RayHit {
        point: ray.at(distance),
        distance,
    })
}

/// Ray-capsule intersection.
///
/// The ray is intersected with the plane through the capsule axis that faces
/// the ray origin; the axis point nearest that crossing becomes the centre
/// of a sphere of the capsule's radius, which is then ray-tested.
pub fn ray_capsule(ray: &Ray, capsule: &Capsule) -> Option<RayHit> {
    let (bottom, top) = capsule.segment();
    let axis = top - bottom;
    let axis_len_sq = axis.length_squared();

    if axis_len_sq < DEGENERATE_LENGTH_SQ {
        return ray_sphere(
            ray,
            &Sphere {
                center: capsule.center,
                radius: capsule.radius,
            },
        );
    }

    let axis_dir = axis / axis_len_sq.sqrt();
    let perpendicular = |v: Vec3| v - axis_dir * v.dot(axis_dir);

    // Origin on the axis line: orient the plane by the ray direction instead.
    let mut facing = perpendicular(ray.origin - capsule.center);
    if facing.length_squared() < DEGENERATE_LENGTH_SQ {
        facing = perpendicular(ray.direction);
    }

    let sphere_center = if facing.length_squared() < DEGENERATE_LENGTH_SQ {
        // Ray runs along the axis line.
        capsule.closest_axis_point(ray.origin)
    } else {
        let plane = Plane::from_point_normal(capsule.center, facing.normalize());
        let crossing = ray_plane(ray, &plane)?;
        capsule.closest_axis_point(crossing.point)
    };

    ray_sphere(
        ray,
        &Sphere {
            center: sphere_center,
            radius: capsule.radius,
        },
    )
}

/// Ray test against any placed shape.
pub fn ray_shape(ray: &Ray, shape: &Shape, config: &CollisionConfig) -> Option<RayHit> {
    match shape {
        Shape::Aabb(aabb) => ray_aabb(ray, aabb, config.ray_box_epsilon),
        Shape::Obb(obb) => ray_obb(ray, obb, config.ray_box_epsilon),
        Shape::Sphere(sphere) => ray_sphere(ray, sphere),
        Shape::Capsule(capsule) => ray_capsule(ray, capsule),
    }
}

/// Ray test against a volume at a body's pose.
#[inline]
pub fn ray_volume(ray: &Ray, pose: &Pose, volume: &Volume, config: &CollisionConfig) -> Option<RayHit> {
    ray_shape(ray, &volume.placed(pose), config)
}

/// Ray test against a scene object. Objects without a volume are never hit.
pub fn ray_object<T>(ray: &Ray, object: &T, config: &CollisionConfig) -> Option<RayHit>
where
    T: Collidable + ?Sized,
{
    let Some(volume) = object.volume() else {
        trace!(body = object.body_id().0, "ray query against object without volume");
        return None;
    };
    ray_volume(ray, object.pose(), volume, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::object::{BodyId, CollisionObject};
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-4;

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray::new(origin, direction).unwrap()
    }

    fn upright_capsule() -> Capsule {
        Capsule {
            center: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            radius: 0.5,
            half_height: 1.5,
        }
    }

    #[test]
    fn test_ray_plane() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);

        let hit = ray_plane(&ray(Vec3::ZERO, Vec3::Y), &plane).unwrap();
        assert!((hit.distance - 2.0).abs() < EPS);
        assert!((hit.point - Vec3::new(0.0, 2.0, 0.0)).length() < EPS);

        let behind = ray_plane(&ray(Vec3::ZERO, Vec3::NEG_Y), &plane).unwrap();
        assert!((behind.distance + 2.0).abs() < EPS);
    }

    #[test]
    fn test_ray_plane_parallel() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        assert!(ray_plane(&ray(Vec3::ZERO, Vec3::X), &plane).is_none());
    }

    #[test]
    fn test_ray_through_sphere() {
        let sphere = Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        };
        let hit = ray_sphere(&ray(Vec3::new(-5.0, 0.0, 0.0), Vec3::X), &sphere).unwrap();

        assert!((hit.distance - 4.0).abs() < EPS);
        assert!((hit.point - Vec3::new(-1.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_ray_misses_sphere() {
        let sphere = Sphere {
            center: Vec3::new(0.0, 5.0, 0.0),
            radius: 1.0,
        };
        assert!(ray_sphere(&ray(Vec3::new(-5.0, 0.0, 0.0), Vec3::X), &sphere).is_none());

        let behind = Sphere {
            center: Vec3::new(-10.0, 0.0, 0.0),
            radius: 1.0,
        };
        assert!(ray_sphere(&ray(Vec3::new(-5.0, 0.0, 0.0), Vec3::X), &behind).is_none());
    }

    #[test]
    fn test_ray_origin_inside_sphere() {
        let sphere = Sphere {
            center: Vec3::ZERO,
            radius: 2.0,
        };
        let origin = Vec3::new(0.5, 0.0, 0.0);
        let hit = ray_sphere(&ray(origin, Vec3::NEG_Z), &sphere).unwrap();
        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.point, origin);
    }

    #[test]
    fn test_ray_origin_inside_sphere_pointing_away() {
        let sphere = Sphere {
            center: Vec3::ZERO,
            radius: 2.0,
        };
        let origin = Vec3::new(1.0, 0.0, 0.0);
        assert!(ray_sphere(&ray(origin, Vec3::X), &sphere).is_none());

        let toward = ray_sphere(&ray(origin, Vec3::NEG_X), &sphere).unwrap();
        assert_eq!(toward.distance, 0.0);
        assert_eq!(toward.point, origin);
    }

    #[test]
    fn test_ray_aabb() {
        let aabb = Aabb {
            center: Vec3::new(5.0, 0.0, 0.0),
            half_extents: Vec3::ONE,
        };
        let hit = ray_aabb(&ray(Vec3::ZERO, Vec3::X), &aabb, 1e-4).unwrap();
        assert!((hit.distance - 4.0).abs() < EPS);
        assert!((hit.point - Vec3::new(4.0, 0.0, 0.0)).length() < EPS);

        let diagonal = ray_aabb(&ray(Vec3::new(0.0, -4.0, 0.0), Vec3::new(1.0, 1.0, 0.0)), &aabb, 1e-4);
        let diagonal = diagonal.unwrap();
        assert!((diagonal.point - Vec3::new(4.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_ray_aabb_edge_tolerance() {
        let aabb = Aabb {
            center: Vec3::new(5.0, 0.0, 0.0),
            half_extents: Vec3::ONE,
        };
        assert!(ray_aabb(&ray(Vec3::new(0.0, 1.00005, 0.0), Vec3::X), &aabb, 1e-4).is_some());
        assert!(ray_aabb(&ray(Vec3::new(0.0, 1.001, 0.0), Vec3::X), &aabb, 1e-4).is_none());
    }

    #[test]
    fn test_ray_aabb_misses() {
        let aabb = Aabb {
            center: Vec3::new(5.0, 0.0, 0.0),
            half_extents: Vec3::ONE,
        };
        // Pointing away.
        assert!(ray_aabb(&ray(Vec3::ZERO, Vec3::NEG_X), &aabb, 1e-4).is_none());
        // Passing above.
        assert!(ray_aabb(&ray(Vec3::new(0.0, 3.0, 0.0), Vec3::X), &aabb, 1e-4).is_none());
    }

    #[test]
    fn test_ray_obb_uses_orientation() {
        let half_extents = Vec3::new(2.0, 0.5, 0.5);
        let obb = Obb {
            center: Vec3::new(5.0, 0.0, 0.0),
            orientation: Quat::from_rotation_z(FRAC_PI_2),
            half_extents,
        };
        let r = ray(Vec3::new(0.0, 1.5, 0.0), Vec3::X);

        let hit = ray_obb(&r, &obb, 1e-4).unwrap();
        assert!((hit.distance - 4.5).abs() < EPS);
        assert!((hit.point - Vec3::new(4.5, 1.5, 0.0)).length() < EPS);

        let aabb = Aabb {
            center: obb.center,
            half_extents,
        };
        assert!(ray_aabb(&r, &aabb, 1e-4).is_none());
    }

    #[test]
    fn test_ray_capsule_side() {
        let hit = ray_capsule(&ray(Vec3::new(-5.0, 0.3, 0.0), Vec3::X), &upright_capsule()).unwrap();
        assert!((hit.distance - 4.5).abs() < EPS);
        assert!((hit.point - Vec3::new(-0.5, 0.3, 0.0)).length() < EPS);
    }

    #[test]
    fn test_ray_capsule_top() {
        let hit = ray_capsule(&ray(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y), &upright_capsule()).unwrap();
        assert!((hit.distance - 3.5).abs() < EPS);
        assert!((hit.point - Vec3::new(0.0, 1.5, 0.0)).length() < EPS);
    }

    #[test]
    fn test_ray_capsule_misses() {
        let capsule = upright_capsule();
        assert!(ray_capsule(&ray(Vec3::new(-5.0, 3.0, 0.0), Vec3::X), &capsule).is_none());
        assert!(ray_capsule(&ray(Vec3::new(-5.0, 0.0, 0.0), Vec3::NEG_X), &capsule).is_none());
    }

    #[test]
    fn test_ray_object_without_volume() {
        let object = CollisionObject::new(BodyId(3), "marker");
        let config = CollisionConfig::default();
        assert!(ray_object(&ray(Vec3::ZERO, Vec3::X), &object, &config).is_none());
    }

    #[test]
    fn test_ray_object_uses_pose_and_offset() {
        let config = CollisionConfig::default();
        let object = CollisionObject::new(BodyId(1), "ball")
            .with_pose(Pose::from_position(Vec3::new(0.0, 0.0, -10.0)))
            .with_volume(Volume::sphere(1.0).with_offset(Vec3::new(0.0, 2.0, 0.0)));

        let hit = ray_object(&ray(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z), &object, &config).unwrap();
        assert!((hit.distance - 9.0).abs() < EPS);

        assert!(ray_object(&ray(Vec3::ZERO, Vec3::NEG_Z), &object, &config).is_none());
    }
}
