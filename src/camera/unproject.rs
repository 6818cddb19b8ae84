//! Screen-to-world unprojection and mouse picking rays.
//!
//! Screen coordinates have their origin at the bottom-left corner with y
//! pointing up, and a depth in normalized device range [-1, 1].
//! [`build_ray_from_mouse`] takes window coordinates (origin top-left) and
//! flips them.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::geometry::Ray;

use super::{Camera, Viewport};

/// Depth of the near point of a picking ray. The exact -1 and 1 extremes are
/// numerically unstable under [`inverse_projection`].
pub const PICK_NEAR_DEPTH: f32 = -0.99999;
/// Depth of the far point of a picking ray.
pub const PICK_FAR_DEPTH: f32 = 0.99999;

/// Closed-form inverse of [`Mat4::perspective_rh_gl`].
///
/// Only valid for that projection; no general matrix inverse is taken.
pub fn inverse_projection(aspect: f32, fov_degrees: f32, near: f32, far: f32) -> Mat4 {
    let t = (fov_degrees.to_radians() * 0.5).tan();
    let neg_depth = near - far;
    let c = (far + near) / neg_depth;
    let d = 2.0 * near * far / neg_depth;

    Mat4::from_cols(
        Vec4::new(aspect * t, 0.0, 0.0, 0.0),
        Vec4::new(0.0, t, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0 / d),
        Vec4::new(0.0, 0.0, -1.0, c / d),
    )
}

/// Unproject a screen point using the viewport's aspect ratio and the
/// camera's field of view.
pub fn unproject(screen: Vec3, camera: &Camera, viewport: &Viewport) -> Vec3 {
    unproject_with(screen, viewport.aspect(), camera.fov, camera, viewport)
}

/// Unproject a screen point with an explicit aspect ratio and field of view
/// (degrees).
pub fn unproject_with(
    screen: Vec3,
    aspect: f32,
    fov_degrees: f32,
    camera: &Camera,
    viewport: &Viewport,
) -> Vec3 {
    // Inverting a product reverses its order.
    let inverse_view_projection =
        camera.inverse_view_matrix() * inverse_projection(aspect, fov_degrees, camera.near, camera.far);

    let size = viewport.size();
    let clip = Vec4::new(
        screen.x / size.x * 2.0 - 1.0,
        screen.y / size.y * 2.0 - 1.0,
        screen.z,
        1.0,
    );

    let world = inverse_view_projection * clip;
    world.truncate() / world.w
}

/// Build a world-space picking ray through a mouse position given in window
/// coordinates (origin top-left).
pub fn build_ray_from_mouse(camera: &Camera, viewport: &Viewport, mouse: Vec2) -> Ray {
    let y = viewport.height as f32 - mouse.y;
    let near = unproject(Vec3::new(mouse.x, y, PICK_NEAR_DEPTH), camera, viewport);
    let far = unproject(Vec3::new(mouse.x, y, PICK_FAR_DEPTH), camera, viewport);

    Ray {
        origin: camera.position,
        direction: (far - near).normalize_or(camera.forward()),
    }
}
