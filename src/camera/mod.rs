//! Camera and viewport descriptions used for picking.
//!
//! The camera is a pitch/yaw fly camera looking down -Z when both angles are
//! zero. Yaw turns about +Y, pitch about the camera's +X.

pub mod unproject;

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::error::GeometryError;

pub use self::unproject::{build_ray_from_mouse, unproject, unproject_with};

/// Screen dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::EmptyViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Get the aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// A perspective camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position.
    pub position: Vec3,
    /// Rotation about the camera's X axis, in degrees.
    pub pitch: f32,
    /// Rotation about world Y, in degrees.
    pub yaw: f32,
    /// Vertical field of view, in degrees.
    pub fov: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera looking down -Z.
    pub fn new_perspective(position: Vec3, fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            pitch: 0.0,
            yaw: 0.0,
            fov: fov_degrees,
            near,
            far,
        }
    }

    /// Set pitch and yaw, in degrees.
    pub fn with_orientation(mut self, pitch: f32, yaw: f32) -> Self {
        self.pitch = pitch;
        self.yaw = yaw;
        self
    }

    /// Camera-to-world rotation.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians()) * Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Get the forward direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// World-to-camera matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(-self.pitch.to_radians())
            * Mat4::from_rotation_y(-self.yaw.to_radians())
            * Mat4::from_translation(-self.position)
    }

    /// Camera-to-world matrix, built directly rather than by inversion.
    pub fn inverse_view_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_rotation_x(self.pitch.to_radians())
    }

    /// OpenGL-convention projection matrix (depth in [-1, 1]).
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Check the frustum parameters.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(GeometryError::InvalidFieldOfView(self.fov));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(GeometryError::InvalidClipPlanes {
                near: self.near,
                far: self.far,
            });
        }
        Ok(())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new_perspective(Vec3::ZERO, 45.0, 1.0, 1000.0)
    }
}
