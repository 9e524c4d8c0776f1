//! Camera pose and projection parameters handed to the host renderer.

use glam::Vec3;

/// A camera described by an explicit orthonormal basis.
///
/// The live camera belongs to the host renderer and is only ever borrowed;
/// reflected cameras are fresh values built by [`crate::mirror::reflect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Unit view direction.
    pub direction: Vec3,
    /// Unit up vector.
    pub up: Vec3,
    /// Unit right vector. `direction × up` for a live camera; reflected
    /// cameras carry `up × direction`.
    pub right: Vec3,
    /// Projection parameters.
    pub projection: Projection,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

/// Projection type for the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection for 3D scenes.
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Width / height.
        aspect_ratio: f32,
    },
    /// Orthographic projection.
    Orthographic {
        /// Half-width of the view volume in world units.
        half_width: f32,
        /// Half-height of the view volume in world units.
        half_height: f32,
    },
}

impl Camera {
    /// Build a camera at `position` looking along `direction`.
    ///
    /// `up` only needs to be roughly perpendicular to `direction`; the stored
    /// basis is re-orthogonalized.
    pub fn look_to(position: Vec3, direction: Vec3, up: Vec3) -> Self {
        let direction = direction.normalize();
        let right = direction.cross(up).normalize();
        let up = right.cross(direction);
        Self {
            position,
            direction,
            up,
            right,
            ..Self::default()
        }
    }

    /// Build a camera at `position` looking at `target`.
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::look_to(position, target - position, up)
    }

    /// Whether direction, up and right are unit length and mutually
    /// perpendicular within `epsilon`.
    pub fn is_orthonormal(&self, epsilon: f32) -> bool {
        let unit = |v: Vec3| (v.length() - 1.0).abs() < epsilon;
        unit(self.direction)
            && unit(self.up)
            && unit(self.right)
            && self.direction.dot(self.up).abs() < epsilon
            && self.direction.dot(self.right).abs() < epsilon
            && self.up.dot(self.right).abs() < epsilon
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            projection: Projection::Perspective {
                fov_y: std::f32::consts::FRAC_PI_4, // 45 degrees
                aspect_ratio: 16.0 / 9.0,
            },
            near: 0.1,
            far: 10000.0,
        }
    }
}
