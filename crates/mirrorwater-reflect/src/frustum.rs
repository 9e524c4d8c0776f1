//! World-space outline of a camera's view frustum, for debug drawing.
//!
//! Handy for checking that a reflected camera really sits below the water and
//! looks back up through it.

use glam::Vec3;

use crate::camera::{Camera, Projection};

/// Corner index pairs forming the 12 edges of a frustum outline.
///
/// Corners 0-3 are on the near plane, 4-7 on the far plane, each ordered
/// bottom-left, bottom-right, top-right, top-left.
pub const FRUSTUM_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Perspective shape of the visualized frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumShape {
    /// Width / height.
    pub aspect_ratio: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl Default for FrustumShape {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            fov_y: 60.0_f32.to_radians(),
        }
    }
}

impl FrustumShape {
    /// The shape of a perspective projection; `None` for orthographic.
    pub fn from_projection(projection: &Projection) -> Option<Self> {
        match *projection {
            Projection::Perspective {
                fov_y,
                aspect_ratio,
            } => Some(Self {
                aspect_ratio,
                fov_y,
            }),
            Projection::Orthographic { .. } => None,
        }
    }
}

/// Eight frustum corners in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumOutline {
    /// See [`FRUSTUM_EDGES`] for the ordering.
    pub corners: [Vec3; 8],
}

impl FrustumOutline {
    /// Outline of `camera`'s view volume between `near` and `far`.
    pub fn new(camera: &Camera, shape: FrustumShape, near: f32, far: f32) -> Self {
        let half_tan = (shape.fov_y * 0.5).tan();
        let mut corners = [Vec3::ZERO; 8];
        for (slot, distance) in [(0, near), (4, far)] {
            let center = camera.position + camera.direction * distance;
            let up = camera.up * (distance * half_tan);
            let right = camera.right * (distance * half_tan * shape.aspect_ratio);
            corners[slot] = center - right - up;
            corners[slot + 1] = center + right - up;
            corners[slot + 2] = center + right + up;
            corners[slot + 3] = center - right + up;
        }
        Self { corners }
    }

    /// Outline using the camera's own projection and clip distances.
    ///
    /// Orthographic cameras fall back to [`FrustumShape::default`].
    pub fn from_camera(camera: &Camera) -> Self {
        let shape = FrustumShape::from_projection(&camera.projection).unwrap_or_default();
        Self::new(camera, shape, camera.near, camera.far)
    }

    /// The 12 edges as line segments.
    pub fn segments(&self) -> [[Vec3; 2]; 12] {
        FRUSTUM_EDGES.map(|(a, b)| [self.corners[a], self.corners[b]])
    }

    /// Center of the eight corners.
    pub fn center(&self) -> Vec3 {
        self.corners.iter().copied().sum::<Vec3>() / 8.0
    }
}
