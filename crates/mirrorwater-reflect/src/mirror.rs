//! Mirror cameras across an arbitrary plane.

use glam::Vec3;

use crate::camera::Camera;
use crate::plane::WaterPlane;

/// Reflect `camera` across the plane through `plane_point` with unit normal
/// `plane_normal`.
///
/// The normal is used as given. The reflected direction is renormalized; the
/// reflected up is not. The reflected right is `up' × direction'`, the
/// mirror image of a live camera's `direction × up`. Projection and clip
/// distances carry over unchanged.
///
/// Never fails: NaN or degenerate input yields NaN or degenerate output.
pub fn reflect(camera: &Camera, plane_normal: Vec3, plane_point: Vec3) -> Camera {
    let n = plane_normal;

    // Signed distance of the eye from the plane.
    let to_plane = plane_point - camera.position;
    let distance = -to_plane.dot(n);
    let position = camera.position - n * (2.0 * distance);

    let direction = reflect_vector(camera.direction, n).normalize();
    let up = reflect_vector(camera.up, n);
    let right = up.cross(direction);

    Camera {
        position,
        direction,
        up,
        right,
        ..*camera
    }
}

/// [`reflect`] across a [`WaterPlane`].
pub fn reflect_across(camera: &Camera, plane: &WaterPlane) -> Camera {
    reflect(camera, plane.normal(), plane.point())
}

/// Householder reflection of a direction; translation-invariant.
fn reflect_vector(v: Vec3, n: Vec3) -> Vec3 {
    v - n * (2.0 * n.dot(v))
}
