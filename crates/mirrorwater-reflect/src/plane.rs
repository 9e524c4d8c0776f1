//! The water plane and the boundary centroid used to anchor it.

use glam::Vec3;

use crate::error::ReflectionError;

/// Tolerance for accepting a normal as unit length.
pub const UNIT_NORMAL_EPSILON: f32 = 1e-4;

/// An oriented plane given by a unit normal and one point on it.
///
/// Points with `normal · x + offset > 0` are above the water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterPlane {
    normal: Vec3,
    point: Vec3,
}

impl WaterPlane {
    /// Create a plane, rejecting normals that are not unit length.
    pub fn new(normal: Vec3, point: Vec3) -> Result<Self, ReflectionError> {
        if !normal.is_finite() || (normal.length() - 1.0).abs() > UNIT_NORMAL_EPSILON {
            return Err(ReflectionError::InvalidArgument(format!(
                "plane normal {normal} is not unit length"
            )));
        }
        Ok(Self { normal, point })
    }

    /// Plane perpendicular to `up` at `height`, placed over `anchor`.
    ///
    /// Only the horizontal part of `anchor` is kept; `height` alone decides
    /// where the plane sits along `up`.
    pub fn horizontal(up: Vec3, anchor: Vec3, height: f32) -> Result<Self, ReflectionError> {
        let plane = Self::new(up, anchor)?;
        Ok(plane.with_height(height))
    }

    /// The unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// The representative point used for reflection.
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Position of the plane along its normal.
    pub fn height(&self) -> f32 {
        self.normal.dot(self.point)
    }

    /// The `d` term of `n · x + d = 0`.
    pub fn offset(&self) -> f32 {
        -self.height()
    }

    /// The same plane moved along its normal to `height`.
    pub fn with_height(&self, height: f32) -> Self {
        Self {
            normal: self.normal,
            point: self.point + self.normal * (height - self.height()),
        }
    }

    /// Signed distance of `p` from the plane, positive above.
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.offset()
    }

    /// Orthogonal projection of `p` onto the plane.
    pub fn project(&self, p: Vec3) -> Vec3 {
        p - self.normal * self.signed_distance(p)
    }
}

/// Arithmetic mean of `points`.
///
/// An empty slice is rejected rather than producing a zero vector.
pub fn centroid(points: &[Vec3]) -> Result<Vec3, ReflectionError> {
    if points.is_empty() {
        return Err(ReflectionError::InvalidArgument(
            "centroid of an empty point set".to_string(),
        ));
    }
    let total: Vec3 = points.iter().copied().sum();
    Ok(total / points.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_of_square_is_exact() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
        ];
        assert_eq!(centroid(&points).unwrap(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_centroid_of_single_point() {
        let p = Vec3::new(-3.0, 7.5, 2.0);
        assert_eq!(centroid(&[p]).unwrap(), p);
    }

    #[test]
    fn test_centroid_empty_is_invalid_argument() {
        assert!(matches!(
            centroid(&[]),
            Err(ReflectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_non_unit_normal_rejected() {
        let err = WaterPlane::new(Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO).unwrap_err();
        assert!(matches!(err, ReflectionError::InvalidArgument(_)));
        assert!(WaterPlane::new(Vec3::ZERO, Vec3::ZERO).is_err());
        assert!(WaterPlane::new(Vec3::new(f32::NAN, 1.0, 0.0), Vec3::ZERO).is_err());
    }

    #[test]
    fn test_horizontal_keeps_anchor_xz_and_uses_height() {
        let plane = WaterPlane::horizontal(Vec3::Y, Vec3::new(5.0, 40.0, -3.0), 2.0).unwrap();
        assert_eq!(plane.point(), Vec3::new(5.0, 2.0, -3.0));
        assert_eq!(plane.height(), 2.0);
        assert_eq!(plane.offset(), -2.0);
    }

    #[test]
    fn test_signed_distance_and_project() {
        let plane = WaterPlane::horizontal(Vec3::Y, Vec3::ZERO, 1.0).unwrap();
        assert_eq!(plane.signed_distance(Vec3::new(3.0, 4.0, 0.0)), 3.0);
        assert_eq!(plane.signed_distance(Vec3::new(0.0, -1.0, 0.0)), -2.0);
        assert_eq!(plane.project(Vec3::new(3.0, 4.0, 9.0)), Vec3::new(3.0, 1.0, 9.0));
    }

    #[test]
    fn test_with_height_moves_along_normal() {
        let plane = WaterPlane::new(Vec3::Z, Vec3::new(1.0, 1.0, 0.0)).unwrap();
        let raised = plane.with_height(-4.0);
        assert_eq!(raised.point(), Vec3::new(1.0, 1.0, -4.0));
        assert_eq!(raised.normal(), Vec3::Z);
    }
}
