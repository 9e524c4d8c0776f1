//! Water surface geometry and the uniform block the host material samples.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use mirrorwater_config::WaterConfig;

use crate::error::ReflectionError;
use crate::plane::{WaterPlane, centroid};

/// Flat polygon covering the water footprint.
///
/// Vertex 0 is the centroid; the boundary follows as a ring and is
/// triangulated as a fan around the centroid, wound counter-clockwise when
/// seen from above the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterSurface {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
    normal: Vec3,
}

impl WaterSurface {
    /// Project `boundary` onto `plane` and triangulate it.
    ///
    /// # Errors
    ///
    /// [`ReflectionError::InvalidArgument`] for fewer than three points or a
    /// boundary that collapses to a line on the plane.
    pub fn from_boundary(boundary: &[Vec3], plane: &WaterPlane) -> Result<Self, ReflectionError> {
        if boundary.len() < 3 {
            return Err(ReflectionError::InvalidArgument(format!(
                "water boundary needs at least 3 points, got {}",
                boundary.len()
            )));
        }

        let mut ring: Vec<Vec3> = boundary.iter().map(|&p| plane.project(p)).collect();

        let winding = newell_normal(&ring);
        if winding.length() <= ring_extent_squared(&ring) * DEGENERATE_AREA_RATIO {
            return Err(ReflectionError::InvalidArgument(
                "water boundary is degenerate".to_string(),
            ));
        }
        if winding.dot(plane.normal()) < 0.0 {
            ring.reverse();
        }

        let center = centroid(&ring)?;
        let n = ring.len() as u32;
        let mut vertices = Vec::with_capacity(ring.len() + 1);
        vertices.push(center);
        vertices.extend(ring);

        let mut indices = Vec::with_capacity(n as usize * 3);
        for i in 0..n {
            indices.extend_from_slice(&[0, 1 + i, 1 + (i + 1) % n]);
        }

        Ok(Self {
            vertices,
            indices,
            normal: plane.normal(),
        })
    }

    /// Centroid first, then the boundary ring.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Triangle list indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Surface normal (the plane normal).
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Centroid of the projected boundary.
    pub fn center(&self) -> Vec3 {
        self.vertices[0]
    }

    /// Number of fan triangles, one per boundary point.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Signed area, positive when the fan faces along the normal.
    pub fn area(&self) -> f32 {
        self.indices
            .chunks_exact(3)
            .map(|tri| {
                let [a, b, c] = [0, 1, 2].map(|k| self.vertices[tri[k] as usize]);
                (b - a).cross(c - a).dot(self.normal) * 0.5
            })
            .sum()
    }
}

/// Smallest area, relative to the squared ring extent, that still counts as
/// a polygon.
const DEGENERATE_AREA_RATIO: f32 = 1e-6;

/// Newell's method; the length is twice the polygon's area.
///
/// Summed relative to the first vertex so boundaries far from the origin
/// keep their precision.
fn newell_normal(ring: &[Vec3]) -> Vec3 {
    let origin = ring[0];
    let mut normal = Vec3::ZERO;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        normal += (*a - origin).cross(b - origin);
    }
    normal
}

/// Largest squared distance of any vertex from the first.
fn ring_extent_squared(ring: &[Vec3]) -> f32 {
    let origin = ring[0];
    ring.iter()
        .map(|p| p.distance_squared(origin))
        .fold(0.0, f32::max)
}

/// GPU uniform for the water material.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct WaterUniform {
    /// Surface color, normalized RGBA.
    pub color: [f32; 4],
    /// Water plane as `(nx, ny, nz, d)`.
    pub plane: [f32; 4],
    /// Fresnel bias, power, scale.
    pub fresnel: [f32; 3],
    /// Specular highlight intensity.
    pub specular_intensity: f32,
    /// Wave frequency.
    pub frequency: f32,
    /// Wave animation speed.
    pub animation_speed: f32,
    /// Wave amplitude.
    pub amplitude: f32,
    /// Current simulation time in seconds.
    pub time: f32,
}

impl WaterUniform {
    /// Pack the water settings and the live plane for upload.
    pub fn from_config(config: &WaterConfig, plane: &WaterPlane, time: f32) -> Self {
        Self {
            color: config.color,
            plane: plane.normal().extend(plane.offset()).to_array(),
            fresnel: [
                config.fresnel.bias,
                config.fresnel.power,
                config.fresnel.scale,
            ],
            specular_intensity: config.specular_intensity,
            frequency: config.frequency,
            animation_speed: config.animation_speed,
            amplitude: config.amplitude,
            time,
        }
    }
}
