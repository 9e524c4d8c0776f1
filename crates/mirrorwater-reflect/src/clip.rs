//! Per-object clip planes that follow the water height.
//!
//! Every registered object carries one [`ClipPlaneSet`]. The main pass keeps
//! what is above the water; the reflected pass uses the same plane flipped,
//! so the two passes never both draw the same side.

use glam::{Vec3, Vec4};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::ReflectionError;
use crate::host::{ClipHandle, ObjectId, SceneHost};

/// Which render pass a clip plane is being oriented for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPassKind {
    /// The regular view of the scene.
    Main,
    /// The mirrored view rendered into the reflection target.
    Reflected,
}

/// A half-space boundary. Geometry where `normal · x + distance < 0` is
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    /// Unit normal pointing into the kept half-space.
    pub normal: Vec3,
    /// Plane offset along the normal.
    pub distance: f32,
}

impl ClipPlane {
    /// Signed distance of `p`; negative values are clipped.
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.distance
    }

    /// Whether `p` is discarded by this plane.
    pub fn clips(&self, p: Vec3) -> bool {
        self.signed_distance(p) < 0.0
    }

    /// The same boundary keeping the other side.
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }

    /// Packed as `(a, b, c, d)` for shader upload.
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.distance)
    }
}

/// Clip planes of one reflectable object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlaneSet {
    water: ClipPlane,
}

impl ClipPlaneSet {
    /// Planes for water at `height` along the unit axis `up`.
    pub fn from_height(up: Vec3, height: f32) -> Self {
        Self {
            water: ClipPlane {
                normal: up,
                distance: -height,
            },
        }
    }

    /// The water plane as the main pass uses it.
    pub fn plane(&self) -> ClipPlane {
        self.water
    }

    /// The water plane oriented for `pass`.
    pub fn for_pass(&self, pass: RenderPassKind) -> ClipPlane {
        match pass {
            RenderPassKind::Main => self.water,
            RenderPassKind::Reflected => self.water.flipped(),
        }
    }

    /// Plane offset derived from the water height.
    pub fn offset(&self) -> f32 {
        self.water.distance
    }

    /// Water height these planes were built for.
    pub fn height(&self) -> f32 {
        -self.water.distance
    }
}

#[derive(Debug)]
struct ClipEntry {
    handle: ClipHandle,
    planes: ClipPlaneSet,
}

/// Owns the clip planes of every reflectable object, keyed by object id.
///
/// Registration and unregistration are the only ways entries appear or
/// disappear, so an object removed from the scene elsewhere leaves no
/// dangling reference here until it is unregistered.
#[derive(Debug)]
pub struct ReflectionClipManager {
    up: Vec3,
    height: f32,
    entries: FxHashMap<ObjectId, ClipEntry>,
}

impl ReflectionClipManager {
    /// An empty manager for water at `height` along the unit axis `up`.
    pub fn new(up: Vec3, height: f32) -> Self {
        Self {
            up,
            height,
            entries: FxHashMap::default(),
        }
    }

    /// Current water height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of managed objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no object is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `object` is registered.
    pub fn contains(&self, object: ObjectId) -> bool {
        self.entries.contains_key(&object)
    }

    /// The planes currently attached to `object`.
    pub fn clip_planes(&self, object: ObjectId) -> Option<&ClipPlaneSet> {
        self.entries.get(&object).map(|e| &e.planes)
    }

    /// Ids of all registered objects, in no particular order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.entries.keys().copied()
    }

    /// Attach clip planes for the current height to `object`.
    ///
    /// Registering an object twice replaces its planes; it never holds two.
    ///
    /// # Errors
    ///
    /// [`ReflectionError::PreconditionFailed`] if the host has nothing
    /// renderable for `object`; host allocation failures are passed through.
    pub fn register_object<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        object: ObjectId,
    ) -> Result<(), ReflectionError> {
        if !host.has_render_representation(object) {
            return Err(ReflectionError::PreconditionFailed(format!(
                "object {} has no render representation",
                object.0
            )));
        }

        let planes = ClipPlaneSet::from_height(self.up, self.height);
        let handle = host.attach_clip_planes(object, &planes)?;

        if let Some(old) = self.entries.insert(object, ClipEntry { handle, planes }) {
            host.detach_clip_planes(object, old.handle);
            debug!(object = object.0, "replaced reflection clip planes");
        } else {
            debug!(object = object.0, height = self.height, "registered reflectable");
        }
        Ok(())
    }

    /// Detach and release the planes of `object`.
    ///
    /// Returns `false` (and does nothing) if it was not registered.
    pub fn unregister_object<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        object: ObjectId,
    ) -> bool {
        match self.entries.remove(&object) {
            Some(entry) => {
                host.detach_clip_planes(object, entry.handle);
                debug!(object = object.0, "unregistered reflectable");
                true
            }
            None => false,
        }
    }

    /// Move every managed plane to `height`.
    ///
    /// All new plane sets are derived before any is pushed to the host, and
    /// the call returns only after every object has been updated.
    ///
    /// # Errors
    ///
    /// [`ReflectionError::InvalidArgument`] for a non-finite height; nothing
    /// is changed in that case.
    pub fn update_height<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        height: f32,
    ) -> Result<(), ReflectionError> {
        if !height.is_finite() {
            return Err(ReflectionError::InvalidArgument(format!(
                "water height {height} is not finite"
            )));
        }

        let planes = ClipPlaneSet::from_height(self.up, height);
        self.height = height;
        for entry in self.entries.values_mut() {
            entry.planes = planes;
        }
        for entry in self.entries.values() {
            host.update_clip_planes(entry.handle, &entry.planes);
        }
        trace!(height, objects = self.entries.len(), "clip planes moved");
        Ok(())
    }

    /// Unregister every object. Returns how many were released.
    pub fn clear<H: SceneHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let count = self.entries.len();
        for (object, entry) in self.entries.drain() {
            host.detach_clip_planes(object, entry.handle);
        }
        if count > 0 {
            debug!(count, "released all reflection clip planes");
        }
        count
    }
}

#[cfg(test)]
#[path = "clip_tests.rs"]
mod tests;
