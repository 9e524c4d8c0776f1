//! A scene host with no GPU: it tracks what the reflection asks of it and
//! logs the render calls.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use mirrorwater_reflect::{
    Camera, ClipHandle, ClipPlaneSet, ObjectId, ReflectionError, RenderTargetHandle, SceneHost,
};

/// Largest render target the headless host pretends to have memory for.
const MAX_TARGET_TEXELS: u64 = 8192 * 8192;

#[derive(Default)]
pub struct HeadlessHost {
    meshes: FxHashSet<ObjectId>,
    clip_planes: FxHashMap<ClipHandle, (ObjectId, ClipPlaneSet)>,
    targets: FxHashSet<RenderTargetHandle>,
    next_handle: u64,
    pub frames_rendered: u64,
    pub hooks_bound: bool,
}

impl HeadlessHost {
    /// A scene containing meshes with the given ids.
    pub fn with_meshes(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            meshes: ids.into_iter().map(ObjectId).collect(),
            ..Self::default()
        }
    }

    pub fn live_clip_planes(&self) -> usize {
        self.clip_planes.len()
    }

    pub fn live_targets(&self) -> usize {
        self.targets.len()
    }

    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl SceneHost for HeadlessHost {
    fn has_render_representation(&self, object: ObjectId) -> bool {
        self.meshes.contains(&object)
    }

    fn attach_clip_planes(
        &mut self,
        object: ObjectId,
        planes: &ClipPlaneSet,
    ) -> Result<ClipHandle, ReflectionError> {
        let handle = ClipHandle(self.next());
        self.clip_planes.insert(handle, (object, *planes));
        debug!(object = object.0, handle = handle.0, offset = planes.offset(), "clip planes attached");
        Ok(handle)
    }

    fn update_clip_planes(&mut self, handle: ClipHandle, planes: &ClipPlaneSet) {
        if let Some(entry) = self.clip_planes.get_mut(&handle) {
            entry.1 = *planes;
        }
    }

    fn detach_clip_planes(&mut self, object: ObjectId, handle: ClipHandle) {
        self.clip_planes.remove(&handle);
        debug!(object = object.0, handle = handle.0, "clip planes detached");
    }

    fn acquire_render_target(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<RenderTargetHandle, ReflectionError> {
        if u64::from(width) * u64::from(height) > MAX_TARGET_TEXELS {
            return Err(ReflectionError::ResourceUnavailable(format!(
                "{width}x{height} reflection target exceeds headless budget"
            )));
        }
        let target = RenderTargetHandle(self.next());
        self.targets.insert(target);
        Ok(target)
    }

    fn release_render_target(&mut self, target: RenderTargetHandle) {
        self.targets.remove(&target);
    }

    fn render_reflection(&mut self, target: RenderTargetHandle, camera: &Camera) {
        self.frames_rendered += 1;
        trace!(
            render_target = target.0,
            eye = %camera.position,
            objects = self.clip_planes.len(),
            "reflection pass"
        );
    }

    fn bind_frame_hooks(&mut self) {
        self.hooks_bound = true;
    }

    fn unbind_frame_hooks(&mut self) {
        self.hooks_bound = false;
    }
}
