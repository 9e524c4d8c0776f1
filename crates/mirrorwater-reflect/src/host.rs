//! The boundary to the host renderer.
//!
//! The host owns the scene graph, the live camera, GPU resources and the frame
//! loop. This crate only asks it for clip primitives and an off-screen target,
//! and hands it the reflected camera to render with.

use crate::camera::Camera;
use crate::clip::ClipPlaneSet;
use crate::error::ReflectionError;

/// Stable key of a host scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Host-side clip primitive attached to one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipHandle(pub u64);

/// Host-side off-screen render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetHandle(pub u64);

/// Services the reflection system needs from the host renderer.
///
/// All calls happen synchronously on the thread driving the host's frame loop.
pub trait SceneHost {
    /// Whether `object` currently has something renderable a clip plane can
    /// attach to.
    fn has_render_representation(&self, object: ObjectId) -> bool;

    /// Attach a new clip primitive to `object`.
    fn attach_clip_planes(
        &mut self,
        object: ObjectId,
        planes: &ClipPlaneSet,
    ) -> Result<ClipHandle, ReflectionError>;

    /// Replace the planes of an attached clip primitive.
    fn update_clip_planes(&mut self, handle: ClipHandle, planes: &ClipPlaneSet);

    /// Detach and free a clip primitive.
    fn detach_clip_planes(&mut self, object: ObjectId, handle: ClipHandle);

    /// Allocate the off-screen target the reflection is rendered into.
    fn acquire_render_target(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<RenderTargetHandle, ReflectionError>;

    /// Free a target returned by [`SceneHost::acquire_render_target`].
    fn release_render_target(&mut self, target: RenderTargetHandle);

    /// Render the scene into `target` from `camera`, with clip planes in their
    /// reflected-pass orientation.
    fn render_reflection(&mut self, target: RenderTargetHandle, camera: &Camera);

    /// Start delivering frame and camera-change callbacks.
    fn bind_frame_hooks(&mut self) {}

    /// Stop delivering frame and camera-change callbacks.
    fn unbind_frame_hooks(&mut self) {}
}
