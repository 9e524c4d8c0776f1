//! The water reflection component: owns the plane, the surface, the clip
//! manager and the off-screen target, and runs them from host callbacks.
//!
//! Lifecycle: [`WaterReflection::new`] yields an `Initialized` component,
//! [`WaterReflection::activate`] makes it `Active`, and
//! [`WaterReflection::dispose`] makes it `Disposed` for good.

use glam::Vec3;
use mirrorwater_config::WaterConfig;
use tracing::{info, trace, warn};

use crate::camera::Camera;
use crate::clip::ReflectionClipManager;
use crate::error::ReflectionError;
use crate::host::{ObjectId, RenderTargetHandle, SceneHost};
use crate::mirror::reflect_across;
use crate::plane::{WaterPlane, centroid};
use crate::surface::{WaterSurface, WaterUniform};

/// Where a [`WaterReflection`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Built and registered, no render target or frame hooks yet.
    Initialized,
    /// Rendering a reflection every frame.
    Active,
    /// Resources released; only a fresh construction can follow.
    Disposed,
}

/// Planar water reflection driven by a host renderer.
///
/// The host is passed into every call instead of being stored, so the
/// component never outlives or aliases the scene it works on. Call
/// [`WaterReflection::dispose`] before dropping it; dropping alone does not
/// give the host its resources back.
#[derive(Debug)]
pub struct WaterReflection {
    config: WaterConfig,
    boundary: Vec<Vec3>,
    plane: WaterPlane,
    surface: WaterSurface,
    clip: ReflectionClipManager,
    target: Option<RenderTargetHandle>,
    state: LifecycleState,
    last_reflection: Option<Camera>,
}

impl WaterReflection {
    /// Validate `config`, build the water surface and register the
    /// configured reflectables.
    ///
    /// # Errors
    ///
    /// [`ReflectionError::InvalidArgument`] for a non-unit up axis, a
    /// non-finite height, a zero-sized target or a boundary that does not
    /// form a polygon. Registration errors are passed through, with any
    /// objects registered so far released again.
    pub fn new<H: SceneHost + ?Sized>(
        host: &mut H,
        config: WaterConfig,
    ) -> Result<Self, ReflectionError> {
        if !config.height.is_finite() {
            return Err(ReflectionError::InvalidArgument(format!(
                "water height {} is not finite",
                config.height
            )));
        }
        let (width, height) = config.target_size;
        if width == 0 || height == 0 {
            return Err(ReflectionError::InvalidArgument(format!(
                "reflection target size {width}x{height} is empty"
            )));
        }

        let up = Vec3::from_array(config.up_axis);
        let boundary: Vec<Vec3> = config.positions.iter().copied().map(Vec3::from_array).collect();
        let anchor = centroid(&boundary)?;
        let plane = WaterPlane::horizontal(up, anchor, config.height)?;
        let surface = WaterSurface::from_boundary(&boundary, &plane)?;

        let mut clip = ReflectionClipManager::new(up, config.height);
        for &id in &config.reflectables {
            if let Err(err) = clip.register_object(host, ObjectId(id)) {
                clip.clear(host);
                return Err(err);
            }
        }

        info!(
            height = config.height,
            boundary = boundary.len(),
            reflectables = clip.len(),
            "water reflection initialized"
        );

        Ok(Self {
            config,
            boundary,
            plane,
            surface,
            clip,
            target: None,
            state: LifecycleState::Initialized,
            last_reflection: None,
        })
    }

    /// Acquire the reflection target and start receiving frame callbacks.
    ///
    /// # Errors
    ///
    /// [`ReflectionError::PreconditionFailed`] unless `Initialized`; a failed
    /// target allocation leaves the component `Initialized`.
    pub fn activate<H: SceneHost + ?Sized>(&mut self, host: &mut H) -> Result<(), ReflectionError> {
        if self.state != LifecycleState::Initialized {
            return Err(ReflectionError::PreconditionFailed(format!(
                "cannot activate water reflection in state {:?}",
                self.state
            )));
        }
        let (width, height) = self.config.target_size;
        let target = host.acquire_render_target(width, height)?;
        host.bind_frame_hooks();
        self.target = Some(target);
        self.state = LifecycleState::Active;
        info!(width, height, "water reflection active");
        Ok(())
    }

    /// Per-frame work: mirror `live_camera` across the water and have the
    /// host render the reflection target with it.
    ///
    /// Returns the reflected camera.
    ///
    /// # Errors
    ///
    /// [`ReflectionError::PreconditionFailed`] unless `Active`.
    pub fn on_frame<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        live_camera: &Camera,
    ) -> Result<Camera, ReflectionError> {
        let target = match (self.state, self.target) {
            (LifecycleState::Active, Some(target)) => target,
            (state, _) => {
                return Err(ReflectionError::PreconditionFailed(format!(
                    "frame update in state {state:?}"
                )));
            }
        };

        let reflected = reflect_across(live_camera, &self.plane);
        host.render_reflection(target, &reflected);
        trace!(position = %reflected.position, "reflection rendered");
        self.last_reflection = Some(reflected);
        Ok(reflected)
    }

    /// Camera-change notification; same work as [`WaterReflection::on_frame`].
    pub fn on_camera_changed<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        live_camera: &Camera,
    ) -> Result<Camera, ReflectionError> {
        self.on_frame(host, live_camera)
    }

    /// Move the water to `height`, updating clip planes, plane and surface
    /// together.
    ///
    /// Completes before returning, so the next frame reflects across the
    /// same height the clip planes use.
    ///
    /// # Errors
    ///
    /// [`ReflectionError::PreconditionFailed`] once disposed;
    /// [`ReflectionError::InvalidArgument`] for a non-finite height.
    pub fn set_height<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        height: f32,
    ) -> Result<(), ReflectionError> {
        self.ensure_not_disposed("set water height")?;
        let plane = self.plane.with_height(height);
        let surface = WaterSurface::from_boundary(&self.boundary, &plane)?;
        self.clip.update_height(host, height)?;
        self.plane = plane;
        self.surface = surface;
        self.config.height = height;
        Ok(())
    }

    /// Add an object to the reflection.
    ///
    /// # Errors
    ///
    /// [`ReflectionError::PreconditionFailed`] once disposed or when the host
    /// has nothing renderable for `object`.
    pub fn register_object<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        object: ObjectId,
    ) -> Result<(), ReflectionError> {
        self.ensure_not_disposed("register object")?;
        self.clip.register_object(host, object)
    }

    /// Remove an object from the reflection; `Ok(false)` if it was not part
    /// of it.
    ///
    /// # Errors
    ///
    /// [`ReflectionError::PreconditionFailed`] once disposed.
    pub fn unregister_object<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        object: ObjectId,
    ) -> Result<bool, ReflectionError> {
        self.ensure_not_disposed("unregister object")?;
        Ok(self.clip.unregister_object(host, object))
    }

    /// Release the render target, every clip plane and the frame hooks.
    ///
    /// Safe to call repeatedly; only the first call touches the host.
    pub fn dispose<H: SceneHost + ?Sized>(&mut self, host: &mut H) {
        if self.state == LifecycleState::Disposed {
            return;
        }
        if let Some(target) = self.target.take() {
            host.release_render_target(target);
        }
        let released = self.clip.clear(host);
        if self.state == LifecycleState::Active {
            host.unbind_frame_hooks();
        }
        self.state = LifecycleState::Disposed;
        self.last_reflection = None;
        info!(released, "water reflection disposed");
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The water plane reflections are computed across.
    pub fn plane(&self) -> &WaterPlane {
        &self.plane
    }

    /// Water surface geometry for the host to draw.
    pub fn surface(&self) -> &WaterSurface {
        &self.surface
    }

    /// Effective configuration, defaults merged in.
    pub fn config(&self) -> &WaterConfig {
        &self.config
    }

    /// Clip planes currently attached to the reflected objects.
    pub fn clip_manager(&self) -> &ReflectionClipManager {
        &self.clip
    }

    /// The off-screen target while `Active`.
    pub fn render_target(&self) -> Option<RenderTargetHandle> {
        self.target
    }

    /// The camera used for the most recent reflection render.
    pub fn last_reflection(&self) -> Option<&Camera> {
        self.last_reflection.as_ref()
    }

    /// Material uniform for the current plane at `time` seconds.
    pub fn uniform(&self, time: f32) -> WaterUniform {
        WaterUniform::from_config(&self.config, &self.plane, time)
    }

    fn ensure_not_disposed(&self, action: &str) -> Result<(), ReflectionError> {
        if self.state == LifecycleState::Disposed {
            warn!(action, "water reflection already disposed");
            return Err(ReflectionError::PreconditionFailed(format!(
                "cannot {action} after dispose"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "water_tests.rs"]
mod tests;
