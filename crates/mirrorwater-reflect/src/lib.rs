//! Planar water reflections: mirrored cameras, per-object clip planes, and the
//! lifecycle that drives both from the host renderer's frame loop.

pub mod camera;
pub mod clip;
pub mod error;
pub mod frustum;
pub mod host;
pub mod mirror;
pub mod plane;
pub mod surface;
pub mod water;

pub use camera::{Camera, Projection};
pub use clip::{ClipPlane, ClipPlaneSet, ReflectionClipManager, RenderPassKind};
pub use error::ReflectionError;
pub use frustum::{FRUSTUM_EDGES, FrustumOutline, FrustumShape};
pub use host::{ClipHandle, ObjectId, RenderTargetHandle, SceneHost};
pub use mirror::{reflect, reflect_across};
pub use plane::{WaterPlane, centroid};
pub use surface::{WaterSurface, WaterUniform};
pub use water::{LifecycleState, WaterReflection};
