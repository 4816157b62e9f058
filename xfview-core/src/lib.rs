/// XFView Core Library - Object transform and camera projection logic
///
/// This library provides the stateless core of the transform visualizer:
/// composing object matrices, building camera state for perspective and
/// orthographic models, parsing form fields and assembling render frames.

pub mod geometry;
pub mod input;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use geometry::{GeometryKind, Mesh, Triangle, Vertex};
pub use input::{parse_field, Field};
pub use projection::{project, CameraModel, CameraPose, Projection, ProjectionMode, RendererCameraState};
pub use scene::{format_matrix, render, Frame, Scene, SceneParams};
pub use transform::{compose, Mat4, Transform, TransformParams, Vec3};
