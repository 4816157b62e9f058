/// Camera pose, camera models and projection utilities
use std::fmt;
use std::str::FromStr;

use anyhow::bail;

use crate::transform::{Mat4, Transform, Vec3};

/// Field of view a perspective model gets when it is (re)created by a switch
pub const DEFAULT_FOV: f64 = 45.0;
pub const DEFAULT_NEAR: f64 = 0.1;
pub const DEFAULT_FAR: f64 = 1000.0;

/// Projection mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProjectionMode::Perspective => "perspective",
            ProjectionMode::Orthographic => "ortho",
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perspective" | "persp" => Ok(ProjectionMode::Perspective),
            "ortho" | "orthographic" => Ok(ProjectionMode::Orthographic),
            other => bail!("unknown projection `{other}` (expected `perspective` or `ortho`)"),
        }
    }
}

/// Frustum extents of one camera model
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Vertical field of view in degrees and width/height ratio
    Perspective { fov: f64, aspect: f64 },
    Orthographic {
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
    },
}

impl Projection {
    pub fn mode(&self) -> ProjectionMode {
        match self {
            Projection::Perspective { .. } => ProjectionMode::Perspective,
            Projection::Orthographic { .. } => ProjectionMode::Orthographic,
        }
    }

    /// Width/height ratio described by these extents
    pub fn aspect(&self) -> f64 {
        match *self {
            Projection::Perspective { aspect, .. } => aspect,
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
            } => (right - left) / (top - bottom),
        }
    }

    /// Default extents of `mode` for a given aspect ratio.
    ///
    /// A non-finite or non-positive aspect is replaced by 1.0 so the derived
    /// extents are always finite.
    pub fn defaults_for(mode: ProjectionMode, aspect: f64) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };

        match mode {
            ProjectionMode::Perspective => Projection::Perspective {
                fov: DEFAULT_FOV,
                aspect,
            },
            ProjectionMode::Orthographic => {
                let half_height = 1.0 / aspect;
                Projection::Orthographic {
                    left: -1.0,
                    right: 1.0,
                    bottom: -half_height,
                    top: half_height,
                }
            }
        }
    }
}

/// Camera model: projection extents plus the clip planes shared by both kinds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraModel {
    pub projection: Projection,
    pub near: f64,
    pub far: f64,
}

impl CameraModel {
    pub fn perspective(fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            projection: Projection::Perspective { fov, aspect },
            near,
            far,
        }
    }

    pub fn orthographic(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        Self {
            projection: Projection::Orthographic {
                left,
                right,
                bottom,
                top,
            },
            near,
            far,
        }
    }

    pub fn mode(&self) -> ProjectionMode {
        self.projection.mode()
    }

    /// Switch to another projection mode.
    ///
    /// Switching re-derives the new mode's default extents from the current
    /// aspect ratio. Near and far are kept. Switching to the active mode
    /// changes nothing, and switching away discards the edits of the old mode.
    pub fn switch_to(&self, mode: ProjectionMode) -> Self {
        if mode == self.mode() {
            return *self;
        }

        let projection = Projection::defaults_for(mode, self.projection.aspect());
        log::debug!("camera switched to {mode}: {projection:?}");

        Self {
            projection,
            near: self.near,
            far: self.far,
        }
    }
}

impl Default for CameraModel {
    fn default() -> Self {
        Self::perspective(DEFAULT_FOV, 1.0, DEFAULT_NEAR, DEFAULT_FAR)
    }
}

/// Camera placement in absolute world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// World-space position, set directly (no local-frame composition)
    pub position: Vec3,
    /// Absolute Euler angles in radians, X then Y then Z
    pub rotation: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            rotation: Vec3::zeros(),
        }
    }
}

/// Everything a renderer needs to place and project the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererCameraState {
    pub position: Vec3,
    pub rotation: Vec3,
    pub projection: Projection,
    pub near: f64,
    pub far: f64,
}

/// Combine a camera model and pose into renderer camera state.
///
/// All values pass through untouched; degenerate extents or clip planes are
/// the renderer's concern.
pub fn project(model: &CameraModel, pose: &CameraPose) -> RendererCameraState {
    RendererCameraState {
        position: pose.position,
        rotation: pose.rotation,
        projection: model.projection,
        near: model.near,
        far: model.far,
    }
}

impl RendererCameraState {
    /// Camera-to-world matrix
    pub fn world_matrix(&self) -> Mat4 {
        Transform::translation_matrix(self.position.x, self.position.y, self.position.z)
            * Transform::rotation_matrix(&self.rotation)
    }

    /// Create the view matrix (inverse of the camera's world matrix)
    pub fn view_matrix(&self) -> Mat4 {
        let rotation = Transform::rotation_matrix(&self.rotation);
        let p = self.position;
        rotation.transpose() * Transform::translation_matrix(-p.x, -p.y, -p.z)
    }

    /// Create the projection matrix.
    ///
    /// Degenerate input yields infinite or NaN entries instead of panicking.
    pub fn projection_matrix(&self) -> Mat4 {
        let (near, far) = (self.near, self.far);

        match self.projection {
            Projection::Perspective { fov, aspect } => {
                let top = near * (fov.to_radians() / 2.0).tan();
                let height = 2.0 * top;
                let width = aspect * height;
                let left = -width / 2.0;
                frustum(left, left + width, top - height, top, near, far)
            }
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
            } => orthographic(left, right, bottom, top, near, far),
        }
    }
}

fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Mat4 {
    let x = 2.0 * near / (right - left);
    let y = 2.0 * near / (top - bottom);
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c = -(far + near) / (far - near);
    let d = -2.0 * far * near / (far - near);

    Mat4::new(
        x, 0.0, a, 0.0, //
        0.0, y, b, 0.0, //
        0.0, 0.0, c, d, //
        0.0, 0.0, -1.0, 0.0,
    )
}

fn orthographic(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Mat4 {
    let w = 1.0 / (right - left);
    let h = 1.0 / (top - bottom);
    let p = 1.0 / (far - near);

    Mat4::new(
        2.0 * w, 0.0, 0.0, -(right + left) * w, //
        0.0, 2.0 * h, 0.0, -(top + bottom) * h, //
        0.0, 0.0, -2.0 * p, -(far + near) * p, //
        0.0, 0.0, 0.0, 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    const EPS: f64 = 1e-9;

    fn ndc_depth(projection: &Mat4, view_z: f64) -> f64 {
        let clip = projection * Vector4::new(0.0, 0.0, view_z, 1.0);
        clip.z / clip.w
    }

    #[test]
    fn test_perspective_passes_through() {
        let model = CameraModel::perspective(45.0, 1.0, 0.1, 1000.0);
        let state = project(&model, &CameraPose::default());

        assert_eq!(
            state.projection,
            Projection::Perspective {
                fov: 45.0,
                aspect: 1.0
            }
        );
        assert_eq!(state.near, 0.1);
        assert_eq!(state.far, 1000.0);
        assert_eq!(state.position, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_garbage_is_not_validated() {
        let model = CameraModel::orthographic(3.0, -3.0, 1.0, 1.0, 10.0, -10.0);
        let pose = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(7.0, -8.0, 9.0));
        let state = project(&model, &pose);

        assert_eq!(state.projection, model.projection);
        assert_eq!((state.near, state.far), (10.0, -10.0));
        assert_eq!(state.rotation, Vec3::new(7.0, -8.0, 9.0));

        // Zero-height extents must not panic.
        let matrix = state.projection_matrix();
        assert!(matrix.iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_switch_derives_aspect_bounds() {
        let model = CameraModel::perspective(60.0, 2.0, 0.5, 50.0);
        let ortho = model.switch_to(ProjectionMode::Orthographic);

        assert_eq!(
            ortho.projection,
            Projection::Orthographic {
                left: -1.0,
                right: 1.0,
                bottom: -0.5,
                top: 0.5
            }
        );
        assert_eq!((ortho.near, ortho.far), (0.5, 50.0));
    }

    #[test]
    fn test_switch_back_rederives_defaults() {
        let edited = CameraModel::orthographic(-4.0, 4.0, -1.0, 1.0, 0.1, 100.0);
        let back = edited.switch_to(ProjectionMode::Perspective);

        assert_eq!(
            back.projection,
            Projection::Perspective {
                fov: DEFAULT_FOV,
                aspect: 4.0
            }
        );

        let again = back.switch_to(ProjectionMode::Orthographic);
        assert_eq!(
            again.projection,
            Projection::Orthographic {
                left: -1.0,
                right: 1.0,
                bottom: -0.25,
                top: 0.25
            }
        );
    }

    #[test]
    fn test_switch_to_same_mode_keeps_edits() {
        let edited = CameraModel::orthographic(-7.0, 2.0, -3.0, 9.0, 0.1, 100.0);
        assert_eq!(edited.switch_to(ProjectionMode::Orthographic), edited);
    }

    #[test]
    fn test_switching_always_yields_finite_fields() {
        let degenerate = [
            CameraModel::perspective(45.0, 0.0, 0.1, 1000.0),
            CameraModel::perspective(45.0, -3.0, 0.1, 1000.0),
            CameraModel::perspective(f64::NAN, f64::INFINITY, 0.1, 1000.0),
            CameraModel::orthographic(0.0, 0.0, 0.0, 0.0, 0.1, 1000.0),
            CameraModel::orthographic(1.0, -1.0, -1.0, 1.0, 0.1, 1000.0),
        ];

        for model in degenerate {
            let mut current = model;
            for _ in 0..4 {
                current = current.switch_to(current.mode().toggled());
                let fields: Vec<f64> = match current.projection {
                    Projection::Perspective { fov, aspect } => vec![fov, aspect],
                    Projection::Orthographic {
                        left,
                        right,
                        bottom,
                        top,
                    } => vec![left, right, bottom, top],
                };
                assert!(fields.iter().all(|v| v.is_finite()), "{current:?}");
            }
        }
    }

    #[test]
    fn test_perspective_maps_clip_planes() {
        let state = project(&CameraModel::perspective(45.0, 1.5, 0.1, 1000.0), &CameraPose::default());
        let projection = state.projection_matrix();

        assert!((ndc_depth(&projection, -0.1) + 1.0).abs() < 1e-6);
        assert!((ndc_depth(&projection, -1000.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthographic_maps_bounds() {
        let state = project(
            &CameraModel::orthographic(-2.0, 4.0, -1.0, 3.0, 1.0, 11.0),
            &CameraPose::default(),
        );
        let projection = state.projection_matrix();

        let corner = projection * Vector4::new(4.0, 3.0, -11.0, 1.0);
        assert!((corner.x - 1.0).abs() < EPS);
        assert!((corner.y - 1.0).abs() < EPS);
        assert!((corner.z - 1.0).abs() < EPS);
        assert!((ndc_depth(&projection, -1.0) + 1.0).abs() < EPS);
    }

    #[test]
    fn test_view_matrix_inverts_world_matrix() {
        let pose = CameraPose::new(Vec3::new(1.0, -2.0, 5.0), Vec3::new(0.3, 1.1, -0.4));
        let state = project(&CameraModel::default(), &pose);

        let product = state.view_matrix() * state.world_matrix();
        assert!((product - Mat4::identity()).norm() < EPS);

        let origin = state.view_matrix() * Vector4::new(1.0, -2.0, 5.0, 1.0);
        assert!(origin.xyz().norm() < EPS);
    }

    #[test]
    fn test_projection_mode_names() {
        assert_eq!("ortho".parse::<ProjectionMode>().unwrap(), ProjectionMode::Orthographic);
        assert_eq!(" Perspective ".parse::<ProjectionMode>().unwrap(), ProjectionMode::Perspective);
        assert!("fisheye".parse::<ProjectionMode>().is_err());
        assert_eq!(ProjectionMode::Perspective.toggled().to_string(), "ortho");
    }
}
