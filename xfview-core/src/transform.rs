/// Object transform composition and matrix builders
use nalgebra::{Matrix4, Vector3, Vector4};

/// Column-major 4x4 homogeneous matrix used throughout the workspace
pub type Mat4 = Matrix4<f64>;

/// Ordered (x, y, z) triple
pub type Vec3 = Vector3<f64>;

/// Rotation, translation and scale of the displayed object.
///
/// `translation` is expressed in the object's local frame *after* rotation:
/// a translation of `(1, 0, 0)` moves the object along its own rotated X
/// axis, not along world X. Camera placement uses absolute world coordinates
/// instead, see [`crate::projection::CameraPose::position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    /// Offset along the rotated local axes
    pub translation: Vec3,
    /// Per-axis scale factors; zero collapses an axis
    pub scale: Vec3,
}

impl TransformParams {
    pub fn new(rotation: Vec3, translation: Vec3, scale: Vec3) -> Self {
        Self {
            rotation,
            translation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self {
            rotation: Vec3::zeros(),
            translation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// The operations `compose` folds over, in application order
    pub fn ops(&self) -> [TransformOp; 5] {
        [
            TransformOp::RotateX(self.rotation.x),
            TransformOp::RotateY(self.rotation.y),
            TransformOp::RotateZ(self.rotation.z),
            TransformOp::Translate(self.translation),
            TransformOp::Scale(self.scale),
        ]
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::identity()
    }
}

/// A single step of the object transform, applied in the object's local frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    Translate(Vec3),
    Scale(Vec3),
}

impl TransformOp {
    pub fn matrix(&self) -> Mat4 {
        match *self {
            TransformOp::RotateX(angle) => Transform::rotation_x(angle),
            TransformOp::RotateY(angle) => Transform::rotation_y(angle),
            TransformOp::RotateZ(angle) => Transform::rotation_z(angle),
            TransformOp::Translate(t) => Transform::translation_matrix(t.x, t.y, t.z),
            TransformOp::Scale(s) => Transform::scale_matrix(s.x, s.y, s.z),
        }
    }

    /// Post-multiply the accumulated matrix by this operation
    pub fn apply(&self, accumulated: Mat4) -> Mat4 {
        accumulated * self.matrix()
    }
}

/// Build the object-to-world matrix `I · Rx · Ry · Rz · T · S`.
///
/// Every input is accepted as-is; NaN and infinities propagate into the
/// result.
pub fn compose(params: &TransformParams) -> Mat4 {
    params
        .ops()
        .iter()
        .fold(Mat4::identity(), |accumulated, op| op.apply(accumulated))
}

/// Translation column of a homogeneous matrix
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
}

/// Apply a homogeneous matrix to a point (w = 1) without perspective divide
pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
    let p = matrix * Vector4::new(point.x, point.y, point.z, 1.0);
    Vec3::new(p.x, p.y, p.z)
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn rotation_x(angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, -s, 0.0, //
            0.0, s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_y(angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::new(
            c, 0.0, s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_z(angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::new(
            c, -s, 0.0, 0.0, //
            s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Euler rotation with intrinsic X, Y, Z order (`Rx · Ry · Rz`)
    pub fn rotation_matrix(rotation: &Vec3) -> Mat4 {
        Self::rotation_x(rotation.x) * Self::rotation_y(rotation.y) * Self::rotation_z(rotation.z)
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(sx, sy, sz))
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(model: &Mat4, view: &Mat4, projection: &Mat4) -> Mat4 {
        projection * view * model
    }
}
