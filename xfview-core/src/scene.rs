/// Parameter state of the visualizer and the frame handed to renderers
use crate::geometry::GeometryKind;
use crate::input::{parse_field, Field};
use crate::projection::{project, CameraModel, CameraPose, Projection, ProjectionMode, RendererCameraState};
use crate::transform::{compose, Mat4, TransformParams};

/// Everything the form edits
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneParams {
    pub transform: TransformParams,
    pub pose: CameraPose,
    pub camera: CameraModel,
    pub geometry: GeometryKind,
}

/// What a renderer consumes for one redraw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Object-to-world matrix
    pub model: Mat4,
    pub geometry: GeometryKind,
    pub camera: RendererCameraState,
}

/// Recompute the whole frame from the current parameters
pub fn render(params: &SceneParams) -> Frame {
    Frame {
        model: compose(&params.transform),
        geometry: params.geometry,
        camera: project(&params.camera, &params.pose),
    }
}

impl SceneParams {
    /// Current value of a field, `None` for extents of the inactive projection
    pub fn get(&self, field: Field) -> Option<f64> {
        let mut params = *self;
        params.slot(field).map(|value| *value)
    }

    /// Set a field. Returns false (and changes nothing) for extents of the
    /// inactive projection.
    pub fn set(&mut self, field: Field, value: f64) -> bool {
        match self.slot(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => {
                log::debug!("{field} is not editable with a {} camera", self.camera.mode());
                false
            }
        }
    }

    /// Set a field from form text; unparsable text counts as zero
    pub fn set_from_text(&mut self, field: Field, text: &str) -> bool {
        self.set(field, parse_field(text))
    }

    /// Move a field by a number of steps
    pub fn nudge(&mut self, field: Field, steps: f64) -> bool {
        match self.get(field) {
            Some(value) => self.set(field, value + steps * field.step()),
            None => false,
        }
    }

    pub fn switch_projection(&mut self, mode: ProjectionMode) {
        self.camera = self.camera.switch_to(mode);
    }

    pub fn set_geometry(&mut self, geometry: GeometryKind) {
        self.geometry = geometry;
    }

    fn slot(&mut self, field: Field) -> Option<&mut f64> {
        let transform = &mut self.transform;
        let pose = &mut self.pose;
        let camera = &mut self.camera;

        let slot = match field {
            Field::RotationX => &mut transform.rotation.x,
            Field::RotationY => &mut transform.rotation.y,
            Field::RotationZ => &mut transform.rotation.z,
            Field::TranslationX => &mut transform.translation.x,
            Field::TranslationY => &mut transform.translation.y,
            Field::TranslationZ => &mut transform.translation.z,
            Field::ScaleX => &mut transform.scale.x,
            Field::ScaleY => &mut transform.scale.y,
            Field::ScaleZ => &mut transform.scale.z,
            Field::CameraX => &mut pose.position.x,
            Field::CameraY => &mut pose.position.y,
            Field::CameraZ => &mut pose.position.z,
            Field::CameraRotationX => &mut pose.rotation.x,
            Field::CameraRotationY => &mut pose.rotation.y,
            Field::CameraRotationZ => &mut pose.rotation.z,
            Field::Near => &mut camera.near,
            Field::Far => &mut camera.far,
            Field::Fov | Field::Aspect | Field::Left | Field::Right | Field::Bottom | Field::Top => {
                return extent_slot(&mut camera.projection, field);
            }
        };

        Some(slot)
    }
}

fn extent_slot(projection: &mut Projection, field: Field) -> Option<&mut f64> {
    match projection {
        Projection::Perspective { fov, aspect } => match field {
            Field::Fov => Some(fov),
            Field::Aspect => Some(aspect),
            _ => None,
        },
        Projection::Orthographic {
            left,
            right,
            bottom,
            top,
        } => match field {
            Field::Left => Some(left),
            Field::Right => Some(right),
            Field::Bottom => Some(bottom),
            Field::Top => Some(top),
            _ => None,
        },
    }
}

/// Live parameters plus the snapshot matrix shown in the display panel.
///
/// The snapshot is only replaced by [`Scene::refresh_snapshot`]; editing
/// parameters leaves it stale.
#[derive(Debug, Clone)]
pub struct Scene {
    pub params: SceneParams,
    snapshot: Mat4,
}

impl Scene {
    pub fn new(params: SceneParams) -> Self {
        Self {
            snapshot: compose(&params.transform),
            params,
        }
    }

    pub fn frame(&self) -> Frame {
        render(&self.params)
    }

    pub fn snapshot(&self) -> &Mat4 {
        &self.snapshot
    }

    pub fn refresh_snapshot(&mut self) {
        self.snapshot = compose(&self.params.transform);
        log::debug!("snapshot refreshed: {}", format_matrix(&self.snapshot));
    }

    pub fn snapshot_text(&self) -> String {
        format_matrix(&self.snapshot)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneParams::default())
    }
}

/// Matrix elements in storage (column-major) order
pub fn flatten(matrix: &Mat4) -> [f64; 16] {
    let mut elements = [0.0; 16];
    elements.copy_from_slice(matrix.as_slice());
    elements
}

/// Four groups of four values in storage order, groups separated by ` | `
pub fn format_matrix(matrix: &Mat4) -> String {
    flatten(matrix)
        .chunks(4)
        .map(|group| {
            group
                .iter()
                // -0 prints as 0
                .map(|value| (value + 0.0).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
