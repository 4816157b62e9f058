/// XFView Web - WASM bindings for a browser form layer
///
/// The page owns the form and the canvas; this module owns the scene state
/// and hands back matrices ready for a WebGL renderer.
use wasm_bindgen::prelude::*;
use xfview_core::{
    scene::flatten, Field, GeometryKind, Mat4, ProjectionMode, Scene, SceneParams,
};

fn js_error(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebVisualizer {
    scene: Scene,
}

#[wasm_bindgen]
impl WebVisualizer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebVisualizer {
        WebVisualizer {
            scene: Scene::new(SceneParams::default()),
        }
    }

    /// Apply the raw text of a form field; non-numeric text counts as 0.
    /// Returns false when the field belongs to the inactive projection.
    pub fn set_field(&mut self, name: &str, text: &str) -> Result<bool, JsValue> {
        let field = name.parse::<Field>().map_err(js_error)?;
        Ok(self.scene.params.set_from_text(field, text))
    }

    /// Current value of a field, `undefined` when it is inactive
    pub fn field(&self, name: &str) -> Result<Option<f64>, JsValue> {
        let field = name.parse::<Field>().map_err(js_error)?;
        Ok(self.scene.params.get(field))
    }

    pub fn set_projection(&mut self, name: &str) -> Result<(), JsValue> {
        let mode = name.parse::<ProjectionMode>().map_err(js_error)?;
        self.scene.params.switch_projection(mode);
        Ok(())
    }

    pub fn set_geometry(&mut self, name: &str) -> Result<(), JsValue> {
        let geometry = name.parse::<GeometryKind>().map_err(js_error)?;
        self.scene.params.set_geometry(geometry);
        Ok(())
    }

    pub fn geometry(&self) -> String {
        self.scene.params.geometry.to_string()
    }

    pub fn projection(&self) -> String {
        self.scene.params.camera.mode().to_string()
    }

    /// Copy the live object matrix into the snapshot
    pub fn refresh(&mut self) {
        self.scene.refresh_snapshot();
    }

    /// Column-major object-to-world matrix
    pub fn model_matrix(&self) -> Vec<f64> {
        to_vec(&self.scene.frame().model)
    }

    pub fn view_matrix(&self) -> Vec<f64> {
        to_vec(&self.scene.frame().camera.view_matrix())
    }

    pub fn projection_matrix(&self) -> Vec<f64> {
        to_vec(&self.scene.frame().camera.projection_matrix())
    }

    pub fn snapshot(&self) -> Vec<f64> {
        to_vec(self.scene.snapshot())
    }

    pub fn snapshot_text(&self) -> String {
        self.scene.snapshot_text()
    }
}

impl Default for WebVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_vec(matrix: &Mat4) -> Vec<f64> {
    flatten(matrix).to_vec()
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!("xfview-web ready");
    Ok(())
}
