/// Example: Render one frame to stdout without entering the interactive UI
///
/// Usage: cargo run --example print_frame -- [GEOMETRY] [PROJECTION]

use std::env;
use xfview_core::{format_matrix, Mesh, Scene};
use xfview_terminal::{params_from_args, AsciiRenderer};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut params = params_from_args(env::args().skip(1))?;
    params.transform.rotation.x = 0.5;
    params.transform.rotation.y = 0.7;

    let scene = Scene::new(params);
    let frame = scene.frame();

    let mut renderer = AsciiRenderer::new(60, 24);
    renderer.render_frame(&frame, &Mesh::from_kind(frame.geometry));
    for row in renderer.rows() {
        println!("{row}");
    }

    println!("Model:    {}", format_matrix(&frame.model));
    println!("View:     {}", format_matrix(&frame.camera.view_matrix()));
    println!("Project:  {}", format_matrix(&frame.camera.projection_matrix()));
    Ok(())
}
