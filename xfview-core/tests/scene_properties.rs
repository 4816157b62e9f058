use nalgebra::Vector4;
use xfview_core::transform::translation_of;
use xfview_core::{
    render, Field, GeometryKind, Mat4, Projection, ProjectionMode, Scene, SceneParams, Vec3,
};

const EPS: f64 = 1e-9;

#[test]
fn identity_form_renders_identity_model() {
    let frame = render(&SceneParams::default());
    assert_eq!(frame.model, Mat4::identity());
    assert_eq!(frame.geometry, GeometryKind::Cube);
    assert_eq!(frame.camera.position, Vec3::new(0.0, 0.0, 5.0));
}

#[test]
fn perspective_form_values_reach_the_renderer_unchanged() {
    let mut params = SceneParams::default();
    params.set_from_text(Field::Fov, "45");
    params.set_from_text(Field::Aspect, "1");
    params.set_from_text(Field::Near, "0.1");
    params.set_from_text(Field::Far, "1000");

    let camera = render(&params).camera;
    assert_eq!(
        camera.projection,
        Projection::Perspective {
            fov: 45.0,
            aspect: 1.0
        }
    );
    assert_eq!((camera.near, camera.far), (0.1, 1000.0));
}

#[test]
fn object_in_front_of_default_camera_projects_to_screen_centre() {
    let frame = render(&SceneParams::default());
    let mvp = frame.camera.projection_matrix() * frame.camera.view_matrix() * frame.model;

    let clip = mvp * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert!(clip.w > 0.0);
    assert!((clip.x / clip.w).abs() < EPS);
    assert!((clip.y / clip.w).abs() < EPS);
    assert!((clip.z / clip.w).abs() < 1.0);
}

#[test]
fn local_translation_differs_from_world_camera_position() {
    let mut params = SceneParams::default();
    params.set(Field::RotationY, std::f64::consts::FRAC_PI_2);
    params.set(Field::TranslationX, 1.0);
    params.set(Field::CameraX, 1.0);

    let frame = render(&params);
    let object = translation_of(&frame.model);
    assert!((object - Vec3::new(0.0, 0.0, -1.0)).norm() < EPS);
    assert_eq!(frame.camera.position, Vec3::new(1.0, 0.0, 5.0));
}

#[test]
fn toggling_projection_repeatedly_stays_well_formed() {
    let mut scene = Scene::default();
    scene.params.set(Field::Aspect, 0.0);

    for _ in 0..6 {
        let mode = scene.params.camera.mode().toggled();
        scene.params.switch_projection(mode);
        let frame = scene.frame();
        assert_eq!(frame.camera.projection.mode(), mode);
        assert!(frame.camera.projection.aspect().is_finite());
        assert!(frame.camera.projection_matrix().iter().all(|v| v.is_finite()));
    }

    assert_eq!(scene.params.camera.mode(), ProjectionMode::Perspective);
}

#[test]
fn snapshot_text_tracks_refresh_only() {
    let mut scene = Scene::default();
    let initial = scene.snapshot_text();
    assert_eq!(initial, "1 0 0 0 | 0 1 0 0 | 0 0 1 0 | 0 0 0 1");

    scene.params.set_from_text(Field::TranslationZ, "4");
    scene.params.set_from_text(Field::ScaleX, "2");
    assert_eq!(scene.snapshot_text(), initial);

    scene.refresh_snapshot();
    assert_eq!(scene.snapshot_text(), "2 0 0 0 | 0 1 0 0 | 0 0 1 0 | 0 0 4 1");
}
