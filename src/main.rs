// vmath3d demo: a camera sweeping around a small scene

mod scene;

use scene::{Camera, Scene, SceneObject};
use vmath3d::{Matrix4, Point3, Quat, Transform3, Vector3};

const FRAMES: u32 = 8;

// Uniform buffer structure for the MVP matrix
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    mvp: [[f32; 4]; 4],
}

impl Uniforms {
    fn new(mvp: &Matrix4) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
        }
    }
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::new("floor", Vector3::new(10.0, 0.1, 10.0), Quat::IDENTITY, Vector3::new(0.0, -1.0, 0.0)));
    scene.add_object(SceneObject::new(
        "cube",
        Vector3::splat(1.0),
        Quat::rotation_axis(0.7, &Vector3::new(1.0, 1.0, 0.0).normalize()),
        Vector3::ZERO,
    ));
    scene.add_object(SceneObject::new(
        "pillar",
        Vector3::new(0.5, 3.0, 0.5),
        Quat::rotation_y(0.25),
        Vector3::new(3.0, 0.5, -2.0),
    ));
    scene
}

fn main() {
    // Initialize logging
    env_logger::init();

    let mut scene = build_scene();
    let camera = Camera::new(
        Point3::ORIGIN,
        8.0,
        [
            Quat::rotation_x(-0.3),
            Quat::rotation_y(1.0) * Quat::rotation_x(-0.4),
            Quat::rotation_y(2.2) * Quat::rotation_x(-0.2),
            Quat::rotation_y(3.0) * Quat::rotation_x(-0.5),
        ],
    );
    log::info!("{} objects, {} frames", scene.objects.len(), FRAMES);

    for frame in 0..=FRAMES {
        let t = frame as f32 / FRAMES as f32;
        let view_projection = camera.view_projection(t);
        log::info!("frame {frame}: eye {} orientation {}", camera.eye(t), camera.orientation(t));

        // Spin the cube about its own vertical axis
        if let Some(cube) = scene.get_object_mut("cube") {
            cube.transform *= Transform3::rotation_y(0.2);
        }
        if let Some(pillar) = scene.get_object("pillar") {
            let distance = pillar.position().dist(&camera.eye(t));
            log::debug!("pillar is {distance:.2} units from the eye");
        }

        for (name, mvp) in scene.mvp_matrices(&view_projection) {
            let uniforms = Uniforms::new(&mvp);
            let bytes: &[u8] = bytemuck::bytes_of(&uniforms);
            let clip = mvp * Point3::ORIGIN;
            log::debug!(
                "{name}: origin at ndc ({:.3}, {:.3}, {:.3}), {} uniform bytes\n{mvp}",
                clip.x() / clip.w(),
                clip.y() / clip.w(),
                clip.z() / clip.w(),
                bytes.len(),
            );
        }
    }

    // Round trip the camera through its inverse as a sanity check.
    let view_projection = camera.view_projection(0.5);
    let residual = (view_projection * view_projection.inverse() - Matrix4::IDENTITY)
        .abs_per_elem()
        .to_array()
        .into_iter()
        .fold(0.0_f32, f32::max);
    log::info!("view-projection inverse residual {residual:e}");
}
