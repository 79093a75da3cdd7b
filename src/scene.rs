// Scene graph for the vmath3d demo

use vmath3d::{Matrix4, Point3, Quat, Transform3, Vector3};

/// Represents an object placed in the scene.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform3,
}

impl SceneObject {
    /// Creates a scene object from scale, rotation and position.
    pub fn new(name: impl Into<String>, scale: Vector3, rotation: Quat, position: Vector3) -> Self {
        Self {
            name: name.into(),
            transform: Transform3::from_scale_rotation_translation(&scale, &rotation, &position),
        }
    }

    /// World-space position of the object's origin.
    pub fn position(&self) -> Point3 {
        Point3::from(self.transform.translation())
    }
}

/// Camera that eases through keyframe orientations around a target.
#[derive(Debug, Clone)]
pub struct Camera {
    pub target: Point3,
    pub distance: f32,
    pub fovy_radians: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
    keyframes: [Quat; 4],
}

impl Camera {
    /// Creates a camera orbiting `target` through four orientations.
    pub fn new(target: Point3, distance: f32, keyframes: [Quat; 4]) -> Self {
        Self {
            target,
            distance,
            fovy_radians: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            z_near: 0.1,
            z_far: 100.0,
            keyframes,
        }
    }

    /// Orientation at `t` in `[0, 1]`, a squad through the keyframes.
    pub fn orientation(&self, t: f32) -> Quat {
        let [q0, q1, q2, q3] = &self.keyframes;
        Quat::squad(t, q0, q1, q2, q3).normalize()
    }

    /// Eye position at `t`: the orientation applied to +Z, pushed out by
    /// `distance`.
    pub fn eye(&self, t: f32) -> Point3 {
        let offset = self.orientation(t).rotate(&Vector3::Z) * self.distance;
        self.target + offset
    }

    /// Projection times view at `t`.
    pub fn view_projection(&self, t: f32) -> Matrix4 {
        let view = Matrix4::look_at(&self.eye(t), &self.target, &Vector3::Y);
        let projection = Matrix4::perspective(self.fovy_radians, self.aspect, self.z_near, self.z_far);
        projection * view
    }
}

/// Represents the entire 3D scene.
#[derive(Debug, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Creates a new, empty scene.
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Adds an object to the scene.
    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Gets a mutable reference to an object by name.
    pub fn get_object_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|obj| obj.name == name)
    }

    /// Gets an immutable reference to an object by name.
    pub fn get_object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.name == name)
    }

    /// Model-view-projection matrix of every object, in insertion order.
    pub fn mvp_matrices<'a>(
        &'a self,
        view_projection: &'a Matrix4,
    ) -> impl Iterator<Item = (&'a str, Matrix4)> + 'a {
        self.objects
            .iter()
            .map(move |obj| (obj.name.as_str(), *view_projection * obj.transform))
    }
}
