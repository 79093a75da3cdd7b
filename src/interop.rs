// Conversions to and from glam, which shares the column-major layout.

use crate::{Matrix3, Matrix4, Point3, Quat, Transform3, Vector3, Vector4};

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Self::from(v.to_array())
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::from_array(v.to_array())
    }
}

impl From<glam::Vec3> for Point3 {
    fn from(v: glam::Vec3) -> Self {
        Self::from(v.to_array())
    }
}

impl From<Point3> for glam::Vec3 {
    fn from(p: Point3) -> Self {
        glam::Vec3::from_array(p.to_array())
    }
}

impl From<glam::Vec4> for Vector4 {
    fn from(v: glam::Vec4) -> Self {
        Self::from(v.to_array())
    }
}

impl From<Vector4> for glam::Vec4 {
    fn from(v: Vector4) -> Self {
        glam::Vec4::from_array(v.to_array())
    }
}

impl From<glam::Quat> for Quat {
    fn from(q: glam::Quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quat> for glam::Quat {
    fn from(q: Quat) -> Self {
        glam::Quat::from_xyzw(q.x(), q.y(), q.z(), q.w())
    }
}

impl From<glam::Mat3> for Matrix3 {
    fn from(m: glam::Mat3) -> Self {
        Self::new(m.to_cols_array())
    }
}

impl From<Matrix3> for glam::Mat3 {
    fn from(m: Matrix3) -> Self {
        glam::Mat3::from_cols_array(&m.to_array())
    }
}

impl From<glam::Mat4> for Matrix4 {
    fn from(m: glam::Mat4) -> Self {
        Self::new(m.to_cols_array())
    }
}

impl From<Matrix4> for glam::Mat4 {
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.to_array())
    }
}

impl From<glam::Affine3A> for Transform3 {
    fn from(a: glam::Affine3A) -> Self {
        Self::new(a.to_cols_array())
    }
}

impl From<Transform3> for glam::Affine3A {
    fn from(t: Transform3) -> Self {
        glam::Affine3A::from_cols_array(&t.to_array())
    }
}
