use core::fmt;
use core::ops::{Mul, MulAssign};

use crate::vector::impl_componentwise_ops;
use crate::{diagnostics, slerp_weights, Matrix3, Vector3, Vector4};

/// Quaternion stored as `(x, y, z, w)` with `w` the scalar part.
///
/// Only unit quaternions represent rotations. Nothing in this type
/// renormalizes on your behalf: [`Quat::slerp`], [`Quat::squad`] and
/// [`Matrix3::from_quat`] assume unit input, and it is up to the caller to
/// [`Quat::normalize`] after long chains of products.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Quat {
    data: [f32; 4],
}

impl_componentwise_ops!(Quat, 4);

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from components.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Builds a quaternion from its vector part and scalar part.
    pub const fn from_xyz_w(xyz: Vector3, w: f32) -> Self {
        Self::new(xyz.x(), xyz.y(), xyz.z(), w)
    }

    /// Reinterprets a 4-vector as `(x, y, z, w)`.
    pub const fn from_vector4(v: Vector4) -> Self {
        Self::new(v.x(), v.y(), v.z(), v.w())
    }

    /// Returns the identity rotation.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns the components as an array.
    pub const fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// X component.
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z component.
    pub const fn z(&self) -> f32 {
        self.data[2]
    }

    /// W (scalar) component.
    pub const fn w(&self) -> f32 {
        self.data[3]
    }

    /// The vector part.
    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.x(), self.y(), self.z())
    }

    /// Replaces the vector part, keeping `w`.
    pub const fn with_xyz(self, xyz: Vector3) -> Self {
        Self::new(xyz.x(), xyz.y(), xyz.z(), self.w())
    }

    /// Rotation of `radians` about a unit axis.
    pub fn rotation_axis(radians: f32, unit_axis: &Vector3) -> Self {
        diagnostics::unit_vector3(unit_axis, "Quat::rotation_axis");
        let (s, c) = (radians * 0.5).sin_cos();
        Self::from_xyz_w(*unit_axis * s, c)
    }

    /// Rotation of `radians` about +X.
    pub fn rotation_x(radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(s, 0.0, 0.0, c)
    }

    /// Rotation of `radians` about +Y.
    pub fn rotation_y(radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(0.0, s, 0.0, c)
    }

    /// Rotation of `radians` about +Z.
    pub fn rotation_z(radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(0.0, 0.0, s, c)
    }

    /// Shortest rotation taking `unit_from` onto `unit_to`.
    ///
    /// Undefined when the two directions are opposite.
    pub fn rotation_arc(unit_from: &Vector3, unit_to: &Vector3) -> Self {
        let cos_half_angle_x2 = (2.0 * (1.0 + unit_from.dot(unit_to))).sqrt();
        let recip_cos_half_angle_x2 = 1.0 / cos_half_angle_x2;
        Self::from_xyz_w(
            unit_from.cross(unit_to) * recip_cos_half_angle_x2,
            cos_half_angle_x2 * 0.5,
        )
    }

    /// Converts an orthonormal rotation matrix into a unit quaternion.
    ///
    /// Uses the largest-diagonal-term strategy: when the trace is negative the
    /// square root is taken on whichever of `1 ± xx ± yy ± zz` is largest so
    /// the divisor never approaches zero, which keeps rotations near 180°
    /// accurate. The two component permutations at the end undo that pivot and
    /// must run in this order; the second one reads the output of the first.
    pub fn from_matrix3(rotation: &Matrix3) -> Self {
        let mut xx = rotation.at(0, 0);
        let yx = rotation.at(0, 1);
        let mut zx = rotation.at(0, 2);
        let mut xy = rotation.at(1, 0);
        let mut yy = rotation.at(1, 1);
        let zy = rotation.at(1, 2);
        let xz = rotation.at(2, 0);
        let mut yz = rotation.at(2, 1);
        let mut zz = rotation.at(2, 2);

        let trace = xx + yy + zz;

        let neg_trace = trace < 0.0;
        let z_gt_x = zz > xx;
        let z_gt_y = zz > yy;
        let y_gt_x = yy > xx;
        let largest_x_or_y = (!z_gt_x || !z_gt_y) && neg_trace;
        let largest_y_or_z = (y_gt_x || z_gt_x) && neg_trace;
        let largest_z_or_x = (z_gt_y || !y_gt_x) && neg_trace;

        if largest_x_or_y {
            zz = -zz;
            xy = -xy;
        }
        if largest_y_or_z {
            xx = -xx;
            yz = -yz;
        }
        if largest_z_or_x {
            yy = -yy;
            zx = -zx;
        }

        let radicand = xx + yy + zz + 1.0;
        let scale = 0.5 * (1.0 / radicand.sqrt());

        let tmp_x = (zy - yz) * scale;
        let tmp_y = (xz - zx) * scale;
        let tmp_z = (yx - xy) * scale;
        let tmp_w = radicand * scale;

        let (mut qx, mut qy, mut qz, mut qw) = (tmp_x, tmp_y, tmp_z, tmp_w);
        if largest_x_or_y {
            (qx, qy, qz, qw) = (tmp_w, tmp_z, tmp_y, tmp_x);
        }
        if largest_y_or_z {
            (qx, qy, qz, qw) = (qy, qx, qw, qz);
        }

        Self::new(qx, qy, qz, qw)
    }

    /// Converts the quaternion into a rotation matrix.
    ///
    /// See [`Matrix3::from_quat`].
    pub fn to_matrix3(&self) -> Matrix3 {
        Matrix3::from_quat(self)
    }

    /// Dot product of the four components.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z() + self.w() * other.w()
    }

    /// Squared length.
    pub fn norm(&self) -> f32 {
        self.dot(self)
    }

    /// Length.
    pub fn length(&self) -> f32 {
        self.norm().sqrt()
    }

    /// Whether the quaternion is unit length within
    /// [`diagnostics::UNIT_TOLERANCE`].
    pub fn is_normalized(&self) -> bool {
        diagnostics::is_unit(self.norm())
    }

    /// Scales the quaternion to unit length. A zero quaternion yields `NaN`.
    pub fn normalize(&self) -> Self {
        *self * (1.0 / self.norm().sqrt())
    }

    /// Conjugate `(-x, -y, -z, w)`; the inverse rotation for unit input.
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z(), self.w())
    }

    /// Hamilton product `self · other`.
    ///
    /// Rotating by the product applies `other` first, then `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        let (ax, ay, az, aw) = (self.x(), self.y(), self.z(), self.w());
        let (bx, by, bz, bw) = (other.x(), other.y(), other.z(), other.w());
        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by + ay * bw + az * bx - ax * bz,
            aw * bz + az * bw + ax * by - ay * bx,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Rotates a vector; shorthand for [`Vector3::rotate`].
    pub fn rotate(&self, v: &Vector3) -> Vector3 {
        v.rotate(self)
    }

    /// Componentwise linear interpolation `a + t(b - a)`; not normalized.
    pub fn lerp(t: f32, a: &Self, b: &Self) -> Self {
        *a + (*b - *a) * t
    }

    /// Spherical linear interpolation between two unit quaternions.
    ///
    /// Always travels the shorter arc: when `q0 · q1 < 0` the start is negated.
    /// Once the inputs are within [`crate::SLERP_TOL`] of each other the
    /// blend becomes linear, since `sin(angle)` would otherwise be a
    /// vanishing divisor. `t = 0` and `t = 1` return the (possibly negated)
    /// endpoints.
    pub fn slerp(t: f32, unit_q0: &Self, unit_q1: &Self) -> Self {
        diagnostics::unit_quat(unit_q0, "Quat::slerp");
        diagnostics::unit_quat(unit_q1, "Quat::slerp");
        let mut cos_angle = unit_q0.dot(unit_q1);
        let start = if cos_angle < 0.0 {
            cos_angle = -cos_angle;
            -*unit_q0
        } else {
            *unit_q0
        };
        let (scale0, scale1) = slerp_weights(t, cos_angle);
        start * scale0 + *unit_q1 * scale1
    }

    /// Spherical cubic interpolation through four control rotations.
    ///
    /// `slerp(2t(1-t), slerp(t, q0, q3), slerp(t, q1, q2))`.
    pub fn squad(t: f32, unit_q0: &Self, unit_q1: &Self, unit_q2: &Self, unit_q3: &Self) -> Self {
        let outer = Self::slerp(t, unit_q0, unit_q3);
        let inner = Self::slerp(t, unit_q1, unit_q2);
        Self::slerp((2.0 * t) * (1.0 - t), &outer, &inner)
    }

    /// Returns `b` when `pick_b` is set, `a` otherwise.
    pub fn select(a: &Self, b: &Self, pick_b: bool) -> Self {
        if pick_b {
            *b
        } else {
            *a
        }
    }
}

impl Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl MulAssign for Quat {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl Mul<Vector3> for Quat {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs.rotate(&self)
    }
}

impl From<Vector4> for Quat {
    fn from(v: Vector4) -> Self {
        Self::from_vector4(v)
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x(), self.y(), self.z(), self.w())
    }
}
