use core::fmt;
use core::ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign};

use crate::{diagnostics, slerp_weights, Quat};

/// Implements the componentwise operators shared by every `[f32; N]` value
/// type: `+`, `-`, unary `-`, scaling by `f32` on either side, division by
/// `f32`, their `*Assign` wrappers, and indexing.
macro_rules! impl_componentwise_ops {
    ($ty:ident, $n:literal) => {
        impl core::ops::Add for $ty {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self::from(core::array::from_fn::<f32, $n, _>(|i| {
                    self.data[i] + rhs.data[i]
                }))
            }
        }

        impl core::ops::Sub for $ty {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self::from(core::array::from_fn::<f32, $n, _>(|i| {
                    self.data[i] - rhs.data[i]
                }))
            }
        }

        impl core::ops::Neg for $ty {
            type Output = Self;
            fn neg(self) -> Self {
                Self::from(self.data.map(|v| -v))
            }
        }

        impl core::ops::Mul<f32> for $ty {
            type Output = Self;
            fn mul(self, scalar: f32) -> Self {
                Self::from(self.data.map(|v| v * scalar))
            }
        }

        impl core::ops::Mul<$ty> for f32 {
            type Output = $ty;
            fn mul(self, rhs: $ty) -> $ty {
                rhs * self
            }
        }

        impl core::ops::Div<f32> for $ty {
            type Output = Self;
            fn div(self, scalar: f32) -> Self {
                Self::from(self.data.map(|v| v / scalar))
            }
        }

        impl core::ops::AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl core::ops::SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl core::ops::MulAssign<f32> for $ty {
            fn mul_assign(&mut self, scalar: f32) {
                *self = *self * scalar;
            }
        }

        impl core::ops::DivAssign<f32> for $ty {
            fn div_assign(&mut self, scalar: f32) {
                *self = *self / scalar;
            }
        }

        impl core::ops::Index<usize> for $ty {
            type Output = f32;
            fn index(&self, idx: usize) -> &f32 {
                &self.data[idx]
            }
        }

        impl core::ops::IndexMut<usize> for $ty {
            fn index_mut(&mut self, idx: usize) -> &mut f32 {
                &mut self.data[idx]
            }
        }

        impl From<[f32; $n]> for $ty {
            fn from(data: [f32; $n]) -> Self {
                Self { data }
            }
        }

        impl From<$ty> for [f32; $n] {
            fn from(value: $ty) -> Self {
                value.data
            }
        }
    };
}

pub(crate) use impl_componentwise_ops;

/// Free 3D vector: a direction or displacement, never a position.
///
/// Use [`Point3`] for positions so that point + point cannot be written.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vector3 {
    data: [f32; 3],
}

impl_componentwise_ops!(Vector3, 3);

impl Vector3 {
    /// All zeros.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector along +X.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along +Y.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along +Z.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// Broadcasts `value` to every component.
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Returns the components as an array.
    pub const fn to_array(self) -> [f32; 3] {
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

    /// Sets the X component.
    pub fn set_x(&mut self, value: f32) {
        self.data[0] = value;
    }

    /// Sets the Y component.
    pub fn set_y(&mut self, value: f32) {
        self.data[1] = value;
    }

    /// Sets the Z component.
    pub fn set_z(&mut self, value: f32) {
        self.data[2] = value;
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Cross product `self × other`.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }

    /// Squared length.
    pub fn length_sqr(&self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude).
    pub fn length(&self) -> f32 {
        self.length_sqr().sqrt()
    }

    /// Scales the vector to unit length.
    ///
    /// A zero vector yields `NaN` components; callers must not normalize
    /// degenerate vectors.
    pub fn normalize(&self) -> Self {
        *self * (1.0 / self.length())
    }

    /// Componentwise product.
    pub fn mul_per_elem(&self, other: &Self) -> Self {
        Self::new(self.x() * other.x(), self.y() * other.y(), self.z() * other.z())
    }

    /// Componentwise quotient.
    pub fn div_per_elem(&self, other: &Self) -> Self {
        Self::new(self.x() / other.x(), self.y() / other.y(), self.z() / other.z())
    }

    /// Componentwise reciprocal.
    /// Componentwise reciprocal.
    pub fn recip_per_elem(&self) -> Self {
        Self::from(self.data.map(f32::recip))
    }

    /// Componentwise square root.
    /// Componentwise square root.
    pub fn sqrt_per_elem(&self) -> Self {
        Self::from(self.data.map(f32::sqrt))
    }

    /// Componentwise reciprocal square root.
    /// Componentwise reciprocal square root.
    pub fn rsqrt_per_elem(&self) -> Self {
        Self::from(self.data.map(|v| 1.0 / v.sqrt()))
    }

    /// Componentwise absolute value.
    pub fn abs_per_elem(&self) -> Self {
        Self::from(self.data.map(f32::abs))
    }

    /// Magnitudes of `self` with the signs of `sign`.
    pub fn copysign_per_elem(&self, sign: &Self) -> Self {
        Self::new(
            self.x().copysign(sign.x()),
            self.y().copysign(sign.y()),
            self.z().copysign(sign.z()),
        )
    }

    /// Componentwise maximum.
    pub fn max_per_elem(&self, other: &Self) -> Self {
        Self::new(self.x().max(other.x()), self.y().max(other.y()), self.z().max(other.z()))
    }

    /// Componentwise minimum.
    pub fn min_per_elem(&self, other: &Self) -> Self {
        Self::new(self.x().min(other.x()), self.y().min(other.y()), self.z().min(other.z()))
    }

    /// Largest component.
    pub fn max_elem(&self) -> f32 {
        self.x().max(self.y()).max(self.z())
    }

    /// Smallest component.
    pub fn min_elem(&self) -> f32 {
        self.x().min(self.y()).min(self.z())
    }

    /// Sum of the components.
    pub fn sum(&self) -> f32 {
        self.x() + self.y() + self.z()
    }

    /// Linear interpolation `a + t(b - a)`.
    pub fn lerp(t: f32, a: &Self, b: &Self) -> Self {
        *a + (*b - *a) * t
    }

    /// Average rate of change from `start` to `end` over `elapsed_time`.
    pub fn velocity(start: &Self, end: &Self, elapsed_time: f32) -> Self {
        (*end - *start) / elapsed_time
    }

    /// Spherical interpolation between two unit directions.
    ///
    /// Falls back to [`Vector3::lerp`] weights once the inputs are within
    /// [`crate::SLERP_TOL`] of parallel. Inputs are not renormalized and no
    /// shortest-arc correction is applied.
    pub fn slerp(t: f32, unit_a: &Self, unit_b: &Self) -> Self {
        diagnostics::unit_vector3(unit_a, "Vector3::slerp");
        diagnostics::unit_vector3(unit_b, "Vector3::slerp");
        let (scale0, scale1) = slerp_weights(t, unit_a.dot(unit_b));
        *unit_a * scale0 + *unit_b * scale1
    }

    /// Rotates the vector by a unit quaternion (`q · v · q*`).
    pub fn rotate(&self, unit_quat: &Quat) -> Self {
        let (qx, qy, qz, qw) = (unit_quat.x(), unit_quat.y(), unit_quat.z(), unit_quat.w());
        let (vx, vy, vz) = (self.x(), self.y(), self.z());
        let tmp_x = qw * vx + qy * vz - qz * vy;
        let tmp_y = qw * vy + qz * vx - qx * vz;
        let tmp_z = qw * vz + qx * vy - qy * vx;
        let tmp_w = qx * vx + qy * vy + qz * vz;
        Self::new(
            tmp_w * qx + tmp_x * qw - tmp_y * qz + tmp_z * qy,
            tmp_w * qy + tmp_y * qw - tmp_z * qx + tmp_x * qz,
            tmp_w * qz + tmp_z * qw - tmp_x * qy + tmp_y * qx,
        )
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

impl From<Point3> for Vector3 {
    fn from(p: Point3) -> Self {
        Self::new(p.x(), p.y(), p.z())
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}

/// Homogeneous 4D vector.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vector4 {
    data: [f32; 4],
}

impl_componentwise_ops!(Vector4, 4);

impl Vector4 {
    /// All zeros.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Unit vector along +X.
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// Unit vector along +Y.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// Unit vector along +Z.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// Unit vector along +W.
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Broadcasts `value` to every component.
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Extends a direction with `w = 0`.
    pub const fn from_vector3(v: Vector3) -> Self {
        Self::new(v.x(), v.y(), v.z(), 0.0)
    }

    /// Extends a position with `w = 1`.
    pub const fn from_point3(p: Point3) -> Self {
        Self::new(p.x(), p.y(), p.z(), 1.0)
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

    /// W component.
    pub const fn w(&self) -> f32 {
        self.data[3]
    }

    /// Sets the X component.
    pub fn set_x(&mut self, value: f32) {
        self.data[0] = value;
    }

    /// Sets the Y component.
    pub fn set_y(&mut self, value: f32) {
        self.data[1] = value;
    }

    /// Sets the Z component.
    pub fn set_z(&mut self, value: f32) {
        self.data[2] = value;
    }

    /// Sets the W component.
    pub fn set_w(&mut self, value: f32) {
        self.data[3] = value;
    }

    /// The first three components.
    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.x(), self.y(), self.z())
    }

    /// Replaces the first three components, keeping `w`.
    pub const fn with_xyz(self, xyz: Vector3) -> Self {
        Self::new(xyz.x(), xyz.y(), xyz.z(), self.w())
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z() + self.w() * other.w()
    }

    /// Squared length.
    pub fn length_sqr(&self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude).
    pub fn length(&self) -> f32 {
        self.length_sqr().sqrt()
    }

    /// Scales the vector to unit length; zero vectors yield `NaN`.
    pub fn normalize(&self) -> Self {
        *self * (1.0 / self.length())
    }

    /// Componentwise product.
    pub fn mul_per_elem(&self, other: &Self) -> Self {
        Self::from(core::array::from_fn::<f32, 4, _>(|i| self.data[i] * other.data[i]))
    }

    /// Componentwise quotient.
    pub fn div_per_elem(&self, other: &Self) -> Self {
        Self::from(core::array::from_fn::<f32, 4, _>(|i| self.data[i] / other.data[i]))
    }

    /// Componentwise reciprocal.
    pub fn recip_per_elem(&self) -> Self {
        Self::from(self.data.map(f32::recip))
    }

    /// Componentwise square root.
    pub fn sqrt_per_elem(&self) -> Self {
        Self::from(self.data.map(f32::sqrt))
    }

    /// Componentwise reciprocal square root.
    pub fn rsqrt_per_elem(&self) -> Self {
        Self::from(self.data.map(|v| 1.0 / v.sqrt()))
    }

    /// Componentwise absolute value.
    pub fn abs_per_elem(&self) -> Self {
        Self::from(self.data.map(f32::abs))
    }

    /// Magnitudes of `self` with the signs of `sign`.
    pub fn copysign_per_elem(&self, sign: &Self) -> Self {
        Self::from(core::array::from_fn::<f32, 4, _>(|i| self.data[i].copysign(sign.data[i])))
    }

    /// Componentwise maximum.
    pub fn max_per_elem(&self, other: &Self) -> Self {
        Self::from(core::array::from_fn::<f32, 4, _>(|i| self.data[i].max(other.data[i])))
    }

    /// Componentwise minimum.
    pub fn min_per_elem(&self, other: &Self) -> Self {
        Self::from(core::array::from_fn::<f32, 4, _>(|i| self.data[i].min(other.data[i])))
    }

    /// Largest component.
    pub fn max_elem(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Smallest component.
    pub fn min_elem(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Sum of the components.
    pub fn sum(&self) -> f32 {
        self.x() + self.y() + self.z() + self.w()
    }

    /// Linear interpolation `a + t(b - a)`.
    pub fn lerp(t: f32, a: &Self, b: &Self) -> Self {
        *a + (*b - *a) * t
    }

    /// Spherical interpolation between two unit 4-vectors.
    ///
    /// Same tolerance and linear fallback as [`Vector3::slerp`].
    pub fn slerp(t: f32, unit_a: &Self, unit_b: &Self) -> Self {
        diagnostics::unit_vector4(unit_a, "Vector4::slerp");
        diagnostics::unit_vector4(unit_b, "Vector4::slerp");
        let (scale0, scale1) = slerp_weights(t, unit_a.dot(unit_b));
        *unit_a * scale0 + *unit_b * scale1
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

impl From<Quat> for Vector4 {
    fn from(q: Quat) -> Self {
        Self::from(q.to_array())
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x(), self.y(), self.z(), self.w())
    }
}

/// Affine position in 3D space.
///
/// Points subtract to a [`Vector3`] and accept vector offsets, but cannot be
/// added to each other.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Point3 {
    data: [f32; 3],
}

impl Point3 {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a point from coordinates.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// Broadcasts `value` to every coordinate.
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Returns the coordinates as an array.
    pub const fn to_array(self) -> [f32; 3] {
        self.data
    }

    /// X coordinate.
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y coordinate.
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z coordinate.
    pub const fn z(&self) -> f32 {
        self.data[2]
    }

    /// Sets the X coordinate.
    pub fn set_x(&mut self, value: f32) {
        self.data[0] = value;
    }

    /// Sets the Y coordinate.
    pub fn set_y(&mut self, value: f32) {
        self.data[1] = value;
    }

    /// Sets the Z coordinate.
    pub fn set_z(&mut self, value: f32) {
        self.data[2] = value;
    }

    /// Linear interpolation `a + t(b - a)`.
    pub fn lerp(t: f32, a: &Self, b: &Self) -> Self {
        *a + (*b - *a) * t
    }

    /// Squared distance to `other`.
    pub fn dist_sqr(&self, other: &Self) -> f32 {
        (*other - *self).length_sqr()
    }

    /// Distance to `other`.
    pub fn dist(&self, other: &Self) -> f32 {
        (*other - *self).length()
    }

    /// Signed distance from the origin along a unit direction.
    pub fn projection(&self, unit_vec: &Vector3) -> f32 {
        self.x() * unit_vec.x() + self.y() * unit_vec.y() + self.z() * unit_vec.z()
    }

    /// Scales every coordinate about the origin.
    pub fn scale(&self, factor: f32) -> Self {
        Self::new(self.x() * factor, self.y() * factor, self.z() * factor)
    }

    /// Scales each coordinate by the matching component of `factors`.
    pub fn non_uniform_scale(&self, factors: &Vector3) -> Self {
        Self::new(self.x() * factors.x(), self.y() * factors.y(), self.z() * factors.z())
    }

    /// Componentwise product.
    pub fn mul_per_elem(&self, other: &Self) -> Self {
        Self::new(self.x() * other.x(), self.y() * other.y(), self.z() * other.z())
    }

    /// Componentwise quotient.
    pub fn div_per_elem(&self, other: &Self) -> Self {
        Self::new(self.x() / other.x(), self.y() / other.y(), self.z() / other.z())
    }

    /// Componentwise reciprocal.
    pub fn recip_per_elem(&self) -> Self {
        Self::from(self.data.map(f32::recip))
    }

    /// Componentwise square root.
    pub fn sqrt_per_elem(&self) -> Self {
        Self::from(self.data.map(f32::sqrt))
    }

    /// Componentwise reciprocal square root.
    pub fn rsqrt_per_elem(&self) -> Self {
        Self::from(self.data.map(|v| 1.0 / v.sqrt()))
    }

    /// Componentwise absolute value.
    pub fn abs_per_elem(&self) -> Self {
        Self::from(self.data.map(f32::abs))
    }

    /// Magnitudes of `self` with the signs of `sign`.
    pub fn copysign_per_elem(&self, sign: &Self) -> Self {
        Self::new(
            self.x().copysign(sign.x()),
            self.y().copysign(sign.y()),
            self.z().copysign(sign.z()),
        )
    }

    /// Componentwise maximum.
    pub fn max_per_elem(&self, other: &Self) -> Self {
        Self::new(self.x().max(other.x()), self.y().max(other.y()), self.z().max(other.z()))
    }

    /// Componentwise minimum.
    pub fn min_per_elem(&self, other: &Self) -> Self {
        Self::new(self.x().min(other.x()), self.y().min(other.y()), self.z().min(other.z()))
    }

    /// Largest coordinate.
    pub fn max_elem(&self) -> f32 {
        self.x().max(self.y()).max(self.z())
    }

    /// Smallest coordinate.
    pub fn min_elem(&self) -> f32 {
        self.x().min(self.y()).min(self.z())
    }

    /// Sum of the coordinates.
    pub fn sum(&self) -> f32 {
        self.x() + self.y() + self.z()
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

impl From<Vector3> for Point3 {
    fn from(v: Vector3) -> Self {
        Self::new(v.x(), v.y(), v.z())
    }
}

impl From<[f32; 3]> for Point3 {
    fn from(data: [f32; 3]) -> Self {
        Self { data }
    }
}

impl Sub for Point3 {
    type Output = Vector3;
    fn sub(self, rhs: Self) -> Vector3 {
        Vector3::new(self.x() - rhs.x(), self.y() - rhs.y(), self.z() - rhs.z())
    }
}

impl Add<Vector3> for Point3 {
    type Output = Self;
    fn add(self, rhs: Vector3) -> Self {
        Self::new(self.x() + rhs.x(), self.y() + rhs.y(), self.z() + rhs.z())
    }
}

impl Sub<Vector3> for Point3 {
    type Output = Self;
    fn sub(self, rhs: Vector3) -> Self {
        Self::new(self.x() - rhs.x(), self.y() - rhs.y(), self.z() - rhs.z())
    }
}

impl AddAssign<Vector3> for Point3 {
    fn add_assign(&mut self, rhs: Vector3) {
        *self = *self + rhs;
    }
}

impl SubAssign<Vector3> for Point3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        *self = *self - rhs;
    }
}

impl Index<usize> for Point3 {
    type Output = f32;
    fn index(&self, idx: usize) -> &f32 {
        &self.data[idx]
    }
}

impl IndexMut<usize> for Point3 {
    fn index_mut(&mut self, idx: usize) -> &mut f32 {
        &mut self.data[idx]
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}
