use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{diagnostics, Quat, Vector3};

/// Column-major 3×3 matrix acting on [`Vector3`].
///
/// Element `(col, row)` is stored at `col * 3 + row`; read it with
/// [`Matrix3::at`]. Products follow the column-vector convention, so
/// `(a * b) * v == a * (b * v)`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix3 {
    data: [f32; 9],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new([
        1.0, 0.0, 0.0, // col 0
        0.0, 1.0, 0.0, // col 1
        0.0, 0.0, 1.0, // col 2
    ]);

    /// Creates a matrix from column-major data.
    pub const fn new(data: [f32; 9]) -> Self {
        Self { data }
    }

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Broadcasts `value` to every element.
    pub const fn splat(value: f32) -> Self {
        Self::new([value; 9])
    }

    /// Builds a matrix from its three columns.
    pub const fn from_cols(col0: Vector3, col1: Vector3, col2: Vector3) -> Self {
        Self::new([
            col0.x(), col0.y(), col0.z(),
            col1.x(), col1.y(), col1.z(),
            col2.x(), col2.y(), col2.z(),
        ])
    }

    /// Returns the matrix as a column-major array.
    pub const fn to_array(self) -> [f32; 9] {
        self.data
    }

    /// Element at column `col`, row `row`.
    pub const fn at(&self, col: usize, row: usize) -> f32 {
        self.data[col * 3 + row]
    }

    /// Overwrites the element at column `col`, row `row`.
    pub fn set(&mut self, col: usize, row: usize, value: f32) {
        self.data[col * 3 + row] = value;
    }

    /// Column `col`.
    pub const fn col(&self, col: usize) -> Vector3 {
        Vector3::new(self.at(col, 0), self.at(col, 1), self.at(col, 2))
    }

    /// Row `row`.
    pub const fn row(&self, row: usize) -> Vector3 {
        Vector3::new(self.at(0, row), self.at(1, row), self.at(2, row))
    }

    /// Replaces column `col`.
    pub fn set_col(&mut self, col: usize, v: &Vector3) {
        for row in 0..3 {
            self.set(col, row, v[row]);
        }
    }

    /// Replaces row `row`.
    pub fn set_row(&mut self, row: usize, v: &Vector3) {
        for col in 0..3 {
            self.set(col, row, v[col]);
        }
    }

    /// Rotation matrix of a unit quaternion.
    ///
    /// Closed form in the doubled products `2xy`, `2xw`, ...; no branching.
    /// Non-unit input produces a scaled, non-orthogonal matrix.
    pub fn from_quat(unit_quat: &Quat) -> Self {
        diagnostics::unit_quat(unit_quat, "Matrix3::from_quat");
        let (qx, qy, qz, qw) = (unit_quat.x(), unit_quat.y(), unit_quat.z(), unit_quat.w());
        let qx2 = qx + qx;
        let qy2 = qy + qy;
        let qz2 = qz + qz;
        let qxqx2 = qx * qx2;
        let qxqy2 = qx * qy2;
        let qxqz2 = qx * qz2;
        let qxqw2 = qw * qx2;
        let qyqy2 = qy * qy2;
        let qyqz2 = qy * qz2;
        let qyqw2 = qw * qy2;
        let qzqz2 = qz * qz2;
        let qzqw2 = qw * qz2;

        Self::new([
            (1.0 - qyqy2) - qzqz2,
            qxqy2 + qzqw2,
            qxqz2 - qyqw2,
            qxqy2 - qzqw2,
            (1.0 - qxqx2) - qzqz2,
            qyqz2 + qxqw2,
            qxqz2 + qyqw2,
            qyqz2 - qxqw2,
            (1.0 - qxqx2) - qyqy2,
        ])
    }

    /// Alias of [`Matrix3::from_quat`].
    pub fn rotation_quat(unit_quat: &Quat) -> Self {
        Self::from_quat(unit_quat)
    }

    /// Rotation of `radians` about +X.
    pub fn rotation_x(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_cols(Vector3::X, Vector3::new(0.0, c, s), Vector3::new(0.0, -s, c))
    }

    /// Rotation of `radians` about +Y.
    pub fn rotation_y(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_cols(Vector3::new(c, 0.0, -s), Vector3::Y, Vector3::new(s, 0.0, c))
    }

    /// Rotation of `radians` about +Z.
    pub fn rotation_z(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_cols(Vector3::new(c, s, 0.0), Vector3::new(-s, c, 0.0), Vector3::Z)
    }

    /// Euler rotation `Rz · Ry · Rx`: X is applied first, Z last.
    pub fn rotation_zyx(radians_xyz: &Vector3) -> Self {
        let (s_x, c_x) = radians_xyz.x().sin_cos();
        let (s_y, c_y) = radians_xyz.y().sin_cos();
        let (s_z, c_z) = radians_xyz.z().sin_cos();
        let tmp0 = c_z * s_y;
        let tmp1 = s_z * s_y;
        Self::new([
            c_z * c_y,
            s_z * c_y,
            -s_y,
            tmp0 * s_x - s_z * c_x,
            tmp1 * s_x + c_z * c_x,
            c_y * s_x,
            tmp0 * c_x + s_z * s_x,
            tmp1 * c_x - c_z * s_x,
            c_y * c_x,
        ])
    }

    /// Rotation of `radians` about a unit axis (Rodrigues' formula).
    pub fn rotation_axis(radians: f32, unit_axis: &Vector3) -> Self {
        diagnostics::unit_vector3(unit_axis, "Matrix3::rotation_axis");
        let (s, c) = radians.sin_cos();
        let (x, y, z) = (unit_axis.x(), unit_axis.y(), unit_axis.z());
        let xy = x * y;
        let yz = y * z;
        let zx = z * x;
        let one_minus_c = 1.0 - c;
        Self::new([
            x * x * one_minus_c + c,
            xy * one_minus_c + z * s,
            zx * one_minus_c - y * s,
            xy * one_minus_c - z * s,
            y * y * one_minus_c + c,
            yz * one_minus_c + x * s,
            zx * one_minus_c + y * s,
            yz * one_minus_c - x * s,
            z * z * one_minus_c + c,
        ])
    }

    /// Non-uniform scale.
    pub const fn scale(scale: &Vector3) -> Self {
        Self::new([
            scale.x(), 0.0, 0.0,
            0.0, scale.y(), 0.0,
            0.0, 0.0, scale.z(),
        ])
    }

    /// `self · scale(s)`: scales column `i` by `s[i]`.
    pub fn append_scale(&self, scale: &Vector3) -> Self {
        Self::from_cols(
            self.col(0) * scale.x(),
            self.col(1) * scale.y(),
            self.col(2) * scale.z(),
        )
    }

    /// `scale(s) · self`: scales row `i` by `s[i]`.
    pub fn prepend_scale(&self, scale: &Vector3) -> Self {
        Self::from_cols(
            self.col(0).mul_per_elem(scale),
            self.col(1).mul_per_elem(scale),
            self.col(2).mul_per_elem(scale),
        )
    }

    /// Outer product `a · bᵀ`.
    pub fn outer(a: &Vector3, b: &Vector3) -> Self {
        Self::from_cols(*a * b.x(), *a * b.y(), *a * b.z())
    }

    /// Skew-symmetric matrix `[v]×` such that `[v]× · u == v × u`.
    pub fn cross_matrix(v: &Vector3) -> Self {
        Self::new([
            0.0, v.z(), -v.y(),
            -v.z(), 0.0, v.x(),
            v.y(), -v.x(), 0.0,
        ])
    }

    /// `[v]× · m` without building the skew matrix.
    pub fn cross_matrix_mul(v: &Vector3, m: &Self) -> Self {
        Self::from_cols(v.cross(&m.col(0)), v.cross(&m.col(1)), v.cross(&m.col(2)))
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2))
    }

    /// Determinant, `c2 · (c0 × c1)`.
    pub fn determinant(&self) -> f32 {
        self.col(2).dot(&self.col(0).cross(&self.col(1)))
    }

    /// General inverse by the adjugate method.
    ///
    /// With `t0 = c1 × c2`, `t1 = c2 × c0`, `t2 = c0 × c1`, the rows of the
    /// inverse are `t0, t1, t2` divided by the determinant `c2 · t2`.
    ///
    /// The matrix must be non-singular; a zero determinant yields `Inf`/`NaN`
    /// elements rather than an error.
    pub fn inverse(&self) -> Self {
        let col0 = self.col(0);
        let col1 = self.col(1);
        let col2 = self.col(2);
        let tmp0 = col1.cross(&col2);
        let tmp1 = col2.cross(&col0);
        let tmp2 = col0.cross(&col1);
        let det = col2.dot(&tmp2);
        diagnostics::invertible(det, "Matrix3::inverse");
        let det_inv = 1.0 / det;
        Self::new([
            tmp0.x() * det_inv,
            tmp1.x() * det_inv,
            tmp2.x() * det_inv,
            tmp0.y() * det_inv,
            tmp1.y() * det_inv,
            tmp2.y() * det_inv,
            tmp0.z() * det_inv,
            tmp1.z() * det_inv,
            tmp2.z() * det_inv,
        ])
    }

    /// Whether the columns are mutually orthogonal unit vectors, within
    /// [`diagnostics::UNIT_TOLERANCE`]. Reflections count as orthonormal.
    pub fn is_orthonormal(&self) -> bool {
        let (c0, c1, c2) = (self.col(0), self.col(1), self.col(2));
        [c0, c1, c2].iter().all(|c| diagnostics::is_unit(c.length_sqr()))
            && [c0.dot(&c1), c1.dot(&c2), c2.dot(&c0)]
                .iter()
                .all(|d| d.abs() <= diagnostics::UNIT_TOLERANCE)
    }

    /// Matrix-vector product `self · v`.
    pub fn mul_vector(&self, v: &Vector3) -> Vector3 {
        Vector3::new(
            self.at(0, 0) * v.x() + self.at(1, 0) * v.y() + self.at(2, 0) * v.z(),
            self.at(0, 1) * v.x() + self.at(1, 1) * v.y() + self.at(2, 1) * v.z(),
            self.at(0, 2) * v.x() + self.at(1, 2) * v.y() + self.at(2, 2) * v.z(),
        )
    }

    /// Matrix product `self · rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        Self::from_cols(
            self.mul_vector(&rhs.col(0)),
            self.mul_vector(&rhs.col(1)),
            self.mul_vector(&rhs.col(2)),
        )
    }

    /// Elementwise product.
    pub fn mul_per_elem(&self, other: &Self) -> Self {
        Self::new(core::array::from_fn(|i| self.data[i] * other.data[i]))
    }

    /// Elementwise absolute value.
    pub fn abs_per_elem(&self) -> Self {
        Self::new(self.data.map(f32::abs))
    }

    /// Column-by-column linear interpolation.
    pub fn lerp(t: f32, a: &Self, b: &Self) -> Self {
        Self::from_cols(
            Vector3::lerp(t, &a.col(0), &b.col(0)),
            Vector3::lerp(t, &a.col(1), &b.col(1)),
            Vector3::lerp(t, &a.col(2), &b.col(2)),
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

impl Vector3 {
    /// Row-vector product `vᵀ · m`.
    pub fn row_mul(&self, m: &Matrix3) -> Vector3 {
        Vector3::new(self.dot(&m.col(0)), self.dot(&m.col(1)), self.dot(&m.col(2)))
    }
}

impl From<[f32; 9]> for Matrix3 {
    fn from(data: [f32; 9]) -> Self {
        Self::new(data)
    }
}

impl From<Quat> for Matrix3 {
    fn from(q: Quat) -> Self {
        Self::from_quat(&q)
    }
}

impl Add for Matrix3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(core::array::from_fn(|i| self.data[i] + rhs.data[i]))
    }
}

impl Sub for Matrix3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(core::array::from_fn(|i| self.data[i] - rhs.data[i]))
    }
}

impl Neg for Matrix3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(self.data.map(|v| -v))
    }
}

impl Mul<f32> for Matrix3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.data.map(|v| v * scalar))
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.mul_vector(&rhs)
    }
}

impl Mul for Matrix3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl AddAssign for Matrix3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Matrix3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Matrix3 {
    fn mul_assign(&mut self, scalar: f32) {
        *self = *self * scalar;
    }
}

impl MulAssign for Matrix3 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let r = self.row(row);
            writeln!(f, "[{} {} {}]", r.x(), r.y(), r.z())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_reads_column_major() {
        let m = Matrix3::new([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(m.at(1, 0), 3.0);
        assert_eq!(m.at(0, 1), 1.0);
        assert_eq!(m.col(2), Vector3::new(6.0, 7.0, 8.0));
        assert_eq!(m.row(2), Vector3::new(2.0, 5.0, 8.0));
    }

    #[test]
    fn identity_is_its_own_inverse() {
        assert_eq!(Matrix3::IDENTITY.inverse(), Matrix3::IDENTITY);
        assert_eq!(Matrix3::IDENTITY.determinant(), 1.0);
    }

    #[test]
    fn inverse_of_singular_is_not_finite() {
        let m = Matrix3::from_cols(Vector3::X, Vector3::X, Vector3::Z);
        assert_eq!(m.determinant(), 0.0);
        assert!(m.inverse().to_array().iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn third_column_of_inverse_is_written() {
        let m = Matrix3::scale(&Vector3::new(2.0, 4.0, 8.0));
        assert_eq!(m.inverse(), Matrix3::scale(&Vector3::new(0.5, 0.25, 0.125)));
    }

    #[test]
    fn scale_helpers_match_products() {
        let m = Matrix3::rotation_zyx(&Vector3::new(0.1, 0.2, 0.3));
        let s = Vector3::new(2.0, 3.0, 4.0);
        let append = m.append_scale(&s);
        let prepend = m.prepend_scale(&s);
        let append_ref = m * Matrix3::scale(&s);
        let prepend_ref = Matrix3::scale(&s) * m;
        for i in 0..9 {
            assert!((append.to_array()[i] - append_ref.to_array()[i]).abs() < 1e-6);
            assert!((prepend.to_array()[i] - prepend_ref.to_array()[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn cross_matrix_reproduces_cross_product() {
        let v = Vector3::new(1.0, -2.0, 0.5);
        let u = Vector3::new(3.0, 1.0, -1.0);
        assert_eq!(Matrix3::cross_matrix(&v) * u, v.cross(&u));
        let m = Matrix3::rotation_x(0.4);
        assert_eq!(Matrix3::cross_matrix_mul(&v, &m), Matrix3::cross_matrix(&v) * m);
    }

    #[test]
    fn row_mul_is_transpose_product() {
        let m = Matrix3::rotation_axis(1.1, &Vector3::new(0.0, 0.6, 0.8));
        let v = Vector3::new(1.0, 2.0, 3.0);
        let a = v.row_mul(&m);
        let b = m.transpose() * v;
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-6);
        }
    }
}
