// Affine 3×4 transforms

use core::fmt;
use core::ops::{Mul, MulAssign};

use crate::{diagnostics, Matrix3, Point3, Quat, Vector3, Vector4};

/// Affine transform: a 3×3 linear block plus a translation column.
///
/// Stored column-major as four 3-element columns, the last one being the
/// translation, so `point' = linear · point + translation`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Transform3 {
    data: [f32; 12],
}

impl Default for Transform3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3 {
    /// The identity transform.
    pub const IDENTITY: Self = Self::new([
        1.0, 0.0, 0.0, // col 0
        0.0, 1.0, 0.0, // col 1
        0.0, 0.0, 1.0, // col 2
        0.0, 0.0, 0.0, // col 3 (translation)
    ]);

    /// Creates a transform from column-major data.
    pub const fn new(data: [f32; 12]) -> Self {
        Self { data }
    }

    /// Returns the identity transform.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Broadcasts `value` to every element.
    pub const fn splat(value: f32) -> Self {
        Self::new([value; 12])
    }

    /// Builds a transform from three basis columns and a translation.
    pub const fn from_cols(col0: Vector3, col1: Vector3, col2: Vector3, col3: Vector3) -> Self {
        Self::new([
            col0.x(), col0.y(), col0.z(),
            col1.x(), col1.y(), col1.z(),
            col2.x(), col2.y(), col2.z(),
            col3.x(), col3.y(), col3.z(),
        ])
    }

    /// Builds a transform from a linear block and a translation.
    pub const fn from_matrix3_translation(linear: &Matrix3, translation: &Vector3) -> Self {
        Self::from_cols(linear.col(0), linear.col(1), linear.col(2), *translation)
    }

    /// Rigid transform: rotation by a unit quaternion, then translation.
    pub fn from_rotation_translation(unit_quat: &Quat, translation: &Vector3) -> Self {
        Self::from_matrix3_translation(&Matrix3::from_quat(unit_quat), translation)
    }

    /// Scale, then rotate, then translate.
    ///
    /// The usual decomposition of an object placement; the linear block is
    /// `R · S`, which is orthonormal only for unit scale.
    pub fn from_scale_rotation_translation(
        scale: &Vector3,
        unit_quat: &Quat,
        translation: &Vector3,
    ) -> Self {
        let linear = Matrix3::from_quat(unit_quat).append_scale(scale);
        Self::from_matrix3_translation(&linear, translation)
    }

    /// Returns the transform as a column-major array.
    pub const fn to_array(self) -> [f32; 12] {
        self.data
    }

    /// Element at column `col` (0..4), row `row` (0..3).
    pub const fn at(&self, col: usize, row: usize) -> f32 {
        self.data[col * 3 + row]
    }

    /// Overwrites the element at column `col`, row `row`.
    pub fn set(&mut self, col: usize, row: usize, value: f32) {
        self.data[col * 3 + row] = value;
    }

    /// Column `col`; column 3 is the translation.
    pub const fn col(&self, col: usize) -> Vector3 {
        Vector3::new(self.at(col, 0), self.at(col, 1), self.at(col, 2))
    }

    /// Row `row`, translation included as `w`.
    pub const fn row(&self, row: usize) -> Vector4 {
        Vector4::new(self.at(0, row), self.at(1, row), self.at(2, row), self.at(3, row))
    }

    /// Replaces column `col`.
    pub fn set_col(&mut self, col: usize, v: &Vector3) {
        for row in 0..3 {
            self.set(col, row, v[row]);
        }
    }

    /// Replaces row `row`; `w` goes to the translation.
    pub fn set_row(&mut self, row: usize, v: &Vector4) {
        for col in 0..4 {
            self.set(col, row, v[col]);
        }
    }

    /// The linear block.
    pub const fn upper3x3(&self) -> Matrix3 {
        Matrix3::from_cols(self.col(0), self.col(1), self.col(2))
    }

    /// Replaces the linear block, keeping the translation.
    pub fn set_upper3x3(&mut self, linear: &Matrix3) {
        for col in 0..3 {
            self.set_col(col, &linear.col(col));
        }
    }

    /// The translation column.
    pub const fn translation(&self) -> Vector3 {
        self.col(3)
    }

    /// Replaces the translation column.
    pub fn set_translation(&mut self, translation: &Vector3) {
        self.set_col(3, translation);
    }

    /// Pure translation.
    pub const fn from_translation(translation: &Vector3) -> Self {
        Self::from_cols(Vector3::X, Vector3::Y, Vector3::Z, *translation)
    }

    /// Rotation of `radians` about +X.
    pub fn rotation_x(radians: f32) -> Self {
        Self::from_matrix3_translation(&Matrix3::rotation_x(radians), &Vector3::ZERO)
    }

    /// Rotation of `radians` about +Y.
    pub fn rotation_y(radians: f32) -> Self {
        Self::from_matrix3_translation(&Matrix3::rotation_y(radians), &Vector3::ZERO)
    }

    /// Rotation of `radians` about +Z.
    pub fn rotation_z(radians: f32) -> Self {
        Self::from_matrix3_translation(&Matrix3::rotation_z(radians), &Vector3::ZERO)
    }

    /// Euler rotation `Rz · Ry · Rx`.
    pub fn rotation_zyx(radians_xyz: &Vector3) -> Self {
        Self::from_matrix3_translation(&Matrix3::rotation_zyx(radians_xyz), &Vector3::ZERO)
    }

    /// Rotation of `radians` about a unit axis.
    pub fn rotation_axis(radians: f32, unit_axis: &Vector3) -> Self {
        Self::from_matrix3_translation(&Matrix3::rotation_axis(radians, unit_axis), &Vector3::ZERO)
    }

    /// Rotation by a unit quaternion.
    pub fn rotation_quat(unit_quat: &Quat) -> Self {
        Self::from_rotation_translation(unit_quat, &Vector3::ZERO)
    }

    /// Non-uniform scale.
    pub const fn scale(scale: &Vector3) -> Self {
        Self::from_matrix3_translation(&Matrix3::scale(scale), &Vector3::ZERO)
    }

    /// `self · scale(s)`: scales the basis columns, translation untouched.
    pub fn append_scale(&self, scale: &Vector3) -> Self {
        Self::from_matrix3_translation(&self.upper3x3().append_scale(scale), &self.translation())
    }

    /// `scale(s) · self`: scales every row, translation included.
    pub fn prepend_scale(&self, scale: &Vector3) -> Self {
        Self::from_cols(
            self.col(0).mul_per_elem(scale),
            self.col(1).mul_per_elem(scale),
            self.col(2).mul_per_elem(scale),
            self.col(3).mul_per_elem(scale),
        )
    }

    /// Translation of the inverse, `-(inv_linear · t)`, accumulated as the
    /// sum of the inverted basis columns scaled by the old translation.
    fn inverse_translation(inv_linear: &Matrix3, translation: &Vector3) -> Vector3 {
        let tmp0 = inv_linear.col(0) * translation.x();
        let tmp1 = inv_linear.col(1) * translation.y();
        let tmp2 = inv_linear.col(2) * translation.z();
        -(tmp0 + (tmp1 + tmp2))
    }

    /// General affine inverse.
    ///
    /// Inverts the linear block with the cofactor method of
    /// [`Matrix3::inverse`], so shear and non-uniform scale are handled. The
    /// block must be non-singular.
    pub fn inverse(&self) -> Self {
        let inv_linear = self.upper3x3().inverse();
        let translation = Self::inverse_translation(&inv_linear, &self.translation());
        Self::from_matrix3_translation(&inv_linear, &translation)
    }

    /// Inverse of a transform whose linear block is orthonormal.
    ///
    /// Transposes the block instead of inverting it: no division and no cross
    /// products. Gives wrong results for any scale or shear; use
    /// [`Transform3::inverse`] for those.
    pub fn ortho_inverse(&self) -> Self {
        let linear = self.upper3x3();
        diagnostics::orthonormal(&linear, "Transform3::ortho_inverse");
        let inv_linear = linear.transpose();
        let translation = Self::inverse_translation(&inv_linear, &self.translation());
        Self::from_matrix3_translation(&inv_linear, &translation)
    }

    /// Applies the linear block only.
    pub fn transform_vector(&self, v: &Vector3) -> Vector3 {
        self.col(0) * v.x() + self.col(1) * v.y() + self.col(2) * v.z()
    }

    /// Applies the full affine map.
    pub fn transform_point(&self, p: &Point3) -> Point3 {
        Point3::from(self.transform_vector(&Vector3::from(*p))) + self.translation()
    }

    /// Composition `self · rhs`: `rhs` applies first.
    pub fn multiply(&self, rhs: &Self) -> Self {
        Self::from_cols(
            self.transform_vector(&rhs.col(0)),
            self.transform_vector(&rhs.col(1)),
            self.transform_vector(&rhs.col(2)),
            self.transform_vector(&rhs.col(3)) + self.translation(),
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

    /// Returns `b` when `pick_b` is set, `a` otherwise.
    pub fn select(a: &Self, b: &Self, pick_b: bool) -> Self {
        if pick_b {
            *b
        } else {
            *a
        }
    }
}

impl From<[f32; 12]> for Transform3 {
    fn from(data: [f32; 12]) -> Self {
        Self::new(data)
    }
}

impl Mul for Transform3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl MulAssign for Transform3 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl Mul<Vector3> for Transform3 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_vector(&rhs)
    }
}

impl Mul<Point3> for Transform3 {
    type Output = Point3;
    fn mul(self, rhs: Point3) -> Point3 {
        self.transform_point(&rhs)
    }
}

impl fmt::Display for Transform3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let r = self.row(row);
            writeln!(f, "[{} {} {} | {}]", r.x(), r.y(), r.z(), r.w())?;
        }
        Ok(())
    }
}
