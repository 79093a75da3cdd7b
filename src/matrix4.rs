use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{diagnostics, Matrix3, Point3, Quat, Transform3, Vector3, Vector4};

/// Column-major 4×4 matrix for homogeneous transforms and projections.
///
/// Element `(col, row)` is stored at `col * 4 + row`. Translation lives in
/// column 3 and the projections follow the OpenGL clip-space convention
/// (right-handed view space looking down -Z, depth mapped to `[-1, 1]`).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix4 {
    data: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The sixteen elements named column by column: `a..d` is column 0,
/// `m..p` column 3.
#[derive(Clone, Copy)]
struct Elements {
    a: f32, b: f32, c: f32, d: f32,
    e: f32, f: f32, g: f32, h: f32,
    i: f32, j: f32, k: f32, l: f32,
    m: f32, n: f32, o: f32, p: f32,
}

impl Elements {
    fn of(mat: &Matrix4) -> Self {
        let [a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p] = mat.data;
        Self { a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p }
    }

    /// The six 2×2 minors of columns 1..3 shared by the first cofactor
    /// column, in the order consumed by [`Elements::first_cofactors`].
    fn upper_minors(&self) -> [f32; 6] {
        let Self { b, c, d, f, g, h, j, k, l, n, o, p, .. } = *self;
        [
            k * d - c * l,
            o * h - g * p,
            b * k - j * c,
            f * o - n * g,
            j * d - b * l,
            n * h - f * p,
        ]
    }

    /// First column of the adjugate; its dot with row 0 is the determinant.
    fn first_cofactors(&self, t: &[f32; 6]) -> Vector4 {
        let Self { b, c, d, f, g, h, j, k, l, n, o, p, .. } = *self;
        Vector4::new(
            (j * t[1] - l * t[3]) - k * t[5],
            (n * t[0] - p * t[2]) - o * t[4],
            (d * t[3] + c * t[5]) - b * t[1],
            (h * t[2] + g * t[4]) - f * t[0],
        )
    }

    fn determinant_with(&self, res0: &Vector4) -> f32 {
        ((self.a * res0.x() + self.e * res0.y()) + self.i * res0.z()) + self.m * res0.w()
    }
}

impl Matrix4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new([
        1.0, 0.0, 0.0, 0.0, // col 0
        0.0, 1.0, 0.0, 0.0, // col 1
        0.0, 0.0, 1.0, 0.0, // col 2
        0.0, 0.0, 0.0, 1.0, // col 3
    ]);

    /// Creates a matrix from column-major data.
    pub const fn new(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Broadcasts `value` to every element.
    pub const fn splat(value: f32) -> Self {
        Self::new([value; 16])
    }

    /// Builds a matrix from its four columns.
    pub const fn from_cols(col0: Vector4, col1: Vector4, col2: Vector4, col3: Vector4) -> Self {
        Self::new([
            col0.x(), col0.y(), col0.z(), col0.w(),
            col1.x(), col1.y(), col1.z(), col1.w(),
            col2.x(), col2.y(), col2.z(), col2.w(),
            col3.x(), col3.y(), col3.z(), col3.w(),
        ])
    }

    /// Embeds an affine transform, bottom row `(0, 0, 0, 1)`.
    pub const fn from_transform(transform: &Transform3) -> Self {
        Self::from_cols(
            Vector4::from_vector3(transform.col(0)),
            Vector4::from_vector3(transform.col(1)),
            Vector4::from_vector3(transform.col(2)),
            Vector4::from_point3(Point3::new(transform.at(3, 0), transform.at(3, 1), transform.at(3, 2))),
        )
    }

    /// Linear block plus translation.
    pub const fn from_matrix3_translation(linear: &Matrix3, translation: &Vector3) -> Self {
        Self::from_transform(&Transform3::from_matrix3_translation(linear, translation))
    }

    /// Rotation by a unit quaternion followed by a translation.
    pub fn from_rotation_translation(unit_quat: &Quat, translation: &Vector3) -> Self {
        Self::from_transform(&Transform3::from_rotation_translation(unit_quat, translation))
    }

    /// Returns the matrix as a column-major array.
    pub const fn to_array(self) -> [f32; 16] {
        self.data
    }

    /// Returns the columns as nested arrays, the layout GPU uniforms expect.
    pub const fn to_cols_array_2d(self) -> [[f32; 4]; 4] {
        let d = self.data;
        [
            [d[0], d[1], d[2], d[3]],
            [d[4], d[5], d[6], d[7]],
            [d[8], d[9], d[10], d[11]],
            [d[12], d[13], d[14], d[15]],
        ]
    }

    /// Element at column `col`, row `row`.
    pub const fn at(&self, col: usize, row: usize) -> f32 {
        self.data[col * 4 + row]
    }

    /// Overwrites the element at column `col`, row `row`.
    pub fn set(&mut self, col: usize, row: usize, value: f32) {
        self.data[col * 4 + row] = value;
    }

    /// Column `col`.
    pub const fn col(&self, col: usize) -> Vector4 {
        Vector4::new(self.at(col, 0), self.at(col, 1), self.at(col, 2), self.at(col, 3))
    }

    /// Row `row`.
    pub const fn row(&self, row: usize) -> Vector4 {
        Vector4::new(self.at(0, row), self.at(1, row), self.at(2, row), self.at(3, row))
    }

    /// Replaces column `col`.
    pub fn set_col(&mut self, col: usize, v: &Vector4) {
        for row in 0..4 {
            self.set(col, row, v[row]);
        }
    }

    /// Replaces row `row`.
    pub fn set_row(&mut self, row: usize, v: &Vector4) {
        for col in 0..4 {
            self.set(col, row, v[col]);
        }
    }

    /// The upper-left 3×3 block.
    pub const fn upper3x3(&self) -> Matrix3 {
        Matrix3::from_cols(self.col(0).xyz(), self.col(1).xyz(), self.col(2).xyz())
    }

    /// Replaces the upper-left 3×3 block; row 3 and column 3 are kept.
    pub fn set_upper3x3(&mut self, linear: &Matrix3) {
        for col in 0..3 {
            let v = self.col(col).with_xyz(linear.col(col));
            self.set_col(col, &v);
        }
    }

    /// The `xyz` part of column 3.
    pub const fn translation(&self) -> Vector3 {
        self.col(3).xyz()
    }

    /// Replaces the `xyz` part of column 3; `w` is kept.
    pub fn set_translation(&mut self, translation: &Vector3) {
        let v = self.col(3).with_xyz(*translation);
        self.set_col(3, &v);
    }

    /// Pure translation.
    pub const fn from_translation(translation: &Vector3) -> Self {
        Self::from_transform(&Transform3::from_translation(translation))
    }

    /// Rotation of `radians` about +X.
    pub fn rotation_x(radians: f32) -> Self {
        Self::from_transform(&Transform3::rotation_x(radians))
    }

    /// Rotation of `radians` about +Y.
    pub fn rotation_y(radians: f32) -> Self {
        Self::from_transform(&Transform3::rotation_y(radians))
    }

    /// Rotation of `radians` about +Z.
    pub fn rotation_z(radians: f32) -> Self {
        Self::from_transform(&Transform3::rotation_z(radians))
    }

    /// Euler rotation `Rz · Ry · Rx`.
    pub fn rotation_zyx(radians_xyz: &Vector3) -> Self {
        Self::from_transform(&Transform3::rotation_zyx(radians_xyz))
    }

    /// Rotation of `radians` about a unit axis.
    pub fn rotation_axis(radians: f32, unit_axis: &Vector3) -> Self {
        Self::from_transform(&Transform3::rotation_axis(radians, unit_axis))
    }

    /// Rotation by a unit quaternion.
    pub fn rotation_quat(unit_quat: &Quat) -> Self {
        Self::from_transform(&Transform3::rotation_quat(unit_quat))
    }

    /// Non-uniform scale.
    pub const fn scale(scale: &Vector3) -> Self {
        Self::from_transform(&Transform3::scale(scale))
    }

    /// `self · scale(s)`: scales columns 0..3 by `s`; column 3 untouched.
    pub fn append_scale(&self, scale: &Vector3) -> Self {
        Self::from_cols(
            self.col(0) * scale.x(),
            self.col(1) * scale.y(),
            self.col(2) * scale.z(),
            self.col(3),
        )
    }

    /// `scale(s) · self`: scales rows 0..3 by `s`; row 3 untouched.
    pub fn prepend_scale(&self, scale: &Vector3) -> Self {
        let s = Vector4::new(scale.x(), scale.y(), scale.z(), 1.0);
        Self::from_cols(
            self.col(0).mul_per_elem(&s),
            self.col(1).mul_per_elem(&s),
            self.col(2).mul_per_elem(&s),
            self.col(3).mul_per_elem(&s),
        )
    }

    /// View matrix of a camera at `eye` looking at `target`.
    ///
    /// Builds the camera frame (`z` from target to eye, `x = up × z`) and
    /// returns its orthonormal inverse. `up` need not be unit length but
    /// must not be parallel to the viewing direction.
    pub fn look_at(eye: &Point3, target: &Point3, up: &Vector3) -> Self {
        let up = up.normalize();
        let z = (*eye - *target).normalize();
        let x = up.cross(&z).normalize();
        let y = z.cross(&x);
        let eye_frame = Transform3::from_cols(x, y, z, Vector3::from(*eye));
        Self::from_transform(&eye_frame.ortho_inverse())
    }

    /// Symmetric perspective projection.
    ///
    /// `fovy_radians` is the full vertical field of view; `z_near` and
    /// `z_far` are positive distances.
    pub fn perspective(fovy_radians: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let f = (core::f32::consts::FRAC_PI_2 - 0.5 * fovy_radians).tan();
        let range_inv = 1.0 / (z_near - z_far);
        Self::from_cols(
            Vector4::new(f / aspect, 0.0, 0.0, 0.0),
            Vector4::new(0.0, f, 0.0, 0.0),
            Vector4::new(0.0, 0.0, (z_near + z_far) * range_inv, -1.0),
            Vector4::new(0.0, 0.0, z_near * z_far * range_inv * 2.0, 0.0),
        )
    }

    /// Off-center perspective projection of the near-plane rectangle.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, z_near: f32, z_far: f32) -> Self {
        let near2 = z_near + z_near;
        let inv_rl = 1.0 / (right - left);
        let inv_tb = 1.0 / (top - bottom);
        let inv_nf = 1.0 / (z_near - z_far);
        Self::from_cols(
            Vector4::new(near2 * inv_rl, 0.0, 0.0, 0.0),
            Vector4::new(0.0, near2 * inv_tb, 0.0, 0.0),
            Vector4::new((right + left) * inv_rl, (top + bottom) * inv_tb, (z_near + z_far) * inv_nf, -1.0),
            Vector4::new(0.0, 0.0, near2 * inv_nf * z_far, 0.0),
        )
    }

    /// Orthographic projection of the given box.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, z_near: f32, z_far: f32) -> Self {
        let inv_rl = 1.0 / (right - left);
        let inv_tb = 1.0 / (top - bottom);
        let inv_nf = 1.0 / (z_near - z_far);
        Self::from_cols(
            Vector4::new(inv_rl + inv_rl, 0.0, 0.0, 0.0),
            Vector4::new(0.0, inv_tb + inv_tb, 0.0, 0.0),
            Vector4::new(0.0, 0.0, inv_nf + inv_nf, 0.0),
            Vector4::new(
                -(right + left) * inv_rl,
                -(top + bottom) * inv_tb,
                (z_near + z_far) * inv_nf,
                1.0,
            ),
        )
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2), self.row(3))
    }

    /// Determinant by cofactor expansion along row 0.
    pub fn determinant(&self) -> f32 {
        let el = Elements::of(self);
        let res0 = el.first_cofactors(&el.upper_minors());
        el.determinant_with(&res0)
    }

    /// General inverse.
    ///
    /// Computes the adjugate from two sets of six 2×2 sub-determinants: the
    /// first set pairs rows 0..3 of the upper columns, the second pairs
    /// rows of columns 0/2 and 1/3. The determinant falls out of the first
    /// cofactor column. A singular matrix yields `Inf`/`NaN` elements.
    pub fn inverse(&self) -> Self {
        let el = Elements::of(self);
        let Elements { a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p } = el;

        let t = el.upper_minors();
        let res0 = el.first_cofactors(&t);
        let det = el.determinant_with(&res0);
        diagnostics::invertible(det, "Matrix4::inverse");
        let det_inv = 1.0 / det;

        // partial cofactors from the first minor set
        let mut res1 = Vector4::new(i * t[1], m * t[0], a * t[1], e * t[0]);
        let mut res3 = Vector4::new(i * t[3], m * t[2], a * t[3], e * t[2]);
        let mut res2 = Vector4::new(i * t[5], m * t[4], a * t[5], e * t[4]);

        let t = [
            i * b - a * j,
            m * f - e * n,
            i * d - a * l,
            m * h - e * p,
            i * c - a * k,
            m * g - e * o,
        ];
        res2 = Vector4::new(
            (l * t[1] - j * t[3]) + res2.x(),
            (p * t[0] - n * t[2]) + res2.y(),
            (b * t[3] - d * t[1]) - res2.z(),
            (f * t[2] - h * t[0]) - res2.w(),
        );
        res3 = Vector4::new(
            (j * t[5] - k * t[1]) + res3.x(),
            (n * t[4] - o * t[0]) + res3.y(),
            (c * t[1] - b * t[5]) - res3.z(),
            (g * t[0] - f * t[4]) - res3.w(),
        );
        res1 = Vector4::new(
            (k * t[3] - l * t[5]) - res1.x(),
            (o * t[2] - p * t[4]) - res1.y(),
            (d * t[5] - c * t[3]) + res1.z(),
            (h * t[4] - g * t[2]) + res1.w(),
        );

        Self::from_cols(res0 * det_inv, res1 * det_inv, res2 * det_inv, res3 * det_inv)
    }

    /// Views the top three rows as an affine transform, ignoring row 3.
    fn affine_part(&self) -> Transform3 {
        Transform3::from_cols(
            self.col(0).xyz(),
            self.col(1).xyz(),
            self.col(2).xyz(),
            self.col(3).xyz(),
        )
    }

    /// Inverse of an affine matrix (bottom row `(0, 0, 0, 1)`).
    ///
    /// Cheaper than [`Matrix4::inverse`]; the bottom row is assumed, not
    /// read.
    pub fn affine_inverse(&self) -> Self {
        Self::from_transform(&self.affine_part().inverse())
    }

    /// Inverse of an affine matrix whose 3×3 block is orthonormal.
    pub fn ortho_inverse(&self) -> Self {
        Self::from_transform(&self.affine_part().ortho_inverse())
    }

    /// Product `self · v`.
    pub fn mul_vector4(&self, v: &Vector4) -> Vector4 {
        self.col(0) * v.x() + self.col(1) * v.y() + self.col(2) * v.z() + self.col(3) * v.w()
    }

    /// Product with a direction (`w = 0`): translation is ignored.
    pub fn mul_vector3(&self, v: &Vector3) -> Vector4 {
        self.col(0) * v.x() + self.col(1) * v.y() + self.col(2) * v.z()
    }

    /// Product with a position (`w = 1`). The result is not divided by `w`.
    pub fn mul_point3(&self, p: &Point3) -> Vector4 {
        self.mul_vector3(&Vector3::from(*p)) + self.col(3)
    }

    /// Matrix product `self · rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        Self::from_cols(
            self.mul_vector4(&rhs.col(0)),
            self.mul_vector4(&rhs.col(1)),
            self.mul_vector4(&rhs.col(2)),
            self.mul_vector4(&rhs.col(3)),
        )
    }

    /// Product with an affine transform treated as a 4×4 matrix.
    pub fn mul_transform(&self, rhs: &Transform3) -> Self {
        Self::from_cols(
            self.mul_vector3(&rhs.col(0)),
            self.mul_vector3(&rhs.col(1)),
            self.mul_vector3(&rhs.col(2)),
            self.mul_point3(&Point3::from(rhs.translation())),
        )
    }

    /// Outer product `a · bᵀ`.
    pub fn outer(a: &Vector4, b: &Vector4) -> Self {
        Self::from_cols(*a * b.x(), *a * b.y(), *a * b.z(), *a * b.w())
    }

    /// Elementwise product.
    pub fn mul_per_elem(&self, other: &Self) -> Self {
        Self::new(core::array::from_fn(|idx| self.data[idx] * other.data[idx]))
    }

    /// Elementwise absolute value.
    pub fn abs_per_elem(&self) -> Self {
        Self::new(self.data.map(f32::abs))
    }

    /// Column-by-column linear interpolation.
    pub fn lerp(t: f32, a: &Self, b: &Self) -> Self {
        Self::from_cols(
            Vector4::lerp(t, &a.col(0), &b.col(0)),
            Vector4::lerp(t, &a.col(1), &b.col(1)),
            Vector4::lerp(t, &a.col(2), &b.col(2)),
            Vector4::lerp(t, &a.col(3), &b.col(3)),
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

impl From<[f32; 16]> for Matrix4 {
    fn from(data: [f32; 16]) -> Self {
        Self::new(data)
    }
}

impl From<Transform3> for Matrix4 {
    fn from(transform: Transform3) -> Self {
        Self::from_transform(&transform)
    }
}

impl Add for Matrix4 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(core::array::from_fn(|idx| self.data[idx] + rhs.data[idx]))
    }
}

impl Sub for Matrix4 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(core::array::from_fn(|idx| self.data[idx] - rhs.data[idx]))
    }
}

impl Neg for Matrix4 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(self.data.map(|v| -v))
    }
}

impl Mul<f32> for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.data.map(|v| v * rhs))
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;
    fn mul(self, rhs: Vector4) -> Vector4 {
        self.mul_vector4(&rhs)
    }
}

impl Mul<Vector3> for Matrix4 {
    type Output = Vector4;
    fn mul(self, rhs: Vector3) -> Vector4 {
        self.mul_vector3(&rhs)
    }
}

impl Mul<Point3> for Matrix4 {
    type Output = Vector4;
    fn mul(self, rhs: Point3) -> Vector4 {
        self.mul_point3(&rhs)
    }
}

impl Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Transform3> for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Transform3) -> Self {
        self.mul_transform(&rhs)
    }
}

impl AddAssign for Matrix4 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Matrix4 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Matrix4 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl MulAssign for Matrix4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            let r = self.row(row);
            writeln!(f, "[{} {} {} {}]", r.x(), r.y(), r.z(), r.w())?;
        }
        Ok(())
    }
}
