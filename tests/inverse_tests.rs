#![allow(missing_docs)]
use approx::{assert_abs_diff_eq, assert_relative_eq};
use vmath3d::{Matrix3, Matrix4, Point3, Quat, Transform3, Vector3, Vector4};

const EPS: f32 = 1e-5;

fn approx_eq_slice(a: &[f32], b: &[f32], eps: f32) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!((x - y).abs() <= eps, "index {i}: {a:?} vs {b:?}");
    }
}

fn sheared_matrix3() -> Matrix3 {
    Matrix3::from_cols(
        Vector3::new(2.0, 0.5, 0.0),
        Vector3::new(0.3, 1.5, -0.4),
        Vector3::new(-1.0, 0.2, 3.0),
    )
}

#[test]
fn matrix3_inverse_round_trips() {
    let m = sheared_matrix3();
    let inv = m.inverse();
    approx_eq_slice(&(m * inv).to_array(), &Matrix3::IDENTITY.to_array(), EPS);
    approx_eq_slice(&(inv * m).to_array(), &Matrix3::IDENTITY.to_array(), EPS);
}

#[test]
fn matrix3_inverse_is_adjugate_over_determinant() {
    // rows of the inverse are c1×c2, c2×c0, c0×c1 over det
    let m = sheared_matrix3();
    let det = m.determinant();
    let inv = m.inverse();
    let (c0, c1, c2) = (m.col(0), m.col(1), m.col(2));
    let rows = [c1.cross(&c2), c2.cross(&c0), c0.cross(&c1)];
    for (r, expected) in rows.iter().enumerate() {
        let got = inv.row(r) * det;
        approx_eq_slice(&got.to_array(), &expected.to_array(), 1e-4);
    }
}

#[test]
fn determinants_of_identity_and_inverse() {
    assert_eq!(Matrix3::IDENTITY.determinant(), 1.0);
    assert_eq!(Matrix4::IDENTITY.determinant(), 1.0);

    let m3 = sheared_matrix3();
    assert_relative_eq!(m3.determinant() * m3.inverse().determinant(), 1.0, epsilon = 1e-5);

    let m4 = Matrix4::from_cols(
        Vector4::new(3.0, 0.2, -0.5, 0.1),
        Vector4::new(0.4, 2.0, 0.3, -0.2),
        Vector4::new(-0.1, 0.6, 4.0, 0.5),
        Vector4::new(1.0, -2.0, 0.7, 2.5),
    );
    assert_relative_eq!(m4.determinant() * m4.inverse().determinant(), 1.0, epsilon = 1e-4);
}

#[test]
fn matrix4_determinant_matches_upper_block_for_affine() {
    let m = Matrix4::from_matrix3_translation(&sheared_matrix3(), &Vector3::new(5.0, -3.0, 2.0));
    assert_relative_eq!(m.determinant(), sheared_matrix3().determinant(), epsilon = 1e-5);
}

#[test]
fn matrix4_inverse_round_trips_general_matrix() {
    let m = Matrix4::from_cols(
        Vector4::new(3.0, 0.2, -0.5, 0.1),
        Vector4::new(0.4, 2.0, 0.3, -0.2),
        Vector4::new(-0.1, 0.6, 4.0, 0.5),
        Vector4::new(1.0, -2.0, 0.7, 2.5),
    );
    let inv = m.inverse();
    approx_eq_slice(&(m * inv).to_array(), &Matrix4::IDENTITY.to_array(), 1e-4);
    approx_eq_slice(&(inv * m).to_array(), &Matrix4::IDENTITY.to_array(), 1e-4);
}

#[test]
fn singular_inputs_propagate_non_finite_values() {
    let flat = Matrix3::from_cols(Vector3::X, Vector3::Y, Vector3::ZERO);
    assert_eq!(flat.determinant(), 0.0);
    assert!(flat.inverse().to_array().iter().any(|v| !v.is_finite()));

    let zero = Matrix4::splat(0.0);
    assert!(zero.inverse().to_array().iter().all(|v| v.is_nan()));
}

#[test]
fn transform_inverse_handles_shear_and_scale() {
    let t = Transform3::from_matrix3_translation(&sheared_matrix3(), &Vector3::new(1.0, -4.0, 2.5));
    let inv = t.inverse();
    approx_eq_slice(&(t * inv).to_array(), &Transform3::IDENTITY.to_array(), EPS);
    let p = Point3::new(0.3, 7.0, -2.0);
    let back = inv * (t * p);
    assert_abs_diff_eq!(back.x(), p.x(), epsilon = 1e-4);
    assert_abs_diff_eq!(back.y(), p.y(), epsilon = 1e-4);
    assert_abs_diff_eq!(back.z(), p.z(), epsilon = 1e-4);
}

#[test]
fn ortho_inverse_equals_inverse_for_rigid_motion() {
    let axis = Vector3::new(-1.0, 3.0, 0.5).normalize();
    let t = Transform3::from_rotation_translation(&Quat::rotation_axis(2.1, &axis), &Vector3::new(4.0, 5.0, -6.0));
    approx_eq_slice(&t.ortho_inverse().to_array(), &t.inverse().to_array(), 1e-4);
}

#[test]
fn ortho_inverse_is_wrong_for_scaled_transform() {
    let t = Transform3::scale(&Vector3::new(2.0, 2.0, 2.0));
    assert_ne!(t.ortho_inverse(), t.inverse());
    assert_eq!(t.inverse().at(0, 0), 0.5);
}

#[test]
fn affine_inverse_matches_embedded_transform_inverse() {
    let mut t = Transform3::rotation_zyx(&Vector3::new(0.3, -1.1, 2.0));
    t.set_translation(&Vector3::new(-2.0, 0.5, 8.0));
    let m = Matrix4::from_transform(&t);
    approx_eq_slice(
        &m.affine_inverse().to_array(),
        &Matrix4::from_transform(&t.inverse()).to_array(),
        1e-6,
    );
    approx_eq_slice(&m.affine_inverse().to_array(), &m.inverse().to_array(), 1e-4);
    approx_eq_slice(&m.ortho_inverse().to_array(), &m.inverse().to_array(), 1e-4);
}

#[test]
fn in_place_operators_match_pure_products() {
    let a = Matrix4::rotation_y(0.4);
    let b = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
    let mut c = a;
    c *= b;
    assert_eq!(c, a * b);

    let mut t = Transform3::rotation_x(0.2);
    let u = Transform3::from_translation(&Vector3::Z);
    let expected = t * u;
    t *= u;
    assert_eq!(t, expected);
}
