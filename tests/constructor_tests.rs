#![allow(missing_docs)]
use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use approx::assert_abs_diff_eq;
use vmath3d::{Matrix3, Matrix4, Point3, Quat, Transform3, Vector3, Vector4};

const EPS: f32 = 1e-6;

fn assert_vec3_eq(a: Vector3, b: Vector3, eps: f32) {
    for i in 0..3 {
        assert!((a[i] - b[i]).abs() <= eps, "component {i}: {a} vs {b}");
    }
}

#[test]
fn axis_rotations_fill_every_column() {
    // quarter turns permute the basis; a duplicated column would leave one
    // basis vector unrotated
    let rx = Matrix3::rotation_x(FRAC_PI_2);
    assert_vec3_eq(rx * Vector3::Y, Vector3::Z, EPS);
    assert_vec3_eq(rx * Vector3::Z, -Vector3::Y, EPS);

    let ry = Matrix3::rotation_y(FRAC_PI_2);
    assert_vec3_eq(ry * Vector3::Z, Vector3::X, EPS);
    assert_vec3_eq(ry * Vector3::X, -Vector3::Z, EPS);

    let rz = Matrix3::rotation_z(FRAC_PI_2);
    assert_vec3_eq(rz * Vector3::X, Vector3::Y, EPS);
    assert_vec3_eq(rz * Vector3::Y, -Vector3::X, EPS);
}

#[test]
fn transform_axis_rotations_agree_with_matrix3() {
    let angle = 1.1;
    let cases = [
        (Transform3::rotation_x(angle), Matrix3::rotation_x(angle)),
        (Transform3::rotation_y(angle), Matrix3::rotation_y(angle)),
        (Transform3::rotation_z(angle), Matrix3::rotation_z(angle)),
    ];
    for (t, m) in cases {
        assert_eq!(t.upper3x3(), m);
        assert_eq!(t.translation(), Vector3::ZERO);
        assert!(t.upper3x3().is_orthonormal());
    }
}

#[test]
fn euler_zyx_composes_single_axis_rotations() {
    let angles = Vector3::new(0.3, -0.8, 1.2);
    let expected = Matrix3::rotation_z(angles.z())
        * Matrix3::rotation_y(angles.y())
        * Matrix3::rotation_x(angles.x());
    let got = Matrix3::rotation_zyx(&angles);
    for (a, b) in got.to_array().iter().zip(expected.to_array()) {
        assert_abs_diff_eq!(*a, b, epsilon = 1e-6);
    }
}

#[test]
fn rodrigues_matches_quaternion_rotation() {
    let axis = Vector3::new(2.0, -1.0, 0.5).normalize();
    let m = Matrix3::rotation_axis(0.9, &axis);
    let q = Quat::rotation_axis(0.9, &axis);
    for (a, b) in m.to_array().iter().zip(Matrix3::from_quat(&q).to_array()) {
        assert_abs_diff_eq!(*a, b, epsilon = 1e-6);
    }
    // the axis itself is fixed
    assert_vec3_eq(m * axis, axis, 1e-6);
}

#[test]
fn rotation_arc_maps_from_onto_to() {
    let from = Vector3::new(1.0, 2.0, -0.5).normalize();
    let to = Vector3::new(-0.3, 0.1, 1.0).normalize();
    let q = Quat::rotation_arc(&from, &to);
    assert_vec3_eq(q * from, to, 1e-5);
    assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-6);
}

#[test]
fn look_at_puts_target_on_negative_z() {
    let eye = Point3::new(4.0, 3.0, 5.0);
    let target = Point3::new(1.0, -1.0, 2.0);
    let view = Matrix4::look_at(&eye, &target, &Vector3::Y);

    let eye_view = view * eye;
    assert_vec3_eq(eye_view.xyz(), Vector3::ZERO, 1e-5);

    let target_view = view * target;
    let distance = eye.dist(&target);
    assert_abs_diff_eq!(target_view.x(), 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(target_view.y(), 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(target_view.z(), -distance, epsilon = 1e-5);
    assert_eq!(target_view.w(), 1.0);

    // the view's linear block is a rotation
    assert!(view.upper3x3().is_orthonormal());
}

#[test]
fn perspective_maps_near_and_far_planes_to_unit_depth() {
    let (near, far) = (0.5, 40.0);
    let proj = Matrix4::perspective(FRAC_PI_4, 1.5, near, far);
    let on_near = proj * Point3::new(0.0, 0.0, -near);
    let on_far = proj * Point3::new(0.0, 0.0, -far);
    assert_abs_diff_eq!(on_near.z() / on_near.w(), -1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(on_far.z() / on_far.w(), 1.0, epsilon = 1e-5);

    // top edge of the field of view lands on y = 1
    let top = proj * Point3::new(0.0, (FRAC_PI_4 * 0.5).tan() * 2.0, -2.0);
    assert_abs_diff_eq!(top.y() / top.w(), 1.0, epsilon = 1e-5);
}

#[test]
fn symmetric_frustum_equals_perspective() {
    let (near, far, fovy, aspect) = (0.1_f32, 100.0_f32, 1.0_f32, 2.0_f32);
    let top = near * (fovy * 0.5).tan();
    let right = top * aspect;
    let a = Matrix4::frustum(-right, right, -top, top, near, far);
    let b = Matrix4::perspective(fovy, aspect, near, far);
    for (x, y) in a.to_array().iter().zip(b.to_array()) {
        assert_abs_diff_eq!(*x, y, epsilon = 1e-4);
    }
}

#[test]
fn orthographic_maps_box_corners_to_unit_cube() {
    let proj = Matrix4::orthographic(-2.0, 6.0, -1.0, 3.0, 1.0, 11.0);
    let min = proj * Point3::new(-2.0, -1.0, -1.0);
    let max = proj * Point3::new(6.0, 3.0, -11.0);
    for i in 0..3 {
        assert_abs_diff_eq!(min[i], -1.0, epsilon = EPS);
        assert_abs_diff_eq!(max[i], 1.0, epsilon = EPS);
    }
    assert_eq!((min.w(), max.w()), (1.0, 1.0));
}

#[test]
fn scale_helpers_match_explicit_products() {
    let m = Matrix4::rotation_zyx(&Vector3::new(0.2, 0.4, 0.6)) * Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
    let s = Vector3::new(2.0, -1.0, 0.5);
    let appended = m.append_scale(&s);
    let prepended = m.prepend_scale(&s);
    let explicit_append = m * Matrix4::scale(&s);
    let explicit_prepend = Matrix4::scale(&s) * m;
    for i in 0..16 {
        assert_abs_diff_eq!(appended.to_array()[i], explicit_append.to_array()[i], epsilon = 1e-6);
        assert_abs_diff_eq!(prepended.to_array()[i], explicit_prepend.to_array()[i], epsilon = 1e-6);
    }
}

#[test]
fn trs_transform_matches_composed_matrices() {
    let scale = Vector3::new(1.5, 0.5, 2.0);
    let rotation = Quat::rotation_axis(0.6, &Vector3::new(0.0, 0.6, 0.8));
    let translation = Vector3::new(-3.0, 1.0, 4.0);
    let trs = Transform3::from_scale_rotation_translation(&scale, &rotation, &translation);
    let composed = Transform3::from_translation(&translation)
        * Transform3::rotation_quat(&rotation)
        * Transform3::scale(&scale);
    for (a, b) in trs.to_array().iter().zip(composed.to_array()) {
        assert_abs_diff_eq!(*a, b, epsilon = 1e-6);
    }
}

#[test]
fn matrix4_products_distinguish_points_and_vectors() {
    let m = Matrix4::from_rotation_translation(&Quat::rotation_z(FRAC_PI_2), &Vector3::new(10.0, 0.0, 0.0));
    let v = m * Vector3::X;
    let p = m * Point3::new(1.0, 0.0, 0.0);
    assert_eq!(v.w(), 0.0);
    assert_eq!(p.w(), 1.0);
    assert_vec3_eq(v.xyz(), Vector3::Y, 1e-6);
    assert_vec3_eq(p.xyz(), Vector3::new(10.0, 1.0, 0.0), 1e-6);
}

#[test]
fn block_accessors_round_trip() {
    let mut m = Matrix4::perspective(1.0, 1.0, 1.0, 10.0);
    let before_row3 = m.row(3);
    let linear = Matrix3::rotation_y(0.5);
    m.set_upper3x3(&linear);
    assert_eq!(m.upper3x3(), linear);
    assert_eq!(m.row(3), before_row3);

    let mut t = Transform3::IDENTITY;
    t.set_row(1, &Vector4::new(4.0, 5.0, 6.0, 7.0));
    assert_eq!(t.col(1), Vector3::new(0.0, 5.0, 0.0));
    assert_eq!(t.translation(), Vector3::new(0.0, 7.0, 0.0));
    assert_eq!(t.row(1), Vector4::new(4.0, 5.0, 6.0, 7.0));
}

#[test]
fn select_is_a_plain_choice() {
    let a = Matrix3::IDENTITY;
    let b = Matrix3::splat(2.0);
    assert_eq!(Matrix3::select(&a, &b, false), a);
    assert_eq!(Matrix3::select(&a, &b, true), b);
    assert_eq!(Vector3::select(&Vector3::X, &Vector3::Y, true), Vector3::Y);
    assert_eq!(Point3::select(&Point3::ORIGIN, &Point3::splat(1.0), false), Point3::ORIGIN);
}

#[test]
fn bytemuck_views_are_column_major() {
    let m = Matrix4::from_translation(&Vector3::new(7.0, 8.0, 9.0));
    let floats: &[f32] = bytemuck::cast_slice(core::slice::from_ref(&m));
    assert_eq!(&floats[12..15], &[7.0, 8.0, 9.0]);
    assert_eq!(m.to_cols_array_2d()[3], [7.0, 8.0, 9.0, 1.0]);
}
