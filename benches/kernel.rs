#![allow(missing_docs)]
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vmath3d::{Matrix3, Matrix4, Point3, Quat, Transform3, Vector3};

fn rigid_transform() -> Transform3 {
    Transform3::from_rotation_translation(
        &Quat::rotation_axis(0.9, &Vector3::new(1.0, 2.0, -2.0).normalize()),
        &Vector3::new(4.0, -1.0, 3.0),
    )
}

fn bench_inverses(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");
    let m3 = Matrix3::rotation_zyx(&Vector3::new(0.2, 0.4, 0.6)).append_scale(&Vector3::new(2.0, 0.5, 1.0));
    let m4 = Matrix4::perspective(1.0, 1.5, 0.1, 100.0) * Matrix4::from_transform(&rigid_transform());
    let t3 = rigid_transform();
    let affine = Matrix4::from_transform(&t3);

    group.bench_function("matrix3", |b| b.iter(|| black_box(&m3).inverse()));
    group.bench_function("matrix4", |b| b.iter(|| black_box(&m4).inverse()));
    group.bench_function("matrix4_affine", |b| b.iter(|| black_box(&affine).affine_inverse()));
    group.bench_function("matrix4_ortho", |b| b.iter(|| black_box(&affine).ortho_inverse()));
    group.bench_function("transform3", |b| b.iter(|| black_box(&t3).inverse()));
    group.bench_function("transform3_ortho", |b| b.iter(|| black_box(&t3).ortho_inverse()));
    group.finish();
}

fn bench_quat_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("quat_matrix");
    // one rotation per pivot branch
    let cases = [
        ("trace", Quat::rotation_y(0.4)),
        ("x", Quat::rotation_x(3.0)),
        ("y", Quat::rotation_y(3.0)),
        ("z", Quat::rotation_z(3.0)),
    ];
    for (name, q) in cases {
        let m = Matrix3::from_quat(&q);
        group.bench_with_input(BenchmarkId::new("from_matrix3", name), &m, |b, m| {
            b.iter(|| Quat::from_matrix3(black_box(m)))
        });
    }
    let q = Quat::rotation_axis(1.2, &Vector3::new(0.0, 0.6, 0.8));
    group.bench_function("to_matrix3", |b| b.iter(|| black_box(&q).to_matrix3()));
    group.finish();
}

fn bench_interpolation(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolation");
    let q0 = Quat::rotation_x(0.3);
    let far = Quat::rotation_axis(2.0, &Vector3::new(0.6, 0.0, 0.8));
    let near = q0 * Quat::rotation_z(1e-3);
    group.bench_function("slerp_spherical", |b| {
        b.iter(|| Quat::slerp(black_box(0.37), &q0, black_box(&far)))
    });
    group.bench_function("slerp_linear_fallback", |b| {
        b.iter(|| Quat::slerp(black_box(0.37), &q0, black_box(&near)))
    });
    let keys = [q0, Quat::rotation_y(0.8), Quat::rotation_y(1.6), far];
    group.bench_function("squad", |b| {
        b.iter(|| Quat::squad(black_box(0.61), &keys[0], &keys[1], &keys[2], &keys[3]))
    });
    group.finish();
}

fn bench_point_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_points");
    let mvp = Matrix4::perspective(1.0, 1.5, 0.1, 100.0)
        * Matrix4::look_at(&Point3::new(0.0, 2.0, 8.0), &Point3::ORIGIN, &Vector3::Y);
    for &n in &[64usize, 1_024] {
        let points: Vec<Point3> = (0..n)
            .map(|i| {
                let f = i as f32;
                Point3::new(f.sin(), f.cos(), (f * 0.1).sin())
            })
            .collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| {
                for p in points {
                    black_box(mvp * *p);
                }
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_inverses,
    bench_quat_matrix,
    bench_interpolation,
    bench_point_batches
);
criterion_main!(benches);
