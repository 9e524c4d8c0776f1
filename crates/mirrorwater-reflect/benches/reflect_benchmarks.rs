use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::Vec3;
use mirrorwater_reflect::*;

fn bench_reflect_camera(c: &mut Criterion) {
    let camera = Camera::look_at(Vec3::new(12.0, 30.0, -7.0), Vec3::ZERO, Vec3::Y);
    let normal = Vec3::new(0.2, 1.0, 0.1).normalize();
    let point = Vec3::new(1.0, -2.0, 3.0);
    c.bench_function("reflect_camera", |bencher| {
        bencher.iter(|| black_box(reflect(black_box(&camera), normal, point)))
    });
}

fn bench_reflect_across_plane(c: &mut Criterion) {
    let camera = Camera::look_at(Vec3::new(0.0, 6.0, 20.0), Vec3::ZERO, Vec3::Y);
    let plane = WaterPlane::horizontal(Vec3::Y, Vec3::ZERO, 1.0).unwrap();
    c.bench_function("reflect_across_plane", |bencher| {
        bencher.iter(|| black_box(reflect_across(black_box(&camera), &plane)))
    });
}

fn bench_centroid(c: &mut Criterion) {
    let points: Vec<Vec3> = (0..256)
        .map(|i| {
            let a = i as f32 * std::f32::consts::TAU / 256.0;
            Vec3::new(a.cos() * 50.0, 0.0, a.sin() * 50.0)
        })
        .collect();
    c.bench_function("centroid_256", |bencher| {
        bencher.iter(|| black_box(centroid(black_box(&points))))
    });
}

fn bench_frustum_outline(c: &mut Criterion) {
    let camera = Camera::look_at(Vec3::new(0.0, 6.0, 20.0), Vec3::ZERO, Vec3::Y);
    c.bench_function("frustum_outline", |bencher| {
        bencher.iter(|| black_box(FrustumOutline::from_camera(black_box(&camera))))
    });
}

criterion_group!(
    benches,
    bench_reflect_camera,
    bench_reflect_across_plane,
    bench_centroid,
    bench_frustum_outline
);
criterion_main!(benches);
