use criterion::{criterion_group, criterion_main, Criterion};
use g2d_convert::{accel::loopback::LoopbackEngine, build_surface, Converter, Format};

pub fn benchmark_surface(c: &mut Criterion) {
    let fmts = [Format::Yuyv, Format::Nv12, Format::I420, Format::Rgba8888];
    let dims = [(640, 480), (1920, 1080), (3840, 2160)];

    for fmt in fmts.iter() {
        let mut group = c.benchmark_group(format!("surface/{}", fmt));
        for dim in dims.iter() {
            group.bench_with_input(format!("{}x{}", dim.0, dim.1), dim, |b, &(w, h)| {
                b.iter(|| build_surface(*fmt, w, h, 0x1000))
            });
        }
    }
}

pub fn benchmark_convert(c: &mut Criterion) {
    let converter = Converter::with_engine(LoopbackEngine::new());
    let dims = [(640, 480), (1920, 1080)];

    let mut group = c.benchmark_group("convert/YUYV-RGBA8888");
    for dim in dims.iter() {
        let src = vec![0u8; dim.0 * dim.1 * 2];
        group.bench_with_input(format!("{}x{}", dim.0, dim.1), dim, |b, &(w, h)| {
            b.iter(|| {
                converter
                    .convert("YUYV", "RGBA8888", &src, w as u32, h as u32)
                    .unwrap()
            })
        });
    }
}

criterion_group!(benches, benchmark_surface, benchmark_convert);
criterion_main!(benches);
