use criterion::{black_box, criterion_group, criterion_main, Criterion};

use image::GrayImage;
use lbp_disparity::{prelude::*, messages::{self, Sweep}};

fn texture(width: u32, height: u32, shift: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let x = x + shift;
        image::Luma([((x * 37 + y * 91 + (x * y) % 13) % 256) as u8])
    })
}

fn lbp_bench(c: &mut Criterion) {
    
    // Build a shifted pair
    let pair = StereoPair::new(texture(96, 64, 0), texture(96, 64, 4)).unwrap();

    // Build algorithm
    let params = Params {
        levels: 16,
        iterations: 5,
        ..Params::default()
    };
    let mut alg = LoopyBp::new(params.clone());

    // Benchmark compute function
    c.bench_function("lbp 96x64 16 levels 5 iterations", |b| b.iter(|| alg.compute(black_box(&pair))));

    // Benchmark a single sweep on its own
    let engine = Engine::new(&pair, &params).unwrap();
    let mut store = engine.messages().clone();
    c.bench_function("lbp rightward sweep 96x64", |b| b.iter(|| {
        messages::sweep(engine.costs(), &mut store, Sweep::Right)
    }));
}

criterion_group!(benches, lbp_bench);
criterion_main!(benches);
