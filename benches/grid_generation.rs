use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gem_template::quantize::{MedianCutQuantizer, Quantizer};
use gem_template::{
    generate_grid, Bitmap, GeneratorConfig, GridDimensions, PixelSampler, RegionOfInterest,
    RgbTriple,
};

fn photo_like(width: u32, height: u32) -> Bitmap {
    let pixels: Vec<RgbTriple> = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                RgbTriple::new(
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    ((x * 3 + y * 5) % 256) as u8,
                )
            })
        })
        .collect();
    Bitmap::from_pixels(width, height, &pixels).unwrap()
}

fn benchmark_grid_generation(c: &mut Criterion) {
    let bitmap = photo_like(1600, 1200);
    let roi = RegionOfInterest::whole(bitmap.width(), bitmap.height());
    let dims = GridDimensions::new(200, 200, 200).unwrap();
    let config = GeneratorConfig::default();

    c.bench_function("sample_200x200", |b| {
        let sampler = PixelSampler::default();
        b.iter(|| sampler.sample(black_box(&bitmap), &roi, &dims).unwrap())
    });

    let samples = PixelSampler::default().sample(&bitmap, &roi, &dims).unwrap();
    c.bench_function("median_cut_40", |b| {
        b.iter(|| MedianCutQuantizer::new().quantize(black_box(&samples), 40).unwrap())
    });

    c.bench_function("generate_grid_200x200", |b| {
        b.iter(|| generate_grid(black_box(&bitmap), &roi, &dims, &config).unwrap())
    });
}

criterion_group!(benches, benchmark_grid_generation);
criterion_main!(benches);
