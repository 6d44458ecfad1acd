//!
//! Benchmark the resampling kernels over a synthetic identity pipeline.
//!
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mrtproj::datum_transform::DatumCode;
use mrtproj::ellipsoid::Ellipsoid;
use mrtproj::ellipsoids::SPHERE;
use mrtproj::nadcon::NoGridsAvailable;
use mrtproj::parameters::ProjParams;
use mrtproj::projections::{equirectangular::Equirectangular, Projection};
use mrtproj::resample::{resample_row, GridGeometry, Kernel};
use mrtproj::transform::{CoordUnit, PipelineSide, TransformPipeline};

fn resample_nn_row(ncols: usize) {
    let ellps = Ellipsoid::from_defn(&SPHERE).unwrap();
    let eqr_in = Equirectangular::new(&ellps, &ProjParams::default()).unwrap();
    let eqr_out = Equirectangular::new(&ellps, &ProjParams::default()).unwrap();
    let input = PipelineSide::new(Projection::Equirectangular(eqr_in), DatumCode::NoDatum, CoordUnit::Meter);
    let output = PipelineSide::new(Projection::Equirectangular(eqr_out), DatumCode::NoDatum, CoordUnit::Meter);
    let pipeline = TransformPipeline::new(input, output, NoGridsAvailable).unwrap();

    let geom = GridGeometry {
        ul_x: 0.0,
        ul_y: (ncols as f64) * 100.0,
        pixel_size: 100.0,
        nrows: ncols,
        ncols,
    };
    let grid: Vec<f64> = (0..ncols).map(|c| c as f64).collect();
    let fetch = |r: i64, c: i64| -> f64 {
        if r < 0 || c < 0 || c as usize >= grid.len() {
            -1.0
        } else {
            grid[c as usize]
        }
    };

    for i in 0..ncols {
        black_box(resample_row(i, &geom, &geom, &pipeline, &Kernel::NearestNeighbor, -1.0, None, fetch).unwrap());
    }
}

fn criterion_benchmark_resample(c: &mut Criterion) {
    c.bench_function("nearest-neighbor 1024x1024", |b| {
        b.iter(|| resample_nn_row(black_box(1024)))
    });
}

criterion_group!(benches, criterion_benchmark_resample);
criterion_main!(benches);
