//!
//! Integration tests: header parsing end-to-end, and the NN row-for-row invariant
//! spec.md §8 states for identity projection/datum with matching pixel sizes.
//!
use mrtproj::datum_transform::DatumCode;
use mrtproj::ellipsoid::Ellipsoid;
use mrtproj::ellipsoids::SPHERE;
use mrtproj::header;
use mrtproj::nadcon::NoGridsAvailable;
use mrtproj::parameters::ProjParams;
use mrtproj::projections::{equirectangular::Equirectangular, Projection, ProjectionCode};
use mrtproj::resample::{resample_row, GridGeometry, Kernel};
use mrtproj::transform::{CoordUnit, PipelineSide, TransformPipeline};

const MODIS_HEADER: &str = r#"
PROJECTION_TYPE = SIN
PROJECTION_PARAMETERS = (
    6371007.181 0.0 0.0 0.0
    0.0 0.0 0.0 0.0
    0.0 0.0 0.0 0.0
    0.0 0.0 0.0
)
UL_CORNER_LATLON = ( 40.0 -100.0 )
UR_CORNER_LATLON = ( 40.0 -90.0 )
LL_CORNER_LATLON = ( 30.0 -100.0 )
LR_CORNER_LATLON = ( 30.0 -90.0 )
NBANDS = 2
BANDNAMES = ( sur_refl_b01 sur_refl_b02 )
DATA_TYPE = ( INT16 INT16 )
NLINES = ( 1200 1200 )
NSAMPLES = ( 1200 1200 )
PIXEL_SIZE = ( 926.625433 926.625433 )
BACKGROUND_FILL = ( -28672 -28672 )
"#;

#[test]
fn header_parses_into_a_complete_raster_config() {
    let config = header::parse(MODIS_HEADER).unwrap();
    assert_eq!(config.projection_code, ProjectionCode::Sinusoidal);
    assert_eq!(config.nbands, 2);
    assert_eq!(config.band_names, vec!["sur_refl_b01", "sur_refl_b02"]);
    assert_eq!(config.nlines, vec![1200, 1200]);
    assert!(matches!(config.datum, DatumCode::NoDatum));
    let projection = config.build_projection().unwrap();
    assert!(matches!(projection, Projection::Sinusoidal(_)));
}

#[test]
fn nearest_neighbor_reproduces_input_row_for_row_under_identity_transform() {
    let ellps = Ellipsoid::from_defn(&SPHERE).unwrap();
    let eqr_in = Equirectangular::new(&ellps, &ProjParams::default()).unwrap();
    let eqr_out = Equirectangular::new(&ellps, &ProjParams::default()).unwrap();
    let input = PipelineSide::new(Projection::Equirectangular(eqr_in), DatumCode::NoDatum, CoordUnit::Meter);
    let output = PipelineSide::new(Projection::Equirectangular(eqr_out), DatumCode::NoDatum, CoordUnit::Meter);
    let pipeline = TransformPipeline::new(input, output, NoGridsAvailable).unwrap();

    let nrows = 8;
    let ncols = 8;
    let geom = GridGeometry {
        ul_x: 0.0,
        ul_y: (nrows as f64) * 500.0,
        pixel_size: 500.0,
        nrows,
        ncols,
    };
    let grid: Vec<Vec<f64>> = (0..nrows)
        .map(|r| (0..ncols).map(|c| (r * ncols + c) as f64).collect())
        .collect();
    let fetch = |r: i64, c: i64| -> f64 {
        if r < 0 || c < 0 || r as usize >= grid.len() || c as usize >= grid[0].len() {
            -1.0
        } else {
            grid[r as usize][c as usize]
        }
    };

    for i in 0..nrows {
        let row = resample_row(i, &geom, &geom, &pipeline, &Kernel::NearestNeighbor, -1.0, None, fetch).unwrap();
        assert_eq!(row, grid[i]);
    }
}
