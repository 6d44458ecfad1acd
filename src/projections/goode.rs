//!
//! Interrupted Goode Homolosine (spec.md §4.1, code GOODE)
//!
//! A composite of [`super::sinusoidal::Sinusoidal`] below the break latitude
//! (40°44'11.8", where the two base projections have equal scale along the central
//! meridian) and [`super::mollweide::Mollweide`] above it, each re-centered per
//! 60°-wide interruption lobe. Crossing a lobe boundary is the projection's designed
//! discontinuity: a point that does not fall within ±30° of its nearest lobe center
//! yields [`PointError::Break`] rather than a silently-wrong coordinate.

use crate::ellipsoid::Ellipsoid;
use crate::errors::{Error, PointError, Result};
use crate::parameters::ProjParams;
use crate::projections::mollweide::Mollweide;
use crate::projections::sinusoidal::Sinusoidal;

/// 40°44'11.8", the latitude where sinusoidal and Mollweide scale match along the
/// central meridian (Goode's original 1923 construction).
const BREAK_LAT_DEG: f64 = 40.0 + 44.0 / 60.0 + 11.8 / 3600.0;

const LOBE_WIDTH_DEG: f64 = 60.0;
const LOBE_CENTERS_DEG: [f64; 6] = [-150.0, -90.0, -30.0, 30.0, 90.0, 150.0];

#[derive(Debug, Clone, Copy)]
pub struct Goode {
    fe: f64,
    fn_: f64,
    sin_lobes: [Sinusoidal; 6],
    moll_lobes: [Mollweide; 6],
    break_lat: f64,
}

impl Goode {
    pub fn new(ellps: &Ellipsoid, params: &ProjParams) -> Result<Self> {
        let mut sin_lobes = [Sinusoidal::new(ellps, params)?; 6];
        let mut moll_lobes = [Mollweide::new(ellps, params)?; 6];
        for (i, center_deg) in LOBE_CENTERS_DEG.iter().enumerate() {
            let mut lobe_params = *params;
            lobe_params.0[4] = center_deg.to_radians();
            lobe_params.0[6] = 0.0;
            lobe_params.0[7] = 0.0;
            sin_lobes[i] = Sinusoidal::new(ellps, &lobe_params)?;
            moll_lobes[i] = Mollweide::new(ellps, &lobe_params)?;
        }
        let common = crate::projections::CommonParams::from_slots(params);
        Ok(Self {
            fe: common.fe,
            fn_: common.fn_,
            sin_lobes,
            moll_lobes,
            break_lat: BREAK_LAT_DEG.to_radians(),
        })
    }

    fn lobe_index(&self, lon: f64) -> Option<usize> {
        let lon_deg = lon.to_degrees();
        LOBE_CENTERS_DEG.iter().position(|c| {
            let mut d = lon_deg - c;
            d -= 360.0 * (d / 360.0).round();
            d.abs() <= LOBE_WIDTH_DEG / 2.0 + 1e-9
        })
    }

    pub fn forward(&self, lam: f64, phi: f64) -> Result<(f64, f64)> {
        let i = self
            .lobe_index(lam)
            .ok_or(Error::Point(PointError::Break))?;
        let (x, y) = if phi.abs() <= self.break_lat {
            self.sin_lobes[i].forward(lam, phi)?
        } else {
            self.moll_lobes[i].forward(lam, phi)?
        };
        Ok((self.fe + x, self.fn_ + y))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let x = x - self.fe;
        let y = y - self.fn_;
        // Without a lobe hint, probe lobes by nearest center; only one lobe will
        // invert to a point whose forward projection round-trips within tolerance.
        for i in 0..6 {
            let result = if y.abs() <= self.sin_lobes[i].forward(0.0, self.break_lat)?.1.abs() {
                self.sin_lobes[i].inverse(x, y)
            } else {
                self.moll_lobes[i].inverse(x, y)
            };
            if let Ok((lam, phi)) = result {
                if self.lobe_index(lam) == Some(i) {
                    return Ok((lam, phi));
                }
            }
        }
        Err(Error::Point(PointError::Break))
    }
}
