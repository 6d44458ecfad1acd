//!
//! Ellipsoid derivation
//!
//! An ellipsoid is fully determined by a size parameter (semi-major axis `a`, or a
//! sphere radius `R`) and a shape parameter (one of `rf`, `f`, `es`, `e`, `b` — first one
//! supplied wins, in that precedence order). This mirrors the teacher's `ellps.rs`
//! derivation, generalized to also accept a named static definition from
//! [`crate::ellipsoids`].

use crate::consts::EPS_10;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis.
    pub a: f64,
    /// Semi-minor axis.
    pub b: f64,
    /// First eccentricity.
    pub e: f64,
    /// First eccentricity squared.
    pub es: f64,
    /// First flattening.
    pub f: f64,
    /// 1 - es, used throughout the datum/geocentric math.
    pub one_es: f64,
}

/// A named, static ellipsoid definition as carried in a projection parameter block.
#[derive(Debug, Clone, Copy)]
pub struct EllipsoidDefn {
    pub id: &'static str,
    pub a: f64,
    /// Reciprocal flattening; `f64::INFINITY` for a sphere.
    pub rf: f64,
}

/// Shape parameter, by order of precedence (mirrors `ellps.rs`'s `ShapeParameter`).
#[allow(non_camel_case_types)]
pub enum Shape {
    Rf(f64),
    F(f64),
    Es(f64),
    E(f64),
    B(f64),
}

impl Ellipsoid {
    pub fn sphere(radius: f64) -> Result<Self> {
        if !(radius.is_normal() && radius > 0.) {
            return Err(Error::InvalidParameterValue("invalid sphere radius"));
        }
        Ok(Self {
            a: radius,
            b: radius,
            e: 0.,
            es: 0.,
            f: 0.,
            one_es: 1.,
        })
    }

    pub fn from_a_and_shape(a: f64, shape: Shape) -> Result<Self> {
        if a <= 0. {
            return Err(Error::InvalidParameterValue("invalid major axis"));
        }
        let (f, es, e, b) = match shape {
            Shape::Rf(rf) => {
                if !(rf > 1.) {
                    return Err(Error::InvalidParameterValue("invalid inverse flattening"));
                }
                let f = 1. / rf;
                (f, 2. * f - f * f, (2. * f - f * f).sqrt(), (1. - f) * a)
            }
            Shape::F(f) => {
                if !(0. ..1.).contains(&f) {
                    return Err(Error::InvalidParameterValue("invalid flattening"));
                }
                (f, 2. * f - f * f, (2. * f - f * f).sqrt(), (1. - f) * a)
            }
            Shape::Es(es) => {
                if !(0. ..1.).contains(&es) {
                    return Err(Error::InvalidParameterValue("invalid eccentricity squared"));
                }
                let e = es.sqrt();
                let f = 1. - (1. - es).sqrt();
                (f, es, e, (1. - f) * a)
            }
            Shape::E(e) => {
                if !(0. ..1.).contains(&e) {
                    return Err(Error::InvalidParameterValue("invalid eccentricity"));
                }
                let es = e * e;
                let f = 1. - (1. - es).sqrt();
                (f, es, e, (1. - f) * a)
            }
            Shape::B(b) => {
                if !(b > 0. && b < a) {
                    return Err(Error::InvalidParameterValue("invalid minor axis"));
                }
                let es = (a * a - b * b) / (a * a);
                (1. - b / a, es, es.sqrt(), b)
            }
        };

        // Snap near-spheres to an exact sphere, same tolerance the teacher uses.
        if (a - b).abs() < EPS_10 {
            return Ok(Self {
                a,
                b: a,
                e: 0.,
                es: 0.,
                f: 0.,
                one_es: 1.,
            });
        }

        Ok(Self {
            a,
            b,
            e,
            es,
            f,
            one_es: 1. - es,
        })
    }

    pub fn from_defn(defn: &EllipsoidDefn) -> Result<Self> {
        if defn.rf.is_infinite() {
            Self::sphere(defn.a)
        } else {
            Self::from_a_and_shape(defn.a, Shape::Rf(defn.rf))
        }
    }
}
