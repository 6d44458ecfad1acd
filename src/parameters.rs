//!
//! Projection parameters
//!
//! Two unrelated things share this module because they are both "named access into a
//! bag of values": the 15-slot GCTP-style parameter block every projection is
//! initialized from (spec.md §3), and the generic key/value accessor
//! [`ParamList`]/[`Parameter`] the header parser (`header.rs`) hands to it. The latter
//! is carried over near-verbatim from the teacher's `parameters.rs`.

use crate::errors::{Error, Result};
use std::fmt::Debug;
use std::str::FromStr;

/// The 15-slot projection parameter block (spec.md §3). Slot meaning is
/// projection-specific; each `projections/*.rs` module documents which slots it reads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjParams(pub [f64; 15]);

impl ProjParams {
    pub fn get(&self, slot: usize) -> f64 {
        self.0[slot]
    }
}

impl From<[f64; 15]> for ProjParams {
    fn from(v: [f64; 15]) -> Self {
        Self(v)
    }
}

/// A single key/value pair as parsed from a header file.
pub struct Parameter<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
}

impl<'a> TryInto<f64> for &Parameter<'a> {
    type Error = Error;
    fn try_into(self) -> Result<f64> {
        self.try_convert::<f64>()
    }
}

impl<'a> TryInto<i32> for &Parameter<'a> {
    type Error = Error;
    fn try_into(self) -> Result<i32> {
        self.try_convert::<i32>()
    }
}

impl<'a> TryInto<&'a str> for &Parameter<'a> {
    type Error = Error;
    fn try_into(self) -> Result<&'a str> {
        self.value
            .ok_or_else(|| Error::NoValueParameter(self.name.into()))
    }
}

impl<'a> Parameter<'a> {
    pub fn try_convert<F: FromStr>(&self) -> Result<F>
    where
        <F as FromStr>::Err: Debug,
    {
        match self.value.map(F::from_str) {
            None => Err(Error::NoValueParameter(self.name.into())),
            Some(result) => result.map_err(|err| Error::ParameterValueError {
                name: self.name.into(),
                reason: format!("{:?}", err),
            }),
        }
    }
}

/// An ordered list of parameters, searched by name.
pub struct ParamList<'a>(Vec<Parameter<'a>>);

impl<'a> ParamList<'a> {
    pub fn new(params: Vec<Parameter<'a>>) -> Self {
        Self(params)
    }

    pub fn get(&self, name: &str) -> Option<&Parameter<'a>> {
        self.0.iter().find(|p| p.name == name)
    }
}
