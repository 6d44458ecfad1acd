/// Authalic-latitude helper `q(φ)` used by equal-area projections (Albers, Lambert
/// Azimuthal Equal-Area). `one_es = 1 - e²`.
pub(crate) fn qsfn(sinphi: f64, e: f64, one_es: f64) -> f64 {
    if e < 1.0e-7 {
        return 2. * sinphi;
    }
    let con = e * sinphi;
    one_es * (sinphi / (1. - con * con) - (0.5 / e) * ((1. - con) / (1. + con)).ln())
}
