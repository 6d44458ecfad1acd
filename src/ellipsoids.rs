//!
//! Static table of named ellipsoids
//!
//! Same macro-table idiom the teacher uses for `datums.rs` and `units.rs`: a `const`
//! array searched linearly, case-insensitively, by name.

use crate::ellipsoid::EllipsoidDefn;

macro_rules! ellps {
    ($name:ident, $id:expr, $a:expr, $rf:expr) => {
        pub const $name: EllipsoidDefn = EllipsoidDefn {
            id: $id,
            a: $a,
            rf: $rf,
        };
    };
}

ellps!(WGS84, "WGS84", 6_378_137.0, 298.257_223_563);
ellps!(GRS80, "GRS80", 6_378_137.0, 298.257_222_101);
ellps!(CLRK66, "clrk66", 6_378_206.4, 294.978_698_2);
ellps!(CLRK80, "clrk80", 6_378_249.145, 293.465);
ellps!(CLRK80IGN, "clrk80ign", 6_378_249.2, 293.466_021_3);
ellps!(BESSEL, "bessel", 6_377_397.155, 299.152_812_85);
ellps!(AIRY, "airy", 6_377_563.396, 299.324_964_6);
ellps!(MOD_AIRY, "mod_airy", 6_377_340.189, 299.324_964_6);
ellps!(INTL, "intl", 6_378_388.0, 297.0);
ellps!(SPHERE, "sphere", 6_370_997.0, f64::INFINITY);
// Radius used throughout the MODIS Sinusoidal/ISIN tile grid (spec.md §8 scenario 3).
ellps!(MODIS_SPHERE, "modis_sphere", 6_371_007.181, f64::INFINITY);

const ELLIPSOIDS: &[&EllipsoidDefn] = &[
    &WGS84,
    &GRS80,
    &CLRK66,
    &CLRK80,
    &CLRK80IGN,
    &BESSEL,
    &AIRY,
    &MOD_AIRY,
    &INTL,
    &SPHERE,
    &MODIS_SPHERE,
];

pub fn find_ellipsoid(name: &str) -> Option<&'static EllipsoidDefn> {
    ELLIPSOIDS
        .iter()
        .find(|d| d.id.eq_ignore_ascii_case(name))
        .copied()
}
