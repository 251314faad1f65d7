//! Barycentric light-travel-time correction.
//!
//! The observer's position relative to the solar-system barycenter is built
//! from low-precision Keplerian mean elements (valid 1800-2050): the
//! Earth-Moon barycenter orbit, the Sun's reflex motion due to the four giant
//! planets, and the observatory's geocentric offset rotated by sidereal time.
//! The resulting correction is good to a few hundredths of a second.

use std::f64::consts::TAU;

use chrono::NaiveDateTime;

use crate::consts::{AU_LIGHT_SECONDS, AU_M, J2000_JD, OBLIQUITY_J2000_DEG, SECONDS_PER_DAY};
use crate::error::TimeError;
use crate::observatory::Observatory;

use super::scales::{julian_date, utc_to_jd_tdb};

/// Mean orbital elements at J2000 and their rates per Julian century.
struct OrbitalElements {
    /// Semi-major axis (AU).
    a: (f64, f64),
    e: (f64, f64),
    /// Inclination (deg).
    i: (f64, f64),
    /// Mean longitude (deg).
    l: (f64, f64),
    /// Longitude of perihelion (deg).
    peri: (f64, f64),
    /// Longitude of ascending node (deg).
    node: (f64, f64),
}

const EARTH_MOON: OrbitalElements = OrbitalElements {
    a: (1.000_002_61, 0.000_005_62),
    e: (0.016_711_23, -0.000_043_92),
    i: (-0.000_015_31, -0.012_946_68),
    l: (100.464_571_66, 35_999.372_449_81),
    peri: (102.937_681_93, 0.323_273_64),
    node: (0.0, 0.0),
};

/// Giant planets with their mass relative to the Sun.
const GIANT_PLANETS: [(OrbitalElements, f64); 4] = [
    (
        OrbitalElements {
            a: (5.202_887_00, -0.000_116_07),
            e: (0.048_386_24, -0.000_132_53),
            i: (1.304_396_95, -0.001_837_14),
            l: (34.396_440_51, 3_034.746_127_75),
            peri: (14.728_479_83, 0.212_526_68),
            node: (100.473_909_09, 0.204_691_06),
        },
        1.0 / 1_047.348_6,
    ),
    (
        OrbitalElements {
            a: (9.536_675_94, -0.001_250_60),
            e: (0.053_861_79, -0.000_509_91),
            i: (2.485_991_87, 0.001_936_09),
            l: (49.954_244_23, 1_222.493_622_01),
            peri: (92.598_878_31, -0.418_972_16),
            node: (113.662_424_48, -0.288_677_94),
        },
        1.0 / 3_497.898,
    ),
    (
        OrbitalElements {
            a: (19.189_164_64, -0.001_961_76),
            e: (0.047_257_44, -0.000_043_97),
            i: (0.772_637_83, -0.002_429_39),
            l: (313.238_104_51, 428.482_027_85),
            peri: (170.954_276_30, 0.408_052_81),
            node: (74.016_925_03, 0.042_405_89),
        },
        1.0 / 22_902.98,
    ),
    (
        OrbitalElements {
            a: (30.069_922_76, 0.000_262_91),
            e: (0.008_590_48, 0.000_051_05),
            i: (1.770_043_47, 0.000_353_72),
            l: (-55.120_029_69, 218.459_453_25),
            peri: (44.964_762_27, -0.322_414_64),
            node: (131.784_225_74, -0.005_086_64),
        },
        1.0 / 19_412.24,
    ),
];

const EARTH_MOON_MASS: f64 = 1.0 / 328_900.56;

impl OrbitalElements {
    /// Heliocentric position in ecliptic J2000 coordinates (AU).
    fn heliocentric_ecliptic(&self, t: f64) -> [f64; 3] {
        let at = |(v0, rate): (f64, f64)| v0 + rate * t;
        let a = at(self.a);
        let e = at(self.e);
        let incl = at(self.i).to_radians();
        let l = at(self.l);
        let peri = at(self.peri);
        let node = at(self.node);

        let omega = (peri - node).to_radians();
        let node = node.to_radians();
        let mean_anomaly = (l - peri).to_radians().rem_euclid(TAU);
        let ecc_anomaly = solve_kepler(mean_anomaly, e);

        let xp = a * (ecc_anomaly.cos() - e);
        let yp = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

        let (so, co) = omega.sin_cos();
        let (sn, cn) = node.sin_cos();
        let (si, ci) = incl.sin_cos();
        [
            (co * cn - so * sn * ci) * xp + (-so * cn - co * sn * ci) * yp,
            (co * sn + so * cn * ci) * xp + (-so * sn + co * cn * ci) * yp,
            (so * si) * xp + (co * si) * yp,
        ]
    }
}

/// Newton iteration on Kepler's equation `E - e sin E = M`.
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = if e < 0.8 { mean_anomaly } else { std::f64::consts::PI };
    for _ in 0..30 {
        let delta = (ecc - e * ecc.sin() - mean_anomaly) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < 1e-14 {
            break;
        }
    }
    ecc
}

fn ecliptic_to_equatorial([x, y, z]: [f64; 3]) -> [f64; 3] {
    let (se, ce) = OBLIQUITY_J2000_DEG.to_radians().sin_cos();
    [x, ce * y - se * z, se * y + ce * z]
}

/// Barycentric position of the geocenter (equatorial J2000, AU).
pub fn earth_barycentric(jd_tdb: f64) -> [f64; 3] {
    let t = (jd_tdb - J2000_JD) / 36_525.0;

    let mut weighted = [0.0; 3];
    let mut total_mass = 1.0;
    for (elements, mass) in &GIANT_PLANETS {
        let p = elements.heliocentric_ecliptic(t);
        for k in 0..3 {
            weighted[k] += mass * p[k];
        }
        total_mass += mass;
    }
    let earth_helio = EARTH_MOON.heliocentric_ecliptic(t);
    for k in 0..3 {
        weighted[k] += EARTH_MOON_MASS * earth_helio[k];
    }
    total_mass += EARTH_MOON_MASS;

    let earth_bary = [
        earth_helio[0] - weighted[0] / total_mass,
        earth_helio[1] - weighted[1] / total_mass,
        earth_helio[2] - weighted[2] / total_mass,
    ];
    ecliptic_to_equatorial(earth_bary)
}

/// Greenwich mean sidereal time in radians.
fn gmst(jd_ut: f64) -> f64 {
    let d = jd_ut - J2000_JD;
    let t = d / 36_525.0;
    let deg = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    deg.to_radians().rem_euclid(TAU)
}

/// Observatory position relative to the geocenter (equatorial, AU).
pub fn observatory_geocentric(observatory: &Observatory, jd_ut: f64) -> [f64; 3] {
    let [x, y, z] = observatory.geocentric_m();
    let (s, c) = gmst(jd_ut).sin_cos();
    [(c * x - s * y) / AU_M, (s * x + c * y) / AU_M, z / AU_M]
}

/// Unit vector toward (ra, dec) given in degrees.
pub fn unit_vector(ra_deg: f64, dec_deg: f64) -> [f64; 3] {
    let (sr, cr) = ra_deg.to_radians().sin_cos();
    let (sd, cd) = dec_deg.to_radians().sin_cos();
    [cd * cr, cd * sr, sd]
}

/// Light travel time (seconds) from the observatory to the barycenter along
/// the line of sight to (ra, dec). Positive when the observer sits on the
/// target's side of the barycenter.
pub fn light_travel_time(
    utc: NaiveDateTime,
    ra_deg: f64,
    dec_deg: f64,
    observatory: &Observatory,
) -> Result<f64, TimeError> {
    let jd_tdb = utc_to_jd_tdb(utc)?;
    let earth = earth_barycentric(jd_tdb);
    let site = observatory_geocentric(observatory, julian_date(utc));
    let n = unit_vector(ra_deg, dec_deg);
    let dot: f64 = (0..3).map(|k| (earth[k] + site[k]) * n[k]).sum();
    Ok(dot * AU_LIGHT_SECONDS)
}

/// Barycentric Julian Date (TDB) at mid-exposure.
pub fn barycentric_julian_date(
    utc_start: NaiveDateTime,
    exposure_s: f64,
    ra_deg: f64,
    dec_deg: f64,
    observatory: &Observatory,
) -> Result<f64, TimeError> {
    let jd_tdb = utc_to_jd_tdb(utc_start)?;
    let ltt = light_travel_time(utc_start, ra_deg, dec_deg, observatory)?;
    Ok(jd_tdb + (ltt + exposure_s / 2.0) / SECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kepler_circular_orbit() {
        assert!((solve_kepler(1.234, 0.0) - 1.234).abs() < 1e-12);
    }

    #[test]
    fn test_earth_distance_near_one_au() {
        for k in 0..12 {
            let r = earth_barycentric(J2000_JD + 30.0 * k as f64);
            let d = (r[0] * r[0] + r[1] * r[1] + r[2] * r[2]).sqrt();
            assert!((0.97..1.03).contains(&d), "distance {d} AU");
        }
    }

    #[test]
    fn test_gmst_at_j2000() {
        let deg = gmst(J2000_JD).to_degrees();
        assert!((deg - 280.460_618_37).abs() < 1e-6);
    }
}
