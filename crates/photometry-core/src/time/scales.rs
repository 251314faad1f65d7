//! UTC → TAI → TT → TDB conversions and Julian dates.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::consts::{J2000_JD, MJD_OFFSET, SECONDS_PER_DAY, TT_MINUS_TAI};
use crate::error::TimeError;

/// TAI − UTC (seconds) in effect from each date onward.
const LEAP_SECONDS: [(i32, u32, f64); 28] = [
    (1972, 1, 10.0),
    (1972, 7, 11.0),
    (1973, 1, 12.0),
    (1974, 1, 13.0),
    (1975, 1, 14.0),
    (1976, 1, 15.0),
    (1977, 1, 16.0),
    (1978, 1, 17.0),
    (1979, 1, 18.0),
    (1980, 1, 19.0),
    (1981, 7, 20.0),
    (1982, 7, 21.0),
    (1983, 7, 22.0),
    (1985, 7, 23.0),
    (1988, 1, 24.0),
    (1990, 1, 25.0),
    (1991, 1, 26.0),
    (1992, 7, 27.0),
    (1993, 7, 28.0),
    (1994, 7, 29.0),
    (1996, 1, 30.0),
    (1997, 7, 31.0),
    (1999, 1, 32.0),
    (2006, 1, 33.0),
    (2009, 1, 34.0),
    (2012, 7, 35.0),
    (2015, 7, 36.0),
    (2017, 1, 37.0),
];

fn mjd_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1858, 11, 17).unwrap_or_default()
}

/// Modified Julian Date of a calendar timestamp, in the timestamp's own scale.
pub fn mjd(t: NaiveDateTime) -> f64 {
    let days = (t.date() - mjd_epoch()).num_days() as f64;
    let secs = t.num_seconds_from_midnight() as f64 + t.nanosecond() as f64 * 1e-9;
    days + secs / SECONDS_PER_DAY
}

/// Julian Date of a calendar timestamp, in the timestamp's own scale.
pub fn julian_date(t: NaiveDateTime) -> f64 {
    mjd(t) + MJD_OFFSET
}

/// TAI − UTC in seconds at the given UTC instant.
pub fn tai_minus_utc(utc: NaiveDateTime) -> Result<f64, TimeError> {
    let date = utc.date();
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(y, m, _)| {
            NaiveDate::from_ymd_opt(*y, *m, 1).is_some_and(|start| date >= start)
        })
        .map(|&(_, _, offset)| offset)
        .ok_or_else(|| TimeError::OutOfRange(utc.to_string()))
}

/// TT − UTC in seconds.
pub fn tt_minus_utc(utc: NaiveDateTime) -> Result<f64, TimeError> {
    Ok(tai_minus_utc(utc)? + TT_MINUS_TAI)
}

/// TDB − TT in seconds (periodic terms, microsecond level).
pub fn tdb_minus_tt(jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000_JD) / 36_525.0;
    0.001_657 * (628.3076 * t + 6.2401).sin()
        + 0.000_022 * (575.3385 * t + 4.2970).sin()
        + 0.000_014 * (1256.6152 * t + 6.1969).sin()
        + 0.000_005 * (606.9777 * t + 4.0212).sin()
        + 0.000_005 * (52.9691 * t + 0.4444).sin()
        + 0.000_002 * (21.3299 * t + 5.5431).sin()
        + 0.000_010 * t * (628.3076 * t + 4.2490).sin()
}

/// Julian Date in TT of a UTC instant.
pub fn utc_to_jd_tt(utc: NaiveDateTime) -> Result<f64, TimeError> {
    Ok(julian_date(utc) + tt_minus_utc(utc)? / SECONDS_PER_DAY)
}

/// Julian Date in TDB of a UTC instant.
pub fn utc_to_jd_tdb(utc: NaiveDateTime) -> Result<f64, TimeError> {
    let jd_tt = utc_to_jd_tt(utc)?;
    Ok(jd_tt + tdb_minus_tt(jd_tt) / SECONDS_PER_DAY)
}
