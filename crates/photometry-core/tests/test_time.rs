mod common;

use approx::assert_abs_diff_eq;
use chrono::Duration;
use proptest::prelude::*;

use photometry_core::time::scales::{tai_minus_utc, utc_to_jd_tt};
use photometry_core::time::{
    barycentric_julian_date, julian_date, light_travel_time, night_id, utc_to_jd_tdb,
};
use photometry_core::Observatory;

use common::{observatory, utc};

// ---------------------------------------------------------------------------
// Time scales
// ---------------------------------------------------------------------------

#[test]
fn test_tdb_minus_utc_in_2020() {
    let t = utc(2020, 3, 20, 12, 0, 0);
    let offset_s = (utc_to_jd_tdb(t).unwrap() - julian_date(t)) * 86_400.0;
    assert_abs_diff_eq!(offset_s, 69.184, epsilon = 0.01);
}

#[test]
fn test_tt_minus_utc_before_2017_leap() {
    let t = utc(2016, 6, 1, 0, 0, 0);
    let offset_s = (utc_to_jd_tt(t).unwrap() - julian_date(t)) * 86_400.0;
    assert_abs_diff_eq!(offset_s, 68.184, epsilon = 1e-3);
}

#[test]
fn test_leap_second_table_start() {
    assert_eq!(tai_minus_utc(utc(1972, 1, 1, 0, 0, 0)).unwrap(), 10.0);
    assert!(tai_minus_utc(utc(1971, 12, 31, 23, 59, 59)).is_err());
}

// ---------------------------------------------------------------------------
// Light travel time
// ---------------------------------------------------------------------------

#[test]
fn test_ltt_toward_anti_sun_at_equinox() {
    // At the March equinox the Earth sits toward RA 12h from the Sun.
    let t = utc(2020, 3, 20, 12, 0, 0);
    let ltt = light_travel_time(t, 180.0, 0.0, &observatory(0.0)).unwrap();
    assert!((485.0..510.0).contains(&ltt), "ltt {ltt} s");
}

#[test]
fn test_ltt_toward_sun_at_equinox() {
    let t = utc(2020, 3, 20, 12, 0, 0);
    let ltt = light_travel_time(t, 0.0, 0.0, &observatory(0.0)).unwrap();
    assert!((-510.0..-485.0).contains(&ltt), "ltt {ltt} s");
}

#[test]
fn test_ltt_toward_celestial_pole_is_small() {
    let t = utc(2020, 3, 20, 12, 0, 0);
    let ltt = light_travel_time(t, 0.0, 90.0, &observatory(0.0)).unwrap();
    assert!(ltt.abs() < 10.0, "ltt {ltt} s");
}

#[test]
fn test_ltt_reverses_half_a_year_later() {
    let obs = observatory(0.0);
    let march = light_travel_time(utc(2021, 3, 20, 0, 0, 0), 180.0, 0.0, &obs).unwrap();
    let sept = light_travel_time(utc(2021, 9, 22, 0, 0, 0), 180.0, 0.0, &obs).unwrap();
    assert!(march > 400.0 && sept < -400.0, "march {march}, sept {sept}");
}

// ---------------------------------------------------------------------------
// BJD
// ---------------------------------------------------------------------------

#[test]
fn test_bjd_shifts_by_half_exposure() {
    let t = utc(2022, 8, 1, 4, 0, 0);
    let obs = observatory(263.5);
    let short = barycentric_julian_date(t, 0.0, 250.0, 36.0, &obs).unwrap();
    let long = barycentric_julian_date(t, 60.0, 250.0, 36.0, &obs).unwrap();
    assert_abs_diff_eq!((long - short) * 86_400.0, 30.0, epsilon = 1e-3);
}

#[test]
fn test_bjd_is_monotonic_over_a_night() {
    let obs = observatory(263.5);
    let start = utc(2022, 8, 1, 3, 0, 0);
    let mut last = f64::NEG_INFINITY;
    for minutes in (0..360).step_by(15) {
        let t = start + Duration::minutes(minutes);
        let bjd = barycentric_julian_date(t, 30.0, 250.0, 36.0, &obs).unwrap();
        assert!(bjd > last);
        last = bjd;
    }
}

// IP Peg seen from Greenwich, the worked example of astropy's
// `Time.light_travel_time`. Reference values are in days.
const IP_PEG_RA: f64 = (23.0 + 23.0 / 60.0 + 8.55 / 3600.0) * 15.0;
const IP_PEG_DEC: f64 = 18.0 + 24.0 / 60.0 + 59.3 / 3600.0;

fn greenwich() -> Observatory {
    Observatory::new(51.477811, -0.001475, 46.0).unwrap()
}

#[test]
fn test_ltt_matches_published_reference() {
    let obs = greenwich();
    let first = utc(2013, 2, 4, 23, 0, 0);
    let second = utc(2013, 2, 4, 23, 28, 41) + Duration::milliseconds(146);

    let ltt = light_travel_time(first, IP_PEG_RA, IP_PEG_DEC, &obs).unwrap();
    assert_abs_diff_eq!(ltt, -0.0037715 * 86_400.0, epsilon = 0.05);
    let ltt = light_travel_time(second, IP_PEG_RA, IP_PEG_DEC, &obs).unwrap();
    assert_abs_diff_eq!(ltt, -0.00377286 * 86_400.0, epsilon = 0.05);
}

#[test]
fn test_bjd_matches_published_reference() {
    let t = utc(2013, 2, 4, 23, 0, 0);
    let bjd = barycentric_julian_date(t, 0.0, IP_PEG_RA, IP_PEG_DEC, &greenwich()).unwrap();
    // JD(UTC) + (TT - UTC) + light travel time.
    let reference = 2_456_326.458_333_33 + 67.184 / 86_400.0 - 0.0037715;
    assert_abs_diff_eq!((bjd - reference) * 86_400.0, 0.0, epsilon = 0.1);
}

// ---------------------------------------------------------------------------
// Night id
// ---------------------------------------------------------------------------

#[test]
fn test_night_id_is_mjd_of_preceding_noon() {
    // 2023-05-09 is MJD 60073.
    assert_eq!(night_id(utc(2023, 5, 10, 2, 0, 0), 0.0), 60_073);
    assert_eq!(night_id(utc(2023, 5, 9, 12, 0, 0), 0.0), 60_073);
    assert_eq!(night_id(utc(2023, 5, 9, 11, 59, 59), 0.0), 60_072);
}

proptest! {
    #[test]
    fn prop_night_constant_between_local_noons(
        lon in -180.0f64..180.0,
        a in 0i64..86_400,
        b in 0i64..86_400,
    ) {
        let offset_h = (lon / 15.0).floor() as i64;
        // UTC instant of a local noon.
        let noon = utc(2023, 1, 15, 12, 0, 0) - Duration::hours(offset_h);
        let first = night_id(noon + Duration::seconds(a), lon);
        let second = night_id(noon + Duration::seconds(b), lon);
        prop_assert_eq!(first, second);
        prop_assert_eq!(night_id(noon + Duration::days(1), lon), first + 1);
    }
}
