use chrono::{Duration, NaiveDateTime, Timelike};

use super::scales::mjd;

/// Whole-hour approximation of the local time zone at `longitude_deg`
/// (east positive).
pub fn hour_offset(longitude_deg: f64) -> i64 {
    (longitude_deg / 15.0).floor() as i64
}

/// Integer id shared by every exposure of one local observing night.
///
/// The id is the MJD (truncated) of the local noon preceding the
/// observation, so exposures on either side of local midnight map together
/// while local noon starts a new night.
pub fn night_id(utc: NaiveDateTime, longitude_deg: f64) -> i64 {
    let local = utc + Duration::hours(hour_offset(longitude_deg));
    let hour = i64::from(local.hour());
    let shift_hours = if hour < 12 { hour + 12 } else { hour - 12 };
    let since_noon = Duration::hours(shift_hours)
        + Duration::minutes(i64::from(local.minute()))
        + Duration::seconds(i64::from(local.second()))
        + Duration::nanoseconds(i64::from(local.nanosecond()));
    mjd(utc - since_noon).trunc() as i64
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 5, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_hour_offset_floors() {
        assert_eq!(hour_offset(0.0), 0);
        assert_eq!(hour_offset(14.9), 0);
        assert_eq!(hour_offset(-96.5), -7);
        assert_eq!(hour_offset(150.0), 10);
    }

    #[test]
    fn test_local_noon_starts_new_night() {
        let before = night_id(at(10, 11, 59), 0.0);
        let after = night_id(at(10, 12, 0), 0.0);
        assert_eq!(after, before + 1);
    }
}
