#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use ndarray::Array2;

use photometry_core::table::{Column, Table, TimeScale};
use photometry_core::{Observatory, Unit};

/// Build a UTC-naive timestamp.
pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .expect("valid date")
        .and_hms_opt(h, mi, s)
        .expect("valid time")
}

pub fn observatory(longitude: f64) -> Observatory {
    Observatory::new(46.86, longitude, 311.0).expect("valid observatory")
}

/// Raw photometry with every required column and the given timestamps.
///
/// Every row has net counts 100, noise 10 (adu) and a 1 s exposure.
pub fn photometry_table_at(times: Vec<NaiveDateTime>) -> Table {
    let n = times.len();
    let pix = || Some(Unit::Pixel);
    let adu = || Some(Unit::Adu);
    let fill = |v: f64| vec![v; n];
    Table::from_columns([
        Column::int("star_id", (1..=n as i64).collect()),
        Column::float("ra", Some(Unit::Degree), fill(180.0)),
        Column::float("dec", Some(Unit::Degree), fill(30.0)),
        Column::float("xcenter", pix(), fill(512.0)),
        Column::float("ycenter", pix(), fill(400.0)),
        Column::float("fwhm_x", pix(), fill(4.0)),
        Column::float("fwhm_y", pix(), fill(4.2)),
        Column::float("width", pix(), fill(4.1)),
        Column::float("aperture", pix(), fill(6.0)),
        Column::float("annulus_inner", pix(), fill(11.0)),
        Column::float("annulus_outer", pix(), fill(26.0)),
        Column::float("aperture_sum", adu(), fill(1200.0)),
        Column::float("annulus_sum", adu(), fill(20000.0)),
        Column::float("sky_per_pix_avg", adu(), fill(10.0)),
        Column::float("sky_per_pix_med", adu(), fill(10.0)),
        Column::float("sky_per_pix_std", adu(), fill(1.0)),
        Column::float("aperture_net_cnts", adu(), fill(100.0)),
        Column::float("noise", adu(), fill(10.0)),
        Column::float("exposure", Some(Unit::Second), fill(1.0)),
        Column::time("date-obs", TimeScale::Utc, times),
        Column::float("airmass", None, fill(1.2)),
        Column::text("passband", vec!["rp"; n]),
        Column::text("file", (0..n).map(|i| format!("frame_{i:03}.fits"))),
    ])
    .expect("consistent fixture table")
}

/// Three rows a few minutes apart on one night.
pub fn photometry_table() -> Table {
    photometry_table_at(vec![
        utc(2023, 5, 10, 3, 0, 0),
        utc(2023, 5, 10, 3, 5, 0),
        utc(2023, 5, 10, 3, 10, 0),
    ])
}

/// Return `table` with column `column.name` replaced by `column`.
pub fn replace_column(mut table: Table, column: Column) -> Table {
    table.remove_column(&column.name);
    table.add_column(column).expect("replacement column fits");
    table
}

/// Symmetric Gaussian star on a flat background.
pub fn gaussian_star(
    height: usize,
    width: usize,
    center: (f64, f64),
    sigma: f64,
    amplitude: f64,
    background: f64,
) -> Array2<f32> {
    Array2::from_shape_fn((height, width), |(row, col)| {
        let dx = col as f64 - center.0;
        let dy = row as f64 - center.1;
        let v = background + amplitude * (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp();
        v as f32
    })
}

/// Cone-shaped star that is exactly zero beyond `radius`, on a zero background.
pub fn cone_star(size: usize, center: (f64, f64), radius: f64, amplitude: f64) -> Array2<f64> {
    Array2::from_shape_fn((size, size), |(row, col)| {
        let dx = col as f64 - center.0;
        let dy = row as f64 - center.1;
        let r = (dx * dx + dy * dy).sqrt();
        (amplitude * (1.0 - r / radius)).max(0.0)
    })
}
