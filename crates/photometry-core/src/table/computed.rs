//! Columns derived from validated photometry.
//!
//! Each [`ComputedColumn`] is a pure function of the validated table, the
//! camera and the observatory. [`ComputedColumn::PIPELINE`] fixes the
//! evaluation order so that `snr` is available before `mag_error`.

use std::f64::consts::PI;
use std::fmt;

use tracing::debug;

use crate::camera::CameraProfile;
use crate::consts::MAG_ERROR_FACTOR;
use crate::error::{PhotometryError, SchemaError};
use crate::observatory::Observatory;
use crate::time::{barycentric_julian_date, night_id};
use crate::units::Unit;

use super::columns::Column;
use super::data::Table;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComputedColumn {
    ApertureArea,
    AnnulusArea,
    Snr,
    Bjd,
    Night,
    MagInst,
    MagError,
}

impl ComputedColumn {
    /// Dependency-respecting evaluation order.
    pub const PIPELINE: [ComputedColumn; 7] = [
        Self::ApertureArea,
        Self::AnnulusArea,
        Self::Snr,
        Self::Bjd,
        Self::Night,
        Self::MagInst,
        Self::MagError,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ApertureArea => "aperture_area",
            Self::AnnulusArea => "annulus_area",
            Self::Snr => "snr",
            Self::Bjd => "bjd",
            Self::Night => "night",
            Self::MagInst => "mag_inst",
            Self::MagError => "mag_error",
        }
    }

    /// Evaluate the column over every row of `table`.
    pub fn compute(
        self,
        table: &Table,
        camera: &CameraProfile,
        observatory: &Observatory,
    ) -> Result<Column, PhotometryError> {
        let column = match self {
            Self::ApertureArea => {
                let aperture = table.float("aperture")?;
                Column::float(
                    self.name(),
                    Some(Unit::Pixel.squared()),
                    aperture.iter().map(|r| PI * r * r).collect(),
                )
            }
            Self::AnnulusArea => {
                let inner = table.float("annulus_inner")?;
                let outer = table.float("annulus_outer")?;
                Column::float(
                    self.name(),
                    Some(Unit::Pixel.squared()),
                    inner
                        .iter()
                        .zip(outer)
                        .map(|(ri, ro)| PI * (ro * ro - ri * ri))
                        .collect(),
                )
            }
            Self::Snr => {
                // Noise is in counts, so the photo-electron SNR picks up sqrt(gain).
                let gain_sqrt = camera.gain().value.sqrt();
                let net = table.float("aperture_net_cnts")?;
                let noise = table.float("noise")?;
                Column::float(
                    self.name(),
                    None,
                    net.iter()
                        .zip(noise)
                        .map(|(c, n)| gain_sqrt * c / n)
                        .collect(),
                )
            }
            Self::Bjd => {
                let times = table.time("date-obs")?;
                let exposure = table.float("exposure")?;
                let ra = table.float("ra")?;
                let dec = table.float("dec")?;
                let bjd = times
                    .values
                    .iter()
                    .zip(exposure)
                    .zip(ra.iter().zip(dec))
                    .map(|((&t, &exp), (&ra, &dec))| {
                        barycentric_julian_date(t, exp, ra, dec, observatory)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Column::float(self.name(), Some(Unit::Day), bjd)
            }
            Self::Night => {
                let times = table.time("date-obs")?;
                let lon = observatory.signed_longitude_deg();
                Column::int(
                    self.name(),
                    times.values.iter().map(|&t| night_id(t, lon)).collect(),
                )
            }
            Self::MagInst => {
                let gain = camera.gain().value;
                let net = table.float("aperture_net_cnts")?;
                let exposure = table.float("exposure")?;
                Column::float(
                    self.name(),
                    None,
                    net.iter()
                        .zip(exposure)
                        .map(|(c, t)| -2.5 * (gain * c / t).log10())
                        .collect(),
                )
            }
            Self::MagError => {
                let snr = table.float(Self::Snr.name())?;
                Column::float(
                    self.name(),
                    None,
                    snr.iter().map(|s| MAG_ERROR_FACTOR / s).collect(),
                )
            }
        };
        debug!(column = self.name(), rows = column.len(), "Computed column");
        Ok(column)
    }
}

impl fmt::Display for ComputedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Add every computed column to `table`.
///
/// Columns already present are an error unless `retain_existing` is set, in
/// which case they are left exactly as supplied.
pub fn add_computed_columns(
    table: &mut Table,
    camera: &CameraProfile,
    observatory: &Observatory,
    retain_existing: bool,
) -> Result<Vec<ComputedColumn>, PhotometryError> {
    if !retain_existing {
        if let Some(existing) = ComputedColumn::PIPELINE
            .iter()
            .find(|c| table.contains(c.name()))
        {
            return Err(SchemaError::AlreadyComputed(existing.name().to_string()).into());
        }
    }

    let mut added = Vec::new();
    for step in ComputedColumn::PIPELINE {
        if table.contains(step.name()) {
            debug!(column = step.name(), "Retaining user-supplied column");
            continue;
        }
        let column = step.compute(table, camera, observatory)?;
        table.add_column(column)?;
        added.push(step);
    }
    Ok(added)
}
