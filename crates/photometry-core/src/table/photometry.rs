use std::collections::BTreeMap;

use tracing::info;

use crate::camera::CameraProfile;
use crate::error::{PhotometryError, SchemaError};
use crate::observatory::Observatory;
use crate::units::Unit;

use super::columns::TimeScale;
use super::computed::{add_computed_columns, ComputedColumn};
use super::data::Table;
use super::schema::{validate, TableDescription};

/// Columns that must all carry the same (arbitrary) counts unit.
pub const COUNTS_COLUMNS: [&str; 7] = [
    "aperture_sum",
    "annulus_sum",
    "sky_per_pix_avg",
    "sky_per_pix_med",
    "sky_per_pix_std",
    "aperture_net_cnts",
    "noise",
];

pub const TIME_COLUMN: &str = "date-obs";

/// Options controlling [`PhotometryData::new`].
#[derive(Clone, Debug, Default)]
pub struct PhotometryOptions {
    /// Instrumental passband name → standard passband name.
    pub passband_map: Option<BTreeMap<String, String>>,
    /// Keep computed columns already present in the input instead of failing.
    pub retain_user_computed: bool,
}

/// Validated aperture photometry with the camera and observatory it was
/// taken with.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotometryData {
    table: Table,
    camera: CameraProfile,
    observatory: Observatory,
    passband_map: Option<BTreeMap<String, String>>,
}

impl PhotometryData {
    /// Required columns and units of the raw photometry table.
    pub fn description() -> TableDescription {
        let pix = || Some(Unit::Pixel);
        TableDescription::new()
            .require("star_id", None)
            .require("ra", Some(Unit::Degree))
            .require("dec", Some(Unit::Degree))
            .require("xcenter", pix())
            .require("ycenter", pix())
            .require("fwhm_x", pix())
            .require("fwhm_y", pix())
            .require("width", pix())
            .require("aperture", pix())
            .require("annulus_inner", pix())
            .require("annulus_outer", pix())
            .require("aperture_sum", None)
            .require("annulus_sum", None)
            .require("sky_per_pix_avg", None)
            .require("sky_per_pix_med", None)
            .require("sky_per_pix_std", None)
            .require("aperture_net_cnts", None)
            .require("noise", None)
            .require("exposure", Some(Unit::Second))
            .require(TIME_COLUMN, None)
            .require("airmass", None)
            .require("passband", None)
            .require("file", None)
    }

    /// Validate `data` and derive the computed columns.
    ///
    /// `data`, `camera` and `observatory` are copied; later changes to the
    /// originals do not affect the result. On any error no table is built.
    pub fn new(
        observatory: &Observatory,
        camera: &CameraProfile,
        data: &Table,
        options: &PhotometryOptions,
    ) -> Result<Self, PhotometryError> {
        let mut validated = validate(&Self::description(), data)?;
        check_counts_units(validated.table())?;
        check_time_scale(validated.table())?;

        let camera = camera.clone();
        let observatory = *observatory;
        let added = add_computed_columns(
            validated.table_mut(),
            &camera,
            &observatory,
            options.retain_user_computed,
        )?;

        let mut table = validated.into_table();
        if let Some(map) = &options.passband_map {
            table.map_text("passband", map)?;
        }

        info!(
            rows = table.len(),
            computed = added.len(),
            retained = ComputedColumn::PIPELINE.len() - added.len(),
            "Photometry table built"
        );

        Ok(Self {
            table,
            camera,
            observatory,
            passband_map: options.passband_map.clone(),
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn camera(&self) -> &CameraProfile {
        &self.camera
    }

    pub fn observatory(&self) -> &Observatory {
        &self.observatory
    }

    pub fn passband_map(&self) -> Option<&BTreeMap<String, String>> {
        self.passband_map.as_ref()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn aperture_area(&self) -> Result<&[f64], SchemaError> {
        self.table.float(ComputedColumn::ApertureArea.name())
    }

    pub fn annulus_area(&self) -> Result<&[f64], SchemaError> {
        self.table.float(ComputedColumn::AnnulusArea.name())
    }

    pub fn snr(&self) -> Result<&[f64], SchemaError> {
        self.table.float(ComputedColumn::Snr.name())
    }

    pub fn bjd(&self) -> Result<&[f64], SchemaError> {
        self.table.float(ComputedColumn::Bjd.name())
    }

    pub fn night(&self) -> Result<&[i64], SchemaError> {
        self.table.int(ComputedColumn::Night.name())
    }

    pub fn mag_inst(&self) -> Result<&[f64], SchemaError> {
        self.table.float(ComputedColumn::MagInst.name())
    }

    pub fn mag_error(&self) -> Result<&[f64], SchemaError> {
        self.table.float(ComputedColumn::MagError.name())
    }

    pub fn passbands(&self) -> Result<&[String], SchemaError> {
        self.table.text("passband")
    }
}

/// All counts columns must share one unit. The unit carried by most of them
/// is taken as the reference so that a single odd column is the one named.
fn check_counts_units(table: &Table) -> Result<(), SchemaError> {
    let units = COUNTS_COLUMNS
        .iter()
        .map(|name| table.unit_of(name))
        .collect::<Result<Vec<_>, _>>()?;
    let votes = |u: &Option<&Unit>| units.iter().filter(|v| *v == u).count();
    let mut reference_idx = 0;
    for (i, u) in units.iter().enumerate() {
        if votes(u) > votes(&units[reference_idx]) {
            reference_idx = i;
        }
    }
    let reference = COUNTS_COLUMNS[reference_idx];
    let expected = units[reference_idx];
    for (name, &actual) in COUNTS_COLUMNS.iter().zip(&units) {
        if actual != expected {
            return Err(SchemaError::InconsistentUnit {
                column: name.to_string(),
                reference: reference.to_string(),
                expected: expected.cloned(),
                actual: actual.cloned(),
            });
        }
    }
    Ok(())
}

fn check_time_scale(table: &Table) -> Result<(), SchemaError> {
    let times = table.time(TIME_COLUMN)?;
    if times.scale != TimeScale::Utc {
        return Err(SchemaError::InvalidTimeScale {
            column: TIME_COLUMN.to_string(),
            scale: times.scale,
        });
    }
    Ok(())
}
