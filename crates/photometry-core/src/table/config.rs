use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::camera::{CameraConfig, CameraProfile};
use crate::error::ConfigError;
use crate::observatory::Observatory;

use super::photometry::PhotometryOptions;

/// Everything needed to build a [`super::PhotometryData`] besides the table.
///
/// ```toml
/// retain_user_computed = false
///
/// [camera]
/// gain = "1.5 electron / adu"
/// read_noise = "10 electron"
/// dark_current = "0.01 electron / s"
///
/// [observatory]
/// latitude = 46.86
/// longitude = -96.45
/// elevation = 311.0
///
/// [passband_map]
/// rp = "SR"
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhotometryConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    pub observatory: Observatory,
    #[serde(default)]
    pub passband_map: BTreeMap<String, String>,
    #[serde(default)]
    pub retain_user_computed: bool,
}

impl PhotometryConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Toml(e.to_string()))
    }

    pub fn camera_profile(&self) -> Result<CameraProfile, ConfigError> {
        CameraProfile::try_from(&self.camera)
    }

    pub fn options(&self) -> PhotometryOptions {
        PhotometryOptions {
            passband_map: (!self.passband_map.is_empty()).then(|| self.passband_map.clone()),
            retain_user_computed: self.retain_user_computed,
        }
    }
}
