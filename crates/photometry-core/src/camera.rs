use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::units::{Quantity, Unit};

/// Noise characteristics of a CCD/CMOS camera.
///
/// Gain, read noise and dark current are assumed constant across the sensor.
/// Every parameter must carry a unit; the unit of `gain` times image data
/// should match the unit of `read_noise`.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraProfile {
    gain: Quantity,
    read_noise: Quantity,
    dark_current: Quantity,
}

impl CameraProfile {
    pub fn new(
        gain: Quantity,
        read_noise: Quantity,
        dark_current: Quantity,
    ) -> Result<Self, ConfigError> {
        for (name, q) in [
            ("gain", &gain),
            ("read_noise", &read_noise),
            ("dark_current", &dark_current),
        ] {
            if q.unit.is_dimensionless() {
                return Err(ConfigError::DimensionlessQuantity {
                    parameter: name.to_string(),
                });
            }
        }
        Ok(Self {
            gain,
            read_noise,
            dark_current,
        })
    }

    pub fn gain(&self) -> &Quantity {
        &self.gain
    }

    pub fn read_noise(&self) -> &Quantity {
        &self.read_noise
    }

    pub fn dark_current(&self) -> &Quantity {
        &self.dark_current
    }
}

impl Default for CameraProfile {
    fn default() -> Self {
        Self {
            gain: Quantity::new(1.0, Unit::per(Unit::Electron, Unit::Adu)),
            read_noise: Quantity::new(1.0, Unit::Electron),
            dark_current: Quantity::new(0.01, Unit::per(Unit::Electron, Unit::Second)),
        }
    }
}

/// Serialized form of [`CameraProfile`], e.g.
///
/// ```toml
/// gain = "1.5 electron / adu"
/// read_noise = "10 electron"
/// dark_current = "0.01 electron / s"
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraConfig {
    pub gain: String,
    pub read_noise: String,
    pub dark_current: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = CameraProfile::default();
        Self {
            gain: camera.gain.to_string(),
            read_noise: camera.read_noise.to_string(),
            dark_current: camera.dark_current.to_string(),
        }
    }
}

impl TryFrom<&CameraConfig> for CameraProfile {
    type Error = ConfigError;

    fn try_from(config: &CameraConfig) -> Result<Self, Self::Error> {
        CameraProfile::new(
            Quantity::parse_with_units("gain", &config.gain)?,
            Quantity::parse_with_units("read_noise", &config.read_noise)?,
            Quantity::parse_with_units("dark_current", &config.dark_current)?,
        )
    }
}
