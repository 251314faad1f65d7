use serde::{Deserialize, Serialize};

use crate::consts::{WGS84_A, WGS84_F};
use crate::error::ConfigError;

/// Geodetic location of an observatory (WGS-84).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObservatoryConfig", into = "ObservatoryConfig")]
pub struct Observatory {
    latitude_deg: f64,
    /// East positive.
    longitude_deg: f64,
    elevation_m: f64,
}

impl Observatory {
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
    ) -> Result<Self, ConfigError> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(ConfigError::InvalidLatitude(latitude_deg));
        }
        if !(-180.0..360.0).contains(&longitude_deg) {
            return Err(ConfigError::InvalidLongitude(longitude_deg));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            elevation_m,
        })
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }

    /// Longitude wrapped into [-180, 180).
    pub fn signed_longitude_deg(&self) -> f64 {
        if self.longitude_deg >= 180.0 {
            self.longitude_deg - 360.0
        } else {
            self.longitude_deg
        }
    }

    /// Earth-fixed (ITRS) Cartesian position in metres.
    pub fn geocentric_m(&self) -> [f64; 3] {
        let lat = self.latitude_deg.to_radians();
        let lon = self.longitude_deg.to_radians();
        let e2 = WGS84_F * (2.0 - WGS84_F);
        let n = WGS84_A / (1.0 - e2 * lat.sin().powi(2)).sqrt();
        let h = self.elevation_m;
        [
            (n + h) * lat.cos() * lon.cos(),
            (n + h) * lat.cos() * lon.sin(),
            (n * (1.0 - e2) + h) * lat.sin(),
        ]
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObservatoryConfig {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: f64,
}

impl TryFrom<ObservatoryConfig> for Observatory {
    type Error = ConfigError;

    fn try_from(c: ObservatoryConfig) -> Result<Self, Self::Error> {
        Observatory::new(c.latitude, c.longitude, c.elevation)
    }
}

impl From<Observatory> for ObservatoryConfig {
    fn from(o: Observatory) -> Self {
        Self {
            latitude: o.latitude_deg,
            longitude: o.longitude_deg,
            elevation: o.elevation_m,
        }
    }
}
