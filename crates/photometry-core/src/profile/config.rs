use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANNULUS_GAP, DEFAULT_ANNULUS_WIDTH, DEFAULT_CENTROID_CUTOUT_SIZE,
    DEFAULT_CENTROID_MAX_ITERS, DEFAULT_GAIN, DEFAULT_PROFILE_SIZE, DEFAULT_READ_NOISE,
};
use crate::error::ConfigError;
use crate::stats::SigmaClipParams;

/// Parameters for iterative centroid refinement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CentroidConfig {
    /// Full width of the square cutout (pixels).
    #[serde(default = "default_cutout_size")]
    pub cutout_size: usize,
    /// Refinement continues while the pass count is at most this value, so
    /// up to `max_iters + 1` passes run after the initial estimate.
    #[serde(default = "default_max_iters")]
    pub max_iters: usize,
    /// Background estimation inside the cutout.
    #[serde(default)]
    pub sigma_clip: SigmaClipParams,
}

fn default_cutout_size() -> usize {
    DEFAULT_CENTROID_CUTOUT_SIZE
}
fn default_max_iters() -> usize {
    DEFAULT_CENTROID_MAX_ITERS
}
fn default_profile_size() -> usize {
    DEFAULT_PROFILE_SIZE
}
fn default_gap() -> f64 {
    DEFAULT_ANNULUS_GAP
}
fn default_annulus_width() -> f64 {
    DEFAULT_ANNULUS_WIDTH
}
fn default_read_noise() -> f64 {
    DEFAULT_READ_NOISE
}
fn default_gain() -> f64 {
    DEFAULT_GAIN
}

impl Default for CentroidConfig {
    fn default() -> Self {
        Self {
            cutout_size: DEFAULT_CENTROID_CUTOUT_SIZE,
            max_iters: DEFAULT_CENTROID_MAX_ITERS,
            sigma_clip: SigmaClipParams::default(),
        }
    }
}

/// Configuration for the click-to-aperture seeing profile analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub centroid: CentroidConfig,
    /// Full width of the cutout used for the radial profile (pixels).
    #[serde(default = "default_profile_size")]
    pub profile_size: usize,
    /// Gap between aperture and inner annulus for the recommended settings.
    #[serde(default = "default_gap")]
    pub gap: f64,
    /// Annulus width for the recommended settings.
    #[serde(default = "default_annulus_width")]
    pub annulus_width: f64,
    /// Read noise in electrons, for the SNR curve.
    #[serde(default = "default_read_noise")]
    pub read_noise: f64,
    /// Gain in electrons per count, for the SNR curve.
    #[serde(default = "default_gain")]
    pub gain: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            centroid: CentroidConfig::default(),
            profile_size: DEFAULT_PROFILE_SIZE,
            gap: DEFAULT_ANNULUS_GAP,
            annulus_width: DEFAULT_ANNULUS_WIDTH,
            read_noise: DEFAULT_READ_NOISE,
            gain: DEFAULT_GAIN,
        }
    }
}

impl ProfileConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Toml(e.to_string()))
    }
}
