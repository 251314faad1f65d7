//! Aperture recommendation and growth curves.
//!
//! The sky level comes from the profile cutout with a square of +/- 2 FWHM
//! around the star blotted out. The sky-subtracted cutout is then binned
//! radially and accumulated into net counts and SNR as functions of the
//! aperture radius.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    APERTURE_FWHM_FACTOR, DEFAULT_ANNULUS_GAP, DEFAULT_ANNULUS_WIDTH, SKY_EXCLUSION_FWHM_FACTOR,
};
use crate::error::ProfileError;
use crate::stats::{nan_mean_std, nan_median};

use super::radial::{bin_radially, BinMode, RadialProfile};

/// Aperture radius and sky annulus geometry, in pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApertureSettings {
    pub radius: f64,
    /// Distance from the aperture edge to the inner annulus.
    pub gap: f64,
    pub annulus_width: f64,
}

impl Default for ApertureSettings {
    fn default() -> Self {
        Self {
            radius: 1.0,
            gap: DEFAULT_ANNULUS_GAP,
            annulus_width: DEFAULT_ANNULUS_WIDTH,
        }
    }
}

impl ApertureSettings {
    /// Recommended settings for a star of the given FWHM.
    pub fn from_fwhm(fwhm: usize, gap: f64, annulus_width: f64) -> Self {
        Self {
            radius: recommended_radius(fwhm),
            gap,
            annulus_width,
        }
    }

    pub fn inner_annulus(&self) -> f64 {
        self.radius + self.gap
    }

    pub fn outer_annulus(&self) -> f64 {
        self.inner_annulus() + self.annulus_width
    }
}

/// Default aperture radius: 1.5 x FWHM rounded to whole pixels.
pub fn recommended_radius(fwhm: usize) -> f64 {
    (APERTURE_FWHM_FACTOR * fwhm as f64).round_ties_even()
}

/// Net counts and SNR inside apertures of growing radius.
///
/// Index `i` covers every pixel closer than `i + 1` to the center.
#[derive(Clone, Debug, PartialEq)]
pub struct ApertureCurves {
    pub net_counts: Vec<f64>,
    pub snr: Vec<f64>,
    /// Cumulative number of pixels enclosed.
    pub pixel_counts: Vec<usize>,
    pub sky_median: f64,
    pub sky_std: f64,
    /// Per-pixel sky noise used for the SNR, in counts.
    pub sky_noise: f64,
}

impl ApertureCurves {
    /// Outer radius of each curve entry.
    pub fn radii(&self) -> Vec<usize> {
        (1..=self.net_counts.len()).collect()
    }

    /// Radius with the highest SNR, if any SNR is finite.
    pub fn best_snr_radius(&self) -> Option<usize> {
        self.snr
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_finite())
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i + 1)
    }
}

/// Build net-count and SNR growth curves for `profile`.
///
/// `read_noise` is in electrons and `gain` in electrons per count; dark
/// current is ignored.
pub fn aperture_curves(
    profile: &RadialProfile,
    read_noise: f64,
    gain: f64,
) -> Result<ApertureCurves, ProfileError> {
    let size = profile.size;
    let exclusion = SKY_EXCLUSION_FWHM_FACTOR * profile.fwhm as i64;
    let lo = (size as i64 / 2 - exclusion).clamp(0, size as i64) as usize;
    let hi = (size as i64 / 2 + exclusion).clamp(0, size as i64) as usize;

    let sky: Vec<f64> = profile
        .sub_data
        .indexed_iter()
        .filter(|((r, c), _)| !((lo..hi).contains(r) && (lo..hi).contains(c)))
        .map(|(_, &v)| v)
        .collect();
    if sky.is_empty() {
        return Err(ProfileError::NoSkyPixels {
            size,
            fwhm: profile.fwhm,
        });
    }
    let sky_median = nan_median(&sky);
    let (_, sky_std) = nan_mean_std(&sky);
    let sky_noise = if sky_median >= 0.0 {
        sky_median.sqrt().max(sky_std)
    } else {
        sky_std
    };

    let subtracted = profile.sub_data.mapv(|v| v - sky_median);
    let bins = bin_radially(&subtracted, profile.sub_center, BinMode::Cumulative);

    let per_pixel_variance = sky_noise * sky_noise + (read_noise / gain).powi(2);
    let mut net_counts = Vec::with_capacity(bins.intensity.len());
    let mut pixel_counts = Vec::with_capacity(bins.intensity.len());
    let mut snr = Vec::with_capacity(bins.intensity.len());
    let mut counts = 0.0;
    let mut pixels = 0usize;
    for (&bin_sum, &n) in bins.intensity.iter().zip(&bins.pixel_counts) {
        counts += bin_sum;
        pixels += n;
        let error = (counts.max(0.0) + pixels as f64 * per_pixel_variance).sqrt();
        net_counts.push(counts);
        pixel_counts.push(pixels);
        snr.push(counts / error);
    }

    debug!(sky_median, sky_std, sky_noise, bins = net_counts.len(), "Aperture curves built");

    Ok(ApertureCurves {
        net_counts,
        snr,
        pixel_counts,
        sky_median,
        sky_std,
        sky_noise,
    })
}
