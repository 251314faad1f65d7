use ndarray::Array2;
use num_traits::AsPrimitive;
use tracing::info;

use crate::error::ProfileError;

use super::aperture::{aperture_curves, ApertureCurves, ApertureSettings};
use super::centroid::{find_center, Centroid};
use super::config::ProfileConfig;
use super::radial::RadialProfile;

/// Everything derived from one click on a star.
#[derive(Clone, Debug, PartialEq)]
pub struct StarProfile {
    pub centroid: Centroid,
    pub profile: RadialProfile,
    pub settings: ApertureSettings,
    pub curves: ApertureCurves,
}

impl StarProfile {
    /// Replace the aperture settings, e.g. after the user edits them.
    /// The profile and curves do not depend on the settings.
    pub fn with_settings(self, settings: ApertureSettings) -> Self {
        Self { settings, ..self }
    }
}

/// Centroid the star near `click` (x, y), build its radial profile, and
/// recommend an aperture.
pub fn analyze_star<T>(
    image: &Array2<T>,
    click: (f64, f64),
    config: &ProfileConfig,
) -> Result<StarProfile, ProfileError>
where
    T: AsPrimitive<f64>,
{
    let centroid = find_center(image, click, &config.centroid)?;
    let profile = RadialProfile::new(image, centroid.position(), config.profile_size)?;
    let settings = ApertureSettings::from_fwhm(profile.fwhm, config.gap, config.annulus_width);
    let curves = aperture_curves(&profile, config.read_noise, config.gain)?;

    info!(
        x = centroid.x,
        y = centroid.y,
        hwhm = profile.hwhm,
        fwhm = profile.fwhm,
        radius = settings.radius,
        "Star profile analyzed"
    );

    Ok(StarProfile {
        centroid,
        profile,
        settings,
        curves,
    })
}
