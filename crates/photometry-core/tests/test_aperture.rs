mod common;

use approx::assert_relative_eq;
use proptest::prelude::*;

use photometry_core::error::ProfileError;
use photometry_core::profile::aperture::recommended_radius;
use photometry_core::profile::hwhm::fwhm_from_hwhm;
use photometry_core::profile::{
    analyze_star, aperture_curves, ApertureSettings, ProfileConfig, RadialProfile,
};

use common::{cone_star, gaussian_star};

// ---------------------------------------------------------------------------
// Aperture settings
// ---------------------------------------------------------------------------

#[test]
fn test_recommended_radius_rounds_half_to_even() {
    assert_eq!(recommended_radius(4), 6.0);
    assert_eq!(recommended_radius(5), 8.0);
    assert_eq!(recommended_radius(3), 4.0);
    assert_eq!(recommended_radius(7), 10.0);
}

#[test]
fn test_recommended_radius_uses_integer_fwhm() {
    // HWHM 1.2 reports FWHM 2, so the radius is 3 rather than round(3.6).
    let fwhm = fwhm_from_hwhm(1.2);
    assert_eq!(fwhm, 2);
    assert_eq!(recommended_radius(fwhm), 3.0);
    assert_eq!(ApertureSettings::from_fwhm(fwhm, 5.0, 15.0).radius, 3.0);
}

#[test]
fn test_annulus_follows_radius() {
    let settings = ApertureSettings::from_fwhm(4, 5.0, 15.0);
    assert_eq!(settings.radius, 6.0);
    assert_eq!(settings.inner_annulus(), 11.0);
    assert_eq!(settings.outer_annulus(), 26.0);
}

// ---------------------------------------------------------------------------
// Growth curves
// ---------------------------------------------------------------------------

#[test]
fn test_gaussian_curves() {
    let image = gaussian_star(100, 100, (50.0, 50.0), 2.0, 1000.0, 100.0);
    let profile = RadialProfile::new(&image, (50.0, 50.0), 60).unwrap();
    let curves = aperture_curves(&profile, 10.0, 1.5).unwrap();

    assert_relative_eq!(curves.sky_median, 100.0, epsilon = 1e-3);
    assert_relative_eq!(curves.sky_noise, 10.0, epsilon = 1e-3);
    assert_eq!(curves.radii().len(), curves.net_counts.len());
    assert_eq!(*curves.pixel_counts.last().unwrap(), 3600);

    // Total flux of the star is 2 pi sigma^2 A.
    let flux = 2.0 * std::f64::consts::PI * 4.0 * 1000.0;
    assert_relative_eq!(*curves.net_counts.last().unwrap(), flux, max_relative = 1e-3);

    let best = curves.best_snr_radius().unwrap();
    assert!((3..=10).contains(&best), "best radius {best}");
}

#[test]
fn test_blotted_sky_leaves_no_pixels() {
    let image = gaussian_star(100, 100, (50.0, 50.0), 2.0, 1000.0, 100.0);
    let mut profile = RadialProfile::new(&image, (50.0, 50.0), 20).unwrap();
    profile.fwhm = 10;
    assert_eq!(
        aperture_curves(&profile, 10.0, 1.5).unwrap_err(),
        ProfileError::NoSkyPixels { size: 20, fwhm: 10 }
    );
}

proptest! {
    #[test]
    fn prop_cone_growth_curve(
        radius in 3.0f64..10.0,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
        amplitude in 10.0f64..1000.0,
    ) {
        let center = (40.0 + fx, 40.0 + fy);
        let image = cone_star(80, center, radius, amplitude);
        let profile = RadialProfile::new(&image, center, 60).unwrap();
        let curves = aperture_curves(&profile, 5.0, 2.0).unwrap();

        prop_assert_eq!(curves.sky_median, 0.0);
        for pair in curves.net_counts.windows(2) {
            prop_assert!(pair[1] >= pair[0]);
        }
        let total = image.sum();
        let last = *curves.net_counts.last().unwrap();
        prop_assert!((last - total).abs() <= 1e-9 * total, "{} vs {}", last, total);
    }
}

// ---------------------------------------------------------------------------
// Click-to-aperture
// ---------------------------------------------------------------------------

#[test]
fn test_analyze_star_end_to_end() {
    let image = gaussian_star(128, 128, (63.4, 70.8), 2.0, 2000.0, 300.0);
    let star = analyze_star(&image, (61.0, 72.0), &ProfileConfig::default()).unwrap();

    assert!(star.centroid.converged);
    assert!((star.centroid.x - 63.4).abs() < 0.1);
    assert!((star.centroid.y - 70.8).abs() < 0.1);
    assert!((4..=6).contains(&star.profile.fwhm));
    assert_eq!(
        star.settings.radius,
        recommended_radius(star.profile.fwhm)
    );
    assert_eq!(star.settings.inner_annulus(), star.settings.radius + 5.0);

    let edited = star.clone().with_settings(ApertureSettings {
        radius: 7.0,
        ..star.settings.clone()
    });
    assert_eq!(edited.settings.radius, 7.0);
    assert_eq!(edited.curves, star.curves);
}

#[test]
fn test_analyze_star_too_close_to_edge() {
    let image = gaussian_star(128, 128, (10.0, 64.0), 2.0, 2000.0, 300.0);
    let err = analyze_star(&image, (10.0, 64.0), &ProfileConfig::default()).unwrap_err();
    assert!(matches!(err, ProfileError::CutoutOutOfBounds { .. }));
}
