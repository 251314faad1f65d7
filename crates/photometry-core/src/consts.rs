/// Default full width (pixels) of the cutout used for centroiding.
pub const DEFAULT_CENTROID_CUTOUT_SIZE: usize = 30;

/// Default cap on centroid refinement iterations.
pub const DEFAULT_CENTROID_MAX_ITERS: usize = 10;

/// A centroid further than this from the cutout center (pixels) forces
/// another refinement pass.
pub const CENTROID_MAX_CENTER_OFFSET: f64 = 3.0;

/// Position change (pixels) below which the centroid is considered stable.
pub const CENTROID_CONVERGENCE_TOLERANCE: f64 = 0.1;

/// Default full width (pixels) of the cutout used for the radial profile.
pub const DEFAULT_PROFILE_SIZE: usize = 60;

/// Default gap (pixels) between aperture and inner annulus.
pub const DEFAULT_ANNULUS_GAP: f64 = 5.0;

/// Default width (pixels) of the sky annulus.
pub const DEFAULT_ANNULUS_WIDTH: f64 = 15.0;

/// Recommended aperture radius as a multiple of the FWHM.
pub const APERTURE_FWHM_FACTOR: f64 = 1.5;

/// The sky estimate for the aperture curves excludes a square of this many
/// FWHM on each side of the star.
pub const SKY_EXCLUSION_FWHM_FACTOR: i64 = 2;

/// Default read noise (electrons) for aperture diagnostics.
pub const DEFAULT_READ_NOISE: f64 = 10.0;

/// Default gain (electrons per count) for aperture diagnostics.
pub const DEFAULT_GAIN: f64 = 1.5;

/// Rejection threshold (in standard deviations) for sigma-clipped statistics.
pub const SIGMA_CLIP_SIGMA: f64 = 3.0;

/// Maximum number of sigma-clipping passes.
pub const SIGMA_CLIP_MAX_ITERS: usize = 5;

/// 2.5 / ln(10): converts fractional flux error into magnitudes.
pub const MAG_ERROR_FACTOR: f64 = 1.085736205;

/// Julian Date of the Modified Julian Date zero point.
pub const MJD_OFFSET: f64 = 2_400_000.5;

/// Julian Date of the J2000.0 epoch (TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// TT - TAI in seconds.
pub const TT_MINUS_TAI: f64 = 32.184;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical unit in metres.
pub const AU_M: f64 = 149_597_870_700.0;

/// Speed of light in metres per second.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Light travel time across one astronomical unit, in seconds.
pub const AU_LIGHT_SECONDS: f64 = AU_M / SPEED_OF_LIGHT;

/// WGS-84 equatorial radius in metres.
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS-84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Mean obliquity of the ecliptic at J2000.0, degrees.
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291_11;
