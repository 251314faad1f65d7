pub mod aperture;
pub mod centroid;
pub mod config;
pub mod hwhm;
pub mod radial;
pub mod seeing;

pub use aperture::{aperture_curves, ApertureCurves, ApertureSettings};
pub use centroid::{find_center, Centroid};
pub use config::{CentroidConfig, ProfileConfig};
pub use hwhm::{find_hwhm, fwhm_from_hwhm};
pub use radial::{radial_profile, BinMode, RadialBins, RadialProfile};
pub use seeing::{analyze_star, StarProfile};
