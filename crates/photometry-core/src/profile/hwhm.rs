use crate::error::ProfileError;

const HALF: f64 = 0.5;

/// Half-width at half-maximum of a normalized profile.
///
/// `intensity` must be scaled so that the peak is 1 and the background 0.
/// The profile is assumed to fall monotonically with radius, so the first
/// bin below one half brackets the crossing together with its predecessor;
/// noisy or double-peaked profiles can therefore report a radius well inside
/// the true HWHM. Only bins present in both `radii` and `intensity` are
/// searched.
pub fn find_hwhm(radii: &[f64], intensity: &[f64]) -> Result<f64, ProfileError> {
    let bins: Vec<(f64, f64)> = radii.iter().copied().zip(intensity.iter().copied()).collect();
    let half_index = bins
        .iter()
        .position(|&(_, v)| v < HALF)
        .ok_or(ProfileError::EmptyProfile)?;
    if half_index == 0 {
        return Err(ProfileError::PeakOffCenter);
    }

    let (r_more, i_more) = bins[half_index - 1];
    let (r_less, i_less) = bins[half_index];

    Ok(r_less - (i_less - HALF) / (i_less - i_more) * (r_less - r_more))
}

/// FWHM rounded to whole pixels (ties to even).
pub fn fwhm_from_hwhm(hwhm: f64) -> usize {
    (2.0 * hwhm).round_ties_even().max(0.0) as usize
}
