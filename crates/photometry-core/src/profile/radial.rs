//! Radially binned intensity profiles around a sub-pixel center.

use ndarray::Array2;
use num_traits::AsPrimitive;

use crate::error::ProfileError;
use crate::stats::median_in_place;

use super::hwhm::{find_hwhm, fwhm_from_hwhm};

/// How per-bin intensities are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BinMode {
    /// Mean intensity per bin.
    #[default]
    Scaled,
    /// Summed intensity per bin.
    Cumulative,
}

/// Pixel intensities binned by integer distance from a center.
///
/// All per-bin vectors share one index: bin `i` holds pixels whose exact
/// distance lies in `[i, i + 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialBins {
    /// Exact distance of every cutout pixel from the center.
    pub r_exact: Array2<f64>,
    /// Mean exact distance of the pixels in each bin.
    pub ravg: Vec<f64>,
    /// Mean or summed intensity per bin, depending on [`BinMode`].
    pub intensity: Vec<f64>,
    pub pixel_counts: Vec<usize>,
}

/// A square cutout plus the profile center in cutout coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Cutout {
    pub data: Array2<f64>,
    pub center: (f64, f64),
}

/// Extract a `size` x `size` cutout centered on `center` (x, y).
///
/// The cutout starts at `ceil(c - size / 2)` on each axis. Fails if any
/// part of it would fall outside the image.
pub fn strict_cutout<T>(
    image: &Array2<T>,
    center: (f64, f64),
    size: usize,
) -> Result<Cutout, ProfileError>
where
    T: AsPrimitive<f64>,
{
    let (h, w) = image.dim();
    let origin = |c: f64| (c - size as f64 / 2.0).ceil() as i64;
    let (col0, row0) = (origin(center.0), origin(center.1));
    let fits = |origin: i64, extent: usize| {
        origin >= 0 && (origin as usize).checked_add(size).is_some_and(|end| end <= extent)
    };
    let finite = center.0.is_finite() && center.1.is_finite();
    if size == 0 || !finite || !fits(col0, w) || !fits(row0, h) {
        return Err(ProfileError::CutoutOutOfBounds {
            x: center.0,
            y: center.1,
            size,
            width: w,
            height: h,
        });
    }

    let (col0, row0) = (col0 as usize, row0 as usize);
    let data = Array2::from_shape_fn((size, size), |(r, c)| image[[row0 + r, col0 + c]].as_());
    Ok(Cutout {
        data,
        center: (center.0 - col0 as f64, center.1 - row0 as f64),
    })
}

/// Bin the pixels of `data` by integer distance from `center` (x, y).
pub fn bin_radially(data: &Array2<f64>, center: (f64, f64), mode: BinMode) -> RadialBins {
    let r_exact = Array2::from_shape_fn(data.dim(), |(row, col)| {
        let dx = col as f64 - center.0;
        let dy = row as f64 - center.1;
        (dx * dx + dy * dy).sqrt()
    });

    let nbins = r_exact.iter().fold(0usize, |m, &r| m.max(r as usize)) + 1;
    let mut sum_i = vec![0.0f64; nbins];
    let mut sum_r = vec![0.0f64; nbins];
    let mut counts = vec![0usize; nbins];
    for (&r, &v) in r_exact.iter().zip(data.iter()) {
        let bin = r as usize;
        sum_i[bin] += v;
        sum_r[bin] += r;
        counts[bin] += 1;
    }

    let ravg = sum_r
        .iter()
        .zip(&counts)
        .map(|(s, &n)| s / n as f64)
        .collect();
    let intensity = match mode {
        BinMode::Scaled => sum_i
            .iter()
            .zip(&counts)
            .map(|(s, &n)| s / n as f64)
            .collect(),
        BinMode::Cumulative => sum_i,
    };

    RadialBins {
        r_exact,
        ravg,
        intensity,
        pixel_counts: counts,
    }
}

/// Cut out `size` x `size` pixels around `center` and bin them radially.
pub fn radial_profile<T>(
    image: &Array2<T>,
    center: (f64, f64),
    size: usize,
    mode: BinMode,
) -> Result<RadialBins, ProfileError>
where
    T: AsPrimitive<f64>,
{
    let cutout = strict_cutout(image, center, size)?;
    Ok(bin_radially(&cutout.data, cutout.center, mode))
}

/// Radial profile of one star with its half-maximum widths.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialProfile {
    /// Star center (x, y) in full-image coordinates.
    pub center: (f64, f64),
    /// Full width of the square cutout.
    pub size: usize,
    /// Raw cutout pixels.
    pub sub_data: Array2<f64>,
    /// Center in cutout coordinates.
    pub sub_center: (f64, f64),
    pub r_exact: Array2<f64>,
    pub ravg: Vec<f64>,
    /// Mean raw intensity per bin.
    pub profile: Vec<f64>,
    pub pixel_counts: Vec<usize>,
    /// `(profile - median) / (max(profile) - median)`, 1 at the peak.
    pub scaled_profile: Vec<f64>,
    /// Cutout pixels on the same scale as `scaled_profile`.
    pub scaled_exact_counts: Array2<f64>,
    pub hwhm: f64,
    pub fwhm: usize,
}

impl RadialProfile {
    /// Build the profile of the star centered at `center` (x, y).
    ///
    /// The background level is the cutout median; the profile is not
    /// background subtracted before binning.
    pub fn new<T>(
        image: &Array2<T>,
        center: (f64, f64),
        size: usize,
    ) -> Result<Self, ProfileError>
    where
        T: AsPrimitive<f64>,
    {
        let cutout = strict_cutout(image, center, size)?;
        let bins = bin_radially(&cutout.data, cutout.center, BinMode::Scaled);

        let mut scratch: Vec<f64> = cutout.data.iter().copied().collect();
        let sub_med = median_in_place(&mut scratch);
        let peak = bins
            .intensity
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let adjust_max = peak - sub_med;

        let scaled_profile: Vec<f64> = bins
            .intensity
            .iter()
            .map(|v| (v - sub_med) / adjust_max)
            .collect();
        let scaled_exact_counts = cutout.data.mapv(|v| (v - sub_med) / adjust_max);

        let hwhm = find_hwhm(&bins.ravg, &scaled_profile)?;

        Ok(Self {
            center,
            size,
            sub_data: cutout.data,
            sub_center: cutout.center,
            r_exact: bins.r_exact,
            ravg: bins.ravg,
            profile: bins.intensity,
            pixel_counts: bins.pixel_counts,
            scaled_profile,
            scaled_exact_counts,
            hwhm,
            fwhm: fwhm_from_hwhm(hwhm),
        })
    }

    /// Integer radius of each bin, `0..n`.
    pub fn radius_values(&self) -> Vec<usize> {
        (0..self.profile.len()).collect()
    }
}
