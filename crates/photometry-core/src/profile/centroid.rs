//! Iterative center-of-mass star centroiding.
//!
//! Starting from a rough guess (e.g. a mouse click), repeatedly cut out a
//! square around the current position, subtract a sigma-clipped background,
//! and take the intensity-weighted centroid of the positive residuals.

use ndarray::Array2;
use num_traits::AsPrimitive;
use tracing::{debug, warn};

use crate::consts::{CENTROID_CONVERGENCE_TOLERANCE, CENTROID_MAX_CENTER_OFFSET};
use crate::error::ProfileError;
use crate::stats::{sigma_clipped_stats, SigmaClipParams};

use super::config::CentroidConfig;

/// Result of centroid refinement, in full-image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Centroid {
    /// Horizontal (column) position.
    pub x: f64,
    /// Vertical (row) position.
    pub y: f64,
    /// Refinement passes after the initial estimate.
    pub iterations: usize,
    /// False when the iteration cap was hit before the position settled.
    pub converged: bool,
}

impl Centroid {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Locate the center of the star nearest `guess` (x, y).
pub fn find_center<T>(
    image: &Array2<T>,
    guess: (f64, f64),
    config: &CentroidConfig,
) -> Result<Centroid, ProfileError>
where
    T: AsPrimitive<f64>,
{
    let pad = (config.cutout_size / 2) as i64;
    if !guess.0.is_finite() || !guess.1.is_finite() {
        let (h, w) = image.dim();
        return Err(ProfileError::CutoutOutOfBounds {
            x: guess.0,
            y: guess.1,
            size: config.cutout_size,
            width: w,
            height: h,
        });
    }
    let mut x = guess.0.floor() as i64;
    let mut y = guess.1.floor() as i64;

    let mut current = cutout_centroid(image, x, y, pad, &config.sigma_clip)?;
    if !current.0.is_finite() || !current.1.is_finite() {
        return Err(ProfileError::CentroidDiverged {
            previous: guess,
            current,
        });
    }

    let mut previous: Option<(f64, f64)> = None;
    let mut iterations = 0;
    let converged = loop {
        let offset = (current.0 - x as f64).abs().max((current.1 - y as f64).abs());
        let moved = previous.map_or(f64::INFINITY, |p| {
            (current.0 - p.0).abs().max((current.1 - p.1).abs())
        });
        if offset <= CENTROID_MAX_CENTER_OFFSET && moved <= CENTROID_CONVERGENCE_TOLERANCE {
            break true;
        }
        if iterations > config.max_iters {
            break false;
        }

        x = current.0.floor() as i64;
        y = current.1.floor() as i64;
        let next = cutout_centroid(image, x, y, pad, &config.sigma_clip)?;
        iterations += 1;
        if !next.0.is_finite() || !next.1.is_finite() {
            return Err(ProfileError::CentroidDiverged {
                previous: current,
                current: next,
            });
        }
        debug!(iteration = iterations, x = next.0, y = next.1, "Centroid refined");
        previous = Some(current);
        current = next;
    };

    if !converged {
        warn!(
            x = current.0,
            y = current.1,
            max_iters = config.max_iters,
            "Centroid did not settle within the iteration cap"
        );
    }

    Ok(Centroid {
        x: current.0,
        y: current.1,
        iterations,
        converged,
    })
}

/// Background-subtracted centroid of the cutout `[y-pad, y+pad) x [x-pad, x+pad)`,
/// clipped to the image. Returns NaN coordinates when no pixel rises above
/// the background.
fn cutout_centroid<T>(
    image: &Array2<T>,
    x: i64,
    y: i64,
    pad: i64,
    sigma_clip: &SigmaClipParams,
) -> Result<(f64, f64), ProfileError>
where
    T: AsPrimitive<f64>,
{
    let (h, w) = image.dim();
    let col0 = x.saturating_sub(pad).clamp(0, w as i64) as usize;
    let col1 = x.saturating_add(pad).clamp(0, w as i64) as usize;
    let row0 = y.saturating_sub(pad).clamp(0, h as i64) as usize;
    let row1 = y.saturating_add(pad).clamp(0, h as i64) as usize;
    if col0 >= col1 || row0 >= row1 {
        return Err(ProfileError::CutoutOutOfBounds {
            x: x as f64,
            y: y as f64,
            size: (2 * pad) as usize,
            width: w,
            height: h,
        });
    }

    let mut values = Vec::with_capacity((row1 - row0) * (col1 - col0));
    for row in row0..row1 {
        for col in col0..col1 {
            values.push(image[[row, col]].as_());
        }
    }
    let background = sigma_clipped_stats(&values, sigma_clip).median;

    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut sum_w = 0.0f64;
    for row in row0..row1 {
        for col in col0..col1 {
            let weight = image[[row, col]].as_() - background;
            // Negative residuals are masked out.
            if weight >= 0.0 {
                sum_x += col as f64 * weight;
                sum_y += row as f64 * weight;
                sum_w += weight;
            }
        }
    }

    if sum_w > 0.0 {
        Ok((sum_x / sum_w, sum_y / sum_w))
    } else {
        Ok((f64::NAN, f64::NAN))
    }
}
