// SPDX-License-Identifier: MPL-2.0

//! Low-frequency window geometry and amplitude transfer.

use std::fmt;
use std::ops::Range;

use nalgebra::DMatrix;

use crate::error::{FdaError, FdaResult};

/// Emitted when the requested beta would give a window below one pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BetaAdjustment {
    /// Beta asked for by the caller.
    pub requested: f64,
    /// Beta actually used, `min(1 / cols, 1 / rows)`.
    pub effective: f64,
}

impl fmt::Display for BetaAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "window too small for beta {} (image too small or beta too low), \
             beta adjusted to {:.4} so that the window is at least 1x1 pixel",
            self.requested, self.effective
        )
    }
}

/// Half extents of the adaptation window and the beta they derive from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowSize {
    /// Effective beta.
    pub beta: f64,
    /// Half height of the window, at least 1.
    pub half_height: usize,
    /// Half width of the window, at least 1.
    pub half_width: usize,
    /// Set when `beta` differs from the requested one.
    pub adjustment: Option<BetaAdjustment>,
}

/// Compute the window half extents for an image of `rows x cols` pixels.
///
/// Half extents are `beta * rows` and `beta * cols`, rounded half to even.
/// If either is below one, beta is replaced by `min(1 / cols, 1 / rows)`
/// and both extents are recomputed, never going below one.
pub fn window_size(beta: f64, rows: usize, cols: usize) -> WindowSize {
    let half = |beta: f64, len: usize| (beta * len as f64).round_ties_even();

    let half_height = half(beta, rows);
    let half_width = half(beta, cols);
    if half_height >= 1.0 && half_width >= 1.0 {
        return WindowSize {
            beta,
            half_height: half_height as usize,
            half_width: half_width as usize,
            adjustment: None,
        };
    }

    let effective = (1.0 / cols as f64).min(1.0 / rows as f64);
    WindowSize {
        beta: effective,
        half_height: half(effective, rows).max(1.0) as usize,
        half_width: half(effective, cols).max(1.0) as usize,
        adjustment: Some(BetaAdjustment {
            requested: beta,
            effective,
        }),
    }
}

/// Rectangle of the centered spectrum whose amplitudes are replaced.
///
/// Spans `[crow - half_height, crow + half_height)` by
/// `[ccol - half_width, ccol + half_width)`, clipped to the image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdaptationWindow {
    rows: Range<usize>,
    cols: Range<usize>,
}

impl AdaptationWindow {
    /// Window centered on the zero frequency of a `rows x cols` spectrum.
    pub fn centered(rows: usize, cols: usize, size: &WindowSize) -> Self {
        let clip = |center: usize, half: usize, len: usize| {
            center.saturating_sub(half)..center.saturating_add(half).min(len)
        };
        Self {
            rows: clip(rows / 2, size.half_height, rows),
            cols: clip(cols / 2, size.half_width, cols),
        }
    }

    /// Row range covered by the window.
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Column range covered by the window.
    pub fn cols(&self) -> Range<usize> {
        self.cols.clone()
    }

    /// Copy the window of `from` over the same window of `into`.
    pub fn transfer(&self, from: &DMatrix<f64>, into: &mut DMatrix<f64>) -> FdaResult<()> {
        if from.shape() != into.shape() {
            return Err(FdaError::ShapeMismatch {
                expected: into.shape(),
                actual: from.shape(),
            });
        }
        let (rows, cols) = into.shape();
        if self.rows.end > rows || self.cols.end > cols {
            return Err(FdaError::ShapeMismatch {
                expected: (self.rows.end, self.cols.end),
                actual: (rows, cols),
            });
        }

        let start = (self.rows.start, self.cols.start);
        let shape = (self.rows.len(), self.cols.len());
        into.view_mut(start, shape).copy_from(&from.view(start, shape));
        Ok(())
    }
}
