// SPDX-License-Identifier: MPL-2.0

//! Fourier domain adaptation of color images.
//!
//! The centered low-frequency window of each source channel's amplitude
//! spectrum is overwritten with the same window of the target channel,
//! then the channel is synthesized back with its own, untouched phase.
//! The result keeps the structure of the source and takes on the global
//! color and illumination statistics of the target.

use std::borrow::Cow;

use image::{imageops, DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use log::{debug, warn};

use crate::error::{FdaError, FdaResult};
use crate::fft::Fft2d;
use crate::params::FdaParams;
use crate::spectrum::{check_layout, is_u8, Spectrum};
use crate::window::{window_size, AdaptationWindow, WindowSize};

/// Number of channels of the images being adapted.
pub const CHANNELS: usize = 3;

/// Adapt `source` to the low-frequency statistics of `target`.
///
/// Shorthand for [`FourierDomainAdaptation::adapt`] with default parameters
/// apart from `beta`.
pub fn fda(source: &DynamicImage, target: &DynamicImage, beta: f64) -> FdaResult<RgbImage> {
    FourierDomainAdaptation::new(FdaParams::new(beta)).adapt(source, target)
}

/// Fourier domain adaptation with a fixed set of parameters.
#[derive(Clone, Debug, Default)]
pub struct FourierDomainAdaptation {
    params: FdaParams,
}

impl FourierDomainAdaptation {
    /// Create an adapter.
    pub fn new(params: FdaParams) -> Self {
        Self { params }
    }

    /// Parameters in use.
    pub fn params(&self) -> &FdaParams {
        &self.params
    }

    /// Adapt a decoded source image to a decoded target image.
    ///
    /// Both must hold 3 channels of 8-bit samples.
    /// The output has the dimensions of `source`, whatever the size of `target`.
    pub fn adapt(&self, source: &DynamicImage, target: &DynamicImage) -> FdaResult<RgbImage> {
        check_u8(source)?;
        check_u8(target)?;
        self.adapt_rgb(as_rgb8(source)?, as_rgb8(target)?)
    }

    /// Adapt an RGB source image to an RGB target image.
    pub fn adapt_rgb(&self, source: &RgbImage, target: &RgbImage) -> FdaResult<RgbImage> {
        let (width, height) = source.dimensions();
        if width == 0 || height == 0 || target.width() == 0 || target.height() == 0 {
            return Err(FdaError::EmptyImage);
        }
        let (rows, cols) = (height as usize, width as usize);

        let size = self.window_size(rows, cols);
        let window = AdaptationWindow::centered(rows, cols, &size);
        debug!(
            "adapting {cols}x{rows} image, beta {}, window rows {:?} cols {:?}",
            size.beta,
            window.rows(),
            window.cols()
        );

        let target: Cow<RgbImage> = if target.dimensions() == (width, height) {
            Cow::Borrowed(target)
        } else {
            debug!(
                "resizing target from {}x{} with {:?}",
                target.width(),
                target.height(),
                self.params.filter
            );
            Cow::Owned(imageops::resize(target, width, height, self.params.filter.into()))
        };

        let fft = Fft2d::new(rows, cols)?;
        let channels = per_channel(|k| {
            let adapted = adapt_channel(&fft, &channel(source, k), &channel(&target, k), &window)?;
            debug!("channel {k} adapted");
            adapted.synthesize_with(&fft)
        })?;

        Ok(RgbImage::from_fn(width, height, |x, y| {
            Rgb([0usize, 1, 2].map(|k| channels[k].get_pixel(x, y).0[0]))
        }))
    }

    /// Window size for a `rows x cols` source, warning when beta had to grow.
    pub fn window_size(&self, rows: usize, cols: usize) -> WindowSize {
        let size = window_size(self.params.beta, rows, cols);
        if let Some(adjustment) = &size.adjustment {
            warn!("{adjustment}");
        }
        size
    }
}

/// Spectrum of `source` with its amplitude window taken from `target`.
///
/// The phase is the one of `source`, unmodified.
pub fn adapt_channel(
    fft: &Fft2d,
    source: &GrayImage,
    target: &GrayImage,
    window: &AdaptationWindow,
) -> FdaResult<Spectrum> {
    let mut adapted = Spectrum::analyze_with(fft, source)?;
    let reference = Spectrum::analyze_with(fft, target)?;
    window.transfer(reference.amplitude(), adapted.amplitude_mut())?;
    Ok(adapted)
}

/// Extract channel `k` of an RGB image.
pub fn channel(image: &RgbImage, k: usize) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([image.get_pixel(x, y).0[k]])
    })
}

#[cfg(feature = "parallel")]
fn per_channel<T, F>(f: F) -> FdaResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> FdaResult<T> + Sync + Send,
{
    use rayon::prelude::*;

    (0..CHANNELS).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn per_channel<T, F>(f: F) -> FdaResult<Vec<T>>
where
    F: Fn(usize) -> FdaResult<T>,
{
    (0..CHANNELS).map(f).collect()
}

fn check_u8(image: &DynamicImage) -> FdaResult<()> {
    let color = image.color();
    if is_u8(color) {
        Ok(())
    } else {
        Err(FdaError::InvalidInputType(color))
    }
}

fn as_rgb8(image: &DynamicImage) -> FdaResult<&RgbImage> {
    check_layout(image, CHANNELS)?;
    image
        .as_rgb8()
        .ok_or(FdaError::InvalidInputType(image.color()))
}
