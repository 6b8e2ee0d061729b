// SPDX-License-Identifier: MPL-2.0

//! Amplitude and phase spectra of single-channel 8-bit images.
//!
//! [`Spectrum::analyze`] is the forward direction: samples are scaled to
//! [0, 1], transformed, and the zero frequency is shifted to the center.
//! [`Spectrum::synthesize`] goes back to an 8-bit image, min-max normalizing
//! the magnitude of the reconstructed field to the full [0, 255] range.
//! The two are exact inverses of each other whenever the original image
//! already spans [0, 255].

use image::{ColorType, DynamicImage, GrayImage, Luma};
use nalgebra::DMatrix;
use rustfft::num_complex::Complex;

use crate::error::{FdaError, FdaResult};
use crate::fft::Fft2d;
use crate::shift::{fftshift, ifftshift};

/// Centered Fourier spectrum split into amplitude and phase fields.
///
/// Both fields have the shape (rows, cols) of the image they come from,
/// with the zero frequency at `(rows / 2, cols / 2)`.
/// Amplitudes are non-negative, phases lie in [-pi, pi].
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    amplitude: DMatrix<f64>,
    phase: DMatrix<f64>,
}

impl Spectrum {
    /// Assemble a spectrum from amplitude and phase fields of identical shape.
    pub fn from_parts(amplitude: DMatrix<f64>, phase: DMatrix<f64>) -> FdaResult<Self> {
        if amplitude.shape() != phase.shape() {
            return Err(FdaError::ShapeMismatch {
                expected: amplitude.shape(),
                actual: phase.shape(),
            });
        }
        Ok(Self { amplitude, phase })
    }

    /// Split the spectrum back into its (amplitude, phase) fields.
    pub fn into_parts(self) -> (DMatrix<f64>, DMatrix<f64>) {
        (self.amplitude, self.phase)
    }

    /// (rows, cols) of both fields.
    pub fn shape(&self) -> (usize, usize) {
        self.amplitude.shape()
    }

    /// Amplitude field.
    pub fn amplitude(&self) -> &DMatrix<f64> {
        &self.amplitude
    }

    /// Mutable amplitude field. The phase is never exposed mutably.
    pub fn amplitude_mut(&mut self) -> &mut DMatrix<f64> {
        &mut self.amplitude
    }

    /// Phase field.
    pub fn phase(&self) -> &DMatrix<f64> {
        &self.phase
    }

    /// Analyze a grayscale 8-bit image.
    pub fn analyze(image: &GrayImage) -> FdaResult<Self> {
        let fft = Fft2d::new(image.height() as usize, image.width() as usize)?;
        Self::analyze_with(&fft, image)
    }

    /// Analyze a decoded image, which must hold a single channel of 8-bit samples.
    pub fn analyze_dynamic(image: &DynamicImage) -> FdaResult<Self> {
        check_layout(image, 1)?;
        let gray = image
            .as_luma8()
            .ok_or(FdaError::InvalidInputType(image.color()))?;
        Self::analyze(gray)
    }

    /// Analyze a grayscale image with an already planned transform.
    pub fn analyze_with(fft: &Fft2d, image: &GrayImage) -> FdaResult<Self> {
        let rows = image.height() as usize;
        let cols = image.width() as usize;
        if (rows, cols) != (fft.rows(), fft.cols()) {
            return Err(FdaError::ShapeMismatch {
                expected: (fft.rows(), fft.cols()),
                actual: (rows, cols),
            });
        }

        let mut buffer: Vec<Complex<f64>> = image
            .as_raw()
            .iter()
            .map(|&pix| Complex::new(pix as f64 / 255.0, 0.0))
            .collect();
        fft.forward(&mut buffer)?;

        // The forward transform leaves the spectrum in column-major order.
        let centered = fftshift(&DMatrix::from_vec(rows, cols, buffer));
        Ok(Self {
            amplitude: centered.map(|z| z.norm()),
            phase: centered.map(|z| z.arg()),
        })
    }

    /// Reconstruct the complex spatial field, before taking its magnitude.
    ///
    /// The field is normalized by 1 / (rows * cols), so an unmodified
    /// spectrum gives back the analyzed samples in [0, 1] with a
    /// negligible imaginary part.
    pub fn reconstruct(&self) -> FdaResult<DMatrix<Complex<f64>>> {
        let (rows, cols) = self.shape();
        self.reconstruct_with(&Fft2d::new(rows, cols)?)
    }

    /// Same as [`Spectrum::reconstruct`] with an already planned transform.
    pub fn reconstruct_with(&self, fft: &Fft2d) -> FdaResult<DMatrix<Complex<f64>>> {
        let (rows, cols) = self.shape();
        if (rows, cols) != (fft.rows(), fft.cols()) {
            return Err(FdaError::ShapeMismatch {
                expected: (fft.rows(), fft.cols()),
                actual: (rows, cols),
            });
        }

        let centered = self
            .amplitude
            .zip_map(&self.phase, |amp, phase| Complex::from_polar(amp, phase));
        let mut spectrum = ifftshift(&centered);
        fft.inverse(spectrum.as_mut_slice())?;

        let fft_coef = 1.0 / (rows * cols) as f64;
        for z in spectrum.iter_mut() {
            *z *= fft_coef;
        }
        // The inverse transform leaves the field in row-major order.
        Ok(DMatrix::from_row_slice(rows, cols, spectrum.as_slice()))
    }

    /// Synthesize an 8-bit grayscale image from the spectrum.
    pub fn synthesize(&self) -> FdaResult<GrayImage> {
        let (rows, cols) = self.shape();
        self.synthesize_with(&Fft2d::new(rows, cols)?)
    }

    /// Same as [`Spectrum::synthesize`] with an already planned transform.
    pub fn synthesize_with(&self, fft: &Fft2d) -> FdaResult<GrayImage> {
        let field = self.reconstruct_with(fft)?;
        Ok(to_gray_image(&field.map(|z| z.norm())))
    }
}

/// Min-max normalize a magnitude field to [0, 255].
///
/// A field without any dynamic range maps to black.
fn to_gray_image(magnitude: &DMatrix<f64>) -> GrayImage {
    let min = magnitude.iter().copied().fold(f64::INFINITY, f64::min);
    let max = magnitude.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let (rows, cols) = magnitude.shape();
    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        let m = magnitude[(y as usize, x as usize)];
        let value = if range > 0.0 {
            ((m - min) / range * 255.0).round_ties_even() as u8
        } else {
            0
        };
        Luma([value])
    })
}

/// Check that `image` holds `channels` channels of 8-bit unsigned samples.
pub(crate) fn check_layout(image: &DynamicImage, channels: usize) -> FdaResult<()> {
    let color = image.color();
    if !is_u8(color) {
        return Err(FdaError::InvalidInputType(color));
    }
    let actual = color.channel_count() as usize;
    if actual != channels {
        return Err(FdaError::InvalidShape {
            expected: channels,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn is_u8(color: ColorType) -> bool {
    matches!(
        color,
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            Luma([((x * 37 + y * 91) % 256) as u8])
        })
    }

    #[test]
    fn fields_match_image_shape() {
        let spectrum = Spectrum::analyze(&ramp(7, 4)).unwrap();
        assert_eq!(spectrum.shape(), (4, 7));
        assert_eq!(spectrum.phase().shape(), (4, 7));
    }

    #[test]
    fn dc_term_is_centered() {
        let image = GrayImage::from_pixel(6, 5, Luma([51]));
        let spectrum = Spectrum::analyze(&image).unwrap();
        // 51 / 255 = 0.2 summed over 30 pixels.
        assert_abs_diff_eq!(spectrum.amplitude()[(2, 3)], 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(spectrum.phase()[(2, 3)], 0.0, epsilon = 1e-12);
        let off_center: f64 = spectrum.amplitude().iter().sum::<f64>() - 6.0;
        assert_abs_diff_eq!(off_center, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn amplitude_is_non_negative_and_phase_bounded() {
        let spectrum = Spectrum::analyze(&ramp(9, 8)).unwrap();
        assert!(spectrum.amplitude().iter().all(|&a| a >= 0.0));
        assert!(spectrum
            .phase()
            .iter()
            .all(|&p| (-std::f64::consts::PI..=std::f64::consts::PI).contains(&p)));
    }

    #[test]
    fn round_trip_small_odd_image() {
        let mut image = ramp(13, 11);
        image.put_pixel(0, 0, Luma([0]));
        image.put_pixel(1, 0, Luma([255]));
        let restored = Spectrum::analyze(&image).unwrap().synthesize().unwrap();
        assert_eq!(restored, image);
    }

    #[test]
    fn flat_field_synthesizes_black() {
        let magnitude = DMatrix::from_element(3, 4, 0.5);
        let image = to_gray_image(&magnitude);
        assert_eq!(image.dimensions(), (4, 3));
        assert!(image.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn min_max_stretch_uses_full_range() {
        let magnitude = DMatrix::from_row_slice(1, 3, &[0.25, 0.5, 0.75]);
        let image = to_gray_image(&magnitude);
        // 127.5 rounds half to even.
        assert_eq!(image.as_raw(), &vec![0, 128, 255]);
    }

    #[test]
    fn parts_reassemble_into_the_same_spectrum() {
        let spectrum = Spectrum::analyze(&ramp(6, 5)).unwrap();
        let (amplitude, phase) = spectrum.clone().into_parts();
        assert_eq!(amplitude.shape(), (5, 6));
        assert_eq!(Spectrum::from_parts(amplitude, phase).unwrap(), spectrum);
    }

    #[test]
    fn mismatched_parts_are_rejected() {
        let result = Spectrum::from_parts(DMatrix::zeros(2, 3), DMatrix::zeros(3, 2));
        assert!(matches!(result, Err(FdaError::ShapeMismatch { .. })));
    }

    #[test]
    fn analyze_dynamic_checks_sample_type_and_channels() {
        let wide = DynamicImage::ImageLuma16(image::ImageBuffer::new(4, 4));
        assert!(matches!(
            Spectrum::analyze_dynamic(&wide),
            Err(FdaError::InvalidInputType(ColorType::L16))
        ));

        let color = DynamicImage::ImageRgb8(image::RgbImage::new(4, 4));
        assert!(matches!(
            Spectrum::analyze_dynamic(&color),
            Err(FdaError::InvalidShape {
                expected: 1,
                actual: 3
            })
        ));

        let gray = DynamicImage::ImageLuma8(ramp(4, 4));
        assert!(Spectrum::analyze_dynamic(&gray).is_ok());
    }

    #[test]
    fn planned_transform_must_match_shape() {
        let fft = Fft2d::new(4, 4).unwrap();
        assert!(matches!(
            Spectrum::analyze_with(&fft, &ramp(5, 4)),
            Err(FdaError::ShapeMismatch { .. })
        ));
    }
}
