// SPDX-License-Identifier: MPL-2.0

//! Planned 2D Fourier transforms over complex image buffers.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::error::{FdaError, FdaResult};

/// 2D Fourier transform planned once for a fixed `rows x cols` size.
///
/// Each 2D transform is computed as 1D transforms along the first dimension,
/// a transposition, then 1D transforms along the second dimension.
/// Because of that transposition, the buffer layout flips at every call:
///
/// - [`Fft2d::forward`] reads a row-major image and leaves the spectrum
///   in column-major order, which is exactly the storage order of a
///   `nalgebra::DMatrix` with `rows` rows and `cols` columns.
/// - [`Fft2d::inverse`] reads a column-major spectrum and leaves the
///   spatial field in row-major order.
///
/// Neither direction is normalized.
/// A forward then inverse pair must be scaled by 1 / (rows * cols) at the end.
///
/// The plans are shared behind `Arc`s so one `Fft2d` can be used from
/// several threads at once. Scratch buffers are allocated per call.
#[derive(Clone)]
pub struct Fft2d {
    rows: usize,
    cols: usize,
    forward_rows: Arc<dyn Fft<f64>>,
    forward_cols: Arc<dyn Fft<f64>>,
    inverse_rows: Arc<dyn Fft<f64>>,
    inverse_cols: Arc<dyn Fft<f64>>,
}

impl Fft2d {
    /// Plan forward and inverse transforms for a `rows x cols` buffer.
    pub fn new(rows: usize, cols: usize) -> FdaResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(FdaError::EmptyImage);
        }
        let mut planner = FftPlanner::new();
        Ok(Self {
            rows,
            cols,
            forward_rows: planner.plan_fft_forward(rows),
            forward_cols: planner.plan_fft_forward(cols),
            inverse_rows: planner.plan_fft_inverse(rows),
            inverse_cols: planner.plan_fft_inverse(cols),
        })
    }

    /// Number of rows the transform was planned for.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns the transform was planned for.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Forward 2D transform, row-major image in, column-major spectrum out.
    pub fn forward(&self, img_buffer: &mut [Complex<f64>]) -> FdaResult<()> {
        self.check_len(img_buffer)?;
        transform_2d(
            self.cols,
            self.rows,
            self.forward_cols.as_ref(),
            self.forward_rows.as_ref(),
            img_buffer,
        );
        Ok(())
    }

    /// Inverse 2D transform, column-major spectrum in, row-major field out.
    pub fn inverse(&self, spectrum_buffer: &mut [Complex<f64>]) -> FdaResult<()> {
        self.check_len(spectrum_buffer)?;
        // Column-major rows x cols is row-major cols x rows.
        transform_2d(
            self.rows,
            self.cols,
            self.inverse_rows.as_ref(),
            self.inverse_cols.as_ref(),
            spectrum_buffer,
        );
        Ok(())
    }

    fn check_len(&self, buffer: &[Complex<f64>]) -> FdaResult<()> {
        if buffer.len() != self.rows * self.cols {
            return Err(FdaError::ShapeMismatch {
                expected: (self.rows, self.cols),
                actual: (buffer.len() / self.cols, self.cols),
            });
        }
        Ok(())
    }
}

/// Transform a row-major `height x width` buffer in both dimensions.
///
/// The buffer ends up holding the transposed of the 2D transform.
fn transform_2d(
    width: usize,
    height: usize,
    fft_width: &dyn Fft<f64>,
    fft_height: &dyn Fft<f64>,
    buffer: &mut [Complex<f64>],
) {
    let mut scratch = vec![Complex::default(); fft_width.get_inplace_scratch_len()];
    for row_buffer in buffer.chunks_exact_mut(width) {
        fft_width.process_with_scratch(row_buffer, &mut scratch);
    }

    let mut transposed = transpose(width, height, buffer);
    scratch.resize(fft_height.get_outofplace_scratch_len(), Complex::default());
    for (tr_buf, col_buf) in transposed
        .chunks_exact_mut(height)
        .zip(buffer.chunks_exact_mut(height))
    {
        fft_height.process_outofplace_with_scratch(tr_buf, col_buf, &mut scratch);
    }
}

fn transpose<T: Copy + Default>(width: usize, height: usize, matrix: &[T]) -> Vec<T> {
    let mut transposed = vec![T::default(); matrix.len()];
    for (row, line) in matrix.chunks_exact(width).enumerate() {
        for (col, &value) in line.iter().enumerate() {
            transposed[col * height + row] = value;
        }
    }
    transposed
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    #[rustfmt::skip]
    fn transpose_non_square() {
        let matrix = [
            1, 2, 3,
            4, 5, 6,
        ];
        assert_eq!(transpose(3, 2, &matrix), vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn empty_plan_is_rejected() {
        assert!(matches!(Fft2d::new(0, 4), Err(FdaError::EmptyImage)));
        assert!(matches!(Fft2d::new(4, 0), Err(FdaError::EmptyImage)));
    }

    #[test]
    fn wrong_buffer_length_is_rejected() {
        let fft = Fft2d::new(3, 4).unwrap();
        let mut buffer = vec![Complex::default(); 11];
        assert!(matches!(
            fft.forward(&mut buffer),
            Err(FdaError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn forward_matches_direct_dft() {
        let (rows, cols) = (3, 5);
        let image: Vec<f64> = (0..rows * cols).map(|i| ((i * 7) % 11) as f64).collect();
        let mut buffer: Vec<Complex<f64>> = image.iter().map(|&v| Complex::new(v, 0.0)).collect();
        Fft2d::new(rows, cols).unwrap().forward(&mut buffer).unwrap();

        for u in 0..rows {
            for v in 0..cols {
                let mut expected = Complex::new(0.0, 0.0);
                for r in 0..rows {
                    for c in 0..cols {
                        let angle = -2.0
                            * std::f64::consts::PI
                            * ((u * r) as f64 / rows as f64 + (v * c) as f64 / cols as f64);
                        expected += Complex::from_polar(image[r * cols + c], angle);
                    }
                }
                // Column-major layout.
                let actual = buffer[v * rows + u];
                assert_abs_diff_eq!(actual.re, expected.re, epsilon = 1e-9);
                assert_abs_diff_eq!(actual.im, expected.im, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn inverse_undoes_forward() {
        let (rows, cols) = (6, 7);
        let image: Vec<Complex<f64>> = (0..rows * cols)
            .map(|i| Complex::new((i % 13) as f64, 0.0))
            .collect();
        let fft = Fft2d::new(rows, cols).unwrap();
        let mut buffer = image.clone();
        fft.forward(&mut buffer).unwrap();
        fft.inverse(&mut buffer).unwrap();
        let scale = 1.0 / (rows * cols) as f64;
        for (restored, original) in buffer.iter().zip(&image) {
            assert_abs_diff_eq!(restored.re * scale, original.re, epsilon = 1e-9);
            assert_abs_diff_eq!(restored.im * scale, 0.0, epsilon = 1e-9);
        }
    }
}
