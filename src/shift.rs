// SPDX-License-Identifier: MPL-2.0

//! Quadrant shifts moving the zero frequency to and from the matrix center.

use nalgebra::{DMatrix, Scalar};

/// Shift the 4 quadrants of a Fourier transform to have all the low frequencies
/// at the center of the matrix.
///
/// The zero frequency lands at `(rows / 2, cols / 2)`.
pub fn fftshift<T: Scalar>(mat: &DMatrix<T>) -> DMatrix<T> {
    let (height, width) = mat.shape();
    swap_quadrants(mat, height - height / 2, width - width / 2)
}

/// Inverse operation of the quadrants shift performed by [`fftshift`].
///
/// It is different than [`fftshift`] if one dimension has an odd length.
pub fn ifftshift<T: Scalar>(mat: &DMatrix<T>) -> DMatrix<T> {
    let (height, width) = mat.shape();
    swap_quadrants(mat, height / 2, width / 2)
}

/// Cut the matrix after `split_row` rows and `split_col` columns,
/// and exchange the diagonally opposite blocks.
fn swap_quadrants<T: Scalar>(mat: &DMatrix<T>, split_row: usize, split_col: usize) -> DMatrix<T> {
    let mut shifted = mat.clone();
    let (height, width) = mat.shape();
    let top = height - split_row;
    let left = width - split_col;

    // Top quadrants go to the bottom.
    shifted
        .view_mut((top, left), (split_row, split_col))
        .copy_from(&mat.view((0, 0), (split_row, split_col)));
    shifted
        .view_mut((top, 0), (split_row, left))
        .copy_from(&mat.view((0, split_col), (split_row, left)));

    // Bottom quadrants go to the top.
    shifted
        .view_mut((0, left), (top, split_col))
        .copy_from(&mat.view((split_row, 0), (top, split_col)));
    shifted
        .view_mut((0, 0), (top, left))
        .copy_from(&mat.view((split_row, split_col), (top, left)));

    shifted
}
