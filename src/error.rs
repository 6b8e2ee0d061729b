// SPDX-License-Identifier: MPL-2.0

//! Error types for Fourier domain adaptation.

use image::ColorType;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for adaptation operations.
pub type FdaResult<T> = Result<T, FdaError>;

/// Errors that can occur while analysing, adapting or writing images.
#[derive(Error, Debug)]
pub enum FdaError {
    /// Samples are not 8-bit unsigned integers.
    #[error("expected 8-bit unsigned samples, got {0:?}")]
    InvalidInputType(ColorType),

    /// Wrong number of channels.
    #[error("expected {expected} channel(s), got {actual}")]
    InvalidShape { expected: usize, actual: usize },

    /// Image with zero rows or zero columns.
    #[error("image has no pixels")]
    EmptyImage,

    /// Two fields that must share (rows, cols) do not.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Input path does not point to a file.
    #[error("the input file {} does not exist", .0.display())]
    MissingInput(PathBuf),

    /// Filesystem failure outside of the codec.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Decoding or encoding failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Bad parameter file or command line argument.
    #[error("configuration error: {0}")]
    Config(String),
}
