// SPDX-License-Identifier: MPL-2.0

//! Fourier domain adaptation for images.
//!
//! The low-frequency core of a source image's Fourier amplitude spectrum is
//! replaced by the one of a target image. The image rebuilt from the modified
//! amplitude and the original phase keeps the structure of the source and
//! adopts the low-frequency statistics (color, illumination) of the target.
//!
//! ```no_run
//! use fda::io::{load_image, save_image};
//! use std::path::Path;
//!
//! # fn main() -> fda::FdaResult<()> {
//! let source = load_image(Path::new("source.png"))?;
//! let target = load_image(Path::new("target.png"))?;
//! let adapted = fda::fda(&source, &target, 0.01)?;
//! save_image(&adapted, Path::new("adapted.png"))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod adapt;
pub mod cli;
pub mod error;
pub mod fft;
pub mod io;
pub mod params;
pub mod shift;
pub mod spectrum;
pub mod window;

pub use crate::adapt::{fda, FourierDomainAdaptation};
pub use crate::error::{FdaError, FdaResult};
pub use crate::params::{FdaParams, ResizeFilter};
pub use crate::spectrum::Spectrum;
pub use crate::window::{window_size, AdaptationWindow, BetaAdjustment, WindowSize};
