// SPDX-License-Identifier: MPL-2.0

//! Image file I/O.
//!
//! - `ensure_input`: fail early when an input path is not a file.
//! - `load_image`: decode any supported format without converting it,
//!   so sample type and channel count reach the adaptation checks as-is.
//! - `save_image`: encode an RGB image, creating parent directories.
use std::fs;
use std::path::Path;

use image::{DynamicImage, RgbImage};

use crate::error::{FdaError, FdaResult};

/// Check that `path` points to an existing file.
pub fn ensure_input(path: &Path) -> FdaResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(FdaError::MissingInput(path.to_path_buf()))
    }
}

/// Decode the image stored at `path`.
pub fn load_image(path: &Path) -> FdaResult<DynamicImage> {
    ensure_input(path)?;
    Ok(image::open(path)?)
}

/// Encode `image` to `path`, the format following the file extension.
pub fn save_image(image: &RgbImage, path: &Path) -> FdaResult<()> {
    ensure_parent_dir(path)?;
    image.save(path)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> FdaResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
