// SPDX-License-Identifier: MPL-2.0

//! Adaptation parameters, with optional JSON file loading.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use image::imageops::FilterType;
use serde::Deserialize;

use crate::error::{FdaError, FdaResult};

/// Default ratio of the low-frequency window to the image size.
pub const DEFAULT_BETA: f64 = 0.001;

/// Interpolation used to resize the target image to the source size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Nearest neighbor.
    Nearest,
    /// Bilinear.
    #[default]
    Triangle,
    /// Cubic.
    CatmullRom,
    /// Gaussian.
    Gaussian,
    /// Lanczos with window 3.
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for ResizeFilter {
    type Err = FdaError;

    fn from_str(name: &str) -> FdaResult<Self> {
        match name {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "bilinear" => Ok(Self::Triangle),
            "catmull_rom" | "cubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" => Ok(Self::Lanczos3),
            other => Err(FdaError::Config(format!("unknown resize filter '{other}'"))),
        }
    }
}

/// Parameters of one adaptation run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FdaParams {
    /// Window size as a fraction of the image dimensions.
    /// Higher values transfer more of the target's low frequencies.
    pub beta: f64,
    /// Filter used when the target must be resized.
    pub filter: ResizeFilter,
}

impl Default for FdaParams {
    fn default() -> Self {
        Self {
            beta: DEFAULT_BETA,
            filter: ResizeFilter::default(),
        }
    }
}

impl FdaParams {
    /// Parameters with the given beta and the default filter.
    pub fn new(beta: f64) -> Self {
        Self {
            beta,
            ..Self::default()
        }
    }

    /// Replace beta.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Replace the resize filter.
    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Read parameters from a JSON file. Missing fields take their default.
pub fn load_params(path: &Path) -> FdaResult<FdaParams> {
    let data = fs::read_to_string(path)
        .map_err(|e| FdaError::Config(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&data)
        .map_err(|e| FdaError::Config(format!("failed to parse {}: {e}", path.display())))
}
