// SPDX-License-Identifier: MPL-2.0

#![allow(dead_code)]

use image::{GrayImage, Luma, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random grayscale image that contains both 0 and 255.
pub fn random_gray(width: u32, height: u32, seed: u64) -> GrayImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut img = GrayImage::from_fn(width, height, |_, _| Luma([rng.gen::<u8>()]));
    img.put_pixel(0, 0, Luma([0]));
    img.put_pixel(width - 1, height - 1, Luma([255]));
    img
}

/// Uniform random color image.
pub fn random_rgb(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb(rng.gen::<[u8; 3]>()))
}

/// Smooth color scene with a few hard edges.
pub fn scene(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let inside = x > width / 4 && x < width / 2 && y > height / 3;
        let base = (x * 200 / width + y * 55 / height) as u8;
        if inside {
            Rgb([240, base / 2, 30])
        } else {
            Rgb([base, 255 - base, base / 3])
        }
    })
}
