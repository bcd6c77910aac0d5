use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage};

use crate::core::color::{pack_rgb, unpack_rgb};

/// Output surface: a row-major grid of packed `0xAARRGGBB` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Film {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        let data = vec![pack_rgb(0, 0, 0); width as usize * height as usize];
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(height, width)`
    pub fn extent(&self) -> (u32, u32) {
        (self.height, self.width)
    }

    pub fn get(&self, row: u32, col: u32) -> u32 {
        self.data[self.index_of(col, row)]
    }

    pub fn set(&mut self, row: u32, col: u32, packed: u32) {
        let index = self.index_of(col, row);
        self.data[index] = packed;
    }

    pub fn pixels(&self) -> &[u32] {
        &self.data
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Box filter every `factor` x `factor` block into one pixel.
    pub fn downsample(&self, factor: u32) -> Film {
        if factor <= 1 {
            return self.clone();
        }
        let mut result = Film::new(self.width / factor, self.height / factor);
        let block = factor * factor;
        for y in 0..result.height {
            for x in 0..result.width {
                let mut sum = (0_u32, 0_u32, 0_u32);
                for j in 0..factor {
                    for i in 0..factor {
                        let (r, g, b) = unpack_rgb(self.get(y * factor + j, x * factor + i));
                        sum.0 += r as u32;
                        sum.1 += g as u32;
                        sum.2 += b as u32;
                    }
                }
                let packed = pack_rgb(
                    (sum.0 / block) as u8,
                    (sum.1 / block) as u8,
                    (sum.2 / block) as u8,
                );
                result.set(y, x, packed);
            }
        }
        result
    }

    pub fn to_image(&self) -> RgbImage {
        let mut image = RgbImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let (r, g, b) = unpack_rgb(self.get(y, x));
                image.put_pixel(x, y, Rgb([r, g, b]));
            }
        }
        image
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.to_image()
            .save(path)
            .with_context(|| format!("film - failed to save image to '{}'", path.display()))
    }

    /// Panics outside the film, a column past the width would alias the next row.
    fn index_of(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "film - pixel ({}, {}) is outside {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}
