// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An in-memory 24-bit raster and its BMP serialization.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::bmp::BMPEncoder;
use image::ColorType;

use crate::color::Rgb;
use crate::error::RenderError;
use crate::render::allocate;

/// Anything that accepts colored pixels addressed by column and row.
pub trait ImageSink {
    /// Sets the pixel at column `x`, row `y`.
    fn write_pixel(&mut self, x: usize, y: usize, colour: Rgb);
}

/// A width×height RGB image, row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// A black image of the given dimensions.
    pub fn new(width: usize, height: usize) -> Result<Bitmap, RenderError> {
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(RenderError::Allocation(std::usize::MAX))?;
        Ok(Bitmap {
            width,
            height,
            pixels: allocate(len)?,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The colour at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let i = self.index(x, y);
        Rgb(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y * self.width + x) * 3
    }

    /// Serializes as an uncompressed 24-bit BMP.
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<(), RenderError> {
        let mut encoder = BMPEncoder::new(writer);
        encoder.encode(
            &self.pixels,
            self.width as u32,
            self.height as u32,
            ColorType::RGB(8),
        )?;
        Ok(())
    }

    /// Writes the image to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        debug!("writing {}x{} bitmap to {}", self.width, self.height, path.display());
        let mut output = BufWriter::new(File::create(path)?);
        self.encode(&mut output)?;
        output.flush()?;
        Ok(())
    }
}

impl ImageSink for Bitmap {
    fn write_pixel(&mut self, x: usize, y: usize, colour: Rgb) {
        let i = self.index(x, y);
        self.pixels[i] = colour.0;
        self.pixels[i + 1] = colour.1;
        self.pixels[i + 2] = colour.2;
    }
}
