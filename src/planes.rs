// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a square on the integral plane with an origin at 0,0, and
//! a rectangle on the complex plane given by a `Bounds`.  It also owns
//! the row-major linearization used by every buffer in the crate.
use num::Complex;

use crate::config::{Bounds, Grid};
use crate::error::RenderError;

/// Describes the x, y of a pixel in the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of an N×N integral plane onto the complex plane, and
/// pixels onto offsets in a flat row-major buffer.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Side length of the integral plane.
    pub size: usize,
    /// The region of the complex plane covered by the integral plane.
    pub bounds: Bounds,
    // Multiplier applied to both coordinates after mapping.
    scale: f64,
}

impl PlaneMapper {
    /// Builds the mapper for a grid, refusing bounds that don't
    /// describe a rectangle.
    pub fn new(grid: &Grid) -> Result<PlaneMapper, RenderError> {
        if !grid.bounds.is_valid() {
            return Err(RenderError::InvertedBounds);
        }
        Ok(PlaneMapper {
            size: grid.size,
            bounds: grid.bounds,
            scale: grid.scale,
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.size * self.size
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Given a pixel on the integral plane, return the complex sample
    /// for it.  The arithmetic is done in a fixed order so that every
    /// caller, on every thread, gets the same bits.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let n = self.size as f64;
        let b = &self.bounds;
        let re = b.x_min + (b.x_max - b.x_min) * (pixel.0 as f64 / n);
        let im = b.y_min + (b.y_max - b.y_min) * (pixel.1 as f64 / n);
        Complex::new(re * self.scale, im * self.scale)
    }

    /// Row-major offset of a pixel: `y * N + x`.
    pub fn offset(&self, pixel: &Pixel) -> usize {
        pixel.1 * self.size + pixel.0
    }

    /// Inverse of `offset`.
    pub fn pixel(&self, offset: usize) -> Pixel {
        Pixel(offset % self.size, offset / self.size)
    }
}
