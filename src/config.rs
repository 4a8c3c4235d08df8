// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fixed parameters of a render.  A `Grid` is built once, checked
//! once, and then only ever read.

use crate::error::RenderError;

/// Largest accepted side length, in pixels.  Bounds the size of the
/// iteration buffer.
pub const MAX_SIZE: usize = 100_000;

/// Iteration cap.  Points that survive this many iterations are
/// treated as members of the set.
pub const MAX_ITERATIONS: u32 = 1000;

/// Divergence threshold on |z|.
pub const THRESHOLD: f64 = 2.0;

/// Multiplier applied to every mapped coordinate.
pub const SCALE: f64 = 1.0;

/// The rectangle of the complex plane covered by the image, real part
/// along x and imaginary part along y.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Real part at the left edge.
    pub x_min: f64,
    /// Real part at the right edge.
    pub x_max: f64,
    /// Imaginary part at the top edge.
    pub y_min: f64,
    /// Imaginary part at the bottom edge.
    pub y_max: f64,
}

impl Bounds {
    /// True when both axes have a positive extent.
    pub fn is_valid(&self) -> bool {
        self.x_min < self.x_max && self.y_min < self.y_max
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            x_min: -2.0,
            x_max: 2.0,
            y_min: -2.0,
            y_max: 2.0,
        }
    }
}

/// Immutable description of one render: an N×N pixel grid laid over
/// `bounds`, plus the escape-time parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    /// Side length N of the square image.
    pub size: usize,
    /// Region of the complex plane being sampled.
    pub bounds: Bounds,
    /// Applied to both coordinates after mapping.
    pub scale: f64,
    /// Iteration cap, at least 1.
    pub max_iterations: u32,
    /// Divergence threshold on |z|.
    pub threshold: f64,
}

impl Grid {
    /// A grid of the given side length with the default plane and
    /// escape-time parameters.
    pub fn new(size: usize) -> Result<Grid, RenderError> {
        check_grid_size(size)?;
        Ok(Grid {
            size,
            bounds: Bounds::default(),
            scale: SCALE,
            max_iterations: MAX_ITERATIONS,
            threshold: THRESHOLD,
        })
    }

    /// Total number of pixels, or `None` if N*N does not fit in a usize.
    pub fn cells(&self) -> Option<usize> {
        self.size.checked_mul(self.size)
    }

    /// Re-checks every limit `new` establishes.  The fields are public,
    /// so a grid may have been edited since it was built.
    pub fn validate(&self) -> Result<(), RenderError> {
        check_grid_size(self.size)?;
        if self.max_iterations == 0 {
            return Err(RenderError::ZeroIterations);
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(RenderError::InvalidThreshold(self.threshold));
        }
        if !self.bounds.is_valid() {
            return Err(RenderError::InvertedBounds);
        }
        Ok(())
    }
}

fn check_grid_size(size: usize) -> Result<usize, RenderError> {
    if size == 0 {
        return Err(RenderError::NonPositiveSize(0));
    }
    if size > MAX_SIZE {
        return Err(RenderError::SizeTooLarge(size as u64, MAX_SIZE));
    }
    Ok(size)
}

fn check_size(size: i64) -> Result<usize, RenderError> {
    if size <= 0 {
        return Err(RenderError::NonPositiveSize(size));
    }
    if size as u64 > MAX_SIZE as u64 {
        return Err(RenderError::SizeTooLarge(size as u64, MAX_SIZE));
    }
    Ok(size as usize)
}

/// Parses and validates an image side length as given on the command
/// line.
pub fn parse_size(s: &str) -> Result<usize, RenderError> {
    match s.trim().parse::<i64>() {
        Ok(size) => check_size(size),
        Err(_) => Err(RenderError::InvalidSize(s.to_string())),
    }
}
