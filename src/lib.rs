#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which repeatedly squaring z and adding c, starting from zero, never
//! runs off to infinity.  For each pixel we count how many iterations
//! it takes for |z| to pass a threshold (its "escape time"), or give up
//! at a fixed cap and call the point a member.  The counts are then
//! banded into colours and written out as a 24-bit BMP.
//!
//! The escape time of neighbouring pixels can differ by three orders
//! of magnitude, so the work is spread over threads one pixel at a
//! time; see `render` for how that is done without any locking on the
//! output buffer itself.

extern crate crossbeam;
extern crate image;
extern crate itertools;
extern crate failure;
#[macro_use]
extern crate log;
extern crate num;

pub mod bitmap;
pub mod color;
pub mod config;
pub mod error;
pub mod escape;
pub mod planes;
pub mod render;

pub use bitmap::{Bitmap, ImageSink};
pub use color::{colorize, paint, Rgb};
pub use config::{parse_size, Bounds, Grid};
pub use error::RenderError;
pub use escape::escape_time;
pub use render::{Iterations, Renderer, Schedule};
