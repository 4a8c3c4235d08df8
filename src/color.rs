// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns iteration counts into colours and feeds them to an image sink.

use itertools::iproduct;

use crate::bitmap::ImageSink;
use crate::render::Iterations;

/// An 8-bit red, green, blue triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colour for a single iteration count.  Members of the set are black;
/// everything else gets a red-orange band that repeats every 256
/// iterations.  The bands are not normalized against the cap.
#[inline]
pub fn colorize(iterations: u32, max_iterations: u32) -> Rgb {
    if iterations == max_iterations {
        return Rgb(0, 0, 0);
    }
    let band = (iterations % 256) as u8;
    Rgb(band, band / 2, 0)
}

/// Walks a finished buffer in row-major order and hands every pixel's
/// colour to the sink.
pub fn paint<S: ImageSink>(iterations: &Iterations, max_iterations: u32, sink: &mut S) {
    let size = iterations.size();
    debug!("colouring {} pixels", iterations.len());
    for (y, x) in iproduct!(0..size, 0..size) {
        sink.write_pixel(x, y, colorize(iterations.get(x, y), max_iterations));
    }
}
