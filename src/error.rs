// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single error type shared by every stage of a render.

use std::io;

use failure::Fail;

/// Everything that can stop a render.  All of these are reported at
/// the process boundary; nothing is retried.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The image size was not an integer at all.
    #[fail(display = "image size must be an integer, got '{}'", _0)]
    InvalidSize(String),

    /// The image size was zero or negative.
    #[fail(display = "image size must be a positive integer, got {}", _0)]
    NonPositiveSize(i64),

    /// The image size is above the hard cap.
    #[fail(display = "image size {} exceeds the maximum of {}", _0, _1)]
    SizeTooLarge(u64, usize),

    /// The plane bounds do not describe a rectangle.
    #[fail(display = "plane bounds must satisfy min < max on both axes")]
    InvertedBounds,

    /// The iteration cap was zero.
    #[fail(display = "iteration cap must be at least 1")]
    ZeroIterations,

    /// The divergence threshold was not a finite positive number.
    #[fail(display = "divergence threshold must be finite and positive, got {}", _0)]
    InvalidThreshold(f64),

    /// A buffer of the given number of elements could not be allocated.
    #[fail(display = "could not allocate a buffer of {} elements", _0)]
    Allocation(usize),

    /// A compute worker panicked before the barrier.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// Writing the image failed.
    #[fail(display = "could not write image: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}
