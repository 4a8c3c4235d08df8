// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iteration itself.

use num::Complex;

/// This is our classic iterator function.  Iterates z = z² + c from
/// zero, counting from 1, and returns the iteration on which |z| first
/// exceeds `threshold`.  If that never happens before `max_iterations`
/// it returns `max_iterations`, meaning "in the set".
///
/// The result is always in `[1, max_iterations]` for a cap of at least
/// one.  The loop is bounded by the cap, so this terminates for every
/// input; an overflowing orbit becomes infinite and escapes.
#[inline]
pub fn escape_time(c: Complex<f64>, max_iterations: u32, threshold: f64) -> u32 {
    let limit = threshold * threshold;
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for i in 1..max_iterations {
        z = z * z + c;
        if z.norm_sqr() > limit {
            return i;
        }
    }
    max_iterations
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u32 = 1000;

    #[test]
    fn origin_is_in_the_set() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), MAX, 2.0), MAX);
    }

    #[test]
    fn far_points_escape_immediately() {
        assert_eq!(escape_time(Complex::new(10.0, 0.0), MAX, 2.0), 1);
        assert_eq!(escape_time(Complex::new(0.0, -3.0), MAX, 2.0), 1);
    }

    #[test]
    fn known_escape_counts() {
        // 1 -> 2 -> 5
        assert_eq!(escape_time(Complex::new(1.0, 0.0), MAX, 2.0), 3);
        // 2 -> 6
        assert_eq!(escape_time(Complex::new(2.0, 0.0), MAX, 2.0), 2);
    }

    #[test]
    fn threshold_is_strict() {
        // -2 -> 2 -> 2 -> ... sits on the circle forever.
        assert_eq!(escape_time(Complex::new(-2.0, 0.0), MAX, 2.0), MAX);
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), MAX, 2.0), MAX);
    }

    #[test]
    fn total_on_extreme_inputs() {
        assert_eq!(escape_time(Complex::new(std::f64::MAX, 0.0), MAX, 2.0), 1);
        assert_eq!(escape_time(Complex::new(1e300, 1e300), MAX, 2.0), 1);
        let tiny = escape_time(Complex::new(1e-300, -1e-300), MAX, 2.0);
        assert_eq!(tiny, MAX);
    }

    #[test]
    fn result_is_within_cap() {
        for cap in 1..20 {
            for k in 0..50 {
                let c = Complex::new(-2.0 + 0.08 * k as f64, 0.3);
                let i = escape_time(c, cap, 2.0);
                assert!(i >= 1 && i <= cap, "{} outside [1, {}]", i, cap);
            }
        }
    }
}
