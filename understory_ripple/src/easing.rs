// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS-style cubic Bézier easing curves.
//!
//! The grow animation uses [`CubicBezier::STANDARD`]. Hosts that hand the animation to a
//! compositor can format the curve with `Display` (`cubic-bezier(0.2, 0, 0, 1)`); hosts that
//! animate themselves sample it with [`CubicBezier::ease`].

use core::fmt;

use kurbo::{CubicBez, ParamCurve, Point};

// Bisection steps for solving x(t) = progress; 2^-40 is well below a pixel at any ripple size.
const SOLVE_ITERATIONS: usize = 40;

/// A timing curve through `(0, 0)`, `(x1, y1)`, `(x2, y2)` and `(1, 1)`.
///
/// `x1` and `x2` must lie in `[0, 1]` so that the curve is a function of progress.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicBezier {
    /// First control point, x.
    pub x1: f64,
    /// First control point, y.
    pub y1: f64,
    /// Second control point, x.
    pub x2: f64,
    /// Second control point, y.
    pub y2: f64,
}

impl CubicBezier {
    /// Standard easing: quick start, long gentle settle.
    pub const STANDARD: Self = Self::new(0.2, 0.0, 0.0, 1.0);

    /// Linear timing.
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a curve from its two control points.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Map linear `progress` in `[0, 1]` to eased progress.
    ///
    /// Inputs outside `[0, 1]` clamp to the endpoints.
    pub fn ease(&self, progress: f64) -> f64 {
        if progress.is_nan() || progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }
        let curve = self.curve();
        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..SOLVE_ITERATIONS {
            let mid = 0.5 * (lo + hi);
            if curve.eval(mid).x < progress {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        curve.eval(0.5 * (lo + hi)).y
    }

    fn curve(&self) -> CubicBez {
        CubicBez::new(
            Point::ZERO,
            Point::new(self.x1, self.y1),
            Point::new(self.x2, self.y2),
            Point::new(1.0, 1.0),
        )
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for CubicBezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}
