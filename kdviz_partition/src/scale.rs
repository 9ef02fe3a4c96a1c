// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear scales from partition space to output space.

/// An affine map from a `domain` interval onto a `range` interval.
///
/// Either interval may be reversed; a reversed range is how the SVG surface
/// flips the y-axis so larger values draw higher up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearScale {
    /// Input interval `(d0, d1)`.
    pub domain: (f64, f64),
    /// Output interval `(r0, r1)`.
    pub range: (f64, f64),
}

impl LinearScale {
    /// Create a scale mapping `domain.0 → range.0` and `domain.1 → range.1`.
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value. Values outside the domain extrapolate linearly.
    ///
    /// A degenerate domain maps everything to the middle of the range.
    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (v - d0) / span };
        r0 + t * (r1 - r0)
    }
}
