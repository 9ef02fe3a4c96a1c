// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface trait for partition diagram output.

use kurbo::{Line, Point};

use crate::types::Axis;

/// Drawing target used by [`render`](crate::render).
///
/// Coordinates are in partition space (normally `[0,100] × [0,100]`); a
/// surface applies its own scale when mapping to pixels.
pub trait Surface {
    /// Discard everything drawn so far.
    fn clear(&mut self);

    /// Draw the split segment of a node splitting on `axis`.
    fn line(&mut self, segment: Line, axis: Axis);

    /// Draw the marker of a node's split point.
    fn marker(&mut self, at: Point);
}
