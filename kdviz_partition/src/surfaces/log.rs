// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording surface. Small and simple; good for tests.

use alloc::vec::Vec;
use kurbo::{Line, Point};

use crate::surface::Surface;
use crate::types::Axis;

/// A single recorded draw call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// A split segment.
    Line {
        /// Segment in partition space.
        segment: Line,
        /// Axis of the node that produced it.
        axis: Axis,
    },
    /// A split point marker.
    Marker(Point),
}

/// Surface that records draw calls in order.
#[derive(Clone, Debug, Default)]
pub struct DrawLog {
    ops: Vec<DrawOp>,
    clears: usize,
}

impl DrawLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All draw calls since the last clear.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Recorded segments, in draw order.
    pub fn lines(&self) -> impl Iterator<Item = (Line, Axis)> + '_ {
        self.ops.iter().filter_map(|op| match *op {
            DrawOp::Line { segment, axis } => Some((segment, axis)),
            DrawOp::Marker(_) => None,
        })
    }

    /// Recorded markers, in draw order.
    pub fn markers(&self) -> impl Iterator<Item = Point> + '_ {
        self.ops.iter().filter_map(|op| match *op {
            DrawOp::Marker(p) => Some(p),
            DrawOp::Line { .. } => None,
        })
    }

    /// How many times the surface has been cleared.
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Surface for DrawLog {
    fn clear(&mut self) {
        self.ops.clear();
        self.clears += 1;
    }

    fn line(&mut self, segment: Line, axis: Axis) {
        self.ops.push(DrawOp::Line { segment, axis });
    }

    fn marker(&mut self, at: Point) {
        self.ops.push(DrawOp::Marker(at));
    }
}
