// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partition diagram rendering.
//!
//! ## Algorithm
//!
//! Pre-order traversal from the root with an explicit stack of
//! `(node, bounds)` pairs. For each node:
//!
//! 1. draw the split segment orthogonal to the node's axis, spanning the
//!    current bounds on the other axis;
//! 2. draw a marker at the split point;
//! 3. push the children with bounds from [`split_bounds`].
//!
//! The axis comes from each node, never from depth, so trees that do not
//! alternate axes render as stored. Depth is bounded only by memory.

use alloc::vec::Vec;
use kurbo::Rect;

use crate::surface::Surface;
use crate::tree::PartitionTree;
use crate::types::{split_bounds, split_line};
use crate::wire::DataError;

/// Counts of draw calls issued by one render pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Split segments drawn.
    pub lines: usize,
    /// Split point markers drawn.
    pub markers: usize,
}

/// Render `tree` into `surface`, starting from `bounds`.
///
/// The surface is cleared first, so repeated calls never stack output.
/// Pass [`DIAGRAM_BOUNDS`](crate::DIAGRAM_BOUNDS) for the usual `[0,100]²` box.
pub fn render<S: Surface + ?Sized>(tree: &PartitionTree, bounds: Rect, surface: &mut S) -> RenderStats {
    surface.clear();
    let mut stats = RenderStats::default();
    let mut stack: Vec<_> = tree.root().map(|r| (r, bounds)).into_iter().collect();
    while let Some((id, bounds)) = stack.pop() {
        let Some(n) = tree.get(id) else {
            continue;
        };
        surface.line(split_line(bounds, n.axis, n.point), n.axis);
        stats.lines += 1;
        surface.marker(n.point);
        stats.markers += 1;

        let (lb, rb) = split_bounds(bounds, n.axis, n.point);
        if let Some(r) = n.right {
            stack.push((r, rb));
        }
        if let Some(l) = n.left {
            stack.push((l, lb));
        }
    }
    stats
}

/// Decode a wire payload and render it.
///
/// Decoding completes before anything is drawn: on error the surface is left
/// exactly as it was and the caller should surface a diagram-load failure.
pub fn render_json<S: Surface + ?Sized>(
    json: &str,
    bounds: Rect,
    surface: &mut S,
) -> Result<RenderStats, DataError> {
    let tree = PartitionTree::from_json(json)?;
    Ok(render(&tree, bounds, surface))
}
