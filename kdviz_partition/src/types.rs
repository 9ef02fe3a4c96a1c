// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for partition trees: split axes, node handles, and bounds helpers.

use kurbo::{Line, Point, Rect};

/// The coordinate range partition points live in, as a bounding box.
///
/// Renders normally start from this box: `{xMin: 0, xMax: 100, yMin: 0, yMax: 100}`.
pub const DIAGRAM_BOUNDS: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

/// A box with no constraint on either axis.
///
/// Used as the starting box when checking the partition invariant, where
/// ancestors are the only source of constraints.
pub const UNBOUNDED: Rect = Rect::new(
    f64::NEG_INFINITY,
    f64::NEG_INFINITY,
    f64::INFINITY,
    f64::INFINITY,
);

/// The axis a node splits on.
///
/// On the wire `X` is encoded as `0` and `Y` as `1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Split by x-coordinate; the split line is vertical.
    X,
    /// Split by y-coordinate; the split line is horizontal.
    Y,
}

impl Axis {
    /// Decode the wire representation (`0` → `X`, `1` → `Y`).
    pub const fn from_wire(v: i64) -> Option<Self> {
        match v {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            _ => None,
        }
    }

    /// Encode to the wire representation.
    pub const fn to_wire(self) -> u8 {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }

    /// The coordinate of `p` on this axis.
    pub const fn coord(self, p: Point) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }
}

/// Which child slot of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Lower half: coordinates ≤ the split.
    Left,
    /// Upper half: coordinates ≥ the split.
    Right,
}

/// Handle of a node inside a [`PartitionTree`](crate::PartitionTree).
///
/// Handles are plain arena indices. Trees are immutable once built, so a
/// handle stays valid for the lifetime of the tree that issued it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Arena index of this node (pre-order position for decoded trees).
    pub const fn index(self) -> usize {
        self.idx()
    }
}

/// One split in the partition tree.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionNode {
    /// Split point, normally in `[0,100] × [0,100]`.
    pub point: Point,
    /// Axis this node splits on. Never derived from depth.
    pub axis: Axis,
    /// Lower child, if any.
    pub left: Option<NodeId>,
    /// Upper child, if any.
    pub right: Option<NodeId>,
}

impl PartitionNode {
    /// A node without children.
    pub const fn leaf(point: Point, axis: Axis) -> Self {
        Self {
            point,
            axis,
            left: None,
            right: None,
        }
    }

    /// The child in `side`.
    pub const fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Split `bounds` at `point` along `axis`, returning `(left, right)` child bounds.
///
/// For `X`, the left box ends at `point.x` and the right box starts there.
/// `Y` is symmetric on the y extent. The split coordinate is taken as given,
/// so a point outside `bounds` yields an inverted box rather than being
/// silently moved.
pub fn split_bounds(bounds: Rect, axis: Axis, point: Point) -> (Rect, Rect) {
    match axis {
        Axis::X => (
            Rect::new(bounds.x0, bounds.y0, point.x, bounds.y1),
            Rect::new(point.x, bounds.y0, bounds.x1, bounds.y1),
        ),
        Axis::Y => (
            Rect::new(bounds.x0, bounds.y0, bounds.x1, point.y),
            Rect::new(bounds.x0, point.y, bounds.x1, bounds.y1),
        ),
    }
}

/// The split segment drawn for a node: orthogonal to `axis`, spanning the
/// other axis' extent of `bounds`, positioned at `point`'s coordinate on `axis`.
pub fn split_line(bounds: Rect, axis: Axis, point: Point) -> Line {
    match axis {
        Axis::X => Line::new((point.x, bounds.y0), (point.x, bounds.y1)),
        Axis::Y => Line::new((bounds.x0, point.y), (bounds.x1, point.y)),
    }
}

/// Whether `bounds` contains `p`, edges included.
///
/// Unlike [`Rect::contains`], the max edges are inclusive, which matches the
/// `≤`/`≥` form of the partition invariant. NaN is never contained.
pub fn contains_closed(bounds: Rect, p: Point) -> bool {
    bounds.x0 <= p.x && p.x <= bounds.x1 && bounds.y0 <= p.y && p.y <= bounds.y1
}
