// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partition tree storage, traversal, and the partition invariant check.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::types::{Axis, NodeId, PartitionNode, Side, UNBOUNDED, contains_closed, split_bounds};

/// An immutable-after-build binary space partition tree.
///
/// Nodes live in an arena and refer to their children by [`NodeId`], so
/// neither building, traversing, nor dropping a deep tree recurses.
#[derive(Clone, Default, PartialEq)]
pub struct PartitionTree {
    nodes: Vec<PartitionNode>,
    root: Option<NodeId>,
}

impl core::fmt::Debug for PartitionTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PartitionTree")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// A node whose point escapes the box its ancestors confine it to.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error(
    "node {} at ({}, {}) lies outside its inherited bounds",
    .node.index(),
    .point.x,
    .point.y
)]
pub struct InvariantViolation {
    /// The offending node.
    pub node: NodeId,
    /// Its point.
    pub point: Point,
    /// The box inherited from all ancestor splits.
    pub bounds: Rect,
}

impl PartitionTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root node, returning its handle.
    ///
    /// Any previous root stays in the arena but is no longer reachable.
    pub fn set_root(&mut self, point: Point, axis: Axis) -> NodeId {
        let id = self.push(PartitionNode::leaf(point, axis));
        self.root = Some(id);
        id
    }

    /// Insert a node into the `side` slot of `parent`, returning its handle.
    ///
    /// Panics if `parent` was not issued by this tree.
    pub fn insert_child(&mut self, parent: NodeId, side: Side, point: Point, axis: Axis) -> NodeId {
        let id = self.push(PartitionNode::leaf(point, axis));
        let p = &mut self.nodes[parent.idx()];
        match side {
            Side::Left => p.left = Some(id),
            Side::Right => p.right = Some(id),
        }
        id
    }

    fn push(&mut self, node: PartitionNode) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// The root handle, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&PartitionNode> {
        self.nodes.get(id.idx())
    }

    /// Number of nodes stored (reachable or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Pre-order iterator over nodes reachable from the root.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Height in nodes of the reachable tree (`0` when empty).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, d)) = stack.pop() {
            max = max.max(d);
            let n = &self.nodes[id.idx()];
            stack.extend(n.left.map(|c| (c, d + 1)));
            stack.extend(n.right.map(|c| (c, d + 1)));
        }
        max
    }

    /// Check the partition invariant over the whole tree.
    ///
    /// For every `X` node, all points in its left subtree have `x ≤ node.x` and
    /// all points in its right subtree have `x ≥ node.x`; symmetric for `Y`.
    /// This holds transitively iff each point lies inside the box obtained by
    /// applying every ancestor split to an unbounded box, which is what is
    /// checked here. Returns the first violation in pre-order.
    pub fn check_invariant(&self) -> Result<(), InvariantViolation> {
        let mut stack = match self.root {
            Some(root) => vec![(root, UNBOUNDED)],
            None => return Ok(()),
        };
        while let Some((id, bounds)) = stack.pop() {
            let n = &self.nodes[id.idx()];
            if !contains_closed(bounds, n.point) {
                return Err(InvariantViolation {
                    node: id,
                    point: n.point,
                    bounds,
                });
            }
            let (lb, rb) = split_bounds(bounds, n.axis, n.point);
            if let Some(r) = n.right {
                stack.push((r, rb));
            }
            if let Some(l) = n.left {
                stack.push((l, lb));
            }
        }
        Ok(())
    }
}

/// Pre-order iterator returned by [`PartitionTree::iter`].
#[derive(Debug)]
pub struct PreOrder<'a> {
    tree: &'a PartitionTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodeId, &'a PartitionNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let n = &self.tree.nodes[id.idx()];
        if let Some(r) = n.right {
            self.stack.push(r);
        }
        if let Some(l) = n.left {
            self.stack.push(l);
        }
        Some((id, n))
    }
}
