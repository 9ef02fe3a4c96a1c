// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON wire format for partition trees.
//!
//! The tree endpoint serves nested nodes of the form
//! `{"point": [x, y], "axis": 0 | 1, "left": <node | null>, "right": <node | null>}`.
//! Decoding is strict: a node missing `point` or `axis` is a protocol
//! violation and fails the whole decode, since a silently partial diagram
//! would be misleading.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Write;

use kurbo::Point;
use serde::Deserialize;

use crate::tree::PartitionTree;
use crate::types::{Axis, NodeId, Side};

/// Malformed tree payload.
///
/// `path` names the offending node as a dotted walk from the root, for
/// example `root.left.right`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DataError {
    /// The payload is not JSON of the expected shape.
    #[error("malformed tree JSON: {message}")]
    Malformed {
        /// Decoder message, including line and column.
        message: String,
    },
    /// A node has no `point`.
    #[error("node {path} is missing `point`")]
    MissingPoint {
        /// Node path.
        path: String,
    },
    /// A node has no `axis`.
    #[error("node {path} is missing `axis`")]
    MissingAxis {
        /// Node path.
        path: String,
    },
    /// `point` is not a pair of finite numbers.
    #[error("node {path} has an invalid point (expected two finite numbers)")]
    InvalidPoint {
        /// Node path.
        path: String,
    },
    /// `axis` is neither `0` nor `1`.
    #[error("node {path} has axis {value}, expected 0 or 1")]
    InvalidAxis {
        /// Node path.
        path: String,
        /// The value received.
        value: i64,
    },
}

#[derive(Deserialize)]
struct WireNode {
    point: Option<Vec<f64>>,
    axis: Option<i64>,
    left: Option<Box<WireNode>>,
    right: Option<Box<WireNode>>,
}

impl Drop for WireNode {
    // Unlink children first so dropping a deep chain never recurses.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Self>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// Parse the nested wire form.
///
/// With `std`, serde_json's recursion limit is lifted and the stack is grown
/// on the heap as nesting deepens, so depth is bounded only by memory.
/// Without `std`, nesting past serde_json's limit of 128 is a decode error.
fn parse(json: &str) -> Result<Option<Box<WireNode>>, serde_json::Error> {
    #[cfg(feature = "std")]
    {
        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let wire =
            Option::<Box<WireNode>>::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;
        Ok(wire)
    }
    #[cfg(not(feature = "std"))]
    {
        serde_json::from_str(json)
    }
}

impl PartitionTree {
    /// Decode a tree from its JSON wire form.
    ///
    /// A top-level `null` decodes to an empty tree. Nodes are stored in
    /// pre-order, so the root is always `NodeId` index `0`.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let wire = parse(json).map_err(|e| DataError::Malformed {
            message: e.to_string(),
        })?;
        let mut tree = Self::new();
        let Some(root) = wire else {
            return Ok(tree);
        };

        // (node, parent slot, path)
        let mut stack: Vec<(Box<WireNode>, Option<(NodeId, Side)>, String)> =
            alloc::vec![(root, None, String::from("root"))];
        while let Some((mut wire, parent, path)) = stack.pop() {
            let axis = wire.axis;
            let left = wire.left.take();
            let right = wire.right.take();
            let point = match wire.point.take() {
                None => return Err(DataError::MissingPoint { path }),
                Some(p) => match p.as_slice() {
                    &[x, y] if x.is_finite() && y.is_finite() => Point::new(x, y),
                    _ => return Err(DataError::InvalidPoint { path }),
                },
            };
            let axis = match axis {
                None => return Err(DataError::MissingAxis { path }),
                Some(v) => Axis::from_wire(v).ok_or(DataError::InvalidAxis {
                    path: path.clone(),
                    value: v,
                })?,
            };
            let id = match parent {
                None => tree.set_root(point, axis),
                Some((p, side)) => tree.insert_child(p, side, point, axis),
            };
            // Right first so the left subtree is decoded (and numbered) first.
            if let Some(r) = right {
                stack.push((r, Some((id, Side::Right)), child_path(&path, "right")));
            }
            if let Some(l) = left {
                stack.push((l, Some((id, Side::Left)), child_path(&path, "left")));
            }
        }
        Ok(tree)
    }

    /// Encode the reachable tree in its JSON wire form.
    pub fn to_json(&self) -> String {
        enum Task {
            Node(Option<NodeId>),
            Text(&'static str),
        }

        let mut out = String::new();
        let mut tasks = alloc::vec![Task::Node(self.root())];
        while let Some(task) = tasks.pop() {
            match task {
                Task::Text(s) => out.push_str(s),
                Task::Node(None) => out.push_str("null"),
                Task::Node(Some(id)) => {
                    let Some(n) = self.get(id) else {
                        out.push_str("null");
                        continue;
                    };
                    // Writing into a String cannot fail.
                    let _ = write!(
                        out,
                        "{{\"point\":[{},{}],\"axis\":{},\"left\":",
                        n.point.x,
                        n.point.y,
                        n.axis.to_wire()
                    );
                    tasks.push(Task::Text("}"));
                    tasks.push(Task::Node(n.right));
                    tasks.push(Task::Text(",\"right\":"));
                    tasks.push(Task::Node(n.left));
                }
            }
        }
        out
    }
}

fn child_path(parent: &str, side: &str) -> String {
    let mut p = String::with_capacity(parent.len() + side.len() + 1);
    p.push_str(parent);
    p.push('.');
    p.push_str(side);
    p
}
