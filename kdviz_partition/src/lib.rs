// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kdviz Partition: draw a binary space partition as a 2D diagram.
//!
//! A search service indexes its points with a k-d style partition tree and
//! publishes a 2D sketch of it. This crate turns that description into
//! drawing calls.
//!
//! - Decode the wire form with [`PartitionTree::from_json`]. Decoding is
//!   strict; a node without `point` or `axis` fails with [`DataError`].
//! - Render with [`render`] into any [`Surface`]. Each node draws one split
//!   segment spanning its inherited bounding box and one marker.
//! - Check the (transitive) partition invariant with
//!   [`PartitionTree::check_invariant`].
//!
//! Geometry is Kurbo-native: points are [`kurbo::Point`], segments
//! [`kurbo::Line`], and bounding boxes [`kurbo::Rect`] with
//! `x0/x1/y0/y1` as `xMin/xMax/yMin/yMax`.
//!
//! # Example
//!
//! ```rust
//! use kdviz_partition::{DIAGRAM_BOUNDS, PartitionTree, render, surfaces::log::DrawLog};
//! use kurbo::{Line, Point};
//!
//! let tree = PartitionTree::from_json(
//!     r#"{"point":[50,50],"axis":0,"left":null,"right":null}"#,
//! )
//! .unwrap();
//!
//! let mut log = DrawLog::new();
//! let stats = render(&tree, DIAGRAM_BOUNDS, &mut log);
//! assert_eq!(stats.lines, 1);
//!
//! let (segment, _axis) = log.lines().next().unwrap();
//! assert_eq!(segment, Line::new((50.0, 0.0), (50.0, 100.0)));
//! assert_eq!(log.markers().next(), Some(Point::new(50.0, 50.0)));
//! ```
//!
//! SVG output uses [`surfaces::svg::SvgSurface`]:
//!
//! ```rust
//! use kdviz_partition::{DIAGRAM_BOUNDS, render_json, surfaces::svg::SvgSurface};
//!
//! let mut svg = SvgSurface::default();
//! render_json(r#"{"point":[25,75],"axis":1}"#, DIAGRAM_BOUNDS, &mut svg).unwrap();
//! assert!(svg.document().contains("<line"));
//! ```
//!
//! ## Surfaces
//!
//! - `DrawLog`: records draw calls; used for tests and tooling.
//! - `SvgSurface`: standalone SVG document with axis-colored split lines.
//!
//! Implement [`Surface`] to target anything else (a canvas, a terminal).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod render;
pub mod scale;
pub mod surface;
pub mod surfaces;
pub mod tree;
pub mod types;
pub mod wire;

pub use render::{RenderStats, render, render_json};
pub use scale::LinearScale;
pub use surface::Surface;
pub use tree::{InvariantViolation, PartitionTree, PreOrder};
pub use types::{
    Axis, DIAGRAM_BOUNDS, NodeId, PartitionNode, Side, UNBOUNDED, split_bounds, split_line,
};
pub use wire::DataError;
