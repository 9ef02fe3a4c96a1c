// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kdviz Scatter: a 3D embedding scatter scene with pair highlighting.
//!
//! - [`Dataset`]: embedding points parsed from the `id,x,y,z,label` table.
//! - [`ScatterManager`]: owns the dataset and a shared [`ViewConfig`], and
//!   pushes whole [`Frame`]s to a [`PlotSink`].
//! - [`Frame::to_figure`]: Plotly figure JSON (`{"data": [...], "layout": {...}}`).
//!
//! A highlight replaces the entire scene in one `react` call: faded context,
//! the query/match pair, and a link between them. Unknown ids leave the
//! scene untouched.
//!
//! # Example
//!
//! ```rust
//! use kdviz_scatter::{FrameLog, Highlight, Layer, ScatterManager};
//!
//! let mut scene = ScatterManager::with_default_view(FrameLog::new());
//! scene
//!     .load("id,x,y,z,label\n0,1,2,3,0\n1,4,5,6,1\n2,7,8,9,2\n")
//!     .unwrap();
//!
//! assert_eq!(scene.highlight_pair(0, 1), Highlight::Applied);
//! let frame = scene.sink().latest().unwrap();
//! assert_eq!(frame.layer(Layer::Pair).unwrap().x, [1.0, 4.0]);
//!
//! // Unknown id: nothing is redrawn.
//! assert!(matches!(scene.highlight_pair(0, 99), Highlight::Missed(_)));
//! assert_eq!(scene.sink().redraws(), 2);
//! ```

pub mod category;
pub mod dataset;
pub mod frame;
pub mod layers;
pub mod manager;
pub mod sink;
pub mod trace;
pub mod view;

pub use category::{Category, category_name};
pub use dataset::{DataError, Dataset, EmbeddingPoint};
pub use frame::{Figure, Frame};
pub use manager::{Highlight, LookupMiss, ScatterContext, ScatterManager, SceneState};
pub use sink::{FrameLog, PlotSink};
pub use trace::{HoverInfo, Layer, LineStyle, Marker, MarkerColor, Mode, Trace};
pub use view::ViewConfig;
