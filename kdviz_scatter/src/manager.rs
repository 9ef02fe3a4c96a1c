// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter scene manager: dataset, shared view, and the highlight protocol.
//!
//! ## Usage
//!
//! 1) Create a [`ScatterManager`] with a view and a [`PlotSink`].
//! 2) [`load`](ScatterManager::load) the embedding table once. This draws the
//!    background frame.
//! 3) Call [`highlight_pair`](ScatterManager::highlight_pair) for each search
//!    result. Each call replaces the whole scene in one redraw.
//!
//! Every frame carries the same `Arc<ViewConfig>`, so the viewer never sees
//! a new layout and keeps its camera.

use std::sync::Arc;

use crate::dataset::{DataError, Dataset};
use crate::frame::Frame;
use crate::layers;
use crate::sink::PlotSink;
use crate::view::ViewConfig;

/// One or both ids of a highlight request are not in the dataset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("ids not in dataset: {missing:?}")]
pub struct LookupMiss {
    /// The absent ids, query first.
    pub missing: Vec<u32>,
}

/// Outcome of [`ScatterManager::highlight_pair`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Highlight {
    /// The highlight frame was sent.
    Applied,
    /// Lookup failed; the previous scene is left as it was.
    Missed(LookupMiss),
    /// No dataset is loaded yet; nothing was drawn.
    NotLoaded,
}

/// What the scene currently shows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SceneState {
    /// Nothing drawn yet.
    #[default]
    Empty,
    /// Every point, colored by label.
    Background,
    /// A query/match pair over faded context.
    Pair {
        /// Query id.
        query: u32,
        /// Match id.
        matched: u32,
    },
}

/// State owned by one scatter scene.
#[derive(Clone, Debug)]
pub struct ScatterContext {
    view: Arc<ViewConfig>,
    dataset: Option<Dataset>,
    scene: SceneState,
}

impl ScatterContext {
    /// A context with no dataset.
    pub fn new(view: ViewConfig) -> Self {
        Self {
            view: Arc::new(view),
            dataset: None,
            scene: SceneState::Empty,
        }
    }

    /// The shared view.
    pub fn view(&self) -> &Arc<ViewConfig> {
        &self.view
    }

    /// The loaded dataset, if any.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// What the scene currently shows.
    pub fn scene(&self) -> SceneState {
        self.scene
    }

    fn frame(&self) -> Option<Frame> {
        let ds = self.dataset.as_ref()?;
        let layers = match self.scene {
            SceneState::Empty => return None,
            SceneState::Background => vec![layers::background(ds, &self.view)],
            SceneState::Pair { query, matched } => {
                let (q, m) = (ds.get(query)?, ds.get(matched)?);
                vec![
                    layers::context(ds, &self.view),
                    layers::pair(q, m),
                    layers::link(q, m),
                ]
            }
        };
        Some(Frame {
            layers,
            view: Arc::clone(&self.view),
        })
    }
}

/// Owns a scatter scene and pushes whole frames to a sink.
#[derive(Debug)]
pub struct ScatterManager<S: PlotSink> {
    ctx: ScatterContext,
    sink: S,
}

impl<S: PlotSink> ScatterManager<S> {
    /// Create a manager with the given view. Nothing is drawn until `load`.
    pub fn new(view: ViewConfig, sink: S) -> Self {
        Self {
            ctx: ScatterContext::new(view),
            sink,
        }
    }

    /// Create a manager with [`ViewConfig::default`].
    pub fn with_default_view(sink: S) -> Self {
        Self::new(ViewConfig::default(), sink)
    }

    /// Parse an embedding table and draw the background frame.
    ///
    /// A scene loads exactly once; later calls fail with
    /// [`DataError::AlreadyLoaded`] and leave the scene alone.
    pub fn load(&mut self, table: &str) -> Result<(), DataError> {
        if self.ctx.dataset.is_some() {
            return Err(DataError::AlreadyLoaded);
        }
        let dataset = Dataset::from_table(table)?;
        self.load_dataset(dataset)
    }

    /// Install an already parsed dataset and draw the background frame.
    pub fn load_dataset(&mut self, dataset: Dataset) -> Result<(), DataError> {
        if self.ctx.dataset.is_some() {
            return Err(DataError::AlreadyLoaded);
        }
        tracing::info!(points = dataset.len(), "embedding dataset loaded");
        self.ctx.dataset = Some(dataset);
        self.ctx.scene = SceneState::Background;
        self.redraw();
        Ok(())
    }

    /// Replace the scene with `query` and `matched` highlighted.
    ///
    /// If either id is unknown the call is a no-op (logged at `warn`).
    /// Otherwise one frame is sent containing faded context, the pair in
    /// query-then-match colors, and the link between them. `query == matched`
    /// is allowed and yields coincident markers and a zero-length link.
    pub fn highlight_pair(&mut self, query: u32, matched: u32) -> Highlight {
        let Some(ds) = self.ctx.dataset.as_ref() else {
            tracing::warn!(query, matched, "highlight requested before dataset load");
            return Highlight::NotLoaded;
        };
        let missing: Vec<u32> = [query, matched]
            .into_iter()
            .filter(|id| ds.get(*id).is_none())
            .collect();
        if !missing.is_empty() {
            tracing::warn!(query, matched, ?missing, "highlight lookup miss; scene unchanged");
            return Highlight::Missed(LookupMiss { missing });
        }
        self.ctx.scene = SceneState::Pair { query, matched };
        tracing::debug!(query, matched, "highlight applied");
        self.redraw();
        Highlight::Applied
    }

    /// Send the current scene again. Returns `false` if nothing is drawn yet.
    pub fn redraw(&mut self) -> bool {
        match self.ctx.frame() {
            Some(frame) => {
                self.sink.react(frame);
                true
            }
            None => false,
        }
    }

    /// The shared view.
    pub fn view(&self) -> &Arc<ViewConfig> {
        self.ctx.view()
    }

    /// The loaded dataset, if any.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.ctx.dataset()
    }

    /// The scene context.
    pub fn context(&self) -> &ScatterContext {
        &self.ctx
    }

    /// The sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Take the sink back.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
