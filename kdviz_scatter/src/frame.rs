// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Complete scene contents handed to a sink in one redraw.

use std::sync::Arc;

use serde::Serialize;

use crate::trace::{Layer, Trace};
use crate::view::ViewConfig;

/// Everything a viewer needs to draw the scene: data layers plus the shared view.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Traces in draw order.
    pub layers: Vec<Trace>,
    /// The scene's view, shared by identity with every other frame.
    pub view: Arc<ViewConfig>,
}

/// Plotly figure (`{"data": [...], "layout": {...}}`) borrowed from a [`Frame`].
#[derive(Debug, Serialize)]
pub struct Figure<'a> {
    /// Traces.
    pub data: &'a [Trace],
    /// Layout.
    pub layout: &'a ViewConfig,
}

impl Frame {
    /// The first trace in `layer`.
    pub fn layer(&self, layer: Layer) -> Option<&Trace> {
        self.layers.iter().find(|t| t.layer == layer)
    }

    /// Layer tags in draw order.
    pub fn layer_tags(&self) -> Vec<Layer> {
        self.layers.iter().map(|t| t.layer).collect()
    }

    /// Borrow as a serializable Plotly figure.
    pub fn figure(&self) -> Figure<'_> {
        Figure {
            data: &self.layers,
            layout: &self.view,
        }
    }

    /// Pretty-printed Plotly figure JSON.
    pub fn to_figure(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.figure())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Mode;

    #[test]
    fn figure_has_data_and_layout() {
        let frame = Frame {
            layers: vec![Trace::new(Mode::Markers, Layer::Background)],
            view: Arc::new(ViewConfig::default()),
        };
        let v: serde_json::Value = serde_json::from_str(&frame.to_figure().unwrap()).unwrap();
        assert_eq!(v["data"].as_array().map(Vec::len), Some(1));
        assert_eq!(v["data"][0]["type"], "scatter3d");
        assert_eq!(v["layout"]["uirevision"], "embedding-scene");
        assert_eq!(frame.layer_tags(), [Layer::Background]);
        assert!(frame.layer(Layer::Pair).is_none());
    }
}
