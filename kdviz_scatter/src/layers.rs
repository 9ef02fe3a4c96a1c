// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builders for the visual layers of a scatter frame.

use crate::category::category_name;
use crate::dataset::{Dataset, EmbeddingPoint};
use crate::trace::{HoverInfo, Layer, LineStyle, Marker, MarkerColor, Mode, Trace};
use crate::view::ViewConfig;

/// Query point color. Query and match colors are never swapped.
pub const QUERY_COLOR: &str = "#3b82f6";
/// Match point color.
pub const MATCH_COLOR: &str = "#ef4444";
/// Query→match segment color.
pub const LINK_COLOR: &str = "white";

fn all_points(dataset: &Dataset, layer: Layer) -> Trace {
    let mut t = Trace::new(Mode::Markers, layer);
    t.x = dataset.iter().map(|p| p.x).collect();
    t.y = dataset.iter().map(|p| p.y).collect();
    t.z = dataset.iter().map(|p| p.z).collect();
    t
}

/// Every point at opacity 0.7 (unfaded next to the 0.1 context layer),
/// colored by label, with id/category hover text.
pub fn background(dataset: &Dataset, view: &ViewConfig) -> Trace {
    let mut t = all_points(dataset, Layer::Background);
    t.marker = Some(Marker {
        size: 2.5,
        color: MarkerColor::Scale(dataset.iter().map(|p| p.label).collect()),
        colorscale: Some(view.colorscale.clone()),
        opacity: 0.7,
    });
    t.hovertext = dataset
        .iter()
        .map(|p| format!("ID: {}<br>Category: {}", p.id, category_name(p.label)))
        .collect();
    t.hoverinfo = HoverInfo::TEXT;
    t
}

/// Every point, faded, without hover.
pub fn context(dataset: &Dataset, view: &ViewConfig) -> Trace {
    let mut t = all_points(dataset, Layer::Context);
    t.marker = Some(Marker {
        size: 2.0,
        color: MarkerColor::Scale(dataset.iter().map(|p| p.label).collect()),
        colorscale: Some(view.colorscale.clone()),
        opacity: 0.1,
    });
    t
}

/// The query point then the match point, in their fixed colors.
pub fn pair(query: &EmbeddingPoint, matched: &EmbeddingPoint) -> Trace {
    let mut t = Trace::new(Mode::Markers, Layer::Pair);
    t.x = vec![query.x, matched.x];
    t.y = vec![query.y, matched.y];
    t.z = vec![query.z, matched.z];
    t.marker = Some(Marker {
        size: 6.0,
        color: MarkerColor::Fixed(vec![QUERY_COLOR.to_owned(), MATCH_COLOR.to_owned()]),
        colorscale: None,
        opacity: 1.0,
    });
    t.hovertext = vec![
        format!(
            "<b>Query</b><br>ID: {}<br>Category: {}",
            query.id,
            category_name(query.label)
        ),
        format!(
            "<b>Match</b><br>ID: {}<br>Category: {}",
            matched.id,
            category_name(matched.label)
        ),
    ];
    t.hoverinfo = HoverInfo::TEXT;
    t
}

/// Segment from query to match. Zero-length when they coincide.
pub fn link(query: &EmbeddingPoint, matched: &EmbeddingPoint) -> Trace {
    let mut t = Trace::new(Mode::Lines, Layer::Link);
    t.x = vec![query.x, matched.x];
    t.y = vec![query.y, matched.y];
    t.z = vec![query.z, matched.z];
    t.line = Some(LineStyle {
        color: LINK_COLOR.to_owned(),
        width: 4.0,
    });
    t
}
