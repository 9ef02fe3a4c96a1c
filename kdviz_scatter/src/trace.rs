// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotly `scatter3d` traces.

use serde::{Serialize, Serializer};

/// Which visual layer a trace belongs to.
///
/// A background frame has a single `Background` layer. A highlight frame has
/// `Context`, `Pair`, and `Link`, in that order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Every point, unfaded (opacity 0.7), colored by label.
    Background,
    /// Every point, faded, as context for a highlight.
    Context,
    /// Query and match points.
    Pair,
    /// Segment from query to match.
    Link,
}

/// Drawing mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Points.
    Markers,
    /// A polyline through the points.
    Lines,
}

bitflags::bitflags! {
    /// Plotly `hoverinfo` flag list. Empty serializes as `"none"`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HoverInfo: u8 {
        /// Show x.
        const X    = 0b0000_0001;
        /// Show y.
        const Y    = 0b0000_0010;
        /// Show z.
        const Z    = 0b0000_0100;
        /// Show `hovertext`.
        const TEXT = 0b0000_1000;
        /// Show the trace name.
        const NAME = 0b0001_0000;
    }
}

impl HoverInfo {
    const NAMES: [(Self, &'static str); 5] = [
        (Self::X, "x"),
        (Self::Y, "y"),
        (Self::Z, "z"),
        (Self::TEXT, "text"),
        (Self::NAME, "name"),
    ];

    /// The Plotly flag-list string, e.g. `"x+y+text"` or `"none"`.
    pub fn to_flag_list(self) -> String {
        if self.is_empty() {
            return "none".to_owned();
        }
        Self::NAMES
            .iter()
            .filter(|(f, _)| self.contains(*f))
            .map(|(_, n)| *n)
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl Serialize for HoverInfo {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_flag_list())
    }
}

/// Marker colors: label values mapped through a color scale, or one fixed
/// color per point.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    /// Per-point scalar, mapped through [`Marker::colorscale`].
    Scale(Vec<u32>),
    /// Per-point CSS color.
    Fixed(Vec<String>),
}

/// Marker styling.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    /// Marker size in pixels.
    pub size: f64,
    /// Colors.
    pub color: MarkerColor,
    /// Named color scale, for [`MarkerColor::Scale`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Line styling.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineStyle {
    /// CSS color.
    pub color: String,
    /// Width in pixels.
    pub width: f64,
}

/// One `scatter3d` trace.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trace {
    /// Always `"scatter3d"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Drawing mode.
    pub mode: Mode,
    /// X coordinates.
    pub x: Vec<f64>,
    /// Y coordinates.
    pub y: Vec<f64>,
    /// Z coordinates.
    pub z: Vec<f64>,
    /// Marker styling, for `Markers` mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    /// Line styling, for `Lines` mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    /// Per-point hover text (HTML subset).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hovertext: Vec<String>,
    /// Hover fields.
    pub hoverinfo: HoverInfo,
    /// Layer tag; not serialized.
    #[serde(skip)]
    pub layer: Layer,
}

impl Trace {
    /// Trace type written to `type`.
    pub const KIND: &'static str = "scatter3d";

    /// An empty trace of the given mode and layer.
    pub fn new(mode: Mode, layer: Layer) -> Self {
        Self {
            kind: Self::KIND,
            mode,
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
            marker: None,
            line: None,
            hovertext: Vec::new(),
            hoverinfo: HoverInfo::empty(),
            layer,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if there are no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hoverinfo_flag_lists() {
        assert_eq!(HoverInfo::empty().to_flag_list(), "none");
        assert_eq!(HoverInfo::TEXT.to_flag_list(), "text");
        assert_eq!((HoverInfo::X | HoverInfo::Z | HoverInfo::TEXT).to_flag_list(), "x+z+text");
    }

    #[test]
    fn trace_json_shape() {
        let mut t = Trace::new(Mode::Lines, Layer::Link);
        t.x = vec![1.0, 2.0];
        t.y = vec![3.0, 4.0];
        t.z = vec![5.0, 6.0];
        t.line = Some(LineStyle {
            color: "white".into(),
            width: 4.0,
        });
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["type"], "scatter3d");
        assert_eq!(v["mode"], "lines");
        assert_eq!(v["hoverinfo"], "none");
        assert_eq!(v["line"]["width"], 4.0);
        assert!(v.get("marker").is_none());
        assert!(v.get("hovertext").is_none());
        assert!(v.get("layer").is_none());
    }

    #[test]
    fn marker_colors_are_untagged() {
        let scale = serde_json::to_value(MarkerColor::Scale(vec![0, 3])).unwrap();
        assert_eq!(scale, serde_json::json!([0, 3]));
        let fixed = serde_json::to_value(MarkerColor::Fixed(vec!["#fff".into()])).unwrap();
        assert_eq!(fixed, serde_json::json!(["#fff"]));
    }
}
