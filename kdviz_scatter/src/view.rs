// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View configuration: the camera-independent layout of the scatter scene.
//!
//! A [`ViewConfig`] is created once per scene and shared by every frame as
//! an `Arc`. Viewers key their interaction state (camera orientation, zoom)
//! on `uirevision`, so reusing the same config across redraws keeps whatever
//! the user has done to the camera.

use serde::Serialize;

/// Font settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Font {
    /// Text color.
    pub color: String,
}

/// One 3D axis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisStyle {
    /// Axis title.
    pub title: String,
    /// Tick and label color.
    pub color: String,
    /// Grid line color.
    pub gridcolor: String,
}

impl AxisStyle {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            color: "#9ca3af".to_owned(),
            gridcolor: "#52525b".to_owned(),
        }
    }
}

/// 3D scene settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    /// Scene background.
    pub bgcolor: String,
    /// X axis.
    pub xaxis: AxisStyle,
    /// Y axis.
    pub yaxis: AxisStyle,
    /// Z axis.
    pub zaxis: AxisStyle,
}

/// Outer margins in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Margin {
    /// Left.
    pub l: u32,
    /// Right.
    pub r: u32,
    /// Bottom.
    pub b: u32,
    /// Top.
    pub t: u32,
}

/// Layout shared by every frame of a scatter scene.
///
/// Serializes as a Plotly layout object. The color scale is not part of the
/// layout on the wire; it is applied to label-colored markers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewConfig {
    /// Plot title.
    pub title: String,
    /// Paper background.
    pub paper_bgcolor: String,
    /// Plot background.
    pub plot_bgcolor: String,
    /// Font.
    pub font: Font,
    /// 3D scene.
    pub scene: Scene,
    /// Margins.
    pub margin: Margin,
    /// Interaction state key; constant for the life of the scene.
    pub uirevision: String,
    /// Named color scale for label colors.
    #[serde(skip)]
    pub colorscale: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let clear = "rgba(0,0,0,0)";
        Self {
            title: "Image Clusters in 3D Space".to_owned(),
            paper_bgcolor: clear.to_owned(),
            plot_bgcolor: clear.to_owned(),
            font: Font {
                color: "#e5e7eb".to_owned(),
            },
            scene: Scene {
                bgcolor: clear.to_owned(),
                xaxis: AxisStyle::titled("X"),
                yaxis: AxisStyle::titled("Y"),
                zaxis: AxisStyle::titled("Z"),
            },
            margin: Margin {
                l: 0,
                r: 0,
                b: 0,
                t: 40,
            },
            uirevision: "embedding-scene".to_owned(),
            colorscale: "Viridis".to_owned(),
        }
    }
}
