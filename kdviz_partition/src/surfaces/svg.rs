// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG surface.
//!
//! Produces a standalone document: a dark rounded background, one `<line>`
//! per split colored by axis, and one white `<circle>` per split point.
//! Partition space is mapped through two [`LinearScale`]s; the y scale is
//! flipped so the diagram reads like a regular plot.

use alloc::string::String;
use core::fmt::Write;

use kurbo::{Line, Point, Rect};

use crate::scale::LinearScale;
use crate::surface::Surface;
use crate::types::{Axis, DIAGRAM_BOUNDS};

/// Visual parameters for [`SvgSurface`].
#[derive(Clone, Debug, PartialEq)]
pub struct SvgStyle {
    /// Document width in user units.
    pub width: f64,
    /// Document height in user units.
    pub height: f64,
    /// Inset applied on every side.
    pub margin: f64,
    /// Partition-space box mapped onto the inner area.
    pub domain: Rect,
    /// Background fill.
    pub background: &'static str,
    /// Stroke for `X` splits (vertical lines).
    pub x_split_color: &'static str,
    /// Stroke for `Y` splits (horizontal lines).
    pub y_split_color: &'static str,
    /// Split line width.
    pub stroke_width: f64,
    /// Marker fill.
    pub marker_color: &'static str,
    /// Marker radius.
    pub marker_radius: f64,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            margin: 20.0,
            domain: DIAGRAM_BOUNDS,
            background: "#1f2937",
            x_split_color: "#f43f5e",
            y_split_color: "#3b82f6",
            stroke_width: 1.5,
            marker_color: "white",
            marker_radius: 5.0,
        }
    }
}

/// Surface writing SVG markup.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    style: SvgStyle,
    x: LinearScale,
    y: LinearScale,
    body: String,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(SvgStyle::default())
    }
}

impl SvgSurface {
    /// Create an empty surface.
    pub fn new(style: SvgStyle) -> Self {
        let m = style.margin;
        let x = LinearScale::new(
            (style.domain.x0, style.domain.x1),
            (m, style.width - m),
        );
        // Larger y values draw nearer the top.
        let y = LinearScale::new(
            (style.domain.y1, style.domain.y0),
            (m, style.height - m),
        );
        Self {
            style,
            x,
            y,
            body: String::new(),
        }
    }

    /// The style in use.
    pub fn style(&self) -> &SvgStyle {
        &self.style
    }

    /// Map a partition-space point to document coordinates.
    pub fn to_document(&self, p: Point) -> Point {
        Point::new(self.x.apply(p.x), self.y.apply(p.y))
    }

    /// The complete SVG document for everything drawn since the last clear.
    pub fn document(&self) -> String {
        let s = &self.style;
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" \
             style=\"background-color: {}; border-radius: 8px\"><g>",
            s.width, s.height, s.background
        );
        out.push_str(&self.body);
        out.push_str("</g></svg>\n");
        out
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.body.clear();
    }

    fn line(&mut self, segment: Line, axis: Axis) {
        let p0 = self.to_document(segment.p0);
        let p1 = self.to_document(segment.p1);
        let stroke = match axis {
            Axis::X => self.style.x_split_color,
            Axis::Y => self.style.y_split_color,
        };
        // Writing into a String cannot fail.
        let _ = write!(
            self.body,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            p0.x, p0.y, p1.x, p1.y, stroke, self.style.stroke_width
        );
    }

    fn marker(&mut self, at: Point) {
        let c = self.to_document(at);
        let _ = write!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
            c.x, c.y, self.style.marker_radius, self.style.marker_color
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_corners_with_flipped_y() {
        let s = SvgSurface::default();
        assert_eq!(s.to_document(Point::new(0.0, 0.0)), Point::new(20.0, 380.0));
        assert_eq!(s.to_document(Point::new(100.0, 100.0)), Point::new(580.0, 20.0));
    }

    #[test]
    fn vertical_split_line_markup() {
        let mut s = SvgSurface::default();
        s.line(Line::new((50.0, 0.0), (50.0, 100.0)), Axis::X);
        s.marker(Point::new(50.0, 50.0));
        let doc = s.document();
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains(
            "<line x1=\"300\" y1=\"380\" x2=\"300\" y2=\"20\" stroke=\"#f43f5e\" stroke-width=\"1.5\"/>"
        ));
        assert!(doc.contains("<circle cx=\"300\" cy=\"200\" r=\"5\" fill=\"white\"/>"));
    }

    #[test]
    fn horizontal_split_uses_y_color() {
        let mut s = SvgSurface::default();
        s.line(Line::new((0.0, 25.0), (100.0, 25.0)), Axis::Y);
        assert!(s.document().contains("stroke=\"#3b82f6\""));
    }

    #[test]
    fn clear_discards_body() {
        let mut s = SvgSurface::default();
        s.marker(Point::new(1.0, 1.0));
        s.clear();
        assert!(!s.document().contains("<circle"));
    }
}
