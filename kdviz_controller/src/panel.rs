// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The result panel collaborator.

use std::io::Write;

use kdviz_scatter::category_name;

use crate::api::{SearchResult, image_path};
use crate::error::ValidationError;

/// One side of a result: the query or the match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageCard {
    /// Heading shown above the image.
    pub heading: &'static str,
    /// Image id.
    pub id: u32,
    /// Category name.
    pub category: &'static str,
    /// Image URL.
    pub image_url: String,
}

/// Everything the panel shows for a successful search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultView {
    /// Query card.
    pub query: ImageCard,
    /// Match card.
    pub matched: ImageCard,
    /// Distance with four decimals.
    pub distance: String,
}

impl ResultView {
    /// Build from a result. Image URLs are `image_base` followed by
    /// `/images/{id}.png`; pass `""` for origin-relative URLs.
    pub fn new(result: &SearchResult, image_base: &str) -> Self {
        let card = |heading, id, label| ImageCard {
            heading,
            id,
            category: category_name(label),
            image_url: format!("{image_base}{}", image_path(id)),
        };
        Self {
            query: card("Query Image", result.query_id, result.query_label),
            matched: card(
                "Most Similar Image Found",
                result.match_id,
                result.match_label,
            ),
            distance: format!("{:.4}", result.distance),
        }
    }
}

/// Displays search progress and outcomes.
///
/// Each call replaces what the panel showed before.
pub trait ResultPanel {
    /// A request is in flight.
    fn show_loading(&mut self);
    /// A search succeeded.
    fn show_result(&mut self, view: &ResultView);
    /// Input was rejected before any request.
    fn show_validation(&mut self, error: &ValidationError);
    /// A request failed.
    fn show_error(&mut self, message: &str);
}

impl<P: ResultPanel + ?Sized> ResultPanel for &mut P {
    fn show_loading(&mut self) {
        (**self).show_loading();
    }
    fn show_result(&mut self, view: &ResultView) {
        (**self).show_result(view);
    }
    fn show_validation(&mut self, error: &ValidationError) {
        (**self).show_validation(error);
    }
    fn show_error(&mut self, message: &str) {
        (**self).show_error(message);
    }
}

/// Panel that writes plain text to a writer.
#[derive(Debug)]
pub struct TextPanel<W: Write> {
    out: W,
}

impl<W: Write> TextPanel<W> {
    /// Write to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Take the writer back.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(error) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::warn!(%error, "result panel write failed");
        }
    }
}

impl<W: Write> ResultPanel for TextPanel<W> {
    fn show_loading(&mut self) {
        self.emit("Searching...\n");
    }

    fn show_result(&mut self, view: &ResultView) {
        let mut text = String::new();
        for card in [&view.query, &view.matched] {
            text.push_str(&format!(
                "{}\n  ID: {}\n  Category: {}\n  Image: {}\n",
                card.heading, card.id, card.category, card.image_url
            ));
        }
        text.push_str(&format!("  Distance: {}\n", view.distance));
        self.emit(&text);
    }

    fn show_validation(&mut self, error: &ValidationError) {
        self.emit(&format!("{error}\n"));
    }

    fn show_error(&mut self, message: &str) {
        self.emit(&format!("{message}\n"));
    }
}
