// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kdviz Controller: the search side of the kdviz client.
//!
//! ## Overview
//!
//! A user enters an image id and activates search. The [`SearchController`]
//! validates the id with [`validate_id`], shows a loading state, asks a
//! [`SearchBackend`] for the nearest neighbour, and then shows the result on
//! a [`ResultPanel`] and highlights the pair in a
//! [`ScatterManager`](kdviz_scatter::ScatterManager).
//!
//! ## Errors
//!
//! - [`ValidationError`]: bad input. Shown on the panel; no request is sent.
//! - [`NetworkError`]: transport failure or non-success status. Shown on the
//!   panel and logged.
//! - [`SearchError::Malformed`]: a success response that does not decode.
//!
//! Lookup misses in the scatter scene are logged there and leave the scene
//! unchanged.
//!
//! ## Sequencing
//!
//! Every accepted search gets a [`Ticket`]. Only the most recently issued
//! ticket can complete the `Loading` state; older responses are stale and
//! dropped.
//!
//! ## HTTP
//!
//! [`ApiClient`] is a blocking `reqwest` client for the search service. It
//! also fetches the partition tree and embedding table for the other views.

mod api;
mod controller;
mod error;
mod panel;
mod validate;

pub use api::{ApiClient, ClientConfig, SearchBackend, SearchResult, image_path};
pub use controller::{Completion, InputEvent, Key, SearchController, SearchState, Ticket};
pub use error::{NetworkError, SearchError, ValidationError};
pub use panel::{ImageCard, ResultPanel, ResultView, TextPanel};
pub use validate::{DEFAULT_MAX_ID, IdBounds, ImageId, validate_id};
