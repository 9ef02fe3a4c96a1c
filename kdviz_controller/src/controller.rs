// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Search state machine.
//!
//! ## States
//!
//! `Idle → Loading → Idle`. Activation with a valid id moves to `Loading`
//! and issues a [`Ticket`]. Completing the *latest* ticket returns to
//! `Idle`, whether the search succeeded or failed. Completing any older
//! ticket is stale: it is logged and dropped, and neither the panel nor the
//! scatter scene changes. The last search issued wins, regardless of which
//! response arrives last.
//!
//! ## Minimal example
//!
//! ```
//! use kdviz_controller::{Completion, SearchController, SearchResult, SearchState};
//! # use kdviz_controller::{ResultPanel, ResultView, ValidationError};
//! # #[derive(Default)] struct Quiet;
//! # impl ResultPanel for Quiet {
//! #     fn show_loading(&mut self) {}
//! #     fn show_result(&mut self, _: &ResultView) {}
//! #     fn show_validation(&mut self, _: &ValidationError) {}
//! #     fn show_error(&mut self, _: &str) {}
//! # }
//! use kdviz_scatter::{FrameLog, ScatterManager};
//!
//! let mut scene = ScatterManager::with_default_view(FrameLog::new());
//! scene.load("id,x,y,z,label\n0,1,2,3,0\n1,4,5,6,1\n").unwrap();
//! let mut c = SearchController::new(Quiet, scene);
//!
//! let first = c.begin("0").unwrap();
//! let second = c.begin("1").unwrap();
//! assert_eq!(c.state(), SearchState::Loading { latest: second });
//!
//! let found = |q, m| Ok(SearchResult { query_id: q, query_label: 0, match_id: m, match_label: 1, distance: 0.5 });
//! assert!(matches!(c.complete(second, found(1, 0)), Completion::Shown(_)));
//! assert!(matches!(c.complete(first, found(0, 1)), Completion::Stale));
//! assert_eq!(c.state(), SearchState::Idle);
//! ```

use kdviz_scatter::{Highlight, PlotSink, ScatterManager};

use crate::api::{SearchBackend, SearchResult};
use crate::error::{SearchError, ValidationError};
use crate::panel::{ResultPanel, ResultView};
use crate::validate::{IdBounds, ImageId};

/// Key released in the id field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// Confirm.
    Enter,
    /// Any other key.
    Other,
}

/// User action that may start a search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The search button.
    Activate,
    /// A key released while the id field has focus.
    KeyUp(Key),
}

impl InputEvent {
    /// True if this event starts a search.
    pub fn triggers_search(self) -> bool {
        matches!(self, Self::Activate | Self::KeyUp(Key::Enter))
    }
}

/// Identifies one issued search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    seq: u64,
    id: ImageId,
}

impl Ticket {
    /// Sequence number; strictly increasing per controller.
    pub fn seq(self) -> u64 {
        self.seq
    }

    /// The id searched for.
    pub fn id(self) -> ImageId {
        self.id
    }
}

/// Controller state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchState {
    /// No search outstanding.
    #[default]
    Idle,
    /// Waiting for the response to `latest`.
    Loading {
        /// Most recently issued ticket.
        latest: Ticket,
    },
}

/// What [`SearchController::complete`] did with a response.
#[derive(Debug)]
pub enum Completion {
    /// The result was shown and the scene highlight attempted.
    Shown(Highlight),
    /// The error was shown.
    Failed(SearchError),
    /// A newer search was issued; the response was dropped.
    Stale,
}

/// Drives validation, request sequencing, the result panel, and the scatter
/// highlight.
#[derive(Debug)]
pub struct SearchController<P: ResultPanel, S: PlotSink> {
    bounds: IdBounds,
    state: SearchState,
    next_seq: u64,
    image_base: String,
    panel: P,
    scatter: ScatterManager<S>,
}

impl<P: ResultPanel, S: PlotSink> SearchController<P, S> {
    /// A controller with the default id bounds and origin-relative image URLs.
    pub fn new(panel: P, scatter: ScatterManager<S>) -> Self {
        Self {
            bounds: IdBounds::default(),
            state: SearchState::Idle,
            next_seq: 0,
            image_base: String::new(),
            panel,
            scatter,
        }
    }

    /// Replace the accepted id range.
    pub fn with_bounds(mut self, bounds: IdBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Prefix image URLs with `base` (a server origin).
    pub fn with_image_base(mut self, base: impl Into<String>) -> Self {
        self.image_base = base.into();
        self
    }

    /// Take the id bound from the scene's loaded dataset.
    ///
    /// Returns `false`, leaving the bound unchanged, when no non-empty
    /// dataset is loaded.
    pub fn bound_to_dataset(&mut self) -> bool {
        match self.scatter.dataset().and_then(IdBounds::from_dataset) {
            Some(b) => {
                tracing::info!(max_id = b.max(), "id bound taken from dataset");
                self.bounds = b;
                true
            }
            None => false,
        }
    }

    /// Current state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Accepted id range.
    pub fn bounds(&self) -> IdBounds {
        self.bounds
    }

    /// The result panel.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// The scatter scene.
    pub fn scatter(&self) -> &ScatterManager<S> {
        &self.scatter
    }

    /// The scatter scene, mutably.
    pub fn scatter_mut(&mut self) -> &mut ScatterManager<S> {
        &mut self.scatter
    }

    /// Validate `raw` and, if valid, enter `Loading` with a fresh ticket.
    ///
    /// Invalid input shows a validation message, issues nothing, and leaves
    /// the state as it was.
    pub fn begin(&mut self, raw: &str) -> Result<Ticket, ValidationError> {
        let id = match self.bounds.validate(raw) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(error = %e, "search input rejected");
                self.panel.show_validation(&e);
                return Err(e);
            }
        };
        self.next_seq += 1;
        let ticket = Ticket {
            seq: self.next_seq,
            id,
        };
        self.state = SearchState::Loading { latest: ticket };
        tracing::debug!(seq = ticket.seq, %id, "search issued");
        self.panel.show_loading();
        Ok(ticket)
    }

    /// Apply the outcome of the search for `ticket`.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<SearchResult, SearchError>,
    ) -> Completion {
        if self.state != (SearchState::Loading { latest: ticket }) {
            tracing::debug!(seq = ticket.seq, id = %ticket.id, "stale search response dropped");
            return Completion::Stale;
        }
        self.state = SearchState::Idle;
        match outcome {
            Ok(result) => {
                tracing::info!(
                    query = result.query_id,
                    matched = result.match_id,
                    distance = result.distance,
                    "search succeeded"
                );
                self.panel
                    .show_result(&ResultView::new(&result, &self.image_base));
                Completion::Shown(self.scatter.highlight_pair(result.query_id, result.match_id))
            }
            Err(e) => {
                tracing::error!(seq = ticket.seq, id = %ticket.id, error = %e, "search failed");
                self.panel.show_error(&e.user_message());
                Completion::Failed(e)
            }
        }
    }

    /// Validate, search through `backend`, and apply the result.
    pub fn submit<B: SearchBackend + ?Sized>(
        &mut self,
        raw: &str,
        backend: &mut B,
    ) -> Result<Completion, ValidationError> {
        let ticket = self.begin(raw)?;
        let outcome = backend.search(ticket.id);
        Ok(self.complete(ticket, outcome))
    }

    /// [`submit`](Self::submit) if `event` starts a search, otherwise `None`.
    pub fn handle<B: SearchBackend + ?Sized>(
        &mut self,
        event: InputEvent,
        raw: &str,
        backend: &mut B,
    ) -> Option<Result<Completion, ValidationError>> {
        event
            .triggers_search()
            .then(|| self.submit(raw, backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use kdviz_scatter::{FrameLog, Layer};

    #[derive(Clone, Debug, PartialEq)]
    enum Shown {
        Loading,
        Result(ResultView),
        Validation(ValidationError),
        Error(String),
    }

    #[derive(Default, Debug)]
    struct Recorder(Vec<Shown>);

    impl ResultPanel for Recorder {
        fn show_loading(&mut self) {
            self.0.push(Shown::Loading);
        }
        fn show_result(&mut self, view: &ResultView) {
            self.0.push(Shown::Result(view.clone()));
        }
        fn show_validation(&mut self, error: &ValidationError) {
            self.0.push(Shown::Validation(error.clone()));
        }
        fn show_error(&mut self, message: &str) {
            self.0.push(Shown::Error(message.to_owned()));
        }
    }

    /// Answers every query with `(id + 1) % 3`, or fails with a status.
    struct Mock {
        fail: Option<u16>,
        calls: Vec<ImageId>,
    }

    impl SearchBackend for Mock {
        fn search(&mut self, id: ImageId) -> Result<SearchResult, SearchError> {
            self.calls.push(id);
            if let Some(status) = self.fail {
                return Err(NetworkError::Status {
                    endpoint: "mock".into(),
                    status,
                    message: Some("ID not found".into()),
                }
                .into());
            }
            Ok(found(id.get(), (id.get() + 1) % 3))
        }
    }

    fn found(q: u32, m: u32) -> SearchResult {
        SearchResult {
            query_id: q,
            query_label: q,
            match_id: m,
            match_label: m,
            distance: 1.5,
        }
    }

    fn controller() -> SearchController<Recorder, FrameLog> {
        let mut scene = ScatterManager::with_default_view(FrameLog::new());
        scene
            .load("id,x,y,z,label\n0,1,2,3,0\n1,4,5,6,1\n2,7,8,9,2\n")
            .unwrap();
        SearchController::new(Recorder::default(), scene)
    }

    #[test]
    fn success_shows_result_then_highlights() {
        let mut c = controller();
        let mut backend = Mock {
            fail: None,
            calls: vec![],
        };
        let done = c.submit("0", &mut backend).unwrap();
        assert!(matches!(done, Completion::Shown(Highlight::Applied)));
        assert_eq!(c.state(), SearchState::Idle);
        assert_eq!(backend.calls, [ImageId(0)]);

        let shown = &c.panel().0;
        assert_eq!(shown[0], Shown::Loading);
        let Shown::Result(view) = &shown[1] else {
            panic!("expected a result, got {shown:?}");
        };
        assert_eq!((view.query.id, view.matched.id), (0, 1));
        assert_eq!(view.distance, "1.5000");

        let frame = c.scatter().sink().latest().unwrap();
        assert_eq!(frame.layer(Layer::Pair).unwrap().x, [1.0, 4.0]);
    }

    #[test]
    fn invalid_input_sends_nothing() {
        let mut c = controller();
        let mut backend = Mock {
            fail: None,
            calls: vec![],
        };
        for raw in ["", "abc", "5000", "-1"] {
            assert!(c.submit(raw, &mut backend).is_err(), "{raw}");
        }
        assert!(backend.calls.is_empty());
        assert_eq!(c.state(), SearchState::Idle);
        assert!(c.panel().0.iter().all(|s| matches!(s, Shown::Validation(_))));
        assert_eq!(c.scatter().sink().redraws(), 1);
    }

    #[test]
    fn failure_returns_to_idle_with_message() {
        let mut c = controller();
        let mut backend = Mock {
            fail: Some(404),
            calls: vec![],
        };
        let done = c.submit("2", &mut backend).unwrap();
        assert!(matches!(
            done,
            Completion::Failed(SearchError::Network(NetworkError::Status { status: 404, .. }))
        ));
        assert_eq!(c.state(), SearchState::Idle);
        assert_eq!(
            c.panel().0.last(),
            Some(&Shown::Error(
                "Error: Server responded with status 404: ID not found".into()
            ))
        );
        assert_eq!(c.scatter().sink().redraws(), 1);
    }

    #[test]
    fn last_issued_wins_over_last_resolved() {
        let mut c = controller();
        let t1 = c.begin("0").unwrap();
        let t2 = c.begin("2").unwrap();
        assert!(t2.seq() > t1.seq());

        // The newer request resolves first.
        assert!(matches!(c.complete(t2, Ok(found(2, 1))), Completion::Shown(_)));
        // The older one resolves later and must not overwrite it.
        assert!(matches!(c.complete(t1, Ok(found(0, 1))), Completion::Stale));

        let results: Vec<_> = c
            .panel()
            .0
            .iter()
            .filter_map(|s| match s {
                Shown::Result(v) => Some(v.query.id),
                _ => None,
            })
            .collect();
        assert_eq!(results, [2]);
        let frame = c.scatter().sink().latest().unwrap();
        assert_eq!(frame.layer(Layer::Pair).unwrap().x, [7.0, 4.0]);
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut c = controller();
        let t1 = c.begin("0").unwrap();
        let t2 = c.begin("1").unwrap();
        assert!(matches!(
            c.complete(t1, Err(SearchError::Malformed {
                endpoint: "mock".into(),
                message: "bad".into()
            })),
            Completion::Stale
        ));
        assert_eq!(c.state(), SearchState::Loading { latest: t2 });
        assert!(matches!(c.complete(t2, Ok(found(1, 2))), Completion::Shown(_)));
        assert_eq!(c.state(), SearchState::Idle);
        // Completing the same ticket twice is stale the second time.
        assert!(matches!(c.complete(t2, Ok(found(1, 2))), Completion::Stale));
    }

    #[test]
    fn result_for_unknown_ids_is_a_logged_miss() {
        let mut c = controller();
        let t = c.begin("1").unwrap();
        let done = c.complete(t, Ok(found(1, 77)));
        assert!(matches!(done, Completion::Shown(Highlight::Missed(_))));
        assert_eq!(c.state(), SearchState::Idle);
        assert_eq!(c.scatter().sink().redraws(), 1);
    }

    #[test]
    fn only_enter_and_activation_trigger() {
        let mut c = controller();
        let mut backend = Mock {
            fail: None,
            calls: vec![],
        };
        assert!(c.handle(InputEvent::KeyUp(Key::Other), "1", &mut backend).is_none());
        assert!(c.handle(InputEvent::KeyUp(Key::Enter), "1", &mut backend).is_some());
        assert!(c.handle(InputEvent::Activate, "2", &mut backend).is_some());
        assert_eq!(backend.calls, [ImageId(1), ImageId(2)]);
    }

    #[test]
    fn bounds_follow_the_dataset() {
        let mut c = controller();
        assert!(c.bound_to_dataset());
        assert_eq!(c.bounds().max(), 2);
        assert!(c.begin("3").is_err());

        let scene = ScatterManager::with_default_view(FrameLog::new());
        let mut empty = SearchController::new(Recorder::default(), scene)
            .with_bounds(IdBounds::new(10));
        assert!(!empty.bound_to_dataset());
        assert_eq!(empty.bounds().max(), 10);
    }
}
