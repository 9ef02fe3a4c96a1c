// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sink trait for scatter output.

use std::collections::VecDeque;

use crate::frame::Frame;

/// Receives whole frames.
///
/// Each call replaces everything previously shown: a sink never sees a
/// partial scene, so an old highlight disappears exactly when the new one
/// appears.
pub trait PlotSink {
    /// Replace the displayed scene with `frame`.
    fn react(&mut self, frame: Frame);
}

impl<S: PlotSink + ?Sized> PlotSink for &mut S {
    fn react(&mut self, frame: Frame) {
        (**self).react(frame);
    }
}

impl<S: PlotSink + ?Sized> PlotSink for Box<S> {
    fn react(&mut self, frame: Frame) {
        (**self).react(frame);
    }
}

/// Sink that keeps recent frames in order.
///
/// Highlight frames carry full copies of the dataset's coordinates, so the
/// default history holds only the displayed frame.
#[derive(Clone, Debug)]
pub struct FrameLog {
    frames: VecDeque<Frame>,
    limit: Option<usize>,
    redraws: u64,
}

impl Default for FrameLog {
    fn default() -> Self {
        Self::keep_last(1)
    }
}

impl FrameLog {
    /// Keep only the displayed frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most the `n` most recent frames (at least one).
    pub fn keep_last(n: usize) -> Self {
        Self {
            frames: VecDeque::new(),
            limit: Some(n.max(1)),
            redraws: 0,
        }
    }

    /// Keep every frame. Memory grows with each redraw; meant for tests and
    /// short recordings.
    pub fn keep_all() -> Self {
        Self {
            frames: VecDeque::new(),
            limit: None,
            redraws: 0,
        }
    }

    /// The frame currently displayed.
    pub fn latest(&self) -> Option<&Frame> {
        self.frames.back()
    }

    /// Retained frames, oldest first.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Total number of redraws received, including evicted frames.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}

impl PlotSink for FrameLog {
    fn react(&mut self, frame: Frame) {
        self.redraws += 1;
        self.frames.push_back(frame);
        if let Some(limit) = self.limit {
            while self.frames.len() > limit {
                self.frames.pop_front();
            }
        }
    }
}
