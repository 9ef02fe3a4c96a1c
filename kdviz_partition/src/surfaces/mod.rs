// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface implementations.
//!
//! - `log`: records draw calls for inspection (tests, tooling).
//! - `svg`: writes a standalone SVG document styled like the search demo's diagram.

pub mod log;
pub mod svg;
