// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `kdviz` command line entry point.

fn main() {
    kdviz_demos::init_tracing();
    if let Err(error) = kdviz_demos::run_from_env() {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
