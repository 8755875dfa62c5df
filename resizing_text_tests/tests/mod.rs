// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `resizing_text`.
//!
//! - The `util` module contains the shared [`TestEnv`](util::TestEnv), which mounts controls on
//!   headless widgets and drives the deferred UI queue.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so the utilities are shared.
//! - Name tests by topic first (`sizing_empty_text_floor`, not `empty_text_sizing_floor`).

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::missing_assert_message, reason = "not critical for testing")]

mod adapter;
mod parley_widget;
mod sizing;
#[macro_use]
mod util;
