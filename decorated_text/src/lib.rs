// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decorated Text is a crate for text whose styling is described declaratively.
//!
//! Application code describes the styling it wants as a [`DecorationMap`]: a
//! default font and foreground color, plus an ordered list of
//! [`TextDecoration`]s, each a set of [`Attributes`] over a [`CharRange`].
//! A [`StyledTextStore`] holds the text, the map, and the attributes actually
//! painted over the text as coalesced [`AttributeRuns`].
//!
//! Painting is incremental. Edits and map changes only record dirty byte
//! ranges, and [`StyledTextStore::reapply_if_needed`] repaints those ranges in
//! one pass. Painting is held back while an input method composition is in
//! progress.
//!
//! ```
//! use decorated_text::{Attributes, DecorationMap, Font, StyleKey, StyledTextStore, TextDecoration};
//!
//! let mut store = StyledTextStore::with_text("hello world");
//! store.set_decoration_map(
//!     DecorationMap::new()
//!         .with_default_font(Font::body())
//!         .with_decorations(vec![TextDecoration::new(
//!             0..5,
//!             Attributes::new().with(StyleKey::Font, Font::body().bold()),
//!         )]),
//! );
//! assert!(store.reapply_if_needed());
//! assert_eq!(store.attributes_at(0).unwrap().font().unwrap().weight, Font::BOLD);
//! assert_eq!(store.attributes_at(6).unwrap().font(), Some(&Font::body()));
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the standard library for `peniko`.
//! - `libm`: Use floating point implementations from `libm` when `std` is disabled.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod attribute_runs;
mod attributes;
mod decoration;
mod error;
mod store;
mod text_range;
mod text_storage;

pub use crate::attribute_runs::{AttributeRun, AttributeRuns};
pub use crate::attributes::{Attributes, Font, FontSlant, StyleKey, StyleValue};
pub use crate::decoration::{DecorationMap, TextDecoration};
pub use crate::error::{BoundaryInfo, Endpoint, Error, ErrorKind, RangeUnit};
pub use crate::store::StyledTextStore;
pub use crate::text_range::{CharRange, TextRange};
pub use crate::text_storage::TextStorage;

pub use peniko::Color;
