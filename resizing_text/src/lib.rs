// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An auto-resizing rich text input control over native editing widgets.
//!
//! A [`ResizingTextView`] describes the control for one render pass: a
//! [`TextBinding`] to edit, default font and color, range decorations, a
//! placeholder, and editing, scrolling and line rules. Mounting it on a widget
//! yields a [`MountedTextView`], which is made of two layers:
//!
//! - an invisible [`SizingNode`] that lays out a copy of the text with the
//!   same font, padding and line rules as the editor and decides the control's
//!   size, and
//! - an [`EditingAdapter`] that owns the native widget, keeps it and its
//!   [`StyledTextStore`] in step with the binding, and implements the platform
//!   behaviors: newline filtering, tab traversal, return interception, focus
//!   reporting, and selection restore.
//!
//! The editor is placed over the measurement node with the same frame, so the
//! control's size never depends on what the editing widget reports about
//! itself.
//!
//! Widgets plug in through [`NativeTextWidget`] and text measurement through
//! [`TextMeasurer`]. With the default `parley` feature, [`ParleyMeasurer`] and
//! [`ParleyTextWidget`] implement both with Parley; the [`testing`] module has
//! deterministic stand-ins.
//!
//! All state is single threaded. Work that must wait for the current input
//! event or layout pass to finish goes to a [`UiQueue`], which the host drains
//! once per turn.
//!
//! ```
//! use resizing_text::testing::{FixedAdvanceMeasurer, HeadlessTextWidget};
//! use resizing_text::{
//!     Font, MountedTextView, ProposedSize, ResizingTextView, TextBinding, UiQueue, WidgetFamily,
//! };
//!
//! let text = TextBinding::new("");
//! let view = ResizingTextView::new(text.clone())
//!     .font(Font::new("mono", 10.0))
//!     .can_have_newlines(false);
//! let queue = UiQueue::new();
//! let mut control =
//!     MountedTextView::new(WidgetFamily::Desktop, view, HeadlessTextWidget::new(), queue.clone());
//!
//! control.adapter_mut().insert_text("a\nb");
//! assert_eq!(text.get(), "ab");
//!
//! let size = control.intrinsic_size(&mut FixedAdvanceMeasurer::new(), ProposedSize::width(200.0));
//! assert_eq!(size.width, 200.0);
//! queue.run_pending();
//! ```
//!
//! [`StyledTextStore`]: decorated_text::StyledTextStore
//!
//! ## Features
//!
//! - `parley` (enabled by default): [`ParleyMeasurer`] and [`ParleyTextWidget`].
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

pub mod adapter;
mod binding;
mod config;
mod control;
mod focus;
mod measure;
mod platform;
mod scheduler;
mod sizing;
pub mod testing;
pub mod widget;

pub use crate::adapter::{
    new_adapter, AdapterProps, DesktopAdapter, EditingAdapter, KeyCommand, MobileAdapter,
    ScrollDisposition,
};
pub use crate::binding::TextBinding;
pub use crate::config::{Autocapitalization, KeyboardType, LayoutDirection, LineLimit};
pub use crate::control::{
    MountedTextView, PlaceholderOverlay, ResizingTextView, SizingLayer, TextViewLayers,
};
pub use crate::focus::{FocusDirection, FocusState, FocusTracker};
pub use crate::measure::{MeasureRequest, TextMeasurer, TextMetrics};
pub use crate::platform::WidgetFamily;
pub use crate::scheduler::UiQueue;
pub use crate::sizing::{ProposedSize, SizingNode, SizingParams, EMPTY_TEXT_SENTINEL};
pub use crate::widget::NativeTextWidget;

#[cfg(feature = "parley")]
pub use crate::measure::parley::{ParleyMeasurer, TextBrush};
#[cfg(feature = "parley")]
pub use crate::widget::ParleyTextWidget;

pub use decorated_text::{
    Attributes, CharRange, Color, DecorationMap, Font, FontSlant, StyleKey, StyleValue,
    StyledTextStore, TextDecoration,
};
pub use peniko::kurbo;
