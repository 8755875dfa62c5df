// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement.
//!
//! Measuring text needs font metrics and shaping, which belong to a text
//! layout engine. [`TextMeasurer`] is the seam: the sizing node hands it
//! painted runs and a width constraint and gets back the size of the laid
//! out text.

#[cfg(feature = "parley")]
pub(crate) mod parley;

use decorated_text::{AttributeRuns, Font};
use peniko::kurbo::Size;

use crate::LineLimit;

/// What to measure.
#[derive(Clone, Copy, Debug)]
pub struct MeasureRequest<'a> {
    /// The text. Never empty when issued by the sizing node.
    pub text: &'a str,
    /// Painted attributes of `text`.
    pub runs: &'a AttributeRuns,
    /// Font for any byte whose run sets none.
    pub default_font: &'a Font,
    /// Maximum line width, or `None` to lay out without wrapping.
    pub max_width: Option<f64>,
    /// Maximum number of lines to keep.
    pub line_limit: LineLimit,
}

/// The measured extent of laid out text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Width of the widest visible line and total height of the visible lines.
    pub size: Size,
    /// Lines the text breaks into, ignoring the line limit.
    pub line_count: usize,
    /// Lines kept after applying the line limit.
    pub visible_lines: usize,
}

impl TextMetrics {
    /// Returns `true` if the line limit hid some lines.
    pub fn is_truncated(&self) -> bool {
        self.visible_lines < self.line_count
    }
}

/// Lays out text and reports its size.
pub trait TextMeasurer {
    /// Measures `request`.
    fn measure(&mut self, request: &MeasureRequest<'_>) -> TextMetrics;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &mut M {
    fn measure(&mut self, request: &MeasureRequest<'_>) -> TextMetrics {
        (**self).measure(request)
    }
}
