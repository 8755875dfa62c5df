// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The invisible measurement copy.
//!
//! The editing widget cannot be trusted to report its own height: inside a
//! scroll container its height is the cause of the container's layout rather
//! than its effect. Instead, an invisible copy of the text is laid out with
//! the same font, padding and line rules, and its size becomes the control's
//! size. The editing widget is then placed over it with the same frame.

use decorated_text::{AttributeRuns, DecorationMap, StyledTextStore};
use peniko::kurbo::{Insets, Size};

use crate::{LineLimit, MeasureRequest, TextMeasurer, TextMetrics};

/// Text measured in place of empty text, so an empty control keeps the height
/// of one line.
pub const EMPTY_TEXT_SENTINEL: &str = " ";

/// The space a parent offers a child; `None` means unconstrained.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ProposedSize {
    /// Offered width.
    pub width: Option<f64>,
    /// Offered height.
    pub height: Option<f64>,
}

impl ProposedSize {
    /// No constraint in either direction.
    pub const UNSPECIFIED: Self = Self {
        width: None,
        height: None,
    };

    /// A proposal of exactly `width` by `height`.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// A proposal constraining only the width.
    pub fn width(width: f64) -> Self {
        Self {
            width: Some(width),
            height: None,
        }
    }
}

/// Inputs of the measurement copy.
#[derive(Clone, Debug, PartialEq)]
pub struct SizingParams {
    /// Current text; empty text is measured as [`EMPTY_TEXT_SENTINEL`].
    pub text: String,
    /// Default font, color and decorations, as painted on the editor.
    pub decoration_map: DecorationMap,
    /// Line cap.
    pub line_limit: LineLimit,
    /// Padding matching the editor's insets, see
    /// [`WidgetFamily::sizing_padding`](crate::WidgetFamily::sizing_padding).
    pub padding: Insets,
    /// Fill the offered width instead of fitting the text.
    pub greedy_width: bool,
    /// Fill the offered height instead of fitting the text.
    pub fill_height: bool,
}

/// A zero-opacity, non-interactive layout node mirroring the editor's text.
#[derive(Clone, Debug)]
pub struct SizingNode {
    params: SizingParams,
    store: StyledTextStore,
}

impl SizingNode {
    /// Layout priority of the node; above siblings so it is never compressed.
    pub const LAYOUT_PRIORITY: i32 = 1;
    /// The node is never drawn.
    pub const OPACITY: f32 = 0.0;

    /// Creates a node for `params`.
    pub fn new(params: SizingParams) -> Self {
        let mut store = StyledTextStore::with_text(measured_text(&params.text));
        store.set_decoration_map(params.decoration_map.clone());
        store.reapply_if_needed();
        Self { params, store }
    }

    /// Replaces the inputs, repainting only what changed.
    pub fn update(&mut self, params: SizingParams) {
        if params == self.params {
            return;
        }
        self.store.set_text(measured_text(&params.text));
        self.store.set_decoration_map(params.decoration_map.clone());
        self.store.reapply_if_needed();
        self.params = params;
    }

    /// The current inputs.
    pub fn params(&self) -> &SizingParams {
        &self.params
    }

    /// The text actually measured.
    pub fn measured_text(&self) -> &str {
        self.store.text()
    }

    /// The painted runs of the measured text.
    pub fn runs(&self) -> &AttributeRuns {
        self.store.runs()
    }

    /// The node never takes part in hit testing.
    pub fn is_hit_testable(&self) -> bool {
        false
    }

    /// Lays out the text within `proposal` and returns the node's size.
    pub fn measure(&self, measurer: &mut dyn TextMeasurer, proposal: ProposedSize) -> Size {
        let padding = self.params.padding;
        let metrics = self.metrics(measurer, proposal);
        let fitted = Size::new(
            metrics.size.width + padding.x_value(),
            metrics.size.height + padding.y_value(),
        );
        let width = match proposal.width {
            Some(offered) if self.params.greedy_width => offered,
            Some(offered) => fitted.width.min(offered),
            None => fitted.width,
        };
        let height = match proposal.height {
            Some(offered) if self.params.fill_height => offered,
            _ => fitted.height,
        };
        Size::new(width.max(0.0), height.max(0.0))
    }

    /// Text metrics of the measured copy within `proposal`, without padding.
    pub fn metrics(&self, measurer: &mut dyn TextMeasurer, proposal: ProposedSize) -> TextMetrics {
        let max_width = proposal
            .width
            .map(|width| (width - self.params.padding.x_value()).max(0.0));
        let default_font = self.params.decoration_map.default_font.clone().unwrap_or_default();
        measurer.measure(&MeasureRequest {
            text: self.store.text(),
            runs: self.store.runs(),
            default_font: &default_font,
            max_width,
            line_limit: self.params.line_limit,
        })
    }
}

fn measured_text(text: &str) -> &str {
    if text.is_empty() {
        EMPTY_TEXT_SENTINEL
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::{ProposedSize, SizingNode, SizingParams};
    use crate::testing::FixedAdvanceMeasurer;
    use crate::LineLimit;
    use decorated_text::{DecorationMap, Font};
    use peniko::kurbo::Insets;

    fn params(text: &str) -> SizingParams {
        SizingParams {
            text: text.into(),
            decoration_map: DecorationMap::new().with_default_font(Font::new("mono", 10.0)),
            line_limit: LineLimit::Unbounded,
            padding: Insets::new(1.0, 2.0, 3.0, 4.0),
            greedy_width: false,
            fill_height: false,
        }
    }

    #[test]
    fn fit_content_adds_padding() {
        let node = SizingNode::new(params("abcd"));
        let mut measurer = FixedAdvanceMeasurer::new();
        // 4 chars at 5 px, one 12 px line.
        let size = node.measure(&mut measurer, ProposedSize::UNSPECIFIED);
        assert_eq!((size.width, size.height), (24.0, 18.0));
    }

    #[test]
    fn greedy_width_takes_offered_width() {
        let node = SizingNode::new(SizingParams {
            greedy_width: true,
            ..params("abcd")
        });
        let mut measurer = FixedAdvanceMeasurer::new();
        let size = node.measure(&mut measurer, ProposedSize::width(300.0));
        assert_eq!(size.width, 300.0);
    }

    #[test]
    fn fill_height_takes_offered_height() {
        let node = SizingNode::new(SizingParams {
            fill_height: true,
            ..params("abcd")
        });
        let mut measurer = FixedAdvanceMeasurer::new();
        let size = node.measure(&mut measurer, ProposedSize::new(100.0, 250.0));
        assert_eq!(size.height, 250.0);
    }

    #[test]
    fn empty_text_measures_sentinel() {
        let mut node = SizingNode::new(params(""));
        assert_eq!(node.measured_text(), " ");
        node.update(params("x"));
        assert_eq!(node.measured_text(), "x");
        node.update(params(""));
        assert_eq!(node.measured_text(), " ");
    }
}
