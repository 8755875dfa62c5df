// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley backend: lowers painted attribute runs into Parley builder calls.

use std::fmt;
use std::ops::Range;

use decorated_text::{AttributeRuns, Attributes, Color, Font, FontSlant, StyleKey, StyleValue};
use parley::style::{FontStack, FontStyle, FontWeight, StyleProperty};
use parley::{FontContext, Layout, LayoutContext, RangedBuilder};

use super::{MeasureRequest, TextMeasurer, TextMetrics};

/// Brush carried through Parley layouts: the text color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextBrush {
    /// Fill color of the glyphs.
    pub color: Color,
}

impl Default for TextBrush {
    fn default() -> Self {
        Self {
            color: Color::from_rgba8(0, 0, 0, 255),
        }
    }
}

/// Builds a Parley [`Layout`] for `text` painted with `runs`.
///
/// Lines are not broken; callers do that with their own width.
pub(crate) fn build_layout(
    layout_cx: &mut LayoutContext<TextBrush>,
    font_cx: &mut FontContext,
    text: &str,
    runs: &AttributeRuns,
    default_font: &Font,
    scale: f32,
) -> Layout<TextBrush> {
    let mut builder = layout_cx.ranged_builder(font_cx, text, scale, true);
    push_font_defaults(&mut builder, default_font);
    builder.push_default(StyleProperty::Brush(TextBrush::default()));
    for run in runs {
        push_run(&mut builder, default_font, &run.attributes, run.range.clone());
    }
    builder.build(text)
}

fn push_font_defaults(builder: &mut RangedBuilder<'_, TextBrush>, font: &Font) {
    builder.push_default(StyleProperty::FontStack(FontStack::from(&*font.family)));
    builder.push_default(StyleProperty::FontSize(font.size));
    builder.push_default(StyleProperty::FontWeight(FontWeight::new(font.weight)));
    builder.push_default(StyleProperty::FontStyle(font_style(font.slant)));
}

fn push_run(
    builder: &mut RangedBuilder<'_, TextBrush>,
    default: &Font,
    attributes: &Attributes,
    range: Range<usize>,
) {
    macro_rules! push_if {
        ($cond:expr, $prop:expr) => {
            if $cond {
                builder.push($prop, range.clone());
            }
        };
    }

    if let Some(font) = attributes.font() {
        push_if!(
            font.family != default.family,
            StyleProperty::FontStack(FontStack::from(&*font.family))
        );
        push_if!(font.size != default.size, StyleProperty::FontSize(font.size));
        push_if!(
            font.weight != default.weight,
            StyleProperty::FontWeight(FontWeight::new(font.weight))
        );
        push_if!(
            font.slant != default.slant,
            StyleProperty::FontStyle(font_style(font.slant))
        );
    }
    if let Some(color) = attributes.foreground_color() {
        builder.push(StyleProperty::Brush(TextBrush { color }), range.clone());
    }
    push_if!(
        attributes.flag(&StyleKey::Underline),
        StyleProperty::Underline(true)
    );
    push_if!(
        attributes.flag(&StyleKey::Strikethrough),
        StyleProperty::Strikethrough(true)
    );
    if let Some(StyleValue::Number(kern)) = attributes.get(&StyleKey::Kern) {
        builder.push(StyleProperty::LetterSpacing(*kern), range);
    }
}

fn font_style(slant: FontSlant) -> FontStyle {
    match slant {
        FontSlant::Normal => FontStyle::Normal,
        FontSlant::Italic => FontStyle::Italic,
    }
}

/// Measures text with Parley.
pub struct ParleyMeasurer {
    font_cx: FontContext,
    layout_cx: LayoutContext<TextBrush>,
    scale: f32,
}

impl ParleyMeasurer {
    /// A measurer using the system font collection at scale 1.
    pub fn new() -> Self {
        Self::with_contexts(FontContext::new(), LayoutContext::new())
    }

    /// A measurer using existing contexts, e.g. a font context with
    /// registered fonts.
    pub fn with_contexts(font_cx: FontContext, layout_cx: LayoutContext<TextBrush>) -> Self {
        Self {
            font_cx,
            layout_cx,
            scale: 1.0,
        }
    }

    /// Sets the display scale.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// The font context, for registering fonts.
    pub fn font_context_mut(&mut self) -> &mut FontContext {
        &mut self.font_cx
    }
}

impl Default for ParleyMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParleyMeasurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParleyMeasurer")
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&mut self, request: &MeasureRequest<'_>) -> TextMetrics {
        let mut layout = build_layout(
            &mut self.layout_cx,
            &mut self.font_cx,
            request.text,
            request.runs,
            request.default_font,
            self.scale,
        );
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Parley lays out in f32."
        )]
        layout.break_all_lines(request.max_width.map(|width| width as f32));

        let line_count = layout.len();
        let visible_lines = request
            .line_limit
            .get()
            .map_or(line_count, |limit| limit.min(line_count));
        let (mut width, mut height) = (0_f32, 0_f32);
        for line in layout.lines().take(visible_lines) {
            let metrics = line.metrics();
            width = width.max(metrics.advance);
            height += metrics.line_height;
        }
        TextMetrics {
            size: peniko::kurbo::Size::new(f64::from(width), f64::from(height)),
            line_count,
            visible_lines,
        }
    }
}
