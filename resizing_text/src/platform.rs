// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-family defaults.
//!
//! The two supported widget families differ in how their native text view
//! pads its text, so the insets used by the editing surface and the padding
//! applied to the invisible measurement copy differ too. Keeping both in one
//! place keeps the two views in agreement.

use peniko::kurbo::Insets;

/// A family of native multi-line text widgets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WidgetFamily {
    /// Pointer-driven desktop toolkits: the widget is embedded in a scroll
    /// view, supports multiple selection ranges and keyboard focus traversal.
    Desktop,
    /// Touch toolkits with a software keyboard: single selection range, the
    /// widget grows with its content.
    Mobile,
}

impl WidgetFamily {
    /// Horizontal padding the desktop text container adds inside each line.
    pub const LINE_FRAGMENT_PADDING: f64 = 5.0;

    /// Extra bottom space reserved in the measurement copy for a trailing
    /// caret line the desktop widget would otherwise clip.
    pub const CARET_ALLOWANCE: f64 = 20.0;

    /// Smallest inset used on mobile; a zero inset can drop the last line of
    /// a non-editable view.
    pub const MIN_MOBILE_INSET: f64 = 1e-8;

    /// The family of the platform being compiled for.
    pub const fn native() -> Self {
        if cfg!(any(target_os = "ios", target_os = "android")) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Insets used when the caller sets none.
    pub fn default_insets(self, editable: bool) -> Insets {
        match self {
            Self::Desktop => {
                let horizontal = -5.0 + if editable { 9.0 } else { 0.0 };
                let vertical = if editable { 8.0 } else { 0.0 };
                Insets::uniform_xy(horizontal, vertical)
            }
            Self::Mobile => {
                let vertical = if editable { 8.0 } else { 0.0 };
                Insets::new(
                    Self::MIN_MOBILE_INSET,
                    Self::MIN_MOBILE_INSET + vertical,
                    Self::MIN_MOBILE_INSET,
                    Self::MIN_MOBILE_INSET + vertical,
                )
            }
        }
    }

    /// Padding placed around the measurement copy so it occupies the same
    /// space as the editing surface with `insets`.
    pub fn sizing_padding(self, insets: Insets, editable: bool, newlines: bool) -> Insets {
        match self {
            Self::Desktop => {
                let caret = if editable && newlines {
                    Self::CARET_ALLOWANCE
                } else {
                    0.0
                };
                Insets::new(
                    insets.x0 + Self::LINE_FRAGMENT_PADDING,
                    insets.y0,
                    insets.x1 + Self::LINE_FRAGMENT_PADDING,
                    insets.y1 + caret,
                )
            }
            // The mobile widget has no line fragment padding and the default
            // insets carry the vertical padding, so this only depends on
            // whether the view is editable.
            Self::Mobile => Insets::new(
                0.0,
                if editable { 8.0 } else { 2.0 },
                0.0,
                if editable { 8.0 } else { 3.0 },
            ),
        }
    }

    /// Horizontal padding inside each line of the native text container.
    pub fn line_fragment_padding(self) -> f64 {
        match self {
            Self::Desktop => Self::LINE_FRAGMENT_PADDING,
            Self::Mobile => 0.0,
        }
    }

    /// Whether the composite lays the measurement copy under the editor.
    ///
    /// Mobile widgets size themselves correctly when they span the full
    /// width, so the copy is skipped there.
    pub fn uses_sizing_node(self, greedy_width: bool) -> bool {
        match self {
            Self::Desktop => true,
            Self::Mobile => !greedy_width,
        }
    }

    /// Whether tab can move focus between controls.
    pub fn supports_focus_traversal(self) -> bool {
        matches!(self, Self::Desktop)
    }

    /// Whether the widget can hold more than one selection range.
    pub fn supports_multiple_selection(self) -> bool {
        matches!(self, Self::Desktop)
    }
}

#[cfg(test)]
mod tests {
    use super::WidgetFamily;
    use peniko::kurbo::Insets;

    #[test]
    fn desktop_default_insets() {
        assert_eq!(
            WidgetFamily::Desktop.default_insets(true),
            Insets::uniform_xy(4.0, 8.0)
        );
        assert_eq!(
            WidgetFamily::Desktop.default_insets(false),
            Insets::uniform_xy(-5.0, 0.0)
        );
    }

    #[test]
    fn desktop_sizing_padding_adds_fragment_padding_and_caret() {
        let insets = WidgetFamily::Desktop.default_insets(true);
        let padding = WidgetFamily::Desktop.sizing_padding(insets, true, true);
        assert_eq!(padding, Insets::new(9.0, 8.0, 9.0, 28.0));

        let single_line = WidgetFamily::Desktop.sizing_padding(insets, true, false);
        assert_eq!(single_line.y1, 8.0);
    }

    #[test]
    fn mobile_insets_are_never_zero() {
        let insets = WidgetFamily::Mobile.default_insets(false);
        assert!(insets.x0 > 0.0 && insets.y0 > 0.0 && insets.x1 > 0.0 && insets.y1 > 0.0);
        let padding = WidgetFamily::Mobile.sizing_padding(insets, false, true);
        assert_eq!((padding.y0, padding.y1), (2.0, 3.0));
    }

    #[test]
    fn mobile_skips_sizing_node_for_greedy_width() {
        assert!(!WidgetFamily::Mobile.uses_sizing_node(true));
        assert!(WidgetFamily::Mobile.uses_sizing_node(false));
        assert!(WidgetFamily::Desktop.uses_sizing_node(true));
    }
}
