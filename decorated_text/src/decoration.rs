// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use peniko::Color;

use crate::{Attributes, CharRange, Font, TextRange, TextStorage};

/// Style attributes applied over a range of characters.
#[derive(Clone, Debug, PartialEq)]
pub struct TextDecoration {
    /// The characters the attributes apply to.
    pub range: CharRange,
    /// The attributes to apply.
    pub attributes: Attributes,
}

impl TextDecoration {
    /// Creates a decoration of `range` with `attributes`.
    pub fn new(range: impl Into<CharRange>, attributes: Attributes) -> Self {
        Self {
            range: range.into(),
            attributes,
        }
    }

    /// The byte range this decoration covers in `text`, if it still fits.
    ///
    /// Empty ranges are treated as not applicable.
    pub fn resolve<T: TextStorage + ?Sized>(&self, text: &T) -> Option<TextRange> {
        match self.range.resolve(text) {
            Ok(range) if !range.is_empty() => Some(range),
            Ok(_) => None,
            Err(err) => {
                log::trace!("skipping stale decoration: {err}");
                None
            }
        }
    }
}

/// The complete styling request for a text: defaults plus ordered decorations.
///
/// Defaults cover every character. Decorations apply on top of them in list
/// order, so where two decorations overlap and set the same key, the later
/// one wins.
///
/// The map is a value: it is replaced as a whole and compared structurally.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecorationMap {
    /// Font for characters no decoration sets a font for.
    pub default_font: Option<Font>,
    /// Color for characters no decoration sets a color for.
    pub default_foreground_color: Option<Color>,
    /// Range overrides, in application order.
    pub decorations: Vec<TextDecoration>,
}

impl DecorationMap {
    /// A map with no defaults and no decorations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this map with `font` as the default font.
    #[must_use]
    pub fn with_default_font(mut self, font: Font) -> Self {
        self.default_font = Some(font);
        self
    }

    /// Returns this map with `color` as the default foreground color.
    #[must_use]
    pub fn with_default_foreground_color(mut self, color: Color) -> Self {
        self.default_foreground_color = Some(color);
        self
    }

    /// Returns this map with `decorations` replacing the current ones.
    #[must_use]
    pub fn with_decorations(mut self, decorations: Vec<TextDecoration>) -> Self {
        self.decorations = decorations;
        self
    }

    /// Appends a decoration, after all existing ones.
    pub fn push(&mut self, decoration: TextDecoration) {
        self.decorations.push(decoration);
    }

    /// The attributes every character starts from before decorations apply.
    pub fn base_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        if let Some(font) = &self.default_font {
            attrs.insert(crate::StyleKey::Font, font.clone());
        }
        if let Some(color) = self.default_foreground_color {
            attrs.insert(crate::StyleKey::ForegroundColor, color);
        }
        attrs
    }

    /// Whether the defaults of `self` and `other` differ.
    pub(crate) fn defaults_differ(&self, other: &Self) -> bool {
        self.default_font != other.default_font
            || self.default_foreground_color != other.default_foreground_color
    }
}

#[cfg(test)]
mod tests {
    use super::{DecorationMap, TextDecoration};
    use crate::{Attributes, CharRange, StyleKey};

    #[test]
    fn stale_decoration_does_not_resolve() {
        let deco = TextDecoration::new(2..9, Attributes::new().with(StyleKey::Underline, true));
        assert!(deco.resolve("hello").is_none());
        assert_eq!(deco.resolve("hello world").map(|r| r.as_range()), Some(2..9));
    }

    #[test]
    fn empty_decoration_does_not_resolve() {
        let deco = TextDecoration::new(CharRange::new(3, 3), Attributes::new());
        assert!(deco.resolve("hello").is_none());
    }

    #[test]
    fn structural_equality() {
        let attrs = Attributes::new().with(StyleKey::Underline, true);
        let a = DecorationMap::new().with_decorations(alloc::vec![TextDecoration::new(
            0..2,
            attrs.clone()
        )]);
        let b = DecorationMap::new().with_decorations(alloc::vec![TextDecoration::new(0..2, attrs)]);
        assert_eq!(a, b);
        assert_ne!(a, DecorationMap::new());
    }
}
