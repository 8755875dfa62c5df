// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style attribute vocabulary.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::sync::Arc;

use peniko::Color;

/// Slant of a [`Font`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontSlant {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Italic glyphs.
    Italic,
}

/// A concrete font request: family, size, weight and slant.
///
/// This only describes the font. Matching it to a font file and reading its
/// metrics is left to the layout engine the text is measured with.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Family name, or a generic family such as `system-ui`.
    pub family: Arc<str>,
    /// Size in logical pixels.
    pub size: f32,
    /// Weight on the usual 1-1000 scale, 400 is regular.
    pub weight: f32,
    /// Slant.
    pub slant: FontSlant,
}

impl Font {
    /// Regular weight.
    pub const REGULAR: f32 = 400.0;
    /// Bold weight.
    pub const BOLD: f32 = 700.0;

    /// A regular upright font of `family` at `size`.
    pub fn new(family: impl Into<Arc<str>>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: Self::REGULAR,
            slant: FontSlant::Normal,
        }
    }

    /// The platform's body text font.
    pub fn body() -> Self {
        Self::new("system-ui", 13.0)
    }

    /// Returns this font with a different size.
    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Returns this font with a different weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Returns the bold variant of this font.
    #[must_use]
    pub fn bold(self) -> Self {
        self.with_weight(Self::BOLD)
    }

    /// Returns the italic variant of this font.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.slant = FontSlant::Italic;
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::body()
    }
}

/// Key of a style attribute.
///
/// The set is open: [`StyleKey::Custom`] carries attributes that this crate
/// does not interpret but still stores, compares and reports.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleKey {
    /// The [`Font`] used to draw the text.
    Font,
    /// Text color.
    ForegroundColor,
    /// Highlight color behind the text.
    BackgroundColor,
    /// Underline on or off.
    Underline,
    /// Strikethrough on or off.
    Strikethrough,
    /// Extra space between characters, in logical pixels.
    Kern,
    /// Link target.
    Link,
    /// Any other attribute, by name.
    Custom(Arc<str>),
}

/// Value of a style attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    /// A font.
    Font(Font),
    /// A color.
    Color(Color),
    /// A flag.
    Bool(bool),
    /// A number.
    Number(f32),
    /// A string, e.g. a URL.
    Text(Arc<str>),
}

impl From<Font> for StyleValue {
    fn from(value: Font) -> Self {
        Self::Font(value)
    }
}

impl From<Color> for StyleValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

/// A set of style attributes, at most one value per key.
///
/// Equality is structural: two sets are equal when they hold equal values for
/// the same keys, regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes(BTreeMap<StyleKey, StyleValue>);

impl Attributes {
    /// An empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` for `key`, returning the value it replaced.
    pub fn insert(&mut self, key: StyleKey, value: impl Into<StyleValue>) -> Option<StyleValue> {
        self.0.insert(key, value.into())
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: StyleKey, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// The value for `key`, if set.
    pub fn get(&self, key: &StyleKey) -> Option<&StyleValue> {
        self.0.get(key)
    }

    /// Removes the value for `key`.
    pub fn remove(&mut self, key: &StyleKey) -> Option<StyleValue> {
        self.0.remove(key)
    }

    /// Copies every attribute of `other` into this set. Keys present in both
    /// take `other`'s value.
    pub fn extend(&mut self, other: &Self) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Removes every attribute.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The number of attributes in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the attributes in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, StyleKey, StyleValue> {
        self.0.iter()
    }

    /// The font attribute, if set.
    pub fn font(&self) -> Option<&Font> {
        match self.0.get(&StyleKey::Font) {
            Some(StyleValue::Font(font)) => Some(font),
            _ => None,
        }
    }

    /// The foreground color attribute, if set.
    pub fn foreground_color(&self) -> Option<Color> {
        match self.0.get(&StyleKey::ForegroundColor) {
            Some(StyleValue::Color(color)) => Some(*color),
            _ => None,
        }
    }

    /// Whether a boolean attribute is set and true.
    pub fn flag(&self, key: &StyleKey) -> bool {
        matches!(self.0.get(key), Some(StyleValue::Bool(true)))
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a StyleKey, &'a StyleValue);
    type IntoIter = btree_map::Iter<'a, StyleKey, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(StyleKey, StyleValue)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (StyleKey, StyleValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
