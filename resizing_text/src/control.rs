// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composite control: configuration value, equality, and the mounted
//! overlay of editor and measurement node.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use decorated_text::{Color, DecorationMap, Font, TextDecoration};
use peniko::kurbo::{Insets, Point, Rect, Size};

use crate::adapter::{new_adapter, AdapterProps, EditingAdapter, FocusCallback, NewlineCallback};
use crate::sizing::{ProposedSize, SizingNode, SizingParams};
use crate::widget::NativeTextWidget;
use crate::{
    Autocapitalization, KeyboardType, LayoutDirection, LineLimit, TextBinding, TextMeasurer,
    UiQueue, WidgetFamily,
};

/// Opacity of the mobile placeholder relative to the foreground color.
const PLACEHOLDER_ALPHA: f32 = 0.2;

/// Configuration of an auto-resizing rich text input.
///
/// A value of this type describes one render pass. Two values compare equal
/// when every observable property matches, including the current text of the
/// binding and the focus state; callbacks are not compared.
///
/// ```
/// use resizing_text::{Font, LineLimit, ResizingTextView, TextBinding};
///
/// let text = TextBinding::new("hello");
/// let view = ResizingTextView::new(text.clone())
///     .placeholder("Say something")
///     .font(Font::new("serif", 15.0))
///     .line_limit(LineLimit::new(3))
///     .can_have_newlines(false);
/// assert_eq!(view.text(), "hello");
/// assert_eq!(view, view.clone().on_insert_newline(|| true));
/// ```
#[derive(Clone)]
pub struct ResizingTextView {
    binding: TextBinding,
    decorations: Vec<TextDecoration>,
    placeholder: Option<String>,
    is_editable: bool,
    is_scrollable: bool,
    is_selectable: bool,
    line_limit: LineLimit,
    can_have_newlines: bool,
    has_greedy_width: bool,
    font: Font,
    foreground_color: Option<Color>,
    insets: Option<Insets>,
    focus_by_tab: bool,
    autocapitalization: Autocapitalization,
    keyboard_type: KeyboardType,
    layout_direction: LayoutDirection,
    is_focused: bool,
    on_insert_newline: Option<NewlineCallback>,
    on_focus_changed: Option<FocusCallback>,
}

impl ResizingTextView {
    /// An editable, unscrolled, greedy-width control bound to `binding`.
    pub fn new(binding: TextBinding) -> Self {
        Self {
            binding,
            decorations: Vec::new(),
            placeholder: None,
            is_editable: true,
            is_scrollable: false,
            is_selectable: true,
            line_limit: LineLimit::Unbounded,
            can_have_newlines: true,
            has_greedy_width: true,
            font: Font::body(),
            foreground_color: None,
            insets: None,
            focus_by_tab: true,
            autocapitalization: Autocapitalization::default(),
            keyboard_type: KeyboardType::default(),
            layout_direction: LayoutDirection::default(),
            is_focused: false,
            on_insert_newline: None,
            on_focus_changed: None,
        }
    }

    /// Range style overrides, applied in order after the defaults.
    pub fn decorations(mut self, decorations: Vec<TextDecoration>) -> Self {
        self.decorations = decorations;
        self
    }

    /// Appends one decoration.
    pub fn decoration(mut self, decoration: TextDecoration) -> Self {
        self.decorations.push(decoration);
        self
    }

    /// Text shown while the content is empty.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Whether typing is allowed. Non-editable controls draw no chrome.
    pub fn editable(mut self, editable: bool) -> Self {
        self.is_editable = editable;
        self
    }

    /// Whether the control scrolls its own content instead of growing.
    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.is_scrollable = scrollable;
        self
    }

    /// Whether a non-editable control allows selection.
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.is_selectable = selectable;
        self
    }

    /// Caps displayed lines, truncating at the tail.
    pub fn line_limit(mut self, limit: impl Into<LineLimit>) -> Self {
        self.line_limit = limit.into();
        self
    }

    /// Whether newlines can be entered.
    pub fn can_have_newlines(mut self, allowed: bool) -> Self {
        self.can_have_newlines = allowed;
        self
    }

    /// Fill the offered width (`true`) or fit the text.
    pub fn greedy_width(mut self, greedy: bool) -> Self {
        self.has_greedy_width = greedy;
        self
    }

    /// Default font.
    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Default text color.
    pub fn foreground_color(mut self, color: Color) -> Self {
        self.foreground_color = Some(color);
        self
    }

    /// Text container insets; the family default is used when unset.
    pub fn insets(mut self, insets: Insets) -> Self {
        self.insets = Some(insets);
        self
    }

    /// Whether tab moves focus. Ignored where there is no focus order.
    pub fn focus_by_tab(mut self, enabled: bool) -> Self {
        self.focus_by_tab = enabled;
        self
    }

    /// Keyboard capitalization. Ignored on desktop.
    pub fn autocapitalization(mut self, autocapitalization: Autocapitalization) -> Self {
        self.autocapitalization = autocapitalization;
        self
    }

    /// Keyboard layout. Ignored on desktop.
    pub fn keyboard_type(mut self, keyboard_type: KeyboardType) -> Self {
        self.keyboard_type = keyboard_type;
        self
    }

    /// Writing direction of the surrounding layout.
    pub fn layout_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout_direction = direction;
        self
    }

    /// Intercepts return; the callback returns `true` to suppress the newline.
    pub fn on_insert_newline(mut self, callback: impl Fn() -> bool + 'static) -> Self {
        self.on_insert_newline = Some(Rc::new(callback));
        self
    }

    /// Called once per focus transition.
    pub fn on_focus_changed(mut self, callback: impl Fn(bool) + 'static) -> Self {
        self.on_focus_changed = Some(Rc::new(callback));
        self
    }

    /// Sets the focus state this value describes.
    ///
    /// A mounted control replaces this with the state it tracks.
    pub fn focused(mut self, focused: bool) -> Self {
        self.is_focused = focused;
        self
    }

    /// The text binding.
    pub fn binding(&self) -> &TextBinding {
        &self.binding
    }

    /// The current bound text.
    pub fn text(&self) -> String {
        self.binding.get()
    }

    /// Whether the control is focused.
    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// The insets in effect for `family`.
    pub fn effective_insets(&self, family: WidgetFamily) -> Insets {
        self.insets
            .unwrap_or_else(|| family.default_insets(self.is_editable))
    }

    /// The default font and color plus decorations.
    pub fn decoration_map(&self) -> DecorationMap {
        let map = DecorationMap::new()
            .with_default_font(self.font.clone())
            .with_decorations(self.decorations.clone());
        match self.foreground_color {
            Some(color) => map.with_default_foreground_color(color),
            None => map,
        }
    }

    fn fills_height(&self) -> bool {
        self.is_editable && self.is_scrollable
    }

    fn adapter_props(
        &self,
        family: WidgetFamily,
        on_focus_changed: FocusCallback,
        on_insert_newline: NewlineCallback,
    ) -> AdapterProps {
        AdapterProps {
            decoration_map: self.decoration_map(),
            placeholder: self.placeholder.clone(),
            is_editable: self.is_editable,
            is_scrollable: self.is_scrollable,
            is_selectable: self.is_selectable,
            line_limit: self.line_limit,
            can_have_newlines: self.can_have_newlines,
            insets: self.effective_insets(family),
            focus_by_tab: self.focus_by_tab && family.supports_focus_traversal(),
            autocapitalization: self.autocapitalization,
            keyboard_type: self.keyboard_type,
            on_focus_changed: Some(on_focus_changed),
            on_insert_newline: Some(on_insert_newline),
        }
    }

    fn sizing_params(&self, family: WidgetFamily) -> SizingParams {
        SizingParams {
            text: self.text(),
            decoration_map: self.decoration_map(),
            line_limit: self.line_limit,
            padding: family.sizing_padding(
                self.effective_insets(family),
                self.is_editable,
                self.can_have_newlines,
            ),
            greedy_width: self.has_greedy_width,
            fill_height: self.fills_height(),
        }
    }
}

impl PartialEq for ResizingTextView {
    fn eq(&self, other: &Self) -> bool {
        self.binding.with(|a| other.binding.with(|b| a == b))
            && self.decorations == other.decorations
            && self.placeholder == other.placeholder
            && self.is_editable == other.is_editable
            && self.is_scrollable == other.is_scrollable
            && self.is_selectable == other.is_selectable
            && self.line_limit == other.line_limit
            && self.can_have_newlines == other.can_have_newlines
            && self.has_greedy_width == other.has_greedy_width
            && self.font == other.font
            && self.foreground_color == other.foreground_color
            && self.insets == other.insets
            && self.focus_by_tab == other.focus_by_tab
            && self.autocapitalization == other.autocapitalization
            && self.keyboard_type == other.keyboard_type
            && self.layout_direction == other.layout_direction
            && self.is_focused == other.is_focused
    }
}

impl fmt::Debug for ResizingTextView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizingTextView")
            .field("binding", &self.binding)
            .field("decorations", &self.decorations)
            .field("placeholder", &self.placeholder)
            .field("is_editable", &self.is_editable)
            .field("is_scrollable", &self.is_scrollable)
            .field("is_selectable", &self.is_selectable)
            .field("line_limit", &self.line_limit)
            .field("can_have_newlines", &self.can_have_newlines)
            .field("has_greedy_width", &self.has_greedy_width)
            .field("font", &self.font)
            .field("foreground_color", &self.foreground_color)
            .field("insets", &self.insets)
            .field("focus_by_tab", &self.focus_by_tab)
            .field("autocapitalization", &self.autocapitalization)
            .field("keyboard_type", &self.keyboard_type)
            .field("layout_direction", &self.layout_direction)
            .field("is_focused", &self.is_focused)
            .finish_non_exhaustive()
    }
}

/// The invisible measurement layer beneath the editor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SizingLayer {
    /// Frame within the control.
    pub frame: Rect,
    /// Always [`SizingNode::OPACITY`].
    pub opacity: f32,
    /// Always [`SizingNode::LAYOUT_PRIORITY`].
    pub layout_priority: i32,
    /// Always `false`.
    pub hit_testable: bool,
}

/// Placeholder drawn above the editor on families whose widget has none.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderOverlay {
    /// The placeholder text.
    pub text: String,
    /// The control's font.
    pub font: Font,
    /// The foreground color, faded.
    pub color: Color,
    /// Padding matching the editor's text position.
    pub insets: Insets,
    /// Always a single line.
    pub line_limit: LineLimit,
    /// Always `false`; touches reach the editor below.
    pub hit_testable: bool,
}

/// The layers of a laid out control, bottom to top.
#[derive(Clone, Debug, PartialEq)]
pub struct TextViewLayers {
    /// Size of the control.
    pub size: Size,
    /// Measurement layer, absent where the widget sizes itself.
    pub sizing: Option<SizingLayer>,
    /// Frame of the editing widget.
    pub editor: Rect,
    /// Placeholder overlay, present only while the text is empty.
    pub placeholder: Option<PlaceholderOverlay>,
}

/// State shared between a mounted control and the callbacks it hands its
/// adapter.
///
/// Callbacks are not part of configuration equality, so skipped render
/// passes still replace them here.
#[derive(Default)]
struct MountState {
    focused: Cell<bool>,
    on_focus_changed: RefCell<Option<FocusCallback>>,
    on_insert_newline: RefCell<Option<NewlineCallback>>,
}

impl MountState {
    fn set_callbacks(&self, view: &ResizingTextView) {
        *self.on_focus_changed.borrow_mut() = view.on_focus_changed.clone();
        *self.on_insert_newline.borrow_mut() = view.on_insert_newline.clone();
    }

    fn focus_changed(state: &Weak<Self>) -> FocusCallback {
        let state = state.clone();
        Rc::new(move |focused| {
            let Some(state) = state.upgrade() else {
                return;
            };
            state.focused.set(focused);
            let callback = state.on_focus_changed.borrow().clone();
            if let Some(callback) = callback {
                callback(focused);
            }
        })
    }

    fn insert_newline(state: &Weak<Self>) -> NewlineCallback {
        let state = state.clone();
        Rc::new(move || {
            let Some(state) = state.upgrade() else {
                return false;
            };
            let callback = state.on_insert_newline.borrow().clone();
            callback.is_some_and(|callback| callback())
        })
    }
}

/// A [`ResizingTextView`] bound to a live widget.
pub struct MountedTextView<W: NativeTextWidget + 'static> {
    family: WidgetFamily,
    adapter: Box<dyn EditingAdapter<Widget = W>>,
    sizing: Option<SizingNode>,
    view: ResizingTextView,
    synced_text: String,
    state: Rc<MountState>,
}

impl<W: NativeTextWidget + 'static> MountedTextView<W> {
    /// Mounts `view` on `widget`, using the adapter for `family`.
    pub fn new(family: WidgetFamily, view: ResizingTextView, widget: W, queue: UiQueue) -> Self {
        let adapter = new_adapter(family, widget, view.binding.clone(), queue);
        let mut mounted = Self {
            family,
            adapter,
            sizing: None,
            view: view.clone(),
            synced_text: String::new(),
            state: Rc::new(MountState::default()),
        };
        mounted.state.set_callbacks(&view);
        mounted.apply(view);
        mounted
    }

    /// Applies a new render pass. Returns `false` if nothing observable
    /// changed and the pass was skipped.
    ///
    /// Callbacks are replaced either way.
    pub fn update(&mut self, view: ResizingTextView) -> bool {
        self.state.set_callbacks(&view);
        let view = view.focused(self.state.focused.get());
        let unchanged = view == self.view && view.binding.with(|text| text == self.synced_text);
        if unchanged {
            log::trace!("skipping unchanged render pass");
            return false;
        }
        self.apply(view);
        true
    }

    fn apply(&mut self, view: ResizingTextView) {
        let view = view.focused(self.state.focused.get());
        let state = Rc::downgrade(&self.state);
        self.adapter.update(view.adapter_props(
            self.family,
            MountState::focus_changed(&state),
            MountState::insert_newline(&state),
        ));

        if self.family.uses_sizing_node(view.has_greedy_width) {
            let params = view.sizing_params(self.family);
            match &mut self.sizing {
                Some(node) => node.update(params),
                None => self.sizing = Some(SizingNode::new(params)),
            }
        } else {
            self.sizing = None;
        }
        self.synced_text = view.text();
        self.view = view;
    }

    /// The control's size within `proposal`.
    pub fn intrinsic_size(&mut self, measurer: &mut dyn TextMeasurer, proposal: ProposedSize) -> Size {
        self.refresh_sizing_text();
        if let Some(node) = &self.sizing {
            return node.measure(measurer, proposal);
        }
        // Greedy mobile widgets grow with their own content.
        let content = self.adapter.widget().content_size();
        let width = proposal.width.unwrap_or(content.width);
        let height = match proposal.height {
            Some(offered) if self.view.fills_height() => offered,
            _ => content.height,
        };
        Size::new(width, height)
    }

    /// Lays out the control within `proposal`.
    pub fn layers(&mut self, measurer: &mut dyn TextMeasurer, proposal: ProposedSize) -> TextViewLayers {
        let size = self.intrinsic_size(measurer, proposal);
        let frame = Rect::from_origin_size(Point::ZERO, size);
        let sizing = self.sizing.as_ref().map(|node| SizingLayer {
            frame,
            opacity: SizingNode::OPACITY,
            layout_priority: SizingNode::LAYOUT_PRIORITY,
            hit_testable: node.is_hit_testable(),
        });
        TextViewLayers {
            size,
            sizing,
            editor: frame,
            placeholder: self.placeholder_overlay(),
        }
    }

    fn placeholder_overlay(&self) -> Option<PlaceholderOverlay> {
        if self.family != WidgetFamily::Mobile {
            return None;
        }
        let text = self.view.placeholder.clone()?;
        if !self.adapter.widget().text().is_empty() {
            return None;
        }
        let insets = self.view.effective_insets(self.family);
        let insets = match self.view.layout_direction {
            LayoutDirection::LeftToRight => insets,
            LayoutDirection::RightToLeft => Insets::new(insets.x1, insets.y0, insets.x0, insets.y1),
        };
        let color = self.view.foreground_color.unwrap_or(Color::BLACK);
        Some(PlaceholderOverlay {
            text,
            font: self.view.font.clone(),
            color: color.with_alpha(PLACEHOLDER_ALPHA),
            insets,
            line_limit: LineLimit::new(1),
            hit_testable: false,
        })
    }

    fn refresh_sizing_text(&mut self) {
        let Some(node) = &mut self.sizing else {
            return;
        };
        let text = self.view.text();
        if node.params().text != text {
            node.update(SizingParams {
                text,
                ..node.params().clone()
            });
        }
    }

    /// Reports that the widget gained focus.
    pub fn focus(&mut self) {
        self.adapter.focus_changed(true);
    }

    /// Reports that the widget lost focus.
    pub fn blur(&mut self) {
        self.adapter.focus_changed(false);
    }

    /// Whether the control is focused.
    pub fn is_focused(&self) -> bool {
        self.state.focused.get()
    }

    /// The widget family in use.
    pub fn family(&self) -> WidgetFamily {
        self.family
    }

    /// The last applied configuration.
    pub fn view(&self) -> &ResizingTextView {
        &self.view
    }

    /// The measurement node, where used.
    pub fn sizing_node(&self) -> Option<&SizingNode> {
        self.sizing.as_ref()
    }

    /// The editing adapter, for forwarding widget events.
    pub fn adapter(&self) -> &dyn EditingAdapter<Widget = W> {
        &*self.adapter
    }

    /// The editing adapter, for forwarding widget events.
    pub fn adapter_mut(&mut self) -> &mut dyn EditingAdapter<Widget = W> {
        &mut *self.adapter
    }
}

impl<W: NativeTextWidget + 'static> fmt::Debug for MountedTextView<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedTextView")
            .field("family", &self.family)
            .field("view", &self.view)
            .field("sizing", &self.sizing)
            .field("focused", &self.state.focused.get())
            .finish_non_exhaustive()
    }
}
