// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intrinsic size of the control, as decided by the measurement node.

use decorated_text::DecorationMap;
use peniko::kurbo::{Insets, Size};
use resizing_text::testing::FixedAdvanceMeasurer;
use resizing_text::{
    LineLimit, ParleyMeasurer, ProposedSize, SizingNode, SizingParams, TextBinding, WidgetFamily,
};

use crate::test_name;
use crate::util::TestEnv;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod";

#[test]
fn sizing_empty_text_floor() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let empty = TextBinding::new("");
    let space = TextBinding::new(" ");
    let mut empty_control = env.mount(env.view(&empty).greedy_width(false));
    let mut space_control = env.mount(env.view(&space).greedy_width(false));

    let (_, empty_height) = env.size(&mut empty_control, ProposedSize::width(200.0));
    let (_, space_height) = env.size(&mut space_control, ProposedSize::width(200.0));
    assert_eq!(empty_height, space_height);
    // One 12 px line, 8 px insets, caret allowance.
    assert_eq!(empty_height, 48.0);
}

#[test]
fn sizing_empty_text_floor_parley() {
    let params = |text: &str| SizingParams {
        text: text.into(),
        decoration_map: DecorationMap::new().with_default_font(TestEnv::font()),
        line_limit: LineLimit::Unbounded,
        padding: Insets::ZERO,
        greedy_width: false,
        fill_height: false,
    };
    let mut measurer = ParleyMeasurer::new();
    let empty = SizingNode::new(params("")).measure(&mut measurer, ProposedSize::UNSPECIFIED);
    let space = SizingNode::new(params(" ")).measure(&mut measurer, ProposedSize::UNSPECIFIED);
    assert_eq!(empty.height, space.height);
}

#[test]
fn sizing_line_limit_truncates() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new(LOREM);
    let mut control = env.mount(env.view(&binding).line_limit(LineLimit::new(2)));
    let proposal = ProposedSize::width(100.0);

    let metrics = control
        .sizing_node()
        .unwrap()
        .metrics(&mut FixedAdvanceMeasurer::new(), proposal);
    assert!(metrics.line_count > 2);
    assert_eq!(metrics.visible_lines, 2);
    assert!(metrics.is_truncated());

    // Two 12 px lines, 8 px insets and the caret allowance.
    assert_eq!(env.size(&mut control, proposal), (100.0, 60.0));

    let widget = control.adapter().widget();
    let config = widget.config().unwrap();
    assert_eq!(config.line_limit, LineLimit::new(2));
    assert!(config.truncates_tail);
}

#[test]
fn sizing_line_limit_ignores_content_length() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new(LOREM);
    let mut control = env.mount(env.view(&binding).line_limit(LineLimit::new(2)));
    let short = env.size(&mut control, ProposedSize::width(100.0));
    binding.set(LOREM.repeat(5));
    let long = env.size(&mut control, ProposedSize::width(100.0));
    assert_eq!(short, long);
}

#[test]
fn sizing_fit_content_width() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("abcd");
    let mut fitted = env.mount(env.view(&binding).greedy_width(false));
    let mut greedy = env.mount(env.view(&binding));
    // 20 px of text plus 4 px inset and 5 px line padding per side.
    assert_eq!(env.size(&mut fitted, ProposedSize::width(300.0)).0, 38.0);
    assert_eq!(env.size(&mut greedy, ProposedSize::width(300.0)).0, 300.0);
    // Wraps to two-character lines within 30 px.
    assert_eq!(env.size(&mut fitted, ProposedSize::width(30.0)), (28.0, 60.0));
}

#[test]
fn sizing_grows_with_typed_lines() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("one");
    let mut control = env.mount(env.view(&binding));
    let (_, before) = env.size(&mut control, ProposedSize::width(200.0));
    control.adapter_mut().insert_text("\ntwo");
    let (_, after) = env.size(&mut control, ProposedSize::width(200.0));
    assert_eq!(after - before, 12.0);
}

#[test]
fn sizing_scrollable_fills_offered_height() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("short");
    let mut scrolling = env.mount(env.view(&binding).scrollable(true));
    let mut growing = env.mount(env.view(&binding));
    assert_eq!(env.size(&mut scrolling, ProposedSize::new(200.0, 400.0)).1, 400.0);
    assert_eq!(env.size(&mut growing, ProposedSize::new(200.0, 400.0)).1, 48.0);

    // A scrolling label hugs its text.
    let mut label = env.mount(env.view(&binding).scrollable(true).editable(false));
    assert_eq!(env.size(&mut label, ProposedSize::new(200.0, 400.0)).1, 12.0);
}

#[test]
fn sizing_mobile_greedy_trusts_widget() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Mobile);
    let binding = TextBinding::new("hello");
    let mut control = env.mount(env.view(&binding));
    assert!(control.sizing_node().is_none());
    control
        .adapter()
        .widget_mut()
        .set_content_size(Size::new(80.0, 33.0));
    assert_eq!(env.size(&mut control, ProposedSize::width(320.0)), (320.0, 33.0));
}

#[test]
fn sizing_mobile_label_padding() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Mobile);
    let binding = TextBinding::new("ab");
    let mut control = env.mount(env.view(&binding).editable(false).greedy_width(false));
    // One 12 px line with 2 px above and 3 px below.
    assert_eq!(env.size(&mut control, ProposedSize::UNSPECIFIED), (10.0, 17.0));
}
