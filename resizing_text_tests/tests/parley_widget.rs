// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The control mounted on the Parley-backed widget and measured with Parley.

use resizing_text::widget::NativeTextWidget;
use resizing_text::{
    Font, KeyCommand, ParleyMeasurer, ParleyTextWidget, ProposedSize, ResizingTextView,
    TextBinding, WidgetFamily,
};

use crate::test_name;
use crate::util::TestEnv;

fn view(binding: &TextBinding) -> ResizingTextView {
    ResizingTextView::new(binding.clone()).font(Font::body())
}

#[test]
fn parley_widget_edits_reach_binding() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("");
    let view = view(&binding).can_have_newlines(false);
    let mut control = env.mount_on(view.clone(), ParleyTextWidget::new(Font::body()));

    control.adapter_mut().insert_text("hi");
    assert_eq!(binding.get(), "hi");
    assert_eq!(control.adapter().store().text(), "hi");
    assert_eq!(control.adapter().widget().selected_ranges().as_slice(), [2..2]);

    control.adapter_mut().key_down(KeyCommand::InsertNewline);
    assert_eq!(binding.get(), "hi");

    control.adapter_mut().insert_text("a\nb");
    assert_eq!(binding.get(), "hiab");
    assert_eq!(control.adapter().widget().text(), "hiab");
    assert_eq!(control.adapter().widget().selected_ranges().as_slice(), [4..4]);

    binding.set("bye");
    assert!(control.update(view));
    assert_eq!(control.adapter().widget().text(), "bye");
    assert_eq!(control.adapter().store().text(), "bye");
}

#[test]
fn parley_widget_measured_with_parley() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("");
    let mut control = env.mount_on(view(&binding), ParleyTextWidget::new(Font::body()));
    let mut measurer = ParleyMeasurer::new();
    let proposal = ProposedSize::width(240.0);

    let empty = control.intrinsic_size(&mut measurer, proposal);
    assert_eq!(empty.width, 240.0);
    // 8 px insets above and below plus the caret allowance.
    assert!(empty.height >= 36.0);

    control.adapter_mut().insert_text("one\ntwo");
    assert_eq!(binding.get(), "one\ntwo");
    let grown = control.intrinsic_size(&mut measurer, proposal);
    assert_eq!(control.sizing_node().unwrap().measured_text(), "one\ntwo");
    assert_eq!(grown.width, 240.0);
    assert!(grown.height >= empty.height);
}
