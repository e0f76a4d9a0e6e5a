#![forbid(unsafe_code)]

//! Merging a step's popover with the global options into renderable content.

use waymark_core::{ButtonKind, PopoverButton, PopoverContent};

use crate::config::Options;
use crate::step::PopoverSpec;

const BUTTON_ORDER: [ButtonKind; 3] = [ButtonKind::Previous, ButtonKind::Next, ButtonKind::Close];

/// Build the content for `spec` shown at `index` of `total` steps.
///
/// `index` is `None` for an ad-hoc highlight: no progress line, and the next
/// button is never the done button.
#[must_use]
pub fn build_content(
    spec: &PopoverSpec,
    options: &Options,
    index: Option<usize>,
    total: usize,
) -> PopoverContent {
    let shown = spec.show_buttons.as_ref().unwrap_or(&options.show_buttons);
    let disabled = spec
        .disable_buttons
        .as_ref()
        .unwrap_or(&options.disable_buttons);
    let is_first = index.is_some_and(|i| i == 0);
    let is_last = index.is_some_and(|i| i + 1 >= total);

    let buttons = BUTTON_ORDER
        .iter()
        .copied()
        .filter(|kind| shown.contains(kind))
        .map(|kind| {
            let label = match kind {
                ButtonKind::Previous => spec.prev_btn_text.as_deref().unwrap_or(&options.prev_btn_text),
                ButtonKind::Next if is_last => {
                    spec.done_btn_text.as_deref().unwrap_or(&options.done_btn_text)
                }
                ButtonKind::Next => spec.next_btn_text.as_deref().unwrap_or(&options.next_btn_text),
                ButtonKind::Close => "\u{00d7}",
            };
            PopoverButton {
                kind,
                label: label.to_owned(),
                disabled: disabled.contains(&kind) || (kind == ButtonKind::Previous && is_first),
            }
        })
        .collect();

    let progress = match index {
        Some(i) if spec.show_progress.unwrap_or(options.show_progress) => Some(
            spec.progress_text
                .as_ref()
                .unwrap_or(&options.progress_text)
                .replace("{{current}}", &(i + 1).to_string())
                .replace("{{total}}", &total.to_string()),
        ),
        _ => None,
    };

    let class = format!(
        "{} {}",
        options.popover_class,
        spec.popover_class.as_deref().unwrap_or_default()
    )
    .trim()
    .to_owned();

    PopoverContent {
        title: spec.title.clone(),
        description: spec.description.clone(),
        progress,
        buttons,
        class,
    }
}
