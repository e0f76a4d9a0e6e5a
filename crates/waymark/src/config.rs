#![forbid(unsafe_code)]

//! Tour configuration as data.
//!
//! [`Options`] holds every global setting. It loads from JSON (camelCase
//! keys, every field optional) and [`OptionsPatch`] applies partial updates
//! at runtime. Hooks are code, not data, so they live in
//! [`Hooks`](crate::hooks::Hooks) instead.
//!
//! ```rust,ignore
//! let options = Options::from_json_str(r#"{ "animate": false, "showProgress": true }"#)?;
//! ```
//!
//! # Defaults
//!
//! `Options::default()` is a dimmed black scrim at 0.7 opacity, 10px padding
//! with a 5px radius, keyboard control on, and next/previous/close buttons.

use serde::{Deserialize, Serialize};
use waymark_core::ButtonKind;

use crate::error::{Error, Result};

/// What a click on the dimmed region does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayClickBehavior {
    /// Tear the tour down (when closing is allowed).
    #[default]
    Close,
    /// Behave like the next button.
    NextStep,
}

/// Global tour settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Fade and settle with the long delay.
    pub animate: bool,
    pub overlay_color: String,
    pub overlay_opacity: f64,
    pub smooth_scroll: bool,
    /// Whether escape, the close button, and backdrop clicks may end the tour.
    pub allow_close: bool,
    pub overlay_click_behavior: OverlayClickBehavior,
    /// Space between the element and the edge of the hole.
    pub stage_padding: f64,
    pub stage_radius: f64,
    /// Gap between target and popover.
    pub popover_offset: f64,
    pub allow_keyboard_control: bool,
    pub disable_active_interaction: bool,
    pub show_progress: bool,
    /// Progress template with `{{current}}` and `{{total}}` placeholders.
    pub progress_text: String,
    pub show_buttons: Vec<ButtonKind>,
    pub disable_buttons: Vec<ButtonKind>,
    pub next_btn_text: String,
    pub prev_btn_text: String,
    /// Label of the next button on the last step.
    pub done_btn_text: String,
    pub popover_class: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            animate: true,
            overlay_color: "#000".into(),
            overlay_opacity: 0.7,
            smooth_scroll: false,
            allow_close: true,
            overlay_click_behavior: OverlayClickBehavior::Close,
            stage_padding: 10.0,
            stage_radius: 5.0,
            popover_offset: 10.0,
            allow_keyboard_control: true,
            disable_active_interaction: false,
            show_progress: false,
            progress_text: "{{current}} of {{total}}".into(),
            show_buttons: vec![ButtonKind::Next, ButtonKind::Previous, ButtonKind::Close],
            disable_buttons: Vec::new(),
            next_btn_text: "Next \u{2192}".into(),
            prev_btn_text: "\u{2190} Previous".into(),
            done_btn_text: "Done".into(),
            popover_class: String::new(),
        }
    }
}

fn non_negative(errors: &mut Vec<String>, name: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(format!("{name} must be a finite value >= 0, got {value}"));
    }
}

impl Options {
    /// Load from a JSON string. Missing keys take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(s)?;
        options.check()?;
        Ok(options)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the options
    /// are valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            errors.push(format!(
                "overlayOpacity must be in [0, 1], got {}",
                self.overlay_opacity
            ));
        }
        non_negative(&mut errors, "stagePadding", self.stage_padding);
        non_negative(&mut errors, "stageRadius", self.stage_radius);
        non_negative(&mut errors, "popoverOffset", self.popover_offset);

        if self.overlay_color.trim().is_empty() {
            errors.push("overlayColor must not be empty".into());
        }
        if self.progress_text.is_empty() {
            errors.push("progressText must not be empty".into());
        }
        for (name, label) in [
            ("nextBtnText", &self.next_btn_text),
            ("prevBtnText", &self.prev_btn_text),
            ("doneBtnText", &self.done_btn_text),
        ] {
            if label.is_empty() {
                errors.push(format!("{name} must not be empty"));
            }
        }
        errors
    }

    /// [`validate`](Self::validate) folded into a `Result`.
    pub fn check(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidConfig(errors.join("; ")))
        }
    }

    /// Apply a partial update.
    pub fn apply(&mut self, patch: OptionsPatch) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = patch.$field {
                    self.$field = value;
                })*
            };
        }
        take!(
            animate,
            overlay_color,
            overlay_opacity,
            smooth_scroll,
            allow_close,
            overlay_click_behavior,
            stage_padding,
            stage_radius,
            popover_offset,
            allow_keyboard_control,
            disable_active_interaction,
            show_progress,
            progress_text,
            show_buttons,
            disable_buttons,
            next_btn_text,
            prev_btn_text,
            done_btn_text,
            popover_class,
        );
    }

    /// One setting by its camelCase key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(mut map)) => map.remove(key),
            _ => None,
        }
    }
}

/// A partial [`Options`] update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsPatch {
    pub animate: Option<bool>,
    pub overlay_color: Option<String>,
    pub overlay_opacity: Option<f64>,
    pub smooth_scroll: Option<bool>,
    pub allow_close: Option<bool>,
    pub overlay_click_behavior: Option<OverlayClickBehavior>,
    pub stage_padding: Option<f64>,
    pub stage_radius: Option<f64>,
    pub popover_offset: Option<f64>,
    pub allow_keyboard_control: Option<bool>,
    pub disable_active_interaction: Option<bool>,
    pub show_progress: Option<bool>,
    pub progress_text: Option<String>,
    pub show_buttons: Option<Vec<ButtonKind>>,
    pub disable_buttons: Option<Vec<ButtonKind>>,
    pub next_btn_text: Option<String>,
    pub prev_btn_text: Option<String>,
    pub done_btn_text: Option<String>,
    pub popover_class: Option<String>,
}

impl OptionsPatch {
    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
