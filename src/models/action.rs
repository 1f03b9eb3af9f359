use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::content::{ColorToken, ContentRef, HapticFeedback, Text};
use crate::engine::{ActionControls, DismissControl};

/// Callback run when a primary action is pressed. It receives the `advance`
/// and `dismiss` capabilities and decides which, if either, to use.
pub type PrimaryCallback = Arc<dyn Fn(&mut ActionControls<'_>) + Send + Sync>;

/// Callback run when a secondary action is pressed; it may only dismiss.
pub type SecondaryCallback = Arc<dyn Fn(&mut DismissControl<'_>) + Send + Sync>;

fn advance_to_next(controls: &mut ActionControls<'_>) {
    controls.advance();
}

fn end_presentation(control: &mut DismissControl<'_>) {
    control.dismiss();
}

/// Colors applied to the primary button, and to custom features that opt
/// into default styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStyle {
    pub background: ColorToken,
    pub foreground: ColorToken,
}

impl Default for ActionStyle {
    fn default() -> Self {
        Self {
            background: ColorToken::accent(),
            foreground: ColorToken::white(),
        }
    }
}

/// The main forward control of a feature group.
///
/// Cloning is cheap; the callback is shared.
#[derive(Clone)]
pub struct PrimaryAction {
    pub title: Text,
    pub style: ActionStyle,
    pub haptic_feedback: Option<HapticFeedback>,
    /// `None` makes the button inert apart from haptic feedback.
    pub action: Option<PrimaryCallback>,
}

impl PrimaryAction {
    pub fn new(title: impl Into<Text>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// The callback used when none is given: advance to the next group.
    pub fn default_action() -> PrimaryCallback {
        Arc::new(advance_to_next)
    }

    pub fn with_style(mut self, style: ActionStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_haptic_feedback(mut self, feedback: HapticFeedback) -> Self {
        self.haptic_feedback = Some(feedback);
        self
    }

    pub fn on_press<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut ActionControls<'_>) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(callback));
        self
    }

    /// Remove the callback entirely.
    pub fn inert(mut self) -> Self {
        self.action = None;
        self
    }
}

impl Default for PrimaryAction {
    fn default() -> Self {
        Self {
            title: Text::from("Continue"),
            style: ActionStyle::default(),
            haptic_feedback: None,
            action: Some(Self::default_action()),
        }
    }
}

impl fmt::Debug for PrimaryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimaryAction")
            .field("title", &self.title)
            .field("style", &self.style)
            .field("haptic_feedback", &self.haptic_feedback)
            .field("action", &self.action.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// What pressing a secondary action does.
#[derive(Clone)]
pub enum SecondaryBehavior {
    /// Hand the content to the host, which presents and dismisses it on its own.
    PresentCustomView(ContentRef),
    InvokeCallback(SecondaryCallback),
}

impl fmt::Debug for SecondaryBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PresentCustomView(content) => {
                f.debug_tuple("PresentCustomView").field(content).finish()
            }
            Self::InvokeCallback(_) => f.write_str("InvokeCallback(<callback>)"),
        }
    }
}

/// An optional auxiliary control of a feature group, e.g. "Learn more".
#[derive(Debug, Clone)]
pub struct SecondaryAction {
    pub title: Text,
    pub foreground: ColorToken,
    pub haptic_feedback: Option<HapticFeedback>,
    pub action: SecondaryBehavior,
}

impl SecondaryAction {
    pub fn new(title: impl Into<Text>, action: SecondaryBehavior) -> Self {
        Self {
            title: title.into(),
            foreground: ColorToken::accent(),
            haptic_feedback: None,
            action,
        }
    }

    pub fn present(title: impl Into<Text>, content: impl Into<ContentRef>) -> Self {
        Self::new(title, SecondaryBehavior::PresentCustomView(content.into()))
    }

    pub fn custom<F>(title: impl Into<Text>, callback: F) -> Self
    where
        F: Fn(&mut DismissControl<'_>) + Send + Sync + 'static,
    {
        Self::new(title, SecondaryBehavior::InvokeCallback(Arc::new(callback)))
    }

    /// A "skip" style action that ends the presentation.
    pub fn dismiss(title: impl Into<Text>) -> Self {
        Self::custom(title, end_presentation)
    }

    pub fn with_foreground(mut self, foreground: ColorToken) -> Self {
        self.foreground = foreground;
        self
    }

    pub fn with_haptic_feedback(mut self, feedback: HapticFeedback) -> Self {
        self.haptic_feedback = Some(feedback);
        self
    }
}
