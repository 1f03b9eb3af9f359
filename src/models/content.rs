//! Opaque values the core threads through to the rendering layer untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! opaque_string {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_string!(
    /// Display text (plain or markup, the host decides).
    Text
);

opaque_string!(
    /// Reference to an image asset, e.g. a symbol name or asset path.
    ImageRef
);

opaque_string!(
    /// Handle to host-owned custom content (a custom view or screen).
    ContentRef
);

opaque_string!(
    /// A style hint such as a color name.
    ColorToken
);

/// The release headline shown above the features.
pub type Title = Text;

impl ColorToken {
    pub fn accent() -> Self {
        Self::from("accentColor")
    }

    pub fn white() -> Self {
        Self::from("white")
    }
}

/// Haptic feedback requested when an action is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum HapticFeedback {
    Impact {
        style: Option<ImpactStyle>,
        intensity: Option<f32>,
    },
    Selection,
    Notification { feedback: NotificationFeedback },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
    Soft,
    Rigid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFeedback {
    Success,
    Warning,
    Error,
}
