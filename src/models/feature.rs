use std::hash::{Hash, Hasher};

use super::content::{ContentRef, ImageRef, Text};

/// One callout on a what's-new screen.
///
/// # Equality
/// Only [`Feature::Structured`] values can be equal, and only their title and
/// subtitle take part (the image does not). Any comparison involving a custom
/// or missing feature is `false`, even a feature compared with itself, which is
/// why `Feature` is not `Eq`. Hosts that need stable list keys for custom
/// features must assign their own.
#[derive(Debug, Clone)]
pub enum Feature {
    Structured {
        image: ImageRef,
        title: Text,
        subtitle: Text,
    },
    Custom {
        content: ContentRef,
        /// Apply the active group's primary action style to the content's
        /// interactive elements.
        use_default_styling: bool,
    },
    /// Neither a structured payload nor custom content was provided.
    Missing,
}

impl Feature {
    pub fn new(image: impl Into<ImageRef>, title: impl Into<Text>, subtitle: impl Into<Text>) -> Self {
        Self::Structured {
            image: image.into(),
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    /// Custom content, styled like the group's primary action by default.
    pub fn custom(content: impl Into<ContentRef>) -> Self {
        Self::Custom {
            content: content.into(),
            use_default_styling: true,
        }
    }

    pub fn custom_unstyled(content: impl Into<ContentRef>) -> Self {
        Self::Custom {
            content: content.into(),
            use_default_styling: false,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Structured {
                    title: lhs_title,
                    subtitle: lhs_subtitle,
                    ..
                },
                Self::Structured {
                    title: rhs_title,
                    subtitle: rhs_subtitle,
                    ..
                },
            ) => lhs_title == rhs_title && lhs_subtitle == rhs_subtitle,
            _ => false,
        }
    }
}

impl Hash for Feature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Self::Structured {
            title, subtitle, ..
        } = self
        {
            title.hash(state);
            subtitle.hash(state);
        }
    }
}
