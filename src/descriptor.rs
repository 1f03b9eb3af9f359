//! Release descriptors: what's-new content authored as JSON.
//!
//! A descriptor file holds one release or a list of them:
//!
//! ```json
//! {
//!   "version": "2.0",
//!   "title": "What's New",
//!   "groups": [
//!     {
//!       "features": [{ "image": "star", "title": "Widgets", "subtitle": "On your home screen" }],
//!       "secondary_action": { "title": "Skip", "behavior": { "type": "dismiss" } }
//!     },
//!     { "features": [{ "custom": "promo-card" }], "primary_action": { "title": "Done" } }
//!   ]
//! }
//! ```
//!
//! Callbacks cannot be serialized, so actions name a behavior instead.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::*;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Failed to read descriptor: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Release {0} has no feature groups")]
    EmptyRelease(Version),
}

/// One release as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    pub version: Version,
    pub title: Text,
    /// Shorthand for a single group; ignored when `groups` is non-empty.
    #[serde(default)]
    pub features: Vec<FeatureDescriptor>,
    #[serde(default)]
    pub groups: Vec<GroupDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDescriptor {
    pub features: Vec<FeatureDescriptor>,
    #[serde(default)]
    pub primary_action: Option<PrimaryActionDescriptor>,
    #[serde(default)]
    pub secondary_action: Option<SecondaryActionDescriptor>,
}

/// A feature as authored. Either `title`/`subtitle` (with optional `image`)
/// or `custom` should be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    pub image: Option<ImageRef>,
    pub title: Option<Text>,
    pub subtitle: Option<Text>,
    pub custom: Option<ContentRef>,
    #[serde(default = "default_true")]
    pub use_default_styling: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryBehavior {
    #[default]
    Advance,
    Dismiss,
    /// Only haptic feedback.
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryActionDescriptor {
    pub title: Option<Text>,
    pub background: Option<ColorToken>,
    pub foreground: Option<ColorToken>,
    pub haptic_feedback: Option<HapticFeedback>,
    #[serde(default)]
    pub behavior: PrimaryBehavior,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SecondaryBehaviorDescriptor {
    Present { content: ContentRef },
    Dismiss,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryActionDescriptor {
    pub title: Text,
    pub foreground: Option<ColorToken>,
    pub haptic_feedback: Option<HapticFeedback>,
    pub behavior: SecondaryBehaviorDescriptor,
}

/// Parse a descriptor document holding one release or a list of them.
pub fn parse(json: &str) -> Result<Vec<ReleaseDescriptor>, DescriptorError> {
    let document: serde_json::Value = serde_json::from_str(json)?;
    if document.is_array() {
        Ok(serde_json::from_value(document)?)
    } else {
        Ok(vec![serde_json::from_value(document)?])
    }
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<ReleaseDescriptor>, DescriptorError> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

impl ReleaseDescriptor {
    /// Build the release.
    ///
    /// Features without any content become [`Feature::Missing`] and are logged;
    /// a release without groups or features is rejected.
    pub fn into_whats_new(self) -> Result<WhatsNew, DescriptorError> {
        let groups = if self.groups.is_empty() {
            if self.features.is_empty() {
                return Err(DescriptorError::EmptyRelease(self.version));
            }
            vec![GroupDescriptor {
                features: self.features,
                primary_action: None,
                secondary_action: None,
            }]
        } else {
            self.groups
        };

        let version = self.version;
        let feature_groups = groups
            .into_iter()
            .enumerate()
            .map(|(index, group)| group.into_group(version, index))
            .collect();

        Ok(WhatsNew::with_groups(version, self.title, feature_groups))
    }

    /// Number of features that carry no content.
    pub fn missing_feature_count(&self) -> usize {
        self.features
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.features.iter()))
            .filter(|f| f.is_missing())
            .count()
    }
}

impl GroupDescriptor {
    fn into_group(self, version: Version, index: usize) -> FeatureGroup {
        let features = self
            .features
            .into_iter()
            .map(|feature| {
                if feature.is_missing() {
                    tracing::warn!(
                        "Release {} group {} has a feature with neither content nor a title",
                        version,
                        index
                    );
                }
                feature.into_feature()
            })
            .collect();

        FeatureGroup {
            features,
            primary_action: self
                .primary_action
                .map(PrimaryActionDescriptor::into_action)
                .unwrap_or_default(),
            secondary_action: self
                .secondary_action
                .map(SecondaryActionDescriptor::into_action),
        }
    }
}

impl FeatureDescriptor {
    fn is_missing(&self) -> bool {
        self.custom.is_none() && self.title.is_none() && self.subtitle.is_none()
    }

    fn into_feature(self) -> Feature {
        if let Some(content) = self.custom {
            return Feature::Custom {
                content,
                use_default_styling: self.use_default_styling,
            };
        }

        if self.title.is_none() && self.subtitle.is_none() {
            return Feature::Missing;
        }

        Feature::Structured {
            image: self.image.unwrap_or_else(|| ImageRef::from("")),
            title: self.title.unwrap_or_else(|| Text::from("")),
            subtitle: self.subtitle.unwrap_or_else(|| Text::from("")),
        }
    }
}

impl PrimaryActionDescriptor {
    fn into_action(self) -> PrimaryAction {
        let defaults = PrimaryAction::default();
        let action = PrimaryAction {
            title: self.title.unwrap_or(defaults.title),
            style: ActionStyle {
                background: self.background.unwrap_or(defaults.style.background),
                foreground: self.foreground.unwrap_or(defaults.style.foreground),
            },
            haptic_feedback: self.haptic_feedback,
            action: defaults.action,
        };

        match self.behavior {
            PrimaryBehavior::Advance => action,
            PrimaryBehavior::Dismiss => action.on_press(|controls| controls.dismiss()),
            PrimaryBehavior::None => action.inert(),
        }
    }
}

impl SecondaryActionDescriptor {
    fn into_action(self) -> SecondaryAction {
        let mut action = match self.behavior {
            SecondaryBehaviorDescriptor::Present { content } => {
                SecondaryAction::present(self.title, content)
            }
            SecondaryBehaviorDescriptor::Dismiss => SecondaryAction::dismiss(self.title),
        };
        if let Some(foreground) = self.foreground {
            action = action.with_foreground(foreground);
        }
        action.haptic_feedback = self.haptic_feedback;
        action
    }
}
