use super::action::{PrimaryAction, SecondaryAction};
use super::content::Title;
use super::feature::Feature;
use super::group::FeatureGroup;
use super::version::Version;

/// Everything shown to the user for one release.
///
/// A `WhatsNew` is immutable once handed to a
/// [`PresentationEngine`](crate::engine::PresentationEngine); which group is
/// currently visible is engine state, not part of the release.
#[derive(Debug, Clone)]
pub struct WhatsNew {
    pub version: Version,
    pub title: Title,
    pub feature_groups: Vec<FeatureGroup>,
}

impl WhatsNew {
    /// A single-screen release with the default "Continue" action.
    ///
    /// Always produces exactly one group, even for an empty feature list.
    pub fn new(version: Version, title: impl Into<Title>, features: Vec<Feature>) -> Self {
        Self::with_groups(version, title, vec![FeatureGroup::new(features)])
    }

    pub fn with_groups(
        version: Version,
        title: impl Into<Title>,
        feature_groups: Vec<FeatureGroup>,
    ) -> Self {
        Self {
            version,
            title: title.into(),
            feature_groups,
        }
    }

    /// Replace the primary action of the first group.
    pub fn with_primary_action(mut self, action: PrimaryAction) -> Self {
        if let Some(group) = self.feature_groups.first_mut() {
            group.primary_action = action;
        }
        self
    }

    /// Set the secondary action of the first group.
    pub fn with_secondary_action(mut self, action: SecondaryAction) -> Self {
        if let Some(group) = self.feature_groups.first_mut() {
            group.secondary_action = Some(action);
        }
        self
    }

    /// The identity of this release.
    pub fn id(&self) -> Version {
        self.version
    }

    pub fn group_count(&self) -> usize {
        self.feature_groups.len()
    }
}
