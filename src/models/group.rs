use super::action::{PrimaryAction, SecondaryAction};
use super::feature::Feature;

/// Features shown together on one screen, with the controls for that screen.
#[derive(Debug, Clone, Default)]
pub struct FeatureGroup {
    pub features: Vec<Feature>,
    pub primary_action: PrimaryAction,
    pub secondary_action: Option<SecondaryAction>,
}

impl FeatureGroup {
    /// A group with the default "Continue" action and no secondary action.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            ..Self::default()
        }
    }

    pub fn with_primary_action(mut self, action: PrimaryAction) -> Self {
        self.primary_action = action;
        self
    }

    pub fn with_secondary_action(mut self, action: SecondaryAction) -> Self {
        self.secondary_action = Some(action);
        self
    }
}
