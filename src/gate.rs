//! Deciding whether a release should be presented at all.

use std::sync::Arc;

use crate::engine::{AdvancePolicy, PresentationEngine};
use crate::models::{Version, WhatsNew};
use crate::store::VersionStore;

/// Version-gating policy in front of the [`PresentationEngine`].
///
/// Gating is opt-in: without a store every release is presented, and nothing
/// is recorded.
#[derive(Clone, Default)]
pub struct SheetGate {
    store: Option<Arc<dyn VersionStore>>,
    policy: AdvancePolicy,
}

impl SheetGate {
    pub fn new(store: Option<Arc<dyn VersionStore>>) -> Self {
        Self {
            store,
            policy: AdvancePolicy::default(),
        }
    }

    pub fn with_store(store: Arc<dyn VersionStore>) -> Self {
        Self::new(Some(store))
    }

    /// Policy given to the engines this gate starts.
    pub fn with_advance_policy(mut self, policy: AdvancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// `false` only when the store reports the release's version as presented.
    ///
    /// A failing store counts as "not presented".
    pub fn should_present(&self, whats_new: &WhatsNew) -> bool {
        !self.has_presented(&whats_new.version)
    }

    /// Record the release as presented. Engines call this once, when they end.
    pub fn on_terminal(&self, whats_new: &WhatsNew) {
        let Some(store) = &self.store else {
            return;
        };

        match store.save(&whats_new.version) {
            Ok(()) => tracing::debug!("Recorded release {} as presented", whats_new.version),
            Err(e) => tracing::warn!(
                "Failed to record release {} as presented: {}",
                whats_new.version,
                e
            ),
        }
    }

    /// An engine for `whats_new`, or `None` when it was already presented.
    ///
    /// The engine is returned unstarted.
    pub fn begin(&self, whats_new: WhatsNew) -> Option<PresentationEngine> {
        if !self.should_present(&whats_new) {
            tracing::info!("Release {} already presented, skipping", whats_new.version);
            return None;
        }

        Some(PresentationEngine::with_gate(whats_new, self.clone()).with_advance_policy(self.policy))
    }

    /// Pick the release to present for the running `current` version.
    ///
    /// An exact version match wins if it has not been presented. Otherwise the
    /// newest release on the same `major.minor` line is used, if it has not
    /// been presented. Older releases on the line are never picked.
    pub fn select<'a>(&self, releases: &'a [WhatsNew], current: &Version) -> Option<&'a WhatsNew> {
        if let Some(exact) = releases.iter().find(|r| r.version == *current) {
            if self.should_present(exact) {
                return Some(exact);
            }
        }

        releases
            .iter()
            .filter(|r| r.version.same_release_line(current))
            .max_by_key(|r| r.version)
            .filter(|r| self.should_present(r))
    }

    fn has_presented(&self, version: &Version) -> bool {
        let Some(store) = &self.store else {
            return false;
        };

        store.has_presented(version).unwrap_or_else(|e| {
            tracing::warn!("Version store lookup for {} failed: {}", version, e);
            false
        })
    }
}
