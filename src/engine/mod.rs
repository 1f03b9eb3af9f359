//! The presentation state machine.
//!
//! ```text
//! NotStarted ──start──▶ Showing(0) ──advance──▶ Showing(1) ─ … ─▶ Showing(N-1)
//!      │                    │                                        │
//!      └────────────────────┴────── request_dismiss ─────────────────┴──advance──▶ Terminal
//! ```
//!
//! Every call runs to completion before returning, including the
//! persistence side effect of entering `Terminal`, which happens exactly once
//! per engine.

mod controls;
mod observer;
mod styling;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::gate::SheetGate;
use crate::models::{FeatureGroup, SecondaryBehavior, Title, Version, WhatsNew};
use crate::store::VersionStore;

pub use controls::{ActionControls, DismissControl};
pub use observer::{NoopObserver, PresentationObserver};
pub use styling::RenderedFeature;

/// Presentation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentationError {
    #[error("release {0} has no feature groups to present")]
    EmptyFeatureGroups(Version),
}

/// Why a presentation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalCause {
    /// `advance` ran past the last group.
    Exhausted,
    /// Dismissed early, by the user or an action callback.
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    NotStarted,
    /// Showing the group at this 0-based index.
    Showing(usize),
    Terminal(TerminalCause),
}

/// How `advance` behaves on an engine that was never started.
///
/// `InitializeFirst` shows group 0, treating the first `advance` as the
/// start of the sequence. `SkipToNext` starts and then advances, so the first
/// call lands on group 1 (or ends a single-group release).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancePolicy {
    #[default]
    InitializeFirst,
    SkipToNext,
}

/// Drives one presentation of one [`WhatsNew`].
pub struct PresentationEngine {
    id: Uuid,
    whats_new: WhatsNew,
    gate: SheetGate,
    policy: AdvancePolicy,
    group_index: Option<usize>,
    terminal: Option<TerminalCause>,
    observer: Box<dyn PresentationObserver>,
}

impl PresentationEngine {
    /// Create an engine for `whats_new`. When `store` is given, the release
    /// version is saved to it when the presentation ends.
    pub fn new(whats_new: WhatsNew, store: Option<Arc<dyn VersionStore>>) -> Self {
        Self::with_gate(whats_new, SheetGate::new(store))
    }

    pub(crate) fn with_gate(whats_new: WhatsNew, gate: SheetGate) -> Self {
        Self {
            id: Uuid::new_v4(),
            whats_new,
            gate,
            policy: AdvancePolicy::default(),
            group_index: None,
            terminal: None,
            observer: Box::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: impl PresentationObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn with_advance_policy(mut self, policy: AdvancePolicy) -> Self {
        self.policy = policy;
        self
    }

    // ============================================================
    // Queries
    // ============================================================

    /// Identifier of this presentation, used in logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn whats_new(&self) -> &WhatsNew {
        &self.whats_new
    }

    pub fn title(&self) -> &Title {
        &self.whats_new.title
    }

    pub fn advance_policy(&self) -> AdvancePolicy {
        self.policy
    }

    pub fn state(&self) -> EngineState {
        match (self.terminal, self.group_index) {
            (Some(cause), _) => EngineState::Terminal(cause),
            (None, Some(index)) => EngineState::Showing(index),
            (None, None) => EngineState::NotStarted,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// Index of the last group shown. Kept after the engine ends so a closing
    /// host can keep rendering it.
    pub fn group_index(&self) -> Option<usize> {
        self.group_index
    }

    /// The group the rendering layer should show.
    pub fn current_group(&self) -> Option<&FeatureGroup> {
        self.group_index
            .and_then(|index| self.whats_new.feature_groups.get(index))
    }

    // ============================================================
    // Transitions
    // ============================================================

    /// Show the first group.
    ///
    /// Fails without changing state when the release has no groups. Calling
    /// `start` on an engine that already started does nothing.
    pub fn start(&mut self) -> Result<EngineState, PresentationError> {
        let state = self.state();
        if state != EngineState::NotStarted {
            tracing::debug!("Presentation {}: ignoring start in {:?}", self.id, state);
            return Ok(state);
        }

        if self.whats_new.feature_groups.is_empty() {
            tracing::error!(
                "Presentation {}: release {} has no feature groups",
                self.id,
                self.whats_new.version
            );
            return Err(PresentationError::EmptyFeatureGroups(self.whats_new.version));
        }

        tracing::info!(
            "Presentation {}: starting release {} ({} group(s))",
            self.id,
            self.whats_new.version,
            self.whats_new.group_count()
        );
        self.show(0);
        Ok(self.state())
    }

    /// Move to the next group, or end the presentation after the last one.
    pub fn advance(&mut self) -> Result<EngineState, PresentationError> {
        match self.state() {
            EngineState::NotStarted => {
                let state = self.start()?;
                match self.policy {
                    AdvancePolicy::InitializeFirst => Ok(state),
                    AdvancePolicy::SkipToNext => self.advance(),
                }
            }
            EngineState::Showing(index) => {
                let next = index + 1;
                if next < self.whats_new.group_count() {
                    self.show(next);
                } else {
                    self.terminate(TerminalCause::Exhausted);
                }
                Ok(self.state())
            }
            state @ EngineState::Terminal(_) => {
                tracing::debug!("Presentation {}: ignoring advance after end", self.id);
                Ok(state)
            }
        }
    }

    /// End the presentation now, skipping any remaining groups.
    pub fn request_dismiss(&mut self) -> EngineState {
        if self.is_terminal() {
            tracing::debug!("Presentation {}: ignoring dismiss after end", self.id);
        } else {
            self.terminate(TerminalCause::Dismissed);
        }
        self.state()
    }

    // ============================================================
    // Action dispatch
    // ============================================================

    /// Press the current group's primary action.
    ///
    /// Plays its haptic feedback, then hands `advance` and `dismiss` to its
    /// callback. Without a callback, the press changes nothing.
    pub fn press_primary(&mut self) -> Result<EngineState, PresentationError> {
        let Some(group) = self.visible_group() else {
            tracing::debug!("Presentation {}: no visible group for primary action", self.id);
            return Ok(self.state());
        };
        let action = group.primary_action.clone();

        if let Some(feedback) = &action.haptic_feedback {
            self.observer.haptic(feedback);
        }

        let Some(callback) = action.action else {
            return Ok(self.state());
        };

        let mut controls = ActionControls::new(self);
        callback(&mut controls);
        match controls.into_error() {
            Some(e) => Err(e),
            None => Ok(self.state()),
        }
    }

    /// Press the current group's secondary action, if it has one.
    pub fn press_secondary(&mut self) -> EngineState {
        let Some(action) = self
            .visible_group()
            .and_then(|group| group.secondary_action.clone())
        else {
            tracing::debug!("Presentation {}: no secondary action to press", self.id);
            return self.state();
        };

        if let Some(feedback) = &action.haptic_feedback {
            self.observer.haptic(feedback);
        }

        match action.action {
            SecondaryBehavior::PresentCustomView(content) => {
                self.observer.present_custom_view(&content);
            }
            SecondaryBehavior::InvokeCallback(callback) => {
                callback(&mut DismissControl::new(self));
            }
        }
        self.state()
    }

    fn visible_group(&self) -> Option<&FeatureGroup> {
        if self.is_terminal() {
            None
        } else {
            self.current_group()
        }
    }

    fn show(&mut self, index: usize) {
        self.group_index = Some(index);
        tracing::debug!("Presentation {}: showing group {}", self.id, index);
        self.observer
            .group_changed(index, &self.whats_new.feature_groups[index]);
    }

    fn terminate(&mut self, cause: TerminalCause) {
        self.terminal = Some(cause);
        tracing::info!(
            "Presentation {}: release {} ended ({:?})",
            self.id,
            self.whats_new.version,
            cause
        );
        self.gate.on_terminal(&self.whats_new);
        self.observer.close_requested(cause);
    }
}
