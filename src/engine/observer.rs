use super::TerminalCause;
use crate::models::{ContentRef, FeatureGroup, HapticFeedback};

/// Host-side hooks the engine calls while a presentation runs.
///
/// All methods default to doing nothing, so a host implements only what it
/// renders.
pub trait PresentationObserver {
    /// A different group is now current.
    fn group_changed(&mut self, _index: usize, _group: &FeatureGroup) {}

    fn haptic(&mut self, _feedback: &HapticFeedback) {}

    /// Show custom content on top of the presentation. The host dismisses it
    /// on its own; the engine state does not change.
    fn present_custom_view(&mut self, _content: &ContentRef) {}

    /// The presentation ended and the host should close it. Called once.
    fn close_requested(&mut self, _cause: TerminalCause) {}
}

/// Observer used when the host registers none.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PresentationObserver for NoopObserver {}
