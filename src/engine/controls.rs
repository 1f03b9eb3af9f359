use super::{EngineState, PresentationEngine, PresentationError};

/// The capabilities handed to a primary action callback.
pub struct ActionControls<'a> {
    engine: &'a mut PresentationEngine,
    error: Option<PresentationError>,
}

impl<'a> ActionControls<'a> {
    pub(super) fn new(engine: &'a mut PresentationEngine) -> Self {
        Self {
            engine,
            error: None,
        }
    }

    /// Move to the next group, or finish after the last one.
    pub fn advance(&mut self) {
        if let Err(e) = self.engine.advance() {
            self.error.get_or_insert(e);
        }
    }

    /// End the presentation now.
    pub fn dismiss(&mut self) {
        self.engine.request_dismiss();
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub(super) fn into_error(self) -> Option<PresentationError> {
        self.error
    }
}

/// The single capability handed to a secondary action callback.
pub struct DismissControl<'a> {
    engine: &'a mut PresentationEngine,
}

impl<'a> DismissControl<'a> {
    pub(super) fn new(engine: &'a mut PresentationEngine) -> Self {
        Self { engine }
    }

    pub fn dismiss(&mut self) {
        self.engine.request_dismiss();
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }
}
