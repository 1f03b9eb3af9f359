//! Version-gated "what's new" presentations.
//!
//! A host builds a [`WhatsNew`](models::WhatsNew) for a release, asks a
//! [`SheetGate`](gate::SheetGate) whether it should be shown, and drives the
//! returned [`PresentationEngine`](engine::PresentationEngine) from its UI
//! events. When the engine ends, the release version is written to the
//! [`VersionStore`](store::VersionStore) so it is not shown again.

pub mod config;
pub mod descriptor;
pub mod engine;
pub mod gate;
pub mod models;
pub mod render;
pub mod store;

pub use engine::{EngineState, PresentationEngine, PresentationError, TerminalCause};
pub use gate::SheetGate;
pub use models::{Feature, FeatureGroup, PrimaryAction, SecondaryAction, Version, WhatsNew};
pub use store::{InMemoryVersionStore, SqliteVersionStore, StoreError, VersionStore};
