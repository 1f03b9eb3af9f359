//! Data model for what's-new presentations.
//!
//! # Core Concepts
//!
//! - [`WhatsNew`]: one release. A [`Version`], a [`Title`] and one or more
//!   [`FeatureGroup`]s shown one screen at a time.
//! - [`FeatureGroup`]: the [`Feature`]s on one screen, plus a [`PrimaryAction`]
//!   and an optional [`SecondaryAction`].
//! - [`Feature`]: a structured callout (image, title, subtitle) or a reference
//!   to host-owned custom content.
//!
//! Images, custom content and colors are opaque handles ([`ImageRef`],
//! [`ContentRef`], [`ColorToken`]); only the rendering layer resolves them.

mod action;
mod content;
mod feature;
mod group;
mod version;
mod whats_new;

pub use action::*;
pub use content::*;
pub use feature::*;
pub use group::*;
pub use version::*;
pub use whats_new::*;
