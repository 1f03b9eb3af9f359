use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable a host can set to supply its app version.
pub const APP_VERSION_ENV: &str = "WHATSNEW_APP_VERSION";

/// A release identifier, ordered by `major`, then `minor`, then `patch`.
///
/// A version is the identity key of a [`WhatsNew`](super::WhatsNew): the
/// version store records versions, never whole releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("version string is empty")]
    Empty,

    #[error("version '{0}' has more than three components")]
    TooManyComponents(String),

    #[error("invalid version component '{component}' in '{input}'")]
    InvalidComponent { input: String, component: String },
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The running app's version.
    ///
    /// Resolution order: the `WHATSNEW_APP_VERSION` environment variable, then
    /// `fallback` (usually `Config::app_version`), then this crate's own
    /// package version. An unparseable environment value is ignored.
    pub fn current(fallback: Option<Version>) -> Self {
        if let Ok(raw) = std::env::var(APP_VERSION_ENV) {
            match raw.parse() {
                Ok(version) => return version,
                Err(e) => tracing::warn!("Ignoring {}={:?}: {}", APP_VERSION_ENV, raw, e),
            }
        }

        fallback.unwrap_or_else(Self::package)
    }

    fn package() -> Self {
        env!("CARGO_PKG_VERSION")
            .parse()
            .unwrap_or(Self::new(0, 0, 0))
    }

    /// Whether both versions belong to the same `major.minor` release line.
    pub fn same_release_line(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut parts = [0u32; 3];
        for (i, component) in trimmed.split('.').enumerate() {
            if i >= parts.len() {
                return Err(VersionParseError::TooManyComponents(trimmed.to_string()));
            }
            parts[i] = component
                .parse()
                .map_err(|_| VersionParseError::InvalidComponent {
                    input: trimmed.to_string(),
                    component: component.to_string(),
                })?;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl TryFrom<String> for Version {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
