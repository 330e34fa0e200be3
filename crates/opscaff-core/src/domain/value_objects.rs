//! Domain value objects: [`Stage`] and [`Version`].
//!
//! # Design
//!
//! One `Version` type serves both plugin versions and project-configuration
//! versions. The two only differ in how they are rendered:
//!
//! | Flavor  | Rendering                  | Example    |
//! |---------|----------------------------|------------|
//! | project | [`Version`]'s `Display`    | `3-alpha`  |
//! | plugin  | [`Version::prefixed`]      | `v3-alpha` |
//!
//! [`Version::parse`] accepts both renderings. Both flavors require
//! `number >= 1`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── VersionError ──────────────────────────────────────────────────────────────

/// Why a version string or literal failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("version is empty")]
    Empty,

    #[error("version number must be a positive integer")]
    NonPositiveNumber,

    #[error("version number {0:?} is not a base-10 integer")]
    MalformedNumber(String),

    #[error(r#"stage {0:?} is invalid, must be "alpha" or "beta""#)]
    InvalidStage(String),
}

// ── Stage ─────────────────────────────────────────────────────────────────────

/// Stability marker of a [`Version`].
///
/// Ordered by stability: `Alpha < Beta < Stable`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    #[default]
    Stable,
    Beta,
    Alpha,
}

impl Stage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "",
            Self::Beta => "beta",
            Self::Alpha => "alpha",
        }
    }

    const fn stability(self) -> u8 {
        match self {
            Self::Alpha => 0,
            Self::Beta => 1,
            Self::Stable => 2,
        }
    }
}

impl Ord for Stage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.stability().cmp(&other.stability())
    }
}

impl PartialOrd for Stage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            other => Err(VersionError::InvalidStage(other.to_string())),
        }
    }
}

// ── Version ───────────────────────────────────────────────────────────────────

/// A `(number, stage)` version.
///
/// Fields are public so literals can be written in catalogues and tests;
/// call [`Version::validate`] on anything that did not come from
/// [`Version::parse`].
///
/// Ordering compares `number` first, then `stage` (more stable is greater),
/// so equality here is exactly "compares equal".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub number: u64,
    pub stage: Stage,
}

impl Version {
    pub const fn new(number: u64, stage: Stage) -> Self {
        Self { number, stage }
    }

    pub const fn stable(number: u64) -> Self {
        Self::new(number, Stage::Stable)
    }

    pub const fn beta(number: u64) -> Self {
        Self::new(number, Stage::Beta)
    }

    pub const fn alpha(number: u64) -> Self {
        Self::new(number, Stage::Alpha)
    }

    /// Parse `(v)?<number>(-alpha|-beta)?`.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        if input.is_empty() {
            return Err(VersionError::Empty);
        }

        let unprefixed = input.strip_prefix('v').unwrap_or(input);
        let (number, stage) = match unprefixed.split_once('-') {
            Some((number, stage)) => (number, Some(stage)),
            None => (unprefixed, None),
        };

        let version = Self {
            number: parse_number(number)?,
            stage: stage.map_or(Ok(Stage::Stable), Stage::from_str)?,
        };
        version.validate()?;
        Ok(version)
    }

    /// Re-check the invariants of a literal.
    pub fn validate(&self) -> Result<(), VersionError> {
        if self.number < 1 {
            return Err(VersionError::NonPositiveNumber);
        }
        Ok(())
    }

    pub const fn is_stable(&self) -> bool {
        matches!(self.stage, Stage::Stable)
    }

    /// Three-way comparison, `number` first and then stability.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    /// Plugin rendering: `v<number>[-<stage>]`.
    pub fn prefixed(&self) -> String {
        format!("v{self}")
    }
}

fn parse_number(s: &str) -> Result<u64, VersionError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::MalformedNumber(s.to_string()));
    }
    let number: u64 = s
        .parse()
        .map_err(|_| VersionError::MalformedNumber(s.to_string()))?;
    if number == 0 {
        return Err(VersionError::NonPositiveNumber);
    }
    // "007" is not canonical and would not survive a round trip.
    if s.starts_with('0') {
        return Err(VersionError::MalformedNumber(s.to_string()));
    }
    Ok(number)
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_stable() {
            write!(f, "{}", self.number)
        } else {
            write!(f, "{}-{}", self.number, self.stage)
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
