//! Plugin capability model.
//!
//! A plugin declares up front which subcommands it contributes. The command
//! layer queries the set instead of probing plugins at run time.
//!
//! # Adding a New Capability
//!
//! 1. Add a variant to [`Capability`] and extend [`Capability::ALL`]
//! 2. Give it a bit in [`Capability::bit`]
//! 3. That's it. Display, parsing and union derive from those two places

use std::fmt;

use serde::{Serialize, Serializer};

// ── Capability ───────────────────────────────────────────────────────────────

/// A subcommand a plugin can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Init,
    CreateApi,
    CreateWebhook,
    Edit,
}

impl Capability {
    /// Every capability, in subcommand display order.
    pub const ALL: [Capability; 4] = [
        Capability::Init,
        Capability::CreateApi,
        Capability::CreateWebhook,
        Capability::Edit,
    ];

    /// The subcommand path this capability answers to.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CreateApi => "create api",
            Self::CreateWebhook => "create webhook",
            Self::Edit => "edit",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Init => 1 << 0,
            Self::CreateApi => 1 << 1,
            Self::CreateWebhook => 1 << 2,
            Self::Edit => 1 << 3,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Capability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ── Capabilities ─────────────────────────────────────────────────────────────

/// Set of [`Capability`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const fn none() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b1111)
    }

    /// Init, create api and create webhook: the usual language plugin.
    pub const fn scaffolding() -> Self {
        Self::none()
            .with(Capability::Init)
            .with(Capability::CreateApi)
            .with(Capability::CreateWebhook)
    }

    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(&self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (i, capability) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(capability.as_str())?;
        }
        Ok(())
    }
}

impl Serialize for Capabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_and_contains() {
        let caps = Capabilities::none().with(Capability::Edit);
        assert!(caps.contains(Capability::Edit));
        assert!(!caps.contains(Capability::Init));
    }

    #[test]
    fn union_merges_sets() {
        let a = Capabilities::none().with(Capability::Init);
        let b = Capabilities::none().with(Capability::CreateApi);
        let merged = a.union(b);
        assert_eq!(
            merged.iter().collect::<Vec<_>>(),
            vec![Capability::Init, Capability::CreateApi]
        );
    }

    #[test]
    fn scaffolding_excludes_edit() {
        let caps = Capabilities::scaffolding();
        assert!(caps.contains(Capability::CreateWebhook));
        assert!(!caps.contains(Capability::Edit));
        assert_eq!(caps.union(Capabilities::none().with(Capability::Edit)), Capabilities::all());
    }

    #[test]
    fn display_lists_subcommands() {
        assert_eq!(Capabilities::none().to_string(), "-");
        assert_eq!(
            Capabilities::all().to_string(),
            "init, create api, create webhook, edit"
        );
    }

    #[test]
    fn collects_from_iterator() {
        let caps: Capabilities = [Capability::Init, Capability::Init, Capability::Edit]
            .into_iter()
            .collect();
        assert_eq!(caps.iter().count(), 2);
    }
}
