use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An authenticated principal: username plus group memberships.
///
/// Produced by whatever authenticated the request; nothing here checks
/// credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    #[serde(default)]
    pub groups: BTreeSet<String>,
}

impl Identity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            groups: BTreeSet::new(),
        }
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// Exact, case-sensitive group membership.
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    /// Reject identities that can't name a principal.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            bail!("identity username must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_exact_match() {
        let id = Identity::new("kubernetes-admin").with_groups(["system:masters"]);
        assert!(id.in_group("system:masters"));
        assert!(!id.in_group("System:Masters"));
        assert!(!id.in_group("system:masters "));
    }

    #[test]
    fn duplicate_groups_collapse() {
        let id = Identity::new("u").with_groups(["a", "b", "a"]);
        assert_eq!(id.groups.len(), 2);
    }

    #[test]
    fn validate_rejects_empty_username() {
        assert!(Identity::new("").validate().is_err());
        assert!(Identity::new("alice").validate().is_ok());
    }

    #[test]
    fn deserialize_without_groups() {
        let id: Identity = serde_yaml::from_str("username: alice\n").unwrap();
        assert_eq!(id.username, "alice");
        assert!(id.groups.is_empty());
    }
}
