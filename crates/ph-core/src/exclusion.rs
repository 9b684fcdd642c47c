use std::collections::BTreeSet;

/// Usernames that must never be proposed for deletion.
///
/// Matching is case-insensitive because account names are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionPolicy {
    names: BTreeSet<String>,
}

impl ExclusionPolicy {
    pub fn new<I, S>(builtin: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::default().with_additional(builtin)
    }

    /// Extend the policy with caller-supplied names.
    pub fn with_additional<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names.extend(
            names
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty()),
        );
        self
    }

    pub fn is_excluded(&self, username: &str) -> bool {
        self.names.contains(&username.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
