//! Shared-instance policy
//!
//! Decides whether a freshly built instance is cached for reuse.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedPolicy {
    flags: BTreeMap<String, bool>,
    shared_by_default: bool,
}

impl SharedPolicy {
    pub fn new(shared_by_default: bool) -> Self {
        Self {
            flags: BTreeMap::new(),
            shared_by_default,
        }
    }

    /// The explicit flag for `name`, falling back to the global default
    pub fn should_cache(&self, name: &str) -> bool {
        self.flag(name).unwrap_or(self.shared_by_default)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Insert or overwrite a flag
    pub fn insert(&mut self, name: impl Into<String>, flag: bool) {
        self.flags.insert(name.into(), flag);
    }

    /// Union with `flags`, overwriting existing ones
    pub fn merge<I>(&mut self, flags: I)
    where
        I: IntoIterator<Item = (String, bool)>,
    {
        self.flags.extend(flags);
    }

    pub fn shared_by_default(&self) -> bool {
        self.shared_by_default
    }

    pub fn set_shared_by_default(&mut self, shared_by_default: bool) {
        self.shared_by_default = shared_by_default;
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<String, bool> {
        self.flags.clone()
    }
}

impl Default for SharedPolicy {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shares_everything() {
        let policy = SharedPolicy::default();
        assert!(policy.shared_by_default());
        assert!(policy.should_cache("anything"));
        assert_eq!(policy.flag("anything"), None);
    }

    #[test]
    fn test_flag_wins_over_default() {
        let mut policy = SharedPolicy::new(false);
        policy.insert("Session", true);
        policy.insert("Request", false);

        assert!(policy.should_cache("Session"));
        assert!(!policy.should_cache("Request"));
        assert!(!policy.should_cache("Other"));

        policy.set_shared_by_default(true);
        assert!(!policy.should_cache("Request"));
        assert!(policy.should_cache("Other"));
    }
}
