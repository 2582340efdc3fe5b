//! Alias table
//!
//! Alternate names for canonical services. Resolution is exactly one hop:
//! an alias pointing at another alias is not followed.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The target of `name` if it is an alias, otherwise `name` itself.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.entries.contains_key(alias)
    }

    /// Insert or overwrite an alias
    pub fn insert(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.entries.insert(alias.into(), target.into());
    }

    /// Union with `entries`, overwriting existing aliases
    pub fn merge<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.entries.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_single_hop() {
        let mut aliases = AliasTable::new();
        aliases.insert("a", "b");
        aliases.insert("b", "c");

        assert_eq!(aliases.resolve("a"), "b");
        assert_eq!(aliases.resolve("b"), "c");
        assert_eq!(aliases.resolve("c"), "c");
    }

    #[test]
    fn test_many_aliases_one_target() {
        let mut aliases = AliasTable::new();
        aliases.merge(vec![
            ("mail".to_string(), "Mailer".to_string()),
            ("smtp".to_string(), "Mailer".to_string()),
        ]);

        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases.resolve("mail"), aliases.resolve("smtp"));
    }

    #[test]
    fn test_insert_overwrites() {
        let mut aliases = AliasTable::new();
        aliases.insert("mail", "Mailer");
        aliases.insert("mail", "Sendmail");
        assert_eq!(aliases.get("mail"), Some("Sendmail"));
    }
}
