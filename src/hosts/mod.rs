//! Host set registry
//!
//! Keeps the document's host sets by name. Each set becomes one output file.

pub mod specifier;

use std::collections::BTreeMap;

use crate::config::HostSetDef;
use crate::error::GenerateError;

pub use specifier::{HostSpec, DEFAULT_ROOT_PREFIX};

/// Hosts and queries of one set, with optional connection overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSet {
    /// Query names in declaration order
    pub query_names: Vec<String>,
    /// Raw host specifiers in declaration order
    pub hosts: Vec<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub url_template: Option<String>,
}

impl From<HostSetDef> for HostSet {
    fn from(def: HostSetDef) -> Self {
        Self {
            query_names: def.query_names,
            hosts: def.hosts,
            username: def.username,
            password: def.password,
            url_template: def.url_template,
        }
    }
}

/// Host sets indexed by name
#[derive(Debug, Clone, Default)]
pub struct HostSetRegistry {
    sets: BTreeMap<String, HostSet>,
}

impl HostSetRegistry {
    /// Index `sets` by name; a repeated name replaces the earlier one
    pub fn new(sets: impl IntoIterator<Item = HostSetDef>) -> Self {
        let mut registry = BTreeMap::new();

        for def in sets {
            let name = def.setname.clone();
            if registry.insert(name.clone(), HostSet::from(def)).is_some() {
                tracing::warn!(set = %name, "Duplicate host set name, keeping the last one");
            }
        }

        Self { sets: registry }
    }

    /// Names of all registered sets, sorted
    pub fn set_names(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }

    /// Look up a set by name
    ///
    /// # Errors
    /// Returns `GenerateError::UnknownSet` if no set has this name
    pub fn get_set(&self, name: &str) -> Result<&HostSet, GenerateError> {
        self.sets
            .get(name)
            .ok_or_else(|| GenerateError::UnknownSet(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, hosts: &[&str]) -> HostSetDef {
        HostSetDef {
            setname: name.to_string(),
            query_names: vec!["heap".to_string()],
            hosts: hosts.iter().map(|h| h.to_string()).collect(),
            username: None,
            password: None,
            url_template: None,
        }
    }

    #[test]
    fn test_registry_lookup() {
        let mut prod = def("prod", &["app1", "app2"]);
        prod.username = Some("monitor".to_string());
        let registry = HostSetRegistry::new(vec![prod, def("staging", &["stage1"])]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.set_names(), vec!["prod", "staging"]);

        let set = registry.get_set("prod").unwrap();
        assert_eq!(set.hosts, vec!["app1", "app2"]);
        assert_eq!(set.username.as_deref(), Some("monitor"));
        assert!(set.password.is_none());
        assert!(set.url_template.is_none());
    }

    #[test]
    fn test_unknown_set() {
        let registry = HostSetRegistry::new(vec![def("prod", &["app1"])]);
        assert!(matches!(
            registry.get_set("qa"),
            Err(GenerateError::UnknownSet(ref name)) if name == "qa"
        ));
    }

    #[test]
    fn test_duplicate_set_last_wins() {
        let registry = HostSetRegistry::new(vec![def("prod", &["old"]), def("prod", &["new"])]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_set("prod").unwrap().hosts, vec!["new"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = HostSetRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.set_names().is_empty());
    }
}
