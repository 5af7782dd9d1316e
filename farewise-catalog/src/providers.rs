use std::collections::HashMap;

use crate::fixtures::Company;

/// Legacy provider identifier: lowercase name with spaces turned into hyphens.
///
/// Only used for providers missing from the directory. It does not match
/// every company id: "Peace Mass Transit" is `peace-mass`, not
/// `peace-mass-transit`.
pub fn legacy_provider_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Mapping from provider display name to stable provider identifier,
/// built once when the store is constructed.
#[derive(Debug, Clone, Default)]
pub struct ProviderDirectory {
    by_name: HashMap<String, String>,
}

impl ProviderDirectory {
    pub fn from_companies(companies: &[Company]) -> Self {
        let by_name = companies
            .iter()
            .map(|c| (name_key(&c.name), c.id.clone()))
            .collect();
        Self { by_name }
    }

    /// Stable identifier registered for `provider`, if any
    pub fn lookup(&self, provider: &str) -> Option<&str> {
        self.by_name.get(&name_key(provider)).map(String::as_str)
    }

    /// Identifier for `provider`, falling back to the legacy slug for
    /// names the directory does not know.
    pub fn resolve(&self, provider: &str) -> String {
        match self.lookup(provider) {
            Some(id) => id.to_string(),
            None => legacy_provider_slug(provider),
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_legacy_slug() {
        assert_eq!(legacy_provider_slug("GUO Transport"), "guo-transport");
        assert_eq!(legacy_provider_slug("ABC Transport"), "abc-transport");
        assert_eq!(legacy_provider_slug("Peace Mass Transit"), "peace-mass-transit");
        assert_eq!(legacy_provider_slug("God is Good Motors"), "god-is-good-motors");
    }

    #[test]
    fn test_legacy_slug_misses_some_fixture_ids() {
        let mismatched: Vec<String> = fixtures::companies()
            .into_iter()
            .filter(|c| legacy_provider_slug(&c.name) != c.id)
            .map(|c| c.id)
            .collect();
        assert_eq!(mismatched, vec!["peace-mass", "gigm", "enugu-city", "ifesinachi"]);
    }

    #[test]
    fn test_directory_resolves_every_fixture_provider() {
        let directory = ProviderDirectory::from_companies(&fixtures::companies());
        assert_eq!(directory.len(), 6);
        assert_eq!(directory.resolve("Peace Mass Transit"), "peace-mass");
        assert_eq!(directory.resolve("god is good  motors"), "gigm");
        assert_eq!(directory.resolve("GUO Transport"), "guo-transport");

        for fare in fixtures::transport_fares() {
            assert!(directory.lookup(&fare.provider).is_some(), "{} not mapped", fare.provider);
        }
    }

    #[test]
    fn test_directory_falls_back_to_slug() {
        let directory = ProviderDirectory::from_companies(&fixtures::companies());
        assert_eq!(directory.lookup("Young Shall Grow"), None);
        assert_eq!(directory.resolve("Young Shall Grow"), "young-shall-grow");
    }
}
