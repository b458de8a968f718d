//! Trust Resolver
//!
//! Maps a provider identity to a trust level. The default policy is a
//! constant `medium`; a table-backed resolver is built from the rules'
//! trust table, and anything else (a reputation service, say) can plug in
//! through the trait without touching aggregation.

use std::collections::HashMap;

use super::rules::TrustTable;
use super::types::TrustLevel;

/// Pure lookup `provider -> trust level`
pub trait TrustResolver: Send + Sync {
    fn trust_level(&self, provider: &str) -> TrustLevel;
}

/// Same level for every provider
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTrustResolver {
    level: TrustLevel,
}

impl FixedTrustResolver {
    pub fn new(level: TrustLevel) -> Self {
        Self { level }
    }
}

impl TrustResolver for FixedTrustResolver {
    fn trust_level(&self, _provider: &str) -> TrustLevel {
        self.level
    }
}

/// Case-insensitive per-provider table with a fallback level
#[derive(Debug, Clone, Default)]
pub struct TableTrustResolver {
    levels: HashMap<String, TrustLevel>,
    fallback: TrustLevel,
}

impl TableTrustResolver {
    pub fn new(fallback: TrustLevel) -> Self {
        Self {
            levels: HashMap::new(),
            fallback,
        }
    }

    pub fn from_table(table: &TrustTable) -> Self {
        let mut resolver = Self::new(table.default_level);
        for (provider, level) in &table.providers {
            resolver.set(provider, *level);
        }
        resolver
    }

    pub fn set(&mut self, provider: &str, level: TrustLevel) {
        self.levels.insert(normalize_key(provider), level);
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl TrustResolver for TableTrustResolver {
    fn trust_level(&self, provider: &str) -> TrustLevel {
        self.levels
            .get(&normalize_key(provider))
            .copied()
            .unwrap_or(self.fallback)
    }
}

fn normalize_key(provider: &str) -> String {
    provider.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_defaults_to_medium() {
        let resolver = FixedTrustResolver::default();
        assert_eq!(resolver.trust_level("virustotal"), TrustLevel::Medium);
        assert_eq!(resolver.trust_level(""), TrustLevel::Medium);
    }

    #[test]
    fn test_empty_table_behaves_like_fixed() {
        let resolver = TableTrustResolver::from_table(&TrustTable::default());
        assert!(resolver.is_empty());
        assert_eq!(resolver.trust_level("anything"), TrustLevel::Medium);
    }

    #[test]
    fn test_table_lookup_is_case_insensitive() {
        let mut table = TrustTable::default();
        table.providers.insert("VirusTotal".to_string(), TrustLevel::High);
        table.providers.insert("pastebin-scraper".to_string(), TrustLevel::Low);

        let resolver = TableTrustResolver::from_table(&table);
        assert_eq!(resolver.len(), 2);
        assert_eq!(resolver.trust_level("virustotal"), TrustLevel::High);
        assert_eq!(resolver.trust_level(" VIRUSTOTAL "), TrustLevel::High);
        assert_eq!(resolver.trust_level("pastebin-scraper"), TrustLevel::Low);
        assert_eq!(resolver.trust_level("otx"), TrustLevel::Medium);
    }
}
