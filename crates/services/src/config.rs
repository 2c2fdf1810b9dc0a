use std::env;

use prep_core::sampling::TEST_SIZE;

/// Sections in the shipped handbook.
pub const DEFAULT_TOTAL_SECTIONS: usize = 51;
/// Percentage at or above which a quiz counts as passed.
pub const DEFAULT_PASS_PERCENT: u32 = 80;
pub const DEFAULT_DB_URL: &str = "sqlite:prep.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
    pub total_sections: usize,
    pub test_size: usize,
    pub pass_percent: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DB_URL.into(),
            total_sections: DEFAULT_TOTAL_SECTIONS,
            test_size: TEST_SIZE,
            pass_percent: DEFAULT_PASS_PERCENT,
        }
    }
}

impl StoreConfig {
    /// Read `PREP_DB_URL`, `PREP_TOTAL_SECTIONS`, `PREP_TEST_SIZE` and
    /// `PREP_PASS_PERCENT`. Missing or unparseable values keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let database_url = lookup("PREP_DB_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.database_url);
        let total_sections = lookup("PREP_TOTAL_SECTIONS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.total_sections);
        let test_size = lookup("PREP_TEST_SIZE")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.test_size);
        let pass_percent = lookup("PREP_PASS_PERCENT")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|p| *p <= 100)
            .unwrap_or(defaults.pass_percent);

        Self {
            database_url,
            total_sections,
            test_size,
            pass_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(StoreConfig::from_lookup(lookup_from(&[])), StoreConfig::default());
    }

    #[test]
    fn overrides_and_bad_values() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("PREP_DB_URL", "sqlite::memory:"),
            ("PREP_TOTAL_SECTIONS", "12"),
            ("PREP_TEST_SIZE", "0"),
            ("PREP_PASS_PERCENT", "140"),
        ]));
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.total_sections, 12);
        assert_eq!(config.test_size, TEST_SIZE);
        assert_eq!(config.pass_percent, DEFAULT_PASS_PERCENT);
    }
}
