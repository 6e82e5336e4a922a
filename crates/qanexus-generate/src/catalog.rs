//! Closed catalogs of categorical values used to constrain generation.

use crate::dates::{DateFormat, MonthAbbrev};
use crate::errors::{GenerationError, Result};
use crate::generators::locale::UuidVersion;
use crate::registry::CountryCode;

/// Catalog category constraining phone number locales.
pub const COUNTRY: &str = "country";
/// Catalog category constraining date render formats.
pub const DATE_FORMAT: &str = "date_format";
/// Catalog category constraining generated identifier versions.
pub const UUID_VERSION: &str = "uuid_version";
/// Catalog category listing month abbreviations.
pub const MONTH_ABBREV: &str = "month_abbrev";

#[derive(Debug, Clone)]
struct CatalogEntry {
    name: String,
    values: Vec<String>,
}

/// Ordered, read-only catalog of closed value sets.
///
/// Membership tests are exact-match and case-sensitive. The first declared
/// value of a category is its default, keeping generation deterministic
/// when a caller omits the locale argument.
#[derive(Debug, Clone)]
pub struct EnumCatalog {
    entries: Vec<CatalogEntry>,
}

impl EnumCatalog {
    /// Catalog seeded from the built-in closed enums.
    pub fn new() -> Self {
        Self::with_entries(vec![
            (
                COUNTRY.to_string(),
                CountryCode::ALL
                    .iter()
                    .map(|country| country.as_str().to_string())
                    .collect(),
            ),
            (
                DATE_FORMAT.to_string(),
                DateFormat::ALL
                    .iter()
                    .map(|format| format.as_str().to_string())
                    .collect(),
            ),
            (
                UUID_VERSION.to_string(),
                UuidVersion::ALL
                    .iter()
                    .map(|version| version.as_str().to_string())
                    .collect(),
            ),
            (
                MONTH_ABBREV.to_string(),
                MonthAbbrev::ALL
                    .iter()
                    .map(|month| month.as_str().to_string())
                    .collect(),
            ),
        ])
    }

    /// Catalog over caller-supplied categories, preserving declaration order.
    pub fn with_entries(entries: Vec<(String, Vec<String>)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, values)| CatalogEntry { name, values })
                .collect(),
        }
    }

    /// Registered category names, in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Whether `value` belongs to the category's closed set.
    pub fn validate(&self, category: &str, value: &str) -> Result<bool> {
        let entry = self.entry(category)?;
        Ok(entry.values.iter().any(|allowed| allowed == value))
    }

    /// Allowed values of a category, in declaration order.
    pub fn values(&self, category: &str) -> Result<&[String]> {
        Ok(self.entry(category)?.values.as_slice())
    }

    /// Default value of a category: its first declared member.
    pub fn default_value(&self, category: &str) -> Result<&str> {
        let entry = self.entry(category)?;
        entry
            .values
            .first()
            .map(String::as_str)
            .ok_or_else(|| {
                GenerationError::Constraint(format!("category '{category}' declares no values"))
            })
    }

    fn entry(&self, category: &str) -> Result<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == category)
            .ok_or_else(|| GenerationError::UnknownCategory(category.to_string()))
    }
}

impl Default for EnumCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_matches_declared_values_exactly() {
        let catalog = EnumCatalog::new();
        for category in [COUNTRY, DATE_FORMAT, UUID_VERSION, MONTH_ABBREV] {
            let values = catalog.values(category).expect("registered category");
            for value in values {
                assert!(catalog.validate(category, value).expect("registered"));
            }
        }
        assert!(!catalog.validate(COUNTRY, "ZZ").expect("registered"));
        // Case-sensitive: lowercase country codes are not members.
        assert!(!catalog.validate(COUNTRY, "us").expect("registered"));
    }

    #[test]
    fn unknown_category_fails_loudly() {
        let catalog = EnumCatalog::new();
        assert!(matches!(
            catalog.validate("currency", "USD"),
            Err(GenerationError::UnknownCategory(_))
        ));
        assert!(matches!(
            catalog.values("currency"),
            Err(GenerationError::UnknownCategory(_))
        ));
    }

    #[test]
    fn default_is_the_first_declared_value() {
        let catalog = EnumCatalog::new();
        assert_eq!(catalog.default_value(COUNTRY).expect("registered"), "US");
        assert_eq!(
            catalog.default_value(DATE_FORMAT).expect("registered"),
            "yyyy-MM-dd"
        );

        let custom = EnumCatalog::with_entries(vec![(
            "environment".to_string(),
            vec!["staging".to_string(), "production".to_string()],
        )]);
        assert_eq!(
            custom.default_value("environment").expect("registered"),
            "staging"
        );
    }
}
