//! Locale/format registry: country codes mapped to phone number templates.

use std::collections::HashMap;
use std::fmt;

use crate::errors::{GenerationError, Result};
use crate::template::FormatTemplate;

/// Country whose phone number formats the registry knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountryCode {
    Us,
    Ca,
    Gb,
    De,
    Fr,
    Br,
    In,
    Jp,
    Au,
    Mx,
}

impl CountryCode {
    /// Every supported country, in declaration order. The first entry is the
    /// catalog default when a caller omits the locale.
    pub const ALL: &'static [CountryCode] = &[
        Self::Us,
        Self::Ca,
        Self::Gb,
        Self::De,
        Self::Fr,
        Self::Br,
        Self::In,
        Self::Jp,
        Self::Au,
        Self::Mx,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "US" => Some(Self::Us),
            "CA" => Some(Self::Ca),
            "GB" => Some(Self::Gb),
            "DE" => Some(Self::De),
            "FR" => Some(Self::Fr),
            "BR" => Some(Self::Br),
            "IN" => Some(Self::In),
            "JP" => Some(Self::Jp),
            "AU" => Some(Self::Au),
            "MX" => Some(Self::Mx),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Ca => "CA",
            Self::Gb => "GB",
            Self::De => "DE",
            Self::Fr => "FR",
            Self::Br => "BR",
            Self::In => "IN",
            Self::Jp => "JP",
            Self::Au => "AU",
            Self::Mx => "MX",
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in phone number format table. NANP area codes never start with 0
/// or 1; GB carries two templates to exercise uniform template selection.
const BUILTIN_FORMATS: &[(CountryCode, &[&str])] = &[
    (CountryCode::Us, &["+1-[2-9]##-###-####"]),
    (CountryCode::Ca, &["+1-[2-9]##-###-####"]),
    (CountryCode::Gb, &["+44-7###-######", "+44-20-####-####"]),
    (CountryCode::De, &["+49-1##-#######"]),
    (CountryCode::Fr, &["+33-[67]-##-##-##-##"]),
    (CountryCode::Br, &["+55-##-9####-####"]),
    (CountryCode::In, &["+91-[6-9]####-#####"]),
    (CountryCode::Jp, &["+81-[789]0-####-####"]),
    (CountryCode::Au, &["+61-4##-###-###"]),
    (CountryCode::Mx, &["+52-##-####-####"]),
];

/// Read-only map from country code to its compiled format templates.
///
/// Built once and shared by reference; tests may substitute a smaller
/// registry via [`FormatRegistry::with_formats`] without touching the
/// built-in table.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    formats: HashMap<CountryCode, Vec<FormatTemplate>>,
}

impl FormatRegistry {
    /// Registry over the built-in format table.
    pub fn new() -> Self {
        Self::with_formats(BUILTIN_FORMATS).expect("built-in phone formats are valid")
    }

    /// Registry over a caller-supplied format table.
    pub fn with_formats(entries: &[(CountryCode, &[&str])]) -> Result<Self> {
        let mut formats = HashMap::new();
        for (country, patterns) in entries {
            let mut templates = Vec::with_capacity(patterns.len());
            for pattern in *patterns {
                templates.push(FormatTemplate::compile(pattern)?);
            }
            formats.insert(*country, templates);
        }
        Ok(Self { formats })
    }

    /// Templates registered for a country. Fails with `UnknownLocale` when
    /// the country has no templates; never falls back to a default.
    pub fn lookup(&self, country: CountryCode) -> Result<&[FormatTemplate]> {
        match self.formats.get(&country) {
            Some(templates) if !templates.is_empty() => Ok(templates.as_slice()),
            _ => Err(GenerationError::UnknownLocale {
                category: "phone_number".to_string(),
                locale: country.as_str().to_string(),
            }),
        }
    }

    /// Registered countries, ordered by their canonical string form.
    pub fn countries(&self) -> Vec<CountryCode> {
        let mut countries: Vec<CountryCode> = self.formats.keys().copied().collect();
        countries.sort_by_key(|country| country.as_str());
        countries
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
