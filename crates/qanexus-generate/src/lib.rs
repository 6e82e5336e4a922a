//! Locale-aware synthetic data generation for QA fixtures.
//!
//! This crate produces format-compliant primitives (phone numbers, dates,
//! identifiers) under country/locale-specific rules, and assembles composite
//! models from multiple generated fields while preserving cross-field
//! consistency. Closed enumerations and constant format tables drive every
//! choice; unknown locales and categories fail loudly instead of falling
//! back to defaults.

pub mod catalog;
pub mod dates;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod registry;
pub mod template;

use std::sync::OnceLock;

pub use catalog::EnumCatalog;
pub use dates::{DateFormat, MonthAbbrev};
pub use engine::DataGenerator;
pub use errors::{GenerationError, Result};
pub use generators::{GeneratedPrimitive, PrimitiveValue};
pub use model::{
    CrossFieldRule, FieldKind, FieldSpec, Model, ModelAssembler, ModelSchema, RuleKind,
};
pub use registry::{CountryCode, FormatRegistry};
pub use template::{DigitSet, FormatTemplate, Slot};

/// Process-wide engine over the built-in registry and catalog, initialized
/// on first use and read-only thereafter.
fn shared_engine() -> &'static DataGenerator {
    static ENGINE: OnceLock<DataGenerator> = OnceLock::new();
    ENGINE.get_or_init(DataGenerator::new)
}

/// Generates a phone number in the given country's format.
pub fn generate_phone_number(country_code: &str) -> Result<String> {
    shared_engine().phone_number(Some(country_code))
}

/// Generates a random date, rendered as `yyyy-MM-dd` when no format is given.
pub fn generate_date(format: Option<&str>) -> Result<String> {
    shared_engine().date(format)
}

/// Generates a v4 identifier.
pub fn generate_uuid() -> Result<String> {
    shared_engine().uuid()
}

/// Generates an email address on the default domain.
pub fn generate_email() -> Result<String> {
    shared_engine().email()
}

/// Generates an alphanumeric string of the given length (default 10).
pub fn generate_string(length: Option<usize>) -> Result<String> {
    shared_engine().token(length)
}

/// Builds a composite model; without a schema, builds the default
/// identifier/issue-date/expiry-date model.
pub fn generate_complex_data(schema: Option<&ModelSchema>) -> Result<Model> {
    let assembler = ModelAssembler::new(shared_engine());
    match schema {
        Some(schema) => assembler.build(schema, None),
        None => assembler.build(&ModelSchema::default_complex(), None),
    }
}
