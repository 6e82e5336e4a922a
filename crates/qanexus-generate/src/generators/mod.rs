//! Generator trait, registry, and the values generators produce.

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rand::RngCore;

use crate::catalog::EnumCatalog;
use crate::dates::DateFormat;
use crate::errors::Result;
use crate::registry::FormatRegistry;

pub mod locale;
pub mod primitives;

/// Value produced for a single generated field.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    Text(String),
    Date { value: NaiveDate, format: DateFormat },
    Time(NaiveTime),
    Uuid(uuid::Uuid),
    Bool(bool),
}

impl PrimitiveValue {
    /// Renders the value in its canonical textual form.
    pub fn render(&self) -> String {
        match self {
            PrimitiveValue::Text(value) => value.clone(),
            PrimitiveValue::Date { value, format } => format.render(*value),
            PrimitiveValue::Time(value) => value.format("%H:%M:%S").to_string(),
            PrimitiveValue::Uuid(value) => value.to_string(),
            PrimitiveValue::Bool(value) => value.to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrimitiveValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Calendar view of the value. Text parses as `yyyy-MM-dd` so literal
    /// fields can anchor date ordering rules.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            PrimitiveValue::Date { value, .. } => Some(*value),
            PrimitiveValue::Text(value) => {
                NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
            }
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            PrimitiveValue::Time(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrimitiveValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// An immutable generated value tagged with the category and locale it was
/// generated under. Carries no references into registry or catalog state.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPrimitive {
    category: String,
    locale: Option<String>,
    value: PrimitiveValue,
}

impl GeneratedPrimitive {
    pub fn new(category: &str, locale: Option<&str>, value: PrimitiveValue) -> Self {
        Self {
            category: category.to_string(),
            locale: locale.map(str::to_string),
            value,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn value(&self) -> &PrimitiveValue {
        &self.value
    }

    pub fn render(&self) -> String {
        self.value.render()
    }

    pub fn into_value(self) -> PrimitiveValue {
        self.value
    }
}

impl fmt::Display for GeneratedPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Shared read-only state handed to every generator call.
pub struct GeneratorContext<'a> {
    pub registry: &'a FormatRegistry,
    pub catalog: &'a EnumCatalog,
    pub today: NaiveDate,
}

/// A category-specific value generator.
pub trait Generator: Send + Sync {
    /// Category id this generator serves, e.g. `phone_number`.
    fn id(&self) -> &'static str;

    /// Catalog category constraining this generator's locale argument, if
    /// it takes one.
    fn locale_category(&self) -> Option<&'static str> {
        None
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive>;
}

/// Registry of category generators, keyed by id.
pub struct GeneratorRegistry {
    generators: HashMap<&'static str, Box<dyn Generator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            generators: HashMap::new(),
        };
        locale::register(&mut registry);
        primitives::register(&mut registry);
        registry
    }

    pub fn register_generator(&mut self, generator: Box<dyn Generator>) {
        self.generators.insert(generator.id(), generator);
    }

    pub fn generator(&self, id: &str) -> Option<&dyn Generator> {
        self.generators.get(id).map(Box::as_ref)
    }

    /// Registered category ids, sorted.
    pub fn generator_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.generators.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
