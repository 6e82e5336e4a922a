//! Entry point for single-value generation.

use rand::Rng;
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::catalog::EnumCatalog;
use crate::errors::{GenerationError, Result};
use crate::generators::{
    GeneratedPrimitive, Generator, GeneratorContext, GeneratorRegistry,
};
use crate::generators::primitives;
use crate::registry::FormatRegistry;

/// Facade over the format registry, enum catalog, and category generators.
///
/// Read-only after construction; a single instance may be shared freely
/// across threads. Randomness is never shared: seeded calls own a private
/// generator, unseeded calls draw a fresh base seed from the thread-local
/// generator.
pub struct DataGenerator {
    registry: FormatRegistry,
    catalog: EnumCatalog,
    generators: GeneratorRegistry,
}

impl DataGenerator {
    /// Engine over the built-in registry and catalog.
    pub fn new() -> Self {
        Self::with_parts(FormatRegistry::new(), EnumCatalog::new())
    }

    /// Engine over injected registry and catalog state, so tests can
    /// substitute smaller tables without mutating shared state.
    pub fn with_parts(registry: FormatRegistry, catalog: EnumCatalog) -> Self {
        Self {
            registry,
            catalog,
            generators: GeneratorRegistry::new(),
        }
    }

    pub fn catalog(&self) -> &EnumCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Registered category ids, sorted.
    pub fn categories(&self) -> Vec<&'static str> {
        self.generators.generator_ids()
    }

    /// Generates one primitive for `category`.
    ///
    /// The locale is validated against the catalog when supplied and
    /// defaults to the category's first declared value when omitted. A
    /// fixed `seed` makes the call repeatable.
    pub fn generate(
        &self,
        category: &str,
        locale: Option<&str>,
        seed: Option<u64>,
    ) -> Result<GeneratedPrimitive> {
        let mut rng = rng_for(seed);
        self.generate_with_rng(category, locale, &mut rng)
    }

    /// Generates one primitive drawing randomness from a caller-owned
    /// generator.
    pub fn generate_with_rng(
        &self,
        category: &str,
        locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let generator = self
            .generators
            .generator(category)
            .ok_or_else(|| GenerationError::UnknownCategory(category.to_string()))?;
        let locale = self.resolve_locale(generator, category, locale)?;
        debug!(category, locale = ?locale, "generating primitive");

        let ctx = GeneratorContext {
            registry: &self.registry,
            catalog: &self.catalog,
            today: chrono::Utc::now().date_naive(),
        };
        generator.generate(&ctx, locale, rng)
    }

    /// Generates a phone number for the given country code.
    pub fn phone_number(&self, country: Option<&str>) -> Result<String> {
        self.generate("phone_number", country, None)
            .map(|generated| generated.render())
    }

    /// Generates a random date rendered in the given format.
    pub fn date(&self, format: Option<&str>) -> Result<String> {
        self.generate("date", format, None)
            .map(|generated| generated.render())
    }

    /// Generates a v4 identifier.
    pub fn uuid(&self) -> Result<String> {
        self.generate("uuid", None, None)
            .map(|generated| generated.render())
    }

    /// Generates an email address on the default domain.
    pub fn email(&self) -> Result<String> {
        self.generate("email", None, None)
            .map(|generated| generated.render())
    }

    /// Generates an alphanumeric token of the given length (default 10).
    pub fn token(&self, length: Option<usize>) -> Result<String> {
        let mut rng = rng_for(None);
        Ok(primitives::random_token(
            &mut rng,
            length.unwrap_or(primitives::DEFAULT_TOKEN_LENGTH),
        ))
    }

    fn resolve_locale<'a>(
        &'a self,
        generator: &dyn Generator,
        category: &str,
        locale: Option<&'a str>,
    ) -> Result<Option<&'a str>> {
        match generator.locale_category() {
            Some(catalog_category) => match locale {
                Some(value) => {
                    if self.catalog.validate(catalog_category, value)? {
                        Ok(Some(value))
                    } else {
                        Err(GenerationError::UnknownLocale {
                            category: category.to_string(),
                            locale: value.to_string(),
                        })
                    }
                }
                None => Ok(Some(self.catalog.default_value(catalog_category)?)),
            },
            None => match locale {
                // Categories without a locale dimension reject any key
                // rather than silently ignoring it.
                Some(value) => Err(GenerationError::UnknownLocale {
                    category: category.to_string(),
                    locale: value.to_string(),
                }),
                None => Ok(None),
            },
        }
    }
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Private generator for a call: seeded for reproducibility, or seeded from
/// the thread-local generator for ordinary use.
pub(crate) fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    ChaCha8Rng::seed_from_u64(seed)
}

/// FNV-style mix of a base seed and a string key.
pub(crate) fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Seed for one model field generation attempt.
pub(crate) fn hash_field_seed(base: u64, field: &str, attempt: u32) -> u64 {
    hash_seed(base, field) ^ attempt as u64
}
