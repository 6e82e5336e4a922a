//! Locale-aware generators: values whose shape depends on a catalog choice.

use std::fmt;

use rand::Rng;
use rand::RngCore;
use tracing::trace;

use crate::catalog;
use crate::dates::{self, DateFormat};
use crate::errors::{GenerationError, Result};
use crate::generators::{GeneratedPrimitive, Generator, GeneratorContext, PrimitiveValue};
use crate::registry::CountryCode;

pub fn register(registry: &mut crate::generators::GeneratorRegistry) {
    registry.register_generator(Box::new(PhoneNumberGenerator));
    registry.register_generator(Box::new(DateGenerator));
    registry.register_generator(Box::new(UuidGenerator));
}

/// Identifier versions the `uuid` category can produce. Both derive all
/// randomness from the caller's generator, so seeded runs reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UuidVersion {
    V4,
    V5,
}

impl UuidVersion {
    pub const ALL: &'static [UuidVersion] = &[Self::V4, Self::V5];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "v4" => Some(Self::V4),
            "v5" => Some(Self::V5),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V4 => "v4",
            Self::V5 => "v5",
        }
    }
}

impl fmt::Display for UuidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct PhoneNumberGenerator;

impl Generator for PhoneNumberGenerator {
    fn id(&self) -> &'static str {
        "phone_number"
    }

    fn locale_category(&self) -> Option<&'static str> {
        Some(catalog::COUNTRY)
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let code = match locale {
            Some(value) => value,
            None => ctx.catalog.default_value(catalog::COUNTRY)?,
        };
        let country = CountryCode::parse(code).ok_or_else(|| GenerationError::UnknownLocale {
            category: self.id().to_string(),
            locale: code.to_string(),
        })?;
        let templates = ctx.registry.lookup(country)?;
        let template = &templates[rng.random_range(0..templates.len())];
        trace!(country = %country, pattern = template.pattern(), "filling phone template");
        let value = template.generate(rng)?;
        Ok(GeneratedPrimitive::new(
            self.id(),
            Some(country.as_str()),
            PrimitiveValue::Text(value),
        ))
    }
}

struct DateGenerator;

impl Generator for DateGenerator {
    fn id(&self) -> &'static str {
        "date"
    }

    fn locale_category(&self) -> Option<&'static str> {
        Some(catalog::DATE_FORMAT)
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let pattern = match locale {
            Some(value) => value,
            None => ctx.catalog.default_value(catalog::DATE_FORMAT)?,
        };
        let format =
            DateFormat::parse(pattern).ok_or_else(|| GenerationError::UnknownLocale {
                category: self.id().to_string(),
                locale: pattern.to_string(),
            })?;
        let value = dates::sample_date(rng, ctx.today);
        Ok(GeneratedPrimitive::new(
            self.id(),
            Some(format.as_str()),
            PrimitiveValue::Date { value, format },
        ))
    }
}

struct UuidGenerator;

impl Generator for UuidGenerator {
    fn id(&self) -> &'static str {
        "uuid"
    }

    fn locale_category(&self) -> Option<&'static str> {
        Some(catalog::UUID_VERSION)
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let requested = match locale {
            Some(value) => value,
            None => ctx.catalog.default_value(catalog::UUID_VERSION)?,
        };
        let version =
            UuidVersion::parse(requested).ok_or_else(|| GenerationError::UnknownLocale {
                category: self.id().to_string(),
                locale: requested.to_string(),
            })?;

        let mut bytes = [0_u8; 16];
        rng.fill_bytes(&mut bytes);
        let value = match version {
            UuidVersion::V4 => {
                bytes[6] = (bytes[6] & 0x0f) | 0x40;
                bytes[8] = (bytes[8] & 0x3f) | 0x80;
                uuid::Uuid::from_bytes(bytes)
            }
            UuidVersion::V5 => uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, &bytes),
        };
        Ok(GeneratedPrimitive::new(
            self.id(),
            Some(version.as_str()),
            PrimitiveValue::Uuid(value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::catalog::EnumCatalog;
    use crate::registry::FormatRegistry;

    use super::*;

    #[test]
    fn uuid_versions_are_tagged_and_reproducible() {
        let registry = FormatRegistry::new();
        let catalog = EnumCatalog::new();
        let ctx = GeneratorContext {
            registry: &registry,
            catalog: &catalog,
            today: NaiveDate::from_ymd_opt(2026, 8, 6).expect("valid date"),
        };
        let generator = UuidGenerator;

        let mut first = ChaCha8Rng::seed_from_u64(9);
        let mut second = ChaCha8Rng::seed_from_u64(9);
        let a = generator
            .generate(&ctx, Some("v4"), &mut first)
            .expect("generates");
        let b = generator
            .generate(&ctx, Some("v4"), &mut second)
            .expect("generates");
        assert_eq!(a, b);
        assert_eq!(a.locale(), Some("v4"));

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let v5 = generator
            .generate(&ctx, Some("v5"), &mut rng)
            .expect("generates");
        assert_eq!(v5.locale(), Some("v5"));
        assert!(matches!(
            generator.generate(&ctx, Some("v7"), &mut rng),
            Err(GenerationError::UnknownLocale { .. })
        ));
    }

    #[test]
    fn dates_default_to_the_first_catalog_format() {
        let registry = FormatRegistry::new();
        let catalog = EnumCatalog::new();
        let ctx = GeneratorContext {
            registry: &registry,
            catalog: &catalog,
            today: NaiveDate::from_ymd_opt(2026, 8, 6).expect("valid date"),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let generated = DateGenerator
            .generate(&ctx, None, &mut rng)
            .expect("generates");
        assert_eq!(generated.locale(), Some("yyyy-MM-dd"));
        let date = generated.value().as_date().expect("date value");
        assert!(date <= ctx.today);
    }
}
