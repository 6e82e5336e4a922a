use qanexus_generate::catalog::{self, EnumCatalog};
use qanexus_generate::errors::GenerationError;
use qanexus_generate::registry::{CountryCode, FormatRegistry};
use qanexus_generate::DataGenerator;

#[test]
fn every_registered_country_generates_conforming_numbers() {
    let engine = DataGenerator::new();
    let registry = FormatRegistry::new();
    let catalog = EnumCatalog::new();
    let countries = catalog
        .values(catalog::COUNTRY)
        .expect("country category is registered");

    for country in countries {
        let code = CountryCode::parse(country).expect("catalog values parse");
        let templates = registry.lookup(code).expect("registered country");
        for _ in 0..1000 {
            let generated = engine
                .generate("phone_number", Some(country), None)
                .expect("phone generation succeeds");
            let value = generated.render();
            assert!(
                templates.iter().any(|template| template.matches(&value)),
                "'{value}' conforms to no {country} template"
            );
            assert_eq!(generated.locale(), Some(country.as_str()));
        }
    }
}

#[test]
fn us_numbers_follow_the_nanp_shape() {
    for _ in 0..200 {
        let value = qanexus_generate::generate_phone_number("US").expect("US is registered");
        qanexus_assert::assert_matches_pattern(&value, r"^\+1-[2-9]\d{2}-\d{3}-\d{4}$")
            .expect("US numbers carry a 2-9 area code lead");
    }
}

#[test]
fn unknown_country_codes_fail_loudly() {
    assert!(matches!(
        qanexus_generate::generate_phone_number("ZZ"),
        Err(GenerationError::UnknownLocale { .. })
    ));
    // Membership is case-sensitive.
    assert!(matches!(
        qanexus_generate::generate_phone_number("us"),
        Err(GenerationError::UnknownLocale { .. })
    ));
}

#[test]
fn omitted_country_uses_the_catalog_default() {
    let engine = DataGenerator::new();
    let generated = engine
        .generate("phone_number", None, None)
        .expect("default country is registered");
    assert_eq!(generated.locale(), Some("US"));
}

#[test]
fn substituted_registry_constrains_lookups() {
    let registry = FormatRegistry::with_formats(&[(
        CountryCode::Us,
        &["+1-[2-9]##-###-####"] as &[&str],
    )])
    .expect("valid table");
    let engine = DataGenerator::with_parts(registry, EnumCatalog::new());

    assert!(engine.generate("phone_number", Some("US"), None).is_ok());
    // GB passes catalog validation but has no templates in this registry.
    assert!(matches!(
        engine.generate("phone_number", Some("GB"), None),
        Err(GenerationError::UnknownLocale { .. })
    ));
}
