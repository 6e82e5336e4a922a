//! Context-free generators: values with one fixed shape per category.

use chrono::NaiveTime;
use rand::Rng;
use rand::RngCore;

use crate::errors::Result;
use crate::generators::{GeneratedPrimitive, Generator, GeneratorContext, PrimitiveValue};

/// Alphanumeric charset (plus hyphen) for generated tokens.
const ALPHA_NUM: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-";

/// Default length of generated tokens and email usernames.
pub const DEFAULT_TOKEN_LENGTH: usize = 10;

/// Domain appended to generated email usernames.
const DEFAULT_EMAIL_DOMAIN: &str = "@defaultDomain.com";

pub fn register(registry: &mut crate::generators::GeneratorRegistry) {
    registry.register_generator(Box::new(TokenGenerator));
    registry.register_generator(Box::new(EmailGenerator));
    registry.register_generator(Box::new(BooleanGenerator));
    registry.register_generator(Box::new(TimeGenerator));
    registry.register_generator(Box::new(SsnGenerator));
    registry.register_generator(Box::new(CreditCardGenerator));
    registry.register_generator(Box::new(IbanGenerator));
    registry.register_generator(Box::new(IpAddressGenerator));
    registry.register_generator(Box::new(MacAddressGenerator));
    registry.register_generator(Box::new(HexColorGenerator));
}

/// Draws an alphanumeric token of the requested length.
pub fn random_token(rng: &mut dyn RngCore, length: usize) -> String {
    let chars: Vec<char> = ALPHA_NUM.chars().collect();
    let mut value = String::with_capacity(length);
    for _ in 0..length {
        value.push(chars[rng.random_range(0..chars.len())]);
    }
    value
}

/// Luhn checksum digit over a digit sequence.
pub fn luhn_check_digit(digits: &[u8]) -> u8 {
    let mut sum = 0_u32;
    let mut alternate = true;
    for digit in digits.iter().rev() {
        let mut n = *digit as u32;
        if alternate {
            n *= 2;
            if n > 9 {
                n -= 9;
            }
        }
        sum += n;
        alternate = !alternate;
    }
    ((10 - (sum % 10)) % 10) as u8
}

struct TokenGenerator;

impl Generator for TokenGenerator {
    fn id(&self) -> &'static str {
        "token"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        _locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        Ok(GeneratedPrimitive::new(
            self.id(),
            None,
            PrimitiveValue::Text(random_token(rng, DEFAULT_TOKEN_LENGTH)),
        ))
    }
}

struct EmailGenerator;

impl Generator for EmailGenerator {
    fn id(&self) -> &'static str {
        "email"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        _locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let username = random_token(rng, DEFAULT_TOKEN_LENGTH);
        Ok(GeneratedPrimitive::new(
            self.id(),
            None,
            PrimitiveValue::Text(format!("{username}{DEFAULT_EMAIL_DOMAIN}")),
        ))
    }
}

struct BooleanGenerator;

impl Generator for BooleanGenerator {
    fn id(&self) -> &'static str {
        "boolean"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        _locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        Ok(GeneratedPrimitive::new(
            self.id(),
            None,
            PrimitiveValue::Bool(rng.random_bool(0.5)),
        ))
    }
}

struct TimeGenerator;

impl Generator for TimeGenerator {
    fn id(&self) -> &'static str {
        "time"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        _locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let seconds = rng.random_range(0..86400_u32);
        let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
            .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default());
        Ok(GeneratedPrimitive::new(
            self.id(),
            None,
            PrimitiveValue::Time(time),
        ))
    }
}

struct SsnGenerator;

impl Generator for SsnGenerator {
    fn id(&self) -> &'static str {
        "ssn"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        _locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let value = format!(
            "{:03}-{:02}-{:04}",
            rng.random_range(0..=999),
            rng.random_range(0..=99),
            rng.random_range(0..=9999)
        );
        Ok(GeneratedPrimitive::new(
            self.id(),
            None,
            PrimitiveValue::Text(value),
        ))
    }
}

struct CreditCardGenerator;

impl Generator for CreditCardGenerator {
    fn id(&self) -> &'static str {
        "credit_card"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        _locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let mut digits = [0_u8; 15];
        for digit in digits.iter_mut() {
            *digit = rng.random_range(0..=9);
        }
        let checksum = luhn_check_digit(&digits);
        let mut value: String = digits.iter().map(|d| char::from(b'0' + *d)).collect();
        value.push(char::from(b'0' + checksum));
        Ok(GeneratedPrimitive::new(
            self.id(),
            None,
            PrimitiveValue::Text(value),
        ))
    }
}

struct IbanGenerator;

impl Generator for IbanGenerator {
    fn id(&self) -> &'static str {
        "iban"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        _locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let mut value = String::from("DE");
        for _ in 0..20 {
            value.push(char::from(b'0' + rng.random_range(0..=9_u8)));
        }
        Ok(GeneratedPrimitive::new(
            self.id(),
            None,
            PrimitiveValue::Text(value),
        ))
    }
}

struct IpAddressGenerator;

impl Generator for IpAddressGenerator {
    fn id(&self) -> &'static str {
        "ip_address"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        _locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let mut octet = || rng.random_range(0..=255_u8);
        let value = format!("{}.{}.{}.{}", octet(), octet(), octet(), octet());
        Ok(GeneratedPrimitive::new(
            self.id(),
            None,
            PrimitiveValue::Text(value),
        ))
    }
}

struct MacAddressGenerator;

impl Generator for MacAddressGenerator {
    fn id(&self) -> &'static str {
        "mac_address"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        _locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let octets: Vec<String> = (0..6)
            .map(|_| format!("{:02X}", rng.random_range(0..=255_u8)))
            .collect();
        Ok(GeneratedPrimitive::new(
            self.id(),
            None,
            PrimitiveValue::Text(octets.join(":")),
        ))
    }
}

struct HexColorGenerator;

impl Generator for HexColorGenerator {
    fn id(&self) -> &'static str {
        "hex_color"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        _locale: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedPrimitive> {
        let value = format!("#{:06X}", rng.random_range(0..=0xFFFFFF_u32));
        Ok(GeneratedPrimitive::new(
            self.id(),
            None,
            PrimitiveValue::Text(value),
        ))
    }
}
