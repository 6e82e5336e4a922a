//! Format templates: compact patterns with typed placeholder slots.
//!
//! Pattern DSL: `#` is any digit, `[2-9]` or `[47]` a constrained digit
//! slot, `@` an uppercase letter; every other character is a fixed literal.
//! Compiled templates carry a verification regex so every assembled value is
//! re-checked against its own constraint set before leaving the engine.

use std::iter::Peekable;
use std::str::Chars;

use rand::Rng;
use rand::RngCore;
use regex::Regex;

use crate::errors::{GenerationError, Result};

/// Set of admissible digits for one slot, stored as a bitmask over 0..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitSet(u16);

impl DigitSet {
    /// All ten decimal digits.
    pub const ANY: DigitSet = DigitSet(0x03ff);

    pub fn contains(self, digit: u8) -> bool {
        digit <= 9 && self.0 & (1_u16 << digit) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn insert(&mut self, digit: u8) {
        self.0 |= 1_u16 << digit;
    }

    /// Draws one digit uniformly from the set. The compiler rejects empty
    /// classes, so a compiled slot always has at least one digit.
    fn pick(self, rng: &mut dyn RngCore) -> u8 {
        let target = rng.random_range(0..self.len());
        let mut seen = 0;
        for digit in 0..=9 {
            if self.contains(digit) {
                if seen == target {
                    return digit;
                }
                seen += 1;
            }
        }
        0
    }

    fn regex_class(self) -> String {
        if self == Self::ANY {
            return r"\d".to_string();
        }
        let mut class = String::from("[");
        for digit in 0..=9u8 {
            if self.contains(digit) {
                class.push(char::from(b'0' + digit));
            }
        }
        class.push(']');
        class
    }
}

/// One placeholder slot of a compiled format template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Digit drawn uniformly from the allowed set.
    Digit(DigitSet),
    /// Uppercase ASCII letter.
    Letter,
    /// Fixed character copied verbatim.
    Literal(char),
}

/// A compiled format pattern plus its constraint set.
///
/// Immutable after compilation; cloning shares no mutable state, so
/// repeated registry lookups stay value-equal.
#[derive(Debug, Clone)]
pub struct FormatTemplate {
    pattern: String,
    slots: Vec<Slot>,
    matcher: Regex,
}

impl FormatTemplate {
    /// Compiles a pattern string into slots and a verification regex.
    pub fn compile(pattern: &str) -> Result<Self> {
        let mut slots = Vec::new();
        let mut chars = pattern.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '#' => slots.push(Slot::Digit(DigitSet::ANY)),
                '@' => slots.push(Slot::Letter),
                '[' => slots.push(Slot::Digit(parse_digit_class(pattern, &mut chars)?)),
                ']' => return Err(malformed(pattern, "']' outside a digit class")),
                other => slots.push(Slot::Literal(other)),
            }
        }
        if slots.is_empty() {
            return Err(malformed(pattern, "empty pattern"));
        }

        let mut source = String::from("^");
        for slot in &slots {
            match slot {
                Slot::Digit(set) => source.push_str(&set.regex_class()),
                Slot::Letter => source.push_str("[A-Z]"),
                Slot::Literal(ch) => source.push_str(&regex::escape(&ch.to_string())),
            }
        }
        source.push('$');
        let matcher =
            Regex::new(&source).map_err(|err| malformed(pattern, &err.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            slots,
            matcher,
        })
    }

    /// The source pattern this template was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Rendered length of every value this template produces.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Admissible digits for the first digit slot, if the template has one.
    pub fn leading_digits(&self) -> Option<DigitSet> {
        self.slots.iter().find_map(|slot| match slot {
            Slot::Digit(set) => Some(*set),
            _ => None,
        })
    }

    /// Whether a value conforms to this template's length and slot constraints.
    pub fn matches(&self, value: &str) -> bool {
        value.chars().count() == self.slots.len() && self.matcher.is_match(value)
    }

    /// Fills every slot and validates the assembled value before returning it.
    pub fn generate(&self, rng: &mut dyn RngCore) -> Result<String> {
        let value = self.fill(rng);
        if self.matches(&value) {
            Ok(value)
        } else {
            Err(GenerationError::Constraint(format!(
                "value '{value}' violates template '{}'",
                self.pattern
            )))
        }
    }

    fn fill(&self, rng: &mut dyn RngCore) -> String {
        let mut value = String::with_capacity(self.slots.len());
        for slot in &self.slots {
            match slot {
                Slot::Digit(set) => value.push(char::from(b'0' + set.pick(rng))),
                Slot::Letter => {
                    let offset = rng.random_range(0..26u8);
                    value.push(char::from(b'A' + offset));
                }
                Slot::Literal(ch) => value.push(*ch),
            }
        }
        value
    }
}

fn parse_digit_class(pattern: &str, chars: &mut Peekable<Chars<'_>>) -> Result<DigitSet> {
    let mut set = DigitSet(0);
    loop {
        let Some(ch) = chars.next() else {
            return Err(malformed(pattern, "unterminated digit class"));
        };
        match ch {
            ']' => break,
            '0'..='9' => {
                let low = ch as u8 - b'0';
                if chars.peek() == Some(&'-') {
                    chars.next();
                    let Some(high_ch @ '0'..='9') = chars.next() else {
                        return Err(malformed(pattern, "digit range must end with a digit"));
                    };
                    let high = high_ch as u8 - b'0';
                    if low > high {
                        return Err(malformed(pattern, "digit range out of order"));
                    }
                    for digit in low..=high {
                        set.insert(digit);
                    }
                } else {
                    set.insert(low);
                }
            }
            _ => {
                return Err(malformed(
                    pattern,
                    "digit class accepts only digits and ranges",
                ));
            }
        }
    }
    if set.is_empty() {
        return Err(malformed(pattern, "empty digit class"));
    }
    Ok(set)
}

fn malformed(pattern: &str, reason: &str) -> GenerationError {
    GenerationError::Constraint(format!("invalid format pattern '{pattern}': {reason}"))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn compiles_digit_classes_and_literals() {
        let template = FormatTemplate::compile("+1-[2-9]##-###-####").expect("valid pattern");
        assert_eq!(template.len(), 15);
        assert!(template.matches("+1-234-567-8901"));
        assert!(!template.matches("+1-123-567-8901"));
        assert!(!template.matches("+1-234-567-890"));

        let leading = template.leading_digits().expect("has digit slots");
        assert!(!leading.contains(0));
        assert!(!leading.contains(1));
        for digit in 2..=9 {
            assert!(leading.contains(digit));
        }
    }

    #[test]
    fn letter_slots_draw_uppercase_ascii() {
        let template = FormatTemplate::compile("@@-####").expect("valid pattern");
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let value = template.generate(&mut rng).expect("generates");
        let mut chars = value.chars();
        assert!(chars.next().is_some_and(|ch| ch.is_ascii_uppercase()));
        assert!(chars.next().is_some_and(|ch| ch.is_ascii_uppercase()));
        assert_eq!(chars.next(), Some('-'));
    }

    #[test]
    fn generated_values_always_match_their_template() {
        let template = FormatTemplate::compile("+44-7###-######").expect("valid pattern");
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let value = template.generate(&mut rng).expect("generates");
            assert!(template.matches(&value));
        }
    }

    #[test]
    fn same_seed_fills_identically() {
        let template = FormatTemplate::compile("[2-9]##-@@-####").expect("valid pattern");
        let mut first = ChaCha8Rng::seed_from_u64(42);
        let mut second = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(
            template.generate(&mut first).expect("generates"),
            template.generate(&mut second).expect("generates")
        );
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        for pattern in ["", "[", "[]", "[a]", "]x", "[9-2]", "[2-]"] {
            assert!(
                matches!(
                    FormatTemplate::compile(pattern),
                    Err(GenerationError::Constraint(_))
                ),
                "pattern '{pattern}' should be rejected"
            );
        }
    }
}
