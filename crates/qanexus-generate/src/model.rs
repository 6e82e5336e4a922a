//! Composite model assembly from schema-declared generated fields.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::{DataGenerator, hash_field_seed};
use crate::errors::{GenerationError, Result};
use crate::generators::{GeneratedPrimitive, PrimitiveValue};

/// Total generation attempts allowed per cross-field rule, counting the
/// initial fill.
pub const DEFAULT_RULE_ATTEMPTS: u32 = 3;

/// How one model field obtains its value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Delegated to the primitive generator for `category`.
    Generated {
        category: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        locale: Option<String>,
    },
    /// Copied into the model verbatim.
    Literal { value: String },
}

/// Declaration of one model field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn generated(name: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Generated {
                category: category.to_string(),
                locale: None,
            },
        }
    }

    pub fn localized(name: &str, category: &str, locale: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Generated {
                category: category.to_string(),
                locale: Some(locale.to_string()),
            },
        }
    }

    pub fn literal(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Literal {
                value: value.to_string(),
            },
        }
    }
}

/// Predicate kinds a cross-field rule can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    DateAfter,
    DateBefore,
    NotEqual,
}

impl RuleKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::DateAfter => "date_after",
            Self::DateBefore => "date_before",
            Self::NotEqual => "not_equal",
        }
    }
}

/// A consistency predicate between two declared fields. On violation the
/// assembler regenerates the generated fields the rule touches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossFieldRule {
    pub field: String,
    pub reference: String,
    pub kind: RuleKind,
}

impl CrossFieldRule {
    pub fn date_after(field: &str, reference: &str) -> Self {
        Self {
            field: field.to_string(),
            reference: reference.to_string(),
            kind: RuleKind::DateAfter,
        }
    }

    pub fn date_before(field: &str, reference: &str) -> Self {
        Self {
            field: field.to_string(),
            reference: reference.to_string(),
            kind: RuleKind::DateBefore,
        }
    }

    pub fn not_equal(field: &str, reference: &str) -> Self {
        Self {
            field: field.to_string(),
            reference: reference.to_string(),
            kind: RuleKind::NotEqual,
        }
    }

    /// Human-readable form used in error and log context.
    pub fn describe(&self) -> String {
        format!("{} {} {}", self.field, self.kind.as_str(), self.reference)
    }

    fn check(&self, fields: &[(String, GeneratedPrimitive)]) -> Result<bool> {
        let field = find(fields, &self.field).ok_or_else(|| missing_rule_field(self))?;
        let reference = find(fields, &self.reference).ok_or_else(|| missing_rule_field(self))?;
        match self.kind {
            RuleKind::DateAfter | RuleKind::DateBefore => {
                let (Some(lhs), Some(rhs)) =
                    (field.value().as_date(), reference.value().as_date())
                else {
                    return Err(GenerationError::Constraint(format!(
                        "rule '{}' requires date-valued fields",
                        self.describe()
                    )));
                };
                Ok(match self.kind {
                    RuleKind::DateAfter => lhs > rhs,
                    _ => lhs < rhs,
                })
            }
            RuleKind::NotEqual => Ok(field.render() != reference.render()),
        }
    }
}

fn missing_rule_field(rule: &CrossFieldRule) -> GenerationError {
    GenerationError::Constraint(format!(
        "rule '{}' references an undeclared field",
        rule.describe()
    ))
}

/// Ordered declaration of a composite model: fields plus cross-field rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSchema {
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub rules: Vec<CrossFieldRule>,
}

impl ModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Schema behind `generate_complex_data()` when no schema is supplied:
    /// an identifier plus an issue/expiry date pair that must stay ordered.
    pub fn default_complex() -> Self {
        Self::new()
            .field(FieldSpec::generated("id", "uuid"))
            .field(FieldSpec::generated("issued", "date"))
            .field(FieldSpec::generated("expires", "date"))
            .rule(CrossFieldRule::date_after("expires", "issued"))
    }

    fn spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    fn validate(&self) -> Result<()> {
        for (idx, spec) in self.fields.iter().enumerate() {
            if self.fields[..idx].iter().any(|prior| prior.name == spec.name) {
                return Err(GenerationError::Constraint(format!(
                    "schema declares field '{}' more than once",
                    spec.name
                )));
            }
        }
        for rule in &self.rules {
            if self.spec(&rule.field).is_none() || self.spec(&rule.reference).is_none() {
                return Err(missing_rule_field(rule));
            }
        }
        Ok(())
    }
}

/// Immutable, ordered mapping from field name to generated value. Only
/// fully populated, rule-satisfying models are ever constructed.
#[derive(Debug, Clone)]
pub struct Model {
    fields: Vec<(String, GeneratedPrimitive)>,
}

impl Model {
    pub fn get(&self, name: &str) -> Option<&GeneratedPrimitive> {
        find(&self.fields, name)
    }

    /// Fields in schema declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GeneratedPrimitive)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl std::ops::Index<&str> for Model {
    type Output = GeneratedPrimitive;

    fn index(&self, name: &str) -> &Self::Output {
        self.get(name)
            .unwrap_or_else(|| panic!("no field named '{name}'"))
    }
}

fn find<'a>(
    fields: &'a [(String, GeneratedPrimitive)],
    name: &str,
) -> Option<&'a GeneratedPrimitive> {
    fields
        .iter()
        .find(|(field, _)| field == name)
        .map(|(_, value)| value)
}

fn replace(fields: &mut [(String, GeneratedPrimitive)], name: &str, value: GeneratedPrimitive) {
    if let Some(entry) = fields.iter_mut().find(|(field, _)| field == name) {
        entry.1 = value;
    }
}

/// Builds composite models by orchestrating the primitive generator.
pub struct ModelAssembler<'a> {
    engine: &'a DataGenerator,
    max_rule_attempts: u32,
}

impl<'a> ModelAssembler<'a> {
    pub fn new(engine: &'a DataGenerator) -> Self {
        Self {
            engine,
            max_rule_attempts: DEFAULT_RULE_ATTEMPTS,
        }
    }

    /// Overrides the per-rule attempt budget.
    pub fn max_rule_attempts(mut self, attempts: u32) -> Self {
        self.max_rule_attempts = attempts.max(1);
        self
    }

    /// Builds a model from the schema. A fixed `seed` makes the whole
    /// build — including any rule-driven regeneration — repeatable.
    ///
    /// A field failure aborts the build with `ModelField`; a rule that
    /// stays violated once its attempt budget is spent aborts with
    /// `ModelConsistency`. No partially built model is ever returned.
    pub fn build(&self, schema: &ModelSchema, seed: Option<u64>) -> Result<Model> {
        schema.validate()?;
        let base_seed = seed.unwrap_or_else(|| rand::rng().random());
        debug!(
            fields = schema.fields.len(),
            rules = schema.rules.len(),
            seeded = seed.is_some(),
            "building model"
        );

        let mut fields = Vec::with_capacity(schema.fields.len());
        for spec in &schema.fields {
            let value = self.generate_field(spec, base_seed, 1)?;
            fields.push((spec.name.clone(), value));
        }

        let mut attempts = vec![1_u32; schema.rules.len()];
        'rules: loop {
            for (idx, rule) in schema.rules.iter().enumerate() {
                if rule.check(&fields)? {
                    continue;
                }
                if attempts[idx] >= self.max_rule_attempts {
                    return Err(GenerationError::ModelConsistency {
                        rule: rule.describe(),
                        field: rule.field.clone(),
                        attempts: attempts[idx],
                    });
                }
                attempts[idx] += 1;
                warn!(
                    rule = %rule.describe(),
                    attempt = attempts[idx],
                    "rule violated, regenerating implicated fields"
                );
                for name in [rule.field.as_str(), rule.reference.as_str()] {
                    let Some(spec) = schema.spec(name) else {
                        continue;
                    };
                    if matches!(spec.kind, FieldKind::Generated { .. }) {
                        let value = self.generate_field(spec, base_seed, attempts[idx])?;
                        replace(&mut fields, name, value);
                    }
                }
                // Regeneration may disturb earlier rules; rescan from the top.
                continue 'rules;
            }
            break;
        }

        Ok(Model { fields })
    }

    fn generate_field(
        &self,
        spec: &FieldSpec,
        base_seed: u64,
        attempt: u32,
    ) -> Result<GeneratedPrimitive> {
        match &spec.kind {
            FieldKind::Literal { value } => Ok(GeneratedPrimitive::new(
                "literal",
                None,
                PrimitiveValue::Text(value.clone()),
            )),
            FieldKind::Generated { category, locale } => {
                let mut rng =
                    ChaCha8Rng::seed_from_u64(hash_field_seed(base_seed, &spec.name, attempt));
                self.engine
                    .generate_with_rng(category, locale.as_deref(), &mut rng)
                    .map_err(|err| GenerationError::ModelField {
                        field: spec.name.clone(),
                        source: Box::new(err),
                    })
            }
        }
    }
}
