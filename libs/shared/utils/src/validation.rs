// =====================================================================================
// FORM VALIDATION - RULE BASED, PER-FIELD ERROR FLAGS
// =====================================================================================

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

pub type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    /// Passes when the predicate returns true.
    Custom(Predicate),
}

impl Rule {
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Rule::Custom(Arc::new(predicate))
    }

    fn passes(&self, value: &str) -> bool {
        match self {
            Rule::Required => !value.trim().is_empty(),
            // the rest only apply once something was entered
            _ if value.is_empty() => true,
            Rule::MinLength(min) => value.chars().count() >= *min,
            Rule::MaxLength(max) => value.chars().count() <= *max,
            Rule::Pattern(regex) => regex.is_match(value),
            Rule::Custom(predicate) => predicate(value),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "Required"),
            Rule::MinLength(n) => write!(f, "MinLength({})", n),
            Rule::MaxLength(n) => write!(f, "MaxLength({})", n),
            Rule::Pattern(r) => write!(f, "Pattern({})", r.as_str()),
            Rule::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Field name -> `true` when the field has an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, bool>);

impl FieldErrors {
    pub fn is_valid(&self) -> bool {
        self.0.values().all(|has_error| !has_error)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.0.get(field).copied().unwrap_or(false)
    }

    pub fn invalid_fields(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, has_error)| **has_error)
            .map(|(field, _)| field.as_str())
            .collect()
    }

    pub fn as_map(&self) -> &BTreeMap<String, bool> {
        &self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    fields: Vec<(String, Vec<Rule>)>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, rules: Vec<Rule>) -> Self {
        self.fields.push((name.to_string(), rules));
        self
    }

    pub fn validate_field(&self, name: &str, value: &str) -> bool {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rules)| rules.iter().all(|rule| rule.passes(value)))
            .unwrap_or(true)
    }

    /// Missing values are validated as empty strings.
    pub fn validate(&self, values: &HashMap<String, String>) -> FieldErrors {
        let errors: BTreeMap<String, bool> = self
            .fields
            .iter()
            .map(|(field, rules)| {
                let value = values.get(field).map(String::as_str).unwrap_or("");
                let has_error = !rules.iter().all(|rule| rule.passes(value));
                (field.clone(), has_error)
            })
            .collect();

        let result = FieldErrors(errors);
        debug!("Validated {} fields, invalid: {:?}", self.fields.len(), result.invalid_fields());
        result
    }
}

/// Contact form shown before a booking is sent: name, Uzbek phone, consent.
pub fn booking_contact_validator() -> FormValidator {
    let phone = Regex::new(r"^\+?998\d{9}$").map(Rule::Pattern);

    let mut phone_rules = vec![Rule::Required];
    if let Ok(rule) = phone {
        phone_rules.push(rule);
    }

    FormValidator::new()
        .field("name", vec![Rule::Required, Rule::MinLength(2), Rule::MaxLength(100)])
        .field("phone", phone_rules)
        .field("consent", vec![Rule::Required, Rule::custom(|v| v == "true")])
}
