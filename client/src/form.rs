//! Typed form schemas.
//!
//! A schema is an ordered list of rules, each naming the field it guards,
//! the message shown when it fails, and a pure check over the whole form
//! value (so cross-field rules such as "confirm equals password" need no
//! special casing). Validation yields at most one error per field: the
//! message of the first failing rule, in declaration order.

use std::collections::BTreeMap;

/// Pure predicate over a form value; `true` means the rule passes.
pub type Check<T> = fn(&T) -> bool;

struct Rule<T> {
    field: &'static str,
    message: &'static str,
    check: Check<T>,
}

pub struct FormSchema<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Default for FormSchema<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> FormSchema<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule for `field`.
    #[must_use]
    pub fn rule(mut self, field: &'static str, message: &'static str, check: Check<T>) -> Self {
        self.rules.push(Rule { field, message, check });
        self
    }

    /// Distinct field names, in first-declared order.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for rule in &self.rules {
            if !out.contains(&rule.field) {
                out.push(rule.field);
            }
        }
        out
    }

    /// Run every rule.
    #[must_use]
    pub fn validate(&self, values: &T) -> Validation {
        self.run(values, |_| true)
    }

    /// Run only the rules guarding `fields`.
    #[must_use]
    pub fn validate_fields(&self, values: &T, fields: &[&str]) -> Validation {
        self.run(values, |field| fields.contains(&field))
    }

    fn run(&self, values: &T, wanted: impl Fn(&str) -> bool) -> Validation {
        let mut result = Validation::default();
        for rule in self.rules.iter().filter(|r| wanted(r.field)) {
            if result.errors.contains_key(rule.field) {
                continue;
            }
            if !(rule.check)(values) {
                result.errors.insert(rule.field, rule.message);
            }
        }
        result
    }
}

/// Outcome of a validation pass: field name to error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    errors: BTreeMap<&'static str, &'static str>,
}

impl Validation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn error(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field).copied()
    }

    pub fn errors(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, *m))
    }

    /// Replace the results for `fields` with those of `fresh`, keeping errors
    /// of every other field.
    pub fn apply(&mut self, fields: &[&str], fresh: Validation) {
        self.errors.retain(|field, _| !fields.contains(field));
        self.errors.extend(fresh.errors);
    }
}

/// `required` check for text inputs.
#[must_use]
pub fn filled(value: &str) -> bool {
    !value.is_empty()
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
