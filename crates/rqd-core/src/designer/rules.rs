use serde_json::Value;

use super::resolver::BodyField;
use crate::parse::parameter::Parameter;
use crate::parse::schema::Schema;

/// An advisory validation rule derived from a parameter or body-field
/// schema. Rules never block synthesis or submission; enforcement, if
/// any, belongs to the presentation layer or a pre-submit check.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    Email,
    Min(f64),
    Max(f64),
    OneOf(Vec<Value>),
}

impl Rule {
    /// Check a raw slot value against this rule. Empty values only fail
    /// the `Required` rule; every other rule treats absence as passing so
    /// that optional fields stay optional.
    pub fn check(&self, value: &str) -> bool {
        match self {
            Rule::Required => !value.is_empty(),
            _ if value.is_empty() => true,
            Rule::Email => value.split_once('@').is_some_and(|(local, domain)| {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
            }),
            Rule::Min(bound) => value.parse::<f64>().map(|n| n >= *bound).unwrap_or(false),
            Rule::Max(bound) => value.parse::<f64>().map(|n| n <= *bound).unwrap_or(false),
            Rule::OneOf(allowed) => allowed.iter().any(|v| match v {
                Value::String(s) => s == value,
                other => other.to_string() == value,
            }),
        }
    }
}

/// Rules for a path or query parameter.
pub fn rules_for_parameter(param: &Parameter) -> Vec<Rule> {
    let mut rules = Vec::new();
    if param.required {
        rules.push(Rule::Required);
    }
    if let Some(schema) = param.schema.as_ref().and_then(|s| s.as_schema()) {
        push_schema_rules(&mut rules, schema);
    }
    rules
}

/// Rules for a request-body field.
pub fn rules_for_field(field: &BodyField) -> Vec<Rule> {
    let mut rules = Vec::new();
    if field.required {
        rules.push(Rule::Required);
    }
    if field.format.as_deref() == Some("email") {
        rules.push(Rule::Email);
    }
    if let Some(min) = field.minimum {
        rules.push(Rule::Min(min));
    }
    if let Some(max) = field.maximum {
        rules.push(Rule::Max(max));
    }
    if !field.enum_values.is_empty() {
        rules.push(Rule::OneOf(field.enum_values.clone()));
    }
    rules
}

// Bounds are carried even for non-numeric types; strict schema
// validation is out of scope and a stray `minimum` is tolerated.
fn push_schema_rules(rules: &mut Vec<Rule>, schema: &Schema) {
    if schema.format.as_deref() == Some("email") {
        rules.push(Rule::Email);
    }
    if let Some(min) = schema.minimum {
        rules.push(Rule::Min(min));
    }
    if let Some(max) = schema.maximum {
        rules.push(Rule::Max(max));
    }
    if !schema.enum_values.is_empty() {
        rules.push(Rule::OneOf(schema.enum_values.clone()));
    }
}

/// The subset of `rules` the given value violates.
pub fn violations<'a>(rules: &'a [Rule], value: &str) -> Vec<&'a Rule> {
    rules.iter().filter(|r| !r.check(value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn email_rule_shapes() {
        assert!(Rule::Email.check("user@example.com"));
        assert!(Rule::Email.check(""), "empty passes non-required rules");
        assert!(!Rule::Email.check("not-an-email"));
        assert!(!Rule::Email.check("user@nodot"));
    }

    #[test]
    fn bound_rules() {
        assert!(Rule::Min(0.0).check("18"));
        assert!(!Rule::Min(0.0).check("-3"));
        assert!(!Rule::Max(150.0).check("200"));
        assert!(!Rule::Min(0.0).check("abc"), "non-numeric fails a bound");
    }

    #[test]
    fn one_of_matches_literals() {
        let rule = Rule::OneOf(vec![json!("json"), json!("xml")]);
        assert!(rule.check("json"));
        assert!(!rule.check("csv"));
        let numeric = Rule::OneOf(vec![json!(1), json!(2)]);
        assert!(numeric.check("2"));
    }

    #[test]
    fn violations_collects_failures() {
        let rules = vec![Rule::Required, Rule::Min(10.0)];
        assert_eq!(violations(&rules, "").len(), 1);
        assert_eq!(violations(&rules, "5").len(), 1);
        assert!(violations(&rules, "12").is_empty());
    }
}
