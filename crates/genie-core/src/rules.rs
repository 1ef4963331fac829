//! Transformation rule sets.
//!
//! A rule set is an ordered sequence of literal search/replace pairs. Order
//! matters: rules are applied sequentially, so a later rule may match text
//! introduced by an earlier one. The JSON form is a flat object whose keys
//! are search strings and whose values are replacements; declaration order
//! in the file is the application order.

use std::fmt;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

use crate::MigrateError;

/// A single substitution directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Literal string to search for.
    pub search: String,
    /// Literal replacement.
    pub replace: String,
}

/// An ordered, immutable collection of rules for one migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Parse a rule set from a JSON string.
    ///
    /// The input must be a flat object of string keys to string values.
    /// Anything else (arrays, nested objects, non-string values) fails with
    /// [`MigrateError::MalformedRuleSet`] before any rule is applied.
    /// Duplicate keys are legal; each occurrence becomes its own rule, in
    /// declaration order. An empty object yields an empty set.
    pub fn from_json_str(input: &str) -> Result<Self, MigrateError> {
        serde_json::from_str(input).map_err(|e| MigrateError::MalformedRuleSet(e.to_string()))
    }

    /// Build a rule set from pairs, preserving iteration order.
    pub fn from_pairs<I, S, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, R)>,
        S: Into<String>,
        R: Into<String>,
    {
        Self {
            rules: pairs
                .into_iter()
                .map(|(search, replace)| Rule {
                    search: search.into(),
                    replace: replace.into(),
                })
                .collect(),
        }
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set contains no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

// Hand-written deserialization: a HashMap would lose declaration order and
// silently drop duplicate keys, both of which change which substitutions
// happen. Streaming the map entries into a Vec keeps the file order exact.
impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RuleMapVisitor;

        impl<'de> Visitor<'de> for RuleMapVisitor {
            type Value = Vec<Rule>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a flat JSON object of string to string")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut rules = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((search, replace)) = map.next_entry::<String, String>()? {
                    rules.push(Rule { search, replace });
                }
                Ok(rules)
            }
        }

        let rules = deserializer.deserialize_map(RuleMapVisitor)?;
        Ok(RuleSet { rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_rules_in_declaration_order() {
        let set = RuleSet::from_json_str(
            r#"{"prod_catalog": "dev_catalog", "abc123": "def456", "https://prod": "https://dev"}"#,
        )
        .unwrap();

        let pairs: Vec<(&str, &str)> = set
            .iter()
            .map(|r| (r.search.as_str(), r.replace.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("prod_catalog", "dev_catalog"),
                ("abc123", "def456"),
                ("https://prod", "https://dev"),
            ]
        );
    }

    #[test]
    fn duplicate_keys_become_independent_rules() {
        let set = RuleSet::from_json_str(r#"{"a": "b", "a": "c"}"#).unwrap();
        assert_eq!(set.len(), 2);
        let replacements: Vec<&str> = set.iter().map(|r| r.replace.as_str()).collect();
        assert_eq!(replacements, vec!["b", "c"]);
    }

    #[test]
    fn empty_object_is_a_valid_empty_set() {
        let set = RuleSet::from_json_str("{}").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn rejects_non_string_values() {
        let err = RuleSet::from_json_str(r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, MigrateError::MalformedRuleSet(_)));
    }

    #[test]
    fn rejects_nested_structures() {
        let err = RuleSet::from_json_str(r#"{"a": {"b": "c"}}"#).unwrap_err();
        assert!(matches!(err, MigrateError::MalformedRuleSet(_)));

        let err = RuleSet::from_json_str(r#"{"a": ["b"]}"#).unwrap_err();
        assert!(matches!(err, MigrateError::MalformedRuleSet(_)));
    }

    #[test]
    fn rejects_non_object_top_level() {
        for input in [r#"["a", "b"]"#, r#""just a string""#, "42", "not json"] {
            let err = RuleSet::from_json_str(input).unwrap_err();
            assert!(matches!(err, MigrateError::MalformedRuleSet(_)), "{input}");
        }
    }

    #[test]
    fn empty_search_key_parses_and_is_rejected_later() {
        // Shape validation only; the substitution engine rejects the empty
        // search string when the rule is reached.
        let set = RuleSet::from_json_str(r#"{"": "x"}"#).unwrap();
        assert_eq!(set.len(), 1);
    }
}
