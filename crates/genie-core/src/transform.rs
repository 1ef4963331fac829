//! Literal string substitution over a serialized space.
//!
//! The serialized space is treated as an opaque text buffer; no attempt is
//! made to understand its structure. Each rule is applied to the buffer as
//! it stands after the previous rule, so chained rules compose.

use tracing::{debug, warn};

use crate::{MigrateError, RuleSet};

/// The observed effect of one rule during a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub search: String,
    pub replace: String,
    /// Non-overlapping occurrences of `search` at the time the rule was
    /// applied; exactly the number of replacements performed.
    pub count: usize,
}

/// Per-rule report from one substitution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    outcomes: Vec<RuleOutcome>,
}

impl SubstitutionReport {
    /// All rule outcomes, in application order.
    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    /// Rules that matched nothing. Worth warning about, never an error.
    pub fn zero_match_rules(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| o.count == 0)
    }

    /// Total replacements performed across all rules.
    pub fn total_replacements(&self) -> usize {
        self.outcomes.iter().map(|o| o.count).sum()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Apply a rule set to a text buffer.
///
/// Rules run in declaration order. For each rule, every non-overlapping,
/// case-sensitive, left-to-right literal occurrence of `search` in the
/// *current* buffer is counted and then replaced; the count lands in the
/// report whether or not it was zero. Identical inputs always produce
/// identical output.
///
/// Fails with [`MigrateError::InvalidRule`] when a rule with an empty
/// search string is reached. Rules applied before that point are not
/// rolled back from the returned-by-value buffer, but an `Err` means no
/// buffer is returned at all, so nothing partial can be published.
pub fn apply(text: &str, rules: &RuleSet) -> Result<(String, SubstitutionReport), MigrateError> {
    let mut current = text.to_string();
    let mut outcomes = Vec::with_capacity(rules.len());

    for (index, rule) in rules.iter().enumerate() {
        if rule.search.is_empty() {
            return Err(MigrateError::InvalidRule { index });
        }

        // `str::matches` and `str::replace` share left-to-right
        // non-overlapping semantics, so the count is exactly the number of
        // replacements performed.
        let count = current.matches(rule.search.as_str()).count();
        if count > 0 {
            current = current.replace(&rule.search, &rule.replace);
            debug!(search = %rule.search, replace = %rule.replace, count, "applied rule");
        } else {
            warn!(search = %rule.search, "rule matched nothing in serialized space");
        }

        outcomes.push(RuleOutcome {
            search: rule.search.clone(),
            replace: rule.replace.clone(),
            count,
        });
    }

    Ok((current, SubstitutionReport { outcomes }))
}
