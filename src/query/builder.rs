use std::sync::LazyLock;

use regex::Regex;

use crate::query::SearchFilters;

/// User syntax that must reach the provider untouched: quotes, grouping,
/// `field:value` or comparison pairs, negated fields and explicit boolean operators.
static SCOPED_SYNTAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""|[()]|(?:^|\s)-?[A-Za-z]+(?::|!=|<=|>=|=|<|>)|(?:^|\s)(?:OR|AND)(?:\s|$)"#)
        .expect("scoped syntax pattern is valid")
});

/// Fields an unscoped term is searched across.
const EXPANDED_FIELDS: [&str; 3] = ["name", "o", "t"];

/// Builds opaque provider query strings from user text and filters.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    match_all_token: String,
}

impl QueryBuilder {
    pub fn new(match_all_token: impl Into<String>) -> Self {
        Self {
            match_all_token: match_all_token.into(),
        }
    }

    /// Compose the provider query for `text` restricted by `filters`.
    ///
    /// Empty text becomes the match-all token so filter-only searches never
    /// pay for a full-text expansion across every field.
    pub fn build(&self, text: &str, filters: &SearchFilters) -> String {
        let text = text.trim();
        let mut clauses = Vec::new();

        if text.is_empty() {
            clauses.push(self.match_all_token.clone());
        } else if is_scoped(text) {
            clauses.push(text.to_string());
        } else {
            clauses.extend(text.split_whitespace().map(expand_term));
        }

        clauses.extend(filters.clauses());
        clauses.join(" ")
    }
}

/// True when the text carries explicit provider syntax.
pub fn is_scoped(text: &str) -> bool {
    SCOPED_SYNTAX.is_match(text)
}

/// `-word` excludes the whole group, not just the name alternative.
fn expand_term(term: &str) -> String {
    if let Some(negated) = term.strip_prefix('-').filter(|rest| !rest.is_empty()) {
        return format!("-{}", expand_term(negated));
    }
    let alternatives: Vec<String> = EXPANDED_FIELDS
        .iter()
        .map(|field| format!("{}:{}", field, term))
        .collect();
    format!("({})", alternatives.join(" OR "))
}
