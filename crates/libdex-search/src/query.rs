//! Free-text query construction.

use libdex_index::model::QueryExpression;

/// Fields that carry short, exact tags and get their own term clause.
const TERM_FIELDS: [&str; 5] = [
    "keywords",
    "description",
    "repository",
    "organization",
    "readme",
];

/// Escape the field-path separator, which the index's query grammar treats
/// as structurally significant. Every other character passes through so the
/// grammar's own operators keep working. Never fails.
#[must_use]
pub fn escape_query(raw: &str) -> String {
    raw.replace('/', "\\/")
}

/// Build the disjunctive multi-field query for a free-text search.
///
/// Exact-term clauses let short, precise tags (a keyword, an organization
/// name) win deterministically, while the trailing free-form clause ranks
/// prose fields. A document matching any clause is a hit, and matching more
/// clauses scores higher under the index's native scoring.
#[must_use]
pub fn build_text_query(raw: &str) -> QueryExpression {
    let escaped = escape_query(raw);
    let mut clauses: Vec<QueryExpression> = TERM_FIELDS
        .iter()
        .map(|field| QueryExpression::term(*field, escaped.as_str()))
        .collect();
    clauses.push(QueryExpression::text(escaped));
    QueryExpression::any_of(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_every_field_path_separator() {
        assert_eq!(escape_query("a/b"), "a\\/b");
        assert_eq!(escape_query("a/b/c"), "a\\/b\\/c");
        assert_eq!(escape_query("plain"), "plain");
    }

    #[test]
    fn leaves_other_query_grammar_characters_untouched() {
        assert_eq!(escape_query("http AND client*"), "http AND client*");
    }

    #[test]
    fn builds_a_disjunction_over_term_fields_plus_free_form() {
        let QueryExpression::Bool { must, should } = build_text_query("http client") else {
            panic!("expected a bool query");
        };
        assert!(must.is_empty());
        assert_eq!(should.len(), 6);
        assert_eq!(
            should[0],
            QueryExpression::term("keywords", "http client")
        );
        assert_eq!(should[5], QueryExpression::text("http client"));
    }

    #[test]
    fn free_form_clause_carries_the_escaped_string() {
        let QueryExpression::Bool { should, .. } = build_text_query("a/b") else {
            panic!("expected a bool query");
        };
        let Some(QueryExpression::Text { query }) = should.last() else {
            panic!("expected a trailing free-form clause");
        };
        assert_eq!(query, "a\\/b");
    }
}
