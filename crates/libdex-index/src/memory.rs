//! In-process document index used by tests and local development.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::IndexError;
use crate::index::{BoxFuture, DocumentIndex};
use crate::model::{
    Bucket, Collection, FieldSort, QueryExpression, RawHit, RawPage, SearchRequest, SortDirective,
    SortMode, SortOrder,
};

/// A seeded, fully in-memory [`DocumentIndex`].
///
/// Evaluates the same query grammar the HTTP backend ships to a real index:
/// exact terms over dotted paths, whitespace-token text scoring, boolean
/// must/should composition, field sorts with missing-as-zero and
/// multi-value averaging, result windows, and terms aggregation. Relevance
/// is clause-count scoring; equal scores keep insertion order, and equal
/// aggregation counts order by term, so results are deterministic.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    collections: HashMap<Collection, Vec<StoredDocument>>,
}

#[derive(Debug, Clone)]
struct StoredDocument {
    id: String,
    source: Value,
}

impl MemoryIndex {
    /// Empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one document into `collection`.
    pub fn insert(&mut self, collection: Collection, id: impl Into<String>, source: Value) {
        self.collections
            .entry(collection)
            .or_default()
            .push(StoredDocument {
                id: id.into(),
                source,
            });
    }

    fn documents(&self, collection: Collection) -> &[StoredDocument] {
        self.collections
            .get(&collection)
            .map_or(&[], Vec::as_slice)
    }
}

impl DocumentIndex for MemoryIndex {
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<RawPage, IndexError>> {
        Box::pin(async move {
            let mut matched: Vec<(u64, &StoredDocument)> = self
                .documents(request.collection)
                .iter()
                .filter_map(|doc| evaluate(&request.query, &doc.source).map(|score| (score, doc)))
                .collect();

            match &request.sort {
                SortDirective::Relevance => matched.sort_by(|l, r| r.0.cmp(&l.0)),
                SortDirective::Field(field_sort) => matched.sort_by(|l, r| {
                    let left = sort_key(&l.1.source, field_sort);
                    let right = sort_key(&r.1.source, field_sort);
                    match field_sort.order {
                        SortOrder::Asc => compare_keys(&left, &right),
                        SortOrder::Desc => compare_keys(&right, &left),
                    }
                }),
            }

            let total = u64::try_from(matched.len()).unwrap_or(u64::MAX);
            let offset = usize::try_from(request.offset).unwrap_or(usize::MAX);
            let limit = usize::try_from(request.limit).unwrap_or(usize::MAX);
            let hits = matched
                .into_iter()
                .skip(offset)
                .take(limit)
                .map(|(_, doc)| RawHit {
                    id: doc.id.clone(),
                    source: doc.source.clone(),
                })
                .collect();

            Ok(RawPage { total, hits })
        })
    }

    fn aggregate_terms<'a>(
        &'a self,
        collection: Collection,
        field: &'a str,
        size: u64,
    ) -> BoxFuture<'a, Result<Vec<Bucket>, IndexError>> {
        Box::pin(async move {
            let mut counts: BTreeMap<String, u64> = BTreeMap::new();
            for doc in self.documents(collection) {
                let mut seen = HashSet::new();
                for value in field_values(&doc.source, field) {
                    if let Some(term) = value.as_str() {
                        if seen.insert(term) {
                            *counts.entry(term.to_owned()).or_insert(0) += 1;
                        }
                    }
                }
            }
            let mut buckets: Vec<Bucket> = counts
                .into_iter()
                .map(|(term, count)| Bucket { term, count })
                .collect();
            buckets.sort_by(|l, r| r.count.cmp(&l.count).then_with(|| l.term.cmp(&r.term)));
            buckets.truncate(usize::try_from(size).unwrap_or(usize::MAX));
            Ok(buckets)
        })
    }
}

/// Score a document against a query; `None` means no match.
fn evaluate(query: &QueryExpression, doc: &Value) -> Option<u64> {
    match query {
        QueryExpression::MatchAll => Some(0),
        QueryExpression::Term { field, value } => field_values(doc, field)
            .into_iter()
            .any(|v| value_matches(v, value))
            .then_some(1),
        QueryExpression::Text { query } => text_score(query, doc),
        QueryExpression::Bool { must, should } => {
            let mut score = 0;
            for clause in must {
                score += evaluate(clause, doc)?;
            }
            let mut matched_should = false;
            for clause in should {
                if let Some(s) = evaluate(clause, doc) {
                    matched_should = true;
                    score += s;
                }
            }
            if !should.is_empty() && !matched_should {
                return None;
            }
            Some(score)
        }
    }
}

/// Values at a dotted field path, descending through embedded documents and
/// flattening arrays.
fn field_values<'a>(doc: &'a Value, path: &str) -> Vec<&'a Value> {
    let mut current = vec![doc];
    for segment in path.split('.') {
        let mut next = Vec::new();
        for value in current {
            match value {
                Value::Object(map) => {
                    if let Some(v) = map.get(segment) {
                        next.push(v);
                    }
                }
                Value::Array(items) => {
                    for item in items {
                        if let Some(v) = item.get(segment) {
                            next.push(v);
                        }
                    }
                }
                _ => {}
            }
        }
        current = next;
    }
    let mut flattened = Vec::new();
    for value in current {
        match value {
            Value::Array(items) => flattened.extend(items),
            other => flattened.push(other),
        }
    }
    flattened
}

fn value_matches(value: &Value, term: &str) -> bool {
    match value {
        Value::String(s) => s == term,
        Value::Number(n) => n.to_string() == term,
        _ => false,
    }
}

/// Whitespace-token scoring for free-form queries: one point per query
/// token found anywhere in the document's text. An empty query matches
/// everything with no score, mirroring an unconditioned relevance clause.
fn text_score(query: &str, doc: &Value) -> Option<u64> {
    let unescaped = query.replace("\\/", "/");
    let tokens: Vec<String> = unescaped
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    if tokens.is_empty() {
        return Some(0);
    }
    let mut haystack = String::new();
    collect_text(doc, &mut haystack);
    let haystack = haystack.to_lowercase();
    let matched = tokens
        .iter()
        .filter(|token| haystack.contains(token.as_str()))
        .count();
    let matched = u64::try_from(matched).unwrap_or(u64::MAX);
    (matched > 0).then_some(matched)
}

fn collect_text(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => {
            out.push_str(s);
            out.push(' ');
        }
        Value::Array(items) => {
            for item in items {
                collect_text(item, out);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_text(item, out);
            }
        }
        _ => {}
    }
}

/// A document's collapsed sort key for one field sort.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Time(DateTime<Utc>),
    Text(String),
    Missing,
}

fn sort_key(doc: &Value, sort: &FieldSort) -> SortKey {
    let values = field_values(doc, &sort.field);
    if values.is_empty() {
        return if sort.missing_as_zero {
            SortKey::Number(0.0)
        } else {
            SortKey::Missing
        };
    }

    let numbers: Vec<f64> = values.iter().copied().filter_map(Value::as_f64).collect();
    if !numbers.is_empty() {
        let collapsed = match sort.mode {
            Some(SortMode::Avg) => mean(&numbers),
            None => numbers[0],
        };
        return SortKey::Number(collapsed);
    }

    let Some(text) = values.first().and_then(|v| v.as_str()) else {
        return SortKey::Missing;
    };
    DateTime::parse_from_rfc3339(text).map_or_else(
        |_| SortKey::Text(text.to_owned()),
        |t| SortKey::Time(t.with_timezone(&Utc)),
    )
}

fn mean(numbers: &[f64]) -> f64 {
    let sum: f64 = numbers.iter().sum();
    // lossless for any realistic value count
    let count = f64::from(u32::try_from(numbers.len()).unwrap_or(u32::MAX));
    sum / count
}

fn compare_keys(left: &SortKey, right: &SortKey) -> Ordering {
    match (left, right) {
        (SortKey::Number(l), SortKey::Number(r)) => l.partial_cmp(r).unwrap_or(Ordering::Equal),
        (SortKey::Time(l), SortKey::Time(r)) => l.cmp(r),
        (SortKey::Text(l), SortKey::Text(r)) => l.as_str().cmp(r.as_str()),
        (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
        // missing sorts below any present value
        (SortKey::Missing, _) => Ordering::Less,
        (_, SortKey::Missing) => Ordering::Greater,
        // mixed kinds: rank by kind so the order stays total
        (l, r) => kind_rank(l).cmp(&kind_rank(r)),
    }
}

fn kind_rank(key: &SortKey) -> u8 {
    match key {
        SortKey::Number(_) => 0,
        SortKey::Time(_) => 1,
        SortKey::Text(_) => 2,
        SortKey::Missing => 3,
    }
}
