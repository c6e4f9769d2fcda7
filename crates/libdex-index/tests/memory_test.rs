use libdex_index::index::DocumentIndex;
use libdex_index::memory::MemoryIndex;
use libdex_index::model::{
    Collection, FieldSort, QueryExpression, SearchRequest, SortDirective, SortMode,
};
use serde_json::json;

fn request(query: QueryExpression, sort: SortDirective) -> SearchRequest {
    SearchRequest {
        collection: Collection::Packages,
        query,
        sort,
        offset: 0,
        limit: 100,
    }
}

fn seeded() -> MemoryIndex {
    let mut index = MemoryIndex::new();
    index.insert(
        Collection::Packages,
        "p1",
        json!({
            "organization": "acme",
            "repository": "http-kit",
            "keywords": ["http", "client"],
            "description": "an http client",
            "stars": 120,
        }),
    );
    index.insert(
        Collection::Packages,
        "p2",
        json!({
            "organization": "acme",
            "repository": "json-kit",
            "keywords": ["json"],
            "description": "a json parser",
            "stars": [40, 60],
        }),
    );
    index.insert(
        Collection::Packages,
        "p3",
        json!({
            "organization": "umbrella",
            "repository": "web-server",
            "keywords": ["http", "server"],
            "description": "an http server",
        }),
    );
    index
}

#[tokio::test]
async fn term_query_matches_exact_values_only() {
    let index = seeded();
    let page = index
        .search(&request(
            QueryExpression::term("organization", "acme"),
            SortDirective::Relevance,
        ))
        .await
        .unwrap();
    assert_eq!(page.total, 2);

    let none = index
        .search(&request(
            QueryExpression::term("organization", "acm"),
            SortDirective::Relevance,
        ))
        .await
        .unwrap();
    assert_eq!(none.total, 0);
}

#[tokio::test]
async fn term_query_reaches_embedded_documents_by_dotted_path() {
    let mut index = MemoryIndex::new();
    index.insert(
        Collection::Releases,
        "r1",
        json!({
            "coordinate": { "group": "org.acme", "artifact": "core", "version": "1.0.0" },
            "reference": { "organization": "acme", "repository": "http-kit" },
        }),
    );
    let page = index
        .search(&SearchRequest {
            collection: Collection::Releases,
            query: QueryExpression::term("reference.organization", "acme"),
            sort: SortDirective::Relevance,
            offset: 0,
            limit: 10,
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.hits[0].id, "r1");
}

#[tokio::test]
async fn must_clauses_are_a_conjunction() {
    let index = seeded();
    let page = index
        .search(&request(
            QueryExpression::all_of(vec![
                QueryExpression::term("organization", "acme"),
                QueryExpression::term("repository", "web-server"),
            ]),
            SortDirective::Relevance,
        ))
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn should_clauses_are_a_disjunction_and_raise_scores() {
    let index = seeded();
    let page = index
        .search(&request(
            QueryExpression::any_of(vec![
                QueryExpression::term("keywords", "http"),
                QueryExpression::term("organization", "acme"),
            ]),
            SortDirective::Relevance,
        ))
        .await
        .unwrap();
    // p1 matches both clauses and outranks the single-clause matches
    assert_eq!(page.total, 3);
    assert_eq!(page.hits[0].id, "p1");
}

#[tokio::test]
async fn text_query_matches_tokens_in_any_text_field() {
    let index = seeded();
    let page = index
        .search(&request(
            QueryExpression::text("json parser"),
            SortDirective::Relevance,
        ))
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.hits[0].id, "p2");
}

#[tokio::test]
async fn field_sort_averages_multiple_values_and_defaults_missing_to_zero() {
    let index = seeded();
    let page = index
        .search(&request(
            QueryExpression::MatchAll,
            SortDirective::Field(
                FieldSort::descending("stars")
                    .with_missing_as_zero()
                    .with_mode(SortMode::Avg),
            ),
        ))
        .await
        .unwrap();
    // p1 = 120, p2 = avg(40, 60) = 50, p3 missing = 0
    let order: Vec<&str> = page.hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(order, vec!["p1", "p2", "p3"]);
}

#[tokio::test]
async fn timestamps_sort_chronologically() {
    let mut index = MemoryIndex::new();
    index.insert(
        Collection::Packages,
        "old",
        json!({ "created_at": "2023-01-05T00:00:00Z" }),
    );
    index.insert(
        Collection::Packages,
        "new",
        json!({ "created_at": "2024-11-20T08:30:00Z" }),
    );
    let page = index
        .search(&request(
            QueryExpression::MatchAll,
            SortDirective::Field(FieldSort::descending("created_at")),
        ))
        .await
        .unwrap();
    assert_eq!(page.hits[0].id, "new");
}

#[tokio::test]
async fn result_window_skips_and_caps_without_losing_the_total() {
    let mut index = MemoryIndex::new();
    for i in 0..25 {
        index.insert(Collection::Packages, format!("p{i}"), json!({ "n": i }));
    }
    let page = index
        .search(&SearchRequest {
            collection: Collection::Packages,
            query: QueryExpression::MatchAll,
            sort: SortDirective::Relevance,
            offset: 20,
            limit: 10,
        })
        .await
        .unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(page.hits.len(), 5);

    let beyond = index
        .search(&SearchRequest {
            collection: Collection::Packages,
            query: QueryExpression::MatchAll,
            sort: SortDirective::Relevance,
            offset: 100,
            limit: 10,
        })
        .await
        .unwrap();
    assert_eq!(beyond.total, 25);
    assert!(beyond.hits.is_empty());
}

#[tokio::test]
async fn terms_aggregation_counts_documents_not_occurrences() {
    let mut index = MemoryIndex::new();
    index.insert(
        Collection::Packages,
        "p1",
        json!({ "keywords": ["http", "http", "client"] }),
    );
    index.insert(Collection::Packages, "p2", json!({ "keywords": ["http"] }));
    let buckets = index
        .aggregate_terms(Collection::Packages, "keywords", 50)
        .await
        .unwrap();
    assert_eq!(buckets[0].term, "http");
    assert_eq!(buckets[0].count, 2);
    assert_eq!(buckets[1].term, "client");
    assert_eq!(buckets[1].count, 1);
}

#[tokio::test]
async fn terms_aggregation_orders_by_count_then_term_and_respects_the_cap() {
    let mut index = MemoryIndex::new();
    index.insert(
        Collection::Packages,
        "p1",
        json!({ "keywords": ["zeta", "alpha", "http"] }),
    );
    index.insert(Collection::Packages, "p2", json!({ "keywords": ["http"] }));
    let buckets = index
        .aggregate_terms(Collection::Packages, "keywords", 2)
        .await
        .unwrap();
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].term, "http");
    // tie between alpha and zeta resolves lexicographically
    assert_eq!(buckets[1].term, "alpha");
}
