//! `reqwest`-backed document index speaking a JSON `_search` protocol.

use std::sync::Arc;

use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::IndexError;
use crate::index::{BoxFuture, DocumentIndex};
use crate::model::{
    Bucket, Collection, QueryExpression, RawHit, RawPage, SearchRequest, SortDirective, SortMode,
    SortOrder,
};

/// Document index reached over HTTP.
///
/// Speaks `POST {base}/{collection}/_search` with a JSON body carrying the
/// query, sort, and result window; aggregations go through the same endpoint
/// with a zero-size result window.
#[derive(Debug, Clone)]
pub struct HttpDocumentIndex {
    base_url: String,
    http: Arc<reqwest::Client>,
}

impl HttpDocumentIndex {
    /// Create a client targeting `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Arc::new(reqwest::Client::new()),
        }
    }

    async fn post_json(&self, url: &str, body: Value) -> Result<Value, IndexError> {
        debug!("querying index at {url}");
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| IndexError::Unavailable(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| IndexError::Malformed(e.to_string()))
    }
}

impl DocumentIndex for HttpDocumentIndex {
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<RawPage, IndexError>> {
        Box::pin(async move {
            let url = format!(
                "{}/{}/_search",
                self.base_url,
                request.collection.as_str()
            );
            let body = json!({
                "query": query_to_json(&request.query),
                "sort": sort_to_json(&request.sort),
                "from": request.offset,
                "size": request.limit,
            });
            let value = self.post_json(&url, body).await?;
            let decoded: SearchBody =
                serde_json::from_value(value).map_err(|e| IndexError::Malformed(e.to_string()))?;
            Ok(RawPage {
                total: decoded.hits.total.value,
                hits: decoded
                    .hits
                    .hits
                    .into_iter()
                    .map(|h| RawHit {
                        id: h.id,
                        source: h.source,
                    })
                    .collect(),
            })
        })
    }

    fn aggregate_terms<'a>(
        &'a self,
        collection: Collection,
        field: &'a str,
        size: u64,
    ) -> BoxFuture<'a, Result<Vec<Bucket>, IndexError>> {
        Box::pin(async move {
            let url = format!("{}/{}/_search", self.base_url, collection.as_str());
            let body = json!({
                "size": 0,
                "aggs": { "counts": { "terms": { "field": field, "size": size } } },
            });
            let value = self.post_json(&url, body).await?;
            let decoded: AggregationBody =
                serde_json::from_value(value).map_err(|e| IndexError::Malformed(e.to_string()))?;
            Ok(decoded
                .aggregations
                .counts
                .buckets
                .into_iter()
                .map(|b| Bucket {
                    term: b.key,
                    count: b.doc_count,
                })
                .collect())
        })
    }
}

/// Single-entry JSON object with a computed key.
fn object(key: &str, value: Value) -> Value {
    let mut map = serde_json::Map::new();
    map.insert(key.to_owned(), value);
    Value::Object(map)
}

fn query_to_json(query: &QueryExpression) -> Value {
    match query {
        QueryExpression::MatchAll => json!({ "match_all": {} }),
        QueryExpression::Term { field, value } => {
            json!({ "term": object(field, Value::String(value.clone())) })
        }
        QueryExpression::Text { query } => json!({ "query_string": { "query": query } }),
        QueryExpression::Bool { must, should } => {
            let mut bool_body = serde_json::Map::new();
            if !must.is_empty() {
                bool_body.insert(
                    "must".to_owned(),
                    Value::Array(must.iter().map(query_to_json).collect()),
                );
            }
            if !should.is_empty() {
                bool_body.insert(
                    "should".to_owned(),
                    Value::Array(should.iter().map(query_to_json).collect()),
                );
            }
            json!({ "bool": Value::Object(bool_body) })
        }
    }
}

fn sort_to_json(sort: &SortDirective) -> Value {
    match sort {
        SortDirective::Relevance => json!(["_score"]),
        SortDirective::Field(field_sort) => {
            let mut options = serde_json::Map::new();
            let order = match field_sort.order {
                SortOrder::Asc => "asc",
                SortOrder::Desc => "desc",
            };
            options.insert("order".to_owned(), json!(order));
            if field_sort.missing_as_zero {
                options.insert("missing".to_owned(), json!(0));
            }
            if let Some(SortMode::Avg) = field_sort.mode {
                options.insert("mode".to_owned(), json!("avg"));
            }
            json!([object(&field_sort.field, Value::Object(options))])
        }
    }
}

#[derive(Deserialize)]
struct SearchBody {
    hits: HitsBody,
}

#[derive(Deserialize)]
struct HitsBody {
    total: TotalBody,
    hits: Vec<HitBody>,
}

#[derive(Deserialize)]
struct TotalBody {
    value: u64,
}

#[derive(Deserialize)]
struct HitBody {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: Value,
}

#[derive(Deserialize)]
struct AggregationBody {
    aggregations: AggregationsBody,
}

#[derive(Deserialize)]
struct AggregationsBody {
    counts: TermsBody,
}

#[derive(Deserialize)]
struct TermsBody {
    buckets: Vec<BucketBody>,
}

#[derive(Deserialize)]
struct BucketBody {
    key: String,
    doc_count: u64,
}
