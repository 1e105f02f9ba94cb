use crate::clause::{Clause, SortDirective};
use crate::config::Tuning;
use crate::errors::Result;
use crate::model::{Pagination, RawOptions, SortOrder};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

pub const BUCKET_AGG_NAME: &str = "top_tags";
pub const TOP_HITS_AGG_NAME: &str = "top_hit_items";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    Bool(BoolQuery),
    FunctionScore(FunctionScoreQuery),
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    pub should: Option<Vec<Clause>>,
    pub must: Vec<Clause>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionScoreQuery {
    pub query: Box<Query>,
    pub min_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyOrder {
    #[serde(rename = "_key")]
    pub key: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermsSource {
    pub field: String,
    pub size: u64,
    pub order: KeyOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopHits {
    pub sort: Vec<SortDirective>,
    pub size: u64,
    pub from: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopHitsAggregation {
    pub top_hits: TopHits,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketAggregation {
    pub terms: TermsSource,
    pub aggs: BTreeMap<String, TopHitsAggregation>,
}

/// Root keys the assemblers control.
#[skip_serializing_none]
#[derive(Serialize)]
struct KnownKeys<'a> {
    query: &'a Query,
    from: Option<u64>,
    size: Option<u64>,
    sort: Option<&'a Vec<SortDirective>>,
    aggs: Option<&'a BTreeMap<String, BucketAggregation>>,
}

/// A complete search request body, ready for the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDocument {
    pub query: Query,
    pub from: Option<u64>,
    pub size: Option<u64>,
    pub sort: Option<Vec<SortDirective>>,
    pub aggs: Option<BTreeMap<String, BucketAggregation>>,
    pub raw: RawOptions,
}

impl RequestDocument {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            from: None,
            size: None,
            sort: None,
            aggs: None,
            raw: RawOptions::default(),
        }
    }

    pub fn paginate(&mut self, pagination: Option<&Pagination>) {
        if let Some(p) = pagination {
            self.from = Some(p.from);
            self.size = Some(p.size);
        }
    }

    /// Renders the JSON tree. Raw options are applied last and win on key collisions.
    pub fn to_value(&self) -> Result<JsonValue> {
        let known = KnownKeys {
            query: &self.query,
            from: self.from,
            size: self.size,
            sort: self.sort.as_ref(),
            aggs: self.aggs.as_ref(),
        };
        let mut root = match serde_json::to_value(known)? {
            JsonValue::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        for (k, v) in self.raw.iter() {
            root.insert(k.clone(), v.clone());
        }
        Ok(JsonValue::Object(root))
    }
}

impl Serialize for RequestDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

/// Turns a specification into a request document.
pub trait Assemble {
    fn assemble_with(&self, tuning: &Tuning) -> RequestDocument;

    fn assemble(&self) -> RequestDocument {
        self.assemble_with(&Tuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_document_has_only_query() {
        let doc = RequestDocument::new(Query::Bool(BoolQuery::default()));
        assert_eq!(doc.to_value().unwrap(), json!({"query": {"bool": {"must": []}}}));
    }

    #[test]
    fn raw_options_override_known_keys() {
        let mut doc = RequestDocument::new(Query::Bool(BoolQuery::default()));
        doc.paginate(Some(&Pagination { from: 20, size: 10 }));
        doc.raw = RawOptions::new()
            .with("size", json!(99))
            .with("_source", json!(["title"]));
        let v = doc.to_value().unwrap();
        assert_eq!(v["size"], json!(99));
        assert_eq!(v["from"], json!(20));
        assert_eq!(v["_source"], json!(["title"]));
    }
}
