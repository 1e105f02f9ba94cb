use crate::model::{
    FilterSpec, MatchSpec, NestedFilterSpec, NestedMatchSpec, Pagination, RawOptions, SortOrder,
    SortSpec,
};
use serde::{Deserialize, Serialize};

// Optional lists stay Option so an absent section is distinguishable from an empty one.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SimpleQuerySpec {
    pub filters: Option<Vec<FilterSpec>>,
    pub matches: Option<Vec<MatchSpec>>,
    pub nested_filters: Option<Vec<NestedFilterSpec>>,
    pub nested_matches: Option<Vec<NestedMatchSpec>>,
    pub sorts: Option<Vec<SortSpec>>,
    pub pagination: Option<Pagination>,
    pub raw_options: Option<RawOptions>,
}

/// Fields searched by the relevance query; entries may carry a `^weight` suffix.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FieldSet {
    pub phrase_fields: Vec<String>,
    pub fuzzy_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RelevanceQuerySpec {
    pub query: String,
    pub fields: FieldSet,
    pub filters: Option<Vec<FilterSpec>>,
    pub matches: Option<Vec<MatchSpec>>,
    pub sorts: Option<Vec<SortSpec>>,
    pub pagination: Option<Pagination>,
    pub raw_options: Option<RawOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregationSpec {
    pub field: String,
    pub size: u64, // max buckets
    pub order: SortOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopHitSpec {
    pub field: String,
    pub order: SortOrder,
    pub size: u64, // docs per bucket
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregationQuerySpec {
    pub aggs: AggregationSpec,
    pub top_hit: TopHitSpec,
    #[serde(default)]
    pub filters: Option<Vec<FilterSpec>>,
    #[serde(default)]
    pub matches: Option<Vec<MatchSpec>>,
}
