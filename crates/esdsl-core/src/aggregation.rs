use crate::clause::{compile_exact_clause, compile_sort_clause};
use crate::config::Tuning;
use crate::document::{
    Assemble, BoolQuery, BucketAggregation, KeyOrder, Query, RequestDocument, TermsSource,
    TopHits, TopHitsAggregation, BUCKET_AGG_NAME, TOP_HITS_AGG_NAME,
};
use crate::model::SortSpec;
use crate::query::{AggregationQuerySpec, AggregationSpec, TopHitSpec};
use crate::simple::filter_match_clauses;
use std::collections::BTreeMap;
use tracing::debug;

// Per-bucket sampling always starts at the first hit.
fn top_hits(spec: &TopHitSpec) -> TopHitsAggregation {
    TopHitsAggregation {
        top_hits: TopHits {
            sort: vec![compile_sort_clause(&SortSpec::new(spec.field.clone(), spec.order))],
            size: spec.size,
            from: 0,
        },
    }
}

pub fn bucket_aggregation(aggs: &AggregationSpec, top_hit: &TopHitSpec) -> BucketAggregation {
    BucketAggregation {
        terms: TermsSource {
            field: aggs.field.clone(),
            size: aggs.size,
            order: KeyOrder { key: aggs.order },
        },
        aggs: BTreeMap::from([(TOP_HITS_AGG_NAME.to_string(), top_hits(top_hit))]),
    }
}

impl Assemble for AggregationQuerySpec {
    fn assemble_with(&self, _tuning: &Tuning) -> RequestDocument {
        let must = filter_match_clauses(
            self.filters.as_ref(),
            self.matches.as_ref(),
            compile_exact_clause,
        );
        debug!(
            field = %self.aggs.field,
            buckets = self.aggs.size,
            must = must.len(),
            "assembled aggregation query"
        );

        let mut doc = RequestDocument::new(Query::Bool(BoolQuery { should: None, must }));
        // buckets only, no top-level hits
        doc.size = Some(0);
        doc.aggs = Some(BTreeMap::from([(
            BUCKET_AGG_NAME.to_string(),
            bucket_aggregation(&self.aggs, &self.top_hit),
        )]));
        doc
    }
}
