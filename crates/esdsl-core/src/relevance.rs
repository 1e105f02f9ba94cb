//! Scored full-text search: an exact-phrase clause and a fuzzy most-fields
//! clause share a `bool.should`, wrapped in `function_score` so that weak
//! matches fall under `min_score` and are dropped.

use crate::clause::{
    compile_exact_clause, compile_sorts, compile_term_clause, Clause, MultiMatch, MultiMatchType,
};
use crate::config::{RelevanceFilterMode, Tuning};
use crate::document::{Assemble, BoolQuery, FunctionScoreQuery, Query, RequestDocument};
use crate::model::FieldValue;
use crate::query::RelevanceQuerySpec;
use crate::simple::filter_match_clauses;
use tracing::{debug, trace};

pub fn phrase_clause(query: &str, fields: &[String], tuning: &Tuning) -> Clause {
    Clause::MultiMatch(MultiMatch {
        query: query.to_string(),
        kind: MultiMatchType::Phrase,
        fields: fields.to_vec(),
        boost: Some(tuning.phrase_boost),
        fuzziness: None,
        prefix_length: None,
    })
}

pub fn fuzzy_clause(query: &str, fields: &[String], tuning: &Tuning) -> Clause {
    Clause::MultiMatch(MultiMatch {
        query: query.to_string(),
        kind: MultiMatchType::MostFields,
        fields: fields.to_vec(),
        boost: None,
        fuzziness: Some(tuning.fuzziness.clone()),
        prefix_length: Some(tuning.prefix_length),
    })
}

impl Assemble for RelevanceQuerySpec {
    fn assemble_with(&self, tuning: &Tuning) -> RequestDocument {
        let compile_filter = |fv: &FieldValue| match tuning.relevance_filters {
            RelevanceFilterMode::ExactTerm => compile_term_clause(fv),
            RelevanceFilterMode::ListAware => compile_exact_clause(fv),
        };
        let must =
            filter_match_clauses(self.filters.as_ref(), self.matches.as_ref(), compile_filter);
        for clause in &must {
            trace!(clause = ?clause, "relevance must clause");
        }

        let should = vec![
            phrase_clause(&self.query, &self.fields.phrase_fields, tuning),
            fuzzy_clause(&self.query, &self.fields.fuzzy_fields, tuning),
        ];
        debug!(
            phrase_fields = self.fields.phrase_fields.len(),
            fuzzy_fields = self.fields.fuzzy_fields.len(),
            must = must.len(),
            "assembled relevance query"
        );

        let scored = Query::FunctionScore(FunctionScoreQuery {
            query: Box::new(Query::Bool(BoolQuery {
                should: Some(should),
                must,
            })),
            min_score: tuning.min_score,
        });
        let mut doc = RequestDocument::new(scored);
        doc.paginate(self.pagination.as_ref());
        doc.sort = self.sorts.as_deref().map(compile_sorts);
        if let Some(raw) = &self.raw_options {
            doc.raw = raw.clone();
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FieldSet;
    use serde_json::json;

    fn spec() -> RelevanceQuerySpec {
        RelevanceQuerySpec {
            query: "red shoe".into(),
            fields: FieldSet {
                phrase_fields: vec!["productName^5".into(), "brandName^3".into()],
                fuzzy_fields: vec!["productName^5".into()],
            },
            ..Default::default()
        }
    }

    #[test]
    fn should_holds_phrase_then_fuzzy() {
        let v = serde_json::to_value(spec().assemble()).unwrap();
        assert_eq!(
            v,
            json!({"query": {"function_score": {
                "query": {"bool": {
                    "should": [
                        {"multi_match": {"query": "red shoe", "type": "phrase",
                            "fields": ["productName^5", "brandName^3"], "boost": 10.0}},
                        {"multi_match": {"query": "red shoe", "type": "most_fields",
                            "fields": ["productName^5"], "fuzziness": "AUTO", "prefix_length": 1}}
                    ],
                    "must": []
                }},
                "min_score": 0.1
            }}})
        );
    }

    #[test]
    fn list_filter_stays_term_by_default() {
        let mut s = spec();
        s.filters = Some(vec![FieldValue::new("color", vec!["red", "blue"])]);
        let v = serde_json::to_value(s.assemble()).unwrap();
        assert_eq!(
            v["query"]["function_score"]["query"]["bool"]["must"],
            json!([{"term": {"color": ["red", "blue"]}}])
        );
    }

    #[test]
    fn list_aware_mode_emits_terms() {
        let mut s = spec();
        s.filters = Some(vec![FieldValue::new("color", vec!["red", "blue"])]);
        s.matches = Some(vec![FieldValue::new("title", "runner")]);
        let tuning = Tuning {
            relevance_filters: RelevanceFilterMode::ListAware,
            ..Default::default()
        };
        let v = serde_json::to_value(s.assemble_with(&tuning)).unwrap();
        assert_eq!(
            v["query"]["function_score"]["query"]["bool"]["must"],
            json!([{"terms": {"color": ["red", "blue"]}}, {"match": {"title": "runner"}}])
        );
    }

    #[test]
    fn empty_field_lists_still_give_two_should_clauses() {
        let s = RelevanceQuerySpec {
            query: "x".into(),
            ..Default::default()
        };
        let v = serde_json::to_value(s.assemble()).unwrap();
        let should = v["query"]["function_score"]["query"]["bool"]["should"]
            .as_array()
            .unwrap();
        assert_eq!(should.len(), 2);
        assert_eq!(should[0]["multi_match"]["type"], json!("phrase"));
        assert_eq!(should[1]["multi_match"]["type"], json!("most_fields"));
    }
}
