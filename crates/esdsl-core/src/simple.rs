use crate::clause::{
    compile_exact_clause, compile_match_clause, compile_nested_exact_clause,
    compile_nested_match_clause, compile_sorts, Clause,
};
use crate::config::Tuning;
use crate::document::{Assemble, BoolQuery, Query, RequestDocument};
use crate::model::{FilterSpec, MatchSpec};
use crate::query::SimpleQuerySpec;
use tracing::debug;

/// Filters then matches, each group in input order.
pub(crate) fn filter_match_clauses(
    filters: Option<&Vec<FilterSpec>>,
    matches: Option<&Vec<MatchSpec>>,
    compile_filter: impl Fn(&FilterSpec) -> Clause,
) -> Vec<Clause> {
    let mut must = Vec::new();
    if let Some(filters) = filters {
        must.extend(filters.iter().map(compile_filter));
    }
    if let Some(matches) = matches {
        must.extend(matches.iter().map(compile_match_clause));
    }
    must
}

impl Assemble for SimpleQuerySpec {
    fn assemble_with(&self, _tuning: &Tuning) -> RequestDocument {
        let mut must = filter_match_clauses(
            self.filters.as_ref(),
            self.matches.as_ref(),
            compile_exact_clause,
        );
        if let Some(nested) = &self.nested_filters {
            must.extend(nested.iter().map(compile_nested_exact_clause));
        }
        if let Some(nested) = &self.nested_matches {
            must.extend(nested.iter().map(compile_nested_match_clause));
        }
        debug!(clauses = must.len(), "assembled simple query");

        let mut doc = RequestDocument::new(Query::Bool(BoolQuery { should: None, must }));
        doc.paginate(self.pagination.as_ref());
        doc.sort = self.sorts.as_deref().map(compile_sorts);
        if let Some(raw) = &self.raw_options {
            doc.raw = raw.clone();
        }
        doc
    }
}
