//! Leaf clause compilers and the wire shapes they produce.
//!
//! Every clause serializes as a single-key object naming the clause kind,
//! e.g. `{"term": {"status": "active"}}`.

use crate::model::{FieldValue, NestedFieldValue, Scalar, SortMode, SortOrder, SortSpec, Value};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_with::skip_serializing_none;

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Term { field: String, value: Value },
    Terms { field: String, values: Vec<Scalar> },
    Match { field: String, value: Value },
    MultiMatch(MultiMatch),
    Nested { path: String, query: Box<Clause> },
}

/// `{key: value}` with a dynamic key.
struct Entry<'a, V: ?Sized>(&'a str, &'a V);

impl<V: Serialize + ?Sized> Serialize for Entry<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

#[derive(Serialize)]
struct NestedBody<'a> {
    path: &'a str,
    query: &'a Clause,
}

impl Serialize for Clause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Clause::Term { field, value } => {
                Entry("term", &Entry(field, value)).serialize(serializer)
            }
            Clause::Terms { field, values } => {
                Entry("terms", &Entry(field, values)).serialize(serializer)
            }
            Clause::Match { field, value } => {
                Entry("match", &Entry(field, value)).serialize(serializer)
            }
            Clause::MultiMatch(mm) => Entry("multi_match", mm).serialize(serializer),
            Clause::Nested { path, query } => Entry(
                "nested",
                &NestedBody {
                    path,
                    query: query.as_ref(),
                },
            )
            .serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiMatchType {
    Phrase,
    MostFields,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiMatch {
    pub query: String,
    #[serde(rename = "type")]
    pub kind: MultiMatchType,
    pub fields: Vec<String>,
    pub boost: Option<f64>,
    pub fuzziness: Option<String>,
    pub prefix_length: Option<u32>,
}

/// `terms` for a list value, `term` for a scalar.
pub fn compile_exact_clause(fv: &FieldValue) -> Clause {
    exact(&fv.field, &fv.value)
}

/// Always `term`, whatever the value shape.
pub fn compile_term_clause(fv: &FieldValue) -> Clause {
    Clause::Term {
        field: fv.field.clone(),
        value: fv.value.clone(),
    }
}

pub fn compile_match_clause(fv: &FieldValue) -> Clause {
    Clause::Match {
        field: fv.field.clone(),
        value: fv.value.clone(),
    }
}

pub fn compile_nested_exact_clause(nv: &NestedFieldValue) -> Clause {
    nested(&nv.path, exact(&nv.key, &nv.value))
}

pub fn compile_nested_match_clause(nv: &NestedFieldValue) -> Clause {
    nested(
        &nv.path,
        Clause::Match {
            field: nv.key.clone(),
            value: nv.value.clone(),
        },
    )
}

fn exact(field: &str, value: &Value) -> Clause {
    match value {
        Value::List(values) => Clause::Terms {
            field: field.to_string(),
            values: values.clone(),
        },
        Value::Scalar(_) => Clause::Term {
            field: field.to_string(),
            value: value.clone(),
        },
    }
}

fn nested(path: &str, query: Clause) -> Clause {
    Clause::Nested {
        path: path.to_string(),
        query: Box::new(query),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortDirective {
    pub field: String,
    pub order: SortOrder,
    pub mode: Option<SortMode>,
    pub nested_path: Option<String>,
}

#[derive(Serialize)]
struct NestedPath<'a> {
    path: &'a str,
}

#[skip_serializing_none]
#[derive(Serialize)]
struct SortBody<'a> {
    order: SortOrder,
    mode: Option<SortMode>,
    nested: Option<NestedPath<'a>>,
}

impl Serialize for SortDirective {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = SortBody {
            order: self.order,
            mode: self.mode,
            nested: self.nested_path.as_deref().map(|path| NestedPath { path }),
        };
        Entry(&self.field, &body).serialize(serializer)
    }
}

pub fn compile_sort_clause(spec: &SortSpec) -> SortDirective {
    SortDirective {
        field: spec.field.clone(),
        order: spec.order,
        mode: spec.nested.as_ref().map(|n| n.mode),
        nested_path: spec.nested.as_ref().map(|n| n.path.clone()),
    }
}

/// Compiles sorts positionally; the first entry is the primary sort key.
pub fn compile_sorts(sorts: &[SortSpec]) -> Vec<SortDirective> {
    sorts.iter().map(compile_sort_clause).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(c: &impl Serialize) -> serde_json::Value {
        serde_json::to_value(c).unwrap()
    }

    #[test]
    fn scalar_filter_is_term() {
        let c = compile_exact_clause(&FieldValue::new("status", "active"));
        assert_eq!(wire(&c), json!({"term": {"status": "active"}}));
    }

    #[test]
    fn list_filter_is_terms_with_same_list() {
        let c = compile_exact_clause(&FieldValue::new("color", vec!["red", "blue"]));
        assert_eq!(wire(&c), json!({"terms": {"color": ["red", "blue"]}}));
    }

    #[test]
    fn term_compiler_ignores_list_shape() {
        let c = compile_term_clause(&FieldValue::new("color", vec!["red"]));
        assert_eq!(wire(&c), json!({"term": {"color": ["red"]}}));
    }

    #[test]
    fn match_keeps_value_shape() {
        let c = compile_match_clause(&FieldValue::new("title", vec!["red", "shoe"]));
        assert_eq!(wire(&c), json!({"match": {"title": ["red", "shoe"]}}));
    }

    #[test]
    fn nested_clauses_are_scoped_by_path() {
        let seller = NestedFieldValue::new("offers", "offers.seller", vec![1i64, 2]);
        let f = compile_nested_exact_clause(&seller);
        assert_eq!(
            wire(&f),
            json!({"nested": {"path": "offers", "query": {"terms": {"offers.seller": [1, 2]}}}})
        );
        let note = NestedFieldValue::new("offers", "offers.note", "fast");
        let m = compile_nested_match_clause(&note);
        assert_eq!(
            wire(&m),
            json!({"nested": {"path": "offers", "query": {"match": {"offers.note": "fast"}}}})
        );
    }

    #[test]
    fn phrase_multi_match_omits_fuzzy_keys() {
        let c = Clause::MultiMatch(MultiMatch {
            query: "red shoe".into(),
            kind: MultiMatchType::Phrase,
            fields: vec!["title^5".into()],
            boost: Some(10.0),
            fuzziness: None,
            prefix_length: None,
        });
        assert_eq!(
            wire(&c),
            json!({"multi_match": {"query": "red shoe", "type": "phrase", "fields": ["title^5"], "boost": 10.0}})
        );
    }

    #[test]
    fn sorts_keep_length_and_order() {
        let sorts = vec![
            SortSpec::new("price", SortOrder::Desc),
            SortSpec::new("offers.price", SortOrder::Asc).nested("offers", SortMode::Min),
            SortSpec::new("_score", SortOrder::Desc),
        ];
        let compiled = compile_sorts(&sorts);
        assert_eq!(compiled.len(), sorts.len());
        assert_eq!(
            wire(&compiled),
            json!([
                {"price": {"order": "desc"}},
                {"offers.price": {"order": "asc", "mode": "min", "nested": {"path": "offers"}}},
                {"_score": {"order": "desc"}}
            ])
        );
    }
}
