//! Optional pre-assembly checks. Assembly itself trusts its input; callers
//! that build specifications from untrusted data run `validate()` first.

use crate::errors::{QueryError, Result};
use crate::model::{FieldValue, NestedFieldValue, SortSpec};
use crate::query::{
    AggregationQuerySpec, AggregationSpec, RelevanceQuerySpec, SimpleQuerySpec, TopHitSpec,
};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QueryError::MissingField(name.to_string()));
    }
    Ok(())
}

fn validate_all<T: Validate>(items: Option<&Vec<T>>) -> Result<()> {
    items.into_iter().flatten().try_for_each(|item| item.validate())
}

impl Validate for FieldValue {
    fn validate(&self) -> Result<()> {
        require("field", &self.field)
    }
}

impl Validate for NestedFieldValue {
    fn validate(&self) -> Result<()> {
        require("path", &self.path)?;
        require("key", &self.key)
    }
}

impl Validate for SortSpec {
    fn validate(&self) -> Result<()> {
        require("field", &self.field)?;
        if let Some(n) = &self.nested {
            require("nested.path", &n.path)?;
        }
        Ok(())
    }
}

impl Validate for AggregationSpec {
    fn validate(&self) -> Result<()> {
        require("aggs.field", &self.field)?;
        if self.size == 0 {
            return Err(QueryError::Invalid(
                "aggregation bucket count must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Validate for TopHitSpec {
    fn validate(&self) -> Result<()> {
        require("top_hit.field", &self.field)?;
        if self.size == 0 {
            return Err(QueryError::Invalid("top hit size must be positive".into()));
        }
        Ok(())
    }
}

impl Validate for SimpleQuerySpec {
    fn validate(&self) -> Result<()> {
        validate_all(self.filters.as_ref())?;
        validate_all(self.matches.as_ref())?;
        validate_all(self.nested_filters.as_ref())?;
        validate_all(self.nested_matches.as_ref())?;
        validate_all(self.sorts.as_ref())
    }
}

impl Validate for RelevanceQuerySpec {
    fn validate(&self) -> Result<()> {
        require("query", &self.query)?;
        validate_all(self.filters.as_ref())?;
        validate_all(self.matches.as_ref())?;
        validate_all(self.sorts.as_ref())
    }
}

impl Validate for AggregationQuerySpec {
    fn validate(&self) -> Result<()> {
        self.aggs.validate()?;
        self.top_hit.validate()?;
        validate_all(self.filters.as_ref())?;
        validate_all(self.matches.as_ref())
    }
}
