pub mod aggregation;
pub mod clause;
pub mod config;
pub mod document;
pub mod errors;
pub mod model;
pub mod query;
pub mod relevance;
pub mod simple;
pub mod validate;

pub use aggregation::*;
pub use clause::*;
pub use config::*;
pub use document::*;
pub use errors::*;
pub use model::*;
pub use query::*;
pub use relevance::*;
pub use simple::*;
pub use validate::*;
