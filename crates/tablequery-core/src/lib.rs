//! Core of the TableQuery data source.
//!
//! Two pieces do the real work:
//!
//! - [`codec`] turns caller-supplied JSON attribute values into the wire
//!   [`AttributeValue`](tablequery_model::AttributeValue) and flattens
//!   returned items back into JSON strings.
//! - [`executor`] runs a DynamoDB `Query` through a [`QueryClient`],
//!   following `LastEvaluatedKey` cursors and aggregating counts and items
//!   up to an optional output cap.
//!
//! The store itself sits behind the [`QueryClient`] trait so the executor can
//! be driven by the AWS SDK in production and by a scripted fake in tests.

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod executor;
pub mod id;
pub mod params;

pub use client::QueryClient;
pub use config::TableQueryConfig;
pub use error::{QueryError, TableQueryResult};
pub use executor::{QueryExecutor, QueryResult};
pub use params::QueryParameters;
