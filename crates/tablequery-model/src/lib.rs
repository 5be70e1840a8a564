//! DynamoDB `Query` wire types for TableQuery.
//!
//! Only the slice of the DynamoDB JSON protocol that a paginated `Query`
//! needs lives here: the `AttributeValue` tagged union, the request and
//! response shapes, and the service error type. Everything serializes to the
//! `awsJson1_0` shape so the types double as fixtures in tests.
// "DynamoDB" appears in virtually every doc comment in this crate.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod attribute_value;
pub mod error;
pub mod input;
pub mod output;
pub mod types;

pub use attribute_value::{AttributeValue, Item};
pub use error::{DynamoDBError, DynamoDBErrorCode};
pub use input::QueryInput;
pub use output::QueryOutput;
