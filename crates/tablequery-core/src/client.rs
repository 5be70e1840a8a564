//! The store client seam.
//!
//! [`QueryClient`] is deliberately narrow: one request in, one page out. The
//! trait uses `#[async_trait]` so executors can hold it as
//! `Arc<dyn QueryClient>` when the concrete client is chosen at runtime.

use std::sync::Arc;

use async_trait::async_trait;
use tablequery_model::{DynamoDBError, QueryInput, QueryOutput};

/// A store that can run one page of a DynamoDB `Query`.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Issue a single `Query` request and return the page it produced.
    async fn query(&self, input: QueryInput) -> Result<QueryOutput, DynamoDBError>;
}

#[async_trait]
impl<T: QueryClient + ?Sized> QueryClient for Arc<T> {
    async fn query(&self, input: QueryInput) -> Result<QueryOutput, DynamoDBError> {
        (**self).query(input).await
    }
}
