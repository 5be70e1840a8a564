//! Paginated `Query` execution.
//!
//! [`QueryExecutor::execute`] marshals the caller's placeholder values, then
//! walks the result pages one fetch at a time, following `LastEvaluatedKey`
//! until the store runs out of pages or the output cap is reached.

use std::collections::HashMap;

use serde::Serialize;
use tablequery_model::types::ConsumedCapacity;
use tablequery_model::{Item, QueryInput, QueryOutput};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::QueryClient;
use crate::codec;
use crate::error::{QueryError, TableQueryResult};
use crate::params::QueryParameters;

/// Aggregate of one query invocation across every page fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    /// Returned items, each flattened to a JSON object string, in page order.
    pub items: Vec<String>,
    /// Sum of the per-page `Count` (items matching the filter).
    pub item_count: i64,
    /// Sum of the per-page `ScannedCount`.
    pub scanned_count: i64,
    /// Number of page fetches issued.
    pub query_count: u64,
    /// Cursor to resume after the last returned item, when one exists.
    ///
    /// When the cap cuts a page short, the cursor is the last returned item
    /// projected onto the page cursor's key attributes. It stays `None` if the
    /// cut page was the final one or the item lacks a key attribute; such a
    /// result cannot be resumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Item>,
    /// Capacity summed over all pages, when the request asked for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
    /// `true` when the output cap stopped the loop with data left behind.
    pub truncated: bool,
}

impl QueryResult {
    fn absorb_counts(&mut self, page: &QueryOutput) {
        self.query_count += 1;
        self.item_count += i64::from(page.count);
        self.scanned_count += i64::from(page.scanned_count);
        if let Some(capacity) = &page.consumed_capacity {
            self.consumed_capacity
                .get_or_insert_with(ConsumedCapacity::default)
                .absorb(capacity);
        }
    }
}

/// Runs queries against a [`QueryClient`].
///
/// The executor holds no per-invocation state, so one instance can serve
/// concurrent invocations.
#[derive(Debug, Clone)]
pub struct QueryExecutor<C> {
    client: C,
}

impl<C: QueryClient> QueryExecutor<C> {
    /// Wrap a store client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The underlying store client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run the query described by `params`, fetching pages until the store
    /// returns no cursor or `output_limit` items have been collected.
    ///
    /// # Errors
    ///
    /// - [`QueryError::Decode`] if a placeholder value is malformed; no
    ///   request is sent.
    /// - [`QueryError::Store`] on the first failed page fetch.
    /// - [`QueryError::Serialization`] if a returned item cannot be flattened.
    /// - [`QueryError::Cancelled`] if `cancel` fires before the loop finishes.
    ///
    /// Any error discards the items gathered so far.
    pub async fn execute(
        &self,
        params: &QueryParameters,
        cancel: &CancellationToken,
    ) -> TableQueryResult<QueryResult> {
        let mut input = build_input(params)?;
        let cap = params.output_limit.map(std::num::NonZeroUsize::get);
        let mut result = QueryResult::default();

        loop {
            if cancel.is_cancelled() {
                return Err(QueryError::Cancelled {
                    pages: result.query_count,
                });
            }

            let page = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    return Err(QueryError::Cancelled { pages: result.query_count });
                }
                page = self.client.query(input.clone()) => page.map_err(|e| {
                    warn!(
                        table = %params.table_name,
                        page = result.query_count + 1,
                        code = %e.code,
                        retryable = e.code.is_retryable(),
                        "query page failed"
                    );
                    QueryError::Store(e)
                })?,
            };

            result.absorb_counts(&page);
            debug!(
                table = %params.table_name,
                page = result.query_count,
                count = page.count,
                scanned_count = page.scanned_count,
                items = page.items.len(),
                has_more = page.has_more(),
                "fetched query page"
            );

            let mut cut_after = None;
            for (index, item) in page.items.iter().enumerate() {
                result.items.push(codec::flatten(item)?);
                if cap.is_some_and(|cap| result.items.len() >= cap) {
                    if index + 1 < page.items.len() {
                        cut_after = Some(item);
                    }
                    break;
                }
            }

            if let Some(item) = cut_after {
                result.truncated = true;
                result.last_evaluated_key = cursor_after(item, &page.last_evaluated_key);
                break;
            }

            let cap_reached = cap.is_some_and(|cap| result.items.len() >= cap);
            let QueryOutput {
                last_evaluated_key, ..
            } = page;

            if last_evaluated_key.is_empty() {
                result.last_evaluated_key = None;
                break;
            }
            if cap_reached {
                result.truncated = true;
                result.last_evaluated_key = Some(last_evaluated_key);
                break;
            }

            input.exclusive_start_key.clone_from(&last_evaluated_key);
            result.last_evaluated_key = Some(last_evaluated_key);
        }

        info!(
            table = %params.table_name,
            index = params.index_name.as_deref().unwrap_or_default(),
            pages = result.query_count,
            items = result.items.len(),
            item_count = result.item_count,
            scanned_count = result.scanned_count,
            truncated = result.truncated,
            "query complete"
        );

        Ok(result)
    }
}

/// A cursor that resumes right after `item`: `item` projected onto the key
/// attributes named by the page's own cursor.
///
/// `None` when the page carried no cursor (its key schema is unknown) or when
/// `item` lacks one of the key attributes, e.g. under a projection.
fn cursor_after(item: &Item, page_cursor: &Item) -> Option<Item> {
    if page_cursor.is_empty() {
        return None;
    }
    page_cursor
        .keys()
        .map(|name| item.get(name).map(|value| (name.clone(), value.clone())))
        .collect()
}

/// Marshal placeholder values and copy the present optional fields into a
/// first-page request.
fn build_input(params: &QueryParameters) -> TableQueryResult<QueryInput> {
    let mut values = HashMap::with_capacity(params.expression_attribute_values.len());
    for (placeholder, text) in &params.expression_attribute_values {
        let doc = codec::parse(text).map_err(|e| e.for_placeholder(placeholder))?;
        if let Some(value) =
            codec::to_wire(Some(&doc)).map_err(|e| e.for_placeholder(placeholder))?
        {
            values.insert(placeholder.clone(), value);
        }
    }

    Ok(QueryInput {
        table_name: params.table_name.clone(),
        index_name: params.index_name.clone(),
        key_condition_expression: Some(params.key_condition_expression.clone())
            .filter(|kce| !kce.is_empty()),
        filter_expression: params.filter_expression.clone(),
        projection_expression: params.projection_expression.clone(),
        expression_attribute_names: params
            .expression_attribute_names
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        expression_attribute_values: values,
        scan_index_forward: params.scan_index_forward,
        limit: params
            .limit
            .map(|limit| i32::try_from(limit.get()).unwrap_or(i32::MAX)),
        exclusive_start_key: params.exclusive_start_key.clone(),
        select: params.select,
        consistent_read: params.consistent_read,
        return_consumed_capacity: params.return_consumed_capacity,
    })
}
