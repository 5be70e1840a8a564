//! Rendering a query result as the data source's output attributes.

use anyhow::{Context, Result};
use serde::Serialize;
use tablequery_core::QueryResult;
use tablequery_model::Item;
use tablequery_model::types::ConsumedCapacity;

#[derive(Debug, Serialize)]
struct Attributes<'a> {
    id: &'a str,
    items: &'a [String],
    item_count: i64,
    scanned_count: i64,
    query_count: u64,
    truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_evaluated_key: Option<&'a Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    consumed_capacity: Option<&'a ConsumedCapacity>,
}

/// Serialize `result` under the identifier `id`.
pub fn render(id: &str, result: &QueryResult) -> Result<String> {
    let attributes = Attributes {
        id,
        items: &result.items,
        item_count: result.item_count,
        scanned_count: result.scanned_count,
        query_count: result.query_count,
        truncated: result.truncated,
        last_evaluated_key: result.last_evaluated_key.as_ref(),
        consumed_capacity: result.consumed_capacity.as_ref(),
    };
    serde_json::to_string(&attributes).context("failed to serialize query result")
}
