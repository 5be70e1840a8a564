//! Data source identifier.

use chrono::{DateTime, Utc};

/// Build the opaque identifier for one query invocation.
///
/// Joins the table name, the labelled key condition and index name (each only
/// when non-empty), and the invocation time in Unix nanoseconds with `|`.
/// Nothing parses the result.
#[must_use]
pub fn data_source_id(
    table_name: &str,
    key_condition_expression: &str,
    index_name: Option<&str>,
    at: DateTime<Utc>,
) -> String {
    // Out-of-range timestamps (after 2262) fall back to microsecond precision.
    let nanos = at
        .timestamp_nanos_opt()
        .unwrap_or_else(|| at.timestamp_micros().saturating_mul(1_000));
    let suffix = nanos.to_string();

    let mut parts = vec![table_name];

    if !key_condition_expression.is_empty() {
        parts.push("KeyConditionExpression");
        parts.push(key_condition_expression);
    }

    let index_name = index_name.unwrap_or_default();
    if !index_name.is_empty() {
        parts.push("IndexName");
        parts.push(index_name);
    }

    parts.push(&suffix);

    parts.join("|")
}
