//! The `Query` response.

use serde::{Deserialize, Serialize};

use crate::attribute_value::Item;
use crate::types::ConsumedCapacity;

/// Output for the `Query` operation (one page).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryOutput {
    /// Matching items, in key order. Absent when `Select=COUNT`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,

    /// The number of items that matched (after filtering).
    pub count: i32,

    /// The number of items evaluated before the filter expression was applied.
    pub scanned_count: i32,

    /// Where this page stopped. Non-empty means more pages may follow.
    #[serde(default, skip_serializing_if = "std::collections::HashMap::is_empty")]
    pub last_evaluated_key: Item,

    /// The capacity units consumed by this page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

impl QueryOutput {
    /// Returns `true` if the store handed back a resume cursor.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.last_evaluated_key.is_empty()
    }
}
