//! Caller-facing query parameters.

use std::collections::BTreeMap;
use std::num::{NonZeroU32, NonZeroUsize};

use tablequery_model::Item;
use tablequery_model::types::{ReturnConsumedCapacity, Select};
use typed_builder::TypedBuilder;

/// Everything a host can ask of one query invocation.
///
/// Optional fields left as `None` (or empty maps) are omitted from the
/// request, so the store applies its own defaults.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use tablequery_core::QueryParameters;
///
/// let params = QueryParameters::builder()
///     .table_name("orders")
///     .key_condition_expression("customer = :c")
///     .expression_attribute_values([(":c".to_owned(), r#"{"S":"ada"}"#.to_owned())].into())
///     .output_limit(NonZeroUsize::new(10).unwrap())
///     .build();
///
/// assert_eq!(params.output_limit.map(NonZeroUsize::get), Some(10));
/// assert!(params.limit.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct QueryParameters {
    /// Table to query.
    #[builder(setter(into))]
    pub table_name: String,

    /// Key condition, with `#name` / `:value` placeholders.
    #[builder(setter(into))]
    pub key_condition_expression: String,

    /// Filter applied after the key condition.
    #[builder(default, setter(strip_option, into))]
    pub filter_expression: Option<String>,

    /// Secondary index to query instead of the base table.
    #[builder(default, setter(strip_option, into))]
    pub index_name: Option<String>,

    /// `#name` placeholder substitutions.
    #[builder(default)]
    pub expression_attribute_names: BTreeMap<String, String>,

    /// `:value` placeholder substitutions, as attribute value JSON documents.
    #[builder(default)]
    pub expression_attribute_values: BTreeMap<String, String>,

    /// Attributes to return.
    #[builder(default, setter(strip_option, into))]
    pub projection_expression: Option<String>,

    /// Request a strongly consistent read.
    #[builder(default, setter(strip_option))]
    pub consistent_read: Option<bool>,

    /// `false` walks the sort key in descending order.
    #[builder(default, setter(strip_option))]
    pub scan_index_forward: Option<bool>,

    /// Result shape.
    #[builder(default, setter(strip_option))]
    pub select: Option<Select>,

    /// Page-size hint passed to the store as `Limit`.
    #[builder(default, setter(strip_option))]
    pub limit: Option<NonZeroU32>,

    /// Cap on the number of items returned across all pages. `None` is unlimited.
    #[builder(default, setter(strip_option))]
    pub output_limit: Option<NonZeroUsize>,

    /// Cursor to resume from, as returned in a previous result.
    #[builder(default)]
    pub exclusive_start_key: Item,

    /// Capacity report verbosity.
    #[builder(default, setter(strip_option))]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,
}
