//! The data source argument document.

use std::collections::BTreeMap;
use std::num::{NonZeroU32, NonZeroUsize};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tablequery_core::QueryParameters;
use tablequery_model::Item;
use tablequery_model::types::{ReturnConsumedCapacity, Select};

/// Arguments as the host writes them. Empty strings and zero limits mean
/// "not set".
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataSourceArgs {
    pub table_name: String,
    pub key_condition_expression: String,
    pub consistent_read: Option<bool>,
    pub expression_attribute_names: BTreeMap<String, String>,
    /// Placeholder to attribute value JSON text, e.g. `{"S":"ada"}`.
    pub expression_attribute_values: BTreeMap<String, String>,
    pub filter_expression: String,
    pub index_name: String,
    pub output_limit: usize,
    pub projection_expression: String,
    pub scan_index_forward: Option<bool>,
    pub select: String,
    pub limit: u32,
    pub exclusive_start_key: Item,
    pub return_consumed_capacity: String,
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

impl DataSourceArgs {
    /// Validate the arguments and turn them into executor parameters.
    pub fn into_parameters(self) -> Result<QueryParameters> {
        if self.table_name.is_empty() {
            bail!("table_name is required");
        }
        if self.key_condition_expression.is_empty() {
            bail!("key_condition_expression is required");
        }

        let select = non_empty(self.select)
            .map(|s| s.parse::<Select>())
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("invalid select")?;
        let return_consumed_capacity = non_empty(self.return_consumed_capacity)
            .map(|s| s.parse::<ReturnConsumedCapacity>())
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("invalid return_consumed_capacity")?;

        let mut params = QueryParameters::builder()
            .table_name(self.table_name)
            .key_condition_expression(self.key_condition_expression)
            .expression_attribute_names(self.expression_attribute_names)
            .expression_attribute_values(self.expression_attribute_values)
            .exclusive_start_key(self.exclusive_start_key)
            .build();
        params.filter_expression = non_empty(self.filter_expression);
        params.index_name = non_empty(self.index_name);
        params.projection_expression = non_empty(self.projection_expression);
        params.consistent_read = self.consistent_read;
        params.scan_index_forward = self.scan_index_forward;
        params.select = select;
        params.limit = NonZeroU32::new(self.limit);
        params.output_limit = NonZeroUsize::new(self.output_limit);
        params.return_consumed_capacity = return_consumed_capacity;

        Ok(params)
    }
}
