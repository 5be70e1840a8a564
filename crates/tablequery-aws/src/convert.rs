//! Conversions between TableQuery model types and `aws-sdk-dynamodb` types.

use std::collections::HashMap;

use aws_sdk_dynamodb::operation::query::QueryOutput as SdkQueryOutput;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types as sdk;
use bytes::Bytes;
use tablequery_model::types::{Capacity, ConsumedCapacity, ReturnConsumedCapacity, Select};
use tablequery_model::{
    AttributeValue, DynamoDBError, Item, QueryInput, QueryOutput, dynamodb_error,
};

/// Convert a model attribute value into the SDK's representation.
#[must_use]
pub fn to_sdk_value(value: AttributeValue) -> sdk::AttributeValue {
    match value {
        AttributeValue::B(b) => sdk::AttributeValue::B(Blob::new(b.to_vec())),
        AttributeValue::Bool(b) => sdk::AttributeValue::Bool(b),
        AttributeValue::Bs(set) => {
            sdk::AttributeValue::Bs(set.into_iter().map(|b| Blob::new(b.to_vec())).collect())
        }
        AttributeValue::L(items) => {
            sdk::AttributeValue::L(items.into_iter().map(to_sdk_value).collect())
        }
        AttributeValue::M(map) => sdk::AttributeValue::M(to_sdk_item(map)),
        AttributeValue::N(n) => sdk::AttributeValue::N(n),
        AttributeValue::Ns(set) => sdk::AttributeValue::Ns(set),
        AttributeValue::Null(b) => sdk::AttributeValue::Null(b),
        AttributeValue::S(s) => sdk::AttributeValue::S(s),
        AttributeValue::Ss(set) => sdk::AttributeValue::Ss(set),
    }
}

/// Convert a whole item (or key) into the SDK's representation.
#[must_use]
pub fn to_sdk_item(item: Item) -> HashMap<String, sdk::AttributeValue> {
    item.into_iter().map(|(k, v)| (k, to_sdk_value(v))).collect()
}

/// Convert an SDK attribute value back into the model.
///
/// Fails on variants this SDK version does not know how to name.
pub fn from_sdk_value(value: &sdk::AttributeValue) -> Result<AttributeValue, DynamoDBError> {
    let converted = match value {
        sdk::AttributeValue::B(b) => AttributeValue::B(Bytes::copy_from_slice(b.as_ref())),
        sdk::AttributeValue::Bool(b) => AttributeValue::Bool(*b),
        sdk::AttributeValue::Bs(set) => AttributeValue::Bs(
            set.iter()
                .map(|b| Bytes::copy_from_slice(b.as_ref()))
                .collect(),
        ),
        sdk::AttributeValue::L(items) => AttributeValue::L(
            items
                .iter()
                .map(from_sdk_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        sdk::AttributeValue::M(map) => AttributeValue::M(from_sdk_item(map)?),
        sdk::AttributeValue::N(n) => AttributeValue::N(n.clone()),
        sdk::AttributeValue::Ns(set) => AttributeValue::Ns(set.clone()),
        sdk::AttributeValue::Null(b) => AttributeValue::Null(*b),
        sdk::AttributeValue::S(s) => AttributeValue::S(s.clone()),
        sdk::AttributeValue::Ss(set) => AttributeValue::Ss(set.clone()),
        _ => {
            return Err(dynamodb_error!(
                InternalServerError,
                "response contained an attribute value of unknown type"
            ));
        }
    };
    Ok(converted)
}

/// Convert an SDK item (or key) back into the model.
pub fn from_sdk_item(item: &HashMap<String, sdk::AttributeValue>) -> Result<Item, DynamoDBError> {
    item.iter()
        .map(|(k, v)| Ok::<_, DynamoDBError>((k.clone(), from_sdk_value(v)?)))
        .collect()
}

fn to_sdk_select(select: Select) -> sdk::Select {
    match select {
        Select::AllAttributes => sdk::Select::AllAttributes,
        Select::AllProjectedAttributes => sdk::Select::AllProjectedAttributes,
        Select::SpecificAttributes => sdk::Select::SpecificAttributes,
        Select::Count => sdk::Select::Count,
    }
}

fn to_sdk_return_consumed_capacity(rcc: ReturnConsumedCapacity) -> sdk::ReturnConsumedCapacity {
    match rcc {
        ReturnConsumedCapacity::Indexes => sdk::ReturnConsumedCapacity::Indexes,
        ReturnConsumedCapacity::Total => sdk::ReturnConsumedCapacity::Total,
        ReturnConsumedCapacity::None => sdk::ReturnConsumedCapacity::None,
    }
}

fn non_empty<K, V>(map: HashMap<K, V>) -> Option<HashMap<K, V>> {
    (!map.is_empty()).then_some(map)
}

/// Copy a model request onto an SDK `Query` builder.
///
/// Unset fields and empty maps stay unset, so the SDK omits them from the
/// request body.
#[must_use]
pub fn apply_input(builder: QueryFluentBuilder, input: QueryInput) -> QueryFluentBuilder {
    builder
        .table_name(input.table_name)
        .set_index_name(input.index_name)
        .set_key_condition_expression(input.key_condition_expression)
        .set_filter_expression(input.filter_expression)
        .set_projection_expression(input.projection_expression)
        .set_expression_attribute_names(non_empty(input.expression_attribute_names))
        .set_expression_attribute_values(
            non_empty(input.expression_attribute_values).map(to_sdk_item),
        )
        .set_scan_index_forward(input.scan_index_forward)
        .set_limit(input.limit)
        .set_exclusive_start_key(non_empty(input.exclusive_start_key).map(to_sdk_item))
        .set_select(input.select.map(to_sdk_select))
        .set_consistent_read(input.consistent_read)
        .set_return_consumed_capacity(
            input
                .return_consumed_capacity
                .map(to_sdk_return_consumed_capacity),
        )
}

fn from_sdk_capacity(capacity: &sdk::Capacity) -> Capacity {
    Capacity {
        read_capacity_units: capacity.read_capacity_units(),
        write_capacity_units: capacity.write_capacity_units(),
        capacity_units: capacity.capacity_units(),
    }
}

fn from_sdk_index_capacity(
    indexes: Option<&HashMap<String, sdk::Capacity>>,
) -> HashMap<String, Capacity> {
    indexes
        .into_iter()
        .flatten()
        .map(|(name, capacity)| (name.clone(), from_sdk_capacity(capacity)))
        .collect()
}

/// Convert an SDK capacity report into the model.
#[must_use]
pub fn from_sdk_consumed_capacity(capacity: &sdk::ConsumedCapacity) -> ConsumedCapacity {
    ConsumedCapacity {
        table_name: capacity.table_name().map(ToOwned::to_owned),
        capacity_units: capacity.capacity_units(),
        read_capacity_units: capacity.read_capacity_units(),
        write_capacity_units: capacity.write_capacity_units(),
        table: capacity.table().map(from_sdk_capacity),
        local_secondary_indexes: from_sdk_index_capacity(capacity.local_secondary_indexes()),
        global_secondary_indexes: from_sdk_index_capacity(capacity.global_secondary_indexes()),
    }
}

/// Convert one SDK `Query` page into the model.
pub fn from_sdk_output(output: &SdkQueryOutput) -> Result<QueryOutput, DynamoDBError> {
    Ok(QueryOutput {
        items: output
            .items()
            .iter()
            .map(from_sdk_item)
            .collect::<Result<Vec<_>, _>>()?,
        count: output.count(),
        scanned_count: output.scanned_count(),
        last_evaluated_key: output
            .last_evaluated_key()
            .map(from_sdk_item)
            .transpose()?
            .unwrap_or_default(),
        consumed_capacity: output.consumed_capacity().map(from_sdk_consumed_capacity),
    })
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::config::{BehaviorVersion, Region};

    use super::*;

    fn sdk_client() -> aws_sdk_dynamodb::Client {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        aws_sdk_dynamodb::Client::from_conf(config)
    }

    fn sample_value() -> AttributeValue {
        AttributeValue::M(HashMap::from([
            ("name".to_owned(), AttributeValue::S("ada".to_owned())),
            ("age".to_owned(), AttributeValue::N("36".to_owned())),
            ("blob".to_owned(), AttributeValue::B(Bytes::from_static(b"\x00\x01"))),
            (
                "tags".to_owned(),
                AttributeValue::L(vec![
                    AttributeValue::Bool(true),
                    AttributeValue::Null(true),
                    AttributeValue::Ss(vec!["a".to_owned()]),
                    AttributeValue::Ns(vec!["1".to_owned()]),
                    AttributeValue::Bs(vec![Bytes::from_static(b"x")]),
                ]),
            ),
        ]))
    }

    #[test]
    fn test_should_preserve_nested_values_through_sdk_types() {
        let sdk_value = to_sdk_value(sample_value());
        let sdk::AttributeValue::M(map) = &sdk_value else {
            panic!("expected map, got {sdk_value:?}");
        };
        assert_eq!(map["blob"], sdk::AttributeValue::B(Blob::new(vec![0, 1])));

        assert_eq!(from_sdk_value(&sdk_value).unwrap(), sample_value());
    }

    #[test]
    fn test_should_leave_unset_fields_unset_on_builder() {
        let input = QueryInput {
            table_name: "orders".to_owned(),
            key_condition_expression: Some("pk = :pk".to_owned()),
            expression_attribute_values: HashMap::from([(
                ":pk".to_owned(),
                AttributeValue::S("a".to_owned()),
            )]),
            ..QueryInput::default()
        };

        let builder = apply_input(sdk_client().query(), input);
        let request = builder.as_input();

        assert_eq!(request.get_table_name().as_deref(), Some("orders"));
        assert_eq!(
            request.get_key_condition_expression().as_deref(),
            Some("pk = :pk")
        );
        assert_eq!(
            request.get_expression_attribute_values().as_ref().unwrap()[":pk"],
            sdk::AttributeValue::S("a".to_owned())
        );
        assert!(request.get_index_name().is_none());
        assert!(request.get_expression_attribute_names().is_none());
        assert!(request.get_exclusive_start_key().is_none());
        assert!(request.get_limit().is_none());
        assert!(request.get_select().is_none());
        assert!(request.get_return_consumed_capacity().is_none());
    }

    #[test]
    fn test_should_copy_cursor_and_options_onto_builder() {
        let input = QueryInput {
            table_name: "orders".to_owned(),
            index_name: Some("by-date".to_owned()),
            limit: Some(10),
            select: Some(Select::Count),
            scan_index_forward: Some(false),
            return_consumed_capacity: Some(ReturnConsumedCapacity::Indexes),
            exclusive_start_key: HashMap::from([(
                "pk".to_owned(),
                AttributeValue::S("a".to_owned()),
            )]),
            ..QueryInput::default()
        };

        let builder = apply_input(sdk_client().query(), input);
        let request = builder.as_input();

        assert_eq!(request.get_index_name().as_deref(), Some("by-date"));
        assert_eq!(*request.get_limit(), Some(10));
        assert_eq!(request.get_select().as_ref(), Some(&sdk::Select::Count));
        assert_eq!(*request.get_scan_index_forward(), Some(false));
        assert_eq!(
            request.get_return_consumed_capacity().as_ref(),
            Some(&sdk::ReturnConsumedCapacity::Indexes)
        );
        assert!(request.get_exclusive_start_key().as_ref().unwrap().contains_key("pk"));
    }

    #[test]
    fn test_should_convert_sdk_page() {
        let output = SdkQueryOutput::builder()
            .items(HashMap::from([(
                "pk".to_owned(),
                sdk::AttributeValue::S("a".to_owned()),
            )]))
            .count(1)
            .scanned_count(4)
            .last_evaluated_key("pk", sdk::AttributeValue::S("a".to_owned()))
            .consumed_capacity(
                sdk::ConsumedCapacity::builder()
                    .table_name("orders")
                    .capacity_units(0.5)
                    .global_secondary_indexes(
                        "by-date",
                        sdk::Capacity::builder().capacity_units(0.5).build(),
                    )
                    .build(),
            )
            .build();

        let page = from_sdk_output(&output).unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.count, 1);
        assert_eq!(page.scanned_count, 4);
        assert!(page.has_more());
        let capacity = page.consumed_capacity.unwrap();
        assert_eq!(capacity.table_name.as_deref(), Some("orders"));
        assert_eq!(capacity.global_secondary_indexes["by-date"].capacity_units, Some(0.5));
    }

    #[test]
    fn test_should_treat_missing_cursor_as_last_page() {
        let output = SdkQueryOutput::builder().count(0).scanned_count(0).build();
        let page = from_sdk_output(&output).unwrap();
        assert!(!page.has_more());
        assert!(page.items.is_empty());
        assert!(page.consumed_capacity.is_none());
    }
}
