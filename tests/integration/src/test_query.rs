//! Paginated query tests against a running server.

#[cfg(test)]
mod tests {
    use std::num::{NonZeroU32, NonZeroUsize};

    use aws_sdk_dynamodb::types::{
        AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
        ScalarAttributeType,
    };
    use serde_json::Value;
    use tablequery_aws::SdkQueryClient;
    use tablequery_core::{QueryError, QueryExecutor, QueryParameters, QueryResult};
    use tablequery_model::DynamoDBErrorCode;
    use tablequery_model::types::Select;
    use tokio_util::sync::CancellationToken;

    use crate::{dynamodb_client, query_client, test_table_name};

    const ITEMS: u32 = 10;

    /// Helper: create a `pk` (S) + `sk` (N) table holding `ITEMS` rows under `pk = "p"`.
    async fn create_seeded_table(client: &aws_sdk_dynamodb::Client, table_name: &str) {
        client
            .create_table()
            .table_name(table_name)
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("pk")
                    .key_type(KeyType::Hash)
                    .build()
                    .unwrap(),
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("sk")
                    .key_type(KeyType::Range)
                    .build()
                    .unwrap(),
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("pk")
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .unwrap(),
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("sk")
                    .attribute_type(ScalarAttributeType::N)
                    .build()
                    .unwrap(),
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .unwrap_or_else(|e| panic!("failed to create table {table_name}: {e}"));

        for sk in 1..=ITEMS {
            let status = if sk % 2 == 0 { "even" } else { "odd" };
            client
                .put_item()
                .table_name(table_name)
                .item("pk", AttributeValue::S("p".to_owned()))
                .item("sk", AttributeValue::N(sk.to_string()))
                .item("status", AttributeValue::S(status.to_owned()))
                .send()
                .await
                .unwrap();
        }
    }

    async fn delete_table(client: &aws_sdk_dynamodb::Client, table_name: &str) {
        let _ = client.delete_table().table_name(table_name).send().await;
    }

    fn params(table_name: &str) -> QueryParameters {
        QueryParameters::builder()
            .table_name(table_name)
            .key_condition_expression("pk = :pk")
            .expression_attribute_values([(":pk".to_owned(), r#"{"S":"p"}"#.to_owned())].into())
            .build()
    }

    async fn run(params: &QueryParameters) -> Result<QueryResult, QueryError> {
        QueryExecutor::new(query_client())
            .execute(params, &CancellationToken::new())
            .await
    }

    fn sort_key(flattened: &str) -> String {
        let item: Value = serde_json::from_str(flattened).unwrap();
        item["sk"]["N"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_follow_pages_to_the_end() {
        let client = dynamodb_client();
        let table_name = test_table_name("pages");
        create_seeded_table(&client, &table_name).await;

        let result = run(&QueryParameters {
            limit: NonZeroU32::new(3),
            ..params(&table_name)
        })
        .await
        .unwrap();

        assert_eq!(result.items.len(), 10);
        assert_eq!(result.item_count, 10);
        assert_eq!(result.scanned_count, 10);
        assert!(result.query_count >= 4);
        assert!(result.last_evaluated_key.is_none());
        assert!(!result.truncated);
        assert_eq!(sort_key(&result.items[0]), "1");

        delete_table(&client, &table_name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_stop_at_output_cap() {
        let client = dynamodb_client();
        let table_name = test_table_name("cap");
        create_seeded_table(&client, &table_name).await;

        let result = run(&QueryParameters {
            limit: NonZeroU32::new(3),
            output_limit: NonZeroUsize::new(4),
            ..params(&table_name)
        })
        .await
        .unwrap();

        assert_eq!(result.items.len(), 4);
        assert_eq!(result.query_count, 2);
        assert!(result.truncated);
        let cursor = result.last_evaluated_key.expect("cursor after the fourth item");
        assert_eq!(
            cursor["sk"],
            tablequery_model::AttributeValue::N("4".to_owned())
        );

        let rest = run(&QueryParameters {
            exclusive_start_key: cursor,
            ..params(&table_name)
        })
        .await
        .unwrap();
        assert_eq!(rest.items.len(), 6);
        assert_eq!(sort_key(&rest.items[0]), "5");

        delete_table(&client, &table_name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_resume_from_returned_cursor() {
        let client = dynamodb_client();
        let table_name = test_table_name("resume");
        create_seeded_table(&client, &table_name).await;

        let first = run(&QueryParameters {
            limit: NonZeroU32::new(3),
            output_limit: NonZeroUsize::new(3),
            ..params(&table_name)
        })
        .await
        .unwrap();
        assert_eq!(first.items.len(), 3);
        let cursor = first.last_evaluated_key.expect("page boundary cursor");

        let rest = run(&QueryParameters {
            exclusive_start_key: cursor,
            ..params(&table_name)
        })
        .await
        .unwrap();

        assert_eq!(rest.items.len(), 7);
        assert_eq!(sort_key(&rest.items[0]), "4");

        delete_table(&client, &table_name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_count_without_items() {
        let client = dynamodb_client();
        let table_name = test_table_name("count");
        create_seeded_table(&client, &table_name).await;

        let result = run(&QueryParameters {
            select: Some(Select::Count),
            ..params(&table_name)
        })
        .await
        .unwrap();

        assert!(result.items.is_empty());
        assert_eq!(result.item_count, 10);

        delete_table(&client, &table_name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_apply_filter_and_reverse_order() {
        let client = dynamodb_client();
        let table_name = test_table_name("filter");
        create_seeded_table(&client, &table_name).await;

        let result = run(&QueryParameters {
            filter_expression: Some("#s = :s".to_owned()),
            expression_attribute_names: [("#s".to_owned(), "status".to_owned())].into(),
            expression_attribute_values: [
                (":pk".to_owned(), r#"{"S":"p"}"#.to_owned()),
                (":s".to_owned(), r#"{"S":"even"}"#.to_owned()),
            ]
            .into(),
            scan_index_forward: Some(false),
            projection_expression: Some("sk".to_owned()),
            ..params(&table_name)
        })
        .await
        .unwrap();

        assert_eq!(result.item_count, 5);
        assert_eq!(result.scanned_count, 10);
        assert_eq!(sort_key(&result.items[0]), "10");
        let first: Value = serde_json::from_str(&result.items[0]).unwrap();
        assert!(first.get("status").is_none());

        delete_table(&client, &table_name).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_surface_missing_table_as_store_error() {
        let result = run(&params(&test_table_name("missing"))).await;

        match result {
            Err(QueryError::Store(e)) => {
                assert_eq!(e.code, DynamoDBErrorCode::ResourceNotFoundException);
            }
            other => panic!("expected store error, got {other:?}"),
        }
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_build_client_from_config() {
        let client = dynamodb_client();
        let table_name = test_table_name("config");
        create_seeded_table(&client, &table_name).await;

        let config = tablequery_core::TableQueryConfig::builder()
            .endpoint_url(
                std::env::var("TABLEQUERY_ENDPOINT_URL")
                    .unwrap_or_else(|_| "http://localhost:4566".to_owned()),
            )
            .build();
        let executor = QueryExecutor::new(SdkQueryClient::from_config(&config).await);

        // Credentials come from the environment here; skip quietly without them.
        if std::env::var("AWS_ACCESS_KEY_ID").is_ok() {
            let result = executor
                .execute(&params(&table_name), &CancellationToken::new())
                .await
                .unwrap();
            assert_eq!(result.items.len(), 10);
        }

        delete_table(&client, &table_name).await;
    }
}
