//! TableQuery - run a paginated DynamoDB Query as a data source.
//!
//! Reads the data source arguments as a JSON object from `ARGS_FILE` (or
//! stdin when omitted), runs the query to completion, and prints the result
//! attributes as one JSON object on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! tablequery args.json
//! echo '{"table_name":"orders","key_condition_expression":"pk = :pk", ...}' | tablequery
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AWS_REGION` / `DEFAULT_REGION` | `us-east-1` | Region of the table |
//! | `TABLEQUERY_ENDPOINT_URL` | *(unset)* | Alternate DynamoDB endpoint |
//! | `TABLEQUERY_MAX_ATTEMPTS` | `3` | SDK attempts per page fetch |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod args;
mod render;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tablequery_aws::SdkQueryClient;
use tablequery_core::id::data_source_id;
use tablequery_core::{QueryExecutor, TableQueryConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::args::DataSourceArgs;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Read the argument document from a file, or stdin when no path is given.
async fn read_args(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("failed to read arguments from stdin")?;
            Ok(raw)
        }
    }
}

/// Cancel `token` on Ctrl-C.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("received interrupt, cancelling query");
            token.cancel();
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = TableQueryConfig::from_env().context("invalid configuration")?;
    init_tracing(&config.log_level)?;

    let path = std::env::args().nth(1);
    let raw = read_args(path.as_deref().map(Path::new)).await?;
    let args: DataSourceArgs =
        serde_json::from_str(&raw).context("invalid data source arguments")?;
    let params = args.into_parameters()?;

    let id = data_source_id(
        &params.table_name,
        &params.key_condition_expression,
        params.index_name.as_deref(),
        Utc::now(),
    );
    info!(%id, region = %config.default_region, "running query");

    let executor = QueryExecutor::new(SdkQueryClient::from_config(&config).await);
    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    let result = executor
        .execute(&params, &cancel)
        .await
        .with_context(|| format!("query {id} failed"))?;

    let mut out = render::render(&id, &result)?;
    out.push('\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(out.as_bytes()).await?;
    stdout.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_report_missing_args_file() {
        let err = tokio_test::block_on(read_args(Some(Path::new(
            "/nonexistent/tablequery/args.json",
        ))))
        .unwrap_err();
        assert!(err.to_string().starts_with("failed to read /nonexistent/"));
    }
}
