//! Mapping SDK failures onto [`DynamoDBError`].

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use tablequery_model::{DynamoDBError, DynamoDBErrorCode};

/// Convert a failed SDK call into a [`DynamoDBError`].
///
/// Service errors keep the code and message DynamoDB returned; failures that
/// never got a response (dispatch, timeout) become `TransportError`.
pub fn from_sdk_error<E>(err: SdkError<E, HttpResponse>) -> DynamoDBError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let status = err
        .raw_response()
        .and_then(|response| http::StatusCode::from_u16(response.status().as_u16()).ok());
    let transport = matches!(
        err,
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)
    );

    let mut error = classify(
        err.code(),
        err.message(),
        transport,
        || DisplayErrorContext(&err).to_string(),
    );
    if let Some(status) = status {
        error = error.with_status(status);
    }
    error.with_source(err)
}

fn classify(
    code: Option<&str>,
    message: Option<&str>,
    transport: bool,
    detail: impl FnOnce() -> String,
) -> DynamoDBError {
    match code {
        Some(code) => DynamoDBError::with_message(
            DynamoDBErrorCode::from_code(code),
            message.map_or_else(detail, ToOwned::to_owned),
        ),
        None if transport => DynamoDBError::transport(detail()),
        None => DynamoDBError::with_message(DynamoDBErrorCode::InternalServerError, detail()),
    }
}
