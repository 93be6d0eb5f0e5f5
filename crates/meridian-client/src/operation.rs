//! Long-running operation support.
//!
//! Mutating RPCs return an [`Operation`] token; [`wait`] polls
//! `OperationService/Get` with capped exponential backoff until the
//! operation reaches a terminal state or the caller's deadline passes.

use std::time::Duration;

use meridian_proto::operation::{operation_result, Operation};
use tokio::time::Instant;

use crate::api::OperationApi;
use crate::error::ApiError;

const POLL_START: Duration = Duration::from_secs(1);
const POLL_CAP: Duration = Duration::from_secs(10);

/// Poll until `op` is done. A done operation carrying a service error is
/// returned as [`ApiError::OperationFailed`]; exceeding `timeout` yields
/// [`ApiError::OperationTimedOut`] without cancelling the server-side task.
pub async fn wait(
    api: &dyn OperationApi,
    mut op: Operation,
    timeout: Duration,
) -> Result<Operation, ApiError> {
    let deadline = Instant::now() + timeout;
    let mut interval = POLL_START;

    loop {
        if op.done {
            return finished(op);
        }
        if Instant::now() >= deadline {
            tracing::warn!(operation_id = %op.id, ?timeout, "gave up waiting for operation");
            return Err(ApiError::OperationTimedOut {
                id: op.id,
                timeout,
            });
        }

        tokio::time::sleep(interval).await;
        interval = (interval * 2).min(POLL_CAP);
        op = api.get(&op.id).await?;
        tracing::debug!(operation_id = %op.id, done = op.done, "polled operation");
    }
}

fn finished(op: Operation) -> Result<Operation, ApiError> {
    if let Some(operation_result::Result::Error(status)) = &op.result {
        return Err(ApiError::OperationFailed {
            id: op.id.clone(),
            code: status.code,
            message: status.message.clone(),
        });
    }
    Ok(op)
}

/// Decode the packed response of a finished operation.
pub fn response<T>(op: &Operation) -> Result<T, ApiError>
where
    T: prost::Message + Default,
{
    match &op.result {
        Some(operation_result::Result::Response(any)) => {
            T::decode(any.value.as_slice()).map_err(ApiError::Decode)
        }
        Some(operation_result::Result::Error(status)) => Err(ApiError::OperationFailed {
            id: op.id.clone(),
            code: status.code,
            message: status.message.clone(),
        }),
        None => Err(ApiError::MissingResponse { id: op.id.clone() }),
    }
}

/// Decode the service metadata attached to an operation. Available before
/// completion; this is how create handlers learn the new resource id.
pub fn metadata<T>(op: &Operation) -> Result<T, ApiError>
where
    T: prost::Message + Default,
{
    match &op.metadata {
        Some(any) => T::decode(any.value.as_slice()).map_err(ApiError::Decode),
        None => Err(ApiError::MissingResponse { id: op.id.clone() }),
    }
}

/// Pack a message into an `Any`, for fakes and tests that fabricate
/// operations the way the server would.
pub fn pack<T>(type_url: &str, message: &T) -> prost_types::Any
where
    T: prost::Message,
{
    prost_types::Any {
        type_url: type_url.to_owned(),
        value: message.encode_to_vec(),
    }
}
