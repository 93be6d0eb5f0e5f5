use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the transport and operation layers.
///
/// `Status` keeps the server-assigned request id from the response metadata;
/// support tickets are useless without it, and the gRPC `Display` alone
/// rarely says which call failed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("{method} failed: {code:?}: {message} (request id {})", .request_id.as_deref().unwrap_or("unknown"))]
    Status {
        method: &'static str,
        code: tonic::Code,
        message: String,
        request_id: Option<String>,
    },

    #[error("operation {id} failed: code {code}: {message}")]
    OperationFailed { id: String, code: i32, message: String },

    #[error("operation {id} did not reach a terminal state within {timeout:?}")]
    OperationTimedOut { id: String, timeout: Duration },

    #[error("operation {id} finished without a response payload")]
    MissingResponse { id: String },

    #[error("failed to decode response payload: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Metadata key the control plane stamps on every response.
pub const REQUEST_ID_KEY: &str = "x-request-id";

impl ApiError {
    pub(crate) fn from_status(method: &'static str, status: tonic::Status) -> Self {
        let request_id = status
            .metadata()
            .get(REQUEST_ID_KEY)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Self::Status {
            method,
            code: status.code(),
            message: status.message().to_owned(),
            request_id,
        }
    }

    /// Whether the error means the addressed resource does not exist.
    /// Handlers translate this into "clear the resource from state".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Status {
                code: tonic::Code::NotFound,
                ..
            }
        )
    }
}
