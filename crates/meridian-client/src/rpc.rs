//! Unary gRPC dispatch.
//!
//! Every control-plane RPC in this SDK is unary, so one generic helper
//! replaces per-service generated stubs: prost codec, static method path,
//! bearer metadata, per-call deadline.

use std::time::Duration;

use http::uri::PathAndQuery;
use tonic::codec::ProstCodec;
use tonic::metadata::AsciiMetadataValue;
use tonic::transport::Channel;

use crate::error::ApiError;

/// Precomputed `authorization` header value.
#[derive(Clone)]
pub(crate) struct CallAuth {
    header: AsciiMetadataValue,
}

impl CallAuth {
    pub(crate) fn bearer(token: &str) -> Result<Self, ApiError> {
        let header = AsciiMetadataValue::try_from(format!("Bearer {token}"))
            .map_err(|e| ApiError::Config(format!("token is not header-safe: {e}")))?;
        Ok(Self { header })
    }
}

pub(crate) async fn unary<Req, Resp>(
    channel: &Channel,
    path: &'static str,
    auth: &CallAuth,
    timeout: Duration,
    message: Req,
) -> Result<Resp, ApiError>
where
    Req: prost::Message + Send + Sync + 'static,
    Resp: prost::Message + Default + Send + Sync + 'static,
{
    let mut grpc = tonic::client::Grpc::new(channel.clone());
    grpc.ready().await.map_err(ApiError::Transport)?;

    let mut request = tonic::Request::new(message);
    request.set_timeout(timeout);
    request
        .metadata_mut()
        .insert("authorization", auth.header.clone());

    let codec: ProstCodec<Req, Resp> = ProstCodec::default();
    tracing::debug!(method = path, "dispatching rpc");
    match grpc
        .unary(request, PathAndQuery::from_static(path), codec)
        .await
    {
        Ok(response) => Ok(response.into_inner()),
        Err(status) => {
            tracing::debug!(method = path, code = ?status.code(), "rpc failed");
            Err(ApiError::from_status(path, status))
        }
    }
}
