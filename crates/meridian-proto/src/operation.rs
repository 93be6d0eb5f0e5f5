//! Long-running operations.
//!
//! Every mutating RPC answers with an [`Operation`]; completion is observed
//! by polling `OperationService/Get` until `done` is set, at which point the
//! result oneof holds either a service error or a packed response message.

pub mod operation_service {
    pub const GET: &str = "/meridian.operation.v1.OperationService/Get";
    pub const CANCEL: &str = "/meridian.operation.v1.OperationService/Cancel";
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Operation {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(string, tag = "3")]
    pub created_by: String,
    #[prost(message, optional, tag = "4")]
    pub created_at: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "5")]
    pub modified_at: Option<::prost_types::Timestamp>,
    #[prost(bool, tag = "6")]
    pub done: bool,
    /// Service-specific metadata, available before completion (e.g. the id
    /// of the resource being created).
    #[prost(message, optional, tag = "7")]
    pub metadata: Option<::prost_types::Any>,
    #[prost(oneof = "operation_result::Result", tags = "8, 9")]
    pub result: Option<operation_result::Result>,
}

pub mod operation_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "8")]
        Error(super::RpcStatus),
        #[prost(message, tag = "9")]
        Response(::prost_types::Any),
    }
}

/// `google.rpc.Status` as carried inside a failed operation.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcStatus {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, repeated, tag = "3")]
    pub details: Vec<::prost_types::Any>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperationRequest {
    #[prost(string, tag = "1")]
    pub operation_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CancelOperationRequest {
    #[prost(string, tag = "1")]
    pub operation_id: String,
}
