//! IAM service: service accounts.

use std::collections::HashMap;

pub mod service_account_service {
    pub const CREATE: &str = "/meridian.iam.v1.ServiceAccountService/Create";
    pub const GET: &str = "/meridian.iam.v1.ServiceAccountService/Get";
    pub const UPDATE: &str = "/meridian.iam.v1.ServiceAccountService/Update";
    pub const DELETE: &str = "/meridian.iam.v1.ServiceAccountService/Delete";
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceAccount {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub folder_id: String,
    #[prost(message, optional, tag = "3")]
    pub created_at: Option<::prost_types::Timestamp>,
    #[prost(string, tag = "4")]
    pub name: String,
    #[prost(string, tag = "5")]
    pub description: String,
    #[prost(map = "string, string", tag = "6")]
    pub labels: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateServiceAccountRequest {
    #[prost(string, tag = "1")]
    pub folder_id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(map = "string, string", tag = "4")]
    pub labels: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateServiceAccountMetadata {
    #[prost(string, tag = "1")]
    pub service_account_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetServiceAccountRequest {
    #[prost(string, tag = "1")]
    pub service_account_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateServiceAccountRequest {
    #[prost(string, tag = "1")]
    pub service_account_id: String,
    #[prost(message, optional, tag = "2")]
    pub update_mask: Option<::prost_types::FieldMask>,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(string, tag = "4")]
    pub description: String,
    #[prost(map = "string, string", tag = "5")]
    pub labels: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteServiceAccountRequest {
    #[prost(string, tag = "1")]
    pub service_account_id: String,
}
