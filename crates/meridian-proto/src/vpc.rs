//! VPC service: networks and subnets.

use std::collections::HashMap;

pub mod network_service {
    pub const CREATE: &str = "/meridian.vpc.v1.NetworkService/Create";
    pub const GET: &str = "/meridian.vpc.v1.NetworkService/Get";
    pub const UPDATE: &str = "/meridian.vpc.v1.NetworkService/Update";
    pub const DELETE: &str = "/meridian.vpc.v1.NetworkService/Delete";
}

pub mod subnet_service {
    pub const CREATE: &str = "/meridian.vpc.v1.SubnetService/Create";
    pub const GET: &str = "/meridian.vpc.v1.SubnetService/Get";
    pub const UPDATE: &str = "/meridian.vpc.v1.SubnetService/Update";
    pub const DELETE: &str = "/meridian.vpc.v1.SubnetService/Delete";
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Network {
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
pub struct CreateNetworkRequest {
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
pub struct CreateNetworkMetadata {
    #[prost(string, tag = "1")]
    pub network_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetNetworkRequest {
    #[prost(string, tag = "1")]
    pub network_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateNetworkRequest {
    #[prost(string, tag = "1")]
    pub network_id: String,
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
pub struct DeleteNetworkRequest {
    #[prost(string, tag = "1")]
    pub network_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Subnet {
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
    #[prost(string, tag = "7")]
    pub network_id: String,
    #[prost(string, tag = "8")]
    pub zone_id: String,
    #[prost(string, repeated, tag = "9")]
    pub v4_cidr_blocks: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateSubnetRequest {
    #[prost(string, tag = "1")]
    pub folder_id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(map = "string, string", tag = "4")]
    pub labels: HashMap<String, String>,
    #[prost(string, tag = "5")]
    pub network_id: String,
    #[prost(string, tag = "6")]
    pub zone_id: String,
    #[prost(string, repeated, tag = "7")]
    pub v4_cidr_blocks: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateSubnetMetadata {
    #[prost(string, tag = "1")]
    pub subnet_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSubnetRequest {
    #[prost(string, tag = "1")]
    pub subnet_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateSubnetRequest {
    #[prost(string, tag = "1")]
    pub subnet_id: String,
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
pub struct DeleteSubnetRequest {
    #[prost(string, tag = "1")]
    pub subnet_id: String,
}
