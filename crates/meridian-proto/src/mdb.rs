//! Managed database service: PostgreSQL clusters.
//!
//! `PostgresConfig` is the settings surface users drive through the
//! provider's loosely-typed `settings` map; its field table keys each entry
//! by protobuf wire name so handlers never touch the fields directly.

use std::collections::HashMap;

use crate::wrappers::{BoolValue, DoubleValue, Int64Value};

pub mod cluster_service {
    pub const CREATE: &str = "/meridian.mdb.postgresql.v1.ClusterService/Create";
    pub const GET: &str = "/meridian.mdb.postgresql.v1.ClusterService/Get";
    pub const UPDATE: &str = "/meridian.mdb.postgresql.v1.ClusterService/Update";
    pub const DELETE: &str = "/meridian.mdb.postgresql.v1.ClusterService/Delete";
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Cluster {
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
    #[prost(enumeration = "Environment", tag = "7")]
    pub environment: i32,
    #[prost(string, tag = "8")]
    pub network_id: String,
    #[prost(enumeration = "ClusterStatus", tag = "9")]
    pub status: i32,
    #[prost(message, optional, tag = "10")]
    pub config: Option<ClusterConfig>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Environment {
    Unspecified = 0,
    Production = 1,
    Prestable = 2,
}

impl Environment {
    pub fn as_str_name(self) -> &'static str {
        match self {
            Self::Unspecified => "ENVIRONMENT_UNSPECIFIED",
            Self::Production => "PRODUCTION",
            Self::Prestable => "PRESTABLE",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "ENVIRONMENT_UNSPECIFIED" => Some(Self::Unspecified),
            "PRODUCTION" => Some(Self::Production),
            "PRESTABLE" => Some(Self::Prestable),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ClusterStatus {
    Unspecified = 0,
    Creating = 1,
    Running = 2,
    Error = 3,
    Updating = 4,
    Stopping = 5,
    Stopped = 6,
    Starting = 7,
}

impl ClusterStatus {
    pub fn as_str_name(self) -> &'static str {
        match self {
            Self::Unspecified => "STATUS_UNKNOWN",
            Self::Creating => "CREATING",
            Self::Running => "RUNNING",
            Self::Error => "ERROR",
            Self::Updating => "UPDATING",
            Self::Stopping => "STOPPING",
            Self::Stopped => "STOPPED",
            Self::Starting => "STARTING",
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClusterConfig {
    #[prost(string, tag = "1")]
    pub version: String,
    #[prost(message, optional, tag = "2")]
    pub resources: Option<Resources>,
    #[prost(message, optional, tag = "3")]
    pub postgres_config: Option<PostgresConfig>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Resources {
    #[prost(string, tag = "1")]
    pub resource_preset_id: String,
    #[prost(int64, tag = "2")]
    pub disk_size: i64,
    #[prost(string, tag = "3")]
    pub disk_type_id: String,
}

/// Server settings. Plain fields are always present on the wire; wrapper
/// fields left nil fall back to platform defaults server-side.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PostgresConfig {
    #[prost(enumeration = "TransactionIsolation", tag = "1")]
    pub default_transaction_isolation: i32,
    #[prost(message, optional, tag = "2")]
    pub lock_timeout: Option<Int64Value>,
    #[prost(message, optional, tag = "3")]
    pub temp_file_limit: Option<Int64Value>,
    #[prost(message, optional, tag = "4")]
    pub max_connections: Option<Int64Value>,
    #[prost(message, optional, tag = "5")]
    pub log_min_duration_statement: Option<Int64Value>,
    #[prost(message, optional, tag = "6")]
    pub enable_parallel_hash: Option<BoolValue>,
    #[prost(message, optional, tag = "7")]
    pub log_connections: Option<BoolValue>,
    #[prost(message, optional, tag = "8")]
    pub autovacuum_vacuum_scale_factor: Option<DoubleValue>,
    #[prost(message, optional, tag = "9")]
    pub checkpoint_completion_target: Option<DoubleValue>,
    #[prost(string, tag = "10")]
    pub search_path: String,
}

meridian_dynamic::field_table!(PostgresConfig {
    "name=default_transaction_isolation" => int32(default_transaction_isolation),
    "name=lock_timeout" => nullable_int64(lock_timeout),
    "name=temp_file_limit" => nullable_int64(temp_file_limit),
    "name=max_connections" => nullable_int64(max_connections),
    "name=log_min_duration_statement" => nullable_int64(log_min_duration_statement),
    "name=enable_parallel_hash" => nullable_bool(enable_parallel_hash),
    "name=log_connections" => nullable_bool(log_connections),
    "name=autovacuum_vacuum_scale_factor" => nullable_float(autovacuum_vacuum_scale_factor),
    "name=checkpoint_completion_target" => nullable_float(checkpoint_completion_target),
    "name=search_path" => string(search_path),
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TransactionIsolation {
    Unspecified = 0,
    ReadUncommitted = 1,
    ReadCommitted = 2,
    RepeatableRead = 3,
    Serializable = 4,
}

impl TransactionIsolation {
    pub fn as_str_name(self) -> &'static str {
        match self {
            Self::Unspecified => "TRANSACTION_ISOLATION_UNSPECIFIED",
            Self::ReadUncommitted => "TRANSACTION_ISOLATION_READ_UNCOMMITTED",
            Self::ReadCommitted => "TRANSACTION_ISOLATION_READ_COMMITTED",
            Self::RepeatableRead => "TRANSACTION_ISOLATION_REPEATABLE_READ",
            Self::Serializable => "TRANSACTION_ISOLATION_SERIALIZABLE",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "TRANSACTION_ISOLATION_UNSPECIFIED" => Some(Self::Unspecified),
            "TRANSACTION_ISOLATION_READ_UNCOMMITTED" => Some(Self::ReadUncommitted),
            "TRANSACTION_ISOLATION_READ_COMMITTED" => Some(Self::ReadCommitted),
            "TRANSACTION_ISOLATION_REPEATABLE_READ" => Some(Self::RepeatableRead),
            "TRANSACTION_ISOLATION_SERIALIZABLE" => Some(Self::Serializable),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateClusterRequest {
    #[prost(string, tag = "1")]
    pub folder_id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(map = "string, string", tag = "4")]
    pub labels: HashMap<String, String>,
    #[prost(enumeration = "Environment", tag = "5")]
    pub environment: i32,
    #[prost(string, tag = "6")]
    pub network_id: String,
    #[prost(message, optional, tag = "7")]
    pub config: Option<ClusterConfig>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateClusterMetadata {
    #[prost(string, tag = "1")]
    pub cluster_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetClusterRequest {
    #[prost(string, tag = "1")]
    pub cluster_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateClusterRequest {
    #[prost(string, tag = "1")]
    pub cluster_id: String,
    #[prost(message, optional, tag = "2")]
    pub update_mask: Option<::prost_types::FieldMask>,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(string, tag = "4")]
    pub description: String,
    #[prost(map = "string, string", tag = "5")]
    pub labels: HashMap<String, String>,
    #[prost(message, optional, tag = "6")]
    pub config: Option<ClusterConfig>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateClusterMetadata {
    #[prost(string, tag = "1")]
    pub cluster_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteClusterRequest {
    #[prost(string, tag = "1")]
    pub cluster_id: String,
}
