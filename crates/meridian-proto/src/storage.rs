//! Object storage service: buckets.
//!
//! Buckets are addressed by name, not by generated id.

pub mod bucket_service {
    pub const CREATE: &str = "/meridian.storage.v1.BucketService/Create";
    pub const GET: &str = "/meridian.storage.v1.BucketService/Get";
    pub const UPDATE: &str = "/meridian.storage.v1.BucketService/Update";
    pub const DELETE: &str = "/meridian.storage.v1.BucketService/Delete";
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Bucket {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub folder_id: String,
    #[prost(message, optional, tag = "3")]
    pub created_at: Option<::prost_types::Timestamp>,
    #[prost(string, tag = "4")]
    pub default_storage_class: String,
    /// Maximum bucket size in bytes; zero means unlimited.
    #[prost(int64, tag = "5")]
    pub max_size: i64,
    #[prost(enumeration = "Versioning", tag = "6")]
    pub versioning: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Versioning {
    Unspecified = 0,
    Disabled = 1,
    Enabled = 2,
    Suspended = 3,
}

impl Versioning {
    pub fn as_str_name(self) -> &'static str {
        match self {
            Self::Unspecified => "VERSIONING_UNSPECIFIED",
            Self::Disabled => "VERSIONING_DISABLED",
            Self::Enabled => "VERSIONING_ENABLED",
            Self::Suspended => "VERSIONING_SUSPENDED",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "VERSIONING_UNSPECIFIED" => Some(Self::Unspecified),
            "VERSIONING_DISABLED" => Some(Self::Disabled),
            "VERSIONING_ENABLED" => Some(Self::Enabled),
            "VERSIONING_SUSPENDED" => Some(Self::Suspended),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateBucketRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub folder_id: String,
    #[prost(string, tag = "3")]
    pub default_storage_class: String,
    #[prost(int64, tag = "4")]
    pub max_size: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateBucketMetadata {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetBucketRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateBucketRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub update_mask: Option<::prost_types::FieldMask>,
    #[prost(string, tag = "3")]
    pub default_storage_class: String,
    #[prost(int64, tag = "4")]
    pub max_size: i64,
    #[prost(enumeration = "Versioning", tag = "5")]
    pub versioning: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteBucketRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}
