//! Compute service: virtual machine instances.

use std::collections::HashMap;

pub mod instance_service {
    pub const CREATE: &str = "/meridian.compute.v1.InstanceService/Create";
    pub const GET: &str = "/meridian.compute.v1.InstanceService/Get";
    pub const UPDATE: &str = "/meridian.compute.v1.InstanceService/Update";
    pub const DELETE: &str = "/meridian.compute.v1.InstanceService/Delete";
    pub const LIST: &str = "/meridian.compute.v1.InstanceService/List";
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Instance {
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
    pub zone_id: String,
    #[prost(string, tag = "8")]
    pub platform_id: String,
    #[prost(message, optional, tag = "9")]
    pub resources: Option<Resources>,
    #[prost(enumeration = "InstanceStatus", tag = "10")]
    pub status: i32,
    #[prost(message, optional, tag = "11")]
    pub boot_disk: Option<AttachedDisk>,
    #[prost(message, repeated, tag = "12")]
    pub network_interfaces: Vec<NetworkInterface>,
    #[prost(string, tag = "13")]
    pub fqdn: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum InstanceStatus {
    Unspecified = 0,
    Provisioning = 1,
    Running = 2,
    Stopping = 3,
    Stopped = 4,
    Starting = 5,
    Restarting = 6,
    Updating = 7,
    Error = 8,
    Deleting = 9,
}

impl InstanceStatus {
    pub fn as_str_name(self) -> &'static str {
        match self {
            Self::Unspecified => "STATUS_UNSPECIFIED",
            Self::Provisioning => "PROVISIONING",
            Self::Running => "RUNNING",
            Self::Stopping => "STOPPING",
            Self::Stopped => "STOPPED",
            Self::Starting => "STARTING",
            Self::Restarting => "RESTARTING",
            Self::Updating => "UPDATING",
            Self::Error => "ERROR",
            Self::Deleting => "DELETING",
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Resources {
    #[prost(int64, tag = "1")]
    pub memory: i64,
    #[prost(int64, tag = "2")]
    pub cores: i64,
    #[prost(int64, tag = "3")]
    pub core_fraction: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AttachedDisk {
    #[prost(string, tag = "1")]
    pub disk_id: String,
    #[prost(bool, tag = "2")]
    pub auto_delete: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NetworkInterface {
    #[prost(string, tag = "1")]
    pub index: String,
    #[prost(string, tag = "2")]
    pub subnet_id: String,
    #[prost(string, tag = "3")]
    pub ip_address: String,
    #[prost(bool, tag = "4")]
    pub nat: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateInstanceRequest {
    #[prost(string, tag = "1")]
    pub folder_id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(map = "string, string", tag = "4")]
    pub labels: HashMap<String, String>,
    #[prost(string, tag = "5")]
    pub zone_id: String,
    #[prost(string, tag = "6")]
    pub platform_id: String,
    #[prost(message, optional, tag = "7")]
    pub resources_spec: Option<Resources>,
    #[prost(message, optional, tag = "8")]
    pub boot_disk_spec: Option<AttachedDiskSpec>,
    #[prost(message, repeated, tag = "9")]
    pub network_interface_specs: Vec<NetworkInterfaceSpec>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AttachedDiskSpec {
    #[prost(bool, tag = "1")]
    pub auto_delete: bool,
    #[prost(string, tag = "2")]
    pub image_id: String,
    #[prost(int64, tag = "3")]
    pub size: i64,
    #[prost(string, tag = "4")]
    pub type_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NetworkInterfaceSpec {
    #[prost(string, tag = "1")]
    pub subnet_id: String,
    #[prost(bool, tag = "2")]
    pub nat: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateInstanceMetadata {
    #[prost(string, tag = "1")]
    pub instance_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetInstanceRequest {
    #[prost(string, tag = "1")]
    pub instance_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateInstanceRequest {
    #[prost(string, tag = "1")]
    pub instance_id: String,
    #[prost(message, optional, tag = "2")]
    pub update_mask: Option<::prost_types::FieldMask>,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(string, tag = "4")]
    pub description: String,
    #[prost(map = "string, string", tag = "5")]
    pub labels: HashMap<String, String>,
    #[prost(message, optional, tag = "6")]
    pub resources_spec: Option<Resources>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateInstanceMetadata {
    #[prost(string, tag = "1")]
    pub instance_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteInstanceRequest {
    #[prost(string, tag = "1")]
    pub instance_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteInstanceMetadata {
    #[prost(string, tag = "1")]
    pub instance_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListInstancesRequest {
    #[prost(string, tag = "1")]
    pub folder_id: String,
    #[prost(int64, tag = "2")]
    pub page_size: i64,
    #[prost(string, tag = "3")]
    pub page_token: String,
    #[prost(string, tag = "4")]
    pub filter: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListInstancesResponse {
    #[prost(message, repeated, tag = "1")]
    pub instances: Vec<Instance>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}
