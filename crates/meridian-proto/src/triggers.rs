//! Serverless triggers: timer- and storage-driven function invocation.

use std::collections::HashMap;

pub mod trigger_service {
    pub const CREATE: &str = "/meridian.serverless.v1.TriggerService/Create";
    pub const GET: &str = "/meridian.serverless.v1.TriggerService/Get";
    pub const UPDATE: &str = "/meridian.serverless.v1.TriggerService/Update";
    pub const DELETE: &str = "/meridian.serverless.v1.TriggerService/Delete";
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Trigger {
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
    /// Function invoked when the rule fires.
    #[prost(string, tag = "7")]
    pub function_id: String,
    #[prost(oneof = "trigger_rule::Rule", tags = "8, 9")]
    pub rule: Option<trigger_rule::Rule>,
}

pub mod trigger_rule {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Rule {
        #[prost(message, tag = "8")]
        Timer(super::TimerRule),
        #[prost(message, tag = "9")]
        ObjectStorage(super::ObjectStorageRule),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TimerRule {
    #[prost(string, tag = "1")]
    pub cron_expression: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ObjectStorageRule {
    #[prost(string, tag = "1")]
    pub bucket: String,
    #[prost(string, tag = "2")]
    pub prefix: String,
    /// Object events that fire the trigger, e.g. `create`, `delete`.
    #[prost(string, repeated, tag = "3")]
    pub events: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateTriggerRequest {
    #[prost(string, tag = "1")]
    pub folder_id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(map = "string, string", tag = "4")]
    pub labels: HashMap<String, String>,
    #[prost(string, tag = "5")]
    pub function_id: String,
    #[prost(oneof = "trigger_rule::Rule", tags = "8, 9")]
    pub rule: Option<trigger_rule::Rule>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateTriggerMetadata {
    #[prost(string, tag = "1")]
    pub trigger_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetTriggerRequest {
    #[prost(string, tag = "1")]
    pub trigger_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateTriggerRequest {
    #[prost(string, tag = "1")]
    pub trigger_id: String,
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
pub struct DeleteTriggerRequest {
    #[prost(string, tag = "1")]
    pub trigger_id: String,
}
