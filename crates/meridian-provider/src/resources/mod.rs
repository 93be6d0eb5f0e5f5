//! Built-in resource handlers, one module per resource type.
//!
//! All handlers follow the same shape: expand the attribute bag into a
//! request, fire the RPC, wait on the returned operation, then refresh so
//! state reflects what the service actually provisioned.

pub mod compute_instance;
pub mod iam_service_account;
pub mod mdb_postgres_cluster;
pub mod serverless_trigger;
pub mod storage_bucket;
pub mod vpc_network;
pub mod vpc_subnet;

use std::collections::HashMap;
use std::time::Duration;

use meridian_client::operation;
use meridian_proto::Operation;
use serde_json::Value;

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::provider::ProviderConfig;

pub(crate) async fn await_op(
    ctx: &ProviderConfig,
    op: Operation,
    timeout: Duration,
) -> Result<Operation, ProviderError> {
    Ok(operation::wait(ctx.operations.as_ref(), op, timeout).await?)
}

pub(crate) fn string_map_value(map: &HashMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

pub(crate) fn string_list_value(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

/// Record a creation timestamp as unix seconds, when the service sent one.
pub(crate) fn set_timestamp(
    data: &mut ResourceData,
    key: &str,
    ts: Option<&prost_types::Timestamp>,
) {
    if let Some(ts) = ts {
        data.set(key, ts.seconds);
    }
}
