//! `meridian_mdb_postgres_cluster` — managed PostgreSQL clusters.
//!
//! Server settings are driven through the loosely-typed `settings` map.
//! Keys are protobuf wire names resolved against the `PostgresConfig`
//! field table, so adding a setting to the message is all it takes to
//! expose it here. An empty string value clears a nullable setting back to
//! the platform default; clearing a plain setting is rejected.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use meridian_client::operation;
use meridian_dynamic::{DynamicMessage, FieldError, Scalar, ValueKind, NAME_KEY};
use meridian_proto::mdb::{
    Cluster, ClusterConfig, ClusterStatus, CreateClusterMetadata, CreateClusterRequest,
    DeleteClusterRequest, Environment, GetClusterRequest, PostgresConfig, Resources,
    TransactionIsolation, UpdateClusterRequest,
};
use prost_types::FieldMask;
use serde_json::{json, Map, Value};

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::provider::ProviderConfig;
use crate::resource::{LifecycleFuture, ResourceHandler};
use crate::resources::{await_op, set_timestamp, string_map_value};
use crate::schema::{Attribute, Schema, Timeouts};

const GIB: i64 = 1 << 30;

pub struct MdbPostgresCluster;

fn parse_environment(name: &str) -> Result<Environment, ProviderError> {
    Environment::from_str_name(name).ok_or_else(|| {
        ProviderError::Validation(format!(
            "`environment` must be PRODUCTION or PRESTABLE, got `{name}`"
        ))
    })
}

/// Integer settings accept decimal literals; the isolation setting also
/// accepts its enum names.
fn parse_int_setting(key: &str, value: &str) -> Result<i64, ProviderError> {
    if let Ok(n) = value.parse::<i64>() {
        return Ok(n);
    }
    if key == "default_transaction_isolation" {
        if let Some(level) = TransactionIsolation::from_str_name(value) {
            return Ok(level as i64);
        }
    }
    Err(ProviderError::Validation(format!(
        "setting `{key}` expects an integer, got `{value}`"
    )))
}

fn expand_settings(settings: &BTreeMap<String, String>) -> Result<PostgresConfig, ProviderError> {
    let mut config = PostgresConfig::default();
    let fields = PostgresConfig::describe_fields(NAME_KEY);
    for (key, raw) in settings {
        let desc = fields
            .get(key.as_str())
            .ok_or_else(|| FieldError::UnknownField { key: key.clone() })?;
        let value = raw.trim();
        match desc.value_type {
            ValueKind::Int => {
                let parsed = match value {
                    "" => None,
                    v => Some(parse_int_setting(key, v)?),
                };
                config.set_int(key, parsed)?;
            }
            ValueKind::Bool => {
                let parsed = match value {
                    "" => None,
                    v => Some(v.parse::<bool>().map_err(|_| {
                        ProviderError::Validation(format!(
                            "setting `{key}` expects true or false, got `{v}`"
                        ))
                    })?),
                };
                config.set_bool(key, parsed)?;
            }
            ValueKind::Float => {
                let parsed = match value {
                    "" => None,
                    v => Some(v.parse::<f64>().map_err(|_| {
                        ProviderError::Validation(format!(
                            "setting `{key}` expects a number, got `{v}`"
                        ))
                    })?),
                };
                config.set_float(key, parsed)?;
            }
            ValueKind::String => {
                let parsed = (!value.is_empty()).then(|| value.to_owned());
                config.set_string(key, parsed)?;
            }
        }
    }
    Ok(config)
}

/// Flatten only the settings the user configured; server-side defaults for
/// untouched settings never enter state, so they never show up as drift.
/// A nullable setting the server reports as absent flattens to the empty
/// string, matching the reset spelling on the way in.
fn flatten_settings(
    config: &PostgresConfig,
    configured: &BTreeMap<String, String>,
) -> Result<Value, ProviderError> {
    let mut out = Map::new();
    for key in configured.keys() {
        let rendered = match config.get_scalar(key)? {
            None => String::new(),
            Some(Scalar::Int(v)) => v.to_string(),
            Some(Scalar::Bool(v)) => v.to_string(),
            Some(Scalar::Float(v)) => v.to_string(),
            Some(Scalar::Str(v)) => v,
        };
        out.insert(key.clone(), Value::String(rendered));
    }
    Ok(Value::Object(out))
}

/// Settings maps compare equal when every entry matches after
/// normalization, so `TRANSACTION_ISOLATION_SERIALIZABLE` in configuration
/// does not diff against the `4` the flatten path records.
fn settings_equivalent(old: &Value, new: &Value) -> bool {
    let (Some(a), Some(b)) = (old.as_object(), new.as_object()) else {
        return false;
    };
    a.len() == b.len()
        && a.iter().all(|(key, va)| {
            b.get(key)
                .is_some_and(|vb| setting_value_eq(key, va, vb))
        })
}

fn setting_value_eq(key: &str, a: &Value, b: &Value) -> bool {
    let (Some(a), Some(b)) = (a.as_str(), b.as_str()) else {
        return a == b;
    };
    if a == b {
        return true;
    }
    match (parse_int_setting(key, a), parse_int_setting(key, b)) {
        (Ok(na), Ok(nb)) => na == nb,
        _ => false,
    }
}

impl MdbPostgresCluster {
    fn expand_config(&self, data: &ResourceData) -> Result<ClusterConfig, ProviderError> {
        let settings = data.get_sorted_map("settings");
        Ok(ClusterConfig {
            version: data.require_str("version")?.to_owned(),
            resources: Some(Resources {
                resource_preset_id: data.require_str("resource_preset_id")?.to_owned(),
                disk_size: data.require_i64("disk_size")? * GIB,
                disk_type_id: data
                    .get_str("disk_type_id")
                    .unwrap_or("network-ssd")
                    .to_owned(),
            }),
            postgres_config: Some(expand_settings(&settings)?),
        })
    }

    fn flatten(&self, data: &mut ResourceData, cluster: &Cluster) -> Result<(), ProviderError> {
        data.set_id(cluster.id.clone());
        data.set("name", cluster.name.clone());
        data.set("description", cluster.description.clone());
        data.set("labels", string_map_value(&cluster.labels));
        let environment =
            Environment::try_from(cluster.environment).unwrap_or(Environment::Unspecified);
        data.set("environment", environment.as_str_name());
        data.set("network_id", cluster.network_id.clone());
        let status = ClusterStatus::try_from(cluster.status).unwrap_or(ClusterStatus::Unspecified);
        data.set("status", status.as_str_name());
        if let Some(cfg) = &cluster.config {
            data.set("version", cfg.version.clone());
            if let Some(res) = &cfg.resources {
                data.set("resource_preset_id", res.resource_preset_id.clone());
                data.set("disk_size", res.disk_size / GIB);
                data.set("disk_type_id", res.disk_type_id.clone());
            }
            if let Some(pg) = &cfg.postgres_config {
                let configured = data.get_sorted_map("settings");
                data.set("settings", flatten_settings(pg, &configured)?);
            }
        }
        set_timestamp(data, "created_at", cluster.created_at.as_ref());
        Ok(())
    }

    fn mask_paths(&self, changed: &[&'static str]) -> Vec<String> {
        let mut paths = BTreeSet::new();
        for name in changed {
            match *name {
                "name" | "description" | "labels" => {
                    paths.insert((*name).to_owned());
                }
                "resource_preset_id" | "disk_size" | "disk_type_id" => {
                    paths.insert("config.resources".to_owned());
                }
                "settings" => {
                    paths.insert("config.postgres_config".to_owned());
                }
                _ => {}
            }
        }
        paths.into_iter().collect()
    }
}

impl ResourceHandler for MdbPostgresCluster {
    fn type_name(&self) -> &'static str {
        "meridian_mdb_postgres_cluster"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required())
            .attr("description", Attribute::string())
            .attr("labels", Attribute::string_map())
            .attr("environment", Attribute::string().required().force_new())
            .attr("network_id", Attribute::string().required().force_new())
            .attr("version", Attribute::string().required().force_new())
            .attr("resource_preset_id", Attribute::string().required())
            .attr("disk_size", Attribute::int().required())
            .attr(
                "disk_type_id",
                Attribute::string().force_new().default_value(json!("network-ssd")),
            )
            .attr(
                "settings",
                Attribute::string_map().suppress(settings_equivalent),
            )
            .attr("status", Attribute::string().computed())
            .attr("created_at", Attribute::int().computed())
            .timeouts(Timeouts {
                create: Duration::from_secs(30 * 60),
                update: Duration::from_secs(30 * 60),
                delete: Duration::from_secs(15 * 60),
            })
    }

    fn create<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let environment = parse_environment(data.require_str("environment")?)?;
            let req = CreateClusterRequest {
                folder_id: ctx.folder_id.clone(),
                name: data.require_str("name")?.to_owned(),
                description: data.get_str("description").unwrap_or_default().to_owned(),
                labels: data.get_string_map("labels"),
                environment: environment as i32,
                network_id: data.require_str("network_id")?.to_owned(),
                config: Some(self.expand_config(data)?),
            };
            let op = ctx.postgres.create_cluster(req).await?;
            let op = await_op(ctx, op, self.schema().timeouts.create).await?;
            let meta: CreateClusterMetadata = operation::metadata(&op)?;
            tracing::info!(cluster_id = %meta.cluster_id, "cluster created");
            data.set_id(meta.cluster_id);
            self.read(ctx, data).await
        })
    }

    fn read<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let cluster_id = data.require_id()?.to_owned();
            let req = GetClusterRequest {
                cluster_id: cluster_id.clone(),
            };
            match ctx.postgres.get_cluster(req).await {
                Ok(cluster) => self.flatten(data, &cluster),
                Err(err) if err.is_not_found() => {
                    tracing::warn!(%cluster_id, "cluster is gone, clearing state");
                    data.clear();
                    Ok(())
                }
                Err(err) => Err(err.into()),
            }
        })
    }

    fn update<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let cluster_id = data.require_id()?.to_owned();
            let schema = self.schema();
            let changed = schema.effective_changes(data);
            let paths = self.mask_paths(&changed);
            if paths.is_empty() {
                tracing::debug!(%cluster_id, "no in-place changes");
                return Ok(());
            }
            let req = UpdateClusterRequest {
                cluster_id,
                update_mask: Some(FieldMask { paths }),
                name: data.get_str("name").unwrap_or_default().to_owned(),
                description: data.get_str("description").unwrap_or_default().to_owned(),
                labels: data.get_string_map("labels"),
                config: Some(self.expand_config(data)?),
            };
            let op = ctx.postgres.update_cluster(req).await?;
            await_op(ctx, op, schema.timeouts.update).await?;
            self.read(ctx, data).await
        })
    }

    fn delete<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let cluster_id = data.require_id()?.to_owned();
            let req = DeleteClusterRequest {
                cluster_id: cluster_id.clone(),
            };
            match ctx.postgres.delete_cluster(req).await {
                Ok(op) => {
                    await_op(ctx, op, self.schema().timeouts.delete).await?;
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::debug!(%cluster_id, "cluster already deleted");
                    Ok(())
                }
                Err(err) => Err(err.into()),
            }
        })
    }
}
