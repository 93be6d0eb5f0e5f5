//! `meridian_compute_instance` — virtual machine instances.
//!
//! Memory and disk sizes are declared in GiB and converted to bytes at the
//! wire boundary. Only name, description and labels can change in place;
//! everything that shapes the machine forces replacement.

use meridian_client::operation;
use meridian_proto::compute::{
    AttachedDiskSpec, CreateInstanceMetadata, CreateInstanceRequest, DeleteInstanceRequest,
    GetInstanceRequest, Instance, InstanceStatus, NetworkInterfaceSpec, Resources,
    UpdateInstanceRequest,
};
use prost_types::FieldMask;
use serde_json::json;

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::provider::ProviderConfig;
use crate::resource::{LifecycleFuture, ResourceHandler};
use crate::resources::{await_op, set_timestamp, string_list_value, string_map_value};
use crate::schema::{self, Attribute, Schema};

const GIB: i64 = 1 << 30;

const UPDATABLE: &[&str] = &["name", "description", "labels"];

pub struct ComputeInstance;

impl ComputeInstance {
    fn expand_create(
        &self,
        ctx: &ProviderConfig,
        data: &ResourceData,
    ) -> Result<CreateInstanceRequest, ProviderError> {
        let subnet_ids = data.get_string_list("subnet_ids");
        if subnet_ids.is_empty() {
            return Err(ProviderError::Validation(
                "`subnet_ids` must name at least one subnet".into(),
            ));
        }
        let nat = data.get_bool("nat").unwrap_or(false);

        Ok(CreateInstanceRequest {
            folder_id: ctx.folder_id.clone(),
            name: data.require_str("name")?.to_owned(),
            description: data.get_str("description").unwrap_or_default().to_owned(),
            labels: data.get_string_map("labels"),
            zone_id: data.get_str("zone").unwrap_or(&ctx.zone).to_owned(),
            platform_id: data.require_str("platform_id")?.to_owned(),
            resources_spec: Some(Resources {
                memory: data.require_i64("memory")? * GIB,
                cores: data.require_i64("cores")?,
                core_fraction: data.get_i64("core_fraction").unwrap_or(100),
            }),
            boot_disk_spec: Some(AttachedDiskSpec {
                auto_delete: data.get_bool("boot_disk_auto_delete").unwrap_or(true),
                image_id: data.require_str("boot_disk_image_id")?.to_owned(),
                size: data.get_i64("boot_disk_size").unwrap_or(10) * GIB,
                type_id: data
                    .get_str("boot_disk_type")
                    .unwrap_or("network-ssd")
                    .to_owned(),
            }),
            network_interface_specs: subnet_ids
                .into_iter()
                .map(|subnet_id| NetworkInterfaceSpec { subnet_id, nat })
                .collect(),
        })
    }

    fn flatten(&self, data: &mut ResourceData, instance: &Instance) {
        data.set_id(instance.id.clone());
        data.set("name", instance.name.clone());
        data.set("description", instance.description.clone());
        data.set("labels", string_map_value(&instance.labels));
        data.set("zone", instance.zone_id.clone());
        data.set("platform_id", instance.platform_id.clone());
        if let Some(res) = &instance.resources {
            data.set("cores", res.cores);
            data.set("memory", res.memory / GIB);
            data.set("core_fraction", res.core_fraction);
        }
        if let Some(disk) = &instance.boot_disk {
            data.set("boot_disk_auto_delete", disk.auto_delete);
        }
        let subnet_ids: Vec<String> = instance
            .network_interfaces
            .iter()
            .map(|nic| nic.subnet_id.clone())
            .collect();
        data.set("subnet_ids", string_list_value(&subnet_ids));
        if let Some(nic) = instance.network_interfaces.first() {
            data.set("nat", nic.nat);
        }
        let status = InstanceStatus::try_from(instance.status).unwrap_or(InstanceStatus::Unspecified);
        data.set("status", status.as_str_name());
        data.set("fqdn", instance.fqdn.clone());
        set_timestamp(data, "created_at", instance.created_at.as_ref());
    }
}

impl ResourceHandler for ComputeInstance {
    fn type_name(&self) -> &'static str {
        "meridian_compute_instance"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required())
            .attr("description", Attribute::string())
            .attr("labels", Attribute::string_map())
            .attr("zone", Attribute::string().force_new())
            .attr(
                "platform_id",
                Attribute::string().force_new().default_value(json!("standard-v3")),
            )
            .attr("cores", Attribute::int().required().force_new())
            .attr("memory", Attribute::int().required().force_new())
            .attr(
                "core_fraction",
                Attribute::int().force_new().default_value(json!(100)),
            )
            .attr("boot_disk_image_id", Attribute::string().required().force_new())
            .attr(
                "boot_disk_size",
                Attribute::int().force_new().default_value(json!(10)),
            )
            .attr(
                "boot_disk_type",
                Attribute::string().force_new().default_value(json!("network-ssd")),
            )
            .attr(
                "boot_disk_auto_delete",
                Attribute::boolean().force_new().default_value(json!(true)),
            )
            .attr("subnet_ids", Attribute::string_list().required().force_new())
            .attr("nat", Attribute::boolean().force_new().default_value(json!(false)))
            .attr("status", Attribute::string().computed())
            .attr(
                "fqdn",
                Attribute::string().computed().suppress(schema::suppress_trailing_dot),
            )
            .attr("created_at", Attribute::int().computed())
    }

    fn create<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let timeouts = self.schema().timeouts;
            let req = self.expand_create(ctx, data)?;
            let op = ctx.compute.create_instance(req).await?;
            let op = await_op(ctx, op, timeouts.create).await?;
            let meta: CreateInstanceMetadata = operation::metadata(&op)?;
            tracing::info!(instance_id = %meta.instance_id, "instance created");
            data.set_id(meta.instance_id);
            self.read(ctx, data).await
        })
    }

    fn read<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let instance_id = data.require_id()?.to_owned();
            let req = GetInstanceRequest {
                instance_id: instance_id.clone(),
            };
            match ctx.compute.get_instance(req).await {
                Ok(instance) => {
                    self.flatten(data, &instance);
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::warn!(%instance_id, "instance is gone, clearing state");
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
            let instance_id = data.require_id()?.to_owned();
            let schema = self.schema();
            let paths: Vec<String> = schema
                .effective_changes(data)
                .into_iter()
                .filter(|name| UPDATABLE.contains(name))
                .map(str::to_owned)
                .collect();
            if paths.is_empty() {
                tracing::debug!(%instance_id, "no in-place changes");
                return Ok(());
            }
            let req = UpdateInstanceRequest {
                instance_id,
                update_mask: Some(FieldMask { paths }),
                name: data.get_str("name").unwrap_or_default().to_owned(),
                description: data.get_str("description").unwrap_or_default().to_owned(),
                labels: data.get_string_map("labels"),
                resources_spec: None,
            };
            let op = ctx.compute.update_instance(req).await?;
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
            let instance_id = data.require_id()?.to_owned();
            let req = DeleteInstanceRequest {
                instance_id: instance_id.clone(),
            };
            match ctx.compute.delete_instance(req).await {
                Ok(op) => {
                    await_op(ctx, op, self.schema().timeouts.delete).await?;
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::debug!(%instance_id, "instance already deleted");
                    Ok(())
                }
                Err(err) => Err(err.into()),
            }
        })
    }
}
