//! `meridian_vpc_subnet` — subnets within a network.
//!
//! The zone falls back to the provider default; CIDR blocks are immutable
//! once allocated.

use meridian_client::operation;
use meridian_proto::vpc::{
    CreateSubnetMetadata, CreateSubnetRequest, DeleteSubnetRequest, GetSubnetRequest, Subnet,
    UpdateSubnetRequest,
};
use prost_types::FieldMask;

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::provider::ProviderConfig;
use crate::resource::{LifecycleFuture, ResourceHandler};
use crate::resources::{await_op, set_timestamp, string_list_value, string_map_value};
use crate::schema::{Attribute, Schema};

pub struct VpcSubnet;

impl VpcSubnet {
    fn flatten(&self, data: &mut ResourceData, subnet: &Subnet) {
        data.set_id(subnet.id.clone());
        data.set("name", subnet.name.clone());
        data.set("description", subnet.description.clone());
        data.set("labels", string_map_value(&subnet.labels));
        data.set("network_id", subnet.network_id.clone());
        data.set("zone", subnet.zone_id.clone());
        data.set("v4_cidr_blocks", string_list_value(&subnet.v4_cidr_blocks));
        set_timestamp(data, "created_at", subnet.created_at.as_ref());
    }
}

impl ResourceHandler for VpcSubnet {
    fn type_name(&self) -> &'static str {
        "meridian_vpc_subnet"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required())
            .attr("description", Attribute::string())
            .attr("labels", Attribute::string_map())
            .attr("network_id", Attribute::string().required().force_new())
            .attr("zone", Attribute::string().force_new())
            .attr(
                "v4_cidr_blocks",
                Attribute::string_list().required().force_new(),
            )
            .attr("created_at", Attribute::int().computed())
    }

    fn create<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let cidrs = data.get_string_list("v4_cidr_blocks");
            if cidrs.is_empty() {
                return Err(ProviderError::Validation(
                    "`v4_cidr_blocks` must name at least one CIDR block".into(),
                ));
            }
            let req = CreateSubnetRequest {
                folder_id: ctx.folder_id.clone(),
                name: data.require_str("name")?.to_owned(),
                description: data.get_str("description").unwrap_or_default().to_owned(),
                labels: data.get_string_map("labels"),
                network_id: data.require_str("network_id")?.to_owned(),
                zone_id: data.get_str("zone").unwrap_or(&ctx.zone).to_owned(),
                v4_cidr_blocks: cidrs,
            };
            let op = ctx.vpc.create_subnet(req).await?;
            let op = await_op(ctx, op, self.schema().timeouts.create).await?;
            let meta: CreateSubnetMetadata = operation::metadata(&op)?;
            tracing::info!(subnet_id = %meta.subnet_id, "subnet created");
            data.set_id(meta.subnet_id);
            self.read(ctx, data).await
        })
    }

    fn read<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let subnet_id = data.require_id()?.to_owned();
            let req = GetSubnetRequest {
                subnet_id: subnet_id.clone(),
            };
            match ctx.vpc.get_subnet(req).await {
                Ok(subnet) => {
                    self.flatten(data, &subnet);
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::warn!(%subnet_id, "subnet is gone, clearing state");
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
            let subnet_id = data.require_id()?.to_owned();
            let schema = self.schema();
            let paths: Vec<String> = schema
                .effective_changes(data)
                .into_iter()
                .filter(|name| matches!(*name, "name" | "description" | "labels"))
                .map(str::to_owned)
                .collect();
            if paths.is_empty() {
                return Ok(());
            }
            let req = UpdateSubnetRequest {
                subnet_id,
                update_mask: Some(FieldMask { paths }),
                name: data.get_str("name").unwrap_or_default().to_owned(),
                description: data.get_str("description").unwrap_or_default().to_owned(),
                labels: data.get_string_map("labels"),
            };
            let op = ctx.vpc.update_subnet(req).await?;
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
            let subnet_id = data.require_id()?.to_owned();
            let req = DeleteSubnetRequest {
                subnet_id: subnet_id.clone(),
            };
            match ctx.vpc.delete_subnet(req).await {
                Ok(op) => {
                    await_op(ctx, op, self.schema().timeouts.delete).await?;
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::debug!(%subnet_id, "subnet already deleted");
                    Ok(())
                }
                Err(err) => Err(err.into()),
            }
        })
    }
}
