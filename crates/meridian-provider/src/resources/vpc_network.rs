//! `meridian_vpc_network` — virtual networks.

use meridian_client::operation;
use meridian_proto::vpc::{
    CreateNetworkMetadata, CreateNetworkRequest, DeleteNetworkRequest, GetNetworkRequest, Network,
    UpdateNetworkRequest,
};
use prost_types::FieldMask;

use crate::data::ResourceData;
use crate::provider::ProviderConfig;
use crate::resource::{LifecycleFuture, ResourceHandler};
use crate::resources::{await_op, set_timestamp, string_map_value};
use crate::schema::{Attribute, Schema};

pub struct VpcNetwork;

impl VpcNetwork {
    fn flatten(&self, data: &mut ResourceData, network: &Network) {
        data.set_id(network.id.clone());
        data.set("name", network.name.clone());
        data.set("description", network.description.clone());
        data.set("labels", string_map_value(&network.labels));
        set_timestamp(data, "created_at", network.created_at.as_ref());
    }
}

impl ResourceHandler for VpcNetwork {
    fn type_name(&self) -> &'static str {
        "meridian_vpc_network"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required())
            .attr("description", Attribute::string())
            .attr("labels", Attribute::string_map())
            .attr("created_at", Attribute::int().computed())
    }

    fn create<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let req = CreateNetworkRequest {
                folder_id: ctx.folder_id.clone(),
                name: data.require_str("name")?.to_owned(),
                description: data.get_str("description").unwrap_or_default().to_owned(),
                labels: data.get_string_map("labels"),
            };
            let op = ctx.vpc.create_network(req).await?;
            let op = await_op(ctx, op, self.schema().timeouts.create).await?;
            let meta: CreateNetworkMetadata = operation::metadata(&op)?;
            tracing::info!(network_id = %meta.network_id, "network created");
            data.set_id(meta.network_id);
            self.read(ctx, data).await
        })
    }

    fn read<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let network_id = data.require_id()?.to_owned();
            let req = GetNetworkRequest {
                network_id: network_id.clone(),
            };
            match ctx.vpc.get_network(req).await {
                Ok(network) => {
                    self.flatten(data, &network);
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::warn!(%network_id, "network is gone, clearing state");
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
            let network_id = data.require_id()?.to_owned();
            let schema = self.schema();
            let paths: Vec<String> = schema
                .effective_changes(data)
                .into_iter()
                .map(str::to_owned)
                .collect();
            if paths.is_empty() {
                return Ok(());
            }
            let req = UpdateNetworkRequest {
                network_id,
                update_mask: Some(FieldMask { paths }),
                name: data.get_str("name").unwrap_or_default().to_owned(),
                description: data.get_str("description").unwrap_or_default().to_owned(),
                labels: data.get_string_map("labels"),
            };
            let op = ctx.vpc.update_network(req).await?;
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
            let network_id = data.require_id()?.to_owned();
            let req = DeleteNetworkRequest {
                network_id: network_id.clone(),
            };
            match ctx.vpc.delete_network(req).await {
                Ok(op) => {
                    await_op(ctx, op, self.schema().timeouts.delete).await?;
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::debug!(%network_id, "network already deleted");
                    Ok(())
                }
                Err(err) => Err(err.into()),
            }
        })
    }
}
