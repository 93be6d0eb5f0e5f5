//! `meridian_iam_service_account` — service accounts.

use meridian_client::operation;
use meridian_proto::iam::{
    CreateServiceAccountMetadata, CreateServiceAccountRequest, DeleteServiceAccountRequest,
    GetServiceAccountRequest, ServiceAccount, UpdateServiceAccountRequest,
};
use prost_types::FieldMask;

use crate::data::ResourceData;
use crate::provider::ProviderConfig;
use crate::resource::{LifecycleFuture, ResourceHandler};
use crate::resources::{await_op, set_timestamp, string_map_value};
use crate::schema::{Attribute, Schema};

pub struct IamServiceAccount;

impl IamServiceAccount {
    fn flatten(&self, data: &mut ResourceData, account: &ServiceAccount) {
        data.set_id(account.id.clone());
        data.set("name", account.name.clone());
        data.set("description", account.description.clone());
        data.set("labels", string_map_value(&account.labels));
        set_timestamp(data, "created_at", account.created_at.as_ref());
    }
}

impl ResourceHandler for IamServiceAccount {
    fn type_name(&self) -> &'static str {
        "meridian_iam_service_account"
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
            let req = CreateServiceAccountRequest {
                folder_id: ctx.folder_id.clone(),
                name: data.require_str("name")?.to_owned(),
                description: data.get_str("description").unwrap_or_default().to_owned(),
                labels: data.get_string_map("labels"),
            };
            let op = ctx.iam.create_service_account(req).await?;
            let op = await_op(ctx, op, self.schema().timeouts.create).await?;
            let meta: CreateServiceAccountMetadata = operation::metadata(&op)?;
            tracing::info!(service_account_id = %meta.service_account_id, "service account created");
            data.set_id(meta.service_account_id);
            self.read(ctx, data).await
        })
    }

    fn read<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let service_account_id = data.require_id()?.to_owned();
            let req = GetServiceAccountRequest {
                service_account_id: service_account_id.clone(),
            };
            match ctx.iam.get_service_account(req).await {
                Ok(account) => {
                    self.flatten(data, &account);
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::warn!(%service_account_id, "service account is gone, clearing state");
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
            let service_account_id = data.require_id()?.to_owned();
            let schema = self.schema();
            let paths: Vec<String> = schema
                .effective_changes(data)
                .into_iter()
                .map(str::to_owned)
                .collect();
            if paths.is_empty() {
                return Ok(());
            }
            let req = UpdateServiceAccountRequest {
                service_account_id,
                update_mask: Some(FieldMask { paths }),
                name: data.get_str("name").unwrap_or_default().to_owned(),
                description: data.get_str("description").unwrap_or_default().to_owned(),
                labels: data.get_string_map("labels"),
            };
            let op = ctx.iam.update_service_account(req).await?;
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
            let service_account_id = data.require_id()?.to_owned();
            let req = DeleteServiceAccountRequest {
                service_account_id: service_account_id.clone(),
            };
            match ctx.iam.delete_service_account(req).await {
                Ok(op) => {
                    await_op(ctx, op, self.schema().timeouts.delete).await?;
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::debug!(%service_account_id, "service account already deleted");
                    Ok(())
                }
                Err(err) => Err(err.into()),
            }
        })
    }
}
