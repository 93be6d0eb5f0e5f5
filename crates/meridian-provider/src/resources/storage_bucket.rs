//! `meridian_storage_bucket` — object storage buckets.
//!
//! Buckets are addressed by name; the name doubles as the resource id.
//! Versioning cannot be set at creation time, so a non-default value is
//! applied with a follow-up update.

use meridian_client::operation;
use meridian_proto::storage::{
    Bucket, CreateBucketMetadata, CreateBucketRequest, DeleteBucketRequest, GetBucketRequest,
    UpdateBucketRequest, Versioning,
};
use prost_types::FieldMask;
use serde_json::json;

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::provider::ProviderConfig;
use crate::resource::{LifecycleFuture, ResourceHandler};
use crate::resources::{await_op, set_timestamp};
use crate::schema::{self, Attribute, Schema};

pub struct StorageBucket;

fn parse_versioning(name: &str) -> Result<Versioning, ProviderError> {
    Versioning::from_str_name(name).ok_or_else(|| {
        ProviderError::Validation(format!("`versioning` has no mode named `{name}`"))
    })
}

impl StorageBucket {
    fn flatten(&self, data: &mut ResourceData, bucket: &Bucket) {
        data.set_id(bucket.name.clone());
        data.set("bucket", bucket.name.clone());
        data.set("default_storage_class", bucket.default_storage_class.clone());
        data.set("max_size", bucket.max_size);
        let versioning =
            Versioning::try_from(bucket.versioning).unwrap_or(Versioning::Unspecified);
        data.set("versioning", versioning.as_str_name());
        set_timestamp(data, "created_at", bucket.created_at.as_ref());
    }

    async fn apply_settings(
        &self,
        ctx: &ProviderConfig,
        data: &ResourceData,
        paths: Vec<String>,
    ) -> Result<(), ProviderError> {
        let versioning = parse_versioning(data.require_str("versioning")?)?;
        let req = UpdateBucketRequest {
            name: data.require_id()?.to_owned(),
            update_mask: Some(FieldMask { paths }),
            default_storage_class: data
                .get_str("default_storage_class")
                .unwrap_or_default()
                .to_owned(),
            max_size: data.get_i64("max_size").unwrap_or(0),
            versioning: versioning as i32,
        };
        let op = ctx.storage.update_bucket(req).await?;
        await_op(ctx, op, self.schema().timeouts.update).await?;
        Ok(())
    }
}

impl ResourceHandler for StorageBucket {
    fn type_name(&self) -> &'static str {
        "meridian_storage_bucket"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("bucket", Attribute::string().required().force_new())
            .attr(
                "default_storage_class",
                Attribute::string()
                    .default_value(json!("STANDARD"))
                    .suppress(schema::suppress_case),
            )
            .attr("max_size", Attribute::int().default_value(json!(0)))
            .attr(
                "versioning",
                Attribute::string().default_value(json!("VERSIONING_DISABLED")),
            )
            .attr("created_at", Attribute::int().computed())
    }

    fn create<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let versioning = parse_versioning(data.require_str("versioning")?)?;
            let req = CreateBucketRequest {
                name: data.require_str("bucket")?.to_owned(),
                folder_id: ctx.folder_id.clone(),
                default_storage_class: data
                    .require_str("default_storage_class")?
                    .to_owned(),
                max_size: data.get_i64("max_size").unwrap_or(0),
            };
            let op = ctx.storage.create_bucket(req).await?;
            let op = await_op(ctx, op, self.schema().timeouts.create).await?;
            let meta: CreateBucketMetadata = operation::metadata(&op)?;
            tracing::info!(bucket = %meta.name, "bucket created");
            data.set_id(meta.name);

            if versioning != Versioning::Disabled {
                self.apply_settings(ctx, data, vec!["versioning".into()])
                    .await?;
            }
            self.read(ctx, data).await
        })
    }

    fn read<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let name = data.require_id()?.to_owned();
            let req = GetBucketRequest { name: name.clone() };
            match ctx.storage.get_bucket(req).await {
                Ok(bucket) => {
                    self.flatten(data, &bucket);
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::warn!(bucket = %name, "bucket is gone, clearing state");
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
            data.require_id()?;
            let schema = self.schema();
            let paths: Vec<String> = schema
                .effective_changes(data)
                .into_iter()
                .map(str::to_owned)
                .collect();
            if paths.is_empty() {
                return Ok(());
            }
            self.apply_settings(ctx, data, paths).await?;
            self.read(ctx, data).await
        })
    }

    fn delete<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let name = data.require_id()?.to_owned();
            let req = DeleteBucketRequest { name: name.clone() };
            match ctx.storage.delete_bucket(req).await {
                Ok(op) => {
                    await_op(ctx, op, self.schema().timeouts.delete).await?;
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::debug!(bucket = %name, "bucket already deleted");
                    Ok(())
                }
                Err(err) => Err(err.into()),
            }
        })
    }
}
