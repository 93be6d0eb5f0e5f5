//! `meridian_serverless_trigger` — function triggers.
//!
//! A trigger fires a function from exactly one rule: a cron timer or
//! object-storage events. The rule is a oneof on the wire, so the two
//! attribute groups are mutually exclusive and swapping between them
//! replaces the trigger.

use meridian_client::operation;
use meridian_proto::triggers::{
    trigger_rule, CreateTriggerMetadata, CreateTriggerRequest, DeleteTriggerRequest,
    GetTriggerRequest, ObjectStorageRule, TimerRule, Trigger, UpdateTriggerRequest,
};
use prost_types::FieldMask;

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::provider::ProviderConfig;
use crate::resource::{LifecycleFuture, ResourceHandler};
use crate::resources::{await_op, set_timestamp, string_list_value, string_map_value};
use crate::schema::{self, Attribute, Schema};

pub struct ServerlessTrigger;

impl ServerlessTrigger {
    fn expand_rule(&self, data: &ResourceData) -> Result<trigger_rule::Rule, ProviderError> {
        schema::require_exactly_one(data, &["cron_expression", "bucket"])?;
        if let Some(cron) = data.get_str("cron_expression") {
            if data.get("prefix").is_some() || data.get("events").is_some() {
                return Err(ProviderError::Validation(
                    "`prefix` and `events` only apply to object storage triggers".into(),
                ));
            }
            return Ok(trigger_rule::Rule::Timer(TimerRule {
                cron_expression: cron.to_owned(),
            }));
        }
        Ok(trigger_rule::Rule::ObjectStorage(ObjectStorageRule {
            bucket: data.require_str("bucket")?.to_owned(),
            prefix: data.get_str("prefix").unwrap_or_default().to_owned(),
            events: data.get_string_list("events"),
        }))
    }

    fn flatten(&self, data: &mut ResourceData, trigger: &Trigger) {
        data.set_id(trigger.id.clone());
        data.set("name", trigger.name.clone());
        data.set("description", trigger.description.clone());
        data.set("labels", string_map_value(&trigger.labels));
        data.set("function_id", trigger.function_id.clone());
        data.unset("cron_expression");
        data.unset("bucket");
        data.unset("prefix");
        data.unset("events");
        match &trigger.rule {
            Some(trigger_rule::Rule::Timer(timer)) => {
                data.set("cron_expression", timer.cron_expression.clone());
            }
            Some(trigger_rule::Rule::ObjectStorage(rule)) => {
                data.set("bucket", rule.bucket.clone());
                data.set("prefix", rule.prefix.clone());
                data.set("events", string_list_value(&rule.events));
            }
            None => {}
        }
        set_timestamp(data, "created_at", trigger.created_at.as_ref());
    }
}

impl ResourceHandler for ServerlessTrigger {
    fn type_name(&self) -> &'static str {
        "meridian_serverless_trigger"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required())
            .attr("description", Attribute::string())
            .attr("labels", Attribute::string_map())
            .attr("function_id", Attribute::string().required().force_new())
            .attr("cron_expression", Attribute::string().force_new())
            .attr("bucket", Attribute::string().force_new())
            .attr("prefix", Attribute::string().force_new())
            .attr("events", Attribute::string_list().force_new())
            .attr("created_at", Attribute::int().computed())
    }

    fn create<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let rule = self.expand_rule(data)?;
            let req = CreateTriggerRequest {
                folder_id: ctx.folder_id.clone(),
                name: data.require_str("name")?.to_owned(),
                description: data.get_str("description").unwrap_or_default().to_owned(),
                labels: data.get_string_map("labels"),
                function_id: data.require_str("function_id")?.to_owned(),
                rule: Some(rule),
            };
            let op = ctx.triggers.create_trigger(req).await?;
            let op = await_op(ctx, op, self.schema().timeouts.create).await?;
            let meta: CreateTriggerMetadata = operation::metadata(&op)?;
            tracing::info!(trigger_id = %meta.trigger_id, "trigger created");
            data.set_id(meta.trigger_id);
            self.read(ctx, data).await
        })
    }

    fn read<'a>(
        &'a self,
        ctx: &'a ProviderConfig,
        data: &'a mut ResourceData,
    ) -> LifecycleFuture<'a> {
        Box::pin(async move {
            let trigger_id = data.require_id()?.to_owned();
            let req = GetTriggerRequest {
                trigger_id: trigger_id.clone(),
            };
            match ctx.triggers.get_trigger(req).await {
                Ok(trigger) => {
                    self.flatten(data, &trigger);
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::warn!(%trigger_id, "trigger is gone, clearing state");
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
            let trigger_id = data.require_id()?.to_owned();
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
            let req = UpdateTriggerRequest {
                trigger_id,
                update_mask: Some(FieldMask { paths }),
                name: data.get_str("name").unwrap_or_default().to_owned(),
                description: data.get_str("description").unwrap_or_default().to_owned(),
                labels: data.get_string_map("labels"),
            };
            let op = ctx.triggers.update_trigger(req).await?;
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
            let trigger_id = data.require_id()?.to_owned();
            let req = DeleteTriggerRequest {
                trigger_id: trigger_id.clone(),
            };
            match ctx.triggers.delete_trigger(req).await {
                Ok(op) => {
                    await_op(ctx, op, self.schema().timeouts.delete).await?;
                    Ok(())
                }
                Err(err) if err.is_not_found() => {
                    tracing::debug!(%trigger_id, "trigger already deleted");
                    Ok(())
                }
                Err(err) => Err(err.into()),
            }
        })
    }
}
