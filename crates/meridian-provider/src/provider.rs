//! Provider registry and lifecycle dispatch.

use std::collections::BTreeMap;
use std::sync::Arc;

use meridian_client::api::{
    ComputeApi, IamApi, OperationApi, PostgresApi, StorageApi, TriggerApi, VpcApi,
};
use meridian_client::{CloudClient, Config};

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::resource::ResourceHandler;
use crate::resources;

/// Connected service handles plus the folder and zone defaults handlers
/// fall back to when a resource does not pin its own.
pub struct ProviderConfig {
    pub folder_id: String,
    pub zone: String,
    pub compute: Arc<dyn ComputeApi>,
    pub vpc: Arc<dyn VpcApi>,
    pub postgres: Arc<dyn PostgresApi>,
    pub iam: Arc<dyn IamApi>,
    pub storage: Arc<dyn StorageApi>,
    pub triggers: Arc<dyn TriggerApi>,
    pub operations: Arc<dyn OperationApi>,
}

impl ProviderConfig {
    /// Dial the control plane and wire every service family to the shared
    /// channel.
    pub async fn connect(config: &Config) -> Result<Self, ProviderError> {
        let client = CloudClient::connect(config).await?;
        Ok(Self {
            folder_id: config.folder_id.clone(),
            zone: config.zone.clone(),
            compute: Arc::new(client.compute()),
            vpc: Arc::new(client.vpc()),
            postgres: Arc::new(client.postgres()),
            iam: Arc::new(client.iam()),
            storage: Arc::new(client.storage()),
            triggers: Arc::new(client.triggers()),
            operations: Arc::new(client.operations()),
        })
    }
}

/// Best available identity for error context: the user-facing name where
/// one is configured, the remote id once known.
fn display_name(data: &ResourceData) -> &str {
    data.get_str("name")
        .or_else(|| data.get_str("bucket"))
        .or_else(|| data.id())
        .unwrap_or("unnamed")
}

/// Registry of resource handlers keyed by type name, dispatching lifecycle
/// calls with validation and defaulting applied up front.
pub struct Provider {
    config: ProviderConfig,
    resources: BTreeMap<&'static str, Box<dyn ResourceHandler>>,
}

impl Provider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            resources: BTreeMap::new(),
        }
    }

    /// A provider with every built-in resource type registered.
    pub fn with_builtin_resources(config: ProviderConfig) -> Self {
        let mut provider = Self::new(config);
        provider.register(Box::new(resources::compute_instance::ComputeInstance));
        provider.register(Box::new(resources::vpc_network::VpcNetwork));
        provider.register(Box::new(resources::vpc_subnet::VpcSubnet));
        provider.register(Box::new(resources::iam_service_account::IamServiceAccount));
        provider.register(Box::new(resources::storage_bucket::StorageBucket));
        provider.register(Box::new(resources::mdb_postgres_cluster::MdbPostgresCluster));
        provider.register(Box::new(resources::serverless_trigger::ServerlessTrigger));
        provider
    }

    pub fn register(&mut self, handler: Box<dyn ResourceHandler>) {
        self.resources.insert(handler.type_name(), handler);
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn handler(&self, type_name: &str) -> Result<&dyn ResourceHandler, ProviderError> {
        self.resources
            .get(type_name)
            .map(Box::as_ref)
            .ok_or_else(|| ProviderError::UnknownResourceType(type_name.to_owned()))
    }

    pub async fn create(
        &self,
        type_name: &str,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let handler = self.handler(type_name)?;
        let schema = handler.schema();
        schema.apply_defaults(data);
        schema
            .validate(data)
            .map_err(|err| err.with_resource(type_name, display_name(data)))?;
        tracing::info!(resource = type_name, "creating resource");
        handler.create(&self.config, data).await?;
        schema.record_unechoed(data);
        Ok(())
    }

    pub async fn read(
        &self,
        type_name: &str,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let handler = self.handler(type_name)?;
        let schema = handler.schema();
        // Resolve defaults before recording, so a defaulted creation-only
        // attribute does not surface as drift on the next update.
        schema.apply_defaults(data);
        handler.read(&self.config, data).await?;
        schema.record_unechoed(data);
        Ok(())
    }

    /// Apply in-place changes. Attributes marked force-new are refused
    /// here; callers must destroy and recreate instead.
    pub async fn update(
        &self,
        type_name: &str,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let handler = self.handler(type_name)?;
        let schema = handler.schema();
        schema.apply_defaults(data);
        schema
            .validate(data)
            .map_err(|err| err.with_resource(type_name, display_name(data)))?;
        if let Some(attribute) = schema.replacement_trigger(data) {
            return Err(ProviderError::RequiresReplacement { attribute });
        }
        tracing::info!(resource = type_name, id = data.id(), "updating resource");
        handler.update(&self.config, data).await?;
        schema.record_unechoed(data);
        Ok(())
    }

    pub async fn delete(
        &self,
        type_name: &str,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        let handler = self.handler(type_name)?;
        tracing::info!(resource = type_name, id = data.id(), "deleting resource");
        handler.delete(&self.config, data).await?;
        data.clear();
        Ok(())
    }

    pub async fn import(
        &self,
        type_name: &str,
        id: &str,
    ) -> Result<ResourceData, ProviderError> {
        let handler = self.handler(type_name)?;
        tracing::info!(resource = type_name, id, "importing resource");
        handler.import(&self.config, id).await
    }
}
