//! Production gRPC implementations of the service traits.

use std::time::Duration;

use meridian_proto::operation::{operation_service, GetOperationRequest, Operation};
use meridian_proto::{compute, iam, mdb, storage, triggers, vpc};
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

use crate::api::{
    BoxFuture, ComputeApi, IamApi, OperationApi, PostgresApi, StorageApi, TriggerApi, VpcApi,
};
use crate::config::Config;
use crate::error::ApiError;
use crate::rpc::{self, CallAuth};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// One connected channel to the control plane, handing out per-family
/// clients. Channels multiplex internally, so clients are cheap clones.
pub struct CloudClient {
    svc: GrpcService,
}

impl CloudClient {
    pub async fn connect(config: &Config) -> Result<Self, ApiError> {
        let channel = build_channel(config).await?;
        tracing::info!(endpoint = %config.endpoint, "connected to control plane");
        Ok(Self {
            svc: GrpcService {
                channel,
                auth: CallAuth::bearer(&config.token)?,
                timeout: config.timeout,
            },
        })
    }

    pub fn compute(&self) -> GrpcComputeApi {
        GrpcComputeApi(self.svc.clone())
    }

    pub fn vpc(&self) -> GrpcVpcApi {
        GrpcVpcApi(self.svc.clone())
    }

    pub fn postgres(&self) -> GrpcPostgresApi {
        GrpcPostgresApi(self.svc.clone())
    }

    pub fn iam(&self) -> GrpcIamApi {
        GrpcIamApi(self.svc.clone())
    }

    pub fn storage(&self) -> GrpcStorageApi {
        GrpcStorageApi(self.svc.clone())
    }

    pub fn triggers(&self) -> GrpcTriggerApi {
        GrpcTriggerApi(self.svc.clone())
    }

    pub fn operations(&self) -> GrpcOperationApi {
        GrpcOperationApi(self.svc.clone())
    }
}

async fn build_channel(config: &Config) -> Result<Channel, ApiError> {
    let mut endpoint = Endpoint::from_shared(config.endpoint.clone())?
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(config.timeout);

    if config.endpoint.starts_with("https://") {
        endpoint = endpoint.tls_config(ClientTlsConfig::new().with_webpki_roots())?;
    }

    endpoint.connect().await.map_err(ApiError::Transport)
}

#[derive(Clone)]
struct GrpcService {
    channel: Channel,
    auth: CallAuth,
    timeout: Duration,
}

impl GrpcService {
    async fn call<Req, Resp>(&self, path: &'static str, req: Req) -> Result<Resp, ApiError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        rpc::unary(&self.channel, path, &self.auth, self.timeout, req).await
    }
}

pub struct GrpcOperationApi(GrpcService);

impl OperationApi for GrpcOperationApi {
    fn get<'a>(&'a self, operation_id: &'a str) -> BoxFuture<'a, Result<Operation, ApiError>> {
        Box::pin(self.0.call(
            operation_service::GET,
            GetOperationRequest {
                operation_id: operation_id.to_owned(),
            },
        ))
    }
}

pub struct GrpcComputeApi(GrpcService);

impl ComputeApi for GrpcComputeApi {
    fn create_instance(
        &self,
        req: compute::CreateInstanceRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(compute::instance_service::CREATE, req))
    }

    fn get_instance(
        &self,
        req: compute::GetInstanceRequest,
    ) -> BoxFuture<'_, Result<compute::Instance, ApiError>> {
        Box::pin(self.0.call(compute::instance_service::GET, req))
    }

    fn update_instance(
        &self,
        req: compute::UpdateInstanceRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(compute::instance_service::UPDATE, req))
    }

    fn delete_instance(
        &self,
        req: compute::DeleteInstanceRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(compute::instance_service::DELETE, req))
    }

    fn list_instances(
        &self,
        req: compute::ListInstancesRequest,
    ) -> BoxFuture<'_, Result<compute::ListInstancesResponse, ApiError>> {
        Box::pin(self.0.call(compute::instance_service::LIST, req))
    }
}

pub struct GrpcVpcApi(GrpcService);

impl VpcApi for GrpcVpcApi {
    fn create_network(
        &self,
        req: vpc::CreateNetworkRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(vpc::network_service::CREATE, req))
    }

    fn get_network(
        &self,
        req: vpc::GetNetworkRequest,
    ) -> BoxFuture<'_, Result<vpc::Network, ApiError>> {
        Box::pin(self.0.call(vpc::network_service::GET, req))
    }

    fn update_network(
        &self,
        req: vpc::UpdateNetworkRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(vpc::network_service::UPDATE, req))
    }

    fn delete_network(
        &self,
        req: vpc::DeleteNetworkRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(vpc::network_service::DELETE, req))
    }

    fn create_subnet(
        &self,
        req: vpc::CreateSubnetRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(vpc::subnet_service::CREATE, req))
    }

    fn get_subnet(
        &self,
        req: vpc::GetSubnetRequest,
    ) -> BoxFuture<'_, Result<vpc::Subnet, ApiError>> {
        Box::pin(self.0.call(vpc::subnet_service::GET, req))
    }

    fn update_subnet(
        &self,
        req: vpc::UpdateSubnetRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(vpc::subnet_service::UPDATE, req))
    }

    fn delete_subnet(
        &self,
        req: vpc::DeleteSubnetRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(vpc::subnet_service::DELETE, req))
    }
}

pub struct GrpcPostgresApi(GrpcService);

impl PostgresApi for GrpcPostgresApi {
    fn create_cluster(
        &self,
        req: mdb::CreateClusterRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(mdb::cluster_service::CREATE, req))
    }

    fn get_cluster(
        &self,
        req: mdb::GetClusterRequest,
    ) -> BoxFuture<'_, Result<mdb::Cluster, ApiError>> {
        Box::pin(self.0.call(mdb::cluster_service::GET, req))
    }

    fn update_cluster(
        &self,
        req: mdb::UpdateClusterRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(mdb::cluster_service::UPDATE, req))
    }

    fn delete_cluster(
        &self,
        req: mdb::DeleteClusterRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(mdb::cluster_service::DELETE, req))
    }
}

pub struct GrpcIamApi(GrpcService);

impl IamApi for GrpcIamApi {
    fn create_service_account(
        &self,
        req: iam::CreateServiceAccountRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(iam::service_account_service::CREATE, req))
    }

    fn get_service_account(
        &self,
        req: iam::GetServiceAccountRequest,
    ) -> BoxFuture<'_, Result<iam::ServiceAccount, ApiError>> {
        Box::pin(self.0.call(iam::service_account_service::GET, req))
    }

    fn update_service_account(
        &self,
        req: iam::UpdateServiceAccountRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(iam::service_account_service::UPDATE, req))
    }

    fn delete_service_account(
        &self,
        req: iam::DeleteServiceAccountRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(iam::service_account_service::DELETE, req))
    }
}

pub struct GrpcStorageApi(GrpcService);

impl StorageApi for GrpcStorageApi {
    fn create_bucket(
        &self,
        req: storage::CreateBucketRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(storage::bucket_service::CREATE, req))
    }

    fn get_bucket(
        &self,
        req: storage::GetBucketRequest,
    ) -> BoxFuture<'_, Result<storage::Bucket, ApiError>> {
        Box::pin(self.0.call(storage::bucket_service::GET, req))
    }

    fn update_bucket(
        &self,
        req: storage::UpdateBucketRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(storage::bucket_service::UPDATE, req))
    }

    fn delete_bucket(
        &self,
        req: storage::DeleteBucketRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(storage::bucket_service::DELETE, req))
    }
}

pub struct GrpcTriggerApi(GrpcService);

impl TriggerApi for GrpcTriggerApi {
    fn create_trigger(
        &self,
        req: triggers::CreateTriggerRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(triggers::trigger_service::CREATE, req))
    }

    fn get_trigger(
        &self,
        req: triggers::GetTriggerRequest,
    ) -> BoxFuture<'_, Result<triggers::Trigger, ApiError>> {
        Box::pin(self.0.call(triggers::trigger_service::GET, req))
    }

    fn update_trigger(
        &self,
        req: triggers::UpdateTriggerRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(triggers::trigger_service::UPDATE, req))
    }

    fn delete_trigger(
        &self,
        req: triggers::DeleteTriggerRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(self.0.call(triggers::trigger_service::DELETE, req))
    }
}
