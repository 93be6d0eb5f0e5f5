//! Service traits the provider layer programs against.
//!
//! One trait per service family, mirroring the control plane's service
//! stubs. Production implementations live in [`crate::grpc`]; tests swap in
//! in-process fakes. Methods return boxed futures for dyn compatibility.

use std::future::Future;
use std::pin::Pin;

use meridian_proto::operation::Operation;
use meridian_proto::{compute, iam, mdb, storage, triggers, vpc};

use crate::error::ApiError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type ApiFuture<'a, T> = BoxFuture<'a, Result<T, ApiError>>;

/// Long-running operation lookup, used by [`crate::operation::wait`].
pub trait OperationApi: Send + Sync {
    fn get<'a>(&'a self, operation_id: &'a str) -> ApiFuture<'a, Operation>;
}

pub trait ComputeApi: Send + Sync {
    fn create_instance(&self, req: compute::CreateInstanceRequest) -> ApiFuture<'_, Operation>;
    fn get_instance(&self, req: compute::GetInstanceRequest) -> ApiFuture<'_, compute::Instance>;
    fn update_instance(&self, req: compute::UpdateInstanceRequest) -> ApiFuture<'_, Operation>;
    fn delete_instance(&self, req: compute::DeleteInstanceRequest) -> ApiFuture<'_, Operation>;
    fn list_instances(
        &self,
        req: compute::ListInstancesRequest,
    ) -> ApiFuture<'_, compute::ListInstancesResponse>;
}

pub trait VpcApi: Send + Sync {
    fn create_network(&self, req: vpc::CreateNetworkRequest) -> ApiFuture<'_, Operation>;
    fn get_network(&self, req: vpc::GetNetworkRequest) -> ApiFuture<'_, vpc::Network>;
    fn update_network(&self, req: vpc::UpdateNetworkRequest) -> ApiFuture<'_, Operation>;
    fn delete_network(&self, req: vpc::DeleteNetworkRequest) -> ApiFuture<'_, Operation>;

    fn create_subnet(&self, req: vpc::CreateSubnetRequest) -> ApiFuture<'_, Operation>;
    fn get_subnet(&self, req: vpc::GetSubnetRequest) -> ApiFuture<'_, vpc::Subnet>;
    fn update_subnet(&self, req: vpc::UpdateSubnetRequest) -> ApiFuture<'_, Operation>;
    fn delete_subnet(&self, req: vpc::DeleteSubnetRequest) -> ApiFuture<'_, Operation>;
}

pub trait PostgresApi: Send + Sync {
    fn create_cluster(&self, req: mdb::CreateClusterRequest) -> ApiFuture<'_, Operation>;
    fn get_cluster(&self, req: mdb::GetClusterRequest) -> ApiFuture<'_, mdb::Cluster>;
    fn update_cluster(&self, req: mdb::UpdateClusterRequest) -> ApiFuture<'_, Operation>;
    fn delete_cluster(&self, req: mdb::DeleteClusterRequest) -> ApiFuture<'_, Operation>;
}

pub trait IamApi: Send + Sync {
    fn create_service_account(
        &self,
        req: iam::CreateServiceAccountRequest,
    ) -> ApiFuture<'_, Operation>;
    fn get_service_account(
        &self,
        req: iam::GetServiceAccountRequest,
    ) -> ApiFuture<'_, iam::ServiceAccount>;
    fn update_service_account(
        &self,
        req: iam::UpdateServiceAccountRequest,
    ) -> ApiFuture<'_, Operation>;
    fn delete_service_account(
        &self,
        req: iam::DeleteServiceAccountRequest,
    ) -> ApiFuture<'_, Operation>;
}

pub trait StorageApi: Send + Sync {
    fn create_bucket(&self, req: storage::CreateBucketRequest) -> ApiFuture<'_, Operation>;
    fn get_bucket(&self, req: storage::GetBucketRequest) -> ApiFuture<'_, storage::Bucket>;
    fn update_bucket(&self, req: storage::UpdateBucketRequest) -> ApiFuture<'_, Operation>;
    fn delete_bucket(&self, req: storage::DeleteBucketRequest) -> ApiFuture<'_, Operation>;
}

pub trait TriggerApi: Send + Sync {
    fn create_trigger(&self, req: triggers::CreateTriggerRequest) -> ApiFuture<'_, Operation>;
    fn get_trigger(&self, req: triggers::GetTriggerRequest) -> ApiFuture<'_, triggers::Trigger>;
    fn update_trigger(&self, req: triggers::UpdateTriggerRequest) -> ApiFuture<'_, Operation>;
    fn delete_trigger(&self, req: triggers::DeleteTriggerRequest) -> ApiFuture<'_, Operation>;
}
