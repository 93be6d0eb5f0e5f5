//! In-process control plane fake backing the lifecycle tests.
//!
//! Every mutating call completes its operation immediately, so `wait`
//! returns on the first check. Requests that matter to assertions are
//! recorded verbatim.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use meridian_client::api::{
    BoxFuture, ComputeApi, IamApi, OperationApi, PostgresApi, StorageApi, TriggerApi, VpcApi,
};
use meridian_client::{operation, ApiError};
use meridian_proto::operation::Operation;
use meridian_proto::{compute, iam, mdb, storage, triggers, vpc};
use meridian_provider::ProviderConfig;

const CREATED_AT: i64 = 1_700_000_000;

fn created_at() -> Option<prost_types::Timestamp> {
    Some(prost_types::Timestamp {
        seconds: CREATED_AT,
        nanos: 0,
    })
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        method: "fake",
        code: tonic::Code::NotFound,
        message: format!("{what} not found"),
        request_id: None,
    }
}

fn done_op(metadata: prost_types::Any) -> Operation {
    Operation {
        id: "op-fake".into(),
        done: true,
        metadata: Some(metadata),
        ..Default::default()
    }
}

#[derive(Default)]
pub struct FakeCloud {
    counter: AtomicU64,
    pub instances: Mutex<HashMap<String, compute::Instance>>,
    pub networks: Mutex<HashMap<String, vpc::Network>>,
    pub subnets: Mutex<HashMap<String, vpc::Subnet>>,
    pub accounts: Mutex<HashMap<String, iam::ServiceAccount>>,
    pub buckets: Mutex<HashMap<String, storage::Bucket>>,
    pub clusters: Mutex<HashMap<String, mdb::Cluster>>,
    pub triggers: Mutex<HashMap<String, triggers::Trigger>>,
    pub last_instance_update: Mutex<Option<compute::UpdateInstanceRequest>>,
    pub last_cluster_create: Mutex<Option<mdb::CreateClusterRequest>>,
    pub last_cluster_update: Mutex<Option<mdb::UpdateClusterRequest>>,
    pub last_bucket_update: Mutex<Option<storage::UpdateBucketRequest>>,
}

impl FakeCloud {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// A provider configuration with every service family pointed at `fake`.
pub fn fake_config(fake: &Arc<FakeCloud>) -> ProviderConfig {
    ProviderConfig {
        folder_id: "folder-test".into(),
        zone: "m1-a".into(),
        compute: fake.clone(),
        vpc: fake.clone(),
        postgres: fake.clone(),
        iam: fake.clone(),
        storage: fake.clone(),
        triggers: fake.clone(),
        operations: fake.clone(),
    }
}

impl OperationApi for FakeCloud {
    fn get<'a>(&'a self, operation_id: &'a str) -> BoxFuture<'a, Result<Operation, ApiError>> {
        Box::pin(async move {
            Ok(Operation {
                id: operation_id.to_owned(),
                done: true,
                ..Default::default()
            })
        })
    }
}

impl ComputeApi for FakeCloud {
    fn create_instance(
        &self,
        req: compute::CreateInstanceRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            let id = self.next_id("inst");
            let boot_disk = req.boot_disk_spec.as_ref().map(|spec| compute::AttachedDisk {
                disk_id: self.next_id("disk"),
                auto_delete: spec.auto_delete,
            });
            let network_interfaces = req
                .network_interface_specs
                .iter()
                .enumerate()
                .map(|(i, spec)| compute::NetworkInterface {
                    index: i.to_string(),
                    subnet_id: spec.subnet_id.clone(),
                    ip_address: format!("10.0.0.{}", i + 10),
                    nat: spec.nat,
                })
                .collect();
            let instance = compute::Instance {
                id: id.clone(),
                folder_id: req.folder_id,
                created_at: created_at(),
                name: req.name.clone(),
                description: req.description,
                labels: req.labels,
                zone_id: req.zone_id,
                platform_id: req.platform_id,
                resources: req.resources_spec,
                status: compute::InstanceStatus::Running as i32,
                boot_disk,
                network_interfaces,
                fqdn: format!("{}.internal.meridian.cloud.", req.name),
            };
            self.instances.lock().unwrap().insert(id.clone(), instance);
            Ok(done_op(operation::pack(
                "meridian.compute.v1.CreateInstanceMetadata",
                &compute::CreateInstanceMetadata { instance_id: id },
            )))
        })
    }

    fn get_instance(
        &self,
        req: compute::GetInstanceRequest,
    ) -> BoxFuture<'_, Result<compute::Instance, ApiError>> {
        Box::pin(async move {
            self.instances
                .lock()
                .unwrap()
                .get(&req.instance_id)
                .cloned()
                .ok_or_else(|| not_found("instance"))
        })
    }

    fn update_instance(
        &self,
        req: compute::UpdateInstanceRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            {
                let mut instances = self.instances.lock().unwrap();
                let instance = instances
                    .get_mut(&req.instance_id)
                    .ok_or_else(|| not_found("instance"))?;
                let paths = req
                    .update_mask
                    .as_ref()
                    .map(|mask| mask.paths.clone())
                    .unwrap_or_default();
                for path in &paths {
                    match path.as_str() {
                        "name" => instance.name = req.name.clone(),
                        "description" => instance.description = req.description.clone(),
                        "labels" => instance.labels = req.labels.clone(),
                        _ => {}
                    }
                }
            }
            let id = req.instance_id.clone();
            *self.last_instance_update.lock().unwrap() = Some(req);
            Ok(done_op(operation::pack(
                "meridian.compute.v1.UpdateInstanceMetadata",
                &compute::UpdateInstanceMetadata { instance_id: id },
            )))
        })
    }

    fn delete_instance(
        &self,
        req: compute::DeleteInstanceRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            self.instances
                .lock()
                .unwrap()
                .remove(&req.instance_id)
                .ok_or_else(|| not_found("instance"))?;
            Ok(done_op(operation::pack(
                "meridian.compute.v1.DeleteInstanceMetadata",
                &compute::DeleteInstanceMetadata {
                    instance_id: req.instance_id,
                },
            )))
        })
    }

    fn list_instances(
        &self,
        req: compute::ListInstancesRequest,
    ) -> BoxFuture<'_, Result<compute::ListInstancesResponse, ApiError>> {
        Box::pin(async move {
            let instances = self
                .instances
                .lock()
                .unwrap()
                .values()
                .filter(|inst| inst.folder_id == req.folder_id)
                .cloned()
                .collect();
            Ok(compute::ListInstancesResponse {
                instances,
                next_page_token: String::new(),
            })
        })
    }
}

impl VpcApi for FakeCloud {
    fn create_network(
        &self,
        req: vpc::CreateNetworkRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            let id = self.next_id("net");
            let network = vpc::Network {
                id: id.clone(),
                folder_id: req.folder_id,
                created_at: created_at(),
                name: req.name,
                description: req.description,
                labels: req.labels,
            };
            self.networks.lock().unwrap().insert(id.clone(), network);
            Ok(done_op(operation::pack(
                "meridian.vpc.v1.CreateNetworkMetadata",
                &vpc::CreateNetworkMetadata { network_id: id },
            )))
        })
    }

    fn get_network(
        &self,
        req: vpc::GetNetworkRequest,
    ) -> BoxFuture<'_, Result<vpc::Network, ApiError>> {
        Box::pin(async move {
            self.networks
                .lock()
                .unwrap()
                .get(&req.network_id)
                .cloned()
                .ok_or_else(|| not_found("network"))
        })
    }

    fn update_network(
        &self,
        req: vpc::UpdateNetworkRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            {
                let mut networks = self.networks.lock().unwrap();
                let network = networks
                    .get_mut(&req.network_id)
                    .ok_or_else(|| not_found("network"))?;
                let paths = req
                    .update_mask
                    .as_ref()
                    .map(|mask| mask.paths.clone())
                    .unwrap_or_default();
                for path in &paths {
                    match path.as_str() {
                        "name" => network.name = req.name.clone(),
                        "description" => network.description = req.description.clone(),
                        "labels" => network.labels = req.labels.clone(),
                        _ => {}
                    }
                }
            }
            Ok(done_op(operation::pack(
                "meridian.vpc.v1.CreateNetworkMetadata",
                &vpc::CreateNetworkMetadata {
                    network_id: req.network_id,
                },
            )))
        })
    }

    fn delete_network(
        &self,
        req: vpc::DeleteNetworkRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            self.networks
                .lock()
                .unwrap()
                .remove(&req.network_id)
                .ok_or_else(|| not_found("network"))?;
            Ok(done_op(operation::pack(
                "meridian.vpc.v1.CreateNetworkMetadata",
                &vpc::CreateNetworkMetadata {
                    network_id: req.network_id,
                },
            )))
        })
    }

    fn create_subnet(
        &self,
        req: vpc::CreateSubnetRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            let id = self.next_id("subnet");
            let subnet = vpc::Subnet {
                id: id.clone(),
                folder_id: req.folder_id,
                created_at: created_at(),
                name: req.name,
                description: req.description,
                labels: req.labels,
                network_id: req.network_id,
                zone_id: req.zone_id,
                v4_cidr_blocks: req.v4_cidr_blocks,
            };
            self.subnets.lock().unwrap().insert(id.clone(), subnet);
            Ok(done_op(operation::pack(
                "meridian.vpc.v1.CreateSubnetMetadata",
                &vpc::CreateSubnetMetadata { subnet_id: id },
            )))
        })
    }

    fn get_subnet(
        &self,
        req: vpc::GetSubnetRequest,
    ) -> BoxFuture<'_, Result<vpc::Subnet, ApiError>> {
        Box::pin(async move {
            self.subnets
                .lock()
                .unwrap()
                .get(&req.subnet_id)
                .cloned()
                .ok_or_else(|| not_found("subnet"))
        })
    }

    fn update_subnet(
        &self,
        req: vpc::UpdateSubnetRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            {
                let mut subnets = self.subnets.lock().unwrap();
                let subnet = subnets
                    .get_mut(&req.subnet_id)
                    .ok_or_else(|| not_found("subnet"))?;
                let paths = req
                    .update_mask
                    .as_ref()
                    .map(|mask| mask.paths.clone())
                    .unwrap_or_default();
                for path in &paths {
                    match path.as_str() {
                        "name" => subnet.name = req.name.clone(),
                        "description" => subnet.description = req.description.clone(),
                        "labels" => subnet.labels = req.labels.clone(),
                        _ => {}
                    }
                }
            }
            Ok(done_op(operation::pack(
                "meridian.vpc.v1.CreateSubnetMetadata",
                &vpc::CreateSubnetMetadata {
                    subnet_id: req.subnet_id,
                },
            )))
        })
    }

    fn delete_subnet(
        &self,
        req: vpc::DeleteSubnetRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            self.subnets
                .lock()
                .unwrap()
                .remove(&req.subnet_id)
                .ok_or_else(|| not_found("subnet"))?;
            Ok(done_op(operation::pack(
                "meridian.vpc.v1.CreateSubnetMetadata",
                &vpc::CreateSubnetMetadata {
                    subnet_id: req.subnet_id,
                },
            )))
        })
    }
}

impl IamApi for FakeCloud {
    fn create_service_account(
        &self,
        req: iam::CreateServiceAccountRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            let id = self.next_id("sa");
            let account = iam::ServiceAccount {
                id: id.clone(),
                folder_id: req.folder_id,
                created_at: created_at(),
                name: req.name,
                description: req.description,
                labels: req.labels,
            };
            self.accounts.lock().unwrap().insert(id.clone(), account);
            Ok(done_op(operation::pack(
                "meridian.iam.v1.CreateServiceAccountMetadata",
                &iam::CreateServiceAccountMetadata {
                    service_account_id: id,
                },
            )))
        })
    }

    fn get_service_account(
        &self,
        req: iam::GetServiceAccountRequest,
    ) -> BoxFuture<'_, Result<iam::ServiceAccount, ApiError>> {
        Box::pin(async move {
            self.accounts
                .lock()
                .unwrap()
                .get(&req.service_account_id)
                .cloned()
                .ok_or_else(|| not_found("service account"))
        })
    }

    fn update_service_account(
        &self,
        req: iam::UpdateServiceAccountRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            {
                let mut accounts = self.accounts.lock().unwrap();
                let account = accounts
                    .get_mut(&req.service_account_id)
                    .ok_or_else(|| not_found("service account"))?;
                let paths = req
                    .update_mask
                    .as_ref()
                    .map(|mask| mask.paths.clone())
                    .unwrap_or_default();
                for path in &paths {
                    match path.as_str() {
                        "name" => account.name = req.name.clone(),
                        "description" => account.description = req.description.clone(),
                        "labels" => account.labels = req.labels.clone(),
                        _ => {}
                    }
                }
            }
            Ok(done_op(operation::pack(
                "meridian.iam.v1.CreateServiceAccountMetadata",
                &iam::CreateServiceAccountMetadata {
                    service_account_id: req.service_account_id,
                },
            )))
        })
    }

    fn delete_service_account(
        &self,
        req: iam::DeleteServiceAccountRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            self.accounts
                .lock()
                .unwrap()
                .remove(&req.service_account_id)
                .ok_or_else(|| not_found("service account"))?;
            Ok(done_op(operation::pack(
                "meridian.iam.v1.CreateServiceAccountMetadata",
                &iam::CreateServiceAccountMetadata {
                    service_account_id: req.service_account_id,
                },
            )))
        })
    }
}

impl StorageApi for FakeCloud {
    fn create_bucket(
        &self,
        req: storage::CreateBucketRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            let bucket = storage::Bucket {
                name: req.name.clone(),
                folder_id: req.folder_id,
                created_at: created_at(),
                // The service normalizes storage classes to upper case.
                default_storage_class: req.default_storage_class.to_ascii_uppercase(),
                max_size: req.max_size,
                versioning: storage::Versioning::Disabled as i32,
            };
            self.buckets
                .lock()
                .unwrap()
                .insert(req.name.clone(), bucket);
            Ok(done_op(operation::pack(
                "meridian.storage.v1.CreateBucketMetadata",
                &storage::CreateBucketMetadata { name: req.name },
            )))
        })
    }

    fn get_bucket(
        &self,
        req: storage::GetBucketRequest,
    ) -> BoxFuture<'_, Result<storage::Bucket, ApiError>> {
        Box::pin(async move {
            self.buckets
                .lock()
                .unwrap()
                .get(&req.name)
                .cloned()
                .ok_or_else(|| not_found("bucket"))
        })
    }

    fn update_bucket(
        &self,
        req: storage::UpdateBucketRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            {
                let mut buckets = self.buckets.lock().unwrap();
                let bucket = buckets
                    .get_mut(&req.name)
                    .ok_or_else(|| not_found("bucket"))?;
                let paths = req
                    .update_mask
                    .as_ref()
                    .map(|mask| mask.paths.clone())
                    .unwrap_or_default();
                for path in &paths {
                    match path.as_str() {
                        "default_storage_class" => {
                            bucket.default_storage_class =
                                req.default_storage_class.to_ascii_uppercase();
                        }
                        "max_size" => bucket.max_size = req.max_size,
                        "versioning" => bucket.versioning = req.versioning,
                        _ => {}
                    }
                }
            }
            let name = req.name.clone();
            *self.last_bucket_update.lock().unwrap() = Some(req);
            Ok(done_op(operation::pack(
                "meridian.storage.v1.CreateBucketMetadata",
                &storage::CreateBucketMetadata { name },
            )))
        })
    }

    fn delete_bucket(
        &self,
        req: storage::DeleteBucketRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            self.buckets
                .lock()
                .unwrap()
                .remove(&req.name)
                .ok_or_else(|| not_found("bucket"))?;
            Ok(done_op(operation::pack(
                "meridian.storage.v1.CreateBucketMetadata",
                &storage::CreateBucketMetadata { name: req.name },
            )))
        })
    }
}

impl PostgresApi for FakeCloud {
    fn create_cluster(
        &self,
        req: mdb::CreateClusterRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            let id = self.next_id("pg");
            let cluster = mdb::Cluster {
                id: id.clone(),
                folder_id: req.folder_id.clone(),
                created_at: created_at(),
                name: req.name.clone(),
                description: req.description.clone(),
                labels: req.labels.clone(),
                environment: req.environment,
                network_id: req.network_id.clone(),
                status: mdb::ClusterStatus::Running as i32,
                config: req.config.clone(),
            };
            self.clusters.lock().unwrap().insert(id.clone(), cluster);
            *self.last_cluster_create.lock().unwrap() = Some(req);
            Ok(done_op(operation::pack(
                "meridian.mdb.postgresql.v1.CreateClusterMetadata",
                &mdb::CreateClusterMetadata { cluster_id: id },
            )))
        })
    }

    fn get_cluster(
        &self,
        req: mdb::GetClusterRequest,
    ) -> BoxFuture<'_, Result<mdb::Cluster, ApiError>> {
        Box::pin(async move {
            self.clusters
                .lock()
                .unwrap()
                .get(&req.cluster_id)
                .cloned()
                .ok_or_else(|| not_found("cluster"))
        })
    }

    fn update_cluster(
        &self,
        req: mdb::UpdateClusterRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            {
                let mut clusters = self.clusters.lock().unwrap();
                let cluster = clusters
                    .get_mut(&req.cluster_id)
                    .ok_or_else(|| not_found("cluster"))?;
                let paths = req
                    .update_mask
                    .as_ref()
                    .map(|mask| mask.paths.clone())
                    .unwrap_or_default();
                for path in &paths {
                    match path.as_str() {
                        "name" => cluster.name = req.name.clone(),
                        "description" => cluster.description = req.description.clone(),
                        "labels" => cluster.labels = req.labels.clone(),
                        "config.resources" => {
                            if let (Some(have), Some(want)) = (&mut cluster.config, &req.config) {
                                have.resources = want.resources.clone();
                            }
                        }
                        "config.postgres_config" => {
                            if let (Some(have), Some(want)) = (&mut cluster.config, &req.config) {
                                have.postgres_config = want.postgres_config.clone();
                            }
                        }
                        _ => {}
                    }
                }
            }
            let id = req.cluster_id.clone();
            *self.last_cluster_update.lock().unwrap() = Some(req);
            Ok(done_op(operation::pack(
                "meridian.mdb.postgresql.v1.UpdateClusterMetadata",
                &mdb::UpdateClusterMetadata { cluster_id: id },
            )))
        })
    }

    fn delete_cluster(
        &self,
        req: mdb::DeleteClusterRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            self.clusters
                .lock()
                .unwrap()
                .remove(&req.cluster_id)
                .ok_or_else(|| not_found("cluster"))?;
            Ok(done_op(operation::pack(
                "meridian.mdb.postgresql.v1.CreateClusterMetadata",
                &mdb::CreateClusterMetadata {
                    cluster_id: req.cluster_id,
                },
            )))
        })
    }
}

impl TriggerApi for FakeCloud {
    fn create_trigger(
        &self,
        req: triggers::CreateTriggerRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            let id = self.next_id("trigger");
            let trigger = triggers::Trigger {
                id: id.clone(),
                folder_id: req.folder_id,
                created_at: created_at(),
                name: req.name,
                description: req.description,
                labels: req.labels,
                function_id: req.function_id,
                rule: req.rule,
            };
            self.triggers.lock().unwrap().insert(id.clone(), trigger);
            Ok(done_op(operation::pack(
                "meridian.serverless.v1.CreateTriggerMetadata",
                &triggers::CreateTriggerMetadata { trigger_id: id },
            )))
        })
    }

    fn get_trigger(
        &self,
        req: triggers::GetTriggerRequest,
    ) -> BoxFuture<'_, Result<triggers::Trigger, ApiError>> {
        Box::pin(async move {
            self.triggers
                .lock()
                .unwrap()
                .get(&req.trigger_id)
                .cloned()
                .ok_or_else(|| not_found("trigger"))
        })
    }

    fn update_trigger(
        &self,
        req: triggers::UpdateTriggerRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            {
                let mut trigger_map = self.triggers.lock().unwrap();
                let trigger = trigger_map
                    .get_mut(&req.trigger_id)
                    .ok_or_else(|| not_found("trigger"))?;
                let paths = req
                    .update_mask
                    .as_ref()
                    .map(|mask| mask.paths.clone())
                    .unwrap_or_default();
                for path in &paths {
                    match path.as_str() {
                        "name" => trigger.name = req.name.clone(),
                        "description" => trigger.description = req.description.clone(),
                        "labels" => trigger.labels = req.labels.clone(),
                        _ => {}
                    }
                }
            }
            Ok(done_op(operation::pack(
                "meridian.serverless.v1.CreateTriggerMetadata",
                &triggers::CreateTriggerMetadata {
                    trigger_id: req.trigger_id,
                },
            )))
        })
    }

    fn delete_trigger(
        &self,
        req: triggers::DeleteTriggerRequest,
    ) -> BoxFuture<'_, Result<Operation, ApiError>> {
        Box::pin(async move {
            self.triggers
                .lock()
                .unwrap()
                .remove(&req.trigger_id)
                .ok_or_else(|| not_found("trigger"))?;
            Ok(done_op(operation::pack(
                "meridian.serverless.v1.CreateTriggerMetadata",
                &triggers::CreateTriggerMetadata {
                    trigger_id: req.trigger_id,
                },
            )))
        })
    }
}
