//! PostgreSQL cluster handler: the settings map end to end.

mod common;

use std::sync::Arc;

use meridian_provider::{Provider, ProviderError, ResourceData};
use meridian_proto::mdb::TransactionIsolation;
use serde_json::{json, Value};

use common::{fake_config, FakeCloud};

fn data_from(value: Value) -> ResourceData {
    let Value::Object(map) = value else {
        panic!("config must be an object");
    };
    ResourceData::from_config(map)
}

fn harness() -> (Arc<FakeCloud>, Provider) {
    let fake = Arc::new(FakeCloud::default());
    let provider = Provider::with_builtin_resources(fake_config(&fake));
    (fake, provider)
}

fn cluster_config(settings: Value) -> Value {
    json!({
        "name": "orders-db",
        "environment": "PRODUCTION",
        "network_id": "net-1",
        "version": "16",
        "resource_preset_id": "s3.medium",
        "disk_size": 100,
        "settings": settings,
    })
}

#[tokio::test]
async fn create_sends_wrappers_for_explicit_settings_only() {
    let (fake, provider) = harness();
    let mut data = data_from(cluster_config(json!({
        "default_transaction_isolation": "TRANSACTION_ISOLATION_SERIALIZABLE",
        "lock_timeout": "7",
        "temp_file_limit": "",
        "search_path": "public",
    })));
    provider
        .create("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap();

    let create = fake.last_cluster_create.lock().unwrap().clone().unwrap();
    let pg = create.config.unwrap().postgres_config.unwrap();
    assert_eq!(
        pg.default_transaction_isolation,
        TransactionIsolation::Serializable as i32
    );
    assert_eq!(pg.lock_timeout.map(|w| w.value), Some(7));
    // Explicitly reset and never-mentioned settings are both absent.
    assert_eq!(pg.temp_file_limit, None);
    assert_eq!(pg.max_connections, None);
    assert_eq!(pg.search_path, "public");

    // State mirrors the configured keys, nothing more.
    let settings = data.state_value("settings").unwrap().as_object().unwrap();
    assert_eq!(settings.len(), 4);
    assert_eq!(settings["lock_timeout"], "7");
    assert_eq!(settings["temp_file_limit"], "");
}

#[tokio::test]
async fn unknown_setting_fails_before_any_call() {
    let (fake, provider) = harness();
    let mut data = data_from(cluster_config(json!({"shared_buffers": "1024"})));
    let err = provider
        .create("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Field(_)));
    assert!(fake.last_cluster_create.lock().unwrap().is_none());
}

#[tokio::test]
async fn settings_change_masks_the_config_subtree() {
    let (fake, provider) = harness();
    let mut data = data_from(cluster_config(json!({"lock_timeout": "7"})));
    provider
        .create("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap();
    let id = data.id().unwrap().to_owned();

    let mut data = data_from(cluster_config(json!({"lock_timeout": "9"})));
    data.set_id(id);
    provider
        .read("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap();
    provider
        .update("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap();

    let update = fake.last_cluster_update.lock().unwrap().clone().unwrap();
    assert_eq!(
        update.update_mask.unwrap().paths,
        vec!["config.postgres_config".to_owned()]
    );
    let pg = update.config.unwrap().postgres_config.unwrap();
    assert_eq!(pg.lock_timeout.map(|w| w.value), Some(9));
    let settings = data.state_value("settings").unwrap().as_object().unwrap();
    assert_eq!(settings["lock_timeout"], "9");
}

#[tokio::test]
async fn isolation_spelled_by_name_does_not_drift() {
    let (fake, provider) = harness();
    let mut data = data_from(cluster_config(
        json!({"default_transaction_isolation": "TRANSACTION_ISOLATION_SERIALIZABLE"}),
    ));
    provider
        .create("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap();
    let id = data.id().unwrap().to_owned();

    // Same configuration again: the flattened numeric form must compare
    // equal to the symbolic spelling.
    let mut data = data_from(cluster_config(
        json!({"default_transaction_isolation": "TRANSACTION_ISOLATION_SERIALIZABLE"}),
    ));
    data.set_id(id);
    provider
        .read("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap();
    provider
        .update("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap();
    assert!(fake.last_cluster_update.lock().unwrap().is_none());
}

#[tokio::test]
async fn resize_masks_resources() {
    let (fake, provider) = harness();
    let mut data = data_from(cluster_config(json!({})));
    provider
        .create("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap();
    let id = data.id().unwrap().to_owned();
    assert_eq!(data.get_i64("disk_size"), Some(100));

    let mut changed = cluster_config(json!({}));
    changed["disk_size"] = json!(200);
    let mut data = data_from(changed);
    data.set_id(id);
    provider
        .read("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap();
    provider
        .update("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap();

    let update = fake.last_cluster_update.lock().unwrap().clone().unwrap();
    assert_eq!(
        update.update_mask.unwrap().paths,
        vec!["config.resources".to_owned()]
    );
    assert_eq!(
        update.config.unwrap().resources.unwrap().disk_size,
        200 << 30
    );
    assert_eq!(data.get_i64("disk_size"), Some(200));
}

#[tokio::test]
async fn environment_must_be_a_known_name() {
    let (_fake, provider) = harness();
    let mut config = cluster_config(json!({}));
    config["environment"] = json!("STAGING");
    let mut data = data_from(config);
    let err = provider
        .create("meridian_mdb_postgres_cluster", &mut data)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Validation(msg) if msg.contains("STAGING")));
}
