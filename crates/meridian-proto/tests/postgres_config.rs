//! Dynamic field access against the real PostgreSQL settings message.

use meridian_dynamic::{DynamicMessage, FieldError, Scalar, ValueKind, NAME_KEY};
use meridian_proto::mdb::{PostgresConfig, TransactionIsolation};
use meridian_proto::Int64Value;

#[test]
fn isolation_level_is_a_plain_enum_field() {
    let mut config = PostgresConfig::default();
    config
        .set_int(
            "default_transaction_isolation",
            Some(TransactionIsolation::Serializable as i64),
        )
        .unwrap();
    assert_eq!(
        config.default_transaction_isolation,
        TransactionIsolation::Serializable as i32
    );
    assert_eq!(
        config.get_scalar("default_transaction_isolation").unwrap(),
        Some(Scalar::Int(4))
    );
}

#[test]
fn lock_timeout_populates_the_wrapper() {
    let mut config = PostgresConfig::default();
    config.set_int("lock_timeout", Some(7)).unwrap();
    assert_eq!(config.lock_timeout, Some(Int64Value { value: 7 }));
    assert_eq!(
        config.get_scalar("lock_timeout").unwrap(),
        Some(Scalar::Int(7))
    );
}

#[test]
fn clearing_temp_file_limit_nils_the_wrapper() {
    let mut config = PostgresConfig {
        temp_file_limit: Some(Int64Value { value: 10 }),
        ..Default::default()
    };
    config.set_int("temp_file_limit", None).unwrap();
    assert_eq!(config.temp_file_limit, None);
    assert_eq!(config.get_scalar("temp_file_limit").unwrap(), None);
}

#[test]
fn plain_fields_reject_nil() {
    let mut config = PostgresConfig::default();
    let err = config
        .set_int("default_transaction_isolation", None)
        .unwrap_err();
    assert!(matches!(err, FieldError::NilNotAllowed { .. }));
    assert_eq!(config.default_transaction_isolation, 0);
}

#[test]
fn settings_surface_is_fully_described() {
    let fields = PostgresConfig::describe_fields(NAME_KEY);
    assert_eq!(fields.len(), 10);
    assert!(fields["max_connections"].nullable);
    assert_eq!(fields["search_path"].value_type, ValueKind::String);
    assert!(!fields["search_path"].nullable);
    assert_eq!(
        fields["autovacuum_vacuum_scale_factor"].value_type,
        ValueKind::Float
    );
}

#[test]
fn wrapper_fields_survive_the_wire() {
    use prost::Message;

    let mut config = PostgresConfig::default();
    config.set_int("max_connections", Some(100)).unwrap();
    config.set_bool("log_connections", Some(true)).unwrap();
    config.set_float("checkpoint_completion_target", Some(0.9)).unwrap();

    let bytes = config.encode_to_vec();
    let decoded = PostgresConfig::decode(bytes.as_slice()).unwrap();
    assert_eq!(decoded, config);
    // An untouched wrapper stays absent, not zero.
    assert_eq!(decoded.lock_timeout, None);
}
