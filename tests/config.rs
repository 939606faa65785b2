use cubestats::config::{ConfigError, EngineConfig};

#[test]
fn default_catalogue_is_world_continental_national() {
    let config = EngineConfig::default();
    config.validate().unwrap();

    let labels: Vec<&str> = config
        .active_record_types()
        .iter()
        .map(|rt| rt.label.as_str())
        .collect();
    assert_eq!(labels, vec!["WR", "CR", "NR"]);
    assert_eq!(config.record_type("NR").map(|rt| rt.id), Some(3));
    assert!(config.record_type("ER").is_none());
}

#[test]
fn json_catalogue_orders_active_types_by_scope() {
    let json = r#"{
        "record_types": [
            { "id": 3, "label": "NR", "scope_rank": 2, "active": true },
            { "id": 1, "label": "WR", "scope_rank": 0, "active": true },
            { "id": 4, "label": "OR", "scope_rank": 1, "active": false }
        ]
    }"#;

    let config = EngineConfig::from_json_str(json).unwrap();
    let ids: Vec<u32> = config.active_record_types().iter().map(|rt| rt.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(config.record_types.len(), 3);
}

#[test]
fn invalid_catalogues_are_rejected() {
    let duplicate_id = r#"{ "record_types": [
        { "id": 1, "label": "WR", "scope_rank": 0, "active": true },
        { "id": 1, "label": "CR", "scope_rank": 1, "active": true }
    ] }"#;
    assert!(matches!(
        EngineConfig::from_json_str(duplicate_id),
        Err(ConfigError::DuplicateId(1))
    ));

    let duplicate_label = r#"{ "record_types": [
        { "id": 1, "label": "WR", "scope_rank": 0, "active": true },
        { "id": 2, "label": "WR", "scope_rank": 1, "active": true }
    ] }"#;
    assert!(matches!(
        EngineConfig::from_json_str(duplicate_label),
        Err(ConfigError::DuplicateLabel(label)) if label == "WR"
    ));

    let empty_label = r#"{ "record_types": [
        { "id": 5, "label": "  ", "scope_rank": 0, "active": true }
    ] }"#;
    assert!(matches!(
        EngineConfig::from_json_str(empty_label),
        Err(ConfigError::EmptyLabel(5))
    ));

    assert!(matches!(
        EngineConfig::from_json_str("{ \"record_types\": 7 }"),
        Err(ConfigError::Parse(_))
    ));
}
