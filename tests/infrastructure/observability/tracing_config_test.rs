use deepscan::infrastructure::observability::{DEFAULT_FILTER, TracingConfig};

#[test]
fn given_no_filter_when_creating_config_then_uses_default_filter() {
    let config = TracingConfig::new("local", false, None);

    assert_eq!(config.filter, DEFAULT_FILTER);
    assert_eq!(config.environment, "local");
}

#[test]
fn given_blank_filter_when_creating_config_then_falls_back_to_default() {
    let config = TracingConfig::new("prod", false, Some("  "));

    assert_eq!(config.filter, DEFAULT_FILTER);
}

#[test]
fn given_custom_filter_and_json_when_creating_config_then_both_are_kept() {
    let config = TracingConfig::new("prod", true, Some("warn"));

    assert_eq!(config.filter, "warn");
    assert!(config.json_format);
}

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
}
