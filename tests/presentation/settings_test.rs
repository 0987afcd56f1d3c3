use deepscan::presentation::config::{Environment, Settings, SettingsError};

#[test]
fn given_no_configuration_when_using_defaults_then_service_settings_are_complete() {
    let settings = Settings::default();

    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.video.allowed_sequence_lengths, vec![10, 20, 40, 60, 80, 100]);
    assert_eq!(settings.video.face_padding, 40);
    assert_eq!(settings.video.image_size, 112);
    assert_eq!(settings.audio.temperature, 3.0);
    assert_eq!(settings.audio.max_file_size_mb, 50);
    assert_eq!(
        settings.audio.model_id,
        "MelodyMachine/Deepfake-audio-detection-V2"
    );
    assert!(settings.validate().is_ok());
}

#[test]
fn given_frontend_url_when_listing_origins_then_appended_to_dev_origins() {
    let mut settings = Settings::default();
    settings.cors.frontend_url = Some(" https://app.example.com ".to_string());

    let origins = settings.cors.allowed_origins();

    assert_eq!(origins.len(), 5);
    assert!(origins.contains(&"http://localhost:5173".to_string()));
    assert_eq!(origins.last().unwrap(), "https://app.example.com");
}

#[test]
fn given_blank_frontend_url_when_listing_origins_then_ignored() {
    let mut settings = Settings::default();
    settings.cors.frontend_url = Some("   ".to_string());

    assert_eq!(settings.cors.allowed_origins().len(), 4);
}

#[test]
fn given_non_positive_temperature_when_validating_then_rejected() {
    let mut settings = Settings::default();
    settings.audio.temperature = 0.0;

    let err = settings.validate().unwrap_err();

    assert!(matches!(
        err,
        SettingsError::Invalid {
            key: "audio.temperature",
            ..
        }
    ));
}

#[test]
fn given_empty_sequence_lengths_when_validating_then_rejected() {
    let mut settings = Settings::default();
    settings.video.allowed_sequence_lengths.clear();

    assert!(settings.validate().is_err());
}

#[test]
fn given_upload_limit_in_megabytes_when_converting_then_returns_bytes() {
    let mut settings = Settings::default();
    settings.server.max_upload_mb = 2;

    assert_eq!(settings.max_upload_bytes(), 2 * 1024 * 1024);
}

#[test]
fn given_environment_names_when_parsing_then_aliases_are_accepted() {
    assert_eq!(
        Environment::try_from("PRODUCTION".to_string()).unwrap(),
        Environment::Prod
    );
    assert_eq!(Environment::try_from("local".to_string()).unwrap(), Environment::Local);
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_naming_settings_file_then_uses_lowercase_stage() {
    assert_eq!(Environment::Prod.settings_file(), "appsettings.prod");
    assert_eq!(Environment::default(), Environment::Local);
}

#[test]
fn given_list_variables_when_loading_from_environment_then_values_are_split_on_commas() {
    let vars = config::Map::from([
        (
            "APP_VIDEO__ALLOWED_SEQUENCE_LENGTHS".to_string(),
            "10,30".to_string(),
        ),
        (
            "APP_CORS__DEV_ORIGINS".to_string(),
            "http://a.test,http://b.test".to_string(),
        ),
        ("APP_AUDIO__TEMPERATURE".to_string(), "2.5".to_string()),
    ]);

    let settings = Settings::from_sources(Environment::Test, Some(vars)).unwrap();

    assert_eq!(settings.video.allowed_sequence_lengths, vec![10, 30]);
    assert_eq!(
        settings.cors.dev_origins,
        vec!["http://a.test".to_string(), "http://b.test".to_string()]
    );
    assert_eq!(settings.audio.temperature, 2.5);
    assert!(settings.validate().is_ok());
}
