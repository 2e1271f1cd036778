use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_keep_two_second_saved_affordance() {
    let settings = EditorSettings::default();
    assert_eq!(settings.saved_affordance(), Duration::from_secs(2));
    assert_eq!(settings.api_token, None);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = EditorSettings::default();
    apply_file(
        &mut settings,
        r#"
graphql_url = "https://api.example/graphql"
request_timeout_secs = 5
"#,
    )
    .expect("parse settings");

    assert_eq!(settings.graphql_url, "https://api.example/graphql");
    assert_eq!(settings.request_timeout_secs, 5);
    assert_eq!(settings.saved_affordance_ms, 2000);
}

#[test]
fn app_prefixed_env_wins_over_legacy_names() {
    let mut settings = EditorSettings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("EVENTS_GRAPHQL_URL", "https://legacy.example/graphql"),
            ("APP__GRAPHQL_URL", "https://app.example/graphql"),
            ("EVENTS_API_TOKEN", "secret"),
            ("APP__SAVED_AFFORDANCE_MS", "0"),
        ]),
    )
    .expect("apply env");

    assert_eq!(settings.graphql_url, "https://app.example/graphql");
    assert_eq!(settings.api_token.as_deref(), Some("secret"));
    assert_eq!(settings.saved_affordance_ms, 0);
}

#[test]
fn invalid_numeric_env_is_reported() {
    let mut settings = EditorSettings::default();
    let err = apply_env(
        &mut settings,
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    )
    .expect_err("invalid timeout");
    assert!(matches!(
        err,
        SettingsError::InvalidEnv {
            key: "APP__REQUEST_TIMEOUT_SECS",
            ..
        }
    ));
}

#[test]
fn malformed_settings_file_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("editor.toml");
    fs::write(&path, "graphql_url = [").expect("write settings");

    let err = load_settings(Some(&path)).expect_err("parse failure");
    assert!(matches!(err, SettingsError::Parse { .. }));
}
