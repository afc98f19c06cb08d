use std::{
    collections::HashMap,
    env,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use super::*;

fn temp_config(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("game_listing_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("listing.toml");
    fs::write(&path, contents).expect("write config");
    path
}

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn missing_file_and_env_yield_defaults() {
    let path = env::temp_dir().join("game_listing_config_absent/listing.toml");
    let settings = load_settings_with(&path, env_of(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_override_defaults_and_env_overrides_file() {
    let path = temp_config(
        r#"
api_base_url = "https://games.example.com/api/"
page_size = 20
featured_limit = 4
today_grouped = true
"#,
    );

    let settings = load_settings_with(&path, env_of(&[("APP__PAGE_SIZE", "30")])).expect("settings");
    assert_eq!(settings.api_base_url, "https://games.example.com/api");
    assert_eq!(settings.page_size, 30);
    assert_eq!(settings.featured_limit, 4);
    assert_eq!(settings.snapshot_page_size, 10_000);
    assert!(settings.today_grouped);
    assert_eq!(
        settings.listing_settings().today_grouping,
        GroupingMode::ByDate
    );

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn app_prefixed_base_url_wins_over_legacy_name() {
    let path = env::temp_dir().join("game_listing_config_absent/listing.toml");
    let settings = load_settings_with(
        &path,
        env_of(&[
            ("LISTING_API_BASE_URL", "http://legacy:5000/api"),
            ("APP__API_BASE_URL", "http://primary:5000/api"),
            ("APP__TODAY_GROUPED", "yes"),
            ("APP__REQUEST_TIMEOUT_SECS", "3"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.api_base_url, "http://primary:5000/api");
    assert!(settings.today_grouped);
    assert_eq!(settings.request_timeout(), Duration::from_secs(3));
}

#[test]
fn invalid_values_are_reported() {
    let path = env::temp_dir().join("game_listing_config_absent/listing.toml");

    let err = load_settings_with(&path, env_of(&[("APP__PAGE_SIZE", "many")]))
        .expect_err("bad page size");
    assert!(matches!(err, ConfigError::InvalidEnv { key: "APP__PAGE_SIZE", .. }));

    let err = load_settings_with(&path, env_of(&[("APP__API_BASE_URL", "ftp://catalog")]))
        .expect_err("bad scheme");
    assert!(matches!(err, ConfigError::BaseUrl(_)));

    let bad_file = temp_config("page_size = \"fifteen\"");
    let err = load_settings_with(&bad_file, env_of(&[])).expect_err("bad file");
    assert!(matches!(err, ConfigError::Parse { .. }));
    fs::remove_dir_all(bad_file.parent().expect("parent")).expect("cleanup");
}
