use crate::test_helpers::{date, env, id};
use crate::{AppConfig, ConfigError, Tab, TabBar};

const CONFIG: &str = r#"
selected_tab = "crono"

[[alarms]]
id = "00000000-0000-0000-0000-000000000001"
date = "2015-01-01T07:30:00.000+00:00"
is_on = true

[[alarms]]
date = "2015-01-02T08:00:00+01:00"
"#;

#[test]
fn parse() {
    let config = AppConfig::from_toml_str(CONFIG).unwrap();
    assert_eq!(config.selected_tab, Tab::Crono);
    assert_eq!(config.alarms.len(), 2);
    assert_eq!(config.alarms[0].id, Some(id(1)));
    assert!(config.alarms[0].is_on);
    assert_eq!(config.alarms[1].id, None);
    assert!(!config.alarms[1].is_on);
    assert_eq!(config.alarms[1].date, date("2015-01-02T08:00:00+01:00"));
}

#[test]
fn empty_config_uses_defaults() {
    let config = AppConfig::from_toml_str("").unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.selected_tab, Tab::Alarms);
}

#[test]
fn unknown_field_is_an_error() {
    let e = AppConfig::from_toml_str("theme = \"dark\"").unwrap_err();
    assert!(matches!(e, ConfigError::Parse(_)));
    assert!(e.to_string().starts_with("invalid config: "));
}

#[test]
fn bad_date_is_an_error() {
    let e = AppConfig::from_toml_str("[[alarms]]\ndate = \"tomorrow\"").unwrap_err();
    assert!(matches!(e, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_an_error() {
    let e = AppConfig::load("/nonexistent/alarm-routing.toml").unwrap_err();
    assert!(matches!(e, ConfigError::Io { .. }));
    assert!(e.to_string().contains("/nonexistent/alarm-routing.toml"));
}

#[test]
fn to_toml_and_back() {
    let config = AppConfig::from_toml_str(CONFIG).unwrap();
    let s = config.to_toml_string().unwrap();
    assert_eq!(AppConfig::from_toml_str(&s).unwrap(), config);
}

#[test]
fn tab_bar_from_config() {
    let config = AppConfig::from_toml_str(CONFIG).unwrap();
    let tab_bar = TabBar::from_config(&config, env(50));
    assert_eq!(tab_bar.selected_tab(), Tab::Crono);
    assert_eq!(tab_bar.alarms().ids(), vec![id(1), id(50)]);
    assert_eq!(tab_bar.alarms().route(), None);
}
