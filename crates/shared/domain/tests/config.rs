use dash_domain::config::{DashboardConfig, LogSettings, NotificationSettings, UserSettings};
use dash_domain::model::Theme;
use dash_domain::modules::ModuleSet;
use serde_json::json;
use std::time::Duration;

#[test]
fn config_defaults_are_sane() {
    let log = LogSettings::default();
    assert_eq!(log.name, "dashboard");
    assert_eq!(log.level, "info");
    assert!(log.console);
    assert!(log.path.is_none());

    assert_eq!(NotificationSettings::default().dismiss_after(), Duration::from_secs(5));

    let seed = UserSettings::default().seed;
    assert_eq!(seed.len(), 2);
    assert_eq!(seed[0].name, "John Doe");
    assert_eq!(seed[1].email, "jane@example.com");

    let config = DashboardConfig::default();
    assert_eq!(config.modules, ModuleSet::ALL);
    assert_eq!(config.theme, Theme::Light);
}

#[test]
fn dashboard_config_deserializes_partially() {
    let raw = json!({
        "log": { "level": "debug", "json": true, "path": "/tmp/dash" },
        "modules": ["users", "analytics"],
        "theme": "dark",
        "users": { "seed": [] }
    });

    let config: DashboardConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.log.name, "dashboard", "unset fields keep their defaults");
    assert!(config.log.json);
    assert_eq!(config.modules, ModuleSet::USERS | ModuleSet::ANALYTICS);
    assert_eq!(config.theme, Theme::Dark);
    assert_eq!(config.notifications.dismiss_after_secs, 5);
    assert!(config.users.seed.is_empty());
}

#[test]
fn clones_share_until_mutated() {
    let original = DashboardConfig::default();
    let mut tweaked = original.clone();
    tweaked.theme = Theme::Dark;

    assert_eq!(original.theme, Theme::Light);
    assert_eq!(tweaked.theme, Theme::Dark);
}
