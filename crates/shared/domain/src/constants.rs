//! Well-known event names and module identifiers.

pub const USER_CREATED: &str = "user.created";
pub const USER_UPDATED: &str = "user.updated";
pub const USER_DELETED: &str = "user.deleted";
pub const USER_SELECTED: &str = "user.selected";
pub const DATA_REFRESH: &str = "data.refresh";
pub const NOTIFICATION_SHOW: &str = "notification.show";
pub const NOTIFICATION_CLEAR: &str = "notification.clear";
pub const THEME_CHANGED: &str = "theme.changed";
pub const NAVIGATION_CHANGE: &str = "navigation.change";

/// Parent wildcard covering every `user.*` event.
pub const USER_ANY: &str = "user.*";
/// Parent wildcard covering every `notification.*` event.
pub const NOTIFICATION_ANY: &str = "notification.*";

pub const USERS: &str = "users";
pub const ANALYTICS: &str = "analytics";
pub const NOTIFICATIONS: &str = "notifications";
