//! The closed set of payloads carried by the dashboard bus.
//!
//! Each variant serializes with a `type` tag equal to the event name it is
//! emitted under, so a serialized event is self-describing.

use crate::constants::{
    DATA_REFRESH, NAVIGATION_CHANGE, NOTIFICATION_CLEAR, NOTIFICATION_SHOW, THEME_CHANGED,
    USER_CREATED, USER_DELETED, USER_SELECTED, USER_UPDATED,
};
use crate::model::{NotificationId, Severity, Theme, User, UserId, View};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AppEvent {
    #[serde(rename = "user.created")]
    UserCreated { user: User },

    #[serde(rename = "user.updated")]
    UserUpdated { user: User },

    #[serde(rename = "user.deleted", rename_all = "camelCase")]
    UserDeleted { user_id: UserId },

    #[serde(rename = "user.selected")]
    UserSelected { user: User },

    #[serde(rename = "data.refresh")]
    DataRefresh,

    #[serde(rename = "notification.show")]
    NotificationShow { message: String, severity: Severity },

    /// `None` clears every notification.
    #[serde(rename = "notification.clear", rename_all = "camelCase")]
    NotificationClear {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notification_id: Option<NotificationId>,
    },

    #[serde(rename = "theme.changed")]
    ThemeChanged { theme: Theme },

    #[serde(rename = "navigation.change")]
    NavigationChange { view: View },
}

impl AppEvent {
    /// The event name this payload is emitted under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UserCreated { .. } => USER_CREATED,
            Self::UserUpdated { .. } => USER_UPDATED,
            Self::UserDeleted { .. } => USER_DELETED,
            Self::UserSelected { .. } => USER_SELECTED,
            Self::DataRefresh => DATA_REFRESH,
            Self::NotificationShow { .. } => NOTIFICATION_SHOW,
            Self::NotificationClear { .. } => NOTIFICATION_CLEAR,
            Self::ThemeChanged { .. } => THEME_CHANGED,
            Self::NavigationChange { .. } => NAVIGATION_CHANGE,
        }
    }

    pub fn notify(message: impl Into<String>, severity: Severity) -> Self {
        Self::NotificationShow { message: message.into(), severity }
    }
}
