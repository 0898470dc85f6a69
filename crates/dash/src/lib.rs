//! Facade crate for the dashboard.
//! Re-exports the shared crates and provides [`Dashboard`], the composition
//! root that creates the event bus and wires every module to it.
//! Keep this crate thin: it composes modules, it does not implement them.
//!
//! ## Usage
//! ```rust
//! use dash::Dashboard;
//! use dash::domain::model::View;
//!
//! let dashboard = Dashboard::builder().build();
//! dashboard.mount().unwrap();
//!
//! let users = dashboard.users().unwrap();
//! users.create("Ada", "ada@example.com").unwrap();
//! dashboard.theme().toggle();
//! dashboard.navigate(View::Analytics);
//!
//! assert_eq!(dashboard.analytics().unwrap().snapshot().user_count, 3);
//! assert_eq!(dashboard.unmount(), 0);
//! ```

mod activity;
mod dashboard;
mod error;
mod theme;

pub use crate::activity::{ACTIVITY_CAPACITY, ActivityLog};
pub use crate::dashboard::{Dashboard, DashboardBuilder, DashboardSummary};
pub use crate::error::{DashError, DashErrorExt};
pub use crate::theme::ThemeProvider;

pub use dash_domain as domain;
pub use dash_event_bus as events;
pub use dash_kernel as kernel;

/// Module crates, for direct access to their types.
pub mod modules {
    pub use dash_analytics as analytics;
    pub use dash_notifications as notifications;
    pub use dash_users as users;
}
