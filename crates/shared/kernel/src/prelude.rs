//! Everything a module needs to talk to the bus.

pub use crate::bus::{AppBus, AppBusExt, AppSubscriber};
pub use crate::module::{Module, ModuleError, ModuleErrorExt, Subscriptions};
pub use dash_domain::constants::*;
pub use dash_domain::events::AppEvent;
pub use dash_domain::model::{NotificationId, Severity, Theme, User, UserId, View};
pub use dash_event_bus::{DeliveryReport, EventBusError, HandlerResult, Subscriber};
