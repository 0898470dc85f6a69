//! # Domain Models
//!
//! Plain data shared by the event bus consumers: the [`AppEvent`](events::AppEvent)
//! payload enum, the user/theme/notification vocabulary, and the deserialized
//! configuration. Depends on `serde` and `bitflags` only; no I/O and no logic
//! beyond small helpers.

pub mod config;
pub mod constants;
pub mod events;
pub mod model;
pub mod modules;
