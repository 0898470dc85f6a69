#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared across the dashboard workspace.
//!
//! * [`macro@dash_error`] turns a plain enum into an error type wired for
//!   `?`-propagation and contextual messages.
//! * [`macro@dash_module`] turns a struct into a cheaply cloneable module handle.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! dash-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source type.
/// * **Conversions**: Implements `From<Source>` for variants with a `source` field
///   (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. Applies to enums only.
/// 2. Every variant uses named fields; tuple and unit variants are rejected.
/// 3. A variant with a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use dash_derive::dash_error;
/// use std::borrow::Cow;
///
/// #[dash_error]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Settings, ConfigError> {
///     builder.build().context("Building layered config")?; // wraps config::ConfigError
///     Err("no sources".into()) // Internal via From<&str>
/// }
/// ```
#[proc_macro_attribute]
pub fn dash_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro for module state shared between clones.
///
/// The annotated struct becomes `<Name>Inner` (with `Debug` derived) and a new
/// `<Name>` handle wraps it in an `Arc`, dereferencing to the inner struct.
/// The handle gets a private `from_inner` constructor.
///
/// # Example
///
/// ```rust,ignore
/// #[dash_derive::dash_module]
/// pub struct Analytics {
///     bus: AppBus,
///     state: RwLock<AnalyticsSnapshot>,
/// }
///
/// let analytics = Analytics::from_inner(AnalyticsInner { bus, state });
/// let clone = analytics.clone(); // same state
/// ```
#[proc_macro_attribute]
pub fn dash_module(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::module::expand_module(input).into()
}
