use dash_kernel::module::ModuleError;
use std::borrow::Cow;

/// A specialized [`DashError`] enum of this crate.
#[dash_derive::dash_error]
pub enum DashError {
    /// A module could not attach to the bus.
    #[error("Module error{}: {source}", format_context(.context))]
    Module { source: ModuleError, context: Option<Cow<'static, str>> },
}
