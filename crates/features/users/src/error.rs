use std::borrow::Cow;

/// A specialized [`UsersError`] enum of this crate.
#[dash_derive::dash_error]
pub enum UsersError {
    /// Rejected input (empty name, malformed email).
    #[error("Invalid user{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("User not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl UsersError {
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    pub(crate) fn not_found(id: &impl std::fmt::Display) -> Self {
        Self::NotFound { message: id.to_string().into(), context: None }
    }
}
