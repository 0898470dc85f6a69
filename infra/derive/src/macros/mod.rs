pub mod error;
pub mod module;
