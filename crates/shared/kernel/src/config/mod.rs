use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix for environment overrides, e.g. `DASH__LOG__LEVEL=debug`.
pub const ENV_PREFIX: &str = "DASH";

#[dash_derive::dash_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration by layering environment overrides on top of an
/// optional file.
///
/// 1. **File**: when `path` is given it must exist; the format follows the
///    extension (`.toml`, `.json`, `.yaml`, ...).
/// 2. **Environment**: variables prefixed with `DASH__`; nested keys use a
///    double underscore (`DASH__NOTIFICATIONS__DISMISS_AFTER_SECS=10`).
///
/// Without a file, `T` is built from its serde defaults plus the environment.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or unreadable, or if
/// the merged values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use dash_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = &path {
        let path: &Path = path.as_ref();
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    } else {
        info!("No config file given; using defaults and {ENV_PREFIX}__ overrides");
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
