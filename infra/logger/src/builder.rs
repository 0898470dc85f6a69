use crate::error::{LoggerError, LoggerErrorExt};
use crate::{Logger, filter};
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug)]
pub(crate) struct LoggerConfig {
    pub(crate) console: bool,
    pub(crate) level: LevelFilter,
    pub(crate) directives: Option<String>,
    pub(crate) file: Option<FileConfig>,
}

#[derive(Debug)]
pub(crate) struct FileConfig {
    pub(crate) dir: PathBuf,
    pub(crate) rotation: Rotation,
    pub(crate) max_files: usize,
    pub(crate) json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { console: true, level: LevelFilter::INFO, directives: None, file: None }
    }
}

/// Marker: the logger has no name yet.
#[derive(Debug)]
pub struct Unnamed;
/// Marker: the logger is named and can be initialized.
#[derive(Debug)]
pub struct Named(String);
/// Marker: console only.
#[derive(Debug)]
pub struct ConsoleOnly;
/// Marker: a log directory was configured; file options are available.
#[derive(Debug)]
pub struct WithFile;

mod sealed {
    pub trait Sealed {}
}
impl sealed::Sealed for Unnamed {}
impl sealed::Sealed for Named {}
impl sealed::Sealed for ConsoleOnly {}
impl sealed::Sealed for WithFile {}

/// Configures and installs the global `tracing` subscriber.
///
/// A name is mandatory before [`LoggerBuilder::init`] becomes available; file
/// specific options only exist after [`LoggerBuilder::path`].
#[derive(Debug)]
pub struct LoggerBuilder<N: sealed::Sealed = Unnamed, F: sealed::Sealed = ConsoleOnly> {
    pub(crate) config: LoggerConfig,
    name: N,
    output: PhantomData<F>,
}

impl LoggerBuilder {
    pub(crate) fn new() -> Self {
        Self { config: LoggerConfig::default(), name: Unnamed, output: PhantomData }
    }
}

impl<F: sealed::Sealed> LoggerBuilder<Unnamed, F> {
    /// Names the application; also the prefix of rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, F> {
        LoggerBuilder { config: self.config, name: Named(name.into()), output: PhantomData }
    }
}

impl<F: sealed::Sealed> LoggerBuilder<Named, F> {
    #[must_use = "The builder does nothing until `init()` is called"]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Per-target filter directives such as `dash_event_bus=trace,dash=debug`.
    ///
    /// When set, `RUST_LOG` is ignored. Malformed directives fail at
    /// [`LoggerBuilder::init`].
    #[must_use = "The builder does nothing until `init()` is called"]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.config.directives = Some(directives.into());
        self
    }

    #[must_use = "The builder does nothing until `init()` is called"]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Also writes to a daily rolling file under `dir`.
    pub fn path(self, dir: impl Into<PathBuf>) -> LoggerBuilder<Named, WithFile> {
        let mut config = self.config;
        config.file = Some(FileConfig {
            dir: dir.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        });
        LoggerBuilder { config, name: self.name, output: PhantomData }
    }

    /// Installs the subscriber.
    ///
    /// Keep the returned [`Logger`] alive until shutdown; dropping it flushes
    /// and stops the file writer.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero
    ///   `max_files`, bad directives, or when no output is enabled.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] if the log file
    ///   cannot be set up.
    /// * [`LoggerError::Subscriber`] if a global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { config, name: Named(name), .. } = self;
        validate(&config, &name)?;

        let filter = filter::build(config.level, config.directives.as_deref())?;
        let mut layers: Vec<BoxedLayer> = Vec::new();

        if config.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match config.file {
            Some(file) => {
                fs::create_dir_all(&file.dir)
                    .context(format!("creating {}", file.dir.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(file.rotation)
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(file.max_files)
                    .build(&file.dir)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);

                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if file.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "no output enabled; turn on the console or set a log path".into(),
                context: Some(name.into()),
            });
        }

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;
        Ok(Logger::new(guard))
    }
}

impl LoggerBuilder<Named, WithFile> {
    #[must_use = "The builder does nothing until `init()` is called"]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(file) = self.config.file.as_mut() {
            file.rotation = rotation;
        }
        self
    }

    /// Number of rotated files kept on disk.
    #[must_use = "The builder does nothing until `init()` is called"]
    pub const fn max_files(mut self, max: usize) -> Self {
        if let Some(file) = self.config.file.as_mut() {
            file.max_files = max;
        }
        self
    }

    /// Writes the file output as JSON lines. Console output stays compact.
    #[must_use = "The builder does nothing until `init()` is called"]
    pub const fn json(mut self, enabled: bool) -> Self {
        if let Some(file) = self.config.file.as_mut() {
            file.json = enabled;
        }
        self
    }
}

fn validate(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "logger name cannot be empty".into(),
            context: None,
        });
    }
    if config.file.as_ref().is_some_and(|file| file.max_files == 0) {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: Some(name.to_owned().into()),
        });
    }
    Ok(())
}
