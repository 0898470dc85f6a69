mod session;

use anyhow::{Context, bail};
use clap::Parser;
use dash::Dashboard;
use dash::domain::config::{DashboardConfig, LogSettings};
use dash::kernel::config::load_config;
use dash_logger::{Logger, parse_level};
use std::path::PathBuf;
use tracing::info;

/// Headless dashboard host: mounts the modules, replays a short session over
/// the event bus and unmounts again.
#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about)]
struct Cli {
    /// Config file (TOML, JSON or YAML). Defaults plus `DASH__*` overrides when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `log.level` from the config.
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config: DashboardConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }

    let _logger = init_logger(&config.log)?;
    info!(modules = ?config.modules.names().collect::<Vec<_>>(), "Starting dashboard");

    let dashboard = Dashboard::builder().config(config).build();
    dashboard.mount()?;

    session::replay(&dashboard)?;

    let summary = serde_json::to_string(&dashboard.summary())?;
    info!(%summary, "Session finished");

    let leftover = dashboard.unmount();
    if leftover > 0 {
        bail!("{leftover} event buckets survived unmount");
    }
    Ok(())
}

fn init_logger(settings: &LogSettings) -> anyhow::Result<Logger> {
    let builder = Logger::builder()
        .name(settings.name.as_str())
        .level(parse_level(&settings.level)?)
        .console(settings.console);
    let builder = match settings.directives.as_deref() {
        Some(directives) => builder.directives(directives),
        None => builder,
    };

    let logger = match &settings.path {
        Some(path) => builder.path(path).json(settings.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from(["dashboard", "--config", "dash.toml", "-l", "debug"]);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("dash.toml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
