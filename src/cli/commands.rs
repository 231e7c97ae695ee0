//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{ChartService, View};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::sample_chart;
use crate::infrastructure::ConsoleSink;

pub const STRUCTURE_HEADER: &str = "====Structure====";
pub const DUTIES_HEADER: &str = "====Duties====";

/// Header and traversal of each demo section, in print order.
pub const DEMO_SECTIONS: [(&str, View); 2] = [
    (STRUCTURE_HEADER, View::Structure),
    (DUTIES_HEADER, View::Duties),
];

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => _completion(*shell),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Display) => _view(cli, View::Structure),
        Some(Commands::Duties) => _view(cli, View::Duties),
        Some(Commands::Tree) => _tree(),
        Some(Commands::Leaves) => _leaves(),
        Some(Commands::Demo) | None => _demo(cli),
    }
}

/// Settings from config layers with command line flags applied last.
pub fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(indent) = cli.indent {
        settings.indent = indent;
    }
    if cli.no_color {
        settings.color = false;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

/// Console sink for `settings`, with terminal coloring applied first.
fn console(settings: &Settings) -> ConsoleSink {
    if !settings.color {
        colored::control::set_override(false);
    }
    ConsoleSink::new(settings)
}

pub fn chart_service() -> CliResult<ChartService> {
    let tree = sample_chart().map_err(ApplicationError::from)?;
    Ok(ChartService::new(tree))
}

#[instrument(skip(cli))]
fn _demo(cli: &Cli) -> CliResult<()> {
    let settings = effective_settings(cli)?;
    let service = chart_service()?;
    let mut sink = console(&settings);
    for (header, view) in DEMO_SECTIONS {
        output::header(header);
        service.run(view, &mut sink)?;
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _view(cli: &Cli, view: View) -> CliResult<()> {
    let settings = effective_settings(cli)?;
    let mut sink = console(&settings);
    chart_service()?.run(view, &mut sink)?;
    Ok(())
}

#[instrument]
fn _tree() -> CliResult<()> {
    output::info(&chart_service()?.render_tree()?);
    Ok(())
}

#[instrument]
fn _leaves() -> CliResult<()> {
    for leaf in chart_service()?.leaves()? {
        output::info(&leaf);
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = effective_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => {
                return Err(CliError::Usage(
                    "cannot determine config directory on this platform".to_string(),
                ))
            }
        },
        ConfigCommands::Init => output::info(&Settings::template()),
    }
    Ok(())
}
