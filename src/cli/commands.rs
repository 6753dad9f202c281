use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::SnowflakeService;
use crate::cli::args::{CanvasArgs, Cli, Commands, ConfigCommands, OutputFormat};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::RandomNumberService;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let local_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?,
    };

    match &cli.command {
        Some(Commands::Generate { canvas, count, out }) => {
            let mut settings = Settings::load(Some(&local_dir))?;
            apply_canvas_args(&mut settings, canvas);
            if let Some(count) = count {
                settings.count = *count;
            }
            if let Some(out) = out {
                settings.output_dir = out.clone();
            }
            settings.validate()?;
            cmd_generate(ServiceContainer::new(settings))
        }
        Some(Commands::Show { seed }) => {
            let mut settings = Settings::load(Some(&local_dir))?;
            if seed.is_some() {
                settings.seed = *seed;
            }
            cmd_show(ServiceContainer::new(settings))
        }
        Some(Commands::Segments { canvas, format }) => {
            let mut settings = Settings::load(Some(&local_dir))?;
            apply_canvas_args(&mut settings, canvas);
            settings.validate()?;
            cmd_segments(ServiceContainer::new(settings), *format)
        }
        Some(Commands::Config { command }) => cmd_config(command, &local_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            if cli.info {
                return Ok(());
            }
            Err(CliError::Usage(
                "no command given, try `flakegen --help`".to_string(),
            ))
        }
    }
}

/// Command line flags win over every config layer.
fn apply_canvas_args(settings: &mut Settings, args: &CanvasArgs) {
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if let Some(scaling) = args.scaling {
        settings.scaling = scaling.into();
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
}

fn random_source(seed: Option<u64>) -> RandomNumberService {
    match seed {
        Some(seed) => {
            debug!("seeding generator with {}", seed);
            RandomNumberService::seeded(seed)
        }
        None => RandomNumberService::new(),
    }
}

#[instrument(skip(container))]
fn cmd_generate(container: ServiceContainer) -> CliResult<()> {
    let settings = &container.settings;
    let mut rng = random_source(settings.seed);
    let written =
        container
            .snowflakes
            .write_blizzard(&mut rng, settings.count, &settings.output_dir)?;

    for flake in &written {
        output::success(&format!(
            "{} ({} branches, {} patterns, {} segments)",
            flake.path.display(),
            flake.branch_count,
            flake.pattern_count,
            flake.segment_count
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: ServiceContainer) -> CliResult<()> {
    let mut rng = random_source(container.settings.seed);
    let snowflake = container.snowflakes.generate(&mut rng)?;
    output::info(&SnowflakeService::outline(&snowflake));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_segments(container: ServiceContainer, format: OutputFormat) -> CliResult<()> {
    let mut rng = random_source(container.settings.seed);
    let snowflake = container.snowflakes.generate(&mut rng)?;
    let segments = container.snowflakes.segments(&snowflake)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            for segment in &segments {
                writeln!(out, "{segment}").map_err(|e| InfraError::io("write segments", e))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &segments)
                .map_err(|e| InfraError::io("write segments", e.into()))?;
            writeln!(out).map_err(|e| InfraError::io("write segments", e))?;
        }
    }
    Ok(())
}

fn cmd_config(command: &ConfigCommands, local_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(local_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
        ConfigCommands::Path => {
            output::header("Config file locations:");
            match global_config_path() {
                Some(path) => print_config_location("global", &path),
                None => output::detail("global: (no config directory on this platform)"),
            }
            print_config_location("local", &local_config_path(local_dir));
        }
    }
    Ok(())
}

fn print_config_location(label: &str, path: &Path) {
    let state = if path.exists() { "exists" } else { "not found" };
    output::detail(&format!("{label}: {} ({state})", path.display()));
}
