//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::Scaling;

/// Procedural snowflake generator: random branch structures rendered as SVG
#[derive(Parser, Debug)]
#[command(name = "flakegen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    /// Directory holding a local .flakegen.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate snowflakes and write them as SVG files
    Generate {
        #[command(flatten)]
        canvas: CanvasArgs,

        /// Number of snowflakes to write
        #[arg(short = 'n', long)]
        count: Option<u32>,

        /// Output directory
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        out: Option<PathBuf>,
    },

    /// Print the structure of a snowflake as a tree
    Show {
        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print the projected line segments of a snowflake
    Segments {
        #[command(flatten)]
        canvas: CanvasArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Canvas and randomness overrides shared by drawing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct CanvasArgs {
    /// Canvas width
    #[arg(long)]
    pub width: Option<f64>,

    /// Canvas height
    #[arg(long)]
    pub height: Option<f64>,

    /// Length normalisation
    #[arg(long, value_enum)]
    pub scaling: Option<ScalingArg>,

    /// Seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingArg {
    /// Longest arm reaches the canvas edge
    Fit,
    /// (longest arm / shorter side) / 2
    Proportional,
}

impl From<ScalingArg> for Scaling {
    fn from(arg: ScalingArg) -> Self {
        match arg {
            ScalingArg::Fit => Scaling::FitToCanvas,
            ScalingArg::Proportional => Scaling::Proportional,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One segment per line
    Text,
    /// JSON array of segments
    Json,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show config file locations
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_with_overrides() {
        let cli = Cli::try_parse_from([
            "flakegen", "-dd", "generate", "-n", "30", "--width", "300", "--scaling", "proportional",
            "--seed", "9",
        ])
        .unwrap();
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Generate { canvas, count, out }) => {
                assert_eq!(count, Some(30));
                assert_eq!(canvas.width, Some(300.0));
                assert_eq!(canvas.height, None);
                assert_eq!(canvas.scaling, Some(ScalingArg::Proportional));
                assert_eq!(canvas.seed, Some(9));
                assert!(out.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_segments_json() {
        let cli = Cli::try_parse_from(["flakegen", "segments", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Segments {
                format: OutputFormat::Json,
                ..
            })
        ));
    }
}
