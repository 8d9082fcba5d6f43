//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::pipeline::InputArgs;
use super::{inspect, render_cmd};
use crate::render::RendererKind;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "infragraph")]
#[command(author, version, about = "Turn Terraform resource declarations into dependency diagrams")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to infragraph.toml in this or a parent directory)
    #[arg(long, global = true, env = "INFRAGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a diagram of the declared resources
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Renderer to use (defaults to the configured one)
        #[arg(long, short)]
        renderer: Option<RendererKind>,

        /// Diagram title
        #[arg(long, short)]
        title: Option<String>,

        /// Write the diagram to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List the resources that end up in the graph
    Resources {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Report skipped or malformed declarations
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Fail when any diagnostic is reported
        #[arg(long)]
        strict: bool,
    },

    /// Show an order in which resources can be provisioned
    Order {
        #[command(flatten)]
        input: InputArgs,
    },

    /// List known resource types and their categories
    Categories,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("infragraph starting");

    let config = Config::load(cli.config.as_deref())?;
    for source in &config.sources {
        output.verbose_ctx("config", &format!("Loaded {}", source.display()));
    }

    match cli.command {
        Commands::Render {
            input,
            renderer,
            title,
            output: destination,
        } => {
            output.verbose_ctx(
                "render",
                &format!(
                    "Rendering {} with renderer={:?}, destination={:?}",
                    input.file.display(),
                    renderer,
                    destination
                ),
            );
            render_cmd::run(&output, &config, &input, renderer, title.as_deref(), destination.as_deref())?
        }

        Commands::Resources { input } => inspect::resources(&output, &config, &input)?,
        Commands::Check { input, strict } => inspect::check(&output, &config, &input, strict)?,
        Commands::Order { input } => inspect::order(&output, &config, &input)?,
        Commands::Categories => inspect::categories(&output, &config)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
