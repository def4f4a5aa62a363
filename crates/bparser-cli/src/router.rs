// Command routing and dispatch

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::*;
use crate::error::CliResult;

/// bparser - bracket placeholder substitution
#[derive(Parser, Debug)]
#[command(name = "bparser")]
#[command(bin_name = "bparser")]
#[command(about = "Substitute {key-filters} placeholders in templates")]
#[command(
    long_about = "bparser replaces {key} tokens in templates with values from a parts map.\n\nAppend filter letters after a dash to transform the value, applied left to right:\n  {model-sc}   singularize, then camelize\n  {model-u}    underscore\n  {model-U}    uppercase\n\nRun 'bparser filters' to list every letter."
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render templates
    #[command(about = "Render templates against a parts map")]
    Render {
        /// Templates given inline
        #[arg(value_name = "TEMPLATE")]
        templates: Vec<String>,

        /// Template files, rendered after the inline templates
        #[arg(short, long = "file", value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Read one more template from standard input
        #[arg(long)]
        stdin: bool,

        /// Parts file (JSON, YAML or TOML map)
        #[arg(short, long, value_name = "FILE")]
        parts: Option<PathBuf>,

        /// Set a part, overriding the parts file
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Disable memoization
        #[arg(long)]
        no_cache: bool,

        /// Print cache statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// List tokens in a template
    #[command(about = "List the tokens a template contains without resolving them")]
    Tokens {
        /// Template to scan
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },

    /// Show filter letters
    #[command(about = "Show filter letters and the transforms they apply")]
    Filters,

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse arguments and route to the handler
    pub fn route() -> CliResult<()> {
        let cli = Cli::parse();

        crate::logging::init_logging(cli.verbose, cli.quiet);

        Self::execute(&cli)
    }

    /// Execute a command
    pub fn execute(cli: &Cli) -> CliResult<()> {
        match &cli.command {
            Commands::Render {
                templates,
                files,
                stdin,
                parts,
                set,
                no_cache,
                stats,
            } => {
                let mut sources: Vec<TemplateSource> = templates
                    .iter()
                    .cloned()
                    .map(TemplateSource::Inline)
                    .collect();
                sources.extend(files.iter().cloned().map(TemplateSource::File));
                if *stdin {
                    sources.push(TemplateSource::Stdin);
                }

                let cmd = RenderCommand::new(sources)
                    .with_parts_file(parts.clone())
                    .with_assignments(set.clone())
                    .with_config(cli.config.clone())
                    .with_no_cache(*no_cache)
                    .with_stats(*stats);
                cmd.execute()
            }
            Commands::Tokens { template } => {
                let cmd = TokensCommand::new(template.clone()).with_config(cli.config.clone());
                cmd.execute()
            }
            Commands::Filters => {
                let cmd = FiltersCommand::new(cli.config.clone());
                cmd.execute()
            }
            Commands::Completions { shell } => {
                let cmd = CompletionsCommand::new(*shell);
                cmd.execute()
            }
        }
    }
}
