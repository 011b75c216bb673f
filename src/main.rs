use anyhow::Context;
use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};

use md2docx_lib::config::{self as md2docx_config, SourcedConfig};
use md2docx_lib::exit_codes::exit;
use md2docx_lib::{ConvertError, convert_file};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Markdown file to convert (default: paths.input from config, or ProjectReport.md)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// DOCX file to write (default: paths.output from config, or ProjectReport.docx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, help = "Path to configuration file")]
    config: Option<PathBuf>,

    /// Ignore all configuration files and use built-in defaults
    #[arg(long, help = "Ignore all configuration files and use built-in defaults", conflicts_with = "config")]
    no_config: bool,

    /// Write a default .md2docx.toml in the current directory and exit
    #[arg(long, conflicts_with_all = ["print_config", "input", "output"])]
    init: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Control colored output: auto, always, never
    #[arg(long, default_value = "auto", value_parser = ["auto", "always", "never"], help = "Control colored output: auto, always, never")]
    color: String,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn handle_init_command() {
    let path = Path::new(md2docx_config::CONFIG_FILE_NAMES[0]);
    match md2docx_config::create_default_config(path) {
        Ok(()) => println!("Created default configuration file: {}", path.display()),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}

fn load_config_with_cli_error_handling(cli: &Cli) -> SourcedConfig {
    match SourcedConfig::load_with_discovery(cli.config.as_deref(), cli.no_config) {
        Ok(sourced) => sourced,
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    }
}

fn run(cli: &Cli, sourced: &SourcedConfig) -> anyhow::Result<()> {
    let input = cli.input.clone().unwrap_or_else(|| sourced.input_path());
    let output = cli.output.clone().unwrap_or_else(|| sourced.output_path());
    log::debug!("Converting {} -> {}", input.display(), output.display());

    match convert_file(&input, &output, &sourced.config) {
        Ok(summary) => {
            log::debug!(
                "Emitted {} block(s) as {} element(s)",
                summary.total_blocks(),
                summary.elements
            );
            println!("Saved DOCX to: {}", summary.output.display());
            Ok(())
        }
        // A missing input is reported but is not a failure of the tool
        Err(e @ ConvertError::InputMissing { .. }) => {
            println!("{e}");
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to convert {}", input.display())),
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.color.as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::unset_override(),
    }

    init_logging(cli.verbose);

    if cli.init {
        handle_init_command();
        return;
    }

    let sourced = load_config_with_cli_error_handling(&cli);
    if let Some(path) = &sourced.loaded_file {
        log::debug!("Using configuration file: {}", path.display());
    }

    if cli.print_config {
        match sourced.config.to_toml_string() {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("{}: {}", "Config error".red().bold(), e);
                exit::tool_error();
            }
        }
        return;
    }

    if let Err(e) = run(&cli, &sourced) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        exit::tool_error();
    }
}
