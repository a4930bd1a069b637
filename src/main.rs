use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::warn;
use sharemark::Config;
use sharemark::input::{Command, InputState};
use sharemark::session::{self, ExportOptions};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SHAREMARK_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "sharemark")]
#[command(version = VERSION, about = "Annotation overlay engine for screen sharing")]
struct Cli {
    /// Render an annotation document to a PNG image (requires --output)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["inspect", "replay"])]
    render: Option<PathBuf>,

    /// Print a summary of an annotation document
    #[arg(long, value_name = "FILE", conflicts_with = "replay")]
    inspect: Option<PathBuf>,

    /// Run a JSON list of commands and save the resulting document (requires --output)
    #[arg(long, value_name = "SCRIPT")]
    replay: Option<PathBuf>,

    /// Output path for --render (PNG) or --replay (JSON)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Surface width in pixels (defaults to [canvas] width)
    #[arg(long, value_name = "PIXELS")]
    width: Option<i32>,

    /// Surface height in pixels (defaults to [canvas] height)
    #[arg(long, value_name = "PIXELS")]
    height: Option<i32>,

    /// Write the example configuration to the config directory
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Wrote example config to {}", path.display());
        return Ok(());
    }

    let mut config = Config::load()?;
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }

    if let Some(input) = &cli.render {
        let output = require_output(&cli, "--render")?;
        render(&config, input, &output)
    } else if let Some(input) = &cli.inspect {
        inspect(&config, input)
    } else if let Some(script) = &cli.replay {
        let output = require_output(&cli, "--replay")?;
        replay(&config, script, &output)
    } else {
        println!("sharemark: annotation overlay engine for screen sharing");
        println!();
        println!("Usage:");
        println!("  sharemark --render <FILE> --output <PNG> [--width W --height H]");
        println!("  sharemark --inspect <FILE>");
        println!("  sharemark --replay <SCRIPT> --output <JSON>");
        println!("  sharemark --init-config");
        println!();
        println!("Run with --help for all options.");
        Ok(())
    }
}

fn require_output(cli: &Cli, flag: &str) -> Result<PathBuf> {
    cli.output
        .clone()
        .with_context(|| format!("{} requires --output <PATH>", flag))
}

fn export_options(config: &Config) -> ExportOptions {
    session::options_from_config(&config.export).unwrap_or_else(|err| {
        warn!("{}; saving next to the working directory", err);
        let mut options = ExportOptions::new(PathBuf::from("."));
        options.max_file_size_bytes = config.export.max_file_size_mb * 1024 * 1024;
        options
    })
}

fn render(config: &Config, input: &Path, output: &Path) -> Result<()> {
    let options = export_options(config);
    let annotations = session::load_document(input, &options)?;

    let mut state = InputState::from_config(config)?;
    let dropped = state.load(annotations)?;
    state
        .surface
        .write_png(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Rendered {} annotations to {} ({}x{})",
        state.annotations().len(),
        output.display(),
        state.surface.width(),
        state.surface.height()
    );
    if dropped > 0 {
        println!("Skipped {} annotations without points", dropped);
    }
    Ok(())
}

fn inspect(config: &Config, input: &Path) -> Result<()> {
    let options = export_options(config);
    let annotations = session::load_document(input, &options)?;

    let mut authors: BTreeMap<&str, usize> = BTreeMap::new();
    let mut tools: BTreeMap<&str, usize> = BTreeMap::new();
    let mut points = 0;
    for annotation in &annotations {
        let author = if annotation.author.is_empty() {
            "(unknown)"
        } else {
            annotation.author.as_str()
        };
        *authors.entry(author).or_default() += 1;
        *tools.entry(annotation.tool.as_str()).or_default() += 1;
        points += annotation.points.len();
    }

    println!("{}", input.display());
    println!("  annotations: {}", annotations.len());
    println!("  points: {}", points);
    println!("  authors:");
    for (author, count) in &authors {
        println!("    {}: {}", author, count);
    }
    println!("  tools:");
    for (tool, count) in &tools {
        println!("    {}: {}", tool, count);
    }
    Ok(())
}

fn replay(config: &Config, script: &Path, output: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read {}", script.display()))?;
    let commands: Vec<Command> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid command script {}", script.display()))?;

    let mut state = InputState::from_config(config)?;
    let count = commands.len();
    state.dispatch_all(commands)?;

    let options = export_options(config);
    let path = session::save_document(state.annotations(), &options, Some(output))?;
    println!(
        "Replayed {} commands; saved {} annotations to {}",
        count,
        state.annotations().len(),
        path.display()
    );
    Ok(())
}
