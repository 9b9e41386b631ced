//! RICO converter - command-line entry point
//!
//! Reads the local settings file and every author settings file under an
//! asset directory, resolves each building, and prints the resolved
//! behaviors followed by the problems the player should see.

use clap::{Parser, ValueEnum};
use ploppable_rico::core::config::RicoConfig;
use ploppable_rico::core::error::Result;
use ploppable_rico::pipeline::{ConversionPipeline, ConversionRun};
use ploppable_rico::resolver::PrefabCatalog;
use ploppable_rico::settings::{discover_sources, SearchPaths};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Resolve ploppable RICO settings into building behaviors
#[derive(Parser, Debug)]
#[command(name = "rico")]
#[command(about = "Validate RICO settings files and resolve building behaviors")]
struct Args {
    /// Local override settings file (defaults to the configured file name)
    #[arg(long)]
    local: Option<PathBuf>,

    /// Asset directory searched for author settings files
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Settings file bundled with the mod (lowest precedence)
    #[arg(long)]
    mod_settings: Option<PathBuf>,

    /// TOML file with prefab dimensions and network flags
    #[arg(long)]
    prefabs: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable the eco specialisation classes
    #[arg(long)]
    eco: bool,

    /// Enable the tourist and leisure commercial classes
    #[arg(long)]
    tourism: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON output structure
#[derive(Serialize)]
struct Output<'a> {
    behaviors: &'a [ploppable_rico::resolver::ResolvedBehavior],
    disabled: &'a [String],
    report: &'a ploppable_rico::diagnostics::FindingsReport,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ploppable_rico=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RicoConfig::load(path)?,
        None => RicoConfig::default(),
    };
    config.capabilities.eco_specialization |= args.eco;
    config.capabilities.tourism_leisure |= args.tourism;

    let prefabs = match &args.prefabs {
        Some(path) => PrefabCatalog::load_from_toml(path)?,
        None => {
            tracing::warn!("no prefab facts given; growable size checks are skipped");
            PrefabCatalog::new()
        }
    };

    let local = args
        .local
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.local_settings_file));
    let paths = SearchPaths {
        local: Some(&local),
        assets: args.assets.as_deref(),
        mod_settings: args.mod_settings.as_deref(),
    };
    let discovered = discover_sources(paths, &config)?;

    let pipeline = ConversionPipeline::new(&config, &prefabs);
    let run = pipeline.run_discovered(&discovered);
    run.report.emit_log();

    match args.format {
        OutputFormat::Json => print_json(&run)?,
        OutputFormat::Text => print_text(&run),
    }

    Ok(())
}

fn print_json(run: &ConversionRun) -> Result<()> {
    let output = Output {
        behaviors: &run.behaviors,
        disabled: &run.disabled,
        report: &run.report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text(run: &ConversionRun) {
    println!("=== RESOLVED BUILDINGS ===");
    for behavior in &run.behaviors {
        println!(
            "{:<40} {:<22} {:<32} {:?}",
            behavior.name,
            behavior.variant.to_string(),
            behavior.class_label,
            behavior.placement
        );
    }
    if !run.disabled.is_empty() {
        println!();
        println!("Disabled: {}", run.disabled.join(", "));
    }

    let user_text = run.report.user_text();
    if !user_text.is_empty() {
        println!();
        println!("=== PROBLEMS ===");
        print!("{}", user_text);
    }
}
