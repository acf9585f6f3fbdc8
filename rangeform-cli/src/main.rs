//! Rangeform CLI — headless form-definition checks.
//!
//! Commands:
//! - `check` — load a TOML form definition and run range validation on every
//!   slider, exactly as the widgets would at render time
//! - `marks` — print the computed tick table for a range

use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use rangeform_core::config::{FormDefinition, RangeSettings};
use rangeform_core::marks;
use rangeform_core::store::MemoryStore;
use rangeform_core::validate::Validation;

#[derive(Parser)]
#[command(
    name = "rangeform",
    about = "Rangeform CLI — validate form definitions and inspect mark layouts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every slider in a form definition.
    Check {
        /// Path to a TOML form definition.
        #[arg(long)]
        form: PathBuf,
    },
    /// Print the computed tick marks for a range.
    Marks {
        #[arg(long)]
        min: f64,

        #[arg(long)]
        max: f64,

        /// Number of markers; fewer than 2 yields no marks.
        #[arg(long, default_value_t = 5)]
        markers: u32,

        /// Decimal places used to round mark positions.
        #[arg(long, default_value_t = 0)]
        decimals: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Check { form } => check(&form),
        Commands::Marks {
            min,
            max,
            markers,
            decimals,
        } => print_marks(min, max, markers, decimals),
    }
}

fn check(path: &PathBuf) -> Result<()> {
    let definition = FormDefinition::load(path)
        .with_context(|| format!("loading form definition {}", path.display()))?;

    // Notices are irrelevant here; the receiver is simply dropped.
    let (tx, _rx) = mpsc::channel();
    let store = MemoryStore::from_definition(&definition, tx);

    let mut problem_count = 0;
    for spec in &definition.sliders {
        let settings = spec.resolve_settings(&store);
        let value = spec.resolve_value(&store);
        let validation = Validation::run(&settings, &value);

        if validation.is_clean() {
            println!("ok    {}", spec.label);
            continue;
        }
        println!("FAIL  {}", spec.label);
        for problem in &validation.settings {
            println!("      settings: {problem}");
            problem_count += 1;
        }
        for problem in &validation.values {
            println!("      value:    {problem}");
            problem_count += 1;
        }
    }

    if problem_count > 0 {
        bail!(
            "{problem_count} problem(s) across {} slider(s) in {}",
            definition.sliders.len(),
            path.display()
        );
    }
    println!(
        "All {} slider(s) in {} check out",
        definition.sliders.len(),
        path.display()
    );
    Ok(())
}

fn print_marks(min: f64, max: f64, markers: u32, decimals: u32) -> Result<()> {
    let settings = RangeSettings {
        minimum: Some(min),
        maximum: Some(max),
        step: 1.0,
        marker_count: markers,
        decimal_places: decimals,
    };
    let set = marks::marks(&settings);
    if set.is_empty() {
        println!("no marks (need min < max and at least 2 markers)");
        return Ok(());
    }
    for mark in set {
        println!("{:>12}  {}", mark.position, mark.label);
    }
    Ok(())
}
