//! roofscope CLI - measure roof projects and export blueprints
//!
//! Reads a project JSON document (captured images plus drawn
//! sections), runs the measurement engine over it, and prints results
//! or writes a blueprint SVG.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use roofscope_engine::{MeasurementSession, Project};

#[derive(Parser)]
#[command(name = "roofscope")]
#[command(about = "Roof measurement engine over project documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure a project and print the result as JSON
    Measure {
        /// Path to a project .json file
        file: PathBuf,
    },
    /// Render a project's blueprint to an SVG file
    Blueprint {
        /// Input project .json file
        input: PathBuf,
        /// Output .svg file
        output: PathBuf,
        /// Canvas width in pixels
        #[arg(long, default_value_t = 1200)]
        width: u32,
        /// Canvas height in pixels
        #[arg(long, default_value_t = 900)]
        height: u32,
    },
    /// Display information about a project file
    Info {
        /// Path to the project .json file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Measure { file } => measure(&file),
        Commands::Blueprint {
            input,
            output,
            width,
            height,
        } => blueprint(&input, &output, width, height),
        Commands::Info { file } => show_info(&file),
    }
}

fn load_session(file: &PathBuf) -> Result<MeasurementSession> {
    let json = fs::read_to_string(file)?;
    let project = Project::from_json(&json)?;
    Ok(MeasurementSession::from_project(project)?)
}

fn measure(file: &PathBuf) -> Result<()> {
    let session = load_session(file)?;
    let result = session.aggregate()?;

    for skipped in &result.skipped {
        eprintln!(
            "warning: section {} ({}) excluded: {}",
            skipped.id, skipped.name, skipped.reason
        );
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn blueprint(input: &PathBuf, output: &PathBuf, width: u32, height: u32) -> Result<()> {
    let session = load_session(input)?;
    let result = session.aggregate()?;
    let blueprint = roofscope_blueprint::compose(&session, &result, width, height)?;
    fs::write(output, blueprint.to_svg())?;
    println!(
        "Wrote blueprint for {} section(s) to {}",
        blueprint.legend.section_count,
        output.display()
    );
    Ok(())
}

fn show_info(file: &PathBuf) -> Result<()> {
    let json = fs::read_to_string(file)?;
    let project = Project::from_json(&json)?;

    println!("roofscope project: {}", file.display());
    println!("  Version: {}", project.version);
    println!("  Images: {}", project.images.len());
    println!("  Sections: {}", project.sections.len());

    for image in &project.images {
        println!(
            "  image {}: {}x{} px, zoom {:.1}, {:.4} m/px",
            image.id,
            image.width_px,
            image.height_px,
            image.zoom,
            image.meters_per_pixel()
        );
    }

    let session = load_session(file)?;
    match session.aggregate() {
        Ok(result) => {
            println!("\nMeasurement:");
            println!("  Total flat: {:.2} sq ft", result.total_flat_sqft);
            println!("  Total adjusted: {:.2} sq ft", result.total_adjusted_sqft);
            println!("  Squares: {:.2}", result.squares());
            for section in &result.sections {
                println!(
                    "  {}: {} {:.2} sq ft at {} ({:.2} adjusted)",
                    section.id, section.name, section.flat_sqft, section.pitch, section.adjusted_sqft
                );
            }
            if !result.skipped.is_empty() {
                println!("  Skipped: {}", result.skipped.len());
            }
        }
        Err(e) => {
            println!("\nFailed to measure: {}", e);
        }
    }

    Ok(())
}
