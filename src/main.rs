//! # Talonario CLI
//!
//! Command-line interface for checking, rendering and proofing stored
//! receipt templates.
//!
//! ## Usage
//!
//! ```bash
//! # List element kinds
//! talonario kinds
//!
//! # Check a stored template against the editing and save rules
//! talonario check receipt.json
//!
//! # Print the render nodes as JSON
//! talonario render receipt.json
//!
//! # Write a PNG proof at 8 px per unit
//! talonario --unit-px 8 preview receipt.json --png proof.png
//! ```

use clap::{Parser, Subcommand};
use log::info;
use serde_json::Value;
use std::path::{Path, PathBuf};

use talonario::{
    DesignerError, LayoutConfig, Renderer, Template,
    preview,
    template::element_types,
};

/// Talonario - receipt template layout utility
#[derive(Parser, Debug)]
#[command(name = "talonario")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pixels per template unit (1-64)
    #[arg(
        long,
        global = true,
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(1..=64)
    )]
    unit_px: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List element kinds and their labels
    Kinds,

    /// Validate a stored template
    Check {
        /// Template JSON file
        file: PathBuf,
    },

    /// Print the render nodes of a stored template as JSON
    Render {
        /// Template JSON file
        file: PathBuf,

        /// Include the surface size alongside the nodes
        #[arg(long)]
        layout: bool,
    },

    /// Write a PNG proof of a stored template
    Preview {
        /// Template JSON file
        file: PathBuf,

        /// Output PNG file
        #[arg(long, value_name = "FILE")]
        png: PathBuf,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DesignerError> {
    let cli = Cli::parse();
    let config = LayoutConfig::REFERENCE.with_unit_px(cli.unit_px);

    match cli.command {
        Commands::Kinds => {
            for meta in element_types() {
                println!("  {:<12} {}", meta.type_name, meta.label);
            }
        }
        Commands::Check { file } => {
            let template = load_template(&file)?;
            let mut problems = Vec::new();

            if let Err(e) = template.to_wire().validate_for_save() {
                problems.push(e.to_string());
            }
            for (id, e) in template.audit() {
                problems.push(format!("element {}: {}", id, e));
            }

            if problems.is_empty() {
                println!(
                    "{}: ok ({} elements, {}x{})",
                    file.display(),
                    template.len(),
                    template.dimensions().width,
                    template.dimensions().height
                );
            } else {
                for problem in &problems {
                    println!("{}: {}", file.display(), problem);
                }
                return Err(DesignerError::InvalidTemplate(format!(
                    "{} problem(s) found",
                    problems.len()
                )));
            }
        }
        Commands::Render { file, layout } => {
            let template = load_template(&file)?;
            let renderer = Renderer::new(config);
            let json = if layout {
                serde_json::to_string_pretty(&renderer.layout(&template))?
            } else {
                serde_json::to_string_pretty(&renderer.render(&template))?
            };
            println!("{}", json);
        }
        Commands::Preview { file, png } => {
            let template = load_template(&file)?;
            let png_bytes = preview::render_png(&template, &config)?;
            std::fs::write(&png, png_bytes)?;
            println!("Saved to {}", png.display());
        }
    }

    Ok(())
}

/// Read and parse a stored template file.
fn load_template(path: &Path) -> Result<Template, DesignerError> {
    let raw = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    let template = Template::from_wire(&value)?;
    info!(
        "loaded {} with {} elements",
        path.display(),
        template.len()
    );
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_px_is_bounded() {
        let cli = Cli::try_parse_from(["talonario", "--unit-px", "8", "kinds"]).unwrap();
        assert_eq!(cli.unit_px, 8);

        for bad in ["0", "65", "100000"] {
            assert!(
                Cli::try_parse_from(["talonario", "--unit-px", bad, "preview", "r.json", "--png", "o.png"])
                    .is_err(),
                "accepted --unit-px {}",
                bad
            );
        }
    }
}
