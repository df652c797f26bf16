//! Recipe Renderer
//!
//! Renders a recipe JSON against a dataset JSON and writes the PDF to the
//! location named in the recipe's `pdfSettings` (or to the given path).
//!
//! Usage:
//!   cargo run --example render_recipe -- <recipe.json> <data.json> [output.pdf]
//!
//! Examples:
//!   cargo run --example render_recipe -- demos/recipe.json demos/data.json
//!   RUST_LOG=debug cargo run --example render_recipe -- demos/recipe.json demos/data.json out.pdf

use anyhow::{bail, Context, Result};
use recipe::{parse_dataset, parse_recipe, RecipeRenderer, RenderOptions};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <recipe.json> <data.json> [output.pdf]", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --example render_recipe -- demos/recipe.json demos/data.json");
        std::process::exit(1);
    }

    let recipe_path = &args[1];
    let data_path = &args[2];

    let recipe_json = std::fs::read_to_string(recipe_path)
        .with_context(|| format!("Failed to read recipe '{recipe_path}'"))?;
    let recipe = parse_recipe(&recipe_json)
        .with_context(|| format!("Failed to parse recipe '{recipe_path}'"))?;

    let data_json = std::fs::read_to_string(data_path)
        .with_context(|| format!("Failed to read dataset '{data_path}'"))?;
    let dataset = parse_dataset(&data_json)
        .with_context(|| format!("Failed to parse dataset '{data_path}'"))?;

    let renderer = RecipeRenderer::new(&recipe, &dataset).with_options(RenderOptions {
        parallel: true,
        ..Default::default()
    });

    let report = match args.get(3) {
        Some(output_path) => {
            let (doc, report) = renderer.render_document()?;
            doc.save(output_path)
                .with_context(|| format!("Failed to write '{output_path}'"))?;
            println!("Generated: {output_path}");
            report
        }
        None => {
            let report = renderer.save()?;
            println!("Generated: {}", renderer.page().output_path().display());
            report
        }
    };

    for skipped in &report.skipped {
        eprintln!(
            "Skipped item {} ({}): {}",
            skipped.index, skipped.item_type, skipped.error
        );
    }
    if report.rendered.is_empty() && !report.skipped.is_empty() {
        bail!("no item could be rendered");
    }

    Ok(())
}
