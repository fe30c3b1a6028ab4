//! One-shot diagram generation from the command line.

use anyhow::Result;
use console::style;

use umlsketch_types::diagram::{GenerationRequest, PresentedCode};

use crate::state::AppState;

/// Generate a diagram and print it.
///
/// # Examples
///
/// ```bash
/// umlsketch generate "User logs in with email and password"
/// umlsketch generate "Checkout" --access-code S3CR3T --json
/// ```
pub async fn generate(
    state: &AppState,
    description: String,
    access_code: Option<String>,
    json: bool,
) -> Result<()> {
    let request = GenerationRequest {
        description: Some(description),
        access_code: access_code.map(PresentedCode::from),
    };

    let diagram = state.generator.generate(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&diagram)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("✓").green().bold(),
        style(&diagram.diagram_type).bold()
    );
    println!();
    println!("  {}", style(&diagram.explanation).dim());
    println!();
    println!("{}", diagram.code);
    println!();
    println!("  {} {}", style("Image:").bold(), style(&diagram.image_url).cyan());
    println!();

    Ok(())
}
