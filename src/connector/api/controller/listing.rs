use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::CatalogEntry;

/// Render a product listing for terminal output.
pub fn render_entries(heading: &str, entries: &[CatalogEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
        OutputFormat::Text => Ok(render_text(heading, entries)),
    }
}

fn render_text(heading: &str, entries: &[CatalogEntry]) -> String {
    if entries.is_empty() {
        return format!("{heading}\n\nNo products found.");
    }

    let mut output = format!(
        "{heading}\n\n{} product{} discovered:\n\n",
        entries.len(),
        if entries.len() == 1 { "" } else { "s" }
    );

    for (i, entry) in entries.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, entry.display_line()));
        output.push_str(&format!("   id: {}\n", entry.id()));
        if !entry.description().is_empty() {
            output.push_str(&format!("   {}\n", entry.description()));
        }
        output.push('\n');
    }

    output.trim_end().to_string()
}
