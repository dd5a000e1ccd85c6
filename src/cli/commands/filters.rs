use std::fmt::Write;

use crate::cli::OutputFormat;
use crate::database::{FacetCount, SchoolStore};

pub async fn handle(store: &dyn SchoolStore, output_format: OutputFormat) -> anyhow::Result<String> {
    let facets = store.facets().await?;

    match output_format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&facets)?),
        OutputFormat::Text => {
            let mut out = String::new();
            write_section(&mut out, "By state", &facets.states)?;
            out.push('\n');
            write_section(&mut out, "By city", &facets.cities)?;
            Ok(out.trim_end().to_string())
        }
    }
}

fn write_section(out: &mut String, title: &str, counts: &[FacetCount]) -> std::fmt::Result {
    writeln!(out, "{}:", title)?;
    if counts.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for facet in counts {
        let label = if facet.value.is_empty() { "(blank)" } else { facet.value.as_str() };
        writeln!(out, "  {} ({})", label, facet.count)?;
    }
    Ok(())
}
