use clap::Args;
use serde_json::json;

use crate::cli::utils::{render_empty_collection, render_table};
use crate::cli::OutputFormat;
use crate::database::{School, SchoolQuery, SchoolStore};

const COLUMNS: [&str; 6] = ["id", "name", "city", "state", "contact", "email_id"];

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(long, short, help = "Search terms matched against name, city, state and email")]
    pub search: Option<String>,
    #[arg(long, help = "Only schools in this state (exact match)")]
    pub state: Option<String>,
    #[arg(long, help = "Only schools in this city (exact match)")]
    pub city: Option<String>,
}

pub async fn handle(args: ListArgs, store: &dyn SchoolStore, output_format: OutputFormat) -> anyhow::Result<String> {
    let query = SchoolQuery {
        search: args.search,
        state: args.state,
        city: args.city,
    };
    let schools = store.search(&query).await?;
    let total = store.count().await?;

    if schools.is_empty() {
        let message = if query.is_empty() {
            "No schools yet"
        } else {
            "No schools match the given search and filters"
        };
        return render_empty_collection(&output_format, "schools", message);
    }

    match output_format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "schools": schools,
            "count": schools.len(),
            "total": total,
        }))?),
        OutputFormat::Text => {
            let rows: Vec<Vec<String>> = schools.iter().map(display_row).collect();
            Ok(format!(
                "{}\n\n{} of {} schools",
                render_table(&COLUMNS, &rows),
                schools.len(),
                total
            ))
        }
    }
}

fn display_row(school: &School) -> Vec<String> {
    vec![
        school.id.to_string(),
        school.name.clone(),
        school.city.clone(),
        school.state.clone(),
        school.contact.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
        school.email_id.clone(),
    ]
}
