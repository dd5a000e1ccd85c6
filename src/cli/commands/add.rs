use anyhow::anyhow;
use clap::Args;
use serde_json::{Map, Value};

use crate::cli::utils::render_success;
use crate::cli::OutputFormat;
use crate::database::models::PayloadError;
use crate::database::{NewSchool, SchoolStore};

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long, help = "Contact number (digits)")]
    pub contact: Option<String>,
    #[arg(long, help = "Image path or URL")]
    pub image: Option<String>,
    #[arg(long = "email", help = "Contact email")]
    pub email_id: Option<String>,
}

impl AddArgs {
    /// Same shape the HTTP endpoint receives, so the same coercion applies
    fn into_fields(self) -> Map<String, Value> {
        [
            ("name", self.name),
            ("address", self.address),
            ("city", self.city),
            ("state", self.state),
            ("contact", self.contact),
            ("image", self.image),
            ("email_id", self.email_id),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), Value::String(v))))
        .collect()
    }
}

pub async fn handle(args: AddArgs, store: &dyn SchoolStore, output_format: OutputFormat) -> anyhow::Result<String> {
    let new_school = NewSchool::from_fields(&args.into_fields()).map_err(|err| match err {
        PayloadError::InvalidFields(errors) => anyhow!(
            "invalid school: {}",
            errors
                .iter()
                .map(|(field, message)| format!("{}: {}", field, message))
                .collect::<Vec<_>>()
                .join("; ")
        ),
        other => anyhow!(other),
    })?;

    let school = store.insert(new_school).await?;
    render_success(
        &output_format,
        &format!("Created school {} '{}'", school.id, school.name),
        Some(serde_json::to_value(&school)?),
    )
}
