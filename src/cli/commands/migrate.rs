use crate::cli::utils::render_success;
use crate::cli::OutputFormat;
use crate::database::SchoolStore;

pub async fn handle(store: &dyn SchoolStore, output_format: OutputFormat) -> anyhow::Result<String> {
    store.ensure_schema().await?;
    render_success(&output_format, &format!("schools table ready ({})", store.backend()), None)
}
