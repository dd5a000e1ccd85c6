pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::DatabaseConfig;
use crate::database::{DatabaseManager, PgSchoolStore, SchoolStore};

#[derive(Parser)]
#[command(name = "schoolctl")]
#[command(about = "School registry admin - browse and manage school records")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List schools, optionally searched and filtered")]
    List(commands::list::ListArgs),

    #[command(about = "Show the distinct states and cities with record counts")]
    Filters,

    #[command(about = "Add a school record")]
    Add(commands::add::AddArgs),

    #[command(about = "Create the schools table if it does not exist")]
    Migrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Connect to the configured Postgres database and run one command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config();

    let store = connect_store(&config.database).await?;
    let output = execute(cli.command, &store, output_format).await?;
    println!("{}", output);
    Ok(())
}

/// Connect to Postgres and create the schools table if needed, so every
/// command works against a fresh database
pub async fn connect_store(config: &DatabaseConfig) -> anyhow::Result<PgSchoolStore> {
    let pool = DatabaseManager::connect(config).await?;
    let store = PgSchoolStore::new(pool);
    store.ensure_schema().await?;
    Ok(store)
}

/// Run a command against any store and return what should be printed
pub async fn execute(
    command: Commands,
    store: &dyn SchoolStore,
    output_format: OutputFormat,
) -> anyhow::Result<String> {
    match command {
        Commands::List(args) => commands::list::handle(args, store, output_format).await,
        Commands::Filters => commands::filters::handle(store, output_format).await,
        Commands::Add(args) => commands::add::handle(args, store, output_format).await,
        Commands::Migrate => commands::migrate::handle(store, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemorySchoolStore;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("schoolctl").chain(args.iter().copied())).unwrap()
    }

    async fn run_with(store: &MemorySchoolStore, args: &[&str]) -> anyhow::Result<String> {
        let cli = parse(args);
        let format = OutputFormat::from_cli(&cli);
        execute(cli.command, store, format).await
    }

    async fn seeded() -> MemorySchoolStore {
        let store = MemorySchoolStore::new();
        for (name, city, state, contact) in [
            ("Oak High", "Springfield", "IL", "5551234567"),
            ("Elm Middle", "Springfield", "IL", "5550000000"),
            ("Pine Prep", "Portland", "OR", ""),
        ] {
            run_with(
                &store,
                &["add", "--name", name, "--city", city, "--state", state, "--contact", contact],
            )
            .await
            .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn add_coerces_contact_like_the_api() {
        let store = MemorySchoolStore::new();
        let out = run_with(&store, &["add", "--name", "Oak High", "--contact", "5551234567", "--email", "oak@x.org"])
            .await
            .unwrap();
        assert_eq!(out, "✓ Created school 1 'Oak High'");

        let school = &store.list().await.unwrap()[0];
        assert_eq!(school.contact, Some(5551234567));
        assert_eq!(school.email_id, "oak@x.org");
        assert_eq!(school.address, "");
    }

    #[tokio::test]
    async fn add_rejects_bad_contact() {
        let store = MemorySchoolStore::new();
        let err = run_with(&store, &["add", "--name", "Oak", "--contact", "call me"]).await.unwrap_err();
        assert!(err.to_string().contains("contact: A valid integer is required."));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_searches_and_filters() {
        let store = seeded().await;

        let out = run_with(&store, &["list"]).await.unwrap();
        assert!(out.starts_with("id  name"));
        assert!(out.ends_with("3 of 3 schools"));
        assert!(out.contains("Pine Prep"));

        let out = run_with(&store, &["list", "--search", "spring"]).await.unwrap();
        assert!(out.ends_with("2 of 3 schools"));
        assert!(!out.contains("Pine Prep"));

        let out = run_with(&store, &["list", "--state", "OR"]).await.unwrap();
        assert!(out.ends_with("1 of 3 schools"));

        let out = run_with(&store, &["list", "--city", "Nowhere"]).await.unwrap();
        assert_eq!(out, "No schools match the given search and filters");
    }

    #[tokio::test]
    async fn list_json_output() {
        let store = seeded().await;
        let out = run_with(&store, &["--json", "list", "-s", "elm"]).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["total"], 3);
        assert_eq!(value["schools"][0]["name"], "Elm Middle");
    }

    #[tokio::test]
    async fn filters_lists_distinct_values() {
        let store = seeded().await;
        let out = run_with(&store, &["filters"]).await.unwrap();
        assert_eq!(
            out,
            "By state:\n  IL (2)\n  OR (1)\n\nBy city:\n  Portland (1)\n  Springfield (2)"
        );
    }

    #[tokio::test]
    async fn connect_store_reports_missing_database_url() {
        let config = crate::config::AppConfig::development().database;
        let err = connect_store(&config).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing configuration: DATABASE_URL");
    }

    #[tokio::test]
    async fn empty_store_messages() {
        let store = MemorySchoolStore::new();
        assert_eq!(run_with(&store, &["list"]).await.unwrap(), "No schools yet");
        assert_eq!(
            run_with(&store, &["filters"]).await.unwrap(),
            "By state:\n  (none)\n\nBy city:\n  (none)"
        );
        assert_eq!(run_with(&store, &["migrate"]).await.unwrap(), "✓ schools table ready (memory)");
    }
}
