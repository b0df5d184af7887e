//! Filedock CLI — ingest files into the store and manage upload records.
//!
//! Configuration comes from the environment (or a `.env` file): DATABASE_URL,
//! STORAGE_PATH, and PUBLIC_BASE_URL are required.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use filedock_cli::{content_type_for, init_tracing};
use filedock_core::models::{FilePayload, UploadRecord};
use filedock_core::Config;
use filedock_db::{run_migrations, PgUploadRepository};
use filedock_services::{FileStore, LocalFileStore, UploadIngestor, UploadRepository};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "filedock", about = "Filedock upload CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest one or more files from disk
    Ingest {
        /// Paths of the files to ingest
        files: Vec<std::path::PathBuf>,
    },
    /// List uploads, newest first
    List {
        /// List soft-deleted uploads instead of active ones
        #[arg(long)]
        trashed: bool,
    },
    /// Search uploads by original name (case-insensitive substring)
    Search {
        /// Search term
        term: String,
        /// Search soft-deleted uploads instead of active ones
        #[arg(long)]
        trashed: bool,
    },
    /// Get a single upload by ID or by original name
    Get {
        /// Upload UUID
        id: Option<String>,
        /// Look up by original (encoded) file name instead
        #[arg(long)]
        name: Option<String>,
    },
    /// Write an upload's bytes to stdout
    Cat {
        /// Upload UUID
        id: String,
    },
    /// Toggle the soft-delete flag on an upload
    Trash {
        /// Upload UUID
        id: String,
    },
    /// Permanently delete an upload (backing file and record)
    Rm {
        /// Upload UUID
        id: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn fetch_record(
    repository: &dyn UploadRepository,
    id: &str,
) -> anyhow::Result<UploadRecord> {
    let id = Uuid::parse_str(id).context("Invalid upload ID")?;
    repository
        .get_by_id(id)
        .await?
        .with_context(|| format!("Upload {} not found", id))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await?;

    let store = Arc::new(
        LocalFileStore::new(config.storage_path.clone(), config.public_base_url.clone()).await?,
    );
    let repository = Arc::new(PgUploadRepository::new(pool));
    let ingestor =
        UploadIngestor::new(store.clone(), repository.clone(), config.max_file_size_bytes);

    match cli.command {
        Commands::Ingest { files } => {
            let mut payloads = Vec::with_capacity(files.len());
            for path in &files {
                let data = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .with_context(|| format!("Invalid file name: {}", path.display()))?;
                payloads.push(FilePayload::new(name, content_type_for(name), data));
            }

            let records = ingestor.ingest(payloads).await?;
            print_json(&records)?;
        }
        Commands::List { trashed } => {
            print_json(&repository.list(trashed).await?)?;
        }
        Commands::Search { term, trashed } => {
            print_json(&repository.search(&term, trashed).await?)?;
        }
        Commands::Get { id, name } => {
            let record = match (id, name) {
                (Some(id), _) => {
                    let id = Uuid::parse_str(&id).context("Invalid upload ID")?;
                    repository.get_by_id(id).await?
                }
                (None, Some(name)) => repository.get_by_original_name(&name).await?,
                (None, None) => anyhow::bail!("Provide an upload ID or --name"),
            };
            match record {
                Some(record) => print_json(&record)?,
                None => anyhow::bail!("Upload not found"),
            }
        }
        Commands::Cat { id } => {
            let record = fetch_record(repository.as_ref(), &id).await?;
            let data = store.load(&record.stored_name).await?;
            use std::io::Write;
            std::io::stdout().write_all(&data)?;
        }
        Commands::Trash { id } => {
            let record = fetch_record(repository.as_ref(), &id).await?;
            print_json(&ingestor.toggle_soft_delete(&record).await?)?;
        }
        Commands::Rm { id } => {
            let record = fetch_record(repository.as_ref(), &id).await?;
            ingestor.remove(&record).await?;
            println!("Deleted {}", record.stored_name);
        }
    }

    Ok(())
}
