//! Bulk spreadsheet scripts: seed the store from the tuition spreadsheet,
//! reconcile stored statuses against it, clear the collection, or run the
//! full sync (seed + reconcile) in one go.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mensalidades::planilha::{clear, reconcile, seed, ApiClient};

#[derive(Debug, Parser)]
#[command(name = "planilha", about = "Bulk import/reconcile installments from the tuition spreadsheet")]
struct Cli {
    /// Base URL of the running API
    #[arg(
        long,
        env = "API_BASE_URL",
        default_value = "http://localhost:3000/api/clientes"
    )]
    api_url: String,

    /// Path to the spreadsheet file
    #[arg(long, env = "PLANILHA_FILE", default_value = "planilha.xlsx")]
    sheet: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register every student row, generating full installment plans
    Seed {
        /// Monthly amount applied to every seeded installment
        #[arg(long, default_value = "100.00")]
        valor_mensalidade: Decimal,
    },
    /// Update stored statuses from the spreadsheet's S_ columns
    Reconcile,
    /// Delete every stored installment
    Clear,
    /// Seed then reconcile
    Sync {
        #[arg(long, default_value = "100.00")]
        valor_mensalidade: Decimal,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mensalidades=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let api = ApiClient::new(&cli.api_url)?;

    match cli.command {
        Command::Seed { valor_mensalidade } => {
            let summary = seed::run(&api, &cli.sheet, valor_mensalidade).await?;
            summary.ensure_ok()?;
        }
        Command::Reconcile => {
            let summary = reconcile::run(&api, &cli.sheet).await?;
            summary.ensure_ok()?;
        }
        Command::Clear => {
            let summary = clear::run(&api).await?;
            summary.ensure_ok()?;
        }
        Command::Sync { valor_mensalidade } => {
            let seeded = seed::run(&api, &cli.sheet, valor_mensalidade).await?;
            seeded.ensure_ok()?;
            let reconciled = reconcile::run(&api, &cli.sheet).await?;
            reconciled.ensure_ok()?;
        }
    }

    Ok(())
}
