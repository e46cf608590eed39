//! Prints stored leads as JSON lines, newest first.

use clap::Parser;

use rust_promo_leads::config::Config;
use rust_promo_leads::data::db::Database;
use rust_promo_leads::data::db_storage::PgLeadStore;

/// List captured leads
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Only show leads submitted with this email
    #[arg(long)]
    email: Option<String>,

    /// Maximum number of leads to print
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(i64).range(1..))]
    limit: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let db = Database::new(&config.database_url, 1).await?;
    let store = PgLeadStore::new(db.pool.clone());

    let leads = store.recent(args.email.as_deref(), args.limit).await?;
    tracing::info!("Fetched {} lead(s)", leads.len());

    for lead in leads {
        println!("{}", serde_json::to_string(&lead)?);
    }

    Ok(())
}
