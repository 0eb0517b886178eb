use clap::{Args, Parser, Subcommand};
use crm_app::database::{self, Db};

mod import;
mod migrate;
mod seed;

#[derive(Debug, Parser)]
#[command(name = "crm-app", about = "CRM administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),

    /// Bulk-import customers from a JSON array file
    ImportCustomers(import::ImportCustomersArgs),

    /// Insert sample customers, products and an order
    Seed(seed::SeedArgs),
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        let pool = database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        Ok(Db::new(pool))
    }
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::ImportCustomers(args) => import::run(args).await,
            Commands::Seed(args) => seed::run(args).await,
        }
    }
}
