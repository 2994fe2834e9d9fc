// CLI module: server startup and administrative operations

pub mod create_admin;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::BootstrapSettings;

/// Hotel backend server and administration CLI
#[derive(Parser)]
#[command(name = "hotel_backend")]
#[command(about = "Hotel management backend", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run migrations and start the HTTP server
    Serve,

    /// Run pending database migrations and exit
    Migrate,

    /// Create a confirmed account with the admin role
    CreateAdmin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        full_name: Option<String>,
    },
}

/// Execute CLI command
///
/// Routes the parsed CLI command to the appropriate handler function.
pub async fn execute_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = BootstrapSettings::from_env()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_server(settings).await?,
        Commands::Migrate => migrate::run_migrations(&settings).await?,
        Commands::CreateAdmin {
            email,
            password,
            full_name,
        } => create_admin::run(settings, &email, &password, full_name).await?,
    }

    Ok(())
}
