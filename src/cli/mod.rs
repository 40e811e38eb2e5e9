pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

pub use client::{ApiClient, ClientError};

#[derive(Parser)]
#[command(name = "ogamba")]
#[command(about = "OGamba CLI - Command-line client for the OGamba data API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "OGAMBA_API_URL",
        default_value = "http://localhost:8000",
        help = "Base URL of the API server"
    )]
    pub url: String,

    #[arg(long, global = true, env = "OGAMBA_USER", help = "Identity sent in the user header")]
    pub user: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check server and database health")]
    Health,

    #[command(about = "Show the user the server resolves for this identity")]
    Whoami,

    #[command(about = "Project management")]
    Projects {
        #[command(subcommand)]
        cmd: commands::projects::ProjectCommands,
    },

    #[command(about = "Data item operations within a project")]
    Items {
        #[command(subcommand)]
        cmd: commands::items::ItemCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(cli.url, cli.user);

    match cli.command {
        Commands::Health => commands::system::health(&client, output_format).await,
        Commands::Whoami => commands::system::whoami(&client, output_format).await,
        Commands::Projects { cmd } => commands::projects::handle(cmd, &client, output_format).await,
        Commands::Items { cmd } => commands::items::handle(cmd, &client, output_format).await,
    }
}
