pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

use client::LogClient;

#[derive(Parser)]
#[command(name = "travel-log")]
#[command(about = "Travel log CLI - command-line client for the Travel Log API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format instead of text")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "TRAVEL_LOG_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the Travel Log API"
    )]
    pub server: String,

    #[arg(
        long,
        global = true,
        env = "API_KEY",
        hide_env_values = true,
        help = "Shared API key for create and update"
    )]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check server and record store health")]
    Health,

    #[command(about = "List all travel logs")]
    List,

    #[command(about = "Create a travel log from --data or stdin")]
    Create {
        #[arg(long, help = "Travel log JSON (reads stdin when omitted)")]
        data: Option<String>,
    },

    #[command(about = "Update a travel log from --data or stdin")]
    Update {
        #[arg(help = "Travel log ID to update")]
        id: String,
        #[arg(long, help = "Travel log JSON (reads stdin when omitted)")]
        data: Option<String>,
    },

    #[command(about = "Delete a travel log")]
    Delete {
        #[arg(help = "Travel log ID to delete")]
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
    let client = LogClient::new(&cli.server, cli.api_key.clone())?;

    match cli.command {
        Commands::Health => commands::logs::health(&client, output_format).await,
        Commands::List => commands::logs::list(&client, output_format).await,
        Commands::Create { data } => commands::logs::create(&client, data, output_format).await,
        Commands::Update { id, data } => commands::logs::update(&client, &id, data, output_format).await,
        Commands::Delete { id } => commands::logs::delete(&client, &id, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_update_command() {
        let cli = Cli::try_parse_from([
            "travel-log",
            "--json",
            "--server",
            "http://127.0.0.1:4000",
            "update",
            "7f1f3c1e-8f0e-4a3b-9a55-0c6e2d4b9f10",
            "--data",
            "{}",
        ])
        .unwrap();

        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        assert!(Cli::try_parse_from(["travel-log", "--text", "list"]).is_err());
        assert_eq!(cli.server, "http://127.0.0.1:4000");
        match cli.command {
            Commands::Update { id, data } => {
                assert_eq!(id, "7f1f3c1e-8f0e-4a3b-9a55-0c6e2d4b9f10");
                assert_eq!(data.as_deref(), Some("{}"));
            }
            _ => panic!("expected update command"),
        }
    }
}
