//! Daymark CLI Application
//!
//! Command-line interface for the Daymark message log: post, read, edit,
//! and delete messages; encode and decode plan-bearing content; or serve
//! the same operations over MCP.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use daymark_core::{Messenger, MessengerBuilder};
use log::info;
use mcp::{run_stdio_server, DaymarkMcpServer};
use renderer::TerminalRenderer;

async fn build_messenger(database_file: Option<PathBuf>) -> Result<Messenger> {
    MessengerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize messenger")
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { database_file, no_color, command } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);

    match command {
        // Codec commands are pure text transforms; skip opening the store
        Some(Commands::Codec { command }) => cli::run_codec_command(command, &renderer),
        Some(Commands::Message { command }) => {
            let messenger = build_messenger(database_file).await?;
            info!("Daymark started");
            Cli::new(messenger, renderer)
                .handle_message_command(command)
                .await
        }
        Some(Commands::Serve) => {
            let messenger = build_messenger(database_file).await?;
            info!("Starting Daymark MCP server");
            run_stdio_server(DaymarkMcpServer::new(messenger))
                .await
                .context("MCP server failed")
        }
        None => {
            let messenger = build_messenger(database_file).await?;
            Cli::new(messenger, renderer).list_feed().await
        }
    }
}
