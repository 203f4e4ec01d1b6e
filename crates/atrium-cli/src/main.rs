//! Atrium CLI Application
//!
//! Command-line and MCP front end for the Atrium virtual office.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use atrium_core::{spatial::FloorPlan, TaskStoreBuilder};
use clap::Parser;
use cli::{handle_layout_command, handle_path_command, Cli};
use log::info;
use mcp::{run_stdio_server, AtriumMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

/// Edge length of the floor served when no floor plan is given.
const DEFAULT_FLOOR_SIZE: f64 = 20.0;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);

    info!("Atrium started");

    match command {
        Task { command } => {
            let planner = TaskStoreBuilder::new()
                .with_database_path(database_file)
                .build()
                .await
                .context("Failed to initialize task store")?;
            Cli::new(planner, renderer)
                .handle_task_command(command)
                .await
        }
        Path(args) => handle_path_command(&args, &renderer),
        Layout(args) => handle_layout_command(&args, &renderer),
        Serve { floor } => {
            let planner = TaskStoreBuilder::new()
                .with_database_path(database_file)
                .build()
                .await
                .context("Failed to initialize task store")?;
            let floor_plan = match floor {
                Some(path) => FloorPlan::from_file(&path)
                    .with_context(|| format!("Failed to load floor plan {}", path.display()))?,
                None => FloorPlan::new(DEFAULT_FLOOR_SIZE, Vec::new()),
            };

            info!("Starting Atrium MCP server");
            run_stdio_server(AtriumMcpServer::new(planner, &floor_plan))
                .await
                .context("MCP server failed")
        }
    }
}
