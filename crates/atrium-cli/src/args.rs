use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{LayoutArgs, PathArgs, TaskCommands};

/// Command-line interface for the Atrium virtual office
///
/// Atrium keeps the supervisor's task plans (a plan plus an ordered todo list
/// per conversation thread) in a SQLite database, and answers spatial queries
/// about the office floor: walking routes between desks and desk placement
/// inside team clusters. `serve` exposes the same operations as MCP tools.
#[derive(Parser)]
#[command(version, about, name = "atrium")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/atrium/atrium.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Atrium CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage supervisor tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Find a walking route across the office floor
    #[command(alias = "p")]
    Path(PathArgs),
    /// Lay out the desks of a team cluster
    #[command(alias = "l")]
    Layout(LayoutArgs),
    /// Start the MCP server
    Serve {
        /// Floor plan JSON loaded before serving. Defaults to an empty 20x20
        /// floor
        #[arg(long)]
        floor: Option<PathBuf>,
    },
}
