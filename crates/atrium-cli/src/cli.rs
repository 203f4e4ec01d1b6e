//! Command-line argument wrappers and the command runner.
//!
//! Arguments follow the parameter wrapper pattern: each clap struct here
//! converts into a core parameter type, so the core crate never sees clap.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner / spatial queries
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use atrium_core::{
    display::{GridMap, Placements},
    params::{CreatePlanAndTodos, TaskId, ThreadId, UpdatePlanOrTodos},
    spatial::{find_path, DeskLayout, FloorPlan, WorldPos},
    Planner,
};
use clap::{Args, Subcommand};
use log::debug;

use crate::renderer::TerminalRenderer;

/// Create a task with a plan and its todo list
///
/// Creating a task for a thread that already has an active task supersedes
/// it: the newest task of a thread is the one that is worked on.
#[derive(Args)]
pub struct CreateTaskArgs {
    /// Conversation thread the task belongs to
    pub thread_id: String,
    /// Title of the task
    pub title: String,
    /// The plan: how the task will be approached
    #[arg(short, long)]
    pub plan: String,
    /// Todo titles, in order. Repeat the flag or pass a comma-separated list
    #[arg(short, long = "todo", value_delimiter = ',')]
    pub todos: Vec<String>,
    /// Optional description providing more context about the task
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<CreateTaskArgs> for CreatePlanAndTodos {
    fn from(val: CreateTaskArgs) -> Self {
        CreatePlanAndTodos {
            thread_id: val.thread_id,
            title: val.title,
            description: val.description,
            plan: val.plan,
            todos: val.todos,
        }
    }
}

/// Revise the active task of a thread
///
/// By default the current todo is checked off. New todos replace every todo
/// that is not yet completed, and a new plan is appended as a revision.
#[derive(Args)]
pub struct UpdateTaskArgs {
    /// Conversation thread whose active task is updated
    pub thread_id: String,
    /// A revised plan, appended to the plan history
    #[arg(short, long)]
    pub plan: Option<String>,
    /// Replacement for the open todos, as a comma-separated list
    #[arg(short, long, value_delimiter = ',')]
    pub todos: Option<Vec<String>>,
    /// Leave the current todo open
    #[arg(long)]
    pub no_check_off: bool,
}

impl From<UpdateTaskArgs> for UpdatePlanOrTodos {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdatePlanOrTodos {
            thread_id: val.thread_id,
            updated_plan: val.plan,
            new_pending_todos: val.todos,
            check_off_current_todo: !val.no_check_off,
        }
    }
}

/// A task addressed by ID
#[derive(Args)]
pub struct TaskIdArgs {
    /// Unique identifier of the task
    pub task_id: u64,
}

impl From<TaskIdArgs> for TaskId {
    fn from(val: TaskIdArgs) -> Self {
        TaskId {
            task_id: val.task_id,
        }
    }
}

/// A conversation thread
#[derive(Args)]
pub struct ThreadArgs {
    /// Conversation thread identifier
    pub thread_id: String,
}

impl From<ThreadArgs> for ThreadId {
    fn from(val: ThreadArgs) -> Self {
        ThreadId {
            thread_id: val.thread_id,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a task with a plan and todos
    #[command(alias = "c")]
    Create(CreateTaskArgs),
    /// Check off, replace todos or revise the plan of the active task
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Start the next pending todo
    Start(TaskIdArgs),
    /// Complete the current todo and start the next one
    #[command(alias = "done")]
    Complete(TaskIdArgs),
    /// Show the active task of a thread
    #[command(alias = "s")]
    Show(ThreadArgs),
    /// Show a task by ID
    Get(TaskIdArgs),
    /// List every task of a thread, newest first
    #[command(aliases = ["h", "ls"])]
    History(ThreadArgs),
}

/// Find a walking route between two floor positions
#[derive(Args)]
pub struct PathArgs {
    /// Start X coordinate
    #[arg(allow_negative_numbers = true)]
    pub start_x: f64,
    /// Start Z coordinate
    #[arg(allow_negative_numbers = true)]
    pub start_z: f64,
    /// Goal X coordinate
    #[arg(allow_negative_numbers = true)]
    pub end_x: f64,
    /// Goal Z coordinate
    #[arg(allow_negative_numbers = true)]
    pub end_z: f64,
    /// Floor plan JSON to route across
    #[arg(long)]
    pub floor: Option<PathBuf>,
    /// Edge length of an empty floor, used when no floor plan is given
    #[arg(long, default_value_t = 20.0)]
    pub size: f64,
    /// Draw the grid with the route overlaid
    #[arg(long)]
    pub map: bool,
}

impl PathArgs {
    fn floor_plan(&self) -> Result<FloorPlan> {
        match &self.floor {
            Some(path) => FloorPlan::from_file(path)
                .with_context(|| format!("Failed to load floor plan {}", path.display())),
            None => Ok(FloorPlan::new(self.size, Vec::new())),
        }
    }
}

/// Lay out the desks of one team cluster
#[derive(Args)]
pub struct LayoutArgs {
    /// Number of desks in the cluster
    pub total_desks: usize,
    /// X coordinate of the cluster centre
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x: f64,
    /// Z coordinate of the cluster centre
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub z: f64,
}

/// Runs task commands against a planner and renders the results.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        let output = match command {
            TaskCommands::Create(args) => self
                .planner
                .create_task_result(&args.into())
                .await
                .context("Failed to create task")?
                .to_string(),
            TaskCommands::Update(args) => self
                .planner
                .update_plan_or_todos(&args.into())
                .await
                .context("Failed to update task")?
                .to_string(),
            TaskCommands::Start(args) => self
                .planner
                .start_next_todo(&args.into())
                .await
                .context("Failed to start todo")?
                .to_string(),
            TaskCommands::Complete(args) => self
                .planner
                .complete_current_todo_and_move_to_next(&args.into())
                .await
                .context("Failed to complete todo")?
                .to_string(),
            TaskCommands::Show(args) => self
                .planner
                .show_active_task(&args.into())
                .await
                .context("Failed to load active task")?
                .to_string(),
            TaskCommands::Get(args) => self
                .planner
                .show_task(&args.into())
                .await
                .context("Failed to load task")?
                .to_string(),
            TaskCommands::History(args) => self
                .planner
                .task_history(&args.into())
                .await
                .context("Failed to list tasks")?
                .to_string(),
        };
        self.renderer.render(&output)
    }
}

pub fn handle_path_command(args: &PathArgs, renderer: &TerminalRenderer) -> Result<()> {
    let grid = args.floor_plan()?.build_grid();
    let start = WorldPos::ground(args.start_x, args.start_z);
    let end = WorldPos::ground(args.end_x, args.end_z);
    debug!("Routing from {start:?} to {end:?}");

    let Some(path) = find_path(&grid, start, end) else {
        return renderer.render(&format!(
            "No path found from ({}, {}) to ({}, {}).\n",
            start.x, start.z, end.x, end.z
        ));
    };

    let mut output = format!("# Route with {} waypoints\n\n", path.len());
    if args.map {
        output.push_str(&GridMap::new(&grid).with_path(&path).to_string());
        output.push('\n');
    }
    for (i, point) in path.iter().enumerate() {
        output.push_str(&format!("{}. ({:.2}, {:.2})\n", i + 1, point.x, point.z));
    }
    renderer.render(&output)
}

pub fn handle_layout_command(args: &LayoutArgs, renderer: &TerminalRenderer) -> Result<()> {
    let cluster = WorldPos::ground(args.x, args.z);
    let placements = DeskLayout::default().cluster_layout(cluster, args.total_desks);
    let output = format!(
        "# Cluster of {} desks at ({}, {})\n\n{}",
        args.total_desks,
        args.x,
        args.z,
        Placements(placements)
    );
    renderer.render(&output)
}
