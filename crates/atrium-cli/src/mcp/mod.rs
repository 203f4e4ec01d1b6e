//! MCP server implementation for Atrium
//!
//! Exposes the supervisor's task tools and the floor's spatial queries over
//! the Model Context Protocol on stdio.

use std::sync::Arc;

use anyhow::Result;
use atrium_core::{
    spatial::{FloorMap, FloorPlan as CoreFloorPlan},
    Planner, SupervisorToolset,
};
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    CreatePlanAndTodos, DeskLayoutRequest, FindPath, FloorPlan, McpResult, TaskId, ThreadId,
    UpdatePlanOrTodos,
};

/// MCP server for Atrium
#[derive(Clone)]
pub struct AtriumMcpServer {
    tools: Arc<SupervisorToolset>,
    floor: Arc<FloorMap>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AtriumMcpServer {
    /// Create a server over `planner`, with the grid built from `floor_plan`
    pub fn new(planner: Planner, floor_plan: &CoreFloorPlan) -> Self {
        Self {
            tools: Arc::new(SupervisorToolset::new(planner)),
            floor: Arc::new(FloorMap::from_plan(floor_plan)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.tools.clone(), self.floor.clone())
    }

    #[tool(
        name = "create_plan_and_todos",
        description = "Create a task for a conversation thread: a title, the plan, and the ordered todo titles (at least one). Every todo starts pending. A new task supersedes the thread's previous active task. Returns the task with its ID."
    )]
    async fn create_plan_and_todos(&self, params: Parameters<CreatePlanAndTodos>) -> McpResult {
        self.handlers().create_plan_and_todos(params).await
    }

    #[tool(
        name = "update_plan_or_todos",
        description = "Revise the thread's active task. check_off_current_todo (default true) completes the current todo. new_pending_todos replaces every todo that is not completed yet. updated_plan is appended as a new plan revision. The task is done once no open todos remain."
    )]
    async fn update_plan_or_todos(&self, params: Parameters<UpdatePlanOrTodos>) -> McpResult {
        self.handlers().update_plan_or_todos(params).await
    }

    #[tool(
        name = "start_next_todo",
        description = "Mark the first pending todo of a task as in progress. Does nothing if a todo is already in progress."
    )]
    async fn start_next_todo(&self, params: Parameters<TaskId>) -> McpResult {
        self.handlers().start_next_todo(params).await
    }

    #[tool(
        name = "complete_current_todo_and_move_to_next",
        description = "Complete the current todo of a task and start the next pending one. Reports when all todos are completed and the task is done."
    )]
    async fn complete_current_todo_and_move_to_next(&self, params: Parameters<TaskId>) -> McpResult {
        self.handlers()
            .complete_current_todo_and_move_to_next(params)
            .await
    }

    #[tool(
        name = "show_active_task",
        description = "Show the active task of a thread with its plan, todos and progress."
    )]
    async fn show_active_task(&self, params: Parameters<ThreadId>) -> McpResult {
        self.handlers().show_active_task(params).await
    }

    #[tool(
        name = "list_tasks",
        description = "List every task of a thread, newest first, including finished ones."
    )]
    async fn list_tasks(&self, params: Parameters<ThreadId>) -> McpResult {
        self.handlers().list_tasks(params).await
    }

    #[tool(
        name = "rebuild_floor",
        description = "Replace the office floor plan: floor_size and the obstacles (desks, clusters, walls) agents must walk around. Routes found afterwards use the new grid."
    )]
    async fn rebuild_floor(&self, params: Parameters<FloorPlan>) -> McpResult {
        self.handlers().rebuild_floor(params).await
    }

    #[tool(
        name = "find_path",
        description = "Find a walking route between two floor positions. Returns the waypoints as JSON, or a note that no route exists."
    )]
    async fn find_path(&self, params: Parameters<FindPath>) -> McpResult {
        self.handlers().find_path(params).await
    }

    #[tool(
        name = "desk_layout",
        description = "Compute desk positions, rotations and employee standing spots for a team cluster of total_desks desks centred on cluster_position."
    )]
    async fn desk_layout(&self, params: Parameters<DeskLayoutRequest>) -> McpResult {
        self.handlers().desk_layout(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for AtriumMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "atrium".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                r#"Atrium is the back end of a virtual office run by a supervisor agent.

## Task Tools
Each conversation thread has at most one active task: its newest task that is not done. A task has a plan and an ordered todo list; todos move pending → in-progress → completed.

1. `create_plan_and_todos` to start a task
2. `start_next_todo`, then `complete_current_todo_and_move_to_next` as work finishes
3. `update_plan_or_todos` to check off work, replace the remaining todos or revise the plan
4. `show_active_task` and `list_tasks` to review

## Floor Tools
- `rebuild_floor` loads the obstacles of the office floor
- `find_path` routes an agent between two positions
- `desk_layout` places the desks of a team cluster"#
                    .to_string(),
            ),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: AtriumMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Atrium MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
