//! MCP tool handlers implementation

use std::sync::Arc;

use atrium_core::{
    display::Placements,
    params as core,
    spatial::{DeskLayout, FloorMap, FloorPlan as CoreFloorPlan},
    SupervisorToolset, ToolRequest,
};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types
///
/// `#[serde(transparent)]` passes (de)serialization straight through to the
/// core type; the manual [`JsonSchema`] impl does the same for the schema, so
/// the core crate needs no MCP-specific derives.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> McpParams<T>
where
    T: JsonSchema,
{
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

pub type TaskId = McpParams<core::TaskId>;
pub type ThreadId = McpParams<core::ThreadId>;
pub type CreatePlanAndTodos = McpParams<core::CreatePlanAndTodos>;
pub type UpdatePlanOrTodos = McpParams<core::UpdatePlanOrTodos>;
pub type FindPath = McpParams<core::FindPath>;
pub type DeskLayoutRequest = McpParams<core::DeskLayoutRequest>;
pub type FloorPlan = McpParams<CoreFloorPlan>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    tools: Arc<SupervisorToolset>,
    floor: Arc<FloorMap>,
}

impl McpHandlers {
    pub fn new(tools: Arc<SupervisorToolset>, floor: Arc<FloorMap>) -> Self {
        Self { tools, floor }
    }

    async fn dispatch(&self, context: &str, request: ToolRequest) -> McpResult {
        debug!("{}: {:?}", request.name(), request);

        let response = self
            .tools
            .dispatch(request)
            .await
            .map_err(|e| to_mcp_error(context, &e))?;

        Ok(CallToolResult::success(vec![Content::text(
            response.to_string(),
        )]))
    }

    pub async fn create_plan_and_todos(
        &self,
        Parameters(params): Parameters<CreatePlanAndTodos>,
    ) -> McpResult {
        self.dispatch(
            "Failed to create task",
            ToolRequest::CreatePlanAndTodos(params.into_inner()),
        )
        .await
    }

    pub async fn update_plan_or_todos(
        &self,
        Parameters(params): Parameters<UpdatePlanOrTodos>,
    ) -> McpResult {
        self.dispatch(
            "Failed to update task",
            ToolRequest::UpdatePlanOrTodos(params.into_inner()),
        )
        .await
    }

    pub async fn start_next_todo(&self, Parameters(params): Parameters<TaskId>) -> McpResult {
        self.dispatch(
            "Failed to start todo",
            ToolRequest::StartNextTodo(params.into_inner()),
        )
        .await
    }

    pub async fn complete_current_todo_and_move_to_next(
        &self,
        Parameters(params): Parameters<TaskId>,
    ) -> McpResult {
        self.dispatch(
            "Failed to complete todo",
            ToolRequest::CompleteCurrentTodoAndMoveToNext(params.into_inner()),
        )
        .await
    }

    pub async fn show_active_task(&self, Parameters(params): Parameters<ThreadId>) -> McpResult {
        self.dispatch(
            "Failed to load active task",
            ToolRequest::ShowActiveTask(params.into_inner()),
        )
        .await
    }

    pub async fn list_tasks(&self, Parameters(params): Parameters<ThreadId>) -> McpResult {
        self.dispatch(
            "Failed to list tasks",
            ToolRequest::ListTasks(params.into_inner()),
        )
        .await
    }

    pub async fn rebuild_floor(&self, Parameters(params): Parameters<FloorPlan>) -> McpResult {
        let plan = params.into_inner();
        debug!("rebuild_floor: {} obstacles", plan.obstacles.len());

        let grid = self.floor.rebuild(&plan);
        let result = format!(
            "Rebuilt floor: {}x{} cells of {} units, {} obstacles, {:.0}% walkable",
            grid.width(),
            grid.depth(),
            grid.cell_size(),
            plan.obstacles.len(),
            grid.walkable_ratio() * 100.0
        );
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn find_path(&self, Parameters(params): Parameters<FindPath>) -> McpResult {
        let core::FindPath { start, end } = params.into_inner();
        debug!("find_path: {start:?} -> {end:?}");

        match self.floor.find_path(start, end) {
            Some(path) => Ok(CallToolResult::success(vec![
                Content::text(format!("Route with {} waypoints", path.len())),
                Content::json(&path)?,
            ])),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                "No path found from ({}, {}) to ({}, {}).",
                start.x, start.z, end.x, end.z
            ))])),
        }
    }

    pub async fn desk_layout(&self, Parameters(params): Parameters<DeskLayoutRequest>) -> McpResult {
        let request = params.into_inner();
        debug!("desk_layout: {request:?}");

        let layout = DeskLayout::new(request.dimensions.unwrap_or_default());
        let placements = layout.cluster_layout(request.cluster_position, request.total_desks);
        let json = Content::json(&placements)?;

        Ok(CallToolResult::success(vec![
            Content::text(Placements(placements).to_string()),
            json,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use atrium_core::{
        spatial::{Aabb, Obstacle, ObstacleKind, WorldPos},
        TaskStoreBuilder,
    };
    use tempfile::TempDir;

    use super::*;

    async fn create_handlers() -> (TempDir, McpHandlers) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let planner = TaskStoreBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .expect("Failed to create planner");
        let floor = FloorMap::from_plan(&CoreFloorPlan::new(20.0, Vec::new()));
        let handlers = McpHandlers::new(
            Arc::new(SupervisorToolset::new(planner)),
            Arc::new(floor),
        );
        (temp_dir, handlers)
    }

    fn wrap<T: JsonSchema>(value: T) -> Parameters<McpParams<T>> {
        Parameters(McpParams(value))
    }

    fn first_text(result: &CallToolResult) -> String {
        result.content[0]
            .as_text()
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_task_tools_render_markdown() {
        let (_temp_dir, handlers) = create_handlers().await;

        let created = handlers
            .create_plan_and_todos(wrap(core::CreatePlanAndTodos {
                thread_id: "t1".to_string(),
                title: "Pitch deck".to_string(),
                description: None,
                plan: "Draft then polish".to_string(),
                todos: vec!["Draft".to_string(), "Polish".to_string()],
            }))
            .await
            .unwrap();
        assert!(first_text(&created).starts_with("Created task with ID: 1"));

        let started = handlers
            .start_next_todo(wrap(core::TaskId { task_id: 1 }))
            .await
            .unwrap();
        assert!(first_text(&started).starts_with("Started \"Draft\""));
    }

    #[tokio::test]
    async fn test_missing_active_task_is_invalid_params() {
        let (_temp_dir, handlers) = create_handlers().await;

        let error = handlers
            .update_plan_or_todos(wrap(core::UpdatePlanOrTodos {
                thread_id: "nobody".to_string(),
                ..Default::default()
            }))
            .await
            .unwrap_err();
        assert!(error.message.contains("nobody"));
    }

    #[tokio::test]
    async fn test_rebuilt_floor_blocks_route() {
        let (_temp_dir, handlers) = create_handlers().await;

        let found = handlers
            .find_path(wrap(core::FindPath {
                start: WorldPos::ground(-5.0, -5.0),
                end: WorldPos::ground(5.0, 5.0),
            }))
            .await
            .unwrap();
        assert_eq!(found.content.len(), 2);

        let wall = Obstacle::new(
            "wall",
            ObstacleKind::Generic,
            Aabb::new(WorldPos::ground(-10.0, -0.1), WorldPos::ground(10.0, 0.1)),
        );
        let rebuilt = handlers
            .rebuild_floor(wrap(CoreFloorPlan::new(20.0, vec![wall])))
            .await
            .unwrap();
        assert!(first_text(&rebuilt).contains("1 obstacles"));

        let outside = handlers
            .find_path(wrap(core::FindPath {
                start: WorldPos::ground(-5.0, -5.0),
                end: WorldPos::ground(5.0, 5.0),
            }))
            .await
            .unwrap();
        assert!(first_text(&outside).starts_with("No path found"));
    }

    #[tokio::test]
    async fn test_oversized_floor_rebuild_does_not_abort() {
        let (_temp_dir, handlers) = create_handlers().await;

        let rebuilt = handlers
            .rebuild_floor(wrap(CoreFloorPlan::new(1e10, Vec::new())))
            .await
            .unwrap();
        assert!(first_text(&rebuilt).starts_with("Rebuilt floor: 1x1 cells"));
        assert!(first_text(&rebuilt).contains("0% walkable"));
    }

    #[tokio::test]
    async fn test_desk_layout_returns_every_desk() {
        let (_temp_dir, handlers) = create_handlers().await;

        let result = handlers
            .desk_layout(wrap(core::DeskLayoutRequest {
                total_desks: 4,
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(first_text(&result).lines().count(), 4);
    }
}
