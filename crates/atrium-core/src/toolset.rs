//! The supervisor's callable tools.
//!
//! An agent runtime drives task planning through six tools. Each call is an
//! explicit [`ToolRequest`] value dispatched by [`SupervisorToolset`], so the
//! toolset does not depend on any runtime's calling convention. Runtimes that
//! only have a tool name and a JSON object use [`SupervisorToolset::call`].
//!
//! ```rust
//! use atrium_core::{Planner, SupervisorToolset};
//! use serde_json::json;
//!
//! # async fn example() -> atrium_core::Result<()> {
//! let tools = SupervisorToolset::new(Planner::in_memory());
//! let task = tools
//!     .call(
//!         "create_plan_and_todos",
//!         json!({
//!             "thread_id": "t1",
//!             "title": "Blog post",
//!             "plan": "Outline, draft, edit",
//!             "todos": ["Outline", "Draft", "Edit"]
//!         }),
//!     )
//!     .await?;
//! assert_eq!(task["todos"][0]["status"], "pending");
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    db::{SqliteAccess, StoreAccess},
    error::{OfficeError, Result},
    models::Task,
    params::{CreatePlanAndTodos, TaskId, ThreadId, UpdatePlanOrTodos},
    planner::{AdvanceOutcome, Planner, StartOutcome, Transition, UpdateOutcome},
};

/// Names of every registered tool, in registry order.
pub const TOOL_NAMES: [&str; 6] = [
    "create_plan_and_todos",
    "update_plan_or_todos",
    "start_next_todo",
    "complete_current_todo_and_move_to_next",
    "show_active_task",
    "list_tasks",
];

/// One tool invocation with its arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "tool", content = "arguments", rename_all = "snake_case")]
pub enum ToolRequest {
    CreatePlanAndTodos(CreatePlanAndTodos),
    UpdatePlanOrTodos(UpdatePlanOrTodos),
    StartNextTodo(TaskId),
    CompleteCurrentTodoAndMoveToNext(TaskId),
    ShowActiveTask(ThreadId),
    ListTasks(ThreadId),
}

impl ToolRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreatePlanAndTodos(_) => TOOL_NAMES[0],
            Self::UpdatePlanOrTodos(_) => TOOL_NAMES[1],
            Self::StartNextTodo(_) => TOOL_NAMES[2],
            Self::CompleteCurrentTodoAndMoveToNext(_) => TOOL_NAMES[3],
            Self::ShowActiveTask(_) => TOOL_NAMES[4],
            Self::ListTasks(_) => TOOL_NAMES[5],
        }
    }
}

/// The JSON-serializable result of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Created(Task),
    Updated(Transition<UpdateOutcome>),
    Started(Transition<StartOutcome>),
    Advanced(Transition<AdvanceOutcome>),
    Active(Option<Task>),
    History(Vec<Task>),
}

/// Dispatches tool requests to a [`Planner`].
#[derive(Debug, Clone)]
pub struct SupervisorToolset<A = SqliteAccess> {
    planner: Planner<A>,
}

impl<A: StoreAccess> SupervisorToolset<A> {
    pub fn new(planner: Planner<A>) -> Self {
        Self { planner }
    }

    pub fn planner(&self) -> &Planner<A> {
        &self.planner
    }

    /// The registry of tool names this toolset answers to.
    pub fn tool_names() -> &'static [&'static str] {
        &TOOL_NAMES
    }

    pub async fn dispatch(&self, request: ToolRequest) -> Result<ToolResponse> {
        log::debug!("Dispatching tool '{}'", request.name());
        let response = match request {
            ToolRequest::CreatePlanAndTodos(params) => {
                ToolResponse::Created(self.planner.create_plan_and_todos(&params).await?)
            }
            ToolRequest::UpdatePlanOrTodos(params) => {
                ToolResponse::Updated(self.planner.update_plan_or_todos(&params).await?)
            }
            ToolRequest::StartNextTodo(params) => {
                ToolResponse::Started(self.planner.start_next_todo(&params).await?)
            }
            ToolRequest::CompleteCurrentTodoAndMoveToNext(params) => ToolResponse::Advanced(
                self.planner
                    .complete_current_todo_and_move_to_next(&params)
                    .await?,
            ),
            ToolRequest::ShowActiveTask(params) => {
                ToolResponse::Active(self.planner.get_active_task(&params).await?)
            }
            ToolRequest::ListTasks(params) => {
                ToolResponse::History(self.planner.list_tasks(&params).await?)
            }
        };
        Ok(response)
    }

    /// Invokes a tool by name with a JSON argument object.
    ///
    /// # Errors
    ///
    /// * `OfficeError::UnknownTool` - `name` is not in [`TOOL_NAMES`]
    /// * `OfficeError::Serialization` - the arguments do not fit the tool
    /// * any error of the tool itself
    pub async fn call(&self, name: &str, arguments: Value) -> Result<Value> {
        if !TOOL_NAMES.contains(&name) {
            return Err(OfficeError::UnknownTool {
                name: name.to_string(),
            });
        }
        let request: ToolRequest =
            serde_json::from_value(json!({ "tool": name, "arguments": arguments }))?;
        let response = self.dispatch(request).await?;
        Ok(serde_json::to_value(response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SharedMemoryStore;

    fn toolset() -> SupervisorToolset<SharedMemoryStore> {
        SupervisorToolset::new(Planner::in_memory())
    }

    #[test]
    fn test_request_wire_format() {
        let request: ToolRequest = serde_json::from_value(json!({
            "tool": "start_next_todo",
            "arguments": { "task_id": 5 }
        }))
        .unwrap();
        assert!(matches!(request, ToolRequest::StartNextTodo(TaskId { task_id: 5 })));
        assert_eq!(request.name(), "start_next_todo");
    }

    #[test]
    fn test_every_request_name_is_registered() {
        let names = SupervisorToolset::<SharedMemoryStore>::tool_names();
        let requests = [
            ToolRequest::CreatePlanAndTodos(CreatePlanAndTodos::default()),
            ToolRequest::UpdatePlanOrTodos(UpdatePlanOrTodos::default()),
            ToolRequest::StartNextTodo(TaskId::default()),
            ToolRequest::CompleteCurrentTodoAndMoveToNext(TaskId::default()),
            ToolRequest::ShowActiveTask(ThreadId::default()),
            ToolRequest::ListTasks(ThreadId::default()),
        ];
        for request in &requests {
            assert!(names.contains(&request.name()));
        }
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = toolset().call("delete_everything", json!({})).await;
        assert!(matches!(result, Err(OfficeError::UnknownTool { name }) if name == "delete_everything"));
    }

    #[tokio::test]
    async fn test_bad_arguments_are_serialization_errors() {
        let result = toolset()
            .call("start_next_todo", json!({ "task_id": "seven" }))
            .await;
        assert!(matches!(result, Err(OfficeError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_call_round_trip_through_json() {
        let tools = toolset();
        let created = tools
            .call(
                "create_plan_and_todos",
                json!({ "thread_id": "t1", "title": "T", "plan": "P", "todos": ["a", "b"] }),
            )
            .await
            .unwrap();
        let task_id = created["id"].clone();

        let started = tools
            .call("start_next_todo", json!({ "task_id": task_id.clone() }))
            .await
            .unwrap();
        assert_eq!(started["started"], true);
        assert_eq!(started["task"]["todos"][0]["status"], "in-progress");

        let active = tools
            .call("show_active_task", json!({ "thread_id": "t1" }))
            .await
            .unwrap();
        assert_eq!(active["id"], task_id);

        let missing = tools
            .call("show_active_task", json!({ "thread_id": "other" }))
            .await
            .unwrap();
        assert!(missing.is_null());
    }

    #[tokio::test]
    async fn test_update_without_active_task_names_thread() {
        let result = toolset()
            .dispatch(ToolRequest::UpdatePlanOrTodos(UpdatePlanOrTodos {
                thread_id: "quiet".to_string(),
                ..Default::default()
            }))
            .await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "No active task found for thread 'quiet'");
    }
}
