//! Parameter structures for Atrium operations
//!
//! These are the argument objects of every externally invoked operation. They
//! carry serde derives so an agent runtime can pass JSON straight through, and
//! a JSON schema derive behind the `schema` feature for MCP tool listings. The
//! CLI and MCP layers wrap them rather than defining their own shapes:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{OfficeError, Result},
    spatial::{DeskDimensions, WorldPos},
};

/// Parameters for operations addressing a single task by ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskId {
    /// The ID of the task to operate on
    pub task_id: u64,
}

/// Parameters for operations addressing a conversation thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ThreadId {
    /// The conversation thread
    pub thread_id: String,
}

/// Parameters for starting a new planned task in a thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlanAndTodos {
    /// Conversation thread that owns the task
    pub thread_id: String,
    /// Short title of the task
    pub title: String,
    /// Optional longer description of the request
    #[serde(default)]
    pub description: Option<String>,
    /// The plan text, in markdown
    pub plan: String,
    /// Todo titles in execution order; at least one is required
    pub todos: Vec<String>,
}

/// Parameters for revising the active task of a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePlanOrTodos {
    /// Conversation thread whose active task is updated
    pub thread_id: String,
    /// New plan text; replaces the displayed plan
    #[serde(default)]
    pub updated_plan: Option<String>,
    /// Replaces every todo that is not yet completed
    #[serde(default)]
    pub new_pending_todos: Option<Vec<String>>,
    /// Mark the first unfinished todo as completed (default true)
    #[serde(default = "default_check_off")]
    pub check_off_current_todo: bool,
}

fn default_check_off() -> bool {
    true
}

impl Default for UpdatePlanOrTodos {
    fn default() -> Self {
        Self {
            thread_id: String::new(),
            updated_plan: None,
            new_pending_todos: None,
            check_off_current_todo: true,
        }
    }
}

impl UpdatePlanOrTodos {
    /// Checks the optional fields and returns them cleaned up.
    ///
    /// # Errors
    ///
    /// * `OfficeError::InvalidInput` - thread is blank, the plan text is
    ///   blank, or a todo title is blank
    pub fn validate(&self) -> Result<(Option<String>, Option<Vec<String>>)> {
        require_non_blank("thread_id", &self.thread_id)?;
        let plan = match &self.updated_plan {
            Some(plan) => {
                require_non_blank("updated_plan", plan)?;
                Some(plan.clone())
            }
            None => None,
        };
        let todos = self
            .new_pending_todos
            .as_deref()
            .map(|titles| clean_titles("new_pending_todos", titles))
            .transpose()?;
        Ok((plan, todos))
    }
}

/// Parameters for a path query between two world positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FindPath {
    pub start: WorldPos,
    pub end: WorldPos,
}

/// Parameters for laying out the desks of one team cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeskLayoutRequest {
    /// World position of the cluster centre
    #[serde(default)]
    pub cluster_position: WorldPos,
    /// Number of desks in the cluster
    pub total_desks: usize,
    /// Desk and employee sizes; reference sizes when omitted
    #[serde(default)]
    pub dimensions: Option<DeskDimensions>,
}

pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OfficeError::invalid_input(field).with_reason("must not be blank"));
    }
    Ok(())
}

/// Trims todo titles and rejects blank ones.
pub(crate) fn clean_titles(field: &str, titles: &[String]) -> Result<Vec<String>> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                Err(OfficeError::invalid_input(field)
                    .with_reason(format!("todo #{} has a blank title", i + 1)))
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_off_defaults_to_true() {
        let params: UpdatePlanOrTodos = serde_json::from_str(r#"{"thread_id": "t1"}"#).unwrap();
        assert!(params.check_off_current_todo);
        assert!(UpdatePlanOrTodos::default().check_off_current_todo);
    }

    #[test]
    fn test_update_validation_trims_titles() {
        let params = UpdatePlanOrTodos {
            thread_id: "t1".to_string(),
            new_pending_todos: Some(vec!["  d ".to_string()]),
            ..Default::default()
        };
        let (plan, todos) = params.validate().unwrap();
        assert_eq!(plan, None);
        assert_eq!(todos, Some(vec!["d".to_string()]));
    }

    #[test]
    fn test_update_validation_rejects_blank_plan() {
        let params = UpdatePlanOrTodos {
            thread_id: "t1".to_string(),
            updated_plan: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(OfficeError::InvalidInput { field, .. }) if field == "updated_plan"
        ));
    }

    #[test]
    fn test_blank_title_reports_position() {
        let err = clean_titles("todos", &["a".to_string(), "".to_string()]).unwrap_err();
        assert!(err.to_string().contains("todo #2"));
    }

    #[test]
    fn test_desk_layout_request_defaults() {
        let params: DeskLayoutRequest = serde_json::from_str(r#"{"total_desks": 4}"#).unwrap();
        assert_eq!(params.cluster_position, WorldPos::ORIGIN);
        assert!(params.dimensions.is_none());
    }
}
