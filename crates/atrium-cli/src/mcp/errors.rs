//! Error mapping for the MCP server

use atrium_core::OfficeError;
use rmcp::ErrorData;

/// Converts an office error into an MCP error.
///
/// Errors the caller can fix (unknown IDs, no active task, bad arguments)
/// become `invalid_params` so the agent sees them as its own mistake. Storage
/// and runtime failures become `internal_error`.
pub fn to_mcp_error(message: &str, error: &OfficeError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_caller_error() {
        ErrorData::invalid_params(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_missing_task_is_invalid_params() {
        let error = to_mcp_error("Failed to start todo", &OfficeError::TaskNotFound { id: 3 });
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert!(error.message.contains("Task with ID 3"));
    }

    #[test]
    fn test_environment_failure_is_internal() {
        let cause = OfficeError::XdgDirectory("no home".to_string());
        let error = to_mcp_error("Failed to list tasks", &cause);
        assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    }
}
