//! Display implementations for domain models.
//!
//! Everything formats as markdown so the same text reads well in a terminal,
//! through the CLI renderer, and in an agent conversation.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{Task, TaskProgress, Todo, TodoStatus},
    planner::{AdvanceOutcome, StartOutcome, UpdateOutcome},
    spatial::DeskPlacement,
};

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.status.with_icon())
    }
}

impl fmt::Display for TaskProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} completed", self.completed, self.total)?;
        if self.in_progress > 0 {
            write!(f, ", {} in progress", self.in_progress)?;
        }
        if self.pending > 0 {
            write!(f, ", {} pending", self.pending)?;
        }
        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Thread: {}", self.thread_id)?;
        writeln!(f, "- Status: {}", if self.done { "done" } else { "active" })?;
        writeln!(f, "- Progress: {}", self.progress())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if let Some(plan) = self.current_plan() {
            writeln!(f, "\n## Plan")?;
            if self.plan_segments.len() > 1 {
                writeln!(f)?;
                writeln!(f, "_Revision {}_", self.plan_segments.len())?;
            }
            writeln!(f)?;
            writeln!(f, "{plan}")?;
        }

        if self.todos.is_empty() {
            writeln!(f, "\nNo todos in this task.")?;
        } else {
            writeln!(f, "\n## Todos")?;
            writeln!(f)?;
            for (position, todo) in self.todos.iter().enumerate() {
                writeln!(f, "{}. {todo}", position + 1)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for StartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)
    }
}

impl fmt::Display for AdvanceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut changes = Vec::new();
        if let Some(title) = &self.checked_off {
            changes.push(format!("Checked off \"{title}\""));
        }
        if let Some(count) = self.todos_replaced {
            changes.push(format!("Replaced {count} open todo(s)"));
        }
        if self.plan_revised {
            changes.push("Revised the plan".to_string());
        }
        if self.finished {
            changes.push("Task finished".to_string());
        }

        if changes.is_empty() {
            return writeln!(f, "No changes made.");
        }
        writeln!(f, "Changes made:")?;
        for change in &changes {
            writeln!(f, "- {change}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeskPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.position;
        let s = self.stand_position;
        write!(
            f,
            "Desk {}: ({:.2}, {:.2}, {:.2}) facing {:.4} rad, employee at ({:.2}, {:.2}, {:.2})",
            self.desk_index, p.x, p.y, p.z, self.rotation_y, s.x, s.y, s.z
        )
    }
}
