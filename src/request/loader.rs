// src/request/loader.rs

use std::path::Path;

use tracing::debug;

use crate::errors::{PlannerError, Result};
use crate::fs::FileSystem;
use crate::request::model::{ScheduleRequest, TaskSpec};

/// Parse a request document.
///
/// Accepts either a full request object (`{ "tasks": [...], "start": ... }`)
/// or a bare JSON array of tasks.
pub fn parse_request(contents: &str) -> Result<ScheduleRequest> {
    let value: serde_json::Value = serde_json::from_str(contents)?;

    let request = match value {
        serde_json::Value::Array(_) => {
            let tasks: Vec<TaskSpec> = serde_json::from_value(value)?;
            ScheduleRequest::from_tasks(tasks)
        }
        serde_json::Value::Object(_) => serde_json::from_value(value)?,
        other => {
            return Err(PlannerError::ConfigError(format!(
                "request must be a JSON object or array of tasks, got {}",
                json_kind(&other)
            )));
        }
    };

    Ok(request)
}

/// Read and parse a request file through the given filesystem.
pub fn load_request(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<ScheduleRequest> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;
    let request = parse_request(&contents)?;
    debug!(path = ?path, tasks = request.tasks.len(), "loaded scheduling request");
    Ok(request)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::request::TaskId;
    use crate::types::AllocationMode;

    #[test]
    fn bare_array_becomes_request_without_settings() {
        let request = parse_request(r#"[{ "id": "A" }, { "id": "B", "dependencies": ["A"] }]"#)
            .unwrap();
        assert_eq!(request.tasks.len(), 2);
        assert_eq!(request.start, None);
        assert_eq!(request.tasks[1].dependencies, vec![TaskId::from("A")]);
    }

    #[test]
    fn full_request_reads_camel_case_settings() {
        let request = parse_request(
            r#"{
                "start": "2026-01-05T09:00:00Z",
                "totalHours": 9,
                "mode": "perEstimate",
                "tasks": [{ "id": 1, "title": "Design", "estimatedHours": 3 }]
            }"#,
        )
        .unwrap();
        assert_eq!(request.total_hours, Some(9.0));
        assert_eq!(request.mode, Some(AllocationMode::PerEstimate));
        assert_eq!(request.tasks[0].identity(), Some(TaskId::from("1")));
    }

    #[test]
    fn scalar_document_is_a_config_error() {
        match parse_request("42") {
            Err(PlannerError::ConfigError(msg)) => assert!(msg.contains("a number")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn load_request_reads_through_filesystem() {
        let fs = MockFileSystem::new();
        fs.add_file("requests/week1.json", r#"[{ "title": "Only task" }]"#);

        let request = load_request(&fs, "requests/week1.json").unwrap();
        assert_eq!(request.tasks[0].title, "Only task");

        assert!(load_request(&fs, "requests/missing.json").is_err());
    }
}
