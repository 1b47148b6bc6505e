#![allow(dead_code)]

use taskplan::request::TaskId;

/// C needs B, B needs A, listed out of order.
pub const CHAIN_REQUEST: &str = r#"{
  "start": "2026-01-05T09:00:00Z",
  "totalHours": 9,
  "tasks": [
    { "id": "C", "title": "Ship",   "estimatedHours": 2, "dependencies": ["B"] },
    { "id": "A", "title": "Design", "estimatedHours": 3 },
    { "id": "B", "title": "Build",  "estimatedHours": 4, "dependencies": ["A"] }
  ]
}"#;

/// Two tasks waiting on each other, plus one independent task.
pub const CYCLE_REQUEST: &str = r#"[
  { "id": 1, "title": "Alpha", "dependencies": [2] },
  { "id": 2, "title": "Beta",  "dependencies": [1] },
  { "id": 3, "title": "Gamma" }
]"#;

pub fn ids(order: &[TaskId]) -> Vec<&str> {
    order.iter().map(|id| id.as_str()).collect()
}
