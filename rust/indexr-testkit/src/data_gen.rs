//! Seeded synthetic "task" records for property-style tests.
//!
//! Each generated task has:
//! - `project`: one of [`PROJECTS`];
//! - `state`: one of [`STATES`];
//! - `owner`: one of [`OWNERS`], missing for roughly one task in eight;
//! - `priority`: an integer in `0..4`;
//! - `tags`: zero to three entries of [`TAGS`], possibly repeated.

use indexr_collections::{Collection, Record, Value};

pub const PROJECTS: [&str; 3] = ["core", "web", "infra"];
pub const STATES: [&str; 3] = ["open", "review", "closed"];
pub const OWNERS: [&str; 4] = ["ann", "bob", "cyd", "dee"];
pub const TAGS: [&str; 5] = ["bug", "ui", "db", "perf", "docs"];

/// Generates one task record.
pub fn generate_task(rng: &mut fastrand::Rng) -> Record {
    let mut fields = vec![
        ("project", Value::from(PROJECTS[rng.usize(..PROJECTS.len())])),
        ("state", Value::from(STATES[rng.usize(..STATES.len())])),
        ("priority", Value::Int(rng.i64(0..4))),
    ];
    if rng.usize(..8) != 0 {
        fields.push(("owner", Value::from(OWNERS[rng.usize(..OWNERS.len())])));
    }
    let tags: Vec<Value> = (0..rng.usize(..4))
        .map(|_| Value::from(TAGS[rng.usize(..TAGS.len())]))
        .collect();
    fields.push(("tags", Value::List(tags.into())));
    fields.into_iter().collect()
}

/// Generates `count` tasks keyed `task-0`, `task-1`, ...
pub fn generate_keyed_tasks(count: usize, seed: u64) -> Collection {
    let mut rng = fastrand::Rng::with_seed(seed);
    Collection::keyed((0..count).map(|i| (format!("task-{i}"), generate_task(&mut rng))))
}

/// Generates `count` tasks as a sequence.
pub fn generate_task_sequence(count: usize, seed: u64) -> Collection {
    let mut rng = fastrand::Rng::with_seed(seed);
    Collection::sequence((0..count).map(|_| generate_task(&mut rng)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_seeded() {
        assert_eq!(generate_keyed_tasks(50, 9), generate_keyed_tasks(50, 9));
        assert_ne!(generate_task_sequence(50, 9), generate_task_sequence(50, 10));
    }

    #[test]
    fn test_some_tasks_lack_an_owner() {
        let tasks = generate_task_sequence(200, 1);
        let unowned = tasks.records().filter(|t| t.get("owner").is_absent()).count();
        assert!(unowned > 0 && unowned < tasks.len());
    }
}
