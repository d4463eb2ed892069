use crate::task::Task;

/// Derive float and the critical flag from the computed start columns.
/// Float is `late_start - early_start`; for a correctly computed schedule
/// this equals `late_finish - early_finish` (asserted in tests, not
/// recomputed here). Zero float marks the task critical.
pub fn classify(tasks: &mut [Task]) {
    for task in tasks.iter_mut() {
        if let (Some(early_start), Some(late_start)) = (task.early_start, task.late_start) {
            let total_float = late_start - early_start;
            task.total_float = Some(total_float);
            task.is_critical = Some(total_float == 0);
        }
    }
}

/// Ids of the critical tasks, ordered by early start and then id so the
/// chain reads source-to-sink.
pub fn critical_path_ids(tasks: &[Task]) -> Vec<String> {
    let mut chain: Vec<(i64, String)> = tasks
        .iter()
        .filter(|task| task.is_critical == Some(true))
        .map(|task| (task.early_start.unwrap_or(0), task.id.trim().to_string()))
        .collect();
    chain.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    chain.into_iter().map(|(_, id)| id).collect()
}
