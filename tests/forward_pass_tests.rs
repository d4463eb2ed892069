use cpm_tool::Project;

fn project_with(tasks: &[(&str, i64, &[&str])]) -> Project {
    let mut project = Project::new();
    for (id, duration, preds) in tasks {
        let preds = preds.iter().map(|p| p.to_string()).collect();
        project
            .upsert_task(id, &format!("Task {id}"), *duration, Some(preds))
            .unwrap();
    }
    project
}

#[test]
fn single_task_project() {
    let mut project = project_with(&[("A", 5, &[])]);
    let summary = project.refresh().unwrap();

    let task = project.find_task("A").unwrap();
    assert_eq!(task.early_start, Some(0));
    assert_eq!(task.early_finish, Some(5));
    assert_eq!(task.late_start, Some(0));
    assert_eq!(task.late_finish, Some(5));
    assert_eq!(task.total_float, Some(0));
    assert_eq!(task.is_critical, Some(true));
    assert_eq!(summary.project_finish, 5);
}

#[test]
fn linear_chain_accumulates_early_dates() {
    let mut project = project_with(&[("A", 2, &[]), ("B", 3, &["A"]), ("C", 1, &["B"])]);
    project.refresh().unwrap();

    let a = project.find_task("A").unwrap();
    let b = project.find_task("B").unwrap();
    let c = project.find_task("C").unwrap();
    assert_eq!((a.early_start, a.early_finish), (Some(0), Some(2)));
    assert_eq!((b.early_start, b.early_finish), (Some(2), Some(5)));
    assert_eq!((c.early_start, c.early_finish), (Some(5), Some(6)));
    // Every task on a single chain is critical.
    for task in project.tasks() {
        assert_eq!(task.total_float, Some(0));
        assert_eq!(task.is_critical, Some(true));
    }
}

#[test]
fn merge_takes_max_over_predecessor_finishes() {
    let mut project = project_with(&[("A", 2, &[]), ("B", 5, &[]), ("C", 1, &["A", "B"])]);
    project.refresh().unwrap();

    let c = project.find_task("C").unwrap();
    assert_eq!(c.early_start, Some(5));
    assert_eq!(c.early_finish, Some(6));
}

#[test]
fn zero_duration_milestone_inherits_predecessor_finish() {
    let mut project = project_with(&[("A", 4, &[]), ("M", 0, &["A"]), ("B", 2, &["M"])]);
    project.refresh().unwrap();

    let milestone = project.find_task("M").unwrap();
    assert_eq!(milestone.early_start, Some(4));
    assert_eq!(milestone.early_finish, Some(4));
    assert_eq!(milestone.is_critical, Some(true));
}

#[test]
fn predecessor_references_match_case_insensitively() {
    let mut project = project_with(&[("Dig", 3, &[]), ("Pour", 2, &["DIG"])]);
    project.refresh().unwrap();

    let pour = project.find_task("pour").unwrap();
    assert_eq!(pour.early_start, Some(3));
}

#[test]
fn empty_project_refreshes_to_zero_summary() {
    let mut project = Project::new();
    let summary = project.refresh().unwrap();
    assert_eq!(summary.task_count, 0);
    assert_eq!(summary.critical_count, 0);
    assert_eq!(summary.project_finish, 0);
}
