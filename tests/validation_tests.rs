use cpm_tool::{Task, ValidationError, validate_tasks};

fn task(id: &str, duration: i64, preds: &[&str]) -> Task {
    let mut t = Task::new(id, format!("Task {id}"), duration);
    t.predecessors = preds.iter().map(|p| p.to_string()).collect();
    t
}

#[test]
fn valid_task_set_passes() {
    let tasks = vec![
        task("A", 2, &[]),
        task("B", 3, &["A"]),
        task("C", 1, &["A", "B"]),
    ];
    assert!(validate_tasks(&tasks).is_ok());
}

#[test]
fn empty_identifier_reported_with_row() {
    let tasks = vec![task("A", 2, &[]), task("   ", 1, &[])];
    let report = validate_tasks(&tasks).unwrap_err();
    assert_eq!(
        report.errors(),
        &[ValidationError::EmptyIdentifier { row: 1 }]
    );
}

#[test]
fn duplicate_after_normalization_reported_with_all_rows() {
    // "Task-1" and " task-1 " normalize to the same id.
    let tasks = vec![task("Task-1", 2, &[]), task(" task-1 ", 3, &[])];
    let report = validate_tasks(&tasks).unwrap_err();
    assert_eq!(
        report.errors(),
        &[ValidationError::DuplicateIdentifier {
            id: "task-1".into(),
            rows: vec![0, 1],
        }]
    );
}

#[test]
fn dangling_reference_names_task_and_missing_id() {
    let tasks = vec![task("X", 2, &["Y"])];
    let report = validate_tasks(&tasks).unwrap_err();
    assert_eq!(
        report.errors(),
        &[ValidationError::DanglingReference {
            task_id: "X".into(),
            row: 0,
            missing: "y".into(),
        }]
    );
}

#[test]
fn two_task_cycle_rejected() {
    let tasks = vec![task("A", 2, &["B"]), task("B", 3, &["A"])];
    let report = validate_tasks(&tasks).unwrap_err();
    assert_eq!(
        report.errors(),
        &[ValidationError::CyclicDependency {
            task_ids: vec!["a".into(), "b".into()],
        }]
    );
}

#[test]
fn self_dependency_rejected() {
    let tasks = vec![task("A", 2, &["a"])];
    let report = validate_tasks(&tasks).unwrap_err();
    assert!(matches!(
        report.errors(),
        [ValidationError::CyclicDependency { task_ids }] if task_ids == &["a".to_string()]
    ));
}

#[test]
fn cheap_violations_are_collected_into_one_report() {
    let tasks = vec![
        task("", 1, &[]),
        task("A", 2, &["missing"]),
        task("a ", 3, &[]),
        task("B", 1, &["also-missing"]),
    ];
    let report = validate_tasks(&tasks).unwrap_err();
    let errors = report.errors();
    assert_eq!(errors.len(), 4);
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::EmptyIdentifier { row: 0 })));
    assert!(errors.iter().any(|e| matches!(
        e,
        ValidationError::DuplicateIdentifier { id, rows } if id == "a" && rows == &[1, 2]
    )));
    assert!(errors.iter().any(|e| matches!(
        e,
        ValidationError::DanglingReference { missing, .. } if missing == "missing"
    )));
    assert!(errors.iter().any(|e| matches!(
        e,
        ValidationError::DanglingReference { missing, .. } if missing == "also-missing"
    )));
}

#[test]
fn cycle_check_waits_for_clean_cheap_checks() {
    // The dangling reference is reported alone; the cycle check never runs
    // on a structurally broken set.
    let tasks = vec![task("A", 2, &["A", "ghost"]), task("B", 1, &["A"])];
    let report = validate_tasks(&tasks).unwrap_err();
    assert_eq!(report.len(), 1);
    assert!(matches!(
        report.errors(),
        [ValidationError::DanglingReference { missing, .. }] if missing == "ghost"
    ));
}

#[test]
fn report_formats_human_readable_messages() {
    let tasks = vec![task("X", 2, &["Y"])];
    let report = validate_tasks(&tasks).unwrap_err();
    let message = report.to_string();
    assert!(message.contains("'X'"));
    assert!(message.contains("'y'"));
}
