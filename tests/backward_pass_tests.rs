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
fn parallel_paths_give_float_to_the_shorter_branch() {
    let mut project = project_with(&[("A", 2, &[]), ("B", 5, &[]), ("C", 1, &["A", "B"])]);
    let summary = project.refresh().unwrap();

    let a = project.find_task("A").unwrap();
    let b = project.find_task("B").unwrap();
    let c = project.find_task("C").unwrap();

    assert_eq!(a.total_float, Some(3));
    assert_eq!(a.is_critical, Some(false));
    assert_eq!((a.late_start, a.late_finish), (Some(3), Some(5)));

    assert_eq!(b.total_float, Some(0));
    assert_eq!(b.is_critical, Some(true));

    assert_eq!((c.late_start, c.late_finish), (Some(5), Some(6)));
    assert_eq!(summary.project_finish, 6);
    assert_eq!(summary.critical_path, vec!["B".to_string(), "C".to_string()]);
}

#[test]
fn diamond_marks_the_longer_branch_critical() {
    // 1 -> {2,3} -> 4 with durations 2,3,1,2
    let mut project = project_with(&[
        ("T1", 2, &[]),
        ("T2", 3, &["T1"]),
        ("T3", 1, &["T1"]),
        ("T4", 2, &["T2", "T3"]),
    ]);
    let summary = project.refresh().unwrap();

    let t2 = project.find_task("T2").unwrap();
    let t3 = project.find_task("T3").unwrap();
    let t4 = project.find_task("T4").unwrap();

    assert_eq!((t4.late_start, t4.late_finish), (Some(5), Some(7)));
    assert_eq!(t2.total_float, Some(0));
    assert_eq!(t2.is_critical, Some(true));
    assert_eq!(t3.total_float, Some(2));
    assert_eq!(t3.is_critical, Some(false));
    assert_eq!(summary.project_finish, 7);
    assert_eq!(
        summary.critical_path,
        vec!["T1".to_string(), "T2".to_string(), "T4".to_string()]
    );
}

#[test]
fn sink_late_finish_equals_project_finish() {
    let mut project = project_with(&[("A", 3, &[]), ("B", 4, &["A"])]);
    let summary = project.refresh().unwrap();

    let b = project.find_task("B").unwrap();
    assert_eq!(b.late_finish, Some(summary.project_finish));
    assert_eq!(b.late_start, Some(summary.project_finish - 4));
}

#[test]
fn multiple_sinks_all_anchor_on_global_finish() {
    // Two sinks: D (finishing at 7) and C (finishing at 3). Both anchor at
    // day 7, so C picks up 4 days of float.
    let mut project = project_with(&[
        ("A", 2, &[]),
        ("C", 1, &["A"]),
        ("B", 3, &["A"]),
        ("D", 2, &["B"]),
    ]);
    let summary = project.refresh().unwrap();
    assert_eq!(summary.project_finish, 7);

    let c = project.find_task("C").unwrap();
    let d = project.find_task("D").unwrap();
    assert_eq!(c.late_finish, Some(7));
    assert_eq!(c.total_float, Some(4));
    assert_eq!(d.late_finish, Some(7));
    assert_eq!(d.total_float, Some(0));
}
