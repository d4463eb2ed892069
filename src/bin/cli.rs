use chrono::NaiveDate;
use cpm_tool::calculations::critical_path::critical_path_ids;
use cpm_tool::{
    Project, Task, load_project_from_csv, load_project_from_json, save_project_to_csv,
    save_project_to_json, split_predecessors,
};
use std::io::{self, Write};

fn render_tasks_as_text_table(tasks: &[Task]) -> String {
    let headers = [
        "id", "description", "dur", "preds", "status", "ES", "EF", "LS", "LF", "float", "crit",
    ];

    let fmt_opt = |v: Option<i64>| v.map(|x| x.to_string()).unwrap_or_default();
    let rows: Vec<[String; 11]> = tasks
        .iter()
        .map(|t| {
            [
                t.id.clone(),
                t.description.clone(),
                t.duration_days.to_string(),
                t.predecessors.join(","),
                t.status.clone(),
                fmt_opt(t.early_start),
                fmt_opt(t.early_finish),
                fmt_opt(t.late_start),
                fmt_opt(t.late_finish),
                fmt_opt(t.total_float),
                match t.is_critical {
                    Some(true) => "Yes".to_string(),
                    Some(false) => "No".to_string(),
                    None => String::new(),
                },
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push('|');
    for (i, name) in headers.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        out.push_str(&" ".repeat(widths[i] - name.len()));
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row in &rows {
        out.push('|');
        for (ci, cell) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            out.push_str(&" ".repeat(widths[ci].saturating_sub(cell.len())));
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show current task table\n  add <id> <description> <duration> [preds]\n                                     Upsert a task (preds like a,b,c)\n  status <id> <text...>              Set a task's status label\n  delete <id>                        Delete a task and clean up references\n  compute                            Validate and recompute the schedule\n  critical                           Show the critical path\n  dates                              Show calendar dates (needs meta start)\n  meta show                          Show project metadata\n  meta name <text...>                Update project name\n  meta start <YYYY-MM-DD|none>       Set or clear the calendar start date\n  save <json|csv> <path>             Persist project to disk\n  load <json|csv> <path>             Load project from disk\n  quit|exit                          Exit"
    );
}

fn print_metadata(project: &Project) {
    let metadata = project.metadata();
    println!("Project name : {}", metadata.project_name);
    match metadata.start_date {
        Some(date) => println!("Start date   : {date}"),
        None => println!("Start date   : (not set)"),
    }
}

fn main() {
    let mut project = Project::new();

    println!("CPM Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => println!("{}", render_tasks_as_text_table(project.tasks())),
            "add" => {
                let id_s = parts.next();
                let desc_s = parts.next();
                let dur_s = parts.next();
                let preds_s = parts.next();
                match (id_s, desc_s, dur_s) {
                    (Some(id), Some(desc), Some(dur_s)) => {
                        let duration: i64 = match dur_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid duration");
                                continue;
                            }
                        };
                        let preds = preds_s.map(split_predecessors);
                        match project.upsert_task(id, desc, duration, preds) {
                            Ok(_) => {
                                println!("Task upserted.");
                                println!("{}", render_tasks_as_text_table(project.tasks()));
                            }
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Usage: add <id> <description> <duration> [preds]"),
                }
            }
            "status" => {
                let id_s = parts.next();
                let rest: Vec<&str> = parts.collect();
                match id_s {
                    Some(id) if !rest.is_empty() => {
                        if project.set_task_status(id, &rest.join(" ")) {
                            println!("Status set.");
                        } else {
                            println!("Task {id} not found.");
                        }
                    }
                    _ => println!("Usage: status <id> <text...>"),
                }
            }
            "delete" => match parts.next() {
                Some(id) => {
                    if project.delete_task(id) {
                        println!("Deleted task {id}.");
                        println!("{}", render_tasks_as_text_table(project.tasks()));
                    } else {
                        println!("Task {id} not found.");
                    }
                }
                None => println!("Usage: delete <id>"),
            },
            "compute" => match project.refresh() {
                Ok(summary) => println!(
                    "Refreshed ({})\n{}",
                    summary.to_cli_summary(),
                    render_tasks_as_text_table(project.tasks())
                ),
                Err(report) => {
                    println!("Validation failed:");
                    for error in report.errors() {
                        println!("  - {error}");
                    }
                }
            },
            "critical" => {
                let chain = critical_path_ids(project.tasks());
                if chain.is_empty() {
                    println!("No critical tasks (run compute first).");
                } else {
                    println!("Critical path: {}", chain.join(" -> "));
                }
            }
            "dates" => match project.task_dates() {
                Some(rows) => {
                    for row in rows {
                        println!("{:<16} {} .. {}", row.id, row.start, row.finish);
                    }
                }
                None => println!("Set 'meta start' and run compute first."),
            },
            "meta" => match parts.next() {
                Some("show") => print_metadata(&project),
                Some("name") => {
                    let rest: Vec<&str> = parts.collect();
                    if rest.is_empty() {
                        println!("Usage: meta name <text...>");
                    } else {
                        project.set_project_name(rest.join(" "));
                        println!("Project name set.");
                    }
                }
                Some("start") => match parts.next() {
                    Some("none") => {
                        project.set_start_date(None);
                        println!("Start date cleared.");
                    }
                    Some(date_s) => match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                        Ok(date) => {
                            project.set_start_date(Some(date));
                            println!("Start date set to {date}.");
                        }
                        Err(_) => println!("Invalid date (YYYY-MM-DD)"),
                    },
                    None => println!("Usage: meta start <YYYY-MM-DD|none>"),
                },
                _ => println!("Usage: meta <show|name|start>"),
            },
            "save" => {
                let format = parts.next();
                let path = parts.next();
                match (format, path) {
                    (Some("json"), Some(path)) => match save_project_to_json(&project, path) {
                        Ok(_) => println!("Project saved to {path}."),
                        Err(e) => println!("Error: {e}"),
                    },
                    (Some("csv"), Some(path)) => match save_project_to_csv(&project, path) {
                        Ok(_) => println!("Project saved to {path}."),
                        Err(e) => println!("Error: {e}"),
                    },
                    _ => println!("Usage: save <json|csv> <path>"),
                }
            }
            "load" => {
                let format = parts.next();
                let path = parts.next();
                let loaded = match (format, path) {
                    (Some("json"), Some(path)) => Some((load_project_from_json(path), path)),
                    (Some("csv"), Some(path)) => Some((load_project_from_csv(path), path)),
                    _ => {
                        println!("Usage: load <json|csv> <path>");
                        None
                    }
                };
                if let Some((result, path)) = loaded {
                    match result {
                        Ok(p) => {
                            project = p;
                            println!("Project loaded from {path}.");
                            println!("{}", render_tasks_as_text_table(project.tasks()));
                        }
                        Err(e) => println!("Error: {e}"),
                    }
                }
            }
            other => println!("Unknown command '{other}' (try 'help')"),
        }
    }
}
