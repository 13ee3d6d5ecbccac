use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::macros::format_description;
use todoflow_core::config::Palette;
use todoflow_core::dashboard::DashboardView;
use todoflow_core::error::AppError;
use todoflow_core::model::{StatusFilter, Todo};

#[derive(Tabled)]
struct TodoRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "done")]
    done: &'static str,
    title: String,
    description: String,
    priority: &'static str,
    due: String,
    id: String,
}

pub fn format_due(todo: &Todo) -> String {
    todo.due_date
        .and_then(|due| {
            due.format(format_description!("[month repr:short] [day padding:none]"))
                .ok()
        })
        .unwrap_or_else(|| "-".to_string())
}

fn tab_label(status: StatusFilter) -> &'static str {
    match status {
        StatusFilter::All => "All",
        StatusFilter::Active => "Active",
        StatusFilter::Completed => "Completed",
    }
}

pub fn render_dashboard(view: &DashboardView, palette: &Palette) -> String {
    let counts = view.counts();
    let mut lines = vec![format!(
        "Total Tasks: {}  Completed: {}  Remaining: {}",
        counts.total, counts.completed, counts.remaining
    )];

    let tabs: Vec<String> = view
        .tabs()
        .iter()
        .map(|(status, count)| {
            let label = format!("{} {}", tab_label(*status), count);
            if *status == view.status_filter() {
                palette.accentize(&format!("[{label}]"))
            } else {
                format!(" {label} ")
            }
        })
        .collect();
    lines.push(tabs.join(" "));
    lines.push(palette.mutedize(&format!("Priority: {}", view.priority_filter())));
    lines.push(String::new());

    match view.empty_state() {
        Some(empty) => {
            lines.push(empty.title.to_string());
            lines.push(palette.mutedize(empty.hint));
            if empty.offers_create {
                lines.push("Add your first todo with: add \"<title>\"".to_string());
            }
        }
        None => {
            let rows: Vec<TodoRow> = view
                .visible()
                .into_iter()
                .enumerate()
                .map(|(index, todo)| TodoRow {
                    position: index + 1,
                    done: if todo.completed { "x" } else { "" },
                    title: todo.title.clone(),
                    description: todo.description.clone().unwrap_or_else(|| "-".to_string()),
                    priority: todo.priority.as_str(),
                    due: format_due(todo),
                    id: todo.id.to_string(),
                })
                .collect();
            let mut table = Table::new(rows);
            table.with(Style::sharp());
            lines.push(table.to_string());
        }
    }

    lines.join("\n")
}

pub fn dashboard_json(view: &DashboardView) -> Result<serde_json::Value, AppError> {
    let counts = view.counts();
    let empty_state = view.empty_state().map(|empty| {
        serde_json::json!({
            "title": empty.title,
            "hint": empty.hint,
        })
    });

    Ok(serde_json::json!({
        "loading": view.is_loading(),
        "status_filter": view.status_filter(),
        "priority_filter": view.priority_filter(),
        "counts": {
            "total": counts.total,
            "completed": counts.completed,
            "remaining": counts.remaining,
        },
        "todos": serde_json::to_value(view.visible())?,
        "empty_state": empty_state,
    }))
}

#[cfg(test)]
mod tests {
    use super::{dashboard_json, format_due, render_dashboard};
    use todoflow_core::config::LandingTheme;
    use todoflow_core::dashboard::DashboardView;
    use todoflow_core::model::{NewTodo, Priority, StatusFilter};
    use todoflow_core::store::{MemoryStore, TodoStore};

    fn view_with_milk() -> DashboardView {
        let mut store = MemoryStore::new();
        store
            .create(
                NewTodo::titled("Buy milk")
                    .with_priority(Priority::High)
                    .with_due_date(todoflow_core::model::parse_due_date("2025-12-24").unwrap()),
            )
            .unwrap();
        let mut view = DashboardView::new();
        view.apply_push(store.list().unwrap());
        view
    }

    #[test]
    fn due_dates_render_short() {
        let view = view_with_milk();
        assert_eq!(format_due(&view.todos()[0]), "Dec 24");
    }

    #[test]
    fn dashboard_lists_visible_todos() {
        let view = view_with_milk();
        let rendered = render_dashboard(&view, &LandingTheme::Classic.palette());

        assert!(rendered.contains("Total Tasks: 1  Completed: 0  Remaining: 1"));
        assert!(rendered.contains("[All 1]"));
        assert!(rendered.contains("Buy milk"));
        assert!(rendered.contains("high"));
    }

    #[test]
    fn dashboard_shows_empty_state_for_filter() {
        let mut view = view_with_milk();
        view.set_status_filter(StatusFilter::Completed);
        let rendered = render_dashboard(&view, &LandingTheme::Classic.palette());

        assert!(rendered.contains("No completed tasks yet"));
        assert!(!rendered.contains("Add your first todo"));
    }

    #[test]
    fn json_contains_counts_and_filters() {
        let mut view = view_with_milk();
        view.set_status_filter(StatusFilter::Active);
        let json = dashboard_json(&view).unwrap();

        assert_eq!(json["loading"], false);
        assert_eq!(json["status_filter"], "active");
        assert_eq!(json["priority_filter"], "all");
        assert_eq!(json["counts"]["total"], 1);
        assert_eq!(json["todos"][0]["title"], "Buy milk");
        assert!(json["empty_state"].is_null());
    }

    #[test]
    fn json_reports_loading_before_first_push() {
        let json = dashboard_json(&DashboardView::new()).unwrap();

        assert_eq!(json["loading"], true);
        assert_eq!(json["counts"]["total"], 0);
        assert_eq!(json["empty_state"]["title"], "No todos yet");
    }
}
