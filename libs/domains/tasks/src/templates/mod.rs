//! HTML page rendering.
//!
//! Pages are Handlebars templates compiled once at startup; values are
//! HTML-escaped by the default `{{ }}` syntax.

use crate::error::{TaskError, TaskResult};
use crate::models::{CompletionStats, Task};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Timestamp format used on every page (UTC).
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A task as shown on a page.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub is_completed: bool,
    pub created_at: String,
    pub completed_at: Option<String>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.to_string(),
            is_completed: task.is_completed(),
            created_at: task.created_at.format(DATE_FORMAT).to_string(),
            completed_at: task
                .completed_at
                .map(|at| at.format(DATE_FORMAT).to_string()),
        }
    }
}

/// Renders the index and reports pages.
#[derive(Clone)]
pub struct PageRenderer {
    handlebars: Arc<Handlebars<'static>>,
}

impl PageRenderer {
    pub fn new() -> TaskResult<Self> {
        let mut handlebars = Handlebars::new();

        handlebars
            .register_template_string("layout_head", LAYOUT_HEAD_TEMPLATE)
            .map_err(|e| TaskError::Template(format!("Failed to register layout_head: {}", e)))?;
        handlebars
            .register_template_string("index", INDEX_TEMPLATE)
            .map_err(|e| TaskError::Template(format!("Failed to register index: {}", e)))?;
        handlebars
            .register_template_string("reports", REPORTS_TEMPLATE)
            .map_err(|e| TaskError::Template(format!("Failed to register reports: {}", e)))?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    fn render<T: Serialize>(&self, template_name: &str, data: &T) -> TaskResult<String> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| TaskError::Template(e.to_string()))
    }

    /// Task list with the add form.
    pub fn render_index(&self, tasks: &[Task]) -> TaskResult<String> {
        debug!(tasks = tasks.len(), "Rendering index page");

        let tasks: Vec<TaskView> = tasks.iter().map(TaskView::from).collect();
        self.render("index", &json!({ "title": "Tasks", "tasks": tasks }))
    }

    /// Task list, completion counts, and the chart.
    pub fn render_reports(&self, tasks: &[Task], stats: &CompletionStats) -> TaskResult<String> {
        debug!(tasks = tasks.len(), "Rendering reports page");

        let tasks: Vec<TaskView> = tasks.iter().map(TaskView::from).collect();
        self.render(
            "reports",
            &json!({
                "title": "Reports",
                "tasks": tasks,
                "completed_count": stats.completed_count,
                "pending_count": stats.pending_count,
                "total": stats.total(),
                "completion_rate": format!("{:.1}", stats.completion_rate()),
            }),
        )
    }
}

const LAYOUT_HEAD_TEMPLATE: &str = r#"<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{title}} · Taskboard</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #222; }
    nav a { margin-right: 1rem; }
    table { width: 100%; border-collapse: collapse; margin-top: 1rem; }
    th, td { text-align: left; padding: .5rem; border-bottom: 1px solid #ddd; vertical-align: top; }
    .status-Completed { color: #1b7f3b; }
    .status-Pending { color: #b26a00; }
    form.add { display: grid; gap: .5rem; max-width: 480px; }
    .muted { color: #777; }
  </style>
</head>"#;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
{{> layout_head}}
<body>
  <nav><a href="/">Tasks</a><a href="/reports">Reports</a><a href="/download-db">Download database</a></nav>
  <h1>Tasks</h1>

  <form class="add" method="post" action="/add">
    <input type="text" name="title" placeholder="Title" maxlength="100" required>
    <textarea name="description" placeholder="Description (optional)" rows="3"></textarea>
    <button type="submit">Add task</button>
  </form>

  <table>
    <thead>
      <tr><th>Title</th><th>Status</th><th>Created</th><th>Completed</th><th></th></tr>
    </thead>
    <tbody>
      {{#each tasks}}
      <tr>
        <td>
          <strong>{{this.title}}</strong>
          {{#if this.description}}<div class="muted">{{this.description}}</div>{{/if}}
        </td>
        <td class="status-{{this.status}}">{{this.status}}</td>
        <td>{{this.created_at}}</td>
        <td>{{#if this.completed_at}}{{this.completed_at}}{{else}}-{{/if}}</td>
        <td>
          {{#unless this.is_completed}}<a href="/complete/{{this.id}}">Complete</a>{{/unless}}
          <a href="/delete/{{this.id}}">Delete</a>
        </td>
      </tr>
      {{else}}
      <tr><td colspan="5" class="muted">No tasks yet.</td></tr>
      {{/each}}
    </tbody>
  </table>
</body>
</html>
"#;

const REPORTS_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
{{> layout_head}}
<body>
  <nav><a href="/">Tasks</a><a href="/reports">Reports</a><a href="/download-db">Download database</a></nav>
  <h1>Reports</h1>

  <p>
    <strong>{{completed_count}}</strong> completed,
    <strong>{{pending_count}}</strong> pending
    of <strong>{{total}}</strong> tasks ({{completion_rate}}% complete).
  </p>

  <canvas id="completion-chart" width="400" height="200"></canvas>

  <table>
    <thead>
      <tr><th>Title</th><th>Status</th><th>Created</th><th>Completed</th></tr>
    </thead>
    <tbody>
      {{#each tasks}}
      <tr>
        <td>{{this.title}}</td>
        <td class="status-{{this.status}}">{{this.status}}</td>
        <td>{{this.created_at}}</td>
        <td>{{#if this.completed_at}}{{this.completed_at}}{{else}}-{{/if}}</td>
      </tr>
      {{else}}
      <tr><td colspan="4" class="muted">No tasks yet.</td></tr>
      {{/each}}
    </tbody>
  </table>

  <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
  <script>
    fetch('/chart-data')
      .then(function (res) { return res.json(); })
      .then(function (chart) {
        new Chart(document.getElementById('completion-chart'), {
          type: 'pie',
          data: {
            labels: chart.labels,
            datasets: [{ data: chart.data, backgroundColor: ['#1b7f3b', '#b26a00'] }]
          }
        });
      });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use chrono::{TimeZone, Utc};

    fn sample(id: i64, title: &str, completed: bool) -> Task {
        let created_at = Utc.with_ymd_and_hms(2024, 12, 6, 9, 30, 15).unwrap();
        Task {
            id,
            title: title.to_string(),
            description: Some("details".to_string()),
            status: if completed {
                TaskStatus::Completed
            } else {
                TaskStatus::Pending
            },
            created_at,
            completed_at: completed.then(|| created_at + chrono::Duration::hours(2)),
        }
    }

    #[test]
    fn test_task_view_formats_dates() {
        let view = TaskView::from(&sample(1, "a", true));

        assert_eq!(view.created_at, "2024-12-06 09:30");
        assert_eq!(view.completed_at.as_deref(), Some("2024-12-06 11:30"));
        assert_eq!(view.status, "Completed");
    }

    #[test]
    fn test_index_lists_tasks_with_actions() {
        let pages = PageRenderer::new().unwrap();
        let html = pages
            .render_index(&[sample(2, "Second", false), sample(1, "First", true)])
            .unwrap();

        assert!(html.contains("Second"));
        assert!(html.contains("First"));
        assert!(html.contains(r#"href="/complete/2""#));
        assert!(!html.contains(r#"href="/complete/1""#));
        assert!(html.contains(r#"href="/delete/1""#));
        assert!(html.find("Second") < html.find("First"));
    }

    #[test]
    fn test_index_escapes_html() {
        let pages = PageRenderer::new().unwrap();
        let html = pages
            .render_index(&[sample(1, "<script>alert(1)</script>", false)])
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_index_empty_state() {
        let pages = PageRenderer::new().unwrap();
        let html = pages.render_index(&[]).unwrap();

        assert!(html.contains("No tasks yet."));
    }

    #[test]
    fn test_reports_shows_counts() {
        let pages = PageRenderer::new().unwrap();
        let stats = CompletionStats::from_counts(4, 1);
        let html = pages.render_reports(&[sample(1, "Only", true)], &stats).unwrap();

        assert!(html.contains("<strong>1</strong> completed"));
        assert!(html.contains("<strong>3</strong> pending"));
        assert!(html.contains("25.0% complete"));
        assert!(html.contains("/chart-data"));
    }
}
