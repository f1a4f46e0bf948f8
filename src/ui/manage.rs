use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use serde::Serialize;

use super::App;
use crate::db::{Status, Student};
use crate::notice::Notice;

/// In-flight marks update. The target id is captured when the prompt opens
/// so a snapshot refresh cannot shift it to another row.
#[derive(Debug, Clone)]
struct MarksPrompt {
    id: i64,
    buf: String,
}

#[derive(Debug, Default)]
pub struct ManageState {
    table: TableState,
    prompt: Option<MarksPrompt>,
}

impl ManageState {
    pub(crate) fn clamp_cursor(&mut self, len: usize) {
        if len == 0 {
            self.table.select(None);
            self.prompt = None;
        } else {
            let i = self.table.selected().unwrap_or(0).min(len - 1);
            self.table.select(Some(i));
        }
    }

    pub(crate) fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    pub(crate) fn prompt_open(&self) -> bool {
        self.prompt.is_some()
    }
}

fn selected_student<'a>(app: &'a App) -> Option<&'a Student> {
    app.manage
        .table
        .selected()
        .and_then(|i| app.students.get(i))
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    if app.manage.prompt.is_some() {
        handle_prompt_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up => move_cursor(app, -1),
        KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('u') => {
            if let Some(s) = selected_student(app) {
                app.manage.prompt = Some(MarksPrompt {
                    id: s.id,
                    buf: String::new(),
                });
            }
        }
        KeyCode::Char('d') => delete_selected(app),
        KeyCode::Char('s') => export_snapshot(app),
        _ => {}
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    let Some(prompt) = app.manage.prompt.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() && prompt.buf.len() < 3 => prompt.buf.push(c),
        KeyCode::Backspace => {
            prompt.buf.pop();
        }
        KeyCode::Enter => apply_update(app),
        KeyCode::Esc => app.manage.cancel_prompt(),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: i64) {
    let len = app.students.len();
    if len == 0 {
        return;
    }
    let current = app.manage.table.selected().unwrap_or(0) as i64;
    let next = (current + delta).rem_euclid(len as i64) as usize;
    app.manage.table.select(Some(next));
}

fn apply_update(app: &mut App) {
    let Some(prompt) = app.manage.prompt.take() else {
        return;
    };
    // Widget-level range only; the store does not re-validate the bound.
    let marks = prompt.buf.parse::<i64>().unwrap_or(0).clamp(0, 100);
    match app.store.update_marks(prompt.id, marks) {
        Ok(notice) => app.push_notice(notice),
        Err(e) => app.push_notice(Notice::error(e.to_string())),
    }
    app.refresh();
}

fn delete_selected(app: &mut App) {
    let Some(id) = selected_student(app).map(|s| s.id) else {
        return;
    };
    // Immediate, no confirmation step.
    match app.store.delete_student(id) {
        Ok(notice) => app.push_notice(notice),
        Err(e) => app.push_notice(Notice::error(e.to_string())),
    }
    app.refresh();
}

#[derive(Serialize)]
struct ExportRow<'a> {
    id: i64,
    name: &'a str,
    age: i64,
    subject: &'a str,
    marks: i64,
    status: String,
}

/// Writes the current snapshot (with derived status) as JSON into the data
/// directory. Convenience export, not an API surface.
fn export_snapshot(app: &mut App) {
    let rows: Vec<ExportRow> = app
        .students
        .iter()
        .map(|s| ExportRow {
            id: s.id,
            name: &s.name,
            age: s.age,
            subject: &s.subject,
            marks: s.marks,
            status: s.status().to_string(),
        })
        .collect();

    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = app.config.data_dir.join(format!("students-{stamp}.json"));
    let result = std::fs::File::create(&path)
        .map_err(anyhow::Error::from)
        .and_then(|file| serde_json::to_writer_pretty(file, &rows).map_err(anyhow::Error::from));

    match result {
        Ok(()) => {
            tracing::info!(path = %path.display(), rows = rows.len(), "snapshot exported");
            app.push_notice(Notice::info(format!("Snapshot exported to {}", path.display())));
        }
        Err(e) => app.push_notice(Notice::error(format!("Snapshot export failed: {e}"))),
    }
}

pub(super) fn render(f: &mut Frame, area: Rect, app: &mut App) {
    if app.students.is_empty() {
        let empty = Paragraph::new("No records found. Go to 'Add Student' to create one.")
            .style(Style::default().fg(Color::Blue))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Manage Student Records"),
            );
        f.render_widget(empty, area);
        return;
    }

    let chunks = if app.manage.prompt.is_some() {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0)])
            .split(area)
    };

    let rows = app.students.iter().map(|s| {
        let status = s.status();
        let status_style = match status {
            Status::Pass => Style::default().fg(Color::Green),
            Status::Fail => Style::default().fg(Color::Red),
        };
        Row::new(vec![
            Cell::from(s.id.to_string()),
            Cell::from(s.name.clone()),
            Cell::from(s.age.to_string()),
            Cell::from(s.subject.clone()),
            Cell::from(s.marks.to_string()),
            Cell::from(status.to_string()).style(status_style),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(30),
            Constraint::Length(5),
            Constraint::Percentage(26),
            Constraint::Length(7),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["ID", "Name", "Age", "Subject", "Marks", "Status"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Manage Student Records"),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");
    f.render_stateful_widget(table, chunks[0], &mut app.manage.table);

    if let Some(prompt) = &app.manage.prompt {
        let input = Paragraph::new(format!(
            "New marks for student #{}: {}\u{258f}",
            prompt.id, prompt.buf
        ))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Update Marks"));
        f.render_widget(input, chunks[1]);
    }
}
