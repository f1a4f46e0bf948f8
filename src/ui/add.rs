use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::App;
use crate::db::NewStudent;
use crate::notice::Notice;
use crate::validate;

const NAME_MAX: usize = 60;
const SUBJECT_MAX: usize = 40;
const NUMBER_MAX: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Age,
    Subject,
    Marks,
}

impl Field {
    const ORDER: [Field; 4] = [Field::Name, Field::Age, Field::Subject, Field::Marks];

    fn next(self) -> Field {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Field {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Entry form state. The numeric fields are digit-only buffers; their range
/// constraints (age floor 1, marks 0-100) live at this widget level, not in
/// the validation chain.
#[derive(Debug, Clone)]
pub struct AddForm {
    focus: Field,
    name: String,
    age: String,
    subject: String,
    marks: String,
}

impl Default for AddForm {
    fn default() -> Self {
        Self {
            focus: Field::Name,
            name: String::new(),
            age: "1".to_string(),
            subject: String::new(),
            marks: "0".to_string(),
        }
    }
}

fn parse_or(buf: &str, fallback: i64) -> i64 {
    buf.parse().unwrap_or(fallback)
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.add.focus = app.add.focus.prev(),
        KeyCode::Down => app.add.focus = app.add.focus.next(),
        KeyCode::Enter => submit(app),
        KeyCode::Esc => app.add = AddForm::default(),
        KeyCode::Backspace => {
            field_buffer(app).pop();
        }
        KeyCode::Char(c) => match app.add.focus {
            Field::Name | Field::Subject => {
                let max = if app.add.focus == Field::Name {
                    NAME_MAX
                } else {
                    SUBJECT_MAX
                };
                let buf = field_buffer(app);
                if !c.is_control() && buf.chars().count() < max {
                    buf.push(c);
                }
            }
            Field::Age | Field::Marks => {
                let buf = field_buffer(app);
                if c.is_ascii_digit() && buf.len() < NUMBER_MAX {
                    buf.push(c);
                }
            }
        },
        _ => {}
    }
}

fn field_buffer(app: &mut App) -> &mut String {
    match app.add.focus {
        Field::Name => &mut app.add.name,
        Field::Age => &mut app.add.age,
        Field::Subject => &mut app.add.subject,
        Field::Marks => &mut app.add.marks,
    }
}

fn submit(app: &mut App) {
    // Widget-level clamps; the validation chain does not re-check these.
    let age = parse_or(&app.add.age, 1).max(1);
    let marks = parse_or(&app.add.marks, 0).clamp(0, 100);

    if let Err(e) = validate::new_student(&app.add.name, age, &app.add.subject) {
        app.push_notice(Notice::error(e.to_string()));
        return;
    }

    let new = NewStudent {
        name: app.add.name.clone(),
        age,
        subject: app.add.subject.clone(),
        marks,
    };
    match app.store.add_student(&new) {
        Ok(notice) => {
            app.push_notice(notice);
            app.add = AddForm::default();
            app.refresh();
        }
        Err(e) => app.push_notice(Notice::error(e.to_string())),
    }
}

pub(super) fn render(f: &mut Frame, area: Rect, app: &App) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title("Add New Student Record");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Intro
            Constraint::Length(3), // Name / Subject
            Constraint::Length(3), // Age / Marks
            Constraint::Min(0),
        ])
        .split(inner);

    let intro = Paragraph::new("Fill in the details below, then press Enter to save.")
        .style(Style::default().fg(Color::Gray));
    f.render_widget(intro, rows[0]);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    render_field(f, top[0], app, Field::Name, "Student Name", &app.add.name);
    render_field(f, top[1], app, Field::Subject, "Subject", &app.add.subject);
    render_field(f, bottom[0], app, Field::Age, "Age (1-100)", &app.add.age);
    render_field(f, bottom[1], app, Field::Marks, "Marks (0-100)", &app.add.marks);
}

fn render_field(f: &mut Frame, area: Rect, app: &App, field: Field, title: &str, value: &str) {
    let focused = app.add.focus == field;
    let border = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = if focused {
        format!("{value}\u{258f}")
    } else {
        value.to_string()
    };
    let widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );
    f.render_widget(widget, area);
}
