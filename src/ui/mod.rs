mod add;
mod dashboard;
mod manage;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};

use crate::config::Config;
use crate::db::{Store, Student};
use crate::notice::{Level, Notice};

pub use add::AddForm;
pub use manage::ManageState;

const TICK_RATE: Duration = Duration::from_millis(250);
const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    AddStudent,
    ManageRecords,
}

impl Screen {
    const ORDER: [Screen; 3] = [Screen::Dashboard, Screen::AddStudent, Screen::ManageRecords];

    fn title(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::AddStudent => "Add Student",
            Screen::ManageRecords => "Manage Records",
        }
    }

    fn index(self) -> usize {
        Self::ORDER.iter().position(|s| *s == self).unwrap_or(0)
    }

    fn next(self) -> Screen {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Screen {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

pub struct App {
    pub(crate) config: Config,
    pub(crate) store: Store,
    pub(crate) screen: Screen,
    /// Snapshot of the full table, re-fetched every tick. No caching beyond
    /// the current render cycle.
    pub(crate) students: Vec<Student>,
    pub(crate) notice: Option<Notice>,
    notice_until: Option<Instant>,
    pub(crate) add: AddForm,
    pub(crate) manage: ManageState,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, store: Store) -> Self {
        let mut app = Self {
            config,
            store,
            screen: Screen::Dashboard,
            students: Vec::new(),
            notice: None,
            notice_until: None,
            add: AddForm::default(),
            manage: ManageState::default(),
            should_quit: false,
        };
        app.refresh();
        app
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.notice_until = Some(Instant::now() + NOTICE_TTL);
    }

    /// Re-fetch the snapshot. A connectivity failure leaves an empty table
    /// and surfaces the error; the app stays interactive.
    pub(crate) fn refresh(&mut self) {
        match self.store.list_students() {
            Ok(rows) => {
                self.students = rows;
            }
            Err(e) => {
                tracing::warn!(error = %e, "snapshot fetch failed");
                self.students.clear();
                self.push_notice(Notice::error(e.to_string()));
            }
        }
        self.manage.clamp_cursor(self.students.len());
    }

    fn tick(&mut self) {
        self.refresh();
        if let Some(until) = self.notice_until {
            if Instant::now() >= until {
                self.notice = None;
                self.notice_until = None;
            }
        }
    }

    fn switch_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.manage.cancel_prompt();
        self.refresh();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.switch_to(self.screen.next());
                return;
            }
            KeyCode::BackTab => {
                self.switch_to(self.screen.prev());
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Dashboard => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.should_quit = true;
                }
            }
            Screen::AddStudent => add::handle_key(self, key),
            Screen::ManageRecords => manage::handle_key(self, key),
        }
    }

    fn help_line(&self) -> &'static str {
        match self.screen {
            Screen::Dashboard => "Tab switch screen | q quit",
            Screen::AddStudent => {
                "Up/Down field | type to edit | Enter save | Esc clear | Tab switch screen"
            }
            Screen::ManageRecords => {
                if self.manage.prompt_open() {
                    "type new marks (0-100) | Enter apply | Esc cancel"
                } else {
                    "Up/Down select | u update marks | d delete | s export | q quit | Tab switch screen"
                }
            }
        }
    }
}

/// Terminal setup, event loop, teardown. One synchronous top-to-bottom
/// redraw per loop iteration; all blocking happens inside the store calls.
pub fn run(config: Config, store: Store) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, App::new(config, store));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| draw(f, &mut app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation
            Constraint::Min(0),    // Screen body
            Constraint::Length(3), // Notice / help
        ])
        .split(f.size());

    draw_nav(f, chunks[0], app);

    match app.screen {
        Screen::Dashboard => dashboard::render(f, chunks[1], app),
        Screen::AddStudent => add::render(f, chunks[1], app),
        Screen::ManageRecords => manage::render(f, chunks[1], app),
    }

    draw_footer(f, chunks[2], app);
}

fn draw_nav(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<&str> = Screen::ORDER.iter().map(|s| s.title()).collect();
    let clock = chrono::Local::now().format("%Y-%m-%d %H:%M");
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("gradedesk | Student Performance  [{clock}]")),
        )
        .select(app.screen.index())
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match &app.notice {
        Some(n) => (n.text.clone(), notice_style(n.level)),
        None => (
            app.help_line().to_string(),
            Style::default().fg(Color::Gray),
        ),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn notice_style(level: Level) -> Style {
    let color = match level {
        Level::Success => Color::Green,
        Level::Info => Color::Blue,
        Level::Warning => Color::Yellow,
        Level::Error => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
