use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use gamecal_core::{
    catalog::Catalog,
    models::{GameEntry, ReleaseStatus},
    query::{self, CategoryFilter, ViewState},
    snapshot::SnapshotWriter,
    view::{CalendarView, ListView, ModalView},
};

use crate::theme::Theme;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Terminal rows taken by one list entry.
const ROW_HEIGHT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// High-level application state for the release browser.
pub struct GamecalApp {
    catalog: Catalog,
    view_state: ViewState,
    results: Vec<GameEntry>,
    calendar: CalendarView,
    today: NaiveDate,
    cursor: usize,
    offset: usize,
    list_height: usize,
    mode: Mode,
    search_input: String,
    modal: Option<ModalView>,
    modal_area: Option<Rect>,
    status: String,
    status_error: bool,
    should_quit: bool,
    theme: Theme,
    snapshots: SnapshotWriter,
}

impl GamecalApp {
    pub fn new(catalog: Catalog, theme: Theme, snapshots: SnapshotWriter) -> Self {
        // The calendar ignores view state and is computed once per session.
        let calendar = CalendarView::build(catalog.entries());
        Self {
            catalog,
            view_state: ViewState::default(),
            results: Vec::new(),
            calendar,
            today: Local::now().date_naive(),
            cursor: 0,
            offset: 0,
            list_height: 1,
            mode: Mode::Browse,
            search_input: String::new(),
            modal: None,
            modal_area: None,
            status: "Ready".to_string(),
            status_error: false,
            should_quit: false,
            theme,
            snapshots,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.refresh_results();
        self.set_status(format!("Loaded {} entries", self.catalog.len()));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }

            match event_rx.recv().await {
                Some(AppEvent::Input(event)) => self.handle_input(event),
                Some(AppEvent::Tick) => self.handle_tick(),
                None => break,
            }

            if self.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    /// Re-run the query pipeline against the current view state and clamp
    /// the selection back to the top of the fresh results.
    fn refresh_results(&mut self) {
        self.results = query::run(self.catalog.entries(), &self.view_state, self.today);
        self.cursor = 0;
        self.offset = 0;
        self.set_status(format!(
            "{} of {} entries",
            self.results.len(),
            self.catalog.len()
        ));
    }

    fn handle_tick(&mut self) {
        // A session left open past midnight reclassifies entries on the
        // next render.
        let today = Local::now().date_naive();
        if today != self.today {
            info!(%today, "Date rolled over; reclassifying entries");
            self.today = today;
            self.refresh_results();
        }
    }

    fn handle_input(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, _) => {}
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // While the details view is open the list underneath does not move;
        // keys either close the view or are swallowed.
        if self.modal.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.close_details(),
                _ => {}
            }
            return;
        }

        match self.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::Browse => self.handle_browse_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.mode = Mode::Browse;
                self.set_status(format!(
                    "{} of {} entries",
                    self.results.len(),
                    self.catalog.len()
                ));
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.apply_search();
            }
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.search_input.push(ch);
                self.apply_search();
            }
            _ => {}
        }
    }

    /// Every keystroke updates the query (trimmed) and re-renders; there is
    /// no debounce.
    fn apply_search(&mut self) {
        self.view_state.set_query(&self.search_input);
        self.refresh_results();
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.set_category(self.view_state.category.cycle());
            }
            // Quick filter keys mirror the selector; both mutate the same
            // state so the header indicator always agrees.
            KeyCode::Char('a') | KeyCode::Char('A') => self.set_category(CategoryFilter::All),
            KeyCode::Char('r') | KeyCode::Char('R') => self.set_category(CategoryFilter::Released),
            KeyCode::Char('u') | KeyCode::Char('U') => self.set_category(CategoryFilter::Upcoming),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.view_state.sort = self.view_state.sort.toggled();
                self.refresh_results();
                self.set_status(self.view_state.sort.label().to_string());
            }
            KeyCode::Char('w') | KeyCode::Char('W') => self.write_snapshot(),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::PageDown => self.move_cursor(self.page_step()),
            KeyCode::PageUp => self.move_cursor(-self.page_step()),
            KeyCode::Char('g') | KeyCode::Home => self.move_to_start(),
            KeyCode::Char('G') | KeyCode::End => self.move_to_end(),
            KeyCode::Enter => {
                if let Some(id) = self.results.get(self.cursor).map(|entry| entry.id.clone()) {
                    self.open_details(&id);
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(_) = mouse.kind {
            if let (Some(_), Some(area)) = (&self.modal, self.modal_area) {
                // A click on the backdrop closes the details view; clicks
                // inside the content area are inert.
                if !rect_contains(area, mouse.column, mouse.row) {
                    self.close_details();
                }
            }
        }
    }

    fn set_category(&mut self, category: CategoryFilter) {
        self.view_state.category = category;
        self.refresh_results();
        self.set_status(format!("Filter: {}", category.label()));
    }

    /// Open the details view for the given id. An id that does not resolve
    /// is silently ignored; opening while already open repopulates the
    /// content.
    fn open_details(&mut self, id: &str) {
        match self.catalog.find(id) {
            Some(entry) => {
                self.modal = Some(ModalView::build(entry, self.today));
            }
            None => {
                debug!(id, "Details requested for unknown entry");
            }
        }
    }

    fn close_details(&mut self) {
        self.modal = None;
        self.modal_area = None;
    }

    fn write_snapshot(&mut self) {
        let list = ListView::build(&self.results, self.today);
        match self.snapshots.write(&list, &self.calendar) {
            Ok(path) => {
                info!(path = %path.display(), "Snapshot written");
                self.set_status(format!("Snapshot written to {}", path.display()));
            }
            Err(err) => self.set_error_status(format!("Snapshot failed: {err}")),
        }
    }

    fn set_status(&mut self, message: String) {
        self.status = message;
        self.status_error = false;
    }

    fn set_error_status(&mut self, message: String) {
        self.status = message;
        self.status_error = true;
    }

    fn page_step(&self) -> isize {
        self.list_height.max(1) as isize
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.results.is_empty() {
            return;
        }
        let len = self.results.len() as isize;
        let mut idx = self.cursor as isize + delta;
        if idx < 0 {
            idx = 0;
        } else if idx >= len {
            idx = len - 1;
        }
        self.cursor = idx as usize;
        self.ensure_cursor_visible();
    }

    fn move_to_start(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    fn move_to_end(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.cursor = self.results.len() - 1;
        self.ensure_cursor_visible();
    }

    fn clamp_cursor(&mut self) {
        if self.results.is_empty() {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= self.results.len() {
            self.cursor = self.results.len() - 1;
        }
    }

    fn ensure_cursor_visible(&mut self) {
        if self.results.is_empty() || self.list_height == 0 {
            self.offset = 0;
            return;
        }
        let height = self.list_height;
        let max_offset = self.results.len().saturating_sub(height);

        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }

        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }

    fn visible_rows<'a>(&self, view: &'a ListView) -> &'a [gamecal_core::view::ListRow] {
        if view.rows.is_empty() {
            return &[];
        }
        let end = (self.offset + self.list_height.max(1)).min(view.rows.len());
        &view.rows[self.offset..end]
    }

    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(size);

        self.render_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(chunks[1]);

        self.render_list(frame, body[0]);
        self.render_sidebar(frame, body[1]);
        self.render_status(frame, chunks[2]);

        if self.modal.is_some() {
            self.render_modal(frame, size);
        } else {
            self.modal_area = None;
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let sep = Span::styled("  │  ", Style::default().fg(self.theme.muted));
        let mut spans = vec![
            Span::styled(
                "Game Releases",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            sep.clone(),
            Span::raw(format!("Filter: {}", self.view_state.category.label())),
            sep.clone(),
            Span::raw(self.view_state.sort.label()),
            sep,
        ];
        if self.mode == Mode::Search {
            spans.push(Span::styled(
                format!("Search: {}▌", self.search_input),
                Style::default().fg(self.theme.accent),
            ));
        } else if self.view_state.query.is_empty() {
            spans.push(Span::styled(
                "Search: (press /)",
                Style::default().fg(self.theme.muted),
            ));
        } else {
            spans.push(Span::raw(format!("Search: {}", self.view_state.query)));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, area);
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let inner_height = area.height.saturating_sub(2) as usize;
        self.list_height = (inner_height / ROW_HEIGHT).max(1);
        self.clamp_cursor();
        self.ensure_cursor_visible();

        let view = ListView::build(&self.results, self.today);
        let block = Block::default().borders(Borders::ALL).title("Games");

        if view.is_empty() {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                "No results found.",
                Style::default().fg(self.theme.muted),
            )))
            .block(block)
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let mut list_state = ListState::default();
        let visible = self.visible_rows(&view);
        if !visible.is_empty() {
            let selected = self
                .cursor
                .saturating_sub(self.offset)
                .min(visible.len().saturating_sub(1));
            list_state.select(Some(selected));
        }

        let items: Vec<ListItem> = visible
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let is_selected = self.cursor == self.offset + idx;
                let marker = if is_selected {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                let badge_color = match row.status {
                    ReleaseStatus::Released => self.theme.success,
                    ReleaseStatus::Upcoming => self.theme.warning,
                };
                let title_line = Line::from(vec![
                    marker,
                    Span::styled(
                        row.title.clone(),
                        Style::default()
                            .fg(self.theme.primary_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(format!("[{}]", row.status.label()), Style::default().fg(badge_color)),
                ]);
                let meta_line = Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{} • {} • ", row.platform, row.date_label),
                        Style::default().fg(self.theme.muted),
                    ),
                    // Inert link placeholder; the actual target only lives in
                    // exported markup.
                    Span::styled("Read", Style::default().fg(self.theme.accent_alt)),
                    Span::styled(
                        format!(" — {}", row.summary),
                        Style::default().fg(self.theme.muted),
                    ),
                ]);
                ListItem::new(Text::from(vec![title_line, meta_line]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(self.theme.selection_bg)
                    .fg(self.theme.selection_fg),
            );
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let calendar_height = (self.calendar.rows.len() as u16).saturating_add(2);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(calendar_height.max(3)), Constraint::Min(3)])
            .split(area);

        self.render_calendar(frame, chunks[0]);
        self.render_help(frame, chunks[1]);
    }

    fn render_calendar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Release Calendar");
        if self.calendar.rows.is_empty() {
            let paragraph = Paragraph::new("No releases scheduled").block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let lines: Vec<Line> = self
            .calendar
            .rows
            .iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<13}", row.date_label),
                        Style::default().fg(self.theme.accent_alt),
                    ),
                    Span::styled(
                        row.title.clone(),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();
        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from("/ search   f cycle filter   a/r/u quick filter"),
            Line::from("s toggle sort   Enter details   w snapshot"),
            Line::from("j/k move   g/G ends   q quit"),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Keys"))
            .style(Style::default().fg(self.theme.muted))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let primary = if self.mode == Mode::Search {
            format!("Search: {}", self.search_input)
        } else {
            self.status.clone()
        };
        let style = if self.status_error {
            Style::default().fg(self.theme.danger)
        } else {
            Style::default().fg(self.theme.primary_fg)
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(primary, style)))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_modal(&mut self, frame: &mut Frame, frame_area: Rect) {
        let Some(view) = &self.modal else {
            return;
        };

        let width = (frame_area.width.saturating_mul(7) / 10).clamp(30, 80);
        let height = 14.min(frame_area.height.saturating_sub(2)).max(7);
        let area = centered_rect(width, height, frame_area);
        self.modal_area = Some(area);

        frame.render_widget(Clear, area);

        let badge_color = match view.status {
            ReleaseStatus::Released => self.theme.success,
            ReleaseStatus::Upcoming => self.theme.warning,
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("[{}]", view.status.label()),
                    Style::default().fg(badge_color),
                ),
                Span::raw("  "),
                Span::styled(
                    view.platform.clone(),
                    Style::default().fg(self.theme.muted),
                ),
            ]),
            Line::from(vec![
                Span::styled(
                    view.date_heading,
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {}", view.date_label)),
            ]),
            Line::from(""),
            Line::from(view.description.clone()),
            Line::from(""),
            Line::from(Span::styled(
                format!("More information: {} (link disabled)", view.detail_url),
                Style::default().fg(self.theme.muted),
            )),
            Line::from(vec![
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" close"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(view.title.clone()),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn rect_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}
