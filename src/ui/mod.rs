/// Terminal front end: layout, key bindings and the event loop
pub mod components;
pub mod pages;
pub mod theme;

use crate::app::{Action, App};
use crate::config::Config;
use crate::navigation::{Screen, View};
use crate::playback::timer::AppEvent;
use crate::playback::{ProgressTimer, TickOutcome};
use crate::Result;
use components::{ControlBar, Sidebar};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use pages::{
    BrowsePage, HomePage, LibraryPage, PlayerPage, PlaylistPage, SearchPage, SettingsPage,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Padding, Paragraph};
use std::io::{self, Stdout};
use std::time::Duration;
use theme::Theme;
use tokio::sync::mpsc;

const SIDEBAR_WIDTH: u16 = 26;
const CONTROL_BAR_HEIGHT: u16 = 3;

/// Translate a key press into an action for the current state
pub fn map_key(app: &App, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if app.search.editing {
        return match key.code {
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Enter => Some(Action::SubmitSearch),
            KeyCode::Esc => Some(Action::Back),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab => Action::NextScreen,
        KeyCode::BackTab => Action::PreviousScreen,
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            Action::GoTo(Screen::ALL[index])
        }
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Enter => Action::Select,
        KeyCode::Esc => Action::Back,
        KeyCode::Char(' ') => Action::TogglePlay,
        KeyCode::Char('n') => Action::Next,
        KeyCode::Char('p') => Action::Previous,
        KeyCode::Char('s') => Action::ToggleShuffle,
        KeyCode::Char('r') => Action::ToggleRepeat,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::VolumeUp,
        KeyCode::Char('-') => Action::VolumeDown,
        KeyCode::Char('m') => Action::ToggleMute,
        KeyCode::Char('f') => Action::ToggleFavorite,
        KeyCode::Char('o') => Action::OpenPlayer,
        KeyCode::Char('l') => Action::TogglePlaylist,
        KeyCode::Char('/') => Action::StartSearch,
        _ => return None,
    };
    Some(action)
}

/// Draw the whole frame: sidebar, main pane and control bar
pub fn render(f: &mut Frame, app: &App) {
    let theme = Theme::for_mode(app.theme_mode());
    f.render_widget(Block::default().style(theme.base()), f.size());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(CONTROL_BAR_HEIGHT)])
        .split(f.size());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[0]);

    render_sidebar(f, columns[0], app, &theme);
    render_view(f, columns[1], app, &theme);

    let controller = &app.controller;
    ControlBar {
        playing: controller.is_playing(),
        shuffle: controller.shuffle(),
        repeat: controller.repeat(),
        volume: controller.volume(),
        level: controller.volume_level(),
        playlist_open: app.nav.is_playlist_open(),
    }
    .render(f, rows[1], &theme);
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .title(Span::styled(
            format!(" JEDI · {} ", app.nav.active().name()),
            theme.title(),
        ))
        .borders(Borders::RIGHT)
        .border_style(theme.base().fg(theme.border))
        .padding(Padding::horizontal(1))
        .style(theme.base());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(inner);

    Sidebar {
        active: app.nav.active(),
    }
    .render(f, chunks[0], theme);

    // Now-playing card
    let controller = &app.controller;
    let track = controller.current_track();
    let card = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(chunks[1]);
    let status = if controller.is_playing() { "▶" } else { "⏸" };
    let info = Paragraph::new(vec![
        Line::from(Span::styled("Now playing", theme.dim())),
        Line::from(vec![
            Span::styled(
                format!(" {} ", track.pattern.glyph()),
                theme.base().bg(theme.swatch(track.swatch)),
            ),
            Span::styled(format!(" {}", track.title), theme.title()),
        ]),
        Line::from(Span::styled(format!("{} {}", status, track.artist), theme.dim())),
    ])
    .style(theme.base());
    f.render_widget(info, card[0]);

    let mini = Gauge::default()
        .gauge_style(theme.base().fg(theme.accent).bg(theme.cream))
        .ratio((controller.progress() / 100.0).clamp(0.0, 1.0))
        .label("");
    f.render_widget(mini, card[1]);
}

/// Draw whatever the navigator says is on screen
pub fn render_view(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    match app.view() {
        View::Player => PlayerPage { app }.render(f, area, theme),
        View::Playlist | View::Screen(Screen::Playlist) => {
            PlaylistPage { app }.render(f, area, theme)
        }
        View::Screen(Screen::Home) => HomePage { app }.render(f, area, theme),
        View::Screen(Screen::Browse) => BrowsePage { app }.render(f, area, theme),
        View::Screen(Screen::Library) => LibraryPage { app }.render(f, area, theme),
        View::Screen(Screen::Search) => SearchPage { app }.render(f, area, theme),
        View::Screen(Screen::Settings) => SettingsPage { app }.render(f, area, theme),
    }
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Leave raw mode before the default hook prints the panic
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original(info);
    }));
}

/// Tick source for the event loop: one progress timer while playing, none otherwise
struct Ticker {
    period: Duration,
    timer: Option<ProgressTimer>,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl Ticker {
    fn new(period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            period,
            timer: None,
            tx,
            rx,
        }
    }

    fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Start or stop the timer to match `playing`.
    ///
    /// Ticks still queued from a stopped timer are discarded so a quick
    /// pause/resume never advances progress twice.
    fn sync(&mut self, playing: bool) {
        match (playing, self.timer.is_some()) {
            (true, false) => {
                self.timer = Some(ProgressTimer::start(self.period, self.tx.clone()));
            }
            (false, true) => {
                self.timer = None;
                while self.rx.try_recv().is_ok() {}
            }
            _ => {}
        }
    }

    async fn recv(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Run the interactive player until the user quits
pub async fn run(mut app: App, config: &Config) -> Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, &mut app, config.player.tick_interval()).await;

    restore_terminal()?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(terminal: &mut Tui, app: &mut App, period: Duration) -> Result<()> {
    let mut ticker = Ticker::new(period);
    let mut events = EventStream::new();

    loop {
        ticker.sync(app.controller.is_playing());
        terminal.draw(|f| render(f, app))?;

        if app.exit {
            tracing::info!("Quit requested");
            break;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    if let Some(action) = map_key(app, key) {
                        tracing::trace!("{:?}", action);
                        app.apply(action);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(AppEvent::Tick) = ticker.recv() => {
                match app.tick() {
                    TickOutcome::Looped => tracing::debug!("Repeating '{}'", app.controller.current_track().title),
                    TickOutcome::Finished => tracing::info!("'{}' finished", app.controller.current_track().title),
                    TickOutcome::Advanced | TickOutcome::Idle => {}
                }
            }
        }
    }

    Ok(())
}
