/// Reusable UI components
use crate::models::{Pattern, Swatch, VolumeLevel};
use crate::navigation::Screen;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};

/// Vinyl outline; the groove marker is drawn on top of it
const DISC: [&str; 5] = [
    "  .-----.  ",
    " /  ___  \\ ",
    "|  ( o )  |",
    " \\  ---  / ",
    "  '-----'  ",
];

/// Clockwise marker positions as (row, column)
const DISC_MARKS: [(usize, usize); 8] = [
    (0, 5),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 5),
    (3, 2),
    (2, 2),
    (1, 2),
];

/// Lines of the disc with the groove marker at rotation `frame`
pub fn disc_lines(frame: usize) -> Vec<String> {
    let (row, col) = DISC_MARKS[frame % DISC_MARKS.len()];
    DISC.iter()
        .enumerate()
        .map(|(i, line)| {
            if i != row {
                return line.to_string();
            }
            line.chars()
                .enumerate()
                .map(|(j, c)| if j == col { '•' } else { c })
                .collect()
        })
        .collect()
}

pub struct Disc {
    pub frame: usize,
    pub playing: bool,
    pub swatch: Swatch,
}

impl Disc {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let style = if self.playing {
            theme.base().fg(theme.foreground)
        } else {
            theme.dim()
        };
        let text: Vec<Line> = disc_lines(self.frame)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, style)))
            .collect();

        let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.base().fg(theme.border))
                .style(theme.base().bg(theme.swatch(self.swatch))),
        );

        f.render_widget(paragraph, area);
    }
}

pub struct PlaybackBar {
    /// Percentage in `[0, 100]`
    pub progress: f64,
    pub elapsed: String,
    pub total: String,
}

impl PlaybackBar {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let ratio = (self.progress / 100.0).clamp(0.0, 1.0);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::NONE).style(theme.base()))
            .gauge_style(theme.base().fg(theme.foreground).bg(theme.cream))
            .ratio(ratio)
            .label(format!("{} / {}", self.elapsed, self.total));

        f.render_widget(gauge, area);
    }
}

pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    pub pattern: Pattern,
    pub swatch: Swatch,
    pub favorite: bool,
}

impl TrackInfo {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let heart = if self.favorite { "♥" } else { "♡" };
        let text = vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} ", self.pattern.glyph()),
                    theme.base().bg(theme.swatch(self.swatch)),
                ),
                Span::raw(" "),
                Span::styled(self.title.clone(), theme.title()),
                Span::raw("  "),
                Span::styled(heart, theme.toggle(self.favorite)),
            ]),
            Line::from(Span::styled(format!("     {}", self.artist), theme.dim())),
        ];

        let paragraph = Paragraph::new(text).style(theme.base());

        f.render_widget(paragraph, area);
    }
}

pub struct PlaybackControls {
    pub playing: bool,
    pub shuffle: bool,
    pub repeat: bool,
}

impl PlaybackControls {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let play_status = if self.playing { "⏸ Pause" } else { "▶ Play" };

        let line = Line::from(vec![
            Span::styled("⇄ Shuffle", theme.toggle(self.shuffle)),
            Span::raw("    ⏮    "),
            Span::styled(format!("[ {} ]", play_status), theme.title()),
            Span::raw("    ⏭    "),
            Span::styled("↻ Repeat", theme.toggle(self.repeat)),
        ]);

        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(theme.base());

        f.render_widget(paragraph, area);
    }
}

pub struct VolumeBar {
    pub volume: u8,
    pub level: VolumeLevel,
}

impl VolumeBar {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let gauge = Gauge::default()
            .gauge_style(theme.base().fg(theme.foreground).bg(theme.cream))
            .percent(self.volume as u16)
            .label(format!("{} {}%", self.level.icon(), self.volume));

        f.render_widget(gauge, area);
    }
}

/// Sidebar navigation menu with the divider between the two groups
pub struct Sidebar {
    pub active: Screen,
}

impl Sidebar {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let item = |screen: &Screen| {
            let content = format!(" {}  {}", screen.icon(), screen.name());
            if *screen == self.active {
                ListItem::new(content).style(theme.toggle(true))
            } else {
                ListItem::new(content).style(theme.base())
            }
        };

        let mut items: Vec<ListItem> = Screen::MAIN.iter().map(item).collect();
        items.push(ListItem::new("─".repeat(area.width as usize)).style(theme.dim()));
        items.extend(Screen::BOTTOM.iter().map(item));

        let list = List::new(items).style(theme.base());

        f.render_widget(list, area);
    }
}

/// Bottom bar: compact transport plus key hints
pub struct ControlBar {
    pub playing: bool,
    pub shuffle: bool,
    pub repeat: bool,
    pub volume: u8,
    pub level: VolumeLevel,
    pub playlist_open: bool,
}

impl ControlBar {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let bar = theme.base().bg(theme.bar);
        let chevron = if self.playlist_open { "▾" } else { "▴" };
        let play = if self.playing { "⏸" } else { "▶" };
        let toggle = |on: bool| {
            if on {
                bar.fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                bar
            }
        };

        let text = vec![
            Line::from(vec![
                Span::styled(format!(" [{}] ", chevron), bar),
                Span::styled(" [⏮] ", bar),
                Span::styled(format!(" [      {}      ] ", play), bar.add_modifier(Modifier::BOLD)),
                Span::styled(" [⏭] ", bar),
                Span::styled(" [⇄] ", toggle(self.shuffle)),
                Span::styled(" [↻] ", toggle(self.repeat)),
                Span::styled(format!("   {} {}%", self.level.icon(), self.volume), bar),
            ]),
            Line::from(Span::styled(
                " space play · n/p next/prev · s shuffle · r repeat · +/- volume · m mute · f fav · o player · l playlist · / search · q quit",
                bar.fg(theme.muted),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .style(bar)
            .block(Block::default().borders(Borders::TOP).border_style(bar.fg(theme.border)));

        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_marker_rotates() {
        let first = disc_lines(0);
        assert_eq!(first.len(), DISC.len());
        assert_eq!(first[0].chars().nth(5), Some('•'));

        let second = disc_lines(1);
        assert_eq!(second[0], DISC[0]);
        assert_eq!(second[1].chars().nth(8), Some('•'));

        assert_eq!(disc_lines(DISC_MARKS.len()), first);
    }

    #[test]
    fn test_disc_lines_keep_width() {
        for frame in 0..DISC_MARKS.len() {
            for (line, outline) in disc_lines(frame).iter().zip(DISC) {
                assert_eq!(line.chars().count(), outline.chars().count());
            }
        }
    }
}
