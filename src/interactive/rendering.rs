//! TUI rendering with ratatui
//!
//! Quote, guess grid, keyboard and side panels for the game screen.

use super::app::{App, MessageStyle};
use crate::core::{LetterState, LetterStatuses, MAX_GUESSES};
use crate::game::{GameStatus, Hint, Store};
use crate::output::formatters::KEYBOARD_ROWS;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use std::time::Instant;

/// Colours for one theme
struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    muted: Color,
    correct: Color,
    present: Color,
    absent: Color,
    tile_fg: Color,
}

impl Palette {
    const fn new(dark: bool) -> Self {
        if dark {
            Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                correct: Color::Green,
                present: Color::Yellow,
                absent: Color::DarkGray,
                tile_fg: Color::Black,
            }
        } else {
            Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::Gray,
                correct: Color::Green,
                present: Color::Yellow,
                absent: Color::Gray,
                tile_fg: Color::White,
            }
        }
    }

    fn tile(&self, state: Option<LetterState>) -> Style {
        match state {
            Some(LetterState::Correct) => Style::default()
                .fg(self.tile_fg)
                .bg(self.correct)
                .add_modifier(Modifier::BOLD),
            Some(LetterState::Present) => Style::default()
                .fg(self.tile_fg)
                .bg(self.present)
                .add_modifier(Modifier::BOLD),
            Some(LetterState::Absent) => Style::default().fg(self.fg).bg(self.absent),
            None => Style::default().fg(self.fg).add_modifier(Modifier::BOLD),
        }
    }

    fn block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(self.fg).bg(self.bg))
    }
}

/// Main UI rendering function
pub fn ui<S: Store>(f: &mut Frame, app: &App<S>, now: Instant) {
    let palette = Palette::new(app.session.settings().dark_mode);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Quote
            Constraint::Min(9),    // Grid + side panel
            Constraint::Length(5), // Keyboard
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, app, &palette, chunks[0]);
    render_quote(f, app, &palette, chunks[1]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    render_grid(f, app, &palette, main_chunks[0], now);
    render_side_panel(f, app, &palette, main_chunks[1]);
    render_keyboard(f, app, &palette, chunks[3], now);
    render_status(f, app, &palette, chunks[4]);

    if app.show_share
        && let Some(text) = app.share_popup_text()
    {
        render_share(f, &palette, &text);
    }
}

fn render_header<S: Store>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let economy = app.session.economy();
    let line = Line::from(vec![
        Span::styled(
            "QUOTLE",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Streak "),
        Span::styled(
            economy.win_streak.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Best "),
        Span::styled(
            economy.personal_best.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(palette.block("").style(Style::default().fg(palette.accent).bg(palette.bg)));
    f.render_widget(header, area);
}

fn render_quote<S: Store>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let session = &app.session;
    let text = if session.status().is_over() {
        session.puzzle().quote().text.clone()
    } else {
        session.masked_text()
    };

    let title = match session.link() {
        Some(_) => format!(" Quote #{} ", session.puzzle().quote().id),
        None => " Quote ".to_string(),
    };

    let quote = Paragraph::new(Line::from(Span::styled(
        format!("“{text}”"),
        Style::default().fg(palette.fg).add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(palette.block(&title));
    f.render_widget(quote, area);
}

fn tile_span(letter: char, style: Style) -> Span<'static> {
    Span::styled(format!(" {} ", letter.to_ascii_uppercase()), style)
}

fn render_grid<S: Store>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect, now: Instant) {
    let session = &app.session;
    let solution_len = session.solution().len();
    let feedback = session.feedback();
    let revealed = session.reveal_progress(now);
    let newest = session.guesses().len().saturating_sub(1);

    let mut lines = Vec::with_capacity(MAX_GUESSES * 2);
    for row in 0..MAX_GUESSES {
        let mut spans = Vec::with_capacity(solution_len * 2);

        if let (Some(guess), Some(scored)) = (session.guesses().get(row), feedback.get(row)) {
            // The newest row uncovers one letter per reveal step
            let shown = match revealed {
                Some(letters) if row == newest => letters,
                _ => solution_len,
            };
            for (i, (letter, &state)) in guess.text().chars().zip(scored.states()).enumerate() {
                let state = (i < shown).then_some(state);
                spans.push(tile_span(letter, palette.tile(state)));
                spans.push(Span::raw(" "));
            }
        } else if row == session.guesses().len() && session.status() == GameStatus::Playing {
            let typed: Vec<char> = session.current_guess().chars().collect();
            for i in 0..solution_len {
                match typed.get(i) {
                    Some(&letter) => spans.push(tile_span(letter, palette.tile(None))),
                    None => spans.push(Span::styled(" _ ", Style::default().fg(palette.muted))),
                }
                spans.push(Span::raw(" "));
            }
        } else {
            for _ in 0..solution_len {
                spans.push(Span::styled(" · ", Style::default().fg(palette.muted)));
                spans.push(Span::raw(" "));
            }
        }

        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    let title = format!(" {solution_len} letters ");
    let grid = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(palette.block(&title));
    f.render_widget(grid, area);
}

fn hint_line<'a>(key: &'a str, label: &'a str, hint: &'a Hint, palette: &Palette) -> Line<'a> {
    let value = if hint.revealed {
        Span::styled(
            hint.value.as_str(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("???", Style::default().fg(palette.muted))
    };
    Line::from(vec![
        Span::styled(format!("[{key}] "), Style::default().fg(palette.muted)),
        Span::raw(format!("{label}: ")),
        value,
    ])
}

fn render_side_panel<S: Store>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(area);

    let session = &app.session;
    let economy = session.economy();
    let settings = session.settings();
    let skips = if settings.unlimited_skips {
        "∞".to_string()
    } else {
        economy.skip_tokens.to_string()
    };

    let mut modes = Vec::new();
    if settings.hard_mode {
        modes.push("hard");
    }
    if settings.unlimited_skips {
        modes.push("unlimited");
    }
    let modes = if modes.is_empty() {
        "normal".to_string()
    } else {
        modes.join(", ")
    };

    let info = vec![
        hint_line("1", "Said by", &session.hints().person, palette),
        hint_line("2", "Episode", &session.hints().episode, palette),
        Line::default(),
        Line::from(format!("Hints {}   Skips {skips}", economy.hint_tokens)),
        Line::from(format!(
            "Max length {}   Mode {modes}",
            settings.max_word_length
        )),
    ];
    f.render_widget(Paragraph::new(info).block(palette.block(" Hints ")), chunks[0]);

    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(palette.fg),
                MessageStyle::Success => Style::default().fg(palette.correct),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();
    f.render_widget(List::new(messages).block(palette.block(" Messages ")), chunks[1]);
}

fn render_keyboard<S: Store>(
    f: &mut Frame,
    app: &App<S>,
    palette: &Palette,
    area: Rect,
    now: Instant,
) {
    let session = &app.session;
    // Letters of a guess still being revealed stay uncoloured
    let settled = match session.reveal_progress(now) {
        Some(_) => session.guesses().len().saturating_sub(1),
        None => session.guesses().len(),
    };
    let statuses = LetterStatuses::from_guesses(&session.guesses()[..settled], session.solution());

    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .flat_map(|c| {
                    let state = u8::try_from(c).ok().and_then(|b| statuses.get(b));
                    [tile_span(c, palette.tile(state)), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(palette.block(""));
    f.render_widget(keyboard, area);
}

fn render_status<S: Store>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let help = if app.session.status().is_over() {
        "Enter: New puzzle | s: Share | Esc: Quit"
    } else {
        "Enter: Guess | 1/2: Hint | 3: Give up | 4: Skip | ^N: New | F2 Hard F3 Skips F4 Theme | +/-: Length | Esc: Quit"
    };

    let status = Paragraph::new(help)
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.muted).bg(palette.bg));
    f.render_widget(status, area);
}

fn render_share(f: &mut Frame, palette: &Palette, text: &str) {
    let area = f.area();
    let widest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    let width = u16::try_from(widest + 4)
        .unwrap_or(u16::MAX)
        .clamp(40, 72)
        .min(area.width);
    let height = u16::try_from(text.lines().count() + 2)
        .unwrap_or(u16::MAX)
        .min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let share = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .block(palette.block(" Share ").border_type(BorderType::Double));
    f.render_widget(Clear, popup);
    f.render_widget(share, popup);
}

