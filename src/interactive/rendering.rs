//! TUI rendering with ratatui
//!
//! Boards, lobby and scoreboard for the Termo screens.

use super::app::{App, MessageStyle, Screen};
use crate::core::{Attempt, LetterResult};
use crate::game::{Outcome, Phase, Player, SoloGame};
use crate::output::formatters::format_clock;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

const GREEN: Color = Color::Rgb(16, 185, 129);
const BLUE: Color = Color::Rgb(59, 130, 246);
const AMBER: Color = Color::Rgb(245, 158, 11);
const GRAY: Color = Color::Rgb(156, 163, 175);

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Help line
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    match app.screen {
        Screen::Solo => render_solo_board(f, app, main_chunks[0]),
        Screen::Duel => render_duel(f, app, main_chunks[0]),
    }
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_help(f, app, chunks[3]);
}

fn result_color(result: LetterResult) -> Color {
    match result {
        LetterResult::Correct => GREEN,
        LetterResult::Present => AMBER,
        LetterResult::Absent => GRAY,
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let logo_colors = [GREEN, BLUE, GREEN, BLUE, AMBER];
    let spans: Vec<Span> = "TERMO"
        .chars()
        .zip(logo_colors)
        .flat_map(|(letter, color)| {
            [
                Span::styled(
                    format!(" {letter} "),
                    Style::default()
                        .fg(Color::White)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]
        })
        .collect();

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

/// A guessed row: one colored tile per letter
fn attempt_line(attempt: &Attempt) -> Line<'static> {
    let spans: Vec<Span> = attempt
        .letters()
        .flat_map(|(letter, result)| {
            [
                Span::styled(
                    format!(" {letter} "),
                    Style::default()
                        .fg(Color::Black)
                        .bg(result_color(result))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]
        })
        .collect();
    Line::from(spans)
}

/// The row being typed, padded with blanks up to the word length
fn pending_line(input: &str, word_len: usize, active: bool) -> Line<'static> {
    let border = if active { Color::White } else { Color::DarkGray };
    let spans: Vec<Span> = (0..word_len)
        .flat_map(|i| {
            let letter = input.chars().nth(i).unwrap_or('·');
            [
                Span::styled(
                    format!(" {letter} "),
                    Style::default().fg(border).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]
        })
        .collect();
    Line::from(spans)
}

/// Rows still to be guessed, the first one holding the current input
///
/// A finished game has none, whatever tries were left.
fn open_rows(game: &SoloGame, input: &str) -> Vec<Line<'static>> {
    if game.state().is_over() {
        return Vec::new();
    }
    (0..game.tries_left())
        .map(|row| {
            pending_line(
                if row == 0 { input } else { "" },
                game.word_len(),
                row == 0,
            )
        })
        .collect()
}

fn render_solo_board(f: &mut Frame, app: &App, area: Rect) {
    let game = &app.solo;
    let mut lines = vec![Line::from(""), Line::from("")];

    for attempt in game.history() {
        lines.push(attempt_line(attempt));
        lines.push(Line::from(""));
    }
    for row in open_rows(game, &app.input) {
        lines.push(row);
        lines.push(Line::from(""));
    }

    lines.push(Line::from(format!(
        "Tries: {} / {}",
        game.history().len(),
        game.max_tries()
    )));

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Solo ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_duel(f: &mut Frame, app: &App, area: Rect) {
    match app.duel.phase() {
        Phase::SelectingOpponent => render_friend_list(f, app, area),
        Phase::Lobby => render_lobby(f, app, area),
        Phase::Active => render_round(f, app, area),
        Phase::Finished(outcome) => render_result(f, app, outcome, area),
    }
}

fn render_friend_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = if app.friends.is_empty() {
        vec![ListItem::new("No friends found")]
    } else {
        app.friends
            .iter()
            .enumerate()
            .map(|(i, friend)| {
                let selected = i == app.selected_friend;
                let style = if selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::raw(if selected { " ▶ " } else { "   " }),
                    Span::styled(format!("({}) ", friend.avatar), Style::default().fg(BLUE)),
                    Span::styled(friend.name.clone(), style),
                    Span::styled(" 🟢 online ⚔️", Style::default().fg(GREEN)),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(" Challenge a friend ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(list, area);
}

fn ready_span(ready: bool) -> Span<'static> {
    if ready {
        Span::styled("✓ Ready!", Style::default().fg(GREEN))
    } else {
        Span::styled("⏳ Waiting...", Style::default().fg(AMBER))
    }
}

fn render_lobby(f: &mut Frame, app: &App, area: Rect) {
    let duel = &app.duel;
    let opponent = duel.opponent();
    let (name, avatar) = opponent.map_or(("Opponent", '?'), |o| (o.name.as_str(), o.avatar));

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("(T) You  ", Style::default().add_modifier(Modifier::BOLD)),
            ready_span(duel.is_ready(Player::Local)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "VS",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("({avatar}) {name}  "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            ready_span(duel.is_ready(Player::Opponent)),
        ]),
    ];

    let lobby = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Lobby ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(lobby, area);
}

fn render_round(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Clock
            Constraint::Length(3), // Scores
            Constraint::Min(5),    // Board
        ])
        .split(area);

    let duel = &app.duel;
    let remaining = duel.remaining_secs();
    let percent = if app.round_secs == 0 {
        0
    } else {
        (u64::from(remaining) * 100 / u64::from(app.round_secs)) as u16
    };
    let clock_color = if remaining <= 10 { Color::Red } else { Color::Cyan };

    let clock = Gauge::default()
        .block(
            Block::default()
                .title(" Time ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(clock_color))
        .percent(percent)
        .label(format_clock(remaining));
    f.render_widget(clock, chunks[0]);

    let scores = duel.scores();
    let name = duel.opponent().map_or("Opponent", |o| o.name.as_str());
    let scoreline = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("You {}", scores.local),
            Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  x  "),
        Span::styled(
            format!("{} {name}", scores.opponent),
            Style::default().fg(BLUE).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(scoreline, chunks[1]);

    let word_len = duel.word_len().unwrap_or(0);
    let mut lines = vec![Line::from("")];
    if let Some(attempt) = duel.last_attempt() {
        lines.push(attempt_line(attempt));
    } else {
        lines.push(pending_line("", word_len, false));
    }
    lines.push(Line::from(""));
    lines.push(pending_line(&app.input, word_len, true));

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Duel ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, chunks[2]);
}

fn render_result(f: &mut Frame, app: &App, outcome: Outcome, area: Rect) {
    let name = app.duel.opponent().map_or("Opponent", |o| o.name.as_str());
    let scores = app.duel.scores();
    let (verdict, color) = match outcome {
        Outcome::PlayerWins => ("🏆 You win!".to_string(), GREEN),
        Outcome::OpponentWins => (format!("🏆 {name} wins!"), Color::Red),
        Outcome::Tie => ("🤝 Tie!".to_string(), AMBER),
    };

    let lines = vec![
        Line::from(""),
        Line::from("⏳ Time's up! Final score:"),
        Line::from(""),
        Line::from(format!("You: {}", scores.local)),
        Line::from(format!("{name}: {}", scores.opponent)),
        Line::from(""),
        Line::from(Span::styled(
            verdict,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];

    let result = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Result ")
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(color)),
    );
    f.render_widget(result, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_messages(f, app, chunks[0]);
    render_stats(f, app, chunks[1]);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let solo = &app.stats.solo;
    let duel = &app.stats.duel;

    let lines = vec![
        Line::from(format!(
            "Solo: {} games | Win rate: {:.0}%",
            solo.games_played,
            solo.win_rate()
        )),
        Line::from(format!(
            "Duel: {}W / {}L / {}T",
            duel.wins, duel.losses, duel.ties
        )),
    ];

    let stats = Paragraph::new(lines).block(
        Block::default()
            .title(" Statistics ")
            .borders(Borders::ALL)
            .style(Style::default().fg(GRAY)),
    );
    f.render_widget(stats, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, color) = match (app.screen, app.duel.phase()) {
        (Screen::Solo, _) if app.solo.state().is_over() => {
            (" Game over | Enter for a new game ", Color::Green)
        }
        (Screen::Solo, _) | (Screen::Duel, Phase::Active) => {
            (" Type your guess | Enter to submit ", Color::Yellow)
        }
        (Screen::Duel, Phase::SelectingOpponent) => {
            (" ↑/↓ to choose | Enter to challenge ", Color::Cyan)
        }
        (Screen::Duel, Phase::Lobby) => (" Enter or R when ready | Esc to go back ", Color::Cyan),
        (Screen::Duel, Phase::Finished(_)) => (" Enter to continue ", Color::Green),
    };

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.screen {
        Screen::Solo => "Tab: Duel | Esc: Quit | Ctrl+C: Quit",
        Screen::Duel => "Tab: Solo (abandons duel) | Esc: Back/Quit | Ctrl+C: Quit",
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}
