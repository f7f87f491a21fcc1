use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::theme::theme;
use super::utils::centered_rect;
use crate::app::App;
use crate::route::Route;

/// Render help modal
pub fn render_help_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = theme();
    let modal_area = centered_rect(70, 80, area);
    frame.render_widget(Clear, modal_area);

    let shortcuts = shortcuts_for_context(app);

    let mut lines = vec![Line::from("")];
    for (category, items) in shortcuts {
        lines.push(Line::from(Span::styled(
            category,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for (key, description) in items {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<15}", key), Style::default().fg(theme.success)),
                Span::styled(description, Style::default().fg(theme.text)),
            ]));
        }

        lines.push(Line::from(""));
    }

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
                .title(" Keyboard Shortcuts ")
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(theme.background)),
        )
        .wrap(ratatui::widgets::Wrap { trim: false });

    frame.render_widget(help, modal_area);
}

/// Shortcuts relevant to the current view
fn shortcuts_for_context(app: &App) -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    let mut shortcuts = vec![(
        "Global",
        vec![
            ("m", "Movies"),
            ("s", "Showtimes"),
            ("p", "Profile (sign-in required)"),
            ("r", "Refresh the current view"),
            ("?", "Toggle this help"),
            ("q / Esc", "Quit application"),
        ],
    )];

    if app.auth.is_authenticated() {
        shortcuts.push(("Account", vec![("Shift+L", "Logout")]));
    } else {
        shortcuts.push(("Account", vec![("i", "Sign in")]));
    }

    match app.current_route {
        Route::Movies | Route::Showtimes => shortcuts.push((
            "Browsing",
            vec![
                ("↓/j", "Move down"),
                ("↑/k", "Move up"),
                ("Enter", "Open selection"),
            ],
        )),
        Route::Movie(_) => shortcuts.push((
            "Movie",
            vec![
                ("↓/j ↑/k", "Choose a showtime"),
                ("Enter", "Pick seats"),
                ("t", "Watch trailer in browser"),
                ("Backspace", "Back to movies"),
            ],
        )),
        Route::Showtime(_) => shortcuts.push((
            "Seat Selection",
            vec![
                ("hjkl / arrows", "Move the cursor"),
                ("Space", "Toggle the seat and its couple partner"),
                ("Enter / c", "Confirm the reservation"),
                ("Esc", "Leave and release the hold"),
            ],
        )),
        Route::Profile => shortcuts.push((
            "Profile",
            vec![
                ("↓/j ↑/k", "Browse reservations"),
                ("Enter", "Open reservation"),
                ("e", "Edit profile"),
            ],
        )),
        Route::Reservation(_) => shortcuts.push((
            "Reservation",
            vec![("x", "Cancel reservation"), ("Backspace", "Back to profile")],
        )),
        Route::Payment(_) => shortcuts.push((
            "Payment",
            vec![
                ("Type", "Fill the card form"),
                ("Tab", "Next field"),
                ("Enter", "Pay"),
            ],
        )),
    }

    shortcuts
}
