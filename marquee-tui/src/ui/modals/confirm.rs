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

/// Render cancel-reservation confirmation modal
pub fn render_cancel_reservation_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = theme();
    let modal_area = centered_rect(50, 30, area);
    frame.render_widget(Clear, modal_area);

    let title = app
        .reservation
        .reservation
        .as_ref()
        .map(|r| r.title().to_string())
        .unwrap_or_default();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Cancel your reservation for \"{}\"?", title),
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "The seats are released immediately.",
            Style::default().fg(theme.text_dim),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Y",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": Cancel reservation  ", Style::default().fg(theme.text)),
            Span::styled(
                "N / Esc",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": Keep it", Style::default().fg(theme.text)),
        ]),
    ];

    let modal = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .title(" Cancel Reservation ")
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(theme.background)),
    );
    frame.render_widget(modal, modal_area);
}
