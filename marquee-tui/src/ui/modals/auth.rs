use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::theme::{theme, ThemeColors};
use super::utils::centered_rect;
use crate::app::{App, LoginField, RegisterField};

fn form_field_line(
    label: &str,
    value: &str,
    active: bool,
    masked: bool,
    theme: &ThemeColors,
) -> Line<'static> {
    let style = if active {
        Style::default()
            .fg(theme.primary)
            .bg(theme.highlight_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let mut shown = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    if active {
        shown.push('█');
    }

    Line::from(vec![
        Span::styled(format!("  {:<10}", label), Style::default().fg(theme.text_dim)),
        Span::styled(shown, style),
    ])
}

pub fn render_login_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = theme();
    let modal_area = centered_rect(50, 45, area);
    frame.render_widget(Clear, modal_area);

    let form = &app.auth.login_form;
    let active = form.active_field();

    let mut lines = vec![
        Line::from(""),
        form_field_line("Email", &form.email, active == LoginField::Email, false, &theme),
        Line::from(""),
        form_field_line(
            "Password",
            &form.password,
            active == LoginField::Password,
            true,
            &theme,
        ),
        Line::from(""),
    ];

    if app.auth.loading {
        lines.push(Line::from(Span::styled(
            "  Signing in...",
            Style::default().fg(theme.text_dim),
        )));
    } else if let Some(error) = &app.auth.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(theme.error),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Enter: Sign in | Tab: Next field | ←/→: Create account | Esc: Close",
        Style::default().fg(theme.text_dim),
    )));

    let modal = Paragraph::new(lines).block(
        Block::default()
            .title(" Sign In ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(theme.background)),
    );
    frame.render_widget(modal, modal_area);
}

pub fn render_register_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = theme();
    let modal_area = centered_rect(50, 60, area);
    frame.render_widget(Clear, modal_area);

    let form = &app.auth.register_form;
    let active = form.active_field();

    let mut lines = vec![
        Line::from(""),
        form_field_line("Name", &form.name, active == RegisterField::Name, false, &theme),
        form_field_line("Email", &form.email, active == RegisterField::Email, false, &theme),
        form_field_line(
            "Password",
            &form.password,
            active == RegisterField::Password,
            true,
            &theme,
        ),
        form_field_line("Phone", &form.phone, active == RegisterField::Phone, false, &theme),
        form_field_line(
            "Address",
            &form.address,
            active == RegisterField::Address,
            false,
            &theme,
        ),
        Line::from(""),
    ];

    if app.auth.loading {
        lines.push(Line::from(Span::styled(
            "  Creating account...",
            Style::default().fg(theme.text_dim),
        )));
    } else if let Some(error) = &app.auth.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(theme.error),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Enter: Create account | Tab: Next field | ←/→: Sign in | Esc: Close",
        Style::default().fg(theme.text_dim),
    )));

    let modal = Paragraph::new(lines).block(
        Block::default()
            .title(" Create Account ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(theme.background)),
    );
    frame.render_widget(modal, modal_area);
}
