// UI module - split into cohesive submodules for maintainability
pub mod theme;
mod formatting;
mod modals;
mod views;

// Re-export main render function
pub use self::render_main::render;

// Main render logic
mod render_main {
    use ratatui::{
        layout::Alignment,
        style::{Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Clear, Paragraph},
        Frame,
    };

    use super::modals;
    use super::theme::theme;
    use super::views::render_screen;
    use crate::app::{App, Modal};

    /// Render the UI
    pub fn render(app: &mut App, frame: &mut Frame) {
        let area = frame.area();
        let theme = theme();

        frame.render_widget(Clear, area);

        let background = Block::default().style(Style::default().bg(theme.background));
        frame.render_widget(background, area);

        const MIN_WIDTH: u16 = 70;
        const MIN_HEIGHT: u16 = 22;

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let warning = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Terminal Too Small",
                    Style::default()
                        .fg(theme.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Minimum size: {}x{}", MIN_WIDTH, MIN_HEIGHT),
                    Style::default().fg(theme.text),
                )),
                Line::from(Span::styled(
                    format!("Current size: {}x{}", area.width, area.height),
                    Style::default().fg(theme.warning),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Please resize your terminal window",
                    Style::default().fg(theme.text_dim),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.error)),
            );

            frame.render_widget(warning, area);
            return;
        }

        render_screen(frame, app);

        // Modal overlays, drawn last so they sit on top of the view
        match app.modal {
            Modal::Help => modals::render_help_modal(frame, app, area),
            Modal::Login => modals::render_login_modal(frame, app, area),
            Modal::Register => modals::render_register_modal(frame, app, area),
            Modal::CancelReservation => {
                modals::render_cancel_reservation_modal(frame, app, area)
            }
            Modal::None => {}
        }
    }
}
