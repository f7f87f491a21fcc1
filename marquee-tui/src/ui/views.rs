use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::formatting::{format_duration, format_price, format_timestamp, wrap_text};
use super::theme::{theme, ThemeColors};
use crate::app::{AlertLevel, App, PaymentField, ProfileField};
use crate::route::Route;
use crate::seats::{format_cents, SeatStatus};

pub fn render_screen(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    match app.current_route {
        Route::Movies => render_movies(frame, app, chunks[1]),
        Route::Showtimes => render_showtimes(frame, app, chunks[1]),
        Route::Movie(_) => render_movie_detail(frame, app, chunks[1]),
        Route::Showtime(_) => render_seat_map(frame, app, chunks[1]),
        Route::Profile => render_profile(frame, app, chunks[1]),
        Route::Reservation(_) => render_reservation(frame, app, chunks[1]),
        Route::Payment(_) => render_payment(frame, app, chunks[1]),
    }

    render_status_line(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = theme();

    let account = match &app.auth.current_user {
        Some(user) => Span::styled(
            format!(" {} ", user.name),
            Style::default().fg(theme.success),
        ),
        None => Span::styled(" not signed in ", Style::default().fg(theme.text_dim)),
    };

    let nav_style = |route: Route| {
        if std::mem::discriminant(&app.current_route) == std::mem::discriminant(&route) {
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_dim)
        }
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " MARQUEE ",
            Style::default()
                .fg(theme.background)
                .bg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("[m] Movies", nav_style(Route::Movies)),
        Span::raw("  "),
        Span::styled("[s] Showtimes", nav_style(Route::Showtimes)),
        Span::raw("  "),
        Span::styled("[p] Profile", nav_style(Route::Profile)),
        Span::raw("  |"),
        account,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(header, area);
}

fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let theme = theme();

    let line = if let Some(alert) = &app.alert {
        let color = match alert.level {
            AlertLevel::Info => theme.text,
            AlertLevel::Success => theme.success,
            AlertLevel::Warning => theme.warning,
            AlertLevel::Error => theme.error,
        };
        Line::from(Span::styled(
            alert.message.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    } else {
        let hints = match app.current_route {
            Route::Movies => "j/k: Move | Enter: Movie details | r: Refresh | ?: Help | q: Quit",
            Route::Showtimes => "j/k: Move | Enter: Pick seats | r: Refresh | ?: Help | q: Quit",
            Route::Movie(_) => {
                "j/k: Move | Enter: Pick seats | t: Trailer | Backspace: Back | ?: Help"
            }
            Route::Showtime(_) => {
                "hjkl: Move | Space: Toggle pair | Enter: Confirm | Esc: Back | ?: Help"
            }
            Route::Profile => "j/k: Move | Enter: Reservation | e: Edit profile | Shift+L: Logout",
            Route::Reservation(_) => "x: Cancel reservation | Backspace: Back | ?: Help",
            Route::Payment(_) => "Type card details | Tab: Next field | Enter: Pay | ?: Help",
        };
        Line::from(Span::styled(hints, Style::default().fg(theme.text_dim)))
    };

    let status = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(status, area);
}

fn loading_or_error<'a>(
    loading: bool,
    error: &'a Option<String>,
    theme: &ThemeColors,
) -> Option<Paragraph<'a>> {
    if loading {
        return Some(
            Paragraph::new("Loading...")
                .style(Style::default().fg(theme.text_dim))
                .alignment(Alignment::Center),
        );
    }
    if let Some(error) = error {
        return Some(
            Paragraph::new(error.as_str())
                .style(Style::default().fg(theme.error))
                .alignment(Alignment::Center),
        );
    }
    None
}

// Movies list

fn render_movies(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Now Showing ");

    if let Some(placeholder) = loading_or_error(app.movies.loading, &app.movies.error, &theme) {
        frame.render_widget(placeholder.block(block), area);
        return;
    }

    if app.movies.movies.is_empty() {
        let empty = Paragraph::new("No movies are currently programmed.")
            .style(Style::default().fg(theme.text_dim))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .movies
        .movies
        .iter()
        .map(|movie| {
            let meta = format!(
                "{} | {} | {}+",
                movie.genre.as_deref().unwrap_or("-"),
                format_duration(movie.duration),
                movie.min_age
            );
            ListItem::new(vec![
                Line::from(Span::styled(
                    movie.title.clone(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", meta),
                    Style::default().fg(theme.text_dim),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.movies.list_state);
}

// Showtimes list

fn showtime_line(
    showtime: &marquee_types::Showtime,
    theme: &ThemeColors,
) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(
                format_timestamp(&showtime.start_time),
                Style::default().fg(theme.secondary),
            ),
            Span::raw("  "),
            Span::styled(
                showtime.title().to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "  {} | {} | {}",
                showtime.theater_name(),
                showtime.kind.as_str(),
                showtime.language
            ),
            Style::default().fg(theme.text_dim),
        )),
    ]
}

fn render_showtimes(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Showtimes ");

    if let Some(placeholder) =
        loading_or_error(app.showtimes.loading, &app.showtimes.error, &theme)
    {
        frame.render_widget(placeholder.block(block), area);
        return;
    }

    if app.showtimes.showtimes.is_empty() {
        let empty = Paragraph::new("No upcoming showtimes.")
            .style(Style::default().fg(theme.text_dim))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .showtimes
        .showtimes
        .iter()
        .map(|showtime| ListItem::new(showtime_line(showtime, &theme)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.showtimes.list_state);
}

// Movie detail

fn render_movie_detail(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = theme();

    if let Some(placeholder) =
        loading_or_error(app.movie_detail.loading, &app.movie_detail.error, &theme)
    {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(placeholder.block(block), area);
        return;
    }

    let Some(movie) = &app.movie_detail.movie else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} | {} | minimum age {}",
                movie.genre.as_deref().unwrap_or("-"),
                format_duration(movie.duration),
                movie.min_age
            ),
            Style::default().fg(theme.text_dim),
        )),
        Line::from(""),
    ];
    let wrap_width = chunks[0].width.saturating_sub(4) as usize;
    lines.extend(wrap_text(
        movie.description.as_deref().unwrap_or("No synopsis available."),
        wrap_width,
        &theme,
    ));
    if movie.trailer_url.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press 't' to watch the trailer in your browser",
            Style::default().fg(theme.secondary),
        )));
    }

    let details = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Movie "),
    );
    frame.render_widget(details, chunks[0]);

    let showtimes_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Showtimes ");

    if app.movie_detail.showtimes.is_empty() {
        let empty = Paragraph::new("No showtimes scheduled for this movie.")
            .style(Style::default().fg(theme.text_dim))
            .alignment(Alignment::Center)
            .block(showtimes_block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = app
        .movie_detail
        .showtimes
        .iter()
        .map(|showtime| ListItem::new(showtime_line(showtime, &theme)))
        .collect();

    let list = List::new(items)
        .block(showtimes_block)
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, chunks[1], &mut app.movie_detail.list_state);
}

// Seat map

fn seat_status(app: &App, label: u16) -> SeatStatus {
    let Some(booking) = &app.booking else {
        return SeatStatus::Occupied;
    };
    if booking.selection.contains(label) {
        SeatStatus::Selected
    } else if booking.grid.is_available(label) {
        SeatStatus::Available
    } else {
        SeatStatus::Occupied
    }
}

fn render_seat_map(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = theme();

    let Some(booking) = &app.booking else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(theme.text_dim))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(loading, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(46), Constraint::Length(32)])
        .split(area);

    // Auditorium: screen banner, then the grid. Couple pairs (odd, even)
    // are drawn adjacent with a gap between pairs.
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "{} - {}",
                booking.showtime.title(),
                format_timestamp(&booking.showtime.start_time)
            ),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "┌──────────── SCREEN ────────────┐",
            Style::default().fg(theme.text_dim),
        )),
        Line::from(""),
    ];

    for row in 0..booking.grid.rows() {
        let mut spans = vec![Span::styled(
            format!(" {} ", (b'A' + row as u8) as char),
            Style::default().fg(theme.text_dim),
        )];
        for col in 0..booking.grid.cols() {
            let label = booking.grid.label_at(row, col);
            let status = seat_status(app, label);
            let under_cursor = booking.cursor == (row, col);

            let mut style = match status {
                SeatStatus::Available => Style::default().fg(theme.text),
                SeatStatus::Occupied => Style::default().fg(theme.error),
                SeatStatus::Selected => Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            };
            if under_cursor {
                style = style.bg(theme.highlight_bg).add_modifier(Modifier::BOLD);
            }

            let glyph = match status {
                SeatStatus::Available => format!("{:02}", label),
                SeatStatus::Occupied => "××".to_string(),
                SeatStatus::Selected => "◆◆".to_string(),
            };
            spans.push(Span::styled(glyph, style));

            // Gap between couple pairs, none inside a pair
            if booking.grid.is_couple(label) {
                spans.push(Span::raw("  "));
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("01", Style::default().fg(theme.text)),
        Span::styled(" free  ", Style::default().fg(theme.text_dim)),
        Span::styled("××", Style::default().fg(theme.error)),
        Span::styled(" taken  ", Style::default().fg(theme.text_dim)),
        Span::styled("◆◆", Style::default().fg(theme.success)),
        Span::styled(" yours  ", Style::default().fg(theme.text_dim)),
        Span::styled("pairs book together", Style::default().fg(theme.text_dim)),
    ]));

    let map = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Pick Your Seats "),
    );
    frame.render_widget(map, chunks[0]);

    // Booking summary sidebar
    let countdown = booking
        .hold
        .display(Instant::now())
        .unwrap_or_else(|| "--:--".to_string());
    let seat_list = booking
        .selection
        .labels()
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let mut summary = vec![
        Line::from(vec![
            Span::styled("Hold expires in ", Style::default().fg(theme.text_dim)),
            Span::styled(
                countdown,
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("Seats", Style::default().fg(theme.text_dim))),
        Line::from(Span::styled(
            if seat_list.is_empty() {
                "none selected".to_string()
            } else {
                seat_list
            },
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Total  ", Style::default().fg(theme.text_dim)),
            Span::styled(
                format_cents(booking.selection.total_cents()),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];
    if booking.submitting {
        summary.push(Line::from(Span::styled(
            "Reserving...",
            Style::default().fg(theme.text_dim),
        )));
    } else if booking.selection.can_confirm() {
        summary.push(Line::from(Span::styled(
            "Enter: Confirm reservation",
            Style::default().fg(theme.success),
        )));
    } else {
        summary.push(Line::from(Span::styled(
            "Select at least one seat",
            Style::default().fg(theme.text_dim),
        )));
    }

    let sidebar = Paragraph::new(summary).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Summary "),
    );
    frame.render_widget(sidebar, chunks[1]);
}

// Profile

fn profile_field_line(
    label: &str,
    value: &str,
    active: bool,
    theme: &ThemeColors,
) -> Line<'static> {
    let value_style = if active {
        Style::default()
            .fg(theme.primary)
            .bg(theme.highlight_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let shown = if active {
        format!("{}█", value)
    } else {
        value.to_string()
    };
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(theme.text_dim)),
        Span::styled(shown, value_style),
    ])
}

fn render_profile(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = theme();

    if let Some(placeholder) = loading_or_error(app.profile.loading, &app.profile.error, &theme)
    {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(placeholder.block(block), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(0)])
        .split(area);

    // Profile card, either read-only or the edit form
    let active = |field: ProfileField| {
        app.profile.editing && app.profile.form.field == Some(field)
    };
    let form = &app.profile.form;
    let mut lines = vec![
        profile_field_line("Name", &form.name, active(ProfileField::Name), &theme),
        profile_field_line("Email", &form.email, active(ProfileField::Email), &theme),
        profile_field_line("Phone", &form.phone, active(ProfileField::Phone), &theme),
        profile_field_line("Address", &form.address, active(ProfileField::Address), &theme),
    ];
    if let Some(role) = app.profile.profile.as_ref().and_then(|p| p.role.as_deref()) {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", "Role"), Style::default().fg(theme.text_dim)),
            Span::styled(role.to_string(), Style::default().fg(theme.text_dim)),
        ]));
    }
    lines.push(Line::from(""));
    if app.profile.editing {
        lines.push(Line::from(Span::styled(
            "Tab: Next field | Enter: Save | Esc: Discard",
            Style::default().fg(theme.text_dim),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "e: Edit profile",
            Style::default().fg(theme.text_dim),
        )));
    }

    let title = if app.profile.editing {
        " Profile (editing) "
    } else {
        " Profile "
    };
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(title),
    );
    frame.render_widget(card, chunks[0]);

    // Reservation history
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" My Reservations ");

    if app.profile.reservations.is_empty() {
        let empty = Paragraph::new("No reservations yet.")
            .style(Style::default().fg(theme.text_dim))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = app
        .profile
        .reservations
        .iter()
        .map(|reservation| {
            let status_color = match reservation.status {
                marquee_types::ReservationStatus::Confirmed => theme.success,
                marquee_types::ReservationStatus::Pending => theme.warning,
                marquee_types::ReservationStatus::Cancelled => theme.error,
                marquee_types::ReservationStatus::Completed => theme.text_dim,
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        reservation.title().to_string(),
                        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("[{}]", reservation.status.as_str()),
                        Style::default().fg(status_color),
                    ),
                ]),
                Line::from(Span::styled(
                    format!(
                        "  {} | {} seat(s) | {}",
                        format_timestamp(&reservation.showtime.start_time),
                        reservation.seats.len(),
                        format_price(reservation.total_price)
                    ),
                    Style::default().fg(theme.text_dim),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, chunks[1], &mut app.profile.list_state);
}

// Reservation detail

fn render_reservation(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Reservation ");

    if let Some(placeholder) =
        loading_or_error(app.reservation.loading, &app.reservation.error, &theme)
    {
        frame.render_widget(placeholder.block(block), area);
        return;
    }

    let Some(reservation) = &app.reservation.reservation else {
        let empty = Paragraph::new("Reservation not found.")
            .style(Style::default().fg(theme.text_dim))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let seat_list = reservation
        .seats
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        Line::from(Span::styled(
            reservation.title().to_string(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} | {}",
                format_timestamp(&reservation.showtime.start_time),
                reservation.showtime.theater_name()
            ),
            Style::default().fg(theme.text_dim),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Status  ", Style::default().fg(theme.text_dim)),
            Span::styled(
                reservation.status.as_str().to_string(),
                Style::default().fg(theme.text),
            ),
        ]),
        Line::from(vec![
            Span::styled("Seats   ", Style::default().fg(theme.text_dim)),
            Span::styled(seat_list, Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::styled("Total   ", Style::default().fg(theme.text_dim)),
            Span::styled(
                format_price(reservation.total_price),
                Style::default().fg(theme.text),
            ),
        ]),
        Line::from(""),
    ];

    if app.reservation.tickets.is_empty() {
        lines.push(Line::from(Span::styled(
            "Tickets are issued once payment completes.",
            Style::default().fg(theme.text_dim),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Tickets",
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        )));
        for ticket in &app.reservation.tickets {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  seat {:<3}", ticket.seat_number),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("  {}", ticket.qr_code),
                    Style::default().fg(theme.text_dim),
                ),
            ]));
        }
    }

    if reservation.status.is_cancellable() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "x: Cancel this reservation",
            Style::default().fg(theme.error),
        )));
    }

    let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(detail, area);
}

// Payment

fn payment_field_line(
    label: &str,
    value: &str,
    active: bool,
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
    let shown = if active {
        format!("{}█", value)
    } else {
        value.to_string()
    };
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(theme.text_dim)),
        Span::styled(shown, style),
    ])
}

fn render_payment(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Payment ");

    if let Some(placeholder) = loading_or_error(app.payment.loading, &app.payment.error, &theme)
    {
        frame.render_widget(placeholder.block(block), area);
        return;
    }

    let Some(reservation) = &app.payment.reservation else {
        let empty = Paragraph::new("Nothing to pay.")
            .style(Style::default().fg(theme.text_dim))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let form = &app.payment.form;
    let active = |field: PaymentField| form.field == Some(field);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                reservation.title().to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} seat(s)", reservation.seats.len()),
                Style::default().fg(theme.text_dim),
            ),
        ]),
        Line::from(vec![
            Span::styled("Amount due  ", Style::default().fg(theme.text_dim)),
            Span::styled(
                format_price(reservation.total_price),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        payment_field_line(
            "Card number",
            &form.card_number,
            active(PaymentField::CardNumber),
            &theme,
        ),
        payment_field_line("Expiry", &form.expiry, active(PaymentField::Expiry), &theme),
        payment_field_line("CVC", &form.cvc, active(PaymentField::Cvc), &theme),
        Line::from(""),
    ];

    if app.payment.submitting {
        lines.push(Line::from(Span::styled(
            "Processing payment...",
            Style::default().fg(theme.text_dim),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "This is a demo checkout, the card is never charged.",
            Style::default().fg(theme.text_dim),
        )));
        lines.push(Line::from(Span::styled(
            "Enter: Pay | Tab: Next field",
            Style::default().fg(theme.secondary),
        )));
    }

    let checkout = Paragraph::new(lines).block(block);
    frame.render_widget(checkout, area);
}
