use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::widgets::ListState;

use crate::app::state::{App, LoginField, Modal, PaymentField, ProfileField, RegisterField};
use crate::log_key_event;
use crate::route::Route;

/// Synchronous key handling. Async operations (login, register, confirm,
/// payment, cancel, logout) are dispatched from the event loop in main.rs
/// before this runs; anything that reaches here only mutates local state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    log_key_event!(
        app.log_config,
        "key {:?} route={} modal={:?}",
        key.code,
        app.current_route,
        app.modal
    );

    // Priority 1: Help modal (highest priority)
    if app.modal == Modal::Help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.close_modal();
        }
        return Ok(());
    }

    // Priority 2: Login modal
    if app.modal == Modal::Login {
        return handle_login_modal_keys(app, key);
    }

    // Priority 3: Register modal
    if app.modal == Modal::Register {
        return handle_register_modal_keys(app, key);
    }

    // Priority 4: Cancel-reservation confirmation.
    // 'y' / Enter is the async confirm, dispatched from main.rs.
    if app.modal == Modal::CancelReservation {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('n')) {
            app.close_modal();
        }
        return Ok(());
    }

    // Typing contexts consume character keys before global shortcuts
    if app.current_route == Route::Profile && app.profile.editing {
        return handle_profile_edit_keys(app, key);
    }
    if matches!(app.current_route, Route::Payment(_)) {
        return handle_payment_keys(app, key);
    }
    if matches!(app.current_route, Route::Showtime(_)) && app.booking.is_some() {
        return handle_booking_keys(app, key);
    }

    // Global keys
    match key.code {
        KeyCode::Char('?') => {
            app.modal = Modal::Help;
            return Ok(());
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
            return Ok(());
        }
        KeyCode::Char('m') => {
            app.navigate(Route::Movies);
            return Ok(());
        }
        KeyCode::Char('s') => {
            app.navigate(Route::Showtimes);
            return Ok(());
        }
        KeyCode::Char('p') => {
            app.navigate(Route::Profile);
            return Ok(());
        }
        KeyCode::Char('r') => {
            app.needs_load = true;
            return Ok(());
        }
        KeyCode::Char('i') if !app.auth.is_authenticated() => {
            app.open_login_modal();
            return Ok(());
        }
        _ => {}
    }

    // View-specific keys
    match app.current_route {
        Route::Movies => handle_movies_keys(app, key),
        Route::Showtimes => handle_showtimes_keys(app, key),
        Route::Movie(_) => handle_movie_detail_keys(app, key),
        Route::Profile => handle_profile_keys(app, key),
        Route::Reservation(_) => handle_reservation_keys(app, key),
        // Covered by the typing contexts above
        Route::Showtime(_) | Route::Payment(_) => Ok(()),
    }
}

// List helpers

fn list_next(state: &mut ListState, len: usize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let next = match state.selected() {
        Some(i) if i + 1 < len => i + 1,
        Some(i) => i,
        None => 0,
    };
    state.select(Some(next));
}

fn list_previous(state: &mut ListState, len: usize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let previous = match state.selected() {
        Some(i) => i.saturating_sub(1),
        None => 0,
    };
    state.select(Some(previous));
}

// View handlers

fn handle_movies_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    let len = app.movies.movies.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => list_next(&mut app.movies.list_state, len),
        KeyCode::Char('k') | KeyCode::Up => list_previous(&mut app.movies.list_state, len),
        KeyCode::Enter => {
            if let Some(movie) = app
                .movies
                .list_state
                .selected()
                .and_then(|i| app.movies.movies.get(i))
            {
                app.navigate(Route::Movie(movie.id));
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_showtimes_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    let len = app.showtimes.showtimes.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => list_next(&mut app.showtimes.list_state, len),
        KeyCode::Char('k') | KeyCode::Up => list_previous(&mut app.showtimes.list_state, len),
        KeyCode::Enter => {
            if let Some(showtime) = app
                .showtimes
                .list_state
                .selected()
                .and_then(|i| app.showtimes.showtimes.get(i))
            {
                app.navigate(Route::Showtime(showtime.id));
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_movie_detail_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    let len = app.movie_detail.showtimes.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => list_next(&mut app.movie_detail.list_state, len),
        KeyCode::Char('k') | KeyCode::Up => {
            list_previous(&mut app.movie_detail.list_state, len)
        }
        KeyCode::Enter => {
            if let Some(showtime) = app
                .movie_detail
                .list_state
                .selected()
                .and_then(|i| app.movie_detail.showtimes.get(i))
            {
                app.navigate(Route::Showtime(showtime.id));
            }
        }
        KeyCode::Char('t') => app.open_trailer(),
        KeyCode::Backspace => app.navigate(Route::Movies),
        _ => {}
    }
    Ok(())
}

/// Seat-selection keys: cursor movement, toggle, and leaving the view.
/// Enter / 'c' (confirm) is async and dispatched from main.rs.
fn handle_booking_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => move_cursor(app, 0, -1),
        KeyCode::Char('l') | KeyCode::Right => move_cursor(app, 0, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1, 0),
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1, 0),
        KeyCode::Char(' ') => app.toggle_seat_at_cursor(),
        KeyCode::Char('?') => app.modal = Modal::Help,
        KeyCode::Esc | KeyCode::Backspace => {
            // Leaving the seat view cancels the hold
            let back = app
                .booking
                .as_ref()
                .map(|b| b.showtime.movie_id)
                .filter(|id| *id > 0)
                .map(Route::Movie)
                .unwrap_or_else(Route::default_route);
            app.navigate(back);
        }
        KeyCode::Char('q') => app.running = false,
        _ => {}
    }
    Ok(())
}

fn move_cursor(app: &mut App, row_delta: i32, col_delta: i32) {
    if let Some(booking) = &mut app.booking {
        let (row, col) = booking.cursor;
        let max_row = booking.grid.rows().saturating_sub(1) as i32;
        let max_col = booking.grid.cols().saturating_sub(1) as i32;
        let row = (row as i32 + row_delta).clamp(0, max_row) as u16;
        let col = (col as i32 + col_delta).clamp(0, max_col) as u16;
        booking.cursor = (row, col);
    }
}

fn handle_profile_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    let len = app.profile.reservations.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => list_next(&mut app.profile.list_state, len),
        KeyCode::Char('k') | KeyCode::Up => list_previous(&mut app.profile.list_state, len),
        KeyCode::Enter => {
            if let Some(reservation) = app
                .profile
                .list_state
                .selected()
                .and_then(|i| app.profile.reservations.get(i))
            {
                app.navigate(Route::Reservation(reservation.id));
            }
        }
        KeyCode::Char('e') => {
            if app.profile.profile.is_some() {
                app.profile.editing = true;
                app.profile.error = None;
                app.profile.form.field = Some(ProfileField::Name);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Profile edit mode: character keys type into the active field.
/// Enter (save) is async and dispatched from main.rs.
fn handle_profile_edit_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            // Discard edits: re-seed the form from the loaded profile
            app.profile.editing = false;
            app.profile.error = None;
            if let Some(profile) = &app.profile.profile {
                app.profile.form.name = profile.name.clone();
                app.profile.form.email = profile.email.clone();
                app.profile.form.phone = profile.phone.clone().unwrap_or_default();
                app.profile.form.address = profile.address.clone().unwrap_or_default();
            }
            app.profile.form.field = None;
        }
        KeyCode::Tab | KeyCode::Down => {
            let field = app.profile.form.field.unwrap_or(ProfileField::Name);
            app.profile.form.field = Some(field.next());
        }
        KeyCode::Backspace => {
            profile_active_field_mut(app).pop();
        }
        KeyCode::Char(c) => {
            profile_active_field_mut(app).push(c);
        }
        _ => {}
    }
    Ok(())
}

fn profile_active_field_mut(app: &mut App) -> &mut String {
    let form = &mut app.profile.form;
    match form.field.unwrap_or(ProfileField::Name) {
        ProfileField::Name => &mut form.name,
        ProfileField::Email => &mut form.email,
        ProfileField::Phone => &mut form.phone,
        ProfileField::Address => &mut form.address,
    }
}

fn handle_reservation_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('x') => app.request_cancel_reservation(),
        KeyCode::Backspace => app.navigate(Route::Profile),
        _ => {}
    }
    Ok(())
}

/// Payment card form. Enter (pay) is async and dispatched from main.rs.
fn handle_payment_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace if payment_active_field(app).is_empty() => {
            app.navigate(Route::Profile);
        }
        KeyCode::Tab | KeyCode::Down => {
            let field = app.payment.form.field.unwrap_or(PaymentField::CardNumber);
            app.payment.form.field = Some(field.next());
        }
        KeyCode::Backspace => {
            payment_active_field_mut(app).pop();
        }
        KeyCode::Char(c) => {
            payment_active_field_mut(app).push(c);
        }
        _ => {}
    }
    Ok(())
}

fn payment_active_field(app: &App) -> &String {
    let form = &app.payment.form;
    match form.field.unwrap_or(PaymentField::CardNumber) {
        PaymentField::CardNumber => &form.card_number,
        PaymentField::Expiry => &form.expiry,
        PaymentField::Cvc => &form.cvc,
    }
}

fn payment_active_field_mut(app: &mut App) -> &mut String {
    let form = &mut app.payment.form;
    match form.field.unwrap_or(PaymentField::CardNumber) {
        PaymentField::CardNumber => &mut form.card_number,
        PaymentField::Expiry => &mut form.expiry,
        PaymentField::Cvc => &mut form.cvc,
    }
}

// Auth modal handlers. Enter (submit) is async and dispatched from main.rs.

fn handle_login_modal_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.close_modal(),
        KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
            let field = app.auth.login_form.active_field();
            app.auth.login_form.field = Some(field.next());
        }
        // Switch to the register form
        KeyCode::Right | KeyCode::Left => app.open_register_modal(),
        KeyCode::Backspace => {
            login_active_field_mut(app).pop();
        }
        KeyCode::Char(c) => {
            login_active_field_mut(app).push(c);
        }
        _ => {}
    }
    Ok(())
}

fn login_active_field_mut(app: &mut App) -> &mut String {
    let form = &mut app.auth.login_form;
    match form.field.unwrap_or(LoginField::Email) {
        LoginField::Email => &mut form.email,
        LoginField::Password => &mut form.password,
    }
}

fn handle_register_modal_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.close_modal(),
        KeyCode::Tab | KeyCode::Down => {
            let field = app.auth.register_form.active_field();
            app.auth.register_form.field = Some(field.next());
        }
        KeyCode::BackTab | KeyCode::Up => {
            let field = app.auth.register_form.active_field();
            app.auth.register_form.field = Some(field.previous());
        }
        // Switch back to the login form
        KeyCode::Right | KeyCode::Left => app.open_login_modal(),
        KeyCode::Backspace => {
            register_active_field_mut(app).pop();
        }
        KeyCode::Char(c) => {
            register_active_field_mut(app).push(c);
        }
        _ => {}
    }
    Ok(())
}

fn register_active_field_mut(app: &mut App) -> &mut String {
    let form = &mut app.auth.register_form;
    match form.field.unwrap_or(RegisterField::Name) {
        RegisterField::Name => &mut form.name,
        RegisterField::Email => &mut form.email,
        RegisterField::Password => &mut form.password,
        RegisterField::Phone => &mut form.phone,
        RegisterField::Address => &mut form.address,
    }
}
