use super::*;
use crate::hold::HoldTimer;
use crate::seats::{SeatGrid, Selection};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use marquee_types::Showtime;
use std::time::Duration;

/// Helper to create a KeyEvent
fn key_event(code: KeyCode) -> KeyEvent {
    let mut event = KeyEvent::new(code, KeyModifiers::empty());
    event.kind = KeyEventKind::Press;
    event
}

fn test_app() -> App {
    let mut app = App::new("http://localhost:1/api");
    // Tests must not touch the real session file
    app.session_store = None;
    app.log_config.enabled = false;
    app
}

fn sample_showtime() -> Showtime {
    serde_json::from_str(
        r#"{
            "id": 3,
            "movie_id": 7,
            "movie_title": "Arrival",
            "start_time": "2026-09-01T20:30:00Z",
            "type": "normal"
        }"#,
    )
    .unwrap()
}

fn start_booking(app: &mut App, available: &[u16]) {
    let now = Instant::now();
    let mut hold = HoldTimer::new();
    hold.start(now);
    app.current_route = Route::Showtime(3);
    app.booking = Some(BookingState {
        showtime: sample_showtime(),
        grid: SeatGrid::standard(available),
        selection: Selection::new(),
        hold,
        cursor: (0, 0),
        submitting: false,
    });
}

#[test]
fn escape_closes_help_modal_first() {
    let mut app = test_app();
    app.modal = Modal::Help;

    // Escape should close help, not exit the app
    app.handle_key_event(key_event(KeyCode::Esc)).unwrap();

    assert_eq!(app.modal, Modal::None, "Help modal should be closed");
    assert!(app.running, "App should still be running");
}

#[test]
fn question_mark_toggles_help() {
    let mut app = test_app();

    app.handle_key_event(key_event(KeyCode::Char('?'))).unwrap();
    assert_eq!(app.modal, Modal::Help, "Help modal should be open");

    app.handle_key_event(key_event(KeyCode::Char('?'))).unwrap();
    assert_eq!(app.modal, Modal::None, "Help modal should be closed");
}

#[test]
fn escape_closes_login_modal_without_quitting() {
    let mut app = test_app();
    app.open_login_modal();

    app.handle_key_event(key_event(KeyCode::Esc)).unwrap();

    assert_eq!(app.modal, Modal::None);
    assert!(app.running);
}

#[test]
fn escape_quits_from_a_list_view() {
    let mut app = test_app();
    assert_eq!(app.current_route, Route::Movies);

    app.handle_key_event(key_event(KeyCode::Esc)).unwrap();
    assert!(!app.running);
}

#[test]
fn login_modal_typing_targets_the_active_field() {
    let mut app = test_app();
    app.open_login_modal();

    app.handle_key_event(key_event(KeyCode::Char('a'))).unwrap();
    app.handle_key_event(key_event(KeyCode::Char('b'))).unwrap();
    app.handle_key_event(key_event(KeyCode::Tab)).unwrap();
    app.handle_key_event(key_event(KeyCode::Char('p'))).unwrap();

    assert_eq!(app.auth.login_form.email, "ab");
    assert_eq!(app.auth.login_form.password, "p");
}

#[test]
fn navigation_keys_are_not_captured_while_typing() {
    let mut app = test_app();
    app.open_login_modal();

    // 'm' must type into the email field, not navigate to the movies view
    app.handle_key_event(key_event(KeyCode::Char('m'))).unwrap();

    assert_eq!(app.auth.login_form.email, "m");
    assert_eq!(app.modal, Modal::Login);
}

#[test]
fn space_toggles_the_pair_under_the_cursor() {
    let mut app = test_app();
    start_booking(&mut app, &[1, 2, 3, 4]);

    // Cursor starts on seat 1; space selects the couple pair {1, 2}
    app.handle_key_event(key_event(KeyCode::Char(' '))).unwrap();
    let booking = app.booking.as_ref().unwrap();
    assert_eq!(booking.selection.labels(), vec![1, 2]);

    // Move onto seat 2 and toggle again: both leave the selection
    app.handle_key_event(key_event(KeyCode::Right)).unwrap();
    app.handle_key_event(key_event(KeyCode::Char(' '))).unwrap();
    assert!(app.booking.as_ref().unwrap().selection.is_empty());
}

#[test]
fn cursor_stays_inside_the_grid() {
    let mut app = test_app();
    start_booking(&mut app, &[]);

    app.handle_key_event(key_event(KeyCode::Left)).unwrap();
    app.handle_key_event(key_event(KeyCode::Up)).unwrap();
    assert_eq!(app.booking.as_ref().unwrap().cursor, (0, 0));

    for _ in 0..20 {
        app.handle_key_event(key_event(KeyCode::Right)).unwrap();
        app.handle_key_event(key_event(KeyCode::Down)).unwrap();
    }
    assert_eq!(app.booking.as_ref().unwrap().cursor, (7, 9));
}

#[test]
fn cursor_clamps_to_the_grid_dimensions() {
    let mut app = test_app();
    start_booking(&mut app, &[]);
    // Smaller auditorium than the default layout
    app.booking.as_mut().unwrap().grid = SeatGrid::new(4, 6, &[]);

    for _ in 0..20 {
        app.handle_key_event(key_event(KeyCode::Right)).unwrap();
        app.handle_key_event(key_event(KeyCode::Down)).unwrap();
    }
    assert_eq!(app.booking.as_ref().unwrap().cursor, (3, 5));
}

#[test]
fn signing_in_mid_booking_keeps_the_selection() {
    let mut app = test_app();
    start_booking(&mut app, &[1, 2]);
    {
        let booking = app.booking.as_mut().unwrap();
        booking.selection.toggle(&booking.grid, 1);
    }
    app.needs_load = false;

    // The reload that follows a successful sign-in must not re-fetch the
    // showtime: that would rebuild the grid and drop the picked seats.
    app.reload_after_auth();

    assert!(!app.needs_load, "Seat view must not reload after sign-in");
    assert_eq!(app.booking.as_ref().unwrap().selection.labels(), vec![1, 2]);

    // Away from the seat map the view does reload with credentials attached
    let mut app = test_app();
    app.needs_load = false;
    app.reload_after_auth();
    assert!(app.needs_load);
}

#[test]
fn navigating_away_cancels_the_hold() {
    let mut app = test_app();
    start_booking(&mut app, &[1, 2]);
    app.booking
        .as_mut()
        .unwrap()
        .selection
        .toggle(&SeatGrid::standard(&[1, 2]), 1);

    app.navigate(Route::Movies);

    assert!(app.booking.is_none(), "Booking state should be torn down");
    assert_eq!(app.current_route, Route::Movies);
}

#[test]
fn hold_expiry_clears_the_selection_and_returns_home() {
    let mut app = test_app();
    start_booking(&mut app, &[1, 2]);

    let now = Instant::now();
    {
        let booking = app.booking.as_mut().unwrap();
        booking.selection.toggle(&booking.grid, 1);
        booking.hold = HoldTimer::with_duration(Duration::from_secs(5));
        booking.hold.start(now);
    }

    // Before the deadline nothing happens
    app.tick(now + Duration::from_secs(4));
    assert!(app.booking.is_some());

    // At the deadline the workflow is abandoned
    app.tick(now + Duration::from_secs(5));
    assert!(app.booking.is_none(), "Expiry should clear the workflow");
    assert_eq!(app.current_route, Route::default_route());
    assert!(app.needs_load);
    let alert = app.alert.as_ref().expect("expiry should raise an alert");
    assert_eq!(alert.level, AlertLevel::Warning);
}

#[tokio::test]
async fn unauthenticated_confirm_opens_the_login_prompt() {
    // No server is listening on the configured port; the confirm must
    // short-circuit before any network call or this test would error out.
    let mut app = test_app();
    start_booking(&mut app, &[1, 2]);
    {
        let booking = app.booking.as_mut().unwrap();
        booking.selection.toggle(&booking.grid, 1);
    }

    app.confirm_selection().await.unwrap();

    assert_eq!(app.modal, Modal::Login);
    let booking = app.booking.as_ref().unwrap();
    assert!(!booking.submitting);
    assert_eq!(
        booking.selection.labels(),
        vec![1, 2],
        "Selection must survive a refused confirm"
    );
}

#[tokio::test]
async fn empty_selection_confirm_is_a_noop() {
    let mut app = test_app();
    start_booking(&mut app, &[1, 2]);

    app.confirm_selection().await.unwrap();

    assert_eq!(app.modal, Modal::None);
    assert!(app.booking.is_some());
}

#[test]
fn alerts_clear_after_a_few_seconds() {
    let mut app = test_app();
    app.alert(AlertLevel::Info, "hello");

    let created = app.alert.as_ref().unwrap().created;
    app.tick(created + Duration::from_secs(1));
    assert!(app.alert.is_some());

    app.tick(created + Duration::from_secs(6));
    assert!(app.alert.is_none());
}

#[test]
fn profile_edit_escape_discards_changes() {
    let mut app = test_app();
    app.current_route = Route::Profile;
    app.profile.profile = Some(
        serde_json::from_str(r#"{"id": 1, "name": "Ada", "email": "ada@example.com"}"#).unwrap(),
    );
    app.profile.form.name = "Ada".to_string();
    app.profile.form.email = "ada@example.com".to_string();
    app.profile.editing = true;
    app.profile.form.field = Some(ProfileField::Name);

    app.handle_key_event(key_event(KeyCode::Char('X'))).unwrap();
    assert_eq!(app.profile.form.name, "AdaX");

    app.handle_key_event(key_event(KeyCode::Esc)).unwrap();
    assert!(!app.profile.editing);
    assert_eq!(app.profile.form.name, "Ada", "Edits should be discarded");
}
