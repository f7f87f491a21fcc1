use std::time::Instant;

use marquee_types::{Movie, Reservation, Showtime, Ticket, User};
use ratatui::widgets::ListState;

use crate::api::ApiClient;
use crate::hold::HoldTimer;
use crate::route::Route;
use crate::seats::{SeatGrid, Selection};
use crate::session::SessionStore;

/// Severity of a transient status-line alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient user-visible message; auto-clears after a few seconds
#[derive(Debug, Clone)]
pub struct Alert {
    pub message: String,
    pub level: AlertLevel,
    pub created: Instant,
}

/// Modal overlays, highest-priority input consumers.
/// At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    None,
    Help,
    Login,
    Register,
    CancelReservation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    pub fn next(&self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub field: Option<LoginField>,
}

impl LoginForm {
    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
        self.field = None;
    }

    pub fn active_field(&self) -> LoginField {
        self.field.unwrap_or(LoginField::Email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Name,
    Email,
    Password,
    Phone,
    Address,
}

impl RegisterField {
    pub fn next(&self) -> Self {
        match self {
            RegisterField::Name => RegisterField::Email,
            RegisterField::Email => RegisterField::Password,
            RegisterField::Password => RegisterField::Phone,
            RegisterField::Phone => RegisterField::Address,
            RegisterField::Address => RegisterField::Name,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            RegisterField::Name => RegisterField::Address,
            RegisterField::Email => RegisterField::Name,
            RegisterField::Password => RegisterField::Email,
            RegisterField::Phone => RegisterField::Password,
            RegisterField::Address => RegisterField::Phone,
        }
    }
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub field: Option<RegisterField>,
}

impl RegisterForm {
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.password.clear();
        self.phone.clear();
        self.address.clear();
        self.field = None;
    }

    pub fn active_field(&self) -> RegisterField {
        self.field.unwrap_or(RegisterField::Name)
    }
}

/// Authentication state: the restored or freshly logged-in user plus the
/// login/register form contents
pub struct AuthState {
    pub current_user: Option<User>,
    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

/// Movies list view state
pub struct MoviesState {
    pub movies: Vec<Movie>,
    pub list_state: ListState,
    pub loading: bool,
    pub error: Option<String>,
}

/// Movie detail view state: the movie plus its showtimes
pub struct MovieDetailState {
    pub movie: Option<Movie>,
    pub showtimes: Vec<Showtime>,
    pub list_state: ListState,
    pub loading: bool,
    pub error: Option<String>,
}

/// Showtimes list view state
pub struct ShowtimesState {
    pub showtimes: Vec<Showtime>,
    pub list_state: ListState,
    pub loading: bool,
    pub error: Option<String>,
}

/// The seat-selection workflow: grid, selection set, and hold timer.
/// Exists only while the seat-selection view is displayed; torn down (and
/// the hold cancelled) on navigation away.
pub struct BookingState {
    pub showtime: Showtime,
    pub grid: SeatGrid,
    pub selection: Selection,
    pub hold: HoldTimer,
    /// Cursor position in the grid, (row, col)
    pub cursor: (u16, u16),
    pub submitting: bool,
}

impl BookingState {
    pub fn cursor_label(&self) -> u16 {
        self.grid.label_at(self.cursor.0, self.cursor.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Address,
}

impl ProfileField {
    pub fn next(&self) -> Self {
        match self {
            ProfileField::Name => ProfileField::Email,
            ProfileField::Email => ProfileField::Phone,
            ProfileField::Phone => ProfileField::Address,
            ProfileField::Address => ProfileField::Name,
        }
    }
}

#[derive(Debug, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub field: Option<ProfileField>,
}

/// Profile view state: profile fields plus the user's reservations
pub struct ProfileState {
    pub profile: Option<User>,
    pub reservations: Vec<Reservation>,
    pub list_state: ListState,
    pub editing: bool,
    pub form: ProfileForm,
    pub loading: bool,
    pub error: Option<String>,
}

/// Reservation detail view state: the reservation plus its tickets
pub struct ReservationState {
    pub reservation: Option<Reservation>,
    pub tickets: Vec<Ticket>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    CardNumber,
    Expiry,
    Cvc,
}

impl PaymentField {
    pub fn next(&self) -> Self {
        match self {
            PaymentField::CardNumber => PaymentField::Expiry,
            PaymentField::Expiry => PaymentField::Cvc,
            PaymentField::Cvc => PaymentField::CardNumber,
        }
    }
}

#[derive(Debug, Default)]
pub struct PaymentForm {
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
    pub field: Option<PaymentField>,
}

impl PaymentForm {
    pub fn is_complete(&self) -> bool {
        !self.card_number.trim().is_empty()
            && !self.expiry.trim().is_empty()
            && !self.cvc.trim().is_empty()
    }
}

/// Payment view state
pub struct PaymentState {
    pub reservation: Option<Reservation>,
    pub form: PaymentForm,
    pub submitting: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// Main application state. One explicit context object instead of
/// per-concern global singletons.
pub struct App {
    pub running: bool,
    pub api_client: ApiClient,
    pub session_store: Option<SessionStore>,
    pub current_route: Route,
    /// Set on navigation; the event loop performs the actual load
    pub needs_load: bool,
    pub modal: Modal,
    pub alert: Option<Alert>,
    pub auth: AuthState,
    pub movies: MoviesState,
    pub movie_detail: MovieDetailState,
    pub showtimes: ShowtimesState,
    pub booking: Option<BookingState>,
    pub profile: ProfileState,
    pub reservation: ReservationState,
    pub payment: PaymentState,
    pub log_config: crate::logging::LogConfig,
}
