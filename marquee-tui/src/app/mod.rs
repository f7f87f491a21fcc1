use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyEvent;
use marquee_types::{
    CreatePaymentIntentRequest, CreateReservationRequest, RegisterRequest, UpdateProfileRequest,
    User,
};
use ratatui::widgets::ListState;

use crate::api::{ApiClient, ApiError};
use crate::hold::HoldTimer;
use crate::route::Route;
use crate::seats::{SeatGrid, Selection};
use crate::session::SessionStore;
use crate::{log_api_call, log_route, log_timer};

pub mod state;
pub use state::*;
pub mod handlers;

#[cfg(test)]
mod tests;

/// How long a status-line alert stays visible
const ALERT_DURATION: Duration = Duration::from_secs(5);

impl App {
    pub fn new(server_url: impl Into<String>) -> Self {
        let session_store = match SessionStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("Session persistence unavailable: {}", e);
                None
            }
        };

        Self {
            running: true,
            api_client: ApiClient::new(server_url),
            session_store,
            current_route: Route::default_route(),
            needs_load: true,
            modal: Modal::None,
            alert: None,
            auth: AuthState {
                current_user: None,
                login_form: LoginForm::default(),
                register_form: RegisterForm::default(),
                loading: false,
                error: None,
            },
            movies: MoviesState {
                movies: Vec::new(),
                list_state: ListState::default(),
                loading: false,
                error: None,
            },
            movie_detail: MovieDetailState {
                movie: None,
                showtimes: Vec::new(),
                list_state: ListState::default(),
                loading: false,
                error: None,
            },
            showtimes: ShowtimesState {
                showtimes: Vec::new(),
                list_state: ListState::default(),
                loading: false,
                error: None,
            },
            booking: None,
            profile: ProfileState {
                profile: None,
                reservations: Vec::new(),
                list_state: ListState::default(),
                editing: false,
                form: ProfileForm::default(),
                loading: false,
                error: None,
            },
            reservation: ReservationState {
                reservation: None,
                tickets: Vec::new(),
                loading: false,
                error: None,
            },
            payment: PaymentState {
                reservation: None,
                form: PaymentForm::default(),
                submitting: false,
                loading: false,
                error: None,
            },
            log_config: crate::logging::LogConfig::default(),
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        handlers::handle_key_event(self, key)
    }

    // Navigation

    /// Switch to a route. The seat-selection workflow is torn down first so
    /// its hold timer never outlives the screen; the event loop performs
    /// the data load.
    pub fn navigate(&mut self, route: Route) {
        if self.booking.is_some() && route != self.current_route {
            self.teardown_booking();
        }
        log_route!(
            self.log_config,
            "navigate {} -> {}",
            self.current_route,
            route
        );
        self.current_route = route;
        self.needs_load = true;
    }

    fn teardown_booking(&mut self) {
        if let Some(booking) = &mut self.booking {
            booking.hold.cancel();
            booking.selection.clear();
        }
        if self.booking.take().is_some() {
            log_timer!(self.log_config, "hold cancelled: navigated away");
        }
    }

    // Alerts

    pub fn alert(&mut self, level: AlertLevel, message: impl Into<String>) {
        self.alert = Some(Alert {
            message: message.into(),
            level,
            created: Instant::now(),
        });
    }

    /// Periodic housekeeping driven by the event loop: hold-timer expiry
    /// and alert auto-clear.
    pub fn tick(&mut self, now: Instant) {
        let expired = self
            .booking
            .as_mut()
            .map(|booking| booking.hold.tick(now))
            .unwrap_or(false);

        if expired {
            // Expiry force-clears the selection and returns to the default
            // view. Terminal state: no auto-restart.
            if let Some(booking) = &mut self.booking {
                booking.selection.clear();
            }
            self.booking = None;
            log_timer!(self.log_config, "hold expired");
            self.alert(
                AlertLevel::Warning,
                "Your reservation hold has expired. Please start again.",
            );
            self.current_route = Route::default_route();
            self.needs_load = true;
        }

        if let Some(alert) = &self.alert {
            if now.duration_since(alert.created) > ALERT_DURATION {
                self.alert = None;
            }
        }
    }

    // Modals

    pub fn open_login_modal(&mut self) {
        self.auth.error = None;
        self.auth.login_form.clear();
        self.auth.login_form.field = Some(LoginField::Email);
        self.modal = Modal::Login;
    }

    pub fn open_register_modal(&mut self) {
        self.auth.error = None;
        self.auth.register_form.clear();
        self.auth.register_form.field = Some(RegisterField::Name);
        self.modal = Modal::Register;
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::None;
        self.auth.error = None;
    }

    // Error reporting

    /// Map an API failure to UI state: auth failures redirect to the login
    /// prompt, everything else becomes a generic alert. No retry.
    pub fn report_api_error(&mut self, context: &str, err: ApiError) {
        log::error!("{}: {}", context, err);
        if err.is_unauthorized() {
            self.auth.current_user = None;
            self.api_client.set_token(None);
            self.open_login_modal();
            self.alert(AlertLevel::Warning, "Please log in to continue.");
        } else {
            self.alert(AlertLevel::Error, context.to_string());
        }
    }

    // Session

    fn persist_token(&self, token: &str) {
        if let Some(store) = &self.session_store {
            if let Err(e) = store.save(token) {
                log::warn!("Failed to save session: {}", e);
            }
        }
    }

    /// Restore a persisted session on startup by validating the stored
    /// token against the profile endpoint.
    pub async fn restore_session(&mut self) -> Result<Option<User>> {
        let Some(store) = &self.session_store else {
            return Ok(None);
        };
        let Some(token) = store.load()? else {
            return Ok(None);
        };

        self.api_client.set_token(Some(token));
        match self.api_client.get_profile().await {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                log::warn!("Stored session is no longer valid: {}", e);
                self.api_client.set_token(None);
                let _ = store.delete();
                Ok(None)
            }
        }
    }

    /// Reload the current view now that credentials are attached. When the
    /// login prompt appeared over the seat map, the reload is skipped:
    /// re-fetching the showtime would rebuild the grid and throw away the
    /// seats picked before signing in.
    fn reload_after_auth(&mut self) {
        if self.booking.is_some() && matches!(self.current_route, Route::Showtime(_)) {
            return;
        }
        self.needs_load = true;
    }

    pub async fn submit_login(&mut self) -> Result<()> {
        let email = self.auth.login_form.email.trim().to_string();
        let password = self.auth.login_form.password.clone();
        if email.is_empty() || password.is_empty() {
            self.auth.error = Some("Email and password are required.".to_string());
            return Ok(());
        }

        self.auth.loading = true;
        self.auth.error = None;
        log_api_call!(self.log_config, "POST /login");

        match self.api_client.login(email, password).await {
            Ok(response) => {
                self.auth.loading = false;
                self.persist_token(&response.token);
                self.auth.current_user = match response.user {
                    Some(user) => Some(user),
                    None => self.api_client.get_profile().await.ok(),
                };
                self.auth.login_form.clear();
                self.modal = Modal::None;
                self.alert(AlertLevel::Success, "Logged in successfully.");
                self.reload_after_auth();
            }
            Err(e) => {
                self.auth.loading = false;
                log::error!("Login failed: {}", e);
                self.auth.error =
                    Some("Login failed. Please check your credentials.".to_string());
            }
        }
        Ok(())
    }

    pub async fn submit_register(&mut self) -> Result<()> {
        let form = &self.auth.register_form;
        let request = RegisterRequest {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
            phone: form.phone.trim().to_string(),
            address: form.address.trim().to_string(),
        };
        if request.name.is_empty() || request.email.is_empty() || request.password.is_empty() {
            self.auth.error = Some("Name, email and password are required.".to_string());
            return Ok(());
        }

        self.auth.loading = true;
        self.auth.error = None;
        log_api_call!(self.log_config, "POST /register");

        match self.api_client.register(request).await {
            Ok(response) => {
                self.auth.loading = false;
                self.persist_token(&response.token);
                self.auth.current_user = match response.user {
                    Some(user) => Some(user),
                    None => self.api_client.get_profile().await.ok(),
                };
                self.auth.register_form.clear();
                self.modal = Modal::None;
                self.alert(AlertLevel::Success, "Account created, welcome!");
                self.reload_after_auth();
            }
            Err(e) => {
                self.auth.loading = false;
                log::error!("Registration failed: {}", e);
                self.auth.error = Some("Registration failed. Please try again.".to_string());
            }
        }
        Ok(())
    }

    /// Logout: best-effort server call, local session always cleared.
    pub async fn logout(&mut self) -> Result<()> {
        log_api_call!(self.log_config, "POST /logout");
        if let Err(e) = self.api_client.logout().await {
            log::warn!("Server logout failed: {}", e);
        }
        if let Some(store) = &self.session_store {
            if let Err(e) = store.delete() {
                log::warn!("Failed to delete session file: {}", e);
            }
        }

        self.auth.current_user = None;
        self.profile.profile = None;
        self.profile.reservations.clear();
        self.alert(AlertLevel::Success, "Logged out.");
        self.navigate(Route::default_route());
        Ok(())
    }

    // Route loading

    /// Fetch the data for the current route. Auth-gated routes without a
    /// session fall back to the default view behind a login prompt.
    pub async fn load_current_route(&mut self) -> Result<()> {
        let route = self.current_route;

        if route.requires_auth() && !self.api_client.has_token() {
            self.open_login_modal();
            self.alert(AlertLevel::Warning, "Please log in to continue.");
            self.current_route = Route::default_route();
            return self.load_movies().await;
        }

        match route {
            Route::Movies => self.load_movies().await,
            Route::Showtimes => self.load_showtimes().await,
            Route::Profile => self.load_profile().await,
            Route::Movie(id) => self.load_movie_detail(id).await,
            Route::Showtime(id) => self.open_showtime(id).await,
            Route::Reservation(id) => self.load_reservation(id).await,
            Route::Payment(id) => self.load_payment(id).await,
        }
    }

    pub async fn load_movies(&mut self) -> Result<()> {
        self.movies.loading = true;
        self.movies.error = None;
        log_api_call!(self.log_config, "GET /movies");

        match self.api_client.get_movies().await {
            Ok(movies) => {
                self.movies.loading = false;
                if movies.is_empty() {
                    self.movies.list_state.select(None);
                } else {
                    self.movies.list_state.select(Some(0));
                }
                self.movies.movies = movies;
            }
            Err(e) => {
                self.movies.loading = false;
                self.movies.error =
                    Some("Unable to load movies. Please try again later.".to_string());
                log::error!("Failed to load movies: {}", e);
            }
        }
        Ok(())
    }

    pub async fn load_showtimes(&mut self) -> Result<()> {
        self.showtimes.loading = true;
        self.showtimes.error = None;
        log_api_call!(self.log_config, "GET /showtimes");

        match self.api_client.get_showtimes().await {
            Ok(showtimes) => {
                self.showtimes.loading = false;
                if showtimes.is_empty() {
                    self.showtimes.list_state.select(None);
                } else {
                    self.showtimes.list_state.select(Some(0));
                }
                self.showtimes.showtimes = showtimes;
            }
            Err(e) => {
                self.showtimes.loading = false;
                self.showtimes.error =
                    Some("Unable to load showtimes. Please try again later.".to_string());
                log::error!("Failed to load showtimes: {}", e);
            }
        }
        Ok(())
    }

    pub async fn load_movie_detail(&mut self, movie_id: i64) -> Result<()> {
        self.movie_detail.loading = true;
        self.movie_detail.error = None;
        log_api_call!(self.log_config, "GET /movies/{}", movie_id);

        let movie = self.api_client.get_movie(movie_id).await;
        let showtimes = self.api_client.get_showtimes_by_movie(movie_id).await;

        self.movie_detail.loading = false;
        match (movie, showtimes) {
            (Ok(movie), Ok(showtimes)) => {
                self.movie_detail.movie = Some(movie);
                if showtimes.is_empty() {
                    self.movie_detail.list_state.select(None);
                } else {
                    self.movie_detail.list_state.select(Some(0));
                }
                self.movie_detail.showtimes = showtimes;
            }
            (movie, showtimes) => {
                if let Err(e) = movie {
                    log::error!("Failed to load movie {}: {}", movie_id, e);
                }
                if let Err(e) = showtimes {
                    log::error!("Failed to load showtimes for movie {}: {}", movie_id, e);
                }
                self.movie_detail.error =
                    Some("Unable to load the movie. Please try again later.".to_string());
            }
        }
        Ok(())
    }

    // Seat-selection workflow

    /// Display the seat-selection view for a showtime: fetch the showtime
    /// and the availability snapshot, build the grid, and arm the hold
    /// timer. Any prior hold was already cancelled by `navigate`.
    pub async fn open_showtime(&mut self, showtime_id: i64) -> Result<()> {
        log_api_call!(
            self.log_config,
            "GET /showtimes/{0} + /seats/available/{0}",
            showtime_id
        );

        let showtime = self.api_client.get_showtime(showtime_id).await;
        let seats = self.api_client.get_available_seats(showtime_id).await;

        match (showtime, seats) {
            (Ok(showtime), Ok(seats)) => {
                let mut hold = HoldTimer::new();
                hold.start(Instant::now());
                log_timer!(self.log_config, "hold started for showtime {}", showtime_id);

                self.booking = Some(BookingState {
                    showtime,
                    grid: SeatGrid::standard(&seats),
                    selection: Selection::new(),
                    hold,
                    cursor: (0, 0),
                    submitting: false,
                });
            }
            (showtime, seats) => {
                if let Err(e) = showtime {
                    log::error!("Failed to load showtime {}: {}", showtime_id, e);
                }
                if let Err(e) = seats {
                    log::error!("Failed to load seats for showtime {}: {}", showtime_id, e);
                }
                self.booking = None;
                self.alert(
                    AlertLevel::Error,
                    "Unable to load the showtime. Please try again later.",
                );
                self.current_route = Route::default_route();
                self.needs_load = true;
            }
        }
        Ok(())
    }

    /// Toggle the seat under the cursor together with its couple partner.
    pub fn toggle_seat_at_cursor(&mut self) {
        if let Some(booking) = &mut self.booking {
            let label = booking.cursor_label();
            booking.selection.toggle(&booking.grid, label);
        }
    }

    /// Submit the selection as a reservation. Requires a non-empty
    /// selection and an authenticated session; unauthenticated confirms
    /// open the login prompt without touching the network. On success the
    /// workflow hands off to the payment view; on failure the selection is
    /// left intact for a manual retry.
    pub async fn confirm_selection(&mut self) -> Result<()> {
        let Some(booking) = &self.booking else {
            return Ok(());
        };
        if !booking.selection.can_confirm() || booking.submitting {
            return Ok(());
        }

        let request = CreateReservationRequest {
            showtime_id: booking.showtime.id,
            seats: booking.selection.labels(),
        };

        // The token check runs before anything touches the network
        if !self.api_client.has_token() {
            self.open_login_modal();
            self.alert(AlertLevel::Warning, "Please log in to continue.");
            return Ok(());
        }

        if let Some(booking) = &mut self.booking {
            booking.submitting = true;
        }
        log_api_call!(self.log_config, "POST /reservations");

        match self.api_client.create_reservation(request).await {
            Ok(reservation) => {
                self.teardown_booking();
                self.alert(AlertLevel::Success, "Reservation created.");
                self.navigate(Route::Payment(reservation.id));
            }
            Err(e) => {
                // The server is the sole authority on availability; a stale
                // selection surfaces here as a generic failure.
                if let Some(booking) = &mut self.booking {
                    booking.submitting = false;
                }
                self.report_api_error("Unable to create the reservation. Please try again.", e);
            }
        }
        Ok(())
    }

    // Profile

    pub async fn load_profile(&mut self) -> Result<()> {
        self.profile.loading = true;
        self.profile.error = None;
        log_api_call!(self.log_config, "GET /me + /reservations");

        let profile = self.api_client.get_profile().await;
        let reservations = self.api_client.get_reservations().await;

        self.profile.loading = false;
        match (profile, reservations) {
            (Ok(profile), Ok(reservations)) => {
                self.profile.form = ProfileForm {
                    name: profile.name.clone(),
                    email: profile.email.clone(),
                    phone: profile.phone.clone().unwrap_or_default(),
                    address: profile.address.clone().unwrap_or_default(),
                    field: None,
                };
                self.auth.current_user = Some(profile.clone());
                self.profile.profile = Some(profile);
                if reservations.is_empty() {
                    self.profile.list_state.select(None);
                } else {
                    self.profile.list_state.select(Some(0));
                }
                self.profile.reservations = reservations;
            }
            (profile, reservations) => {
                let err = profile.err().or_else(|| reservations.err());
                if let Some(e) = err {
                    self.report_api_error("Unable to load your profile. Please try again.", e);
                }
            }
        }
        Ok(())
    }

    pub async fn submit_profile(&mut self) -> Result<()> {
        if !self.profile.editing {
            return Ok(());
        }
        let form = &self.profile.form;
        let request = UpdateProfileRequest {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            address: form.address.trim().to_string(),
        };
        if request.name.is_empty() || request.email.is_empty() {
            self.profile.error = Some("Name and email are required.".to_string());
            return Ok(());
        }

        log_api_call!(self.log_config, "PUT /profile");
        match self.api_client.update_profile(request).await {
            Ok(user) => {
                self.profile.editing = false;
                self.profile.form.field = None;
                self.profile.profile = Some(user.clone());
                self.auth.current_user = Some(user);
                self.alert(AlertLevel::Success, "Profile updated.");
            }
            Err(e) => {
                self.report_api_error("Unable to update your profile. Please try again.", e);
            }
        }
        Ok(())
    }

    // Reservations and payment

    pub async fn load_reservation(&mut self, reservation_id: i64) -> Result<()> {
        self.reservation.loading = true;
        self.reservation.error = None;
        log_api_call!(
            self.log_config,
            "GET /reservations/{0} + /tickets/reservation/{0}",
            reservation_id
        );

        let reservation = self.api_client.get_reservation(reservation_id).await;
        let tickets = self.api_client.get_reservation_tickets(reservation_id).await;

        self.reservation.loading = false;
        match reservation {
            Ok(reservation) => {
                self.reservation.reservation = Some(reservation);
                // Tickets may legitimately be absent before payment.
                self.reservation.tickets = tickets.unwrap_or_default();
            }
            Err(e) => {
                self.reservation.reservation = None;
                self.reservation.tickets.clear();
                self.report_api_error("Unable to load the reservation. Please try again.", e);
            }
        }
        Ok(())
    }

    pub async fn load_payment(&mut self, reservation_id: i64) -> Result<()> {
        self.payment.loading = true;
        self.payment.error = None;
        log_api_call!(self.log_config, "GET /reservations/{}", reservation_id);

        match self.api_client.get_reservation(reservation_id).await {
            Ok(reservation) => {
                self.payment.loading = false;
                self.payment.reservation = Some(reservation);
                self.payment.form = PaymentForm {
                    field: Some(PaymentField::CardNumber),
                    ..PaymentForm::default()
                };
            }
            Err(e) => {
                self.payment.loading = false;
                self.payment.reservation = None;
                self.report_api_error("Unable to load the payment page. Please try again.", e);
            }
        }
        Ok(())
    }

    /// Simulated payment: the card details are never sent anywhere, only a
    /// payment intent is created against the reservation.
    pub async fn submit_payment(&mut self) -> Result<()> {
        let Some(reservation) = &self.payment.reservation else {
            return Ok(());
        };
        if self.payment.submitting {
            return Ok(());
        }
        if !self.payment.form.is_complete() {
            self.payment.error = Some("All card fields are required.".to_string());
            return Ok(());
        }

        let reservation_id = reservation.id;
        let request = CreatePaymentIntentRequest {
            reservation_id,
            amount: reservation.total_price,
        };

        self.payment.submitting = true;
        self.payment.error = None;
        log_api_call!(self.log_config, "POST /payments/create-intent");

        match self.api_client.create_payment_intent(request).await {
            Ok(_) => {
                self.payment.submitting = false;
                self.payment.form = PaymentForm::default();
                self.alert(AlertLevel::Success, "Payment accepted.");
                self.navigate(Route::Reservation(reservation_id));
            }
            Err(e) => {
                self.payment.submitting = false;
                self.report_api_error("Payment failed. Please try again.", e);
            }
        }
        Ok(())
    }

    /// Ask for confirmation before cancelling the displayed reservation.
    pub fn request_cancel_reservation(&mut self) {
        if let Some(reservation) = &self.reservation.reservation {
            if reservation.status.is_cancellable() {
                self.modal = Modal::CancelReservation;
            } else {
                self.alert(
                    AlertLevel::Info,
                    "This reservation can no longer be cancelled.",
                );
            }
        }
    }

    pub async fn confirm_cancel_reservation(&mut self) -> Result<()> {
        self.modal = Modal::None;
        let Some(reservation) = &self.reservation.reservation else {
            return Ok(());
        };
        let reservation_id = reservation.id;

        log_api_call!(self.log_config, "DELETE /reservations/{}", reservation_id);
        match self.api_client.cancel_reservation(reservation_id).await {
            Ok(_) => {
                self.alert(AlertLevel::Success, "Reservation cancelled.");
                self.navigate(Route::default_route());
            }
            Err(e) => {
                self.report_api_error("Unable to cancel the reservation. Please try again.", e);
            }
        }
        Ok(())
    }

    /// Open the displayed movie's trailer in the default browser.
    pub fn open_trailer(&mut self) {
        let Some(url) = self
            .movie_detail
            .movie
            .as_ref()
            .and_then(|m| m.trailer_url.clone())
        else {
            return;
        };
        if let Err(e) = webbrowser::open(&url) {
            log::warn!("Failed to open trailer {}: {}", url, e);
            self.alert(AlertLevel::Warning, format!("Could not open browser. Trailer: {}", url));
        }
    }
}
