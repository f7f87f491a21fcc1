use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult};
use marquee_types::*;

/// API client for communicating with the ticketing server
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Whether a bearer token is currently attached
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Helper to add the bearer token to a request if available
    fn add_auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    /// Helper to handle API responses
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            // Prefer the structured error body; clean up HTML error pages
            // (e.g. from a misconfigured reverse proxy)
            let clean_error = if let Ok(body) = serde_json::from_str::<ErrorResponse>(&error_text) {
                match body.details {
                    Some(details) => format!("{}: {}", body.error, details),
                    None => body.error,
                }
            } else if error_text.contains("<html>") || error_text.contains("<!DOCTYPE") {
                format!("Server returned {} error. Please check the server URL.", status.as_u16())
            } else {
                error_text
            };

            match status.as_u16() {
                404 => Err(ApiError::NotFound(clean_error)),
                401 => Err(ApiError::Unauthorized(clean_error)),
                400 => Err(ApiError::BadRequest(clean_error)),
                _ => Err(ApiError::Api(clean_error)),
            }
        }
    }

    // Authentication endpoints

    /// Login with email and password; stores the returned token
    pub async fn login(&mut self, email: String, password: String) -> ApiResult<LoginResponse> {
        let url = format!("{}/login", self.base_url);
        let request = LoginRequest { email, password };
        let response = self.client.post(&url).json(&request).send().await?;
        let login_response: LoginResponse = self.handle_response(response).await?;

        self.token = Some(login_response.token.clone());

        Ok(login_response)
    }

    /// Register a new account; stores the returned token
    pub async fn register(&mut self, request: RegisterRequest) -> ApiResult<LoginResponse> {
        let url = format!("{}/register", self.base_url);
        let response = self.client.post(&url).json(&request).send().await?;
        let login_response: LoginResponse = self.handle_response(response).await?;

        self.token = Some(login_response.token.clone());

        Ok(login_response)
    }

    /// Invalidate the server-side session. The local token is cleared even
    /// when the server call fails.
    pub async fn logout(&mut self) -> ApiResult<()> {
        let url = format!("{}/logout", self.base_url);
        let req = self.add_auth_header(self.client.post(&url));
        let result = req.send().await;
        self.token = None;

        let response = result?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Api(format!("Logout failed with status {}", status.as_u16())))
        }
    }

    // Profile endpoints

    /// Get the authenticated user's profile
    pub async fn get_profile(&self) -> ApiResult<User> {
        let url = format!("{}/me", self.base_url);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Update the authenticated user's profile
    pub async fn update_profile(&self, request: UpdateProfileRequest) -> ApiResult<User> {
        let url = format!("{}/profile", self.base_url);
        let req = self.add_auth_header(self.client.put(&url).json(&request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    // Movie endpoints

    /// Get all movies currently listed
    pub async fn get_movies(&self) -> ApiResult<Vec<Movie>> {
        let url = format!("{}/movies", self.base_url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Get a single movie by ID
    pub async fn get_movie(&self, id: i64) -> ApiResult<Movie> {
        let url = format!("{}/movies/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    // Showtime endpoints

    /// Get all showtimes
    pub async fn get_showtimes(&self) -> ApiResult<Vec<Showtime>> {
        let url = format!("{}/showtimes", self.base_url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Get showtimes for a specific movie
    pub async fn get_showtimes_by_movie(&self, movie_id: i64) -> ApiResult<Vec<Showtime>> {
        let url = format!("{}/showtimes/movie/{}", self.base_url, movie_id);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Get a single showtime by ID
    pub async fn get_showtime(&self, id: i64) -> ApiResult<Showtime> {
        let url = format!("{}/showtimes/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    // Seat endpoints

    /// Get the labels of seats still available for a showtime
    pub async fn get_available_seats(&self, showtime_id: i64) -> ApiResult<Vec<u16>> {
        let url = format!("{}/seats/available/{}", self.base_url, showtime_id);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    // Reservation endpoints

    /// Create a reservation for the given showtime and seats
    pub async fn create_reservation(&self, request: CreateReservationRequest) -> ApiResult<Reservation> {
        let url = format!("{}/reservations", self.base_url);
        let req = self.add_auth_header(self.client.post(&url).json(&request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Get the authenticated user's reservations
    pub async fn get_reservations(&self) -> ApiResult<Vec<Reservation>> {
        let url = format!("{}/reservations", self.base_url);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Get a single reservation by ID
    pub async fn get_reservation(&self, id: i64) -> ApiResult<Reservation> {
        let url = format!("{}/reservations/{}", self.base_url, id);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Cancel a reservation
    pub async fn cancel_reservation(&self, id: i64) -> ApiResult<serde_json::Value> {
        let url = format!("{}/reservations/{}", self.base_url, id);
        let req = self.add_auth_header(self.client.delete(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    // Payment endpoints

    /// Create a payment intent for a reservation
    pub async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> ApiResult<PaymentIntent> {
        let url = format!("{}/payments/create-intent", self.base_url);
        let req = self.add_auth_header(self.client.post(&url).json(&request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    // Ticket endpoints

    /// Get a single ticket by ID
    pub async fn get_ticket(&self, id: i64) -> ApiResult<Ticket> {
        let url = format!("{}/tickets/{}", self.base_url, id);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Get all tickets for a reservation
    pub async fn get_reservation_tickets(&self, reservation_id: i64) -> ApiResult<Vec<Ticket>> {
        let url = format!("{}/tickets/reservation/{}", self.base_url, reservation_id);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new("http://localhost:8000/api")
    }
}
