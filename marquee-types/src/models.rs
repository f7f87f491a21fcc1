use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{ReservationStatus, ShowtimeKind};

// Custom serde module for DateTime to ensure RFC3339 string format
pub(crate) mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.to_rfc3339();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Running time in minutes.
    pub duration: i32,
    pub min_age: i32,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theater {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Showtime {
    pub id: i64,
    #[serde(default)]
    pub movie_id: i64,
    /// Embedded movie, present on list payloads.
    #[serde(default)]
    pub movie: Option<Movie>,
    /// Flattened title, present on detail payloads.
    #[serde(default)]
    pub movie_title: Option<String>,
    #[serde(with = "datetime_format")]
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub theater: Option<Theater>,
    #[serde(rename = "type", default)]
    pub kind: ShowtimeKind,
    #[serde(default)]
    pub language: String,
}

impl Showtime {
    /// The server embeds either a full movie or a flattened title depending
    /// on the endpoint; resolve whichever is present.
    pub fn title(&self) -> &str {
        if let Some(movie) = &self.movie {
            return &movie.title;
        }
        self.movie_title.as_deref().unwrap_or("Unknown movie")
    }

    pub fn theater_name(&self) -> &str {
        self.theater.as_ref().map(|t| t.name.as_str()).unwrap_or("-")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub showtime: Showtime,
    #[serde(default)]
    pub movie_title: Option<String>,
    /// Seat labels within the theater grid.
    pub seats: Vec<u16>,
    pub total_price: f64,
    #[serde(default)]
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn title(&self) -> &str {
        self.movie_title
            .as_deref()
            .unwrap_or_else(|| self.showtime.title())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub reservation_id: i64,
    pub seat_number: u16,
    /// QR payload scanned at the theater entrance.
    pub qr_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub reservation_id: i64,
    pub amount: f64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showtime_title_prefers_embedded_movie() {
        let json = r#"{
            "id": 3,
            "movie_id": 7,
            "movie": {"id": 7, "title": "Arrival", "duration": 116, "min_age": 12},
            "start_time": "2026-09-01T20:30:00Z",
            "theater": {"id": 1, "name": "Salle 1", "capacity": 80},
            "type": "VIP",
            "language": "VOSTFR"
        }"#;
        let showtime: Showtime = serde_json::from_str(json).unwrap();
        assert_eq!(showtime.title(), "Arrival");
        assert_eq!(showtime.kind, ShowtimeKind::Vip);
        assert_eq!(showtime.theater_name(), "Salle 1");
    }

    #[test]
    fn showtime_title_falls_back_to_flattened_field() {
        let json = r#"{
            "id": 3,
            "movie_title": "Arrival",
            "start_time": "2026-09-01T20:30:00Z",
            "type": "normal"
        }"#;
        let showtime: Showtime = serde_json::from_str(json).unwrap();
        assert_eq!(showtime.title(), "Arrival");
        assert_eq!(showtime.kind, ShowtimeKind::Normal);
    }

    #[test]
    fn reservation_status_defaults_to_pending() {
        let json = r#"{
            "id": 12,
            "showtime": {"id": 3, "movie_title": "Arrival", "start_time": "2026-09-01T20:30:00Z"},
            "seats": [1, 2],
            "total_price": 20.0
        }"#;
        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert!(reservation.status.is_cancellable());
        assert_eq!(reservation.title(), "Arrival");
    }
}
