use serde::{Deserialize, Serialize};

/// Presentation type of a showtime as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShowtimeKind {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "3D")]
    ThreeD,
    #[serde(rename = "VIP")]
    Vip,
}

impl ShowtimeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowtimeKind::Normal => "normal",
            ShowtimeKind::ThreeD => "3D",
            ShowtimeKind::Vip => "VIP",
        }
    }
}

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    /// Cancelled and completed reservations are final.
    pub fn is_cancellable(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        )
    }
}
