//! Booking status state machine.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Where a booking is in the tailoring pipeline.
///
/// Bookings move forward through
/// `Pending -> Confirmed -> InProgress -> Completed -> Delivered`, may skip
/// ahead, and can be cancelled from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Booked by the customer, not yet confirmed.
    #[default]
    Pending,
    /// Appointment confirmed by the shop.
    Confirmed,
    /// Garments being made.
    InProgress,
    /// Garments ready.
    Completed,
    /// Handed over to the customer.
    Delivered,
    /// Booking called off.
    Cancelled,
}

impl BookingStatus {
    /// All statuses in pipeline order, cancelled last.
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Delivered,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Delivered => "delivered",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::InProgress => "In Progress",
            BookingStatus::Completed => "Completed",
            BookingStatus::Delivered => "Delivered",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse a wire status string.
    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| CommerceError::InvalidStatus(s.to_string()))
    }

    /// Position in the forward pipeline; `None` for cancelled.
    fn rank(&self) -> Option<u8> {
        match self {
            BookingStatus::Pending => Some(0),
            BookingStatus::Confirmed => Some(1),
            BookingStatus::InProgress => Some(2),
            BookingStatus::Completed => Some(3),
            BookingStatus::Delivered => Some(4),
            BookingStatus::Cancelled => None,
        }
    }

    /// Check if the booking can no longer change status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Delivered | BookingStatus::Cancelled)
    }

    /// Check if the booking can be cancelled.
    pub fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }

    /// Check if moving to `next` is allowed. Staying put always is.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        if *self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), next.rank()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, Some(_)) => false,
        }
    }

    /// Validate a transition and return the new status.
    pub fn transition(self, next: BookingStatus) -> Result<BookingStatus, CommerceError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CommerceError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }

    /// Status that should trigger a "measurements complete" notice.
    pub fn notifies_customer(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Delivered)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
