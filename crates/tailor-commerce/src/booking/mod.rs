//! Measurement bookings.
//!
//! A booking starts as a customer request, picks up measurements, a bill
//! number and a bill in the back office, and moves through the status
//! pipeline until delivery.

mod desk;
mod measurement;
mod notice;
mod record;
mod status;

pub use desk::{
    bill_number_for, BookingDesk, BookingFilter, BookingStats, MeasurementOutcome, LOOKUP_LIMIT,
};
pub use measurement::{Garment, MeasurementCell, MeasurementGrid};
pub use notice::BookingNotice;
pub use record::{Booking, MeasurementType, MeasurementUpdate, NewBooking, DEFAULT_EMAIL};
pub use status::BookingStatus;
