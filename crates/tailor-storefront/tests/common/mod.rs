#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use tailor_commerce::booking::{Booking, MeasurementType, NewBooking};
use tailor_commerce::BookingId;
use tailor_data::MockTransport;
use tailor_storefront::StorefrontApi;

pub const BASE_URL: &str = "http://api.test";
pub const TOKEN: &str = "token-123";

/// API over a shared mock so the test can script replies and read requests.
pub fn api() -> (Arc<MockTransport>, StorefrontApi<Arc<MockTransport>>) {
    let mock = Arc::new(MockTransport::new());
    let api = StorefrontApi::with_base_url(Arc::clone(&mock), BASE_URL);
    (mock, api)
}

pub fn url(path: &str) -> String {
    format!("{}/{}", BASE_URL, path)
}

pub fn booking(id: u64) -> Booking {
    let request = NewBooking {
        name: "Hari Sharma".to_string(),
        email: Some("hari@example.com".to_string()),
        phone_number: "9800000000".to_string(),
        location: "Kathmandu".to_string(),
        measurement_type: MeasurementType::InStore,
        preferred_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        preferred_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        customer_notes: None,
    };
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    let mut booking = request.into_booking(BookingId::new(id), now);
    booking.bill_number = Some("20260314-AB12".to_string());
    booking
}
