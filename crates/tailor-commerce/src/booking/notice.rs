//! Customer notices sent at booking milestones.

use crate::booking::measurement::Garment;
use crate::booking::record::Booking;
use serde::{Deserialize, Serialize};

/// An email to a customer, rendered but not sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingNotice {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl BookingNotice {
    /// Sent after a booking is created.
    pub fn confirmation(booking: &Booking) -> Self {
        let body = format!(
            "Dear {name},\n\n\
             Thank you for booking with us! Your appointment has been successfully scheduled.\n\n\
             Appointment Details:\n\
             - Date: {date}\n\
             - Time: {time}\n\
             - Type: {kind}\n\
             - Location: {location}\n\n\
             We will contact you shortly to confirm your appointment.\n\n\
             Best regards,\n\
             The Team\n",
            name = booking.name,
            date = booking.preferred_date,
            time = booking.preferred_time.format("%H:%M"),
            kind = booking.measurement_type.visit_label(),
            location = booking.location,
        );
        Self {
            recipient: booking.email.clone(),
            subject: "Booking Confirmed - Your Measurement Appointment".to_string(),
            body,
        }
    }

    /// Sent when measurements are recorded or the garments are ready.
    pub fn measurements_complete(booking: &Booking) -> Self {
        let mut measurements = String::new();
        for garment in Garment::ALL {
            let grid = booking.measurements(garment);
            if !grid.is_empty() {
                measurements.push_str(&format!("\n{} Measurements:\n", garment.title()));
                measurements.push_str(&grid.summary(garment));
            }
        }

        let delivery = booking
            .delivery_date
            .map(|d| format!("\nExpected Delivery Date: {d}"))
            .unwrap_or_default();
        let admin_note = booking
            .admin_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .map(|m| format!("\n\nMessage from our team:\n{m}"))
            .unwrap_or_default();

        let body = format!(
            "Dear {name},\n\n\
             Great news! Your measurements have been completed and recorded.\n\n\
             Bill Number: {bill}\n\
             Status: {status}{delivery}\n\
             {measurements}{admin_note}\n\n\
             Thank you for choosing us!\n\n\
             Best regards,\n\
             The Team\n",
            name = booking.name,
            bill = booking.bill_number.as_deref().unwrap_or("N/A"),
            status = booking.status.display_name(),
        );
        Self {
            recipient: booking.email.clone(),
            subject: "Your Measurements are Complete!".to_string(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::measurement::MeasurementCell;
    use crate::booking::record::{MeasurementType, NewBooking};
    use crate::ids::BookingId;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn booking() -> Booking {
        NewBooking {
            name: "Sita Rai".to_string(),
            email: Some("sita@example.com".to_string()),
            phone_number: "9811111111".to_string(),
            location: "Lalitpur".to_string(),
            measurement_type: MeasurementType::HomeVisit,
            preferred_date: NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            preferred_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            customer_notes: None,
        }
        .into_booking(BookingId::new(7), Utc::now())
    }

    #[test]
    fn test_confirmation() {
        let notice = BookingNotice::confirmation(&booking());
        assert_eq!(notice.recipient, "sita@example.com");
        assert!(notice.body.contains("- Date: 2026-05-02"));
        assert!(notice.body.contains("- Time: 14:00"));
        assert!(notice.body.contains("- Type: Home Visit"));
    }

    #[test]
    fn test_measurements_complete() {
        let mut b = booking();
        b.bill_number = Some("20260502-X1Y2".to_string());
        b.admin_message = Some("Bring your shoes for the trial.".to_string());
        b.coat_measurements
            .set(Garment::Coat, "C", MeasurementCell::new(Some("40"), Some("42")))
            .unwrap();

        let notice = BookingNotice::measurements_complete(&b);
        assert_eq!(notice.subject, "Your Measurements are Complete!");
        assert!(notice.body.contains("Bill Number: 20260502-X1Y2"));
        assert!(notice.body.contains("COAT & SAFARI Measurements:\n  C: A=40, B=42"));
        assert!(!notice.body.contains("PANT Measurements"));
        assert!(notice.body.contains("Message from our team:\nBring your shoes"));
    }

    #[test]
    fn test_measurements_complete_without_bill() {
        let notice = BookingNotice::measurements_complete(&booking());
        assert!(notice.body.contains("Bill Number: N/A"));
        assert!(!notice.body.contains("Expected Delivery Date"));
    }
}
