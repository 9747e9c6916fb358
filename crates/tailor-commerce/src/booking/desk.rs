//! Back-office booking registry.

use crate::bill::BillData;
use crate::booking::notice::BookingNotice;
use crate::booking::record::{Booking, MeasurementType, MeasurementUpdate, NewBooking};
use crate::booking::status::BookingStatus;
use crate::error::CommerceError;
use crate::ids::BookingId;
use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum matches returned by a customer lookup.
pub const LOOKUP_LIMIT: usize = 10;

const BILL_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const BILL_SUFFIX_LEN: usize = 4;

/// Filters for listing bookings. Empty fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingFilter {
    pub search: Option<String>,
    pub status: Option<BookingStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub measurement_type: Option<MeasurementType>,
    pub has_measurements: Option<bool>,
}

impl BookingFilter {
    /// Check if a booking passes every filter.
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(search) = &self.search {
            if !booking.matches_query(search) {
                return false;
            }
        }
        if self.status.map_or(false, |s| s != booking.status) {
            return false;
        }
        if self.start_date.map_or(false, |d| booking.preferred_date < d) {
            return false;
        }
        if self.end_date.map_or(false, |d| booking.preferred_date > d) {
            return false;
        }
        if self
            .measurement_type
            .map_or(false, |t| t != booking.measurement_type)
        {
            return false;
        }
        if self
            .has_measurements
            .map_or(false, |want| want != booking.has_measurements())
        {
            return false;
        }
        true
    }
}

/// Booking counts per status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub delivered: usize,
    pub cancelled: usize,
    pub with_measurements: usize,
}

/// Result of an admin measurement edit.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementOutcome {
    /// The booking after the edit.
    pub booking: Booking,
    /// Completion notice, when one is due.
    pub notice: Option<BookingNotice>,
}

/// In-memory registry of bookings, listed newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<Booking>", into = "Vec<Booking>")]
pub struct BookingDesk {
    bookings: Vec<Booking>,
    next_id: u64,
}

impl BookingDesk {
    pub fn new() -> Self {
        Self {
            bookings: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of bookings.
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Validate and store a customer booking. Returns the stored record and
    /// its confirmation notice.
    pub fn create(
        &mut self,
        mut request: NewBooking,
    ) -> Result<(Booking, BookingNotice), CommerceError> {
        request.validate()?;
        let id = BookingId::new(self.next_id);
        self.next_id += 1;

        let booking = request.into_booking(id, Utc::now());
        let notice = BookingNotice::confirmation(&booking);
        self.bookings.push(booking.clone());
        Ok((booking, notice))
    }

    /// Look up a booking.
    pub fn get(&self, id: BookingId) -> Result<&Booking, CommerceError> {
        self.bookings
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| CommerceError::BookingNotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: BookingId) -> Result<&mut Booking, CommerceError> {
        self.bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| CommerceError::BookingNotFound(id.to_string()))
    }

    /// Bookings matching `filter`, newest first.
    pub fn list(&self, filter: &BookingFilter) -> Vec<&Booking> {
        let mut found: Vec<&Booking> = self
            .bookings
            .iter()
            .filter(|b| filter.matches(b))
            .collect();
        found.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.get().cmp(&a.id.get()))
        });
        found
    }

    /// Find customers by phone, email, name or bill number.
    pub fn lookup(&self, query: &str) -> Result<Vec<&Booking>, CommerceError> {
        if query.trim().is_empty() {
            return Err(CommerceError::ValidationError(
                "Query parameter \"q\" is required".to_string(),
            ));
        }
        let filter = BookingFilter {
            search: Some(query.to_string()),
            ..Default::default()
        };
        let mut found = self.list(&filter);
        found.truncate(LOOKUP_LIMIT);
        Ok(found)
    }

    /// Move a booking to a new status.
    pub fn update_status(
        &mut self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<&Booking, CommerceError> {
        let booking = self.get_mut(id)?;
        booking.status = booking.status.transition(status)?;
        booking.updated_at = Utc::now();
        Ok(booking)
    }

    /// Apply an admin measurement edit.
    ///
    /// Assigns a bill number when the booking has none, stamps
    /// `measurement_completed_at` the first time measurements appear, and
    /// renders the completion notice when `send_email` is set or the booking
    /// ends up completed or delivered.
    pub fn update_measurements(
        &mut self,
        id: BookingId,
        mut update: MeasurementUpdate,
    ) -> Result<MeasurementOutcome, CommerceError> {
        update.validate()?;

        let requested_number = update
            .bill_number
            .take()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if let Some(number) = &requested_number {
            self.ensure_bill_number_free(id, number)?;
        }

        let current = self.get(id)?;
        let status = match update.status.take() {
            Some(next) => current.status.transition(next)?,
            None => current.status,
        };
        let bill_number = match (requested_number, current.bill_number.clone()) {
            (Some(number), _) => number,
            (None, Some(existing)) => existing,
            (None, None) => self.generate_bill_number(),
        };

        let send_email = update.send_email;
        let now = Utc::now();
        let booking = self.get_mut(id)?;
        let had_measurements = booking.has_measurements();

        booking.status = status;
        booking.bill_number = Some(bill_number);
        update.apply_fields(booking);
        if !had_measurements && booking.has_measurements() {
            booking.measurement_completed_at = Some(now);
        }
        booking.updated_at = now;

        let notice = (send_email || booking.status.notifies_customer())
            .then(|| BookingNotice::measurements_complete(booking));
        Ok(MeasurementOutcome {
            booking: booking.clone(),
            notice,
        })
    }

    /// Store a bill against a booking, replacing any previous one.
    pub fn save_bill(&mut self, id: BookingId, bill: BillData) -> Result<&Booking, CommerceError> {
        let booking = self.get_mut(id)?;
        booking.bill_data = Some(bill);
        booking.updated_at = Utc::now();
        Ok(booking)
    }

    /// Counts per status.
    pub fn stats(&self) -> BookingStats {
        let mut stats = BookingStats {
            total: self.bookings.len(),
            ..Default::default()
        };
        for booking in &self.bookings {
            let slot = match booking.status {
                BookingStatus::Pending => &mut stats.pending,
                BookingStatus::Confirmed => &mut stats.confirmed,
                BookingStatus::InProgress => &mut stats.in_progress,
                BookingStatus::Completed => &mut stats.completed,
                BookingStatus::Delivered => &mut stats.delivered,
                BookingStatus::Cancelled => &mut stats.cancelled,
            };
            *slot += 1;
            if booking.has_measurements() {
                stats.with_measurements += 1;
            }
        }
        stats
    }

    /// A fresh bill number for today that no booking uses yet.
    pub fn generate_bill_number(&self) -> String {
        let today = Utc::now().date_naive();
        let mut rng = rand::thread_rng();
        loop {
            let candidate = bill_number_for(today, &mut rng);
            if !self.bill_number_taken(&candidate) {
                return candidate;
            }
        }
    }

    fn bill_number_taken(&self, number: &str) -> bool {
        self.bookings
            .iter()
            .any(|b| b.bill_number.as_deref() == Some(number))
    }

    fn ensure_bill_number_free(&self, id: BookingId, number: &str) -> Result<(), CommerceError> {
        let taken = self
            .bookings
            .iter()
            .any(|b| b.id != id && b.bill_number.as_deref() == Some(number));
        if taken {
            Err(CommerceError::DuplicateBillNumber(number.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Format a bill number as `YYYYMMDD-XXXX`.
pub fn bill_number_for(date: NaiveDate, rng: &mut impl Rng) -> String {
    let suffix: String = (0..BILL_SUFFIX_LEN)
        .map(|_| char::from(BILL_ALPHABET[rng.gen_range(0..BILL_ALPHABET.len())]))
        .collect();
    format!("{}-{}", date.format("%Y%m%d"), suffix)
}

impl Default for BookingDesk {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Booking>> for BookingDesk {
    fn from(bookings: Vec<Booking>) -> Self {
        let next_id = bookings.iter().map(|b| b.id.get()).max().unwrap_or(0) + 1;
        Self { bookings, next_id }
    }
}

impl From<BookingDesk> for Vec<Booking> {
    fn from(desk: BookingDesk) -> Self {
        desk.bookings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::measurement::{Garment, MeasurementCell, MeasurementGrid};
    use chrono::NaiveTime;
    use rand::rngs::mock::StepRng;

    fn request(name: &str, phone: &str) -> NewBooking {
        NewBooking {
            name: name.to_string(),
            email: None,
            phone_number: phone.to_string(),
            location: "Kathmandu".to_string(),
            measurement_type: MeasurementType::InStore,
            preferred_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            preferred_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            customer_notes: None,
        }
    }

    fn coat_grid() -> MeasurementGrid {
        let mut grid = MeasurementGrid::new();
        grid.set(Garment::Coat, "L", MeasurementCell::new(Some("30"), None))
            .unwrap();
        grid
    }

    #[test]
    fn test_create_forces_pending_and_confirms() {
        let mut desk = BookingDesk::new();
        let (booking, notice) = desk.create(request("Ram", "9800000000")).unwrap();
        assert_eq!(booking.id, BookingId::new(1));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(notice.recipient, "noemail@example.com");
        assert_eq!(desk.len(), 1);
    }

    #[test]
    fn test_create_rejects_invalid() {
        let mut desk = BookingDesk::new();
        assert!(desk.create(request(" ", "9800000000")).is_err());
        assert!(desk.is_empty());
    }

    #[test]
    fn test_list_newest_first_and_filters() {
        let mut desk = BookingDesk::new();
        desk.create(request("Ram", "9800000000")).unwrap();
        desk.create(request("Sita", "9811111111")).unwrap();
        desk.update_status(BookingId::new(2), BookingStatus::Confirmed)
            .unwrap();

        let all = desk.list(&BookingFilter::default());
        assert_eq!(all[0].name, "Sita");

        let confirmed = desk.list(&BookingFilter {
            status: Some(BookingStatus::Confirmed),
            ..Default::default()
        });
        assert_eq!(confirmed.len(), 1);

        let late = desk.list(&BookingFilter {
            start_date: NaiveDate::from_ymd_opt(2026, 4, 1),
            ..Default::default()
        });
        assert!(late.is_empty());
    }

    #[test]
    fn test_lookup() {
        let mut desk = BookingDesk::new();
        for i in 0..12 {
            desk.create(request(&format!("Customer {i}"), "9800000000"))
                .unwrap();
        }
        assert_eq!(desk.lookup("9800").unwrap().len(), LOOKUP_LIMIT);
        assert!(desk.lookup("  ").is_err());
    }

    #[test]
    fn test_update_status_rejects_backward() {
        let mut desk = BookingDesk::new();
        desk.create(request("Ram", "9800000000")).unwrap();
        let id = BookingId::new(1);
        desk.update_status(id, BookingStatus::Completed).unwrap();
        let err = desk.update_status(id, BookingStatus::Pending).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn test_update_measurements_assigns_bill_and_stamps() {
        let mut desk = BookingDesk::new();
        desk.create(request("Ram", "9800000000")).unwrap();
        let id = BookingId::new(1);

        let outcome = desk
            .update_measurements(id, MeasurementUpdate::default().with_grid(Garment::Coat, coat_grid()))
            .unwrap();
        let number = outcome.booking.bill_number.clone().unwrap();
        assert_eq!(number.len(), 13);
        assert!(outcome.booking.measurement_completed_at.is_some());
        assert!(outcome.notice.is_none());

        let stamped = outcome.booking.measurement_completed_at;
        let outcome = desk
            .update_measurements(
                id,
                MeasurementUpdate {
                    status: Some(BookingStatus::Completed),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(outcome.booking.bill_number.as_deref(), Some(number.as_str()));
        assert_eq!(outcome.booking.measurement_completed_at, stamped);
        assert!(outcome.notice.is_some());
    }

    #[test]
    fn test_update_measurements_send_email_flag() {
        let mut desk = BookingDesk::new();
        desk.create(request("Ram", "9800000000")).unwrap();
        let outcome = desk
            .update_measurements(
                BookingId::new(1),
                MeasurementUpdate {
                    send_email: true,
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(outcome.notice.is_some());
    }

    #[test]
    fn test_update_measurements_rejects_duplicate_bill_number() {
        let mut desk = BookingDesk::new();
        desk.create(request("Ram", "9800000000")).unwrap();
        desk.create(request("Sita", "9811111111")).unwrap();
        let claim = |n: &str| MeasurementUpdate {
            bill_number: Some(n.to_string()),
            ..Default::default()
        };
        desk.update_measurements(BookingId::new(1), claim("20260314-AAAA"))
            .unwrap();
        let err = desk
            .update_measurements(BookingId::new(2), claim("20260314-AAAA"))
            .unwrap_err();
        assert_eq!(err, CommerceError::DuplicateBillNumber("20260314-AAAA".to_string()));
    }

    #[test]
    fn test_update_measurements_rejects_unknown_key() {
        let mut desk = BookingDesk::new();
        desk.create(request("Ram", "9800000000")).unwrap();
        let grid: MeasurementGrid = serde_json::from_str(r#"{"ZZ": {"A": "1"}}"#).unwrap();
        let err = desk
            .update_measurements(BookingId::new(1), MeasurementUpdate::default().with_grid(Garment::Shirt, grid))
            .unwrap_err();
        assert!(matches!(err, CommerceError::UnknownMeasurement { .. }));
        assert!(desk.get(BookingId::new(1)).unwrap().bill_number.is_none());
    }

    #[test]
    fn test_stats() {
        let mut desk = BookingDesk::new();
        desk.create(request("Ram", "9800000000")).unwrap();
        desk.create(request("Sita", "9811111111")).unwrap();
        desk.update_status(BookingId::new(2), BookingStatus::Cancelled)
            .unwrap();
        desk.update_measurements(BookingId::new(1), MeasurementUpdate::default().with_grid(Garment::Coat, coat_grid()))
            .unwrap();

        let stats = desk.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.with_measurements, 1);
    }

    #[test]
    fn test_bill_number_format() {
        let mut rng = StepRng::new(0, 1);
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let number = bill_number_for(date, &mut rng);
        let (day, suffix) = number.split_once('-').unwrap();
        assert_eq!(day, "20260314");
        assert_eq!(suffix.len(), 4);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_desk_serde_restores_next_id() {
        let mut desk = BookingDesk::new();
        desk.create(request("Ram", "9800000000")).unwrap();
        let json = serde_json::to_string(&desk).unwrap();
        let mut restored: BookingDesk = serde_json::from_str(&json).unwrap();
        let (booking, _) = restored.create(request("Sita", "9811111111")).unwrap();
        assert_eq!(booking.id, BookingId::new(2));
    }
}
