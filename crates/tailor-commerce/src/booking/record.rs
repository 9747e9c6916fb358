//! Booking records and the payloads that create and edit them.

use crate::bill::{self, BillData};
use crate::booking::measurement::{Garment, MeasurementGrid};
use crate::booking::status::BookingStatus;
use crate::error::CommerceError;
use crate::ids::BookingId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Email stored when the customer gives none.
pub const DEFAULT_EMAIL: &str = "noemail@example.com";

/// How the customer's measurements are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MeasurementType {
    #[default]
    #[serde(rename = "in_store")]
    InStore,
    #[serde(rename = "home_visit")]
    HomeVisit,
    #[serde(rename = "self")]
    SelfMeasured,
}

impl MeasurementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::InStore => "in_store",
            MeasurementType::HomeVisit => "home_visit",
            MeasurementType::SelfMeasured => "self",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MeasurementType::InStore => "In-Store",
            MeasurementType::HomeVisit => "Home Visit",
            MeasurementType::SelfMeasured => "Self",
        }
    }

    /// Appointment label used in customer emails.
    pub fn visit_label(&self) -> &'static str {
        match self {
            MeasurementType::InStore => "In-Store Visit",
            MeasurementType::HomeVisit => "Home Visit",
            MeasurementType::SelfMeasured => "Self Measurement",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "in_store" => Some(MeasurementType::InStore),
            "home_visit" => Some(MeasurementType::HomeVisit),
            "self" => Some(MeasurementType::SelfMeasured),
            _ => None,
        }
    }
}

/// A measurement appointment and everything recorded against it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: BookingId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub location: String,
    #[serde(default)]
    pub measurement_type: MeasurementType,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    #[serde(default)]
    pub customer_notes: Option<String>,

    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub bill_number: Option<String>,
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub admin_message: Option<String>,

    #[serde(default, with = "bill::wire::stored")]
    pub bill_data: Option<BillData>,

    #[serde(default)]
    pub coat_measurements: MeasurementGrid,
    #[serde(default)]
    pub coat_bill_number: Option<String>,
    #[serde(default)]
    pub coat_date: Option<NaiveDate>,
    #[serde(default)]
    pub pant_measurements: MeasurementGrid,
    #[serde(default)]
    pub pant_bill_number: Option<String>,
    #[serde(default)]
    pub pant_date: Option<NaiveDate>,
    #[serde(default)]
    pub shirt_measurements: MeasurementGrid,
    #[serde(default)]
    pub shirt_bill_number: Option<String>,
    #[serde(default)]
    pub shirt_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub measurement_completed_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Check if any garment has measurements recorded.
    pub fn has_measurements(&self) -> bool {
        Garment::ALL.iter().any(|g| !self.measurements(*g).is_empty())
    }

    /// Measurement grid for a garment.
    pub fn measurements(&self, garment: Garment) -> &MeasurementGrid {
        match garment {
            Garment::Coat => &self.coat_measurements,
            Garment::Pant => &self.pant_measurements,
            Garment::Shirt => &self.shirt_measurements,
        }
    }

    /// Check if a bill has been saved against this booking.
    pub fn has_saved_bill(&self) -> bool {
        self.bill_data.is_some()
    }

    /// Bill number, or the booking id when none is assigned yet.
    pub fn slip_reference(&self) -> String {
        self.bill_number
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }

    /// Check if the record matches a free-text query on name, email, phone
    /// or bill number, ignoring case.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let hit = |field: &str| field.to_lowercase().contains(&needle);
        hit(&self.name)
            || hit(&self.email)
            || hit(&self.phone_number)
            || self.bill_number.as_deref().map_or(false, hit)
    }
}

impl std::fmt::Display for Booking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} ({})", self.name, self.preferred_date, self.status)
    }
}

/// Customer-submitted booking request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBooking {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone_number: String,
    pub location: String,
    #[serde(default)]
    pub measurement_type: MeasurementType,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
}

impl NewBooking {
    /// Check required fields and trim them in place.
    pub fn validate(&mut self) -> Result<(), CommerceError> {
        for (field, value) in [
            ("name", &mut self.name),
            ("phone_number", &mut self.phone_number),
            ("location", &mut self.location),
        ] {
            *value = value.trim().to_string();
            if value.is_empty() {
                return Err(CommerceError::ValidationError(format!(
                    "{field}: This field is required."
                )));
            }
        }

        self.email = self
            .email
            .take()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        if let Some(email) = &self.email {
            let valid = email
                .split_once('@')
                .map_or(false, |(user, domain)| !user.is_empty() && domain.contains('.'));
            if !valid {
                return Err(CommerceError::ValidationError(
                    "email: Enter a valid email address.".to_string(),
                ));
            }
        }

        self.customer_notes = self
            .customer_notes
            .take()
            .filter(|n| !n.trim().is_empty());
        Ok(())
    }

    /// Build the stored record. New bookings always start pending.
    pub fn into_booking(self, id: BookingId, now: DateTime<Utc>) -> Booking {
        Booking {
            id,
            name: self.name,
            email: self.email.unwrap_or_else(|| DEFAULT_EMAIL.to_string()),
            phone_number: self.phone_number,
            location: self.location,
            measurement_type: self.measurement_type,
            preferred_date: self.preferred_date,
            preferred_time: self.preferred_time,
            customer_notes: self.customer_notes,
            status: BookingStatus::Pending,
            bill_number: None,
            delivery_date: None,
            admin_message: None,
            bill_data: None,
            coat_measurements: MeasurementGrid::new(),
            coat_bill_number: None,
            coat_date: None,
            pant_measurements: MeasurementGrid::new(),
            pant_bill_number: None,
            pant_date: None,
            shirt_measurements: MeasurementGrid::new(),
            shirt_bill_number: None,
            shirt_date: None,
            created_at: now,
            updated_at: now,
            measurement_completed_at: None,
        }
    }
}

/// Partial admin edit of a booking. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MeasurementUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coat_measurements: Option<MeasurementGrid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coat_bill_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coat_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pant_measurements: Option<MeasurementGrid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pant_bill_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pant_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shirt_measurements: Option<MeasurementGrid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shirt_bill_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shirt_date: Option<NaiveDate>,
    /// Ask for the measurement-complete notice regardless of status.
    #[serde(default)]
    pub send_email: bool,
}

impl MeasurementUpdate {
    /// Set a garment's grid.
    pub fn with_grid(mut self, garment: Garment, grid: MeasurementGrid) -> Self {
        match garment {
            Garment::Coat => self.coat_measurements = Some(grid),
            Garment::Pant => self.pant_measurements = Some(grid),
            Garment::Shirt => self.shirt_measurements = Some(grid),
        }
        self
    }

    /// Check every supplied grid against its garment's keys.
    pub fn validate(&self) -> Result<(), CommerceError> {
        for (garment, grid) in [
            (Garment::Coat, &self.coat_measurements),
            (Garment::Pant, &self.pant_measurements),
            (Garment::Shirt, &self.shirt_measurements),
        ] {
            if let Some(grid) = grid {
                grid.validate(garment)?;
            }
        }
        Ok(())
    }

    /// Apply every field except `status` and `bill_number`, which go through
    /// the desk's transition and uniqueness checks.
    pub(crate) fn apply_fields(self, booking: &mut Booking) {
        fn set<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        set(&mut booking.delivery_date, self.delivery_date);
        set(&mut booking.admin_message, self.admin_message);
        if let Some(grid) = self.coat_measurements {
            booking.coat_measurements = grid;
        }
        set(&mut booking.coat_bill_number, self.coat_bill_number);
        set(&mut booking.coat_date, self.coat_date);
        if let Some(grid) = self.pant_measurements {
            booking.pant_measurements = grid;
        }
        set(&mut booking.pant_bill_number, self.pant_bill_number);
        set(&mut booking.pant_date, self.pant_date);
        if let Some(grid) = self.shirt_measurements {
            booking.shirt_measurements = grid;
        }
        set(&mut booking.shirt_bill_number, self.shirt_bill_number);
        set(&mut booking.shirt_date, self.shirt_date);
    }
}
