//! Editing, saving and sharing a booking's bill.

use crate::{Notice, StorefrontApi, StorefrontError};
use chrono::NaiveDate;
use tailor_commerce::bill::{BillData, OrderSlip, ShopInfo};
use tailor_commerce::booking::Booking;
use tailor_commerce::Money;
use tailor_data::Transport;
use tailor_observability::StructuredLogger;

/// Which of the two slip dates to set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillDate {
    Ordered,
    Delivery,
}

/// Everything needed to hand a saved slip to the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedSlip {
    pub file_name: String,
    pub caption: String,
    pub html: String,
    pub whatsapp_link: String,
}

/// An open bill for one booking. Every edit re-derives the totals.
pub struct BillEditor<T> {
    api: StorefrontApi<T>,
    token: String,
    booking: Booking,
    bill: BillData,
    shop: ShopInfo,
    logger: StructuredLogger,
}

impl<T: Transport> BillEditor<T> {
    /// Open the booking's saved bill, or a fresh one dated from the booking.
    pub fn open(
        api: StorefrontApi<T>,
        token: impl Into<String>,
        booking: Booking,
    ) -> Result<Self, StorefrontError> {
        let bill = BillData::open_for(&booking)?;
        Ok(Self {
            api,
            token: token.into(),
            booking,
            bill,
            shop: ShopInfo::default(),
            logger: StructuredLogger::default().with_component("bill"),
        })
    }

    pub fn with_shop(mut self, shop: ShopInfo) -> Self {
        self.shop = shop;
        self
    }

    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger.child("bill");
        self
    }

    pub fn booking(&self) -> &Booking {
        &self.booking
    }

    pub fn bill(&self) -> &BillData {
        &self.bill
    }

    /// Whether the booking already carries a stored bill.
    pub fn has_saved_bill(&self) -> bool {
        self.booking.has_saved_bill()
    }

    pub fn set_description(&mut self, sn: u8, description: &str) -> Result<(), StorefrontError> {
        Ok(self.bill.set_description(sn, description)?)
    }

    pub fn set_qty(&mut self, sn: u8, qty: Option<f64>) -> Result<(), StorefrontError> {
        Ok(self.bill.set_qty(sn, qty)?)
    }

    pub fn set_rate(&mut self, sn: u8, rate: Option<Money>) -> Result<(), StorefrontError> {
        Ok(self.bill.set_rate(sn, rate)?)
    }

    /// Override a row's amount by hand.
    pub fn set_amount(&mut self, sn: u8, amount: Option<Money>) -> Result<(), StorefrontError> {
        Ok(self.bill.set_amount(sn, amount)?)
    }

    pub fn set_advance(&mut self, advance: Option<Money>) -> Result<(), StorefrontError> {
        Ok(self.bill.set_advance(advance)?)
    }

    pub fn set_date(&mut self, field: BillDate, date: Option<NaiveDate>) {
        match field {
            BillDate::Ordered => self.bill.date_ordered = date,
            BillDate::Delivery => self.bill.date_delivery = date,
        }
    }

    /// Store the bill on the booking.
    ///
    /// Replacing an already saved bill requires `confirm_overwrite`.
    pub async fn save(&mut self, confirm_overwrite: bool) -> Result<Notice, StorefrontError> {
        let replacing = self.has_saved_bill();
        if replacing && !confirm_overwrite {
            self.logger
                .warn_builder("bill overwrite not confirmed")
                .field_i64("booking", self.booking.id.get() as i64)
                .emit();
            return Err(StorefrontError::OverwriteNotConfirmed);
        }

        let updated = self
            .api
            .save_bill(&self.token, self.booking.id, &self.bill)
            .await?;
        self.booking = updated;
        if self.booking.bill_data.is_none() {
            self.booking.bill_data = Some(self.bill.clone());
        }

        self.logger
            .info_builder("bill saved")
            .field_i64("booking", self.booking.id.get() as i64)
            .field("total", self.bill.total.display())
            .field_bool("replaced", replacing)
            .emit();
        Ok(Notice::success(if replacing {
            "Bill updated successfully"
        } else {
            "Bill saved successfully"
        }))
    }

    /// Ask the backend to email the saved bill to the customer.
    pub async fn email(&self) -> Result<Notice, StorefrontError> {
        if !self.has_saved_bill() {
            return Err(StorefrontError::BillNotSaved("sending email"));
        }
        self.api.send_bill_email(&self.token, self.booking.id).await?;
        self.logger
            .info_builder("bill emailed")
            .field_i64("booking", self.booking.id.get() as i64)
            .emit();
        Ok(Notice::success(format!("Bill sent to {}", self.booking.email)))
    }

    /// Slip document and WhatsApp link for a saved bill.
    pub fn share(&self) -> Result<SharedSlip, StorefrontError> {
        if !self.has_saved_bill() {
            return Err(StorefrontError::BillNotSaved("sharing on WhatsApp"));
        }
        let slip = self.slip();
        Ok(SharedSlip {
            file_name: slip.share_file_name(),
            caption: slip.share_text(),
            html: slip.render_html(),
            whatsapp_link: slip.whatsapp_link(),
        })
    }

    /// Printable document of the bill as currently edited.
    pub fn print_html(&self) -> String {
        self.slip().render_html()
    }

    fn slip(&self) -> OrderSlip<'_> {
        OrderSlip::new(&self.booking, &self.bill, &self.shop)
    }
}
