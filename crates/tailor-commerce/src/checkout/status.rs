//! Order status and the status groups the order history tabs use.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Order status as stored on the sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting verification.
    #[default]
    Pending,
    /// Order verified by the shop.
    Verified,
    /// Order being prepared.
    Proceed,
    /// Order packed for dispatch.
    Packed,
    /// Order handed to the customer.
    Delivered,
    /// Order closed after delivery.
    Successful,
    /// Payment never arrived.
    Unpaid,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::Verified,
        OrderStatus::Proceed,
        OrderStatus::Packed,
        OrderStatus::Delivered,
        OrderStatus::Successful,
        OrderStatus::Unpaid,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Verified => "verified",
            OrderStatus::Proceed => "proceed",
            OrderStatus::Packed => "packed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Successful => "successful",
            OrderStatus::Unpaid => "unpaid",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Verified => "Verified",
            OrderStatus::Proceed => "Processing",
            OrderStatus::Packed => "Packed",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Successful => "Successful",
            OrderStatus::Unpaid => "Unpaid",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse the wire name, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, CommerceError> {
        let wanted = input.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == wanted)
            .ok_or_else(|| CommerceError::InvalidStatus(input.to_string()))
    }

    /// The history tab this status is listed under.
    pub fn group(&self) -> OrderGroup {
        match self {
            OrderStatus::Pending | OrderStatus::Verified => OrderGroup::OnShipping,
            OrderStatus::Proceed | OrderStatus::Packed => OrderGroup::Arrived,
            OrderStatus::Delivered | OrderStatus::Successful => OrderGroup::Delivered,
            OrderStatus::Unpaid | OrderStatus::Cancelled => OrderGroup::Canceled,
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Successful | OrderStatus::Cancelled)
    }

    /// Check if order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        self.group() == OrderGroup::OnShipping
    }
}

/// A tab of the order history. Each group covers two statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderGroup {
    OnShipping,
    Arrived,
    Delivered,
    Canceled,
}

impl OrderGroup {
    pub const ALL: [OrderGroup; 4] = [
        OrderGroup::OnShipping,
        OrderGroup::Arrived,
        OrderGroup::Delivered,
        OrderGroup::Canceled,
    ];

    /// Path segment used by `api/sales/sales/status/<group>/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderGroup::OnShipping => "onshipping",
            OrderGroup::Arrived => "arrived",
            OrderGroup::Delivered => "delivered",
            OrderGroup::Canceled => "canceled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderGroup::OnShipping => "On Shipping",
            OrderGroup::Arrived => "Arrived",
            OrderGroup::Delivered => "Delivered",
            OrderGroup::Canceled => "Canceled",
        }
    }

    /// Parse a tab name. `all` and unknown names mean no filter.
    pub fn parse(input: &str) -> Option<Self> {
        let wanted = input.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|g| g.as_str() == wanted)
    }

    pub fn statuses(&self) -> [OrderStatus; 2] {
        match self {
            OrderGroup::OnShipping => [OrderStatus::Pending, OrderStatus::Verified],
            OrderGroup::Arrived => [OrderStatus::Proceed, OrderStatus::Packed],
            OrderGroup::Delivered => [OrderStatus::Delivered, OrderStatus::Successful],
            OrderGroup::Canceled => [OrderStatus::Unpaid, OrderStatus::Cancelled],
        }
    }

    pub fn contains(&self, status: OrderStatus) -> bool {
        self.statuses().contains(&status)
    }
}
