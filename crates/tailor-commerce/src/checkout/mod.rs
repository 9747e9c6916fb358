//! Checkout module.
//!
//! Turns a priced cart into a cash-on-delivery order request, reserves
//! stock for placed orders and groups orders by status for the history tabs.

mod order;
mod status;
mod stock;

pub use order::{
    orders_in_group, transaction_uid, NewOrder, Order, OrderItem, OrderLine, CASH_ON_DELIVERY,
};
pub use status::{OrderGroup, OrderStatus};
pub use stock::reserve_stock;
