//! Observability for the tailor storefront.
//!
//! This crate provides:
//! - `RequestId` - correlation id carried by every log line
//! - `StructuredLogger` - leveled JSON or human log lines with context fields
//! - `LogSink` - where lines go (stderr, or memory for tests)

mod logging;
mod request_id;

pub use logging::*;
pub use request_id::RequestId;
