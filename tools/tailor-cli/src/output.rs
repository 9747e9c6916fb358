//! Output formatting for the CLI.

use console::style;
use tailor_commerce::booking::BookingStatus;
use tailor_commerce::checkout::{OrderGroup, OrderStatus};
use tailor_storefront::{Notice, NoticeLevel};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a storefront notice with the matching style.
    pub fn notice(&self, notice: &Notice) {
        if self.json {
            self.json(notice);
            return;
        }
        match notice.level {
            NoticeLevel::Success => self.success(&notice.message),
            NoticeLevel::Info => self.info(&notice.message),
            NoticeLevel::Error => self.error(&notice.message),
        }
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize + ?Sized>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print raw text, e.g. a rendered document.
    pub fn raw(&self, text: &str) {
        println!("{}", text);
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Colored badge for a booking status.
pub fn status_badge(status: BookingStatus) -> String {
    let name = status.display_name();
    match status {
        BookingStatus::Completed | BookingStatus::Delivered => style(name).green().to_string(),
        BookingStatus::Pending | BookingStatus::Confirmed => style(name).yellow().to_string(),
        BookingStatus::InProgress => style(name).cyan().to_string(),
        BookingStatus::Cancelled => style(name).dim().to_string(),
    }
}

/// Colored badge for an order status, tinted by its history tab.
pub fn order_badge(status: OrderStatus) -> String {
    let name = status.display_name();
    match status.group() {
        OrderGroup::Delivered => style(name).green().to_string(),
        OrderGroup::OnShipping => style(name).yellow().to_string(),
        OrderGroup::Arrived => style(name).cyan().to_string(),
        OrderGroup::Canceled => style(name).dim().to_string(),
    }
}
