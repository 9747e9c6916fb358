//! CLI command implementations.

pub mod auth;
pub mod bill;
pub mod booking;
pub mod cart;
pub mod config;
pub mod order;
pub mod words;

use clap::{Args, Subcommand};

/// Arguments for the words command.
#[derive(Args)]
pub struct WordsArgs {
    /// Amount in rupees, e.g. `1500` or `1500.50`.
    pub amount: String,

    /// Write a plain number instead of a rupee amount.
    #[arg(short, long)]
    pub number: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines.
    Show,
    /// Add one piece of a variant.
    Add {
        /// Product ID.
        product: u64,
        /// Variant ID.
        variant: u64,
    },
    /// Remove one piece of a variant.
    Remove {
        /// Product ID.
        product: u64,
        /// Variant ID.
        variant: u64,
    },
    /// Empty the cart.
    Clear,
    /// Place a cash-on-delivery order for the cart (signed in only).
    Checkout {
        /// Delivery address ID.
        #[arg(long)]
        address: u64,
        /// Discount in rupees.
        #[arg(long)]
        discount: Option<String>,
    },
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub command: OrderCommand,
}

#[derive(Subcommand)]
pub enum OrderCommand {
    /// List orders, newest first.
    List {
        /// onshipping, arrived, delivered, canceled or all.
        #[arg(long, default_value = "all")]
        status: String,
        /// Match customer name, email or transaction uid.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one order.
    Show {
        /// Transaction uid.
        transactionuid: String,
    },
}

/// Arguments for the auth command.
#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Store an access token; the cart then lives on the server.
    Login {
        /// Bearer token.
        token: String,
    },
    /// Forget the access token.
    Logout,
    /// Show whether a token is stored.
    Status,
}

/// Arguments for the booking command.
#[derive(Args)]
pub struct BookingArgs {
    #[command(subcommand)]
    pub command: BookingCommand,
}

#[derive(Subcommand)]
pub enum BookingCommand {
    /// Book a measurement appointment.
    Create {
        /// Customer name.
        #[arg(long)]
        name: String,
        /// Phone number.
        #[arg(long)]
        phone: String,
        /// Address or shop location.
        #[arg(long)]
        location: String,
        /// Email address.
        #[arg(long)]
        email: Option<String>,
        /// Appointment date (YYYY-MM-DD).
        #[arg(long)]
        date: String,
        /// Appointment time (HH:MM).
        #[arg(long, default_value = "10:00")]
        time: String,
        /// in_store, home_visit or self.
        #[arg(long = "type", default_value = "in_store")]
        measurement_type: String,
        /// Notes from the customer.
        #[arg(long)]
        notes: Option<String>,
    },
    /// List bookings, newest first.
    List {
        /// Match name, email, phone or bill number.
        #[arg(short, long)]
        search: Option<String>,
        /// Only this status.
        #[arg(long)]
        status: Option<String>,
        /// Earliest appointment date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<String>,
        /// Latest appointment date (YYYY-MM-DD).
        #[arg(long)]
        to: Option<String>,
        /// Only bookings with recorded measurements.
        #[arg(long)]
        measured: bool,
    },
    /// Show one booking.
    Show {
        /// Booking ID.
        id: u64,
    },
    /// Find customers by name, email, phone or bill number.
    Lookup {
        /// Search text.
        query: String,
    },
    /// Move a booking to a new status.
    Status {
        /// Booking ID.
        id: u64,
        /// New status.
        status: String,
    },
    /// Record measurements.
    Measure {
        /// Booking ID.
        id: u64,
        /// coat, pant or shirt.
        #[arg(short, long)]
        garment: String,
        /// Cells as KEY=A or KEY=A/B, e.g. `C=40/42`.
        #[arg(short = 's', long = "set")]
        cells: Vec<String>,
        /// Expected delivery date (YYYY-MM-DD).
        #[arg(long)]
        delivery: Option<String>,
        /// Message for the customer.
        #[arg(long)]
        message: Option<String>,
        /// Send the completion notice regardless of status.
        #[arg(long)]
        send_email: bool,
    },
    /// Counts per status.
    Stats,
}

/// Arguments for the bill command.
#[derive(Args)]
pub struct BillArgs {
    #[command(subcommand)]
    pub command: BillCommand,
}

#[derive(Subcommand)]
pub enum BillCommand {
    /// Show a booking's bill.
    Show {
        /// Booking ID.
        id: u64,
    },
    /// Edit a row and save the bill.
    Row {
        /// Booking ID.
        id: u64,
        /// Row number (1-10).
        sn: u8,
        /// Description.
        #[arg(long)]
        description: Option<String>,
        /// Quantity.
        #[arg(long)]
        qty: Option<f64>,
        /// Rate per piece.
        #[arg(long)]
        rate: Option<String>,
        /// Amount, overriding qty x rate.
        #[arg(long)]
        amount: Option<String>,
        /// Overwrite a saved bill without asking.
        #[arg(short, long)]
        yes: bool,
    },
    /// Set the advance and save the bill.
    Advance {
        /// Booking ID.
        id: u64,
        /// Amount paid up front.
        amount: String,
        /// Overwrite a saved bill without asking.
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the printable slip.
    Print {
        /// Booking ID.
        id: u64,
        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<String>,
    },
    /// WhatsApp link for a saved bill.
    Share {
        /// Booking ID.
        id: u64,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Shop name.
        #[arg(long, default_value = "Alphasuits")]
        shop: String,
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
