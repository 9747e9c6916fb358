//! Tailor CLI - command line tool for the tailoring shop.
//!
//! Commands:
//! - `tailor words` - Write an amount out in words
//! - `tailor cart` - Manage the shopper's cart and check out
//! - `tailor order` - Look up placed orders
//! - `tailor auth` - Sign in or out
//! - `tailor booking` - Create and manage measurement bookings
//! - `tailor bill` - Edit, print and share a booking's bill
//! - `tailor config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AuthArgs, BillArgs, BookingArgs, CartArgs, ConfigArgs, OrderArgs, WordsArgs};

/// Tailor CLI - carts, bookings and bills for the shop
#[derive(Parser)]
#[command(name = "tailor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Environment whose overrides apply
    #[arg(short, long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an amount out in words
    Words(WordsArgs),

    /// Manage the cart
    Cart(CartArgs),

    /// Look up placed orders
    Order(OrderArgs),

    /// Sign in or out
    Auth(AuthArgs),

    /// Manage measurement bookings
    Booking(BookingArgs),

    /// Edit, print and share bills
    Bill(BillArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = context::Context::load(cli.config.as_deref(), cli.env.as_deref(), output)?;

    let result = match cli.command {
        Commands::Words(args) => commands::words::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Auth(args) => commands::auth::run(args, &ctx).await,
        Commands::Booking(args) => commands::booking::run(args, &ctx).await,
        Commands::Bill(args) => commands::bill::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.logger.error_builder("command failed").field("error", format!("{:#}", e)).emit();
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
