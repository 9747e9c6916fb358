//! Booking command: the local back-office desk.

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::{NaiveDate, NaiveTime};
use tailor_commerce::booking::{
    Booking, BookingFilter, BookingNotice, BookingStatus, Garment, MeasurementCell,
    MeasurementGrid, MeasurementType, MeasurementUpdate, NewBooking,
};
use tailor_commerce::BookingId;

use super::{BookingArgs, BookingCommand};
use crate::context::Context;
use crate::output::status_badge;

/// Run the booking command.
pub async fn run(args: BookingArgs, ctx: &Context) -> Result<()> {
    match args.command {
        BookingCommand::Create {
            name,
            phone,
            location,
            email,
            date,
            time,
            measurement_type,
            notes,
        } => {
            let Some(measurement_type) = MeasurementType::parse(&measurement_type) else {
                bail!(
                    "Unknown measurement type: {} (expected in_store, home_visit or self)",
                    measurement_type
                );
            };
            let request = NewBooking {
                name,
                email,
                phone_number: phone,
                location,
                measurement_type,
                preferred_date: parse_date(&date)?,
                preferred_time: parse_time(&time)?,
                customer_notes: notes,
            };
            create(request, ctx)
        }
        BookingCommand::List {
            search,
            status,
            from,
            to,
            measured,
        } => {
            let filter = BookingFilter {
                search,
                status: status.as_deref().map(BookingStatus::parse).transpose()?,
                start_date: from.as_deref().map(parse_date).transpose()?,
                end_date: to.as_deref().map(parse_date).transpose()?,
                measurement_type: None,
                has_measurements: measured.then_some(true),
            };
            list(&filter, ctx)
        }
        BookingCommand::Show { id } => show(BookingId::new(id), ctx),
        BookingCommand::Lookup { query } => lookup(&query, ctx),
        BookingCommand::Status { id, status } => {
            update_status(BookingId::new(id), BookingStatus::parse(&status)?, ctx)
        }
        BookingCommand::Measure {
            id,
            garment,
            cells,
            delivery,
            message,
            send_email,
        } => {
            let garment = parse_garment(&garment)?;
            let mut grid = MeasurementGrid::new();
            for cell in &cells {
                let (key, value) = parse_cell(cell)?;
                grid.set(garment, key, value)?;
            }
            let mut update = MeasurementUpdate::default().with_grid(garment, grid);
            update.delivery_date = delivery.as_deref().map(parse_date).transpose()?;
            update.admin_message = message;
            update.send_email = send_email;
            measure(BookingId::new(id), update, ctx)
        }
        BookingCommand::Stats => stats(ctx),
    }
}

fn create(request: NewBooking, ctx: &Context) -> Result<()> {
    let mut desk = ctx.desk()?;
    let (booking, notice) = desk.create(request)?;
    ctx.save_desk(desk)?;

    ctx.logger
        .info_builder("booking created")
        .field_i64("booking_id", booking.id.get() as i64)
        .field("measurement_type", booking.measurement_type.as_str())
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "booking": booking,
            "notice": notice,
        }));
        return Ok(());
    }

    ctx.output
        .success(&format!("Booking #{} created for {}", booking.id, booking.name));
    print_notice(&notice, ctx);
    Ok(())
}

fn list(filter: &BookingFilter, ctx: &Context) -> Result<()> {
    let desk = ctx.desk()?;
    let bookings = desk.list(filter);
    print_table(&bookings, ctx);
    Ok(())
}

fn lookup(query: &str, ctx: &Context) -> Result<()> {
    let desk = ctx.desk()?;
    let bookings = desk.lookup(query)?;
    print_table(&bookings, ctx);
    Ok(())
}

fn show(id: BookingId, ctx: &Context) -> Result<()> {
    let desk = ctx.desk()?;
    let booking = desk.get(id)?;

    if ctx.output.is_json() {
        ctx.output.json(booking);
        return Ok(());
    }

    ctx.output.header(&format!("Booking #{}", booking.id));
    ctx.output.kv("Name", &booking.name);
    ctx.output.kv("Email", &booking.email);
    ctx.output.kv("Phone", &booking.phone_number);
    ctx.output.kv("Location", &booking.location);
    ctx.output
        .kv("Type", booking.measurement_type.display_name());
    ctx.output.kv(
        "Appointment",
        &format!(
            "{} {}",
            booking.preferred_date,
            booking.preferred_time.format("%H:%M")
        ),
    );
    ctx.output.kv("Status", &status_badge(booking.status));
    if let Some(ref number) = booking.bill_number {
        ctx.output.kv("Bill number", number);
    }
    if let Some(delivery) = booking.delivery_date {
        ctx.output.kv("Delivery", &delivery.to_string());
    }
    if let Some(ref notes) = booking.customer_notes {
        ctx.output.kv("Notes", notes);
    }
    ctx.output.kv(
        "Bill",
        if booking.has_saved_bill() {
            "saved"
        } else {
            "not saved"
        },
    );

    for garment in Garment::ALL {
        let grid = booking.measurements(garment);
        if grid.is_empty() {
            continue;
        }
        ctx.output.info("");
        ctx.output.info(garment.title());
        for (key, cell) in grid.rows(garment) {
            ctx.output.kv(
                key,
                &format!(
                    "{} / {}",
                    cell.a.as_deref().unwrap_or("-"),
                    cell.b.as_deref().unwrap_or("-")
                ),
            );
        }
    }
    Ok(())
}

fn update_status(id: BookingId, status: BookingStatus, ctx: &Context) -> Result<()> {
    let mut desk = ctx.desk()?;
    let booking = desk.update_status(id, status)?.clone();
    ctx.save_desk(desk)?;

    ctx.logger
        .info_builder("booking status updated")
        .field_i64("booking_id", booking.id.get() as i64)
        .field("status", booking.status.as_str())
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&booking);
    } else {
        ctx.output.success(&format!(
            "Booking #{} is now {}",
            booking.id,
            status_badge(booking.status)
        ));
    }
    Ok(())
}

fn measure(id: BookingId, update: MeasurementUpdate, ctx: &Context) -> Result<()> {
    let mut desk = ctx.desk()?;
    let outcome = desk.update_measurements(id, update)?;
    ctx.save_desk(desk)?;

    ctx.logger
        .info_builder("measurements updated")
        .field_i64("booking_id", outcome.booking.id.get() as i64)
        .field_bool("notified", outcome.notice.is_some())
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "booking": outcome.booking,
            "notice": outcome.notice,
        }));
        return Ok(());
    }

    ctx.output.success("Measurements updated successfully");
    if let Some(ref number) = outcome.booking.bill_number {
        ctx.output.kv("Bill number", number);
    }
    if let Some(ref notice) = outcome.notice {
        print_notice(notice, ctx);
    }
    Ok(())
}

fn stats(ctx: &Context) -> Result<()> {
    let stats = ctx.desk()?.stats();

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Bookings");
    ctx.output.kv("Total", &stats.total.to_string());
    ctx.output.kv("Pending", &stats.pending.to_string());
    ctx.output.kv("Confirmed", &stats.confirmed.to_string());
    ctx.output.kv("In progress", &stats.in_progress.to_string());
    ctx.output.kv("Completed", &stats.completed.to_string());
    ctx.output.kv("Delivered", &stats.delivered.to_string());
    ctx.output.kv("Cancelled", &stats.cancelled.to_string());
    ctx.output
        .kv("With measurements", &stats.with_measurements.to_string());
    Ok(())
}

fn print_table(bookings: &[&Booking], ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(bookings);
        return;
    }

    if bookings.is_empty() {
        ctx.output.info("No bookings found");
        return;
    }

    let widths = [5, 22, 14, 12, 12];
    ctx.output
        .table_row(&["ID", "NAME", "PHONE", "DATE", "STATUS"], &widths);
    for booking in bookings {
        ctx.output.table_row(
            &[
                &booking.id.to_string(),
                &booking.name,
                &booking.phone_number,
                &booking.preferred_date.to_string(),
                booking.status.display_name(),
            ],
            &widths,
        );
    }
}

fn print_notice(notice: &BookingNotice, ctx: &Context) {
    ctx.output.info(&format!("Notice for {}", notice.recipient));
    ctx.output.kv("Subject", &notice.subject);
    for line in notice.body.lines() {
        ctx.output.raw(&format!("    {}", line));
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {}", s))
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .with_context(|| format!("Invalid time (expected HH:MM): {}", s))
}

fn parse_garment(s: &str) -> Result<Garment> {
    Garment::ALL
        .into_iter()
        .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| anyhow!("Unknown garment: {} (expected coat, pant or shirt)", s))
}

/// Parse `KEY=A` or `KEY=A/B`.
fn parse_cell(s: &str) -> Result<(&str, MeasurementCell)> {
    let Some((key, value)) = s.split_once('=') else {
        bail!("Invalid measurement (expected KEY=A or KEY=A/B): {}", s);
    };
    let (a, b) = match value.split_once('/') {
        Some((a, b)) => (a, Some(b)),
        None => (value, None),
    };
    let a = Some(a.trim()).filter(|a| !a.is_empty());
    let b = b.map(str::trim).filter(|b| !b.is_empty());
    Ok((key, MeasurementCell::new(a, b)))
}
