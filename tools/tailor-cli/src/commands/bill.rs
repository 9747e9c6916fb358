//! Bill command: edit, print and share order slips.

use std::fs;

use anyhow::{anyhow, bail, Context as _, Result};
use dialoguer::Confirm;
use tailor_commerce::bill::{BillData, OrderSlip, BILL_CURRENCY};
use tailor_commerce::booking::BookingDesk;
use tailor_commerce::{BookingId, Money};

use super::{BillArgs, BillCommand};
use crate::context::Context;

/// Run the bill command.
pub async fn run(args: BillArgs, ctx: &Context) -> Result<()> {
    match args.command {
        BillCommand::Show { id } => show(BookingId::new(id), ctx),
        BillCommand::Row {
            id,
            sn,
            description,
            qty,
            rate,
            amount,
            yes,
        } => {
            let rate = rate.as_deref().map(parse_amount).transpose()?;
            let amount = amount.as_deref().map(parse_amount).transpose()?;
            edit(BookingId::new(id), yes, ctx, |bill| {
                if let Some(ref description) = description {
                    bill.set_description(sn, description)?;
                }
                if qty.is_some() {
                    bill.set_qty(sn, qty)?;
                }
                if rate.is_some() {
                    bill.set_rate(sn, rate)?;
                }
                if amount.is_some() {
                    bill.set_amount(sn, amount)?;
                }
                Ok(())
            })
        }
        BillCommand::Advance { id, amount, yes } => {
            let advance = parse_amount(&amount)?;
            edit(BookingId::new(id), yes, ctx, |bill| {
                bill.set_advance(Some(advance))?;
                Ok(())
            })
        }
        BillCommand::Print { id, output } => print(BookingId::new(id), output.as_deref(), ctx),
        BillCommand::Share { id } => share(BookingId::new(id), ctx),
    }
}

/// The saved bill, or a fresh one dated from the booking.
fn edit(
    id: BookingId,
    yes: bool,
    ctx: &Context,
    apply: impl FnOnce(&mut BillData) -> Result<()>,
) -> Result<()> {
    let mut desk = ctx.desk()?;
    let booking = desk.get(id)?;
    let replacing = booking.has_saved_bill();
    let mut bill = BillData::open_for(booking)?;
    apply(&mut bill)?;

    if replacing && !yes {
        let confirmed = Confirm::new()
            .with_prompt("A bill has already been saved. Do you want to update it?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Bill not saved");
            return Ok(());
        }
    }

    save(&mut desk, id, bill, ctx)?;
    ctx.output.success(if replacing {
        "Bill updated successfully"
    } else {
        "Bill saved successfully"
    });
    show(id, ctx)
}

fn save(desk: &mut BookingDesk, id: BookingId, bill: BillData, ctx: &Context) -> Result<()> {
    let total = bill.total;
    desk.save_bill(id, bill)?;
    ctx.save_desk(std::mem::take(desk))?;

    ctx.logger
        .info_builder("bill saved")
        .field_i64("booking_id", id.get() as i64)
        .field_i64("total_paisa", total.amount_paisa)
        .emit();
    Ok(())
}

fn show(id: BookingId, ctx: &Context) -> Result<()> {
    let desk = ctx.desk()?;
    let booking = desk.get(id)?;
    let bill = BillData::open_for(booking)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "booking_id": booking.id,
            "saved": booking.has_saved_bill(),
            "bill": bill,
        }));
        return Ok(());
    }

    ctx.output
        .header(&OrderSlip::new(booking, &bill, &ctx.config.shop).title());
    ctx.output.kv("Customer", &booking.name);
    if let Some(date) = bill.date_ordered {
        ctx.output.kv("Ordered", &date.to_string());
    }
    if let Some(date) = bill.date_delivery {
        ctx.output.kv("Delivery", &date.to_string());
    }
    ctx.output.info("");

    let widths = [3, 24, 6, 12, 12];
    ctx.output
        .table_row(&["SN", "DESCRIPTION", "QTY", "RATE", "AMOUNT"], &widths);
    for item in &bill.items {
        ctx.output.table_row(
            &[
                &item.sn.to_string(),
                &item.description,
                &item.qty.map(|q| q.to_string()).unwrap_or_default(),
                &item.rate.map(|r| r.display_amount()).unwrap_or_default(),
                &item.amount.map(|a| a.display_amount()).unwrap_or_default(),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Total", &bill.total.display());
    ctx.output.kv(
        "Advance",
        &bill
            .advance
            .map(|a| a.display())
            .unwrap_or_else(|| "-".to_string()),
    );
    ctx.output.kv("Balance", &bill.balance.display());
    ctx.output.kv("In words", &bill.amount_in_words);
    if !booking.has_saved_bill() {
        ctx.output.warn("This bill has not been saved yet");
    }
    Ok(())
}

fn print(id: BookingId, output: Option<&str>, ctx: &Context) -> Result<()> {
    let desk = ctx.desk()?;
    let booking = desk.get(id)?;
    let bill = BillData::open_for(booking)?;
    let html = OrderSlip::new(booking, &bill, &ctx.config.shop).render_html();

    match output {
        Some(path) => {
            let path = ctx.resolve_path(path);
            fs::write(&path, html)
                .with_context(|| format!("Failed to write slip: {}", path.display()))?;
            ctx.output.success(&format!("Wrote {}", path.display()));
        }
        None => ctx.output.raw(&html),
    }
    Ok(())
}

fn share(id: BookingId, ctx: &Context) -> Result<()> {
    let desk = ctx.desk()?;
    let booking = desk.get(id)?;
    let Some(ref bill) = booking.bill_data else {
        bail!("Please save the bill first before sharing on WhatsApp.");
    };
    let slip = OrderSlip::new(booking, bill, &ctx.config.shop);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "file_name": slip.share_file_name(),
            "caption": slip.share_text(),
            "whatsapp_link": slip.whatsapp_link(),
        }));
        return Ok(());
    }

    ctx.output.kv("File", &slip.share_file_name());
    ctx.output.kv("Caption", &slip.share_text());
    ctx.output.raw(&slip.whatsapp_link());
    Ok(())
}

fn parse_amount(s: &str) -> Result<Money> {
    Money::parse(s, BILL_CURRENCY).ok_or_else(|| anyhow!("Not an amount: {}", s))
}
