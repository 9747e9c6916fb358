//! Order command.

use anyhow::{anyhow, bail, Result};
use tailor_commerce::checkout::{Order, OrderGroup};

use super::{OrderArgs, OrderCommand};
use crate::context::Context;
use crate::output::order_badge;

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let auth = ctx.auth_status()?;
    let Some(token) = auth.token() else {
        bail!("Please log in to continue.");
    };
    let api = ctx.api()?;

    match args.command {
        OrderCommand::List { status, search } => {
            let group = parse_group(&status)?;
            let orders = api
                .orders(token, group, search.as_deref())
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            list(&orders, group, ctx);
        }
        OrderCommand::Show { transactionuid } => {
            let order = api
                .order(token, &transactionuid)
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            show(&order, ctx);
        }
    }
    Ok(())
}

/// `all` lists every order; anything else must name a tab.
fn parse_group(input: &str) -> Result<Option<OrderGroup>> {
    if input.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    OrderGroup::parse(input).map(Some).ok_or_else(|| {
        anyhow!(
            "Unknown order status '{}'. Use onshipping, arrived, delivered, canceled or all.",
            input
        )
    })
}

fn list(orders: &[Order], group: Option<OrderGroup>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(orders);
        return;
    }

    ctx.output
        .header(group.map_or("All orders", |g| g.display_name()));
    if orders.is_empty() {
        ctx.output.info("No orders found");
        return;
    }

    let widths = [38, 14, 14];
    ctx.output.table_row(&["TRANSACTION", "STATUS", "TOTAL"], &widths);
    for order in orders {
        ctx.output.table_row(
            &[
                &order.transactionuid,
                order.status.display_name(),
                &order.total_amt.display(),
            ],
            &widths,
        );
    }
}

fn show(order: &Order, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return;
    }

    ctx.output.header(&format!("Order {}", order.transactionuid));
    ctx.output.kv("Status", &order_badge(order.status));
    if let Some(method) = &order.payment_method {
        ctx.output.kv("Payment", method);
    }
    if let Some(created) = order.created {
        ctx.output
            .kv("Placed", &created.format("%Y-%m-%d %H:%M").to_string());
    }
    for line in &order.products {
        ctx.output.list_item(&format!(
            "product {} / variant {}: {} x {} = {}",
            line.product,
            line.variant,
            line.pcs,
            line.price.display(),
            line.total.display()
        ));
    }
    ctx.output.kv("Subtotal", &order.sub_total.display());
    if let Some(discount) = order.discount.filter(|d| d.is_positive()) {
        ctx.output.kv("Discount", &discount.display());
    }
    ctx.output.kv("Total", &order.total_amt.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group() {
        assert_eq!(parse_group("all").unwrap(), None);
        assert_eq!(parse_group("Arrived").unwrap(), Some(OrderGroup::Arrived));
        assert!(parse_group("shipped").is_err());
    }
}
