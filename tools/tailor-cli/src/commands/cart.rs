//! Cart command.

use anyhow::{anyhow, Context as _, Result};
use tailor_cache::FileStore;
use tailor_commerce::{AddressId, Currency, Money, ProductId, VariantId};
use tailor_data::ReqwestTransport;
use tailor_storefront::{CartStore, ORDER_PLACED};

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    ctx.output
        .debug(&format!("Cart storage: {}", ctx.data_dir().display()));
    let mut store: CartStore<FileStore, ReqwestTransport> =
        CartStore::new(ctx.cache()?, ctx.api()?).with_logger(ctx.logger.clone());
    store.sync(ctx.auth_status()?).await?;

    match args.command {
        CartCommand::Show => {}
        CartCommand::Add { product, variant } => {
            let notice = store
                .increase(
                    ProductId::new(product),
                    VariantId::new(variant),
                    Some("Added to cart"),
                )
                .await;
            if let Some(notice) = notice {
                ctx.output.notice(&notice);
            }
        }
        CartCommand::Remove { product, variant } => {
            let notice = store
                .decrease(
                    ProductId::new(product),
                    VariantId::new(variant),
                    Some("Removed from cart"),
                )
                .await;
            if let Some(notice) = notice {
                ctx.output.notice(&notice);
            }
        }
        CartCommand::Clear => {
            store.clear().await?;
            ctx.output.success("Cart cleared");
        }
        CartCommand::Checkout { address, discount } => {
            let discount = discount
                .as_deref()
                .map(|d| Money::parse(d, Currency::NPR).ok_or_else(|| anyhow!("Not an amount: {}", d)))
                .transpose()?;
            let order = store
                .checkout(AddressId::new(address), discount)
                .await
                .map_err(|e| anyhow!(e.user_message()))
                .context("Failed to place order")?;

            if ctx.output.is_json() {
                ctx.output.json(&order);
                return Ok(());
            }
            ctx.output.success(ORDER_PLACED);
            ctx.output.kv("Transaction", &order.transactionuid);
            ctx.output.kv("Subtotal", &order.sub_total.display());
            if order.discount.is_positive() {
                ctx.output.kv("Discount", &order.discount.display());
            }
            ctx.output.kv("Total", &order.total_amt.display());
            return Ok(());
        }
    }

    show(&store, ctx);
    Ok(())
}

fn show(store: &CartStore<FileStore, ReqwestTransport>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(store.lines());
        return;
    }

    ctx.output.header("Cart");
    if store.lines().is_empty() {
        ctx.output.info("Cart is empty");
        return;
    }

    let widths = [10, 10, 6];
    ctx.output.table_row(&["PRODUCT", "VARIANT", "PCS"], &widths);
    for line in store.lines() {
        ctx.output.table_row(
            &[
                &line.product.to_string(),
                &line.variant.to_string(),
                &line.pcs.to_string(),
            ],
            &widths,
        );
    }
    ctx.output
        .kv("Total pieces", &store.total_pieces().to_string());
}
