//! Words command: amounts as printed on order slips.

use anyhow::{bail, Result};
use tailor_commerce::bill::BILL_CURRENCY;
use tailor_commerce::words::{money_to_words, number_to_words};
use tailor_commerce::Money;

use super::WordsArgs;
use crate::context::Context;

/// Run the words command.
pub async fn run(args: WordsArgs, ctx: &Context) -> Result<()> {
    let words = if args.number {
        let Ok(number) = args.amount.trim().parse::<i64>() else {
            bail!("Not a whole number: {}", args.amount);
        };
        number_to_words(number)
    } else {
        let Some(amount) = Money::parse(&args.amount, BILL_CURRENCY) else {
            bail!("Not an amount: {}", args.amount);
        };
        money_to_words(&amount)
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "input": args.amount,
            "words": words,
        }));
    } else {
        ctx.output.raw(&words);
    }
    Ok(())
}
