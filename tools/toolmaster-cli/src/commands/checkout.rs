//! Checkout command.

use anyhow::{bail, Result};
use chrono::Utc;
use dialoguer::{Confirm, Input};
use toolmaster_storefront::html::format_price;
use toolmaster_storefront::OrderForm;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store();
    let history = ctx.order_history(&store);
    let mut page = ctx.storefront(&store);
    let symbol = ctx.config.shop.currency_symbol.clone();

    let cart = page.checkout(&history).begin()?;
    let interactive = !ctx.output.is_json() && console::user_attended();

    let form = OrderForm {
        name: field(args.name, "Name", interactive)?,
        phone: field(args.phone, "Phone", interactive)?,
        email: args.email,
        address: args.address,
    };

    if interactive && !args.yes {
        ctx.output.header("Order");
        ctx.output.kv("Items", &cart.total_items().to_string());
        ctx.output.kv("Total", &format_price(cart.total_sum(), &symbol));

        let confirmed = Confirm::new()
            .with_prompt("Place the order?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.info("Order cancelled, the cart is unchanged.");
            return Ok(());
        }
    }

    let confirmation = page.checkout(&history).confirm(&form, Utc::now())?;
    ctx.output.store_status(page.engine().store_status());

    if ctx.output.is_json() {
        ctx.output.json(&confirmation.order);
        return Ok(());
    }

    ctx.output.success(&confirmation.message());
    if !confirmation.cart_cleared {
        ctx.output.warn("The order was recorded but the cart could not be emptied.");
    }
    if ctx.output.is_verbose() {
        ctx.output.raw(&confirmation.summary);
    }
    Ok(())
}

/// Use the flag value, or ask for it when a terminal is attached.
fn field(value: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if interactive => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
        None => bail!("--{} is required", prompt.to_lowercase()),
    }
}
