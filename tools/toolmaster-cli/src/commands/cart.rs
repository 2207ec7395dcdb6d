//! Cart commands.

use anyhow::Result;
use dialoguer::Confirm;
use serde::Serialize;
use toolmaster_cart::{Cart, CartTotals, StoreStatus};
use toolmaster_storefront::html::format_price;
use toolmaster_storefront::CartAction;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::status_badge;

#[derive(Serialize)]
struct CartReport<'a> {
    items: &'a Cart,
    totals: CartTotals,
    store: String,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store();
    let mut page = ctx.storefront(&store);

    let mut clear_failure = None;
    let cart = match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => page.engine().load_cart(),
        CartCommand::Add {
            id,
            name,
            price,
            image,
        } => {
            let cart = match image {
                Some(image) => page
                    .engine()
                    .add_to_cart_with_image(id.as_str(), &name, price, Some(image)),
                None => page.dispatch(CartAction::Add {
                    id: id.as_str().into(),
                    name: name.clone(),
                    price,
                }),
            };
            if !page.engine().store_status().is_degraded() {
                ctx.output.success(&format!("{} added to cart!", name));
            }
            cart
        }
        CartCommand::Remove { id } => page.dispatch(CartAction::Remove {
            id: id.as_str().into(),
        }),
        CartCommand::Change { id, delta } => page.dispatch(CartAction::ChangeCount {
            id: id.as_str().into(),
            delta,
        }),
        CartCommand::Clear { yes } => {
            if !yes && !ctx.output.is_json() && console::user_attended() {
                let confirmed = Confirm::new()
                    .with_prompt("Remove everything from the cart?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.info("Cancelled.");
                    return Ok(());
                }
            }
            if let Err(e) = page.engine().clear_cart() {
                ctx.output.error(&format!("Cart could not be cleared: {}", e));
                // Reloading for display would mark the store healthy again
                clear_failure = Some(page.engine().store_status().clone());
            }
            page.engine().load_cart()
        }
    };

    let status = clear_failure.unwrap_or_else(|| page.engine().store_status().clone());
    ctx.output.store_status(&status);
    print_cart(&cart, &ctx.config.shop.currency_symbol, &status, ctx);
    Ok(())
}

fn print_cart(cart: &Cart, symbol: &str, status: &StoreStatus, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&CartReport {
            items: cart,
            totals: cart.totals(),
            store: status.to_string(),
        });
        return;
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [10, 30, 12, 6, 12];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "QTY", "SUM"], &widths);
    for item in cart {
        ctx.output.table_row(
            &[
                item.id.as_str(),
                &item.name,
                &format_price(item.price, symbol),
                &item.count.to_string(),
                &format_price(item.line_total(), symbol),
            ],
            &widths,
        );
    }

    let totals = cart.totals();
    println!();
    ctx.output.kv("Items", &totals.items.to_string());
    ctx.output.kv("Total", &format_price(totals.sum, symbol));
    if ctx.output.is_verbose() {
        ctx.output.kv("Store", &status_badge(status));
    }
}
