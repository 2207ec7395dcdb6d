//! Order history command.

use anyhow::{Context as _, Result};
use toolmaster_storefront::html::format_price;

use super::OrdersArgs;
use crate::context::Context;

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store();
    let mut orders = ctx
        .order_history(&store)
        .load()
        .context("Failed to read order history")?;

    // Newest first
    orders.reverse();
    if let Some(limit) = args.limit {
        orders.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Orders");
    if orders.is_empty() {
        ctx.output.info("No orders yet.");
        return Ok(());
    }

    let symbol = &ctx.config.shop.currency_symbol;
    let widths = [16, 20, 20, 6, 12];
    ctx.output
        .table_row(&["NUMBER", "DATE", "CUSTOMER", "ITEMS", "TOTAL"], &widths);
    for order in &orders {
        ctx.output.table_row(
            &[
                order.number().as_str(),
                &order.date.format("%Y-%m-%d %H:%M").to_string(),
                &order.customer.name,
                &order.item_count().to_string(),
                &format_price(order.total, symbol),
            ],
            &widths,
        );
        if ctx.output.is_verbose() {
            for item in &order.items {
                ctx.output
                    .list_item(&format!("{} × {}", item.name, item.count));
            }
        }
    }
    Ok(())
}
