//! Render the cart page fragments as HTML.

use anyhow::Result;
use serde::Serialize;

use super::{RenderArgs, RenderPart};
use crate::context::Context;

#[derive(Serialize)]
struct Rendered {
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cart: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<String>,
}

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store();
    let mut page = ctx.storefront(&store);
    let wants = |part| args.only.map_or(true, |only| only == part);

    let header = wants(RenderPart::Header).then(|| page.render_header());
    let table = wants(RenderPart::Cart).then(|| page.render_cart());
    ctx.output.store_status(page.engine().store_status());

    let rendered = Rendered {
        header,
        total: table.as_ref().map(|t| t.total.clone()),
        cart: table.map(|t| t.body),
    };

    if ctx.output.is_json() {
        ctx.output.json(&rendered);
        return Ok(());
    }

    if let Some(header) = &rendered.header {
        ctx.output.raw(header);
    }
    if let (Some(body), Some(total)) = (&rendered.cart, &rendered.total) {
        ctx.output.raw(body);
        ctx.output
            .raw(&format!(r#"<span id="total-cart-summa">{}</span>"#, total));
    }
    Ok(())
}
