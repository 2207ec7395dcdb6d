//! Cart page table.

use toolmaster_cart::{Cart, LineItem};

use crate::actions::{ATTR_DELTA, ATTR_TARGET_ID};
use crate::html::{format_price, html_escape};

/// Rendered cart page fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTable {
    /// Rows for the `#cart` table body.
    pub body: String,
    /// Text for the `#total-cart-summa` element.
    pub total: String,
}

/// Render the cart table body and total.
pub fn render_cart_table(cart: &Cart, currency_symbol: &str) -> CartTable {
    if cart.is_empty() {
        return CartTable {
            body: render_empty_row(),
            total: "0".to_string(),
        };
    }

    let body = cart
        .iter()
        .map(|item| render_row(item, currency_symbol))
        .collect();

    CartTable {
        body,
        total: cart.total_sum().to_string(),
    }
}

fn render_row(item: &LineItem, currency_symbol: &str) -> String {
    let id = html_escape(item.id.as_str());
    format!(
        r#"<tr class="cart-item" data-id="{id}">
    <td>{id}</td>
    <td>{name}</td>
    <td>{price}</td>
    <td>
        <div class="d-flex align-items-center justify-content-center">
            <button class="btn btn-sm btn-outline-secondary js-change-count me-2" {target}="{id}" {delta}="-1"><i class="fas fa-minus"></i></button>
            <span class="js-count">{count}</span>
            <button class="btn btn-sm btn-outline-secondary js-change-count ms-2" {target}="{id}" {delta}="1"><i class="fas fa-plus"></i></button>
        </div>
    </td>
    <td><span class="js-summa">{line_total}</span> {symbol}</td>
    <td class="text-center">
        <button class="btn btn-sm btn-danger js-remove-from-cart" {target}="{id}" title="Remove"><i class="fas fa-trash"></i></button>
    </td>
</tr>"#,
        id = id,
        name = html_escape(&item.name),
        price = html_escape(&format_price(item.price, currency_symbol)),
        count = item.count,
        line_total = item.line_total(),
        symbol = html_escape(currency_symbol),
        target = ATTR_TARGET_ID,
        delta = ATTR_DELTA,
    )
}

fn render_empty_row() -> String {
    r#"<tr>
    <td colspan="6" class="text-center py-5">
        <div class="text-muted">
            <i class="fas fa-shopping-cart fa-3x mb-3"></i>
            <p class="h5">Your cart is empty</p>
            <p>Go to the <a href="index.html" class="text-primary">catalog</a> to add products</p>
        </div>
    </td>
</tr>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolmaster_cart::ProductId;

    #[test]
    fn test_empty_cart() {
        let table = render_cart_table(&Cart::new(), "₽");
        assert!(table.body.contains("Your cart is empty"));
        assert_eq!(table.total, "0");
    }

    #[test]
    fn test_rows_and_total() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("P1"), "Drill", 1500, None);
        cart.change_count("P1", 1);
        cart.add(ProductId::new("P2"), "Saw <XL>", 900, None);

        let table = render_cart_table(&cart, "₽");
        assert_eq!(table.body.matches(r#"class="cart-item""#).count(), 2);
        assert!(table.body.contains(r#"<span class="js-summa">3000</span> ₽"#));
        assert!(table.body.contains(r#"data-id="P1" data-delta="-1""#));
        assert!(table.body.contains("Saw &lt;XL&gt;"));
        assert_eq!(table.total, "3900");

        // Rows follow insertion order
        let p1 = table.body.find(r#"data-id="P1""#).unwrap();
        let p2 = table.body.find(r#"data-id="P2""#).unwrap();
        assert!(p1 < p2);
    }
}
