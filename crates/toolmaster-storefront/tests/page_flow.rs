use std::collections::BTreeMap;
use std::time::Instant;

use chrono::Utc;
use toolmaster_storefront::actions::{ATTR_DELTA, ATTR_PRODUCT_ID, ATTR_PRODUCT_NAME, ATTR_PRODUCT_PRICE, ATTR_TARGET_ID};
use toolmaster_storefront::prelude::*;
use toolmaster_store::FileStore;

fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn product(id: &str, name: &str, price: &str) -> ProductButton {
    ProductButton::new(
        attrs(&[
            (ATTR_PRODUCT_ID, id),
            (ATTR_PRODUCT_NAME, name),
            (ATTR_PRODUCT_PRICE, price),
        ]),
        "Add to cart",
    )
}

#[test]
fn test_catalog_to_cart_to_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.json");

    // Catalog page
    {
        let store = FileStore::open(&path);
        let mut catalog = Storefront::new(store, Header::with_cart_link("cart.html"), ShopSettings::default());
        catalog.init();

        let mut buttons = vec![product("P1", "Drill", "1500"), product("P2", "Saw", "900")];
        assert_eq!(catalog.bind_add_buttons(&mut buttons), 2);

        let now = Instant::now();
        for button in &mut buttons {
            catalog.click_add(button, now).unwrap();
        }
        assert_eq!(catalog.header().badge(), Some(2));
    }

    // Cart page, new session over the same file
    let store = FileStore::open(&path);
    let mut cart_page = Storefront::new(&store, Header::with_cart_link("cart.html"), ShopSettings::default());
    assert!(cart_page.init());
    assert_eq!(cart_page.header().badge(), Some(2));

    let table = cart_page
        .click_change(&attrs(&[(ATTR_TARGET_ID, "P1"), (ATTR_DELTA, "1")]))
        .unwrap();
    assert!(table.body.contains(r#"<span class="js-summa">3000</span> ₽"#));
    assert_eq!(table.total, "3900");

    let table = cart_page.click_remove(&attrs(&[(ATTR_TARGET_ID, "P2")])).unwrap();
    assert_eq!(table.total, "3000");
    assert_eq!(cart_page.header().badge(), Some(2));

    let history = OrderHistory::new(&store);
    let form = OrderForm {
        name: "Ivan".into(),
        phone: "89001234567".into(),
        ..Default::default()
    };
    let confirmation = cart_page.checkout(&history).confirm(&form, Utc::now()).unwrap();

    assert!(confirmation.summary.contains("- Drill: 2 × 1500 ₽ = 3000 ₽"));
    assert!(cart_page.render_cart().body.contains("Your cart is empty"));
    assert_eq!(cart_page.header().badge(), None);

    let orders = history.load().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].number(), confirmation.number);
}

#[test]
fn test_checkout_rejects_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("shop.json"));
    let history = OrderHistory::new(&store);
    let mut page = Storefront::new(&store, Header::without_cart(), ShopSettings::default());

    let err = page.checkout(&history).begin().unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
    assert_eq!(page.render_header(), "");
}
