//! Small helpers shared by the HTML renderers.

use toolmaster_cart::Price;

/// Escape text for use in element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Format an amount with the shop's currency symbol, e.g. `1500 ₽`.
pub fn format_price(amount: Price, symbol: &str) -> String {
    format!("{} {}", amount, symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            html_escape(r#"<b>"Saw" & 'Drill'</b>"#),
            "&lt;b&gt;&quot;Saw&quot; &amp; &#39;Drill&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Price::units(1500), "₽"), "1500 ₽");
        assert_eq!(format_price(Price::units(-20), "$"), "-20 $");
        assert_eq!(format_price(Price::from_hundredths(149_950), "₽"), "1499.5 ₽");
    }
}
