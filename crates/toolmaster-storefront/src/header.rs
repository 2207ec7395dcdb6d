//! Page header: the cart icon link and its item-count badge.

use toolmaster_cart::BadgeHost;

use crate::html::html_escape;

/// The header's cart link, as a badge host for the counter synchronizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    cart_href: Option<String>,
    badge: Option<i64>,
}

impl Header {
    /// A header with a cart icon linking to `href`.
    pub fn with_cart_link(href: impl Into<String>) -> Self {
        Self {
            cart_href: Some(href.into()),
            badge: None,
        }
    }

    /// A header without a cart icon (e.g. a landing page).
    pub fn without_cart() -> Self {
        Self::default()
    }

    /// The count currently shown on the badge, if any.
    pub fn badge(&self) -> Option<i64> {
        self.badge
    }

    /// Render the cart link with its badge. Empty when there is no cart icon.
    pub fn render(&self) -> String {
        let Some(href) = &self.cart_href else {
            return String::new();
        };

        let badge = self
            .badge
            .map(|count| {
                format!(
                    r#"<span class="cart-counter badge bg-danger rounded-pill" style="position: absolute; top: 0; right: 0; font-size: 0.6rem; padding: 0.2rem 0.4rem; transform: translate(50%, -50%);">{}</span>"#,
                    count
                )
            })
            .unwrap_or_default();

        format!(
            r#"<a href="{}" class="nav-link" style="position: relative;"><i class="fas fa-shopping-cart"></i>{}</a>"#,
            html_escape(href),
            badge
        )
    }
}

impl BadgeHost for Header {
    fn has_cart_anchor(&self) -> bool {
        self.cart_href.is_some()
    }

    fn remove_badge(&mut self) {
        self.badge = None;
    }

    fn insert_badge(&mut self, count: i64) {
        self.badge = Some(count);
    }
}
