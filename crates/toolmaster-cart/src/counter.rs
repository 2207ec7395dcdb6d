//! Keeps the header badge in step with the stored item count.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{CartChange, CartListener};

/// The view element that shows the cart badge, usually the cart icon link in
/// the page header.
pub trait BadgeHost {
    /// Whether the cart icon is present on this page.
    fn has_cart_anchor(&self) -> bool;

    /// Remove the badge if one is shown.
    fn remove_badge(&mut self);

    /// Attach a badge showing `count`.
    fn insert_badge(&mut self, count: i64);
}

impl<H: BadgeHost + ?Sized> BadgeHost for Rc<RefCell<H>> {
    fn has_cart_anchor(&self) -> bool {
        self.borrow().has_cart_anchor()
    }

    fn remove_badge(&mut self) {
        self.borrow_mut().remove_badge();
    }

    fn insert_badge(&mut self, count: i64) {
        self.borrow_mut().insert_badge(count);
    }
}

/// Cart view synchronizer.
///
/// Registered as a [`CartListener`] so it runs after every engine operation,
/// and once more at page initialization through
/// [`CartEngine::sync_listeners`](crate::CartEngine::sync_listeners).
#[derive(Debug, Clone, Default)]
pub struct CounterSync<H> {
    host: H,
}

impl<H: BadgeHost> CounterSync<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// Re-render the badge for `total_items`.
    ///
    /// Idempotent: any existing badge is removed before deciding whether a
    /// new one is needed, so repeated calls never stack badges. Pages without
    /// a cart icon are left alone, and an empty cart shows no badge.
    pub fn update_counter(&mut self, total_items: i64) {
        if !self.host.has_cart_anchor() {
            return;
        }

        self.host.remove_badge();

        if total_items > 0 {
            self.host.insert_badge(total_items);
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

impl<H: BadgeHost> CartListener for CounterSync<H> {
    fn on_cart_change(&mut self, change: &CartChange) {
        self.update_counter(change.totals.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct FakeHeader {
        anchor: bool,
        badges: Vec<i64>,
        removals: usize,
    }

    impl BadgeHost for FakeHeader {
        fn has_cart_anchor(&self) -> bool {
            self.anchor
        }

        fn remove_badge(&mut self) {
            if self.badges.pop().is_some() {
                self.removals += 1;
            }
        }

        fn insert_badge(&mut self, count: i64) {
            self.badges.push(count);
        }
    }

    fn header() -> FakeHeader {
        FakeHeader {
            anchor: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_inserts_badge_for_positive_count() {
        let mut sync = CounterSync::new(header());
        sync.update_counter(3);
        assert_eq!(sync.host().badges, vec![3]);
    }

    #[test]
    fn test_repeated_updates_never_stack() {
        let mut sync = CounterSync::new(header());
        sync.update_counter(1);
        sync.update_counter(2);
        sync.update_counter(2);
        assert_eq!(sync.host().badges, vec![2]);
        assert_eq!(sync.host().removals, 2);
    }

    #[test]
    fn test_zero_removes_badge() {
        let mut sync = CounterSync::new(header());
        sync.update_counter(5);
        sync.update_counter(0);
        assert!(sync.host().badges.is_empty());
    }

    #[test]
    fn test_page_without_cart_icon_is_untouched() {
        let mut sync = CounterSync::new(FakeHeader::default());
        sync.update_counter(5);
        assert!(sync.host().badges.is_empty());
        assert_eq!(sync.host().removals, 0);
    }
}
