//! Ephemeral feedback: "added to cart" toasts and button confirmation.
//!
//! Nothing here is cart state. Toasts and button states only depend on the
//! time they were created, so callers pass `now` in and re-render.

use std::time::{Duration, Instant};

use toolmaster_cart::{CartChange, CartEvent, CartListener};

use crate::html::html_escape;

/// Delay before a toast starts fading in.
pub const TOAST_FADE_IN: Duration = Duration::from_millis(10);
/// How long a toast stays before fading out.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);
/// Fade-out duration; the toast is gone after this.
pub const TOAST_FADE_OUT: Duration = Duration::from_millis(300);
/// How long an add-to-cart button shows its confirmation.
pub const BUTTON_FEEDBACK: Duration = Duration::from_millis(1500);

/// Where a toast is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
    Gone,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub created: Instant,
}

impl Toast {
    pub fn phase(&self, now: Instant) -> ToastPhase {
        let age = now.saturating_duration_since(self.created);
        if age < TOAST_FADE_IN {
            ToastPhase::Entering
        } else if age < TOAST_LIFETIME {
            ToastPhase::Visible
        } else if age < TOAST_LIFETIME + TOAST_FADE_OUT {
            ToastPhase::Leaving
        } else {
            ToastPhase::Gone
        }
    }

    fn render(&self, now: Instant) -> String {
        let (opacity, translate) = match self.phase(now) {
            ToastPhase::Visible => (1, 0),
            _ => (0, -20),
        };
        format!(
            r#"<div class="cart-notification" style="opacity: {}; transform: translateY({}px);"><i class="fas fa-check-circle me-2"></i><span>{}</span></div>"#,
            opacity,
            translate,
            html_escape(&self.message)
        )
    }
}

/// Shows a toast for every item successfully added to the cart.
pub struct NotificationCenter {
    toasts: Vec<Toast>,
    clock: Box<dyn Fn() -> Instant>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_clock(Instant::now)
    }

    /// Use a custom time source for stamping new toasts.
    pub fn with_clock(clock: impl Fn() -> Instant + 'static) -> Self {
        Self {
            toasts: Vec::new(),
            clock: Box::new(clock),
        }
    }

    /// Queue a toast.
    pub fn show(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast {
            message: message.into(),
            created: (self.clock)(),
        });
    }

    /// Drop toasts that have finished fading out. Returns how many went.
    pub fn tick(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.phase(now) != ToastPhase::Gone);
        before - self.toasts.len()
    }

    /// Toasts still on screen at `now`.
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.toasts
            .iter()
            .filter(move |t| t.phase(now) != ToastPhase::Gone)
    }

    /// Render the toasts still on screen.
    pub fn render(&self, now: Instant) -> String {
        self.active(now).map(|t| t.render(now)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("toasts", &self.toasts)
            .finish_non_exhaustive()
    }
}

impl CartListener for NotificationCenter {
    fn on_cart_change(&mut self, change: &CartChange) {
        if let CartEvent::ItemAdded { name, .. } = &change.event {
            if change.persisted {
                self.show(format!("{} added to cart!", name));
            }
        }
    }
}

/// Temporary "Added" state of an add-to-cart button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonFeedback {
    label: String,
    pressed_at: Option<Instant>,
}

impl ButtonFeedback {
    pub const ADDED_LABEL: &'static str = "Added";

    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pressed_at: None,
        }
    }

    /// Switch to the confirmation state.
    pub fn press(&mut self, now: Instant) {
        self.pressed_at = Some(now);
    }

    fn confirming(&self, now: Instant) -> bool {
        self.pressed_at
            .is_some_and(|at| now.saturating_duration_since(at) < BUTTON_FEEDBACK)
    }

    /// The label to show at `now`.
    pub fn label(&self, now: Instant) -> &str {
        if self.confirming(now) {
            Self::ADDED_LABEL
        } else {
            &self.label
        }
    }

    /// Buttons are disabled while confirming, so double clicks don't add twice.
    pub fn disabled(&self, now: Instant) -> bool {
        self.confirming(now)
    }

    /// Button style class at `now`.
    pub fn class(&self, now: Instant) -> &'static str {
        if self.confirming(now) {
            "btn-success"
        } else {
            "btn-primary"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use toolmaster_cart::{CartTotals, ProductId};

    fn added(name: &str, persisted: bool) -> CartChange {
        CartChange {
            event: CartEvent::ItemAdded {
                id: ProductId::new("P1"),
                name: name.to_string(),
            },
            totals: CartTotals::default(),
            persisted,
        }
    }

    #[test]
    fn test_toast_lifecycle() {
        let start = Instant::now();
        let toast = Toast {
            message: "x".into(),
            created: start,
        };
        assert_eq!(toast.phase(start), ToastPhase::Entering);
        assert_eq!(toast.phase(start + Duration::from_millis(50)), ToastPhase::Visible);
        assert_eq!(toast.phase(start + Duration::from_millis(3100)), ToastPhase::Leaving);
        assert_eq!(toast.phase(start + Duration::from_millis(3300)), ToastPhase::Gone);
    }

    #[test]
    fn test_added_item_shows_toast_until_expiry() {
        let start = Instant::now();
        let now = Rc::new(Cell::new(start));
        let clock = Rc::clone(&now);
        let mut center = NotificationCenter::with_clock(move || clock.get());

        center.on_cart_change(&added("Drill", true));
        let html = center.render(start + Duration::from_secs(1));
        assert!(html.contains("Drill added to cart!"));
        assert!(html.contains("opacity: 1"));

        assert_eq!(center.tick(start + Duration::from_secs(1)), 0);
        assert_eq!(center.tick(start + Duration::from_secs(4)), 1);
        assert!(center.is_empty());
    }

    #[test]
    fn test_unpersisted_or_other_events_show_nothing() {
        let mut center = NotificationCenter::new();
        center.on_cart_change(&added("Drill", false));
        center.on_cart_change(&CartChange {
            event: CartEvent::Cleared,
            totals: CartTotals::default(),
            persisted: true,
        });
        assert!(center.is_empty());
    }

    #[test]
    fn test_button_feedback_reverts() {
        let start = Instant::now();
        let mut button = ButtonFeedback::new("Add to cart");
        assert_eq!(button.label(start), "Add to cart");

        button.press(start);
        assert_eq!(button.label(start), "Added");
        assert!(button.disabled(start + Duration::from_millis(1000)));
        assert_eq!(button.class(start), "btn-success");

        let later = start + Duration::from_millis(1500);
        assert_eq!(button.label(later), "Add to cart");
        assert!(!button.disabled(later));
        assert_eq!(button.class(later), "btn-primary");
    }
}
