//! Page-level pieces of the ToolMaster storefront.
//!
//! Everything here is a view over the cart engine or an independent widget:
//!
//! - **Page**: per-page session wiring the engine to the header badge and toasts
//! - **Actions**: decode click targets from `data-*` attributes
//! - **Cart table**, **header**: HTML renderers
//! - **Checkout**, **orders**: order form, summary and append-only history
//! - **Contact**: contact form validation and submission
//! - **Slider**, **navigation**: testimonial slider and anchor scrolling

pub mod actions;
pub mod cart_table;
pub mod checkout;
pub mod contact;
pub mod header;
pub mod html;
pub mod navigation;
pub mod notify;
pub mod orders;
pub mod page;
pub mod slider;

pub use actions::{ActionError, CartAction, DataAttributes};
pub use cart_table::{render_cart_table, CartTable};
pub use checkout::{order_summary, Checkout, CheckoutError, Confirmation, OrderForm};
pub use contact::{
    ContactForm, FieldError, FieldKind, FieldSpec, FieldState, FormOutcome, FormTransport,
    FormValues, HttpTransport, TransportError,
};
pub use header::Header;
pub use navigation::{scroll_target, PageLayout, ScrollTo, StaticLayout};
pub use notify::{ButtonFeedback, NotificationCenter, Toast, ToastPhase};
pub use orders::OrderHistory;
pub use page::{ProductButton, ShopSettings, Storefront};
pub use slider::{render_testimonial_slider, Slider, Testimonial};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::actions::{CartAction, DataAttributes};
    pub use crate::checkout::{Checkout, CheckoutError, OrderForm};
    pub use crate::contact::{ContactForm, FormOutcome, FormTransport, HttpTransport};
    pub use crate::header::Header;
    pub use crate::orders::OrderHistory;
    pub use crate::page::{ProductButton, ShopSettings, Storefront};
}
