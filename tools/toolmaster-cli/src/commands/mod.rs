//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod orders;
pub mod render;

use clap::{Args, Subcommand};
use toolmaster_cart::Price;

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart contents and totals.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product id.
        id: String,
        /// Display name.
        name: String,
        /// Unit price, e.g. 1500 or 1499.50.
        price: Price,
        /// Product image URL.
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove a product entirely.
    Remove {
        /// Product id.
        id: String,
    },
    /// Change a product's quantity by a signed step.
    Change {
        /// Product id.
        id: String,
        /// Quantity step, e.g. 1 or -1.
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer name (prompted for when missing).
    #[arg(long)]
    pub name: Option<String>,

    /// Contact phone (prompted for when missing).
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Delivery address.
    #[arg(long, default_value = "")]
    pub address: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    /// Show only the last N orders.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    /// Your name.
    #[arg(long)]
    pub name: String,

    /// Your email.
    #[arg(long)]
    pub email: String,

    /// Your phone.
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Message text.
    #[arg(long)]
    pub message: String,

    /// Form endpoint (overrides `shop.contact_endpoint`).
    #[arg(long)]
    pub endpoint: Option<String>,
}

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Only render this part.
    #[arg(long, value_enum)]
    pub only: Option<RenderPart>,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderPart {
    Header,
    Cart,
}
