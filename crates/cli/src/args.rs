//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use common::{Money, OrderId, PizzaId};
use domain::{Discount, DomainError, OrderStatus, PaymentMethod};

/// Order pizzas from the pizzaria backend.
#[derive(Parser, Debug)]
#[command(name = "pizzaria", author, version, about)]
pub struct Cli {
    /// Backend base URL (overrides PIZZARIA_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds (overrides PIZZARIA_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Local state file (overrides PIZZARIA_STATE_FILE)
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the menu
    Menu,

    /// Add one pizza to the cart
    Add { pizza_id: PizzaId },

    /// Remove one pizza from the cart
    Remove { pizza_id: PizzaId },

    /// Show the cart
    Cart,

    /// Empty the cart
    ClearCart,

    /// Turn the cart into an order
    Checkout(DiscountArgs),

    /// Pay for the current order
    Pay {
        /// PIX, CARTAO or DINHEIRO
        #[arg(long, default_value_t = PaymentMethod::Pix)]
        method: PaymentMethod,

        /// Order to pay (defaults to the last created order)
        #[arg(long)]
        order: Option<OrderId>,
    },

    /// Show an order's status (defaults to the last created order)
    Track { order_id: Option<OrderId> },

    /// List every order on the backend
    Orders,

    /// Move an order to a new status
    Status {
        order_id: OrderId,

        /// NOVO, EM_PREPARO, SAIU_ENTREGA or ENTREGUE
        #[arg(value_parser = parse_status)]
        status: OrderStatus,
    },

    /// Print the backend configuration
    Config,
}

fn parse_status(s: &str) -> Result<OrderStatus, DomainError> {
    s.parse()
}

/// Optional discount rule sent with the order.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct DiscountArgs {
    /// Percentage off the subtotal, 0 to 100
    #[arg(long, conflicts_with_all = ["minimum", "fixed_discount"])]
    pub percent: Option<f64>,

    /// Subtotal from which the fixed discount applies
    #[arg(long, requires = "fixed_discount")]
    pub minimum: Option<f64>,

    /// Amount taken off when the subtotal reaches the minimum
    #[arg(long, requires = "minimum")]
    pub fixed_discount: Option<f64>,
}

impl DiscountArgs {
    /// Builds the discount rule, if any flags were given.
    pub fn to_discount(&self) -> Result<Option<Discount>, DomainError> {
        match (self.percent, self.minimum, self.fixed_discount) {
            (Some(percent), _, _) => Discount::percentage(percent / 100.0).map(Some),
            (None, Some(minimum), Some(fixed)) => {
                Discount::minimum_threshold(amount(minimum)?, amount(fixed)?).map(Some)
            }
            _ => Ok(None),
        }
    }
}

fn amount(value: f64) -> Result<Money, DomainError> {
    Money::from_decimal(value)
        .ok_or_else(|| DomainError::InvalidDiscount(format!("{value} is not an amount")))
}
