//! Order lifecycle workflow for the pizzaria storefront.
//!
//! The flow runs through five components, each owning its own request
//! scope so that leaving a page cancels whatever it still has in flight:
//!
//! 1. [`MenuCatalog`] fetches the menu
//! 2. [`CartPage`] collects pizzas and persists the cart locally
//! 3. [`OrderSubmission`] turns the cart into a backend order
//! 4. [`PaymentPage`] pays for the current order
//! 5. [`OrderTracker`] shows the order's status, re-enterable at any time
//!
//! The only state shared between components lives in the local store under
//! the `cart` and `orderId` keys.

pub mod cart_page;
pub mod catalog;
pub mod error;
pub mod payment;
pub mod persist;
pub mod route;
pub mod scope;
pub mod storefront;
pub mod submission;
pub mod tracker;
pub mod view;

pub use cart_page::CartPage;
pub use catalog::MenuCatalog;
pub use error::{Result, StorefrontError};
pub use payment::{DEFAULT_PAID_MESSAGE, PayState, PaymentPage};
pub use persist::{CART_SLOT, ORDER_ID_SLOT};
pub use route::Route;
pub use scope::{CancelHandle, Cancelled, RequestScope};
pub use storefront::Storefront;
pub use submission::{OrderSubmission, SubmissionState};
pub use tracker::OrderTracker;
pub use view::{Failure, LoadState};
