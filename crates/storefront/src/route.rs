//! Navigation targets.

use common::OrderId;

/// Pages of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Menu,
    Cart,
    Payment { order_id: Option<OrderId> },
    Tracking { order_id: Option<OrderId> },
}

impl Route {
    /// Returns the page path (`/menu`, `/tracking/3`, ...).
    pub fn path(&self) -> String {
        match self {
            Route::Menu => "/menu".to_string(),
            Route::Cart => "/cart".to_string(),
            Route::Payment { order_id: None } => "/payment".to_string(),
            Route::Payment { order_id: Some(id) } => format!("/payment/{id}"),
            Route::Tracking { order_id: None } => "/tracking".to_string(),
            Route::Tracking { order_id: Some(id) } => format!("/tracking/{id}"),
        }
    }

    /// Returns the order ID the route names, if any.
    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            Route::Payment { order_id } | Route::Tracking { order_id } => *order_id,
            Route::Menu | Route::Cart => None,
        }
    }

    /// Parses a page path. The empty path is the menu.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["menu"] => Some(Route::Menu),
            ["cart"] => Some(Route::Cart),
            ["payment"] => Some(Route::Payment { order_id: None }),
            ["payment", id] => id.parse().ok().map(|id| Route::Payment { order_id: Some(id) }),
            ["tracking"] => Some(Route::Tracking { order_id: None }),
            ["tracking", id] => id
                .parse()
                .ok()
                .map(|id| Route::Tracking { order_id: Some(id) }),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
