//! Menu page data.

use std::sync::Arc;

use client::OrderApi;
use common::PizzaId;
use domain::MenuItem;

use crate::{CancelHandle, Failure, LoadState, RequestScope, Result, StorefrontError};

/// Fetches and holds the menu.
///
/// Failures leave the catalog in [`LoadState::Failed`]; calling
/// [`load`](Self::load) again retries.
pub struct MenuCatalog<A: OrderApi + ?Sized> {
    api: Arc<A>,
    scope: RequestScope,
    state: LoadState<Vec<MenuItem>>,
}

impl<A: OrderApi + ?Sized> MenuCatalog<A> {
    /// Creates an idle catalog.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            scope: RequestScope::new(),
            state: LoadState::Idle,
        }
    }

    /// Fetches the menu, replacing whatever was loaded before.
    pub async fn load(&mut self) -> Result<()> {
        self.state = LoadState::Loading;

        match self.scope.run(self.api.get_menu()).await {
            Ok(Ok(items)) => {
                tracing::debug!(count = items.len(), "menu loaded");
                self.state = LoadState::Loaded(items);
                Ok(())
            }
            Ok(Err(e)) => {
                let err = StorefrontError::from(e);
                tracing::warn!(error = %err, "menu load failed");
                self.state = LoadState::Failed(Failure::from(&err));
                Err(err)
            }
            Err(_) => {
                self.state = LoadState::Idle;
                Err(StorefrontError::Cancelled)
            }
        }
    }

    /// Returns the current load state.
    pub fn state(&self) -> &LoadState<Vec<MenuItem>> {
        &self.state
    }

    /// Returns the loaded items, or an empty slice.
    pub fn items(&self) -> &[MenuItem] {
        self.state.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Looks up a loaded item by ID.
    pub fn find(&self, pizza_id: &PizzaId) -> Option<&MenuItem> {
        self.items().iter().find(|item| &item.id == pizza_id)
    }

    /// Looks up a loaded item, failing if it is not on the menu.
    pub fn require(&self, pizza_id: &PizzaId) -> Result<&MenuItem> {
        self.find(pizza_id)
            .ok_or_else(|| StorefrontError::UnknownPizza(pizza_id.clone()))
    }

    /// Returns a handle that cancels this catalog's requests.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }
}
