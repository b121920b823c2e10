//! End-to-end tests of the order lifecycle against the in-memory backend.

use std::sync::Arc;
use std::time::Duration;

use client::{ClientError, InMemoryOrderApi, OrderApi};
use common::{Money, OrderId};
use domain::{Discount, MenuItem, OrderStatus, PaymentMethod};
use async_trait::async_trait;
use local_state::{InMemoryStateStore, StateError, StateStore};
use storefront::error::NO_ORDER_MESSAGE;
use storefront::{
    CART_SLOT, DEFAULT_PAID_MESSAGE, LoadState, ORDER_ID_SLOT, PayState, Route, Storefront,
    StorefrontError, SubmissionState,
};

type TestStorefront = Storefront<InMemoryOrderApi, InMemoryStateStore>;

struct TestHarness {
    storefront: TestStorefront,
    api: InMemoryOrderApi,
    store: InMemoryStateStore,
}

impl TestHarness {
    fn new() -> Self {
        let api = InMemoryOrderApi::with_menu(menu());
        let store = InMemoryStateStore::new();
        let storefront = Storefront::new(Arc::new(api.clone()), Arc::new(store.clone()));
        Self {
            storefront,
            api,
            store,
        }
    }

    /// Walks menu -> cart -> checkout and returns the new order's ID.
    async fn place_order(&self) -> OrderId {
        let mut catalog = self.storefront.catalog();
        catalog.load().await.unwrap();

        let mut cart = self.storefront.cart().await.unwrap();
        let margherita = catalog.require(&"margherita".into()).unwrap().clone();
        cart.add_item(&margherita);
        cart.add_item(&margherita);
        cart.persist().await.unwrap();

        let mut submission = self.storefront.submission();
        match submission.submit(cart.cart(), None).await.unwrap() {
            Route::Payment {
                order_id: Some(id),
            } => id,
            other => panic!("unexpected route {other}"),
        }
    }
}

/// Store whose writes always fail, as on a full disk.
struct ReadOnlyStore;

#[async_trait]
impl StateStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> local_state::Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String) -> local_state::Result<()> {
        Err(StateError::Io(std::io::Error::other("disk full")))
    }

    async fn remove(&self, _key: &str) -> local_state::Result<()> {
        Err(StateError::Io(std::io::Error::other("disk full")))
    }
}

fn menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("margherita", "Margherita", Money::from_cents(3000)),
        MenuItem::new("calabresa", "Calabresa", Money::from_cents(3500)),
    ]
}

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_load_populates_items_in_backend_order() {
        let h = TestHarness::new();
        let mut catalog = h.storefront.catalog();
        assert_eq!(catalog.state().as_str(), "idle");

        catalog.load().await.unwrap();
        let ids: Vec<_> = catalog.items().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["margherita", "calabresa"]);
    }

    #[tokio::test]
    async fn test_failure_is_reported_and_retry_succeeds() {
        let h = TestHarness::new();
        h.api.fail_next(ClientError::Network("refused".into())).await;

        let mut catalog = h.storefront.catalog();
        let err = catalog.load().await.unwrap_err();
        assert!(err.is_retryable());
        let failure = catalog.state().failure().unwrap();
        assert!(failure.retryable);
        assert_eq!(failure.message, err.user_message());

        catalog.load().await.unwrap();
        assert_eq!(catalog.items().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_pizza_is_refused() {
        let h = TestHarness::new();
        let mut catalog = h.storefront.catalog();
        catalog.load().await.unwrap();

        let err = catalog.require(&"hawaiian".into()).unwrap_err();
        assert!(matches!(err, StorefrontError::UnknownPizza(_)));
    }

    #[tokio::test]
    async fn test_cancelled_load_leaves_state_untouched() {
        let h = TestHarness::new();
        h.api.set_delay(Some(Duration::from_secs(5))).await;

        let mut catalog = h.storefront.catalog();
        let handle = catalog.cancel_handle();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.cancel();
        });

        let err = catalog.load().await.unwrap_err();
        assert!(matches!(err, StorefrontError::Cancelled));
        assert_eq!(catalog.state(), &LoadState::Idle);
    }
}

mod cart {
    use super::*;

    #[tokio::test]
    async fn test_restore_without_saved_cart_is_empty() {
        let h = TestHarness::new();
        let cart = h.storefront.cart().await.unwrap();
        assert!(cart.cart().is_empty());
        assert!(cart.subtotal().is_zero());
    }

    #[tokio::test]
    async fn test_persisted_cart_survives_reload() {
        let h = TestHarness::new();
        let [margherita, calabresa] = <[MenuItem; 2]>::try_from(menu()).unwrap();

        let mut cart = h.storefront.cart().await.unwrap();
        cart.add_item(&calabresa);
        cart.add_item(&margherita);
        cart.add_item(&calabresa);
        cart.persist().await.unwrap();

        let restored = h.storefront.cart().await.unwrap();
        assert_eq!(restored.cart(), cart.cart());
        assert_eq!(restored.subtotal(), Money::from_cents(10000));
    }

    #[tokio::test]
    async fn test_corrupt_saved_cart_restores_empty() {
        let h = TestHarness::new();
        h.store.set("cart", "{not json".to_string()).await.unwrap();

        let cart = h.storefront.cart().await.unwrap();
        assert!(cart.cart().is_empty());
    }

    #[tokio::test]
    async fn test_decrement_to_zero_removes_entry() {
        let h = TestHarness::new();
        let margherita = menu().remove(0);

        let mut cart = h.storefront.cart().await.unwrap();
        cart.add_item(&margherita);
        assert_eq!(cart.decrement(&margherita.id), Some(0));
        assert!(cart.cart().is_empty());
        assert_eq!(cart.decrement(&margherita.id), None);
    }
}

mod checkout {
    use super::*;

    #[tokio::test]
    async fn test_empty_cart_fails_validation_without_calls() {
        let h = TestHarness::new();
        let cart = h.storefront.cart().await.unwrap();

        let mut submission = h.storefront.submission();
        let err = submission.submit(cart.cart(), None).await.unwrap_err();

        assert!(matches!(err, StorefrontError::Validation(_)));
        assert!(matches!(submission.state(), SubmissionState::Failed(_)));
        assert_eq!(h.api.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_success_persists_order_id_and_routes_to_payment() {
        let h = TestHarness::new();
        let id = h.place_order().await;

        assert_eq!(id, OrderId::new(1));
        assert_eq!(ORDER_ID_SLOT.load(&h.store).await.unwrap(), Some(id));

        let created = h.api.created_orders().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].items[0].quantity, 2);
        assert!(created[0].discount.is_none());
    }

    #[tokio::test]
    async fn test_discount_is_forwarded() {
        let h = TestHarness::new();
        let mut cart = h.storefront.cart().await.unwrap();
        cart.add_item(&menu()[1]);

        let mut submission = h.storefront.submission();
        let discount = Discount::percentage(0.1).unwrap();
        submission.submit(cart.cart(), Some(discount)).await.unwrap();

        let order = submission.order().unwrap();
        assert_eq!(order.discount, Money::from_cents(350));
        assert_eq!(h.api.created_orders().await[0].discount, Some(discount));
    }

    #[tokio::test]
    async fn test_rejected_submission_is_not_retryable_and_keeps_stored_id() {
        let h = TestHarness::new();
        ORDER_ID_SLOT.save(&h.store, &OrderId::new(7)).await.unwrap();
        h.api
            .fail_next(ClientError::Rejected {
                status: 400,
                message: "pizza_id inválido".into(),
            })
            .await;

        let mut cart = h.storefront.cart().await.unwrap();
        cart.add_item(&menu()[0]);
        let mut submission = h.storefront.submission();
        let err = submission.submit(cart.cart(), None).await.unwrap_err();

        assert!(!err.is_retryable());
        assert!(err.user_message().contains("pizza_id inválido"));
        assert_eq!(
            ORDER_ID_SLOT.load(&h.store).await.unwrap(),
            Some(OrderId::new(7))
        );
    }

    #[tokio::test]
    async fn test_failed_local_save_keeps_created_order() {
        let api = InMemoryOrderApi::with_menu(menu());
        let storefront = Storefront::new(Arc::new(api.clone()), Arc::new(ReadOnlyStore));

        let mut cart = domain::Cart::new();
        cart.add_item(&menu()[0]);
        let mut submission = storefront.submission();
        let next = submission.submit(&cart, None).await.unwrap();

        assert_eq!(
            next,
            Route::Payment {
                order_id: Some(OrderId::new(1))
            }
        );
        assert_eq!(submission.order().map(|o| o.id), Some(OrderId::new(1)));
        assert_eq!(api.created_orders().await.len(), 1);
    }

    #[tokio::test]
    async fn test_saved_cart_with_zero_quantity_is_discarded() {
        let h = TestHarness::new();
        h.store
            .set(
                "cart",
                r#"[{"item":{"id":"margherita","name":"Margherita","price":30.0},"quantity":0}]"#
                    .to_string(),
            )
            .await
            .unwrap();

        assert_eq!(CART_SLOT.load(&h.store).await.unwrap(), None);
    }
}

mod tracking {
    use super::*;

    #[tokio::test]
    async fn test_no_order_fails_without_calls() {
        let h = TestHarness::new();
        let mut tracker = h.storefront.tracker(None);

        let err = tracker.open().await.unwrap_err();
        assert!(matches!(err, StorefrontError::NoOrder));
        assert_eq!(tracker.state().failure().unwrap().message, NO_ORDER_MESSAGE);
        assert_eq!(h.api.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_stored_order_id_is_used_without_route() {
        let h = TestHarness::new();
        let id = h.place_order().await;

        let mut tracker = h.storefront.tracker(None);
        tracker.open().await.unwrap();

        assert_eq!(tracker.order_id(), Some(id));
        assert_eq!(tracker.order().unwrap().status, OrderStatus::New);
        assert!(tracker.fetched_at().is_some());
    }

    #[tokio::test]
    async fn test_route_id_takes_precedence() {
        let h = TestHarness::new();
        h.place_order().await;
        let second = h.place_order().await;
        ORDER_ID_SLOT.save(&h.store, &OrderId::new(1)).await.unwrap();

        let mut tracker = h.storefront.tracker(Some(second));
        tracker.open().await.unwrap();
        assert_eq!(tracker.order().unwrap().id, second);
    }

    #[tokio::test]
    async fn test_reload_picks_up_status_changes_and_recovers_from_failure() {
        let h = TestHarness::new();
        let id = h.place_order().await;

        let mut tracker = h.storefront.tracker(Some(id));
        h.api.fail_next(ClientError::Timeout).await;
        assert!(tracker.open().await.is_err());
        assert!(tracker.state().failure().unwrap().retryable);

        h.api
            .update_order_status(id, &OrderStatus::OutForDelivery)
            .await
            .unwrap();
        tracker.reload().await.unwrap();
        assert_eq!(tracker.order().unwrap().status, OrderStatus::OutForDelivery);
    }

    #[tokio::test]
    async fn test_missing_order_is_reported() {
        let h = TestHarness::new();
        let mut tracker = h.storefront.tracker(Some(OrderId::new(99)));

        let err = tracker.open().await.unwrap_err();
        assert!(!err.is_retryable());
        assert!(tracker.order().is_none());
    }
}

mod payment {
    use super::*;

    #[tokio::test]
    async fn test_pay_success_shows_message_and_refreshes_order() {
        let h = TestHarness::new();
        let id = h.place_order().await;
        h.api
            .set_pay_message(Some("Pagamento processado com sucesso via PIX".into()))
            .await;

        let mut page = h.storefront.payment(None);
        page.open().await.unwrap();
        assert_eq!(page.order_id(), Some(id));
        assert_eq!(page.method(), PaymentMethod::Pix);

        page.pay().await.unwrap();
        assert_eq!(
            page.pay_state(),
            &PayState::Paid {
                message: "Pagamento processado com sucesso via PIX".into()
            }
        );
        assert_eq!(h.api.payments().await, vec![(id, PaymentMethod::Pix)]);
        assert!(page.order().is_some());
    }

    #[tokio::test]
    async fn test_missing_message_falls_back_to_default_and_refetches() {
        let h = TestHarness::new();
        let id = h.place_order().await;
        h.api.set_pay_returns_order(false).await;

        let mut page = h.storefront.payment(Some(id));
        page.open().await.unwrap();
        let calls_before = h.api.call_count().await;
        page.pay().await.unwrap();

        assert_eq!(
            page.pay_state(),
            &PayState::Paid {
                message: DEFAULT_PAID_MESSAGE.into()
            }
        );
        // pay + get_order
        assert_eq!(h.api.call_count().await, calls_before + 2);
    }

    #[tokio::test]
    async fn test_cancelled_refresh_after_payment_still_succeeds() {
        let h = TestHarness::new();
        let id = h.place_order().await;
        h.api.set_pay_returns_order(false).await;

        let mut page = h.storefront.payment(Some(id));
        page.open().await.unwrap();

        // pay completes at ~300ms, the refresh would finish at ~600ms
        h.api.set_delay(Some(Duration::from_millis(300))).await;
        let handle = page.cancel_handle();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(450)).await;
            handle.cancel();
        });

        page.pay().await.unwrap();
        assert_eq!(
            page.pay_state(),
            &PayState::Paid {
                message: DEFAULT_PAID_MESSAGE.into()
            }
        );
        assert_eq!(h.api.payments().await, vec![(id, PaymentMethod::Pix)]);
    }

    #[tokio::test]
    async fn test_pay_failure_keeps_selected_method() {
        let h = TestHarness::new();
        h.place_order().await;

        let mut page = h.storefront.payment(None);
        page.open().await.unwrap();
        page.select_method(PaymentMethod::Card);
        h.api
            .fail_next(ClientError::Server {
                status: 500,
                message: "boom".into(),
            })
            .await;

        let err = page.pay().await.unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(page.pay_state(), PayState::Failed(f) if f.retryable));
        assert_eq!(page.method(), PaymentMethod::Card);

        page.pay().await.unwrap();
        assert!(matches!(page.pay_state(), PayState::Paid { .. }));
    }

    #[tokio::test]
    async fn test_changing_method_clears_success() {
        let h = TestHarness::new();
        h.place_order().await;

        let mut page = h.storefront.payment(None);
        page.open().await.unwrap();
        page.pay().await.unwrap();

        page.select_method(PaymentMethod::Cash);
        assert_eq!(page.pay_state(), &PayState::Idle);
    }

    #[tokio::test]
    async fn test_no_order_blocks_payment() {
        let h = TestHarness::new();
        let mut page = h.storefront.payment(None);

        assert!(matches!(
            page.open().await.unwrap_err(),
            StorefrontError::NoOrder
        ));
        assert!(matches!(page.pay().await.unwrap_err(), StorefrontError::NoOrder));
        assert_eq!(h.api.call_count().await, 0);
    }
}
