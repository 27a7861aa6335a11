//! End-to-end facade behavior over in-memory stores.

use async_trait::async_trait;
use gear_commerce::catalog::ProductSnapshot;
use gear_commerce::checkout::{Address, Order, OrderRequest, OrderStatus};
use gear_commerce::drawer::CloseTrigger;
use gear_commerce::ids::OrderId;
use gear_commerce::money::{Currency, Money};
use gear_commerce::cart::{ShippingPolicy, Voucher};
use gear_session::{CartSession, SessionError};
use gear_store::{CartStore, MemoryStore, OrderGateway, StoreError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn vnd(amount: i64) -> Money {
    Money::new(amount, Currency::VND)
}

fn policy() -> ShippingPolicy {
    ShippingPolicy::new(vnd(30_000), vnd(500_000))
}

fn mouse() -> ProductSnapshot {
    ProductSnapshot::new("mouse-g502", "Wired Gaming Mouse", vnd(100_000))
}

fn headset() -> ProductSnapshot {
    ProductSnapshot::new("hs-cloud", "Gaming Headset", vnd(50_000))
}

fn address() -> Address {
    Address::new("Nguyen Van A", "0901234567", "12 Ly Thuong Kiet", "Hanoi", "VN")
}

fn guest_session(local: Arc<MemoryStore>) -> CartSession {
    CartSession::new(local, policy(), Duration::from_secs(1))
}

/// Order gateway double that records the submitted request.
#[derive(Default)]
struct FakeOrders {
    last: Mutex<Option<OrderRequest>>,
}

#[async_trait]
impl OrderGateway for FakeOrders {
    async fn submit(&self, request: &OrderRequest) -> Result<Order, StoreError> {
        *self.last.lock().unwrap() = Some(request.clone());
        Ok(Order {
            id: OrderId::new("ord-1"),
            status: OrderStatus::Pending,
            grand_total: vnd(230_000),
            created_at: 1,
        })
    }
}

#[tokio::test]
async fn mutations_mirror_to_local_store() {
    let local = Arc::new(MemoryStore::new());
    let mut session = guest_session(local.clone());

    session.add_item(&mouse(), None, 2).await;
    assert_eq!(local.items().unwrap().len(), 1);

    session.add_item(&headset(), None, 1).await;
    session
        .remove_item(&"hs-cloud".into(), None)
        .await;
    let persisted = local.items().unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].quantity, 2);
}

#[tokio::test]
async fn add_opens_drawer_and_badge_counts_everything() {
    let mut session = guest_session(Arc::new(MemoryStore::new()));
    session.add_item(&mouse(), None, 2).await;
    session.add_item(&headset(), None, 1).await;
    session.toggle_selected(&"hs-cloud".into(), None).await;

    assert!(session.drawer_is_open());
    // Badge counts all items, the summary only the selected subset.
    assert_eq!(session.item_count(), 3);
    let totals = session.totals().unwrap();
    assert_eq!(totals.total_items, 3);
    assert_eq!(totals.selected_items, 2);

    session.close_drawer(CloseTrigger::BackdropClicked);
    assert!(!session.drawer_is_open());
}

#[tokio::test]
async fn selected_subtotal_plus_flat_fee() {
    // A: 100,000 x 2 selected; B: 50,000 x 1 unselected.
    let mut session = guest_session(Arc::new(MemoryStore::new()));
    session.add_item(&mouse(), None, 2).await;
    session.add_item(&headset(), None, 1).await;
    session.toggle_selected(&"hs-cloud".into(), None).await;

    let totals = session.totals().unwrap();
    assert_eq!(totals.subtotal.amount_minor, 200_000);
    assert_eq!(totals.shipping_fee.amount_minor, 30_000);
    assert_eq!(totals.grand_total.amount_minor, 230_000);
}

#[tokio::test]
async fn voucher_applies_and_clamps() {
    let mut session = guest_session(Arc::new(MemoryStore::new()));
    session.add_item(&mouse(), None, 1).await;

    session.apply_voucher(Voucher::fixed("MEGA", vnd(9_000_000), vnd(0)));
    let totals = session.totals().unwrap();
    assert_eq!(totals.discount.amount_minor, 100_000);
    assert_eq!(totals.grand_total.amount_minor, 30_000);

    session.remove_voucher();
    assert_eq!(session.totals().unwrap().grand_total.amount_minor, 130_000);
}

#[tokio::test]
async fn persistence_failures_never_surface() {
    let local = Arc::new(MemoryStore::new());
    local.set_fail_writes(true);
    let mut session = guest_session(local.clone());

    // The mutation itself must succeed even though nothing persists.
    session.add_item(&mouse(), None, 1).await;
    assert_eq!(session.item_count(), 1);
    assert!(local.items().is_none());
}

#[tokio::test]
async fn load_reads_local_for_guests() {
    let local = Arc::new(MemoryStore::new());
    {
        let mut session = guest_session(local.clone());
        session.add_item(&mouse(), None, 2).await;
    }

    let mut session = guest_session(local.clone());
    session.load().await;
    assert_eq!(session.item_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn debounced_server_write_lands_once() {
    let local = Arc::new(MemoryStore::new());
    let remote = Arc::new(MemoryStore::new());
    let mut session = guest_session(local);
    session
        .login_with_store("cust-1".into(), remote.clone())
        .await;

    session.add_item(&mouse(), None, 1).await;
    session.add_item(&mouse(), None, 1).await;
    session.add_item(&headset(), None, 1).await;

    tokio::time::sleep(Duration::from_secs(2)).await;

    // Three rapid mutations coalesce into one server write (plus the one
    // scheduled by login itself, also coalesced away).
    assert_eq!(remote.save_count(), 1);
    let server = remote.items().unwrap();
    assert_eq!(server.len(), 2);
    assert_eq!(server[0].quantity, 2);
}

#[tokio::test(start_paused = true)]
async fn clear_beats_inflight_debounced_write() {
    let local = Arc::new(MemoryStore::new());
    let remote = Arc::new(MemoryStore::new());
    let mut session = guest_session(local.clone());
    session
        .login_with_store("cust-1".into(), remote.clone())
        .await;

    session.add_item(&mouse(), None, 1).await;
    // Clear while the debounced write is still pending.
    session.clear_cart().await;

    assert_eq!(session.item_count(), 0);
    assert_eq!(local.items(), Some(vec![]));

    tokio::time::sleep(Duration::from_secs(2)).await;

    // The stale write was discarded; the server cart stays cleared.
    assert_eq!(remote.items(), Some(vec![]));
    assert_eq!(session.item_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn login_merges_guest_cart_into_server_cart() {
    let local = Arc::new(MemoryStore::new());
    let remote = Arc::new(MemoryStore::new());

    // The customer already has a mouse in their server cart.
    remote
        .save(&[gear_commerce::cart::LineItem::new(&mouse(), None, 1)])
        .await
        .unwrap();

    let mut session = guest_session(local.clone());
    session.add_item(&mouse(), None, 2).await;
    session.add_item(&headset(), None, 1).await;

    session
        .login_with_store("cust-1".into(), remote.clone())
        .await;

    assert!(session.is_authenticated());
    assert_eq!(session.cart().unique_item_count(), 2);
    assert_eq!(
        session.cart().get(&"mouse-g502".into(), None).unwrap().quantity,
        3
    );

    // The merged cart reaches the server once the debounce elapses.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(remote.items().unwrap().len(), 2);
}

#[tokio::test]
async fn submit_order_requires_auth_and_selection() {
    let orders = Arc::new(FakeOrders::default());
    let mut session =
        guest_session(Arc::new(MemoryStore::new())).with_order_gateway(orders.clone());

    session.add_item(&mouse(), None, 1).await;
    let err = session
        .submit_order(address(), "pm-cod".into())
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::NotAuthenticated));

    session
        .login_with_store("cust-1".into(), Arc::new(MemoryStore::new()))
        .await;
    session.deselect_all().await;
    let err = session
        .submit_order(address(), "pm-cod".into())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Commerce(gear_commerce::CommerceError::EmptySelection)
    ));
}

#[tokio::test(start_paused = true)]
async fn submit_order_takes_selected_lines_and_clears_them() {
    let orders = Arc::new(FakeOrders::default());
    let remote = Arc::new(MemoryStore::new());
    let mut session =
        guest_session(Arc::new(MemoryStore::new())).with_order_gateway(orders.clone());
    session
        .login_with_store("cust-1".into(), remote.clone())
        .await;

    session.add_item(&mouse(), None, 2).await;
    session.add_item(&headset(), None, 1).await;
    session.toggle_selected(&"hs-cloud".into(), None).await;
    session.apply_voucher(Voucher::percentage("GEAR10", 10.0, vnd(0)));
    session.open_drawer(gear_commerce::drawer::OpenTrigger::BadgeClicked);

    let order = session.submit_order(address(), "pm-cod".into()).await.unwrap();
    assert_eq!(order.id.as_str(), "ord-1");

    // The request carried exactly the selected subset.
    let request = orders.last.lock().unwrap().clone().unwrap();
    assert_eq!(request.customer_id.as_str(), "cust-1");
    assert_eq!(request.products.len(), 1);
    assert_eq!(request.products[0].product_id.as_str(), "mouse-g502");
    assert_eq!(request.products[0].quantity, 2);
    assert!(request.voucher_id.is_some());

    // Purchased lines left the cart; the unselected one stays. The voucher
    // is consumed and the drawer closes.
    assert_eq!(session.cart().unique_item_count(), 1);
    assert!(session.cart().get(&"hs-cloud".into(), None).is_some());
    assert!(session.voucher().is_none());
    assert!(!session.drawer_is_open());
}

#[tokio::test]
async fn logout_returns_to_guest() {
    let mut session = guest_session(Arc::new(MemoryStore::new()));
    session
        .login_with_store("cust-1".into(), Arc::new(MemoryStore::new()))
        .await;
    assert!(session.is_authenticated());

    session.add_item(&mouse(), None, 1).await;
    session.logout();

    assert!(!session.is_authenticated());
    assert_eq!(session.item_count(), 1);
    assert!(session.cart().customer_id.is_none());
}
