//! Integration tests for the order ledger against the in-memory user
//! resource: admin status rewrites and deletions touch exactly one user.

use std::sync::Arc;

use domain::{CartLine, Item, Money, Order, OrderStatus, PaymentMethodKind, User};
use projections::{OrderLedger, ProjectionError};
use storage::{InMemoryUserStore, UserStore};

fn order(item_id: u32, cents: i64) -> Order {
    let line = CartLine::snapshot(&Item::new(
        item_id,
        format!("Game {item_id}"),
        Money::from_cents(cents),
        "RPG",
        "PC",
        "",
    ));
    let mut order = Order::from_lines(std::slice::from_ref(&line), PaymentMethodKind::Card);
    order.status = OrderStatus::Completed;
    order
}

fn user_with_orders(email: &str, name: &str, orders: Vec<Order>) -> User {
    let mut user = User::new(email, name);
    user.purchase_history = orders;
    user
}

async fn seeded_ledger() -> (OrderLedger, Arc<InMemoryUserStore>, User, User) {
    let store = Arc::new(InMemoryUserStore::new());
    let alice = user_with_orders(
        "alice@example.com",
        "Alice",
        vec![order(1, 5999), order(2, 999)],
    );
    let bob = user_with_orders("bob@example.com", "Bob", vec![order(3, 2999)]);

    store.create(alice.clone()).await.unwrap();
    store.create(bob.clone()).await.unwrap();

    let ledger = OrderLedger::new(store.clone());
    ledger.refresh().await.unwrap();

    (ledger, store, alice, bob)
}

#[tokio::test]
async fn refresh_flattens_all_histories() {
    let (ledger, _, alice, bob) = seeded_ledger().await;

    let entries = ledger.entries().await;
    assert_eq!(entries.len(), 3);
    assert_eq!(ledger.count().await, 3);

    let emails: Vec<&str> = entries.iter().map(|e| e.user_email.as_str()).collect();
    assert_eq!(
        emails,
        vec!["alice@example.com", "alice@example.com", "bob@example.com"]
    );
    assert_eq!(entries[0].order.id, alice.purchase_history[0].id);
    assert_eq!(entries[2].order.id, bob.purchase_history[0].id);
}

#[tokio::test]
async fn update_status_touches_only_the_owning_user() {
    let (ledger, store, alice, bob) = seeded_ledger().await;
    let target = &alice.purchase_history[1].id;

    ledger
        .update_status(target, OrderStatus::Cancelled)
        .await
        .unwrap();

    // The owner's matching entry changed...
    let stored_alice = store.get(alice.id).await.unwrap().unwrap();
    assert_eq!(stored_alice.purchase_history[1].status, OrderStatus::Cancelled);
    // ...their other entry did not...
    assert_eq!(stored_alice.purchase_history[0].status, OrderStatus::Completed);
    // ...and other users' histories are untouched.
    let stored_bob = store.get(bob.id).await.unwrap().unwrap();
    assert_eq!(stored_bob.purchase_history[0].status, OrderStatus::Completed);

    // The in-memory ledger reflects the rewrite without a refresh.
    let entry = ledger
        .entries()
        .await
        .into_iter()
        .find(|e| &e.order.id == target)
        .unwrap();
    assert_eq!(entry.order.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn update_status_for_unknown_order_is_reported() {
    let (ledger, _, _, _) = seeded_ledger().await;

    let result = ledger
        .update_status(&"ORD-0-missing".into(), OrderStatus::Delivered)
        .await;

    assert!(matches!(result, Err(ProjectionError::OrderNotFound(_))));
}

#[tokio::test]
async fn delete_removes_exactly_one_entry_everywhere() {
    let (ledger, store, alice, _) = seeded_ledger().await;
    let target = alice.purchase_history[0].id.clone();
    let before = ledger.count().await;

    ledger.delete(&target).await.unwrap();

    assert_eq!(ledger.count().await, before - 1);
    assert!(
        ledger
            .entries()
            .await
            .iter()
            .all(|entry| entry.order.id != target)
    );

    let stored_alice = store.get(alice.id).await.unwrap().unwrap();
    assert_eq!(stored_alice.purchase_history.len(), 1);
    assert_ne!(stored_alice.purchase_history[0].id, target);
}

#[tokio::test]
async fn delete_unknown_order_is_reported_not_fatal() {
    let (ledger, _, _, _) = seeded_ledger().await;

    let result = ledger.delete(&"ORD-0-missing".into()).await;
    assert!(matches!(result, Err(ProjectionError::OrderNotFound(_))));
    assert_eq!(ledger.count().await, 3);
}

#[tokio::test]
async fn store_outage_surfaces_during_refresh_mutations() {
    let (ledger, store, alice, _) = seeded_ledger().await;
    store.set_fail_on_write(true).await;

    let result = ledger
        .update_status(&alice.purchase_history[0].id, OrderStatus::Delivered)
        .await;

    assert!(matches!(result, Err(ProjectionError::Store(_))));
    // In-memory ledger unchanged because the write was never acknowledged.
    let entry = &ledger.entries().await[0];
    assert_eq!(entry.order.status, OrderStatus::Completed);
}

#[tokio::test]
async fn admin_can_reassign_any_status_freely() {
    let (ledger, _, alice, _) = seeded_ledger().await;
    let target = &alice.purchase_history[0].id;

    // No transition table: Completed -> Cancelled -> Pending -> Delivered.
    for status in [
        OrderStatus::Cancelled,
        OrderStatus::Pending,
        OrderStatus::Delivered,
    ] {
        ledger.update_status(target, status).await.unwrap();
    }

    let entry = ledger
        .entries()
        .await
        .into_iter()
        .find(|e| &e.order.id == target)
        .unwrap();
    assert_eq!(entry.order.status, OrderStatus::Delivered);
}
