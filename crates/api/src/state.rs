//! Shared application state and demo wiring.

use std::sync::Arc;
use std::time::Duration;

use common::UserId;
use domain::{Address, Item, Money, User};
use projections::OrderLedger;
use services::{
    CartService, CheckoutService, InMemoryPaymentGateway, ServiceError, SessionService,
    WishlistService,
};
use storage::{
    CatalogStore, InMemoryCatalogStore, InMemoryKeyValueStore, InMemoryUserStore, KeyValueStore,
    UserStore,
};
use tokio::sync::Mutex;

/// Shared application state accessible from all handlers.
///
/// The server hosts a single interactive session, so one cart and one
/// wishlist live behind mutexes; the admin surface shares the same user
/// store through the ledger.
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub users: Arc<dyn UserStore>,
    pub cart: Mutex<CartService>,
    pub wishlist: Mutex<WishlistService>,
    pub checkout: CheckoutService,
    pub session: SessionService,
    pub ledger: OrderLedger,
    /// The signed-in demo user owning the session.
    pub session_user: UserId,
}

/// Seed catalog for the demo server and integration tests.
pub fn demo_catalog() -> Vec<Item> {
    vec![
        Item::new(
            1,
            "Starfall Chronicles",
            Money::from_cents(5999),
            "RPG",
            "PC",
            "https://cdn.example/starfall.jpg",
        ),
        Item::new(
            2,
            "Neon Drift",
            Money::from_cents(2999),
            "Racing",
            "PS5",
            "https://cdn.example/neon.jpg",
        ),
        Item::new(
            3,
            "Harvest Hollow",
            Money::from_cents(1999),
            "Simulation",
            "Switch",
            "https://cdn.example/harvest.jpg",
        ),
        Item::new(
            4,
            "Iron Vanguard",
            Money::from_cents(6999),
            "Shooter",
            "Xbox",
            "https://cdn.example/vanguard.jpg",
        )
        .out_of_stock(),
    ]
}

/// Creates the default application state with in-memory stores, a seeded
/// catalog, and a signed-in demo user.
pub async fn create_default_state(
    payment_latency: Duration,
) -> Result<Arc<AppState>, ServiceError> {
    let catalog: Arc<dyn CatalogStore> =
        Arc::new(InMemoryCatalogStore::with_items(demo_catalog()));
    let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    let kv: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());

    let demo_user = User::new("demo@example.com", "Demo Player").with_address(Address::new(
        1,
        "Demo Player",
        "1 Arcade Way",
        "Pixelton",
        "00001",
        "US",
    ));
    let session_user = demo_user.id;
    users.create(demo_user).await?;

    let gateway = Arc::new(InMemoryPaymentGateway::with_latency(payment_latency));
    let cart = CartService::load(kv.clone()).await;
    let wishlist = WishlistService::for_account(users.clone(), session_user).await?;
    let checkout = CheckoutService::new(users.clone(), gateway);
    let session = SessionService::new(kv);
    let ledger = OrderLedger::new(users.clone());

    Ok(Arc::new(AppState {
        catalog,
        users,
        cart: Mutex::new(cart),
        wishlist: Mutex::new(wishlist),
        checkout,
        session,
        ledger,
        session_user,
    }))
}
