//! # Cart Store
//!
//! The single owner of the live cart.
//!
//! ## Operation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Cart Mutation                                  │
//! │                                                                         │
//! │  caller ──► add_product / remove_product / update_product_amount        │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │ writer lock held ─────────────────────────────────────────────── │  │
//! │  │  1. remote lookups   (ProductCatalog / StockService)             │  │
//! │  │  2. validate + build next cart   (clone, never in place)         │  │
//! │  │  3. PersistentStore::save(key, encode(next))                     │  │
//! │  │  4. commit: cart = next, version += 1                            │  │
//! │  │  5. publish snapshot on the watch channel                        │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                 │                                                       │
//! │        Ok(snapshot)  or  Err(CartError) + Notification                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any failure before step 4 leaves the in-memory cart, its version, and the
//! stored bytes exactly as they were.
//!
//! ## Concurrency
//! Mutations queue on a `tokio::sync::Mutex`, so two concurrent adds of the
//! same product always end two units higher. Readers never take the lock;
//! they read the last published snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shoecart_core::validation::{check_increment, validate_amount};
use shoecart_core::{codec, Cart, CartError, CartTotals, CoreResult, LineItem, ProductId, StockLevel};
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::error::StoreResult;
use crate::notify::{LogNotifier, Notification, Operation};
use crate::persistence::MemoryStore;
use crate::ports::{NotificationSink, PersistentStore, ProductCatalog, StockService};

// =============================================================================
// Policy
// =============================================================================

/// Switches for cart rules that vary between deployments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartPolicy {
    /// Check stock before the first unit of a product enters the cart.
    /// Off by default: a first add costs a single catalog lookup.
    pub check_stock_on_first_add: bool,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only view of the cart at one committed version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    #[serde(rename = "items")]
    pub cart: Cart,

    /// Zero at open; exactly one higher after each successful mutation.
    pub version: u64,

    pub updated_at: DateTime<Utc>,
}

impl CartSnapshot {
    fn new(cart: Cart, version: u64) -> Self {
        CartSnapshot {
            cart,
            version,
            updated_at: Utc::now(),
        }
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Wires a [`CartStore`] to its collaborators.
///
/// ## Example
/// ```rust,ignore
/// let catalog = Arc::new(HttpCatalog::from_config(&config.api)?);
/// let store = CartStore::builder(catalog.clone(), catalog)
///     .storage(Arc::new(SqliteStore::new(db)))
///     .notifier(Arc::new(LogNotifier))
///     .policy(config.policy())
///     .open()
///     .await?;
/// ```
pub struct CartStoreBuilder {
    catalog: Arc<dyn ProductCatalog>,
    stock: Arc<dyn StockService>,
    storage: Arc<dyn PersistentStore>,
    notifier: Arc<dyn NotificationSink>,
    policy: CartPolicy,
    key: String,
}

impl CartStoreBuilder {
    /// Persistent store for the cart slot. Default: a fresh [`MemoryStore`].
    pub fn storage(mut self, storage: Arc<dyn PersistentStore>) -> Self {
        self.storage = storage;
        self
    }

    /// Sink for failure messages. Default: [`LogNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn policy(mut self, policy: CartPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Slot key. Default: [`shoecart_core::CART_STORAGE_KEY`].
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Loads the persisted cart and returns a ready store.
    ///
    /// An absent slot opens an empty cart. So does a slot that fails to
    /// decode; the decode error is logged and the slot is left untouched
    /// until the next successful mutation overwrites it.
    ///
    /// ## Errors
    /// [`StoreError::Storage`](crate::StoreError::Storage) when the slot
    /// cannot be read at all.
    pub async fn open(self) -> StoreResult<CartStore> {
        let cart = match self.storage.load(&self.key).await? {
            None => {
                debug!(key = %self.key, "No stored cart, starting empty");
                Cart::new()
            }
            Some(bytes) => match codec::decode(&bytes) {
                Ok(cart) => cart,
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Stored cart is malformed, starting empty");
                    Cart::new()
                }
            },
        };

        info!(
            key = %self.key,
            items = cart.len(),
            check_stock_on_first_add = self.policy.check_stock_on_first_add,
            "Cart store opened"
        );

        let (snapshots, _) = watch::channel(CartSnapshot::new(cart.clone(), 0));

        Ok(CartStore {
            catalog: self.catalog,
            stock: self.stock,
            storage: self.storage,
            notifier: self.notifier,
            policy: self.policy,
            key: self.key,
            state: Mutex::new(CartState { cart, version: 0 }),
            snapshots,
        })
    }
}

// =============================================================================
// Cart Store
// =============================================================================

struct CartState {
    cart: Cart,
    version: u64,
}

/// The authoritative cart plus the collaborators that validate and persist it.
///
/// Share it behind an `Arc`; every method takes `&self`.
pub struct CartStore {
    catalog: Arc<dyn ProductCatalog>,
    stock: Arc<dyn StockService>,
    storage: Arc<dyn PersistentStore>,
    notifier: Arc<dyn NotificationSink>,
    policy: CartPolicy,
    key: String,
    state: Mutex<CartState>,
    snapshots: watch::Sender<CartSnapshot>,
}

impl CartStore {
    pub fn builder(
        catalog: Arc<dyn ProductCatalog>,
        stock: Arc<dyn StockService>,
    ) -> CartStoreBuilder {
        CartStoreBuilder {
            catalog,
            stock,
            storage: Arc::new(MemoryStore::new()),
            notifier: Arc::new(LogNotifier),
            policy: CartPolicy::default(),
            key: shoecart_core::CART_STORAGE_KEY.to_string(),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Latest committed snapshot.
    pub fn cart(&self) -> CartSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn totals(&self) -> CartTotals {
        self.snapshots.borrow().totals()
    }

    /// Receiver that always holds the latest committed snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn policy(&self) -> CartPolicy {
        self.policy
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Flow
    /// ```text
    /// catalog lookup ── None ──────────────────────────► ProductNotFound
    ///      │
    ///      ├── already in cart ── stock lookup ── q+1 > s ► OutOfStock
    ///      │                                  └─ else ───► quantity q+1
    ///      │
    ///      └── not in cart ── (policy: stock lookup, 1 > s ► OutOfStock)
    ///                     └─────────────────────────────► append, quantity 1
    /// ```
    pub async fn add_product(&self, product_id: ProductId) -> CoreResult<CartSnapshot> {
        debug!(%product_id, "add_product");
        let result = self.try_add(product_id).await;
        self.settle(Operation::Add, product_id, result)
    }

    /// Removes a product's line item entirely. Never touches the network.
    pub async fn remove_product(&self, product_id: ProductId) -> CoreResult<CartSnapshot> {
        debug!(%product_id, "remove_product");
        let result = self.try_remove(product_id).await;
        self.settle(Operation::Remove, product_id, result)
    }

    /// Sets a product's quantity to `amount`, which must lie in
    /// `1..=available`.
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> CoreResult<CartSnapshot> {
        debug!(%product_id, amount, "update_product_amount");
        let result = self.try_update(product_id, amount).await;
        self.settle(Operation::Update, product_id, result)
    }

    async fn try_add(&self, product_id: ProductId) -> CoreResult<CartSnapshot> {
        let mut state = self.state.lock().await;

        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or(CartError::ProductNotFound(product_id))?;

        let mut next = state.cart.clone();
        match next.quantity_of(product_id) {
            Some(current) => {
                let stock = self.stock_level(product_id).await?;
                let quantity = check_increment(current, &stock)?;
                next.set_quantity(product_id, quantity)?;
            }
            None => {
                if self.policy.check_stock_on_first_add {
                    let stock = self.stock_level(product_id).await?;
                    check_increment(0, &stock)?;
                }
                next.push_item(LineItem::new(product))?;
            }
        }

        self.commit(&mut state, next).await
    }

    async fn try_remove(&self, product_id: ProductId) -> CoreResult<CartSnapshot> {
        let mut state = self.state.lock().await;

        let mut next = state.cart.clone();
        next.remove(product_id)?;

        self.commit(&mut state, next).await
    }

    async fn try_update(&self, product_id: ProductId, amount: i64) -> CoreResult<CartSnapshot> {
        let mut state = self.state.lock().await;

        let stock = self.stock_level(product_id).await?;
        let quantity = validate_amount(amount, &stock)?;

        let mut next = state.cart.clone();
        next.set_quantity(product_id, quantity)?;

        self.commit(&mut state, next).await
    }

    /// Stock for a product; a service with no record is a failed lookup.
    async fn stock_level(&self, product_id: ProductId) -> CoreResult<StockLevel> {
        self.stock
            .stock(product_id)
            .await?
            .ok_or(CartError::StockNotFound(product_id))
    }

    async fn commit(&self, state: &mut CartState, next: Cart) -> CoreResult<CartSnapshot> {
        let bytes = codec::encode(&next)?;

        if let Err(e) = self.storage.save(&self.key, &bytes).await {
            error!(key = %self.key, error = %e, "Failed to persist cart");
            return Err(e.into());
        }

        state.cart = next;
        state.version += 1;

        let snapshot = CartSnapshot::new(state.cart.clone(), state.version);
        self.snapshots.send_replace(snapshot.clone());

        debug!(
            version = snapshot.version,
            items = snapshot.cart.len(),
            "Cart committed"
        );
        Ok(snapshot)
    }

    fn settle(
        &self,
        operation: Operation,
        product_id: ProductId,
        result: CoreResult<CartSnapshot>,
    ) -> CoreResult<CartSnapshot> {
        if let Err(ref e) = result {
            let notification = Notification::for_error(operation, e);
            warn!(%operation, %product_id, error = %e, "Cart operation failed");
            self.notifier.notify(notification);
        }
        result
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("policy", &self.policy)
            .field("version", &self.snapshots.borrow().version)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
