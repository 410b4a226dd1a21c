//! # Cart Store
//!
//! Owns the shopper's cart for the session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action               Store Method                Awaits             │
//! │  ─────────               ────────────                ──────             │
//! │                                                                         │
//! │  Click "add" ──────────► add_product(id) ──────────► product, stock    │
//! │                                                                         │
//! │  Change quantity ──────► update_product_amount() ──► stock             │
//! │                                                                         │
//! │  Click remove ─────────► remove_product(id) ───────► (none)            │
//! │                                                                         │
//! │  Render cart ──────────► cart() ───────────────────► (read only)       │
//! │                                                                         │
//! │  Every successful change: blob.set(key, json) then publish snapshot.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Each operation reads the current snapshot when it resumes after its last
//! catalog call. Two overlapping operations can therefore overwrite each
//! other's result; the last one to commit wins.
//!
//! Commits are serialized by an async lock held across the blob write and
//! the publish, so writes land in the same order as publishes and the blob
//! store always holds the published cart. The snapshot lock itself is never
//! held across an `.await`.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use cart_core::{Cart, CartTotals, CoreError, ProductId};

use crate::catalog::Catalog;
use crate::error::{CartError, Operation};
use crate::notify::Notifier;
use crate::storage::BlobStore;

/// Key the cart blob is persisted under.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Arguments of [`CartStore::update_product_amount`].
///
/// A missing or zero `amount` is ignored rather than treated as removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    #[serde(default)]
    pub amount: Option<u32>,
}

/// The shopper's cart and the collaborators it needs.
///
/// Cheap to clone; clones share the same cart.
///
/// ## Usage
/// ```rust,ignore
/// let store = CartStore::load(catalog, storage, notifier, CART_STORAGE_KEY).await;
///
/// store.add_product(3).await;
/// store.update_product_amount(UpdateProductAmount { product_id: 3, amount: Some(2) }).await;
///
/// for item in store.cart().items() {
///     println!("{} x{}", item.title, item.amount);
/// }
/// ```
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

struct Inner {
    cart: Mutex<Arc<Cart>>,
    /// Held from the blob write until the publish.
    commit: tokio::sync::Mutex<()>,
    catalog: Arc<dyn Catalog>,
    storage: Arc<dyn BlobStore>,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
}

impl CartStore {
    /// Creates a store seeded from whatever is persisted under
    /// `storage_key`.
    ///
    /// Never fails: a missing, unreadable or malformed blob yields an empty
    /// cart.
    pub async fn load(
        catalog: Arc<dyn Catalog>,
        storage: Arc<dyn BlobStore>,
        notifier: Arc<dyn Notifier>,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let cart = read_persisted(storage.as_ref(), &storage_key).await;

        info!(
            key = %storage_key,
            items = cart.item_count(),
            "Cart store initialized"
        );

        CartStore {
            inner: Arc::new(Inner {
                cart: Mutex::new(Arc::new(cart)),
                commit: tokio::sync::Mutex::new(()),
                catalog,
                storage,
                notifier,
                storage_key,
            }),
        }
    }

    /// Current cart snapshot. Later changes never alter a returned snapshot.
    pub fn cart(&self) -> Arc<Cart> {
        Arc::clone(&self.lock())
    }

    /// Totals of the current snapshot.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self.cart().as_ref())
    }

    /// Key this store persists under.
    pub fn storage_key(&self) -> &str {
        &self.inner.storage_key
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: amount + 1, if stock allows
    /// - Product not in cart: appended with amount 1, if stock allows
    /// - Stock too low: cart unchanged, [`Notice::StockExceeded`]
    /// - Catalog or storage failure: cart unchanged, [`Notice::AddFailed`]
    ///
    /// [`Notice::StockExceeded`]: crate::Notice::StockExceeded
    /// [`Notice::AddFailed`]: crate::Notice::AddFailed
    pub async fn add_product(&self, product_id: ProductId) {
        debug!(product_id, "add_product");
        let result = self.try_add(product_id).await;
        self.report(Operation::Add, product_id, result);
    }

    /// Removes a product's line.
    ///
    /// Raises [`Notice::RemoveFailed`](crate::Notice::RemoveFailed) and
    /// leaves the cart unchanged if the product isn't in the cart or the
    /// new cart can't be persisted.
    pub async fn remove_product(&self, product_id: ProductId) {
        debug!(product_id, "remove_product");
        let result = self.try_remove(product_id).await;
        self.report(Operation::Remove, product_id, result);
    }

    /// Sets how many units of a product the cart holds.
    ///
    /// ## Behavior
    /// - Product not in cart: [`Notice::UpdateFailed`]
    /// - `amount` missing or zero: nothing happens, no notice
    /// - `amount` above stock: cart unchanged, [`Notice::StockExceeded`]
    /// - Stock lookup or storage failure: cart unchanged,
    ///   [`Notice::StockExceeded`]
    ///
    /// [`Notice::UpdateFailed`]: crate::Notice::UpdateFailed
    /// [`Notice::StockExceeded`]: crate::Notice::StockExceeded
    pub async fn update_product_amount(&self, update: UpdateProductAmount) {
        debug!(
            product_id = update.product_id,
            amount = ?update.amount,
            "update_product_amount"
        );
        let result = self.try_update_amount(update).await;
        self.report(Operation::UpdateAmount, update.product_id, result);
    }

    async fn try_add(&self, product_id: ProductId) -> Result<(), CartError> {
        let product = self.inner.catalog.product(product_id).await?;
        let stock = self.inner.catalog.stock(product_id).await?;

        let next = self.cart().with_product_added(&product, &stock)?;
        self.commit(next).await
    }

    async fn try_remove(&self, product_id: ProductId) -> Result<(), CartError> {
        let next = self.cart().without_product(product_id)?;
        self.commit(next).await
    }

    async fn try_update_amount(&self, update: UpdateProductAmount) -> Result<(), CartError> {
        let UpdateProductAmount { product_id, amount } = update;

        if self.cart().get(product_id).is_none() {
            return Err(CoreError::NotInCart(product_id).into());
        }

        let Some(amount) = amount.filter(|a| *a > 0) else {
            debug!(product_id, "Ignoring empty amount update");
            return Ok(());
        };

        let stock = self.inner.catalog.stock(product_id).await?;

        let next = self.cart().with_amount(product_id, amount, &stock)?;
        self.commit(next).await
    }

    /// Persists `next`, then publishes it. A failed write publishes nothing.
    async fn commit(&self, next: Cart) -> Result<(), CartError> {
        let json = serde_json::to_string(&next)?;

        let _commit = self.inner.commit.lock().await;
        self.inner.storage.set(&self.inner.storage_key, &json).await?;

        *self.lock() = Arc::new(next);
        Ok(())
    }

    fn report(&self, operation: Operation, product_id: ProductId, result: Result<(), CartError>) {
        let Err(err) = result else {
            return;
        };

        let notice = err.notice_for(operation);

        if err.is_stock_violation() {
            debug!(%operation, product_id, error = %err, "Stock check failed");
        } else {
            warn!(%operation, product_id, error = %err, notice = ?notice, "Cart operation failed");
        }

        self.inner.notifier.notify(notice);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Arc<Cart>> {
        self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.inner.storage_key)
            .field("cart", &self.cart())
            .finish_non_exhaustive()
    }
}

async fn read_persisted(storage: &dyn BlobStore, key: &str) -> Cart {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(key = %key, error = %e, "Could not read persisted cart, starting empty");
            return Cart::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(cart) => cart,
        Err(e) => {
            warn!(key = %key, error = %e, "Persisted cart is malformed, starting empty");
            Cart::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
