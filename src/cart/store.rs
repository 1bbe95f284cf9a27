//! Cart store
//!
//! Couples a [`Cart`] with a persisted snapshot mirror. The in-memory cart
//! is authoritative; every mutation that changes state rewrites the whole
//! snapshot. There is exactly one writer per backing store, so no locking
//! is involved.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartError, CartMutation, snapshot::CartSnapshot},
    lines::{CartLine, EntryId},
    pricing::{Pricing, Totals, TotalsError},
    promos::{PromoBook, PromoError},
};

/// Errors surfaced by [`CartStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A mutation was rejected by the cart itself.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The snapshot could not be serialized.
    #[error(transparent)]
    Encode(#[from] serde_json::Error),

    /// The backing store failed to read or write.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The local key-value seam: one logical key holding one snapshot string.
pub trait SnapshotStore {
    /// Read the stored snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing store failed to read.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Overwrite the stored snapshot entirely.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing store failed to write.
    fn write(&mut self, snapshot: &str) -> Result<(), StoreError>;
}

/// In-memory snapshot store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Create a store pre-seeded with a snapshot string.
    #[must_use]
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        MemoryStore {
            slot: Some(snapshot.into()),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.clone())
    }

    fn write(&mut self, snapshot: &str) -> Result<(), StoreError> {
        self.slot = Some(snapshot.to_string());

        Ok(())
    }
}

/// File-backed snapshot store: one JSON file, rewritten whole on every
/// persist.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn write(&mut self, snapshot: &str) -> Result<(), StoreError> {
        fs::write(&self.path, snapshot)?;

        Ok(())
    }
}

/// A [`Cart`] kept in sync with a [`SnapshotStore`].
#[derive(Debug)]
pub struct CartStore<S: SnapshotStore> {
    cart: Cart,
    store: S,
}

impl<S: SnapshotStore> CartStore<S> {
    /// Load a cart from the backing store.
    ///
    /// An absent, unreadable, malformed, wrong-version, or foreign-currency
    /// snapshot yields the empty cart; loading never fails. The worst case
    /// is a reset cart, which the user can rebuild.
    pub fn load(store: S, currency: &'static Currency) -> Self {
        let cart = match store.read() {
            Ok(Some(json)) => match CartSnapshot::decode(&json) {
                Ok(lines) => match Cart::with_lines(lines, currency) {
                    Ok(cart) => cart,
                    Err(err) => {
                        warn!(error = %err, "snapshot currency did not match cart; starting empty");
                        Cart::new(currency)
                    }
                },
                Err(err) => {
                    warn!(error = %err, "unusable cart snapshot; starting empty");
                    Cart::new(currency)
                }
            },
            Ok(None) => Cart::new(currency),
            Err(err) => {
                warn!(error = %err, "could not read cart snapshot; starting empty");
                Cart::new(currency)
            }
        };

        CartStore { cart, store }
    }

    /// The in-memory cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add a line and persist.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the cart rejected the line or the
    /// snapshot write failed. On a write failure the in-memory cart keeps
    /// the mutation; the next successful persist writes it through.
    pub fn add_line(&mut self, line: CartLine) -> Result<CartMutation, StoreError> {
        let mutation = self.cart.add_line(line)?;

        self.persist_if_changed(mutation)?;

        Ok(mutation)
    }

    /// Replace a line's quantity and persist if anything changed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the snapshot write failed.
    pub fn update_quantity(
        &mut self,
        entry_id: &EntryId,
        quantity: u32,
    ) -> Result<CartMutation, StoreError> {
        let mutation = self.cart.update_quantity(entry_id, quantity);

        self.persist_if_changed(mutation)?;

        Ok(mutation)
    }

    /// Remove a line and persist if anything changed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the snapshot write failed.
    pub fn remove_line(&mut self, entry_id: &EntryId) -> Result<CartMutation, StoreError> {
        let mutation = self.cart.remove_line(entry_id);

        self.persist_if_changed(mutation)?;

        Ok(mutation)
    }

    /// Clear the cart and persist if anything changed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the snapshot write failed.
    pub fn clear(&mut self) -> Result<CartMutation, StoreError> {
        let mutation = self.cart.clear();

        self.persist_if_changed(mutation)?;

        Ok(mutation)
    }

    /// Apply a promo code. Promos are session state and are not persisted.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::UnknownCode`] if the code is not in the book;
    /// the previously applied promo is left untouched.
    pub fn apply_promo(&mut self, code: &str, book: &PromoBook) -> Result<u8, PromoError> {
        self.cart.apply_promo(code, book)
    }

    /// Derive totals from the current cart state.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if an amount overflows minor units.
    pub fn totals(&self, pricing: &Pricing) -> Result<Totals, TotalsError> {
        self.cart.totals(pricing)
    }

    /// Serialize the current cart and overwrite the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if encoding or the write failed.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let json = CartSnapshot::capture(&self.cart).encode()?;

        self.store.write(&json)?;

        debug!(lines = self.cart.len(), "persisted cart snapshot");

        Ok(())
    }

    fn persist_if_changed(&mut self, mutation: CartMutation) -> Result<(), StoreError> {
        if mutation.changed() {
            self.persist()?;
        }

        Ok(())
    }
}
