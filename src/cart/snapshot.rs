//! Cart snapshots
//!
//! The wire layer for cart persistence: a versioned, JSON-encoded record of
//! the cart lines, decoupled from the domain types so the schema can evolve
//! without touching [`CartLine`]. Only lines are persisted; an applied promo
//! is session state and is re-entered by the user.

use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, KES, USD},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::Cart,
    lines::{CartLine, EntryId},
};

/// Version of the persisted schema. Bump on any incompatible field change.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors that can occur while decoding a persisted snapshot.
///
/// Callers loading a cart treat every variant as "no usable snapshot" and
/// start from the empty cart; the variants exist so the condition can be
/// reported, not recovered from.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot was not valid JSON for the expected shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The snapshot was written by an unknown schema version.
    #[error("unsupported snapshot schema version: {0}")]
    UnsupportedVersion(u32),

    /// A line record carried a currency code this storefront does not handle.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Versioned, JSON-serializable mirror of the cart lines.
#[derive(Debug, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Schema version the snapshot was written with.
    pub version: u32,

    /// One record per cart line, in cart order.
    pub lines: Vec<LineRecord>,
}

/// Wire record for one cart line. Money is stored as minor units plus an
/// ISO alpha currency code.
#[derive(Debug, Serialize, Deserialize)]
pub struct LineRecord {
    /// Identity key, unique per (product, size, colour).
    pub entry_id: String,

    /// Catalog product reference.
    pub product_id: String,

    /// Display title.
    pub title: String,

    /// Display category.
    pub category: String,

    /// Display image path.
    pub image: String,

    /// Optional size variant.
    pub size: Option<String>,

    /// Optional colour variant.
    pub color: Option<String>,

    /// Unit price in minor units.
    pub price_minor: i64,

    /// ISO alpha currency code for `price_minor`.
    pub currency: String,

    /// Number of units.
    pub quantity: u32,
}

impl CartSnapshot {
    /// Capture the current cart lines as a snapshot.
    #[must_use]
    pub fn capture(cart: &Cart) -> Self {
        CartSnapshot {
            version: SCHEMA_VERSION,
            lines: cart.iter().map(LineRecord::from).collect(),
        }
    }

    /// Serialize the snapshot to JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a JSON snapshot back into cart lines.
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::Json`]: the payload was not a valid snapshot.
    /// - [`SnapshotError::UnsupportedVersion`]: written by a schema this
    ///   build does not understand.
    /// - [`SnapshotError::UnknownCurrency`]: a record carried an unhandled
    ///   currency code.
    pub fn decode(json: &str) -> Result<Vec<CartLine>, SnapshotError> {
        let snapshot: CartSnapshot = serde_json::from_str(json)?;

        if snapshot.version != SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }

        snapshot.lines.into_iter().map(LineRecord::restore).collect()
    }
}

impl From<&CartLine> for LineRecord {
    fn from(line: &CartLine) -> Self {
        LineRecord {
            entry_id: line.entry_id().to_string(),
            product_id: line.product_id.clone(),
            title: line.title.clone(),
            category: line.category.clone(),
            image: line.image.clone(),
            size: line.size.clone(),
            color: line.color.clone(),
            price_minor: line.unit_price().to_minor_units(),
            currency: line.unit_price().currency().iso_alpha_code.to_string(),
            quantity: line.quantity(),
        }
    }
}

impl LineRecord {
    /// Rebuild a domain cart line from this record.
    ///
    /// A persisted quantity of 0 is clamped to 1, preserving the quantity
    /// floor invariant across the persistence boundary.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::UnknownCurrency`] if the currency code is
    /// not handled by this storefront.
    pub fn restore(self) -> Result<CartLine, SnapshotError> {
        let currency = parse_currency(&self.currency)?;

        Ok(CartLine::new(
            EntryId::new(self.entry_id),
            self.product_id,
            self.title,
            Money::from_minor(self.price_minor, currency),
            self.quantity,
        )
        .with_display(self.category, self.image)
        .with_variant(self.size, self.color))
    }
}

/// Resolve an ISO alpha code to one of the currencies this storefront
/// handles.
fn parse_currency(code: &str) -> Result<&'static Currency, SnapshotError> {
    match code {
        "KES" => Ok(KES),
        "USD" => Ok(USD),
        "GBP" => Ok(GBP),
        "EUR" => Ok(EUR),
        other => Err(SnapshotError::UnknownCurrency(other.to_string())),
    }
}
