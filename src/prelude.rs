//! Atelier prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartError, CartMutation,
        snapshot::{CartSnapshot, LineRecord, SCHEMA_VERSION, SnapshotError},
        store::{CartStore, JsonFileStore, MemoryStore, SnapshotStore, StoreError},
    },
    fixtures::{Fixture, FixtureError},
    lines::{CartLine, EntryId},
    orders::{
        Order, OrderBook, OrderItem, OrderStatus, Review, ReviewError, StatusFilter,
        actions::{OrderAction, available_actions},
    },
    pricing::{Pricing, Totals, TotalsError, totals},
    promos::{AppliedPromo, PromoBook, PromoError},
};
