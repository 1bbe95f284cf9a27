//! Atelier
//!
//! Atelier is the cart, pricing and order-state engine behind a
//! fashion-styling storefront: cart lines with derived totals, promo codes,
//! a persisted cart snapshot, and a read-mostly order catalog with
//! status-gated actions.

pub mod cart;
pub mod fixtures;
pub mod lines;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod promos;
