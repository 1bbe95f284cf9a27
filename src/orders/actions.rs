//! Order actions
//!
//! Which actions the UI may offer for an order, derived from its status and
//! review coverage.

use smallvec::SmallVec;

use crate::orders::{Order, OrderStatus};

/// An action the UI can offer for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Download or view the invoice.
    Invoice,

    /// Re-add the order's items to the cart.
    Reorder,

    /// Review the delivered items.
    ReviewItems,

    /// Open a support conversation about the order.
    ContactSupport,
}

/// The set of actions permitted for an order.
///
/// - Delivered unlocks Invoice and Reorder, plus `ReviewItems` while at
///   least one item still lacks a review.
/// - Every non-Cancelled status allows `ContactSupport`.
/// - Cancelled orders offer nothing.
#[must_use]
pub fn available_actions(order: &Order) -> SmallVec<[OrderAction; 4]> {
    let mut actions = SmallVec::new();

    match order.status() {
        OrderStatus::Delivered => {
            actions.push(OrderAction::Invoice);
            actions.push(OrderAction::Reorder);

            if !order.all_items_reviewed() {
                actions.push(OrderAction::ReviewItems);
            }

            actions.push(OrderAction::ContactSupport);
        }
        OrderStatus::Processing | OrderStatus::Shipped => {
            actions.push(OrderAction::ContactSupport);
        }
        OrderStatus::Cancelled => {}
    }

    actions
}
