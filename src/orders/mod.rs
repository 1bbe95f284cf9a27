//! Orders
//!
//! A read-mostly catalog of orders for display. Orders are created and
//! status-transitioned by an external order-management system; this module
//! only holds them, filters them, and gates the actions the UI may offer.

use std::fmt;

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

pub mod actions;

/// Lifecycle stage of an order, controlled externally.
///
/// The set is closed on purpose: every branch on a status is an exhaustive
/// match, so a new stage cannot slip through unhandled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Accepted and being prepared.
    Processing,

    /// Handed to the carrier.
    Shipped,

    /// Received by the customer.
    Delivered,

    /// Terminal; outside the linear progress track.
    Cancelled,
}

impl OrderStatus {
    /// Fixed progress milestone for the status, as a percent.
    ///
    /// These are discrete display milestones, not a computed fraction:
    /// Processing 33, Shipped 66, Delivered 100, Cancelled 0.
    #[must_use]
    pub fn progress_percent(self) -> u8 {
        match self {
            OrderStatus::Processing => 33,
            OrderStatus::Shipped => 66,
            OrderStatus::Delivered => 100,
            OrderStatus::Cancelled => 0,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };

        f.write_str(label)
    }
}

/// Errors related to attaching reviews to an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// The product is not part of this order.
    #[error("product {0} is not part of this order")]
    UnknownProduct(String),

    /// The product already has a review on this order.
    #[error("product {0} is already reviewed on this order")]
    AlreadyReviewed(String),

    /// Ratings run from 1 to 5.
    #[error("rating {0} is outside 1–5")]
    InvalidRating(u8),
}

/// A customer review of one product on one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Star rating, 1–5.
    pub rating: u8,

    /// Free-text comment.
    pub comment: String,
}

/// One item on an order: a snapshot taken at order time, immutable after.
#[derive(Debug, Clone)]
pub struct OrderItem {
    /// Product identity within the order.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Display image path.
    pub image: String,

    /// Unit price at order time.
    pub price: Money<'static, Currency>,

    /// Number of units ordered.
    pub quantity: u32,

    /// Optional size variant.
    pub size: Option<String>,

    /// Optional colour variant.
    pub color: Option<String>,
}

/// Order
#[derive(Debug, Clone)]
pub struct Order {
    id: String,
    order_number: String,
    status: OrderStatus,
    items: Vec<OrderItem>,

    /// Descriptive fields, opaque to the logic here.
    pub shipping_address: String,

    /// Payment method label.
    pub payment_method: String,

    /// Carrier tracking number, once shipped.
    pub tracking_number: Option<String>,

    /// Delivery estimate label.
    pub delivery_estimate: Option<String>,

    reviews: FxHashMap<String, Review>,
}

impl Order {
    /// Create an order with the given identity, status, and item snapshot.
    pub fn new(
        id: impl Into<String>,
        order_number: impl Into<String>,
        status: OrderStatus,
        items: impl Into<Vec<OrderItem>>,
    ) -> Self {
        Order {
            id: id.into(),
            order_number: order_number.into(),
            status,
            items: items.into(),
            shipping_address: String::new(),
            payment_method: String::new(),
            tracking_number: None,
            delivery_estimate: None,
            reviews: FxHashMap::default(),
        }
    }

    /// The order's internal id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The customer-facing order number.
    #[must_use]
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// Current lifecycle stage.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// The items snapshot.
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// The review for a product, if one exists.
    #[must_use]
    pub fn review_for(&self, product_id: &str) -> Option<&Review> {
        self.reviews.get(product_id)
    }

    /// Whether every item on the order has a review.
    ///
    /// Vacuously true for an order with no items.
    #[must_use]
    pub fn all_items_reviewed(&self) -> bool {
        self.items
            .iter()
            .all(|item| self.reviews.contains_key(&item.id))
    }

    /// Attach a review to a product on this order.
    ///
    /// At most one review per product per order.
    ///
    /// # Errors
    ///
    /// - [`ReviewError::InvalidRating`]: rating outside 1–5.
    /// - [`ReviewError::UnknownProduct`]: product not on this order.
    /// - [`ReviewError::AlreadyReviewed`]: a review already exists.
    pub fn add_review(
        &mut self,
        product_id: &str,
        review: Review,
    ) -> Result<(), ReviewError> {
        if !(1..=5).contains(&review.rating) {
            return Err(ReviewError::InvalidRating(review.rating));
        }

        if !self.items.iter().any(|item| item.id == product_id) {
            return Err(ReviewError::UnknownProduct(product_id.to_string()));
        }

        if self.reviews.contains_key(product_id) {
            return Err(ReviewError::AlreadyReviewed(product_id.to_string()));
        }

        self.reviews.insert(product_id.to_string(), review);

        Ok(())
    }
}

/// Status half of a [`OrderBook::list`] query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Match every status.
    All,

    /// Match exactly this status.
    Only(OrderStatus),
}

impl StatusFilter {
    fn matches(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == wanted,
        }
    }
}

/// The set of known orders, populated once from an external source.
#[derive(Debug, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        OrderBook::default()
    }

    /// Create a book from pre-fetched orders.
    pub fn with_orders(orders: impl Into<Vec<Order>>) -> Self {
        OrderBook {
            orders: orders.into(),
        }
    }

    /// Add an order to the book.
    pub fn push(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// List orders matching a status filter and an optional search term.
    ///
    /// The search term matches case-insensitively against the order number
    /// and every item name; both filters AND-combine. No matches yields an
    /// empty iterator, never an error. The iterator borrows the book and can
    /// be restarted by calling `list` again.
    pub fn list(
        &self,
        filter: StatusFilter,
        search: Option<&str>,
    ) -> impl Iterator<Item = &Order> {
        let needle = search.map(str::to_lowercase);

        self.orders.iter().filter(move |order| {
            if !filter.matches(order.status()) {
                return false;
            }

            let Some(needle) = needle.as_deref() else {
                return true;
            };

            order.order_number().to_lowercase().contains(needle)
                || order
                    .items()
                    .iter()
                    .any(|item| item.name.to_lowercase().contains(needle))
        })
    }

    /// Iterate over every order in the book.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Get the number of orders in the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::KES;
    use testresult::TestResult;

    use super::*;

    fn item(id: &str, name: &str) -> OrderItem {
        OrderItem {
            id: id.to_string(),
            name: name.to_string(),
            image: String::new(),
            price: Money::from_minor(1000, KES),
            quantity: 1,
            size: None,
            color: None,
        }
    }

    fn seeded_book() -> OrderBook {
        OrderBook::with_orders([
            Order::new(
                "ord-1",
                "MW-1001",
                OrderStatus::Delivered,
                [item("p1", "Denim Jacket"), item("p2", "Silk Scarf")],
            ),
            Order::new(
                "ord-2",
                "MW-1002",
                OrderStatus::Shipped,
                [item("p3", "Ankara Blazer")],
            ),
            Order::new(
                "ord-3",
                "MW-1003",
                OrderStatus::Processing,
                [item("p4", "Linen Trousers")],
            ),
            Order::new(
                "ord-4",
                "MW-1004",
                OrderStatus::Cancelled,
                [item("p5", "Denim Skirt")],
            ),
        ])
    }

    #[test]
    fn progress_milestones_are_fixed() {
        assert_eq!(OrderStatus::Processing.progress_percent(), 33);
        assert_eq!(OrderStatus::Shipped.progress_percent(), 66);
        assert_eq!(OrderStatus::Delivered.progress_percent(), 100);
        assert_eq!(OrderStatus::Cancelled.progress_percent(), 0);
    }

    #[test]
    fn list_with_status_filter_returns_exact_matches() {
        let book = seeded_book();

        let shipped: Vec<&Order> = book
            .list(StatusFilter::Only(OrderStatus::Shipped), None)
            .collect();

        assert_eq!(shipped.len(), 1);
        assert_eq!(shipped.first().map(|order| order.id()), Some("ord-2"));
    }

    #[test]
    fn list_search_matches_item_names_case_insensitively() {
        let book = seeded_book();

        let denim: Vec<&str> = book
            .list(StatusFilter::All, Some("denim"))
            .map(Order::id)
            .collect();

        assert_eq!(denim, vec!["ord-1", "ord-4"]);
    }

    #[test]
    fn list_search_matches_order_numbers() {
        let book = seeded_book();

        let hits: Vec<&str> = book
            .list(StatusFilter::All, Some("mw-1003"))
            .map(Order::id)
            .collect();

        assert_eq!(hits, vec!["ord-3"]);
    }

    #[test]
    fn list_filters_and_combine() {
        let book = seeded_book();

        let hits: Vec<&Order> = book
            .list(StatusFilter::Only(OrderStatus::Delivered), Some("denim"))
            .collect();

        assert_eq!(hits.len(), 1);

        let none: Vec<&Order> = book
            .list(StatusFilter::Only(OrderStatus::Shipped), Some("denim"))
            .collect();

        assert!(none.is_empty());
    }

    #[test]
    fn list_with_no_matches_is_empty_not_an_error() {
        let book = seeded_book();

        assert_eq!(book.list(StatusFilter::All, Some("tuxedo")).count(), 0);
    }

    #[test]
    fn list_is_restartable() {
        let book = seeded_book();
        let filter = StatusFilter::Only(OrderStatus::Delivered);

        assert_eq!(book.list(filter, None).count(), 1);
        assert_eq!(book.list(filter, None).count(), 1);
    }

    #[test]
    fn add_review_allows_one_per_product() -> TestResult {
        let mut order = Order::new(
            "ord-1",
            "MW-1001",
            OrderStatus::Delivered,
            [item("p1", "Denim Jacket")],
        );

        order.add_review(
            "p1",
            Review {
                rating: 5,
                comment: "Perfect fit".to_string(),
            },
        )?;

        let second = order.add_review(
            "p1",
            Review {
                rating: 3,
                comment: "Changed my mind".to_string(),
            },
        );

        assert_eq!(second, Err(ReviewError::AlreadyReviewed("p1".to_string())));

        Ok(())
    }

    #[test]
    fn add_review_rejects_unknown_product() {
        let mut order = Order::new(
            "ord-1",
            "MW-1001",
            OrderStatus::Delivered,
            [item("p1", "Denim Jacket")],
        );

        let result = order.add_review(
            "p9",
            Review {
                rating: 4,
                comment: String::new(),
            },
        );

        assert_eq!(result, Err(ReviewError::UnknownProduct("p9".to_string())));
    }

    #[test]
    fn add_review_rejects_out_of_range_rating() {
        let mut order = Order::new(
            "ord-1",
            "MW-1001",
            OrderStatus::Delivered,
            [item("p1", "Denim Jacket")],
        );

        let result = order.add_review(
            "p1",
            Review {
                rating: 0,
                comment: String::new(),
            },
        );

        assert_eq!(result, Err(ReviewError::InvalidRating(0)));
    }

    #[test]
    fn all_items_reviewed_tracks_coverage() -> TestResult {
        let mut order = Order::new(
            "ord-1",
            "MW-1001",
            OrderStatus::Delivered,
            [item("p1", "Denim Jacket"), item("p2", "Silk Scarf")],
        );

        assert!(!order.all_items_reviewed());

        order.add_review(
            "p1",
            Review {
                rating: 5,
                comment: String::new(),
            },
        )?;

        assert!(!order.all_items_reviewed());

        order.add_review(
            "p2",
            Review {
                rating: 4,
                comment: String::new(),
            },
        )?;

        assert!(order.all_items_reviewed());

        Ok(())
    }
}
