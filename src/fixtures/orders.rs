//! Order fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_price},
    orders::{Order, OrderItem, OrderStatus, Review},
};

/// Wrapper for orders in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Order fixtures, in display order.
    pub orders: Vec<OrderFixture>,
}

/// Order fixture from YAML
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Internal order id.
    pub id: String,

    /// Customer-facing order number.
    pub order_number: String,

    /// Lifecycle stage.
    pub status: OrderStatus,

    /// Items snapshot.
    pub items: Vec<OrderItemFixture>,

    /// Shipping address label.
    #[serde(default)]
    pub shipping_address: String,

    /// Payment method label.
    #[serde(default)]
    pub payment_method: String,

    /// Carrier tracking number.
    #[serde(default)]
    pub tracking_number: Option<String>,

    /// Delivery estimate label.
    #[serde(default)]
    pub delivery_estimate: Option<String>,

    /// Pre-existing reviews, keyed by product id.
    #[serde(default)]
    pub reviews: Vec<ReviewFixture>,
}

/// Order item fixture from YAML
#[derive(Debug, Deserialize)]
pub struct OrderItemFixture {
    /// Product identity within the order.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Display image path.
    #[serde(default)]
    pub image: String,

    /// Unit price at order time (e.g., "4500.00 KES").
    pub price: String,

    /// Number of units.
    pub quantity: u32,

    /// Optional size variant.
    #[serde(default)]
    pub size: Option<String>,

    /// Optional colour variant.
    #[serde(default)]
    pub color: Option<String>,
}

/// Review fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ReviewFixture {
    /// Product the review belongs to.
    pub product: String,

    /// Star rating, 1–5.
    pub rating: u8,

    /// Free-text comment.
    #[serde(default)]
    pub comment: String,
}

impl TryFrom<OrderItemFixture> for OrderItem {
    type Error = FixtureError;

    fn try_from(fixture: OrderItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(OrderItem {
            id: fixture.id,
            name: fixture.name,
            image: fixture.image,
            price: Money::from_minor(minor_units, currency),
            quantity: fixture.quantity,
            size: fixture.size,
            color: fixture.color,
        })
    }
}

impl TryFrom<OrderFixture> for Order {
    type Error = FixtureError;

    fn try_from(fixture: OrderFixture) -> Result<Self, Self::Error> {
        let items = fixture
            .items
            .into_iter()
            .map(OrderItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut order = Order::new(fixture.id, fixture.order_number, fixture.status, items);
        order.shipping_address = fixture.shipping_address;
        order.payment_method = fixture.payment_method;
        order.tracking_number = fixture.tracking_number;
        order.delivery_estimate = fixture.delivery_estimate;

        for review in fixture.reviews {
            order
                .add_review(
                    &review.product,
                    Review {
                        rating: review.rating,
                        comment: review.comment,
                    },
                )
                .map_err(|err| FixtureError::InvalidReview(err.to_string()))?;
        }

        Ok(order)
    }
}
