//! Catalog fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_price},
    lines::{CartLine, EntryId},
};

/// Wrapper for cart lines in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Cart line fixtures, in display order.
    pub lines: Vec<LineFixture>,
}

/// Cart line fixture from YAML
#[derive(Debug, Deserialize)]
pub struct LineFixture {
    /// Identity key, unique per (product, size, colour).
    pub entry_id: String,

    /// Catalog product reference.
    pub product: String,

    /// Display title.
    pub title: String,

    /// Display category.
    #[serde(default)]
    pub category: String,

    /// Display image path.
    #[serde(default)]
    pub image: String,

    /// Optional size variant.
    #[serde(default)]
    pub size: Option<String>,

    /// Optional colour variant.
    #[serde(default)]
    pub color: Option<String>,

    /// Unit price (e.g., "4500.00 KES").
    pub price: String,

    /// Number of units.
    pub quantity: u32,
}

impl TryFrom<LineFixture> for CartLine {
    type Error = FixtureError;

    fn try_from(fixture: LineFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;
        let price = Money::from_minor(minor_units, currency);

        Ok(CartLine::new(
            EntryId::new(fixture.entry_id),
            fixture.product,
            fixture.title,
            price,
            fixture.quantity,
        )
        .with_display(fixture.category, fixture.image)
        .with_variant(fixture.size, fixture.color))
    }
}
