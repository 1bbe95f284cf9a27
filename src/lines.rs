//! Cart lines

use std::fmt;

use rusty_money::{Money, iso::Currency};

/// Identity of a cart line: unique per (product, size, colour) combination.
///
/// Every mutation on the cart is keyed by this value, never by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(String);

impl EntryId {
    /// Create a new entry id.
    pub fn new(id: impl Into<String>) -> Self {
        EntryId(id.into())
    }

    /// View the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        EntryId(id.to_string())
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        EntryId(id)
    }
}

/// One line of the cart: a product variant with a unit price and a quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    entry_id: EntryId,

    /// Catalog product this line references.
    pub product_id: String,

    /// Display title.
    pub title: String,

    /// Display category.
    pub category: String,

    /// Display image path.
    pub image: String,

    /// Optional size variant; part of the line's identity.
    pub size: Option<String>,

    /// Optional colour variant; part of the line's identity.
    pub color: Option<String>,

    unit_price: Money<'static, Currency>,
    quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    ///
    /// A `quantity` of 0 is clamped to 1; a line always represents at least
    /// one unit.
    pub fn new(
        entry_id: impl Into<EntryId>,
        product_id: impl Into<String>,
        title: impl Into<String>,
        unit_price: Money<'static, Currency>,
        quantity: u32,
    ) -> Self {
        CartLine {
            entry_id: entry_id.into(),
            product_id: product_id.into(),
            title: title.into(),
            category: String::new(),
            image: String::new(),
            size: None,
            color: None,
            unit_price,
            quantity: quantity.max(1),
        }
    }

    /// Attach display category and image.
    #[must_use]
    pub fn with_display(mut self, category: impl Into<String>, image: impl Into<String>) -> Self {
        self.category = category.into();
        self.image = image.into();
        self
    }

    /// Attach size and colour variants.
    #[must_use]
    pub fn with_variant(mut self, size: Option<String>, color: Option<String>) -> Self {
        self.size = size;
        self.color = color;
        self
    }

    /// The line's identity key.
    #[must_use]
    pub fn entry_id(&self) -> &EntryId {
        &self.entry_id
    }

    /// Price of one unit.
    #[must_use]
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Number of units; always at least 1.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Replace the quantity. Values below 1 are ignored.
    ///
    /// Returns `true` if the quantity changed.
    pub(crate) fn set_quantity(&mut self, quantity: u32) -> bool {
        if quantity < 1 || quantity == self.quantity {
            return false;
        }

        self.quantity = quantity;
        true
    }

    /// Add the given number of units, saturating at `u32::MAX`.
    pub(crate) fn merge_quantity(&mut self, additional: u32) {
        self.quantity = self.quantity.saturating_add(additional);
    }

    /// Total price for this line (`unit_price` × `quantity`).
    ///
    /// Returns `None` if the multiplication overflows i64 minor units.
    #[must_use]
    pub fn line_total(&self) -> Option<Money<'static, Currency>> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))?;

        Some(Money::from_minor(minor, self.unit_price.currency()))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::KES;

    use super::*;

    fn test_line(quantity: u32) -> CartLine {
        CartLine::new(
            "denim-jacket-l-indigo",
            "prod-denim-jacket",
            "Denim Jacket",
            Money::from_minor(4500, KES),
            quantity,
        )
    }

    #[test]
    fn new_clamps_zero_quantity_to_one() {
        let line = test_line(0);

        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn set_quantity_below_one_is_a_no_op() {
        let mut line = test_line(3);

        assert!(!line.set_quantity(0));
        assert_eq!(line.quantity(), 3);
    }

    #[test]
    fn set_quantity_replaces_value() {
        let mut line = test_line(1);

        assert!(line.set_quantity(5));
        assert_eq!(line.quantity(), 5);
    }

    #[test]
    fn set_quantity_to_same_value_reports_no_change() {
        let mut line = test_line(2);

        assert!(!line.set_quantity(2));
    }

    #[test]
    fn merge_quantity_saturates() {
        let mut line = test_line(2);

        line.merge_quantity(u32::MAX);

        assert_eq!(line.quantity(), u32::MAX);
    }

    #[test]
    fn line_total_multiplies_unit_price() {
        let line = test_line(3);

        assert_eq!(line.line_total(), Some(Money::from_minor(13500, KES)));
    }

    #[test]
    fn line_total_overflow_returns_none() {
        let line = CartLine::new(
            "overflow",
            "prod",
            "Overflow",
            Money::from_minor(i64::MAX, KES),
            2,
        );

        assert_eq!(line.line_total(), None);
    }

    #[test]
    fn with_variant_sets_identity_fields() {
        let line = test_line(1).with_variant(Some("L".into()), Some("Indigo".into()));

        assert_eq!(line.size.as_deref(), Some("L"));
        assert_eq!(line.color.as_deref(), Some("Indigo"));
    }
}
