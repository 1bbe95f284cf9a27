//! Fixtures
//!
//! YAML-seeded carts and order books for tests and demos. The storefront
//! proper receives this data from external collaborators; fixtures stand in
//! for them.

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    fixtures::{catalog::CatalogFixture, orders::OrdersFixture},
    lines::CartLine,
    orders::{Order, OrderBook},
};

pub mod catalog;
pub mod orders;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A seeded review was rejected by the order
    #[error("Invalid seeded review: {0}")]
    InvalidReview(String),

    /// Currency mismatch between fixture entries
    #[error("Currency mismatch in fixture set: {0} vs {1}")]
    CurrencyMismatch(String, String),

    /// Cart rejected a fixture line
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// A loaded fixture set: seed cart lines and orders sharing one currency.
#[derive(Debug)]
pub struct Fixture {
    base_path: PathBuf,
    lines: Vec<CartLine>,
    orders: Vec<Order>,
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Fixture {
            base_path: base_path.into(),
            lines: Vec::new(),
            orders: Vec::new(),
            currency: None,
        }
    }

    /// Load the catalog and orders files of a named set from the default
    /// base path.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, or if the set
    /// mixes currencies.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Fixture::new();

        fixture.load_catalog(name)?;
        fixture.load_orders(name)?;

        Ok(fixture)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a line's
    /// currency differs from the rest of the set.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

        for line_fixture in fixture.lines {
            let line = CartLine::try_from(line_fixture)?;

            self.note_currency(line.unit_price().currency())?;
            self.lines.push(line);
        }

        Ok(self)
    }

    /// Load orders from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if an item's
    /// currency differs from the rest of the set, or if a seeded review is
    /// rejected.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OrdersFixture = serde_norway::from_str(&contents)?;

        for order_fixture in fixture.orders {
            let order = Order::try_from(order_fixture)?;

            for item in order.items() {
                self.note_currency(item.price.currency())?;
            }

            self.orders.push(order);
        }

        Ok(self)
    }

    /// Build a cart seeded with the fixture's lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the lines disagree on currency.
    pub fn cart(&self) -> Result<Cart, FixtureError> {
        let currency = self.currency.unwrap_or(rusty_money::iso::KES);

        Ok(Cart::with_lines(self.lines.iter().cloned(), currency)?)
    }

    /// Build an order book seeded with the fixture's orders.
    #[must_use]
    pub fn order_book(&self) -> OrderBook {
        OrderBook::with_orders(self.orders.clone())
    }

    /// The currency shared by the fixture set, once any amounts are loaded.
    #[must_use]
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    fn note_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        if let Some(existing) = self.currency {
            if existing != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        Ok(())
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Fixture::new()
    }
}

/// Parse a price string (e.g., "4500.00 KES") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    use rust_decimal::{Decimal, prelude::ToPrimitive};
    use rusty_money::iso::{EUR, GBP, KES, USD};

    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "KES" => KES,
        "USD" => USD,
        "GBP" => GBP,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_reads_amount_and_currency() -> TestResult {
        let (minor, currency) = parse_price("4500.00 KES")?;

        assert_eq!(minor, 450_000);
        assert_eq!(currency, rusty_money::iso::KES);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_missing_currency() {
        assert!(matches!(
            parse_price("4500.00"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        assert!(matches!(
            parse_price("10 XTS"),
            Err(FixtureError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn boutique_set_loads_cart_and_orders() -> TestResult {
        let fixture = Fixture::from_set("boutique")?;

        let cart = fixture.cart()?;
        let book = fixture.order_book();

        assert!(!cart.is_empty());
        assert_eq!(book.len(), 4);
        assert_eq!(fixture.currency(), Some(rusty_money::iso::KES));

        Ok(())
    }
}
