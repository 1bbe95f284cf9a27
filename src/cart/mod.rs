//! Cart
//!
//! The in-memory half of the cart store: an owned list of [`CartLine`]s for
//! the current session, an optionally applied promo code, and totals derived
//! on demand. Persistence lives in [`store`].

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    lines::{CartLine, EntryId},
    pricing::{Pricing, Totals, TotalsError, totals},
    promos::{AppliedPromo, PromoBook, PromoError},
};

pub mod snapshot;
pub mod store;

/// Errors related to cart construction or mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// A line's currency differs from the cart currency (entry id, line currency, cart currency).
    #[error("line {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(EntryId, &'static str, &'static str),
}

/// Outcome of a cart mutation.
///
/// Business conditions that reject a mutation (quantity below 1, unknown
/// entry id) are reported as [`CartMutation::NoOp`], never as errors; the
/// caller decides what feedback to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CartMutation {
    /// The cart state changed.
    Changed,

    /// The operation left the cart untouched.
    NoOp,
}

impl CartMutation {
    /// Check whether the mutation changed the cart.
    #[must_use]
    pub fn changed(self) -> bool {
        matches!(self, CartMutation::Changed)
    }
}

/// Cart
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    promo: Option<AppliedPromo>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            promo: None,
            currency,
        }
    }

    /// Create a cart with the given lines.
    ///
    /// Lines sharing an entry id are merged by summing quantities, same as
    /// [`Cart::add_line`].
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if a line's currency differs from the cart
    /// currency.
    pub fn with_lines(
        lines: impl IntoIterator<Item = CartLine>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let mut cart = Cart::new(currency);

        for line in lines {
            let _ = cart.add_line(line)?;
        }

        Ok(cart)
    }

    /// Add a line to the cart.
    ///
    /// If a line with the same entry id already exists, the quantities are
    /// merged rather than a duplicate entry appended.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the line's currency differs from the cart
    /// currency.
    pub fn add_line(&mut self, line: CartLine) -> Result<CartMutation, CartError> {
        let line_currency = line.unit_price().currency();

        if line_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                line.entry_id().clone(),
                line_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|existing| existing.entry_id() == line.entry_id())
        {
            existing.merge_quantity(line.quantity());
        } else {
            self.lines.push(line);
        }

        Ok(CartMutation::Changed)
    }

    /// Replace the quantity of the matching line.
    ///
    /// A quantity below 1 or an unknown entry id leaves the cart untouched
    /// and reports [`CartMutation::NoOp`].
    pub fn update_quantity(&mut self, entry_id: &EntryId, quantity: u32) -> CartMutation {
        let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.entry_id() == entry_id)
        else {
            return CartMutation::NoOp;
        };

        if line.set_quantity(quantity) {
            CartMutation::Changed
        } else {
            CartMutation::NoOp
        }
    }

    /// Remove the matching line. Removing an absent entry id is a no-op, so
    /// removal is idempotent.
    pub fn remove_line(&mut self, entry_id: &EntryId) -> CartMutation {
        let before = self.lines.len();

        self.lines.retain(|line| line.entry_id() != entry_id);

        if self.lines.len() == before {
            CartMutation::NoOp
        } else {
            CartMutation::Changed
        }
    }

    /// Remove every line and any applied promo.
    pub fn clear(&mut self) -> CartMutation {
        if self.lines.is_empty() && self.promo.is_none() {
            return CartMutation::NoOp;
        }

        self.lines.clear();
        self.promo = None;

        CartMutation::Changed
    }

    /// Apply a promo code from the given book.
    ///
    /// On success the promo replaces any previously applied one and the
    /// percent off is returned. On failure the previously applied promo is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::UnknownCode`] if the code is not in the book.
    pub fn apply_promo(&mut self, code: &str, book: &PromoBook) -> Result<u8, PromoError> {
        let percent = book.percent_off(code)?;

        self.promo = Some(AppliedPromo {
            code: code.to_string(),
            percent,
        });

        Ok(percent)
    }

    /// The currently applied promo, if any.
    #[must_use]
    pub fn promo(&self) -> Option<&AppliedPromo> {
        self.promo.as_ref()
    }

    /// Derive totals from the current lines and applied promo.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if an amount overflows minor units or a
    /// percent application is not representable.
    pub fn totals(&self, pricing: &Pricing) -> Result<Totals, TotalsError> {
        let percent = self.promo.as_ref().map_or(0, |promo| promo.percent);

        totals(&self.lines, percent, pricing, self.currency)
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{KES, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn line(entry_id: &str, price_minor: i64, quantity: u32) -> CartLine {
        CartLine::new(
            entry_id,
            format!("prod-{entry_id}"),
            entry_id.to_string(),
            Money::from_minor(price_minor, KES),
            quantity,
        )
    }

    #[test]
    fn add_line_appends_new_entry() -> TestResult {
        let mut cart = Cart::new(KES);

        let mutation = cart.add_line(line("a", 1000, 1))?;

        assert!(mutation.changed());
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn add_line_merges_duplicate_entry_ids() -> TestResult {
        let mut cart = Cart::new(KES);

        let _ = cart.add_line(line("a", 1000, 2))?;
        let _ = cart.add_line(line("a", 1000, 3))?;

        assert_eq!(cart.len(), 1);
        let merged = cart.iter().next().map(CartLine::quantity);
        assert_eq!(merged, Some(5));

        Ok(())
    }

    #[test]
    fn add_line_currency_mismatch_errors() {
        let mut cart = Cart::new(KES);

        let foreign = CartLine::new("usd-line", "prod", "Import", Money::from_minor(100, USD), 1);

        let result = cart.add_line(foreign);

        match result {
            Err(CartError::CurrencyMismatch(entry_id, line_currency, cart_currency)) => {
                assert_eq!(entry_id, EntryId::from("usd-line"));
                assert_eq!(line_currency, USD.iso_alpha_code);
                assert_eq!(cart_currency, KES.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn update_quantity_replaces_value() -> TestResult {
        let mut cart = Cart::with_lines([line("a", 1000, 1)], KES)?;

        let mutation = cart.update_quantity(&EntryId::from("a"), 4);

        assert!(mutation.changed());
        assert_eq!(cart.iter().next().map(CartLine::quantity), Some(4));

        Ok(())
    }

    #[test]
    fn update_quantity_below_one_is_a_no_op() -> TestResult {
        let mut cart = Cart::with_lines([line("a", 1000, 3)], KES)?;

        let mutation = cart.update_quantity(&EntryId::from("a"), 0);

        assert_eq!(mutation, CartMutation::NoOp);
        assert_eq!(cart.iter().next().map(CartLine::quantity), Some(3));

        Ok(())
    }

    #[test]
    fn update_quantity_unknown_entry_is_a_no_op() -> TestResult {
        let mut cart = Cart::with_lines([line("a", 1000, 1)], KES)?;

        let mutation = cart.update_quantity(&EntryId::from("missing"), 2);

        assert_eq!(mutation, CartMutation::NoOp);

        Ok(())
    }

    #[test]
    fn remove_line_is_idempotent() -> TestResult {
        let mut cart = Cart::with_lines([line("a", 1000, 1), line("b", 2000, 1)], KES)?;
        let id = EntryId::from("a");

        assert_eq!(cart.remove_line(&id), CartMutation::Changed);
        assert_eq!(cart.remove_line(&id), CartMutation::NoOp);
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn clear_empties_lines_and_promo() -> TestResult {
        let mut cart = Cart::with_lines([line("a", 1000, 1)], KES)?;
        let _ = cart.apply_promo("SAVE10", &PromoBook::boutique())?;

        assert_eq!(cart.clear(), CartMutation::Changed);
        assert!(cart.is_empty());
        assert!(cart.promo().is_none());
        assert_eq!(cart.clear(), CartMutation::NoOp);

        Ok(())
    }

    #[test]
    fn apply_promo_sets_discount() -> TestResult {
        let mut cart = Cart::new(KES);

        let percent = cart.apply_promo("SAVE10", &PromoBook::boutique())?;

        assert_eq!(percent, 10);
        assert_eq!(cart.promo().map(|promo| promo.percent), Some(10));

        Ok(())
    }

    #[test]
    fn unknown_promo_leaves_applied_promo_untouched() -> TestResult {
        let mut cart = Cart::new(KES);
        let book = PromoBook::boutique();

        let _ = cart.apply_promo("WELCOME15", &book)?;
        let result = cart.apply_promo("BOGUS", &book);

        assert!(matches!(result, Err(PromoError::UnknownCode(_))));
        assert_eq!(cart.promo().map(|promo| promo.percent), Some(15));

        Ok(())
    }

    #[test]
    fn totals_reflect_applied_promo() -> TestResult {
        let mut cart = Cart::with_lines([line("a", 18500, 1)], KES)?;
        let _ = cart.apply_promo("WELCOME15", &PromoBook::boutique())?;

        let derived = cart.totals(&Pricing::boutique())?;

        assert_eq!(derived.discount, Money::from_minor(2775, KES));
        assert_eq!(derived.total, Money::from_minor(18241, KES));

        Ok(())
    }

    #[test]
    fn totals_are_pure_across_repeated_calls() -> TestResult {
        let mut cart = Cart::with_lines([line("a", 4200, 2), line("b", 900, 1)], KES)?;
        let _ = cart.apply_promo("STYLE20", &PromoBook::boutique())?;
        let pricing = Pricing::boutique();

        let first = cart.totals(&pricing)?;
        let second = cart.totals(&pricing)?;

        assert_eq!(first, second);

        Ok(())
    }
}
