//! Pricing

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::lines::CartLine;

/// Errors that can occur while deriving cart totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalsError {
    /// A single line's total overflowed i64 minor units.
    #[error("line total for entry {0} overflowed minor units")]
    LineOverflow(String),

    /// Summing or combining totals overflowed i64 minor units.
    #[error("totals arithmetic overflowed minor units")]
    Overflow,

    /// A percent application could not be represented in minor units.
    #[error("percent application overflowed or was not representable")]
    PercentConversion,
}

/// Storefront pricing tunables, all in minor units of the cart currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    /// Shipping is free once the subtotal reaches this amount.
    pub free_shipping_threshold: i64,

    /// Flat fee charged below the free-shipping threshold.
    pub shipping_fee: i64,

    /// Whole-number tax percent applied to the discounted subtotal.
    pub tax_percent: u8,
}

impl Pricing {
    /// The storefront's standing rates: free shipping from 5000 minor units,
    /// a flat 500 fee below that, and 16% tax.
    #[must_use]
    pub fn boutique() -> Self {
        Pricing {
            free_shipping_threshold: 5000,
            shipping_fee: 500,
            tax_percent: 16,
        }
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Pricing::boutique()
    }
}

/// Derived totals for a cart state.
///
/// Always recomputed from the current lines and applied promo; never stored,
/// so the figures cannot drift from the state they describe.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    /// Sum of all line totals.
    pub subtotal: Money<'static, Currency>,

    /// Promo discount taken off the subtotal.
    pub discount: Money<'static, Currency>,

    /// Shipping charge; zero at or above the free-shipping threshold.
    pub shipping: Money<'static, Currency>,

    /// Tax on the discounted subtotal.
    pub tax: Money<'static, Currency>,

    /// `subtotal − discount + shipping + tax`.
    pub total: Money<'static, Currency>,
}

/// Derive totals for a set of cart lines.
///
/// The empty cart yields a zero subtotal, zero discount, zero tax, and the
/// flat shipping fee, so its total equals the fee.
///
/// # Errors
///
/// - [`TotalsError::LineOverflow`]: a line total overflowed minor units.
/// - [`TotalsError::Overflow`]: combining amounts overflowed minor units.
/// - [`TotalsError::PercentConversion`]: a percent application was not
///   representable.
pub fn totals(
    lines: &[CartLine],
    discount_percent: u8,
    pricing: &Pricing,
    currency: &'static Currency,
) -> Result<Totals, TotalsError> {
    let subtotal = lines.iter().try_fold(0i64, |acc, line| {
        let line_minor = line
            .line_total()
            .ok_or_else(|| TotalsError::LineOverflow(line.entry_id().to_string()))?
            .to_minor_units();

        acc.checked_add(line_minor).ok_or(TotalsError::Overflow)
    })?;

    let discount = percent_of_minor(discount_percent, subtotal)?;

    let shipping = if subtotal >= pricing.free_shipping_threshold {
        0
    } else {
        pricing.shipping_fee
    };

    let discounted = subtotal.checked_sub(discount).ok_or(TotalsError::Overflow)?;
    let tax = percent_of_minor(pricing.tax_percent, discounted)?;

    let total = discounted
        .checked_add(shipping)
        .and_then(|value| value.checked_add(tax))
        .ok_or(TotalsError::Overflow)?;

    Ok(Totals {
        subtotal: Money::from_minor(subtotal, currency),
        discount: Money::from_minor(discount, currency),
        shipping: Money::from_minor(shipping, currency),
        tax: Money::from_minor(tax, currency),
        total: Money::from_minor(total, currency),
    })
}

/// Apply a whole-number percent to a minor unit amount, rounding half away
/// from zero.
fn percent_of_minor(percent: u8, minor: i64) -> Result<i64, TotalsError> {
    let Some(fraction) = Decimal::from(percent).checked_div(Decimal::new(100, 0)) else {
        return Err(TotalsError::PercentConversion);
    };

    let Some(minor) = Decimal::from_i64(minor) else {
        unreachable!("always returns `Some` for every `i64`")
    };

    let Some(applied) = fraction.checked_mul(minor) else {
        return Err(TotalsError::PercentConversion);
    };

    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let Some(rounded) = rounded.to_i64() else {
        return Err(TotalsError::PercentConversion);
    };

    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::KES;
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
    fn empty_cart_pays_only_the_shipping_fee() -> TestResult {
        let derived = totals(&[], 0, &Pricing::boutique(), KES)?;

        assert_eq!(derived.subtotal, Money::from_minor(0, KES));
        assert_eq!(derived.discount, Money::from_minor(0, KES));
        assert_eq!(derived.shipping, Money::from_minor(500, KES));
        assert_eq!(derived.tax, Money::from_minor(0, KES));
        assert_eq!(derived.total, Money::from_minor(500, KES));

        Ok(())
    }

    #[test]
    fn subtotal_sums_line_totals() -> TestResult {
        let lines = [line("a", 1000, 2), line("b", 500, 3)];

        let derived = totals(&lines, 0, &Pricing::boutique(), KES)?;

        assert_eq!(derived.subtotal, Money::from_minor(3500, KES));

        Ok(())
    }

    #[test]
    fn shipping_is_free_exactly_at_the_threshold() -> TestResult {
        let pricing = Pricing::boutique();

        let at = totals(&[line("a", 5000, 1)], 0, &pricing, KES)?;
        let below = totals(&[line("a", 4999, 1)], 0, &pricing, KES)?;

        assert_eq!(at.shipping, Money::from_minor(0, KES));
        assert_eq!(below.shipping, Money::from_minor(500, KES));

        Ok(())
    }

    #[test]
    fn tax_applies_to_the_discounted_subtotal() -> TestResult {
        // 18500 - 15% = 15725; 16% of 15725 = 2516.
        let derived = totals(&[line("a", 18500, 1)], 15, &Pricing::boutique(), KES)?;

        assert_eq!(derived.discount, Money::from_minor(2775, KES));
        assert_eq!(derived.tax, Money::from_minor(2516, KES));
        assert_eq!(derived.total, Money::from_minor(18241, KES));

        Ok(())
    }

    #[test]
    fn line_overflow_names_the_entry() {
        let lines = [line("too-big", i64::MAX, 2)];

        let result = totals(&lines, 0, &Pricing::boutique(), KES);

        assert_eq!(result, Err(TotalsError::LineOverflow("too-big".to_string())));
    }

    #[test]
    fn subtotal_sum_overflow_errors() {
        let lines = [line("a", i64::MAX, 1), line("b", 1, 1)];

        let result = totals(&lines, 0, &Pricing::boutique(), KES);

        assert_eq!(result, Err(TotalsError::Overflow));
    }

    #[test]
    fn percent_of_minor_rounds_midpoint_away_from_zero() -> TestResult {
        // 15% of 30 minor units is 4.5, which rounds to 5.
        assert_eq!(percent_of_minor(15, 30)?, 5);

        Ok(())
    }

    #[test]
    fn percent_of_minor_full_discount() -> TestResult {
        assert_eq!(percent_of_minor(100, 18500)?, 18500);

        Ok(())
    }

    #[test]
    fn percent_of_minor_zero_percent() -> TestResult {
        assert_eq!(percent_of_minor(0, 18500)?, 0);

        Ok(())
    }
}
