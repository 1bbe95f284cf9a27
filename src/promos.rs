//! Promo codes

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors related to promo code lookup and registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoError {
    /// The code is not present in the book.
    #[error("unknown promo code: {0}")]
    UnknownCode(String),

    /// A percent-off value outside 0–100 was registered.
    #[error("invalid percent-off value: {0}")]
    InvalidPercent(u8),
}

/// A promo code that has been validated against a [`PromoBook`] and applied
/// to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedPromo {
    /// The code as it was looked up.
    pub code: String,

    /// Whole-number percent off the subtotal, 0–100.
    pub percent: u8,
}

/// Static table of promo codes and their percent-off values.
///
/// Codes are stored uppercase by convention and looked up case-sensitively;
/// normalising user input is the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct PromoBook {
    codes: FxHashMap<String, u8>,
}

impl PromoBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        PromoBook {
            codes: FxHashMap::default(),
        }
    }

    /// The storefront's standing promo codes.
    #[must_use]
    pub fn boutique() -> Self {
        let mut codes = FxHashMap::default();

        for (code, percent) in [("SAVE10", 10), ("WELCOME15", 15), ("STYLE20", 20)] {
            codes.insert(code.to_string(), percent);
        }

        PromoBook { codes }
    }

    /// Register a code with a whole-number percent off.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::InvalidPercent`] if `percent` exceeds 100.
    pub fn register(&mut self, code: impl Into<String>, percent: u8) -> Result<(), PromoError> {
        if percent > 100 {
            return Err(PromoError::InvalidPercent(percent));
        }

        self.codes.insert(code.into(), percent);

        Ok(())
    }

    /// Look up the percent off for a code.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::UnknownCode`] if the code is not in the book.
    pub fn percent_off(&self, code: &str) -> Result<u8, PromoError> {
        self.codes
            .get(code)
            .copied()
            .ok_or_else(|| PromoError::UnknownCode(code.to_string()))
    }

    /// Number of codes in the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check whether the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
