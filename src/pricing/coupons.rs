//! Coupons
//!
//! A fixed table of known codes and the coupon-entry state the checkout form keeps.

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// What a coupon does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponKind {
    /// Percentage points off the subtotal.
    Percentage(u32),

    /// A flat amount off the order in minor units. Not capped at the order value.
    Fixed(i64),

    /// Shipping is free; the subtotal is untouched.
    FreeShipping,
}

/// A named discount rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coupon {
    /// Upper-case code
    pub code: &'static str,

    /// Discount rule
    pub kind: CouponKind,
}

/// Every code the store accepts.
pub const COUPONS: [Coupon; 3] = [
    Coupon {
        code: "FRESH10",
        kind: CouponKind::Percentage(10),
    },
    Coupon {
        code: "FLAT50",
        kind: CouponKind::Fixed(50_00),
    },
    Coupon {
        code: "FREESHIP",
        kind: CouponKind::FreeShipping,
    },
];

/// Look up a code, ignoring case and surrounding whitespace.
pub fn find_coupon(code: &str) -> Option<Coupon> {
    let code = code.trim();

    COUPONS
        .iter()
        .find(|coupon| coupon.code.eq_ignore_ascii_case(code))
        .copied()
}

/// Errors applying a coupon code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    /// Nothing was entered.
    #[error("enter a coupon code")]
    Empty,

    /// The code is not in the coupon table.
    #[error("invalid coupon code: {0}")]
    Unknown(String),
}

/// Feedback shown next to the coupon field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CouponStatus {
    /// No feedback
    #[default]
    Idle,

    /// A code was applied.
    Applied(&'static str),

    /// The last code entered was not recognised.
    Invalid,

    /// The coupon was removed.
    Removed,
}

impl fmt::Display for CouponStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => Ok(()),
            Self::Applied(code) => write!(f, "Coupon '{code}' applied successfully!"),
            Self::Invalid => f.write_str("Invalid coupon code."),
            Self::Removed => f.write_str("Coupon removed."),
        }
    }
}

/// Coupon field state: the typed code, the applied coupon and feedback.
///
/// An unrecognised code clears any coupon that was already applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponEntry {
    code: String,
    applied: Option<Coupon>,
    status: CouponStatus,
}

impl CouponEntry {
    /// An empty field with no coupon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `code` against the coupon table and apply it, replacing any previous coupon.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::Empty`] without touching the state if `code` is blank, or
    /// [`CouponError::Unknown`] after clearing the applied coupon if it matches nothing.
    pub fn apply(&mut self, code: &str) -> Result<Coupon, CouponError> {
        if code.trim().is_empty() {
            return Err(CouponError::Empty);
        }

        self.code = code.to_string();

        match find_coupon(code) {
            Some(coupon) => {
                debug!(code = coupon.code, "applied coupon");

                self.applied = Some(coupon);
                self.status = CouponStatus::Applied(coupon.code);

                Ok(coupon)
            }
            None => {
                debug!(code, "rejected coupon");

                self.applied = None;
                self.status = CouponStatus::Invalid;

                Err(CouponError::Unknown(code.trim().to_string()))
            }
        }
    }

    /// Drop the applied coupon and the typed code.
    pub fn remove(&mut self) {
        self.code.clear();
        self.applied = None;
        self.status = CouponStatus::Removed;
    }

    /// Forget everything, including feedback.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clear feedback only.
    pub fn clear_status(&mut self) {
        self.status = CouponStatus::Idle;
    }

    /// The applied coupon, if any.
    pub fn applied(&self) -> Option<Coupon> {
        self.applied
    }

    /// The code as typed.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Current feedback.
    pub fn status(&self) -> &CouponStatus {
        &self.status
    }
}
