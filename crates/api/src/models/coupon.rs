//! Coupon validity and discount arithmetic.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use orchard_core::{CouponId, DiscountType};

/// A time- and usage-bounded discount rule identified by a code.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    /// Maximum number of redemptions; unlimited when `None`.
    pub usage_limit: Option<i32>,
    pub used_count: i32,
}

impl Coupon {
    /// Whether the coupon can be redeemed at `now`.
    ///
    /// Both window endpoints are inclusive.
    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.valid_from <= now
            && now <= self.valid_to
            && self.usage_limit.is_none_or(|limit| self.used_count < limit)
    }

    /// The total after applying this coupon to `subtotal`.
    ///
    /// Fixed coupons subtract their value; percent coupons scale the subtotal
    /// and round to cents. The result never goes below zero.
    #[must_use]
    pub fn discount(&self, subtotal: Decimal) -> Decimal {
        let discounted = match self.discount_type {
            DiscountType::Fixed => subtotal - self.discount_value,
            DiscountType::Percent => (subtotal
                * (Decimal::ONE - self.discount_value / Decimal::ONE_HUNDRED))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        };
        discounted.max(Decimal::ZERO)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn coupon(discount_type: DiscountType, value: &str) -> Coupon {
        let now = Utc::now();
        Coupon {
            id: CouponId::new(1),
            code: "SPRING".to_owned(),
            discount_type,
            discount_value: value.parse().unwrap(),
            valid_from: now - Duration::days(1),
            valid_to: now + Duration::days(1),
            usage_limit: None,
            used_count: 0,
        }
    }

    #[test]
    fn test_valid_inside_window_without_limit() {
        assert!(coupon(DiscountType::Fixed, "5.00").is_valid(Utc::now()));
    }

    #[test]
    fn test_window_endpoints_are_inclusive() {
        let c = coupon(DiscountType::Fixed, "5.00");
        assert!(c.is_valid(c.valid_from));
        assert!(c.is_valid(c.valid_to));
        assert!(!c.is_valid(c.valid_from - Duration::seconds(1)));
        assert!(!c.is_valid(c.valid_to + Duration::seconds(1)));
    }

    #[test]
    fn test_usage_limit_boundary() {
        let mut c = coupon(DiscountType::Fixed, "5.00");
        c.usage_limit = Some(3);
        c.used_count = 2;
        assert!(c.is_valid(Utc::now()));
        c.used_count = 3;
        assert!(!c.is_valid(Utc::now()));
    }

    #[test]
    fn test_fixed_discount() {
        let c = coupon(DiscountType::Fixed, "20.00");
        assert_eq!(c.discount("50.00".parse().unwrap()), "30.00".parse().unwrap());
    }

    #[test]
    fn test_percent_discount() {
        let c = coupon(DiscountType::Percent, "10");
        assert_eq!(c.discount("50.00".parse().unwrap()), "45.00".parse().unwrap());
    }

    #[test]
    fn test_percent_discount_rounds_to_cents() {
        let c = coupon(DiscountType::Percent, "15");
        // 33.33 * 0.85 = 28.3305 -> 28.33
        assert_eq!(c.discount("33.33".parse().unwrap()), "28.33".parse().unwrap());
    }

    #[test]
    fn test_fixed_discount_clamps_at_zero() {
        let c = coupon(DiscountType::Fixed, "80.00");
        assert_eq!(c.discount("50.00".parse().unwrap()), Decimal::ZERO);
    }

    #[test]
    fn test_full_percent_discount_reaches_zero() {
        let c = coupon(DiscountType::Percent, "100");
        assert_eq!(c.discount("19.99".parse().unwrap()), "0.00".parse().unwrap());
    }
}
