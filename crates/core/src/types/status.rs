//! Status and discount enums for orders and coupons.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// New orders start as `Pending`; the remaining states are driven by
/// fulfillment collaborators outside this API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// Whether an order in this status can still be removed.
    ///
    /// Only orders that have not started processing are removable.
    #[must_use]
    pub const fn is_removable(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Canceled => write!(f, "canceled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "canceled" => Ok(Self::Canceled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "discount_type", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Subtract the value from the total.
    Fixed,
    /// Reduce the total by the value as a percentage.
    Percent,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_is_removable() {
        assert!(OrderStatus::Pending.is_removable());
        assert!(!OrderStatus::Processing.is_removable());
        assert!(!OrderStatus::Shipped.is_removable());
        assert!(!OrderStatus::Delivered.is_removable());
        assert!(!OrderStatus::Canceled.is_removable());
    }

    #[test]
    fn test_status_display_from_str_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Canceled,
        ] {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_discount_type_serde() {
        assert_eq!(
            serde_json::to_string(&DiscountType::Fixed).unwrap(),
            "\"fixed\""
        );
        assert_eq!(
            serde_json::from_str::<DiscountType>("\"percent\"").unwrap(),
            DiscountType::Percent
        );
    }
}
