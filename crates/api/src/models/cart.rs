//! Cart line types and subtotal arithmetic.

use rust_decimal::Decimal;

use orchard_core::ProductId;

/// One cart line joined with its product, priced at read time.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Sum of line totals across a cart, before any discount.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(unit_price: &str, quantity: i32) -> CartLine {
        CartLine {
            product_id: ProductId::new(1),
            name: "Ceramic mug".to_owned(),
            unit_price: unit_price.parse().unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_line_total_multiplies_price_by_quantity() {
        assert_eq!(line("19.99", 3).line_total(), "59.97".parse().unwrap());
    }

    #[test]
    fn test_line_total_single_unit() {
        assert_eq!(line("5.00", 1).line_total(), "5.00".parse().unwrap());
    }

    #[test]
    fn test_subtotal_sums_lines() {
        let lines = vec![line("10.00", 2), line("2.50", 4)];
        assert_eq!(subtotal(&lines), "30.00".parse().unwrap());
    }

    #[test]
    fn test_subtotal_of_empty_cart_is_zero() {
        assert_eq!(subtotal(&[]), Decimal::ZERO);
    }
}
