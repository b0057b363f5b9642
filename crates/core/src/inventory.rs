//! Inventory ordering and price validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Direction for a display-order swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Towards a lower `display_order` (earlier in the list).
    Up,
    /// Towards a higher `display_order`.
    Down,
}

impl MoveDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// Unit prices are whole yen and never negative.
pub fn validate_unit_price(price: i64) -> Result<(), CoreError> {
    if price < 0 {
        return Err(CoreError::Validation(format!(
            "unit_price must not be negative (got {price})"
        )));
    }
    Ok(())
}

pub fn validate_stock_quantity(quantity: i32) -> Result<(), CoreError> {
    if quantity < 0 {
        return Err(CoreError::Validation(format!(
            "stock_quantity must not be negative (got {quantity})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_lowercase() {
        let d: MoveDirection = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(d, MoveDirection::Up);
        assert!(serde_json::from_str::<MoveDirection>("\"sideways\"").is_err());
    }

    #[test]
    fn reverse_is_an_involution() {
        assert_eq!(MoveDirection::Up.reverse(), MoveDirection::Down);
        assert_eq!(MoveDirection::Up.reverse().reverse(), MoveDirection::Up);
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(validate_unit_price(0).is_ok());
        assert!(validate_unit_price(-1).is_err());
        assert!(validate_stock_quantity(-3).is_err());
    }
}
