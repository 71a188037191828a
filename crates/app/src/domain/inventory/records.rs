//! Inventory Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{auth::UserId, domain::products::records::ProductId, ids::TypedId};

/// Movement Record
pub struct MovementRecord;

/// Movement Id
pub type MovementId = TypedId<MovementRecord>;

/// Source of a stock movement, stored in `inventario_movimientos.tipo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKind {
    Adjustment,
    Sale,
    Entry,
}

impl MovementKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adjustment => "ajuste",
            Self::Sale => "venta",
            Self::Entry => "entrada",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown movement kind {0:?}")]
pub struct UnknownMovementKind(pub String);

impl FromStr for MovementKind {
    type Err = UnknownMovementKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ajuste" => Ok(Self::Adjustment),
            "venta" => Ok(Self::Sale),
            "entrada" => Ok(Self::Entry),
            other => Err(UnknownMovementKind(other.to_string())),
        }
    }
}

/// A product joined with its stock row and catalog names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub product_id: ProductId,
    pub code: String,
    pub name: String,
    pub sale_price: Decimal,
    pub purchase_price: Decimal,
    pub image_url: Option<String>,
    pub minimum_stock: i32,
    pub active: bool,
    pub current_quantity: Option<i32>,
    pub last_updated_at: Option<Timestamp>,
    pub category_name: Option<String>,
    pub brand_name: Option<String>,
}

/// One row of the append-only movement log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub id: MovementId,
    pub product_id: ProductId,
    pub product_name: Option<String>,
    pub user_id: Option<UserId>,
    pub user_name: Option<String>,
    pub kind: MovementKind,
    pub quantity: i32,
    pub note: Option<String>,
    pub recorded_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_kinds_round_trip_through_stored_names() {
        for kind in [
            MovementKind::Adjustment,
            MovementKind::Sale,
            MovementKind::Entry,
        ] {
            assert_eq!(kind.as_str().parse::<MovementKind>(), Ok(kind));
        }

        assert!("devolucion".parse::<MovementKind>().is_err());
    }
}
