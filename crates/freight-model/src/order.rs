//! External order records and the product-quantity vector.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tracked product categories, in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Large,
    Medium,
    Baby,
    XlOrWtd,
    LgPetBed,
    PillowSquare,
    PillowLumbar,
    GiftBag,
    Other,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 9] = [
        ProductCategory::Large,
        ProductCategory::Medium,
        ProductCategory::Baby,
        ProductCategory::XlOrWtd,
        ProductCategory::LgPetBed,
        ProductCategory::PillowSquare,
        ProductCategory::PillowLumbar,
        ProductCategory::GiftBag,
        ProductCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Large => "large",
            ProductCategory::Medium => "medium",
            ProductCategory::Baby => "baby",
            ProductCategory::XlOrWtd => "xl_or_wtd",
            ProductCategory::LgPetBed => "lg_pet_bed",
            ProductCategory::PillowSquare => "pillow_square",
            ProductCategory::PillowLumbar => "pillow_lumbar",
            ProductCategory::GiftBag => "gift_bag",
            ProductCategory::Other => "other",
        }
    }

    /// Blanket categories roll up into the blanket-level averages.
    pub fn is_blanket(&self) -> bool {
        matches!(
            self,
            ProductCategory::Large
                | ProductCategory::Medium
                | ProductCategory::Baby
                | ProductCategory::XlOrWtd
        )
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether gift bags count as full units in the cost-per-product
/// denominator. The `other` category never counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftBagWeighting {
    #[default]
    Full,
    Excluded,
}

/// Per-order unit counts for each tracked product category.
///
/// The exact combination of counts is the grouping identity for cost
/// aggregation, so the type is ordered and hashable.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct QuantityVector {
    pub large: u32,
    pub medium: u32,
    pub baby: u32,
    pub xl_or_wtd: u32,
    pub lg_pet_bed: u32,
    pub pillow_square: u32,
    pub pillow_lumbar: u32,
    pub gift_bag: u32,
    pub other: u32,
}

impl QuantityVector {
    pub fn get(&self, category: ProductCategory) -> u32 {
        match category {
            ProductCategory::Large => self.large,
            ProductCategory::Medium => self.medium,
            ProductCategory::Baby => self.baby,
            ProductCategory::XlOrWtd => self.xl_or_wtd,
            ProductCategory::LgPetBed => self.lg_pet_bed,
            ProductCategory::PillowSquare => self.pillow_square,
            ProductCategory::PillowLumbar => self.pillow_lumbar,
            ProductCategory::GiftBag => self.gift_bag,
            ProductCategory::Other => self.other,
        }
    }

    pub fn total_units(&self) -> u32 {
        ProductCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    pub fn blanket_units(&self) -> u32 {
        ProductCategory::ALL
            .iter()
            .filter(|c| c.is_blanket())
            .map(|c| self.get(*c))
            .sum()
    }

    /// Units that divide an order's shipping cost into a per-product cost.
    ///
    /// `other` is always excluded; gift bags follow the policy.
    pub fn billable_units(&self, gift_bag: GiftBagWeighting) -> u32 {
        let gift = match gift_bag {
            GiftBagWeighting::Full => self.gift_bag,
            GiftBagWeighting::Excluded => 0,
        };
        self.total_units() - self.other - self.gift_bag + gift
    }

    pub fn is_empty(&self) -> bool {
        self.total_units() == 0
    }
}

/// One external order, supplied whole for the run's timeframe.
///
/// Read-only to the pipeline: quantities and line value come from the order
/// system and are never re-derived from shipping data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub customer_name: String,
    pub quantities: QuantityVector,
    pub total_line_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billable_units_exclude_other_and_follow_gift_bag_policy() {
        let vector = QuantityVector {
            large: 2,
            gift_bag: 3,
            other: 4,
            ..QuantityVector::default()
        };
        assert_eq!(vector.total_units(), 9);
        assert_eq!(vector.billable_units(GiftBagWeighting::Full), 5);
        assert_eq!(vector.billable_units(GiftBagWeighting::Excluded), 2);
    }

    #[test]
    fn blanket_units_cover_the_four_blanket_categories() {
        let vector = QuantityVector {
            large: 1,
            medium: 1,
            baby: 1,
            xl_or_wtd: 1,
            pillow_square: 5,
            ..QuantityVector::default()
        };
        assert_eq!(vector.blanket_units(), 4);
    }
}
