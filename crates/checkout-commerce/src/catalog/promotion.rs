//! Promotion rules and the static promotion catalog.

use crate::ids::{ProductId, PromotionId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Type-specific parameters of a promotion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PromotionKind {
    /// Percentage off the item subtotal (0.0 - 100.0).
    PercentageDiscount { percentage: f64 },
    /// Fixed amount off, applied verbatim (not scaled by quantity).
    FixedAmountDiscount { amount: Money },
    /// Buy X get Y free.
    BuyXGetYFree {
        required_quantity: i64,
        free_quantity: i64,
    },
    /// Fixed discount on carts whose subtotal reaches the threshold.
    /// Applied at cart level only.
    MinimumPurchase { threshold: Money, discount: Money },
}

/// A reusable promotion rule.
///
/// Scope is the union of `applicable_product_ids` and
/// `applicable_categories`; when both are empty the promotion applies
/// universally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Promotion {
    /// Unique promotion identifier.
    pub id: PromotionId,
    /// Display name.
    pub name: String,
    /// Description for display.
    pub description: Option<String>,
    /// Type-specific discount parameters.
    pub kind: PromotionKind,
    /// Product ids this promotion is restricted to.
    pub applicable_product_ids: Vec<ProductId>,
    /// Categories this promotion is restricted to.
    pub applicable_categories: Vec<String>,
    /// Whether the promotion is active.
    pub active: bool,
}

impl Promotion {
    /// Create a new promotion of the given kind, unscoped and active.
    pub fn new(id: impl Into<PromotionId>, name: impl Into<String>, kind: PromotionKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            kind,
            applicable_product_ids: Vec::new(),
            applicable_categories: Vec::new(),
            active: true,
        }
    }

    /// Create a percentage discount promotion.
    pub fn percentage(
        id: impl Into<PromotionId>,
        name: impl Into<String>,
        percentage: f64,
    ) -> Self {
        Self::new(id, name, PromotionKind::PercentageDiscount { percentage })
    }

    /// Create a fixed amount discount promotion.
    pub fn fixed_amount(id: impl Into<PromotionId>, name: impl Into<String>, amount: Money) -> Self {
        Self::new(id, name, PromotionKind::FixedAmountDiscount { amount })
    }

    /// Create a buy-X-get-Y-free promotion.
    pub fn buy_x_get_y_free(
        id: impl Into<PromotionId>,
        name: impl Into<String>,
        required_quantity: i64,
        free_quantity: i64,
    ) -> Self {
        Self::new(
            id,
            name,
            PromotionKind::BuyXGetYFree {
                required_quantity,
                free_quantity,
            },
        )
    }

    /// Create a minimum-purchase promotion.
    pub fn minimum_purchase(
        id: impl Into<PromotionId>,
        name: impl Into<String>,
        threshold: Money,
        discount: Money,
    ) -> Self {
        Self::new(
            id,
            name,
            PromotionKind::MinimumPurchase {
                threshold,
                discount,
            },
        )
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict the promotion to specific product ids.
    pub fn for_products(mut self, product_ids: Vec<ProductId>) -> Self {
        self.applicable_product_ids = product_ids;
        self
    }

    /// Restrict the promotion to specific categories.
    pub fn for_categories(mut self, categories: Vec<String>) -> Self {
        self.applicable_categories = categories;
        self
    }

    /// Deactivate the promotion.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Check if the promotion has no scope restriction.
    pub fn is_unscoped(&self) -> bool {
        self.applicable_product_ids.is_empty() && self.applicable_categories.is_empty()
    }

    /// Check whether this promotion applies to the given product or
    /// category. An unscoped promotion applies to everything; a scoped
    /// promotion applies when either dimension matches.
    pub fn applies_to(&self, product_id: Option<&ProductId>, category: Option<&str>) -> bool {
        if let Some(product_id) = product_id {
            if self.applicable_product_ids.contains(product_id) {
                return true;
            }
        }

        if let Some(category) = category {
            if self.applicable_categories.iter().any(|c| c == category) {
                return true;
            }
        }

        self.is_unscoped()
    }

    /// Description for display, falling back to the name.
    pub fn description_or_name(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }
}

/// Read-only, insertion-ordered list of promotion rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromotionCatalog {
    promotions: Vec<Promotion>,
}

impl PromotionCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            promotions: Vec::new(),
        }
    }

    /// Create a catalog populated with the demo seed data.
    pub fn with_seed_data() -> Self {
        let mut catalog = Self::new();

        // 20% off Electronics
        catalog.push(
            Promotion::percentage("PROMO001", "Electronics Sale", 20.0)
                .with_description("20% off all Electronics")
                .for_categories(vec!["Electrónicos".to_string()]),
        );

        // Buy 2 get 1 free on coffee
        catalog.push(
            Promotion::buy_x_get_y_free("PROMO002", "Coffee Special", 2, 1)
                .with_description("Buy 2 Coffee get 1 free")
                .for_products(vec![ProductId::new("PROD004")]),
        );

        // $9000 off on purchases over $90000
        catalog.push(
            Promotion::minimum_purchase(
                "PROMO003",
                "Minimum Purchase Discount",
                Money::new(90_000, Currency::CLP),
                Money::new(9_000, Currency::CLP),
            )
            .with_description("$9000 off on purchases over $90000"),
        );

        // Fixed $15000 discount on Footwear
        catalog.push(
            Promotion::fixed_amount(
                "PROMO004",
                "Footwear Discount",
                Money::new(15_000, Currency::CLP),
            )
            .with_description("$15000 off all Footwear")
            .for_categories(vec!["Calzado".to_string()]),
        );

        catalog
    }

    /// Append a promotion, preserving insertion order.
    pub fn push(&mut self, promotion: Promotion) {
        self.promotions.push(promotion);
    }

    /// Active promotions, in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &Promotion> {
        self.promotions.iter().filter(|p| p.active)
    }

    /// Active promotions applicable to the given product or category,
    /// in insertion order. No priority or stacking resolution happens
    /// here; all matches are returned.
    pub fn applicable(
        &self,
        product_id: Option<&ProductId>,
        category: Option<&str>,
    ) -> Vec<&Promotion> {
        self.active()
            .filter(|p| p.applies_to(product_id, category))
            .collect()
    }

    /// Number of promotions, including inactive ones.
    pub fn len(&self) -> usize {
        self.promotions.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.promotions.is_empty()
    }
}
