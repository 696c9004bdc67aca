//! Product type and the static product catalog.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A sellable product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier (SKU).
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price. Strictly positive.
    pub price: Money,
    /// Category the product belongs to.
    pub category: String,
    /// Optional description.
    pub description: Option<String>,
    /// Whether promotions may apply to this product.
    pub eligible_for_promotions: bool,
}

impl Product {
    /// Create a new promotion-eligible product.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        debug_assert!(price.is_positive(), "product price must be positive");
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            description: None,
            eligible_for_promotions: true,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Exclude this product from promotions.
    pub fn not_eligible_for_promotions(mut self) -> Self {
        self.eligible_for_promotions = false;
        self
    }
}

/// Read-only mapping from product identifier to product record.
///
/// Populated once at construction; lookups during pricing that miss
/// abort the whole checkout with a "product not found" error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    products: HashMap<ProductId, Product>,
}

impl ProductCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
        }
    }

    /// Create a catalog populated with the demo seed data.
    pub fn with_seed_data() -> Self {
        let mut catalog = Self::new();

        catalog.insert(
            Product::new(
                "p-001",
                "Smartphone Samsung Galaxy",
                Money::new(809_991, Currency::CLP),
                "Electrónicos",
            )
            .with_description("Latest Samsung Galaxy smartphone"),
        );
        catalog.insert(
            Product::new(
                "p-010",
                "Laptop Dell XPS 13",
                Money::new(1_169_991, Currency::CLP),
                "Electrónicos",
            )
            .with_description("High-performance ultrabook"),
        );
        catalog.insert(
            Product::new(
                "p-003",
                "Nike Air Max Sneakers",
                Money::new(116_991, Currency::CLP),
                "Calzado",
            )
            .with_description("Comfortable running shoes"),
        );
        catalog.insert(
            Product::new(
                "PROD004",
                "Organic Coffee Beans",
                Money::new(22_491, Currency::CLP),
                "Alimentos",
            )
            .with_description("Premium organic coffee beans"),
        );
        catalog.insert(
            Product::new(
                "PROD005",
                "Wireless Headphones",
                Money::new(179_991, Currency::CLP),
                "Electrónicos",
            )
            .with_description("Noise-cancelling wireless headphones"),
        );

        catalog
    }

    /// Add a product to the catalog. Replaces any product with the same id.
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    /// Look up a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// All products, keyed by id.
    pub fn all(&self) -> &HashMap<ProductId, Product> {
        &self.products
    }

    /// Products grouped by category.
    pub fn grouped_by_category(&self) -> HashMap<&str, Vec<&Product>> {
        let mut grouped: HashMap<&str, Vec<&Product>> = HashMap::new();
        for product in self.products.values() {
            grouped
                .entry(product.category.as_str())
                .or_default()
                .push(product);
        }
        grouped
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
