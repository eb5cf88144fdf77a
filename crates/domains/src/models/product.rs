//! Marketplace catalog records and their field rules.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, Result};

/// What kind of seller stands behind a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerType {
    Vendor,
    Farmer,
}

impl SellerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::Farmer => "farmer",
        }
    }
}

impl fmt::Display for SellerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SellerType {
    type Err = DomainError;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "vendor" => Ok(Self::Vendor),
            "farmer" => Ok(Self::Farmer),
            other => Err(DomainError::validation(format!(
                "unknown seller type: {other}"
            ))),
        }
    }
}

/// A quantity-threshold price break: "buy at least `quantity`, pay `price`".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDiscount {
    pub quantity: i64,
    pub price: Decimal,
}

/// A sellable item in the marketplace catalog.
///
/// `seller_id` references a user by identity only; there is no ownership
/// relation, and `seller_name` is a client-supplied denormalized copy.
/// `city` is derived from the referenced seller at write time and may stay
/// unset when the seller is unknown or has no city on file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
    pub images: Vec<String>,
    pub category: String,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub seller_type: SellerType,
    pub certification: Option<String>,
    pub minimum_order: i64,
    pub bulk_discounts: Vec<BulkDiscount>,
    pub city: Option<String>,
    pub view_count: i64,
    pub order_count: i64,
    pub last_order_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Field rules re-checked before any overwrite reaches storage.
    pub fn validate(&self) -> Result<()> {
        require("Product name", &self.name)?;
        require("Product description", &self.description)?;
        require("Product category", &self.category)?;
        require("Seller name", &self.seller_name)?;
        check_amounts(self.price, self.quantity, self.minimum_order)
    }

    /// Overlays the provided fields; `None` entries keep their current
    /// value. Counters and timestamps are never touched here.
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
        }
        if let Some(images) = changes.images {
            self.images = images;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(seller_id) = changes.seller_id {
            self.seller_id = seller_id;
        }
        if let Some(seller_name) = changes.seller_name {
            self.seller_name = seller_name;
        }
        if let Some(seller_type) = changes.seller_type {
            self.seller_type = seller_type;
        }
        if let Some(certification) = changes.certification {
            self.certification = Some(certification);
        }
        if let Some(minimum_order) = changes.minimum_order {
            self.minimum_order = minimum_order;
        }
        if let Some(bulk_discounts) = changes.bulk_discounts {
            self.bulk_discounts = bulk_discounts;
        }
    }
}

/// The fields accepted when listing a new product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub seller_type: SellerType,
    #[serde(default)]
    pub certification: Option<String>,
    #[serde(default = "default_minimum_order")]
    pub minimum_order: i64,
    #[serde(default)]
    pub bulk_discounts: Vec<BulkDiscount>,
}

fn default_minimum_order() -> i64 {
    1
}

impl NewProduct {
    /// Field rules enforced before persistence is attempted.
    pub fn validate(&self) -> Result<()> {
        require("Product name", &self.name)?;
        require("Product description", &self.description)?;
        require("Product category", &self.category)?;
        require("Seller name", &self.seller_name)?;
        check_amounts(self.price, self.quantity, self.minimum_order)
    }
}

/// A partial overwrite of an existing product. `None` fields keep their
/// current value; there is no optimistic-concurrency handling beyond
/// last-writer-wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub seller_id: Option<Uuid>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub seller_type: Option<SellerType>,
    #[serde(default)]
    pub certification: Option<String>,
    #[serde(default)]
    pub minimum_order: Option<i64>,
    #[serde(default)]
    pub bulk_discounts: Option<Vec<BulkDiscount>>,
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn check_amounts(price: Decimal, quantity: i64, minimum_order: i64) -> Result<()> {
    if price.is_sign_negative() {
        return Err(DomainError::validation("Price cannot be negative"));
    }
    if quantity < 0 {
        return Err(DomainError::validation("Quantity cannot be negative"));
    }
    if minimum_order < 1 {
        return Err(DomainError::validation("Minimum order must be at least 1"));
    }
    Ok(())
}
