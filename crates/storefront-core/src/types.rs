//! # Domain Types
//!
//! Core domain types for the four entity collections.
//!
//! ## Three Tiers Per Entity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  CategoryDraft      wire input; raw text, id defaults to 0      │
//! │       │   validation rules (validation.rs)                      │
//! │       ▼                                                         │
//! │  NewCategory        validated candidate, no id yet              │
//! │       │   store insert (assigns the surrogate id)               │
//! │       ▼                                                         │
//! │  Category           persisted record, id immutable              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Drafts keep prices and totals as raw text so malformed numerics are
//! reported by the validation rules (`InvalidFormat`) instead of dying
//! inside deserialization. String fields default to empty so a missing
//! field surfaces as a `MissingField` violation, not a serde error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::price::Price;

// =============================================================================
// Category
// =============================================================================

/// A persisted product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A validated category candidate, not yet persisted.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

/// Incoming category record as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    /// Ignored on create; must match the path id on update.
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Product
// =============================================================================

/// A persisted product. `category_id` always references an existing
/// category; the integrity service enforces it on create and never
/// repoints it on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub stock: i64,
}

/// A validated product candidate.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub stock: i64,
}

/// Incoming product record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub category_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw decimal text; validated before parsing into [`Price`].
    #[serde(default, deserialize_with = "decimal_text")]
    pub price: String,
    #[serde(default)]
    pub stock: i64,
}

// =============================================================================
// Sale
// =============================================================================

/// A persisted sale. `product_id` is a soft reference: the product must
/// exist at create time but stays deletable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub sale_date: DateTime<Utc>,
    pub total: Price,
}

/// A sale with its eagerly loaded product snapshot. The product is
/// `None` when it has been deleted since the sale was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithProduct {
    #[serde(flatten)]
    pub sale: Sale,
    pub product: Option<Product>,
}

/// A validated sale candidate.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub product_id: i64,
    pub quantity: i64,
    pub sale_date: DateTime<Utc>,
    pub total: Price,
}

/// Incoming sale record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub product_id: i64,
    #[serde(default)]
    pub quantity: i64,
    /// Optional at the wire level so absence becomes a MissingField
    /// violation rather than a deserialization error.
    #[serde(default)]
    pub sale_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "decimal_text")]
    pub total: String,
}

// =============================================================================
// Customer
// =============================================================================

/// A persisted customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// A validated customer candidate.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Incoming customer record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

// =============================================================================
// Helpers
// =============================================================================

/// Accepts a JSON number or string and keeps it as raw text for the
/// validation rules to judge.
fn decimal_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    use serde::de::{Error, Visitor};
    use std::fmt;

    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a decimal number or string")
        }

        fn visit_str<E: Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_f64<E: Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_none<E: Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_unit<E: Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults_missing_fields() {
        let draft: ProductDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(draft.id, 0);
        assert_eq!(draft.price, "");
        assert_eq!(draft.stock, 0);
    }

    #[test]
    fn draft_price_accepts_number_and_string() {
        let draft: ProductDraft =
            serde_json::from_str(r#"{"name":"Chair","categoryId":1,"price":49.99,"stock":10}"#)
                .unwrap();
        assert_eq!(draft.price, "49.99");

        let draft: ProductDraft =
            serde_json::from_str(r#"{"name":"Chair","categoryId":1,"price":"49,99","stock":10}"#)
                .unwrap();
        assert_eq!(draft.price, "49,99");
    }

    #[test]
    fn sale_with_product_flattens_on_the_wire() {
        let sale = SaleWithProduct {
            sale: Sale {
                id: 1,
                product_id: 2,
                quantity: 3,
                sale_date: "2999-01-01T00:00:00Z".parse().unwrap(),
                total: Price::from_cents(900),
            },
            product: None,
        };
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["productId"], 2);
        assert!(json["product"].is_null());
    }
}
