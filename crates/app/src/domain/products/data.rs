//! Products Data

use crate::domain::{categories::records::CategoryUuid, products::records::ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub old_price: Option<u64>,
    pub stock: u32,
    pub image: Option<String>,
    pub sku: String,
}

/// Product Update Data
///
/// Replaces every mutable field of a live product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub old_price: Option<u64>,
    pub stock: u32,
    pub image: Option<String>,
    pub sku: String,
}

/// Product listing filter
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<CategoryUuid>,
}
