//! Product Records

use jiff::Timestamp;

use crate::{domain::categories::records::CategoryUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: Option<String>,

    /// Price in minor units.
    pub price: u64,

    /// Previous price in minor units, shown as a strike-through.
    pub old_price: Option<u64>,

    pub stock: u32,
    pub image: Option<String>,
    pub sku: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
