//! Products Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    domain::{
        categories::records::CategoryUuid,
        columns::{
            amount_to_i64, count_to_i32, try_get_amount, try_get_count, try_get_optional_amount,
            try_get_optional_timestamp, try_get_timestamp,
        },
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            records::{ProductRecord, ProductUuid},
        },
    },
    pagination::Page,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ProductFilter,
        page: Page,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category.map(CategoryUuid::into_uuid))
            .bind(page.offset_i64())
            .bind(page.limit_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        let price_i64 = amount_to_i64(product.price, "price")?;
        let old_price_i64 = product
            .old_price
            .map(|old_price| amount_to_i64(old_price, "old_price"))
            .transpose()?;
        let stock_i32 = count_to_i32(product.stock, "stock")?;

        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.category_uuid.into_uuid())
            .bind(product.name)
            .bind(product.description)
            .bind(price_i64)
            .bind(old_price_i64)
            .bind(stock_i32)
            .bind(product.image)
            .bind(product.sku)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let price_i64 = amount_to_i64(update.price, "price")?;
        let old_price_i64 = update
            .old_price
            .map(|old_price| amount_to_i64(old_price, "old_price"))
            .transpose()?;
        let stock_i32 = count_to_i32(update.stock, "stock")?;

        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.category_uuid.into_uuid())
            .bind(update.name)
            .bind(update.description)
            .bind(price_i64)
            .bind(old_price_i64)
            .bind(stock_i32)
            .bind(update.image)
            .bind(update.sku)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: try_get_amount(row, "price")?,
            old_price: try_get_optional_amount(row, "old_price")?,
            stock: try_get_count(row, "stock")?,
            image: row.try_get("image")?,
            sku: row.try_get("sku")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
            deleted_at: try_get_optional_timestamp(row, "deleted_at")?,
        })
    }
}
