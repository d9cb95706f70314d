//! Product stock adjustments made by checkout and cancellation.

use sqlx::{Postgres, Transaction, query};

use crate::domain::{columns::count_to_i32, products::records::ProductUuid};

const DECREMENT_STOCK_SQL: &str = include_str!("../sql/decrement_stock.sql");
const RESTORE_STOCK_SQL: &str = include_str!("../sql/restore_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStockRepository;

impl PgStockRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Takes `quantity` units from a live product. Zero rows means the stock was short.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(count_to_i32(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn restore_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RESTORE_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(count_to_i32(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
