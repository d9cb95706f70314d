//! Promotions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    domain::{
        columns::{
            count_to_i32, try_get_count, try_get_optional_count, try_get_optional_timestamp,
            try_get_timestamp,
        },
        promotions::{
            data::NewPromotion,
            records::{PromotionRecord, PromotionUuid},
        },
    },
    pagination::Page,
};

const LIST_PROMOTIONS_SQL: &str = include_str!("sql/list_promotions.sql");
const GET_PROMOTION_SQL: &str = include_str!("sql/get_promotion.sql");
const GET_PROMOTION_BY_CODE_SQL: &str = include_str!("sql/get_promotion_by_code.sql");
const LOCK_PROMOTION_BY_CODE_SQL: &str = include_str!("sql/lock_promotion_by_code.sql");
const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const INCREMENT_PROMOTION_USAGE_SQL: &str = include_str!("sql/increment_promotion_usage.sql");
const DELETE_PROMOTION_SQL: &str = include_str!("sql/delete_promotion.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: Page,
    ) -> Result<Vec<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(LIST_PROMOTIONS_SQL)
            .bind(page.offset_i64())
            .bind(page.limit_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(GET_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_promotion_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<PromotionRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(GET_PROMOTION_BY_CODE_SQL)
            .bind(code)
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetches a promotion by code and holds a row lock until the transaction ends.
    pub(crate) async fn lock_promotion_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<PromotionRecord>, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(LOCK_PROMOTION_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, sqlx::Error> {
        let max_uses_i32 = promotion
            .max_uses
            .map(|max_uses| count_to_i32(max_uses, "max_uses"))
            .transpose()?;

        query_as::<Postgres, PromotionRecord>(CREATE_PROMOTION_SQL)
            .bind(promotion.uuid.into_uuid())
            .bind(promotion.code)
            .bind(promotion.description)
            .bind(promotion.discount_percent)
            .bind(SqlxTimestamp::from(promotion.starts_at))
            .bind(promotion.ends_at.map(SqlxTimestamp::from))
            .bind(max_uses_i32)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn increment_promotion_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_PROMOTION_USAGE_SQL)
            .bind(promotion.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PromotionUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            description: row.try_get("description")?,
            discount_percent: row.try_get("discount_percent")?,
            starts_at: try_get_timestamp(row, "starts_at")?,
            ends_at: try_get_optional_timestamp(row, "ends_at")?,
            max_uses: try_get_optional_count(row, "max_uses")?,
            times_used: try_get_count(row, "times_used")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
