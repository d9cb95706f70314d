//! Promotions service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    database::Db,
    domain::promotions::{
        data::{NewPromotion, normalise_code},
        errors::PromotionsServiceError,
        records::{PromotionRecord, PromotionUuid},
        repository::PgPromotionsRepository,
    },
    pagination::Page,
};

/// Largest number of decimal places a discount percentage may carry.
const DISCOUNT_PERCENT_SCALE: u32 = 2;

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    repository: PgPromotionsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromotionsRepository::new(),
        }
    }
}

fn validate(promotion: NewPromotion) -> Result<NewPromotion, PromotionsServiceError> {
    let code = normalise_code(&promotion.code);

    let percent_ok = promotion.discount_percent > Decimal::ZERO
        && promotion.discount_percent <= Decimal::ONE_HUNDRED
        && promotion.discount_percent.scale() <= DISCOUNT_PERCENT_SCALE;

    let window_ok = promotion
        .ends_at
        .is_none_or(|ends_at| ends_at > promotion.starts_at);

    if code.is_empty() || !percent_ok || !window_ok || promotion.max_uses == Some(0) {
        return Err(PromotionsServiceError::InvalidData);
    }

    Ok(NewPromotion { code, ..promotion })
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    async fn list_promotions(
        &self,
        page: Page,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotions = self.repository.list_promotions(&mut tx, page).await?;

        tx.commit().await?;

        Ok(promotions)
    }

    async fn get_promotion(
        &self,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotion = self.repository.get_promotion(&mut tx, promotion).await?;

        tx.commit().await?;

        Ok(promotion)
    }

    #[tracing::instrument(
        name = "promotions.service.create_promotion",
        skip(self, promotion),
        fields(promotion_uuid = %promotion.uuid),
        err
    )]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let promotion = validate(promotion)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_promotion(&mut tx, promotion).await?;

        tx.commit().await?;

        info!(promotion_uuid = %created.uuid, code = %created.code, "created promotion");

        Ok(created)
    }

    #[tracing::instrument(
        name = "promotions.service.delete_promotion",
        skip(self),
        fields(promotion_uuid = %promotion),
        err
    )]
    async fn delete_promotion(&self, promotion: PromotionUuid) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_promotion(&mut tx, promotion).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(promotion_uuid = %promotion, "deleted promotion");

        Ok(())
    }

    async fn check_promotion(
        &self,
        code: &str,
        now: Timestamp,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotion = self
            .repository
            .get_promotion_by_code(&mut tx, &normalise_code(code))
            .await?;

        tx.commit().await?;

        promotion.check_redeemable(now)?;

        Ok(promotion)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Retrieves a page of promotions.
    async fn list_promotions(
        &self,
        page: Page,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError>;

    /// Retrieve a single promotion.
    async fn get_promotion(
        &self,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Creates a promotion with a normalised code.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Deletes a promotion no order has redeemed.
    async fn delete_promotion(&self, promotion: PromotionUuid) -> Result<(), PromotionsServiceError>;

    /// Returns the promotion behind `code` if it can be redeemed at `now`.
    async fn check_promotion(
        &self,
        code: &str,
        now: Timestamp,
    ) -> Result<PromotionRecord, PromotionsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::{
        domain::{carts::CartsService, orders::OrdersService},
        test::{
            TestContext,
            helpers::{add_item, create_product, new_order, new_promotion},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_promotion_normalises_code() -> TestResult {
        let ctx = TestContext::new().await;

        let promotion = ctx
            .promotions
            .create_promotion(NewPromotion {
                code: "  spring10 ".to_string(),
                ..new_promotion("unused", Decimal::new(10, 0))
            })
            .await?;

        assert_eq!(promotion.code, "SPRING10");
        assert_eq!(promotion.times_used, 0);

        let fetched = ctx.promotions.get_promotion(promotion.uuid).await?;

        assert_eq!(fetched.discount_percent, Decimal::new(10, 0));

        Ok(())
    }

    #[tokio::test]
    async fn create_promotion_duplicate_code_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.promotions
            .create_promotion(new_promotion("SAVE", Decimal::new(5, 0)))
            .await?;

        let result = ctx
            .promotions
            .create_promotion(new_promotion("save", Decimal::new(15, 0)))
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_promotion_rejects_invalid_percent_and_window() -> TestResult {
        let ctx = TestContext::new().await;
        let base = new_promotion("BAD", Decimal::new(10, 0));

        let candidates = [
            NewPromotion {
                discount_percent: Decimal::ZERO,
                ..base.clone()
            },
            NewPromotion {
                discount_percent: Decimal::new(10001, 2),
                ..base.clone()
            },
            NewPromotion {
                discount_percent: Decimal::new(12345, 3),
                ..base.clone()
            },
            NewPromotion {
                ends_at: Some(base.starts_at.checked_sub(SignedDuration::from_hours(1))?),
                ..base.clone()
            },
            NewPromotion {
                max_uses: Some(0),
                ..base.clone()
            },
            NewPromotion {
                code: "   ".to_string(),
                ..base.clone()
            },
        ];

        for candidate in candidates {
            let result = ctx.promotions.create_promotion(candidate.clone()).await;

            assert!(
                matches!(result, Err(PromotionsServiceError::InvalidData)),
                "expected InvalidData for {candidate:?}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn check_promotion_accepts_redeemable_code_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .promotions
            .create_promotion(new_promotion("WELCOME", Decimal::new(10, 0)))
            .await?;

        let checked = ctx
            .promotions
            .check_promotion("welcome", Timestamp::now())
            .await?;

        assert_eq!(checked.uuid, created.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn check_promotion_reports_why_it_is_not_redeemable() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();
        let hour = SignedDuration::from_hours(1);

        ctx.promotions
            .create_promotion(NewPromotion {
                starts_at: now.checked_add(hour)?,
                ..new_promotion("FUTURE", Decimal::new(10, 0))
            })
            .await?;

        ctx.promotions
            .create_promotion(NewPromotion {
                starts_at: now.checked_sub(SignedDuration::from_hours(2))?,
                ends_at: Some(now.checked_sub(hour)?),
                ..new_promotion("PAST", Decimal::new(10, 0))
            })
            .await?;

        let exhausted = ctx
            .promotions
            .create_promotion(NewPromotion {
                max_uses: Some(1),
                ..new_promotion("ONCE", Decimal::new(10, 0))
            })
            .await?;

        sqlx::query("UPDATE promotions SET times_used = 1 WHERE uuid = $1")
            .bind(exhausted.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        let future = ctx.promotions.check_promotion("FUTURE", now).await;
        let past = ctx.promotions.check_promotion("PAST", now).await;
        let once = ctx.promotions.check_promotion("ONCE", now).await;
        let unknown = ctx.promotions.check_promotion("NOPE", now).await;

        assert!(
            matches!(future, Err(PromotionsServiceError::NotYetActive)),
            "expected NotYetActive, got {future:?}"
        );
        assert!(
            matches!(past, Err(PromotionsServiceError::Expired)),
            "expected Expired, got {past:?}"
        );
        assert!(
            matches!(once, Err(PromotionsServiceError::UsageLimitReached)),
            "expected UsageLimitReached, got {once:?}"
        );
        assert!(
            matches!(unknown, Err(PromotionsServiceError::NotFound)),
            "expected NotFound, got {unknown:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_promotion_then_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .promotions
            .create_promotion(new_promotion("GONE", Decimal::new(10, 0)))
            .await?;

        ctx.promotions.delete_promotion(created.uuid).await?;

        let again = ctx.promotions.delete_promotion(created.uuid).await;

        assert!(
            matches!(again, Err(PromotionsServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_redeemed_promotion_returns_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("redeemed@example.com").await;
        let category = ctx.create_category("Redeemed").await;
        let product = create_product(&ctx, category, 10_00, 5).await?;
        let cart = ctx.carts.get_or_create_active_cart(user).await?;

        add_item(&ctx, user, cart.uuid, product.uuid, 1).await?;

        let promotion = ctx
            .promotions
            .create_promotion(new_promotion("KEEP", Decimal::new(10, 0)))
            .await?;

        ctx.orders
            .create_order(user, new_order(cart.uuid, Some("KEEP")))
            .await?;

        let result = ctx.promotions.delete_promotion(promotion.uuid).await;

        assert!(
            matches!(result, Err(PromotionsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        let kept = ctx.promotions.get_promotion(promotion.uuid).await?;

        assert_eq!(kept.times_used, 1);

        Ok(())
    }

    #[tokio::test]
    async fn list_promotions_respects_limit() -> TestResult {
        let ctx = TestContext::new().await;

        for code in ["ONE", "TWO", "THREE"] {
            ctx.promotions
                .create_promotion(new_promotion(code, Decimal::new(10, 0)))
                .await?;
        }

        let page = ctx
            .promotions
            .list_promotions(Page::new(Some(1), Some(1)))
            .await?;

        assert_eq!(page.len(), 1);
        assert_eq!(page.first().map(|p| p.code.as_str()), Some("TWO"));

        Ok(())
    }
}
