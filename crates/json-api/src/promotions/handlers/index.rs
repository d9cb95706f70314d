//! Promotion Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    promotions::{errors::into_status_error, get::PromotionResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionsResponse {
    pub promotions: Vec<PromotionResponse>,
}

/// Promotion Index Handler
#[endpoint(tags("promotions"), summary = "List Promotions")]
pub(crate) async fn handler(
    skip: QueryParam<u64, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<PromotionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promotions = state
        .app
        .promotions
        .list_promotions((skip, limit).into_page())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PromotionsResponse {
        promotions: promotions.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        domain::promotions::{MockPromotionsService, records::PromotionUuid},
        pagination::Page,
    };

    use crate::test_helpers::{make_promotion, promotions_service};

    use super::*;

    #[tokio::test]
    async fn test_index_returns_promotions() -> TestResult {
        let uuid = PromotionUuid::new();

        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_list_promotions()
            .once()
            .withf(|page| *page == Page::new(Some(2), Some(1)))
            .return_once(move |_| Ok(vec![make_promotion(uuid)]));

        let service = promotions_service(promotions, Router::with_path("promotions").get(handler));

        let response: PromotionsResponse =
            TestClient::get("http://example.com/promotions?skip=2&limit=1")
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(response.promotions.len(), 1, "expected one promotion");
        assert!(
            response.promotions.iter().all(|p| p.uuid == uuid.into_uuid()),
            "unexpected promotion in listing"
        );

        Ok(())
    }
}
