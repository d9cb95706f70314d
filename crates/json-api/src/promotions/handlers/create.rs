//! Create Promotion Handler

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::promotions::{data::NewPromotion, records::PromotionUuid};

use crate::{
    extensions::*,
    promotions::{errors::into_status_error, get::PromotionResponse},
    state::State,
};

/// Create Promotion Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePromotionRequest {
    pub uuid: Option<Uuid>,

    /// Redemption code, matched case-insensitively
    pub code: String,

    pub description: Option<String>,

    /// Percentage off, between 0 and 100 with at most two decimal places
    pub discount_percent: String,

    /// RFC 3339 timestamp; defaults to now
    pub starts_at: Option<String>,

    /// RFC 3339 timestamp; open-ended when omitted
    pub ends_at: Option<String>,

    pub max_uses: Option<u32>,
}

impl CreatePromotionRequest {
    fn try_into_new_promotion(self) -> Result<NewPromotion, StatusError> {
        let discount_percent = self
            .discount_percent
            .parse::<Decimal>()
            .or_400("discount_percent must be a decimal number")?;

        let starts_at = self
            .starts_at
            .map(|value| value.parse::<Timestamp>())
            .transpose()
            .or_400("starts_at must be an RFC 3339 timestamp")?
            .unwrap_or_else(Timestamp::now);

        let ends_at = self
            .ends_at
            .map(|value| value.parse::<Timestamp>())
            .transpose()
            .or_400("ends_at must be an RFC 3339 timestamp")?;

        Ok(NewPromotion {
            uuid: self
                .uuid
                .map_or_else(PromotionUuid::new, PromotionUuid::from_uuid),
            code: self.code,
            description: self.description,
            discount_percent,
            starts_at,
            ends_at,
            max_uses: self.max_uses,
        })
    }
}

/// Create Promotion Handler
#[endpoint(
    tags("promotions"),
    summary = "Create Promotion",
    responses(
        (status_code = StatusCode::CREATED, description = "Promotion created"),
        (status_code = StatusCode::CONFLICT, description = "Promotion code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePromotionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let new_promotion = json.into_inner().try_into_new_promotion()?;

    let promotion = state
        .app
        .promotions
        .create_promotion(new_promotion)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/promotions/{}", promotion.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(promotion.into()))
}
