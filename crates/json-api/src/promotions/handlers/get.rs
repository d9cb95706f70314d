//! Get Promotion Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::promotions::records::PromotionRecord;

use crate::{extensions::*, promotions::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionResponse {
    /// The unique identifier of the promotion
    pub uuid: Uuid,

    /// Upper-case redemption code
    pub code: String,

    pub description: Option<String>,

    /// Percentage taken off the cart subtotal, e.g. "12.5"
    pub discount_percent: String,

    pub starts_at: String,

    pub ends_at: Option<String>,

    pub max_uses: Option<u32>,

    pub times_used: u32,

    pub created_at: String,

    pub updated_at: String,
}

impl From<PromotionRecord> for PromotionResponse {
    fn from(promotion: PromotionRecord) -> Self {
        PromotionResponse {
            uuid: promotion.uuid.into(),
            code: promotion.code,
            description: promotion.description,
            discount_percent: promotion.discount_percent.normalize().to_string(),
            starts_at: promotion.starts_at.to_string(),
            ends_at: promotion.ends_at.map(|ends_at| ends_at.to_string()),
            max_uses: promotion.max_uses,
            times_used: promotion.times_used,
            created_at: promotion.created_at.to_string(),
            updated_at: promotion.updated_at.to_string(),
        }
    }
}

/// Get Promotion Handler
#[endpoint(tags("promotions"), summary = "Get Promotion")]
pub(crate) async fn handler(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promotion = state
        .app
        .promotions
        .get_promotion(promotion.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotion.into()))
}
