use clap::Args;
use jiff::Timestamp;
use rust_decimal::Decimal;
use storefront_app::{
    database::Db,
    domain::promotions::{
        PgPromotionsService, PromotionsService, data::NewPromotion, records::PromotionUuid,
    },
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreatePromotionArgs {
    /// Redemption code; stored upper-cased
    #[arg(long)]
    code: String,

    /// Percentage off the order subtotal, e.g. `12.5`
    #[arg(long)]
    percent: Decimal,

    /// Optional description shown to customers
    #[arg(long)]
    description: Option<String>,

    /// Start of the redemption window (RFC 3339); defaults to now
    #[arg(long)]
    starts_at: Option<Timestamp>,

    /// End of the redemption window (RFC 3339), exclusive
    #[arg(long)]
    ends_at: Option<Timestamp>,

    /// Maximum number of redemptions
    #[arg(long)]
    max_uses: Option<u32>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreatePromotionArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;
    let service = PgPromotionsService::new(Db::new(pool));

    let promotion = service
        .create_promotion(NewPromotion {
            uuid: PromotionUuid::new(),
            code: args.code,
            description: args.description,
            discount_percent: args.percent,
            starts_at: args.starts_at.unwrap_or_else(Timestamp::now),
            ends_at: args.ends_at,
            max_uses: args.max_uses,
        })
        .await
        .map_err(|error| format!("failed to create promotion: {error}"))?;

    println!("promotion_uuid: {}", promotion.uuid);
    println!("code: {}", promotion.code);
    println!("discount_percent: {}", promotion.discount_percent);

    Ok(())
}
