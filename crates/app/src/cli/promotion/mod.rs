use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct PromotionCommand {
    #[command(subcommand)]
    command: PromotionSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionSubcommand {
    /// Create a percentage-off promotion code
    Create(create::CreatePromotionArgs),
}

pub(crate) async fn run(command: PromotionCommand) -> Result<(), String> {
    match command.command {
        PromotionSubcommand::Create(args) => create::run(args).await,
    }
}
