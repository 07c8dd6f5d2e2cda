use crate::core::{command_init::CommandContext, error::Result, print_success};

pub async fn execute_reset_card(ctx: &CommandContext, card_id: u64) -> Result<()> {
    let credentials = ctx.credentials();
    let token = credentials.require_token().await?;

    let result = ctx.api()?.reset_card(card_id, &token).await;
    credentials.forget_if_rejected(result).await?;

    print_success(&format!("Card {card_id} reset"));
    Ok(())
}
