use crate::core::{
    command_init::CommandContext, error::KotobatenError, error::Result, navigation,
    print_notification, state::Direction,
};

/// `next` / `previous`: move the shared index one step and show where it landed.
///
/// Failures end as a notification; the command itself always succeeds.
pub async fn execute_navigate(ctx: &CommandContext, direction: Direction) -> Result<()> {
    match navigation::navigate(&ctx.cache(), direction).await {
        Ok(summary) => print_notification(&summary),
        Err(KotobatenError::NoWordsLoaded) => {
            print_notification(&KotobatenError::NoWordsLoaded.to_string())
        }
        Err(e) => {
            log::error!("Navigation to {} word failed: {e}", direction.label());
            print_notification(&format!(
                "Failed to navigate to {} word",
                direction.label()
            ));
        }
    }
    Ok(())
}

pub async fn execute_current(ctx: &CommandContext) -> Result<()> {
    match navigation::current(&ctx.cache()).await {
        Ok(summary) => print_notification(&summary),
        Err(KotobatenError::NoWordsLoaded) => {
            print_notification(&KotobatenError::NoWordsLoaded.to_string())
        }
        Err(e) => return Err(e),
    }
    Ok(())
}
