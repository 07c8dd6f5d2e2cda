use crate::commands::prompt;
use crate::core::{
    command_init::CommandContext,
    error::{KotobatenError, Result},
    print_success,
    validation::validate_required,
};

pub async fn execute_login(
    ctx: &CommandContext,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    if let Some(message) = validate_required(&email, "Email") {
        return Err(KotobatenError::validation(message));
    }

    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };
    if let Some(message) = validate_required(&password, "Password") {
        return Err(KotobatenError::validation(message));
    }

    let token = ctx.api()?.login(email.trim(), &password).await?;
    ctx.credentials().save_token(&token).await?;
    log::debug!("Stored new token for {}", email.trim());

    print_success("Logged in");
    Ok(())
}

pub async fn execute_logout(ctx: &CommandContext) -> Result<()> {
    ctx.credentials().clear().await?;
    print_success("Logged out");
    Ok(())
}
