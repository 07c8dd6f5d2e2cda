use crate::commands::prompt;
use crate::core::{
    command_init::CommandContext,
    error::{KotobatenError, Result},
    print_success,
    validation::WordDraft,
};
use colored::*;

pub struct AddWordArgs {
    pub sense: String,
    pub kanji: Option<String>,
    pub kana: Option<String>,
    pub note: Option<String>,
    pub yes: bool,
}

pub async fn execute_add(ctx: &CommandContext, args: AddWordArgs) -> Result<()> {
    // Validate before anything touches the network or asks for confirmation
    let draft = WordDraft::new(
        &args.sense,
        args.kanji.as_deref(),
        args.kana.as_deref(),
        args.note.as_deref(),
    )?;

    let credentials = ctx.credentials();
    let token = credentials.require_token().await?;

    if !args.yes && !confirm(&draft)? {
        return Err(KotobatenError::ConfirmationDeclined);
    }

    let api = ctx.api()?;
    let result = api
        .add_word(draft.sense, draft.kanji, draft.kana, draft.note, &token)
        .await;
    credentials.forget_if_rejected(result).await?;

    print_success("⛩️ Word added!");
    Ok(())
}

fn confirm(draft: &WordDraft<'_>) -> Result<bool> {
    println!("\n{}\n", "Add this word?".white());
    for line in draft.summary_lines() {
        println!("  {}", line.white());
    }

    let answer = prompt(&format!("\n{} ", "[y/N]".bright_black()))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}
