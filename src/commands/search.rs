use crate::core::{
    api::{ApiClient, Searcher},
    command_init::CommandContext,
    error::Result,
    models::{DictionaryCard, SearchResult, StackCard},
    output::format_entry,
    print_error, print_info, print_section_header,
    search_session::{SearchSession, SearchUpdate},
    Credentials,
};
use colored::*;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Which parts of a search result to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub collection_only: bool,
    pub dictionary_only: bool,
    pub common_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub label: String,
    pub title: String,
    pub subtitle: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSection {
    pub header: &'static str,
    pub entries: Vec<SearchEntry>,
}

fn kanji_or_kana<'a>(kanji: &'a str, kana: &'a str) -> &'a str {
    if kanji.is_empty() {
        kana
    } else {
        kanji
    }
}

fn card_entry(position: usize, card: &StackCard) -> SearchEntry {
    SearchEntry {
        // Card ids are what `reset-card` takes
        label: card
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| position.to_string()),
        title: kanji_or_kana(&card.kanji, &card.kana).to_string(),
        subtitle: card.sense.clone(),
        note: Some(card.note.clone()).filter(|note| !note.is_empty()),
    }
}

fn dictionary_entry(position: usize, card: &DictionaryCard) -> SearchEntry {
    SearchEntry {
        label: position.to_string(),
        title: kanji_or_kana(&card.kanji, &card.kana).to_string(),
        subtitle: card.first_sense().unwrap_or_default().to_string(),
        note: None,
    }
}

/// Non-empty sections of `result` after applying `filter`.
pub fn search_sections(result: &SearchResult, filter: SearchFilter) -> Vec<SearchSection> {
    let mut sections = Vec::new();

    if !filter.dictionary_only {
        let entries: Vec<SearchEntry> = result
            .cards
            .iter()
            .enumerate()
            .map(|(i, card)| card_entry(i + 1, card))
            .collect();
        if !entries.is_empty() {
            sections.push(SearchSection {
                header: "Stack Cards",
                entries,
            });
        }
    }

    if !filter.collection_only {
        let entries: Vec<SearchEntry> = result
            .dictionary_cards
            .iter()
            .filter(|card| !filter.common_only || card.is_common)
            .enumerate()
            .map(|(i, card)| dictionary_entry(i + 1, card))
            .collect();
        if !entries.is_empty() {
            sections.push(SearchSection {
                header: "Dictionary Results",
                entries,
            });
        }
    }

    sections
}

fn render(result: &SearchResult, filter: SearchFilter) {
    let sections = search_sections(result, filter);
    if sections.is_empty() {
        print_info("No results.");
        return;
    }

    for section in sections {
        print_section_header(section.header);
        for entry in section.entries {
            println!(
                "  {} {}",
                format_entry(&entry.label, &entry.title),
                entry.subtitle.bright_black()
            );
            if let Some(note) = entry.note {
                println!("      {}", note.italic().bright_black());
            }
        }
    }
    println!();
}

pub async fn execute_search(
    ctx: &CommandContext,
    term: Option<String>,
    interactive: bool,
    filter: SearchFilter,
) -> Result<()> {
    let credentials = ctx.credentials();
    let token = credentials.require_token().await?;
    let api = ctx.api()?;

    if interactive {
        return interactive_search(Arc::new(api), &credentials, token, filter).await;
    }

    let term = term.unwrap_or_default();
    if term.trim().is_empty() {
        // Nothing to look up
        print_info("No results.");
        return Ok(());
    }

    let result = api.search(term.trim(), &token).await;
    let result = credentials.forget_if_rejected(result).await?;
    render(&result, filter);
    Ok(())
}

/// Each stdin line replaces the query; only the latest query's result is shown.
async fn interactive_search(
    api: Arc<ApiClient>,
    credentials: &Credentials,
    token: String,
    filter: SearchFilter,
) -> Result<()> {
    let searcher: Arc<dyn Searcher> = api;
    let mut session = SearchSession::new(searcher, token);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = false;
    let mut input_open = true;

    println!("{}", "Type a word to search, an empty line clears.".bright_black());

    loop {
        if !input_open && !pending {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => match line? {
                Some(term) => {
                    session.submit(&term);
                    pending = true;
                }
                None => input_open = false,
            },
            update = session.next_update(), if pending => {
                pending = false;
                match update {
                    Some(SearchUpdate::Results { term, result }) => {
                        log::debug!("Showing results for '{term}'");
                        render(&result, filter);
                    }
                    Some(SearchUpdate::Cleared) => print_info("No results."),
                    Some(SearchUpdate::Failed { term, error }) => {
                        log::warn!("Search for '{term}' failed: {error}");
                        if error.is_auth_required() {
                            // Without a valid token every further query fails too
                            return credentials.forget_if_rejected(Err(error)).await;
                        }
                        print_error(&error.to_string());
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}
