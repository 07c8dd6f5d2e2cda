use clap::{Parser, Subcommand};
use kotobaten::commands::*;
use kotobaten::core::{
    command_init::CommandInit,
    error::{KotobatenError, Result},
    print_error,
    state::Direction,
};
use std::env;

#[derive(Parser)]
#[command(name = "kotobaten")]
#[command(about = "Practice and manage your Kotobaten vocabulary from the terminal")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Use this API base URL instead of the configured one
    #[arg(long = "api-url", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    /// Add a word to your collection
    Add {
        #[arg(long)]
        sense: String,
        #[arg(long)]
        kanji: Option<String>,
        #[arg(long)]
        kana: Option<String>,
        #[arg(long)]
        note: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Search your collection and the dictionary
    Search {
        /// Term to look up (omit with --interactive)
        #[arg(required_unless_present = "interactive")]
        term: Option<String>,
        /// Read one query per line from stdin, replacing the previous one
        #[arg(short, long)]
        interactive: bool,
        /// Only show your stack cards
        #[arg(long, conflicts_with = "dictionary")]
        collection: bool,
        /// Only show dictionary results
        #[arg(long)]
        dictionary: bool,
        /// Only show common dictionary words
        #[arg(long)]
        common_only: bool,
    },
    /// Reset the practice progress of a card
    ResetCard {
        card_id: u64,
    },
    /// Show the rotating practice word display
    Menubar,
    /// Move the practice display to the next word
    Next,
    /// Move the practice display to the previous word
    Previous,
    /// Show the current practice word
    Current,
}

async fn run(command: Commands, api_url: Option<String>) -> Result<()> {
    let ctx = CommandInit::initialize(api_url)?;

    match command {
        Commands::Login { email, password } => execute_login(&ctx, email, password).await,
        Commands::Logout => execute_logout(&ctx).await,
        Commands::Add {
            sense,
            kanji,
            kana,
            note,
            yes,
        } => {
            execute_add(
                &ctx,
                AddWordArgs {
                    sense,
                    kanji,
                    kana,
                    note,
                    yes,
                },
            )
            .await
        }
        Commands::Search {
            term,
            interactive,
            collection,
            dictionary,
            common_only,
        } => {
            let filter = SearchFilter {
                collection_only: collection,
                dictionary_only: dictionary,
                common_only,
            };
            execute_search(&ctx, term, interactive, filter).await
        }
        Commands::ResetCard { card_id } => execute_reset_card(&ctx, card_id).await,
        Commands::Menubar => execute_menubar(&ctx).await,
        Commands::Next => execute_navigate(&ctx, Direction::Next).await,
        Commands::Previous => execute_navigate(&ctx, Direction::Previous).await,
        Commands::Current => execute_current(&ctx).await,
    }
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            print_error(&format!("Failed to start async runtime: {e}"));
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(run(cli.command, cli.api_url));

    // A pending stdin read cannot be cancelled; don't wait for it.
    runtime.shutdown_background();

    if let Err(e) = result {
        log::debug!("Command failed: {e:?}");
        match e {
            KotobatenError::ConfirmationDeclined => println!("{e}"),
            e => print_error(&e.to_string()),
        }
        std::process::exit(1);
    }
}
