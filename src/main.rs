//! estante CLI: multi-source book search and reading shelf.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use estante::aggregate::{LanguageFilter, SearchClient, SearchMode};
use estante::book::Book;
use estante::config::SearchConfig;
use estante::shelf::{ReadingStatus, Shelf, ShelfEntry, ShelfPatch};

#[derive(Parser)]
#[command(
    name = "estante",
    version,
    about = "Multi-source book search and reading shelf"
)]
struct Cli {
    /// Data directory for the shelf file (default: XDG data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Google Books API key (or set ESTANTE_GOOGLE_API_KEY).
    #[arg(long, global = true)]
    google_api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search all catalogs for a title, author, or ISBN.
    Search {
        query: String,

        /// Include results without Portuguese signals.
        #[arg(long)]
        all_languages: bool,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search all catalogs for books by an author.
    Author {
        name: String,

        /// Include results without Portuguese signals.
        #[arg(long)]
        all_languages: bool,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show details for one Google Books volume.
    Details {
        /// Volume ID, with or without the `google-` prefix.
        id: String,
    },

    /// Manage the reading shelf.
    Shelf {
        #[command(subcommand)]
        command: ShelfCommands,
    },
}

#[derive(Subcommand)]
enum ShelfCommands {
    /// Search and add one result to the shelf.
    Add {
        query: String,

        /// Which search result to add (1-based).
        #[arg(long, default_value = "1")]
        pick: usize,

        /// Initial reading status.
        #[arg(long, default_value = "unread")]
        status: ReadingStatus,
    },

    /// List shelved books.
    List {
        /// Only books in this status.
        #[arg(long)]
        status: Option<ReadingStatus>,
    },

    /// Update reading state for a shelved book.
    Update {
        id: String,

        #[arg(long)]
        status: Option<ReadingStatus>,

        /// Last page read.
        #[arg(long)]
        page: Option<u32>,

        /// Star rating, 1-5.
        #[arg(long)]
        rating: Option<u8>,

        #[arg(long)]
        review: Option<String>,
    },

    /// Remove a book from the shelf.
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = SearchConfig {
        google_api_key: cli
            .google_api_key
            .clone()
            .or_else(|| std::env::var("ESTANTE_GOOGLE_API_KEY").ok()),
        ..Default::default()
    };
    let data_dir = resolve_data_dir(cli.data_dir.clone());

    match cli.command {
        Commands::Search {
            query,
            all_languages,
            json,
        } => {
            let client = SearchClient::new(config)?;
            let books = client
                .search_with(&query, SearchMode::General, filter_for(all_languages))
                .await;
            print_books(&books, json)?;
        }

        Commands::Author {
            name,
            all_languages,
            json,
        } => {
            let client = SearchClient::new(config)?;
            let books = client
                .search_with(&name, SearchMode::ByAuthor, filter_for(all_languages))
                .await;
            print_books(&books, json)?;
        }

        Commands::Details { id } => {
            let client = SearchClient::new(config)?;
            let book = client.book_details(&id).await?;
            println!("{}", book.title);
            println!("  author:    {}", book.author);
            println!("  publisher: {}", book.publisher);
            println!("  published: {}", book.published_date);
            if book.page_count > 0 {
                println!("  pages:     {}", book.page_count);
            }
            if !book.isbn.is_empty() {
                println!("  isbn:      {}", book.isbn);
            }
            if !book.categories.is_empty() {
                println!("  subjects:  {}", book.categories.join(", "));
            }
            println!("\n{}", book.description);
        }

        Commands::Shelf { command } => match command {
            ShelfCommands::Add {
                query,
                pick,
                status,
            } => {
                let client = SearchClient::new(config)?;
                let books = client.search(&query).await;
                if books.is_empty() {
                    miette::bail!("no results for \"{query}\"");
                }
                let book = books
                    .get(pick.saturating_sub(1))
                    .ok_or_else(|| {
                        miette::miette!(
                            "pick {pick} is out of range ({} results)",
                            books.len()
                        )
                    })?
                    .clone();

                let mut shelf = Shelf::open(&data_dir)?;
                let entry = shelf.add(book, status)?;
                println!(
                    "Added \"{}\" by {} ({})",
                    entry.book.title, entry.book.author, entry.status
                );
            }

            ShelfCommands::List { status } => {
                let shelf = Shelf::open(&data_dir)?;
                let entries: Vec<&ShelfEntry> = match status {
                    Some(status) => shelf.list_by_status(status),
                    None => shelf.list().iter().collect(),
                };
                if entries.is_empty() {
                    println!("Shelf is empty.");
                } else {
                    println!("Shelf ({}):", entries.len());
                    for entry in entries {
                        print_entry(entry);
                    }
                }
            }

            ShelfCommands::Update {
                id,
                status,
                page,
                rating,
                review,
            } => {
                let mut shelf = Shelf::open(&data_dir)?;
                let entry = shelf.update(
                    &id,
                    ShelfPatch {
                        status,
                        current_page: page,
                        rating,
                        review,
                    },
                )?;
                print_entry(&entry);
            }

            ShelfCommands::Remove { id } => {
                let mut shelf = Shelf::open(&data_dir)?;
                let entry = shelf.remove(&id)?;
                println!("Removed \"{}\"", entry.book.title);
            }
        },
    }

    Ok(())
}

fn filter_for(all_languages: bool) -> LanguageFilter {
    if all_languages {
        LanguageFilter::All
    } else {
        LanguageFilter::PortugueseOnly
    }
}

fn print_books(books: &[Book], json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(books).into_diagnostic()?
        );
        return Ok(());
    }
    if books.is_empty() {
        println!("No results.");
        return Ok(());
    }
    for (index, book) in books.iter().enumerate() {
        println!(
            "{:2}. {} by {} [{}] (score {})",
            index + 1,
            book.title,
            book.author,
            book.source,
            book.relevance_score
        );
        println!("      {} | {} | id: {}", book.publisher, book.published_date, book.id);
    }
    Ok(())
}

fn print_entry(entry: &ShelfEntry) {
    let progress = if entry.book.page_count > 0 {
        format!("{}/{}", entry.current_page, entry.book.page_count)
    } else {
        format!("{}", entry.current_page)
    };
    let stars = entry
        .rating
        .map(|r| format!(", {}", "★".repeat(r as usize)))
        .unwrap_or_default();
    println!(
        "  [{}] {} by {} (page {progress}{stars}) id: {}",
        entry.status, entry.book.title, entry.book.author, entry.id
    );
}

/// Shelf location: `--data-dir`, else `$XDG_DATA_HOME/estante`, else
/// `~/.local/share/estante`.
fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join("estante");
        }
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".local/share/estante")
}
