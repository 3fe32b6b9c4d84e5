use std::io::{self, BufRead, Write};

use colored::Colorize;

use shelf_authors::{Author, AuthorClient, AuthorQuery, InMemoryAuthorCatalog, Slug};
use shelf_remote::InMemoryDocumentStore;
use shelf_session::{ConfirmDelete, LibrarySession, RemovalOutcome, SessionError};
use shelf_types::{Book, DocId, Genre};

use crate::cli::{AuthorsArgs, Cli, Command, ShellArgs};
use crate::config::ShelfConfig;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ShelfConfig::load(path)?,
        None => ShelfConfig::default(),
    };
    match cli.command {
        Command::Shell(args) => cmd_shell(args, &config).await,
        Command::Authors(args) => cmd_authors(args, &config).await,
    }
}

/// Confirmation prompt on the controlling terminal: y/Y approves, anything
/// else declines.
struct StdinConfirm;

impl ConfirmDelete for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}

type ShellSession = LibrarySession<InMemoryDocumentStore, StdinConfirm>;

// ---- shelf shell ----

async fn cmd_shell(args: ShellArgs, _config: &ShelfConfig) -> anyhow::Result<()> {
    let mut session = LibrarySession::open(InMemoryDocumentStore::new(), StdinConfirm).await?;
    if args.seed {
        seed_library(&mut session).await?;
        println!("{} Seeded demo library.", "✓".green());
    }

    println!(
        "Shelfline session. Type {} for commands, {} to leave.",
        "help".bold(),
        "quit".bold()
    );

    let stdin = io::stdin();
    loop {
        print!("{} ", "shelf>".cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        if !dispatch(&mut session, line.trim()).await? {
            break;
        }
    }
    Ok(())
}

/// Run one shell command. Returns `false` when the session should end.
async fn dispatch(session: &mut ShellSession, line: &str) -> anyhow::Result<bool> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "help" => print_help(),
        "genres" => list_genres(session),
        "add-genre" => match session.add_genre(rest).await {
            Ok(Some(genre)) => println!("{} Added genre {}.", "✓".green(), genre.name.bold()),
            Ok(None) => {}
            Err(err) => report(err),
        },
        "rename-genre" => {
            let Some((genre, new_name)) = indexed_genre(session, rest) else {
                return Ok(true);
            };
            match session.rename_genre(&genre.id, new_name).await {
                Ok(true) => println!("{} Renamed to {}.", "✓".green(), new_name.bold()),
                Ok(false) => println!("No such genre."),
                Err(err) => report(err),
            }
        }
        "remove-genre" => {
            let Some((genre, _)) = indexed_genre(session, rest) else {
                return Ok(true);
            };
            match session.remove_genre(&genre.id).await {
                Ok(RemovalOutcome::Removed) => {
                    println!("{} Deleted genre {}.", "✓".green(), genre.name.bold())
                }
                Ok(RemovalOutcome::Declined) => println!("Skipped."),
                Ok(RemovalOutcome::NotFound) => println!("No such genre."),
                Err(err) => report(err),
            }
        }
        "books" => list_books(session),
        "add-book" => match session.add_book(rest).await {
            Ok(Some(book)) => println!("{} Added {}.", "✓".green(), book.title.bold()),
            Ok(None) => {}
            Err(err) => report(err),
        },
        "rename-book" => {
            let Some((book, new_title)) = indexed_book(session, rest) else {
                return Ok(true);
            };
            match session.rename_book(&book.id, new_title).await {
                Ok(true) => println!("{} Renamed to {}.", "✓".green(), new_title.bold()),
                Ok(false) => println!("No such book."),
                Err(err) => report(err),
            }
        }
        "remove-book" => {
            let Some((book, _)) = indexed_book(session, rest) else {
                return Ok(true);
            };
            match session.remove_book(&book.id).await {
                Ok(RemovalOutcome::Removed) => {
                    println!("{} Deleted {}.", "✓".green(), book.title.bold())
                }
                Ok(RemovalOutcome::Declined) => println!("Skipped."),
                Ok(RemovalOutcome::NotFound) => println!("No such book."),
                Err(err) => report(err),
            }
        }
        "select" => {
            let Some((genre, _)) = indexed_genre(session, rest) else {
                return Ok(true);
            };
            match session.select_genre(genre.id.clone()).await {
                Ok(()) => {
                    println!("Viewing books in {}.", genre.name.bold());
                    list_books(session);
                }
                Err(err) => report(err),
            }
        }
        "all" => match session.select_all_genres().await {
            Ok(()) => {
                println!("Viewing all books.");
                list_books(session);
            }
            Err(err) => report(err),
        },
        "search-all" => match session.toggle_search_all().await {
            Ok(()) => {
                let state = if session.view().search_all_genres() {
                    "on".green()
                } else {
                    "off".yellow()
                };
                println!("Search all genres: {state}.");
                list_books(session);
            }
            Err(err) => report(err),
        },
        "search" => {
            session.search(rest);
            list_books(session);
        }
        "quit" | "exit" => return Ok(false),
        other => println!("Unknown command {}. Try {}.", other.red(), "help".bold()),
    }
    Ok(true)
}

fn print_help() {
    println!("Genres:");
    println!("  {}                list genres", "genres".bold());
    println!("  {} <name>      create a genre", "add-genre".bold());
    println!("  {} <n> <name>  rename genre n", "rename-genre".bold());
    println!("  {} <n>       delete genre n and all its books", "remove-genre".bold());
    println!("Books:");
    println!("  {}                 list the books in view", "books".bold());
    println!("  {} <title>      add a book to the selected genre", "add-book".bold());
    println!("  {} <n> <title>  rename book n", "rename-book".bold());
    println!("  {} <n>        delete book n", "remove-book".bold());
    println!("View:");
    println!("  {} <n>            browse one genre", "select".bold());
    println!("  {}                  browse all genres", "all".bold());
    println!("  {}           toggle searching across genres", "search-all".bold());
    println!("  {} [query]       filter the books in view", "search".bold());
}

fn list_genres(session: &ShellSession) {
    if session.genres().is_empty() {
        println!("No genres yet. {} creates one.", "add-genre <name>".bold());
        return;
    }
    let selected = session.view().mode().selected_genre().cloned();
    for (i, genre) in session.genres().iter().enumerate() {
        let marker = if Some(&genre.id) == selected.as_ref() {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{marker} {} {}  {}",
            format!("[{}]", i + 1).dimmed(),
            genre.name.bold(),
            genre.created_at.to_string().dimmed()
        );
    }
}

fn list_books(session: &ShellSession) {
    if !session.books().query().is_empty() {
        println!("Filter: {}", session.books().query().yellow());
    }
    if session.visible_books().is_empty() {
        println!("No books in view.");
        return;
    }
    for (i, book) in session.visible_books().iter().enumerate() {
        println!(
            "  {} {}  {}",
            format!("[{}]", i + 1).dimmed(),
            book.title.bold(),
            shelf_name(session, &book.shelf_id).dimmed()
        );
    }
}

fn shelf_name(session: &ShellSession, shelf_id: &DocId) -> String {
    session
        .genres()
        .iter()
        .find(|g| &g.id == shelf_id)
        .map(|g| g.name.clone())
        .unwrap_or_else(|| shelf_id.short_id().to_string())
}

/// Parse `<index> [rest]` against the genre list.
fn indexed_genre<'a>(session: &ShellSession, args: &'a str) -> Option<(Genre, &'a str)> {
    let (index, rest) = split_index(args)?;
    match session.genres().get(index - 1) {
        Some(genre) => Some((genre.clone(), rest)),
        None => {
            println!("No genre numbered {index}. See {}.", "genres".bold());
            None
        }
    }
}

/// Parse `<index> [rest]` against the books in view.
fn indexed_book<'a>(session: &ShellSession, args: &'a str) -> Option<(Book, &'a str)> {
    let (index, rest) = split_index(args)?;
    match session.visible_books().get(index - 1) {
        Some(book) => Some((book.clone(), rest)),
        None => {
            println!("No book numbered {index}. See {}.", "books".bold());
            None
        }
    }
}

fn split_index(args: &str) -> Option<(usize, &str)> {
    let (head, rest) = match args.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (args, ""),
    };
    match head.parse::<usize>() {
        Ok(n) if n > 0 => Some((n, rest)),
        _ => {
            println!("Expected a list number, got {}.", head.red());
            None
        }
    }
}

fn report(err: SessionError) {
    match &err {
        SessionError::CapacityExceeded { .. } | SessionError::NoGenreSelected => {
            println!("{}", err.to_string().yellow());
        }
        SessionError::PartialFailure(report) => {
            println!("{}", err.to_string().red());
            for (id, reason) in &report.failed {
                println!("  book {}: {}", id.short_id(), reason);
            }
        }
        SessionError::Remote(_) => println!("{}", err.to_string().red()),
    }
}

async fn seed_library(session: &mut ShellSession) -> anyhow::Result<()> {
    let sf = session.add_genre("Science Fiction").await?;
    if let Some(genre) = sf {
        session.select_genre(genre.id).await?;
        session.add_book("Dune").await?;
        session.add_book("The Dispossessed").await?;
    }
    let romance = session.add_genre("Romance").await?;
    if let Some(genre) = romance {
        session.select_genre(genre.id).await?;
        session.add_book("Emma").await?;
    }
    session.select_all_genres().await?;
    Ok(())
}

// ---- shelf authors ----

async fn cmd_authors(_args: AuthorsArgs, config: &ShelfConfig) -> anyhow::Result<()> {
    let catalog = sample_catalog();
    let query = AuthorQuery::authors();
    let authors = catalog.fetch(&query).await?;

    println!(
        "Authors ({} dataset, {} records)",
        config.content.dataset.bold(),
        authors.len()
    );
    for author in &authors {
        println!("{}  {}", author.name.bold(), author.slug.current.dimmed());
        if let Some(bio) = &author.bio {
            println!("  {bio}");
        }
    }
    Ok(())
}

fn sample_catalog() -> InMemoryAuthorCatalog {
    let authors = vec![
        Author {
            id: "author-le-guin".to_string(),
            name: "Ursula K. Le Guin".to_string(),
            slug: Slug::new("ursula-k-le-guin"),
            image: None,
            bio: Some("Wrote the Hainish cycle and Earthsea.".to_string()),
        },
        Author {
            id: "author-herbert".to_string(),
            name: "Frank Herbert".to_string(),
            slug: Slug::new("frank-herbert"),
            image: None,
            bio: Some("Author of the Dune saga.".to_string()),
        },
        Author {
            id: "author-austen".to_string(),
            name: "Jane Austen".to_string(),
            slug: Slug::new("jane-austen"),
            image: None,
            bio: None,
        },
    ];
    InMemoryAuthorCatalog::with_authors(authors)
}
