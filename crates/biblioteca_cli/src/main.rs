//! Command-line presentation layer for the Biblioteca catalog.
//!
//! # Responsibility
//! - Parse author/book commands and trim input at the caller boundary.
//! - Ensure the schema before every command; stop if the store is unusable.
//! - Render results as text tables or JSON.

mod feedback;
mod render;

use biblioteca_core::{
    core_version, default_log_level, ensure_schema, init_logging, required_field, schema_ready,
    AuthorId, AuthorRepository, Book, BookId, BookRepository, FormAction, FormError, FormState,
    SqliteAuthorRepository, SqliteBookRepository, SqliteLibraryService, Store, StoreConfig,
    APP_NAME, DEFAULT_DB_FILE_NAME,
};
use clap::{Args, Parser, Subcommand};
use feedback::CliError;
use log::{info, warn};
use render::{OutputMode, StatusReport};
use std::path::PathBuf;
use std::process::ExitCode;

/// Authors and books seeded by `seed`, keyed by author name.
const DEMO_CATALOG: &[(&str, &[&str])] = &[
    (
        "Carlos Drummond de Andrade",
        &["Sentimento do Mundo", "A Rosa do Povo"],
    ),
    ("Cecília Meireles", &["Romanceiro da Inconfidência"]),
];

#[derive(Debug, Parser)]
#[command(name = "biblioteca")]
#[command(version, about = "Manage a library's authors and books")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,
    /// Directory for rolling log files. Logging stays off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Print records as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the catalog tables if they do not exist.
    Init,
    /// Show database location, schema state and record counts.
    Status,
    /// Show application information.
    About,
    /// Insert sample authors and books, skipping authors that already exist.
    Seed,
    /// Manage authors.
    #[command(subcommand)]
    Author(AuthorCommand),
    /// Manage books.
    #[command(subcommand)]
    Book(BookCommand),
}

#[derive(Debug, Subcommand)]
enum AuthorCommand {
    /// Add a new author.
    Add { name: String },
    /// List authors ordered by name.
    List,
    /// Show one author.
    Show { id: AuthorId },
    /// Rename the selected author.
    Update {
        #[arg(long)]
        id: Option<AuthorId>,
        #[arg(long)]
        name: String,
    },
    /// Delete the selected author (only when it has no books).
    Delete {
        #[arg(long)]
        id: Option<AuthorId>,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum BookCommand {
    /// Add a new book for an existing author.
    Add {
        title: String,
        #[command(flatten)]
        author: AuthorRef,
    },
    /// List books with their author, ordered by title.
    List,
    /// Show one book.
    Show { id: BookId },
    /// Replace title and author of the selected book.
    Update {
        #[arg(long)]
        id: Option<BookId>,
        #[arg(long)]
        title: String,
        #[command(flatten)]
        author: AuthorRef,
    },
    /// Delete the selected book.
    Delete {
        #[arg(long)]
        id: Option<BookId>,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

/// Author selection for book forms: by id or by exact name.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct AuthorRef {
    #[arg(long)]
    author_id: Option<AuthorId>,
    #[arg(long)]
    author_name: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(CliError::Logging)?;
    }

    let store = Store::new(StoreConfig::new(cli.db));
    // `status` reports readiness as found, before this run creates anything.
    let schema_was_ready = match cli.command {
        Command::Status => schema_ready(&store)?,
        _ => true,
    };
    ensure_schema(&store)?;
    info!(
        "event=cli_command module=cli status=start db={}",
        store.path().display()
    );

    let mode = OutputMode::from_flag(cli.json);
    match cli.command {
        Command::Init => Ok(format!(
            "Catalog tables ready in `{}`.",
            store.path().display()
        )),
        Command::Status => status(&store, mode, schema_was_ready),
        Command::About => about(mode),
        Command::Seed => seed(&store),
        Command::Author(command) => author_command(&store, mode, command),
        Command::Book(command) => book_command(&store, mode, command),
    }
}

fn status(store: &Store, mode: OutputMode, schema_was_ready: bool) -> Result<String, CliError> {
    let library = SqliteLibraryService::for_store(store);
    let report = StatusReport {
        db_path: store.path().display().to_string(),
        schema_ready: schema_was_ready,
        authors: library.list_authors().len(),
        books: library.list_books_with_author().len(),
    };
    Ok(render::record(mode, &report, |report| {
        format!(
            "database: {}\nschema ready: {}\nauthors: {}\nbooks: {}",
            report.db_path, report.schema_ready, report.authors, report.books
        )
    })?)
}

fn about(mode: OutputMode) -> Result<String, CliError> {
    let info = serde_json::json!({
        "name": APP_NAME,
        "version": core_version(),
        "description": "Register, list, update and delete a library's authors and books.",
    });
    Ok(render::record(mode, &info, |_| {
        format!(
            "{APP_NAME} {}\nRegister, list, update and delete a library's authors and books.\nData is stored in a local SQLite file.",
            core_version()
        )
    })?)
}

fn seed(store: &Store) -> Result<String, CliError> {
    let authors = SqliteAuthorRepository::new(store);
    let books = SqliteBookRepository::new(store);
    let mut added_authors = 0;
    let mut added_books = 0;

    for (name, titles) in DEMO_CATALOG {
        if authors
            .find_by_name(name)
            .map_err(|err| CliError::repo("seed authors", err))?
            .is_some()
        {
            continue;
        }
        added_books += seed_author(&authors, &books, name, titles)?;
        added_authors += 1;
    }

    Ok(format!(
        "Seeded {added_authors} author(s) and {added_books} book(s)."
    ))
}

/// Adds one demo author with its books, or nothing at all.
///
/// A failed book insert removes the books and author added so far, so a
/// later `seed` retries the whole entry.
fn seed_author(
    authors: &SqliteAuthorRepository<'_>,
    books: &SqliteBookRepository<'_>,
    name: &str,
    titles: &[&str],
) -> Result<usize, CliError> {
    let author_id = authors
        .add(name)
        .map_err(|err| CliError::repo("seed authors", err))?;

    let mut added = Vec::with_capacity(titles.len());
    for title in titles {
        match books.add(title, author_id) {
            Ok(book_id) => added.push(book_id),
            Err(err) => {
                for book_id in added {
                    if let Err(cleanup) = books.delete(book_id) {
                        warn!("event=seed_rollback module=cli status=error book_id={book_id} error={cleanup}");
                    }
                }
                if let Err(cleanup) = authors.delete(author_id) {
                    warn!("event=seed_rollback module=cli status=error author_id={author_id} error={cleanup}");
                }
                return Err(CliError::repo("seed books", err));
            }
        }
    }
    Ok(added.len())
}

fn author_command(
    store: &Store,
    mode: OutputMode,
    command: AuthorCommand,
) -> Result<String, CliError> {
    let library = SqliteLibraryService::for_store(store);
    let repo = SqliteAuthorRepository::new(store);

    match command {
        AuthorCommand::Add { name } => {
            let name = required_field("author name", &name)?;
            let id = repo
                .add(&name)
                .map_err(|err| CliError::repo("add author", err))?;
            Ok(format!("Author `{name}` added with id {id}."))
        }
        AuthorCommand::List => Ok(render::authors(mode, &library.list_authors())?),
        AuthorCommand::Show { id } => {
            let author = library.find_author(id).ok_or(CliError::Missing {
                entity: "author",
                id,
            })?;
            Ok(render::record(mode, &author, |author| {
                format!("{}  {}", author.id, author.name)
            })?)
        }
        AuthorCommand::Update { id, name } => {
            let id = selected(id, FormAction::Update)?;
            let name = required_field("author name", &name)?;
            repo.update(id, &name)
                .map_err(|err| CliError::repo("update author", err))?;
            Ok(format!("Author {id} renamed to `{name}`."))
        }
        AuthorCommand::Delete { id, yes } => {
            let id = selected(id, FormAction::Delete)?;
            if !yes {
                let subject = match library.find_author(id) {
                    Some(author) => format!("author `{}` (id {id})", author.name),
                    None => format!("author {id}"),
                };
                return Err(CliError::ConfirmationRequired(subject));
            }
            repo.delete(id)
                .map_err(|err| CliError::repo("delete author", err))?;
            Ok(format!("Author {id} deleted."))
        }
    }
}

fn book_command(store: &Store, mode: OutputMode, command: BookCommand) -> Result<String, CliError> {
    let library = SqliteLibraryService::for_store(store);
    let repo = SqliteBookRepository::new(store);

    match command {
        BookCommand::Add { title, author } => {
            let title = required_field("book title", &title)?;
            let author_id = resolve_author(store, &author)?;
            let id = repo
                .add(&title, author_id)
                .map_err(|err| CliError::repo("add book", err))?;
            Ok(format!("Book `{title}` added with id {id}."))
        }
        BookCommand::List => Ok(render::books(mode, &library.list_books_with_author())?),
        BookCommand::Show { id } => {
            let book = library
                .find_book(id)
                .ok_or(CliError::Missing { entity: "book", id })?;
            Ok(render::record(mode, &book, |book| {
                format!("{}  {}  ({})", book.id, book.title, book.author_name)
            })?)
        }
        BookCommand::Update { id, title, author } => {
            let id = selected(id, FormAction::Update)?;
            let title = required_field("book title", &title)?;
            let author_id = resolve_author(store, &author)?;
            repo.update(id, &title, author_id)
                .map_err(|err| CliError::repo("update book", err))?;
            let book = Book {
                id,
                title,
                author_id,
            };
            Ok(render::record(mode, &book, |book| {
                format!("Book {} updated: `{}` by author {}.", book.id, book.title, book.author_id)
            })?)
        }
        BookCommand::Delete { id, yes } => {
            let id = selected(id, FormAction::Delete)?;
            if !yes {
                let subject = match library.find_book(id) {
                    Some(book) => format!("book `{}` (id {id})", book.title),
                    None => format!("book {id}"),
                };
                return Err(CliError::ConfirmationRequired(subject));
            }
            repo.delete(id)
                .map_err(|err| CliError::repo("delete book", err))?;
            Ok(format!("Book {id} deleted."))
        }
    }
}

/// Runs `action` through the selection form; `--id` plays the selected row.
fn selected(id: Option<i64>, action: FormAction) -> Result<i64, CliError> {
    let mut form = FormState::from_selection(id);
    let id = form.begin(action)?.ok_or(FormError::NoSelection)?;
    Ok(id)
}

fn resolve_author(store: &Store, author: &AuthorRef) -> Result<AuthorId, CliError> {
    if let Some(id) = author.author_id {
        return Ok(id);
    }
    let name = required_field("author", author.author_name.as_deref().unwrap_or_default())?;
    SqliteAuthorRepository::new(store)
        .find_by_name(&name)
        .map_err(|err| CliError::repo("look up author", err))?
        .map(|found| found.id)
        .ok_or(CliError::UnknownAuthorName(name))
}

#[cfg(test)]
mod tests {
    use super::{seed, seed_author, selected, Cli};
    use crate::feedback::CliError;
    use biblioteca_core::{
        ensure_schema, AuthorRepository, FormAction, FormError, SqliteAuthorRepository,
        SqliteBookRepository, SqliteLibraryService, Store,
    };
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn book_add_requires_exactly_one_author_reference() {
        assert!(Cli::try_parse_from(["biblioteca", "book", "add", "Iracema"]).is_err());
        assert!(Cli::try_parse_from([
            "biblioteca",
            "book",
            "add",
            "Iracema",
            "--author-id",
            "1",
            "--author-name",
            "José de Alencar",
        ])
        .is_err());
        assert!(
            Cli::try_parse_from(["biblioteca", "book", "add", "Iracema", "--author-id", "1"])
                .is_ok()
        );
    }

    #[test]
    fn update_without_id_is_a_missing_selection() {
        let err = selected(None, FormAction::Update).unwrap_err();
        assert!(matches!(err, CliError::Form(FormError::NoSelection)));
        assert_eq!(selected(Some(5), FormAction::Delete).unwrap(), 5);
    }

    #[test]
    fn failed_book_insert_rolls_back_the_seeded_author() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path().join("seed.db"));
        ensure_schema(&store).unwrap();
        store
            .connect()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_rosa BEFORE INSERT ON book
                 WHEN NEW.title = 'A Rosa do Povo'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let authors = SqliteAuthorRepository::new(&store);
        let books = SqliteBookRepository::new(&store);
        let err = seed_author(
            &authors,
            &books,
            "Carlos Drummond de Andrade",
            &["Sentimento do Mundo", "A Rosa do Povo"],
        )
        .unwrap_err();

        assert!(matches!(err, CliError::Repo { action: "seed books", .. }));
        assert!(authors
            .find_by_name("Carlos Drummond de Andrade")
            .unwrap()
            .is_none());
        let library = SqliteLibraryService::for_store(&store);
        assert!(library.list_books_with_author().is_empty());

        store
            .connect()
            .unwrap()
            .execute_batch("DROP TRIGGER reject_rosa;")
            .unwrap();
        assert_eq!(
            seed(&store).unwrap(),
            "Seeded 2 author(s) and 3 book(s)."
        );
    }
}
