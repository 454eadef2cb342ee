use biblioteca_core::{ensure_schema, SqliteLibraryService, Store};
use tempfile::TempDir;

fn ready_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::at(dir.path().join("library.db"));
    ensure_schema(&store).unwrap();
    (dir, store)
}

#[test]
fn duplicate_author_returns_none_and_keeps_single_entry() {
    let (_dir, store) = ready_store();
    let library = SqliteLibraryService::for_store(&store);

    assert_eq!(library.add_author("Cecília Meireles"), Some(1));
    assert_eq!(library.add_author("Cecília Meireles"), None);

    let authors = library.list_authors();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].name, "Cecília Meireles");
}

#[test]
fn author_delete_is_blocked_until_books_are_gone() {
    let (_dir, store) = ready_store();
    let library = SqliteLibraryService::for_store(&store);

    let author_id = library.add_author("Cecília Meireles").unwrap();
    assert_eq!(
        library.add_book("Romanceiro da Inconfidência", author_id),
        Some(1)
    );

    assert!(!library.delete_author(author_id));
    assert!(library.find_author(author_id).is_some());

    assert!(library.delete_book(1));
    assert!(library.delete_author(author_id));
    assert!(library.find_author(author_id).is_none());
}

#[test]
fn book_for_missing_author_is_never_listed() {
    let (_dir, store) = ready_store();
    let library = SqliteLibraryService::for_store(&store);

    assert_eq!(library.add_book("Orphan Title", 999), None);
    assert!(library
        .list_books_with_author()
        .iter()
        .all(|book| book.title != "Orphan Title"));
}

#[test]
fn empty_rename_fails_and_keeps_name() {
    let (_dir, store) = ready_store();
    let library = SqliteLibraryService::for_store(&store);

    let id = library.add_author("Cecília Meireles").unwrap();

    assert!(!library.update_author(id, ""));
    assert_eq!(library.find_author(id).unwrap().name, "Cecília Meireles");
}

#[test]
fn updates_of_unknown_ids_fail_and_leave_store_unchanged() {
    let (_dir, store) = ready_store();
    let library = SqliteLibraryService::for_store(&store);

    let author_id = library.add_author("Monteiro Lobato").unwrap();
    let book_id = library.add_book("Urupês", author_id).unwrap();

    assert!(!library.update_author(author_id + 100, "Nobody"));
    assert!(!library.update_book(book_id + 100, "Nothing", author_id));
    assert!(!library.delete_book(book_id + 100));

    assert_eq!(library.list_authors().len(), 1);
    let books = library.list_books_with_author();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Urupês");
}

#[test]
fn successful_updates_are_visible_in_listings() {
    let (_dir, store) = ready_store();
    let library = SqliteLibraryService::for_store(&store);

    let first = library.add_author("Aluísio Azevedo").unwrap();
    let second = library.add_author("Artur Azevedo").unwrap();
    let book_id = library.add_book("O Cortiço", first).unwrap();

    assert!(library.update_author(first, "Aluísio de Azevedo"));
    assert!(library.update_book(book_id, "O Cortiço (1890)", second));

    let book = library.find_book(book_id).unwrap();
    assert_eq!(book.title, "O Cortiço (1890)");
    assert_eq!(book.author_name, "Artur Azevedo");
}

#[test]
fn unopenable_store_yields_empty_reads_and_failed_writes() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::at(dir.path().join("absent").join("library.db"));
    let library = SqliteLibraryService::for_store(&store);

    assert_eq!(library.add_author("Anyone"), None);
    assert!(library.list_authors().is_empty());
    assert!(library.list_books_with_author().is_empty());
    assert!(!library.delete_author(1));
    assert!(library.find_book(1).is_none());
}
