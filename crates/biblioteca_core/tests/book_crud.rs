use biblioteca_core::{
    ensure_schema, AuthorId, AuthorRepository, Book, BookRepository, Entity, FailureKind,
    RepoError, SqliteAuthorRepository, SqliteBookRepository, Store, ValidationError,
};
use tempfile::TempDir;

fn ready_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::at(dir.path().join("books.db"));
    ensure_schema(&store).unwrap();
    (dir, store)
}

fn seed_author(store: &Store, name: &str) -> AuthorId {
    SqliteAuthorRepository::new(store).add(name).unwrap()
}

fn book_count(store: &Store) -> i64 {
    store
        .connect()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM book;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn add_then_find_by_id_roundtrip() {
    let (_dir, store) = ready_store();
    let author_id = seed_author(&store, "Cecília Meireles");
    let repo = SqliteBookRepository::new(&store);

    let id = repo.add("Romanceiro da Inconfidência", author_id).unwrap();
    let loaded = repo.find_by_id(id).unwrap().unwrap();

    assert_eq!(loaded.author_name, "Cecília Meireles");
    assert_eq!(
        loaded.into_book(),
        Book {
            id,
            title: "Romanceiro da Inconfidência".to_string(),
            author_id,
        }
    );
}

#[test]
fn add_with_missing_author_fails_without_row() {
    let (_dir, store) = ready_store();
    let repo = SqliteBookRepository::new(&store);

    let err = repo.add("Orphan Title", 999).unwrap_err();

    assert!(matches!(err, RepoError::AuthorNotFound(999)));
    assert_eq!(err.kind(), FailureKind::ReferentialIntegrity);
    assert_eq!(book_count(&store), 0);
    assert!(repo
        .list_with_author()
        .unwrap()
        .iter()
        .all(|book| book.title != "Orphan Title"));
}

#[test]
fn add_blank_title_is_rejected() {
    let (_dir, store) = ready_store();
    let author_id = seed_author(&store, "Clarice Lispector");
    let repo = SqliteBookRepository::new(&store);

    let err = repo.add("  ", author_id).unwrap_err();

    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyField("title"))
    ));
    assert_eq!(book_count(&store), 0);
}

#[test]
fn titles_are_not_unique() {
    let (_dir, store) = ready_store();
    let first = seed_author(&store, "Author One");
    let second = seed_author(&store, "Author Two");
    let repo = SqliteBookRepository::new(&store);

    let a = repo.add("Poemas", first).unwrap();
    let b = repo.add("Poemas", second).unwrap();

    assert_ne!(a, b);
    assert_eq!(book_count(&store), 2);
}

#[test]
fn list_with_author_orders_by_title_and_pairs_author_names() {
    let (_dir, store) = ready_store();
    let drummond = seed_author(&store, "Carlos Drummond de Andrade");
    let cecilia = seed_author(&store, "Cecília Meireles");
    let repo = SqliteBookRepository::new(&store);

    repo.add("Sentimento do Mundo", drummond).unwrap();
    repo.add("Romanceiro da Inconfidência", cecilia).unwrap();
    repo.add("A Rosa do Povo", drummond).unwrap();

    let listed: Vec<_> = repo
        .list_with_author()
        .unwrap()
        .into_iter()
        .map(|book| (book.title, book.author_name, book.author_id))
        .collect();

    assert_eq!(
        listed,
        vec![
            (
                "A Rosa do Povo".to_string(),
                "Carlos Drummond de Andrade".to_string(),
                drummond
            ),
            (
                "Romanceiro da Inconfidência".to_string(),
                "Cecília Meireles".to_string(),
                cecilia
            ),
            (
                "Sentimento do Mundo".to_string(),
                "Carlos Drummond de Andrade".to_string(),
                drummond
            ),
        ]
    );
}

#[test]
fn update_changes_title_and_author_together() {
    let (_dir, store) = ready_store();
    let original = seed_author(&store, "Original");
    let replacement = seed_author(&store, "Replacement");
    let repo = SqliteBookRepository::new(&store);

    let id = repo.add("Draft", original).unwrap();
    repo.update(id, "Final", replacement).unwrap();

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.title, "Final");
    assert_eq!(loaded.author_id, replacement);
    assert_eq!(loaded.author_name, "Replacement");
}

#[test]
fn update_to_missing_author_has_no_partial_effect() {
    let (_dir, store) = ready_store();
    let author_id = seed_author(&store, "Raul Pompeia");
    let repo = SqliteBookRepository::new(&store);

    let id = repo.add("O Ateneu", author_id).unwrap();
    let err = repo.update(id, "Renamed", 404).unwrap_err();

    assert!(matches!(err, RepoError::AuthorNotFound(404)));
    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.title, "O Ateneu");
    assert_eq!(loaded.author_id, author_id);
}

#[test]
fn update_unknown_book_returns_not_found() {
    let (_dir, store) = ready_store();
    let author_id = seed_author(&store, "Euclides da Cunha");
    let repo = SqliteBookRepository::new(&store);
    repo.add("Os Sertões", author_id).unwrap();

    let err = repo.update(77, "Ghost", author_id).unwrap_err();

    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: Entity::Book,
            id: 77
        }
    ));
    assert_eq!(book_count(&store), 1);
}

#[test]
fn delete_removes_existing_book_only() {
    let (_dir, store) = ready_store();
    let author_id = seed_author(&store, "José de Alencar");
    let repo = SqliteBookRepository::new(&store);

    let id = repo.add("Iracema", author_id).unwrap();
    repo.delete(id).unwrap();

    assert!(repo.find_by_id(id).unwrap().is_none());
    let err = repo.delete(id).unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);
}

#[test]
fn deleting_last_book_unblocks_author_delete() {
    let (_dir, store) = ready_store();
    let authors = SqliteAuthorRepository::new(&store);
    let books = SqliteBookRepository::new(&store);

    let author_id = authors.add("Cecília Meireles").unwrap();
    let book_id = books.add("Romanceiro da Inconfidência", author_id).unwrap();

    assert!(matches!(
        authors.delete(author_id),
        Err(RepoError::AuthorHasBooks(_))
    ));
    books.delete(book_id).unwrap();
    authors.delete(author_id).unwrap();

    assert!(authors.list().unwrap().is_empty());
}

#[test]
fn find_by_id_of_unknown_book_is_none() {
    let (_dir, store) = ready_store();
    let repo = SqliteBookRepository::new(&store);

    assert!(repo.find_by_id(1).unwrap().is_none());
}
