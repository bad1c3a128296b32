use crate::forms;
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

const BOOK_COLUMNS: &str =
    "id, title, description, author, publisher, publication_year, created_at, updated_at";

pub async fn fetch(pool: &PgPool, id: i64) -> Result<Option<models::Book>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching the book by ID", book_id = id);
    sqlx::query_as::<_, models::Book>(&format!(
        "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1 LIMIT 1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::Book>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching all books");
    sqlx::query_as::<_, models::Book>(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))
        .fetch_all(pool)
        .instrument(query_span)
        .await
}

pub async fn insert(pool: &PgPool, book: &forms::BookForm) -> Result<i64, sqlx::Error> {
    let query_span = tracing::info_span!("Saving new book into the database");
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO books (title, description, author, publisher, publication_year, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
        RETURNING id
        "#,
    )
    .bind(&book.title)
    .bind(&book.description)
    .bind(&book.author)
    .bind(&book.publisher)
    .bind(book.publication_year)
    .fetch_one(pool)
    .instrument(query_span)
    .await?;

    tracing::info!("New book {} has been saved to the database", id);
    Ok(id)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    changes: &models::BookChanges,
) -> Result<Option<models::Book>, sqlx::Error> {
    let query_span = tracing::info_span!("Updating book in the database", book_id = id);
    sqlx::query_as::<_, models::Book>(&format!(
        r#"
        UPDATE books
        SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            author = COALESCE($4, author),
            publisher = COALESCE($5, publisher),
            publication_year = COALESCE($6, publication_year),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {BOOK_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&changes.title)
    .bind(&changes.description)
    .bind(&changes.author)
    .bind(&changes.publisher)
    .bind(changes.publication_year)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let query_span = tracing::info_span!("Deleting book from the database", book_id = id);
    sqlx::query("DELETE FROM books WHERE id = $1")
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected())
}
