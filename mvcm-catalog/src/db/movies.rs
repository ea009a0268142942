//! Movie table queries
//!
//! Thin wrappers over the statements the catalog issues. Callers decide what
//! an empty result or a zero row count means.

use mvcm_common::{Movie, Result};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::forms::MovieFields;

const MOVIE_COLUMNS: &str = "id, title, release_date, genre, price, rating";

/// Search criteria for listing movies
///
/// Empty strings count as "no filter"; construct through `new` to normalize.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    /// Exact, case-sensitive genre match
    pub genre: Option<String>,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
    /// Inclusive lower bound on the release year
    pub min_release_year: Option<i32>,
}

impl MovieFilter {
    pub fn new(
        genre: Option<String>,
        search: Option<String>,
        min_release_year: Option<i32>,
    ) -> Self {
        Self {
            genre: genre.filter(|g| !g.is_empty()),
            search: search.filter(|s| !s.is_empty()),
            min_release_year,
        }
    }
}

/// A built, not yet executed, filtered select over the movie table
pub struct ListingQuery {
    builder: QueryBuilder<'static, Sqlite>,
}

impl ListingQuery {
    /// Build the select for `filter`
    pub fn build(filter: &MovieFilter) -> Self {
        let mut builder =
            QueryBuilder::new(format!("SELECT {} FROM movie WHERE 1 = 1", MOVIE_COLUMNS));

        // instr() keeps % and _ in the search text literal
        if let Some(search) = &filter.search {
            builder
                .push(" AND instr(upper(title), upper(")
                .push_bind(search.clone())
                .push(")) > 0");
        }

        if let Some(genre) = &filter.genre {
            builder.push(" AND genre = ").push_bind(genre.clone());
        }

        if let Some(year) = filter.min_release_year {
            builder
                .push(" AND CAST(strftime('%Y', release_date) AS INTEGER) >= ")
                .push_bind(year);
        }

        builder.push(" ORDER BY id");

        Self { builder }
    }

    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    /// Execute and decode every matching row
    pub async fn fetch_all(mut self, pool: &SqlitePool) -> Result<Vec<Movie>> {
        let movies = self
            .builder
            .build_query_as::<Movie>()
            .fetch_all(pool)
            .await?;
        Ok(movies)
    }
}

/// Whether the movie table exists
pub async fn table_available(pool: &SqlitePool) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'movie')",
    )
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Replace NULL genre and rating with the given values across the table
///
/// Returns (genres fixed, ratings fixed). Both statements commit together.
pub async fn fill_missing_fields(
    pool: &SqlitePool,
    genre: &str,
    rating: &str,
) -> Result<(u64, u64)> {
    let mut tx = pool.begin().await?;

    let genres = sqlx::query("UPDATE movie SET genre = ? WHERE genre IS NULL")
        .bind(genre)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let ratings = sqlx::query("UPDATE movie SET rating = ? WHERE rating IS NULL")
        .bind(rating)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    Ok((genres, ratings))
}

/// Ids of rows that would fail to decode as `Movie`
///
/// Selects ids only, so it is safe to run before any repair.
pub async fn ids_with_missing_fields(pool: &SqlitePool) -> Result<Vec<i64>> {
    let ids = sqlx::query_scalar(
        "SELECT id FROM movie WHERE genre IS NULL OR rating IS NULL ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Distinct non-NULL genres across the whole table, ascending
pub async fn distinct_genres(pool: &SqlitePool) -> Result<Vec<String>> {
    let genres = sqlx::query_scalar(
        "SELECT DISTINCT genre FROM movie WHERE genre IS NOT NULL ORDER BY genre",
    )
    .fetch_all(pool)
    .await?;

    Ok(genres)
}

/// Load a movie by id
pub async fn find_movie(pool: &SqlitePool, id: i64) -> Result<Option<Movie>> {
    let movie = sqlx::query_as::<_, Movie>(&format!(
        "SELECT {} FROM movie WHERE id = ?",
        MOVIE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(movie)
}

pub async fn movie_exists(pool: &SqlitePool, id: i64) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM movie WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// Insert a movie, returning the generated id
pub async fn insert_movie(pool: &SqlitePool, fields: &MovieFields) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO movie (title, release_date, genre, price, rating)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.title)
    .bind(fields.release_date)
    .bind(&fields.genre)
    .bind(fields.price)
    .bind(&fields.rating)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Replace every column of movie `id`
///
/// Returns the number of rows written; 0 means the row is gone.
pub async fn replace_movie(pool: &SqlitePool, id: i64, fields: &MovieFields) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE movie
        SET title = ?, release_date = ?, genre = ?, price = ?, rating = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.title)
    .bind(fields.release_date)
    .bind(&fields.genre)
    .bind(fields.price)
    .bind(&fields.rating)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Delete movie `id`; returns rows removed (0 if it did not exist)
pub async fn delete_movie(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM movie WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
