//! Sample data for a fresh catalog

use crate::Result;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// (title, release date, genre, price, rating)
const SEED_MOVIES: &[(&str, &str, &str, f64, &str)] = &[
    ("When Harry Met Sally", "1989-02-12", "Romantic Comedy", 7.99, "R"),
    ("Ghostbusters", "1984-03-13", "Comedy", 8.99, "R"),
    ("Ghostbusters 2", "1986-02-23", "Comedy", 9.99, "R"),
    ("Rio Bravo", "1959-04-15", "Western", 3.99, "R"),
];

/// Populate the movie table with sample records if it is empty
///
/// Returns the number of records inserted (0 when the table already had rows).
pub async fn seed_movies(pool: &SqlitePool) -> Result<u64> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movie")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        debug!("Movie table has {} rows, skipping seed", existing);
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for &(title, release_date, genre, price, rating) in SEED_MOVIES {
        sqlx::query(
            r#"
            INSERT INTO movie (title, release_date, genre, price, rating)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(title)
        .bind(release_date)
        .bind(genre)
        .bind(price)
        .bind(rating)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    info!("Seeded movie table with {} records", SEED_MOVIES.len());
    Ok(SEED_MOVIES.len() as u64)
}
