//! Database models

use chrono::{Datelike, NaiveDate};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// A row of the `movie` table
///
/// `genre` and `rating` are nullable in storage but non-optional here:
/// decoding a row whose genre or rating is NULL fails with
/// `sqlx::Error::ColumnDecode`. The catalog's repair pass clears those rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// Generated on insert, never reassigned
    pub id: i64,
    pub title: Option<String>,
    pub release_date: NaiveDate,
    pub genre: String,
    pub price: f64,
    pub rating: String,
}

impl Movie {
    /// Calendar year of the release date
    pub fn release_year(&self) -> i32 {
        self.release_date.year()
    }
}

/// Read a nullable TEXT column that must hold a value
///
/// sqlx reads NULL into `String` as an empty string, so NULL is rejected here.
fn required_text(row: &SqliteRow, column: &str) -> Result<String, sqlx::Error> {
    row.try_get::<Option<String>, _>(column)?
        .ok_or_else(|| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: format!("unexpected NULL in column '{}'", column).into(),
        })
}

impl<'r> FromRow<'r, SqliteRow> for Movie {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            release_date: row.try_get("release_date")?,
            genre: required_text(row, "genre")?,
            price: row.try_get("price")?,
            rating: required_text(row, "rating")?,
        })
    }
}
