//! Catalog service
//!
//! Listing with filters, single-record lookup, create, update and delete
//! over the movie table. Listing also repairs rows whose genre or rating is
//! NULL, since such rows cannot be decoded into a `Movie`.
//!
//! Requests run concurrently against the shared pool and nothing here holds
//! a lock between statements, so another request may write between any two
//! steps of an operation.

use mvcm_common::Movie;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::db::movies::{self, ListingQuery, MovieFilter};
use crate::error::{CatalogError, CatalogResult, Rejected};
use crate::forms::{MovieEditForm, MovieForm};

/// Genre written over NULL genres
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Rating written over NULL ratings
pub const UNRATED: &str = "Unrated";

/// Result of a list call
#[derive(Debug, Clone, PartialEq)]
pub struct MovieListing {
    /// Matching movies in storage order
    pub movies: Vec<Movie>,
    /// Every distinct genre in the table (not just the matches), ascending
    pub genres: Vec<String>,
    /// The filter the listing was produced with
    pub filter: MovieFilter,
}

/// Rows touched by a repair pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairOutcome {
    pub genres_fixed: u64,
    pub ratings_fixed: u64,
}

impl RepairOutcome {
    pub fn is_noop(&self) -> bool {
        self.genres_fixed == 0 && self.ratings_fixed == 0
    }
}

/// Set NULL genres to "Unknown" and NULL ratings to "Unrated"
///
/// Idempotent: a second call right after the first changes nothing.
pub async fn repair_missing_fields(pool: &SqlitePool) -> CatalogResult<RepairOutcome> {
    let (genres_fixed, ratings_fixed) =
        movies::fill_missing_fields(pool, UNKNOWN_GENRE, UNRATED).await?;

    let outcome = RepairOutcome {
        genres_fixed,
        ratings_fixed,
    };
    if !outcome.is_noop() {
        info!(
            "Repaired movie rows: {} genre(s) set to '{}', {} rating(s) set to '{}'",
            genres_fixed, UNKNOWN_GENRE, ratings_fixed, UNRATED
        );
    }

    Ok(outcome)
}

/// List movies matching `filter`, with the full genre list
///
/// On success no row in the table has a NULL genre or rating.
pub async fn list_movies(pool: &SqlitePool, filter: MovieFilter) -> CatalogResult<MovieListing> {
    if !movies::table_available(pool).await? {
        return Err(CatalogError::Configuration(
            "Movie storage is not initialized (table 'movie' is missing)".to_string(),
        ));
    }

    repair_missing_fields(pool).await?;

    let mut genres = movies::distinct_genres(pool).await?;
    let mut query = ListingQuery::build(&filter);

    // A concurrent writer may have inserted NULLs after the repair above.
    // Repair again and rebuild both the genre list and the query.
    let unrepaired = movies::ids_with_missing_fields(pool).await?;
    if !unrepaired.is_empty() {
        warn!(
            "Found {} movie row(s) with missing fields after repair: {:?}",
            unrepaired.len(),
            unrepaired
        );
        repair_missing_fields(pool).await?;
        genres = movies::distinct_genres(pool).await?;
        query = ListingQuery::build(&filter);
    }

    debug!("Listing movies: {}", query.sql());
    let found = query.fetch_all(pool).await?;

    Ok(MovieListing {
        movies: found,
        genres,
        filter,
    })
}

/// Look up one movie; an absent id is not found too
///
/// A row with a NULL genre or rating is repaired and read again.
pub async fn get_movie(pool: &SqlitePool, id: Option<i64>) -> CatalogResult<Movie> {
    let Some(id) = id else {
        return Err(CatalogError::NotFound);
    };

    let found = match movies::find_movie(pool, id).await {
        Err(mvcm_common::Error::Database(sqlx::Error::ColumnDecode { index, .. })) => {
            warn!("Movie {} has NULL {}; repairing before read", id, index);
            repair_missing_fields(pool).await?;
            movies::find_movie(pool, id).await?
        }
        other => other?,
    };

    match found {
        Some(movie) => Ok(movie),
        None => {
            warn!("Movie {} not found", id);
            Err(CatalogError::NotFound)
        }
    }
}

/// Validate and insert a new movie
pub async fn create_movie(pool: &SqlitePool, form: MovieForm) -> CatalogResult<Movie> {
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => return Err(CatalogError::Validation(Box::new(Rejected { form, errors }))),
    };

    let id = movies::insert_movie(pool, &fields).await?;
    info!("Created movie {} ({:?})", id, fields.title);

    Ok(fields.into_movie(id))
}

/// Validate and fully replace movie `id`
///
/// The posted id must match `id`. If the update writes no row, the movie is
/// looked up again: gone means not found, still present is a conflict this
/// layer cannot resolve.
/// With `WHERE id = ?` on an AUTOINCREMENT key, that second case only
/// arises when something else vetoes the write, such as a trigger.
pub async fn update_movie(
    pool: &SqlitePool,
    id: i64,
    form: MovieEditForm,
) -> CatalogResult<Movie> {
    let (posted_id, form) = form.into_parts();
    if posted_id != Some(id) {
        warn!("Edit of movie {} posted mismatched id {:?}", id, posted_id);
        return Err(CatalogError::NotFound);
    }

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => return Err(CatalogError::Validation(Box::new(Rejected { form, errors }))),
    };

    let written = movies::replace_movie(pool, id, &fields).await?;
    if written == 0 {
        if !movies::movie_exists(pool, id).await? {
            warn!("Movie {} was deleted before the edit was saved", id);
            return Err(CatalogError::NotFound);
        }
        return Err(CatalogError::ConcurrencyConflict { id });
    }

    info!("Updated movie {}", id);
    Ok(fields.into_movie(id))
}

/// Delete movie `id` if it exists; succeeds either way
pub async fn delete_movie(pool: &SqlitePool, id: i64) -> CatalogResult<()> {
    let removed = movies::delete_movie(pool, id).await?;
    if removed == 0 {
        debug!("Delete of movie {}: already absent", id);
    } else {
        info!("Deleted movie {}", id);
    }

    Ok(())
}
