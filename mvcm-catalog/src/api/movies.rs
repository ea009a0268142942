//! Movie pages and form submissions
//!
//! Handlers translate query strings, path ids and posted forms into catalog
//! calls and render the outcome. A missing or non-numeric path id reaches
//! the handler as `None`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use crate::catalog;
use crate::db::MovieFilter;
use crate::error::{CatalogError, CatalogResult};
use crate::forms::{FieldErrors, MovieEditForm, MovieForm};
use crate::views;
use crate::AppState;

const LIST_PATH: &str = "/movies";

/// Query parameters for the movie list
///
/// Kept as strings so a malformed year is ignored instead of rejected.
#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    pub movie_genre: Option<String>,
    pub search_string: Option<String>,
    pub release_year: Option<String>,
}

impl From<IndexParams> for MovieFilter {
    fn from(params: IndexParams) -> Self {
        let min_release_year = params
            .release_year
            .as_deref()
            .and_then(|year| year.trim().parse().ok());

        MovieFilter::new(params.movie_genre, params.search_string, min_release_year)
    }
}

fn path_id(id: Option<Path<i64>>) -> Option<i64> {
    id.map(|Path(id)| id)
}

/// Build movie routes
pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(LIST_PATH) }))
        .route("/movies", get(index))
        .route("/movies/details", get(details))
        .route("/movies/details/:id", get(details))
        .route("/movies/create", get(create_form).post(create_submit))
        .route("/movies/edit", get(edit_form))
        .route("/movies/edit/:id", get(edit_form).post(edit_submit))
        .route("/movies/delete", get(delete_confirm))
        .route("/movies/delete/:id", get(delete_confirm).post(delete_submit))
}

/// GET /movies
///
/// Filtered list. Runs the repair pass before reading.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> CatalogResult<Html<String>> {
    let listing = catalog::list_movies(&state.db, params.into()).await?;
    Ok(Html(views::index_page(&listing)))
}

/// GET /movies/details/:id
pub async fn details(
    State(state): State<AppState>,
    id: Option<Path<i64>>,
) -> CatalogResult<Html<String>> {
    let movie = catalog::get_movie(&state.db, path_id(id)).await?;
    Ok(Html(views::details_page(&movie)))
}

/// GET /movies/create
pub async fn create_form() -> Html<String> {
    Html(views::create_page(&MovieForm::default(), &FieldErrors::default()))
}

/// POST /movies/create
///
/// Redirects to the list on success, re-shows the form on validation failure.
pub async fn create_submit(
    State(state): State<AppState>,
    Form(form): Form<MovieForm>,
) -> CatalogResult<Response> {
    match catalog::create_movie(&state.db, form).await {
        Ok(_) => Ok(Redirect::to(LIST_PATH).into_response()),
        Err(CatalogError::Validation(rejected)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::create_page(&rejected.form, &rejected.errors)),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// GET /movies/edit/:id
pub async fn edit_form(
    State(state): State<AppState>,
    id: Option<Path<i64>>,
) -> CatalogResult<Html<String>> {
    let movie = catalog::get_movie(&state.db, path_id(id)).await?;
    Ok(Html(views::edit_page(
        movie.id,
        &MovieForm::from_movie(&movie),
        &FieldErrors::default(),
    )))
}

/// POST /movies/edit/:id
pub async fn edit_submit(
    State(state): State<AppState>,
    id: Option<Path<i64>>,
    Form(form): Form<MovieEditForm>,
) -> CatalogResult<Response> {
    let Some(id) = path_id(id) else {
        return Err(CatalogError::NotFound);
    };

    match catalog::update_movie(&state.db, id, form).await {
        Ok(_) => Ok(Redirect::to(LIST_PATH).into_response()),
        Err(CatalogError::Validation(rejected)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::edit_page(id, &rejected.form, &rejected.errors)),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// GET /movies/delete/:id
///
/// Confirmation page; the only delete step that reports not found.
pub async fn delete_confirm(
    State(state): State<AppState>,
    id: Option<Path<i64>>,
) -> CatalogResult<Html<String>> {
    let movie = catalog::get_movie(&state.db, path_id(id)).await?;
    Ok(Html(views::delete_page(&movie)))
}

/// POST /movies/delete/:id
///
/// Always redirects to the list, whether or not the movie still existed.
pub async fn delete_submit(
    State(state): State<AppState>,
    id: Option<Path<i64>>,
) -> CatalogResult<Redirect> {
    if let Some(id) = path_id(id) {
        catalog::delete_movie(&state.db, id).await?;
    }
    Ok(Redirect::to(LIST_PATH))
}
