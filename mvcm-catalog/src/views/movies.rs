//! Movie pages: list, details, create, edit, delete

use mvcm_common::Movie;

use super::{escape_html, layout};
use crate::catalog::MovieListing;
use crate::forms::{FieldErrors, MovieForm, DATE_FORMAT};

fn display_title(movie: &Movie) -> String {
    escape_html(movie.title.as_deref().unwrap_or(""))
}

fn display_date(movie: &Movie) -> String {
    movie.release_date.format(DATE_FORMAT).to_string()
}

fn display_price(movie: &Movie) -> String {
    format!("${:.2}", movie.price)
}

/// GET /movies
pub fn index_page(listing: &MovieListing) -> String {
    let filter = &listing.filter;
    let selected_genre = filter.genre.as_deref().unwrap_or("");

    let mut genre_options = String::from(r#"<option value="">All</option>"#);
    for genre in &listing.genres {
        let selected = if genre == selected_genre { " selected" } else { "" };
        genre_options.push_str(&format!(
            r#"<option value="{value}"{selected}>{value}</option>"#,
            value = escape_html(genre),
            selected = selected,
        ));
    }

    let rows: String = listing
        .movies
        .iter()
        .map(|movie| {
            format!(
                r#"
                <tr>
                    <td>{title}</td>
                    <td>{date}</td>
                    <td>{genre}</td>
                    <td>{price}</td>
                    <td>{rating}</td>
                    <td>
                        <a href="/movies/edit/{id}">Edit</a> |
                        <a href="/movies/details/{id}">Details</a> |
                        <a href="/movies/delete/{id}">Delete</a>
                    </td>
                </tr>"#,
                id = movie.id,
                title = display_title(movie),
                date = display_date(movie),
                genre = escape_html(&movie.genre),
                price = display_price(movie),
                rating = escape_html(&movie.rating),
            )
        })
        .collect();

    let empty_note = if listing.movies.is_empty() {
        r#"<p>No movies match the current filter.</p>"#
    } else {
        ""
    };

    let body = format!(
        r#"        <h2>Movies</h2>
        <p><a class="button" href="/movies/create">Create New</a></p>
        <form class="filters" method="get" action="/movies">
            <select name="movie_genre">{genre_options}</select>
            <label>Title: <input type="text" name="search_string" value="{search}"></label>
            <label>Released from: <input type="number" name="release_year" value="{year}" placeholder="Year"></label>
            <input class="button" type="submit" value="Filter">
        </form>
        <table>
            <thead>
                <tr>
                    <th>Title</th>
                    <th>Release Date</th>
                    <th>Genre</th>
                    <th>Price</th>
                    <th>Rating</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>{rows}
            </tbody>
        </table>
        {empty_note}"#,
        genre_options = genre_options,
        search = escape_html(filter.search.as_deref().unwrap_or("")),
        year = filter
            .min_release_year
            .map(|y| y.to_string())
            .unwrap_or_default(),
        rows = rows,
        empty_note = empty_note,
    );

    layout("Movies", &body)
}

fn movie_definition_list(movie: &Movie) -> String {
    format!(
        r#"        <dl>
            <dt>Title</dt><dd>{title}</dd>
            <dt>Release Date</dt><dd>{date}</dd>
            <dt>Genre</dt><dd>{genre}</dd>
            <dt>Price</dt><dd>{price}</dd>
            <dt>Rating</dt><dd>{rating}</dd>
        </dl>"#,
        title = display_title(movie),
        date = display_date(movie),
        genre = escape_html(&movie.genre),
        price = display_price(movie),
        rating = escape_html(&movie.rating),
    )
}

/// GET /movies/details/:id
pub fn details_page(movie: &Movie) -> String {
    let body = format!(
        r#"        <h2>Details</h2>
{list}
        <p>
            <a href="/movies/edit/{id}">Edit</a> |
            <a href="/movies">Back to List</a>
        </p>"#,
        list = movie_definition_list(movie),
        id = movie.id,
    );
    layout("Details", &body)
}

/// GET /movies/delete/:id
pub fn delete_page(movie: &Movie) -> String {
    let body = format!(
        r#"        <h2>Delete</h2>
        <h3>Are you sure you want to delete this?</h3>
{list}
        <form method="post" action="/movies/delete/{id}">
            <input class="button danger" type="submit" value="Delete"> |
            <a href="/movies">Back to List</a>
        </form>"#,
        list = movie_definition_list(movie),
        id = movie.id,
    );
    layout("Delete", &body)
}

fn input_field(
    name: &str,
    label: &str,
    attrs: &str,
    value: &str,
    errors: &FieldErrors,
) -> String {
    let error = errors
        .get(name)
        .map(|message| format!(r#"<span class="error">{}</span>"#, escape_html(message)))
        .unwrap_or_default();

    format!(
        r#"
            <div class="field">
                <label for="{name}">{label}</label>
                <input id="{name}" name="{name}" {attrs} value="{value}">
                {error}
            </div>"#,
        name = name,
        label = label,
        attrs = attrs,
        value = escape_html(value),
        error = error,
    )
}

fn form_page(
    heading: &str,
    action: &str,
    hidden_id: Option<i64>,
    form: &MovieForm,
    errors: &FieldErrors,
) -> String {
    let hidden = hidden_id
        .map(|id| format!(r#"<input type="hidden" name="id" value="{}">"#, id))
        .unwrap_or_default();

    let summary = if errors.is_empty() {
        String::new()
    } else {
        r#"<p class="error">Please correct the errors below.</p>"#.to_string()
    };

    let body = format!(
        r#"        <h2>{heading}</h2>
        <h4>Movie</h4>
        {summary}
        <form method="post" action="{action}">
            {hidden}{title}{date}{genre}{price}{rating}
            <div class="field">
                <input class="button" type="submit" value="Save">
            </div>
        </form>
        <p><a href="/movies">Back to List</a></p>"#,
        heading = heading,
        summary = summary,
        action = action,
        hidden = hidden,
        title = input_field("title", "Title", r#"type="text""#, &form.title, errors),
        date = input_field("release_date", "Release Date", r#"type="date""#, &form.release_date, errors),
        genre = input_field("genre", "Genre", r#"type="text""#, &form.genre, errors),
        price = input_field("price", "Price", r#"type="number" step="0.01""#, &form.price, errors),
        rating = input_field("rating", "Rating", r#"type="text""#, &form.rating, errors),
    );

    layout(heading, &body)
}

/// GET /movies/create, or a rejected create
pub fn create_page(form: &MovieForm, errors: &FieldErrors) -> String {
    form_page("Create", "/movies/create", None, form, errors)
}

/// GET /movies/edit/:id, or a rejected edit
pub fn edit_page(id: i64, form: &MovieForm, errors: &FieldErrors) -> String {
    form_page("Edit", &format!("/movies/edit/{}", id), Some(id), form, errors)
}
