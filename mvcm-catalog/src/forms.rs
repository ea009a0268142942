//! Form input shaping and validation
//!
//! Posted forms deserialize into DTOs that carry only the editable fields,
//! as raw strings. `MovieForm` has no `id`, so a create request cannot forge
//! one; any extra posted field is dropped by deserialization.

use chrono::NaiveDate;
use mvcm_common::Movie;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Letters and spaces, starting with an uppercase letter
static GENRE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]+[a-zA-Z\s]*$").expect("valid genre pattern"));

/// Uppercase start, then letters, digits, quotes, spaces and hyphens (e.g. "PG-13")
static RATING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[A-Z]+[a-zA-Z0-9"'\s-]*$"#).expect("valid rating pattern"));

const TITLE_MIN_LEN: usize = 3;
const TITLE_MAX_LEN: usize = 60;
const GENRE_MAX_LEN: usize = 30;
const RATING_MAX_LEN: usize = 5;
const PRICE_MIN: f64 = 1.0;
const PRICE_MAX: f64 = 100.0;

/// Date format used by `<input type="date">` and the database
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Create/edit form fields as posted
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovieForm {
    pub title: String,
    pub release_date: String,
    pub genre: String,
    pub price: String,
    pub rating: String,
}

/// Edit form: the movie fields plus the id the page was rendered for
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovieEditForm {
    pub id: String,
    pub title: String,
    pub release_date: String,
    pub genre: String,
    pub price: String,
    pub rating: String,
}

impl MovieEditForm {
    /// Split into the posted id (if it parses) and the editable fields
    pub fn into_parts(self) -> (Option<i64>, MovieForm) {
        let id = self.id.trim().parse().ok();
        let form = MovieForm {
            title: self.title,
            release_date: self.release_date,
            genre: self.genre,
            price: self.price,
            rating: self.rating,
        };
        (id, form)
    }
}

/// Validated movie fields, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct MovieFields {
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: String,
    pub price: f64,
    pub rating: String,
}

impl MovieFields {
    /// Attach a stored id
    pub fn into_movie(self, id: i64) -> Movie {
        Movie {
            id,
            title: Some(self.title),
            release_date: self.release_date,
            genre: self.genre,
            price: self.price,
            rating: self.rating,
        }
    }
}

/// Per-field validation messages, in form order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    /// Message for `field`, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl MovieForm {
    /// Prefill a form from a stored record
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone().unwrap_or_default(),
            release_date: movie.release_date.format(DATE_FORMAT).to_string(),
            genre: movie.genre.clone(),
            price: format!("{:.2}", movie.price),
            rating: movie.rating.clone(),
        }
    }

    /// Check every field, collecting all failures
    pub fn validate(&self) -> Result<MovieFields, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = self.title.trim();
        let title_len = title.chars().count();
        if title.is_empty() {
            errors.push("title", "The Title field is required.");
        } else if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&title_len) {
            errors.push(
                "title",
                format!(
                    "Title must be between {} and {} characters.",
                    TITLE_MIN_LEN, TITLE_MAX_LEN
                ),
            );
        }

        let release_date = match self.release_date.trim() {
            "" => {
                errors.push("release_date", "The Release Date field is required.");
                None
            }
            raw => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push("release_date", "Release Date must be a date (YYYY-MM-DD).");
                    None
                }
            },
        };

        let genre = self.genre.trim();
        if genre.is_empty() {
            errors.push("genre", "The Genre field is required.");
        } else if genre.chars().count() > GENRE_MAX_LEN {
            errors.push(
                "genre",
                format!("Genre must be at most {} characters.", GENRE_MAX_LEN),
            );
        } else if !GENRE_PATTERN.is_match(genre) {
            errors.push(
                "genre",
                "Genre must start with an uppercase letter and contain only letters and spaces.",
            );
        }

        let price = match self.price.trim() {
            "" => {
                errors.push("price", "The Price field is required.");
                None
            }
            raw => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() && (PRICE_MIN..=PRICE_MAX).contains(&value) => {
                    Some(value)
                }
                Ok(_) => {
                    errors.push(
                        "price",
                        format!("Price must be between {} and {}.", PRICE_MIN, PRICE_MAX),
                    );
                    None
                }
                Err(_) => {
                    errors.push("price", "Price must be a number.");
                    None
                }
            },
        };

        let rating = self.rating.trim();
        if rating.is_empty() {
            errors.push("rating", "The Rating field is required.");
        } else if rating.chars().count() > RATING_MAX_LEN {
            errors.push(
                "rating",
                format!("Rating must be at most {} characters.", RATING_MAX_LEN),
            );
        } else if !RATING_PATTERN.is_match(rating) {
            errors.push(
                "rating",
                "Rating must start with an uppercase letter (e.g. G, PG-13, R).",
            );
        }

        match (release_date, price) {
            (Some(release_date), Some(price)) if errors.is_empty() => Ok(MovieFields {
                title: title.to_string(),
                release_date,
                genre: genre.to_string(),
                price,
                rating: rating.to_string(),
            }),
            _ => Err(errors),
        }
    }
}
