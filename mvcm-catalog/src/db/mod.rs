//! Database access layer for mvcm-catalog
//!
//! Schema creation and seeding live in `mvcm_common::db`; this module holds
//! the queries the catalog issues against the movie table.

pub mod movies;

pub use movies::{ListingQuery, MovieFilter};
