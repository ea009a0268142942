//! # MvcMovie Common Library
//!
//! Shared code for the movie catalog workspace:
//! - Database initialization, schema and seed data
//! - The `Movie` record model
//! - Configuration loading and root folder resolution
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use db::models::Movie;
pub use error::{Error, Result};
