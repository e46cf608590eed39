//! Promotional signup service library.
//!
//! Serves the discount landing pages and captures leads submitted through
//! the signup form into a PostgreSQL table.
//!
//! # Modules
//!
//! - `data`: Data access layer.
//! - `config`: Configuration management.
//! - `db`: Database connection and schema setup.
//! - `db_storage`: Lead storage seam and its implementations.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `intake`: Duplicate check and lead insert.
//! - `models`: Lead and form models.
//! - `pages`: HTML pages.
//! - `routes`: Router assembly.

pub mod data;

pub mod config;
pub mod db;
pub mod db_storage;
pub mod errors;
pub mod handlers;
pub mod intake;
pub mod models;
pub mod pages;
pub mod routes;
