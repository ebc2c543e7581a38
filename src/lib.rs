//! Client and phone-number bookkeeping over PostgreSQL or SQLite.
//!
//! - `config`: environment-driven settings
//! - `db`: the connection and every record operation
//! - `models`: row types and the tagged update/lookup requests
//! - `demo`: the scripted walkthrough run by the binary by default

pub mod config;
pub mod db;
pub mod demo;
pub mod error;
pub mod logging;
pub mod models;

pub use db::Database;
pub use error::DbError;
