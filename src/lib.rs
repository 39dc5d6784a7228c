//! Review proposed updates to doctor profiles, one row at a time.
//!
//! A [`session::ReviewSession`] owns the rows, the per-doctor decision map and
//! the audit log. The [`api`] module serves it as an HTML review page plus a
//! JSON API.

pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod render;
pub mod review;
pub mod seed;
pub mod session;

pub use error::ReviewError;
