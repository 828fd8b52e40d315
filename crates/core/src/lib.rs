#![warn(clippy::all, missing_docs)]

//! Core domain logic for the gamecal release browser.
//!
//! This crate hosts the catalog data model, the filter/sort query pipeline,
//! the pure view descriptions with their HTML rendering, snapshot export,
//! and configuration handling used by the terminal UI and any future
//! frontends.

pub mod catalog;
pub mod config;
pub mod markup;
pub mod models;
pub mod query;
pub mod snapshot;
pub mod view;

pub use catalog::{Catalog, CatalogError};
pub use crate::config::AppConfig;
pub use models::{GameEntry, ReleaseStatus};
pub use query::{CategoryFilter, SortDirection, ViewState};
pub use view::{CalendarView, ListView, ModalView};
