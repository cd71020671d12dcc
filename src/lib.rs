pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod portal;
pub mod survey;
pub mod ui;

pub use error::{CatalogError, SurveyError};
pub use portal::SurveyPortal;
