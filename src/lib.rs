pub mod catalog;
pub mod commands;
pub mod document;
pub mod error;
pub mod notes;
pub mod repo;
pub mod runtime;
pub mod wheel;

pub use error::CatalogError;
