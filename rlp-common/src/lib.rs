//! # Recipe Level Predictor common library
//!
//! Shared code for the recipe service binaries:
//! - Error taxonomy (`Error`, `Result`)
//! - Database configuration resolution
//! - Recipe domain models
//! - Input validation and coercion
//! - Pagination math
//! - Schema initialization

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod validation;

pub use error::{Error, Result};
pub use models::{Job, NewRecipe, RecipePatch, RecipeWithRelations, SearchCriteria};
pub use validation::{FieldError, FieldErrorKind, ValidationErrors};
