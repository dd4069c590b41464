//! Store adapter for the recipe tables

pub mod recipes;

pub use recipes::{create_recipe, delete_recipe, get_recipe, list_page, search, update_recipe};
