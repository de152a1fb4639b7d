pub mod prompt;
pub mod recipe_service;

pub use recipe_service::*;
