//! Pantry Chef: turns the ingredients in your kitchen into AI-generated
//! recipes and keeps them per user.

pub mod api;
pub mod client;
pub mod config;
pub mod database;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;
