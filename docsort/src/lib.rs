pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;
