pub mod api;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
