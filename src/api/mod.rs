pub mod assistants;
pub mod auth;
pub mod calls;
pub mod client;
pub mod phone_numbers;
pub mod users;
pub mod verification;

pub use client::{ApiClient, ApiError, Envelope, NO_QUERY};
