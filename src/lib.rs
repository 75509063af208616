pub mod account;
pub mod api;
pub mod auth;
pub mod cli;
pub mod error;
pub mod logger;
pub mod validate;
