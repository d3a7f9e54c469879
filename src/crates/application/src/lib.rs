pub mod auth;
pub mod command;
pub mod error;
pub mod image;
pub mod query;
pub mod shared;
